#![cfg_attr(not(test), no_std)]

mod graphics_target;
mod paged_monochrome;
mod panel;

pub use graphics_target::GraphicsTarget;
pub use paged_monochrome::{PagedMonochrome, PAGE_HEIGHT};
pub use panel::Panel;
