#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod adapter;
mod area;
mod buffer;
pub mod config;
mod descriptor;
pub mod display;
mod driver;
mod error;

pub use adapter::DisplayAdapter;
pub use area::{Area, Opacity};
pub use buffer::DisplayBuffer;
pub use config::Coord;
pub use descriptor::{BufferSlot, DisplayDescriptor, DisplayHandle, DrawBufferDescriptor};
pub use driver::DisplayDriver;
pub use error::{Error, RefreshError};
