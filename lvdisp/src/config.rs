//! Build-time configuration.
//!
//! Resolution limits and buffer sizing are fixed here; optional behaviour is
//! switched with Cargo features:
//!
//! - `flush-monitoring`: the default [`monitor`](crate::DisplayDriver::monitor)
//!   hook emits a defmt record after every refresh.
//! - `gpu`: compiles the GPU blend/fill hooks.
//! - `defmt`: derives `defmt::Format` on public data types.

/// Pixel coordinate.
pub type Coord = i16;

/// Largest horizontal resolution a display may be configured with.
pub const HOR_RES_MAX: Coord = 480;

/// Largest vertical resolution a display may be configured with.
pub const VER_RES_MAX: Coord = 320;

/// Length, in pixels, of the buffer allocated when the caller supplies none.
pub const DEFAULT_DISPLAY_BUFFER_SIZE: usize = HOR_RES_MAX as usize * 10;

/// Number of invalidated areas queued before the whole screen is redrawn instead.
pub const INV_BUF_SIZE: usize = 32;
