use crate::{config::Coord, Area};

/// Which of the two draw buffers a descriptor points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferSlot {
    Primary,
    Secondary,
}

/// Draw-buffer bookkeeping shared between the adapter and the renderer.
///
/// Holds no pixels itself, only the shared length of the buffers, whether a
/// second buffer exists, which one is currently rendered into, the area it
/// holds and whether it is being flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawBufferDescriptor {
    pub size: usize,
    pub double_buffered: bool,
    pub active: BufferSlot,
    pub area: Area,
    pub flushing: bool,
}

impl DrawBufferDescriptor {
    /// Describes `primary_len` pixels of primary buffer plus an optional
    /// secondary buffer; rendering starts in the primary buffer.
    pub fn init(primary_len: usize, secondary_len: usize) -> Self {
        DrawBufferDescriptor {
            size: primary_len,
            double_buffered: secondary_len != 0,
            active: BufferSlot::Primary,
            area: Area::new(0, 0, -1, -1),
            flushing: false,
        }
    }

    /// Moves rendering to the other buffer. Single-buffered descriptors stay put.
    pub fn swap(&mut self) {
        if self.double_buffered {
            self.active = match self.active {
                BufferSlot::Primary => BufferSlot::Secondary,
                BufferSlot::Secondary => BufferSlot::Primary,
            };
        }
    }
}

/// Back-reference to the display object an adapter was registered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayHandle(pub u16);

/// Everything a driver hook may need to know about the display it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayDescriptor {
    pub hor_res: Coord,
    pub ver_res: Coord,
    pub handle: DisplayHandle,
    pub buffer: DrawBufferDescriptor,
}

impl DisplayDescriptor {
    pub fn screen(&self) -> Area {
        Area::screen(self.hor_res, self.ver_res)
    }
}
