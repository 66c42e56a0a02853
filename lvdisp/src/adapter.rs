use embedded_graphics::pixelcolor::PixelColor;
use snafu::ensure;

use crate::{
    config::{Coord, DEFAULT_DISPLAY_BUFFER_SIZE, HOR_RES_MAX, VER_RES_MAX},
    error::{BufferLengthMismatchSnafu, ResolutionOutOfRangeSnafu},
    BufferSlot, DisplayBuffer, DisplayHandle, DrawBufferDescriptor, Error,
};

/// Owns the draw buffers of one display and the state the renderer reads
/// back from it.
///
/// Hardware drivers pair an adapter with a [`DisplayDriver`](crate::DisplayDriver)
/// implementation and hand both to [`Display::register`](crate::display::Display::register).
pub struct DisplayAdapter<'a, C> {
    primary_display_buffer: DisplayBuffer<'a, C>,
    secondary_display_buffer: &'a mut [C],
    hor_res: Coord,
    ver_res: Coord,
    draw_buffer: DrawBufferDescriptor,
    display_handle: Option<DisplayHandle>,
}

impl<'a, C: PixelColor + Default> DisplayAdapter<'a, C> {
    /// Adapter with a freshly allocated buffer of
    /// [`DEFAULT_DISPLAY_BUFFER_SIZE`] pixels.
    pub fn new() -> Self {
        Self::with_buffers(Default::default(), Default::default())
    }

    /// Adapter rendering into `primary`. An empty slice allocates instead.
    pub fn with_buffer(primary: &'a mut [C]) -> Self {
        Self::with_buffers(primary, Default::default())
    }

    /// Adapter rendering alternately into `primary` and `secondary`.
    ///
    /// Panics when both buffers are supplied with different lengths.
    pub fn with_buffers(primary: &'a mut [C], secondary: &'a mut [C]) -> Self {
        match Self::try_with_buffers(primary, secondary) {
            Ok(adapter) => adapter,
            Err(e) => panic!("{}", e),
        }
    }

    /// Empty slices count as "not supplied": an empty `primary` is replaced by
    /// an owned allocation, an empty `secondary` means single buffering.
    pub fn try_with_buffers(primary: &'a mut [C], secondary: &'a mut [C]) -> Result<Self, Error> {
        let primary_len = if primary.is_empty() {
            DEFAULT_DISPLAY_BUFFER_SIZE
        } else {
            primary.len()
        };
        ensure!(
            secondary.is_empty() || secondary.len() == primary_len,
            BufferLengthMismatchSnafu {
                primary: primary_len,
                secondary: secondary.len(),
            }
        );

        let primary_display_buffer = if primary.is_empty() {
            DisplayBuffer::allocate(primary_len)
        } else {
            DisplayBuffer::Borrowed(primary)
        };

        let mut adapter = DisplayAdapter {
            primary_display_buffer,
            secondary_display_buffer: secondary,
            hor_res: HOR_RES_MAX,
            ver_res: VER_RES_MAX,
            draw_buffer: DrawBufferDescriptor::init(0, 0),
            display_handle: None,
        };
        adapter.initialize_display_buffers();
        Ok(adapter)
    }
}

impl<'a, C: PixelColor + Default> Default for DisplayAdapter<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C> DisplayAdapter<'a, C> {
    /// Sets the display's resolution.
    ///
    /// Must happen before the adapter is registered; the registered display
    /// keeps the resolution it saw at registration.
    ///
    /// Panics when either dimension is negative or exceeds
    /// [`HOR_RES_MAX`]/[`VER_RES_MAX`].
    pub fn set_resolution(&mut self, hor_res: Coord, ver_res: Coord) {
        assert!(
            (0..=HOR_RES_MAX).contains(&hor_res),
            "horizontal resolution outside 0..=HOR_RES_MAX"
        );
        assert!(
            (0..=VER_RES_MAX).contains(&ver_res),
            "vertical resolution outside 0..=VER_RES_MAX"
        );
        self.hor_res = hor_res;
        self.ver_res = ver_res;
    }

    pub fn try_set_resolution(&mut self, hor_res: Coord, ver_res: Coord) -> Result<(), Error> {
        ensure!(
            (0..=HOR_RES_MAX).contains(&hor_res) && (0..=VER_RES_MAX).contains(&ver_res),
            ResolutionOutOfRangeSnafu { hor_res, ver_res }
        );
        self.set_resolution(hor_res, ver_res);
        Ok(())
    }

    /// `(horizontal, vertical)` resolution.
    pub fn resolution(&self) -> (Coord, Coord) {
        (self.hor_res, self.ver_res)
    }

    pub fn draw_buffer(&self) -> &DrawBufferDescriptor {
        &self.draw_buffer
    }

    pub fn draw_buffer_mut(&mut self) -> &mut DrawBufferDescriptor {
        &mut self.draw_buffer
    }

    pub fn display_handle(&self) -> Option<DisplayHandle> {
        self.display_handle
    }

    pub fn set_display_handle(&mut self, handle: DisplayHandle) {
        self.display_handle = Some(handle);
    }

    pub fn owns_primary_buffer(&self) -> bool {
        self.primary_display_buffer.is_owned()
    }

    pub fn primary_buffer(&self) -> &[C] {
        self.primary_display_buffer.as_slice()
    }

    /// Empty when single-buffered.
    pub fn secondary_buffer(&self) -> &[C] {
        &*self.secondary_display_buffer
    }

    pub fn buffer(&self, slot: BufferSlot) -> &[C] {
        match slot {
            BufferSlot::Primary => self.primary_display_buffer.as_slice(),
            BufferSlot::Secondary => &*self.secondary_display_buffer,
        }
    }

    pub fn buffer_mut(&mut self, slot: BufferSlot) -> &mut [C] {
        match slot {
            BufferSlot::Primary => self.primary_display_buffer.as_mut_slice(),
            BufferSlot::Secondary => &mut *self.secondary_display_buffer,
        }
    }

    /// Resets the draw-buffer descriptor from the current buffers.
    pub fn initialize_display_buffers(&mut self) {
        self.draw_buffer = DrawBufferDescriptor::init(
            self.primary_display_buffer.len(),
            self.secondary_display_buffer.len(),
        );
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::BinaryColor;

    use super::*;

    #[test]
    fn allocates_default_buffer_without_arguments() {
        let adapter = DisplayAdapter::<BinaryColor>::new();
        assert!(adapter.owns_primary_buffer());
        assert_eq!(adapter.primary_buffer().len(), DEFAULT_DISPLAY_BUFFER_SIZE);
        assert!(adapter.secondary_buffer().is_empty());
        assert_eq!(adapter.draw_buffer().size, DEFAULT_DISPLAY_BUFFER_SIZE);
        assert!(!adapter.draw_buffer().double_buffered);
        assert_eq!(adapter.resolution(), (HOR_RES_MAX, VER_RES_MAX));
        assert_eq!(adapter.display_handle(), None);
    }

    #[test]
    fn adopts_caller_buffers_without_allocating() {
        let mut primary = [BinaryColor::Off; 64];
        let mut secondary = [BinaryColor::Off; 64];
        {
            let mut adapter = DisplayAdapter::with_buffers(&mut primary, &mut secondary);
            assert!(!adapter.owns_primary_buffer());
            assert_eq!(adapter.primary_buffer().len(), 64);
            assert_eq!(adapter.secondary_buffer().len(), 64);
            assert!(adapter.draw_buffer().double_buffered);
            adapter.buffer_mut(BufferSlot::Primary)[0] = BinaryColor::On;
            adapter.buffer_mut(BufferSlot::Secondary)[63] = BinaryColor::On;
        }
        // Still ours after the adapter is gone.
        assert_eq!(primary[0], BinaryColor::On);
        assert_eq!(secondary[63], BinaryColor::On);
    }

    #[test]
    fn single_caller_buffer() {
        let mut primary = [BinaryColor::Off; 32];
        let adapter = DisplayAdapter::with_buffer(&mut primary);
        assert!(!adapter.owns_primary_buffer());
        assert_eq!(adapter.draw_buffer().size, 32);
        assert!(!adapter.draw_buffer().double_buffered);
    }

    #[test]
    fn rejects_mismatched_buffers() {
        let mut primary = [BinaryColor::Off; 64];
        let mut secondary = [BinaryColor::Off; 32];
        let result = DisplayAdapter::try_with_buffers(&mut primary, &mut secondary);
        assert_eq!(
            result.err(),
            Some(Error::BufferLengthMismatch {
                primary: 64,
                secondary: 32
            })
        );
    }

    #[test]
    #[should_panic]
    fn panics_on_mismatched_buffers() {
        let mut primary = [BinaryColor::Off; 64];
        let mut secondary = [BinaryColor::Off; 32];
        DisplayAdapter::with_buffers(&mut primary, &mut secondary);
    }

    #[test]
    fn secondary_alone_must_match_default_size() {
        let mut secondary = [BinaryColor::Off; 32];
        assert!(DisplayAdapter::try_with_buffers(Default::default(), &mut secondary).is_err());
    }

    #[test]
    fn resolution_round_trip() {
        let mut adapter = DisplayAdapter::<BinaryColor>::new();
        adapter.set_resolution(128, 64);
        assert_eq!(adapter.resolution(), (128, 64));
        adapter.set_resolution(HOR_RES_MAX, VER_RES_MAX);
        assert_eq!(adapter.resolution(), (HOR_RES_MAX, VER_RES_MAX));
    }

    #[test]
    fn rejects_oversized_resolution() {
        let mut adapter = DisplayAdapter::<BinaryColor>::new();
        adapter.set_resolution(128, 64);
        assert_eq!(
            adapter.try_set_resolution(HOR_RES_MAX + 1, 64),
            Err(Error::ResolutionOutOfRange {
                hor_res: HOR_RES_MAX + 1,
                ver_res: 64
            })
        );
        assert!(adapter.try_set_resolution(128, VER_RES_MAX + 1).is_err());
        assert_eq!(adapter.resolution(), (128, 64));
    }

    #[test]
    #[should_panic]
    fn panics_on_oversized_horizontal_resolution() {
        DisplayAdapter::<BinaryColor>::new().set_resolution(HOR_RES_MAX + 1, 1);
    }

    #[test]
    #[should_panic]
    fn panics_on_oversized_vertical_resolution() {
        DisplayAdapter::<BinaryColor>::new().set_resolution(1, VER_RES_MAX + 1);
    }

    #[test]
    #[should_panic]
    fn panics_on_negative_resolution() {
        DisplayAdapter::<BinaryColor>::new().set_resolution(i16::MIN, 10);
    }

    #[test]
    fn rejects_negative_resolution() {
        let mut adapter = DisplayAdapter::<BinaryColor>::new();
        adapter.set_resolution(128, 64);
        assert_eq!(
            adapter.try_set_resolution(-1, 10),
            Err(Error::ResolutionOutOfRange {
                hor_res: -1,
                ver_res: 10
            })
        );
        assert!(adapter.try_set_resolution(10, i16::MIN).is_err());
        assert_eq!(adapter.resolution(), (128, 64));
    }

    #[test]
    fn display_handle_is_stored() {
        let mut adapter = DisplayAdapter::<BinaryColor>::new();
        adapter.set_display_handle(DisplayHandle(3));
        assert_eq!(adapter.display_handle(), Some(DisplayHandle(3)));
    }
}
