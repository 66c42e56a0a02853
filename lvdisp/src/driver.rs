use core::fmt::Debug;

use embedded_graphics::pixelcolor::PixelColor;
use fugit::MillisDurationU32;

use crate::{config::Coord, Area, DisplayDescriptor, Opacity};

/// Hooks the refresh cycle calls into a concrete display.
///
/// Only [`flush`](DisplayDriver::flush) must be provided. Every other hook
/// defaults to "not supported by this hardware".
pub trait DisplayDriver<C: PixelColor> {
    type Error: Debug;

    /// Writes `pixels`, laid out row by row, to `area` of the panel.
    ///
    /// Must not return before the pixels are on the panel or queued so that
    /// `pixels` can be overwritten. Drivers transferring in the background
    /// (DMA, async bus) block here until the transfer completes.
    fn flush(
        &mut self,
        descriptor: &DisplayDescriptor,
        area: &Area,
        pixels: &[C],
    ) -> Result<(), Self::Error>;

    /// Whether [`round_area`](DisplayDriver::round_area) should be applied.
    fn has_custom_rounder(&self) -> bool {
        false
    }

    /// Grows `area` to the granularity the controller can address,
    /// e.g. 8-row pages on monochrome panels.
    fn round_area(&mut self, _descriptor: &DisplayDescriptor, _area: &mut Area) {}

    /// Whether pixels are written through [`set_pixel`](DisplayDriver::set_pixel)
    /// instead of being stored row by row.
    fn has_custom_pixel_writer(&self) -> bool {
        false
    }

    /// Stores one pixel at buffer-relative `(x, y)` using the controller's layout.
    #[allow(clippy::too_many_arguments)]
    fn set_pixel(
        &mut self,
        _descriptor: &DisplayDescriptor,
        _buffer: &mut [C],
        _buffer_width: Coord,
        _x: Coord,
        _y: Coord,
        _color: C,
        _opacity: Opacity,
    ) {
    }

    /// Called once per refresh cycle with the time it took and the number
    /// of pixels flushed.
    fn monitor(
        &mut self,
        _descriptor: &DisplayDescriptor,
        _elapsed: MillisDurationU32,
        _pixel_count: u32,
    ) {
        #[cfg(feature = "flush-monitoring")]
        defmt::info!(
            "{=u32} px refreshed in {=u32} ms",
            _pixel_count,
            _elapsed.ticks()
        );
    }

    /// Whether the GPU hooks replace the software blend and fill paths.
    #[cfg(feature = "gpu")]
    fn has_gpu_acceleration(&self) -> bool {
        false
    }

    /// Blends `src` onto `dest` with `opacity`.
    #[cfg(feature = "gpu")]
    fn gpu_blend(
        &mut self,
        _descriptor: &DisplayDescriptor,
        _dest: &mut [C],
        _src: &[C],
        _opacity: Opacity,
    ) {
    }

    /// Fills `fill_area` of a `dest_width` pixels wide buffer with `color`.
    #[cfg(feature = "gpu")]
    fn gpu_fill(
        &mut self,
        _descriptor: &DisplayDescriptor,
        _dest: &mut [C],
        _dest_width: Coord,
        _fill_area: &Area,
        _color: C,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::BinaryColor;

    use super::*;
    use crate::{DisplayHandle, DrawBufferDescriptor};

    struct FlushOnly {
        flushed: u32,
    }

    impl DisplayDriver<BinaryColor> for FlushOnly {
        type Error = ();

        fn flush(
            &mut self,
            _descriptor: &DisplayDescriptor,
            area: &Area,
            _pixels: &[BinaryColor],
        ) -> Result<(), ()> {
            self.flushed += area.size();
            Ok(())
        }
    }

    fn descriptor() -> DisplayDescriptor {
        DisplayDescriptor {
            hor_res: 8,
            ver_res: 8,
            handle: DisplayHandle(0),
            buffer: DrawBufferDescriptor::init(64, 0),
        }
    }

    #[test]
    fn optional_hooks_default_to_unsupported() {
        let mut driver = FlushOnly { flushed: 0 };
        let descriptor = descriptor();
        assert!(!driver.has_custom_rounder());
        assert!(!driver.has_custom_pixel_writer());

        let mut area = Area::new(1, 1, 2, 2);
        driver.round_area(&descriptor, &mut area);
        assert_eq!(area, Area::new(1, 1, 2, 2));

        let mut buffer = [BinaryColor::Off; 4];
        driver.set_pixel(
            &descriptor,
            &mut buffer,
            2,
            1,
            1,
            BinaryColor::On,
            Opacity::COVER,
        );
        assert_eq!(buffer, [BinaryColor::Off; 4]);

        driver.monitor(&descriptor, MillisDurationU32::from_ticks(5), 64);
        assert_eq!(driver.flushed, 0);
    }

    #[test]
    fn flush_is_dispatched_to_the_implementation() {
        let mut driver = FlushOnly { flushed: 0 };
        let pixels = [BinaryColor::On; 4];
        driver
            .flush(&descriptor(), &Area::new(0, 0, 1, 1), &pixels)
            .unwrap();
        assert_eq!(driver.flushed, 4);
    }
}
