use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Dimensions,
    pixelcolor::PixelColor,
    primitives::Rectangle,
    Pixel,
};

use crate::{config::Coord, Area, DisplayDescriptor, DisplayDriver, Opacity};

/// Draw target over the part of the draw buffer holding the band being refreshed.
///
/// Coordinates are screen coordinates; pixels outside the band are ignored.
/// Pixels go through the driver's pixel writer when it has one.
pub struct Canvas<'b, C, D> {
    buffer: &'b mut [C],
    area: Area,
    driver: &'b mut D,
    descriptor: &'b DisplayDescriptor,
}

impl<'b, C: PixelColor, D: DisplayDriver<C>> Canvas<'b, C, D> {
    pub(crate) fn new(
        buffer: &'b mut [C],
        area: Area,
        driver: &'b mut D,
        descriptor: &'b DisplayDescriptor,
    ) -> Self {
        Canvas {
            buffer,
            area,
            driver,
            descriptor,
        }
    }

    /// The band of the screen this canvas covers.
    pub fn area(&self) -> Area {
        self.area
    }

    /// Blends `src`, laid out row by row over `area`, onto the canvas.
    ///
    /// Source pixels past the end of `area` are ignored. Without GPU
    /// acceleration pixels are either drawn opaque or, below
    /// [`Opacity::MIN`], skipped.
    pub fn blend(&mut self, area: &Area, src: &[C], opacity: Opacity) {
        let width = area.width();
        if width == 0 {
            return;
        }
        let src = &src[..src.len().min(area.size() as usize)];

        #[cfg(feature = "gpu")]
        if self.driver.has_gpu_acceleration()
            && !self.driver.has_custom_pixel_writer()
            && self.area.contains(area)
        {
            let stride = self.area.width() as usize;
            for (row, src_row) in src.chunks(width as usize).enumerate() {
                let start = (area.y1 - self.area.y1) as usize * stride
                    + (area.x1 - self.area.x1) as usize
                    + row * stride;
                let dest = &mut self.buffer[start..start + src_row.len()];
                self.driver
                    .gpu_blend(self.descriptor, dest, src_row, opacity);
            }
            return;
        }

        for (i, &color) in src.iter().enumerate() {
            let x = area.x1 + (i % width as usize) as Coord;
            let y = area.y1 + (i / width as usize) as Coord;
            if self.area.contains_point(x, y) {
                self.write_pixel(x, y, color, opacity);
            }
        }
    }

    fn write_pixel(&mut self, x: Coord, y: Coord, color: C, opacity: Opacity) {
        let width = self.area.width();
        let (x, y) = (x - self.area.x1, y - self.area.y1);
        if self.driver.has_custom_pixel_writer() {
            self.driver
                .set_pixel(self.descriptor, &mut *self.buffer, width, x, y, color, opacity);
        } else if opacity.is_visible() {
            self.buffer[y as usize * width as usize + x as usize] = color;
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.area.x1.into()
            && x <= self.area.x2.into()
            && y >= self.area.y1.into()
            && y <= self.area.y2.into()
    }
}

impl<'b, C: PixelColor, D: DisplayDriver<C>> Dimensions for Canvas<'b, C, D> {
    fn bounding_box(&self) -> Rectangle {
        self.area.into()
    }
}

impl<'b, C: PixelColor, D: DisplayDriver<C>> DrawTarget for Canvas<'b, C, D> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if self.contains(point.x, point.y) {
                self.write_pixel(point.x as Coord, point.y as Coord, color, Opacity::COVER);
            }
        }
        Ok(())
    }

    #[cfg(feature = "gpu")]
    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        use embedded_graphics::primitives::PointsIter;

        // Clip before narrowing to `Coord` so far-off rectangles cannot wrap on screen.
        let clipped = area.intersection(&self.bounding_box());
        if clipped.size.width == 0 || clipped.size.height == 0 {
            return Ok(());
        }
        let clipped = Area::from(clipped);
        if self.driver.has_gpu_acceleration() && !self.driver.has_custom_pixel_writer() {
            let fill_area = Area::new(
                clipped.x1 - self.area.x1,
                clipped.y1 - self.area.y1,
                clipped.x2 - self.area.x1,
                clipped.y2 - self.area.y1,
            );
            let width = self.area.width();
            self.driver
                .gpu_fill(self.descriptor, &mut *self.buffer, width, &fill_area, color);
            Ok(())
        } else {
            self.draw_iter(
                Rectangle::from(clipped)
                    .points()
                    .map(|point| Pixel(point, color)),
            )
        }
    }
}

#[cfg(all(test, feature = "gpu"))]
mod tests {
    use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

    use super::*;
    use crate::{DisplayHandle, DrawBufferDescriptor};

    #[derive(Default)]
    struct Accelerated {
        fills: Vec<Area>,
        blends: usize,
    }

    impl DisplayDriver<BinaryColor> for Accelerated {
        type Error = ();

        fn flush(&mut self, _: &DisplayDescriptor, _: &Area, _: &[BinaryColor]) -> Result<(), ()> {
            Ok(())
        }

        fn has_gpu_acceleration(&self) -> bool {
            true
        }

        fn gpu_blend(
            &mut self,
            _descriptor: &DisplayDescriptor,
            dest: &mut [BinaryColor],
            src: &[BinaryColor],
            _opacity: Opacity,
        ) {
            self.blends += 1;
            dest.copy_from_slice(src);
        }

        fn gpu_fill(
            &mut self,
            _descriptor: &DisplayDescriptor,
            _dest: &mut [BinaryColor],
            _dest_width: Coord,
            fill_area: &Area,
            _color: BinaryColor,
        ) {
            self.fills.push(*fill_area);
        }
    }

    #[test]
    fn solid_fills_and_blends_go_through_the_gpu() {
        let descriptor = DisplayDescriptor {
            hor_res: 8,
            ver_res: 8,
            handle: DisplayHandle(0),
            buffer: DrawBufferDescriptor::init(16, 0),
        };
        let mut driver = Accelerated::default();
        let mut buffer = [BinaryColor::Off; 16];
        {
            let mut canvas = Canvas::new(
                &mut buffer[..],
                Area::new(0, 4, 7, 5),
                &mut driver,
                &descriptor,
            );
            canvas.clear(BinaryColor::On).unwrap();
            canvas.blend(
                &Area::new(1, 5, 2, 5),
                &[BinaryColor::On, BinaryColor::On],
                Opacity::COVER,
            );
        }
        assert_eq!(driver.fills, vec![Area::new(0, 0, 7, 1)]);
        assert_eq!(driver.blends, 1);
        assert_eq!(&buffer[9..11], &[BinaryColor::On; 2]);
    }

    fn band_descriptor() -> DisplayDescriptor {
        DisplayDescriptor {
            hor_res: 8,
            ver_res: 2,
            handle: DisplayHandle(0),
            buffer: DrawBufferDescriptor::init(16, 0),
        }
    }

    #[test]
    fn gpu_blend_stops_at_the_last_row_of_the_area() {
        let descriptor = band_descriptor();
        let mut driver = Accelerated::default();
        let mut buffer = [BinaryColor::Off; 16];
        {
            let mut canvas =
                Canvas::new(&mut buffer[..], Area::new(0, 0, 7, 1), &mut driver, &descriptor);
            canvas.blend(&Area::new(6, 1, 7, 1), &[BinaryColor::On; 4], Opacity::COVER);
        }
        assert_eq!(driver.blends, 1);
        assert_eq!(&buffer[14..16], &[BinaryColor::On; 2]);
        assert!(buffer[..14].iter().all(|&px| px == BinaryColor::Off));
    }

    #[test]
    fn far_off_screen_fills_are_dropped() {
        let descriptor = band_descriptor();
        let mut driver = Accelerated::default();
        let mut buffer = [BinaryColor::Off; 16];
        {
            let mut canvas =
                Canvas::new(&mut buffer[..], Area::new(0, 0, 7, 1), &mut driver, &descriptor);
            let rect = Rectangle::new(Point::new(65538, 0), Size::new(2, 1));
            canvas.fill_solid(&rect, BinaryColor::On).unwrap();
            let partly = Rectangle::new(Point::new(-70000, 1), Size::new(70002, 1));
            canvas.fill_solid(&partly, BinaryColor::On).unwrap();
        }
        assert_eq!(driver.fills, vec![Area::new(0, 1, 1, 1)]);
    }
}
