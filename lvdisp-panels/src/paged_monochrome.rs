//! Driver for page-addressed monochrome controllers such as the SSD1306.
//!
//! The controller's memory is organised in pages of eight rows, each column of
//! a page being one byte. Dirty areas are rounded out to whole pages and the
//! draw buffer is kept in the same page-major order, one pixel per bit
//! position, so that a flush walks it the way the controller would.

use core::fmt::Debug;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::Point, Pixel};
use lvdisp::{Area, Coord, DisplayDescriptor, DisplayDriver, Opacity};

use crate::Panel;

/// Rows in one controller page.
pub const PAGE_HEIGHT: Coord = 8;

pub struct PagedMonochrome<P> {
    panel: P,
}

impl<P: Panel<Color = BinaryColor>> PagedMonochrome<P> {
    pub fn new(panel: P) -> Self {
        PagedMonochrome { panel }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn release(self) -> P {
        self.panel
    }
}

/// Position of buffer-relative `(x, y)` in a page-major buffer `width` pixels wide.
fn page_index(width: Coord, x: Coord, y: Coord) -> usize {
    let page = (y / PAGE_HEIGHT) as usize;
    let width = width as usize;
    let height = PAGE_HEIGHT as usize;
    page * width * height + x as usize * height + (y % PAGE_HEIGHT) as usize
}

impl<P> DisplayDriver<BinaryColor> for PagedMonochrome<P>
where
    P: Panel<Color = BinaryColor>,
    P::Error: Debug,
{
    type Error = P::Error;

    fn flush(
        &mut self,
        _descriptor: &DisplayDescriptor,
        area: &Area,
        pixels: &[BinaryColor],
    ) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        if area.y1 % PAGE_HEIGHT != 0 || area.height() % PAGE_HEIGHT != 0 {
            defmt::warn!("Flushing {} which is not page aligned", area);
        }

        let width = area.width();
        let origin = *area;
        let unpacked = (0..area.height()).flat_map(move |y| {
            (0..width).filter_map(move |x| {
                pixels.get(page_index(width, x, y)).map(|&color| {
                    Pixel(
                        Point::new((origin.x1 + x).into(), (origin.y1 + y).into()),
                        color,
                    )
                })
            })
        });
        self.panel.draw_iter(unpacked)?;
        if P::REQUIRES_FLUSH {
            self.panel.flush()?;
        }
        Ok(())
    }

    fn has_custom_rounder(&self) -> bool {
        true
    }

    fn round_area(&mut self, _descriptor: &DisplayDescriptor, area: &mut Area) {
        area.y1 &= !(PAGE_HEIGHT - 1);
        area.y2 = (area.y2 & !(PAGE_HEIGHT - 1)) + PAGE_HEIGHT - 1;
    }

    fn has_custom_pixel_writer(&self) -> bool {
        true
    }

    fn set_pixel(
        &mut self,
        _descriptor: &DisplayDescriptor,
        buffer: &mut [BinaryColor],
        buffer_width: Coord,
        x: Coord,
        y: Coord,
        color: BinaryColor,
        opacity: Opacity,
    ) {
        if !opacity.is_visible() {
            return;
        }
        if let Some(px) = buffer.get_mut(page_index(buffer_width, x, y)) {
            *px = color;
        }
    }
}
