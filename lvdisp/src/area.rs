use core::cmp::{max, min};

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

use crate::config::Coord;

/// Rectangle of pixels with inclusive corners.
///
/// An area whose `x2 < x1` or `y2 < y1` covers no pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Area {
    pub x1: Coord,
    pub y1: Coord,
    pub x2: Coord,
    pub y2: Coord,
}

impl Area {
    pub const fn new(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Self {
        Area { x1, y1, x2, y2 }
    }

    /// Area anchored at the origin spanning `hor_res` x `ver_res` pixels.
    pub const fn screen(hor_res: Coord, ver_res: Coord) -> Self {
        Area::new(0, 0, hor_res - 1, ver_res - 1)
    }

    pub fn width(&self) -> Coord {
        max(self.x2 - self.x1 + 1, 0)
    }

    pub fn height(&self) -> Coord {
        max(self.y2 - self.y1 + 1, 0)
    }

    /// Number of pixels covered.
    pub fn size(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.x2 < self.x1 || self.y2 < self.y1
    }

    /// Overlapping part of both areas, `None` if they do not overlap.
    pub fn intersection(&self, other: &Area) -> Option<Area> {
        let area = Area::new(
            max(self.x1, other.x1),
            max(self.y1, other.y1),
            min(self.x2, other.x2),
            min(self.y2, other.y2),
        );
        (!area.is_empty()).then_some(area)
    }

    /// Smallest area covering both.
    pub fn join(&self, other: &Area) -> Area {
        Area::new(
            min(self.x1, other.x1),
            min(self.y1, other.y1),
            max(self.x2, other.x2),
            max(self.y2, other.y2),
        )
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Area) -> bool {
        other.x1 >= self.x1 && other.y1 >= self.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }

    pub fn contains_point(&self, x: Coord, y: Coord) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Whether the areas overlap or touch.
    pub fn is_on(&self, other: &Area) -> bool {
        !(self.x1 > other.x2 + 1
            || other.x1 > self.x2 + 1
            || self.y1 > other.y2 + 1
            || other.y1 > self.y2 + 1)
    }
}

impl From<Area> for Rectangle {
    fn from(area: Area) -> Self {
        Rectangle::new(
            Point::new(area.x1.into(), area.y1.into()),
            Size::new(area.width() as u32, area.height() as u32),
        )
    }
}

impl From<Rectangle> for Area {
    fn from(rectangle: Rectangle) -> Self {
        let x1 = rectangle.top_left.x as Coord;
        let y1 = rectangle.top_left.y as Coord;
        Area::new(
            x1,
            y1,
            x1 + rectangle.size.width as Coord - 1,
            y1 + rectangle.size.height as Coord - 1,
        )
    }
}

/// Opacity of a drawn pixel, from fully transparent to fully covering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Opacity(pub u8);

impl Opacity {
    pub const TRANSPARENT: Opacity = Opacity(0);
    pub const COVER: Opacity = Opacity(255);

    /// Opacity below which a pixel is not drawn at all.
    pub const MIN: Opacity = Opacity(16);

    pub fn is_visible(&self) -> bool {
        *self >= Opacity::MIN
    }
}
