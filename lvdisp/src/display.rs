//! Registration and refresh of a display.
//!
//! [`Display`] plays the part of the rendering library's display object: it
//! takes a [`DisplayAdapter`] and a [`DisplayDriver`], tracks which parts of
//! the screen are stale, and on [`Display::refresh`] renders them band by band
//! into the draw buffers and hands each band to the driver.

mod canvas;
mod invalidation;

use core::{
    cmp::min,
    sync::atomic::{AtomicU16, Ordering},
};

use embedded_graphics::pixelcolor::PixelColor;
use fugit::{MillisDurationU32, TimerInstantU32};

pub use canvas::Canvas;
use invalidation::InvalidAreas;

use crate::{
    config::Coord, Area, DisplayAdapter, DisplayDescriptor, DisplayDriver, DisplayHandle,
    RefreshError,
};

/// Millisecond time source used to measure refresh cycles.
pub trait Clock {
    fn now(&self) -> TimerInstantU32<1000>;
}

impl<F: Fn() -> TimerInstantU32<1000>> Clock for F {
    fn now(&self) -> TimerInstantU32<1000> {
        self()
    }
}

/// Summary of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshReport {
    pub areas: usize,
    pub pixels: u32,
    pub elapsed: MillisDurationU32,
}

static NEXT_HANDLE: AtomicU16 = AtomicU16::new(0);

fn next_handle() -> DisplayHandle {
    // NOTE(no-CAS) displays are registered from a single context at start-up
    let n = NEXT_HANDLE.load(Ordering::Relaxed);
    NEXT_HANDLE.store(n.wrapping_add(1), Ordering::Relaxed);
    DisplayHandle(n)
}

pub struct Display<'a, C, D> {
    adapter: DisplayAdapter<'a, C>,
    driver: D,
    hor_res: Coord,
    ver_res: Coord,
    handle: DisplayHandle,
    invalidated: InvalidAreas,
}

impl<'a, C: PixelColor, D: DisplayDriver<C>> Display<'a, C, D> {
    /// Registers `adapter` as a new display driven by `driver`.
    ///
    /// The resolution is read once here; the whole screen starts out invalid.
    pub fn register(mut adapter: DisplayAdapter<'a, C>, driver: D) -> Self {
        let handle = next_handle();
        adapter.set_display_handle(handle);
        adapter.initialize_display_buffers();
        let (hor_res, ver_res) = adapter.resolution();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Registered display {=u16}: {=i16}x{=i16}",
            handle.0,
            hor_res,
            ver_res
        );

        let mut display = Display {
            adapter,
            driver,
            hor_res,
            ver_res,
            handle,
            invalidated: InvalidAreas::new(),
        };
        display.invalidate_all();
        display
    }

    pub fn handle(&self) -> DisplayHandle {
        self.handle
    }

    pub fn descriptor(&self) -> DisplayDescriptor {
        DisplayDescriptor {
            hor_res: self.hor_res,
            ver_res: self.ver_res,
            handle: self.handle,
            buffer: *self.adapter.draw_buffer(),
        }
    }

    pub fn adapter(&self) -> &DisplayAdapter<'a, C> {
        &self.adapter
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_parts(self) -> (DisplayAdapter<'a, C>, D) {
        (self.adapter, self.driver)
    }

    /// Marks `area` for redrawing on the next refresh.
    pub fn invalidate(&mut self, area: Area) {
        let screen = self.screen();
        self.invalidated.push(area, screen);
    }

    pub fn invalidate_all(&mut self) {
        let screen = self.screen();
        self.invalidated.clear();
        self.invalidated.push(screen, screen);
    }

    /// Areas waiting for the next refresh.
    pub fn invalidated(&self) -> &[Area] {
        self.invalidated.as_slice()
    }

    /// Redraws every invalidated area.
    ///
    /// `render` is called once per band with a [`Canvas`] covering it and
    /// must draw everything visible there. A failing flush, or a band the
    /// draw buffer cannot hold, aborts the cycle; the area being refreshed
    /// and those after it stay invalidated.
    pub fn refresh<K, R>(
        &mut self,
        clock: &K,
        mut render: R,
    ) -> Result<RefreshReport, RefreshError<D::Error>>
    where
        K: Clock,
        R: FnMut(&mut Canvas<'_, C, D>),
    {
        let start = clock.now();
        self.invalidated.join();

        let mut areas = 0;
        let mut pixels = 0;
        while let Some(area) = self.invalidated.first() {
            pixels += self.refresh_area(area, &mut render)?;
            self.invalidated.remove_first();
            areas += 1;
        }

        let elapsed = clock
            .now()
            .checked_duration_since(start)
            .unwrap_or(MillisDurationU32::from_ticks(0));
        if pixels > 0 {
            let descriptor = self.descriptor();
            self.driver.monitor(&descriptor, elapsed, pixels);
        }

        Ok(RefreshReport {
            areas,
            pixels,
            elapsed,
        })
    }

    fn screen(&self) -> Area {
        Area::screen(self.hor_res, self.ver_res)
    }

    fn refresh_area<R>(
        &mut self,
        mut area: Area,
        render: &mut R,
    ) -> Result<u32, RefreshError<D::Error>>
    where
        R: FnMut(&mut Canvas<'_, C, D>),
    {
        let rounder = self.driver.has_custom_rounder();
        if rounder {
            let descriptor = self.descriptor();
            self.driver.round_area(&descriptor, &mut area);
        }

        let rows = self.rows_per_band(&area);
        if rows <= 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("Draw buffer too small for a single row of {}", area);
            return Err(RefreshError::BufferTooSmall { area });
        }

        let mut pixels = 0;
        let mut y = area.y1;
        while y <= area.y2 {
            let y2 = min(y.saturating_add(rows - 1), area.y2);
            let mut band = Area::new(area.x1, y, area.x2, y2);
            if rounder {
                let descriptor = self.descriptor();
                self.driver.round_area(&descriptor, &mut band);
            }
            let len = band.size() as usize;
            if len > self.adapter.draw_buffer().size {
                #[cfg(feature = "defmt")]
                defmt::warn!("Rounded band {} does not fit the draw buffer", band);
                return Err(RefreshError::BufferTooSmall { area: band });
            }

            let slot = self.adapter.draw_buffer().active;
            self.adapter.draw_buffer_mut().area = band;
            let descriptor = self.descriptor();
            {
                let buffer = &mut self.adapter.buffer_mut(slot)[..len];
                let mut canvas = Canvas::new(buffer, band, &mut self.driver, &descriptor);
                render(&mut canvas);
            }

            self.adapter.draw_buffer_mut().flushing = true;
            let descriptor = self.descriptor();
            let result = self
                .driver
                .flush(&descriptor, &band, &self.adapter.buffer(slot)[..len]);
            self.adapter.draw_buffer_mut().flushing = false;
            result.map_err(|error| RefreshError::Flush { error })?;

            self.adapter.draw_buffer_mut().swap();
            pixels += band.size();
            y = y2.max(band.y2) + 1;
        }
        Ok(pixels)
    }

    /// Largest number of rows of `area` that still fits the draw buffer
    /// once rounded.
    fn rows_per_band(&mut self, area: &Area) -> Coord {
        let width = area.width() as usize;
        if width == 0 {
            return 0;
        }
        let size = self.adapter.draw_buffer().size;
        let mut rows = min(size / width, Coord::MAX as usize) as Coord;
        if !self.driver.has_custom_rounder() {
            return rows;
        }

        let descriptor = self.descriptor();
        while rows > 0 {
            let mut trial = Area::new(area.x1, 0, area.x2, rows - 1);
            self.driver.round_area(&descriptor, &mut trial);
            if trial.size() as usize <= size {
                break;
            }
            rows -= 1;
        }
        rows
    }
}
