use heapless::Vec;

use crate::{config::INV_BUF_SIZE, Area};

/// Areas waiting to be redrawn.
#[derive(Debug, Clone, Default)]
pub(crate) struct InvalidAreas {
    areas: Vec<Area, INV_BUF_SIZE>,
}

impl InvalidAreas {
    pub fn new() -> Self {
        InvalidAreas { areas: Vec::new() }
    }

    /// Queues the part of `area` that is on `screen`.
    ///
    /// Areas already covered by a queued one are dropped. When the queue is
    /// full it collapses into a single full-screen area.
    pub fn push(&mut self, area: Area, screen: Area) {
        let Some(area) = area.intersection(&screen) else {
            return;
        };
        if self.areas.iter().any(|queued| queued.contains(&area)) {
            return;
        }
        if self.areas.push(area).is_err() {
            #[cfg(feature = "defmt")]
            defmt::debug!("Invalidated area queue is full, redrawing the whole screen");
            self.areas.clear();
            self.areas.push(screen).ok();
        }
    }

    /// Merges touching areas whenever the merged area has no more pixels
    /// than the two areas drawn separately.
    pub fn join(&mut self) {
        let mut i = 0;
        while i < self.areas.len() {
            let mut j = i + 1;
            while j < self.areas.len() {
                let (a, b) = (self.areas[i], self.areas[j]);
                let joined = a.join(&b);
                if a.is_on(&b) && joined.size() <= a.size() + b.size() {
                    self.areas[i] = joined;
                    self.areas.remove(j);
                    j = i + 1;
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
    }

    pub fn first(&self) -> Option<Area> {
        self.areas.first().copied()
    }

    pub fn remove_first(&mut self) {
        if !self.areas.is_empty() {
            self.areas.remove(0);
        }
    }

    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn as_slice(&self) -> &[Area] {
        &self.areas
    }
}
