use core::fmt::Debug;

use embedded_graphics::primitives::Rectangle;
use lvdisp::{Area, DisplayDescriptor, DisplayDriver};

use crate::Panel;

/// Driver writing each refreshed area straight onto an embedded-graphics panel.
pub struct GraphicsTarget<P> {
    panel: P,
}

impl<P: Panel> GraphicsTarget<P> {
    pub fn new(panel: P) -> Self {
        GraphicsTarget { panel }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    pub fn release(self) -> P {
        self.panel
    }
}

impl<P> DisplayDriver<P::Color> for GraphicsTarget<P>
where
    P: Panel,
    P::Error: Debug,
{
    type Error = P::Error;

    fn flush(
        &mut self,
        _descriptor: &DisplayDescriptor,
        area: &Area,
        pixels: &[P::Color],
    ) -> Result<(), Self::Error> {
        self.panel
            .fill_contiguous(&Rectangle::from(*area), pixels.iter().copied())?;
        if P::REQUIRES_FLUSH {
            self.panel.flush()?;
        }
        Ok(())
    }
}
