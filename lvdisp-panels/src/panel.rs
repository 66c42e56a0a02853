use embedded_graphics::draw_target::DrawTarget;

/// Controller that [`GraphicsTarget`](crate::GraphicsTarget) and
/// [`PagedMonochrome`](crate::PagedMonochrome) copy refreshed bands into.
///
/// Controllers with a RAM mirror (like `ssd1306` in buffered mode) only
/// receive pixels once `flush` runs; those set `REQUIRES_FLUSH` so each band
/// is pushed out before the draw buffer is reused.
pub trait Panel: DrawTarget {
    const REQUIRES_FLUSH: bool;
    fn flush(&mut self) -> Result<(), Self::Error>;
}

#[cfg(feature = "ssd1306")]
impl<DI, SIZE> Panel
    for ssd1306::Ssd1306<DI, SIZE, ssd1306::mode::BufferedGraphicsMode<SIZE>>
where
    DI: ssd1306::prelude::WriteOnlyDataCommand,
    SIZE: ssd1306::size::DisplaySize,
{
    const REQUIRES_FLUSH: bool = true;

    fn flush(&mut self) -> Result<(), Self::Error> {
        ssd1306::Ssd1306::flush(self)
    }
}
