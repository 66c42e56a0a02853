use core::fmt::Debug;

use snafu::Snafu;

use crate::{config::Coord, Area};

#[derive(Debug, Snafu, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display(
        "Secondary display buffer has {secondary} pixels but primary has {primary}"
    ))]
    BufferLengthMismatch { primary: usize, secondary: usize },
    #[snafu(display("Resolution {hor_res}x{ver_res} is outside 0..=maximum"))]
    ResolutionOutOfRange { hor_res: Coord, ver_res: Coord },
}

/// Why a refresh cycle stopped. The area being refreshed stays invalidated.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum RefreshError<E: Debug> {
    #[snafu(display("Draw buffer cannot hold a band of {area:?}"))]
    BufferTooSmall { area: Area },
    #[snafu(display("Driver failed to flush: {error:?}"))]
    Flush { error: E },
}
