//! Forecast horizon definitions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A forecast distance: 24, 48 or 72 hours ahead.
///
/// Horizons are measured in row offsets within the append-only
/// dataset, assuming roughly one row per hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    Day1,
    Day2,
    Day3,
}

impl Horizon {
    /// All horizons, in forecast order.
    pub const ALL: [Self; 3] = [Self::Day1, Self::Day2, Self::Day3];

    /// The day number (1, 2 or 3) used in artifact names.
    #[must_use]
    pub const fn day_number(self) -> u8 {
        match self {
            Self::Day1 => 1,
            Self::Day2 => 2,
            Self::Day3 => 3,
        }
    }

    /// Distance in append order between a row and the row holding its
    /// target value for this horizon.
    #[must_use]
    pub const fn row_offset(self) -> usize {
        match self {
            Self::Day1 => 24,
            Self::Day2 => 48,
            Self::Day3 => 72,
        }
    }

    /// Name of the target column for this horizon.
    #[must_use]
    pub const fn target_column(self) -> &'static str {
        match self {
            Self::Day1 => "target_day1",
            Self::Day2 => "target_day2",
            Self::Day3 => "target_day3",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day{}", self.day_number())
    }
}
