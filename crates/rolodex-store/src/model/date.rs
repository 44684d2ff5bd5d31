use chrono::{Datelike, NaiveDate};

/// A date that is either complete or only known by month and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactDate {
    Full(NaiveDate),
    Partial { month: u32, day: u32 },
}

impl ContactDate {
    /// Partial date, validated against a leap year so `--0229` is accepted.
    #[must_use]
    pub fn partial(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| Self::Partial { month, day })
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        match self {
            Self::Full(date) => date.month(),
            Self::Partial { month, .. } => *month,
        }
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        match self {
            Self::Full(date) => date.day(),
            Self::Partial { day, .. } => *day,
        }
    }

    #[must_use]
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::Full(date) => Some(date.year()),
            Self::Partial { .. } => None,
        }
    }
}
