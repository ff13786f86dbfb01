use crate::constants::{CALENDAR_DIR, NO_CALENDAR_DIR};
use crate::errors::{AppError, AppResult};
use chrono::Month;

/// The month/year a wallpaper set was published for.
///
/// Archive posts embed a `{monthname}-{year}` token in their URL
/// (e.g. `october-2016`); locating a month's page is a substring match
/// against that token, never a date parse of the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetPeriod {
    pub month: u32,
    pub year: i32,
}

impl TargetPeriod {
    /// Builds a period, rejecting months outside 1-12.
    pub fn new(month: u32, year: i32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidInput(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { month, year })
    }

    /// Full English month name, e.g. "October".
    pub fn month_name(&self) -> &'static str {
        Month::try_from(self.month as u8)
            .expect("month is validated at construction")
            .name()
    }

    /// The substring identifying this month's archive post URL,
    /// e.g. `october-2016`.
    pub fn archive_token(&self) -> String {
        format!("{}-{}", self.month_name().to_lowercase(), self.year)
    }

    /// Zero-padded month directory name, e.g. `03`.
    pub fn month_dir(&self) -> String {
        format!("{:02}", self.month)
    }
}

/// Whether to download the variant with a printed calendar overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarMode {
    WithCalendar,
    WithoutCalendar,
}

impl CalendarMode {
    /// The path segment that download URLs of this variant contain.
    pub fn dir_segment(&self) -> &'static str {
        match self {
            Self::WithCalendar => CALENDAR_DIR,
            Self::WithoutCalendar => NO_CALENDAR_DIR,
        }
    }
}

impl From<bool> for CalendarMode {
    /// Maps the `--nocal` flag onto a mode.
    fn from(nocal: bool) -> Self {
        if nocal {
            Self::WithoutCalendar
        } else {
            Self::WithCalendar
        }
    }
}
