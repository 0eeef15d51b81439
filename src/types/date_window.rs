use chrono::{Days, NaiveDate};
use serde::Serialize;

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The window `[today - days_back, today]`.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use dwd_climate::DateWindow;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    /// let window = DateWindow::last_days(today, 30);
    /// assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    /// assert_eq!(window.end, today);
    /// ```
    pub fn last_days(today: NaiveDate, days_back: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days_back)))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start, today)
    }

    /// Whether `date` lies in the window. Both ends are included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
