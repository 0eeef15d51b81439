use crate::types::daily_record::DailyRecord;
use crate::types::date_window::DateWindow;
use crate::types::summary::SeriesSummary;
use serde::Serialize;

/// The historical records of one station over one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
    pub station: String,
    pub window: DateWindow,
    /// Newest first, for table display. Dates are unique.
    pub records: Vec<DailyRecord>,
    pub summary: SeriesSummary,
}

impl HistoricalSeries {
    /// The records oldest first, as charts expect them.
    pub fn chronological(&self) -> Vec<DailyRecord> {
        self.records.iter().rev().cloned().collect()
    }

    /// Splits the series into its newest-first records and their summary.
    pub fn into_parts(self) -> (Vec<DailyRecord>, SeriesSummary) {
        (self.records, self.summary)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
