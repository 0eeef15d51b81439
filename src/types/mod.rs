pub mod daily_record;
pub mod date_window;
pub mod station;
pub mod summary;
