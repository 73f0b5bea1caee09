//! Date classification: the configurable workweek and the holiday registry.

pub mod holidays;
pub mod workweek;

pub use holidays::HolidayRegistry;
pub use workweek::WorkweekCalendar;
