//! Common utility functions

use chrono::{DateTime, Utc};

/// Date format used in settings summaries and log lines
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert DateTime to display string format
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Get current UTC datetime
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert a string to asterisks (for masking passwords)
pub fn mask_string(s: &str) -> String {
    "*".repeat(s.chars().count())
}
