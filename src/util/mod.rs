//! Utility module
//!
//! This module provides common utilities and helper functions used
//! throughout the library.

use chrono::{Duration, NaiveTime};

/// Length of the window between two wall-clock times as `H:MM:SS`
///
/// An end before the start is taken to fall on the next day.
pub fn calc_duration(start: NaiveTime, end: NaiveTime) -> String {
    let mut elapsed = end - start;
    if elapsed < Duration::zero() {
        elapsed = elapsed + Duration::days(1);
    }
    let seconds = elapsed.num_seconds();
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
