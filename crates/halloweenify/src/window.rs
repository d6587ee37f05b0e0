//! Activation date window.
//!
//! Decides whether a given calendar day falls inside the configured
//! month/day window. Windows may sit inside a single month, span forward
//! across several months, or wrap around the end of the year (for example
//! December 20 through January 10).
//!
//! # Example
//!
//! ```rust
//! use halloweenify::window::DateWindow;
//!
//! let window = DateWindow::from_bounds(Some("10-01"), Some("11-02"));
//! assert!(window.contains(10, 15));
//! assert!(!window.contains(12, 1));
//! ```

use serde::{Deserialize, Serialize};

/// A month/day pair, 1-based on both fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    /// Month, 1 through 12.
    pub month: u32,
    /// Day of month, 1 through 31.
    pub day: u32,
}

impl MonthDay {
    /// Parses an `"MM-DD"` string.
    ///
    /// Returns `None` for anything that is not two dash-separated integers
    /// with the month in 1..=12 and the day in 1..=31. Callers treat `None`
    /// as "bound not supplied".
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let (month_str, day_str) = input.split_once('-')?;
        let month: u32 = month_str.trim().parse().ok()?;
        let day: u32 = day_str.trim().parse().ok()?;
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            Some(Self { month, day })
        } else {
            None
        }
    }
}

/// An inclusive month/day activation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: MonthDay,
    end: MonthDay,
}

/// The canonical single-day window: October 31 only.
const DEFAULT_BOUND: MonthDay = MonthDay { month: 10, day: 31 };

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_BOUND,
            end: DEFAULT_BOUND,
        }
    }
}

impl DateWindow {
    /// Builds a window from two optional `"MM-DD"` strings.
    ///
    /// Malformed or out-of-range strings count as absent. With no valid
    /// start the default window (October 31 only) applies; with a valid
    /// start but no valid end, the window is that single day.
    #[must_use]
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Self {
        let parsed_start = start.and_then(MonthDay::parse);
        let parsed_end = end.and_then(MonthDay::parse);

        match (parsed_start, parsed_end) {
            (Some(start), Some(end)) => Self { start, end },
            (Some(start), None) => Self { start, end: start },
            (None, Some(end)) => Self {
                start: DEFAULT_BOUND,
                end,
            },
            (None, None) => Self::default(),
        }
    }

    /// Returns the start bound.
    #[must_use]
    pub fn start(&self) -> MonthDay {
        self.start
    }

    /// Returns the end bound.
    #[must_use]
    pub fn end(&self) -> MonthDay {
        self.end
    }

    /// Returns whether the given month/day falls inside the window.
    ///
    /// Both bounds are inclusive. When the start month is after the end
    /// month the window wraps across the year boundary. The two
    /// month-comparison branches of the wraparound arm overlap in the
    /// region strictly between the bounds; both are kept inclusive, which
    /// matches the historical truth table exactly.
    #[must_use]
    pub fn contains(&self, month: u32, day: u32) -> bool {
        let Self { start, end } = *self;

        if start.month == end.month {
            month == start.month && day >= start.day && day <= end.day
        } else if start.month < end.month {
            (month == start.month && day >= start.day)
                || (month > start.month && month < end.month)
                || (month == end.month && day <= end.day)
        } else {
            (month == start.month && day >= start.day)
                || month > start.month
                || month < end.month
                || (month == end.month && day <= end.day)
        }
    }
}
