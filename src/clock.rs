// Source of "today"

use chrono::Local;

/// Supplies the current calendar date as `YYYY-MM-DD`
pub trait Clock {
    fn today(&self) -> String;
}

/// Local-timezone wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }
}

/// Always reports the same date
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(date: impl Into<String>) -> Self {
        Self(date.into())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::is_ymd;

    #[test]
    fn test_system_clock_format() {
        assert!(is_ymd(&SystemClock.today()));
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock::new("2024-06-15").today(), "2024-06-15");
    }
}
