//! Daily post cap
//!
//! Counts posts per UTC day in memory. The count resets when the date
//! changes and is lost on restart.

use chrono::{NaiveDate, Utc};

/// Posts allowed per UTC day
#[derive(Debug, Clone)]
pub struct DailyPostBudget {
    limit: u32,
    day: NaiveDate,
    used: u32,
}

impl DailyPostBudget {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            day: Utc::now().date_naive(),
            used: 0,
        }
    }

    /// Whether another post fits into today's budget
    pub fn has_capacity(&mut self) -> bool {
        self.has_capacity_on(Utc::now().date_naive())
    }

    /// Record a published post for today
    pub fn record_post(&mut self) {
        self.record_post_on(Utc::now().date_naive());
    }

    pub fn has_capacity_on(&mut self, today: NaiveDate) -> bool {
        self.roll_over(today);
        self.used < self.limit
    }

    pub fn record_post_on(&mut self, today: NaiveDate) {
        self.roll_over(today);
        self.used = self.used.saturating_add(1);
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    fn roll_over(&mut self, today: NaiveDate) {
        if today != self.day {
            self.day = today;
            self.used = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_cap_reached() {
        let mut budget = DailyPostBudget::new(2);
        assert!(budget.has_capacity_on(day(1)));
        budget.record_post_on(day(1));
        budget.record_post_on(day(1));
        assert!(!budget.has_capacity_on(day(1)));
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn test_resets_next_day() {
        let mut budget = DailyPostBudget::new(1);
        budget.record_post_on(day(1));
        assert!(!budget.has_capacity_on(day(1)));
        assert!(budget.has_capacity_on(day(2)));
        assert_eq!(budget.remaining(), 1);
    }

    #[test]
    fn test_zero_limit_never_posts() {
        let mut budget = DailyPostBudget::new(0);
        assert!(!budget.has_capacity_on(day(5)));
    }
}
