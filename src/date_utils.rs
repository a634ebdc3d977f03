use chrono::{Datelike, Local, NaiveDate};

/// The calendar month an analytics report or transaction listing is scoped
/// to. Defaults to the server's current local month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMonth {
    pub month: u32,
    pub year: i32,
}

impl TargetMonth {
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            month: today.month(),
            year: today.year(),
        }
    }

    /// Build a target from optional query parameters, falling back to the
    /// current month. Out-of-range values are rejected rather than allowed
    /// to silently shift the date window.
    pub fn resolve(month: Option<u32>, year: Option<i32>) -> Result<Self, String> {
        let current = Self::current();
        let target = Self {
            month: month.unwrap_or(current.month),
            year: year.unwrap_or(current.year),
        };
        target.validate()?;
        Ok(target)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(1..=12).contains(&self.month) {
            return Err(format!("month must be between 1 and 12, got {}", self.month));
        }
        if !(1900..=2100).contains(&self.year) {
            return Err(format!(
                "year must be between 1900 and 2100, got {}",
                self.year
            ));
        }
        Ok(())
    }

    pub fn first_day(&self) -> NaiveDate {
        // Safe after validate(); month 1-12 always forms a valid first-of-month.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("validated month/year must form a valid date")
    }
}

/// Half-open date interval `[from, to)` covering one calendar month.
pub fn month_range(first_day: NaiveDate) -> (NaiveDate, NaiveDate) {
    (first_day, shift_months(first_day, 1))
}

/// Step a first-of-month date by a number of months, rolling over year
/// boundaries in either direction.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total_months = date.year() * 12 + date.month() as i32 - 1 + months;
    let new_year = total_months.div_euclid(12);
    let new_month = (total_months.rem_euclid(12) + 1) as u32;
    NaiveDate::from_ymd_opt(new_year, new_month, 1).expect("month arithmetic stays in range")
}

/// Human-readable month label, e.g. "Aug 2025".
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// ISO date string as stored in the database.
pub fn to_db_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_db_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
