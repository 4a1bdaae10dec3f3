use chrono::{DateTime, Local, NaiveDate, Utc};

/// Date format used by every form field
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Whole days until `deadline`, rounded up. Negative once it has passed.
pub fn days_left(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (deadline - now).num_seconds();
    // Ceiling division that also rounds negative values toward zero
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    if seconds.rem_euclid(SECONDS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Parse a `YYYY-MM-DD` form field.
pub fn parse_form_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), FORM_DATE_FORMAT)
        .map_err(|_| "Invalid date. Use format: YYYY-MM-DD".to_string())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
