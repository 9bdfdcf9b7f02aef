use chrono::NaiveDate;

/// Whole days from `today` until `expires`, both already midnight-normalized
/// dates. Negative when the expiration lies in the past.
pub fn days_until(today: NaiveDate, expires: NaiveDate) -> i64 {
    (expires - today).num_days()
}

/// Formats a date the way the reminder messages present it: day/month/year.
pub fn format_day_month_year(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
