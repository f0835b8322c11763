//! Display formatting shared by the terminal and web surfaces.

use chrono::{DateTime, NaiveDate, TimeZone};

/// Currency amount in millions with one decimal: `1_700_000.0` → `"$1.7M"`.
pub fn millions(amount: f64) -> String {
    format!("${:.1}M", amount / 1_000_000.0)
}

/// Calendar date as `"Mar 31, 2027"`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Timestamp as `"Oct 15, 02:30 PM"` in the timestamp's own zone.
pub fn month_day_time<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.format("%b %-d, %I:%M %p").to_string()
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// A fixed-width text progress bar. Values above 100 fill the bar.
pub fn text_bar(percentage: f64, width: usize) -> String {
    let clamped = percentage.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
