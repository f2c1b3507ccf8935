use chrono::{DateTime, Local, TimeZone, Utc};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Render a byte count with the largest unit that keeps the value at or
/// above 1, to at most two decimals ("1.5 KB", "2 KB", "0 Bytes").
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);
    let scaled = bytes as f64 / 1024_f64.powi(exponent as i32);

    let mut value = format!("{:.2}", scaled);
    if value.contains('.') {
        let trimmed = value.trim_end_matches('0').trim_end_matches('.').len();
        value.truncate(trimmed);
    }

    format!("{} {}", value, SIZE_UNITS[exponent])
}

/// Render a timestamp in the client's local timezone ("Jan 15, 2024, 10:30 AM").
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    format_date_in(timestamp, &Local)
}

/// Timezone-explicit variant of [`format_date`].
pub fn format_date_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}

/// Neutralize HTML metacharacters so untrusted text can be interpolated into
/// markup without introducing structure.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
