// src/utils.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size in base 1024, rounded to two decimals with trailing
/// zeros dropped ("1.5 KB", "1 KB", "0 Bytes").
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    while unit + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(unit as u32 + 1) {
        unit += 1;
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    format!("{} {}", trim_fraction(format_fixed(value, 2)), SIZE_UNITS[unit])
}

/// Integer with `,` thousands separators.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fixed-point text with `decimals` digits. Values exactly halfway between
/// two outputs round away from zero; `{:.N}` alone would round them to even.
pub fn format_fixed(value: f64, decimals: u32) -> String {
    // A tie at N decimals means value * 2^(N+1) is an odd integer.
    let halves = value * 2f64.powi(decimals as i32 + 1);
    if halves.fract() != 0.0 || halves.abs() >= 1e12 || (halves as i64) % 2 == 0 {
        return format!("{:.*}", decimals as usize, value);
    }

    let scale = 10i64.pow(decimals);
    let units = (halves as i64 * 5i64.pow(decimals + 1) + halves.signum() as i64) / 2;
    let sign = if units < 0 { "-" } else { "" };
    let (whole, frac) = (units.abs() / scale, units.abs() % scale);
    if decimals == 0 {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{:0width$}", sign, whole, frac, width = decimals as usize)
    }
}

pub fn format_one_decimal(value: f64) -> String {
    format_fixed(value, 1)
}

/// Shortest display of a number: integral values lose the fraction.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// "Jan 5" style label for a calendar date. Falls back to the raw text.
pub fn format_day_label(raw: &str) -> String {
    parse_day(raw)
        .map(|day| day.format("%b %-d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

// Only the calendar part matters; time and zone are ignored so that
// "2024-01-05" never shifts to the previous day.
fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(prefix) = raw.get(..10) {
        if let Ok(day) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(day);
        }
    }
    parse_timestamp(raw).map(|ts| ts.date())
}

fn trim_fraction(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes_drop_trailing_zeros() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(1_288_490_189), "1.2 GB");
    }

    #[test]
    fn file_sizes_stay_in_gigabytes() {
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn halfway_values_round_up() {
        assert_eq!(format_one_decimal(6.25), "6.3");
        assert_eq!(format_one_decimal(1.0 / 16.0 * 100.0), "6.3");
        assert_eq!(format_one_decimal(0.25), "0.3");
        assert_eq!(format_one_decimal(12.25), "12.3");
        assert_eq!(format_one_decimal(-0.25), "-0.3");
        assert_eq!(format_fixed(1.125, 2), "1.13");
    }

    #[test]
    fn non_halfway_values_round_to_nearest() {
        assert_eq!(format_one_decimal(0.0), "0.0");
        assert_eq!(format_one_decimal(0.35), "0.3");
        assert_eq!(format_one_decimal(71.26), "71.3");
        assert_eq!(format_one_decimal(78.456), "78.5");
        assert_eq!(format_one_decimal(100.0), "100.0");
        assert_eq!(format_fixed(1.5, 2), "1.50");
    }

    #[test]
    fn file_size_halfway_rounds_up() {
        assert_eq!(format_file_size(1152), "1.13 KB");
    }

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn numbers_print_like_the_server_sent_them() {
        assert_eq!(format_number(95.0), "95");
        assert_eq!(format_number(87.5), "87.5");
    }

    #[test]
    fn day_labels_use_short_month() {
        assert_eq!(format_day_label("2024-01-05"), "Jan 5");
        assert_eq!(format_day_label("2024-12-25T08:00:00"), "Dec 25");
        assert_eq!(format_day_label("Fri, 05 Jan 2024 00:00:00 GMT"), "Jan 5");
        assert_eq!(format_day_label("yesterday"), "yesterday");
    }

    #[test]
    fn timestamps_are_normalized() {
        assert_eq!(format_timestamp("2024-01-05T09:30:12.123456"), "2024-01-05 09:30");
        assert_eq!(format_timestamp("Fri, 05 Jan 2024 09:30:00 GMT"), "2024-01-05 09:30");
        assert_eq!(format_timestamp("not a date"), "not a date");
    }
}
