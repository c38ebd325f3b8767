//! Display formatting in the conventions the co-owners read (vi-VN).

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// `1500000.0` → `1.500.000 ₫`. VND has no minor unit, so amounts are
/// rounded to whole dong.
pub fn format_currency(amount: Option<f64>) -> String {
    let amount = match amount {
        Some(a) if a.is_finite() && a != 0.0 => a.round() as i64,
        _ => return "0 ₫".to_string(),
    };

    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} ₫")
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%d/%m/%Y").to_string())
}

pub fn format_datetime(at: Option<NaiveDateTime>) -> String {
    at.map_or_else(
        || "-".to_string(),
        |at| at.format("%H:%M %d/%m/%Y").to_string(),
    )
}

/// Formats a raw date string from a loosely typed payload. Accepts plain
/// dates, local date-times and RFC 3339 timestamps.
pub fn format_date_str(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return format_date(Some(date));
    }
    if let Ok(at) = raw.parse::<NaiveDateTime>() {
        return format_date(Some(at.date()));
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return format_date(Some(at.date_naive()));
    }
    "-".to_string()
}

/// `0.25` → `25%`.
pub fn format_share(fraction: Option<f64>) -> String {
    match fraction {
        Some(f) if f.is_finite() => {
            let pct = f * 100.0;
            if (pct - pct.round()).abs() < 1e-9 {
                format!("{}%", pct.round() as i64)
            } else {
                format!("{pct:.2}%")
            }
        }
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(Some(1_500_000.0)), "1.500.000 ₫");
        assert_eq!(format_currency(Some(999.0)), "999 ₫");
        assert_eq!(format_currency(Some(1000.4)), "1.000 ₫");
        assert_eq!(format_currency(Some(-25_000.0)), "-25.000 ₫");
        assert_eq!(format_currency(Some(0.0)), "0 ₫");
        assert_eq!(format_currency(None), "0 ₫");
    }

    #[test]
    fn dates_are_day_first() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(format_date(Some(date)), "09/03/2025");
        assert_eq!(format_date(None), "-");
        assert_eq!(
            format_datetime(Some(date.and_hms_opt(14, 5, 0).unwrap())),
            "14:05 09/03/2025"
        );
    }

    #[test]
    fn loose_date_strings() {
        assert_eq!(format_date_str(Some("2025-03-09")), "09/03/2025");
        assert_eq!(format_date_str(Some("2025-03-09T10:00:00")), "09/03/2025");
        assert_eq!(format_date_str(Some("2025-03-09T10:00:00Z")), "09/03/2025");
        assert_eq!(format_date_str(Some("yesterday")), "-");
        assert_eq!(format_date_str(None), "-");
    }

    #[test]
    fn shares_as_percentages() {
        assert_eq!(format_share(Some(0.25)), "25%");
        assert_eq!(format_share(Some(1.0 / 3.0)), "33.33%");
        assert_eq!(format_share(None), "-");
    }
}
