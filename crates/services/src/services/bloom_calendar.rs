//! Bloom period and sowing month computation.
//!
//! Bloom periods are stored as free-text Dutch ranges like
//! "Juni-September". Parsing is best effort: anything unrecognized
//! yields an empty result instead of an error, since this only feeds
//! display filters.

use chrono::{Datelike, NaiveDate};

/// Month number for a Dutch month name or abbreviation, lowercased.
fn month_number(token: &str) -> Option<u32> {
    let month = match token {
        "januari" | "jan" => 1,
        "februari" | "feb" => 2,
        "maart" | "mrt" => 3,
        "april" | "apr" => 4,
        "mei" => 5,
        "juni" | "jun" => 6,
        "juli" | "jul" => 7,
        "augustus" | "aug" => 8,
        "september" | "sep" => 9,
        "oktober" | "okt" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Abbreviated Dutch name for a month number, for display.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mrt",
        4 => "Apr",
        5 => "Mei",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Okt",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

/// Months (1-12) spanned by a Dutch range like "Juni-September",
/// wrapping across the year boundary when the end month precedes the
/// start month ("November-Februari" gives [11, 12, 1, 2]). A bare month
/// name is a single-month range. Returns empty on anything it cannot
/// parse.
pub fn parse_month_range(period: Option<&str>) -> Vec<u32> {
    let Some(period) = period else {
        return Vec::new();
    };
    let cleaned = period.trim().to_lowercase();
    if cleaned.is_empty() {
        return Vec::new();
    }

    let parts: Vec<&str> = cleaned.split(['-', '\u{2013}', '\u{2014}']).collect();
    if parts.len() != 2 {
        return month_number(&cleaned).map(|m| vec![m]).unwrap_or_default();
    }

    let (Some(start), Some(end)) = (
        month_number(parts[0].trim()),
        month_number(parts[1].trim()),
    ) else {
        return Vec::new();
    };

    let mut months = Vec::new();
    let mut current = start;
    while current != end {
        months.push(current);
        current = if current == 12 { 1 } else { current + 1 };
        // Guard against wrap-around never terminating.
        if months.len() > 12 {
            break;
        }
    }
    months.push(end);
    months
}

/// Months in which a plant should be sown. An explicit planting date
/// wins; otherwise sowing is advised 2 to 3 months before the first
/// bloom month.
pub fn sowing_months(bloom_period: Option<&str>, planting_date: Option<NaiveDate>) -> Vec<u32> {
    if let Some(date) = planting_date {
        return vec![date.month()];
    }

    let bloom_months = parse_month_range(bloom_period);
    let Some(&first) = bloom_months.first() else {
        return Vec::new();
    };

    (2..=3)
        .map(|offset| {
            let month = first as i32 - offset;
            if month <= 0 { (month + 12) as u32 } else { month as u32 }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_names() {
        assert_eq!(parse_month_range(Some("Juni-September")), vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_abbreviations_and_whitespace() {
        assert_eq!(parse_month_range(Some(" mrt - mei ")), vec![3, 4, 5]);
    }

    #[test]
    fn test_year_wrap() {
        assert_eq!(
            parse_month_range(Some("November-Februari")),
            vec![11, 12, 1, 2]
        );
    }

    #[test]
    fn test_single_month() {
        assert_eq!(parse_month_range(Some("mei")), vec![5]);
    }

    #[test]
    fn test_invalid_input_is_empty() {
        assert_eq!(parse_month_range(None), Vec::<u32>::new());
        assert_eq!(parse_month_range(Some("")), Vec::<u32>::new());
        assert_eq!(parse_month_range(Some("not a range")), Vec::<u32>::new());
        assert_eq!(parse_month_range(Some("smarch-mei")), Vec::<u32>::new());
    }

    #[test]
    fn test_sowing_from_bloom_period() {
        assert_eq!(sowing_months(Some("Juni-September"), None), vec![4, 3]);
    }

    #[test]
    fn test_sowing_wraps_into_previous_year() {
        assert_eq!(sowing_months(Some("Januari-Maart"), None), vec![11, 10]);
    }

    #[test]
    fn test_planting_date_overrides_bloom_period() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 12).unwrap();
        assert_eq!(sowing_months(Some("Juni-September"), Some(date)), vec![4]);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(3), "Mrt");
        assert_eq!(month_name(13), "");
    }
}
