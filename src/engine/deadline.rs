//! Deadline extraction heuristics.
//!
//! Classifies listings as time-bound ("by-date") markets and derives a
//! resolution deadline from free text when the feed has no structured
//! end-date. Both checks are best-effort text heuristics: false positives
//! and negatives are expected and acceptable, and a failed parse is never
//! an error - it degrades to "no deadline", which the probability model
//! treats as a defined zero-penalty branch.
//!
//! The retrieval corpus never reaches for a regex engine; patterns here
//! are ordered stdlib scans plus `chrono` date construction, first
//! successful parse wins.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::domain::DeadlineUrgency;

const MONTHS: [(&str, u32); 12] = [
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

/// Whether a listing reads as resolving against a deadline rather than an
/// unconditional event.
///
/// Concatenates title, rules, and description, lowercases, and matches a
/// fixed pattern set: "by"/"before" phrasing, the literal word "deadline",
/// "by <year>" style year literals, or text ending in a 4-digit year.
#[must_use]
pub fn is_time_bound_market(title: &str, rules: Option<&str>, description: Option<&str>) -> bool {
    let text = join_text(title, rules, description);

    contains_phrase(&text, "by")
        || contains_phrase(&text, "before")
        || text.contains("deadline")
        || ends_with_year(&text)
}

/// Derive a resolution deadline for a market.
///
/// A structured end-date from the feed takes precedence over all text
/// parsing and is returned unchanged. Otherwise title and rules are
/// scanned with an ordered pattern list; the first successful parse wins:
///
/// 1. `<month> <day>, <year>` ("March 31, 2026")
/// 2. `<m>/<d>/<yyyy>` slash dates
/// 3. `by end of <month> <year>` (resolves to the month's last day)
/// 4. the literal phrase "this year" (resolves to December 31 of `now`'s year)
///
/// Returns `None` when nothing matches or the matched text is not a valid
/// calendar date.
#[must_use]
pub fn extract_deadline(
    title: &str,
    rules: Option<&str>,
    structured_end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if let Some(end) = structured_end {
        return Some(end);
    }

    let text = join_text(title, rules, None);

    parse_month_day_year(&text)
        .or_else(|| parse_slash_date(&text))
        .or_else(|| parse_end_of_month(&text))
        .or_else(|| parse_this_year(&text, now))
        .map(to_utc_midnight)
}

/// Days until `end_date`, floored at zero for past dates.
#[must_use]
pub fn time_remaining_days(end_date: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let ms = (end_date - now).num_milliseconds() as f64;
    (ms / 86_400_000.0).max(0.0)
}

/// Classify time-to-deadline into an urgency band.
#[must_use]
pub fn deadline_urgency(days: Option<f64>) -> DeadlineUrgency {
    match days {
        None => DeadlineUrgency::Unknown,
        Some(d) if d < 7.0 => DeadlineUrgency::Critical,
        Some(d) if d < 30.0 => DeadlineUrgency::Urgent,
        Some(d) if d < 90.0 => DeadlineUrgency::Moderate,
        Some(_) => DeadlineUrgency::Distant,
    }
}

fn join_text(title: &str, rules: Option<&str>, description: Option<&str>) -> String {
    let mut text = title.to_lowercase();
    if let Some(rules) = rules {
        text.push(' ');
        text.push_str(&rules.to_lowercase());
    }
    if let Some(description) = description {
        text.push(' ');
        text.push_str(&description.to_lowercase());
    }
    text
}

/// Whether `word` occurs as a standalone word in `text`.
fn contains_phrase(text: &str, word: &str) -> bool {
    words(text).any(|w| w == word)
}

fn ends_with_year(text: &str) -> bool {
    match words(text).last() {
        Some(last) => parse_year(last).is_some(),
        None => false,
    }
}

/// Words of `text` with surrounding punctuation stripped.
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '/'))
        .filter(|w| !w.is_empty())
}

fn parse_year(word: &str) -> Option<i32> {
    if word.len() != 4 || !word.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = word.parse().ok()?;
    (1970..=2100).contains(&year).then_some(year)
}

fn month_number(word: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, n)| *n)
}

/// "march 31, 2026" / "march 31 2026".
fn parse_month_day_year(text: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = words(text).collect();
    for window in tokens.windows(3) {
        let month = match month_number(window[0]) {
            Some(m) => m,
            None => continue,
        };
        let day: u32 = match window[1].parse() {
            Ok(d) => d,
            Err(_) => continue,
        };
        let year = match parse_year(window[2]) {
            Some(y) => y,
            None => continue,
        };
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }
    None
}

/// "3/31/2026" style slash dates.
fn parse_slash_date(text: &str) -> Option<NaiveDate> {
    for word in words(text) {
        let mut parts = word.split('/');
        let (m, d, y) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(m), Some(d), Some(y), None) => (m, d, y),
            _ => continue,
        };
        let month: u32 = match m.parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        let day: u32 = match d.parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        let year = match parse_year(y) {
            Some(v) => v,
            None => continue,
        };
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }
    None
}

/// "by end of march 2026" resolves to the month's last day.
fn parse_end_of_month(text: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = words(text).collect();
    for window in tokens.windows(5) {
        if window[0] != "by" || window[1] != "end" || window[2] != "of" {
            continue;
        }
        let month = match month_number(window[3]) {
            Some(m) => m,
            None => continue,
        };
        let year = match parse_year(window[4]) {
            Some(y) => y,
            None => continue,
        };
        if let Some(date) = last_day_of_month(year, month) {
            return Some(date);
        }
    }
    None
}

/// "this year" resolves to December 31 of the current calendar year.
fn parse_this_year(text: &str, now: DateTime<Utc>) -> Option<NaiveDate> {
    if text.contains("this year") {
        NaiveDate::from_ymd_opt(now.year(), 12, 31)
    } else {
        None
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(first_of_next.pred_opt()?)
}

fn to_utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
}
