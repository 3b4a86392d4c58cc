//! `date()`-style formatting of Unix timestamps.
//!
//! Date formats are configured the way page templates write them: one
//! letter per component (`Y-m-d`, `d.m.Y H:i`, `D, d M Y`). A backslash
//! prints the next character literally and any character that is not a
//! format letter is copied as-is.
//!
//! | Letter | Output | Letter | Output |
//! |--------|--------|--------|--------|
//! | `d` | day, `01`-`31` | `j` | day, `1`-`31` |
//! | `D` | `Mon`-`Sun` | `l` | `Monday`-`Sunday` |
//! | `N` | ISO weekday, `1`-`7` | `w` | weekday, `0` (Sunday)-`6` |
//! | `S` | `st`, `nd`, `rd`, `th` | `z` | day of year, from `0` |
//! | `W` | ISO week, `01`-`53` | `t` | days in month |
//! | `F` | `January`-`December` | `M` | `Jan`-`Dec` |
//! | `m` | month, `01`-`12` | `n` | month, `1`-`12` |
//! | `L` | `1` in leap years | `o` | ISO week-numbering year |
//! | `Y` | year, 4+ digits | `y` | year, 2 digits |
//! | `a` / `A` | `am` / `PM` | `g` / `G` | hour, no padding (12h / 24h) |
//! | `h` / `H` | hour, padded (12h / 24h) | `i` / `s` | minutes / seconds |
//! | `u` / `v` | micro- / milliseconds | `U` | seconds since the epoch |
//! | `e` / `T` | zone name | `P` / `p` | `+02:00` (`p`: `Z` at UTC) |
//! | `O` | `+0200` | `Z` | offset in seconds |
//! | `c` | ISO 8601 | `r` | RFC 2822 |
//! | `B` | Swatch Internet time | `I` | daylight saving flag, always `0` |

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use std::fmt::{self, Write};

/// Formats `secs` since the Unix epoch with a `date()`-style `format`.
///
/// Returns `None` when `secs` is outside the range chrono can represent.
///
/// # Examples
///
/// ```rust
/// use chrono::FixedOffset;
/// use page_query::datefmt::format_timestamp;
///
/// let utc = FixedOffset::east_opt(0).unwrap();
/// assert_eq!(format_timestamp(1_700_000_000, "Y-m-d", utc).as_deref(), Some("2023-11-14"));
/// assert_eq!(format_timestamp(i64::MAX, "Y-m-d", utc), None);
/// ```
#[must_use]
pub fn format_timestamp(secs: i64, format: &str, offset: FixedOffset) -> Option<String> {
    let dt = DateTime::from_timestamp(secs, 0)?.with_timezone(&offset);
    let mut out = String::with_capacity(format.len() * 2);
    render(&dt, format, &mut out).ok()?;
    Some(out)
}

fn render(dt: &DateTime<FixedOffset>, format: &str, out: &mut String) -> fmt::Result {
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            'd' => write!(out, "{:02}", dt.day())?,
            'D' => write!(out, "{}", dt.format("%a"))?,
            'j' => write!(out, "{}", dt.day())?,
            'l' => write!(out, "{}", dt.format("%A"))?,
            'N' => write!(out, "{}", dt.weekday().number_from_monday())?,
            'S' => out.push_str(ordinal_suffix(dt.day())),
            'w' => write!(out, "{}", dt.weekday().num_days_from_sunday())?,
            'z' => write!(out, "{}", dt.ordinal0())?,
            'W' => write!(out, "{:02}", dt.iso_week().week())?,
            'F' => write!(out, "{}", dt.format("%B"))?,
            'm' => write!(out, "{:02}", dt.month())?,
            'M' => write!(out, "{}", dt.format("%b"))?,
            'n' => write!(out, "{}", dt.month())?,
            't' => write!(out, "{}", days_in_month(dt.year(), dt.month()))?,
            'L' => out.push(if is_leap_year(dt.year()) { '1' } else { '0' }),
            'o' => write!(out, "{}", dt.iso_week().year())?,
            'Y' => write!(out, "{:04}", dt.year())?,
            'y' => write!(out, "{:02}", dt.year().rem_euclid(100))?,
            'a' => out.push_str(if dt.hour() < 12 { "am" } else { "pm" }),
            'A' => out.push_str(if dt.hour() < 12 { "AM" } else { "PM" }),
            'g' => write!(out, "{}", dt.hour12().1)?,
            'G' => write!(out, "{}", dt.hour())?,
            'h' => write!(out, "{:02}", dt.hour12().1)?,
            'H' => write!(out, "{:02}", dt.hour())?,
            'i' => write!(out, "{:02}", dt.minute())?,
            's' => write!(out, "{:02}", dt.second())?,
            'u' => write!(out, "{:06}", dt.timestamp_subsec_micros())?,
            'v' => write!(out, "{:03}", dt.timestamp_subsec_millis())?,
            'e' | 'T' => {
                if dt.offset().local_minus_utc() == 0 {
                    out.push_str("UTC");
                } else {
                    write!(out, "{}", dt.format("%:z"))?;
                }
            }
            'P' => write!(out, "{}", dt.format("%:z"))?,
            'p' => {
                if dt.offset().local_minus_utc() == 0 {
                    out.push('Z');
                } else {
                    write!(out, "{}", dt.format("%:z"))?;
                }
            }
            'O' => write!(out, "{}", dt.format("%z"))?,
            'Z' => write!(out, "{}", dt.offset().local_minus_utc())?,
            'c' => write!(out, "{}", dt.format("%Y-%m-%dT%H:%M:%S%:z"))?,
            'r' => write!(out, "{}", dt.format("%a, %d %b %Y %H:%M:%S %z"))?,
            'U' => write!(out, "{}", dt.timestamp())?,
            // fixed offsets never observe daylight saving
            'I' => out.push('0'),
            'B' => write!(out, "{:03}", swatch_beats(dt.timestamp()))?,
            other => out.push(other),
        }
    }
    Ok(())
}

/// Beats since midnight in UTC+1, a thousand to the day.
fn swatch_beats(secs: i64) -> i64 {
    (secs + 3600).rem_euclid(86_400) * 10 / 864
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}
