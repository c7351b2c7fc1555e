//! Date/time utilities for spotlight-feed.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{FeedError, Result};

/// `strftime` pattern for RSS `pubDate` / `lastBuildDate` in UTC.
const RSS_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Offset-carrying forms tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];

/// Offset-less forms, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an upstream ISO-8601 timestamp into UTC.
///
/// A trailing `Z` means `+00:00`. Timestamps without an offset are taken as
/// UTC, and a bare `YYYY-MM-DD` is midnight UTC.
pub fn normalize_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();
    let value: Cow<'_, str> = match trimmed.strip_suffix('Z') {
        Some(rest) => Cow::Owned(format!("{rest}+00:00")),
        None => Cow::Borrowed(trimmed),
    };

    let rfc_err = match DateTime::parse_from_rfc3339(&value) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&value, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&value, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(FeedError::MalformedTimestamp {
        value: raw.to_string(),
        reason: rfc_err.to_string(),
    })
}

/// Render a UTC timestamp the way RSS 2.0 date fields expect.
///
/// The day is zero-padded: `Fri, 01 Mar 2024 10:00:00 +0000`.
pub fn to_rss_date(dt: &DateTime<Utc>) -> String {
    dt.format(RSS_DATE_FORMAT).to_string()
}

/// Convert an upstream timestamp straight to its RSS date text.
pub fn iso_to_rss_date(raw: &str) -> Result<String> {
    normalize_timestamp(raw).map(|dt| to_rss_date(&dt))
}
