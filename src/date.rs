//! Parsing and humanising of the service's scrobble dates.
//!
//! Recent-track lists carry dates like `2024-03-05 10:00`, registration dates look like
//! `05 Mar 2024, 10:00`. Both are read as UTC.

use crate::types::RawTimestamp;
use crate::{LastFmError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Layouts tried in order by [`RawTimestamp::parse_instant`]; the first match wins.
pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%d %b %Y, %H:%M"];

const SHORT_DATE_FORMAT: &str = "%-d %b %Y";

impl RawTimestamp {
    /// Parse the display text into an instant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lastfm_feed::RawTimestamp;
    ///
    /// let ts = RawTimestamp::new("05 Mar 2024, 10:00", "");
    /// let instant = ts.parse_instant().unwrap();
    /// assert_eq!(instant.to_rfc3339(), "2024-03-05T10:00:00+00:00");
    ///
    /// assert!(RawTimestamp::default().parse_instant().is_err());
    /// ```
    pub fn parse_instant(&self) -> Result<DateTime<Utc>> {
        DATE_FORMATS
            .iter()
            .find_map(|format| parse_exact(&self.text, format))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| LastFmError::Parse(format!("unrecognised date text {:?}", self.text)))
    }

    /// Render the date as `D Mon YYYY`, e.g. `5 Mar 2024`.
    ///
    /// Returns an empty string when the text cannot be parsed.
    pub fn short_date(&self) -> String {
        match self.parse_instant() {
            Ok(instant) => instant.format(SHORT_DATE_FORMAT).to_string(),
            Err(e) => {
                log::debug!("No short date: {e}");
                String::new()
            }
        }
    }

    /// Describe how long ago the scrobble happened, e.g. `3 hours ago`.
    ///
    /// Returns an empty string when the text cannot be parsed.
    pub fn relative_date(&self) -> String {
        self.relative_date_at(Utc::now())
    }

    /// Like [`RawTimestamp::relative_date`], measured against `now`.
    ///
    /// Elapsed time is bucketed by the first matching rule:
    ///
    /// | elapsed            | label              |
    /// |--------------------|--------------------|
    /// | 2 days or more     | `N days ago`       |
    /// | 1 day              | `1 day ago`        |
    /// | 2 hours or more    | `N hours ago`      |
    /// | 3 minutes or more  | `N minutes ago`    |
    /// | anything else      | `Just now`         |
    ///
    /// There is no one-hour bucket, so 90 minutes reads `90 minutes ago`.
    pub fn relative_date_at(&self, now: DateTime<Utc>) -> String {
        match self.parse_instant() {
            Ok(instant) => humanize_elapsed(now - instant),
            Err(e) => {
                log::debug!("No relative date: {e}");
                String::new()
            }
        }
    }

    /// The redundant epoch field as an instant, if it holds a valid number.
    ///
    /// Not consulted by the display helpers above.
    pub fn unix_time(&self) -> Option<DateTime<Utc>> {
        let seconds = self.uts.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp(seconds, 0)
    }
}

/// Parse `text` with `format`, accepting it only if it is the exact rendering of the result.
///
/// Unpadded fields, short years and stray whitespace fail the comparison. Month names
/// compare case-insensitively.
fn parse_exact(text: &str, format: &str) -> Option<NaiveDateTime> {
    let naive = NaiveDateTime::parse_from_str(text, format).ok()?;
    naive
        .format(format)
        .to_string()
        .eq_ignore_ascii_case(text)
        .then_some(naive)
}

fn humanize_elapsed(elapsed: chrono::Duration) -> String {
    let days = elapsed.num_days();
    if days > 1 {
        return format!("{days} days ago");
    } else if days == 1 {
        return "1 day ago".to_string();
    }

    let hours = elapsed.num_hours();
    if hours > 1 {
        return format!("{hours} hours ago");
    }

    let minutes = elapsed.num_minutes();
    if minutes > 2 {
        format!("{minutes} minutes ago")
    } else {
        "Just now".to_string()
    }
}
