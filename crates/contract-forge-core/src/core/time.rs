// crates/contract-forge-core/src/core/time.rs
// ============================================================================
// Module: Contract Forge Time Model
// Description: Explicit timestamps and short-date rendering for documents.
// Purpose: Keep document generation deterministic by requiring caller time.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! The core never reads wall-clock time. Hosts pass a [`Timestamp`] into the
//! resolution engine, and the engine renders it as a short calendar date in the
//! configured [`DateStyle`]. Dates are rendered in UTC.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::Date;
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// US short date, `M/D/YYYY`.
const US_FORMAT: &[FormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");
/// ISO 8601 calendar date, `YYYY-MM-DD`.
const ISO_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
/// Day-first short date, `D/M/YYYY`.
const DAY_FIRST_FORMAT: &[FormatItem<'static>] =
    format_description!("[day padding:none]/[month padding:none]/[year]");

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when converting or rendering timestamps.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeError {
    /// Timestamp is outside the representable calendar range.
    #[error("timestamp out of range: {0}")]
    OutOfRange(i64),
    /// Calendar date text could not be parsed.
    #[error("invalid calendar date: {0}")]
    InvalidDate(String),
    /// Date formatting failed.
    #[error("date formatting failed: {0}")]
    Format(String),
}

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Instant expressed as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix milliseconds.
    #[must_use]
    pub const fn unix_millis(self) -> i64 {
        self.0
    }

    /// Converts a host-provided system time into a timestamp.
    ///
    /// Times before the epoch clamp to zero.
    #[must_use]
    pub fn from_system_time(time: SystemTime) -> Self {
        let millis = time
            .duration_since(UNIX_EPOCH)
            .map(|duration| i64::try_from(duration.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        Self(millis)
    }

    /// Parses a `YYYY-MM-DD` calendar date as midnight UTC.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidDate`] when the text is not a valid date.
    pub fn from_calendar_date(text: &str) -> Result<Self, TimeError> {
        let date = Date::parse(text.trim(), ISO_FORMAT)
            .map_err(|err| TimeError::InvalidDate(format!("{text}: {err}")))?;
        let seconds = date.midnight().assume_utc().unix_timestamp();
        Ok(Self(seconds.saturating_mul(1_000)))
    }

    /// Returns the absolute distance between two timestamps in milliseconds.
    #[must_use]
    pub const fn distance_millis(self, other: Self) -> u64 {
        self.0.abs_diff(other.0)
    }

    /// Converts the timestamp into a UTC date-time.
    fn to_offset_date_time(self) -> Result<OffsetDateTime, TimeError> {
        let nanos = i128::from(self.0) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|_| TimeError::OutOfRange(self.0))
    }

    /// Renders the calendar date of this instant in the given style.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError`] when the instant is out of range.
    pub fn format_date(self, style: DateStyle) -> Result<String, TimeError> {
        let moment = self.to_offset_date_time()?;
        moment.format(style.format_items()).map_err(|err| TimeError::Format(err.to_string()))
    }

    /// Renders the calendar date as `YYYY-MM-DD`, used for file names.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError`] when the instant is out of range.
    pub fn iso_date(self) -> Result<String, TimeError> {
        self.format_date(DateStyle::Iso)
    }
}

// ============================================================================
// SECTION: Date Style
// ============================================================================

/// Short-date rendering styles for the `[DATE]` token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// `M/D/YYYY`.
    #[default]
    Us,
    /// `YYYY-MM-DD`.
    Iso,
    /// `D/M/YYYY`.
    DayFirst,
}

impl DateStyle {
    /// Returns the format description for this style.
    const fn format_items(self) -> &'static [FormatItem<'static>] {
        match self {
            Self::Us => US_FORMAT,
            Self::Iso => ISO_FORMAT,
            Self::DayFirst => DAY_FIRST_FORMAT,
        }
    }

    /// Returns the stable label for this style.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Iso => "iso",
            Self::DayFirst => "day_first",
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
