//! Admin listing filters and pagination.

use chrono::{DateTime, NaiveDate, Utc};

use super::Registration;
use crate::error::GatewayError;

/// Filters applied to the admin registration listing.
///
/// Text filters match case-insensitive literal substrings; `gender` and
/// `race_category` must match exactly. The creation range is inclusive
/// on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFilter {
    /// Substring of the participant name.
    pub name: Option<String>,
    /// Substring of the email.
    pub email: Option<String>,
    /// Exact gender.
    pub gender: Option<String>,
    /// Exact race category display name.
    pub race_category: Option<String>,
    /// Substring of the affiliations (club) field.
    pub club: Option<String>,
    /// Earliest creation time.
    pub created_from: Option<DateTime<Utc>>,
    /// Latest creation time.
    pub created_to: Option<DateTime<Utc>>,
}

impl RegistrationFilter {
    /// Returns `true` when the record passes every active filter.
    #[must_use]
    pub fn matches(&self, record: &Registration) -> bool {
        let details = &record.details;
        contains_ci(&details.name, self.name.as_deref())
            && contains_ci(&details.email, self.email.as_deref())
            && contains_ci(&details.affiliations, self.club.as_deref())
            && self.gender.as_deref().is_none_or(|g| details.gender == g)
            && self
                .race_category
                .as_deref()
                .is_none_or(|c| details.race_category.as_str() == c)
            && self.created_from.is_none_or(|from| record.created_at >= from)
            && self.created_to.is_none_or(|to| record.created_at <= to)
    }
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

/// Parses a `dateFrom` value into the start of that day (UTC).
///
/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, of which only the
/// date is used.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] on an unparseable date.
pub fn start_of_day(raw: &str) -> Result<DateTime<Utc>, GatewayError> {
    let date = parse_date(raw)?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Parses a `dateTo` value into the last millisecond of that day (UTC).
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] on an unparseable date.
pub fn end_of_day(raw: &str) -> Result<DateTime<Utc>, GatewayError> {
    let date = parse_date(raw)?;
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| GatewayError::InvalidRequest(format!("Invalid date: {raw}")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, GatewayError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| GatewayError::InvalidRequest(format!("Invalid date: {raw}")))
}

/// One page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub page: u32,
    /// Records per page.
    pub limit: u32,
}

impl Page {
    /// Default page size of the dashboard.
    pub const DEFAULT_LIMIT: u32 = 20;

    /// Largest page the store will return in one call; also the export cap.
    pub const MAX_LIMIT: u32 = 10_000;

    /// Builds a page, clamping `page` to at least 1 and `limit` to
    /// `1..=MAX_LIMIT`.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Number of records to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64).saturating_sub(1) * self.limit as u64
    }

    /// Number of pages needed for `total` records.
    #[must_use]
    pub const fn total_pages(&self, total: u64) -> u64 {
        if total == 0 {
            1
        } else {
            total.div_ceil(self.limit as u64)
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}
