use crate::prelude::*;
use chrono::{DateTime, Utc};
use std::fmt::{self, Display};

/// Publish instant packed as `YYYYMMDDhhmmss` digits, so numeric order is
/// chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TimeToken(u64);

impl TimeToken {
    pub fn from_published_at(published_at: &str) -> Result<Self> {
        let published_at = DateTime::parse_from_rfc3339(published_at)?.with_timezone(&Utc);
        Ok(TimeToken(
            published_at.format("%Y%m%d%H%M%S").to_string().parse::<u64>()?,
        ))
    }

    /// Reads a token back from a sheet cell. Blank or garbled cells count as
    /// zero so the next upload is always treated as new.
    pub fn parse_stored(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            return TimeToken::default();
        }

        match cell.parse::<u64>() {
            Ok(value) => TimeToken(value),
            Err(e) => {
                tracing::warn!("Stored timestamp token {:?} is not numeric: {}", cell, e);
                TimeToken::default()
            }
        }
    }
}

impl Display for TimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_date_and_time_digits() {
        let token = TimeToken::from_published_at("2024-01-01T12:00:00Z").unwrap();
        assert_eq!(token.to_string(), "20240101120000");
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let token = TimeToken::from_published_at("2024-01-02T09:30:15+09:00").unwrap();
        assert_eq!(token.to_string(), "20240102003015");
    }

    #[test]
    fn rejects_garbage_publish_time() {
        assert!(TimeToken::from_published_at("yesterday").is_err());
    }

    #[test]
    fn stored_cells() {
        assert_eq!(TimeToken::parse_stored(""), TimeToken::default());
        assert_eq!(TimeToken::parse_stored("  "), TimeToken::default());
        assert_eq!(TimeToken::parse_stored("n/a"), TimeToken::default());
        assert_eq!(
            TimeToken::parse_stored("20240101000000"),
            TimeToken::from_published_at("2024-01-01T00:00:00Z").unwrap()
        );
    }

    #[test]
    fn later_publish_times_compare_greater() {
        let earlier = TimeToken::from_published_at("2024-01-01T23:59:59Z").unwrap();
        let later = TimeToken::from_published_at("2024-01-02T00:00:00Z").unwrap();
        assert!(later > earlier);
        assert!(earlier > TimeToken::default());
    }
}
