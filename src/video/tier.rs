use super::duration::VideoDuration;
use std::fmt::{self, Display};

pub const SHORTS_BELOW_SECONDS: u64 = 120;
pub const LIVES_FROM_SECONDS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Shorts,
    Movies,
    Lives,
}

impl Tier {
    pub fn from_seconds(total_seconds: u64) -> Self {
        if total_seconds < SHORTS_BELOW_SECONDS {
            Tier::Shorts
        } else if total_seconds >= LIVES_FROM_SECONDS {
            Tier::Lives
        } else {
            Tier::Movies
        }
    }

    /// Durations without a known length land in movies.
    pub fn classify(duration: &VideoDuration) -> Self {
        match duration.total_seconds() {
            Some(total_seconds) => Tier::from_seconds(total_seconds),
            None => Tier::Movies,
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Shorts => write!(f, "shorts"),
            Tier::Movies => write!(f, "movies"),
            Tier::Lives => write!(f, "lives"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::duration::parse_duration;

    #[test]
    fn thresholds() {
        assert_eq!(Tier::from_seconds(0), Tier::Shorts);
        assert_eq!(Tier::from_seconds(119), Tier::Shorts);
        assert_eq!(Tier::from_seconds(120), Tier::Movies);
        assert_eq!(Tier::from_seconds(2999), Tier::Movies);
        assert_eq!(Tier::from_seconds(3000), Tier::Lives);
    }

    #[test]
    fn classify_parsed_durations() {
        assert_eq!(Tier::classify(&parse_duration("PT59S").unwrap()), Tier::Shorts);
        assert_eq!(Tier::classify(&parse_duration("PT12M").unwrap()), Tier::Movies);
        assert_eq!(Tier::classify(&parse_duration("PT1H").unwrap()), Tier::Lives);
    }

    #[test]
    fn huge_hour_count_is_a_live() {
        let duration = parse_duration("PT6000000000000000H59M59S").unwrap();
        assert_eq!(Tier::classify(&duration), Tier::Lives);
    }

    #[test]
    fn unparsed_duration_defaults_to_movies() {
        assert_eq!(Tier::classify(&parse_duration("P0D").unwrap()), Tier::Movies);
    }

    #[test]
    fn display_names() {
        assert_eq!(Tier::Shorts.to_string(), "shorts");
        assert_eq!(Tier::Movies.to_string(), "movies");
        assert_eq!(Tier::Lives.to_string(), "lives");
    }
}
