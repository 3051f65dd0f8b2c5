use crate::prelude::*;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockDuration {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl ClockDuration {
    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }

    pub fn formatted(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Video length as reported upstream. Strings outside the `PT#H#M#S` shape
/// are carried verbatim so they can still be written back to the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoDuration {
    Clock(ClockDuration),
    Unparsed(String),
}

impl VideoDuration {
    pub fn total_seconds(&self) -> Option<u64> {
        match self {
            VideoDuration::Clock(clock) => Some(clock.total_seconds()),
            VideoDuration::Unparsed(_) => None,
        }
    }

    pub fn formatted(&self) -> String {
        match self {
            VideoDuration::Clock(clock) => clock.formatted(),
            VideoDuration::Unparsed(raw) => raw.clone(),
        }
    }
}

pub fn parse_duration(raw: &str) -> Result<VideoDuration> {
    let Some(captures) = Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$")?.captures(raw)
    else {
        tracing::warn!("Unrecognized video duration: {}", raw);
        return Ok(VideoDuration::Unparsed(raw.to_string()));
    };

    let component = |index: usize| -> Option<u64> {
        match captures.get(index) {
            Some(digits) => digits.as_str().parse::<u64>().ok(),
            None => Some(0),
        }
    };

    match (component(1), component(2), component(3)) {
        (Some(hours), Some(minutes), Some(seconds)) => Ok(VideoDuration::Clock(ClockDuration {
            hours,
            minutes,
            seconds,
        })),
        _ => {
            tracing::warn!("Video duration out of range: {}", raw);
            Ok(VideoDuration::Unparsed(raw.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_components_default_to_zero() {
        let duration = parse_duration("PT5M").unwrap();
        assert_eq!(
            duration,
            VideoDuration::Clock(ClockDuration {
                hours: 0,
                minutes: 5,
                seconds: 0
            })
        );
        assert_eq!(duration.formatted(), "00:05:00");
        assert_eq!(duration.total_seconds(), Some(300));
    }

    #[test]
    fn full_duration_is_zero_padded() {
        let duration = parse_duration("PT1H2M3S").unwrap();
        assert_eq!(duration.formatted(), "01:02:03");
        assert_eq!(duration.total_seconds(), Some(3723));
    }

    #[test]
    fn seconds_only() {
        assert_eq!(parse_duration("PT45S").unwrap().formatted(), "00:00:45");
    }

    #[test]
    fn long_streams_keep_every_hour_digit() {
        assert_eq!(parse_duration("PT123H4M").unwrap().formatted(), "123:04:00");
    }

    #[test]
    fn huge_hour_counts_saturate() {
        let duration = parse_duration("PT6000000000000000H").unwrap();
        assert_eq!(duration.total_seconds(), Some(u64::MAX));
    }

    #[test]
    fn day_durations_pass_through_unchanged() {
        let duration = parse_duration("P1DT2H").unwrap();
        assert_eq!(duration, VideoDuration::Unparsed("P1DT2H".to_string()));
        assert_eq!(duration.formatted(), "P1DT2H");
        assert_eq!(duration.total_seconds(), None);
    }

    #[test]
    fn empty_string_passes_through() {
        assert_eq!(
            parse_duration("").unwrap(),
            VideoDuration::Unparsed(String::new())
        );
    }
}
