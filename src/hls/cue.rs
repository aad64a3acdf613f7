use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::{attributes::AttributeList, number};

static ELAPSED_OVER_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+\.?[0-9]*)/([0-9]+\.?[0-9]*)").expect("valid regex"));

static CONT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(ElapsedTime|Duration|SCTE35)=([^,]*)").expect("valid regex"));

/// Value carried by `#EXT-X-CUE-OUT`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CueOut {
    /// Raw value of a `DURATION=` attribute, kept verbatim.
    Duration(String),
    /// Bare integer form, e.g. `#EXT-X-CUE-OUT:30`. Zero when unreadable.
    Seconds(i64),
}

impl CueOut {
    /// Parse the data following `#EXT-X-CUE-OUT:`.
    pub fn parse(data: Option<&str>) -> Self {
        let Some(data) = data else {
            return Self::Seconds(0);
        };

        let attrs = AttributeList::parse(data);
        if let Some(attr) = attrs.get_ignore_case("duration") {
            return Self::Duration(attr.value.clone().unwrap_or_default());
        }

        Self::Seconds(number::leading_int(data).unwrap_or(0))
    }

    /// Break length in seconds, best effort.
    pub fn seconds(&self) -> f64 {
        match self {
            Self::Duration(raw) => number::leading_float(raw),
            Self::Seconds(s) => *s as f64,
        }
    }
}

/// Position inside an ongoing ad break, from `#EXT-X-CUE-OUT-CONT`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CueOutCont {
    pub offset: f64,
    pub duration: f64,
    pub scte35: Option<String>,
}

impl CueOutCont {
    /// Parse either `<elapsed>/<duration>` or
    /// `ElapsedTime=..,Duration=..,SCTE35=..`.
    ///
    /// Returns `None` unless both elapsed time and duration are present.
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(caps) = ELAPSED_OVER_DURATION.captures(data) {
            return Some(Self {
                offset: number::whole_float(&caps[1]),
                duration: number::whole_float(&caps[2]),
                scte35: None,
            });
        }

        let mut offset = None;
        let mut duration = None;
        let mut scte35 = None;

        for caps in CONT_FIELD.captures_iter(data) {
            let value = &caps[2];
            match &caps[1] {
                "ElapsedTime" => offset = Some(number::whole_float(value)),
                "Duration" => duration = Some(number::whole_float(value)),
                _ => scte35 = Some(value.to_string()),
            }
        }

        Some(Self {
            offset: offset?,
            duration: duration?,
            scte35,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_out_bare_integer() {
        assert_eq!(CueOut::parse(Some("30")), CueOut::Seconds(30));
        assert_eq!(CueOut::parse(Some("30.5")), CueOut::Seconds(30));
    }

    #[test]
    fn test_cue_out_duration_attribute() {
        let cue = CueOut::parse(Some("DURATION=15.015,ID=ad1"));
        assert_eq!(cue, CueOut::Duration("15.015".to_string()));
        assert_eq!(cue.seconds(), 15.015);

        let cue = CueOut::parse(Some("Duration=20"));
        assert_eq!(cue, CueOut::Duration("20".to_string()));
    }

    #[test]
    fn test_cue_out_defaults_to_zero() {
        assert_eq!(CueOut::parse(Some("CUE=abc")), CueOut::Seconds(0));
        assert_eq!(CueOut::parse(None), CueOut::Seconds(0));
    }

    #[test]
    fn test_cont_slash_form() {
        let cont = CueOutCont::parse("2.5/30").unwrap();
        assert_eq!(cont.offset, 2.5);
        assert_eq!(cont.duration, 30.0);
        assert_eq!(cont.scte35, None);
    }

    #[test]
    fn test_cont_named_fields() {
        let cont = CueOutCont::parse("ElapsedTime=5,Duration=30,SCTE35=ABC").unwrap();
        assert_eq!(cont.offset, 5.0);
        assert_eq!(cont.duration, 30.0);
        assert_eq!(cont.scte35.as_deref(), Some("ABC"));
    }

    #[test]
    fn test_cont_named_fields_any_order() {
        let cont = CueOutCont::parse("SCTE35=/DAlAAA=,Duration=60,ElapsedTime=12.5").unwrap();
        assert_eq!(cont.offset, 12.5);
        assert_eq!(cont.duration, 60.0);
        assert_eq!(cont.scte35.as_deref(), Some("/DAlAAA="));
    }

    #[test]
    fn test_cont_incomplete_is_dropped() {
        assert!(CueOutCont::parse("ElapsedTime=5").is_none());
        assert!(CueOutCont::parse("Duration=30,SCTE35=ABC").is_none());
        assert!(CueOutCont::parse("").is_none());
    }

    #[test]
    fn test_cont_slash_form_ascii_digits_only() {
        assert!(CueOutCont::parse("\u{0662}/\u{0663}\u{0660}").is_none());
        let cont = CueOutCont::parse("x2/30").unwrap();
        assert_eq!(cont.offset, 2.0);
    }
}
