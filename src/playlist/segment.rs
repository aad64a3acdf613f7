use std::collections::BTreeMap;

use serde::Serialize;

use super::item::{Attributes, Value};
use crate::{
    Result,
    hls::{ByteRange, CueOut, number},
};

/// A playable chunk, declared by `#EXTINF` and the URI line after it.
#[derive(Debug, Clone, Serialize)]
pub struct MediaSegment {
    /// Duration in seconds. NaN when the `#EXTINF` value was unreadable.
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub discontinuity: bool,
    /// Raw `#EXT-X-BYTERANGE` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte_range: Option<String>,
    /// Start of an ad break.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cue_out: Option<CueOut>,
    /// Elapsed time into the current ad break.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cont_offset: Option<f64>,
    /// Total length of the current ad break.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cont_duration: Option<f64>,
    /// End of an ad break.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cue_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scte35: Option<String>,
    /// Raw `#EXT-X-DATERANGE` attribute list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    /// Attributes set by name that have no dedicated field.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl MediaSegment {
    /// An empty segment with an unknown (NaN) duration.
    pub fn new() -> Self {
        Self {
            duration: f64::NAN,
            title: None,
            uri: None,
            discontinuity: false,
            byte_range: None,
            cue_out: None,
            cont_offset: None,
            cont_duration: None,
            cue_in: false,
            asset_data: None,
            scte35: None,
            date_range: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_duration(duration: f64, title: Option<String>) -> Self {
        Self {
            duration,
            title,
            ..Self::new()
        }
    }

    /// Parse the raw byte range, if any.
    pub fn parsed_byte_range(&self) -> Option<Result<ByteRange>> {
        self.byte_range.as_deref().map(ByteRange::parse)
    }

    /// True when the segment belongs to an ad break signalled by cue tags.
    pub fn is_ad_marker(&self) -> bool {
        self.cue_out.is_some() || self.cont_offset.is_some() || self.cue_in
    }
}

// NaN durations and offsets compare equal so reparsing yields an equal
// playlist.
impl PartialEq for MediaSegment {
    fn eq(&self, other: &Self) -> bool {
        number::same(self.duration, other.duration)
            && self.title == other.title
            && self.uri == other.uri
            && self.discontinuity == other.discontinuity
            && self.byte_range == other.byte_range
            && self.cue_out == other.cue_out
            && number::same_opt(self.cont_offset, other.cont_offset)
            && number::same_opt(self.cont_duration, other.cont_duration)
            && self.cue_in == other.cue_in
            && self.asset_data == other.asset_data
            && self.scte35 == other.scte35
            && self.date_range == other.date_range
            && self.extra == other.extra
    }
}

impl Default for MediaSegment {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributes for MediaSegment {
    fn get(&self, name: &str) -> Option<Value> {
        let text = |s: &Option<String>| s.clone().map(Value::Text);
        match name {
            "duration" => Some(Value::Number(self.duration)),
            "title" => text(&self.title),
            "uri" => text(&self.uri),
            "discontinuity" => self.discontinuity.then_some(Value::Flag(true)),
            "byteRange" => text(&self.byte_range),
            "cueout" => self.cue_out.clone().map(Value::Cue),
            "cont-offset" => self.cont_offset.map(Value::Number),
            "cont-dur" => self.cont_duration.map(Value::Number),
            "cuein" => self.cue_in.then_some(Value::Flag(true)),
            "assetdata" => text(&self.asset_data),
            "sctedata" => text(&self.scte35),
            "daterange" => text(&self.date_range),
            other => self.extra.get(other).cloned(),
        }
    }

    fn set(&mut self, name: &str, value: Value) {
        match name {
            "duration" => self.duration = value.as_f64(),
            "title" => self.title = Some(value.to_string()),
            "uri" => self.uri = Some(value.to_string()),
            "discontinuity" => self.discontinuity = value.as_flag(),
            "byteRange" => self.byte_range = Some(value.to_string()),
            "cueout" => self.cue_out = Some(value.into_cue()),
            "cont-offset" => self.cont_offset = Some(value.as_f64()),
            "cont-dur" => self.cont_duration = Some(value.as_f64()),
            "cuein" => self.cue_in = value.as_flag(),
            "assetdata" => self.asset_data = Some(value.to_string()),
            "sctedata" => self.scte35 = Some(value.to_string()),
            "daterange" => self.date_range = Some(value.to_string()),
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_by_name() {
        let mut seg = MediaSegment::new();
        seg.set("duration", Value::Number(6.0));
        seg.set("title", "Intro".into());
        seg.set("cuein", true.into());
        seg.set("cueout", Value::Number(30.0));

        assert_eq!(seg.duration, 6.0);
        assert_eq!(seg.get("title"), Some(Value::Text("Intro".to_string())));
        assert_eq!(seg.get("cuein"), Some(Value::Flag(true)));
        assert_eq!(seg.cue_out, Some(CueOut::Seconds(30)));
        assert_eq!(seg.get("uri"), None);
    }

    #[test]
    fn test_last_write_wins() {
        let mut seg = MediaSegment::new();
        seg.set("uri", "a.ts".into());
        seg.set("uri", "b.ts".into());
        seg.set("custom", "1".into());
        seg.set("custom", "2".into());
        assert_eq!(seg.uri.as_deref(), Some("b.ts"));
        assert_eq!(seg.get("custom"), Some(Value::Text("2".to_string())));
    }

    #[test]
    fn test_parsed_byte_range() {
        let mut seg = MediaSegment::new();
        assert!(seg.parsed_byte_range().is_none());

        seg.byte_range = Some("1024@2048".to_string());
        let br = seg.parsed_byte_range().unwrap().unwrap();
        assert_eq!(br, ByteRange::new(1024, Some(2048)));

        seg.byte_range = Some("oops".to_string());
        assert!(seg.parsed_byte_range().unwrap().is_err());
    }

    #[test]
    fn test_new_segment_has_nan_duration() {
        let seg = MediaSegment::new();
        assert!(seg.duration.is_nan());
        assert!(!seg.is_ad_marker());
    }

    #[test]
    fn test_nan_fields_compare_equal() {
        let mut a = MediaSegment::new();
        a.cont_offset = Some(f64::NAN);
        a.cue_in = true;
        let b = a.clone();
        assert_eq!(a, b);

        let mut c = b.clone();
        c.duration = 6.0;
        assert_ne!(a, c);
    }
}
