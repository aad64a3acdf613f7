use std::fmt;

use serde::Serialize;

use super::{
    segment::MediaSegment,
    stream::{IframeStream, MediaRendition, VariantStream},
};
use crate::hls::{CueOut, number};

/// A loosely typed attribute value, used by the name-based accessors.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Flag(bool),
    Number(f64),
    Text(String),
    Cue(CueOut),
}

impl Value {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Flag(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::Text(s) => number::leading_float(s),
            Self::Cue(cue) => cue.seconds(),
        }
    }

    pub fn as_flag(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Cue(_) => true,
        }
    }

    pub fn into_cue(self) -> CueOut {
        match self {
            Self::Cue(cue) => cue,
            Self::Text(s) => CueOut::Duration(s),
            other => CueOut::Seconds(other.as_f64() as i64),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Flag(a), Self::Flag(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => number::same(*a, *b),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Cue(a), Self::Cue(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Cue(CueOut::Duration(s)) => f.write_str(s),
            Self::Cue(CueOut::Seconds(n)) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Name-based attribute access shared by every item kind.
pub trait Attributes {
    /// Read an attribute by name.
    fn get(&self, name: &str) -> Option<Value>;

    /// Insert or overwrite an attribute. Last write wins.
    fn set(&mut self, name: &str, value: Value);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    MediaSegment,
    VariantStream,
    IframeStream,
    MediaRendition,
}

/// One entry of a playlist. The kind is fixed by the tag that created it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    MediaSegment(MediaSegment),
    VariantStream(VariantStream),
    IframeStream(IframeStream),
    MediaRendition(MediaRendition),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::MediaSegment(_) => ItemKind::MediaSegment,
            Self::VariantStream(_) => ItemKind::VariantStream,
            Self::IframeStream(_) => ItemKind::IframeStream,
            Self::MediaRendition(_) => ItemKind::MediaRendition,
        }
    }

    /// URI taken from the line following the tag. For I-frame streams and
    /// renditions this is the `uri` attribute, not the quoted `URI` one.
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::MediaSegment(seg) => seg.uri.as_deref(),
            Self::VariantStream(var) => var.uri.as_deref(),
            Self::IframeStream(iframe) => iframe.attributes.get("uri"),
            Self::MediaRendition(media) => media.attributes.get("uri"),
        }
    }

    /// Whether a following bare URI line attaches to this item instead of
    /// starting a new segment.
    pub fn awaits_uri(&self) -> bool {
        self.uri().is_none()
    }

    pub fn as_segment(&self) -> Option<&MediaSegment> {
        match self {
            Self::MediaSegment(seg) => Some(seg),
            _ => None,
        }
    }

    pub fn as_segment_mut(&mut self) -> Option<&mut MediaSegment> {
        match self {
            Self::MediaSegment(seg) => Some(seg),
            _ => None,
        }
    }

    pub fn as_variant(&self) -> Option<&VariantStream> {
        match self {
            Self::VariantStream(var) => Some(var),
            _ => None,
        }
    }

    pub fn as_iframe(&self) -> Option<&IframeStream> {
        match self {
            Self::IframeStream(iframe) => Some(iframe),
            _ => None,
        }
    }

    pub fn as_rendition(&self) -> Option<&MediaRendition> {
        match self {
            Self::MediaRendition(media) => Some(media),
            _ => None,
        }
    }
}

impl Attributes for Item {
    fn get(&self, name: &str) -> Option<Value> {
        match self {
            Self::MediaSegment(seg) => seg.get(name),
            Self::VariantStream(var) => var.get(name),
            Self::IframeStream(iframe) => iframe.get(name),
            Self::MediaRendition(media) => media.get(name),
        }
    }

    fn set(&mut self, name: &str, value: Value) {
        match self {
            Self::MediaSegment(seg) => seg.set(name, value),
            Self::VariantStream(var) => var.set(name, value),
            Self::IframeStream(iframe) => iframe.set(name, value),
            Self::MediaRendition(media) => media.set(name, value),
        }
    }
}

impl From<MediaSegment> for Item {
    fn from(seg: MediaSegment) -> Self {
        Self::MediaSegment(seg)
    }
}

impl From<VariantStream> for Item {
    fn from(var: VariantStream) -> Self {
        Self::VariantStream(var)
    }
}

impl From<IframeStream> for Item {
    fn from(iframe: IframeStream) -> Self {
        Self::IframeStream(iframe)
    }
}

impl From<MediaRendition> for Item {
    fn from(media: MediaRendition) -> Self {
        Self::MediaRendition(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hls::AttributeList;

    #[test]
    fn test_awaits_uri() {
        let mut item = Item::from(MediaSegment::new());
        assert!(item.awaits_uri());
        item.set("uri", "seg.ts".into());
        assert!(!item.awaits_uri());
        assert_eq!(item.uri(), Some("seg.ts"));

        let mut iframe = Item::from(IframeStream::new(AttributeList::parse(r#"URI="i.m3u8""#)));
        assert!(iframe.awaits_uri());
        assert_eq!(iframe.uri(), None);
        iframe.set("uri", "stray.m3u8".into());
        assert!(!iframe.awaits_uri());
        assert_eq!(iframe.uri(), Some("stray.m3u8"));
    }

    #[test]
    fn test_number_values_match_nan() {
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_ne!(Value::Number(1.0), Value::Text("1".to_string()));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Flag(true).to_string(), "true");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Cue(CueOut::Seconds(30)).to_string(), "30");
    }

    #[test]
    fn test_value_into_cue() {
        assert_eq!(Value::Number(30.0).into_cue(), CueOut::Seconds(30));
        assert_eq!(
            Value::from("15.0").into_cue(),
            CueOut::Duration("15.0".to_string())
        );
    }

    #[test]
    fn test_serialized_kind_tag() {
        let item = Item::from(VariantStream::new(AttributeList::parse("BANDWIDTH=1")));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "variant_stream");
    }
}
