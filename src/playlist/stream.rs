use serde::Serialize;

use super::item::{Attributes, Value};
use crate::hls::{AttributeList, unquote};

/// Unquoted, case-insensitive attribute read shared by the stream kinds.
fn lookup<'a>(attributes: &'a AttributeList, name: &str) -> Option<&'a str> {
    attributes
        .get_ignore_case(name)
        .and_then(|a| a.value.as_deref())
        .map(unquote)
}

fn parse_resolution(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

/// A variant playlist from `#EXT-X-STREAM-INF`; the URI comes from the next
/// line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariantStream {
    pub attributes: AttributeList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl VariantStream {
    pub fn new(attributes: AttributeList) -> Self {
        Self {
            attributes,
            uri: None,
        }
    }

    /// Case-insensitive attribute lookup with quotes stripped.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        lookup(&self.attributes, name)
    }

    pub fn bandwidth(&self) -> Option<u64> {
        self.attribute("BANDWIDTH")?.parse().ok()
    }

    pub fn average_bandwidth(&self) -> Option<u64> {
        self.attribute("AVERAGE-BANDWIDTH")?.parse().ok()
    }

    pub fn resolution(&self) -> Option<(u32, u32)> {
        parse_resolution(self.attribute("RESOLUTION")?)
    }

    pub fn codecs(&self) -> Option<&str> {
        self.attribute("CODECS")
    }

    pub fn frame_rate(&self) -> Option<f64> {
        self.attribute("FRAME-RATE")?.parse().ok()
    }
}

impl Attributes for VariantStream {
    fn get(&self, name: &str) -> Option<Value> {
        if name == "uri" {
            return self.uri.clone().map(Value::Text);
        }
        self.attributes.get(name).map(Value::from)
    }

    fn set(&mut self, name: &str, value: Value) {
        if name == "uri" {
            self.uri = Some(value.to_string());
        } else {
            self.attributes.set(name, Some(value.to_string()));
        }
    }
}

/// An I-frame only variant from `#EXT-X-I-FRAME-STREAM-INF`. Complete on
/// creation; its URI is the `URI` attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IframeStream {
    pub attributes: AttributeList,
}

impl IframeStream {
    pub fn new(attributes: AttributeList) -> Self {
        Self { attributes }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        lookup(&self.attributes, name)
    }

    pub fn uri(&self) -> Option<&str> {
        self.attribute("URI")
    }

    pub fn bandwidth(&self) -> Option<u64> {
        self.attribute("BANDWIDTH")?.parse().ok()
    }

    pub fn resolution(&self) -> Option<(u32, u32)> {
        parse_resolution(self.attribute("RESOLUTION")?)
    }
}

impl Attributes for IframeStream {
    fn get(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).map(Value::from)
    }

    fn set(&mut self, name: &str, value: Value) {
        self.attributes.set(name, Some(value.to_string()));
    }
}

/// An alternative rendition from `#EXT-X-MEDIA`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaRendition {
    pub attributes: AttributeList,
}

impl MediaRendition {
    pub fn new(attributes: AttributeList) -> Self {
        Self { attributes }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        lookup(&self.attributes, name)
    }

    /// AUDIO, VIDEO, SUBTITLES or CLOSED-CAPTIONS.
    pub fn media_type(&self) -> Option<&str> {
        self.attribute("TYPE")
    }

    pub fn group_id(&self) -> Option<&str> {
        self.attribute("GROUP-ID")
    }

    pub fn name(&self) -> Option<&str> {
        self.attribute("NAME")
    }

    pub fn language(&self) -> Option<&str> {
        self.attribute("LANGUAGE")
    }

    pub fn uri(&self) -> Option<&str> {
        self.attribute("URI")
    }

    pub fn is_default(&self) -> bool {
        self.attribute("DEFAULT")
            .is_some_and(|v| v.eq_ignore_ascii_case("YES"))
    }
}

impl Attributes for MediaRendition {
    fn get(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).map(Value::from)
    }

    fn set(&mut self, name: &str, value: Value) {
        self.attributes.set(name, Some(value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_typed_accessors() {
        let attrs = AttributeList::parse(
            r#"BANDWIDTH=1000000,RESOLUTION=1280x720,CODECS="avc1.64001f,mp4a.40.2",FRAME-RATE=29.970"#,
        );
        let var = VariantStream::new(attrs);
        assert_eq!(var.bandwidth(), Some(1000000));
        assert_eq!(var.resolution(), Some((1280, 720)));
        assert_eq!(var.codecs(), Some("avc1.64001f,mp4a.40.2"));
        assert_eq!(var.frame_rate(), Some(29.97));
        assert_eq!(var.average_bandwidth(), None);
    }

    #[test]
    fn test_variant_uri_by_name() {
        let mut var = VariantStream::default();
        var.set("uri", "low/index.m3u8".into());
        var.set("BANDWIDTH", "640000".into());
        assert_eq!(var.uri.as_deref(), Some("low/index.m3u8"));
        assert_eq!(var.bandwidth(), Some(640000));
        assert_eq!(var.get("BANDWIDTH"), Some(Value::Text("640000".to_string())));
    }

    #[test]
    fn test_iframe_uri_attribute() {
        let iframe = IframeStream::new(AttributeList::parse(
            r#"BANDWIDTH=86000,URI="iframe.m3u8""#,
        ));
        assert_eq!(iframe.uri(), Some("iframe.m3u8"));
        assert_eq!(iframe.bandwidth(), Some(86000));
        assert_eq!(iframe.get("URI"), Some(Value::Text(r#""iframe.m3u8""#.to_string())));
    }

    #[test]
    fn test_rendition_accessors() {
        let media = MediaRendition::new(AttributeList::parse(
            r#"TYPE=AUDIO,GROUP-ID="aac",NAME="English",LANGUAGE="en",DEFAULT=YES,URI="en.m3u8""#,
        ));
        assert_eq!(media.media_type(), Some("AUDIO"));
        assert_eq!(media.group_id(), Some("aac"));
        assert_eq!(media.name(), Some("English"));
        assert_eq!(media.language(), Some("en"));
        assert_eq!(media.uri(), Some("en.m3u8"));
        assert!(media.is_default());
    }
}
