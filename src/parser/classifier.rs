pub const HEADER: &str = "#EXTM3U";
pub const END_LIST: &str = "#EXT-X-ENDLIST";

/// Represents the type of a line in an M3U playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType<'a> {
    Empty,
    EndList,
    Tag { name: &'a str, data: Option<&'a str> },
    Uri(&'a str),
}

impl LineType<'_> {
    pub fn is_tag(&self) -> bool {
        matches!(self, Self::Tag { .. })
    }

    pub fn is_uri(&self) -> bool {
        matches!(self, Self::Uri(_))
    }
}

/// Tags with a dedicated handler. Everything else is stored on the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    ExtInf,
    Discontinuity,
    CueOut,
    CueOutCont,
    OatclsScte35,
    CueIn,
    Asset,
    ByteRange,
    DateRange,
    StreamInf,
    IFrameStreamInf,
    Media,
    Other,
}

impl TagKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "EXTINF" => Self::ExtInf,
            "EXT-X-DISCONTINUITY" => Self::Discontinuity,
            "EXT-X-CUE-OUT" => Self::CueOut,
            "EXT-X-CUE-OUT-CONT" => Self::CueOutCont,
            "EXT-OATCLS-SCTE35" => Self::OatclsScte35,
            "EXT-X-CUE-IN" => Self::CueIn,
            "EXT-X-ASSET" => Self::Asset,
            "EXT-X-BYTERANGE" => Self::ByteRange,
            "EXT-X-DATERANGE" => Self::DateRange,
            "EXT-X-STREAM-INF" => Self::StreamInf,
            "EXT-X-I-FRAME-STREAM-INF" => Self::IFrameStreamInf,
            "EXT-X-MEDIA" => Self::Media,
            _ => Self::Other,
        }
    }

    /// Tags that create a new playlist item.
    pub fn starts_item(&self) -> bool {
        matches!(
            self,
            Self::ExtInf | Self::StreamInf | Self::IFrameStreamInf | Self::Media
        )
    }

    /// Tags whose data is held until the next `#EXTINF`.
    pub fn is_deferred(&self) -> bool {
        matches!(
            self,
            Self::Discontinuity
                | Self::CueOut
                | Self::CueOutCont
                | Self::OatclsScte35
                | Self::CueIn
                | Self::Asset
                | Self::DateRange
        )
    }
}

/// Trim a raw line. A leading byte order mark counts as whitespace.
pub fn trim_line(line: &str) -> &str {
    line.trim().trim_start_matches('\u{feff}').trim_start()
}

/// Classifier for M3U lines.
pub struct LineClassifier;

impl LineClassifier {
    /// Classify a line from the playlist body.
    pub fn classify(line: &str) -> LineType<'_> {
        let line = trim_line(line);

        if line.is_empty() {
            return LineType::Empty;
        }

        if line == END_LIST {
            return LineType::EndList;
        }

        match line.strip_prefix('#') {
            Some(rest) => match rest.split_once(':') {
                Some((name, data)) => LineType::Tag {
                    name,
                    data: Some(data),
                },
                None => LineType::Tag {
                    name: rest,
                    data: None,
                },
            },
            None => LineType::Uri(line),
        }
    }
}
