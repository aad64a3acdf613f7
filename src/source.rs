//! Async line source: frames an [`AsyncRead`] into lines and drives a
//! [`PlaylistParser`] with them.

use futures::{Stream, StreamExt};
use serde::Deserialize;
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec};

use crate::{
    Error, Result,
    parser::{ParseEvent, PlaylistParser},
    playlist::Playlist,
};

const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// Settings for reading playlist text from a byte stream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Longest accepted line, in bytes. Longer lines fail the read.
    pub max_line_length: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl SourceConfig {
    /// Read overrides from the environment (`M3U_MAX_LINE_LENGTH`).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(max) = std::env::var("M3U_MAX_LINE_LENGTH")
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            config.max_line_length = max;
        }
        config
    }

    fn codec(&self) -> LinesCodec {
        LinesCodec::new_with_max_length(self.max_line_length)
    }
}

/// Read the whole stream and return the parsed playlist.
pub async fn parse_reader<R>(reader: R, config: &SourceConfig) -> Result<Playlist>
where
    R: AsyncRead + Unpin,
{
    let mut parser = PlaylistParser::with_listener(());
    let mut lines = FramedRead::new(reader, config.codec());

    while let Some(line) = lines.next().await {
        parser.push_line(&line?)?;
    }

    parser.finish()
}

/// Stream parse notifications as lines arrive.
///
/// A format error is yielded as [`ParseEvent::FormatError`] and ends the
/// stream. Read failures are yielded as `Err` and also end it.
pub fn event_stream<R>(reader: R, config: SourceConfig) -> impl Stream<Item = Result<ParseEvent>>
where
    R: AsyncRead + Unpin,
{
    async_stream::try_stream! {
        let mut parser = PlaylistParser::new();
        let mut lines = FramedRead::new(reader, config.codec());
        let mut failed = false;

        while let Some(line) = lines.next().await {
            let line = line.map_err(Error::from)?;
            let pushed = parser.push_line(&line);

            let events: Vec<ParseEvent> = parser.drain_events().collect();
            for event in events {
                yield event;
            }

            if pushed.is_err() {
                failed = true;
                break;
            }
        }

        if !failed {
            parser.finish()?;
            let events: Vec<ParseEvent> = parser.drain_events().collect();
            for event in events {
                yield event;
            }
        } else {
            tracing::debug!(lines = parser.lines_read(), "stopped after format error");
        }
    }
}
