pub mod classifier;
pub mod event;
pub mod processor;
pub mod state;

pub use classifier::{LineClassifier, LineType, TagKind};
pub use event::{EventQueue, ParseEvent, ParseListener};
pub use processor::PlaylistParser;
pub use state::{ParserPhase, PendingState};

use crate::{Result, playlist::Playlist};

/// Parse a complete playlist held in memory.
pub fn parse(input: &str) -> Result<Playlist> {
    PlaylistParser::with_listener(()).parse_str(input)
}

/// Parse from an iterator of already split lines.
pub fn parse_lines<I, S>(lines: I) -> Result<Playlist>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = PlaylistParser::with_listener(());
    for line in lines {
        parser.push_line(line.as_ref())?;
    }
    parser.finish()
}
