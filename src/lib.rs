pub mod error;
pub mod hls;
pub mod parser;
pub mod playlist;
pub mod source;

pub use error::Error;
pub use parser::{ParseEvent, ParseListener, PlaylistParser, parse, parse_lines};
pub use playlist::{Attributes, Item, MediaSegment, Playlist};
pub use source::{SourceConfig, event_stream, parse_reader};
pub type Result<T> = std::result::Result<T, Error>;
