use super::{
    classifier::{HEADER, LineClassifier, LineType, TagKind, trim_line},
    event::{EventQueue, ParseEvent, ParseListener},
    state::{ParserPhase, PendingState},
};
use crate::{
    Error, Result,
    hls::{AttributeList, CueOut, CueOutCont, number},
    playlist::{Attributes, IframeStream, Item, MediaRendition, MediaSegment, Playlist, VariantStream},
};

/// Line-driven M3U parser.
///
/// Feed trimmed or untrimmed lines with [`push_line`](Self::push_line) and
/// signal end of input with [`finish`](Self::finish). Notifications go to the
/// listener as each line is handled.
pub struct PlaylistParser<L = EventQueue> {
    phase: ParserPhase,
    pending: PendingState,
    playlist: Playlist,
    current: Option<usize>,
    lines_read: u64,
    listener: L,
}

impl PlaylistParser<EventQueue> {
    pub fn new() -> Self {
        Self::with_listener(EventQueue::new())
    }

    /// Take the notifications produced so far.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ParseEvent> + '_ {
        self.listener.drain()
    }
}

impl Default for PlaylistParser<EventQueue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ParseListener> PlaylistParser<L> {
    pub fn with_listener(listener: L) -> Self {
        Self {
            phase: ParserPhase::AwaitingHeader,
            pending: PendingState::new(),
            playlist: Playlist::new(),
            current: None,
            lines_read: 0,
            listener,
        }
    }

    /// Process one line.
    ///
    /// Fails only when the first line is not `#EXTM3U`, or when the parser
    /// has already failed or finished.
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        let line = trim_line(line);

        match self.phase {
            ParserPhase::AwaitingHeader => {
                self.lines_read += 1;
                if line != HEADER {
                    return Err(self.fail(line));
                }
                self.phase = ParserPhase::InBody;
                Ok(())
            }
            ParserPhase::InBody => {
                self.lines_read += 1;
                self.process_line(line);
                Ok(())
            }
            ParserPhase::Done | ParserPhase::Failed { .. } => Err(Error::Halted),
        }
    }

    /// Signal end of input and hand over the finished playlist.
    ///
    /// A cue-in still waiting for a segment is placed on a new empty segment
    /// first.
    pub fn finish(&mut self) -> Result<Playlist> {
        match &self.phase {
            ParserPhase::Failed { line } => {
                return Err(Error::InvalidHeader { line: line.clone() });
            }
            ParserPhase::Done => return Err(Error::Halted),
            ParserPhase::AwaitingHeader | ParserPhase::InBody => {}
        }
        self.phase = ParserPhase::Done;

        if self.pending.take_cue_in() {
            tracing::debug!("cue-in pending at end of input, adding trailing segment");
            let mut segment = MediaSegment::new();
            segment.cue_in = true;
            self.start_item(segment.into());
        }

        let playlist = std::mem::take(&mut self.playlist);
        self.current = None;

        tracing::debug!(
            items = playlist.len(),
            lines = self.lines_read,
            "playlist complete"
        );
        self.listener.on_event(ParseEvent::PlaylistReady(playlist.clone()));

        Ok(playlist)
    }

    /// Parse a whole document, one line at a time.
    pub fn parse_str(&mut self, input: &str) -> Result<Playlist> {
        for line in input.lines() {
            self.push_line(line)?;
        }
        self.finish()
    }

    /// Items created so far.
    pub fn items(&self) -> &[Item] {
        &self.playlist.items
    }

    /// The item later tags and URI lines attach to.
    pub fn current_item(&self) -> Option<&Item> {
        self.current.map(|i| &self.playlist.items[i])
    }

    pub fn phase(&self) -> &ParserPhase {
        &self.phase
    }

    pub fn pending(&self) -> &PendingState {
        &self.pending
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    fn fail(&mut self, line: &str) -> Error {
        let err = Error::InvalidHeader {
            line: line.to_string(),
        };
        tracing::warn!("{}", err);

        self.phase = ParserPhase::Failed {
            line: line.to_string(),
        };
        self.listener.on_event(ParseEvent::FormatError {
            line: line.to_string(),
            message: err.to_string(),
        });
        err
    }

    fn process_line(&mut self, line: &str) {
        let line_type = LineClassifier::classify(line);
        tracing::trace!(line = self.lines_read, ?line_type, "classified");

        match line_type {
            LineType::Empty | LineType::EndList => {}
            LineType::Tag { name, data } => self.handle_tag(name, data),
            LineType::Uri(uri) => self.handle_uri(uri),
        }
    }

    fn handle_tag(&mut self, name: &str, data: Option<&str>) {
        match TagKind::from_name(name) {
            TagKind::ExtInf => self.on_extinf(data.unwrap_or_default()),
            TagKind::Discontinuity => self.pending.discontinuity = true,
            TagKind::CueOut => self.pending.cue_out = Some(CueOut::parse(data)),
            TagKind::CueOutCont => {
                let data = data.unwrap_or_default();
                match CueOutCont::parse(data) {
                    Some(cont) => self.pending.cue_out_cont = Some(cont),
                    None => tracing::debug!(data, "dropping incomplete cue-out continuation"),
                }
            }
            TagKind::OatclsScte35 => self.pending.scte35 = Some(owned(data)),
            TagKind::CueIn => self.pending.cue_in = true,
            TagKind::Asset => self.pending.asset_data = Some(owned(data)),
            TagKind::DateRange => self.pending.date_range = Some(owned(data)),
            TagKind::ByteRange => match self.current_mut() {
                Some(item) => item.set("byteRange", owned(data).into()),
                None => tracing::debug!("byte range before any item, ignoring"),
            },
            TagKind::StreamInf => {
                let attributes = AttributeList::parse(data.unwrap_or_default());
                self.start_item(VariantStream::new(attributes).into());
            }
            TagKind::IFrameStreamInf => {
                let attributes = AttributeList::parse(data.unwrap_or_default());
                self.start_item(IframeStream::new(attributes).into());
                self.emit_current();
            }
            TagKind::Media => {
                let attributes = AttributeList::parse(data.unwrap_or_default());
                self.start_item(MediaRendition::new(attributes).into());
                self.emit_current();
            }
            TagKind::Other => {
                tracing::debug!(tag = name, "storing unhandled tag");
                self.playlist.set_tag(name, data.map(String::from));
            }
        }
    }

    /// `#EXTINF:<duration>,<title>` starts a segment and takes all pending
    /// cross-line state.
    fn on_extinf(&mut self, data: &str) {
        let (duration, title) = match data.split_once(',') {
            Some((duration, title)) => (duration, Some(title.to_string())),
            None => (data, None),
        };

        let mut segment = MediaSegment::with_duration(number::leading_float(duration), title);
        self.pending.drain_into(&mut segment);
        self.start_item(segment.into());
    }

    fn handle_uri(&mut self, uri: &str) {
        if !self.current_item().is_some_and(Item::awaits_uri) {
            self.start_item(MediaSegment::new().into());
        }

        if let Some(item) = self.current_mut() {
            item.set("uri", uri.into());
        }
        self.emit_current();
    }

    fn start_item(&mut self, item: Item) {
        self.playlist.add_item(item);
        self.current = Some(self.playlist.items.len() - 1);
    }

    fn current_mut(&mut self) -> Option<&mut Item> {
        self.current.map(|i| &mut self.playlist.items[i])
    }

    fn emit_current(&mut self) {
        if let Some(item) = self.current_item().cloned() {
            self.listener.on_event(ParseEvent::ItemReady(item));
        }
    }
}

fn owned(data: Option<&str>) -> String {
    data.unwrap_or_default().to_string()
}
