use crate::{
    hls::{CueOut, CueOutCont},
    playlist::MediaSegment,
};

/// Where the parser is in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserPhase {
    /// Nothing read yet; the next line must be `#EXTM3U`.
    AwaitingHeader,
    InBody,
    /// End of input was processed.
    Done,
    /// The first line was not `#EXTM3U`.
    Failed { line: String },
}

/// Data announced by one tag and applied to the next `#EXTINF` segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingState {
    pub discontinuity: bool,
    pub cue_out: Option<CueOut>,
    pub cue_out_cont: Option<CueOutCont>,
    pub cue_in: bool,
    pub asset_data: Option<String>,
    pub scte35: Option<String>,
    pub date_range: Option<String>,
}

impl PendingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn take_cue_in(&mut self) -> bool {
        std::mem::take(&mut self.cue_in)
    }

    /// Move everything pending onto `segment` and clear it.
    ///
    /// Order matters: SCTE-35 data from a continuation overrides the one
    /// attached with a cue-out. Asset and SCTE-35 data wait for a cue-out.
    pub fn drain_into(&mut self, segment: &mut MediaSegment) {
        if std::mem::take(&mut self.discontinuity) {
            segment.discontinuity = true;
        }

        if let Some(cue_out) = self.cue_out.take() {
            segment.cue_out = Some(cue_out);
            if let Some(asset) = self.asset_data.take() {
                segment.asset_data = Some(asset);
            }
            if let Some(scte35) = self.scte35.take() {
                segment.scte35 = Some(scte35);
            }
        }

        if let Some(cont) = self.cue_out_cont.take() {
            segment.cont_offset = Some(cont.offset);
            segment.cont_duration = Some(cont.duration);
            if let Some(scte35) = cont.scte35 {
                segment.scte35 = Some(scte35);
            }
        }

        if self.take_cue_in() {
            segment.cue_in = true;
        }

        if let Some(date_range) = self.date_range.take() {
            segment.date_range = Some(date_range);
        }
    }
}
