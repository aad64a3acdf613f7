pub mod attributes;
pub mod byterange;
pub mod cue;
pub mod number;

pub use attributes::{Attribute, AttributeList, unquote};
pub use byterange::ByteRange;
pub use cue::{CueOut, CueOutCont};
