pub mod item;
pub mod segment;
pub mod stream;

use serde::Serialize;

pub use item::{Attributes, Item, ItemKind, Value};
pub use segment::MediaSegment;
pub use stream::{IframeStream, MediaRendition, VariantStream};

/// A playlist-level tag that has no dedicated handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub value: Option<String>,
}

/// Playlist-level tags in first-declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlaylistTags {
    tags: Vec<Tag>,
}

impl PlaylistTags {
    /// Store a value; a repeated tag overwrites the earlier value in place.
    pub fn set(&mut self, name: &str, value: Option<String>) {
        match self.tags.iter_mut().find(|t| t.name == name) {
            Some(tag) => tag.value = value,
            None => self.tags.push(Tag {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// The stored value. `Some(None)` means the tag appeared without data.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.value.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Parsed playlist: items in declaration order plus unhandled tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Playlist {
    pub items: Vec<Item>,
    pub tags: PlaylistTags,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: Item) -> &mut Item {
        self.items.push(item);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn set_tag(&mut self, name: &str, value: Option<String>) {
        self.tags.set(name, value);
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).flatten()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &MediaSegment> {
        self.items.iter().filter_map(Item::as_segment)
    }

    pub fn variants(&self) -> impl Iterator<Item = &VariantStream> {
        self.items.iter().filter_map(Item::as_variant)
    }

    /// A master playlist lists variants or renditions rather than segments.
    pub fn is_master(&self) -> bool {
        self.items.iter().any(|i| {
            matches!(
                i.kind(),
                ItemKind::VariantStream | ItemKind::IframeStream | ItemKind::MediaRendition
            )
        })
    }

    pub fn version(&self) -> Option<u32> {
        self.tag("EXT-X-VERSION")?.trim().parse().ok()
    }

    pub fn target_duration(&self) -> Option<u64> {
        self.tag("EXT-X-TARGETDURATION")?.trim().parse().ok()
    }

    pub fn media_sequence(&self) -> Option<u64> {
        self.tag("EXT-X-MEDIA-SEQUENCE")?.trim().parse().ok()
    }

    /// Sum of all segment durations, skipping unreadable ones.
    pub fn total_duration(&self) -> f64 {
        self.segments()
            .map(|s| s.duration)
            .filter(|d| !d.is_nan())
            .sum()
    }
}
