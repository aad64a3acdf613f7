use serde::Serialize;

/// A single `KEY=value` pair from an attribute list.
///
/// Values are kept verbatim, including surrounding quotes. A segment with no
/// `=` has no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: Option<String>,
}

/// Ordered attribute list, as found after the colon of tags such as
/// `#EXT-X-STREAM-INF` or `#EXT-X-MEDIA`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeList {
    attrs: Vec<Attribute>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize an attribute-list string.
    pub fn parse(s: &str) -> Self {
        let attrs = split_unquoted_commas(s)
            .into_iter()
            .map(|segment| match segment.split_once('=') {
                Some((key, value)) => Attribute {
                    key: key.trim().to_string(),
                    value: Some(value.trim().to_string()),
                },
                None => Attribute {
                    key: segment.trim().to_string(),
                    value: None,
                },
            })
            .collect();

        Self { attrs }
    }

    /// Exact-case lookup. Returns the first match.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.key == key)
            .and_then(|a| a.value.as_deref())
    }

    /// Case-insensitive lookup. Returns the first match.
    pub fn get_ignore_case(&self, key: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.key.eq_ignore_ascii_case(key))
    }

    /// Overwrite the first attribute named `key`, or append a new one.
    pub fn set(&mut self, key: &str, value: Option<String>) {
        match self.attrs.iter_mut().find(|a| a.key == key) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute {
                key: key.to_string(),
                value,
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}

/// Strip one pair of surrounding double quotes, if present.
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Split on commas that have an even number of quotes after them.
///
/// Scans backward so a stray unmatched quote only protects the commas before
/// it, never the ones after.
fn split_unquoted_commas(s: &str) -> Vec<&str> {
    if s.trim().is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut end = s.len();
    let mut quotes_after = 0usize;

    for (i, c) in s.char_indices().rev() {
        match c {
            '"' => quotes_after += 1,
            ',' if quotes_after % 2 == 0 => {
                parts.push(&s[i + 1..end]);
                end = i;
            }
            _ => {}
        }
    }
    parts.push(&s[..end]);

    parts.reverse();
    parts
}
