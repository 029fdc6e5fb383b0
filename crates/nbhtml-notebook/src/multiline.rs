//! nbformat "multiline string" fields
//!
//! Cell sources, stream text and MIME bundle values may be stored either as one
//! string or as a list of fragments. Fragments are joined in order with no separator.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum MultilineString {
    Single(String),
    Fragments(Vec<String>),
}

impl From<MultilineString> for String {
    fn from(value: MultilineString) -> Self {
        match value {
            MultilineString::Single(s) => s,
            MultilineString::Fragments(fragments) => fragments.concat(),
        }
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    MultilineString::deserialize(deserializer).map(String::from)
}

pub(crate) fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<MultilineString>::deserialize(deserializer).map(|value| value.map(String::from))
}
