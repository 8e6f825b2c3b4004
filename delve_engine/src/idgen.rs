//! ** idgen module **
//! Identifier newtypes for locations and characters, and the naming scheme for
//! characters spawned more than once from the same template.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a location in the world graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

/// Identifier of a character instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(LocationId);
string_id!(CharacterId);

/// Id for the `nth` (1-based) instance spawned from a character template.
///
/// The first instance keeps the template id; later ones get a `#n` suffix.
pub fn instance_id(template: &str, nth: usize) -> CharacterId {
    if nth <= 1 {
        CharacterId::new(template)
    } else {
        CharacterId::new(format!("{template}#{nth}"))
    }
}

/// Template id an instance was spawned from.
pub fn template_of(id: &CharacterId) -> &str {
    id.as_str().split_once('#').map_or(id.as_str(), |(template, _)| template)
}
