//! Named actions a character can perform on command.
//!
//! An action table maps a command word to an [`Action`] value. Actions carry
//! only the data they need; the session interprets them.

use serde::{Deserialize, Serialize};

use crate::idgen::LocationId;
use crate::vitals::Recovery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Print a line of flavor text.
    Emote { text: String },
    /// Restore pools.
    Recover { amount: Recovery, text: Option<String> },
    /// Move the performer straight to a location, bypassing adjacency.
    Warp { to: LocationId, text: Option<String> },
}

impl Action {
    /// Whether performing this action should advance world time.
    pub fn takes_time(&self) -> bool {
        !matches!(self, Action::Emote { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotes_are_free() {
        let emote = Action::Emote { text: "You dance.".into() };
        let warp = Action::Warp {
            to: LocationId::new("home"),
            text: None,
        };
        assert!(!emote.takes_time());
        assert!(warp.takes_time());
    }
}
