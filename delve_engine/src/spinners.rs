//! Flavor text spinners.
//!
//! Spinners pick a random line for repetitive messages. They never influence
//! game state, so they don't draw from the combat dice.

use std::collections::HashMap;

use gametools::spinners::{Spinner, Wedge};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpinnerType {
    EntityNotFound,
    Movement,
    NoEffect,
    QuitMsg,
    UnrecognizedCommand,
}

impl SpinnerType {
    /// Look up a spinner type by its key in world data.
    pub fn from_key(key: &str) -> Option<SpinnerType> {
        match key {
            "entityNotFound" => Some(SpinnerType::EntityNotFound),
            "movement" => Some(SpinnerType::Movement),
            "noEffect" => Some(SpinnerType::NoEffect),
            "quitMsg" => Some(SpinnerType::QuitMsg),
            "unrecognizedCommand" => Some(SpinnerType::UnrecognizedCommand),
            _ => None,
        }
    }
}

pub trait SpinnerExt {
    fn from_strs(words: &[&str]) -> Self;
}

impl SpinnerExt for Spinner<String> {
    fn from_strs(words: &[&str]) -> Self {
        let wedges = words.iter().map(|w| Wedge::new((*w).to_string())).collect::<Vec<_>>();
        Spinner::new(wedges)
    }
}

/// Built-in spinners; world data may replace any of them.
pub fn default_spinners() -> HashMap<SpinnerType, Spinner<String>> {
    let mut spinners = HashMap::new();
    spinners.insert(
        SpinnerType::EntityNotFound,
        Spinner::from_strs(&["You don't see that here.", "What's that?", "Nothing like that around."]),
    );
    spinners.insert(
        SpinnerType::Movement,
        Spinner::from_strs(&["You head that way...", "You set off.", "Onward."]),
    );
    spinners.insert(
        SpinnerType::NoEffect,
        Spinner::from_strs(&["Nothing happens.", "That accomplishes nothing."]),
    );
    spinners.insert(
        SpinnerType::QuitMsg,
        Spinner::from_strs(&["Farewell, delver.", "The dark swallows your footsteps."]),
    );
    spinners.insert(
        SpinnerType::UnrecognizedCommand,
        Spinner::from_strs(&["I don't understand that.", "Didn't quite catch that?", "Say again?"]),
    );
    spinners
}
