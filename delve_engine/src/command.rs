//! Command module
//!
//! Turns a line of player input into a [`Command`].

use crate::item::Ingest;
use crate::location::Direction;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, variantly::Variantly)]
pub enum Command {
    Attack(String),
    Drop(String),
    Equip { item: String, slot: Option<String> },
    Help,
    Ingest { how: Ingest, item: String },
    Inventory,
    Look,
    LookAt(String),
    MoveTo(Direction),
    /// A direction word that didn't parse.
    BadDirection(String),
    /// A single word to look up in the player's action table.
    Perform(String),
    Quit,
    Read(String),
    Status,
    Take(String),
    Unequip(String),
    Unknown,
    Wait,
    Wear(String),
}

impl Command {
    /// Whether the turn driver should run after this command.
    pub fn advances_time(&self) -> bool {
        matches!(
            self,
            Command::Attack(_)
                | Command::Drop(_)
                | Command::Equip { .. }
                | Command::Ingest { .. }
                | Command::MoveTo(_)
                | Command::Take(_)
                | Command::Unequip(_)
                | Command::Wait
                | Command::Wear(_)
        )
    }
}

fn join(words: &[&str]) -> String {
    words.join(" ")
}

/// Parses an input string and returns a corresponding `Command` if recognized.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let words: Vec<&str> = lowered
        .split_whitespace()
        .filter(|w| !matches!(*w, "the" | "a" | "an"))
        .collect();
    match words.as_slice() {
        [] => Command::Unknown,
        ["look" | "l"] => Command::Look,
        ["look" | "l", "at", rest @ ..] | ["examine" | "x", rest @ ..] if !rest.is_empty() => {
            Command::LookAt(join(rest))
        },
        ["go" | "move" | "walk", dir] => dir
            .parse()
            .map_or_else(|_| Command::BadDirection((*dir).to_string()), Command::MoveTo),
        [word] if word.parse::<Direction>().is_ok() => word.parse().map_or(Command::Unknown, Command::MoveTo),
        ["take" | "get" | "grab", rest @ ..] if !rest.is_empty() => Command::Take(join(rest)),
        ["pick", "up", rest @ ..] if !rest.is_empty() => Command::Take(join(rest)),
        ["drop", rest @ ..] if !rest.is_empty() => Command::Drop(join(rest)),
        ["inventory" | "inv" | "i"] => Command::Inventory,
        ["equip" | "wield", rest @ ..] if !rest.is_empty() => match rest.iter().position(|w| *w == "as") {
            Some(idx) if idx > 0 && idx + 1 < rest.len() => Command::Equip {
                item: join(&rest[..idx]),
                slot: Some(join(&rest[idx + 1..])),
            },
            _ => Command::Equip {
                item: join(rest),
                slot: None,
            },
        },
        ["unequip" | "remove", rest @ ..] if !rest.is_empty() => Command::Unequip(join(rest)),
        ["wear" | "don", rest @ ..] if !rest.is_empty() => Command::Wear(join(rest)),
        ["attack" | "kill" | "fight" | "hit", rest @ ..] if !rest.is_empty() => Command::Attack(join(rest)),
        ["drink" | "quaff", rest @ ..] if !rest.is_empty() => Command::Ingest {
            how: Ingest::Drink,
            item: join(rest),
        },
        ["eat", rest @ ..] if !rest.is_empty() => Command::Ingest {
            how: Ingest::Eat,
            item: join(rest),
        },
        ["use", rest @ ..] if !rest.is_empty() => Command::Ingest {
            how: Ingest::Use,
            item: join(rest),
        },
        ["read", rest @ ..] if !rest.is_empty() => Command::Read(join(rest)),
        ["wait" | "z"] => Command::Wait,
        ["status" | "stats" | "health"] => Command::Status,
        ["help" | "?"] => Command::Help,
        ["quit" | "exit" | "q"] => Command::Quit,
        [word] => Command::Perform((*word).to_string()),
        _ => Command::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_bare_or_with_go() {
        assert_eq!(parse_command("n"), Command::MoveTo(Direction::North));
        assert_eq!(parse_command("go Northeast"), Command::MoveTo(Direction::Northeast));
        assert_eq!(parse_command("go sideways"), Command::BadDirection("sideways".into()));
    }

    #[test]
    fn multi_word_items_and_articles() {
        assert_eq!(parse_command("take the rusty sword"), Command::Take("rusty sword".into()));
        assert_eq!(parse_command("pick up a coin"), Command::Take("coin".into()));
        assert_eq!(parse_command("look at the door"), Command::LookAt("door".into()));
    }

    #[test]
    fn equip_with_and_without_slot() {
        assert_eq!(
            parse_command("equip short sword as offhand"),
            Command::Equip {
                item: "short sword".into(),
                slot: Some("offhand".into()),
            }
        );
        assert_eq!(
            parse_command("wield axe"),
            Command::Equip {
                item: "axe".into(),
                slot: None,
            }
        );
    }

    #[test]
    fn ingest_verbs() {
        assert_eq!(
            parse_command("drink ale"),
            Command::Ingest {
                how: Ingest::Drink,
                item: "ale".into(),
            }
        );
        assert!(parse_command("eat bread").advances_time());
    }

    #[test]
    fn looking_costs_no_time() {
        for input in ["look", "inventory", "status", "help", "look at rat"] {
            assert!(!parse_command(input).advances_time(), "{input}");
        }
        for input in ["wait", "attack rat", "south"] {
            assert!(parse_command(input).advances_time(), "{input}");
        }
    }

    #[test]
    fn unknown_single_words_become_actions() {
        assert_eq!(parse_command("dance"), Command::Perform("dance".into()));
        assert_eq!(parse_command("juggle three eggs"), Command::Unknown);
        assert_eq!(parse_command("   "), Command::Unknown);
    }
}
