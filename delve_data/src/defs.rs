use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Stable identifier used across WorldDef references.
pub type Id = String;

/// Top-level static world description loaded by the engine.
///
/// Locations are keyed by id; items and characters are templates ("factories")
/// that locations and other characters refer to by id.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldDef {
    pub game: GameDef,
    #[serde(default)]
    pub locations: BTreeMap<Id, LocationDef>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub characters: Vec<CharacterDef>,
    #[serde(default)]
    pub spinners: Vec<SpinnerDef>,
}

/// Game-level metadata and startup configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameDef {
    pub title: String,
    #[serde(default)]
    pub intro: String,
    pub player: PlayerDef,
}

/// The player is spawned from an ordinary character template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerDef {
    pub character: Id,
    pub start: Id,
}

/// One node of the world graph, before adjacency is resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// direction word -> location id
    #[serde(default)]
    pub adjacent: BTreeMap<String, Id>,
    #[serde(default)]
    pub items: Vec<ItemRefDef>,
    #[serde(default)]
    pub characters: Vec<Id>,
}

/// Reference to an item template with a stack size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRefDef {
    pub item: Id,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl ItemRefDef {
    pub fn one(item: &str) -> Self {
        Self {
            item: item.to_string(),
            quantity: 1,
        }
    }
}

fn default_quantity() -> u32 {
    1
}

/// Item template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub value: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub fungible: bool,
    #[serde(default)]
    pub immovable: bool,
    #[serde(default)]
    pub weapon: Option<WeaponDef>,
    #[serde(default)]
    pub armor: Option<ArmorDef>,
    #[serde(default)]
    pub on_drink: Option<EffectDef>,
    #[serde(default)]
    pub on_eat: Option<EffectDef>,
    #[serde(default)]
    pub on_use: Option<EffectDef>,
    /// Legible text shown by `read`.
    #[serde(default)]
    pub text: Option<String>,
}

/// Weapon statistics; missing channels default to zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeaponDef {
    #[serde(default)]
    pub blunt: f64,
    #[serde(default)]
    pub sharp: f64,
    #[serde(default)]
    pub magic: f64,
    #[serde(default)]
    pub kind: WeaponKind,
}

/// Weapon families; each has its own narration tier table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeaponKind {
    Club,
    Axe,
    Spear,
    Burn,
    Arrow,
    Bolt,
    Fire,
    Blades,
    #[default]
    Generic,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ArmorDef {
    #[serde(default)]
    pub blunt: f64,
    #[serde(default)]
    pub sharp: f64,
    #[serde(default)]
    pub magic: f64,
}

/// Effect triggered by drinking, eating or using an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectDef {
    #[serde(default)]
    pub hp: f64,
    #[serde(default)]
    pub mp: f64,
    #[serde(default)]
    pub sp: f64,
    #[serde(default)]
    pub drunk: f64,
    #[serde(default)]
    pub invisible: u32,
    #[serde(default)]
    pub message: Option<String>,
}

/// Character template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDef {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_attribute")]
    pub strength: f64,
    #[serde(default = "default_attribute")]
    pub coordination: f64,
    #[serde(default = "default_attribute")]
    pub agility: f64,
    #[serde(default)]
    pub magic_level: f64,
    #[serde(default = "default_pool")]
    pub max_hp: f64,
    #[serde(default)]
    pub max_mp: f64,
    #[serde(default = "default_pool")]
    pub max_sp: f64,
    #[serde(default)]
    pub regen: RegenDef,
    #[serde(default)]
    pub armor: ArmorDef,
    #[serde(default)]
    pub power: PowerDef,
    #[serde(default)]
    pub inventory: Vec<ItemRefDef>,
    #[serde(default)]
    pub equip: Vec<EquipDef>,
    #[serde(default)]
    pub wear: Vec<Id>,
    #[serde(default)]
    pub enemies: Vec<Id>,
    #[serde(default)]
    pub friends: Vec<Id>,
    #[serde(default)]
    pub hostile_to_players: bool,
    #[serde(default)]
    pub narration: NarrationDef,
    #[serde(default)]
    pub on_encounter: Option<EncounterHookDef>,
    #[serde(default)]
    pub actions: Vec<ActionDef>,
    #[serde(default)]
    pub respawn_delay: Option<u32>,
}

impl CharacterDef {
    /// A bare template with default attributes and pools.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            strength: default_attribute(),
            coordination: default_attribute(),
            agility: default_attribute(),
            magic_level: 0.0,
            max_hp: default_pool(),
            max_mp: 0.0,
            max_sp: default_pool(),
            regen: RegenDef::default(),
            armor: ArmorDef::default(),
            power: PowerDef::default(),
            inventory: Vec::new(),
            equip: Vec::new(),
            wear: Vec::new(),
            enemies: Vec::new(),
            friends: Vec::new(),
            hostile_to_players: false,
            narration: NarrationDef::default(),
            on_encounter: None,
            actions: Vec::new(),
            respawn_delay: None,
        }
    }
}

fn default_attribute() -> f64 {
    10.0
}

fn default_pool() -> f64 {
    100.0
}

/// Per-tick regeneration; fractional values accumulate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RegenDef {
    #[serde(default)]
    pub hp: f64,
    #[serde(default)]
    pub mp: f64,
    #[serde(default)]
    pub sp: f64,
}

/// Fixed damage powers that replace the attribute * weapon product.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PowerDef {
    #[serde(default)]
    pub blunt: Option<f64>,
    #[serde(default)]
    pub sharp: Option<f64>,
    #[serde(default)]
    pub magic: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipDef {
    pub slot: String,
    pub item: Id,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NarrationDef {
    #[default]
    Standard,
    Creature {
        verb: String,
    },
    Terse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EncounterHookDef {
    Say { text: String },
    Befriend,
    Provoke,
}

/// A named command registered on a character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDef {
    pub name: String,
    pub kind: ActionKindDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKindDef {
    Emote {
        text: String,
    },
    Recover {
        #[serde(default)]
        hp: f64,
        #[serde(default)]
        mp: f64,
        #[serde(default)]
        sp: f64,
        #[serde(default)]
        text: Option<String>,
    },
    Warp {
        to: Id,
        #[serde(default)]
        text: Option<String>,
    },
}

/// Spinner definition used to override or add flavor text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinnerDef {
    pub id: Id,
    #[serde(default)]
    pub wedges: Vec<SpinnerWedgeDef>,
}

/// Weighted spinner entry text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinnerWedgeDef {
    pub text: String,
    #[serde(default = "default_wedge_width")]
    pub width: usize,
}

fn default_wedge_width() -> usize {
    1
}

/// Compass directions used for adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 10] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Northeast,
        Direction::Northwest,
        Direction::Southeast,
        Direction::Southwest,
        Direction::Up,
        Direction::Down,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Northeast => "northeast",
            Direction::Northwest => "northwest",
            Direction::Southeast => "southeast",
            Direction::Southwest => "southwest",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Northeast => Direction::Southwest,
            Direction::Northwest => Direction::Southeast,
            Direction::Southeast => Direction::Northwest,
            Direction::Southwest => Direction::Northeast,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a word is not a known direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction '{}'", self.0)
    }
}

impl std::error::Error for UnknownDirection {}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            "ne" | "northeast" => Ok(Direction::Northeast),
            "nw" | "northwest" => Ok(Direction::Northwest),
            "se" | "southeast" => Ok(Direction::Southeast),
            "sw" | "southwest" => Ok(Direction::Southwest),
            "u" | "up" => Ok(Direction::Up),
            "d" | "down" => Ok(Direction::Down),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_parse_from_abbreviations() {
        assert_eq!("n".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("SouthWest".parse::<Direction>(), Ok(Direction::Southwest));
        assert_eq!(" up ".parse::<Direction>(), Ok(Direction::Up));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn opposite_is_an_involution() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.as_str().parse::<Direction>(), Ok(dir));
        }
    }
}
