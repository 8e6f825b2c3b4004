#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const DELVE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod action;
pub mod character;
pub mod combat;
pub mod command;
pub mod config;
pub mod container;
pub mod data_paths;
pub mod dice;
pub mod encounter;
pub mod entity_search;
pub mod error;
pub mod idgen;
pub mod io;
pub mod item;
pub mod loader;
pub mod location;
pub mod narration;
pub mod repl;
pub mod spinners;
pub mod style;
pub mod terminal;
pub mod turn;
pub mod vitals;
pub mod world;

// Re-exports for convenience
pub use character::Character;
pub use combat::{AttackOutcome, resolve_attack};
pub use config::{EngineConfig, load_config};
pub use container::Container;
pub use dice::{Dice, ScriptedDice, SeededDice};
pub use error::WorldError;
pub use idgen::{CharacterId, LocationId};
pub use io::{Input, Output, TextStyle};
pub use item::Item;
pub use loader::load_world;
pub use location::{Direction, Location};
pub use repl::{SessionEnd, run_session};
pub use turn::{TickReport, advance};
pub use world::{World, WorldBuilder};
