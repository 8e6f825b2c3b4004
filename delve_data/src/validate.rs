use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a WorldDef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a WorldDef.
///
/// ```
/// use std::collections::BTreeMap;
/// use delve_data::{CharacterDef, GameDef, LocationDef, PlayerDef, WorldDef, validate_world};
///
/// let mut locations = BTreeMap::new();
/// locations.insert("start".to_string(), LocationDef { name: "Start".into(), ..LocationDef::default() });
/// let world = WorldDef {
///     game: GameDef {
///         title: "Demo".into(),
///         intro: "Intro".into(),
///         player: PlayerDef { character: "hero".into(), start: "start".into() },
///     },
///     locations,
///     characters: vec![CharacterDef::new("hero", "Hero")],
///     ..WorldDef::default()
/// };
/// assert!(validate_world(&world).is_empty());
/// ```
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let locations: HashSet<String> = world.locations.keys().cloned().collect();
    let mut items = HashSet::new();
    let mut characters = HashSet::new();
    let mut spinners = HashSet::new();

    track_ids(
        "item",
        world.items.iter().map(|i| i.id.as_str()),
        &mut items,
        &mut errors,
    );
    track_ids(
        "character",
        world.characters.iter().map(|c| c.id.as_str()),
        &mut characters,
        &mut errors,
    );
    track_ids(
        "spinner",
        world.spinners.iter().map(|s| s.id.as_str()),
        &mut spinners,
        &mut errors,
    );

    let ids = IdSets {
        locations: &locations,
        items: &items,
        characters: &characters,
    };

    if world.game.player.start.trim().is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "game player start location missing".to_string(),
        });
    } else {
        check_ref(
            "location",
            &world.game.player.start,
            ids.locations,
            "game player start".to_string(),
            &mut errors,
        );
    }
    check_ref(
        "character",
        &world.game.player.character,
        ids.characters,
        "game player character".to_string(),
        &mut errors,
    );

    for (loc_id, loc) in &world.locations {
        for (dir, to) in &loc.adjacent {
            if dir.parse::<Direction>().is_err() {
                errors.push(ValidationError::InvalidValue {
                    context: format!("location '{loc_id}' has unknown direction '{dir}'"),
                });
            }
            check_ref(
                "location",
                to,
                ids.locations,
                format!("location '{loc_id}' exit '{dir}'"),
                &mut errors,
            );
        }
        for item_ref in &loc.items {
            validate_item_ref(item_ref, &ids, &mut errors, &format!("location '{loc_id}'"));
        }
        for character in &loc.characters {
            check_ref(
                "character",
                character,
                ids.characters,
                format!("location '{loc_id}'"),
                &mut errors,
            );
        }
    }

    for item in &world.items {
        if item.name.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("item '{}' has an empty name", item.id),
            });
        }
    }

    for character in &world.characters {
        validate_character(character, world, &ids, &mut errors);
    }

    for spinner in &world.spinners {
        if spinner.wedges.is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("spinner '{}' has no wedges", spinner.id),
            });
        }
    }

    errors
}

fn validate_character(character: &CharacterDef, world: &WorldDef, ids: &IdSets<'_>, errors: &mut Vec<ValidationError>) {
    let context = format!("character '{}'", character.id);
    if character.max_hp <= 0.0 {
        errors.push(ValidationError::InvalidValue {
            context: format!("{context} max_hp must be positive ({})", character.max_hp),
        });
    }
    for item_ref in &character.inventory {
        validate_item_ref(item_ref, ids, errors, &context);
    }
    for equip in &character.equip {
        check_ref("item", &equip.item, ids.items, format!("{context} equip '{}'", equip.slot), errors);
    }
    for worn in &character.wear {
        check_ref("item", worn, ids.items, format!("{context} wear"), errors);
        if let Some(def) = world.items.iter().find(|i| &i.id == worn)
            && def.armor.is_none()
        {
            errors.push(ValidationError::InvalidValue {
                context: format!("{context} wears '{worn}', which has no armor stats"),
            });
        }
    }
    for other in character.enemies.iter().chain(&character.friends) {
        check_ref("character", other, ids.characters, format!("{context} relationship"), errors);
    }
    for action in &character.actions {
        if let ActionKindDef::Warp { to, .. } = &action.kind {
            check_ref(
                "location",
                to,
                ids.locations,
                format!("{context} action '{}'", action.name),
                errors,
            );
        }
    }
}

fn validate_item_ref(item_ref: &ItemRefDef, ids: &IdSets<'_>, errors: &mut Vec<ValidationError>, context: &str) {
    check_ref("item", &item_ref.item, ids.items, context.to_string(), errors);
    if item_ref.quantity == 0 {
        errors.push(ValidationError::InvalidValue {
            context: format!("{context} places zero of item '{}'", item_ref.item),
        });
    }
}

struct IdSets<'a> {
    locations: &'a HashSet<String>,
    items: &'a HashSet<String>,
    characters: &'a HashSet<String>,
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !set.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(kind: &'static str, id: &str, set: &HashSet<String>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}
