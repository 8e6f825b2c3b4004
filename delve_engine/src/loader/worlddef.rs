//! WorldDef loader and conversion helpers.
//!
//! Converts the serialized `WorldDef` data model into runtime engine structs.
//! Character definitions are templates: each placement spawns an instance,
//! and relationships naming a template apply to all of its instances.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use gametools::{Spinner, Wedge};
use log::{info, warn};

use delve_data::{
    ActionKindDef, CharacterDef, EffectDef, EncounterHookDef, ItemDef, ItemRefDef, NarrationDef, SpinnerDef,
    WorldDef,
};

use crate::action::Action;
use crate::character::{Attributes, Character, PowerOverride};
use crate::encounter::{EncounterHook, EncounterPolicy};
use crate::idgen::{CharacterId, LocationId, instance_id};
use crate::item::{ArmorStats, Item, ItemEffect, WeaponStats};
use crate::location::{Direction, PendingLocation};
use crate::narration::NarrationStyle;
use crate::spinners::SpinnerType;
use crate::vitals::{Recovery, Vitals};
use crate::world::{World, WorldBuilder};

/// Load a `WorldDef` from a RON file.
pub fn load_worlddef(path: &Path) -> Result<WorldDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading worlddef from '{}'", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing worlddef RON from '{}'", path.display()))
}

/// Convert a `WorldDef` into a populated `World`.
pub fn build_world_from_def(def: &WorldDef) -> Result<World> {
    let items: HashMap<&str, &ItemDef> = def.items.iter().map(|i| (i.id.as_str(), i)).collect();
    let templates: HashMap<&str, &CharacterDef> = def.characters.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut builder = WorldBuilder::new(def.game.title.clone());
    builder.intro(def.game.intro.clone());

    for (loc_id, loc_def) in &def.locations {
        let mut pending = PendingLocation::new(loc_id.as_str(), loc_def.name.clone())
            .with_description(loc_def.description.clone());
        for (dir, to) in &loc_def.adjacent {
            let direction: Direction = dir
                .parse()
                .with_context(|| format!("location '{loc_id}' exit '{dir}'"))?;
            pending = pending.exit(direction, to.clone());
        }
        for item_ref in &loc_def.items {
            pending
                .items
                .extend(items_from_ref(item_ref, &items).with_context(|| format!("location '{loc_id}'"))?);
        }
        builder.add_location(pending);
    }

    // (template, instance, location) in spawn order; the player spawns first
    let requests = std::iter::once((def.game.player.character.as_str(), def.game.player.start.as_str())).chain(
        def.locations
            .iter()
            .flat_map(|(loc_id, loc)| loc.characters.iter().map(move |t| (t.as_str(), loc_id.as_str()))),
    );
    let mut placements: Vec<(&CharacterDef, CharacterId, &str)> = Vec::new();
    let mut spawned: HashMap<&str, usize> = HashMap::new();
    for (template, at) in requests {
        let template_def = templates
            .get(template)
            .ok_or_else(|| anyhow!("unknown character template '{template}'"))?;
        let count = spawned.entry(template).or_insert(0);
        *count += 1;
        placements.push((*template_def, instance_id(template, *count), at));
    }

    let mut instances: HashMap<&str, Vec<CharacterId>> = HashMap::new();
    for (template, id, _) in &placements {
        instances.entry(template.id.as_str()).or_default().push(id.clone());
    }

    for (template, id, at) in &placements {
        let mut character =
            character_from_def(template, id.clone(), &items).with_context(|| format!("character '{id}'"))?;
        for enemy in template.enemies.iter().filter_map(|t| instances.get(t.as_str())).flatten() {
            if enemy != id {
                character.add_enemy(enemy.clone());
            }
        }
        for friend in template.friends.iter().filter_map(|t| instances.get(t.as_str())).flatten() {
            if friend != id {
                character.add_friend(friend.clone());
            }
        }
        builder.add_character(character, *at);
    }
    builder.player(def.game.player.character.clone());

    for (kind, spinner) in build_spinners(&def.spinners) {
        builder.spinner(kind, spinner);
    }

    let world = builder.build()?;
    info!("spawned {} character instance(s) from {} template(s)", placements.len(), templates.len());
    Ok(world)
}

fn build_spinners(defs: &[SpinnerDef]) -> Vec<(SpinnerType, Spinner<String>)> {
    let mut spinners = Vec::new();
    for def in defs {
        let Some(kind) = SpinnerType::from_key(&def.id) else {
            warn!("ignoring spinner '{}': not a known spinner type", def.id);
            continue;
        };
        let wedges: Vec<Wedge<String>> = def
            .wedges
            .iter()
            .map(|w| Wedge::new_weighted(w.text.clone(), w.width))
            .collect();
        spinners.push((kind, Spinner::new(wedges)));
    }
    spinners
}

/// A single item built from its definition.
pub fn item_from_def(def: &ItemDef, quantity: u32) -> Item {
    let base = if def.fungible {
        Item::stack(def.name.clone(), def.description.clone(), quantity)
    } else {
        Item::new(def.name.clone(), def.description.clone())
    };
    let mut item = base;
    item.value = def.value;
    item.size = def.size;
    item.immovable = def.immovable;
    item.weapon = def
        .weapon
        .as_ref()
        .map(|w| WeaponStats::new(w.kind, w.blunt, w.sharp, w.magic));
    item.armor = def.armor.as_ref().map(|a| ArmorStats::new(a.blunt, a.sharp, a.magic));
    item.on_drink = def.on_drink.as_ref().map(effect_from_def);
    item.on_eat = def.on_eat.as_ref().map(effect_from_def);
    item.on_use = def.on_use.as_ref().map(effect_from_def);
    item.text = def.text.clone();
    item
}

/// Items for a reference: one stack if fungible, otherwise one per unit.
fn items_from_ref(item_ref: &ItemRefDef, items: &HashMap<&str, &ItemDef>) -> Result<Vec<Item>> {
    let def = items
        .get(item_ref.item.as_str())
        .ok_or_else(|| anyhow!("unknown item '{}'", item_ref.item))?;
    if def.fungible {
        Ok(vec![item_from_def(def, item_ref.quantity)])
    } else {
        Ok((0..item_ref.quantity).map(|_| item_from_def(def, 1)).collect())
    }
}

fn effect_from_def(def: &EffectDef) -> ItemEffect {
    ItemEffect {
        recover: Recovery::new(def.hp, def.mp, def.sp),
        drunk: def.drunk,
        invisible: def.invisible,
        message: def.message.clone(),
    }
}

/// Build one instance of a character template. Relationships are filled in
/// by the caller once every instance id is known.
pub fn character_from_def(def: &CharacterDef, id: CharacterId, items: &HashMap<&str, &ItemDef>) -> Result<Character> {
    let mut character = Character::new(id.as_str(), def.name.clone())
        .with_attributes(Attributes {
            strength: def.strength,
            coordination: def.coordination,
            agility: def.agility,
            magic_level: def.magic_level,
        })
        .with_vitals(Vitals::new(def.max_hp, def.max_mp, def.max_sp));
    character.description = def.description.clone();
    character.regen = Recovery::new(def.regen.hp, def.regen.mp, def.regen.sp);
    character.base_armor = ArmorStats::new(def.armor.blunt, def.armor.sharp, def.armor.magic);
    character.power = PowerOverride {
        blunt: def.power.blunt,
        sharp: def.power.sharp,
        magic: def.power.magic,
    };
    character.narration = match &def.narration {
        NarrationDef::Standard => NarrationStyle::Standard,
        NarrationDef::Creature { verb } => NarrationStyle::Creature { verb: verb.clone() },
        NarrationDef::Terse => NarrationStyle::Terse,
    };
    character.encounter = EncounterPolicy {
        hostile_to_players: def.hostile_to_players,
        hook: def.on_encounter.as_ref().map(|hook| match hook {
            EncounterHookDef::Say { text } => EncounterHook::Say { text: text.clone() },
            EncounterHookDef::Befriend => EncounterHook::Befriend,
            EncounterHookDef::Provoke => EncounterHook::Provoke,
        }),
    };
    character.respawn_delay = def.respawn_delay;

    for item_ref in &def.inventory {
        character.inventory.extend(items_from_ref(item_ref, items)?);
    }
    for equip in &def.equip {
        let item_def = items
            .get(equip.item.as_str())
            .ok_or_else(|| anyhow!("unknown item '{}' in slot '{}'", equip.item, equip.slot))?;
        let carried_and_free = character
            .inventory
            .matching(&item_def.name)
            .iter()
            .any(|item| character.slots_holding(item).is_empty());
        if carried_and_free {
            character.wield(equip.slot.clone(), &item_def.name);
        } else {
            character.equip(equip.slot.clone(), item_from_def(item_def, 1));
        }
    }
    for worn in &def.wear {
        let item_def = items
            .get(worn.as_str())
            .ok_or_else(|| anyhow!("unknown worn item '{worn}'"))?;
        if !character.inventory.contains(&item_def.name) {
            character.inventory.add(item_from_def(item_def, 1));
        }
        if character.wear(&item_def.name).is_none() {
            warn!("{id} cannot wear '{worn}': it has no armor stats");
        }
    }

    for action in &def.actions {
        let action_value = match &action.kind {
            ActionKindDef::Emote { text } => Action::Emote { text: text.clone() },
            ActionKindDef::Recover { hp, mp, sp, text } => Action::Recover {
                amount: Recovery::new(*hp, *mp, *sp),
                text: text.clone(),
            },
            ActionKindDef::Warp { to, text } => Action::Warp {
                to: LocationId::new(to.as_str()),
                text: text.clone(),
            },
        };
        character.add_action(action.name.clone(), action_value);
    }

    Ok(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_data::{EquipDef, GameDef, LocationDef, PlayerDef, WeaponDef, WeaponKind};
    use std::collections::BTreeMap;

    fn def() -> WorldDef {
        let mut locations = BTreeMap::new();
        let mut camp = LocationDef {
            name: "Camp".into(),
            ..LocationDef::default()
        };
        camp.adjacent.insert("n".into(), "woods".into());
        camp.items.push(ItemRefDef {
            item: "coin".into(),
            quantity: 5,
        });
        camp.items.push(ItemRefDef {
            item: "sword".into(),
            quantity: 2,
        });
        let mut woods = LocationDef {
            name: "Woods".into(),
            ..LocationDef::default()
        };
        woods.characters = vec!["wolf".into(), "wolf".into()];
        locations.insert("camp".into(), camp);
        locations.insert("woods".into(), woods);

        let mut hero = CharacterDef::new("hero", "Hero");
        hero.equip.push(EquipDef {
            slot: "primary".into(),
            item: "sword".into(),
        });
        hero.enemies.push("wolf".into());
        let mut wolf = CharacterDef::new("wolf", "Wolf");
        wolf.friends.push("wolf".into());
        wolf.narration = NarrationDef::Creature { verb: "bites".into() };
        wolf.on_encounter = Some(EncounterHookDef::Provoke);

        WorldDef {
            game: GameDef {
                title: "Test".into(),
                intro: String::new(),
                player: PlayerDef {
                    character: "hero".into(),
                    start: "camp".into(),
                },
            },
            locations,
            items: vec![
                ItemDef {
                    id: "coin".into(),
                    name: "gold coin".into(),
                    fungible: true,
                    ..ItemDef::default()
                },
                ItemDef {
                    id: "sword".into(),
                    name: "sword".into(),
                    weapon: Some(WeaponDef {
                        blunt: 0.0,
                        sharp: 3.0,
                        magic: 0.0,
                        kind: WeaponKind::Blades,
                    }),
                    ..ItemDef::default()
                },
            ],
            characters: vec![hero, wolf],
            ..WorldDef::default()
        }
    }

    #[test]
    fn items_stack_or_multiply_by_fungibility() {
        let world = build_world_from_def(&def()).unwrap();
        let camp = world.location(&LocationId::new("camp")).unwrap();
        assert_eq!(camp.items.len(), 3);
        assert_eq!(camp.items.get("gold coin").map(Item::quantity), Some(5));
    }

    #[test]
    fn templates_spawn_numbered_instances() {
        let world = build_world_from_def(&def()).unwrap();
        let woods = world.location(&LocationId::new("woods")).unwrap();
        assert_eq!(woods.characters(), [CharacterId::new("wolf"), CharacterId::new("wolf#2")]);

        let hero = world.player().unwrap();
        assert!(hero.is_enemy(&CharacterId::new("wolf")));
        assert!(hero.is_enemy(&CharacterId::new("wolf#2")));

        let wolf = world.character(&CharacterId::new("wolf")).unwrap();
        assert!(wolf.is_friend(&CharacterId::new("wolf#2")));
        assert!(!wolf.is_friend(&CharacterId::new("wolf")));
        assert_eq!(wolf.encounter.hook, Some(EncounterHook::Provoke));
    }

    #[test]
    fn equipped_items_are_acquired_once() {
        let world = build_world_from_def(&def()).unwrap();
        let hero = world.player().unwrap();
        assert_eq!(hero.inventory.len(), 1);
        assert_eq!(hero.primary_weapon().map(|w| w.name.as_str()), Some("sword"));
        assert_eq!(hero.location, Some(LocationId::new("camp")));
    }

    #[test]
    fn one_template_in_two_slots_gives_two_weapons() {
        let mut def = def();
        def.characters[0].equip.push(EquipDef {
            slot: "offhand".into(),
            item: "sword".into(),
        });
        let world = build_world_from_def(&def).unwrap();
        let hero = world.player().unwrap();
        assert_eq!(hero.inventory.len(), 2);
        let primary = hero.weapon_in("primary").map(Item::handle);
        let offhand = hero.weapon_in("offhand").map(Item::handle);
        assert!(primary.is_some() && offhand.is_some());
        assert_ne!(primary, offhand);
    }

    #[test]
    fn unknown_template_is_an_error() {
        let mut def = def();
        def.game.player.character = "ghost".into();
        assert!(build_world_from_def(&def).is_err());
    }
}
