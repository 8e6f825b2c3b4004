use delve_engine as de;
use de::character::Character;
use de::io::{RecordingOutput, ScriptedInput};
use de::location::PendingLocation;
use de::narration::NarrationStyle;
use de::vitals::Vitals;
use de::*;

fn village() -> World {
    let mut square = PendingLocation::new("square", "Square").exit(Direction::North, "road");
    square.items.add(Item::stack("coin", "", 3));
    let mut builder = WorldBuilder::new("Village");
    builder
        .add_location(square)
        .add_location(PendingLocation::new("road", "Road").exit(Direction::South, "square"))
        .add_character(Character::new("hero", "Hero"), "square")
        .player("hero");
    builder.build().unwrap()
}

/// A wolf already locked on to a frail hero, with a bite that always kills.
fn ambush() -> World {
    let hero = Character::new("hero", "Hero").with_vitals(Vitals::new(10.0, 0.0, 10.0));
    let mut wolf = Character::new("wolf", "Wolf");
    wolf.power.sharp = Some(1000.0);
    wolf.narration = NarrationStyle::Creature { verb: "bites".into() };
    wolf.attack_target = Some(CharacterId::new("hero"));
    let mut builder = WorldBuilder::new("Ambush");
    builder
        .add_location(PendingLocation::new("glade", "Glade"))
        .add_character(hero, "glade")
        .add_character(wolf, "glade")
        .player("hero");
    builder.build().unwrap()
}

fn lethal_dice() -> ScriptedDice {
    // accuracy 9 vs to-hit 0, then sqrt(0.81) * 1000 sharp
    ScriptedDice::new([0.9, 0.0, 0.0, 0.0, 0.81, 0.0, 0.0, 0.0])
}

fn play(world: &mut World, dice: &mut dyn Dice, config: &EngineConfig, lines: &[&str]) -> (SessionEnd, RecordingOutput, ScriptedInput) {
    let mut input = ScriptedInput::new(lines.iter().copied());
    let mut out = RecordingOutput::new();
    let end = run_session(world, dice, config, &mut input, &mut out).unwrap();
    (end, out, input)
}

#[test]
fn only_time_consuming_commands_advance_the_clock() {
    let mut world = village();
    let mut dice = ScriptedDice::new([0.5]);
    let config = EngineConfig::default();
    let (end, out, input) = play(
        &mut world,
        &mut dice,
        &config,
        &["look", "inventory", "take coin", "go west", "n", "status", "quit", "y"],
    );

    assert_eq!(end, SessionEnd::Quit);
    // take and move each cost a tick; the failed move does not
    assert_eq!(world.tick_count, 2);
    assert_eq!(world.player_location().unwrap().id, LocationId::new("road"));
    assert_eq!(world.player().unwrap().inventory.get("coin").map(Item::quantity), Some(3));
    assert!(out.contains("Taken: coin (3)"));
    assert!(out.contains("You can't go that way."));
    assert!(out.contains("You aren't carrying anything."));
    assert!(input.prompts.iter().any(|p| p.contains("[Tick 0|HP 100/100]")));
    assert!(input.prompts.iter().any(|p| p.contains("Really quit?")));
}

#[test]
fn ticks_per_command_is_honored() {
    let mut world = village();
    let config = EngineConfig {
        ticks_per_command: 3,
        ..EngineConfig::default()
    };
    let (_, out, _) = play(&mut world, &mut ScriptedDice::new([0.5]), &config, &["wait"]);
    assert_eq!(world.tick_count, 3);
    assert!(out.contains("Time passes."));
}

#[test]
fn end_of_input_quits_without_asking() {
    let mut world = village();
    let (end, _, input) = play(&mut world, &mut ScriptedDice::default(), &EngineConfig::default(), &[]);
    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(input.prompts.len(), 1);
}

#[test]
fn declining_to_quit_keeps_playing() {
    let mut world = village();
    let (end, out, input) = play(
        &mut world,
        &mut ScriptedDice::default(),
        &EngineConfig::default(),
        &["quit", "n", "dance"],
    );
    assert_eq!(end, SessionEnd::Quit);
    assert!(out.contains("Carry on, then."));
    assert_eq!(input.remaining(), 0);
}

#[test]
fn a_dead_player_can_give_up() {
    let mut world = ambush();
    let (end, out, _) = play(&mut world, &mut lethal_dice(), &EngineConfig::default(), &["wait", "2"]);
    assert_eq!(end, SessionEnd::GaveUp);
    assert!(out.contains("Wolf bites Hero with lethal force."));
    assert!(out.contains("You have died."));
    assert!(!world.player().unwrap().is_alive());
}

#[test]
fn a_dead_player_can_rise_again() {
    let mut world = ambush();
    let (end, out, _) = play(
        &mut world,
        &mut lethal_dice(),
        &EngineConfig::default(),
        &["wait", "1", "quit", "y"],
    );
    assert_eq!(end, SessionEnd::Quit);
    assert!(out.contains("You rise again."));
    let player = world.player().unwrap();
    assert!(player.is_alive());
    assert_eq!(player.vitals.hp.display(), 10);
    assert_eq!(world.player_location().unwrap().id, LocationId::new("glade"));
    // the wolf remembers
    let wolf = world.character(&CharacterId::new("wolf")).unwrap();
    assert_eq!(wolf.attack_target, Some(CharacterId::new("hero")));
}
