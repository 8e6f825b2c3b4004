//! Loader utilities for building a [`World`] from serialized data.
//!
//! World content comes from a RON `WorldDef`; it is validated as a whole
//! before anything is built, so a bad file reports every problem at once.

pub mod worlddef;

use std::path::Path;

use anyhow::{Context, Result, bail};
use delve_data::WorldDef;
use log::info;

use crate::loader::worlddef::{build_world_from_def, load_worlddef};
use crate::world::World;

/// Load, validate and build the world in `path`.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, validation or graph
/// resolution.
pub fn load_world(path: &Path) -> Result<World> {
    let worlddef = load_worlddef(path).context("while loading worlddef from file")?;
    validate_worlddef(&worlddef)?;
    let world = build_world_from_def(&worlddef).context("while building world from worlddef")?;
    info!("{} locations added to world", world.locations.len());
    info!("{} characters added to world", world.characters.len());
    info!("{} spinners added to world", world.spinners.len());
    Ok(world)
}

/// Validate the WorldDef and return a single aggregated error.
fn validate_worlddef(def: &WorldDef) -> Result<()> {
    let errors = delve_data::validate_world(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("worlddef validation failed:\n{details}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TINY: &str = r#"(
        game: (title: "Tiny", player: (character: "hero", start: "hut")),
        locations: {
            "hut": (name: "Hut", adjacent: { "out": "yard" }),
        },
        characters: [(id: "hero", name: "Hero")],
    )"#;

    #[test]
    fn validation_errors_are_aggregated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{TINY}").unwrap();
        let err = load_world(file.path()).unwrap_err();
        let text = format!("{err:#}");
        assert!(text.contains("validation failed"), "{text}");
        assert!(text.contains("yard"), "{text}");
        assert!(text.contains("out"), "{text}");
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = load_world(Path::new("/no/such/world.ron")).unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/world.ron"));
    }
}
