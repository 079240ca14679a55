//! Species content integration tests
//!
//! Covers the SP_FULVER record's invariants, serialization round trips, and
//! loading content from disk through the registry.

use std::path::PathBuf;

use stellar_codex::content::{ContentIndex, CONTENT_INDEX_FILE};
use stellar_codex::core::checksum::CheckSum;
use stellar_codex::core::config::CodexConfig;
use stellar_codex::core::error::CodexError;
use stellar_codex::core::types::{PlanetEnvironment, PlanetType};
use stellar_codex::library;
use stellar_codex::policy::PolicyManager;
use stellar_codex::species::catalog::sp_fulver;
use stellar_codex::species::{validate_species, Species, SpeciesBuilder, SpeciesRegistry};

/// Fresh scratch directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("stellar_codex_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn extra_species_toml(name: &str) -> String {
    format!(
        r#"
name = "{name}"
description = "{name}_DESC"
gameplay_description = "{name}_GAMEPLAY_DESC"
playable = false
can_produce_ships = true
can_colonize = false
tags = ["ROBOTIC", "PEDIA_ROBOTIC_SPECIES_CLASS", "GOOD_INDUSTRY"]
default_focus = "FOCUS_INDUSTRY"
likes = ["BLD_MILITARY_COMMAND"]
dislikes = ["PLC_LIBERTY"]
graphic = "icons/species/robotic-01.png"

[[foci]]
name = "FOCUS_INDUSTRY"
description = "FOCUS_INDUSTRY_DESC"
location = "Planet"
graphic = "icons/focus/industry.png"

[[effects_groups]]
scope = "IsSource"
activation = "Planet & ~Unowned & Focus(\"FOCUS_INDUSTRY\")"
stacking_group = "GOOD_INDUSTRY_STACK"
effects = [{{ type = "SetMeter", meter = "TARGET_INDUSTRY", op = "add", value = 0.1, scale = "population" }}]

[environments]
BARREN = "GOOD"
INFERNO = "POOR"
"#
    )
}

#[test]
fn test_default_focus_is_a_focus() {
    let species = sp_fulver();
    let default_focus = species.default_focus.as_deref().unwrap();
    assert_eq!(default_focus, "FOCUS_STOCKPILE");
    assert!(species.focus_names().any(|f| f == default_focus));
}

#[test]
fn test_likes_and_dislikes_disjoint() {
    let species = sp_fulver();
    assert_eq!(species.likes.intersection(&species.dislikes).count(), 0);
    assert!(species.likes("PLC_CONFEDERATION"));
    assert!(species.dislikes("PLC_SYSTEM_INFRA"));
}

#[test]
fn test_identifiers_resolve_in_builtin_index() {
    let species = sp_fulver();
    let index = ContentIndex::builtin();
    for item in species.likes.iter().chain(species.dislikes.iter()) {
        assert!(index.resolves(item), "{} does not resolve", item);
    }
    for tag in &species.tags {
        assert!(index.is_known_tag(tag), "{} is not a known tag", tag);
    }
    assert!(validate_species(&species, &index).is_empty());
}

#[test]
fn test_fulver_registered_once() {
    let mut registry = SpeciesRegistry::builtin().unwrap();
    assert_eq!(registry.names(), vec!["SP_FULVER"]);
    let err = registry.register(sp_fulver()).unwrap_err();
    assert!(matches!(err, CodexError::DuplicateSpecies(_)));
}

#[test]
fn test_json_round_trip() {
    let species = sp_fulver();
    let json = serde_json::to_string_pretty(&species).unwrap();
    let loaded: Species = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, species);
    assert_eq!(loaded.checksum(), species.checksum());
}

#[test]
fn test_toml_round_trip() {
    let species = sp_fulver();
    let text = toml::to_string_pretty(&species).unwrap();
    let loaded: Species = toml::from_str(&text).unwrap();
    assert_eq!(loaded, species);
}

#[test]
fn test_toml_keeps_capital_activation_readable() {
    let text = toml::to_string(&sp_fulver()).unwrap();
    assert!(text.contains("Planet & ~Unowned & Capital"));
    assert!(text.contains("PLC_CONFEDERATION"));
}

#[test]
fn test_environments_follow_narrow_tundra_table() {
    let species = sp_fulver();
    assert_eq!(species.environments, library::narrow_environments(PlanetType::Tundra));
    assert_eq!(species.environment(PlanetType::Tundra), PlanetEnvironment::Good);
    assert_eq!(species.environment(PlanetType::Barren), PlanetEnvironment::Poor);
    assert_eq!(species.environment(PlanetType::Ocean), PlanetEnvironment::Hostile);
}

#[test]
fn test_load_directory_recursively() {
    let dir = scratch_dir("load");
    std::fs::create_dir_all(dir.join("natives")).unwrap();
    std::fs::write(dir.join("sp_drone.toml"), extra_species_toml("SP_DRONE")).unwrap();
    std::fs::write(dir.join("natives").join("sp_husk.toml"), extra_species_toml("SP_HUSK")).unwrap();
    std::fs::write(dir.join("README.md"), "not content").unwrap();

    let mut registry = SpeciesRegistry::builtin().unwrap();
    let names = registry.load_directory(&dir).unwrap();
    assert_eq!(names, vec!["SP_HUSK".to_string(), "SP_DRONE".to_string()]);
    assert_eq!(registry.len(), 3);

    let drone = registry.get("SP_DRONE").unwrap();
    assert_eq!(drone.environment(PlanetType::Barren), PlanetEnvironment::Good);
    assert_eq!(registry.by_tag("ROBOTIC").len(), 2);
    assert_eq!(registry.playable().count(), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_duplicate_on_disk_rejected() {
    let dir = scratch_dir("duplicate");
    let json = serde_json::to_string(&sp_fulver()).unwrap();
    std::fs::write(dir.join("sp_fulver.json"), json).unwrap();

    let mut registry = SpeciesRegistry::builtin().unwrap();
    let err = registry.load_directory(&dir).unwrap_err();
    assert!(matches!(err, CodexError::DuplicateSpecies(name) if name == "SP_FULVER"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_from_config_uses_content_index_file() {
    let dir = scratch_dir("index");
    let species = extra_species_toml("SP_SPARK").replace("\"ROBOTIC\"", "\"SPARKLY\"");
    std::fs::write(dir.join("sp_spark.toml"), species).unwrap();

    let mut config = CodexConfig::default();
    config.content_dir = Some(dir.clone());
    config.strict = true;
    let policies = PolicyManager::builtin();

    // Unknown tag is refused in strict mode
    let err = SpeciesRegistry::from_config(&config, &policies).err().unwrap();
    assert!(matches!(err, CodexError::Validation(_)));

    // ...until the content index declares it
    std::fs::write(dir.join(CONTENT_INDEX_FILE), "tags = [\"SPARKLY\"]\n").unwrap();
    let registry = SpeciesRegistry::from_config(&config, &policies).unwrap();
    assert!(registry.contains("SP_SPARK"));
    assert_eq!(registry.len(), 2);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_lenient_config_keeps_flawed_species() {
    let dir = scratch_dir("lenient");
    let flawed = SpeciesBuilder::new("SP_FLAWED")
        .likes(["BLD_NOWHERE"])
        .graphic("icons/species/flawed.png")
        .build();
    std::fs::write(
        dir.join("sp_flawed.json"),
        serde_json::to_string(&flawed).unwrap(),
    )
    .unwrap();

    let mut config = CodexConfig::default();
    config.content_dir = Some(dir.clone());
    let registry = SpeciesRegistry::from_config(&config, &PolicyManager::builtin()).unwrap();
    let loaded = registry.get("SP_FLAWED").unwrap();
    assert_eq!(validate_species(loaded, registry.index()).len(), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_checksum_tracks_content() {
    let a = sp_fulver();
    let mut b = sp_fulver();
    assert_eq!(a.checksum(), b.checksum());
    b.likes.remove("PLC_LIBERTY");
    assert_ne!(a.checksum(), b.checksum());
}
