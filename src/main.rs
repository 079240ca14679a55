//! Stellar Codex - command line entry point
//!
//! Validates, inspects and exports species content, and runs the capital
//! scenario that exercises a species' effects groups.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use stellar_codex::core::checksum::CheckSum;
use stellar_codex::core::config::CodexConfig;
use stellar_codex::core::error::{CodexError, Result};
use stellar_codex::core::types::{EmpireId, ObjectId, PlanetSize, PlanetType};
use stellar_codex::effects::engine::EffectsEngine;
use stellar_codex::effects::universe::{Empire, Universe, UniverseObject};
use stellar_codex::library;
use stellar_codex::policy::PolicyManager;
use stellar_codex::species::{validate_species, Species, SpeciesRegistry};

/// Species content codex
#[derive(Parser, Debug)]
#[command(name = "codex")]
#[command(about = "Validate, inspect and exercise species content")]
struct Cli {
    /// Config file (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content directory with extra species files (overrides the config)
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every loaded species and report issues
    Validate {
        /// Fail when any issue is found
        #[arg(long)]
        strict: bool,
    },
    /// Print one species
    Show {
        name: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write every loaded species to a directory, one file each
    Export {
        dir: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
    /// Print content checksums
    Checksum,
    /// Run a species' effects on an owned capital planet and report the result
    Capital { name: String },
    /// List the named fragments in the library
    Fragments,
    /// List policies by category, or print one
    Policies { name: Option<String> },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
    Toml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CodexConfig::load(path)?,
        None => CodexConfig::default(),
    };
    if cli.content_dir.is_some() {
        config.content_dir = cli.content_dir.clone();
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let policies = PolicyManager::builtin();

    match cli.command {
        Command::Validate { strict } => {
            // Load leniently so every issue gets reported, not just the first
            config.strict = false;
            let registry = SpeciesRegistry::from_config(&config, &policies)?;
            validate(&registry, strict)
        }
        Command::Show { name, format } => {
            let registry = SpeciesRegistry::from_config(&config, &policies)?;
            let species = registry.get_by_name(&name)?;
            println!("{}", render(species, format)?);
            Ok(())
        }
        Command::Export { dir, format } => {
            let registry = SpeciesRegistry::from_config(&config, &policies)?;
            export(&registry, &dir, format)
        }
        Command::Checksum => {
            let registry = SpeciesRegistry::from_config(&config, &policies)?;
            for species in registry.iter() {
                println!("{:<24} {:>8}", species.name, species.checksum());
            }
            println!("{:<24} {:>8}", "species total", registry.checksum());
            println!("{:<24} {:>8}", "policies", policies.checksum());
            Ok(())
        }
        Command::Capital { name } => {
            let registry = SpeciesRegistry::from_config(&config, &policies)?;
            let species = registry.get_by_name(&name)?;
            run_capital(species, &config, &policies);
            Ok(())
        }
        Command::Policies { name: Some(name) } => {
            let policy = policies
                .get(&name)
                .ok_or_else(|| CodexError::PolicyNotFound(name.clone()))?;
            print!("{}", policy.dump());
            Ok(())
        }
        Command::Policies { name: None } => {
            for category in policies.categories() {
                println!("{}", category);
                for name in policies.names_in_category(category) {
                    println!("  {}", name);
                }
            }
            Ok(())
        }
        Command::Fragments => {
            for name in library::fragment_names() {
                let groups = library::fragment(name).map_or(0, |f| f.len());
                println!("{:<32} {} groups", name, groups);
            }
            Ok(())
        }
    }
}

fn validate(registry: &SpeciesRegistry, strict: bool) -> Result<()> {
    let mut messages = Vec::new();
    for species in registry.iter() {
        let issues = validate_species(species, registry.index());
        if issues.is_empty() {
            println!("{:<24} ok", species.name);
        }
        for issue in issues {
            println!("{:<24} {}", species.name, issue);
            messages.push(format!("{}: {}", species.name, issue));
        }
    }
    println!("{} species checked, {} issues", registry.len(), messages.len());

    if strict && !messages.is_empty() {
        return Err(CodexError::Validation(messages));
    }
    Ok(())
}

fn render(species: &Species, format: Format) -> Result<String> {
    Ok(match format {
        Format::Text => species.dump(),
        Format::Json => serde_json::to_string_pretty(species)?,
        Format::Toml => toml::to_string_pretty(species)?,
    })
}

fn export(registry: &SpeciesRegistry, dir: &Path, format: Format) -> Result<()> {
    let extension = match format {
        Format::Json => "json",
        Format::Toml => "toml",
        Format::Text => return Err(CodexError::UnsupportedFormat(dir.join("*.txt"))),
    };
    std::fs::create_dir_all(dir)?;
    for species in registry.iter() {
        let path = dir.join(format!("{}.{}", species.name.to_lowercase(), extension));
        std::fs::write(&path, render(species, format)?)?;
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}

/// One empire, one capital on the species' best planet type
fn run_capital(species: &Species, config: &CodexConfig, policies: &PolicyManager) {
    let home = species
        .best_planet_types()
        .first()
        .copied()
        .unwrap_or(PlanetType::Terran);

    let mut universe = Universe::new();
    universe.turn = 1;
    let mut empire = Empire::new(EmpireId(1), "Player");
    empire.capital = Some(ObjectId(1));
    universe.insert_empire(empire);

    let mut capital = UniverseObject::planet(ObjectId(1), home, PlanetSize::Medium)
        .with_owner(EmpireId(1))
        .with_species(&species.name, 10.0);
    if let Some(focus) = &species.default_focus {
        capital = capital.with_focus(focus);
    }
    universe.insert_object(capital);

    let engine = EffectsEngine::new(config).with_policies(policies);
    engine.begin_turn(&mut universe);
    let report = engine.apply_species(&mut universe, species);

    println!("{} capital on a medium {} planet", species.name, home);
    for entry in &report.meter_changes {
        println!(
            "  {:<36} {:<18} {:>8.2} -> {:>8.2}",
            entry.label,
            entry.meter.as_str(),
            entry.before,
            entry.after
        );
    }
    for (empire, policy) in &report.granted_policies {
        println!("  empire {} adopted {}", empire.0, policy);
    }
    for refused in &report.refused_grants {
        println!("  empire {} refused {}: {}", refused.empire.0, refused.policy, refused.reason);
    }
    let foci: Vec<&str> = engine
        .available_foci(species, &universe, ObjectId(1))
        .into_iter()
        .map(|f| f.name.as_str())
        .collect();
    println!("  available foci: {}", foci.join(", "));
}
