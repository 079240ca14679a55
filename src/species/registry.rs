//! Species registry for loading and looking up species records.
//!
//! Records come from the built-in catalog or from `.toml` / `.json` files
//! in a content directory. Names are unique across everything registered.
//! Each record is validated against a [`ContentIndex`] as it is registered;
//! strict registries refuse records with issues, lenient ones log them.

use ahash::AHashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::content::{ContentIndex, CONTENT_INDEX_FILE};
use crate::core::checksum::{combine, CheckSum};
use crate::core::config::CodexConfig;
use crate::core::error::{CodexError, Result};
use crate::policy::PolicyManager;
use crate::species::catalog;
use crate::species::record::Species;
use crate::species::validate::validate_species;

/// Registry for species records
pub struct SpeciesRegistry {
    /// Records in registration order
    species: Vec<Species>,
    /// Map from name to position in `species`
    by_name: AHashMap<String, usize>,
    /// Map from tag to positions, for filtering
    by_tag: AHashMap<String, Vec<usize>>,
    index: ContentIndex,
    strict: bool,
}

impl SpeciesRegistry {
    /// Create an empty lenient registry validating against `index`
    pub fn new(index: ContentIndex) -> Self {
        Self {
            species: Vec::new(),
            by_name: AHashMap::new(),
            by_tag: AHashMap::new(),
            index,
            strict: false,
        }
    }

    /// Refuse records with validation issues
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Registry holding the built-in catalog
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new(ContentIndex::builtin());
        for species in catalog::builtin_species() {
            registry.register(species)?;
        }
        Ok(registry)
    }

    /// Built-in catalog plus everything in the configured content directory
    ///
    /// A `content_index.toml` in the directory extends the index before any
    /// record is checked against it.
    pub fn from_config(config: &CodexConfig, policies: &PolicyManager) -> Result<Self> {
        let mut index = ContentIndex::with_policies(policies);
        if let Some(dir) = &config.content_dir {
            let index_file = dir.join(CONTENT_INDEX_FILE);
            if index_file.is_file() {
                index.load_file(&index_file)?;
            }
        }

        let mut registry = Self::new(index).strict(config.strict);
        for species in catalog::builtin_species() {
            registry.register(species)?;
        }
        if let Some(dir) = &config.content_dir {
            registry.load_directory(dir)?;
        }
        Ok(registry)
    }

    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    /// Register a record; duplicate names are rejected
    pub fn register(&mut self, species: Species) -> Result<()> {
        if self.by_name.contains_key(&species.name) {
            return Err(CodexError::DuplicateSpecies(species.name));
        }

        let issues = validate_species(&species, &self.index);
        if !issues.is_empty() {
            if self.strict {
                return Err(CodexError::Validation(
                    issues
                        .iter()
                        .map(|issue| format!("{}: {}", species.name, issue))
                        .collect(),
                ));
            }
            for issue in &issues {
                warn!("{}: {}", species.name, issue);
            }
        }

        let position = self.species.len();
        self.by_name.insert(species.name.clone(), position);
        for tag in &species.tags {
            self.by_tag.entry(tag.clone()).or_default().push(position);
        }
        debug!(
            "Registered {} ({} effects groups)",
            species.name,
            species.effects_groups.len()
        );
        self.species.push(species);
        Ok(())
    }

    /// Load one record from a `.toml` or `.json` file
    pub fn load_file(&mut self, path: &Path) -> Result<String> {
        let content = std::fs::read_to_string(path)?;
        let species: Species = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => return Err(CodexError::UnsupportedFormat(path.to_path_buf())),
        };
        let name = species.name.clone();
        self.register(species)?;
        debug!("Loaded {} from {}", name, path.display());
        Ok(name)
    }

    /// Load every record under a directory, recursively
    ///
    /// Files are visited in sorted path order so duplicate reports are
    /// deterministic. The content index file is skipped.
    pub fn load_directory(&mut self, path: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        self.load_directory_recursive(path, &mut names)?;
        info!("Loaded {} species from {}", names.len(), path.display());
        Ok(names)
    }

    fn load_directory_recursive(&mut self, path: &Path, names: &mut Vec<String>) -> Result<()> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        entries.sort();

        for entry_path in entries {
            if entry_path.is_dir() {
                self.load_directory_recursive(&entry_path, names)?;
                continue;
            }
            if entry_path.file_name().map_or(false, |name| name == CONTENT_INDEX_FILE) {
                continue;
            }
            let loadable = entry_path
                .extension()
                .map_or(false, |ext| ext == "toml" || ext == "json");
            if loadable {
                names.push(self.load_file(&entry_path)?);
            }
        }
        Ok(())
    }

    /// Get a record by name
    pub fn get(&self, name: &str) -> Option<&Species> {
        self.by_name.get(name).map(|&i| &self.species[i])
    }

    /// Get a record by name, or a not-found error
    pub fn get_by_name(&self, name: &str) -> Result<&Species> {
        self.get(name)
            .ok_or_else(|| CodexError::SpeciesNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Records carrying a tag, in registration order
    pub fn by_tag(&self, tag: &str) -> Vec<&Species> {
        self.by_tag
            .get(tag)
            .map(|positions| positions.iter().map(|&i| &self.species[i]).collect())
            .unwrap_or_default()
    }

    pub fn playable(&self) -> impl Iterator<Item = &Species> {
        self.species.iter().filter(|s| s.playable)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl CheckSum for SpeciesRegistry {
    /// Independent of registration order
    fn checksum(&self) -> u32 {
        let mut sorted: Vec<&Species> = self.species.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        let mut sum = 0;
        for species in sorted {
            combine(&mut sum, species);
        }
        debug!("Species registry checksum: {}", sum);
        sum
    }
}
