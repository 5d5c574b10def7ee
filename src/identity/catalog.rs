//! Identity catalog: canonical games, aliases and the alias index.

use crate::error::CatalogError;
use crate::identity::normalize::normalize;
use crate::models::identity::{CatalogEntry, GameIdentity};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// What to do when two catalog entries normalize to the same alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasConflictPolicy {
    /// Keep the entry that appears first in the file and log a warning
    #[default]
    #[serde(alias = "first")]
    KeepFirst,
    /// Fail the catalog load
    Reject,
}

impl AliasConflictPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "first" | "keepfirst" | "keep_first" => Some(Self::KeepFirst),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Alias claimed by more than one entry; the first registrant kept it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConflict {
    pub alias: String,
    pub kept: String,
    pub dropped: String,
}

/// Static registry of canonical games, in file order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    games: Vec<GameIdentity>,
    alias_index: HashMap<String, usize>,
    conflicts: Vec<AliasConflict>,
}

impl Catalog {
    /// Build from identities already in memory
    pub fn from_identities(
        games: Vec<GameIdentity>,
        policy: AliasConflictPolicy,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();
        for game in games {
            catalog.register(game, policy)?;
        }
        Ok(catalog)
    }

    /// Parse catalog JSON: either `name -> entry` or `{ "games": { name -> entry } }`
    pub fn from_json_str(text: &str, policy: AliasConflictPolicy) -> Result<Self, CatalogError> {
        let mut root: Map<String, Value> =
            serde_json::from_str(text.trim_start_matches('\u{FEFF}'))?;
        let wrapped = matches!(root.get("games"), Some(Value::Object(_)));
        let entries = if wrapped {
            match root.remove("games") {
                Some(Value::Object(games)) => games,
                _ => Map::new(),
            }
        } else {
            root
        };

        let mut games = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            match CatalogEntry::deserialize(value) {
                Ok(entry) => games.push(GameIdentity::from_entry(name, entry)),
                Err(e) => {
                    warn!(game = %name, error = %e, "Skipping malformed catalog entry '{}'", name);
                }
            }
        }

        Self::from_identities(games, policy)
    }

    pub fn load(path: &Path, policy: AliasConflictPolicy) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&text, policy)?;
        debug!(
            path = %path.display(),
            games = catalog.len(),
            "Loaded catalog with {} games",
            catalog.len()
        );
        Ok(catalog)
    }

    fn register(
        &mut self,
        mut game: GameIdentity,
        policy: AliasConflictPolicy,
    ) -> Result<(), CatalogError> {
        if game.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let index = self.games.len();
        let names: Vec<String> = game.all_names().map(str::to_string).collect();
        let mut claimed: Vec<String> = Vec::new();
        let mut dropped: Vec<String> = Vec::new();
        let mut shadowed: Vec<String> = Vec::new();
        for name in &names {
            let key = normalize(name);
            if key.is_empty() || claimed.contains(&key) || shadowed.contains(&key) {
                continue;
            }
            if let Some(&owner) = self.alias_index.get(&key) {
                let first = self.games[owner].name.clone();
                match policy {
                    AliasConflictPolicy::Reject => {
                        return Err(CatalogError::AmbiguousAlias {
                            alias: name.clone(),
                            first,
                            second: game.name.clone(),
                        });
                    }
                    AliasConflictPolicy::KeepFirst => {
                        warn!(
                            alias = %name,
                            kept = %first,
                            dropped = %game.name,
                            "Alias '{}' already belongs to '{}', ignoring it for '{}'",
                            name,
                            first,
                            game.name
                        );
                        self.conflicts.push(AliasConflict {
                            alias: key.clone(),
                            kept: first,
                            dropped: game.name.clone(),
                        });
                        dropped.push(name.clone());
                        shadowed.push(key);
                        continue;
                    }
                }
            }
            claimed.push(key);
        }

        // The later entry no longer answers to names it lost, canonical name included
        game.aliases.retain(|alias| !dropped.contains(alias));
        game.shadowed_names = shadowed;
        for key in claimed {
            self.alias_index.insert(key, index);
        }
        self.games.push(game);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameIdentity> {
        self.games.iter()
    }

    pub fn get(&self, canonical: &str) -> Option<&GameIdentity> {
        self.games.iter().find(|g| g.name == canonical)
    }

    /// Canonical entry owning a free-text title, by exact normalized match
    pub fn canonical_for(&self, title: &str) -> Option<&GameIdentity> {
        self.alias_index
            .get(&normalize(title))
            .map(|&index| &self.games[index])
    }

    /// Aliases that were ignored because an earlier entry owned them
    pub fn conflicts(&self) -> &[AliasConflict] {
        &self.conflicts
    }
}
