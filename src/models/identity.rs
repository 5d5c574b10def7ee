//! Game catalog records: the on-disk entry and the in-memory identity.

use crate::models::de;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog entry body as stored in the catalog JSON (keyed by canonical name)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub aliases: Vec<String>,
    #[serde(default, deserialize_with = "de::string_map")]
    pub app_ids: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub developer: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "de::vec_or_null")]
    pub platforms: Vec<String>,
}

/// Canonical game with its aliases and per-storefront identifiers.
///
/// `app_ids` keys are `"platform:region"`, bare `"platform"`, or
/// `"steam:global"` / `"steam"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameIdentity {
    pub name: String,
    pub aliases: Vec<String>,
    #[serde(skip)]
    pub app_ids: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip)]
    pub icon: Option<String>,
    pub platforms: Vec<String>,
    /// Normalized names owned by an earlier catalog entry; never matched for this game
    #[serde(skip)]
    pub shadowed_names: Vec<String>,
}

impl GameIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            app_ids: BTreeMap::new(),
            developer: None,
            icon: None,
            platforms: Vec::new(),
            shadowed_names: Vec::new(),
        }
    }

    pub fn from_entry(name: impl Into<String>, entry: CatalogEntry) -> Self {
        Self {
            name: name.into(),
            aliases: entry.aliases,
            app_ids: entry.app_ids,
            developer: entry.developer,
            icon: entry.icon,
            platforms: entry.platforms,
            shadowed_names: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_app_id(mut self, key: impl Into<String>, id: impl Into<String>) -> Self {
        self.app_ids.insert(key.into(), id.into());
        self
    }

    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developer = Some(developer.into());
        self
    }

    /// Canonical name followed by every alias
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}
