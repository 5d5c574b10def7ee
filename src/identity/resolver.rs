//! Maps a catalog identity to concrete storefront identifiers.

use crate::identity::normalize::{normalize, normalize_text};
use crate::models::combo::{Platform, Region};
use crate::models::identity::GameIdentity;

/// Resolver bound to one identity, with its normalized name set precomputed
#[derive(Debug, Clone)]
pub struct IdentityResolver<'a> {
    identity: &'a GameIdentity,
    names: Vec<String>,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(identity: &'a GameIdentity) -> Self {
        let mut names: Vec<String> = Vec::new();
        for name in identity.all_names() {
            let key = normalize(name);
            if !key.is_empty() && !names.contains(&key) && !identity.shadowed_names.contains(&key)
            {
                names.push(key);
            }
        }
        Self { identity, names }
    }

    pub fn identity(&self) -> &'a GameIdentity {
        self.identity
    }

    /// Normalized canonical name and aliases, minus names an earlier entry owns
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// App id for a storefront: `"platform:region"`, then bare `"platform"`.
    ///
    /// Android is not distributed in `cn`, so that pair never resolves.
    pub fn resolve_app_id(&self, platform: Platform, region: Region) -> Option<&'a str> {
        if platform == Platform::Android && region == Region::Cn {
            return None;
        }
        let scoped = format!("{}:{}", platform.as_str(), region.as_str());
        self.lookup(&scoped)
            .or_else(|| self.lookup(platform.as_str()))
    }

    /// Steam app id: `"steam:global"`, then bare `"steam"`
    pub fn resolve_steam_app_id(&self) -> Option<&'a str> {
        self.lookup("steam:global").or_else(|| self.lookup("steam"))
    }

    fn lookup(&self, key: &str) -> Option<&'a str> {
        self.identity
            .app_ids
            .get(key)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Exact, case/width-insensitive match against the canonical name or an alias
    pub fn matches_name(&self, title: &str) -> bool {
        let key = normalize(title);
        !key.is_empty() && self.names.iter().any(|n| *n == key)
    }

    /// Whether any name occurs inside the given free-text fields
    pub fn mentioned_in<'t>(&self, parts: impl IntoIterator<Item = Option<&'t str>>) -> bool {
        let text = normalize_text(parts);
        !text.is_empty() && self.names.iter().any(|n| text.contains(n.as_str()))
    }
}

/// Resolve a storefront app id for one identity
pub fn resolve(identity: &GameIdentity, platform: Platform, region: Region) -> Option<&str> {
    IdentityResolver::new(identity).resolve_app_id(platform, region)
}
