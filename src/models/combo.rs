//! Ranking chart coordinates: category, platform and region.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store chart category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Grossing,
    Free,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Grossing, Category::Free];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Grossing => "grossing",
            Category::Free => "free",
        }
    }
}

/// Mobile storefront
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Ios, Platform::Android];

    /// Name used in snapshot JSON and catalog app id keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }

    /// Short name used in series keys and hourly file names
    pub fn short(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "aos",
        }
    }

    pub fn from_short(value: &str) -> Option<Self> {
        match value {
            "ios" => Some(Platform::Ios),
            "aos" | "android" => Some(Platform::Android),
            _ => None,
        }
    }
}

/// Storefront region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Kr,
    Jp,
    Us,
    Cn,
    Tw,
}

impl Region {
    pub const ALL: [Region; 5] = [Region::Kr, Region::Jp, Region::Us, Region::Cn, Region::Tw];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Kr => "kr",
            Region::Jp => "jp",
            Region::Us => "us",
            Region::Cn => "cn",
            Region::Tw => "tw",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Region::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

/// One ranking list: (category, platform, region).
///
/// `Display` renders the rank-history field name (`grossing-ios-kr`).
/// The realtime and current-rankings maps use their own formats, see
/// [`ComboKey::realtime_key`] and [`ComboKey::ranking_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComboKey {
    pub category: Category,
    pub platform: Platform,
    pub region: Region,
}

impl ComboKey {
    pub fn new(category: Category, platform: Platform, region: Region) -> Self {
        Self {
            category,
            platform,
            region,
        }
    }

    /// Every combination tracked by the daily snapshots (2 × 5 × 2)
    pub fn all() -> Vec<ComboKey> {
        let mut keys = Vec::with_capacity(20);
        for category in Category::ALL {
            for region in Region::ALL {
                for platform in Platform::ALL {
                    keys.push(ComboKey::new(category, platform, region));
                }
            }
        }
        keys
    }

    /// `<category>-<ios|aos>-<region>`
    pub fn history_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.category.as_str(),
            self.platform.short(),
            self.region.as_str()
        )
    }

    /// `<ios|aos>-<region>-<category>`
    pub fn realtime_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.platform.short(),
            self.region.as_str(),
            self.category.as_str()
        )
    }

    /// `<region>-<ios|android>-<category>`
    pub fn ranking_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.region.as_str(),
            self.platform.as_str(),
            self.category.as_str()
        )
    }
}

impl fmt::Display for ComboKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.history_key())
    }
}
