//! Human-readable reward text.
//!
//! Each reward kind maps to a pattern of locale keys. Patterns are upper-cased,
//! `{VALUE}` and `{ID}` are substituted, and every space-separated token found
//! in the locale table is replaced by its translation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use hero_api::{Reward, RewardEntry, RewardKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to read locale table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("locale table {path} is not a JSON string map: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Locale-key pattern for one reward kind.
pub fn reward_pattern(kind: RewardKind) -> &'static str {
    match kind {
        RewardKind::Stamina => "LIB_PSEUDO_STAMINA",
        RewardKind::Gold => "LIB_PSEUDO_COIN",
        RewardKind::Experience => "LIB_PSEUDO_XP",
        RewardKind::Starmoney => "LIB_PSEUDO_STARMONEY",
        RewardKind::DungeonActivity => "LIB_PSEUDO_DUNGEON_ACTIVITY",
        RewardKind::Consumable => "LIB_CONSUMABLE_NAME_{ID}",
        RewardKind::Coin => "LIB_COIN_NAME_{ID}",
        RewardKind::FragmentHero | RewardKind::FragmentTitan => {
            "LIB_HERO_NAME_{ID} LIB_INVENTORYITEM_TYPE_HERO_FRAGMENT"
        }
        RewardKind::FragmentArtifact => "LIB_ARTIFACT_NAME_{ID} LIB_INVENTORYITEM_TYPE_FRAGMENT",
        RewardKind::FragmentGear => "LIB_GEAR_NAME_{ID} LIB_INVENTORYITEM_TYPE_FRAGMENT",
        RewardKind::Gear => "LIB_GEAR_NAME_{ID}",
        RewardKind::FragmentScroll => "LIB_SCROLL_NAME_{ID} LIB_INVENTORYITEM_TYPE_FRAGMENT",
        RewardKind::FragmentTitanArtifact => {
            "LIB_TITAN_ARTIFACT_NAME_{ID} LIB_INVENTORYITEM_TYPE_FRAGMENT"
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Locale {
    strings: HashMap<String, String>,
}

impl Locale {
    /// A locale without translations; tokens are printed as-is.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_strings(strings: HashMap<String, String>) -> Self {
        Self { strings }
    }

    pub fn load(path: &Path) -> Result<Self, LocaleError> {
        let raw = fs::read_to_string(path).map_err(|source| LocaleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let strings = serde_json::from_str(&raw).map_err(|source| LocaleError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { strings })
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Renders every entry of `reward`, joined with `"; "`.
    pub fn describe(&self, reward: &Reward) -> String {
        let mut parts = Vec::new();
        for entry in &reward.entries {
            match entry {
                RewardEntry::Scalar { kind, amount } => {
                    parts.push(self.render(reward_pattern(*kind), &amount.to_string(), ""));
                }
                RewardEntry::Items { kind, items } => {
                    for (id, amount) in items {
                        parts.push(self.render(reward_pattern(*kind), &amount.to_string(), id));
                    }
                }
                RewardEntry::Unknown { key, raw } => {
                    tracing::warn!(reward_type = %key, payload = %raw, "reward type has no text pattern");
                }
            }
        }
        parts.join("; ")
    }

    fn render(&self, pattern: &str, value: &str, id: &str) -> String {
        format!("{{VALUE}} {pattern}")
            .to_uppercase()
            .replacen("{VALUE}", value, 1)
            .replacen("{ID}", id, 1)
            .split(' ')
            .map(|token| self.strings.get(token).map_or(token, String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
