//! Reward payloads.
//!
//! The server sends a reward as an object keyed by reward type. Some types
//! carry a plain quantity, others a map of item id to quantity. Each known
//! type declares which shape it uses and payloads are resolved against that
//! declaration once, when they are received.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Shape a reward type's value takes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardShape {
    Scalar,
    Items,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RewardKind {
    Stamina,
    Gold,
    Experience,
    Starmoney,
    DungeonActivity,
    Consumable,
    Coin,
    FragmentHero,
    FragmentArtifact,
    FragmentGear,
    Gear,
    FragmentScroll,
    FragmentTitanArtifact,
    FragmentTitan,
}

impl RewardKind {
    pub const ALL: [RewardKind; 14] = [
        Self::Stamina,
        Self::Gold,
        Self::Experience,
        Self::Starmoney,
        Self::DungeonActivity,
        Self::Consumable,
        Self::Coin,
        Self::FragmentHero,
        Self::FragmentArtifact,
        Self::FragmentGear,
        Self::Gear,
        Self::FragmentScroll,
        Self::FragmentTitanArtifact,
        Self::FragmentTitan,
    ];

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Stamina => "stamina",
            Self::Gold => "gold",
            Self::Experience => "experience",
            Self::Starmoney => "starmoney",
            Self::DungeonActivity => "dungeonActivity",
            Self::Consumable => "consumable",
            Self::Coin => "coin",
            Self::FragmentHero => "fragmentHero",
            Self::FragmentArtifact => "fragmentArtifact",
            Self::FragmentGear => "fragmentGear",
            Self::Gear => "gear",
            Self::FragmentScroll => "fragmentScroll",
            Self::FragmentTitanArtifact => "fragmentTitanArtifact",
            Self::FragmentTitan => "fragmentTitan",
        }
    }

    pub fn shape(&self) -> RewardShape {
        match self {
            Self::Stamina | Self::Gold | Self::Experience | Self::Starmoney | Self::DungeonActivity => {
                RewardShape::Scalar
            }
            _ => RewardShape::Items,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RewardEntry {
    Scalar {
        kind: RewardKind,
        amount: i64,
    },
    Items {
        kind: RewardKind,
        items: BTreeMap<String, i64>,
    },
    /// Unrecognized type, or a known type whose value did not match its shape.
    Unknown {
        key: String,
        raw: Value,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reward {
    pub entries: Vec<RewardEntry>,
}

impl Reward {
    /// Resolves a wire reward. `null` and non-object payloads mean "no reward".
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self::from_object(object))
    }

    pub fn from_object(object: &Map<String, Value>) -> Self {
        let entries = object
            .iter()
            .map(|(key, value)| resolve_entry(key, value))
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Quantity of a scalar reward type, if present.
    pub fn amount(&self, kind: RewardKind) -> Option<i64> {
        self.entries.iter().find_map(|entry| match entry {
            RewardEntry::Scalar { kind: found, amount } if *found == kind => Some(*amount),
            _ => None,
        })
    }

    /// Item quantities of an item reward type, if present.
    pub fn items(&self, kind: RewardKind) -> Option<&BTreeMap<String, i64>> {
        self.entries.iter().find_map(|entry| match entry {
            RewardEntry::Items { kind: found, items } if *found == kind => Some(items),
            _ => None,
        })
    }
}

fn resolve_entry(key: &str, value: &Value) -> RewardEntry {
    let unknown = || RewardEntry::Unknown {
        key: key.to_owned(),
        raw: value.clone(),
    };

    let Some(kind) = RewardKind::parse(key) else {
        return unknown();
    };

    match kind.shape() {
        RewardShape::Scalar => match quantity(value) {
            Some(amount) => RewardEntry::Scalar { kind, amount },
            None => unknown(),
        },
        RewardShape::Items => {
            let Some(object) = value.as_object() else {
                return unknown();
            };
            let items = object
                .iter()
                .map(|(id, amount)| quantity(amount).map(|amount| (id.clone(), amount)))
                .collect::<Option<BTreeMap<_, _>>>();
            match items {
                Some(items) => RewardEntry::Items { kind, items },
                None => unknown(),
            }
        }
    }
}

fn quantity(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.trunc() as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn resolves_scalar_and_item_entries() {
        let reward = Reward::from_value(&json!({
            "gold": 1500,
            "consumable": {"9": 2, "17": "1"},
        }))
        .expect("object is a reward");

        assert_eq!(reward.amount(RewardKind::Gold), Some(1500));
        let items = reward.items(RewardKind::Consumable).expect("items");
        assert_eq!(items.get("9"), Some(&2));
        assert_eq!(items.get("17"), Some(&1));
    }

    #[test]
    fn null_is_no_reward() {
        assert_eq!(Reward::from_value(&Value::Null), None);
        assert_eq!(Reward::from_value(&json!([1, 2])), None);
    }

    #[test]
    fn shape_mismatch_is_kept_as_unknown() {
        let reward = Reward::from_value(&json!({"gold": {"1": 2}, "gear": 5})).expect("reward");

        assert_eq!(reward.entries.len(), 2);
        assert!(reward
            .entries
            .iter()
            .all(|entry| matches!(entry, RewardEntry::Unknown { .. })));
    }

    #[test]
    fn unrecognized_type_is_kept_with_raw_payload() {
        let reward = Reward::from_value(&json!({"petSoulStone": {"4": 10}})).expect("reward");
        assert_eq!(
            reward.entries,
            vec![RewardEntry::Unknown {
                key: "petSoulStone".to_owned(),
                raw: json!({"4": 10}),
            }]
        );
    }

    #[test]
    fn float_quantities_truncate() {
        let reward = Reward::from_value(&json!({"experience": 12.9})).expect("reward");
        assert_eq!(reward.amount(RewardKind::Experience), Some(12));
    }

    #[test]
    fn every_kind_round_trips_its_key() {
        for kind in RewardKind::ALL {
            assert_eq!(RewardKind::parse(kind.key()), Some(kind));
        }
        assert_eq!(RewardKind::parse("Gold"), None);
    }

    #[test]
    fn scalar_kinds_are_declared_scalar() {
        assert_eq!(RewardKind::Stamina.shape(), RewardShape::Scalar);
        assert_eq!(RewardKind::DungeonActivity.shape(), RewardShape::Scalar);
        assert_eq!(RewardKind::FragmentTitan.shape(), RewardShape::Items);
    }
}
