use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Quest state the server uses for "reward ready to claim".
pub const QUEST_STATE_CLAIMABLE: u32 = 2;

/// Roster member; only the fields team selection needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Hero {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub power: u64,
}

impl Hero {
    pub fn new(id: u64, power: u64) -> Self {
        Self { id, power }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum ExpeditionStatus {
    Available,
    Ongoing,
    Unknown(u8),
}

impl From<u8> for ExpeditionStatus {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Available,
            2 => Self::Ongoing,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expedition {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
    pub status: ExpeditionStatus,
    /// Minimum total team power.
    #[serde(deserialize_with = "lenient_u64")]
    pub power: u64,
    /// Unix seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_time: i64,
    /// Heroes currently assigned.
    #[serde(default, deserialize_with = "null_as_default")]
    pub heroes: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Quest {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
    pub state: u32,
}

impl Quest {
    pub fn is_claimable(&self) -> bool {
        self.state == QUEST_STATE_CLAIMABLE
    }
}

/// Mail item. The id is echoed back to the server untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Letter {
    pub id: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBonusInfo {
    #[serde(default)]
    pub available_today: bool,
}

/// Accepts a non-negative integer given either as a JSON number or a numeric string.
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn expedition_parses_wire_shape() {
        let expedition: Expedition = serde_json::from_value(json!({
            "id": 4,
            "slotId": 4,
            "status": 2,
            "power": "125000",
            "endTime": 1_700_000_000,
            "heroes": [1, 2, 3, 4, 5],
        }))
        .expect("expedition should parse");

        assert_eq!(expedition.id, 4);
        assert_eq!(expedition.status, ExpeditionStatus::Ongoing);
        assert_eq!(expedition.power, 125_000);
        assert_eq!(expedition.end_time, 1_700_000_000);
        assert_eq!(expedition.heroes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn available_expedition_may_omit_heroes_and_end_time() {
        let expedition: Expedition =
            serde_json::from_value(json!({"id": 1, "status": 1, "power": 900}))
                .expect("expedition should parse");

        assert_eq!(expedition.status, ExpeditionStatus::Available);
        assert!(expedition.heroes.is_empty());
        assert_eq!(expedition.end_time, 0);
    }

    #[test]
    fn null_heroes_and_end_time_read_as_empty() {
        let expedition: Expedition = serde_json::from_value(json!({
            "id": "9",
            "status": 1,
            "power": 300,
            "endTime": null,
            "heroes": null,
        }))
        .expect("expedition should parse");

        assert_eq!(expedition.id, 9);
        assert_eq!(expedition.end_time, 0);
        assert!(expedition.heroes.is_empty());
    }

    #[test]
    fn unexpected_status_is_kept() {
        let expedition: Expedition =
            serde_json::from_value(json!({"id": 1, "status": 3, "power": 1}))
                .expect("expedition should parse");
        assert_eq!(expedition.status, ExpeditionStatus::Unknown(3));
    }

    #[test]
    fn quest_claimable_only_in_state_two() {
        let quests: Vec<Quest> = serde_json::from_value(json!([
            {"id": 1, "state": 1, "progress": 0},
            {"id": "2", "state": 2},
            {"id": 3, "state": 3},
        ]))
        .expect("quests should parse");

        let claimable = quests
            .iter()
            .filter(|quest| quest.is_claimable())
            .map(|quest| quest.id)
            .collect::<Vec<_>>();
        assert_eq!(claimable, vec![2]);
    }

    #[test]
    fn hero_ignores_extra_roster_fields() {
        let hero: Hero = serde_json::from_value(json!({
            "id": 12,
            "xp": 1000,
            "level": 80,
            "power": 45210,
            "skins": {},
        }))
        .expect("hero should parse");
        assert_eq!(hero, Hero::new(12, 45_210));
    }

    #[test]
    fn negative_power_is_rejected() {
        let result = serde_json::from_value::<Hero>(json!({"id": 1, "power": -5}));
        assert!(result.is_err());
    }
}
