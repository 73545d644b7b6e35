use std::mem;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use session_store::Session;

use crate::client::RpcClient;
use crate::error::HeroApiError;
use crate::models::{DailyBonusInfo, Expedition, Hero, Letter, Quest};
use crate::payload::{Call, CallResult};
use crate::reward::Reward;
use crate::session::SessionState;
use crate::transport::Transport;

static NULL: Value = Value::Null;

/// Read-only calls without arguments that make up the account snapshot.
pub const STATE_SNAPSHOT_CALLS: &[&str] = &[
    "adventure_find",
    "adventure_getActiveData",
    "adventure_getPassed",
    "arenaGetAll",
    "artifactGetChestLevel",
    "bossGetAll",
    "campaignStoryGetList",
    "clanGetActivityRewardTable",
    "clanGetInfo",
    "clanGetPrevData",
    "clanWarGetBriefInfo",
    "clanWarGetWarlordInfo",
    "dailyBonusGetInfo",
    "expeditionGet",
    "freebieHaveGroup",
    "getTime",
    "hallOfFameGetTrophies",
    "heroGetAll",
    "heroesMerchantGet",
    "inventoryGet",
    "mailGetAll",
    "missionGetAll",
    "missionGetReplace",
    "newYearGetInfo",
    "offerGetAll",
    "pet_getAll",
    "pet_getChest",
    "pet_getPotionDailyBuyCount",
    "pirateTreasureIsAvailable",
    "playable_getAvailable",
    "questGetAll",
    "questGetEvents",
    "settingsGetAll",
    "shopGetAll",
    "socialQuestGetInfo",
    "splitGetAll",
    "teamGetAll",
    "titanArenaCheckForgotten",
    "titanArenaGetChestReward",
    "titanArtifactGetChest",
    "titanGetAll",
    "titanGetSummoningCircle",
    "titanSpiritGetAll",
    "towerGetInfo",
    "userGetInfo",
    "zeppelinGiftGet",
];

/// Game operations over an [`RpcClient`], owning the session state between calls.
#[derive(Debug)]
pub struct GameApi<T> {
    client: RpcClient<T>,
    state: SessionState,
}

impl<T: Transport> GameApi<T> {
    pub fn new(client: RpcClient<T>) -> Self {
        Self {
            client,
            state: SessionState::Uninitialized,
        }
    }

    pub fn client(&self) -> &RpcClient<T> {
        &self.client
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    /// Loads the stored session, or bootstraps one when absent or `invalidate` is set.
    pub async fn prepare(&mut self, invalidate: bool) -> Result<(), HeroApiError> {
        let session = self.client.prepare(invalidate).await?;
        self.state = SessionState::Active(session);
        Ok(())
    }

    pub async fn call(&mut self, calls: Vec<Call>) -> Result<Vec<CallResult>, HeroApiError> {
        let (state, result) = self.client.call(mem::take(&mut self.state), calls).await;
        self.state = state;
        result
    }

    pub async fn call_one(&mut self, name: &str, args: Value) -> Result<CallResult, HeroApiError> {
        let (state, result) = self
            .client
            .call_one(mem::take(&mut self.state), name, args)
            .await;
        self.state = state;
        result
    }

    /// Fetches the account snapshot in a single batch.
    pub async fn get_state(&mut self) -> Result<Vec<CallResult>, HeroApiError> {
        self.call(STATE_SNAPSHOT_CALLS.iter().copied().map(Call::new).collect())
            .await
    }

    /// Hero roster ordered by hero id.
    pub async fn get_all_heroes(&mut self) -> Result<Vec<Hero>, HeroApiError> {
        let result = self.call_one("heroGetAll", Value::Null).await?;
        let mut heroes: Vec<Hero> = parse_values(result.response())?;
        heroes.sort_by_key(|hero| hero.id);
        Ok(heroes)
    }

    /// Sends the clan daily gifts; returns the quests the gift unlocked.
    pub async fn send_clan_daily_gifts(&mut self) -> Result<Vec<Quest>, HeroApiError> {
        let result = self.call_one("clanSendDailyGifts", Value::Null).await?;
        let quests = result
            .result
            .get("quests")
            .or_else(|| result.response().get("quests"))
            .unwrap_or(&NULL);
        parse_values(quests)
    }

    pub async fn get_daily_bonus_info(&mut self) -> Result<DailyBonusInfo, HeroApiError> {
        self.call_one("dailyBonusGetInfo", Value::Null)
            .await?
            .parse_response()
    }

    pub async fn farm_daily_bonus(&mut self, vip: u32) -> Result<Value, HeroApiError> {
        let result = self.call_one("dailyBonusFarm", json!({ "vip": vip })).await?;
        Ok(result.response().clone())
    }

    pub async fn farm_zeppelin_gift(&mut self) -> Result<Option<Reward>, HeroApiError> {
        let result = self.call_one("zeppelinGiftFarm", Value::Null).await?;
        Ok(reward_at(&result, "/response/reward"))
    }

    /// Opens artifact chests. `None` once the server reports the chests are used up.
    pub async fn open_artifact_chests(
        &mut self,
        amount: u32,
        free: bool,
    ) -> Result<Option<Vec<Reward>>, HeroApiError> {
        let result = match self
            .call_one("artifactChestOpen", json!({ "amount": amount, "free": free }))
            .await
        {
            Ok(result) => result,
            Err(error) if error.is_not_enough() => return Ok(None),
            Err(error) => return Err(error),
        };

        let chest_reward = result
            .response()
            .get("chestReward")
            .unwrap_or(&NULL);
        Ok(Some(rewards_of(chest_reward)))
    }

    pub async fn get_all_quests(&mut self) -> Result<Vec<Quest>, HeroApiError> {
        let result = self.call_one("questGetAll", Value::Null).await?;
        parse_values(result.response())
    }

    pub async fn farm_quest(&mut self, quest_id: u64) -> Result<Option<Reward>, HeroApiError> {
        let result = self
            .call_one("questFarm", json!({ "questId": quest_id }))
            .await?;
        Ok(Reward::from_value(result.response()))
    }

    pub async fn get_all_mail(&mut self) -> Result<Vec<Letter>, HeroApiError> {
        let result = self.call_one("mailGetAll", Value::Null).await?;
        let letters = result.response().get("letters").unwrap_or(&NULL);
        parse_values(letters)
    }

    /// Claims every letter in one call; one reward per letter that carried one.
    pub async fn farm_mail(&mut self, letter_ids: Vec<Value>) -> Result<Vec<Reward>, HeroApiError> {
        let result = self
            .call_one("mailFarm", json!({ "letterIds": letter_ids }))
            .await?;
        Ok(rewards_of(result.response()))
    }

    pub async fn get_expeditions(&mut self) -> Result<Vec<Expedition>, HeroApiError> {
        let result = self.call_one("expeditionGet", Value::Null).await?;
        parse_values(result.response())
    }

    pub async fn farm_expedition(
        &mut self,
        expedition_id: u64,
    ) -> Result<Option<Reward>, HeroApiError> {
        let result = self
            .call_one("expeditionFarm", json!({ "expeditionId": expedition_id }))
            .await?;
        Ok(reward_at(&result, "/response/reward"))
    }

    /// Starts an expedition; returns the quests it unlocked.
    pub async fn send_expedition(
        &mut self,
        expedition_id: u64,
        heroes: &[u64],
    ) -> Result<Vec<Quest>, HeroApiError> {
        let result = self
            .call_one(
                "expeditionSendHeroes",
                json!({ "expeditionId": expedition_id, "heroes": heroes }),
            )
            .await?;
        let quests = result.response().get("quests").unwrap_or(&NULL);
        parse_values(quests)
    }
}

/// Collection payloads arrive either as arrays or as objects keyed by id.
fn parse_values<V: DeserializeOwned>(value: &Value) -> Result<Vec<V>, HeroApiError> {
    let items: Vec<&Value> = match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        other => {
            return Err(HeroApiError::MalformedResponse(format!(
                "expected a collection, got {other}"
            )))
        }
    };
    items
        .into_iter()
        .map(|item| V::deserialize(item).map_err(HeroApiError::from))
        .collect()
}

fn reward_at(result: &CallResult, pointer: &str) -> Option<Reward> {
    result.result.pointer(pointer).and_then(Reward::from_value)
}

fn rewards_of(value: &Value) -> Vec<Reward> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    };
    items.into_iter().filter_map(Reward::from_value).collect()
}
