//! One scripted farming run.
//!
//! Steps run strictly in sequence over a single [`GameApi`]. A server-reported
//! error ends the run early and is recorded in the [`RunReport`]; any other
//! error is returned to the caller.

use std::fmt;

use hero_api::{ApiError, GameApi, Hero, HeroApiError, Quest, Reward, Transport};
use time::OffsetDateTime;

use crate::expedition::ExpeditionPlan;
use crate::locale::Locale;
use crate::team::{find_team, team_power, TEAM_SIZE};

/// VIP level sent when claiming the daily bonus.
pub const DAILY_BONUS_VIP: u32 = 0;

/// Receives every reward the run collects.
pub trait RewardReporter {
    fn report(&mut self, action: &str, reward: &Reward);
}

/// Logs each reward as locale text.
#[derive(Debug, Clone, Default)]
pub struct LogReporter {
    locale: Locale,
}

impl LogReporter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl RewardReporter for LogReporter {
    fn report(&mut self, action: &str, reward: &Reward) {
        tracing::info!(action, reward = %self.locale.describe(reward), "reward collected");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedExpedition {
    pub id: u64,
    pub heroes: Vec<u64>,
    pub power: u64,
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub rewards_reported: usize,
    pub letters_claimed: usize,
    pub quests_farmed: Vec<u64>,
    pub expeditions_farmed: Vec<u64>,
    pub expeditions_started: Vec<StartedExpedition>,
    pub daily_bonus_claimed: bool,
    pub artifact_chests_opened: usize,
    /// Results in the closing state snapshot; zero when skipped.
    pub snapshot_calls: usize,
    /// Server error that ended the run early.
    pub aborted: Option<ApiError>,
}

impl RunReport {
    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rewards, {} letters, {} quests, {} expeditions farmed, {} started, daily bonus {}, {} artifact chests",
            self.rewards_reported,
            self.letters_claimed,
            self.quests_farmed.len(),
            self.expeditions_farmed.len(),
            self.expeditions_started.len(),
            if self.daily_bonus_claimed { "claimed" } else { "not claimed" },
            self.artifact_chests_opened,
        )?;
        if let Some(error) = &self.aborted {
            write!(f, " (aborted: {error})")?;
        }
        Ok(())
    }
}

fn unix_now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

pub struct Bot<T, R> {
    api: GameApi<T>,
    reporter: R,
    clock: fn() -> i64,
    snapshot: bool,
}

impl<T: Transport, R: RewardReporter> Bot<T, R> {
    pub fn new(api: GameApi<T>, reporter: R) -> Self {
        Self {
            api,
            reporter,
            clock: unix_now,
            snapshot: true,
        }
    }

    /// Replaces the unix-seconds clock used to judge expedition end times.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_snapshot(mut self, enabled: bool) -> Self {
        self.snapshot = enabled;
        self
    }

    pub fn api(&self) -> &GameApi<T> {
        &self.api
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub async fn run(&mut self) -> Result<RunReport, HeroApiError> {
        let mut report = RunReport::default();
        match self.run_steps(&mut report).await {
            Ok(()) => Ok(report),
            Err(HeroApiError::Api(error)) => {
                tracing::error!(%error, payload = %error.payload(), "run aborted by server error");
                report.aborted = Some(error);
                Ok(report)
            }
            Err(error) => Err(error),
        }
    }

    async fn run_steps(&mut self, report: &mut RunReport) -> Result<(), HeroApiError> {
        self.api.prepare(false).await?;

        self.farm_mail(report).await?;
        self.farm_quests(None, report).await?;
        self.farm_expeditions(report).await?;
        self.farm_daily_gifts(report).await?;
        self.farm_daily_bonus(report).await?;
        self.farm_valkyrie_bonus(report).await?;

        if self.snapshot {
            let snapshot = self.api.get_state().await?;
            tracing::debug!(calls = snapshot.len(), "state snapshot fetched");
            report.snapshot_calls = snapshot.len();
        }
        Ok(())
    }

    async fn farm_mail(&mut self, report: &mut RunReport) -> Result<(), HeroApiError> {
        let letters = self.api.get_all_mail().await?;
        if letters.is_empty() {
            return Ok(());
        }

        let count = letters.len();
        let ids = letters.into_iter().map(|letter| letter.id).collect();
        let rewards = self.api.farm_mail(ids).await?;
        report.letters_claimed = count;
        for reward in rewards {
            self.report("Mail reward", Some(reward), report);
        }
        Ok(())
    }

    /// Farms claimable quests from `known`, or from the full quest list when
    /// `known` is `None`. An empty known list is a no-op.
    async fn farm_quests(
        &mut self,
        known: Option<Vec<Quest>>,
        report: &mut RunReport,
    ) -> Result<(), HeroApiError> {
        let quests = match known {
            Some(quests) if quests.is_empty() => return Ok(()),
            Some(quests) => quests,
            None => self.api.get_all_quests().await?,
        };

        for quest in quests.iter().filter(|quest| quest.is_claimable()) {
            let reward = self.api.farm_quest(quest.id).await?;
            report.quests_farmed.push(quest.id);
            self.report("Quest reward", reward, report);
        }
        Ok(())
    }

    async fn farm_expeditions(&mut self, report: &mut RunReport) -> Result<(), HeroApiError> {
        let expeditions = self.api.get_expeditions().await?;
        let plan = ExpeditionPlan::partition(expeditions, (self.clock)());

        for expedition in &plan.completed {
            let reward = self.api.farm_expedition(expedition.id).await?;
            report.expeditions_farmed.push(expedition.id);
            self.report(&format!("Expedition {} reward", expedition.id), reward, report);
        }

        let mut busy = plan.busy_heroes();
        let roster = self.api.get_all_heroes().await?;

        for expedition in &plan.available {
            let pool: Vec<Hero> = roster
                .iter()
                .filter(|hero| !busy.contains(&hero.id))
                .copied()
                .collect();
            let Some(team) = find_team(&pool, expedition.power, TEAM_SIZE) else {
                tracing::debug!(
                    expedition = expedition.id,
                    required = expedition.power,
                    idle = pool.len(),
                    "no team reaches the required power"
                );
                continue;
            };

            let heroes: Vec<u64> = team.iter().map(|hero| hero.id).collect();
            busy.extend(heroes.iter().copied());

            let quests = self.api.send_expedition(expedition.id, &heroes).await?;
            self.farm_quests(Some(quests), report).await?;

            let power = team_power(&team);
            tracing::info!(expedition = expedition.id, ?heroes, power, "expedition started");
            report.expeditions_started.push(StartedExpedition {
                id: expedition.id,
                heroes,
                power,
            });
        }
        Ok(())
    }

    async fn farm_daily_gifts(&mut self, report: &mut RunReport) -> Result<(), HeroApiError> {
        let quests = self.api.send_clan_daily_gifts().await?;
        self.farm_quests(Some(quests), report).await
    }

    async fn farm_daily_bonus(&mut self, report: &mut RunReport) -> Result<(), HeroApiError> {
        let info = self.api.get_daily_bonus_info().await?;
        if info.available_today {
            self.api.farm_daily_bonus(DAILY_BONUS_VIP).await?;
            report.daily_bonus_claimed = true;
            tracing::info!("daily bonus claimed");
        }
        Ok(())
    }

    async fn farm_valkyrie_bonus(&mut self, report: &mut RunReport) -> Result<(), HeroApiError> {
        let reward = self.api.farm_zeppelin_gift().await?;
        self.report("Zeppelin reward", reward, report);

        while let Some(rewards) = self.api.open_artifact_chests(1, true).await? {
            report.artifact_chests_opened += 1;
            for reward in rewards {
                self.report("Artifact chest reward", Some(reward), report);
            }
        }
        Ok(())
    }

    fn report(&mut self, action: &str, reward: Option<Reward>, report: &mut RunReport) {
        let Some(reward) = reward.filter(|reward| !reward.is_empty()) else {
            return;
        };
        self.reporter.report(action, &reward);
        report.rewards_reported += 1;
    }
}
