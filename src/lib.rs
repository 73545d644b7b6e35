//! Scripted farming runs against the Hero Wars web API.
//!
//! [`bot::Bot`] drives one run over a [`hero_api::GameApi`]: mail, quests,
//! expeditions, clan gifts, the daily bonus and the valkyrie bonus, in that
//! order. Expedition teams come from [`team::find_team`].

pub mod bot;
pub mod config;
pub mod expedition;
pub mod locale;
pub mod logging;
pub mod team;

pub use bot::{Bot, LogReporter, RewardReporter, RunReport, StartedExpedition};
pub use config::EnvConfig;
pub use expedition::ExpeditionPlan;
pub use locale::{Locale, LocaleError};
pub use team::{find_team, TEAM_SIZE};
