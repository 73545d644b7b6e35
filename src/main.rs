use anyhow::{anyhow, Context, Result};
use hero_api::{AuditLog, GameApi, HttpTransport, RpcClient, SessionStore};
use hero_farm::logging::init_logging;
use hero_farm::{Bot, EnvConfig, Locale, LogReporter};
use time::OffsetDateTime;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_logging().map_err(|error| anyhow!("failed to install logging: {error}"))?;

    let config = EnvConfig::from_env();
    let started_at = OffsetDateTime::now_utc();

    let locale = match &config.locale_file {
        Some(path) => Locale::load(path)?,
        None => Locale::empty(),
    };
    let api_config = config.to_api_config();
    let transport = HttpTransport::new(&api_config).context("failed to build HTTP client")?;
    let store = SessionStore::new(&config.session_file);
    let audit = AuditLog::for_run(&config.log_dir, started_at)
        .context("failed to name the audit log")?;
    tracing::info!(audit_log = %audit.path().display(), "starting run");

    let api = GameApi::new(RpcClient::new(transport, api_config, store, audit));
    let mut bot = Bot::new(api, LogReporter::new(locale)).with_snapshot(!config.skip_snapshot);

    let report = bot.run().await.context("run failed")?;
    println!("{report}");
    Ok(())
}
