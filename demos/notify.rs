//! Posts one sample nudge to a rig channel, creating the channel if needed.
//!
//! Needs `DISCORD_TOKEN` and `DISCORD_GUILD_ID`; `CHANNEL_MAPPINGS_FILE` is
//! optional. `cargo run --example notify`

use std::sync::Arc;

use gastown_discord::events::Nudge;
use gastown_discord::{AppError, ChannelRegistry, Config, Event, NotificationFormatter, RigNotifier, logging};
use serenity::http::Http;
use tracing::info;

const RIG: &str = "discord_bot";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    logging::init();

    let config = Config::from_env()?;
    let http = Arc::new(Http::new(&config.discord_token));

    let registry = ChannelRegistry::load(http, config.guild_id, &config.mappings_file).await?;
    let notifier = RigNotifier::new(registry, NotificationFormatter::new());

    let event = Event::Nudge(Nudge {
        from: "discord_bot/crew/notify".into(),
        to: "mayor/".into(),
        message: "Notifier wired up and reporting in.".into(),
        rig: Some(RIG.into()),
    });
    let channel_id = notifier.notify(RIG, &event).await?;
    info!(rig = RIG, channel_id = %channel_id, "📨 Notification delivered");

    for (rig, channel_id) in notifier.registry().lock().await.list_mappings() {
        info!(rig = %rig, channel_id = %channel_id, "🗂️ Mapping");
    }

    Ok(())
}
