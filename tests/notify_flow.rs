use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gastown_discord::events::{Mail, Nudge};
use gastown_discord::formatter::FixedClock;
use gastown_discord::{
    AppError, Attributes, ChannelRegistry, ChatPlatform, Event, NotificationFormatter, RigNotifier,
};
use serde_json::{Value, json};
use serenity::builder::CreateMessage;
use serenity::model::Timestamp;
use serenity::model::id::{ChannelId, GuildId};

#[derive(Default)]
struct RecordingPlatform {
    created: Mutex<Vec<String>>,
    sent: Mutex<Vec<(ChannelId, Value)>>,
    next_id: AtomicU64,
    fail_send: AtomicBool,
}

#[async_trait]
impl ChatPlatform for RecordingPlatform {
    async fn create_text_channel(
        &self,
        _guild_id: GuildId,
        name: &str,
        _topic: &str,
    ) -> serenity::Result<ChannelId> {
        // Widen the race window between concurrent callers.
        tokio::task::yield_now().await;
        self.created.lock().unwrap().push(name.to_string());
        Ok(ChannelId::new(500 + self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn delete_channel(&self, _channel_id: ChannelId) -> serenity::Result<()> {
        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        msg: CreateMessage,
    ) -> serenity::Result<()> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(serenity::Error::Other("send failed"));
        }
        let data = serde_json::to_value(&msg).unwrap();
        self.sent.lock().unwrap().push((channel_id, data));
        Ok(())
    }
}

impl RecordingPlatform {
    /// Messages carrying an embed, i.e. everything except channel introductions.
    fn embeds(&self) -> Vec<(ChannelId, Value)> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(id, msg)| {
                let embed = msg["embeds"].get(0)?.clone();
                Some((*id, embed))
            })
            .collect()
    }
}

async fn notifier(
    dir: &tempfile::TempDir,
) -> (
    RigNotifier<Arc<RecordingPlatform>, FixedClock>,
    Arc<RecordingPlatform>,
) {
    let platform = Arc::new(RecordingPlatform::default());
    let registry = ChannelRegistry::load(
        platform.clone(),
        GuildId::new(7),
        dir.path().join("channel_mappings.json"),
    )
    .await
    .unwrap();
    let clock = FixedClock(Timestamp::from_unix_timestamp(1_767_225_600).unwrap());
    (
        RigNotifier::new(registry, NotificationFormatter::with_clock(clock)),
        platform,
    )
}

fn attrs(value: Value) -> Attributes {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn event_reaches_newly_created_rig_channel() {
    let dir = tempfile::tempdir().unwrap();
    let (notifier, platform) = notifier(&dir).await;

    let event = Event::Nudge(Nudge {
        from: "discord_bot/crew/core".into(),
        to: "discord_bot/crew/notify".into(),
        message: "Check your hook".into(),
        rig: Some("discord_bot".into()),
    });
    let channel_id = notifier.notify("discord_bot", &event).await.unwrap();

    assert_eq!(*platform.created.lock().unwrap(), ["gt-discord-bot"]);
    let embeds = platform.embeds();
    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0].0, channel_id);
    assert_eq!(embeds[0].1["title"], "💬 Agent Nudge");
    assert_eq!(embeds[0].1["description"], "Check your hook");
}

#[tokio::test]
async fn raw_convoy_update_renders_progress() {
    let dir = tempfile::tempdir().unwrap();
    let (notifier, platform) = notifier(&dir).await;

    notifier
        .notify_raw(
            "gastown",
            "convoy-update",
            &attrs(json!({ "convoy_name": "Sprint", "progress": "3/10" })),
        )
        .await
        .unwrap();

    let embeds = platform.embeds();
    assert_eq!(embeds[0].1["color"], 0xEB459E);
    let progress = embeds[0].1["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "Progress")
        .unwrap();
    assert!(progress["value"].as_str().unwrap().contains("3/10"));
}

#[tokio::test]
async fn concurrent_notifications_create_one_channel() {
    let dir = tempfile::tempdir().unwrap();
    let (notifier, platform) = notifier(&dir).await;
    let notifier = Arc::new(notifier);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let notifier = notifier.clone();
            tokio::spawn(async move {
                notifier
                    .notify_text("fresh_rig", &format!("message {i}"))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }

    assert_eq!(platform.created.lock().unwrap().len(), 1);
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn text_notification_is_prefixed_with_rig() {
    let dir = tempfile::tempdir().unwrap();
    let (notifier, platform) = notifier(&dir).await;

    notifier.notify_text("gastown", "hello seer").await.unwrap();

    let sent = platform.sent.lock().unwrap();
    let last = &sent.last().unwrap().1;
    assert_eq!(last["content"], "[gastown] hello seer");
}

#[tokio::test]
async fn send_failure_is_surfaced_but_channel_stays_mapped() {
    let dir = tempfile::tempdir().unwrap();
    let (notifier, platform) = notifier(&dir).await;
    platform.fail_send.store(true, Ordering::SeqCst);

    let event = Event::Mail(Mail {
        from: "mayor/".into(),
        to: "--human".into(),
        subject: Some("Status".into()),
        message: "All good".into(),
        mail_id: None,
        priority: None,
        rig: None,
    });
    let err = notifier.notify("gastown", &event).await.unwrap_err();

    assert!(matches!(err, AppError::Discord(_)));
    assert!(notifier.registry().lock().await.channel_id("gastown").is_some());
}

#[tokio::test]
async fn deleted_rig_gets_a_fresh_channel() {
    let dir = tempfile::tempdir().unwrap();
    let (notifier, platform) = notifier(&dir).await;

    let first = notifier.notify_text("gastown", "one").await.unwrap();
    assert!(notifier.registry().lock().await.delete("gastown").await.unwrap());
    let second = notifier.notify_text("gastown", "two").await.unwrap();

    assert_ne!(first, second);
    assert_eq!(platform.created.lock().unwrap().len(), 2);
}
