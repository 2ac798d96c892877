//! Prints the payload of every event kind as JSON.
//!
//! `cargo run --example showcase`

use gastown_discord::{Attributes, format_event, logging};
use serde_json::{Value, json};

fn samples() -> Vec<(&'static str, Value)> {
    vec![
        (
            "nudge",
            json!({
                "from": "discord_bot/crew/core",
                "to": "discord_bot/crew/notify",
                "message": "Formatter module looks good! Proceeding with MCP integration.",
                "rig": "discord_bot"
            }),
        ),
        (
            "broadcast",
            json!({
                "from": "mayor/",
                "message": "🎉 Discord notification system is now live!",
                "scope": "all"
            }),
        ),
        (
            "mail",
            json!({
                "from": "discord_bot/crew/notify",
                "to": "--human",
                "subject": "Notification Formatter Complete",
                "message": "Ready for core crew to integrate into the MCP server.",
                "mail_id": "hq-abc123",
                "priority": "normal"
            }),
        ),
        (
            "convoy_update",
            json!({
                "convoy_id": "db-conv-001",
                "convoy_name": "Discord Integration Sprint",
                "status": "in_progress",
                "message": "Formatter complete, MCP server next.",
                "completed": 2,
                "total": 5,
                "rig": "discord_bot"
            }),
        ),
        (
            "escalation",
            json!({
                "from": "discord_bot/witness",
                "issue": "Polecat completely stuck",
                "severity": "critical",
                "details": "Polecat alpha-3 has been idle for 15 minutes with no progress.",
                "bead_id": "db-789",
                "rig": "discord_bot"
            }),
        ),
        (
            "handoff",
            json!({
                "from": "discord_bot/crew/notify",
                "subject": "Context cycling - formatter complete",
                "message": "Next session should focus on integration tests.",
                "hooked_work": "db-d6o",
                "rig": "discord_bot"
            }),
        ),
        (
            "completion",
            json!({
                "agent": "discord_bot/crew/notify",
                "bead_id": "db-d6o",
                "bead_title": "Notification System Integration - Formatter Module",
                "summary": "Created the formatter with support for all Gas Town event types.",
                "rig": "discord_bot"
            }),
        ),
        (
            "generic",
            json!({
                "title": "🔧 System Event",
                "message": "A custom event occurred that doesn't fit other categories.",
                "fields": [
                    { "name": "Status", "value": "Operational", "inline": true },
                    { "name": "Component", "value": "Discord Bot", "inline": true }
                ],
                "rig": "discord_bot"
            }),
        ),
        (
            "deploy_finished",
            json!({ "message": "Unknown kinds still render." }),
        ),
    ]
}

fn main() -> Result<(), serde_json::Error> {
    logging::init();

    for (kind, attrs) in samples() {
        let attrs: Attributes = serde_json::from_value(attrs)?;
        let payload = format_event(kind, &attrs);

        println!("{}", "=".repeat(60));
        println!("Example: {kind}");
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }

    Ok(())
}
