//! Gas Town events as handed to the notifier.
//!
//! Events come either fully typed from Rust callers or as a kind string plus an
//! attribute bag (the shape the bot dispatcher receives). Parsing is lenient:
//! missing attributes become placeholders and unknown kinds become
//! [`Event::Generic`] carrying the raw kind string.

mod attributes;
mod kind;

pub use attributes::{Attributes, AttributesExt};
pub use kind::{EventKind, UnrecognizedEventKind};

use crate::formatter::DisplayField;

/// Placeholder for missing agent or identifier attributes.
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Nudge(Nudge),
    Broadcast(Broadcast),
    Mail(Mail),
    ConvoyUpdate(ConvoyUpdate),
    Escalation(Escalation),
    Handoff(Handoff),
    Completion(Completion),
    Generic(Generic),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nudge {
    pub from: String,
    pub to: String,
    pub message: String,
    pub rig: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcast {
    pub from: String,
    pub message: String,
    /// `workers`, `all`, or a specific rig.
    pub scope: String,
    pub rig: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub from: String,
    pub to: String,
    pub subject: Option<String>,
    pub message: String,
    pub mail_id: Option<String>,
    pub priority: Option<String>,
    pub rig: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvoyUpdate {
    pub convoy_id: String,
    pub convoy_name: String,
    pub status: String,
    pub message: String,
    pub progress: Option<Progress>,
    pub rig: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Counts { completed: u64, total: u64 },
    /// Progress text that isn't `completed/total`, shown as given.
    Raw(String),
}

impl Progress {
    /// Parses `"3/10"` into counts, keeping anything else verbatim.
    pub fn parse(raw: &str) -> Self {
        let counts = raw.split_once('/').and_then(|(completed, total)| {
            Some((
                completed.trim().parse().ok()?,
                total.trim().parse().ok()?,
            ))
        });

        match counts {
            Some((completed, total)) => Progress::Counts { completed, total },
            None => Progress::Raw(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escalation {
    pub from: String,
    pub issue: String,
    pub severity: Option<String>,
    pub details: String,
    pub bead_id: Option<String>,
    pub rig: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub from: String,
    pub subject: String,
    pub message: String,
    pub hooked_work: Option<String>,
    pub previous_session: Option<String>,
    pub next_session: Option<String>,
    pub rig: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub agent: String,
    pub bead_id: String,
    pub bead_title: String,
    pub summary: String,
    pub rig: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Generic {
    pub title: Option<String>,
    pub message: String,
    pub fields: Vec<DisplayField>,
    pub rig: Option<String>,
    /// Set when the event was parsed from a kind string nobody recognized.
    pub unrecognized_kind: Option<String>,
}

impl Event {
    /// Builds an event from a kind string and its attributes. Never fails.
    pub fn from_attributes(kind: &str, attrs: &Attributes) -> Self {
        match kind.parse::<EventKind>() {
            Ok(kind) => Self::parse_known(kind, attrs),
            Err(UnrecognizedEventKind(raw)) => Event::Generic(Generic {
                unrecognized_kind: Some(raw),
                ..generic(attrs)
            }),
        }
    }

    fn parse_known(kind: EventKind, attrs: &Attributes) -> Self {
        let rig = attrs.text("rig");
        let from = || attrs.text_any(&["from", "from_agent"]).unwrap_or_else(unknown);
        let message = || attrs.text("message").unwrap_or_default();

        match kind {
            EventKind::Nudge => Event::Nudge(Nudge {
                from: from(),
                to: attrs.text_any(&["to", "to_agent"]).unwrap_or_else(unknown),
                message: message(),
                rig,
            }),
            EventKind::Broadcast => Event::Broadcast(Broadcast {
                from: from(),
                message: message(),
                scope: attrs
                    .text_any(&["scope", "target_scope"])
                    .unwrap_or_else(|| "workers".into()),
                rig,
            }),
            EventKind::Mail => Event::Mail(Mail {
                from: from(),
                to: attrs.text_any(&["to", "to_agent"]).unwrap_or_else(unknown),
                subject: attrs.text("subject"),
                message: message(),
                mail_id: attrs.text("mail_id"),
                priority: attrs.text("priority"),
                rig,
            }),
            EventKind::ConvoyUpdate => Event::ConvoyUpdate(ConvoyUpdate {
                convoy_id: attrs.text("convoy_id").unwrap_or_else(unknown),
                convoy_name: attrs
                    .text_any(&["convoy_name", "convoy_id"])
                    .unwrap_or_else(unknown),
                status: attrs.text("status").unwrap_or_else(unknown),
                message: message(),
                progress: convoy_progress(attrs),
                rig,
            }),
            EventKind::Escalation => Event::Escalation(Escalation {
                from: from(),
                issue: attrs
                    .text_any(&["issue", "subject"])
                    .unwrap_or_else(|| "Unspecified issue".into()),
                severity: attrs.text("severity"),
                details: attrs.text_any(&["details", "message"]).unwrap_or_default(),
                bead_id: attrs.text("bead_id"),
                rig,
            }),
            EventKind::Handoff => Event::Handoff(Handoff {
                from: from(),
                subject: attrs
                    .text("subject")
                    .unwrap_or_else(|| "Session handoff".into()),
                message: message(),
                hooked_work: attrs.text("hooked_work"),
                previous_session: attrs.text_any(&["previous_session", "prior_session"]),
                next_session: attrs.text("next_session"),
                rig,
            }),
            EventKind::Completion => Event::Completion(Completion {
                agent: attrs.text_any(&["agent", "from"]).unwrap_or_else(unknown),
                bead_id: attrs.text("bead_id").unwrap_or_else(unknown),
                bead_title: attrs
                    .text_any(&["bead_title", "bead_id"])
                    .unwrap_or_else(unknown),
                summary: attrs.text_any(&["summary", "message"]).unwrap_or_default(),
                rig,
            }),
            EventKind::Generic => Event::Generic(generic(attrs)),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Nudge(_) => EventKind::Nudge,
            Event::Broadcast(_) => EventKind::Broadcast,
            Event::Mail(_) => EventKind::Mail,
            Event::ConvoyUpdate(_) => EventKind::ConvoyUpdate,
            Event::Escalation(_) => EventKind::Escalation,
            Event::Handoff(_) => EventKind::Handoff,
            Event::Completion(_) => EventKind::Completion,
            Event::Generic(_) => EventKind::Generic,
        }
    }

    pub fn rig(&self) -> Option<&str> {
        match self {
            Event::Nudge(e) => e.rig.as_deref(),
            Event::Broadcast(e) => e.rig.as_deref(),
            Event::Mail(e) => e.rig.as_deref(),
            Event::ConvoyUpdate(e) => e.rig.as_deref(),
            Event::Escalation(e) => e.rig.as_deref(),
            Event::Handoff(e) => e.rig.as_deref(),
            Event::Completion(e) => e.rig.as_deref(),
            Event::Generic(e) => e.rig.as_deref(),
        }
    }
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

fn generic(attrs: &Attributes) -> Generic {
    Generic {
        title: attrs.text("title"),
        message: attrs.text("message").unwrap_or_default(),
        fields: attrs.display_fields("fields"),
        rig: attrs.text("rig"),
        unrecognized_kind: None,
    }
}

fn convoy_progress(attrs: &Attributes) -> Option<Progress> {
    if let (Some(completed), Some(total)) = (attrs.count("completed"), attrs.count("total")) {
        return Some(Progress::Counts { completed, total });
    }
    attrs.text("progress").map(|raw| Progress::parse(&raw))
}
