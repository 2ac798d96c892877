//! Turns Gas Town events into Discord embed payloads.

mod clock;
mod payload;

pub use clock::{Clock, FixedClock, SystemClock};
pub use payload::{DisplayField, DisplayPayload};

use payload::{DESCRIPTION_LIMIT, truncate_chars};

use crate::events::{
    Attributes, Broadcast, Completion, ConvoyUpdate, Escalation, Event, EventKind, Generic,
    Handoff, Mail, Nudge, Progress,
};

const PROGRESS_BAR_LENGTH: u64 = 10;

/// Stateless apart from its clock; safe to share between tasks.
#[derive(Debug, Clone, Default)]
pub struct NotificationFormatter<C = SystemClock> {
    clock: C,
}

impl NotificationFormatter<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> NotificationFormatter<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Formats a kind string and its attributes. Unknown kinds fall back to a
    /// generic payload mentioning the kind, so this never fails.
    pub fn format(&self, kind: &str, attrs: &Attributes) -> DisplayPayload {
        self.format_event(&Event::from_attributes(kind, attrs))
    }

    pub fn format_event(&self, event: &Event) -> DisplayPayload {
        let kind = event.kind();
        let Rendered {
            title,
            description,
            fields,
            footer,
        } = match event {
            Event::Nudge(e) => nudge(e),
            Event::Broadcast(e) => broadcast(e),
            Event::Mail(e) => mail(e),
            Event::ConvoyUpdate(e) => convoy_update(e),
            Event::Escalation(e) => escalation(e),
            Event::Handoff(e) => handoff(e),
            Event::Completion(e) => completion(e),
            Event::Generic(e) => generic(e),
        };

        DisplayPayload::new(
            title,
            description,
            kind.color(),
            fields,
            footer,
            self.clock.now(),
        )
    }
}

/// Formats with the system clock.
pub fn format_event(kind: &str, attrs: &Attributes) -> DisplayPayload {
    NotificationFormatter::new().format(kind, attrs)
}

struct Rendered {
    title: String,
    description: String,
    fields: Vec<DisplayField>,
    footer: Option<String>,
}

fn title(kind: EventKind, subject: Option<&str>) -> String {
    match subject {
        Some(subject) => format!("{} {}: {}", kind.icon(), kind.label(), subject),
        None => format!("{} {}", kind.icon(), kind.label()),
    }
}

fn code(value: &str) -> String {
    format!("`{value}`")
}

fn rig_footer(rig: Option<&str>, fallback: &str) -> Option<String> {
    Some(
        rig.map(|rig| format!("Rig: {rig}"))
            .unwrap_or_else(|| fallback.to_string()),
    )
}

fn nudge(e: &Nudge) -> Rendered {
    Rendered {
        title: title(EventKind::Nudge, None),
        description: e.message.clone(),
        fields: vec![
            DisplayField::new("From", code(&e.from), true),
            DisplayField::new("To", code(&e.to), true),
        ],
        footer: rig_footer(e.rig.as_deref(), "Gas Town"),
    }
}

fn broadcast(e: &Broadcast) -> Rendered {
    let scope = match e.scope.as_str() {
        "workers" => "All Workers",
        "all" => "All Agents (including infrastructure)",
        other => other,
    };

    Rendered {
        title: title(EventKind::Broadcast, None),
        description: e.message.clone(),
        fields: vec![
            DisplayField::new("From", code(&e.from), true),
            DisplayField::new("Scope", scope, true),
        ],
        footer: rig_footer(e.rig.as_deref(), "Town-wide"),
    }
}

fn mail(e: &Mail) -> Rendered {
    let mut fields = vec![
        DisplayField::new("From", code(&e.from), true),
        DisplayField::new("To", code(&e.to), true),
    ];
    if let Some(priority) = &e.priority {
        fields.push(DisplayField::new("Priority", priority, true));
    }
    if let Some(mail_id) = &e.mail_id {
        fields.push(DisplayField::new("Mail ID", code(mail_id), false));
    }

    // The subject is the title; with no subject the generic label is used.
    let heading = match &e.subject {
        Some(subject) => format!("{} {}", EventKind::Mail.icon(), subject),
        None => title(EventKind::Mail, None),
    };
    let description = if e.message.is_empty() {
        e.subject.clone().unwrap_or_default()
    } else {
        e.message.clone()
    };

    Rendered {
        title: heading,
        description,
        fields,
        footer: e.rig.as_deref().map(|rig| format!("Rig: {rig}")),
    }
}

fn convoy_update(e: &ConvoyUpdate) -> Rendered {
    let mut fields = vec![
        DisplayField::new("Convoy ID", code(&e.convoy_id), true),
        DisplayField::new("Status", &e.status, true),
    ];
    if let Some(progress) = &e.progress {
        fields.push(DisplayField::new("Progress", render_progress(progress), false));
    }

    Rendered {
        title: title(EventKind::ConvoyUpdate, Some(&e.convoy_name)),
        description: e.message.clone(),
        fields,
        footer: rig_footer(e.rig.as_deref(), "Gas Town"),
    }
}

fn render_progress(progress: &Progress) -> String {
    match progress {
        Progress::Counts { completed, total } => {
            // Widened so any pair of u64 counts fits.
            let percentage = if *total > 0 {
                u128::from(*completed) * 100 / u128::from(*total)
            } else {
                0
            };
            format!(
                "{} {completed}/{total} ({percentage}%)",
                progress_bar(percentage)
            )
        }
        Progress::Raw(raw) => raw.clone(),
    }
}

fn progress_bar(percentage: u128) -> String {
    let filled = (percentage.min(100) as u64 * PROGRESS_BAR_LENGTH / 100) as usize;
    let empty = PROGRESS_BAR_LENGTH as usize - filled;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

fn severity(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or("unknown");
    let emoji = match raw.to_lowercase().as_str() {
        "low" => "ℹ️",
        "medium" => "⚠️",
        "high" => "🔴",
        "critical" => "🚨",
        _ => "⚠️",
    };
    format!("{emoji} {}", raw.to_uppercase())
}

fn escalation(e: &Escalation) -> Rendered {
    let mut fields = vec![
        DisplayField::new("From", code(&e.from), true),
        DisplayField::new("Severity", severity(e.severity.as_deref()), true),
    ];
    if let Some(bead_id) = &e.bead_id {
        fields.push(DisplayField::new("Related Bead", code(bead_id), false));
    }

    Rendered {
        title: title(EventKind::Escalation, Some(&e.issue)),
        description: e.details.clone(),
        fields,
        footer: rig_footer(e.rig.as_deref(), "Gas Town"),
    }
}

fn handoff(e: &Handoff) -> Rendered {
    let mut fields = vec![DisplayField::new("From", code(&e.from), true)];
    let optional = [
        ("Hooked Work", &e.hooked_work),
        ("Previous Session", &e.previous_session),
        ("Next Session", &e.next_session),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            fields.push(DisplayField::new(name, code(value), true));
        }
    }

    Rendered {
        title: title(EventKind::Handoff, Some(&e.subject)),
        description: e.message.clone(),
        fields,
        footer: rig_footer(e.rig.as_deref(), "Gas Town"),
    }
}

fn completion(e: &Completion) -> Rendered {
    Rendered {
        title: title(EventKind::Completion, Some(&e.bead_title)),
        description: e.summary.clone(),
        fields: vec![
            DisplayField::new("Agent", code(&e.agent), true),
            DisplayField::new("Bead ID", code(&e.bead_id), true),
        ],
        footer: rig_footer(e.rig.as_deref(), "Gas Town"),
    }
}

fn generic(e: &Generic) -> Rendered {
    let description = match &e.unrecognized_kind {
        Some(kind) => {
            // The message gives way so the kind note survives clamping.
            let note = format!("Unrecognized event kind: `{kind}`");
            let room = DESCRIPTION_LIMIT.saturating_sub(note.chars().count() + 2);
            let message = truncate_chars(&e.message, room);
            if message.is_empty() {
                note
            } else {
                format!("{message}\n\n{note}")
            }
        }
        None => e.message.clone(),
    };

    Rendered {
        title: e
            .title
            .clone()
            .unwrap_or_else(|| title(EventKind::Generic, None)),
        description,
        fields: e.fields.clone(),
        footer: e.rig.as_deref().map(|rig| format!("Rig: {rig}")),
    }
}
