use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Raised when a kind string doesn't name any known event. Callers of the
/// formatter never see it: the event degrades to a generic payload instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized event kind: {0:?}")]
pub struct UnrecognizedEventKind(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Nudge,
    Broadcast,
    Mail,
    ConvoyUpdate,
    Escalation,
    Handoff,
    Completion,
    Generic,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::Nudge,
        EventKind::Broadcast,
        EventKind::Mail,
        EventKind::ConvoyUpdate,
        EventKind::Escalation,
        EventKind::Handoff,
        EventKind::Completion,
        EventKind::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Nudge => "nudge",
            EventKind::Broadcast => "broadcast",
            EventKind::Mail => "mail",
            EventKind::ConvoyUpdate => "convoy_update",
            EventKind::Escalation => "escalation",
            EventKind::Handoff => "handoff",
            EventKind::Completion => "completion",
            EventKind::Generic => "generic",
        }
    }

    /// Embed colour of the kind.
    pub fn color(&self) -> u32 {
        match self {
            EventKind::Nudge => 0x5865F2,        // blurple
            EventKind::Broadcast => 0xFEE75C,    // yellow
            EventKind::Mail => 0x57F287,         // green
            EventKind::ConvoyUpdate => 0xEB459E, // pink
            EventKind::Escalation => 0xED4245,   // red
            EventKind::Handoff => 0x3BA55D,      // dark green
            EventKind::Completion => 0x57F287,   // green
            EventKind::Generic => 0x5865F2,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EventKind::Nudge => "💬",
            EventKind::Broadcast => "📢",
            EventKind::Mail => "📧",
            EventKind::ConvoyUpdate => "🚚",
            EventKind::Escalation => "🚨",
            EventKind::Handoff => "🤝",
            EventKind::Completion => "✅",
            EventKind::Generic => "🔔",
        }
    }

    /// Human label used in titles, before any per-event subject.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Nudge => "Agent Nudge",
            EventKind::Broadcast => "Broadcast",
            EventKind::Mail => "Mail",
            EventKind::ConvoyUpdate => "Convoy",
            EventKind::Escalation => "Escalation",
            EventKind::Handoff => "Handoff",
            EventKind::Completion => "Completed",
            EventKind::Generic => "Gas Town Event",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = UnrecognizedEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "nudge" => EventKind::Nudge,
            "broadcast" => EventKind::Broadcast,
            "mail" => EventKind::Mail,
            "convoy_update" | "convoy-update" | "convoy" => EventKind::ConvoyUpdate,
            "escalation" => EventKind::Escalation,
            "handoff" => EventKind::Handoff,
            "completion" => EventKind::Completion,
            "generic" => EventKind::Generic,
            _ => return Err(UnrecognizedEventKind(s.to_string())),
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("nudge".parse::<EventKind>(), Ok(EventKind::Nudge));
        assert_eq!(" Mail ".parse::<EventKind>(), Ok(EventKind::Mail));
        assert_eq!("convoy".parse::<EventKind>(), Ok(EventKind::ConvoyUpdate));
        assert_eq!("convoy-update".parse::<EventKind>(), Ok(EventKind::ConvoyUpdate));
        assert_eq!("CONVOY_UPDATE".parse::<EventKind>(), Ok(EventKind::ConvoyUpdate));
    }

    #[test]
    fn every_kind_parses_back_from_its_name() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_keeps_raw_string() {
        assert_eq!(
            "deploy-finished".parse::<EventKind>(),
            Err(UnrecognizedEventKind("deploy-finished".into()))
        );
    }
}
