use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use crate::wallet::{StatsSnapshot, StatsStatus};

// Label plus the current buffer, with a cursor when the field has focus
pub fn input_line<'a>(label: &'a str, value: &'a str, focused: bool, color: Color) -> Line<'a> {
    let mut spans = vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK)));
    }
    Line::from(spans)
}

/// Short sync indicator for the stats panel title
pub fn sync_indicator(snapshot: Option<&StatsSnapshot>) -> (&'static str, Color) {
    match snapshot {
        None => ("SYNCING", Color::DarkGray),
        Some(s) if s.is_stale() => ("STALE", Color::Red),
        Some(s) if s.status == StatsStatus::Missing => ("NO DATA", Color::Yellow),
        Some(_) => ("LIVE", Color::Green),
    }
}

pub fn wrap_message(message: &str, width: u16) -> String {
    textwrap::wrap(message, width.max(1) as usize).join("\n")
}

#[cfg(test)]
mod tests {
    use crate::wallet::TipJarStats;
    use super::*;

    #[test]
    fn test_sync_indicator_reflects_status() {
        let snapshot = |status| StatsSnapshot { stats: TipJarStats::default(), status };
        assert_eq!(sync_indicator(None).0, "SYNCING");
        assert_eq!(sync_indicator(Some(&snapshot(StatsStatus::Live))).0, "LIVE");
        assert_eq!(sync_indicator(Some(&snapshot(StatsStatus::Missing))).0, "NO DATA");
        assert_eq!(sync_indicator(Some(&snapshot(StatsStatus::Failed("down".into())))).0, "STALE");
    }

    #[test]
    fn test_wrap_message_never_panics_on_zero_width() {
        assert_eq!(wrap_message("abc", 0), "a\nb\nc");
        assert_eq!(wrap_message("Tip sent successfully", 40), "Tip sent successfully");
    }
}
