//! Plain-text report rendering
//!
//! The report is what the monitor persists and serves on `/saida`. Output
//! is a pure function of the history snapshot and the last known good log.

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::event::{EventKind, HistoryEvent};
use crate::history::DEFAULT_RETENTION;

/// Placeholder shown until some log passes validation
pub const NO_VALID_LOG: &str = "Nenhum log válido recebido ainda";

const RULE_WIDTH: usize = 50;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the report for the default 24 hour window
pub fn render(history: &[HistoryEvent], last_known_good: Option<&str>) -> String {
    render_with_window(history, last_known_good, DEFAULT_RETENTION)
}

/// Renders the report, naming `window` in the header
pub fn render_with_window(
    history: &[HistoryEvent],
    last_known_good: Option<&str>,
    window: TimeDelta,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        format!("Estado do log nas últimas {} horas:", window.num_hours()),
        rule.clone(),
    ];

    for event in history {
        render_event(event, &mut lines);
    }

    lines.push(rule.clone());
    lines.push("Estado atual do log:".to_string());
    lines.push(
        last_known_good
            .filter(|content| !content.is_empty())
            .unwrap_or(NO_VALID_LOG)
            .to_string(),
    );
    lines.push(rule);

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn render_event(event: &HistoryEvent, lines: &mut Vec<String>) {
    let stamp = format_timestamp(event.timestamp);
    let status = format!("[{}] {}", stamp, event.message);

    match event.kind {
        EventKind::FetchFailed | EventKind::Validation { .. } => lines.push(status),
        EventKind::ExtractionFallback => {
            lines.push(status);
            if !event.content.is_empty() {
                lines.push(format!("Estado do log {}:", stamp));
                lines.push(event.content.clone());
            }
        }
        EventKind::RejectedContent => {
            if !event.content.is_empty() {
                lines.push(format!("Estado do log {}:", stamp));
                lines.push(event.content.clone());
            }
            lines.push(status);
            lines.push("-".repeat(RULE_WIDTH));
        }
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::ValidationResult;
    use crate::error::ValidationError;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_history_layout() {
        let report = render(&[], None);
        let rule = "=".repeat(50);

        assert_eq!(
            report,
            format!(
                "Estado do log nas últimas 24 horas:\n{rule}\n{rule}\nEstado atual do log:\n{}\n{rule}\n",
                NO_VALID_LOG
            )
        );
    }

    #[test]
    fn test_event_lines_by_kind() {
        let history = vec![
            HistoryEvent::fetch_failed(at(1), "timed out"),
            HistoryEvent::extraction_fallback(at(2), "raw"),
            HistoryEvent::validation(at(2), &ValidationResult::Valid),
            HistoryEvent::validation(
                at(3),
                &ValidationResult::Invalid(ValidationError::LineCount(3)),
            ),
            HistoryEvent::rejected_content(at(3), "bad"),
        ];

        let report = render(&history, Some("good log"));
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(
            &lines[2..13],
            &[
                "[2024-01-01 01:00:00] failed to fetch log: timed out",
                "[2024-01-01 02:00:00] <pre> tag not found, using raw content",
                "Estado do log 2024-01-01 02:00:00:",
                "raw",
                "[2024-01-01 02:00:00] log valid",
                "[2024-01-01 03:00:00] incorrect line count: 3",
                "Estado do log 2024-01-01 03:00:00:",
                "bad",
                "[2024-01-01 03:00:00] processed content rejected",
                "--------------------------------------------------",
                "==================================================",
            ]
        );
        assert_eq!(lines[13], "Estado atual do log:");
        assert_eq!(lines[14], "good log");
        assert!(report.ends_with("==================================================\n"));
    }

    #[test]
    fn test_status_message_is_never_duplicated() {
        // Messages that look like other event kinds must not change routing
        let mut event = HistoryEvent::validation(at(4), &ValidationResult::Valid);
        event.message = "<pre> tag not found, using raw content".to_string();

        let report = render(&[event], None);
        assert_eq!(report.matches("<pre> tag not found").count(), 1);
        assert!(!report.contains("Estado do log 2024"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let history = vec![
            HistoryEvent::extraction_fallback(at(5), "payload"),
            HistoryEvent::rejected_content(at(5), "payload"),
        ];

        assert_eq!(
            render(&history, Some("X")),
            render(&history.clone(), Some("X"))
        );
    }

    #[test]
    fn test_window_header() {
        let report = render_with_window(&[], None, TimeDelta::hours(6));
        assert!(report.starts_with("Estado do log nas últimas 6 horas:\n"));
    }

    #[test]
    fn test_empty_last_known_good_uses_placeholder() {
        assert!(render(&[], Some("")).contains(NO_VALID_LOG));
    }

    #[test]
    fn test_empty_rejected_payload_has_no_dump() {
        let history = vec![HistoryEvent::rejected_content(at(1), "")];

        let report = render(&history, None);

        assert!(!report.contains("Estado do log 2024"));
        assert!(report.contains("[2024-01-01 01:00:00] processed content rejected\n"));
        assert!(report.contains(&"-".repeat(50)));
    }
}
