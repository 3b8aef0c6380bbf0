//! Pre-scripted demo sequence for UI playback
//!
//! The steps are fixed narration with no live data and no branching; the
//! front end replays them with the given delays.

use serde::{Deserialize, Serialize};

/// Kind of terminal line a step renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Command,
    Output,
    Success,
    Warning,
    Info,
}

/// Stat-counter updates attached to a step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(rename = "timeSaved", skip_serializing_if = "Option::is_none")]
    pub time_saved: Option<u64>,
}

/// One narration step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoStep {
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub text: String,
    /// Delay before the next step, in milliseconds
    pub delay: u64,
    #[serde(rename = "updateStats", skip_serializing_if = "Option::is_none")]
    pub update_stats: Option<StatsUpdate>,
    #[serde(rename = "showCursor", skip_serializing_if = "Option::is_none")]
    pub show_cursor: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoRunResponse {
    pub steps: Vec<DemoStep>,
}

fn step(step_type: StepType, text: &str, delay: u64) -> DemoStep {
    DemoStep {
        step_type,
        text: text.to_string(),
        delay,
        update_stats: None,
        show_cursor: None,
    }
}

fn step_with_stats(step_type: StepType, text: &str, delay: u64, stats: StatsUpdate) -> DemoStep {
    DemoStep {
        update_stats: Some(stats),
        ..step(step_type, text, delay)
    }
}

/// The fixed demo narration
pub fn script() -> Vec<DemoStep> {
    use StepType::*;

    let mut steps = vec![
        step(Command, "gmail-bulk-delete", 1000),
        step(Output, "Initializing Gmail API connection...", 500),
        step(Success, "Authentication successful", 1000),
        step(Output, "", 200),
        step(Output, "Available mailboxes/labels:", 500),
        step(Output, "----------------------------------------", 200),
        step(Output, " 1. INBOX (System)", 300),
        step(Output, " 2. SENT (System)", 300),
        step(Output, " 3. DRAFT (System)", 300),
        step(Output, " 4. SPAM (System)", 300),
        step(Output, " 5. TRASH (System)", 300),
        step(Output, " 6. Work Projects (User)", 300),
        step(Output, " 7. Newsletters (User)", 300),
        step(Output, " 8. Social Media (User)", 300),
        step(Output, "", 500),
        step(Command, "Selection: 7 (Newsletters)", 1000),
        step(Success, "Selected: Newsletters", 500),
        step(Output, "", 300),
        step(Command, "Date Range: 2023-01-01 to 2024-01-01", 1000),
        step(
            Output,
            "Building search query: label:Newsletters after:2023-01-01 before:2024-01-01",
            1000,
        ),
        step(Warning, "Scanning Gmail API for matching emails...", 1500),
        step_with_stats(
            Success,
            "Found 2,847 emails matching criteria",
            1000,
            StatsUpdate {
                found: Some(2847),
                ..Default::default()
            },
        ),
        step(Warning, "Confirm deletion of 2,847 emails? [Y/n]: Y", 1000),
        step(Success, "Starting batch deletion process...", 500),
    ];

    // Progress checkpoints: batch number, deleted count, percent
    let checkpoints: &[(u64, u64, f64)] = &[
        (1, 100, 3.5),
        (5, 500, 17.6),
        (10, 1000, 35.1),
        (15, 1500, 52.7),
        (20, 2000, 70.2),
        (25, 2500, 87.8),
        (29, 2847, 100.0),
    ];

    for &(batch, deleted, progress) in checkpoints {
        steps.push(step_with_stats(
            Success,
            &format!(
                "Batch {}: Deleted {}/2847 emails ({}%)",
                batch, deleted, progress
            ),
            800,
            StatsUpdate {
                deleted: Some(deleted),
                progress: Some(progress),
                ..Default::default()
            },
        ));
    }

    steps.extend([
        step(Output, "", 500),
        step_with_stats(
            Success,
            "OPERATION COMPLETED SUCCESSFULLY",
            1000,
            StatsUpdate {
                time_saved: Some(95),
                ..Default::default()
            },
        ),
        step(Output, "", 300),
        step(Info, "Performance Summary:", 500),
        step(Info, "- Total emails deleted: 2,847", 300),
        step(Info, "- Time saved vs manual: ~95 minutes", 300),
        step(Info, "- API batches used: 29 (vs 57 manual)", 300),
        step(Success, "- Efficiency improvement: 49% faster", 500),
        DemoStep {
            show_cursor: Some(true),
            ..step(Command, "", 1000)
        },
    ]);

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_shape() {
        let steps = script();
        assert!(steps.len() > 30);
        assert_eq!(steps.first().unwrap().step_type, StepType::Command);
        assert_eq!(steps.last().unwrap().show_cursor, Some(true));
    }

    #[test]
    fn test_script_is_stable() {
        // The script is canned; two invocations must be identical
        let a = serde_json::to_value(script()).unwrap();
        let b = serde_json::to_value(script()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_step_serialization() {
        let steps = script();
        let json = serde_json::to_value(&steps[0]).unwrap();
        assert_eq!(json["type"], "command");
        assert_eq!(json["delay"], 1000);
        assert!(json.get("updateStats").is_none());

        let found_step = steps
            .iter()
            .find(|s| s.update_stats.as_ref().is_some_and(|u| u.found.is_some()))
            .unwrap();
        let json = serde_json::to_value(found_step).unwrap();
        assert_eq!(json["updateStats"]["found"], 2847);
    }

    #[test]
    fn test_final_checkpoint_reaches_total() {
        let steps = script();
        let last_progress = steps
            .iter()
            .filter_map(|s| s.update_stats.as_ref().and_then(|u| u.progress))
            .last()
            .unwrap();
        assert_eq!(last_progress, 100.0);
    }
}
