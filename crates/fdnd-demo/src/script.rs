//! Textual gesture scripts.
//!
//! A script is a whitespace separated list of steps run against a
//! [`ReorderApp`] through its control panel:
//!
//! | Step | Effect |
//! |------|--------|
//! | `select:ID` | choose the item the next lift targets |
//! | `lift` / `lift:ID` | press lift (optionally selecting first) |
//! | `up` `down` `left` `right` | press an arrow |
//! | `drop` | press drop |
//! | `cancel` | cancel whatever gesture is running |
//!
//! Example: `lift:B up drop`.

use std::path::PathBuf;

use clap::Args;
use fdnd_controls::ReorderApp;
use fdnd_core::{DndConfig, Direction, DropReason, DropResult, MoveOutcome};
use serde::Serialize;
use tracing::info;

use crate::error::{DemoError, Result};

#[derive(Debug, Clone, Args)]
pub struct ScriptArgs {
    /// Gesture steps, e.g. `lift:B up drop`.
    #[arg(required = true, num_args = 1..)]
    pub steps: Vec<String>,

    /// Comma separated item ids.
    #[arg(long, default_value = "A,B,C", value_delimiter = ',')]
    pub items: Vec<String>,

    /// TOML context configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Select(String),
    Lift(Option<String>),
    Move(Direction),
    Drop,
    Cancel,
}

impl Step {
    pub fn parse(index: usize, token: &str) -> Result<Self> {
        let (name, arg) = match token.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (token, None),
        };
        let arg = match arg {
            Some("") => return Err(DemoError::script(index, token, "empty item id")),
            other => other.map(str::to_string),
        };
        let step = match (name.to_ascii_lowercase().as_str(), arg) {
            ("select", Some(id)) => Self::Select(id),
            ("select", None) => return Err(DemoError::script(index, token, "select needs an id")),
            ("lift", id) => Self::Lift(id),
            ("drop", None) => Self::Drop,
            ("cancel", None) => Self::Cancel,
            (other, None) => match other.parse::<Direction>() {
                Ok(direction) => Self::Move(direction),
                Err(message) => return Err(DemoError::script(index, token, message)),
            },
            (_, Some(_)) => {
                return Err(DemoError::script(index, token, "step takes no argument"));
            }
        };
        Ok(step)
    }
}

/// Parse a whole script, failing on the first bad step.
pub fn parse_script<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Step>> {
    tokens
        .iter()
        .flat_map(|t| t.as_ref().split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .enumerate()
        .map(|(index, token)| Step::parse(index, &token))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropRecord {
    pub draggable_id: String,
    pub droppable_id: String,
    pub source_index: usize,
    pub destination_index: Option<usize>,
    pub reason: &'static str,
}

impl From<&DropResult> for DropRecord {
    fn from(result: &DropResult) -> Self {
        Self {
            draggable_id: result.draggable_id.clone(),
            droppable_id: result.droppable_id.clone(),
            source_index: result.source_index,
            destination_index: result.destination_index,
            reason: match result.reason {
                DropReason::Drop => "drop",
                DropReason::Cancel => "cancel",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: String,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptReport {
    pub items: Vec<String>,
    pub steps: Vec<StepRecord>,
    pub drops: Vec<DropRecord>,
}

fn move_record(step: String, outcome: Option<MoveOutcome>) -> StepRecord {
    let (outcome, index) = match outcome {
        Some(MoveOutcome::Moved { index }) => ("moved", Some(index)),
        Some(MoveOutcome::Clamped { index }) => ("clamped", Some(index)),
        Some(MoveOutcome::Unsupported) => ("unsupported", None),
        Some(MoveOutcome::Stale) => ("stale", None),
        None => ("idle", None),
    };
    StepRecord {
        step,
        outcome,
        index,
    }
}

/// Run `steps` against `app` and report what happened.
pub fn run_steps(app: &mut ReorderApp<String>, steps: &[Step]) -> Result<ScriptReport> {
    let mut records = Vec::with_capacity(steps.len());
    for step in steps {
        let record = match step {
            Step::Select(id) => {
                app.select(id.clone());
                StepRecord {
                    step: format!("select:{id}"),
                    outcome: "selected",
                    index: None,
                }
            }
            Step::Lift(id) => {
                if let Some(id) = id {
                    app.select(id.clone());
                }
                let lifted = app.press_lift()?;
                StepRecord {
                    step: "lift".to_string(),
                    outcome: if lifted { "lifted" } else { "rejected" },
                    index: None,
                }
            }
            Step::Move(direction) => {
                move_record(direction.as_str().to_string(), app.press_arrow(*direction))
            }
            Step::Drop => StepRecord {
                step: "drop".to_string(),
                outcome: if app.press_drop().is_some() { "dropped" } else { "idle" },
                index: None,
            },
            Step::Cancel => StepRecord {
                step: "cancel".to_string(),
                outcome: if app.context().cancel().is_some() { "cancelled" } else { "idle" },
                index: None,
            },
        };
        records.push(record);
    }
    let drops: Vec<DropRecord> = app.drop_results().iter().map(DropRecord::from).collect();
    info!(steps = records.len(), drops = drops.len(), "script finished");
    Ok(ScriptReport {
        items: app.item_ids(),
        steps: records,
        drops,
    })
}

pub fn run_script(args: &ScriptArgs) -> Result<ScriptReport> {
    let config = match &args.config {
        Some(path) => DndConfig::from_toml_file(path)?,
        None => DndConfig::default(),
    };
    let steps = parse_script(&args.steps)?;
    let mut app = ReorderApp::with_config(args.items.clone(), &config);
    run_steps(&mut app, &steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(items: &[&str]) -> ReorderApp<String> {
        ReorderApp::new(items.iter().map(|s| (*s).to_string()).collect())
    }

    #[test]
    fn parses_steps() {
        let steps = parse_script(&["lift:B up", "LEFT drop", "select:C", "lift", "cancel"]).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Lift(Some("B".into())),
                Step::Move(Direction::Up),
                Step::Move(Direction::Left),
                Step::Drop,
                Step::Select("C".into()),
                Step::Lift(None),
                Step::Cancel,
            ]
        );
    }

    #[test]
    fn rejects_unknown_step() {
        let err = parse_script(&["lift:B", "jump"]).unwrap_err();
        assert!(matches!(err, DemoError::Script { index: 1, .. }));
    }

    #[test]
    fn rejects_stray_argument() {
        assert!(parse_script(&["drop:B"]).is_err());
        assert!(parse_script(&["select"]).is_err());
        assert!(parse_script(&["lift:"]).is_err());
    }

    #[test]
    fn lift_up_drop() {
        let mut app = app(&["A", "B", "C"]);
        let steps = parse_script(&["lift:B up drop"]).unwrap();
        let report = run_steps(&mut app, &steps).unwrap();
        assert_eq!(report.items, ["B", "A", "C"]);
        assert_eq!(
            report.drops,
            vec![DropRecord {
                draggable_id: "B".into(),
                droppable_id: "list".into(),
                source_index: 1,
                destination_index: Some(0),
                reason: "drop",
            }]
        );
        assert_eq!(report.steps[1].outcome, "moved");
        assert_eq!(report.steps[1].index, Some(0));
    }

    #[test]
    fn clamp_and_idle_steps_are_reported() {
        let mut app = app(&["A", "B"]);
        let steps = parse_script(&["up lift:A up left drop drop"]).unwrap();
        let report = run_steps(&mut app, &steps).unwrap();
        let outcomes: Vec<_> = report.steps.iter().map(|s| s.outcome).collect();
        assert_eq!(
            outcomes,
            ["idle", "lifted", "clamped", "unsupported", "dropped", "idle"]
        );
        assert_eq!(report.items, ["A", "B"]);
    }

    #[test]
    fn cancel_leaves_list() {
        let mut app = app(&["A", "B", "C"]);
        let steps = parse_script(&["lift:C up cancel"]).unwrap();
        let report = run_steps(&mut app, &steps).unwrap();
        assert_eq!(report.items, ["A", "B", "C"]);
        assert_eq!(report.drops[0].reason, "cancel");
        assert_eq!(report.drops[0].destination_index, None);
    }

    #[test]
    fn report_serializes() {
        let mut app = app(&["A", "B"]);
        let steps = parse_script(&["lift:B up drop"]).unwrap();
        let report = run_steps(&mut app, &steps).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["items"], serde_json::json!(["B", "A"]));
        assert_eq!(json["drops"][0]["destination_index"], 0);
        assert!(json["steps"][0].get("index").is_none());
    }
}
