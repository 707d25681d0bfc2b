//! Scripted board sessions.
//!
//! A script is a YAML list of steps, each tagged with `op`:
//!
//! ```yaml
//! - op: add_column
//! - op: add_task
//!   column: col-1
//! - op: drag_start
//!   id: task-1
//!   kind: task
//! - op: drag_over
//!   id: task-1
//!   over: { id: col-2, kind: column }
//! - op: drag_end
//!   id: task-1
//! ```

use crate::engine::BoardEngine;
use crate::model::{BoardError, DropTarget, EntityKind, Id};
use crate::session::DragOutcome;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    AddColumn,
    AddTask {
        column: Id,
    },
    RenameColumn {
        id: Id,
        title: String,
    },
    RenameTask {
        id: Id,
        title: String,
    },
    DeleteColumn {
        id: Id,
    },
    DeleteTask {
        id: Id,
    },
    DragStart {
        id: Id,
        kind: EntityKind,
    },
    DragOver {
        id: Id,
        #[serde(default)]
        over: Option<DropTarget>,
    },
    DragEnd {
        id: Id,
        #[serde(default)]
        over: Option<DropTarget>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Created(Id),
    /// A command that may have been a no-op; `false` means nothing changed.
    Applied(bool),
    Drag(DragOutcome),
}

pub fn parse_script(source: &str) -> Result<Vec<Step>> {
    serde_yaml::from_str(source).context("parsing script")
}

impl Step {
    pub fn apply(&self, engine: &mut BoardEngine) -> Result<StepResult, BoardError> {
        let result = match self {
            Step::AddColumn => StepResult::Created(engine.add_column()?),
            Step::AddTask { column } => match engine.add_task(column)? {
                Some(id) => StepResult::Created(id),
                None => StepResult::Applied(false),
            },
            Step::RenameColumn { id, title } => {
                StepResult::Applied(engine.rename_column(id, title)?)
            }
            Step::RenameTask { id, title } => StepResult::Applied(engine.rename_task(id, title)?),
            Step::DeleteColumn { id } => StepResult::Applied(engine.delete_column(id)?),
            Step::DeleteTask { id } => StepResult::Applied(engine.delete_task(id)?),
            Step::DragStart { id, kind } => StepResult::Drag(engine.on_drag_start(id, *kind)?),
            Step::DragOver { id, over } => {
                StepResult::Drag(engine.on_drag_over(id, over.clone())?)
            }
            Step::DragEnd { id, over } => StepResult::Drag(engine.on_drag_end(id, over.clone())?),
        };
        Ok(result)
    }
}

/// Runs every step in order, stopping at the first fatal error.
pub fn run_script(engine: &mut BoardEngine, steps: &[Step]) -> Result<Vec<StepResult>> {
    steps
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            step.apply(engine)
                .with_context(|| format!("step {} ({:?})", idx + 1, step))
        })
        .collect()
}
