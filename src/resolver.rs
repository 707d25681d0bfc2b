//! Placement rules for drag gestures. Nothing here touches the store.

use crate::model::{Board, BoardError, Column, DropTarget, EntityKind, Id, Task};
use serde::{Deserialize, Serialize};

/// Where a task lands when it is hovered over a column body rather than
/// over another task.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDropPlacement {
    /// Adopt the column, keep the raw position in the task sequence.
    #[default]
    KeepPosition,
    /// Adopt the column and move after the last task already in it.
    AppendToColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnReorder {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    pub task_id: Id,
    pub column_id: Id,
    /// Destination in the global task sequence; `None` keeps the position.
    pub to_index: Option<usize>,
}

/// Removes the element at `from` and reinserts it at `to`, shifting the
/// elements in between. Not a swap.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, BoardError> {
    let len = items.len();
    if from >= len {
        return Err(BoardError::InvalidIndex { index: from, len });
    }
    if to >= len {
        return Err(BoardError::InvalidIndex { index: to, len });
    }
    let mut moved = items.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Ok(moved)
}

/// Column reorder committed when a dragged column is released over `hovered`.
pub fn resolve_column_drop(
    columns: &[Column],
    dragged_id: &str,
    hovered: &DropTarget,
) -> Option<ColumnReorder> {
    if hovered.kind != EntityKind::Column || hovered.id == dragged_id {
        return None;
    }
    let from = columns.iter().position(|c| c.id == dragged_id)?;
    let to = columns.iter().position(|c| c.id == hovered.id)?;
    Some(ColumnReorder { from, to })
}

/// Live placement of a dragged task while it hovers over `hovered`.
pub fn resolve_task_hover(
    board: &Board,
    dragged_id: &str,
    hovered: &DropTarget,
    placement: ColumnDropPlacement,
) -> Option<TaskMove> {
    if hovered.id == dragged_id {
        return None;
    }
    let from = board.find_task_index(dragged_id)?;
    let dragged = &board.tasks[from];

    match hovered.kind {
        EntityKind::Task => {
            let to = board.find_task_index(&hovered.id)?;
            Some(TaskMove {
                task_id: dragged.id.clone(),
                column_id: board.tasks[to].column_id.clone(),
                to_index: Some(to),
            })
        }
        EntityKind::Column => {
            board.find_column_index(&hovered.id)?;
            let same_column = dragged.column_id == hovered.id;
            match placement {
                ColumnDropPlacement::KeepPosition => {
                    if same_column {
                        return None;
                    }
                    Some(TaskMove {
                        task_id: dragged.id.clone(),
                        column_id: hovered.id.clone(),
                        to_index: None,
                    })
                }
                ColumnDropPlacement::AppendToColumn => {
                    if same_column
                        && board.tasks[from + 1..]
                            .iter()
                            .all(|t| t.column_id != hovered.id)
                    {
                        return None;
                    }
                    Some(TaskMove {
                        task_id: dragged.id.clone(),
                        column_id: hovered.id.clone(),
                        to_index: end_of_run(&board.tasks, from, &hovered.id),
                    })
                }
            }
        }
    }
}

/// Index just past the last task of `column_id`, measured in the sequence
/// with the task at `skip` removed (which is what `array_move` inserts into).
fn end_of_run(tasks: &[Task], skip: usize, column_id: &str) -> Option<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != skip)
        .map(|(_, t)| t)
        .enumerate()
        .filter(|(_, t)| t.column_id == column_id)
        .last()
        .map(|(idx, _)| idx + 1)
}

/// Applies a task move to a task sequence: the column is reassigned first,
/// then the positional move runs against the reassigned sequence.
pub fn apply_task_move(tasks: &[Task], mv: &TaskMove) -> Result<Vec<Task>, BoardError> {
    let from = tasks
        .iter()
        .position(|t| t.id == mv.task_id)
        .ok_or_else(|| BoardError::task_not_found(&mv.task_id))?;
    let mut next = tasks.to_vec();
    next[from].column_id = mv.column_id.clone();
    match mv.to_index {
        Some(to) => array_move(&next, from, to),
        None => Ok(next),
    }
}
