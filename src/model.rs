use serde::{Deserialize, Serialize};
use std::fmt;

pub type Id = String;

/// An immutable view of the board at one point in time.
///
/// Both sequences are the only source of display order: columns render in
/// `columns` order, and a column's tasks are the entries of `tasks` whose
/// `column_id` matches, in the order they appear.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub revision: u64,
    pub columns: Vec<Column>,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: Id,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Id,
    pub title: String,
    pub column_id: Id,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Column,
    Task,
}

/// The entity under the pointer while a drag is in progress.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub id: Id,
    pub kind: EntityKind,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Id },
    #[error("index {index} out of range for sequence of length {len}")]
    InvalidIndex { index: usize, len: usize },
    #[error("board invariant violated: {0}")]
    InvariantViolation(String),
}

impl BoardError {
    pub fn column_not_found(id: &str) -> Self {
        BoardError::NotFound {
            kind: EntityKind::Column,
            id: id.to_string(),
        }
    }

    pub fn task_not_found(id: &str) -> Self {
        BoardError::NotFound {
            kind: EntityKind::Task,
            id: id.to_string(),
        }
    }

    /// `NotFound` and `InvalidIndex` leave the board untouched and may be
    /// absorbed by the caller; an invariant violation never may.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, BoardError::InvariantViolation(_))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Column => f.write_str("column"),
            EntityKind::Task => f.write_str("task"),
        }
    }
}

impl DropTarget {
    pub fn column(id: impl Into<Id>) -> Self {
        DropTarget {
            id: id.into(),
            kind: EntityKind::Column,
        }
    }

    pub fn task(id: impl Into<Id>) -> Self {
        DropTarget {
            id: id.into(),
            kind: EntityKind::Task,
        }
    }
}

impl Board {
    pub fn find_column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn find_task_index(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Column => self.column(id).is_some(),
            EntityKind::Task => self.task(id).is_some(),
        }
    }

    /// Tasks of one column, in rank order.
    pub fn tasks_in<'a>(&'a self, column_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.column_id == column_id)
    }

    pub fn task_count(&self, column_id: &str) -> usize {
        self.tasks_in(column_id).count()
    }
}
