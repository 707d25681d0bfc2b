use crate::ids::IdGenerator;
use crate::model::{Board, BoardError, Column, EntityKind, Id, Task};
use crate::resolver::{apply_task_move, array_move, TaskMove};
use std::sync::Arc;

const COUNTER_PLACEHOLDER: &str = "{n}";

/// Title templates for new entities; `{n}` is replaced with the entity's
/// one-based count at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleTemplates {
    pub column: String,
    pub task: String,
}

impl Default for TitleTemplates {
    fn default() -> Self {
        TitleTemplates {
            column: "Column {n}".into(),
            task: "Task {n}".into(),
        }
    }
}

pub struct BoardStore {
    board: Arc<Board>,
    ids: Box<dyn IdGenerator>,
    titles: TitleTemplates,
}

impl BoardStore {
    pub fn new(ids: Box<dyn IdGenerator>, titles: TitleTemplates) -> Self {
        BoardStore::with_board(Board::default(), ids, titles)
    }

    pub fn with_board(board: Board, ids: Box<dyn IdGenerator>, titles: TitleTemplates) -> Self {
        BoardStore {
            board: Arc::new(board),
            ids,
            titles,
        }
    }

    pub fn snapshot(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    pub fn add_column(&mut self) -> Result<Id, BoardError> {
        let id = self.fresh_id(EntityKind::Column)?;
        let title = render_title(&self.titles.column, self.board.columns.len() + 1);
        let mut columns = self.board.columns.clone();
        columns.push(Column {
            id: id.clone(),
            title,
        });
        self.commit(columns, self.board.tasks.clone());
        Ok(id)
    }

    /// Removes the column and every task that belongs to it.
    pub fn delete_column(&mut self, id: &str) -> Result<usize, BoardError> {
        if self.board.find_column_index(id).is_none() {
            return Err(BoardError::column_not_found(id));
        }
        let columns = self
            .board
            .columns
            .iter()
            .filter(|c| c.id != id)
            .cloned()
            .collect();
        let tasks: Vec<Task> = self
            .board
            .tasks
            .iter()
            .filter(|t| t.column_id != id)
            .cloned()
            .collect();
        let removed = self.board.tasks.len() - tasks.len();
        self.commit(columns, tasks);
        Ok(removed)
    }

    pub fn rename_column(&mut self, id: &str, title: impl Into<String>) -> Result<(), BoardError> {
        let idx = self
            .board
            .find_column_index(id)
            .ok_or_else(|| BoardError::column_not_found(id))?;
        let mut columns = self.board.columns.clone();
        columns[idx].title = title.into();
        self.commit(columns, self.board.tasks.clone());
        Ok(())
    }

    pub fn add_task(&mut self, column_id: &str) -> Result<Id, BoardError> {
        if self.board.find_column_index(column_id).is_none() {
            return Err(BoardError::column_not_found(column_id));
        }
        let id = self.fresh_id(EntityKind::Task)?;
        let title = render_title(&self.titles.task, self.board.tasks.len() + 1);
        let mut tasks = self.board.tasks.clone();
        tasks.push(Task {
            id: id.clone(),
            title,
            column_id: column_id.to_string(),
        });
        self.commit(self.board.columns.clone(), tasks);
        Ok(id)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<(), BoardError> {
        if self.board.find_task_index(id).is_none() {
            return Err(BoardError::task_not_found(id));
        }
        let tasks = self
            .board
            .tasks
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();
        self.commit(self.board.columns.clone(), tasks);
        Ok(())
    }

    pub fn rename_task(&mut self, id: &str, title: impl Into<String>) -> Result<(), BoardError> {
        let idx = self
            .board
            .find_task_index(id)
            .ok_or_else(|| BoardError::task_not_found(id))?;
        let mut tasks = self.board.tasks.clone();
        tasks[idx].title = title.into();
        self.commit(self.board.columns.clone(), tasks);
        Ok(())
    }

    pub fn reorder_columns(&mut self, from: usize, to: usize) -> Result<(), BoardError> {
        let columns = array_move(&self.board.columns, from, to)?;
        self.commit(columns, self.board.tasks.clone());
        Ok(())
    }

    /// Reassigns the task to `target_column_id`, then moves it to
    /// `target_index_hint` in the global task sequence when one is given.
    pub fn move_task(
        &mut self,
        task_id: &str,
        target_column_id: &str,
        target_index_hint: Option<usize>,
    ) -> Result<(), BoardError> {
        if self.board.find_column_index(target_column_id).is_none() {
            return Err(BoardError::column_not_found(target_column_id));
        }
        let tasks = apply_task_move(
            &self.board.tasks,
            &TaskMove {
                task_id: task_id.to_string(),
                column_id: target_column_id.to_string(),
                to_index: target_index_hint,
            },
        )?;
        self.commit(self.board.columns.clone(), tasks);
        Ok(())
    }

    fn fresh_id(&mut self, kind: EntityKind) -> Result<Id, BoardError> {
        let id = self.ids.next_id(kind);
        if self.board.contains(&id, kind) {
            return Err(BoardError::InvariantViolation(format!(
                "id generator produced duplicate {} id {}",
                kind, id
            )));
        }
        Ok(id)
    }

    fn commit(&mut self, columns: Vec<Column>, tasks: Vec<Task>) {
        self.board = Arc::new(Board {
            revision: self.board.revision + 1,
            columns,
            tasks,
        });
    }
}

fn render_title(template: &str, n: usize) -> String {
    template.replace(COUNTER_PLACEHOLDER, &n.to_string())
}
