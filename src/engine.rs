use crate::config::BoardConfig;
use crate::ids::{IdGenerator, RandomIds};
use crate::model::{Board, BoardError, DropTarget, EntityKind, Id};
use crate::resolver::ColumnDropPlacement;
use crate::session::{DragOutcome, DragSession, IgnoreReason};
use crate::store::BoardStore;
use log::{debug, error, info, warn};
use std::sync::Arc;

/// The entity whose title is being edited. It cannot be dragged until the
/// edit is committed or cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditLock {
    pub id: Id,
    pub kind: EntityKind,
}

/// Entry point for renderers. Missing ids and bad indices become logged
/// no-ops; invariant violations are logged and returned.
pub struct BoardEngine {
    store: BoardStore,
    session: DragSession,
    editing: Option<EditLock>,
    placement: ColumnDropPlacement,
}

impl BoardEngine {
    pub fn new(config: &BoardConfig) -> Self {
        BoardEngine::with_ids(Box::new(RandomIds::new(config.id_length)), config)
    }

    pub fn with_ids(ids: Box<dyn IdGenerator>, config: &BoardConfig) -> Self {
        BoardEngine {
            store: BoardStore::new(ids, config.titles()),
            session: DragSession::default(),
            editing: None,
            placement: config.column_drop,
        }
    }

    pub fn snapshot(&self) -> Arc<Board> {
        self.store.snapshot()
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn editing(&self) -> Option<&EditLock> {
        self.editing.as_ref()
    }

    pub fn add_column(&mut self) -> Result<Id, BoardError> {
        let id = self.store.add_column().map_err(|err| fatal("add_column", err))?;
        info!("event=column_added id={}", id);
        Ok(id)
    }

    /// Returns whether a column was removed.
    pub fn delete_column(&mut self, id: &str) -> Result<bool, BoardError> {
        let Some(removed_tasks) = absorb("delete_column", self.store.delete_column(id))? else {
            return Ok(false);
        };
        info!(
            "event=column_deleted id={} cascaded_tasks={}",
            id, removed_tasks
        );
        self.forget_missing();
        Ok(true)
    }

    pub fn rename_column(&mut self, id: &str, title: &str) -> Result<bool, BoardError> {
        let renamed = absorb("rename_column", self.store.rename_column(id, title))?.is_some();
        if renamed {
            debug!("event=column_renamed id={}", id);
        }
        Ok(renamed)
    }

    /// Returns the new task id, or `None` when the column does not exist.
    pub fn add_task(&mut self, column_id: &str) -> Result<Option<Id>, BoardError> {
        let id = absorb("add_task", self.store.add_task(column_id))?;
        if let Some(id) = &id {
            info!("event=task_added id={} column={}", id, column_id);
        }
        Ok(id)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<bool, BoardError> {
        if absorb("delete_task", self.store.delete_task(id))?.is_none() {
            return Ok(false);
        }
        info!("event=task_deleted id={}", id);
        self.forget_missing();
        Ok(true)
    }

    pub fn rename_task(&mut self, id: &str, title: &str) -> Result<bool, BoardError> {
        let renamed = absorb("rename_task", self.store.rename_task(id, title))?.is_some();
        if renamed {
            debug!("event=task_renamed id={}", id);
        }
        Ok(renamed)
    }

    pub fn on_drag_start(
        &mut self,
        id: &str,
        kind: EntityKind,
    ) -> Result<DragOutcome, BoardError> {
        if self.is_locked(id) {
            debug!("event=drag_rejected id={} reason=editing", id);
            return Ok(DragOutcome::Ignored(IgnoreReason::Locked));
        }
        let board = self.store.snapshot();
        let outcome = absorb("drag_start", self.session.start(&board, id, kind))?
            .unwrap_or(DragOutcome::Ignored(IgnoreReason::Missing));
        debug!("event=drag_start id={} kind={} outcome={:?}", id, kind, outcome);
        Ok(outcome)
    }

    pub fn on_drag_over(
        &mut self,
        dragged_id: &str,
        over: Option<DropTarget>,
    ) -> Result<DragOutcome, BoardError> {
        let result = self
            .session
            .over(&mut self.store, dragged_id, over, self.placement);
        let outcome = absorb("drag_over", result)?
            .unwrap_or(DragOutcome::Ignored(IgnoreReason::Missing));
        if let DragOutcome::Moved(mv) = &outcome {
            debug!(
                "event=task_moved id={} column={} index={:?}",
                mv.task_id, mv.column_id, mv.to_index
            );
        }
        Ok(outcome)
    }

    pub fn on_drag_end(
        &mut self,
        dragged_id: &str,
        over: Option<DropTarget>,
    ) -> Result<DragOutcome, BoardError> {
        let result = self.session.end(&mut self.store, dragged_id, over);
        let outcome = absorb("drag_end", result)?
            .unwrap_or(DragOutcome::Ignored(IgnoreReason::Missing));
        match &outcome {
            DragOutcome::Reordered(reorder) => info!(
                "event=columns_reordered id={} from={} to={}",
                dragged_id, reorder.from, reorder.to
            ),
            other => debug!("event=drag_end id={} outcome={:?}", dragged_id, other),
        }
        Ok(outcome)
    }

    /// Puts an entity into title-edit mode. Fails (returns `false`) when the
    /// entity does not exist or is being dragged.
    pub fn begin_edit(&mut self, id: &str, kind: EntityKind) -> bool {
        if !self.store.snapshot().contains(id, kind) {
            warn!("event=edit_rejected id={} kind={} reason=not_found", id, kind);
            return false;
        }
        if self.session.state().dragged_id() == Some(id) {
            debug!("event=edit_rejected id={} reason=dragging", id);
            return false;
        }
        self.editing = Some(EditLock {
            id: id.to_string(),
            kind,
        });
        true
    }

    /// Applies the edited title and leaves edit mode.
    pub fn commit_edit(&mut self, title: &str) -> Result<bool, BoardError> {
        let Some(lock) = self.editing.take() else {
            return Ok(false);
        };
        match lock.kind {
            EntityKind::Column => self.rename_column(&lock.id, title),
            EntityKind::Task => self.rename_task(&lock.id, title),
        }
    }

    /// Leaves edit mode without renaming.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    fn is_locked(&self, id: &str) -> bool {
        self.editing.as_ref().is_some_and(|lock| lock.id == id)
    }

    /// Releases the edit lock and drag session when their entity is gone.
    fn forget_missing(&mut self) {
        let board = self.store.snapshot();
        let edit_gone = self
            .editing
            .as_ref()
            .is_some_and(|lock| !board.contains(&lock.id, lock.kind));
        if edit_gone {
            debug!("event=edit_released reason=deleted");
            self.editing = None;
        }
        let state = self.session.state();
        let drag_gone = match (state.dragged_id(), state.dragged_kind()) {
            (Some(id), Some(kind)) => !board.contains(id, kind),
            _ => false,
        };
        if drag_gone {
            debug!("event=drag_released reason=deleted");
            self.session.clear();
        }
    }
}

/// Turns recoverable errors into a logged `None`; anything else is fatal.
fn absorb<T>(op: &str, result: Result<T, BoardError>) -> Result<Option<T>, BoardError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err @ BoardError::NotFound { .. }) => {
            warn!("event=no_op op={} reason=\"{}\"", op, err);
            Ok(None)
        }
        Err(err @ BoardError::InvalidIndex { .. }) => {
            error!("event=no_op op={} reason=\"{}\"", op, err);
            Ok(None)
        }
        Err(err) => Err(fatal(op, err)),
    }
}

fn fatal(op: &str, err: BoardError) -> BoardError {
    error!("event=invariant_violation op={} error=\"{}\"", op, err);
    err
}
