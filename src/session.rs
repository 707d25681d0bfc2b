use crate::model::{Board, BoardError, Column, DropTarget, EntityKind, Task};
use crate::resolver::{
    resolve_column_drop, resolve_task_hover, ColumnDropPlacement, ColumnReorder, TaskMove,
};
use crate::store::BoardStore;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Column as it was when the drag started.
    DraggingColumn(Column),
    /// Task as it was when the drag started.
    DraggingTask(Task),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotDragging,
    OtherEntity,
    OverSelf,
    NoTarget,
    Locked,
    /// The dragged or hovered entity is not on the board.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Started(EntityKind),
    /// Hover recorded without changing the board.
    Hovering,
    /// A task was placed live during the drag.
    Moved(TaskMove),
    /// A column drop committed a reorder.
    Reordered(ColumnReorder),
    /// Drag finished over a target without a structural change.
    Dropped,
    /// Drag released over nothing.
    Cancelled,
    Ignored(IgnoreReason),
}

#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
    hover: Option<DropTarget>,
    /// Target of the last applied task move and the revision it produced.
    settled: Option<(DropTarget, u64)>,
}

impl DragState {
    pub fn dragged_id(&self) -> Option<&str> {
        match self {
            DragState::Idle => None,
            DragState::DraggingColumn(column) => Some(&column.id),
            DragState::DraggingTask(task) => Some(&task.id),
        }
    }

    pub fn dragged_kind(&self) -> Option<EntityKind> {
        match self {
            DragState::Idle => None,
            DragState::DraggingColumn(_) => Some(EntityKind::Column),
            DragState::DraggingTask(_) => Some(EntityKind::Task),
        }
    }
}

impl DragSession {
    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Last target the pointer was reported over during the current drag.
    pub fn hover(&self) -> Option<&DropTarget> {
        self.hover.as_ref()
    }

    pub fn start(
        &mut self,
        board: &Board,
        id: &str,
        kind: EntityKind,
    ) -> Result<DragOutcome, BoardError> {
        let state = match kind {
            EntityKind::Column => DragState::DraggingColumn(
                board
                    .column(id)
                    .cloned()
                    .ok_or_else(|| BoardError::column_not_found(id))?,
            ),
            EntityKind::Task => DragState::DraggingTask(
                board
                    .task(id)
                    .cloned()
                    .ok_or_else(|| BoardError::task_not_found(id))?,
            ),
        };
        if let Some(previous) = self.state.dragged_id() {
            debug!("event=drag_replaced previous={} next={}", previous, id);
        }
        self.state = state;
        self.hover = None;
        self.settled = None;
        Ok(DragOutcome::Started(kind))
    }

    pub fn over(
        &mut self,
        store: &mut BoardStore,
        dragged_id: &str,
        over: Option<DropTarget>,
        placement: ColumnDropPlacement,
    ) -> Result<DragOutcome, BoardError> {
        if let Some(reason) = self.check_dragged(dragged_id) {
            return Ok(DragOutcome::Ignored(reason));
        }
        let Some(target) = over else {
            self.hover = None;
            return Ok(DragOutcome::Ignored(IgnoreReason::NoTarget));
        };
        if target.id == dragged_id {
            return Ok(DragOutcome::Ignored(IgnoreReason::OverSelf));
        }
        let dragging_task = matches!(self.state, DragState::DraggingTask(_));
        self.hover = Some(target.clone());
        if !dragging_task {
            return Ok(DragOutcome::Hovering);
        }

        let board = store.snapshot();
        if let Some((settled, revision)) = &self.settled {
            if *settled == target && *revision == board.revision {
                return Ok(DragOutcome::Hovering);
            }
        }
        match resolve_task_hover(&board, dragged_id, &target, placement) {
            Some(mv) => {
                store.move_task(&mv.task_id, &mv.column_id, mv.to_index)?;
                self.settled = Some((target, store.snapshot().revision));
                Ok(DragOutcome::Moved(mv))
            }
            None => Ok(DragOutcome::Hovering),
        }
    }

    pub fn end(
        &mut self,
        store: &mut BoardStore,
        dragged_id: &str,
        over: Option<DropTarget>,
    ) -> Result<DragOutcome, BoardError> {
        if let Some(reason) = self.check_dragged(dragged_id) {
            return Ok(DragOutcome::Ignored(reason));
        }
        let state = std::mem::take(&mut self.state);
        self.hover = None;
        self.settled = None;
        let Some(target) = over else {
            return Ok(DragOutcome::Cancelled);
        };
        match state {
            DragState::DraggingColumn(column) => {
                let board = store.snapshot();
                match resolve_column_drop(&board.columns, &column.id, &target) {
                    Some(reorder) => {
                        store.reorder_columns(reorder.from, reorder.to)?;
                        Ok(DragOutcome::Reordered(reorder))
                    }
                    None => Ok(DragOutcome::Dropped),
                }
            }
            DragState::DraggingTask(_) | DragState::Idle => Ok(DragOutcome::Dropped),
        }
    }

    /// Drops the session without touching the board.
    pub fn clear(&mut self) {
        self.state = DragState::Idle;
        self.hover = None;
        self.settled = None;
    }

    fn check_dragged(&self, dragged_id: &str) -> Option<IgnoreReason> {
        match self.state.dragged_id() {
            None => Some(IgnoreReason::NotDragging),
            Some(id) if id != dragged_id => Some(IgnoreReason::OtherEntity),
            Some(_) => None,
        }
    }
}
