use dragboard::{
    Board, BoardConfig, BoardEngine, ColumnDropPlacement, ColumnReorder, DragOutcome, DragState,
    DropTarget, EntityKind, IgnoreReason, SequentialIds,
};

fn engine() -> BoardEngine {
    BoardEngine::with_ids(Box::<SequentialIds>::default(), &BoardConfig::default())
}

fn engine_with(placement: ColumnDropPlacement) -> BoardEngine {
    let config = BoardConfig {
        column_drop: placement,
        ..BoardConfig::default()
    };
    BoardEngine::with_ids(Box::<SequentialIds>::default(), &config)
}

fn task_ids(board: &Board) -> Vec<String> {
    board.tasks.iter().map(|t| t.id.clone()).collect()
}

fn column_ids(board: &Board) -> Vec<String> {
    board.columns.iter().map(|c| c.id.clone()).collect()
}

#[test]
fn drag_task_over_sibling_swaps_their_order() {
    let mut engine = engine();
    let c1 = engine.add_column().unwrap();
    engine.add_column().unwrap();
    let t1 = engine.add_task(&c1).unwrap().unwrap();
    let t2 = engine.add_task(&c1).unwrap().unwrap();

    let board = engine.snapshot();
    assert_eq!(board.tasks[0].title, "Task 1");
    assert_eq!(board.tasks[1].title, "Task 2");

    assert_eq!(
        engine.on_drag_start(&t1, EntityKind::Task).unwrap(),
        DragOutcome::Started(EntityKind::Task)
    );
    let outcome = engine
        .on_drag_over(&t1, Some(DropTarget::task(t2.clone())))
        .unwrap();
    assert!(matches!(outcome, DragOutcome::Moved(_)));

    let board = engine.snapshot();
    assert_eq!(task_ids(&board), vec![t2, t1]);
    assert!(board.tasks.iter().all(|t| t.column_id == c1));
}

#[test]
fn drag_task_over_task_in_other_column_adopts_that_column() {
    let mut engine = engine();
    let a = engine.add_column().unwrap();
    let b = engine.add_column().unwrap();
    let t1 = engine.add_task(&a).unwrap().unwrap();
    let t2 = engine.add_task(&b).unwrap().unwrap();
    let t3 = engine.add_task(&b).unwrap().unwrap();

    engine.on_drag_start(&t1, EntityKind::Task).unwrap();
    engine
        .on_drag_over(&t1, Some(DropTarget::task(t3.clone())))
        .unwrap();

    let board = engine.snapshot();
    assert_eq!(board.task(&t1).unwrap().column_id, b);
    assert_eq!(board.task_count(&a), 0);
    assert_eq!(board.task_count(&b), 3);
    assert_eq!(task_ids(&board), vec![t2, t3.clone(), t1.clone()]);
    let t1_idx = board.find_task_index(&t1).unwrap();
    let t3_idx = board.find_task_index(&t3).unwrap();
    assert_eq!(t1_idx.abs_diff(t3_idx), 1);

    // Task drops never mutate beyond what the hover already did.
    let before = engine.snapshot();
    assert_eq!(
        engine.on_drag_end(&t1, Some(DropTarget::task(t3))).unwrap(),
        DragOutcome::Dropped
    );
    assert_eq!(*engine.snapshot(), *before);
    assert_eq!(*engine.session().state(), DragState::Idle);
}

#[test]
fn drag_task_over_empty_column_only_reassigns_column() {
    let mut engine = engine();
    let a = engine.add_column().unwrap();
    let b = engine.add_column().unwrap();
    let t1 = engine.add_task(&a).unwrap().unwrap();
    let t2 = engine.add_task(&a).unwrap().unwrap();
    let order = task_ids(&engine.snapshot());

    engine.on_drag_start(&t1, EntityKind::Task).unwrap();
    engine
        .on_drag_over(&t1, Some(DropTarget::column(b.clone())))
        .unwrap();

    let board = engine.snapshot();
    assert_eq!(task_ids(&board), order);
    assert_eq!(board.task(&t1).unwrap().column_id, b);
    assert_eq!(board.task(&t2).unwrap().column_id, a);
}

#[test]
fn append_placement_puts_task_after_column_run() {
    let mut engine = engine_with(ColumnDropPlacement::AppendToColumn);
    let a = engine.add_column().unwrap();
    let b = engine.add_column().unwrap();
    let t1 = engine.add_task(&a).unwrap().unwrap();
    let t2 = engine.add_task(&b).unwrap().unwrap();
    let t3 = engine.add_task(&a).unwrap().unwrap();

    engine.on_drag_start(&t1, EntityKind::Task).unwrap();
    engine
        .on_drag_over(&t1, Some(DropTarget::column(b.clone())))
        .unwrap();

    let board = engine.snapshot();
    assert_eq!(task_ids(&board), vec![t2, t1.clone(), t3]);
    assert_eq!(board.task(&t1).unwrap().column_id, b);
}

#[test]
fn repeated_hover_on_resolved_state_changes_nothing() {
    let mut engine = engine();
    let a = engine.add_column().unwrap();
    let b = engine.add_column().unwrap();
    let t1 = engine.add_task(&a).unwrap().unwrap();

    engine.on_drag_start(&t1, EntityKind::Task).unwrap();
    let first = engine
        .on_drag_over(&t1, Some(DropTarget::column(b.clone())))
        .unwrap();
    assert!(matches!(first, DragOutcome::Moved(_)));
    let after_first = engine.snapshot();

    let second = engine
        .on_drag_over(&t1, Some(DropTarget::column(b)))
        .unwrap();
    assert_eq!(second, DragOutcome::Hovering);
    assert_eq!(*engine.snapshot(), *after_first);
}

#[test]
fn repeated_hover_over_same_task_does_not_oscillate() {
    let mut engine = engine();
    let c1 = engine.add_column().unwrap();
    let t1 = engine.add_task(&c1).unwrap().unwrap();
    let t2 = engine.add_task(&c1).unwrap().unwrap();

    engine.on_drag_start(&t1, EntityKind::Task).unwrap();
    let first = engine
        .on_drag_over(&t1, Some(DropTarget::task(t2.clone())))
        .unwrap();
    assert!(matches!(first, DragOutcome::Moved(_)));
    let after_first = engine.snapshot();
    assert_eq!(task_ids(&after_first), vec![t2.clone(), t1.clone()]);

    for _ in 0..3 {
        assert_eq!(
            engine
                .on_drag_over(&t1, Some(DropTarget::task(t2.clone())))
                .unwrap(),
            DragOutcome::Hovering
        );
    }
    assert_eq!(*engine.snapshot(), *after_first);
}

#[test]
fn hover_over_same_task_applies_again_after_board_changes() {
    let mut engine = engine();
    let a = engine.add_column().unwrap();
    let b = engine.add_column().unwrap();
    let t1 = engine.add_task(&a).unwrap().unwrap();
    let t2 = engine.add_task(&a).unwrap().unwrap();

    engine.on_drag_start(&t1, EntityKind::Task).unwrap();
    engine
        .on_drag_over(&t1, Some(DropTarget::task(t2.clone())))
        .unwrap();
    engine
        .on_drag_over(&t1, Some(DropTarget::column(b.clone())))
        .unwrap();
    assert_eq!(engine.snapshot().task(&t1).unwrap().column_id, b);

    let back = engine
        .on_drag_over(&t1, Some(DropTarget::task(t2.clone())))
        .unwrap();
    assert!(matches!(back, DragOutcome::Moved(_)));
    assert_eq!(engine.snapshot().task(&t1).unwrap().column_id, a);
}

#[test]
fn hovering_over_self_is_ignored() {
    let mut engine = engine();
    let a = engine.add_column().unwrap();
    let t1 = engine.add_task(&a).unwrap().unwrap();
    let before = engine.snapshot();

    engine.on_drag_start(&t1, EntityKind::Task).unwrap();
    assert_eq!(
        engine
            .on_drag_over(&t1, Some(DropTarget::task(t1.clone())))
            .unwrap(),
        DragOutcome::Ignored(IgnoreReason::OverSelf)
    );
    assert_eq!(*engine.snapshot(), *before);
}

#[test]
fn column_drop_is_an_array_move_not_a_swap() {
    let mut engine = engine();
    let c1 = engine.add_column().unwrap();
    let c2 = engine.add_column().unwrap();
    let c3 = engine.add_column().unwrap();

    engine.on_drag_start(&c3, EntityKind::Column).unwrap();
    // Hovering columns never reorders live.
    assert_eq!(
        engine
            .on_drag_over(&c3, Some(DropTarget::column(c2.clone())))
            .unwrap(),
        DragOutcome::Hovering
    );
    assert_eq!(
        column_ids(&engine.snapshot()),
        vec![c1.clone(), c2.clone(), c3.clone()]
    );
    assert_eq!(engine.session().hover(), Some(&DropTarget::column(c2.clone())));

    let outcome = engine
        .on_drag_end(&c3, Some(DropTarget::column(c1.clone())))
        .unwrap();
    assert_eq!(outcome, DragOutcome::Reordered(ColumnReorder { from: 2, to: 0 }));
    assert_eq!(column_ids(&engine.snapshot()), vec![c3, c1, c2]);
    assert!(!engine.session().is_dragging());
}

#[test]
fn column_dropped_on_itself_or_a_task_changes_nothing() {
    let mut engine = engine();
    let c1 = engine.add_column().unwrap();
    let c2 = engine.add_column().unwrap();
    let t1 = engine.add_task(&c2).unwrap().unwrap();
    let before = engine.snapshot();

    engine.on_drag_start(&c1, EntityKind::Column).unwrap();
    assert_eq!(
        engine
            .on_drag_end(&c1, Some(DropTarget::column(c1.clone())))
            .unwrap(),
        DragOutcome::Dropped
    );
    engine.on_drag_start(&c1, EntityKind::Column).unwrap();
    assert_eq!(
        engine.on_drag_end(&c1, Some(DropTarget::task(t1))).unwrap(),
        DragOutcome::Dropped
    );
    assert_eq!(*engine.snapshot(), *before);
}

#[test]
fn release_over_nothing_never_mutates() {
    let mut engine = engine();
    let c1 = engine.add_column().unwrap();
    engine.add_column().unwrap();
    let t1 = engine.add_task(&c1).unwrap().unwrap();
    let before = engine.snapshot();

    engine.on_drag_start(&c1, EntityKind::Column).unwrap();
    assert_eq!(engine.on_drag_end(&c1, None).unwrap(), DragOutcome::Cancelled);
    engine.on_drag_start(&t1, EntityKind::Task).unwrap();
    assert_eq!(
        engine.on_drag_over(&t1, None).unwrap(),
        DragOutcome::Ignored(IgnoreReason::NoTarget)
    );
    assert_eq!(engine.on_drag_end(&t1, None).unwrap(), DragOutcome::Cancelled);

    assert_eq!(*engine.snapshot(), *before);
    assert_eq!(*engine.session().state(), DragState::Idle);
}

#[test]
fn session_keeps_snapshot_of_dragged_entity() {
    let mut engine = engine();
    let a = engine.add_column().unwrap();
    let b = engine.add_column().unwrap();
    let t1 = engine.add_task(&a).unwrap().unwrap();

    engine.on_drag_start(&t1, EntityKind::Task).unwrap();
    engine
        .on_drag_over(&t1, Some(DropTarget::column(b)))
        .unwrap();

    match engine.session().state() {
        DragState::DraggingTask(task) => {
            assert_eq!(task.id, t1);
            assert_eq!(task.column_id, a);
        }
        other => panic!("unexpected state {:?}", other),
    }
}

#[test]
fn events_without_a_matching_session_are_ignored() {
    let mut engine = engine();
    let a = engine.add_column().unwrap();
    let t1 = engine.add_task(&a).unwrap().unwrap();
    let t2 = engine.add_task(&a).unwrap().unwrap();
    let before = engine.snapshot();

    assert_eq!(
        engine
            .on_drag_over(&t1, Some(DropTarget::task(t2.clone())))
            .unwrap(),
        DragOutcome::Ignored(IgnoreReason::NotDragging)
    );
    engine.on_drag_start(&t1, EntityKind::Task).unwrap();
    assert_eq!(
        engine
            .on_drag_over(&t2, Some(DropTarget::task(t1.clone())))
            .unwrap(),
        DragOutcome::Ignored(IgnoreReason::OtherEntity)
    );
    assert_eq!(*engine.snapshot(), *before);
}

#[test]
fn drag_start_with_wrong_kind_or_unknown_id_is_ignored() {
    let mut engine = engine();
    let a = engine.add_column().unwrap();

    assert_eq!(
        engine.on_drag_start(&a, EntityKind::Task).unwrap(),
        DragOutcome::Ignored(IgnoreReason::Missing)
    );
    assert_eq!(
        engine.on_drag_start("ghost", EntityKind::Column).unwrap(),
        DragOutcome::Ignored(IgnoreReason::Missing)
    );
    assert!(!engine.session().is_dragging());
}

#[test]
fn new_drag_start_replaces_previous_session() {
    let mut engine = engine();
    let a = engine.add_column().unwrap();
    let b = engine.add_column().unwrap();

    engine.on_drag_start(&a, EntityKind::Column).unwrap();
    engine.on_drag_start(&b, EntityKind::Column).unwrap();
    assert_eq!(engine.session().state().dragged_id(), Some(b.as_str()));
}

#[test]
fn deleting_the_dragged_task_ends_the_session() {
    let mut engine = engine();
    let a = engine.add_column().unwrap();
    let t1 = engine.add_task(&a).unwrap().unwrap();

    engine.on_drag_start(&t1, EntityKind::Task).unwrap();
    engine.delete_column(&a).unwrap();
    assert!(!engine.session().is_dragging());
    assert!(engine.snapshot().tasks.is_empty());
}
