use dragboard::{BoardError, BoardStore, EntityKind, SequentialIds, TitleTemplates};

fn store() -> BoardStore {
    BoardStore::new(Box::<SequentialIds>::default(), TitleTemplates::default())
}

#[test]
fn add_column_appends_with_numbered_title() {
    let mut store = store();
    let c1 = store.add_column().unwrap();
    let c2 = store.add_column().unwrap();

    let board = store.snapshot();
    assert_eq!(board.columns.len(), 2);
    assert_eq!(board.columns[0].id, c1);
    assert_eq!(board.columns[0].title, "Column 1");
    assert_eq!(board.columns[1].id, c2);
    assert_eq!(board.columns[1].title, "Column 2");
}

#[test]
fn column_titles_may_repeat_after_delete() {
    let mut store = store();
    let c1 = store.add_column().unwrap();
    store.add_column().unwrap();
    store.delete_column(&c1).unwrap();
    store.add_column().unwrap();

    let titles: Vec<_> = store
        .snapshot()
        .columns
        .iter()
        .map(|c| c.title.clone())
        .collect();
    assert_eq!(titles, vec!["Column 2", "Column 2"]);
}

#[test]
fn add_task_appends_to_global_sequence() {
    let mut store = store();
    let c1 = store.add_column().unwrap();
    let c2 = store.add_column().unwrap();
    let t1 = store.add_task(&c1).unwrap();
    let t2 = store.add_task(&c2).unwrap();
    let t3 = store.add_task(&c1).unwrap();

    let board = store.snapshot();
    let ids: Vec<_> = board.tasks.iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec![t1.clone(), t2, t3.clone()]);
    assert_eq!(board.tasks[2].title, "Task 3");
    let in_c1: Vec<_> = board.tasks_in(&c1).map(|t| t.id.clone()).collect();
    assert_eq!(in_c1, vec![t1, t3]);
}

#[test]
fn add_task_to_missing_column_is_not_found() {
    let mut store = store();
    let before = store.snapshot();
    assert_eq!(
        store.add_task("nope"),
        Err(BoardError::NotFound {
            kind: EntityKind::Column,
            id: "nope".into()
        })
    );
    assert_eq!(store.snapshot().revision, before.revision);
}

#[test]
fn delete_column_cascades_to_its_tasks_only() {
    let mut store = store();
    let c1 = store.add_column().unwrap();
    let c2 = store.add_column().unwrap();
    store.add_task(&c1).unwrap();
    let keep = store.add_task(&c2).unwrap();
    store.add_task(&c1).unwrap();

    let removed = store.delete_column(&c1).unwrap();
    assert_eq!(removed, 2);

    let board = store.snapshot();
    assert_eq!(board.columns.len(), 1);
    assert_eq!(board.tasks.len(), 1);
    assert_eq!(board.tasks[0].id, keep);
    assert!(board.tasks.iter().all(|t| board.column(&t.column_id).is_some()));
}

#[test]
fn missing_ids_leave_board_untouched() {
    let mut store = store();
    let c1 = store.add_column().unwrap();
    store.add_task(&c1).unwrap();
    let before = store.snapshot();

    assert!(store.delete_column("ghost").is_err());
    assert!(store.rename_column("ghost", "x").is_err());
    assert!(store.delete_task("ghost").is_err());
    assert!(store.rename_task("ghost", "x").is_err());
    assert!(store.move_task("ghost", &c1, None).is_err());
    assert!(store.move_task("task-1", "ghost", None).is_err());

    assert_eq!(*store.snapshot(), *before);
}

#[test]
fn rename_updates_only_the_title() {
    let mut store = store();
    let c1 = store.add_column().unwrap();
    let t1 = store.add_task(&c1).unwrap();
    store.rename_column(&c1, "Backlog").unwrap();
    store.rename_task(&t1, "Write docs").unwrap();

    let board = store.snapshot();
    assert_eq!(board.columns[0].title, "Backlog");
    assert_eq!(board.columns[0].id, c1);
    assert_eq!(board.tasks[0].title, "Write docs");
    assert_eq!(board.tasks[0].column_id, c1);
}

#[test]
fn delete_task_removes_only_that_task() {
    let mut store = store();
    let c1 = store.add_column().unwrap();
    let t1 = store.add_task(&c1).unwrap();
    let t2 = store.add_task(&c1).unwrap();
    store.delete_task(&t1).unwrap();

    let board = store.snapshot();
    assert_eq!(board.tasks.len(), 1);
    assert_eq!(board.tasks[0].id, t2);
}

#[test]
fn reorder_columns_is_an_array_move() {
    let mut store = store();
    let c1 = store.add_column().unwrap();
    let c2 = store.add_column().unwrap();
    let c3 = store.add_column().unwrap();

    store.reorder_columns(2, 0).unwrap();
    let order: Vec<_> = store.snapshot().columns.iter().map(|c| c.id.clone()).collect();
    assert_eq!(order, vec![c3.clone(), c1.clone(), c2.clone()]);

    store.reorder_columns(0, 2).unwrap();
    let order: Vec<_> = store.snapshot().columns.iter().map(|c| c.id.clone()).collect();
    assert_eq!(order, vec![c1, c2, c3]);
}

#[test]
fn reorder_columns_rejects_out_of_range_indices() {
    let mut store = store();
    store.add_column().unwrap();
    store.add_column().unwrap();
    let before = store.snapshot();

    assert_eq!(
        store.reorder_columns(0, 2),
        Err(BoardError::InvalidIndex { index: 2, len: 2 })
    );
    assert_eq!(
        store.reorder_columns(7, 0),
        Err(BoardError::InvalidIndex { index: 7, len: 2 })
    );
    assert_eq!(*store.snapshot(), *before);
}

#[test]
fn move_task_reassigns_column_then_repositions() {
    let mut store = store();
    let a = store.add_column().unwrap();
    let b = store.add_column().unwrap();
    let t1 = store.add_task(&a).unwrap();
    let t2 = store.add_task(&b).unwrap();

    store.move_task(&t1, &b, Some(1)).unwrap();
    let board = store.snapshot();
    assert_eq!(board.tasks[0].id, t2);
    assert_eq!(board.tasks[1].id, t1);
    assert_eq!(board.tasks[1].column_id, b);
    assert_eq!(board.task_count(&a), 0);

    assert_eq!(
        store.move_task(&t1, &a, Some(9)),
        Err(BoardError::InvalidIndex { index: 9, len: 2 })
    );
    assert_eq!(store.snapshot().tasks[1].column_id, b);
}

#[test]
fn every_mutation_bumps_revision() {
    let mut store = store();
    let start = store.snapshot().revision;
    let c1 = store.add_column().unwrap();
    let t1 = store.add_task(&c1).unwrap();
    store.rename_task(&t1, "x").unwrap();
    store.delete_task(&t1).unwrap();
    assert_eq!(store.snapshot().revision, start + 4);
}
