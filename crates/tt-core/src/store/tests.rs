use super::*;
use crate::events::subscriber_from_fn;
use std::sync::atomic::{AtomicUsize, Ordering};

fn lecture(id: &str, schedule: &str) -> Arc<Lecture> {
    Arc::new(Lecture {
        id: id.to_string(),
        grade: 2,
        title: format!("Lecture {}", id),
        credits: "3".to_string(),
        major: "컴퓨터공학과".to_string(),
        schedule: schedule.to_string(),
    })
}

fn two_table_store() -> (ScheduleBoardStore, TableId, TableId) {
    let a = TableId::from("a");
    let b = TableId::from("b");
    let store = ScheduleBoardStore::new([a.clone(), b.clone()]);
    (store, a, b)
}

#[test]
fn test_add_schedules_appends_one_entry_per_slot() {
    let (store, a, b) = two_table_store();
    let before_b = store.board(&b).unwrap();

    let lec = lecture("L1", "월1~2(401)<p>화3~4(402)");
    assert_eq!(store.add_schedules(&a, lec.clone()), 2);

    let board = store.board(&a).unwrap();
    assert_eq!(board.len(), 2);
    assert!(Arc::ptr_eq(&board[0].lecture, &lec));
    assert!(Arc::ptr_eq(&board[1].lecture, &lec));
    assert_eq!(board[1].day, Day::Tue);
    assert_eq!(board[1].room, "402");

    // Other tables keep their list
    assert!(Arc::ptr_eq(&before_b, &store.board(&b).unwrap()));
}

#[test]
fn test_add_keeps_existing_entry_identity() {
    let (store, a, _) = two_table_store();
    store.add_schedules(&a, lecture("L1", "월1"));
    let first = store.board(&a).unwrap()[0].clone();

    store.add_schedules(&a, lecture("L2", "수2"));
    let board = store.board(&a).unwrap();
    assert!(Arc::ptr_eq(&first, &board[0]));
}

#[test]
fn test_unknown_table_is_noop() {
    let (store, _, _) = two_table_store();
    let before = store.boards();
    let ghost = TableId::from("ghost");

    assert_eq!(store.add_schedules(&ghost, lecture("L1", "월1")), 0);
    assert_eq!(store.remove_schedule(&ghost, Day::Mon, 1), 0);
    assert_eq!(store.duplicate_table(&ghost), None);
    assert!(!store.remove_table(&ghost));
    assert!(!store.move_schedule(&ghost, 0, Day::Tue, PeriodRange::single(1)));

    assert!(Arc::ptr_eq(&before, &store.boards()));
}

#[test]
fn test_remove_schedule_only_matching_entries() {
    let (store, a, b) = two_table_store();
    store.add_schedules(&a, lecture("L1", "월1~3(401)<p>화2(402)"));
    store.add_schedules(&a, lecture("L2", "월4"));
    store.add_schedules(&b, lecture("L3", "월2"));

    let before = store.board(&a).unwrap();
    let before_b = store.board(&b).unwrap();

    assert_eq!(store.remove_schedule(&a, Day::Mon, 2), 1);

    let after = store.board(&a).unwrap();
    assert_eq!(after.len(), 2);
    assert!(Arc::ptr_eq(&after[0], &before[1]));
    assert!(Arc::ptr_eq(&after[1], &before[2]));
    assert!(Arc::ptr_eq(&before_b, &store.board(&b).unwrap()));
}

#[test]
fn test_remove_schedule_without_match_keeps_list() {
    let (store, a, _) = two_table_store();
    store.add_schedules(&a, lecture("L1", "월1"));
    let before = store.board(&a).unwrap();

    assert_eq!(store.remove_schedule(&a, Day::Fri, 1), 0);
    assert!(Arc::ptr_eq(&before, &store.board(&a).unwrap()));
}

#[test]
fn test_duplicate_table_is_independent() {
    let (store, a, _) = two_table_store();
    store.add_schedules(&a, lecture("L1", "월1~2(401)<p>화3(402)"));

    let copy = store.duplicate_table(&a).unwrap();
    assert_ne!(copy, a);

    let source = store.board(&a).unwrap();
    let dup = store.board(&copy).unwrap();
    assert_eq!(*source, *dup);
    assert!(!Arc::ptr_eq(&source, &dup));
    assert!(Arc::ptr_eq(&source[0], &dup[0]));

    store.remove_schedule(&copy, Day::Mon, 2);
    assert_eq!(store.board(&copy).unwrap().len(), 1);
    assert!(Arc::ptr_eq(&source, &store.board(&a).unwrap()));
    assert_eq!(store.board(&a).unwrap().len(), 2);
}

#[test]
fn test_duplicate_ids_are_unique() {
    let store = ScheduleBoardStore::with_default_table();
    let first = TableId::from("schedule-1");

    let second = store.duplicate_table(&first).unwrap();
    let third = store.duplicate_table(&first).unwrap();

    assert_eq!(second, TableId::from("schedule-2"));
    assert_ne!(second, third);
    assert_eq!(store.table_ids(), vec![first, second, third]);
}

#[test]
fn test_remove_table_and_last_table() {
    let (store, a, b) = two_table_store();
    let before_b = store.board(&b).unwrap();

    assert!(store.remove_table(&a));
    assert_eq!(store.table_ids(), vec![b.clone()]);
    assert!(Arc::ptr_eq(&before_b, &store.board(&b).unwrap()));

    assert!(store.remove_table(&b));
    assert_eq!(store.table_count(), 0);
}

#[test]
fn test_move_schedule_replaces_single_entry() {
    let (store, a, _) = two_table_store();
    store.add_schedules(&a, lecture("L1", "월1~2(401)<p>화3(402)"));
    let before = store.board(&a).unwrap();

    assert!(store.move_schedule(&a, 0, Day::Wed, PeriodRange::new(5, 6).unwrap()));
    let after = store.board(&a).unwrap();

    assert_eq!(after[0].day, Day::Wed);
    assert_eq!(after[0].room, "401");
    assert!(Arc::ptr_eq(&after[0].lecture, &before[0].lecture));
    assert!(Arc::ptr_eq(&after[1], &before[1]));

    // Same position again is a no-op
    assert!(!store.move_schedule(&a, 0, Day::Wed, PeriodRange::new(5, 6).unwrap()));
    assert!(Arc::ptr_eq(&after, &store.board(&a).unwrap()));

    // Out of range index
    assert!(!store.move_schedule(&a, 9, Day::Mon, PeriodRange::single(1)));
}

#[test]
fn test_subscribers_only_hear_their_table() {
    let (store, a, b) = two_table_store();
    let a_hits = Arc::new(AtomicUsize::new(0));
    let b_hits = Arc::new(AtomicUsize::new(0));
    let id_hits = Arc::new(AtomicUsize::new(0));

    let counter = a_hits.clone();
    let sub_a = subscriber_from_fn(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let counter = b_hits.clone();
    let sub_b = subscriber_from_fn(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let counter = id_hits.clone();
    let sub_ids = subscriber_from_fn(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    store.subscribe(Topic::Table(a.clone()), &sub_a);
    store.subscribe(Topic::Table(b.clone()), &sub_b);
    store.subscribe(Topic::TableIds, &sub_ids);

    store.add_schedules(&a, lecture("L1", "월1"));
    store.remove_schedule(&a, Day::Fri, 9);
    assert_eq!(a_hits.load(Ordering::SeqCst), 1);
    assert_eq!(b_hits.load(Ordering::SeqCst), 0);
    assert_eq!(id_hits.load(Ordering::SeqCst), 0);

    store.duplicate_table(&a);
    assert_eq!(id_hits.load(Ordering::SeqCst), 1);
    assert_eq!(a_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_subscriber_sees_committed_state() {
    let store = Arc::new(ScheduleBoardStore::with_default_table());
    let id = TableId::from("schedule-1");
    let seen = Arc::new(AtomicUsize::new(0));

    let reader = Arc::downgrade(&store);
    let table = id.clone();
    let counter = seen.clone();
    let sub = subscriber_from_fn(move |_| {
        if let Some(store) = reader.upgrade() {
            let len = store.board(&table).map(|b| b.len()).unwrap_or(0);
            counter.store(len, Ordering::SeqCst);
        }
    });
    store.subscribe(Topic::Table(id.clone()), &sub);

    store.add_schedules(&id, lecture("L1", "월1<p>화2"));
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}
