use plantrace_core::Scale;
use plantrace_designer::catalog::ItemKind;
use plantrace_designer::history::{History, HistoryState};
use plantrace_designer::model::{PlacedItem, Point, Site};

fn snapshot(i: usize) -> HistoryState {
    let x = i as f64 * 10.0;
    HistoryState {
        site: Site::tracing(vec![Point::new(x, 0.0)]),
        items: vec![PlacedItem::new(
            ItemKind::Fence,
            vec![Point::new(0.0, x), Point::new(100.0, x)],
        )],
        scale: Scale::new(50.0 + i as f64).ok(),
        drawings: Vec::new(),
    }
}

#[test]
fn test_undo_redo_reproduces_snapshots() {
    let n = 6;
    let states: Vec<HistoryState> = (1..=n).map(snapshot).collect();
    let mut history = History::new();
    for state in &states {
        history.commit(state.clone());
    }

    for i in (0..n - 1).rev() {
        assert_eq!(history.undo(), Some(&states[i]));
    }
    for state in states.iter().skip(1) {
        assert_eq!(history.redo(), Some(state));
    }
    assert!(!history.can_redo());
    assert_eq!(history.current(), states.last());
}

#[test]
fn test_commit_after_undo_discards_redo() {
    let (first, second, third) = (snapshot(1), snapshot(2), snapshot(3));
    let mut history = History::new();
    history.commit(first.clone());
    history.commit(second);
    history.undo();
    history.commit(third.clone());
    assert_eq!(history.redo_count(), 0);
    assert_eq!(history.undo(), Some(&first));
    assert_eq!(history.redo(), Some(&third));
}
