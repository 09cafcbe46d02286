use super::*;
use crate::models::FileRef;
use std::path::Path;

fn file(path: &str) -> FileRef {
    FileRef::new(path)
}

#[test]
fn test_add_emits_and_dedupes() {
    let mut model = WorkingSetModel::new();
    let rx = model.subscribe();

    assert!(model.add(file("/proj/a.rs")));
    assert!(!model.add(file("/proj/a.rs")));
    assert_eq!(model.working_set().len(), 1);

    match rx.try_recv() {
        Ok(ModelEvent::Added { file, is_dirty }) => {
            assert_eq!(file.name(), "a.rs");
            assert!(!is_dirty);
        }
        other => panic!("expected Added, got {:?}", other),
    }
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_remove_clears_dirty_flag() {
    let mut model = WorkingSetModel::new();
    model.add(file("/proj/a.rs"));
    model.set_dirty(Path::new("/proj/a.rs"), true);
    assert!(model.is_dirty(Path::new("/proj/a.rs")));

    let removed = model.remove(Path::new("/proj/a.rs"));
    assert_eq!(removed.map(|f| f.name().to_string()), Some("a.rs".into()));
    assert!(!model.is_dirty(Path::new("/proj/a.rs")));
    assert!(model.remove(Path::new("/proj/a.rs")).is_none());
}

#[test]
fn test_dirty_change_only_fires_on_transitions() {
    let mut model = WorkingSetModel::new();
    model.add(file("/proj/a.rs"));
    let rx = model.subscribe();

    assert!(model.set_dirty(Path::new("/proj/a.rs"), true));
    assert!(!model.set_dirty(Path::new("/proj/a.rs"), true));
    assert!(!model.set_dirty(Path::new("/proj/missing.rs"), true));

    match rx.try_recv() {
        Ok(ModelEvent::DirtyChanged { is_dirty, .. }) => assert!(is_dirty),
        other => panic!("expected DirtyChanged, got {:?}", other),
    }
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_saved_clears_dirty_then_broadcasts() {
    let mut model = WorkingSetModel::new();
    model.add(file("/proj/a.rs"));
    model.set_dirty(Path::new("/proj/a.rs"), true);
    let rx = model.subscribe();

    model.notify_saved(Path::new("/proj/a.rs"));
    assert!(!model.is_dirty(Path::new("/proj/a.rs")));

    match rx.try_recv() {
        Ok(ModelEvent::DirtyChanged { is_dirty, .. }) => assert!(!is_dirty),
        other => panic!("expected DirtyChanged, got {:?}", other),
    }
    match rx.try_recv() {
        Ok(ModelEvent::Saved { file }) => assert_eq!(file.name(), "a.rs"),
        other => panic!("expected Saved, got {:?}", other),
    }
}

#[test]
fn test_set_current_outside_working_set() {
    let mut model = WorkingSetModel::new();
    model.add(file("/proj/a.rs"));

    model.set_current(Some(Path::new("/proj/untracked.rs")), FocusView::Editor);
    assert_eq!(
        model.current_document().map(|f| f.name().to_string()),
        Some("untracked.rs".into())
    );
    assert_eq!(model.file_selection_focus(), FocusView::Editor);
    assert!(model
        .open_document_for_path(Path::new("/proj/untracked.rs"))
        .is_none());
}

#[test]
fn test_dropped_subscriber_is_pruned() {
    let mut model = WorkingSetModel::new();
    let rx = model.subscribe();
    drop(rx);

    model.add(file("/proj/a.rs"));
    assert!(model.subscribers.is_empty());
}
