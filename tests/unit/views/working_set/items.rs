use super::*;
use crate::models::FileRef;
use std::path::Path;

#[test]
fn test_push_keeps_model_order() {
    let mut list = ItemList::new();
    list.push(FileRef::new("/proj/b.rs"), false);
    list.push(FileRef::new("/proj/a.rs"), false);
    list.push(FileRef::new("/proj/c.rs"), true);

    assert_eq!(list.len(), 3);
    assert_eq!(
        list.paths(),
        vec![
            Path::new("/proj/b.rs").to_path_buf(),
            Path::new("/proj/a.rs").to_path_buf(),
            Path::new("/proj/c.rs").to_path_buf(),
        ]
    );
}

#[test]
fn test_push_then_remove_restores_prior_set() {
    let mut list = ItemList::new();
    list.push(FileRef::new("/proj/a.rs"), false);
    let before = list.paths();

    list.push(FileRef::new("/proj/b.rs"), false);
    assert!(list.remove(Path::new("/proj/b.rs")).is_some());
    assert_eq!(list.paths(), before);
}

#[test]
fn test_push_dedupes_by_path() {
    let mut list = ItemList::new();
    let first = list.push(FileRef::new("/proj/a.rs"), false);
    let second = list.push(FileRef::new("/proj/a.rs"), true);
    assert_eq!(first, second);
    assert_eq!(list.len(), 1);
}

#[test]
fn test_remove_missing_is_noop() {
    let mut list = ItemList::new();
    list.push(FileRef::new("/proj/a.rs"), false);
    assert!(list.remove(Path::new("/proj/ghost.rs")).is_none());
    assert_eq!(list.len(), 1);
}

#[test]
fn test_status_icon_lazy_lifecycle() {
    let mut list = ItemList::new();
    let id = list.push(FileRef::new("/proj/a.rs"), false);
    assert!(list.get(id).unwrap().icon.is_none());

    // 悬停：出现可关闭图标
    list.set_status(id, false, true);
    let icon = list.get(id).unwrap().icon.unwrap();
    assert!(icon.can_close);
    assert!(!icon.dirty);

    // 悬停中变脏：两个标记独立共存
    list.set_status(id, true, true);
    let icon = list.get(id).unwrap().icon.unwrap();
    assert!(icon.can_close);
    assert!(icon.dirty);

    // 两个标记都消失时图标销毁
    list.set_status(id, false, false);
    assert!(list.get(id).unwrap().icon.is_none());
}

#[test]
fn test_dirty_on_creation() {
    let mut list = ItemList::new();
    let id = list.push(FileRef::new("/proj/a.rs"), true);
    let item = list.get(id).unwrap();
    assert!(item.is_dirty());
    assert!(!item.can_close());
}
