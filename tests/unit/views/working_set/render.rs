use super::*;
use crate::core::command::command_bus;
use crate::models::{FileRef, WorkingSetModel};
use crate::services::ports::{BoxFuture, RelatedError, RelatedFilesBackend};
use crate::services::{RelatedFilesService, ViewSettings};
use crate::views::working_set::{RelatedLink, WorkingSetView};
use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct EmptyBackend;

impl RelatedFilesBackend for EmptyBackend {
    fn find_related(&self, _file: FileRef) -> BoxFuture<Result<Vec<FileRef>, RelatedError>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

fn view_with(files: &[&str]) -> WorkingSetView {
    let mut model = WorkingSetModel::new();
    for path in files {
        model.add(FileRef::new(*path));
    }
    let (tx, _rx) = command_bus();
    let related = RelatedFilesService::new(Arc::new(EmptyBackend)).expect("runtime");
    let mut view = WorkingSetView::create(
        &mut model,
        related,
        tx,
        PathBuf::from("/proj"),
        ViewSettings::default(),
    );
    view.area = Some(Rect::new(0, 0, 30, 10));
    view.last_height = 10;
    view.rebuild_visual_rows();
    view
}

fn line_text(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

fn mouse_at(x: u16, y: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: x,
        row: y,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn test_item_row_dirty_marker_at_row_start() {
    let view = view_with(&["/proj/a.rs"]);
    let theme = UiTheme::default();
    let id = view.items.id_for_path(Path::new("/proj/a.rs")).unwrap();

    let mut view = view;
    view.items.set_status(id, true, false);
    let item = view.items.get(id).unwrap();
    let text = line_text(&view.render_item_row(item, 30, " ", &theme));
    assert!(text.starts_with("● "));
    assert!(text.contains("a.rs"));
}

#[test]
fn test_item_row_close_marker_wins_while_hovered() {
    let mut view = view_with(&["/proj/a.rs"]);
    let theme = UiTheme::default();
    let id = view.items.id_for_path(Path::new("/proj/a.rs")).unwrap();

    view.items.set_status(id, true, true);
    let item = view.items.get(id).unwrap();
    let text = line_text(&view.render_item_row(item, 30, " ", &theme));
    assert!(text.starts_with("× "));
}

#[test]
fn test_item_row_badges() {
    let mut view = view_with(&["/proj/a.rs"]);
    let theme = UiTheme::default();
    let id = view.items.id_for_path(Path::new("/proj/a.rs")).unwrap();

    view.items.get_mut(id).unwrap().has_related = true;
    let text = line_text(&view.render_item_row(view.items.get(id).unwrap(), 30, " ", &theme));
    assert!(text.contains('▸'));

    view.items.get_mut(id).unwrap().expanded = true;
    let text = line_text(&view.render_item_row(view.items.get(id).unwrap(), 30, " ", &theme));
    assert!(text.contains('▾'));

    view.items.get_mut(id).unwrap().related_loading = true;
    let text = line_text(&view.render_item_row(view.items.get(id).unwrap(), 30, " ", &theme));
    assert!(text.contains('…'));
}

#[test]
fn test_item_row_width_is_constant() {
    let view = view_with(&["/proj/a_very_long_file_name_that_overflows.rs"]);
    let theme = UiTheme::default();
    let id = view
        .items
        .id_for_path(Path::new("/proj/a_very_long_file_name_that_overflows.rs"))
        .unwrap();

    let text = line_text(&view.render_item_row(view.items.get(id).unwrap(), 20, " ", &theme));
    assert_eq!(str_width(&text), 20);
    assert!(text.contains('…'));
}

#[test]
fn test_related_row_shows_display_and_tooltip() {
    let view = view_with(&["/proj/src/a.rs"]);
    let theme = UiTheme::default();
    let link = RelatedLink {
        file: FileRef::new("/proj/src/a_test.rs"),
        display: "src/a_test.rs".to_string(),
        tooltip: "a_test.rs".to_string(),
    };

    let text = line_text(&view.render_related_row(&link, 40, " ", &theme));
    assert!(text.starts_with("    src/a_test.rs"));
    assert!(text.contains("  a_test.rs"));

    // 行宽不足时只保展示路径
    let narrow = line_text(&view.render_related_row(&link, 20, " ", &theme));
    assert!(narrow.contains("src/a_test.rs"));
    assert!(!narrow.contains("  a_test.rs"));
}

#[test]
fn test_hit_test_zones() {
    let mut view = view_with(&["/proj/a.rs"]);
    let id = view.items.id_for_path(Path::new("/proj/a.rs")).unwrap();
    view.items.set_status(id, false, true);
    view.items.get_mut(id).unwrap().has_related = true;
    view.items.get_mut(id).unwrap().expanded = true;
    view.items.get_mut(id).unwrap().panel = vec![RelatedLink {
        file: FileRef::new("/proj/a_test.rs"),
        display: "a_test.rs".to_string(),
        tooltip: "a_test.rs".to_string(),
    }];
    view.rebuild_visual_rows();

    assert_eq!(
        view.hit_test(&mouse_at(0, 0)),
        Some(HitTarget::StatusIcon(id))
    );
    assert_eq!(
        view.hit_test(&mouse_at(10, 0)),
        Some(HitTarget::ItemBody(id))
    );
    assert_eq!(
        view.hit_test(&mouse_at(28, 0)),
        Some(HitTarget::RelatedToggle(id))
    );
    assert_eq!(
        view.hit_test(&mouse_at(10, 1)),
        Some(HitTarget::RelatedLink(id, 0))
    );
    assert_eq!(view.hit_test(&mouse_at(10, 5)), None);
    assert_eq!(view.hit_test(&mouse_at(40, 0)), None);
}

#[test]
fn test_hit_test_without_icon_hits_body() {
    let view = view_with(&["/proj/a.rs"]);
    let id = view.items.id_for_path(Path::new("/proj/a.rs")).unwrap();
    assert_eq!(
        view.hit_test(&mouse_at(0, 0)),
        Some(HitTarget::ItemBody(id))
    );
}

#[test]
fn test_hit_test_respects_scroll_offset() {
    let mut view = view_with(&["/proj/a.rs", "/proj/b.rs", "/proj/c.rs"]);
    view.scroll_offset = 1;
    let b = view.items.id_for_path(Path::new("/proj/b.rs")).unwrap();
    assert_eq!(view.hit_test(&mouse_at(10, 0)), Some(HitTarget::ItemBody(b)));
}

#[test]
fn test_gutter_glyphs_follow_shadow() {
    let mut view = view_with(&["/proj/a.rs"]);
    view.shadow.top = true;
    view.shadow.bottom = true;
    assert_eq!(view.gutter_glyph(0, 3), "▲");
    assert_eq!(view.gutter_glyph(2, 3), "▼");
    assert_eq!(view.gutter_glyph(1, 3), " ");
}

#[test]
fn test_truncate_to_width() {
    assert_eq!(truncate_to_width("abc", 5), ("abc".to_string(), 3));
    assert_eq!(truncate_to_width("abcdef", 4), ("abc…".to_string(), 4));
    assert_eq!(truncate_to_width("abc", 0), (String::new(), 0));
}
