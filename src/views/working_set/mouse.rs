//! 鼠标路由：命中测试结果 → 选中/关闭/展开/打开关联文件

use crossterm::event::{MouseButton, MouseEvent};
use std::time::Instant;

use super::{HitTarget, ItemId, OpenKind, ViewNotification, WorkingSetView};
use crate::core::{Command, EventResult, InputEvent, MouseAction};

impl WorkingSetView {
    pub fn handle_input(&mut self, event: &InputEvent, now: Instant) -> EventResult {
        match event {
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => EventResult::Ignored,
        }
    }

    pub fn handle_mouse(&mut self, event: &MouseEvent, now: Instant) -> EventResult {
        let Some(action) = MouseAction::from_kind(event.kind) else {
            return EventResult::Ignored;
        };

        if !self.contains(event.column, event.row) {
            // 指针离开列表：撤掉悬停态的可关闭标记
            if self.update_hover(None) {
                return EventResult::Consumed;
            }
            return EventResult::Ignored;
        }

        match action {
            MouseAction::Moved => {
                let target = self.hit_test(event).map(|t| t.item());
                self.update_hover(target);
                EventResult::Consumed
            }
            MouseAction::Down(MouseButton::Left) => match self.hit_test(event) {
                Some(target) => self.on_click(target, now),
                None => EventResult::Consumed,
            },
            MouseAction::ScrollUp => self.scroll_by(-1),
            MouseAction::ScrollDown => self.scroll_by(1),
            _ => EventResult::Ignored,
        }
    }

    fn on_click(&mut self, target: HitTarget, now: Instant) -> EventResult {
        match target {
            HitTarget::StatusIcon(id) => {
                // 完整的应用层关闭动作，可能触发未保存确认
                if let Some(item) = self.items.get(id) {
                    self.commands.send(Command::CloseFile {
                        path: item.file.full_path().to_path_buf(),
                    });
                }
                EventResult::Consumed
            }
            HitTarget::ItemBody(id) => {
                self.select_item(id, now);
                EventResult::Consumed
            }
            HitTarget::RelatedToggle(id) => {
                let expanded = self.items.get(id).map(|i| i.expanded).unwrap_or(false);
                self.toggle_panel(id, !expanded);
                self.refresh_decor();
                EventResult::Consumed
            }
            HitTarget::RelatedLink(id, idx) => {
                let link_path = self
                    .items
                    .get(id)
                    .and_then(|item| item.panel.get(idx))
                    .map(|link| link.file.full_path().to_path_buf());
                let Some(path) = link_path else {
                    return EventResult::Consumed;
                };
                // 先收面板、去掉可关闭标记，打开动作让出一轮再发
                self.toggle_panel(id, false);
                let dirty = self.items.get(id).map(|i| i.is_dirty()).unwrap_or(false);
                self.items.set_status(id, dirty, false);
                self.defer_open(path, OpenKind::Related, now);
                self.refresh_decor();
                EventResult::Consumed
            }
        }
    }

    /// 点击条目：立即给选中反馈，打开命令推迟到下一轮 tick
    fn select_item(&mut self, id: ItemId, now: Instant) {
        let Some(path) = self
            .items
            .get(id)
            .map(|item| item.file.full_path().to_path_buf())
        else {
            return;
        };

        let others: Vec<ItemId> = self.items.ids().filter(|other| *other != id).collect();
        for other in others {
            let expanded_deselect = {
                let Some(item) = self.items.get_mut(other) else {
                    continue;
                };
                let was = item.selected;
                item.selected = false;
                was && item.expanded
            };
            if expanded_deselect {
                self.defer_deselect_collapse(other, now);
            }
        }
        if let Some(item) = self.items.get_mut(id) {
            item.selected = true;
        }
        self.kick_lookup(id);
        self.defer_open(path, OpenKind::Item, now);
        self.notify(ViewNotification::SelectionChanged);
    }

    fn update_hover(&mut self, target: Option<ItemId>) -> bool {
        if target == self.hovered {
            return false;
        }

        if let Some(old) = self.hovered.take() {
            let dirty = self.items.get(old).map(|i| i.is_dirty()).unwrap_or(false);
            self.items.set_status(old, dirty, false);
        }
        if let Some(id) = target {
            let dirty = self.items.get(id).map(|i| i.is_dirty()).unwrap_or(false);
            self.items.set_status(id, dirty, true);
            self.kick_lookup(id);
        }
        self.hovered = target;
        true
    }

    fn scroll_by(&mut self, delta: isize) -> EventResult {
        let max = self
            .visual_rows
            .len()
            .saturating_sub(self.last_height.max(1));
        let next = self
            .scroll_offset
            .saturating_add_signed(delta)
            .min(max);
        if next == self.scroll_offset {
            return EventResult::Ignored;
        }
        self.scroll_offset = next;
        self.shadow
            .recompute(self.scroll_offset, self.last_height, self.visual_rows.len());
        EventResult::Consumed
    }
}
