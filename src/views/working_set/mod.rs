//! 工作集视图：把文档模型镜像成侧边栏"打开的文件"列表
//!
//! 纯展示层：订阅模型事件、修补条目状态、把点击转成语义命令；
//! 自己从不改模型、不读文件内容。两处刻意的延迟：
//! - 点击打开推迟到下一轮 tick，先让点击反馈画出来；
//! - 取消选中且面板展开时，收起面板延迟固定时长，给过渡留时间。

mod items;
mod mouse;
mod related_panel;
mod render;

pub use items::{ItemId, ItemList, ItemState, RelatedLink, StatusIcon};
pub use render::{HitTarget, VisualRow};

use ratatui::layout::Rect;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use crate::core::{Command, CommandBusSender, FocusView};
use crate::models::{FileRef, ModelEvent, WorkingSetModel};
use crate::services::{RelatedFilesService, ViewSettings};
use crate::ui::ScrollerShadow;

/// 视图对外广播的变化通知（滚动阴影重算、测试观察点）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewNotification {
    SelectionChanged,
    ContentChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenKind {
    Item,
    Related,
}

#[derive(Debug, Clone)]
struct PendingOpen {
    path: PathBuf,
    kind: OpenKind,
    deadline: Instant,
}

#[derive(Debug, Clone, Copy)]
struct PendingDeselect {
    item: ItemId,
    deadline: Instant,
}

pub struct WorkingSetView {
    items: ItemList,
    model_rx: Receiver<ModelEvent>,
    related: RelatedFilesService,
    commands: CommandBusSender,
    project_root: PathBuf,
    settings: ViewSettings,

    current_doc: Option<FileRef>,
    current_focus: FocusView,
    hovered: Option<ItemId>,

    pending_open: Option<PendingOpen>,
    pending_deselect: Option<PendingDeselect>,

    area: Option<Rect>,
    scroll_offset: usize,
    last_height: usize,
    shadow: ScrollerShadow,
    visual_rows: Vec<VisualRow>,
    notifications: Vec<ViewNotification>,
}

impl WorkingSetView {
    /// 唯一入口：订阅模型并渲染初始列表
    pub fn create(
        model: &mut WorkingSetModel,
        related: RelatedFilesService,
        commands: CommandBusSender,
        project_root: PathBuf,
        settings: ViewSettings,
    ) -> Self {
        let model_rx = model.subscribe();
        let mut view = Self {
            items: ItemList::new(),
            model_rx,
            related,
            commands,
            project_root,
            settings,
            current_doc: model.current_document().cloned(),
            current_focus: model.file_selection_focus(),
            hovered: None,
            pending_open: None,
            pending_deselect: None,
            area: None,
            scroll_offset: 0,
            last_height: 0,
            shadow: ScrollerShadow::default(),
            visual_rows: Vec::new(),
            notifications: Vec::new(),
        };
        view.rebuild(model);
        view
    }

    /// 整体重建：批量变化（初次加载）时使用
    pub fn rebuild(&mut self, model: &WorkingSetModel) {
        self.items.clear();
        self.hovered = None;
        self.pending_deselect = None;
        for file in model.working_set() {
            let is_dirty = model.is_dirty(file.full_path());
            self.items.push(file.clone(), is_dirty);
        }
        self.current_doc = model.current_document().cloned();
        self.current_focus = model.file_selection_focus();
        self.sync_selection(Instant::now());
        self.notify(ViewNotification::ContentChanged);
        self.refresh_decor();
    }

    /// 主循环每帧调用：先模型事件，再查找完成，最后到期的延迟动作
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        loop {
            let event = match self.model_rx.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };
            changed |= self.on_model_event(event, now);
        }

        for msg in self.related.poll() {
            changed |= self.on_related_settled(msg);
        }

        self.poll_pending_open(now);
        changed |= self.poll_pending_deselect(now);

        if changed {
            self.refresh_decor();
        }
        changed
    }

    pub fn take_notifications(&mut self) -> Vec<ViewNotification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn items(&self) -> &ItemList {
        &self.items
    }

    pub fn shadow(&self) -> ScrollerShadow {
        self.shadow
    }

    fn notify(&mut self, notification: ViewNotification) {
        self.notifications.push(notification);
    }

    fn on_model_event(&mut self, event: ModelEvent, now: Instant) -> bool {
        match event {
            ModelEvent::Added { file, is_dirty } => {
                let id = self.items.push(file, is_dirty);
                // 初始选中状态对齐当前模型
                let selected = self.current_focus == FocusView::WorkingSet
                    && self
                        .current_doc
                        .as_ref()
                        .zip(self.items.get(id))
                        .map(|(cur, item)| cur.full_path() == item.file.full_path())
                        .unwrap_or(false);
                if selected {
                    if let Some(item) = self.items.get_mut(id) {
                        item.selected = true;
                    }
                    self.kick_lookup(id);
                }
                self.notify(ViewNotification::ContentChanged);
                true
            }
            ModelEvent::Removed { file } => {
                let Some(id) = self.items.remove(file.full_path()) else {
                    return false;
                };
                if self.pending_deselect.map(|p| p.item) == Some(id) {
                    self.pending_deselect = None;
                }
                if self
                    .pending_open
                    .as_ref()
                    .map(|p| p.path.as_path() == file.full_path())
                    .unwrap_or(false)
                {
                    self.pending_open = None;
                }
                if self.hovered == Some(id) {
                    self.hovered = None;
                }
                self.notify(ViewNotification::ContentChanged);
                true
            }
            ModelEvent::DirtyChanged { file, is_dirty } => {
                let Some(id) = self.items.id_for_path(file.full_path()) else {
                    return false;
                };
                // 悬停中的可关闭标记在脏位变化时保持不变
                let can_close = self.hovered == Some(id);
                self.items.set_status(id, is_dirty, can_close);
                true
            }
            ModelEvent::Saved { file } => {
                let Some(id) = self.items.id_for_path(file.full_path()) else {
                    return false;
                };
                let expanded = self.items.get(id).map(|i| i.expanded).unwrap_or(false);
                if !expanded {
                    return false;
                }
                // 保存后关联集合可能变化：重新查找，完成时重灌面板
                self.related.invalidate(file.full_path());
                self.kick_lookup(id);
                true
            }
            ModelEvent::SelectionFocusChanged { current, focus } => {
                self.current_doc = current;
                self.current_focus = focus;
                self.sync_selection(now)
            }
        }
    }

    /// 对齐选中标记：当前文档匹配且焦点在本列表的条目才选中
    fn sync_selection(&mut self, now: Instant) -> bool {
        let target: Option<PathBuf> = if self.current_focus == FocusView::WorkingSet {
            self.current_doc
                .as_ref()
                .map(|f| f.full_path().to_path_buf())
        } else {
            None
        };

        let mut to_select = Vec::new();
        let mut to_deselect = Vec::new();
        for id in self.items.ids() {
            let Some(item) = self.items.get(id) else {
                continue;
            };
            let selected = target.as_deref() == Some(item.file.full_path());
            if selected && !item.selected {
                to_select.push(id);
            } else if !selected && item.selected {
                to_deselect.push(id);
            }
        }

        let changed = !to_select.is_empty() || !to_deselect.is_empty();
        for id in to_deselect {
            let expanded = {
                let Some(item) = self.items.get_mut(id) else {
                    continue;
                };
                item.selected = false;
                item.expanded
            };
            if expanded {
                self.defer_deselect_collapse(id, now);
            }
        }
        for id in to_select {
            if let Some(item) = self.items.get_mut(id) {
                item.selected = true;
            }
            if self.pending_deselect.map(|p| p.item) == Some(id) {
                self.pending_deselect = None;
            }
            self.kick_lookup(id);
        }

        self.notify(ViewNotification::SelectionChanged);
        changed
    }

    /// 选中移除 + 面板收起延迟执行，给过渡动画留时间
    fn defer_deselect_collapse(&mut self, item: ItemId, now: Instant) {
        self.pending_deselect = Some(PendingDeselect {
            item,
            deadline: now + self.settings.deselect_collapse_delay(),
        });
    }

    /// 把"打开文件"推迟到下一轮 tick
    fn defer_open(&mut self, path: PathBuf, kind: OpenKind, now: Instant) {
        self.pending_open = Some(PendingOpen {
            path,
            kind,
            deadline: now,
        });
    }

    fn poll_pending_open(&mut self, now: Instant) {
        let due = self
            .pending_open
            .as_ref()
            .map(|p| now >= p.deadline)
            .unwrap_or(false);
        if !due {
            return;
        }
        if let Some(pending) = self.pending_open.take() {
            match pending.kind {
                OpenKind::Item => self.commands.send(Command::OpenAndSelect {
                    path: pending.path,
                    view: FocusView::WorkingSet,
                }),
                OpenKind::Related => self.commands.send(Command::AddToWorkingSetAndSelect {
                    path: pending.path,
                }),
            }
        }
    }

    fn poll_pending_deselect(&mut self, now: Instant) -> bool {
        let due = self
            .pending_deselect
            .map(|p| now >= p.deadline)
            .unwrap_or(false);
        if !due {
            return false;
        }
        match self.pending_deselect.take() {
            // 条目可能已随文件移除一起消失；toggle_panel 自会跳过
            Some(pending) => self.toggle_panel(pending.item, false),
            None => false,
        }
    }

    fn refresh_decor(&mut self) {
        self.rebuild_visual_rows();
        self.clamp_scroll();
        self.shadow
            .recompute(self.scroll_offset, self.last_height, self.visual_rows.len());
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/working_set/view.rs"]
mod tests;
