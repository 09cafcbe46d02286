//! 工作集条目的视图状态：slotmap 仲裁 + 模型顺序
//!
//! 条目用稳定 id 关联文件引用与视图状态，路径索引用于按事件里的
//! 文件定位条目；找不到时一律静默跳过（文件可能已被移除）。

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::path::{Path, PathBuf};

use crate::models::FileRef;

new_key_type! { pub struct ItemId; }

/// 关联文件链接：展示路径相对项目根，提示串是两文件间的相对引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedLink {
    pub file: FileRef,
    pub display: String,
    pub tooltip: String,
}

/// 状态小图标；只有脏或可关闭时才存在
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIcon {
    pub dirty: bool,
    pub can_close: bool,
}

#[derive(Debug, Clone)]
pub struct ItemState {
    pub file: FileRef,
    pub selected: bool,
    pub expanded: bool,
    pub related_loading: bool,
    pub has_related: bool,
    pub icon: Option<StatusIcon>,
    pub panel: Vec<RelatedLink>,
}

impl ItemState {
    fn new(file: FileRef, is_dirty: bool) -> Self {
        Self {
            file,
            selected: false,
            expanded: false,
            related_loading: false,
            has_related: false,
            icon: is_dirty.then_some(StatusIcon {
                dirty: true,
                can_close: false,
            }),
            panel: Vec::new(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.icon.map(|i| i.dirty).unwrap_or(false)
    }

    pub fn can_close(&self) -> bool {
        self.icon.map(|i| i.can_close).unwrap_or(false)
    }
}

#[derive(Default)]
pub struct ItemList {
    arena: SlotMap<ItemId, ItemState>,
    order: Vec<ItemId>,
    id_by_path: FxHashMap<PathBuf, ItemId>,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.order.clear();
        self.id_by_path.clear();
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.order.iter().copied()
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemState> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut ItemState> {
        self.arena.get_mut(id)
    }

    pub fn id_for_path(&self, path: &Path) -> Option<ItemId> {
        self.id_by_path.get(path).copied()
    }

    /// 末尾追加；同一路径已有条目时返回已有 id
    pub fn push(&mut self, file: FileRef, is_dirty: bool) -> ItemId {
        if let Some(id) = self.id_for_path(file.full_path()) {
            return id;
        }
        let path = file.full_path().to_path_buf();
        let id = self.arena.insert(ItemState::new(file, is_dirty));
        self.order.push(id);
        self.id_by_path.insert(path, id);
        id
    }

    /// 按路径移除；不存在时静默返回 None
    pub fn remove(&mut self, path: &Path) -> Option<ItemId> {
        let id = self.id_by_path.remove(path)?;
        self.arena.remove(id);
        self.order.retain(|other| *other != id);
        Some(id)
    }

    /// 图标随 (dirty, can_close) 懒创建、双假时销毁
    pub fn set_status(&mut self, id: ItemId, is_dirty: bool, can_close: bool) {
        let Some(item) = self.arena.get_mut(id) else {
            return;
        };
        item.icon = (is_dirty || can_close).then_some(StatusIcon {
            dirty: is_dirty,
            can_close,
        });
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.order
            .iter()
            .filter_map(|id| self.arena.get(*id))
            .map(|item| item.file.full_path().to_path_buf())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.arena.values().filter(|item| item.selected).count()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/working_set/items.rs"]
mod tests;
