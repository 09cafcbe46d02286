//! 工作集模型：打开的文件、脏标记、当前文档
//!
//! 视图通过 `subscribe` 拿到事件接收端；订阅端被丢弃后，
//! 下一次广播会把失效的发送端清理掉（即视图的退订）。

use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::core::FocusView;
use crate::models::FileRef;

#[derive(Debug, Clone)]
pub enum ModelEvent {
    Added {
        file: FileRef,
        is_dirty: bool,
    },
    Removed {
        file: FileRef,
    },
    DirtyChanged {
        file: FileRef,
        is_dirty: bool,
    },
    Saved {
        file: FileRef,
    },
    SelectionFocusChanged {
        current: Option<FileRef>,
        focus: FocusView,
    },
}

pub struct WorkingSetModel {
    files: Vec<FileRef>,
    dirty: FxHashSet<PathBuf>,
    current: Option<FileRef>,
    focus: FocusView,
    subscribers: Vec<Sender<ModelEvent>>,
}

impl WorkingSetModel {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            dirty: FxHashSet::default(),
            current: None,
            focus: FocusView::default(),
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> Receiver<ModelEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: ModelEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    // ==================== 查询 ====================

    pub fn working_set(&self) -> &[FileRef] {
        &self.files
    }

    pub fn current_document(&self) -> Option<&FileRef> {
        self.current.as_ref()
    }

    pub fn open_document_for_path(&self, path: &Path) -> Option<&FileRef> {
        self.files.iter().find(|f| f.full_path() == path)
    }

    pub fn is_dirty(&self, path: &Path) -> bool {
        self.dirty.contains(path)
    }

    pub fn file_selection_focus(&self) -> FocusView {
        self.focus
    }

    // ==================== 变更（宿主侧） ====================

    /// 追加一个文件；按路径去重
    pub fn add(&mut self, file: FileRef) -> bool {
        if self.open_document_for_path(file.full_path()).is_some() {
            return false;
        }
        let is_dirty = self.is_dirty(file.full_path());
        self.files.push(file.clone());
        self.emit(ModelEvent::Added { file, is_dirty });
        true
    }

    pub fn remove(&mut self, path: &Path) -> Option<FileRef> {
        let idx = self.files.iter().position(|f| f.full_path() == path)?;
        let file = self.files.remove(idx);
        self.dirty.remove(path);
        self.emit(ModelEvent::Removed { file: file.clone() });
        Some(file)
    }

    pub fn set_dirty(&mut self, path: &Path, is_dirty: bool) -> bool {
        let Some(file) = self.open_document_for_path(path).cloned() else {
            return false;
        };
        let changed = if is_dirty {
            self.dirty.insert(path.to_path_buf())
        } else {
            self.dirty.remove(path)
        };
        if changed {
            self.emit(ModelEvent::DirtyChanged { file, is_dirty });
        }
        changed
    }

    /// 文档已写盘：清脏标记并广播保存事件
    pub fn notify_saved(&mut self, path: &Path) {
        let Some(file) = self.open_document_for_path(path).cloned() else {
            return;
        };
        self.set_dirty(path, false);
        self.emit(ModelEvent::Saved { file });
    }

    /// 切换当前文档与选择焦点；`path` 为 None 表示焦点移出了文件列表
    pub fn set_current(&mut self, path: Option<&Path>, focus: FocusView) {
        self.current = path.map(|p| {
            self.open_document_for_path(p)
                .cloned()
                .unwrap_or_else(|| FileRef::new(p))
        });
        self.focus = focus;
        let current = self.current.clone();
        self.emit(ModelEvent::SelectionFocusChanged { current, focus });
    }
}

impl Default for WorkingSetModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/working_set.rs"]
mod tests;
