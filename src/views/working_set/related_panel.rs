//! 关联文件面板：展开/收起、懒加载、徽标
//!
//! 面板内容只在展开期间存在，收起即清空；重新展开总是从
//! 解析服务的最新结果重灌，不留旧数据。

use super::{ItemId, RelatedLink, ViewNotification, WorkingSetView};
use crate::services::RelatedMessage;

impl WorkingSetView {
    /// open ⇒ 展开并灌入内容；close ⇒ 收起并清空
    pub fn toggle_panel(&mut self, id: ItemId, open: bool) -> bool {
        if open {
            let Some(item) = self.items.get_mut(id) else {
                return false;
            };
            item.expanded = true;
            self.kick_lookup(id);
            self.populate(id);
            self.notify(ViewNotification::ContentChanged);
            true
        } else {
            let Some(item) = self.items.get_mut(id) else {
                return false;
            };
            if !item.expanded && item.panel.is_empty() {
                return false;
            }
            item.expanded = false;
            item.panel.clear();
            self.notify(ViewNotification::ContentChanged);
            true
        }
    }

    /// 用解析服务当前的关联集合重灌面板
    pub(super) fn populate(&mut self, id: ItemId) {
        let Some(item) = self.items.get(id) else {
            return;
        };
        let path = item.file.full_path().to_path_buf();

        let links: Vec<RelatedLink> = match self.related.related_files(&path) {
            Some(files) => files
                .iter()
                .map(|f| RelatedLink {
                    file: f.clone(),
                    display: self
                        .related
                        .get_relative_uri(&self.project_root, f.full_path(), None),
                    tooltip: self.related.get_relative_uri(
                        &self.project_root,
                        f.full_path(),
                        Some(&path),
                    ),
                })
                .collect(),
            None => Vec::new(),
        };

        if let Some(item) = self.items.get_mut(id) {
            item.has_related = !links.is_empty();
            item.panel = links;
        }
    }

    /// 不展开面板，仅按解析结果打/清"有关联文件"徽标
    pub fn refresh_badge(&mut self, id: ItemId) -> bool {
        let has = {
            let Some(item) = self.items.get(id) else {
                return false;
            };
            self.related
                .related_files(item.file.full_path())
                .map(|files| !files.is_empty())
                .unwrap_or(false)
        };
        match self.items.get_mut(id) {
            Some(item) if item.has_related != has => {
                item.has_related = has;
                true
            }
            _ => false,
        }
    }

    /// 悬停或选中时发起查找；已出结果就只刷新徽标
    pub(super) fn kick_lookup(&mut self, id: ItemId) -> bool {
        let Some(item) = self.items.get(id) else {
            return false;
        };
        let file = item.file.clone();

        if self.related.has_loaded(file.full_path()) {
            return self.refresh_badge(id);
        }

        self.related.find_doc_related_files(&file);
        let loading = self.related.is_loading(file.full_path());
        match self.items.get_mut(id) {
            Some(item) if item.related_loading != loading => {
                item.related_loading = loading;
                true
            }
            _ => false,
        }
    }

    /// 查找完成；目标条目可能已被移除，此时仅记日志
    pub(super) fn on_related_settled(&mut self, msg: RelatedMessage) -> bool {
        let path = msg.path().clone();
        let Some(id) = self.items.id_for_path(&path) else {
            tracing::debug!(path = %path.display(), "related lookup settled after item removal");
            return false;
        };

        match msg {
            RelatedMessage::Loaded { .. } => {
                if let Some(item) = self.items.get_mut(id) {
                    item.related_loading = false;
                }
                self.refresh_badge(id);
                let expanded = self.items.get(id).map(|i| i.expanded).unwrap_or(false);
                if expanded {
                    self.populate(id);
                }
                self.notify(ViewNotification::ContentChanged);
                true
            }
            RelatedMessage::Failed { .. } => {
                // 失败：清掉加载与关联指示，不向上传播
                if let Some(item) = self.items.get_mut(id) {
                    item.related_loading = false;
                    item.has_related = false;
                    item.panel.clear();
                }
                true
            }
        }
    }
}
