//! 关联文件服务：异步查找 + 每路径缓存
//!
//! 查找跑在自带的 tokio runtime 上，结果经 mpsc 通道送回 UI 线程；
//! 在途查找不做取消，完成消息晚于条目移除到达时由消费方丢弃。

use rustc_hash::FxHashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use crate::models::{file_ref, FileRef};
use crate::services::ports::{BoxFuture, RelatedError, RelatedFilesBackend, RelatedMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
enum LookupState {
    Loading,
    Loaded(Vec<FileRef>),
    Failed,
}

pub struct RelatedFilesService {
    runtime: tokio::runtime::Runtime,
    backend: Arc<dyn RelatedFilesBackend>,
    tx: Sender<RelatedMessage>,
    rx: Receiver<RelatedMessage>,
    cache: FxHashMap<PathBuf, LookupState>,
}

impl RelatedFilesService {
    pub fn new(backend: Arc<dyn RelatedFilesBackend>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            runtime,
            backend,
            tx,
            rx,
            cache: FxHashMap::default(),
        })
    }

    /// 查找是否已出结果（成功或失败都算）
    pub fn has_loaded(&self, path: &Path) -> bool {
        matches!(
            self.cache.get(path),
            Some(LookupState::Loaded(_)) | Some(LookupState::Failed)
        )
    }

    pub fn is_loading(&self, path: &Path) -> bool {
        matches!(self.cache.get(path), Some(LookupState::Loading))
    }

    /// 发起一次查找；已在途或已有结果时不重复发起
    pub fn find_doc_related_files(&mut self, file: &FileRef) {
        let path = file.full_path().to_path_buf();
        if self.cache.contains_key(&path) {
            return;
        }
        self.cache.insert(path.clone(), LookupState::Loading);

        let tx = self.tx.clone();
        let fut = self.backend.find_related(file.clone());
        self.runtime.spawn(async move {
            let msg = match fut.await {
                Ok(related) => RelatedMessage::Loaded { path, related },
                Err(e) => {
                    tracing::debug!(error = %e, "related lookup failed");
                    RelatedMessage::Failed { path }
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// 丢弃某路径的缓存结果；下一次 `find_doc_related_files` 会重新查找
    pub fn invalidate(&mut self, path: &Path) {
        self.cache.remove(path);
    }

    /// 当前已知的关联集合；未完成或失败时为 None
    pub fn related_files(&self, path: &Path) -> Option<&[FileRef]> {
        match self.cache.get(path) {
            Some(LookupState::Loaded(files)) => Some(files),
            _ => None,
        }
    }

    /// 展示路径：相对项目根；`from` 给定时返回两文件之间的相对引用
    pub fn get_relative_uri(&self, root: &Path, target: &Path, from: Option<&Path>) -> String {
        match from {
            Some(from) => file_ref::relative_reference(from, target),
            None => file_ref::project_relative(root, target),
        }
    }

    /// 收取已完成的查找并更新缓存（UI 线程每帧调用）
    pub fn poll(&mut self) -> Vec<RelatedMessage> {
        let mut settled = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(msg) => {
                    match &msg {
                        RelatedMessage::Loaded { path, related } => {
                            self.cache
                                .insert(path.clone(), LookupState::Loaded(related.clone()));
                        }
                        RelatedMessage::Failed { path } => {
                            self.cache.insert(path.clone(), LookupState::Failed);
                        }
                    }
                    settled.push(msg);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        settled
    }

    /// 阻塞等待在途查找（仅测试用）
    #[cfg(test)]
    pub(crate) fn recv_blocking(&mut self) -> Option<RelatedMessage> {
        self.rx.recv().ok().map(|msg| {
            match &msg {
                RelatedMessage::Loaded { path, related } => {
                    self.cache
                        .insert(path.clone(), LookupState::Loaded(related.clone()));
                }
                RelatedMessage::Failed { path } => {
                    self.cache.insert(path.clone(), LookupState::Failed);
                }
            }
            msg
        })
    }
}

/// 同目录同词干的伴生文件查找（`foo.rs` ↔ `foo_test.rs`、`foo.h` ↔ `foo.c`）
pub struct CompanionFileBackend;

impl CompanionFileBackend {
    /// 词干归一化：去掉常见的测试后缀，`foo_test` 与 `foo.spec` 都归到 `foo`
    fn base_stem(path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_string_lossy();
        let stem = stem
            .strip_suffix("_test")
            .or_else(|| stem.strip_suffix("-test"))
            .or_else(|| stem.strip_suffix(".test"))
            .or_else(|| stem.strip_suffix(".spec"))
            .unwrap_or(&stem);
        Some(stem.to_ascii_lowercase())
    }
}

impl RelatedFilesBackend for CompanionFileBackend {
    fn find_related(&self, file: FileRef) -> BoxFuture<Result<Vec<FileRef>, RelatedError>> {
        Box::pin(async move {
            let path = file.full_path().to_path_buf();
            let dir = path
                .parent()
                .ok_or_else(|| RelatedError::Io("no parent directory".to_string()))?
                .to_path_buf();
            let Some(stem) = Self::base_stem(&path) else {
                return Ok(Vec::new());
            };

            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .map_err(|e| RelatedError::Io(e.to_string()))?;
            let mut related = Vec::new();
            loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(e) => return Err(RelatedError::Io(e.to_string())),
                };
                let candidate = entry.path();
                if candidate == path {
                    continue;
                }
                let is_file = entry
                    .file_type()
                    .await
                    .map(|t| t.is_file())
                    .unwrap_or(false);
                if !is_file {
                    continue;
                }
                if Self::base_stem(&candidate) == Some(stem.clone()) {
                    related.push(FileRef::new(candidate));
                }
            }

            related.sort_by(|a, b| a.name().cmp(b.name()));
            Ok(related)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/related.rs"]
mod tests;
