//! Service ports: traits + data contracts.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::models::FileRef;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// 关联文件的查找策略；实现方只负责"找"，缓存与去重在服务里
pub trait RelatedFilesBackend: Send + Sync + 'static {
    fn find_related(&self, file: FileRef) -> BoxFuture<Result<Vec<FileRef>, RelatedError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelatedError {
    Io(String),
    Unavailable,
}

impl fmt::Display for RelatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelatedError::Io(msg) => write!(f, "related lookup io error: {}", msg),
            RelatedError::Unavailable => write!(f, "related lookup unavailable"),
        }
    }
}

impl std::error::Error for RelatedError {}

/// 查找完成消息；条目可能在消息到达前已被移除，消费方需容忍
#[derive(Debug, Clone)]
pub enum RelatedMessage {
    Loaded {
        path: PathBuf,
        related: Vec<FileRef>,
    },
    Failed {
        path: PathBuf,
    },
}

impl RelatedMessage {
    pub fn path(&self) -> &PathBuf {
        match self {
            RelatedMessage::Loaded { path, .. } | RelatedMessage::Failed { path } => path,
        }
    }
}
