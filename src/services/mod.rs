//! 服务层：端口（trait + 数据契约）与适配器

pub mod config;
pub mod ports;
pub mod related;

pub use config::{load_settings, ViewSettings};
pub use ports::{BoxFuture, RelatedError, RelatedFilesBackend, RelatedMessage};
pub use related::{CompanionFileBackend, RelatedFilesService};
