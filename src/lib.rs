//! zworkset - 编辑器侧边栏"打开的文件"视图组件
//!
//! 模块结构：
//! - core: 核心框架（Command, View, Event）
//! - models: 数据模型（WorkingSetModel, FileRef）
//! - services: 服务层（RelatedFilesService, ViewSettings）
//! - views: 视图层（WorkingSetView）
//! - ui: 装饰工具（ScrollerShadow）
//! - app: 主题（UiTheme）

pub mod app;
pub mod core;
pub mod logging;
pub mod models;
pub mod services;
pub mod ui;
pub mod views;
