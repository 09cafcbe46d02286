//! 数据模型层

pub mod file_ref;
pub mod working_set;

pub use file_ref::{project_relative, relative_reference, FileRef};
pub use working_set::{ModelEvent, WorkingSetModel};
