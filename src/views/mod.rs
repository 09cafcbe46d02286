//! 视图层

pub mod working_set;

pub use working_set::{WorkingSetView, ViewNotification};
