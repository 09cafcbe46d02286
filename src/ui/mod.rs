pub mod decor;

pub use decor::{sidebar_list_style, ScrollerShadow};
