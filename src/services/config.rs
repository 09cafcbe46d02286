//! 视图设置：JSON 文件，缺失或损坏时用默认值

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettings {
    /// 取消选中时面板收起前的延迟（给过渡动画留时间）
    #[serde(default = "default_deselect_delay_ms")]
    pub deselect_collapse_delay_ms: u64,
    #[serde(default = "default_show_badges")]
    pub show_related_badges: bool,
}

fn default_deselect_delay_ms() -> u64 {
    250
}

fn default_show_badges() -> bool {
    true
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            deselect_collapse_delay_ms: default_deselect_delay_ms(),
            show_related_badges: default_show_badges(),
        }
    }
}

impl ViewSettings {
    pub fn deselect_collapse_delay(&self) -> Duration {
        Duration::from_millis(self.deselect_collapse_delay_ms)
    }
}

pub fn load_settings(path: &Path) -> ViewSettings {
    let Ok(data) = std::fs::read_to_string(path) else {
        return ViewSettings::default();
    };
    match serde_json::from_str(&data) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "invalid settings file, using defaults");
            ViewSettings::default()
        }
    }
}
