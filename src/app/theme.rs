//! UI 主题：把可配置的颜色集中管理，避免散落在渲染代码里。

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub sidebar_bg: Color,
    pub sidebar_fg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub muted_fg: Color,
    pub accent_fg: Color,
    pub dirty_fg: Color,
    pub shadow_fg: Color,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            sidebar_bg: Color::Rgb(24, 26, 32),
            sidebar_fg: Color::Rgb(200, 204, 212),
            selected_bg: Color::Rgb(48, 54, 66),
            selected_fg: Color::Rgb(235, 238, 245),
            muted_fg: Color::Rgb(120, 126, 140),
            accent_fg: Color::Rgb(110, 168, 254),
            dirty_fg: Color::Rgb(224, 175, 104),
            shadow_fg: Color::Rgb(70, 74, 86),
        }
    }
}
