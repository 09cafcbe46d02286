//! 列表装饰：滚动阴影 + 侧边栏样式

use ratatui::style::Style;

use crate::app::UiTheme;

/// 列表上下边缘的滚动暗示；内容变化或选中变化后重算
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollerShadow {
    pub top: bool,
    pub bottom: bool,
}

impl ScrollerShadow {
    pub fn recompute(&mut self, scroll_offset: usize, visible: usize, total: usize) {
        self.top = scroll_offset > 0;
        self.bottom = scroll_offset + visible < total;
    }
}

pub fn sidebar_list_style(theme: &UiTheme) -> Style {
    Style::default().bg(theme.sidebar_bg).fg(theme.sidebar_fg)
}
