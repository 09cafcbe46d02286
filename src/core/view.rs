//! 视图系统：事件结果与选择焦点定义

/// 输入事件处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, EventResult::Ignored)
    }
}

/// 哪个视图当前拥有"活动文档"语义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusView {
    WorkingSet,
    Editor,
}

impl Default for FocusView {
    fn default() -> Self {
        FocusView::Editor
    }
}
