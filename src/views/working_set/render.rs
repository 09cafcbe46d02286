//! 工作集视图渲染与命中测试（纯渲染，状态变更都在事件路由里）

use crossterm::event::MouseEvent;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use super::{ItemId, ItemState, RelatedLink, WorkingSetView};
use crate::app::UiTheme;
use crate::ui::decor::sidebar_list_style;

/// 图标区（行首）与徽标区（行尾）的列宽
const ICON_ZONE: u16 = 2;
const BADGE_ZONE: u16 = 2;
/// 最右一列留给滚动暗示
const SCROLL_GUTTER: u16 = 1;
const RELATED_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualRow {
    Item(ItemId),
    Related(ItemId, usize),
}

/// 一次点击落在哪个区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    StatusIcon(ItemId),
    ItemBody(ItemId),
    RelatedToggle(ItemId),
    RelatedLink(ItemId, usize),
}

impl HitTarget {
    pub fn item(&self) -> ItemId {
        match self {
            HitTarget::StatusIcon(id)
            | HitTarget::ItemBody(id)
            | HitTarget::RelatedToggle(id)
            | HitTarget::RelatedLink(id, _) => *id,
        }
    }
}

impl WorkingSetView {
    /// 工作集为空时整个容器隐藏
    pub fn is_visible(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area
            .map(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
            .unwrap_or(false)
    }

    /// 条目行 + 展开面板的关联行，按模型顺序平铺
    pub(super) fn rebuild_visual_rows(&mut self) {
        self.visual_rows.clear();
        let ids: Vec<ItemId> = self.items.ids().collect();
        for id in ids {
            let Some(item) = self.items.get(id) else {
                continue;
            };
            self.visual_rows.push(VisualRow::Item(id));
            if item.expanded {
                for idx in 0..item.panel.len() {
                    self.visual_rows.push(VisualRow::Related(id, idx));
                }
            }
        }
    }

    pub(super) fn clamp_scroll(&mut self) {
        let max = self
            .visual_rows
            .len()
            .saturating_sub(self.last_height.max(1));
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
    }

    pub(super) fn hit_test(&self, event: &MouseEvent) -> Option<HitTarget> {
        let area = self.area?;
        if !self.contains(event.column, event.row) {
            return None;
        }

        let row = (event.row - area.y) as usize + self.scroll_offset;
        let vrow = *self.visual_rows.get(row)?;
        match vrow {
            VisualRow::Related(id, idx) => Some(HitTarget::RelatedLink(id, idx)),
            VisualRow::Item(id) => {
                let item = self.items.get(id)?;
                let x = event.column - area.x;
                let badge_start = area
                    .width
                    .saturating_sub(BADGE_ZONE + SCROLL_GUTTER);
                if x < ICON_ZONE && item.icon.is_some() {
                    Some(HitTarget::StatusIcon(id))
                } else if x >= badge_start && item.has_related {
                    Some(HitTarget::RelatedToggle(id))
                } else {
                    Some(HitTarget::ItemBody(id))
                }
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        self.area = Some(area);
        self.last_height = area.height as usize;
        self.rebuild_visual_rows();
        self.clamp_scroll();
        self.shadow
            .recompute(self.scroll_offset, self.last_height, self.visual_rows.len());

        if !self.is_visible() {
            return;
        }

        let visible_end = (self.scroll_offset + self.last_height).min(self.visual_rows.len());
        let window = &self.visual_rows[self.scroll_offset..visible_end];

        let mut lines: Vec<Line> = Vec::with_capacity(window.len());
        for (offset, vrow) in window.iter().enumerate() {
            let gutter = self.gutter_glyph(offset, window.len());
            let line = match *vrow {
                VisualRow::Item(id) => match self.items.get(id) {
                    Some(item) => self.render_item_row(item, area.width, gutter, theme),
                    None => Line::default(),
                },
                VisualRow::Related(id, idx) => match self
                    .items
                    .get(id)
                    .and_then(|item| item.panel.get(idx))
                {
                    Some(link) => self.render_related_row(link, area.width, gutter, theme),
                    None => Line::default(),
                },
            };
            lines.push(line);
        }

        frame.render_widget(
            Paragraph::new(lines).style(sidebar_list_style(theme)),
            area,
        );
    }

    fn gutter_glyph(&self, offset: usize, window_len: usize) -> &'static str {
        if offset == 0 && self.shadow.top {
            "▲"
        } else if offset + 1 == window_len && self.shadow.bottom {
            "▼"
        } else {
            " "
        }
    }

    fn render_item_row(
        &self,
        item: &ItemState,
        width: u16,
        gutter: &'static str,
        theme: &UiTheme,
    ) -> Line<'static> {
        let content_width =
            width.saturating_sub(ICON_ZONE + BADGE_ZONE + SCROLL_GUTTER) as usize;

        let (icon, icon_style) = match item.icon {
            Some(icon) if icon.can_close => (
                "× ",
                if icon.dirty {
                    Style::default().fg(theme.dirty_fg)
                } else {
                    Style::default().fg(theme.accent_fg)
                },
            ),
            Some(icon) if icon.dirty => ("● ", Style::default().fg(theme.dirty_fg)),
            _ => ("  ", Style::default()),
        };

        let (name, name_width) = truncate_to_width(item.file.name(), content_width);
        let pad = " ".repeat(content_width.saturating_sub(name_width));

        let badge = if item.related_loading {
            "… "
        } else if item.expanded {
            "▾ "
        } else if item.has_related && self.settings.show_related_badges {
            "▸ "
        } else {
            "  "
        };

        let row_style = if item.selected {
            Style::default()
                .bg(theme.selected_bg)
                .fg(theme.selected_fg)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::styled(icon.to_string(), row_style.patch(icon_style)),
            Span::styled(name, row_style),
            Span::styled(pad, row_style),
            Span::styled(badge.to_string(), row_style.fg(theme.accent_fg)),
            Span::styled(gutter.to_string(), Style::default().fg(theme.shadow_fg)),
        ])
    }

    fn render_related_row(
        &self,
        link: &RelatedLink,
        width: u16,
        gutter: &'static str,
        theme: &UiTheme,
    ) -> Line<'static> {
        let content_width = width.saturating_sub(SCROLL_GUTTER) as usize;
        let indent_width = RELATED_INDENT.len();
        let avail = content_width.saturating_sub(indent_width);

        let (display, display_width) = truncate_to_width(&link.display, avail);
        let mut spans = vec![
            Span::raw(RELATED_INDENT),
            Span::styled(display, Style::default().fg(theme.sidebar_fg)),
        ];

        // 宽度富余时把相对引用淡色附在后面（终端里没有悬浮提示）
        let tooltip = format!("  {}", link.tooltip);
        let tooltip_width = str_width(&tooltip);
        let used = indent_width + display_width;
        if used + tooltip_width <= content_width {
            spans.push(Span::styled(tooltip, Style::default().fg(theme.muted_fg)));
            let pad = content_width - used - tooltip_width;
            spans.push(Span::raw(" ".repeat(pad)));
        } else {
            spans.push(Span::raw(" ".repeat(content_width.saturating_sub(used))));
        }

        spans.push(Span::styled(
            gutter.to_string(),
            Style::default().fg(theme.shadow_fg),
        ));
        Line::from(spans)
    }
}

fn str_width(s: &str) -> usize {
    s.chars().filter_map(UnicodeWidthChar::width).sum()
}

/// 截断到指定显示宽度；截断时末尾补 '…'
fn truncate_to_width(s: &str, max: usize) -> (String, usize) {
    let full = str_width(s);
    if full <= max {
        return (s.to_string(), full);
    }
    if max == 0 {
        return (String::new(), 0);
    }

    let mut out = String::new();
    let mut width = 0usize;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    (out, width + 1)
}

#[cfg(test)]
#[path = "../../../tests/unit/views/working_set/render.rs"]
mod tests;
