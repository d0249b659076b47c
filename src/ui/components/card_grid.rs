use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::{Slot, SlotKind};
use crate::ui::theme::Theme;

/// One page of cards, side by side. `focus_row` is the focused slot's offset
/// within this page, if the focus is on it. `offset`/`forward` carry the
/// pager's slide animation: the whole page is drawn shifted and clipped until
/// the transition settles.
pub struct CardGrid<'a> {
    slots: &'a [Slot],
    focus_row: Option<usize>,
    offset: f32,
    forward: bool,
    theme: &'a Theme,
}

impl<'a> CardGrid<'a> {
    pub fn new(slots: &'a [Slot], focus_row: Option<usize>, theme: &'a Theme) -> Self {
        Self {
            slots,
            focus_row,
            offset: 0.0,
            forward: true,
            theme,
        }
    }

    pub fn slide(mut self, offset: f32, forward: bool) -> Self {
        self.offset = offset;
        self.forward = forward;
        self
    }
}

impl Widget for CardGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.slots.is_empty() || area.width == 0 {
            return;
        }
        let colors = &self.theme.colors;

        let shift = (self.offset * area.width as f32) as i32;
        let dx = if self.forward { shift } else { -shift };

        let card_width = (area.width as usize / self.slots.len()) as u16;
        if card_width < 4 {
            return;
        }

        for (i, slot) in self.slots.iter().enumerate() {
            let ideal_x = area.x as i32 + i as i32 * card_width as i32 + dx;
            let Some(card_area) = clip_horizontal(ideal_x, card_width, area) else {
                continue;
            };

            let focused = self.focus_row == Some(i);
            render_card(slot, focused, card_area, buf, colors);
        }
    }
}

fn render_card(
    slot: &Slot,
    focused: bool,
    area: Rect,
    buf: &mut Buffer,
    colors: &crate::ui::theme::ThemeColors,
) {
    let border_color = if focused {
        colors.border_focused()
    } else {
        colors.border()
    };
    let block = Block::bordered()
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(area);
    block.render(area, buf);

    if slot.kind == SlotKind::Filler {
        return;
    }

    let title_style = if focused {
        Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD)
    } else if slot.active {
        Style::default().fg(colors.fg())
    } else {
        Style::default().fg(colors.dim())
    };

    let tag = match slot.kind {
        SlotKind::Category => "section",
        SlotKind::Leaf => "item",
        _ => "",
    };
    let tag_text = if slot.active {
        tag.to_string()
    } else {
        format!("{tag} (empty)")
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(slot.title.clone(), title_style)),
        Line::from(Span::styled(
            tag_text,
            Style::default().fg(colors.dim()),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

/// Clip a horizontally shifted card against the page area; cards sliding out
/// of view shrink and then disappear.
fn clip_horizontal(ideal_x: i32, width: u16, area: Rect) -> Option<Rect> {
    let left = ideal_x.max(area.x as i32);
    let right = (ideal_x + width as i32).min((area.x + area.width) as i32);
    if right <= left {
        return None;
    }
    Some(Rect::new(
        left as u16,
        area.y,
        (right - left) as u16,
        area.height,
    ))
}

/// Narrow-viewport rendition of a level: synthetic breadcrumb and back rows
/// followed by one row per item, windowed around the focus.
pub struct CardList<'a> {
    slots: &'a [Slot],
    focus: usize,
    theme: &'a Theme,
}

impl<'a> CardList<'a> {
    pub fn new(slots: &'a [Slot], focus: usize, theme: &'a Theme) -> Self {
        Self { slots, focus, theme }
    }
}

impl Widget for CardList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.slots.is_empty() || area.height == 0 {
            return;
        }
        let colors = &self.theme.colors;

        let visible = area.height as usize / 2;
        let start = windowed_start(self.focus, self.slots.len(), visible.max(1));

        for (row, (i, slot)) in self
            .slots
            .iter()
            .enumerate()
            .skip(start)
            .take(visible.max(1))
            .enumerate()
        {
            let y = area.y + (row as u16) * 2;
            let row_area = Rect::new(area.x, y, area.width, 2.min(area.height - (y - area.y)));
            let focused = i == self.focus;
            let indicator = if focused { ">" } else { " " };

            let (label, style) = match slot.kind {
                SlotKind::SyntheticBreadcrumb => (
                    slot.title.clone(),
                    Style::default().fg(colors.dim()).add_modifier(Modifier::ITALIC),
                ),
                SlotKind::SyntheticBack => (
                    format!("← {}", slot.title),
                    Style::default().fg(colors.accent()),
                ),
                _ if !slot.active => (
                    format!("{} (empty)", slot.title),
                    Style::default().fg(colors.dim()),
                ),
                SlotKind::Category => (
                    format!("{} ▸", slot.title),
                    Style::default().fg(colors.fg()),
                ),
                _ => (slot.title.clone(), Style::default().fg(colors.fg())),
            };

            let style = if focused {
                style.fg(colors.accent()).add_modifier(Modifier::BOLD)
            } else {
                style
            };

            Paragraph::new(Line::from(vec![
                Span::styled(format!(" {indicator} "), style),
                Span::styled(label, style),
            ]))
            .render(row_area, buf);
        }
    }
}

fn windowed_start(focus: usize, len: usize, visible: usize) -> usize {
    if len <= visible {
        return 0;
    }
    focus
        .saturating_sub(visible / 2)
        .min(len - visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windowed_start_tracks_focus() {
        assert_eq!(windowed_start(0, 20, 5), 0);
        assert_eq!(windowed_start(10, 20, 5), 8);
        assert_eq!(windowed_start(19, 20, 5), 15);
        assert_eq!(windowed_start(3, 4, 10), 0);
    }

    #[test]
    fn test_clip_horizontal() {
        let area = Rect::new(10, 0, 30, 5);
        // Fully inside
        assert_eq!(clip_horizontal(12, 10, area), Some(Rect::new(12, 0, 10, 5)));
        // Sliding off the left edge
        assert_eq!(clip_horizontal(5, 10, area), Some(Rect::new(10, 0, 5, 5)));
        // Entirely out of view
        assert_eq!(clip_horizontal(45, 10, area), None);
        assert_eq!(clip_horizontal(-20, 10, area), None);
    }
}
