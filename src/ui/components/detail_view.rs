use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::catalog::LinkKind;
use crate::engine::{DetailSequencer, Fragment};
use crate::ui::theme::Theme;

/// One leaf's detail screen: description blocks in reading order, then the
/// action rows. The sequencer's focused fragment is highlighted; rendering
/// starts a couple of fragments above it so the focus stays in view without
/// tracking exact wrapped heights.
pub struct DetailView<'a> {
    title: &'a str,
    seq: &'a DetailSequencer,
    theme: &'a Theme,
}

impl<'a> DetailView<'a> {
    pub fn new(title: &'a str, seq: &'a DetailSequencer, theme: &'a Theme) -> Self {
        Self { title, seq, theme }
    }
}

impl Widget for DetailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let fragments = self.seq.fragments();
        if fragments.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No content.",
                Style::default().fg(colors.dim()),
            )))
            .render(inner, buf);
            return;
        }

        let focus = self.seq.index();
        let start = focus.saturating_sub(2);

        let mut lines: Vec<Line> = Vec::new();
        for (i, fragment) in fragments.iter().enumerate().skip(start) {
            let focused = i == focus;
            let indicator = if focused { "> " } else { "  " };
            match fragment {
                Fragment::Text(text) => {
                    let style = if focused {
                        Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(colors.fg())
                    };
                    lines.push(Line::from(vec![
                        Span::styled(
                            indicator,
                            Style::default().fg(colors.accent()),
                        ),
                        Span::styled(text.clone(), style),
                    ]));
                    lines.push(Line::from(""));
                }
                Fragment::Action(link) => {
                    let disabled = link.kind == LinkKind::Disabled;
                    let style = if disabled {
                        Style::default().fg(colors.dim())
                    } else if focused {
                        Style::default()
                            .fg(colors.accent())
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(colors.accent())
                    };
                    let label = match link.kind {
                        LinkKind::Download => format!("[{}] ⇩", link.text),
                        _ => format!("[{}]", link.text),
                    };
                    let mut spans = vec![
                        Span::styled(indicator, Style::default().fg(colors.accent())),
                        Span::styled(label, style),
                    ];
                    if !disabled {
                        spans.push(Span::styled(
                            format!("  {}", link.url),
                            Style::default().fg(colors.dim()),
                        ));
                    }
                    lines.push(Line::from(spans));
                    lines.push(Line::from(""));
                }
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
