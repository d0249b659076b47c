use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::engine::{PageChanged, PageRequest};
use crate::ui::theme::Theme;

/// The paging widget the engine synchronizes against. It owns which page is
/// on screen and animates transitions over event ticks; the engine only
/// learns about a page change from the notification emitted when a
/// transition settles, which is what makes the page-change path genuinely
/// asynchronous relative to the input that caused it.
#[derive(Debug)]
pub struct Pager {
    current: usize,
    total: usize,
    transition: Option<Transition>,
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    to: usize,
    caused_by_user: bool,
    forward: bool,
    remaining: u16,
    duration: u16,
}

/// What the card area should draw: the page, and how far it still is from
/// its resting position (1.0 = just started, 0.0 = settled).
#[derive(Clone, Copy, Debug)]
pub struct VisualPage {
    pub page_id: usize,
    pub offset: f32,
    pub forward: bool,
}

impl Pager {
    pub fn new(total: usize) -> Self {
        Self {
            current: 1.min(total.saturating_sub(1)),
            total: total.max(1),
            transition: None,
        }
    }

    pub fn page(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Level or layout changed: the old transition belongs to a page model
    /// that no longer exists, so drop it and snap to `page`.
    pub fn rebuild(&mut self, total: usize, page: usize) {
        self.total = total.max(1);
        self.current = page.min(self.total - 1);
        self.transition = None;
    }

    /// Engine-requested jump. Supersedes any transition still in flight.
    pub fn apply(&mut self, req: PageRequest, ticks: u16) {
        let to = req.page_id % self.total;
        let forward = is_forward(self.current, to, self.total);
        let duration = if req.animate { ticks } else { 0 };
        self.transition = Some(Transition {
            to,
            caused_by_user: false,
            forward,
            remaining: duration,
            duration,
        });
    }

    /// User-driven page flip (PageDown / PageUp). Wraps around the rendered
    /// pages; flipping again mid-transition retargets from the pending page.
    pub fn scroll_next(&mut self, ticks: u16) {
        let base = self.transition.map_or(self.current, |t| t.to);
        self.start_user_transition((base + 1) % self.total, true, ticks);
    }

    pub fn scroll_prev(&mut self, ticks: u16) {
        let base = self.transition.map_or(self.current, |t| t.to);
        self.start_user_transition((base + self.total - 1) % self.total, false, ticks);
    }

    /// Advance the animation one tick. When a transition settles, the shown
    /// page flips and the notification for the engine is returned along with
    /// the page the widget was on before.
    pub fn on_tick(&mut self) -> Option<(PageChanged, usize)> {
        let mut transition = self.transition?;
        if transition.remaining > 0 {
            transition.remaining -= 1;
            self.transition = Some(transition);
            return None;
        }
        self.transition = None;
        let from = self.current;
        self.current = transition.to;
        Some((
            PageChanged {
                page_id: transition.to,
                caused_by_user: transition.caused_by_user,
            },
            from,
        ))
    }

    pub fn visual(&self) -> VisualPage {
        match self.transition {
            Some(t) => VisualPage {
                page_id: t.to,
                offset: if t.duration == 0 {
                    0.0
                } else {
                    t.remaining as f32 / t.duration as f32
                },
                forward: t.forward,
            },
            None => VisualPage {
                page_id: self.current,
                offset: 0.0,
                forward: true,
            },
        }
    }

    fn start_user_transition(&mut self, to: usize, forward: bool, ticks: u16) {
        if to == self.current && self.transition.is_none() {
            return;
        }
        self.transition = Some(Transition {
            to,
            caused_by_user: true,
            forward,
            remaining: ticks,
            duration: ticks,
        });
    }
}

fn is_forward(from: usize, to: usize, total: usize) -> bool {
    let forward = (to + total - from) % total;
    let backward = (from + total - to) % total;
    forward != 0 && forward <= backward
}

/// Dot strip showing which rendered page is up.
pub struct PagerDots<'a> {
    pager: &'a Pager,
    theme: &'a Theme,
}

impl<'a> PagerDots<'a> {
    pub fn new(pager: &'a Pager, theme: &'a Theme) -> Self {
        Self { pager, theme }
    }
}

impl Widget for PagerDots<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let shown = self.pager.visual().page_id;
        let spans: Vec<Span> = (0..self.pager.total())
            .flat_map(|page| {
                let style = if page == shown {
                    Style::default().fg(colors.accent())
                } else {
                    Style::default().fg(colors.accent_dim())
                };
                [
                    Span::styled(if page == shown { "●" } else { "○" }, style),
                    Span::raw(" "),
                ]
            })
            .collect();
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
