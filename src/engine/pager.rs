use std::ops::Range;

/// Derived paging geometry for one catalog level: one leading filler page
/// (the wraparound anchor for the loop-style pager), `ceil(N/C)` content
/// pages with the last one padded, then empty pages up to `min_pages` so the
/// pager's loop always has enough slides.
#[derive(Clone, Copy, Debug)]
pub struct PageModel {
    pub item_count: usize,
    pub per_page: usize,
    pub min_pages: usize,
}

impl PageModel {
    pub fn new(item_count: usize, per_page: usize, min_pages: usize) -> Self {
        Self {
            item_count,
            per_page: per_page.max(1),
            min_pages,
        }
    }

    pub fn content_pages(&self) -> usize {
        self.item_count.div_ceil(self.per_page)
    }

    pub fn total_pages(&self) -> usize {
        (1 + self.content_pages()).max(self.min_pages)
    }

    /// External page id shown when this slot is focused. Content pages start
    /// at id 1; id 0 is the leading filler page.
    pub fn page_id_of_index(&self, index: usize) -> usize {
        index / self.per_page + 1
    }

    /// Item indices rendered on a page. Empty for the leading filler page and
    /// for trailing padding pages.
    pub fn content_range(&self, page_id: usize) -> Range<usize> {
        if page_id == 0 {
            return 0..0;
        }
        let start = (page_id - 1) * self.per_page;
        if start >= self.item_count {
            return 0..0;
        }
        start..(start + self.per_page).min(self.item_count)
    }
}

/// Engine-issued request for the paging widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page_id: usize,
    pub animate: bool,
}

/// Notification from the paging widget after one of its transitions settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageChanged {
    pub page_id: usize,
    pub caused_by_user: bool,
}

/// What the caller should do with a widget notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageOutcome {
    /// Stale or irrelevant; nothing changes.
    Ignored,
    /// A previously requested jump settled; focus was already correct.
    Consumed,
    /// User-driven page change reconciled into a new focus index.
    FocusMoved(usize),
    /// The landed page holds no real items; jump one further in the same
    /// direction.
    Skip(PageRequest),
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    target: usize,
    /// Set on skip jumps: the landing page still needs focus reconciliation
    /// (and possibly another skip). Keyboard-driven jumps carry their focus
    /// with them and settle silently.
    reconcile: bool,
    forward: bool,
}

/// Keeps logical focus and the externally animated paging widget agreed on
/// which page is showing. The pending entry doubles as the reentrancy guard:
/// while a requested jump is in flight, user-path reconciliation is off, and
/// notifications for any other page are stale and dropped (last-writer-wins).
#[derive(Debug, Default)]
pub struct PageSynchronizer {
    pending: Option<Pending>,
}

impl PageSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a requested jump has not settled yet.
    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Focus moved (keyboard or programmatic): if its page differs from what
    /// the widget shows, request a jump. The guard is armed before the
    /// request is handed over, so the widget's eventual notification cannot
    /// be mistaken for a user drag.
    pub fn sync_focus(
        &mut self,
        model: &PageModel,
        focus_index: usize,
        widget_page: usize,
    ) -> Option<PageRequest> {
        let want = model.page_id_of_index(focus_index);
        if want == widget_page && self.pending.is_none() {
            return None;
        }
        // Re-arming while a jump is in flight supersedes it; the widget
        // retargets and only the newest jump's notification will match. When
        // focus came back to the page still on screen, snap without animating.
        let animate = want != widget_page;
        self.pending = Some(Pending {
            target: want,
            reconcile: false,
            forward: true,
        });
        Some(PageRequest {
            page_id: want,
            animate,
        })
    }

    /// Widget notification, fed through the single ordered consumption path.
    /// `from_page` is the page the widget was showing before the transition.
    pub fn on_page_changed(
        &mut self,
        model: &PageModel,
        msg: PageChanged,
        from_page: usize,
        focus_index: usize,
    ) -> PageOutcome {
        if let Some(pending) = self.pending {
            if msg.page_id != pending.target {
                log::debug!(
                    "stale page notification {} while waiting for {}",
                    msg.page_id,
                    pending.target
                );
                return PageOutcome::Ignored;
            }
            self.pending = None;
            if !pending.reconcile {
                return PageOutcome::Consumed;
            }
            // Settled skip jump: land the focus here, or keep walking if this
            // page is empty too.
            return self.reconcile(model, msg.page_id, pending.forward, focus_index);
        }

        if !msg.caused_by_user {
            return PageOutcome::Ignored;
        }

        let forward = is_forward(from_page, msg.page_id, model.total_pages());
        self.reconcile(model, msg.page_id, forward, focus_index)
    }

    /// Forget any in-flight jump. Called on level and layout switches so the
    /// pending transition can't write into the new context.
    pub fn reset(&mut self) {
        self.pending = None;
    }

    fn reconcile(
        &mut self,
        model: &PageModel,
        page_id: usize,
        forward: bool,
        focus_index: usize,
    ) -> PageOutcome {
        let range = model.content_range(page_id);
        if range.is_empty() {
            if model.content_pages() == 0 {
                return PageOutcome::Ignored;
            }
            let total = model.total_pages();
            let next = if forward {
                (page_id + 1) % total
            } else {
                (page_id + total - 1) % total
            };
            self.pending = Some(Pending {
                target: next,
                reconcile: true,
                forward,
            });
            return PageOutcome::Skip(PageRequest {
                page_id: next,
                animate: true,
            });
        }

        // Same row on the new page when it exists, else the nearest one.
        let row = focus_index % model.per_page;
        let new_index = range.start + row.min(range.len() - 1);
        PageOutcome::FocusMoved(new_index)
    }
}

/// Travel direction of a wrap-around page step, judged by the shorter way
/// round. User scrolls move one page at a time, so this is exact.
fn is_forward(from: usize, to: usize, total: usize) -> bool {
    if total == 0 {
        return true;
    }
    let forward = (to + total - from) % total;
    let backward = (from + total - to) % total;
    forward != 0 && forward <= backward
}
