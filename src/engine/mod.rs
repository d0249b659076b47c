pub mod detail;
pub mod error;
pub mod focus;
pub mod layout;
pub mod nav_stack;
pub mod pager;

use crate::catalog::CatalogTree;

pub use detail::{DetailAction, DetailMemory, DetailSequencer, Fragment};
pub use error::NavError;
pub use layout::{Breakpoints, GridMode};
pub use nav_stack::{NavLevel, NavStack};
pub use pager::{PageChanged, PageModel, PageOutcome, PageRequest, PageSynchronizer};

/// What a rendered slot is. Resolved once while building the render model;
/// activation behavior comes from this tag, never from rendered output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    Category,
    Leaf,
    Filler,
    SyntheticBack,
    SyntheticBreadcrumb,
}

/// One card (or list row) of the current level's render model.
#[derive(Clone, Debug)]
pub struct Slot {
    pub kind: SlotKind,
    pub id: Option<String>,
    pub title: String,
    pub active: bool,
}

impl Slot {
    fn filler() -> Self {
        Self {
            kind: SlotKind::Filler,
            id: None,
            title: String::new(),
            active: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Result of activating the focused slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Focused slot was inert (filler, breadcrumb, inactive node).
    None,
    /// Descended into a category; the level changed.
    EnteredLevel,
    /// A leaf wants its detail view opened.
    OpenDetail(String),
    /// The synthetic back row popped one level.
    WentBack,
}

/// The navigation and focus state for one browsing session. Owns the
/// immutable catalog tree, the level history, the focus position (stored on
/// the stack's top entry) and the page synchronizer; the host applies the
/// returned [`PageRequest`]s to its paging widget and feeds the widget's
/// notifications back in.
pub struct NavigationEngine {
    tree: CatalogTree,
    nav: NavStack,
    mode: GridMode,
    sync: PageSynchronizer,
    detail_memory: DetailMemory,
    min_pages: usize,
}

impl NavigationEngine {
    pub fn new(tree: CatalogTree, mode: GridMode, min_pages: usize) -> Self {
        Self {
            tree,
            nav: NavStack::new(),
            mode,
            sync: PageSynchronizer::new(),
            detail_memory: DetailMemory::default(),
            min_pages,
        }
    }

    pub fn tree(&self) -> &CatalogTree {
        &self.tree
    }

    pub fn mode(&self) -> GridMode {
        self.mode
    }

    pub fn is_sub_level(&self) -> bool {
        !self.nav.is_root()
    }

    /// Title trail for the header / breadcrumb row.
    pub fn breadcrumb(&self) -> String {
        let mut trail = vec!["Catalog".to_string()];
        if let Some(id) = self.nav.current_level_id() {
            trail.extend(self.tree.title_path(id));
        }
        trail.join(" / ")
    }

    /// Focusable slots of the current level: synthetic lead rows (list mode
    /// only) followed by the level's real items. Fillers are not focusable
    /// and never appear here.
    pub fn current_slots(&mut self) -> Vec<Slot> {
        let level_id = self.nav.current_level_id().map(str::to_string);
        let children = match self.tree.children_of(level_id.as_deref()) {
            Some(children) => children,
            None => {
                // A stack entry stopped resolving; heal to the root level.
                log::warn!("level {level_id:?} no longer resolves, falling back to root");
                self.nav = NavStack::new();
                self.sync.reset();
                self.tree.children_of(None).unwrap_or_default()
            }
        };

        let mut slots = Vec::new();
        if self.mode == GridMode::List {
            slots.push(Slot {
                kind: SlotKind::SyntheticBreadcrumb,
                id: None,
                title: self.breadcrumb(),
                active: false,
            });
            if !self.nav.is_root() {
                slots.push(Slot {
                    kind: SlotKind::SyntheticBack,
                    id: None,
                    title: "Back".to_string(),
                    active: true,
                });
            }
        }
        for node in children {
            slots.push(Slot {
                kind: if node.is_leaf() {
                    SlotKind::Leaf
                } else {
                    SlotKind::Category
                },
                id: Some(node.id.clone()),
                title: node.title().to_string(),
                active: self.tree.has_active_content(&node.id),
            });
        }
        slots
    }

    /// Paging geometry for the current level in the current mode.
    pub fn page_model(&mut self) -> PageModel {
        let count = self.current_slots().len();
        PageModel::new(count, self.mode.items_per_page(), self.min_pages)
    }

    /// The slots rendered on one page: always exactly `items_per_page` of
    /// them, padded with fillers past the end of the real items.
    pub fn page_slots(&mut self, page_id: usize) -> Vec<Slot> {
        let slots = self.current_slots();
        let model = PageModel::new(slots.len(), self.mode.items_per_page(), self.min_pages);
        let range = model.content_range(page_id);
        let mut page: Vec<Slot> = slots[range].to_vec();
        page.resize_with(self.mode.items_per_page(), Slot::filler);
        page
    }

    pub fn focus_index(&mut self) -> usize {
        let count = self.current_slots().len();
        focus::clamp_index(self.nav.current_focus(), count)
    }

    /// External page id the focus currently sits on.
    pub fn focus_page_id(&mut self) -> usize {
        let model = self.page_model();
        model.page_id_of_index(self.focus_index())
    }

    /// One directional input. Returns a page jump for the widget when the
    /// move left the widget's shown page behind.
    pub fn move_focus(&mut self, dir: Direction, widget_page: usize) -> Option<PageRequest> {
        let count = self.current_slots().len();
        if count == 0 {
            return None;
        }
        let per_page = self.mode.items_per_page();
        let index = focus::clamp_index(self.nav.current_focus(), count);
        let new_index = match dir {
            Direction::Up => focus::move_up(index, count),
            Direction::Down => focus::move_down(index, count),
            Direction::Left => focus::move_left(index, count, per_page),
            Direction::Right => focus::move_right(index, count, per_page),
        };
        self.nav.update_current_focus(new_index);

        if !self.mode.is_paged() {
            return None;
        }
        let model = PageModel::new(count, per_page, self.min_pages);
        self.sync.sync_focus(&model, new_index, widget_page)
    }

    /// Enter/Space on the focused slot.
    pub fn activate(&mut self) -> Activation {
        let slots = self.current_slots();
        let Some(slot) = slots.get(self.focus_index()) else {
            return Activation::None;
        };
        match slot.kind {
            SlotKind::SyntheticBack => {
                if self.back() {
                    Activation::WentBack
                } else {
                    Activation::None
                }
            }
            SlotKind::Category if slot.active => {
                let id = slot.id.clone().expect("category slot carries an id");
                let focus = self.focus_index();
                self.nav.push(id, focus);
                self.sync.reset();
                Activation::EnteredLevel
            }
            SlotKind::Leaf if slot.active => {
                Activation::OpenDetail(slot.id.clone().expect("leaf slot carries an id"))
            }
            _ => Activation::None,
        }
    }

    /// Pop one level (Esc / back row). False at the root.
    pub fn back(&mut self) -> bool {
        if self.nav.pop().is_none() {
            return false;
        }
        self.sync.reset();
        true
    }

    /// Viewport class changed: re-base the focus index so the user stays on
    /// the same conceptual item despite the synthetic rows appearing or
    /// disappearing, and drop any in-flight page jump.
    pub fn set_mode(&mut self, new_mode: GridMode) {
        if new_mode == self.mode {
            return;
        }
        let old_mode = self.mode;
        let old_index = self.nav.current_focus();
        let is_sub = self.is_sub_level();
        self.mode = new_mode;
        let new_count = self.current_slots().len();
        let rebased = layout::rebase_index(old_index, old_mode, new_mode, is_sub, new_count);
        self.nav.update_current_focus(rebased);
        self.sync.reset();
    }

    /// Widget notification, forwarded from the host. A `FocusMoved` outcome
    /// is applied to the stack before returning; a `Skip` must be handed back
    /// to the widget by the caller.
    pub fn on_page_changed(&mut self, msg: PageChanged, from_page: usize) -> PageOutcome {
        if !self.mode.is_paged() {
            return PageOutcome::Ignored;
        }
        let model = self.page_model();
        let focus = self.focus_index();
        let outcome = self.sync.on_page_changed(&model, msg, from_page, focus);
        if let PageOutcome::FocusMoved(index) = outcome {
            self.nav.update_current_focus(index);
        }
        outcome
    }

    /// Build the detail sequencer for a leaf, resuming its remembered
    /// fragment focus.
    pub fn open_detail(&mut self, leaf_id: &str) -> Result<DetailSequencer, NavError> {
        let leaf = self
            .tree
            .find_by_id(leaf_id)
            .ok_or_else(|| NavError::NodeNotFound(leaf_id.to_string()))?;
        Ok(DetailSequencer::for_leaf(
            leaf,
            self.detail_memory.recall(leaf_id),
        ))
    }

    /// Store the detail view's focus for the next visit.
    pub fn close_detail(&mut self, seq: &DetailSequencer) {
        self.detail_memory.remember(seq.leaf_id(), seq.index());
    }

    /// Resolve a deep-link id: rebuild the history to the target's ancestor
    /// chain and report whether a detail view should open on top. On an
    /// unresolved id the session state is untouched.
    pub fn deep_link(&mut self, id: &str) -> Result<Activation, NavError> {
        let is_leaf = self
            .tree
            .find_by_id(id)
            .ok_or_else(|| NavError::NodeNotFound(id.to_string()))?
            .is_leaf();
        self.nav.rebuild_from_id(&self.tree, id)?;
        self.sync.reset();
        if is_leaf {
            Ok(Activation::OpenDetail(id.to_string()))
        } else {
            Ok(Activation::EnteredLevel)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn engine(mode: GridMode) -> NavigationEngine {
        let json = r#"{
            "items": [
                {
                    "id": "catA",
                    "name": "Cat A",
                    "items": [
                        {"id": "course-1", "leafTitle": "One", "description": "First."},
                        {"id": "course-2", "leafTitle": "Two", "description": "Second."},
                        {"id": "course-3", "leafTitle": "Three", "description": "Third."},
                        {"id": "course-4", "leafTitle": "Four", "description": "Fourth."}
                    ]
                },
                {"id": "catB", "name": "Cat B", "subsections": [{"id": "catB-1", "name": "Empty"}]},
                {"id": "course-5", "leafTitle": "Five", "description": "Fifth."},
                {"id": "course-6", "leafTitle": "Six", "description": "Sixth."},
                {"id": "bare", "leafTitle": "Bare"},
                {"id": "course-7", "leafTitle": "Seven", "description": "Seventh."},
                {"id": "course-8", "leafTitle": "Eight", "description": "Eighth."}
            ]
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        NavigationEngine::new(CatalogTree::new(catalog), mode, 4)
    }

    #[test]
    fn test_paged_slots_are_real_items_only() {
        let mut eng = engine(GridMode::Paged3);
        let slots = eng.current_slots();
        assert_eq!(slots.len(), 7);
        assert_eq!(slots[0].kind, SlotKind::Category);
        assert!(slots.iter().all(|s| s.kind != SlotKind::SyntheticBreadcrumb));
    }

    #[test]
    fn test_list_slots_get_synthetic_lead_rows() {
        let mut eng = engine(GridMode::List);
        let slots = eng.current_slots();
        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0].kind, SlotKind::SyntheticBreadcrumb);
        assert!(!slots[0].active);

        // Below root a back row appears after the breadcrumb
        eng.deep_link("catA").unwrap();
        let slots = eng.current_slots();
        assert_eq!(slots[0].kind, SlotKind::SyntheticBreadcrumb);
        assert_eq!(slots[1].kind, SlotKind::SyntheticBack);
        assert_eq!(slots.len(), 2 + 4);
    }

    #[test]
    fn test_every_page_has_exactly_per_page_slots() {
        let mut eng = engine(GridMode::Paged3);
        let model = eng.page_model();
        for page_id in 0..model.total_pages() {
            assert_eq!(eng.page_slots(page_id).len(), 3, "page {page_id}");
        }
        // 7 items: last content page is one real item plus two fillers
        let last = eng.page_slots(3);
        assert_eq!(last[0].kind, SlotKind::Leaf);
        assert_eq!(last[1].kind, SlotKind::Filler);
        assert_eq!(last[2].kind, SlotKind::Filler);
        // The leading page is all filler
        assert!(eng.page_slots(0).iter().all(|s| s.kind == SlotKind::Filler));
    }

    #[test]
    fn test_activate_category_descends_and_back_returns() {
        let mut eng = engine(GridMode::Paged3);
        assert_eq!(eng.activate(), Activation::EnteredLevel);
        assert!(eng.is_sub_level());
        assert_eq!(eng.current_slots().len(), 4);
        assert_eq!(eng.focus_index(), 0);

        assert!(eng.back());
        assert!(!eng.is_sub_level());
        assert_eq!(eng.focus_index(), 0);
        assert!(!eng.back());
    }

    #[test]
    fn test_back_restores_remembered_focus() {
        let mut eng = engine(GridMode::Paged3);
        // Walk down to catB's neighbor and back up to catA before entering
        eng.move_focus(Direction::Down, 1);
        eng.move_focus(Direction::Up, 1);
        assert_eq!(eng.activate(), Activation::EnteredLevel);
        eng.move_focus(Direction::Down, 1);
        assert!(eng.back());
        assert_eq!(eng.focus_index(), 0);
    }

    #[test]
    fn test_activate_inactive_category_is_noop() {
        let mut eng = engine(GridMode::Paged3);
        eng.move_focus(Direction::Down, 1);
        // catB holds only an empty subsection
        assert_eq!(eng.activate(), Activation::None);
        assert!(!eng.is_sub_level());
    }

    #[test]
    fn test_activate_leaf_opens_detail() {
        let mut eng = engine(GridMode::Paged3);
        eng.move_focus(Direction::Down, 1);
        eng.move_focus(Direction::Down, 1);
        assert_eq!(eng.activate(), Activation::OpenDetail("course-5".to_string()));
    }

    #[test]
    fn test_activate_contentless_leaf_is_noop() {
        let mut eng = engine(GridMode::Paged3);
        for _ in 0..4 {
            eng.move_focus(Direction::Down, 1);
        }
        // index 4 is the bare leaf
        assert_eq!(eng.activate(), Activation::None);
    }

    #[test]
    fn test_synthetic_back_row_pops() {
        let mut eng = engine(GridMode::List);
        eng.deep_link("catA").unwrap();
        eng.move_focus(Direction::Down, 0);
        assert_eq!(eng.focus_index(), 1);
        assert_eq!(eng.activate(), Activation::WentBack);
        assert!(!eng.is_sub_level());
    }

    #[test]
    fn test_breadcrumb_row_is_inert() {
        let mut eng = engine(GridMode::List);
        assert_eq!(eng.focus_index(), 0);
        assert_eq!(eng.activate(), Activation::None);
    }

    #[test]
    fn test_move_focus_requests_page_jump() {
        let mut eng = engine(GridMode::Paged3);
        eng.move_focus(Direction::Down, 1);
        eng.move_focus(Direction::Down, 1);
        // Index 2 -> 3 crosses onto page 2
        let req = eng.move_focus(Direction::Down, 1).unwrap();
        assert_eq!(req, PageRequest { page_id: 2, animate: true });

        // The settling notification is consumed silently
        let out = eng.on_page_changed(PageChanged { page_id: 2, caused_by_user: false }, 1);
        assert_eq!(out, PageOutcome::Consumed);
    }

    #[test]
    fn test_user_page_change_moves_focus() {
        let mut eng = engine(GridMode::Paged3);
        eng.move_focus(Direction::Down, 1);
        let out = eng.on_page_changed(PageChanged { page_id: 2, caused_by_user: true }, 1);
        assert_eq!(out, PageOutcome::FocusMoved(4));
        assert_eq!(eng.focus_index(), 4);
    }

    #[test]
    fn test_mode_switch_rebases_focus() {
        let mut eng = engine(GridMode::Paged3);
        eng.deep_link("catA").unwrap();
        eng.move_focus(Direction::Down, 1);
        eng.move_focus(Direction::Down, 1);
        assert_eq!(eng.focus_index(), 2);

        // Paged -> list at a sub-level adds breadcrumb + back rows
        eng.set_mode(GridMode::List);
        assert_eq!(eng.focus_index(), 4);
        eng.set_mode(GridMode::Paged3);
        assert_eq!(eng.focus_index(), 2);
    }

    #[test]
    fn test_deep_link_to_leaf() {
        let mut eng = engine(GridMode::Paged3);
        let act = eng.deep_link("course-1").unwrap();
        assert_eq!(act, Activation::OpenDetail("course-1".to_string()));
        // History is root -> catA, leaf excluded
        assert!(eng.is_sub_level());
        assert_eq!(eng.current_slots().len(), 4);
    }

    #[test]
    fn test_deep_link_unresolved() {
        let mut eng = engine(GridMode::Paged3);
        eng.deep_link("catA").unwrap();
        let err = eng.deep_link("ghost").unwrap_err();
        assert_eq!(err, NavError::NodeNotFound("ghost".to_string()));
        // Session state untouched
        assert!(eng.is_sub_level());
    }

    #[test]
    fn test_detail_memory_roundtrip() {
        let mut eng = engine(GridMode::Paged3);
        let mut seq = eng.open_detail("course-1").unwrap();
        seq.move_down();
        let index = seq.index();
        eng.close_detail(&seq);

        let seq = eng.open_detail("course-1").unwrap();
        assert_eq!(seq.index(), index);
    }

    #[test]
    fn test_breadcrumb_trail() {
        let mut eng = engine(GridMode::Paged3);
        assert_eq!(eng.breadcrumb(), "Catalog");
        eng.deep_link("catA").unwrap();
        assert_eq!(eng.breadcrumb(), "Catalog / Cat A");
    }
}
