use crate::catalog::{Catalog, CatalogTree};
use crate::config::Config;
use crate::engine::{
    Activation, DetailAction, DetailSequencer, Direction, GridMode, NavError, NavigationEngine,
    PageOutcome,
};
use crate::ui::components::pager::Pager;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Loading,
    Browse,
    Detail,
}

/// Transient footer message; counts down in ticks.
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    pub ttl: u16,
}

const NOTICE_TICKS: u16 = 30;

pub struct App {
    pub screen: AppScreen,
    pub engine: Option<NavigationEngine>,
    pub detail: Option<DetailSequencer>,
    pub pager: Pager,
    pub theme: &'static Theme,
    pub config: Config,
    pub notice: Option<Notice>,
    pub load_error: Option<String>,
    pub should_quit: bool,
    viewport_width: u16,
    pending_open: Option<String>,
}

impl App {
    pub fn new(config: Config, viewport_width: u16, pending_open: Option<String>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        Self {
            screen: AppScreen::Loading,
            engine: None,
            detail: None,
            pager: Pager::new(config.min_pages),
            theme,
            config,
            notice: None,
            load_error: None,
            should_quit: false,
            viewport_width,
            pending_open,
        }
    }

    pub fn grid_mode(&self) -> GridMode {
        GridMode::from_width(self.viewport_width, self.config.breakpoints())
    }

    /// The catalog fetch resolved. On success the engine comes up, a pending
    /// deep link is applied, and browsing starts; on failure the loading
    /// screen stays and shows the error.
    pub fn on_catalog_loaded(&mut self, result: Result<Catalog, String>) {
        match result {
            Ok(catalog) => {
                let tree = CatalogTree::new(catalog);
                let mut engine =
                    NavigationEngine::new(tree, self.grid_mode(), self.config.min_pages);

                let open_detail = self.pending_open.take().and_then(|id| {
                    match engine.deep_link(&id) {
                        Ok(Activation::OpenDetail(leaf_id)) => Some(leaf_id),
                        Ok(_) => None,
                        Err(err) => {
                            self.notice = Some(Notice {
                                text: format!("{err}, showing the catalog root"),
                                is_error: false,
                                ttl: NOTICE_TICKS,
                            });
                            None
                        }
                    }
                });

                self.engine = Some(engine);
                self.screen = AppScreen::Browse;
                self.rebuild_pager();
                if let Some(leaf_id) = open_detail {
                    self.open_detail(&leaf_id);
                }
            }
            Err(message) => {
                self.load_error = Some(message);
            }
        }
    }

    /// Terminal width changed; if that crosses a breakpoint the engine
    /// re-bases focus and the pager is rebuilt for the new page geometry.
    pub fn set_viewport(&mut self, width: u16) {
        self.viewport_width = width;
        let mode = self.grid_mode();
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if engine.mode() != mode {
            engine.set_mode(mode);
            self.rebuild_pager();
        }
    }

    pub fn move_focus(&mut self, dir: Direction) {
        match self.screen {
            AppScreen::Browse => {
                let widget_page = self.pager.page();
                let Some(engine) = self.engine_or_notice() else {
                    return;
                };
                if let Some(req) = engine.move_focus(dir, widget_page) {
                    self.pager.apply(req, self.config.transition_ticks);
                }
            }
            AppScreen::Detail => {
                if let Some(seq) = self.detail.as_mut() {
                    match dir {
                        Direction::Up => seq.move_up(),
                        Direction::Down => seq.move_down(),
                        // Reading order is strictly sequential
                        Direction::Left | Direction::Right => {}
                    }
                }
            }
            AppScreen::Loading => {
                self.notify_not_loaded();
            }
        }
    }

    pub fn activate(&mut self) {
        match self.screen {
            AppScreen::Browse => {
                let Some(engine) = self.engine_or_notice() else {
                    return;
                };
                match engine.activate() {
                    Activation::EnteredLevel | Activation::WentBack => self.rebuild_pager(),
                    Activation::OpenDetail(leaf_id) => self.open_detail(&leaf_id),
                    Activation::None => {}
                }
            }
            AppScreen::Detail => {
                if let Some(seq) = self.detail.as_mut() {
                    if let DetailAction::OpenLink(link) = seq.activate() {
                        self.notice = Some(Notice {
                            text: format!("Opening {}", link.url),
                            is_error: false,
                            ttl: NOTICE_TICKS,
                        });
                    }
                }
            }
            AppScreen::Loading => {
                self.notify_not_loaded();
            }
        }
    }

    /// Esc / Backspace. In the detail view this closes it; while browsing it
    /// pops one level. Popping at the root is a quiet no-op.
    pub fn go_back(&mut self) {
        match self.screen {
            AppScreen::Browse => {
                let Some(engine) = self.engine_or_notice() else {
                    return;
                };
                if engine.back() {
                    self.rebuild_pager();
                }
            }
            AppScreen::Detail => self.close_detail(),
            AppScreen::Loading => {}
        }
    }

    /// User-driven pager flip, the widget-first input path: focus follows
    /// once the transition settles and the widget reports it.
    pub fn page_scroll(&mut self, forward: bool) {
        if self.screen != AppScreen::Browse {
            return;
        }
        let Some(engine) = self.engine.as_ref() else {
            self.notify_not_loaded();
            return;
        };
        if !engine.mode().is_paged() {
            return;
        }
        if forward {
            self.pager.scroll_next(self.config.transition_ticks);
        } else {
            self.pager.scroll_prev(self.config.transition_ticks);
        }
    }

    pub fn on_tick(&mut self) {
        if let Some(notice) = self.notice.as_mut() {
            notice.ttl = notice.ttl.saturating_sub(1);
            if notice.ttl == 0 {
                self.notice = None;
            }
        }

        if let Some((msg, from)) = self.pager.on_tick() {
            if let Some(engine) = self.engine.as_mut() {
                match engine.on_page_changed(msg, from) {
                    PageOutcome::Skip(req) => {
                        self.pager.apply(req, self.config.transition_ticks);
                    }
                    PageOutcome::FocusMoved(_)
                    | PageOutcome::Consumed
                    | PageOutcome::Ignored => {}
                }
            }
        }
    }

    pub fn open_detail(&mut self, leaf_id: &str) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match engine.open_detail(leaf_id) {
            Ok(seq) => {
                self.detail = Some(seq);
                self.screen = AppScreen::Detail;
            }
            Err(err) => {
                self.notice = Some(Notice {
                    text: err.to_string(),
                    is_error: true,
                    ttl: NOTICE_TICKS,
                });
            }
        }
    }

    pub fn close_detail(&mut self) {
        if let (Some(engine), Some(seq)) = (self.engine.as_mut(), self.detail.take()) {
            engine.close_detail(&seq);
        }
        self.screen = AppScreen::Browse;
        self.rebuild_pager();
    }

    /// Snap the pager to the engine's page geometry after a level, layout, or
    /// screen change. No animation: the new level has no previous page.
    fn rebuild_pager(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let total = engine.page_model().total_pages();
        let page = engine.focus_page_id();
        self.pager.rebuild(total, page);
    }

    fn engine_or_notice(&mut self) -> Option<&mut NavigationEngine> {
        if self.engine.is_none() {
            self.notify_not_loaded();
        }
        self.engine.as_mut()
    }

    fn notify_not_loaded(&mut self) {
        self.notice = Some(Notice {
            text: NavError::DataNotLoaded.to_string(),
            is_error: true,
            ttl: NOTICE_TICKS,
        });
    }
}
