use crate::catalog::CatalogTree;
use crate::engine::error::NavError;

/// One visited catalog level: `None` is the root, otherwise a category id.
/// Each level remembers where focus was when the user descended from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLevel {
    pub level_id: Option<String>,
    pub focus_index: usize,
}

impl NavLevel {
    fn root() -> Self {
        Self {
            level_id: None,
            focus_index: 0,
        }
    }
}

/// Ordered history of visited levels. Always at least one entry deep; the
/// bottom entry is the root and is never popped.
#[derive(Clone, Debug)]
pub struct NavStack {
    levels: Vec<NavLevel>,
}

impl NavStack {
    pub fn new() -> Self {
        Self {
            levels: vec![NavLevel::root()],
        }
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_root(&self) -> bool {
        self.levels.len() <= 1
    }

    /// Descend into a level: the current top remembers where focus was, the
    /// new level starts at slot 0.
    pub fn push(&mut self, new_level_id: String, current_focus: usize) {
        self.heal();
        if let Some(top) = self.levels.last_mut() {
            top.focus_index = current_focus;
        }
        self.levels.push(NavLevel {
            level_id: Some(new_level_id),
            focus_index: 0,
        });
    }

    /// Return to the previous level, restoring its remembered focus. Popping
    /// at the root is refused and reported as `None`.
    pub fn pop(&mut self) -> Option<&NavLevel> {
        if self.levels.len() <= 1 {
            log::debug!("pop at root level ignored");
            return None;
        }
        self.levels.pop();
        self.levels.last()
    }

    pub fn current(&mut self) -> &NavLevel {
        self.heal();
        self.levels.last().expect("stack healed to non-empty")
    }

    pub fn current_level_id(&self) -> Option<&str> {
        self.levels.last().and_then(|l| l.level_id.as_deref())
    }

    pub fn current_focus(&self) -> usize {
        self.levels.last().map_or(0, |l| l.focus_index)
    }

    /// Overwrite the top entry's focus without changing depth. Called on
    /// every focus move so pop always restores the latest position.
    pub fn update_current_focus(&mut self, index: usize) {
        self.heal();
        if let Some(top) = self.levels.last_mut() {
            top.focus_index = index;
        }
    }

    /// Replace the whole history with the ancestor chain of `target_id`:
    /// root plus one entry per ancestor category, focus reset everywhere.
    /// On an unresolvable id the stack is left untouched.
    pub fn rebuild_from_id(&mut self, tree: &CatalogTree, target_id: &str) -> Result<(), NavError> {
        let path = tree
            .path_to(target_id)
            .ok_or_else(|| NavError::NodeNotFound(target_id.to_string()))?;
        self.levels = std::iter::once(NavLevel::root())
            .chain(path.into_iter().map(|id| NavLevel {
                level_id: Some(id),
                focus_index: 0,
            }))
            .collect();
        Ok(())
    }

    // The public API can't empty the stack, but heal anyway rather than
    // panic on a future bug.
    fn heal(&mut self) {
        if self.levels.is_empty() {
            log::warn!("navigation stack was empty, re-initializing to root");
            self.levels.push(NavLevel::root());
        }
    }
}

impl Default for NavStack {
    fn default() -> Self {
        Self::new()
    }
}
