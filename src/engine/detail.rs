use std::collections::HashMap;

use crate::catalog::node::{CatalogNode, Link, LinkKind};

/// One focusable unit of a leaf's detail view: a description block or an
/// action row for a link.
#[derive(Clone, Debug)]
pub enum Fragment {
    Text(String),
    Action(Link),
}

/// What activating the focused fragment did.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailAction {
    /// Reading progressed (or nothing happened).
    None,
    /// An enabled action row fired.
    OpenLink(Link),
}

/// Linear, non-wrapping focus sequencing over one leaf's fragments. Unlike
/// the card grid there is no page structure: reading order is strictly top to
/// bottom and the ends are hard stops.
#[derive(Debug)]
pub struct DetailSequencer {
    leaf_id: String,
    fragments: Vec<Fragment>,
    index: usize,
}

impl DetailSequencer {
    pub fn for_leaf(leaf: &CatalogNode, remembered_index: usize) -> Self {
        let mut fragments: Vec<Fragment> = split_description(leaf.description.as_deref())
            .into_iter()
            .map(Fragment::Text)
            .collect();
        fragments.extend(leaf.links.iter().cloned().map(Fragment::Action));

        let index = if fragments.is_empty() {
            0
        } else {
            remembered_index.min(fragments.len() - 1)
        };

        Self {
            leaf_id: leaf.id.clone(),
            fragments,
            index,
        }
    }

    pub fn leaf_id(&self) -> &str {
        &self.leaf_id
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn move_down(&mut self) {
        if self.index + 1 < self.fragments.len() {
            self.index += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Enter on a text fragment reads onward; Enter on an action row fires
    /// its link unless the link is disabled.
    pub fn activate(&mut self) -> DetailAction {
        match self.fragments.get(self.index) {
            Some(Fragment::Text(_)) => {
                self.move_down();
                DetailAction::None
            }
            Some(Fragment::Action(link)) if link.kind != LinkKind::Disabled => {
                DetailAction::OpenLink(link.clone())
            }
            _ => DetailAction::None,
        }
    }
}

/// Per-leaf memory of the last focused fragment, so re-opening a detail view
/// resumes where the reader left off.
#[derive(Debug, Default)]
pub struct DetailMemory {
    last_focus: HashMap<String, usize>,
}

impl DetailMemory {
    pub fn recall(&self, leaf_id: &str) -> usize {
        self.last_focus.get(leaf_id).copied().unwrap_or(0)
    }

    pub fn remember(&mut self, leaf_id: &str, index: usize) {
        self.last_focus.insert(leaf_id.to_string(), index);
    }
}

/// Rich-text source split into block fragments at blank lines.
fn split_description(description: Option<&str>) -> Vec<String> {
    let Some(text) = description else {
        return Vec::new();
    };
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf() -> CatalogNode {
        let json = r#"{
            "id": "course-1",
            "leafTitle": "Course One",
            "description": "First block.\n\nSecond block.\n\n\n\nThird block.",
            "links": [
                {"text": "Enroll", "url": "https://example.com/enroll", "kind": "external"},
                {"text": "Syllabus", "url": "https://example.com/syllabus.pdf", "kind": "download"},
                {"text": "Coming soon", "url": "", "kind": "disabled"}
            ]
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_fragments_are_blocks_then_actions() {
        let seq = DetailSequencer::for_leaf(&leaf(), 0);
        assert_eq!(seq.fragments().len(), 6);
        assert!(matches!(seq.fragments()[0], Fragment::Text(_)));
        assert!(matches!(seq.fragments()[2], Fragment::Text(_)));
        assert!(matches!(seq.fragments()[3], Fragment::Action(_)));
    }

    #[test]
    fn test_moves_clamp_at_both_ends() {
        let mut seq = DetailSequencer::for_leaf(&leaf(), 0);
        seq.move_up();
        assert_eq!(seq.index(), 0);
        for _ in 0..20 {
            seq.move_down();
        }
        assert_eq!(seq.index(), 5);
    }

    #[test]
    fn test_enter_on_text_reads_onward() {
        let mut seq = DetailSequencer::for_leaf(&leaf(), 0);
        assert_eq!(seq.activate(), DetailAction::None);
        assert_eq!(seq.index(), 1);
    }

    #[test]
    fn test_enter_on_last_text_clamps() {
        let json = r#"{"id": "x", "leafTitle": "X", "description": "Only block."}"#;
        let node: CatalogNode = serde_json::from_str(json).unwrap();
        let mut seq = DetailSequencer::for_leaf(&node, 0);
        assert_eq!(seq.activate(), DetailAction::None);
        assert_eq!(seq.index(), 0);
    }

    #[test]
    fn test_enter_on_action_opens_link() {
        let mut seq = DetailSequencer::for_leaf(&leaf(), 3);
        match seq.activate() {
            DetailAction::OpenLink(link) => assert_eq!(link.text, "Enroll"),
            other => panic!("expected OpenLink, got {other:?}"),
        }
        // Focus stays put after activation
        assert_eq!(seq.index(), 3);
    }

    #[test]
    fn test_enter_on_disabled_action_is_inert() {
        let mut seq = DetailSequencer::for_leaf(&leaf(), 5);
        assert_eq!(seq.activate(), DetailAction::None);
        assert_eq!(seq.index(), 5);
    }

    #[test]
    fn test_remembered_index_restored_and_clamped() {
        let mut memory = DetailMemory::default();
        memory.remember("course-1", 4);
        let seq = DetailSequencer::for_leaf(&leaf(), memory.recall("course-1"));
        assert_eq!(seq.index(), 4);

        // Remembered index beyond a rebuilt fragment list clamps
        memory.remember("course-1", 99);
        let seq = DetailSequencer::for_leaf(&leaf(), memory.recall("course-1"));
        assert_eq!(seq.index(), 5);

        assert_eq!(memory.recall("unknown-leaf"), 0);
    }

    #[test]
    fn test_empty_leaf_has_no_fragments() {
        let json = r#"{"id": "bare", "leafTitle": "Bare"}"#;
        let node: CatalogNode = serde_json::from_str(json).unwrap();
        let mut seq = DetailSequencer::for_leaf(&node, 3);
        assert!(seq.fragments().is_empty());
        assert_eq!(seq.index(), 0);
        assert_eq!(seq.activate(), DetailAction::None);
    }
}
