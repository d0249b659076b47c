use crate::catalog::node::{Catalog, CatalogNode};

/// Read-only view over the loaded catalog. Built once after the catalog
/// fetch resolves and immutable for the rest of the session; every tree
/// traversal in the app goes through this type.
pub struct CatalogTree {
    catalog: Catalog,
}

impl CatalogTree {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Pre-order depth-first search, subsections before items. First match
    /// wins, so duplicate ids resolve to the earliest node in document order.
    pub fn find_by_id(&self, id: &str) -> Option<&CatalogNode> {
        find_in(&self.catalog.items, id)
    }

    /// Whether activating this node leads anywhere: a category is active iff
    /// it (or some descendant) holds at least one item, a leaf iff it carries
    /// any content to show. Recomputed per call; catalogs are small.
    pub fn has_active_content(&self, id: &str) -> bool {
        self.find_by_id(id).is_some_and(node_has_content)
    }

    /// Ancestor category ids from the root down to the node. For a leaf
    /// attached under a category's item list the path stops at the containing
    /// category, not the leaf itself.
    pub fn path_to(&self, id: &str) -> Option<Vec<String>> {
        let mut chain = Vec::new();
        if walk_path(&self.catalog.items, id, &mut chain) {
            Some(chain)
        } else {
            None
        }
    }

    /// The child nodes displayed at a level: the root items for `None`,
    /// otherwise the named category's subsections followed by its directly
    /// attached items. `None` result means the id no longer resolves.
    pub fn children_of(&self, level_id: Option<&str>) -> Option<Vec<&CatalogNode>> {
        match level_id {
            None => Some(self.catalog.items.iter().collect()),
            Some(id) => {
                let node = self.find_by_id(id)?;
                Some(node.subsections.iter().chain(node.items.iter()).collect())
            }
        }
    }

    /// Display titles for the breadcrumb row, root-most first.
    pub fn title_path(&self, id: &str) -> Vec<String> {
        self.path_to(id)
            .unwrap_or_default()
            .iter()
            .filter_map(|ancestor| self.find_by_id(ancestor))
            .map(|node| node.title().to_string())
            .collect()
    }
}

fn find_in<'a>(nodes: &'a [CatalogNode], id: &str) -> Option<&'a CatalogNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_in(&node.subsections, id) {
            return Some(found);
        }
        if let Some(found) = find_in(&node.items, id) {
            return Some(found);
        }
    }
    None
}

fn node_has_content(node: &CatalogNode) -> bool {
    if node.is_leaf() {
        return node.description.as_deref().is_some_and(|d| !d.trim().is_empty())
            || !node.links.is_empty();
    }
    if !node.items.is_empty() {
        return true;
    }
    node.subsections.iter().any(node_has_content)
}

fn walk_path(nodes: &[CatalogNode], id: &str, chain: &mut Vec<String>) -> bool {
    for node in nodes {
        if node.id == id {
            // Category paths include the node itself; leaf paths end at the
            // containing category already on the chain.
            if node.is_category() {
                chain.push(node.id.clone());
            }
            return true;
        }
        if node.is_category() {
            chain.push(node.id.clone());
            if walk_path(&node.subsections, id, chain) || walk_path(&node.items, id, chain) {
                return true;
            }
            chain.pop();
        }
    }
    false
}
