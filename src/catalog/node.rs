use serde::Deserialize;

/// Top-level catalog document: `{ "items": [...] }`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<CatalogNode>,
}

/// One node of the catalog tree. Presence of `leafTitle` marks a leaf;
/// absence marks a category.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogNode {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub leaf_title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subsections: Vec<CatalogNode>,
    #[serde(default)]
    pub items: Vec<CatalogNode>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub url: String,
    #[serde(default)]
    pub kind: LinkKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    External,
    Download,
    // Unknown kinds deserialize as Disabled so a newer catalog file can't
    // produce action rows this build doesn't know how to activate.
    #[default]
    #[serde(other)]
    Disabled,
}

impl CatalogNode {
    pub fn is_leaf(&self) -> bool {
        self.leaf_title.is_some()
    }

    pub fn is_category(&self) -> bool {
        self.leaf_title.is_none()
    }

    /// Display title: `leafTitle` for leaves, `name` for categories, the id
    /// as a last resort for nodes missing both.
    pub fn title(&self) -> &str {
        self.leaf_title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.id)
    }
}
