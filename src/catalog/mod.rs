pub mod loader;
pub mod node;
pub mod tree;

pub use node::{Catalog, CatalogNode, Link, LinkKind};
pub use tree::CatalogTree;
