use std::sync::Arc;

use crate::models::{Catalog, Movie};

/// First movie flagged as top movie, scanning containers in catalog order and
/// items in row order. When several are flagged the earliest one wins.
pub fn select_featured(catalog: &Catalog) -> Option<Arc<Movie>> {
    catalog
        .containers()
        .iter()
        .flat_map(|c| c.items.iter())
        .find(|m| m.is_top_movie)
        .cloned()
}
