use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path, sync::Arc};

use super::movie::{Movie, MovieID};

pub type ContainerID = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Declared card layout of a row.
pub enum CardLayout {
    PortraitCard,
    LandscapeCard,
}

#[derive(Debug, Clone)]
/// A row on the home screen. Items are shared with the catalog, never copied.
pub struct Container {
    pub id: ContainerID,
    pub title: String,
    pub layout: CardLayout,
    pub items: Vec<Arc<Movie>>,
}

#[derive(Debug, Clone, Default)]
/// The loaded dataset. Read only once built.
pub struct Catalog {
    containers: Vec<Container>,
    movies: HashMap<MovieID, Arc<Movie>>,
}

// On-disk shape. Each container embeds full movie records.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    containers: Vec<ContainerDocument>,
}

#[derive(Debug, Deserialize)]
struct ContainerDocument {
    id: ContainerID,
    title: String,
    layout: CardLayout,
    #[serde(default)]
    items: Vec<Movie>,
}

impl Catalog {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let doc: CatalogDocument =
            serde_json::from_str(raw).context("malformed catalog document")?;
        let mut builder = CatalogBuilder::new();
        for c in doc.containers {
            let container = builder.with_container(&c.id, &c.title, c.layout);
            for m in c.items {
                container.add_movie(m);
            }
        }
        Ok(builder.build())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&raw)?;
        log::info!(
            "loaded catalog {}: {} containers, {} movies",
            path.display(),
            catalog.containers.len(),
            catalog.movie_count()
        );
        Ok(catalog)
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn movie(&self, id: &str) -> Option<Arc<Movie>> {
        self.movies.get(id).cloned()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// Resolve the movie's related ids, keeping their order. Unknown ids are skipped.
    pub fn similar_to(&self, movie: &Movie) -> Vec<Arc<Movie>> {
        movie
            .similar_content
            .iter()
            .filter(|id| **id != movie.id)
            .filter_map(|id| self.movie(id))
            .collect()
    }
}

#[derive(Debug)]
pub struct ContainerBuilder {
    id: ContainerID,
    title: String,
    layout: CardLayout,
    items: Vec<Movie>,
}

impl ContainerBuilder {
    pub fn add_movie(&mut self, movie: Movie) -> &mut Self {
        self.items.push(movie);
        self
    }
}

#[derive(Debug, Default)]
pub struct CatalogBuilder {
    containers: Vec<ContainerBuilder>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self { containers: vec![] }
    }

    pub fn with_container<'a>(
        &'a mut self,
        id: &str,
        title: &str,
        layout: CardLayout,
    ) -> &'a mut ContainerBuilder {
        self.containers.push(ContainerBuilder {
            id: id.to_owned(),
            title: title.to_owned(),
            layout,
            items: vec![],
        });
        let last = self.containers.len() - 1;
        &mut self.containers[last]
    }

    /// Intern every movie by id. The first record seen for an id is the one
    /// every row ends up sharing.
    pub fn build(self) -> Catalog {
        let mut movies: HashMap<MovieID, Arc<Movie>> = HashMap::new();
        let mut containers = Vec::with_capacity(self.containers.len());

        for c in self.containers {
            let mut items = Vec::with_capacity(c.items.len());
            for m in c.items {
                let shared = match movies.get(&m.id) {
                    Some(existing) => {
                        if **existing != m {
                            log::debug!(
                                "movie {} in container {} differs from its first record, sharing the first",
                                m.id,
                                c.id
                            );
                        }
                        existing.clone()
                    }
                    None => {
                        let id = m.id.clone();
                        let shared = Arc::new(m);
                        movies.insert(id, shared.clone());
                        shared
                    }
                };
                items.push(shared);
            }
            containers.push(Container {
                id: c.id,
                title: c.title,
                layout: c.layout,
                items,
            });
        }

        Catalog { containers, movies }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::movie;
    use std::io::Write;

    fn doc() -> String {
        let a = serde_json::to_string(&movie("a", "Alpha", false)).unwrap();
        let b = serde_json::to_string(&movie("b", "Beta", true)).unwrap();
        format!(
            r#"{{"containers": [
                {{"id": "trending", "title": "Trending", "layout": "portrait-card", "items": [{a}, {b}]}},
                {{"id": "new", "title": "New", "layout": "landscape-card", "items": [{a}]}},
                {{"id": "empty", "title": "Nothing here", "layout": "landscape-card"}}
            ]}}"#
        )
    }

    #[test]
    fn parses_containers_in_order() {
        let catalog = Catalog::from_json_str(&doc()).unwrap();
        let ids: Vec<&str> = catalog.containers().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["trending", "new", "empty"]);
        assert_eq!(catalog.containers()[0].layout, CardLayout::PortraitCard);
        assert_eq!(catalog.containers()[1].layout, CardLayout::LandscapeCard);
        assert!(catalog.containers()[2].items.is_empty());
    }

    #[test]
    fn rows_share_movie_records() {
        let catalog = Catalog::from_json_str(&doc()).unwrap();
        let in_trending = &catalog.container("trending").unwrap().items[0];
        let in_new = &catalog.container("new").unwrap().items[0];
        assert!(Arc::ptr_eq(in_trending, in_new));
        assert_eq!(catalog.movie_count(), 2);
    }

    #[test]
    fn rejects_unknown_layout() {
        let raw = r#"{"containers": [{"id": "x", "title": "X", "layout": "square-card", "items": []}]}"#;
        assert!(Catalog::from_json_str(raw).is_err());
    }

    #[test]
    fn rejects_malformed_document() {
        assert!(Catalog::from_json_str("{\"containers\": 3}").is_err());
        assert!(Catalog::from_json_str("").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(doc().as_bytes()).unwrap();
        let catalog = Catalog::load(f.path()).unwrap();
        assert_eq!(catalog.containers().len(), 3);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("reading catalog"));
    }

    #[test]
    fn similar_content_keeps_order_and_skips_unknown() {
        let mut builder = CatalogBuilder::new();
        let mut a = movie("a", "Alpha", false);
        a.similar_content = vec!["c".into(), "ghost".into(), "a".into(), "b".into()];
        builder
            .with_container("row", "Row", CardLayout::PortraitCard)
            .add_movie(a)
            .add_movie(movie("b", "Beta", false))
            .add_movie(movie("c", "Gamma", false));
        let catalog = builder.build();

        let a = catalog.movie("a").unwrap();
        let ids: Vec<String> = catalog.similar_to(&a).iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, vec!["c".to_owned(), "b".to_owned()]);
    }
}
