use std::sync::Arc;

use super::{Command, ImageKey};
use crate::controller::{
    featured::select_featured,
    focus::FocusCell,
    images::PosterImage,
    rows::{RowPolicy, RowViewModel},
};
use crate::models::{Catalog, ContainerID, ImageSlot, Movie, MovieID};

#[derive(Debug, Clone)]
pub struct HeroViewModel {
    pub movie: Arc<Movie>,
    pub image: PosterImage,
    pub meta_line: String,
}

#[derive(Debug, Clone)]
pub struct HomeView {
    pub hero: HeroViewModel,
    pub rows: Vec<RowViewModel>,
}

#[derive(Debug, Clone)]
pub enum HomeState {
    /// No catalog yet, or nothing in it is featured.
    Loading,
    Ready(HomeView),
}

#[derive(Debug, Clone)]
pub enum HomeEvent {
    Mounted(Arc<Catalog>),
    ViewportResized(f32),
    ImageFailed(ImageKey),
    CardSelected { row: ContainerID, movie: MovieID },
    MoreInfo,
    Play,
}

#[derive(Debug)]
pub struct HomeScreen {
    policy: RowPolicy,
    viewport_width: f32,
    state: HomeState,
}

impl HomeScreen {
    pub fn new(policy: RowPolicy, viewport_width: f32) -> Self {
        Self {
            policy,
            viewport_width,
            state: HomeState::Loading,
        }
    }

    pub fn state(&self) -> &HomeState {
        &self.state
    }

    pub fn view(&self) -> Option<&HomeView> {
        match self.state {
            HomeState::Ready(ref v) => Some(v),
            HomeState::Loading => None,
        }
    }

    /// Hero first, then one focus row per rendered row.
    pub fn focus_rows(&self) -> Vec<Vec<FocusCell>> {
        let Some(view) = self.view() else {
            return vec![];
        };
        let mut rows = vec![vec![FocusCell::hero(&view.hero.movie.id)]];
        for row in &view.rows {
            rows.push(
                row.cards
                    .iter()
                    .map(|c| FocusCell::card(&row.container_id, &c.movie.id))
                    .collect(),
            );
        }
        rows
    }

    pub fn handle(&mut self, event: HomeEvent) -> Vec<Command> {
        match event {
            HomeEvent::Mounted(catalog) => self.mount(&catalog),
            HomeEvent::ViewportResized(width) => {
                self.viewport_width = width;
                if let HomeState::Ready(ref mut view) = self.state {
                    for row in view.rows.iter_mut() {
                        row.relayout(width, self.policy.fixed_width(&row.container_id));
                    }
                }
                vec![]
            }
            HomeEvent::ImageFailed(key) => self.image_failed(key),
            HomeEvent::CardSelected { row, movie } => {
                let Some(view) = self.view() else {
                    return vec![];
                };
                view.rows
                    .iter()
                    .find(|r| r.container_id == row)
                    .and_then(|r| r.cards.iter().find(|c| c.movie.id == movie))
                    .map(|c| vec![Command::OpenDetails(c.movie.clone())])
                    .unwrap_or_default()
            }
            HomeEvent::MoreInfo => match self.view() {
                Some(view) => vec![Command::OpenDetails(view.hero.movie.clone())],
                None => vec![],
            },
            HomeEvent::Play => {
                if let Some(view) = self.view() {
                    log::info!("play requested for {}", view.hero.movie.title);
                }
                vec![]
            }
        }
    }

    fn mount(&mut self, catalog: &Catalog) -> Vec<Command> {
        if let HomeState::Ready(_) = self.state {
            log::debug!("home already mounted, ignoring");
            return vec![];
        }
        let Some(featured) = select_featured(catalog) else {
            log::warn!("no featured movie in catalog, home stays on its loading state");
            return vec![];
        };

        let hero = HeroViewModel {
            image: PosterImage::new(&featured, ImageSlot::Landscape),
            meta_line: featured.hero_meta_line(),
            movie: featured,
        };
        let rows = self.policy.build_rows(catalog, self.viewport_width);

        let mut commands = Vec::new();
        if let Some(url) = hero.image.url() {
            commands.push(Command::FetchImage {
                key: ImageKey::Hero,
                url: url.to_owned(),
            });
        }
        for row in &rows {
            for card in &row.cards {
                if let Some(url) = card.image.url() {
                    commands.push(Command::FetchImage {
                        key: ImageKey::Card {
                            row: row.container_id.clone(),
                            movie: card.movie.id.clone(),
                        },
                        url: url.to_owned(),
                    });
                }
            }
        }

        self.state = HomeState::Ready(HomeView { hero, rows });
        commands
    }

    fn image_failed(&mut self, key: ImageKey) -> Vec<Command> {
        let HomeState::Ready(ref mut view) = self.state else {
            return vec![];
        };
        let image = match key {
            ImageKey::Hero => Some(&mut view.hero.image),
            ImageKey::Card { ref row, ref movie } => view
                .rows
                .iter_mut()
                .find(|r| r.container_id == *row)
                .and_then(|r| r.card_mut(movie))
                .map(|c| &mut c.image),
            ImageKey::Header | ImageKey::Similar { .. } => None,
        };
        let Some(image) = image else {
            log::debug!("image failure for unknown instance {:?}", key);
            return vec![];
        };
        match image.on_load_error() {
            Some(url) => {
                log::debug!("image {:?} falling back to {}", key, url);
                vec![Command::FetchImage {
                    url: url.to_owned(),
                    key,
                }]
            }
            None => {
                log::debug!("image {:?} has no fallback left", key);
                vec![]
            }
        }
    }
}
