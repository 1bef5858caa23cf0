use std::{sync::Arc, time::Duration};

use super::{Command, ImageKey};
use crate::controller::{
    disclosure::Disclosure,
    images::PosterImage,
    rows::CardViewModel,
};
use crate::models::{Catalog, ImageSlot, Movie};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Cast,
    Producers,
    Directors,
    Writers,
    Classification,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Cast,
        SectionKind::Producers,
        SectionKind::Directors,
        SectionKind::Writers,
        SectionKind::Classification,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Cast => "Cast",
            SectionKind::Producers => "Producers",
            SectionKind::Directors => "Directors",
            SectionKind::Writers => "Writers",
            SectionKind::Classification => "Classification",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One label/value line inside a section, e.g. actor and character.
pub struct SectionLine {
    pub label: String,
    pub value: String,
}

impl SectionLine {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_owned(),
            value: value.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExpandableSection {
    pub kind: SectionKind,
    pub disclosure: Disclosure,
    pub lines: Vec<SectionLine>,
}

fn section_lines(movie: &Movie, kind: SectionKind) -> Vec<SectionLine> {
    match kind {
        SectionKind::Cast => movie
            .cast
            .iter()
            .map(|c| SectionLine::new(&c.actor_name, &c.character_name))
            .collect(),
        SectionKind::Producers => vec![SectionLine::new("Producers", &movie.crew.producers.join(", "))],
        SectionKind::Directors => vec![SectionLine::new("Directors", &movie.crew.directors.join(", "))],
        SectionKind::Writers => vec![SectionLine::new("Writers", &movie.crew.writers.join(", "))],
        SectionKind::Classification => vec![
            SectionLine::new("Rating", &movie.classification.rating),
            SectionLine::new(
                "Advisory Content",
                &movie.classification.advisory_content.join(", "),
            ),
        ],
    }
}

#[derive(Debug, Clone)]
pub enum DetailsEvent {
    ToggleSection(SectionKind),
    Tick(Duration),
    ImageFailed(ImageKey),
    SimilarSelected(String),
    Play,
    AddToList,
    Download,
    Back,
}

#[derive(Debug)]
pub struct DetailsScreen {
    movie: Arc<Movie>,
    header: PosterImage,
    meta_line: String,
    similar: Vec<CardViewModel>,
    sections: Vec<ExpandableSection>,
}

impl DetailsScreen {
    pub fn new(movie: Arc<Movie>, catalog: &Catalog, transition: Duration) -> Self {
        let similar = catalog
            .similar_to(&movie)
            .into_iter()
            .map(|m| CardViewModel {
                image: PosterImage::new(&m, ImageSlot::Thumbnail),
                featured_badge: m.is_top_movie,
                movie: m,
            })
            .collect();
        let sections = SectionKind::ALL
            .iter()
            .map(|&kind| ExpandableSection {
                kind,
                disclosure: Disclosure::new(false, transition),
                lines: section_lines(&movie, kind),
            })
            .collect();
        Self {
            header: PosterImage::new(&movie, ImageSlot::Landscape),
            meta_line: movie.details_meta_line(),
            movie,
            similar,
            sections,
        }
    }

    pub fn movie(&self) -> &Arc<Movie> {
        &self.movie
    }

    pub fn header(&self) -> &PosterImage {
        &self.header
    }

    pub fn meta_line(&self) -> &str {
        &self.meta_line
    }

    pub fn similar(&self) -> &[CardViewModel] {
        &self.similar
    }

    pub fn sections(&self) -> &[ExpandableSection] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&ExpandableSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn is_animating(&self) -> bool {
        self.sections.iter().any(|s| s.disclosure.is_animating())
    }

    /// Loads to start when the screen mounts.
    pub fn initial_commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(url) = self.header.url() {
            commands.push(Command::FetchImage {
                key: ImageKey::Header,
                url: url.to_owned(),
            });
        }
        for card in &self.similar {
            if let Some(url) = card.image.url() {
                commands.push(Command::FetchImage {
                    key: ImageKey::Similar {
                        movie: card.movie.id.clone(),
                    },
                    url: url.to_owned(),
                });
            }
        }
        commands
    }

    pub fn handle(&mut self, event: DetailsEvent) -> Vec<Command> {
        match event {
            DetailsEvent::ToggleSection(kind) => {
                if let Some(s) = self.sections.iter_mut().find(|s| s.kind == kind) {
                    let state = s.disclosure.toggle();
                    log::debug!("{} section -> {:?}", kind.title(), state);
                }
                vec![]
            }
            DetailsEvent::Tick(dt) => {
                for s in self.sections.iter_mut() {
                    s.disclosure.tick(dt);
                }
                vec![]
            }
            DetailsEvent::ImageFailed(key) => self.image_failed(key),
            DetailsEvent::SimilarSelected(id) => self
                .similar
                .iter()
                .find(|c| c.movie.id == id)
                .map(|c| vec![Command::OpenDetails(c.movie.clone())])
                .unwrap_or_default(),
            DetailsEvent::Play => {
                log::info!("play requested for {}", self.movie.title);
                vec![]
            }
            DetailsEvent::AddToList => {
                log::info!("add to list requested for {}", self.movie.title);
                vec![]
            }
            DetailsEvent::Download => {
                log::info!("download requested for {}", self.movie.title);
                vec![]
            }
            DetailsEvent::Back => vec![Command::GoBack],
        }
    }

    fn image_failed(&mut self, key: ImageKey) -> Vec<Command> {
        let image = match key {
            ImageKey::Header => Some(&mut self.header),
            ImageKey::Similar { ref movie } => self
                .similar
                .iter_mut()
                .find(|c| c.movie.id == *movie)
                .map(|c| &mut c.image),
            ImageKey::Hero | ImageKey::Card { .. } => None,
        };
        match image.and_then(|i| i.on_load_error()) {
            Some(url) => vec![Command::FetchImage {
                url: url.to_owned(),
                key,
            }],
            None => vec![],
        }
    }
}
