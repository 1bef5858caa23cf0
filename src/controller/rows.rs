use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};

use super::images::PosterImage;
use crate::models::{CardLayout, Catalog, Container, ContainerID, ImageSlot, Movie};

/// Card width as a fraction of the viewport width.
pub const PORTRAIT_WIDTH_FRACTION: f32 = 0.32;
pub const LANDSCAPE_WIDTH_FRACTION: f32 = 0.45;

/// Card height as a multiple of card width.
pub const PORTRAIT_HEIGHT_RATIO: f32 = 3.0 / 2.0;
pub const LANDSCAPE_HEIGHT_RATIO: f32 = 9.0 / 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Pixel size of every card in a row, plus the poster slot the cards ask for.
pub struct CardMetrics {
    pub layout: CardLayout,
    pub width: f32,
    pub height: f32,
    pub slot: ImageSlot,
}

impl CardMetrics {
    /// A fixed width replaces the viewport fraction. Height always follows the aspect ratio.
    pub fn compute(layout: CardLayout, viewport_width: f32, fixed_width: Option<f32>) -> Self {
        let (fraction, ratio, slot) = match layout {
            CardLayout::PortraitCard => (
                PORTRAIT_WIDTH_FRACTION,
                PORTRAIT_HEIGHT_RATIO,
                ImageSlot::Portrait,
            ),
            CardLayout::LandscapeCard => (
                LANDSCAPE_WIDTH_FRACTION,
                LANDSCAPE_HEIGHT_RATIO,
                ImageSlot::Landscape,
            ),
        };
        let width = fixed_width.unwrap_or(viewport_width * fraction);
        Self {
            layout,
            width,
            height: width * ratio,
            slot,
        }
    }
}

/// Override if present, the row's declared layout otherwise.
pub fn effective_layout(container: &Container, layout_override: Option<CardLayout>) -> CardLayout {
    layout_override.unwrap_or(container.layout)
}

#[derive(Debug, Clone)]
pub struct CardViewModel {
    pub movie: Arc<Movie>,
    pub image: PosterImage,
    /// "Featured" badge over the poster.
    pub featured_badge: bool,
}

#[derive(Debug, Clone)]
pub struct RowViewModel {
    pub container_id: ContainerID,
    pub title: String,
    pub metrics: CardMetrics,
    pub cards: Vec<CardViewModel>,
}

impl RowViewModel {
    pub fn build(
        container: &Container,
        layout_override: Option<CardLayout>,
        viewport_width: f32,
        fixed_width: Option<f32>,
    ) -> Self {
        let metrics = CardMetrics::compute(
            effective_layout(container, layout_override),
            viewport_width,
            fixed_width,
        );
        let cards = container
            .items
            .iter()
            .map(|m| CardViewModel {
                movie: m.clone(),
                image: PosterImage::new(m, metrics.slot),
                featured_badge: m.is_top_movie,
            })
            .collect();
        Self {
            container_id: container.id.clone(),
            title: container.title.clone(),
            metrics,
            cards,
        }
    }

    /// Re-derive sizes after a viewport change. Image states are kept.
    pub fn relayout(&mut self, viewport_width: f32, fixed_width: Option<f32>) {
        self.metrics = CardMetrics::compute(self.metrics.layout, viewport_width, fixed_width);
    }

    pub fn card_mut(&mut self, movie_id: &str) -> Option<&mut CardViewModel> {
        self.cards.iter_mut().find(|c| c.movie.id == movie_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Presentation policy for home rows, keyed by container id.
pub struct RowPolicy {
    /// Containers that are not rendered.
    pub hidden: Vec<ContainerID>,
    /// Containers pulled to the top, in this order. The rest keep catalog order.
    pub order: Vec<ContainerID>,
    pub layout_overrides: HashMap<ContainerID, CardLayout>,
    /// Containers whose cards use `featured_width` instead of a viewport fraction.
    pub prominent: Vec<ContainerID>,
    pub featured_width: Option<f32>,
}

impl RowPolicy {
    /// Visible containers in display order.
    pub fn arrange<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Container> {
        let visible = |c: &&Container| !self.hidden.contains(&c.id);

        let mut arranged: Vec<&Container> = Vec::new();
        for id in &self.order {
            if let Some(c) = catalog.container(id).filter(visible) {
                if !arranged.iter().any(|a| a.id == c.id) {
                    arranged.push(c);
                }
            }
        }
        for c in catalog.containers().iter().filter(visible) {
            if !self.order.contains(&c.id) {
                arranged.push(c);
            }
        }
        arranged
    }

    pub fn layout_override(&self, container_id: &str) -> Option<CardLayout> {
        self.layout_overrides.get(container_id).copied()
    }

    pub fn fixed_width(&self, container_id: &str) -> Option<f32> {
        if self.prominent.iter().any(|id| id == container_id) {
            self.featured_width
        } else {
            None
        }
    }

    pub fn build_rows(&self, catalog: &Catalog, viewport_width: f32) -> Vec<RowViewModel> {
        self.arrange(catalog)
            .into_iter()
            .map(|c| {
                RowViewModel::build(
                    c,
                    self.layout_override(&c.id),
                    viewport_width,
                    self.fixed_width(&c.id),
                )
            })
            .collect()
    }
}
