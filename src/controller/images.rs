use crate::models::{ImageSlot, Movie};

/// Two tier image resolution.
///
/// Tier one is a static correction table for poster urls in the bundled
/// dataset that are known to be broken. Tier two happens at render time: an
/// image that fails to load swaps to a generic placeholder chosen by slot.

struct PosterOverride {
    movie_id: &'static str,
    title: &'static str,
    slot: ImageSlot,
    url: &'static str,
}

// TODO: drop these once the dataset ships working poster urls for movie1 and movie7.
const POSTER_OVERRIDES: &[PosterOverride] = &[
    PosterOverride {
        movie_id: "movie1",
        title: "Oppenheimer",
        slot: ImageSlot::Portrait,
        url: "https://image.tmdb.org/t/p/w500/8Gxv8gSFCU0XGDykEGv7zR1n2ua.jpg",
    },
    PosterOverride {
        movie_id: "movie1",
        title: "Oppenheimer",
        slot: ImageSlot::Landscape,
        url: "https://image.tmdb.org/t/p/w1280/rCRgONKHdkzF4VortaNbsdN4jFU.jpg",
    },
    PosterOverride {
        movie_id: "movie7",
        title: "Napoleon",
        slot: ImageSlot::Portrait,
        url: "https://image.tmdb.org/t/p/w500/vcZlWvpCqHABYnihqIN9XoIQO2B.jpg",
    },
    PosterOverride {
        movie_id: "movie7",
        title: "Napoleon",
        slot: ImageSlot::Landscape,
        url: "https://image.tmdb.org/t/p/w1280/zw8FiKEZh3rIvIJXUhRFwP6zjmq.jpg",
    },
];

const PLACEHOLDER_PORTRAIT: &str =
    "https://via.placeholder.com/400x600/333333/FFFFFF?text=Movie+Poster";
const PLACEHOLDER_LANDSCAPE: &str =
    "https://via.placeholder.com/640x360/333333/FFFFFF?text=Movie+Banner";
const PLACEHOLDER_THUMBNAIL: &str =
    "https://via.placeholder.com/400x300/333333/FFFFFF?text=Thumbnail";

fn override_for(movie: &Movie, slot: ImageSlot) -> Option<&'static str> {
    POSTER_OVERRIDES
        .iter()
        .find(|o| o.movie_id == movie.id && o.title == movie.title && o.slot == slot)
        .map(|o| o.url)
}

/// The url to try first for this movie and slot.
pub fn resolve_image_url(movie: &Movie, slot: ImageSlot) -> &str {
    match override_for(movie, slot) {
        Some(url) => url,
        None => &movie.posters.get(slot).url,
    }
}

/// Generic placeholder, picked purely by slot.
pub fn placeholder_url(slot: ImageSlot) -> &'static str {
    match slot {
        ImageSlot::Portrait => PLACEHOLDER_PORTRAIT,
        ImageSlot::Landscape => PLACEHOLDER_LANDSCAPE,
        ImageSlot::Thumbnail => PLACEHOLDER_THUMBNAIL,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Resolved from the override table or the movie's posters.
    Primary(String),
    /// The primary failed.
    Placeholder(&'static str),
    /// The placeholder failed too. Nothing left to try.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Render state of one image instance. Every card and hero owns its own.
pub struct PosterImage {
    pub slot: ImageSlot,
    pub source: ImageSource,
}

impl PosterImage {
    pub fn new(movie: &Movie, slot: ImageSlot) -> Self {
        Self {
            slot,
            source: ImageSource::Primary(resolve_image_url(movie, slot).to_owned()),
        }
    }

    /// Url to load, if there is still one worth trying.
    pub fn url(&self) -> Option<&str> {
        match self.source {
            ImageSource::Primary(ref url) => Some(url),
            ImageSource::Placeholder(url) => Some(url),
            ImageSource::Exhausted => None,
        }
    }

    /// Handle a load error for the current url.
    /// Returns the next url to load, or None when the instance gives up.
    pub fn on_load_error(&mut self) -> Option<&str> {
        self.source = match self.source {
            ImageSource::Primary(_) => ImageSource::Placeholder(placeholder_url(self.slot)),
            ImageSource::Placeholder(_) | ImageSource::Exhausted => ImageSource::Exhausted,
        };
        log::debug!("{} image failed, now {:?}", self.slot.as_str(), self.source);
        self.url()
    }

    /// Whether the card should draw the icon + title caption so it keeps its shape.
    pub fn shows_caption(&self) -> bool {
        self.slot != ImageSlot::Thumbnail && !matches!(self.source, ImageSource::Primary(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::movie;

    #[test]
    fn override_wins_over_dataset_url() {
        let m = movie("movie1", "Oppenheimer", true);
        assert_eq!(
            resolve_image_url(&m, ImageSlot::Portrait),
            "https://image.tmdb.org/t/p/w500/8Gxv8gSFCU0XGDykEGv7zR1n2ua.jpg"
        );
        assert_eq!(
            resolve_image_url(&m, ImageSlot::Landscape),
            "https://image.tmdb.org/t/p/w1280/rCRgONKHdkzF4VortaNbsdN4jFU.jpg"
        );
    }

    #[test]
    fn override_ignores_own_posters_entirely() {
        let mut m = movie("movie7", "Napoleon", false);
        m.posters.landscape.url = "https://elsewhere.test/whatever.jpg".to_owned();
        assert_eq!(
            resolve_image_url(&m, ImageSlot::Landscape),
            "https://image.tmdb.org/t/p/w1280/zw8FiKEZh3rIvIJXUhRFwP6zjmq.jpg"
        );
    }

    #[test]
    fn slot_without_override_uses_dataset_url() {
        let m = movie("movie1", "Oppenheimer", true);
        assert_eq!(
            resolve_image_url(&m, ImageSlot::Thumbnail),
            "https://img.test/movie1/thumbnail.jpg"
        );
    }

    #[test]
    fn title_must_match_too() {
        let m = movie("movie1", "Not Oppenheimer", false);
        assert_eq!(
            resolve_image_url(&m, ImageSlot::Portrait),
            "https://img.test/movie1/portrait.jpg"
        );
    }

    #[test]
    fn unknown_movie_uses_dataset_url_for_every_slot() {
        let m = movie("movie3", "Barbie", false);
        for slot in [ImageSlot::Portrait, ImageSlot::Landscape, ImageSlot::Thumbnail] {
            assert_eq!(resolve_image_url(&m, slot), m.posters.get(slot).url);
        }
    }

    #[test]
    fn placeholder_by_slot() {
        assert!(placeholder_url(ImageSlot::Portrait).contains("400x600"));
        assert!(placeholder_url(ImageSlot::Landscape).contains("640x360"));
        assert!(placeholder_url(ImageSlot::Thumbnail).contains("400x300"));
    }

    mod poster_image {
        use super::*;

        #[test]
        fn starts_on_primary_without_caption() {
            let img = PosterImage::new(&movie("a", "Alpha", false), ImageSlot::Portrait);
            assert_eq!(img.url(), Some("https://img.test/a/portrait.jpg"));
            assert!(!img.shows_caption());
        }

        #[test]
        fn falls_back_to_placeholder_then_gives_up() {
            let mut img = PosterImage::new(&movie("a", "Alpha", false), ImageSlot::Landscape);
            assert_eq!(img.on_load_error(), Some(PLACEHOLDER_LANDSCAPE));
            assert!(img.shows_caption());
            assert_eq!(img.on_load_error(), None);
            assert_eq!(img.source, ImageSource::Exhausted);
            assert!(img.shows_caption());
            assert_eq!(img.on_load_error(), None);
        }

        #[test]
        fn thumbnail_never_draws_caption() {
            let mut img = PosterImage::new(&movie("a", "Alpha", false), ImageSlot::Thumbnail);
            img.on_load_error();
            assert!(!img.shows_caption());
        }

        #[test]
        fn instances_fail_independently() {
            let m = movie("a", "Alpha", false);
            let mut portrait = PosterImage::new(&m, ImageSlot::Portrait);
            let landscape = PosterImage::new(&m, ImageSlot::Landscape);
            let sibling = PosterImage::new(&m, ImageSlot::Portrait);
            portrait.on_load_error();
            assert!(matches!(portrait.source, ImageSource::Placeholder(_)));
            assert!(matches!(landscape.source, ImageSource::Primary(_)));
            assert!(matches!(sibling.source, ImageSource::Primary(_)));
        }
    }
}
