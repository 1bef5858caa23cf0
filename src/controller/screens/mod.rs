use std::sync::Arc;

use crate::models::{ContainerID, Movie, MovieID};

pub mod details;
pub mod home;

pub use self::details::{DetailsEvent, DetailsScreen, ExpandableSection, SectionKind, SectionLine};
pub use self::home::{HeroViewModel, HomeEvent, HomeScreen, HomeState, HomeView};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Which image instance on a screen an image load belongs to.
pub enum ImageKey {
    Hero,
    Card { row: ContainerID, movie: MovieID },
    Header,
    Similar { movie: MovieID },
}

#[derive(Debug, Clone)]
/// Side effects a screen asks the shell to perform.
pub enum Command {
    FetchImage { key: ImageKey, url: String },
    OpenDetails(Arc<Movie>),
    GoBack,
}
