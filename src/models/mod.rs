pub mod catalog;
pub mod movie;

pub use self::catalog::{CardLayout, Catalog, CatalogBuilder, Container, ContainerID};
pub use self::movie::{
    CastMember, Classification, Crew, ImageSlot, Movie, MovieID, Poster, Posters,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    fn poster(id: &str, slot: &str, aspect_ratio: &str) -> Poster {
        Poster {
            url: format!("https://img.test/{}/{}.jpg", id, slot),
            aspect_ratio: aspect_ratio.to_owned(),
        }
    }

    /// A complete movie record with predictable poster urls.
    pub fn movie(id: &str, title: &str, top: bool) -> Movie {
        Movie {
            id: id.to_owned(),
            title: title.to_owned(),
            year: 2023,
            duration: "2h 0m".to_owned(),
            rating: "PG-13".to_owned(),
            quality: "HD".to_owned(),
            description: format!("{} description", title),
            is_top_movie: top,
            similar_content: vec![],
            posters: Posters {
                portrait: poster(id, "portrait", "2:3"),
                landscape: poster(id, "landscape", "16:9"),
                thumbnail: poster(id, "thumbnail", "4:3"),
            },
            cast: vec![
                CastMember {
                    character_name: "Lead".to_owned(),
                    actor_name: format!("{} Actor", title),
                },
                CastMember {
                    character_name: "Sidekick".to_owned(),
                    actor_name: "Second Actor".to_owned(),
                },
            ],
            crew: Crew {
                directors: vec!["A. Director".to_owned()],
                producers: vec!["P. One".to_owned(), "P. Two".to_owned()],
                writers: vec!["W. Riter".to_owned()],
            },
            classification: Classification {
                rating: "PG-13".to_owned(),
                advisory_content: vec!["violence".to_owned(), "language".to_owned()],
            },
        }
    }
}
