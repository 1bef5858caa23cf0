use serde::{Deserialize, Serialize};

/// Metadata for a single title in the catalog.
/// Field names follow the bundled dataset, which is camelCase JSON.

pub type MovieID = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// One of the three named poster slots every movie carries.
pub enum ImageSlot {
    Portrait,
    Landscape,
    Thumbnail,
}

impl ImageSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSlot::Portrait => "portrait",
            ImageSlot::Landscape => "landscape",
            ImageSlot::Thumbnail => "thumbnail",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poster {
    pub url: String,
    /// Free form, e.g. "2:3" or "16:9". Informational only.
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posters {
    pub portrait: Poster,
    pub landscape: Poster,
    pub thumbnail: Poster,
}

impl Posters {
    pub fn get(&self, slot: ImageSlot) -> &Poster {
        match slot {
            ImageSlot::Portrait => &self.portrait,
            ImageSlot::Landscape => &self.landscape,
            ImageSlot::Thumbnail => &self.thumbnail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub character_name: String,
    pub actor_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    pub directors: Vec<String>,
    pub producers: Vec<String>,
    pub writers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Content rating, e.g. "PG-13".
    pub rating: String,
    /// Advisory tags in display order.
    pub advisory_content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Unique within the catalog.
    pub id: MovieID,
    pub title: String,
    pub year: i32,
    /// Human readable runtime, e.g. "2h 15m".
    pub duration: String,
    /// Content rating string.
    pub rating: String,
    /// "HD", "4K" and friends.
    pub quality: String,
    pub description: String,
    /// At most one movie should carry this flag.
    pub is_top_movie: bool,
    /// Ids of related titles, in display order.
    #[serde(default)]
    pub similar_content: Vec<MovieID>,
    pub posters: Posters,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Crew,
    #[serde(default)]
    pub classification: Classification,
}

impl Movie {
    /// Runtime parsed from the free form duration text.
    pub fn runtime(&self) -> Option<chrono::Duration> {
        parse_runtime(&self.duration)
    }

    /// Duration normalised to "2h 15m" when parseable, raw text otherwise.
    pub fn display_duration(&self) -> String {
        match self.runtime() {
            Some(d) => format_runtime(d),
            None => self.duration.clone(),
        }
    }

    /// "2023 • 3h 0m • 4K"
    pub fn hero_meta_line(&self) -> String {
        format!(
            "{} • {} • {}",
            self.year,
            self.display_duration(),
            self.quality
        )
    }

    /// "3h 0m • R • 2023 • 4K"
    pub fn details_meta_line(&self) -> String {
        format!(
            "{} • {} • {} • {}",
            self.display_duration(),
            self.rating,
            self.year,
            self.quality
        )
    }
}

/// Accepts "2h 15m", "95m", "1h", "120 min", "1 hr 5 mins".
fn parse_runtime(text: &str) -> Option<chrono::Duration> {
    let mut total_minutes: i64 = 0;
    let mut pending: Option<i64> = None;
    let mut seen_unit = false;
    let mut chars = text.trim().chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(first) = c.to_digit(10) {
            if pending.is_some() {
                return None;
            }
            let mut n = first as i64;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                n = n.checked_mul(10)?.checked_add(d as i64)?;
                chars.next();
            }
            pending = Some(n);
        } else if c.is_ascii_alphabetic() {
            let mut unit = String::from(c.to_ascii_lowercase());
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_alphabetic() {
                    break;
                }
                unit.push(next.to_ascii_lowercase());
                chars.next();
            }
            let value = pending.take()?;
            match unit.as_str() {
                "h" | "hr" | "hrs" | "hour" | "hours" => total_minutes += value.checked_mul(60)?,
                "m" | "min" | "mins" | "minute" | "minutes" => total_minutes += value,
                _ => return None,
            }
            seen_unit = true;
        } else if !c.is_whitespace() {
            return None;
        }
    }

    if pending.is_some() || !seen_unit {
        return None;
    }
    chrono::Duration::try_minutes(total_minutes)
}

fn format_runtime(d: chrono::Duration) -> String {
    let minutes = d.num_minutes();
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::movie;

    #[test]
    fn parses_common_runtime_forms() {
        assert_eq!(parse_runtime("2h 15m"), Some(chrono::Duration::minutes(135)));
        assert_eq!(parse_runtime("95m"), Some(chrono::Duration::minutes(95)));
        assert_eq!(parse_runtime("1h"), Some(chrono::Duration::minutes(60)));
        assert_eq!(parse_runtime("120 min"), Some(chrono::Duration::minutes(120)));
        assert_eq!(parse_runtime("1 hr 5 mins"), Some(chrono::Duration::minutes(65)));
    }

    #[test]
    fn rejects_garbage_runtime() {
        assert_eq!(parse_runtime(""), None);
        assert_eq!(parse_runtime("120"), None);
        assert_eq!(parse_runtime("2h 15"), None);
        assert_eq!(parse_runtime("two hours"), None);
        assert_eq!(parse_runtime("2x"), None);
    }

    #[test]
    fn display_duration_falls_back_to_raw_text() {
        let mut m = movie("m1", "Alpha", false);
        m.duration = "3h".to_owned();
        assert_eq!(m.display_duration(), "3h 0m");
        m.duration = "feature length".to_owned();
        assert_eq!(m.display_duration(), "feature length");
    }

    #[test]
    fn meta_lines() {
        let mut m = movie("m1", "Alpha", false);
        m.duration = "2h 15m".to_owned();
        m.rating = "R".to_owned();
        m.year = 2023;
        m.quality = "4K".to_owned();
        assert_eq!(m.hero_meta_line(), "2023 • 2h 15m • 4K");
        assert_eq!(m.details_meta_line(), "2h 15m • R • 2023 • 4K");
    }

    #[test]
    fn deserializes_camel_case_document() {
        let raw = r#"{
            "id": "movie9",
            "title": "Dune",
            "year": 2021,
            "duration": "2h 35m",
            "rating": "PG-13",
            "quality": "HD",
            "description": "Spice.",
            "isTopMovie": true,
            "similarContent": ["movie1"],
            "posters": {
                "portrait": {"url": "https://img/p.jpg", "aspectRatio": "2:3"},
                "landscape": {"url": "https://img/l.jpg", "aspectRatio": "16:9"},
                "thumbnail": {"url": "https://img/t.jpg", "aspectRatio": "4:3"}
            },
            "cast": [{"characterName": "Paul", "actorName": "Timothee"}],
            "crew": {"directors": ["Denis"], "producers": [], "writers": ["Jon", "Eric"]},
            "classification": {"rating": "PG-13", "advisoryContent": ["violence"]}
        }"#;
        let m: Movie = serde_json::from_str(raw).unwrap();
        assert!(m.is_top_movie);
        assert_eq!(m.similar_content, vec!["movie1".to_owned()]);
        assert_eq!(m.posters.get(ImageSlot::Landscape).url, "https://img/l.jpg");
        assert_eq!(m.cast[0].character_name, "Paul");
        assert_eq!(m.crew.writers.len(), 2);
        assert_eq!(m.classification.advisory_content, vec!["violence".to_owned()]);
    }
}
