//! The movie record and its create/patch shapes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod validation;

pub use validation::{validate_movie, validate_partial_movie, Issue, IssueCode, ValidationErrors};

/// Genre names accepted on create/update. Matching is case-insensitive; the
/// canonical spelling below is what gets stored.
pub const KNOWN_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Crime",
    "Comedy",
    "Drama",
    "Fantasy",
    "Horror",
    "Thriller",
    "Sci-Fi",
];

/// Rating assigned when a create payload omits `rate`.
pub const DEFAULT_RATE: f64 = 5.0;

/// A stored movie record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<String>,
    pub rate: f64,
}

/// A fully validated create payload. Carries no id: identity is assigned by the service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<String>,
    /// Defaults to 5 when omitted.
    #[serde(default = "default_rate")]
    pub rate: f64,
}

fn default_rate() -> f64 {
    DEFAULT_RATE
}

/// A validated partial update. Absent fields are left untouched on merge.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
pub struct MoviePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        *self == MoviePatch::default()
    }
}

impl Movie {
    pub fn from_new(id: String, new: NewMovie) -> Self {
        Self {
            id,
            title: new.title,
            year: new.year,
            director: new.director,
            duration: new.duration,
            poster: new.poster,
            genre: new.genre,
            rate: new.rate,
        }
    }

    /// Overwrites every field present in `patch`. The id is never touched.
    pub fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(director) = patch.director {
            self.director = director;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(poster) = patch.poster {
            self.poster = poster;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
    }

    /// Case-insensitive genre membership, used by the `?genre=` filter.
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.to_lowercase();
        self.genre.iter().any(|g| g.to_lowercase() == wanted)
    }
}
