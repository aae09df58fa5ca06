use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Catalog identifier of a movie (the `ID_film` column), kept opaque
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Genres carried as binary flag columns in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Comedy,
    Documentary,
    Family,
    Romance,
}

impl Genre {
    pub const ALL: [Genre; 4] = [
        Genre::Comedy,
        Genre::Documentary,
        Genre::Family,
        Genre::Romance,
    ];

    /// Name of the flag column holding this genre
    pub fn column(self) -> &'static str {
        match self {
            Genre::Comedy => "Comedie",
            Genre::Documentary => "Documentaire",
            Genre::Family => "Famille",
            Genre::Romance => "Romance",
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Genre::ALL.into_iter().find(|genre| genre.column() == column)
    }

    /// Parses the lowercase English name used by the HTTP API
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "comedy" => Some(Genre::Comedy),
            "documentary" => Some(Genre::Documentary),
            "family" => Some(Genre::Family),
            "romance" => Some(Genre::Romance),
            _ => None,
        }
    }
}

/// One catalog row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub poster_path: String,
    /// Genres whose flag column is non-zero for this row
    pub genres: Vec<Genre>,
}

impl Movie {
    pub fn has_any_genre(&self, genres: &[Genre]) -> bool {
        self.genres.iter().any(|genre| genres.contains(genre))
    }
}

/// A single entry of a recommendation list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub poster_path: String,
    pub id: MovieId,
}

impl From<&Movie> for Recommendation {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            id: movie.id.clone(),
        }
    }
}
