//! Tab-delimited catalog loader.
//!
//! Source row order is kept as the canonical movie index: row `i` of
//! [`Catalog::features`] belongs to `Catalog::movies()[i]`.

use std::collections::HashMap;
use std::io::Read;

use crate::{
    error::{AppError, AppResult},
    models::{Genre, Movie, MovieId},
    services::weighting::{ColumnClass, FeatureMatrix, FeatureSchema, SCALAR_COLUMNS},
};

pub const TITLE_COLUMN: &str = "Titre_original";
pub const ID_COLUMN: &str = "ID_film";
pub const POSTER_COLUMN: &str = "Affiche";

/// Movies in source order plus their raw (unweighted) feature values
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
    schema: FeatureSchema,
    features: FeatureMatrix,
}

impl Catalog {
    pub fn from_bytes(bytes: &[u8]) -> AppResult<Self> {
        Self::from_reader(bytes)
    }

    /// Parses a tab-delimited table with a header row
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let locate = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| AppError::DataLoad(format!("missing required column '{}'", name)))
        };

        let title_idx = locate(TITLE_COLUMN)?;
        let id_idx = locate(ID_COLUMN)?;
        let poster_idx = locate(POSTER_COLUMN)?;
        for column in SCALAR_COLUMNS {
            locate(column)?;
        }

        let schema = FeatureSchema::classify(headers.iter());
        let genre_positions: Vec<(Genre, usize)> = Genre::ALL
            .into_iter()
            .filter_map(|genre| schema.genre_position(genre).map(|pos| (genre, pos)))
            .collect();

        let mut movies = Vec::new();
        let mut features = FeatureMatrix::with_capacity(0, schema.len());
        let mut seen_titles: HashMap<String, u64> = HashMap::new();
        let mut values = Vec::with_capacity(schema.len());

        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());

            let title = record.get(title_idx).unwrap_or_default().to_string();
            if let Some(first_line) = seen_titles.insert(title.clone(), line) {
                return Err(AppError::DataLoad(format!(
                    "duplicate title '{}' on lines {} and {}",
                    title, first_line, line
                )));
            }

            values.clear();
            for column in schema.columns() {
                let raw = record.get(column.source_index).unwrap_or_default();
                values.push(parse_feature(raw, &column.name, line)?);
            }

            let genres = genre_positions
                .iter()
                .filter(|(_, pos)| values[*pos] != 0.0)
                .map(|(genre, _)| *genre)
                .collect();

            movies.push(Movie {
                id: MovieId(record.get(id_idx).unwrap_or_default().to_string()),
                title,
                poster_path: record.get(poster_idx).unwrap_or_default().to_string(),
                genres,
            });
            features.push_row(&values)?;
        }

        Ok(Self {
            movies,
            schema,
            features,
        })
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Number of scalar columns present, excluding genre/director/actor flags
    pub fn scalar_feature_count(&self) -> usize {
        self.schema
            .columns()
            .iter()
            .filter(|c| c.class == ColumnClass::Scalar)
            .count()
    }
}

fn parse_feature(raw: &str, column: &str, line: u64) -> AppResult<f64> {
    let trimmed = raw.trim();
    let value = trimmed.parse::<f64>().map_err(|_| {
        AppError::DataLoad(format!(
            "line {}: column '{}' has non-numeric value '{}'",
            line, column, trimmed
        ))
    })?;

    if !value.is_finite() {
        return Err(AppError::DataLoad(format!(
            "line {}: column '{}' is not finite",
            line, column
        )));
    }

    Ok(value)
}
