//! Column classification and per-category feature weighting.
//!
//! The catalog header is classified exactly once into a [`FeatureSchema`].
//! Only classified columns become features; identifiers, poster paths and
//! unknown columns are dropped before similarity is computed.

use crate::{
    error::{AppError, AppResult},
    models::Genre,
};

/// Scalar feature columns matched by exact name
pub const SCALAR_COLUMNS: [&str; 6] = [
    "Note_moyenne",
    "Nb_votants",
    "Annee_sortie",
    "Duree_minutes",
    "Film",
    "Court_metrage",
];

pub const DIRECTOR_PREFIX: &str = "DIR_";
pub const ACTOR_PREFIX: &str = "ACT_";

/// Category a catalog column falls into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnClass {
    Scalar,
    Genre(Genre),
    Director(String),
    Actor(String),
}

impl ColumnClass {
    /// Classifies a header name, `None` for columns that do not take part in similarity
    pub fn of(name: &str) -> Option<Self> {
        if SCALAR_COLUMNS.contains(&name) {
            Some(ColumnClass::Scalar)
        } else if let Some(genre) = Genre::from_column(name) {
            Some(ColumnClass::Genre(genre))
        } else if let Some(director) = name.strip_prefix(DIRECTOR_PREFIX) {
            Some(ColumnClass::Director(director.to_string()))
        } else {
            name.strip_prefix(ACTOR_PREFIX)
                .map(|actor| ColumnClass::Actor(actor.to_string()))
        }
    }
}

/// Multiplicative weight applied to each column category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightTable {
    pub scalar: f64,
    pub genre: f64,
    pub director: f64,
    pub actor: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            scalar: 5.0,
            genre: 10.0,
            director: 20.0,
            actor: 25.0,
        }
    }
}

impl WeightTable {
    pub fn weight_of(&self, class: &ColumnClass) -> f64 {
        match class {
            ColumnClass::Scalar => self.scalar,
            ColumnClass::Genre(_) => self.genre,
            ColumnClass::Director(_) => self.director,
            ColumnClass::Actor(_) => self.actor,
        }
    }
}

/// A classified column and its position in the source header
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub source_index: usize,
    pub class: ColumnClass,
}

/// Ordered list of feature columns, aligned with the feature matrix columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<FeatureColumn>,
}

impl FeatureSchema {
    pub fn classify<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let columns = headers
            .into_iter()
            .enumerate()
            .filter_map(|(source_index, name)| {
                ColumnClass::of(name).map(|class| FeatureColumn {
                    name: name.to_string(),
                    source_index,
                    class,
                })
            })
            .collect();

        Self { columns }
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Feature position of a genre flag, if the catalog carries it
    pub fn genre_position(&self, genre: Genre) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.class == ColumnClass::Genre(genre))
    }

    pub fn director_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| matches!(c.class, ColumnClass::Director(_)))
            .count()
    }

    pub fn actor_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| matches!(c.class, ColumnClass::Actor(_)))
            .count()
    }

    /// One weight per feature column, in schema order
    pub fn weight_vector(&self, weights: &WeightTable) -> Vec<f64> {
        self.columns
            .iter()
            .map(|column| weights.weight_of(&column.class))
            .collect()
    }
}

/// Dense row-major matrix: one row per movie, one column per feature
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    pub fn with_capacity(rows: usize, cols: usize) -> Self {
        Self {
            rows: 0,
            cols,
            data: Vec::with_capacity(rows * cols),
        }
    }

    /// Builds a matrix from rows of equal length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut matrix = Self::with_capacity(rows.len(), cols);
        for row in &rows {
            matrix.push_row(row)?;
        }
        Ok(matrix)
    }

    pub fn push_row(&mut self, row: &[f64]) -> AppResult<()> {
        if row.len() != self.cols {
            return Err(AppError::Internal(format!(
                "feature row has {} values, expected {}",
                row.len(),
                self.cols
            )));
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }
}

/// Scales every column by its weight, returning a new matrix
///
/// Fails when a weighted value is no longer finite.
pub fn apply_weights(raw: &FeatureMatrix, weights: &[f64]) -> AppResult<FeatureMatrix> {
    if raw.cols() != weights.len() {
        return Err(AppError::Internal(format!(
            "{} weights for {} feature columns",
            weights.len(),
            raw.cols()
        )));
    }

    let mut weighted = FeatureMatrix::with_capacity(raw.rows(), raw.cols());
    let mut scaled = Vec::with_capacity(raw.cols());
    for i in 0..raw.rows() {
        scaled.clear();
        for (j, (value, weight)) in raw.row(i).iter().zip(weights).enumerate() {
            let product = value * weight;
            if !product.is_finite() {
                return Err(AppError::DataLoad(format!(
                    "row {}: feature {} overflows once weighted",
                    i, j
                )));
            }
            scaled.push(product);
        }
        weighted.push_row(&scaled)?;
    }

    Ok(weighted)
}
