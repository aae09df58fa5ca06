use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Genre, Movie, Recommendation},
    services::{
        catalog::Catalog,
        providers::CatalogProvider,
        similarity::SimilarityMatrix,
        weighting::{apply_weights, WeightTable},
    },
};

/// Read-only recommendation index: the catalog plus its similarity matrix
///
/// Built once; every query method takes `&self` and never mutates, so a
/// published handle can be shared across threads without locking.
#[derive(Debug)]
pub struct IndexHandle {
    catalog: Catalog,
    similarity: SimilarityMatrix,
    by_title: HashMap<String, usize>,
}

impl IndexHandle {
    /// Weights the catalog features and computes the full similarity matrix
    pub fn build(catalog: Catalog, weights: WeightTable) -> AppResult<Self> {
        let weight_vector = catalog.schema().weight_vector(&weights);
        let weighted = apply_weights(catalog.features(), &weight_vector)?;
        let similarity = SimilarityMatrix::cosine(&weighted);

        let by_title = catalog
            .movies()
            .iter()
            .enumerate()
            .map(|(idx, movie)| (movie.title.clone(), idx))
            .collect();

        Ok(Self {
            catalog,
            similarity,
            by_title,
        })
    }

    /// Parses raw catalog bytes and builds the index
    pub fn from_bytes(bytes: &[u8], weights: WeightTable) -> AppResult<Self> {
        let catalog = Catalog::from_bytes(bytes)?;
        Self::build(catalog, weights)
    }

    /// Returns the `n` movies most similar to `title`, most similar first
    ///
    /// The query movie is excluded by position, never by similarity value.
    /// Ties keep catalog order. Asking for more movies than the catalog holds
    /// returns every other movie.
    pub fn recommend(&self, title: &str, n: usize) -> AppResult<Vec<Recommendation>> {
        if n == 0 {
            return Err(AppError::InvalidArgument(
                "number of recommendations must be at least 1".to_string(),
            ));
        }

        let query = self.position(title)?;
        let sims = self.similarity.row(query);

        let mut ranked: Vec<usize> = (0..self.catalog.len()).filter(|&i| i != query).collect();
        // stable sort: equal similarities stay in catalog order
        ranked.sort_by(|&a, &b| sims[b].total_cmp(&sims[a]));
        ranked.truncate(n);

        let movies = self.catalog.movies();
        Ok(ranked
            .into_iter()
            .map(|i| Recommendation::from(&movies[i]))
            .collect())
    }

    /// Exact, case-sensitive title lookup
    pub fn movie(&self, title: &str) -> AppResult<&Movie> {
        let idx = self.position(title)?;
        Ok(&self.catalog.movies()[idx])
    }

    /// Titles of movies flagged with any of `genres`, sorted alphabetically
    pub fn titles_with_genres(&self, genres: &[Genre]) -> Vec<&str> {
        let mut titles: Vec<&str> = self
            .catalog
            .movies()
            .iter()
            .filter(|movie| movie.has_any_genre(genres))
            .map(|movie| movie.title.as_str())
            .collect();
        titles.sort_unstable();
        titles
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    fn position(&self, title: &str) -> AppResult<usize> {
        if title.is_empty() {
            return Err(AppError::TitleNotFound("empty title".to_string()));
        }
        self.by_title
            .get(title)
            .copied()
            .ok_or_else(|| AppError::TitleNotFound(title.to_string()))
    }
}

/// Fetches the catalog and builds the index off the async runtime
pub async fn initialize(
    provider: &dyn CatalogProvider,
    weights: WeightTable,
) -> AppResult<IndexHandle> {
    tracing::info!(source = %provider.describe(), "Loading catalog");
    let bytes = provider.fetch().await?;

    let index = tokio::task::spawn_blocking(move || IndexHandle::from_bytes(&bytes, weights))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let schema = index.catalog().schema();
    tracing::info!(
        movies = index.len(),
        features = schema.len(),
        scalar_features = index.catalog().scalar_feature_count(),
        directors = schema.director_count(),
        actors = schema.actor_count(),
        "Recommendation index built"
    );

    Ok(index)
}

/// Free-function form of [`IndexHandle::recommend`]
pub fn recommend(handle: &IndexHandle, title: &str, n: usize) -> AppResult<Vec<Recommendation>> {
    handle.recommend(title, n)
}
