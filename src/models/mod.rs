pub mod movie;

pub use movie::{Genre, Movie, MovieId, Recommendation};
