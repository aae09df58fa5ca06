pub mod catalog;
pub mod providers;
pub mod recommendations;
pub mod similarity;
pub mod weighting;

pub use catalog::Catalog;
pub use recommendations::{initialize, recommend, IndexHandle};
pub use weighting::WeightTable;
