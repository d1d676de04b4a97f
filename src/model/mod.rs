mod data_source;
mod dimension;
mod filter;
mod measure;
mod split_combine;
mod splits;

pub use data_source::DataSource;
pub use dimension::{Dimension, DimensionKind};
pub use filter::{Filter, FilterClause, FilterSelection};
pub use measure::{DEFAULT_MEASURE_FORMAT, Measure};
pub use split_combine::SplitCombine;
pub use splits::Splits;
