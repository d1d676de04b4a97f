mod composer;
mod dataset;
mod expression;

pub use composer::{NON_LEAF_SPLIT_LIMIT, compose_query};
pub use dataset::{Datum, Dataset, Value};
pub use expression::{
    AggregateExpression, AggregateFunction, Apply, BucketAction, MAIN_NAME, Predicate, Query,
    SPLIT_NAME, SortAction, SortDirection, SplitLevel, SplitSource,
};
