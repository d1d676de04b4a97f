use tracing::debug;

use crate::model::{Filter, Measure, SplitCombine, Splits};

use super::expression::{Apply, Query, SortAction, SplitLevel, SplitSource};

/// Group cap applied to every non-leaf split level.
pub const NON_LEAF_SPLIT_LIMIT: usize = 5;

/// Builds the nested aggregation query for a panel.
///
/// Split order defines nesting: index 0 groups the filtered rows, each later
/// split groups inside its predecessor's groups. The leaf level is sorted
/// ascending on its own dimension with no limit. Outer levels keep the top
/// [`NON_LEAF_SPLIT_LIMIT`] groups by the first measure.
#[must_use]
pub fn compose_query(filter: &Filter, splits: &Splits, measures: &[Measure]) -> Query {
    let query = Query {
        filter: filter.to_predicate(),
        applies: measure_applies(measures),
        split: compose_level(splits.as_slice(), 0, measures),
    };
    debug!(
        measures = measures.len(),
        split_depth = query.split_depth(),
        query = %query,
        "composed panel query"
    );
    query
}

fn measure_applies(measures: &[Measure]) -> Vec<Apply> {
    measures
        .iter()
        .map(|measure| Apply {
            name: measure.name.clone(),
            expression: measure.expression.clone(),
        })
        .collect()
}

fn compose_level(
    combines: &[SplitCombine],
    index: usize,
    measures: &[Measure],
) -> Option<SplitLevel> {
    let combine = combines.get(index)?;
    let is_leaf = index + 1 == combines.len();

    let (sort, limit) = if is_leaf {
        (Some(SortAction::ascending(combine.dimension.clone())), None)
    } else {
        // Without measures there is nothing to rank groups by; the cap still applies.
        (
            measures
                .first()
                .map(|measure| SortAction::descending(measure.name.clone())),
            Some(NON_LEAF_SPLIT_LIMIT),
        )
    };

    Some(SplitLevel {
        source: if index == 0 {
            SplitSource::Main
        } else {
            SplitSource::EnclosingGroup
        },
        split_on: combine.expression.clone(),
        bucket: combine.bucket_action.clone(),
        key: combine.dimension.clone(),
        applies: measure_applies(measures),
        sort,
        limit,
        split: compose_level(combines, index + 1, measures).map(Box::new),
    })
}
