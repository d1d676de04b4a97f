use chrono::{TimeDelta, TimeZone, Utc};
use timeseries_panel::core::{Duration, TimeRange, Timezone};
use timeseries_panel::model::{Dimension, DimensionKind, Filter, FilterClause, Measure, SplitCombine, Splits};
use timeseries_panel::query::{
    AggregateExpression, AggregateFunction, NON_LEAF_SPLIT_LIMIT, Predicate, SortAction,
    SortDirection, SplitSource, compose_query,
};

fn time_dimension() -> Dimension {
    Dimension::new("time", DimensionKind::Time)
}

fn page_dimension() -> Dimension {
    Dimension::new("page", DimensionKind::String)
}

fn hourly_time_split() -> SplitCombine {
    SplitCombine::time(&time_dimension(), Duration::hour(), Timezone::utc())
}

fn measures() -> Vec<Measure> {
    vec![
        Measure::new("count", AggregateExpression::count()),
        Measure::new("added", AggregateExpression::sum("added")),
    ]
}

fn day_filter() -> Filter {
    let start = Utc
        .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .single()
        .expect("valid start");
    let range = TimeRange::new(start, start + TimeDelta::days(1)).expect("valid range");
    Filter::from_clause(FilterClause::time_range("time", range))
}

#[test]
fn outer_split_ranks_by_first_measure_and_leaf_sorts_chronologically() {
    let splits = Splits::from_vec(vec![SplitCombine::new(&page_dimension()), hourly_time_split()]);
    let measures = vec![Measure::new("m1", AggregateExpression::sum("delta"))];
    let query = compose_query(&day_filter(), &splits, &measures);

    assert_eq!(query.split_depth(), 2);

    let outer = query.split_level(0).expect("outer level");
    assert_eq!(outer.key, "page");
    assert_eq!(outer.sort, Some(SortAction::descending("m1")));
    assert_eq!(outer.limit, Some(NON_LEAF_SPLIT_LIMIT));
    assert_eq!(outer.limit, Some(5));

    let leaf = query.split_level(1).expect("leaf level");
    assert_eq!(leaf.key, "time");
    assert_eq!(leaf.sort, Some(SortAction::ascending("time")));
    assert_eq!(leaf.limit, None);
    assert!(leaf.split.is_none());
}

#[test]
fn only_outermost_level_reads_main_rows() {
    let splits = Splits::from_vec(vec![
        SplitCombine::new(&page_dimension()),
        SplitCombine::new(&Dimension::new("user", DimensionKind::String)),
        hourly_time_split(),
    ]);
    let query = compose_query(&day_filter(), &splits, &measures());

    assert_eq!(query.split_depth(), 3);
    assert_eq!(query.split_level(0).map(|l| l.source), Some(SplitSource::Main));
    assert_eq!(
        query.split_level(1).map(|l| l.source),
        Some(SplitSource::EnclosingGroup)
    );
    assert_eq!(
        query.split_level(2).map(|l| l.source),
        Some(SplitSource::EnclosingGroup)
    );
    assert_eq!(query.split_level(1).and_then(|l| l.limit), Some(5));
}

#[test]
fn every_level_reapplies_all_measures() {
    let splits = Splits::from_vec(vec![SplitCombine::new(&page_dimension()), hourly_time_split()]);
    let query = compose_query(&day_filter(), &splits, &measures());

    let names = |applies: &[timeseries_panel::query::Apply]| -> Vec<String> {
        applies.iter().map(|apply| apply.name.clone()).collect()
    };
    assert_eq!(names(&query.applies), vec!["count", "added"]);
    for index in 0..2 {
        let level = query.split_level(index).expect("level");
        assert_eq!(names(&level.applies), vec!["count", "added"]);
    }
    assert_eq!(
        query.applies[1].expression,
        AggregateExpression::of(AggregateFunction::Sum, "added")
    );
}

#[test]
fn single_time_split_is_a_leaf() {
    let splits = Splits::from_split_combine(hourly_time_split());
    let query = compose_query(&day_filter(), &splits, &measures());

    let leaf = query.split_level(0).expect("leaf level");
    assert_eq!(leaf.source, SplitSource::Main);
    assert_eq!(leaf.sort.as_ref().map(|s| s.direction), Some(SortDirection::Ascending));
    assert_eq!(leaf.limit, None);
    assert_eq!(
        leaf.bucket.as_ref().and_then(|b| b.duration()),
        Some(Duration::hour())
    );
}

#[test]
fn empty_splits_produce_flat_query() {
    let query = compose_query(&day_filter(), &Splits::empty(), &measures());
    assert!(query.split.is_none());
    assert_eq!(query.split_depth(), 0);
    assert_eq!(query.applies.len(), 2);
}

#[test]
fn empty_measures_keep_query_well_formed() {
    let splits = Splits::from_vec(vec![SplitCombine::new(&page_dimension()), hourly_time_split()]);
    let query = compose_query(&day_filter(), &splits, &[]);

    assert!(query.applies.is_empty());
    let outer = query.split_level(0).expect("outer level");
    assert!(outer.applies.is_empty());
    assert_eq!(outer.sort, None);
    assert_eq!(outer.limit, Some(5));
    assert_eq!(
        query.split_level(1).and_then(|l| l.sort.clone()),
        Some(SortAction::ascending("time"))
    );
}

#[test]
fn filter_becomes_main_restriction() {
    let query = compose_query(&day_filter(), &Splits::empty(), &[]);
    assert!(matches!(
        query.filter,
        Predicate::Within { ref attribute, .. } if attribute == "time"
    ));

    let unfiltered = compose_query(&Filter::empty(), &Splits::empty(), &[]);
    assert_eq!(unfiltered.filter, Predicate::True);
}

#[test]
fn combined_filter_renders_as_conjunction() {
    let filter = day_filter().set_clause(FilterClause::values(
        "page",
        vec!["Main_Page".to_owned(), "Rust".to_owned()],
    ));
    let query = compose_query(&filter, &Splits::empty(), &[]);
    match &query.filter {
        Predicate::And { operands } => assert_eq!(operands.len(), 2),
        other => panic!("expected conjunction, got {other:?}"),
    }
}

#[test]
fn query_renders_readable_expression() {
    let splits = Splits::from_vec(vec![SplitCombine::new(&page_dimension()), hourly_time_split()]);
    let measures = vec![Measure::new("count", AggregateExpression::count())];
    let rendered = compose_query(&Filter::empty(), &splits, &measures).to_string();

    assert!(rendered.starts_with("$().apply(main, $main.filter(true))"));
    assert!(rendered.contains(".apply(count, $main.count())"));
    assert!(rendered.contains("$main.split($page, page)"));
    assert!(rendered.contains(".sort($count, descending).limit(5)"));
    assert!(rendered.contains("$main.split($time.timeBucket(PT1H, Etc/UTC), time)"));
    assert!(rendered.contains(".sort($time, ascending)"));
}

#[test]
fn query_round_trips_through_json() {
    let splits = Splits::from_vec(vec![SplitCombine::new(&page_dimension()), hourly_time_split()]);
    let query = compose_query(&day_filter(), &splits, &measures());

    let json = serde_json::to_string(&query).expect("serialize");
    let decoded: timeseries_panel::Query = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, query);
}
