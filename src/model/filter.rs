use serde::{Deserialize, Serialize};

use crate::core::TimeRange;
use crate::query::Predicate;

/// What a clause keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterSelection {
    TimeRange { range: TimeRange },
    Values { values: Vec<String> },
}

/// Restriction of one dimension expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    pub expression: String,
    pub selection: FilterSelection,
}

impl FilterClause {
    #[must_use]
    pub fn time_range(expression: impl Into<String>, range: TimeRange) -> Self {
        Self {
            expression: expression.into(),
            selection: FilterSelection::TimeRange { range },
        }
    }

    #[must_use]
    pub fn values(expression: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            expression: expression.into(),
            selection: FilterSelection::Values { values },
        }
    }

    fn to_predicate(&self) -> Predicate {
        match &self.selection {
            FilterSelection::TimeRange { range } => Predicate::Within {
                attribute: self.expression.clone(),
                range: *range,
            },
            FilterSelection::Values { values } => Predicate::In {
                attribute: self.expression.clone(),
                values: values.clone(),
            },
        }
    }
}

/// Conjunction of clauses, at most one per expression.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter {
    clauses: Vec<FilterClause>,
}

impl Filter {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_clause(clause: FilterClause) -> Self {
        Self {
            clauses: vec![clause],
        }
    }

    #[must_use]
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns a filter with `clause` replacing any clause on the same expression.
    #[must_use]
    pub fn set_clause(&self, clause: FilterClause) -> Self {
        let mut clauses: Vec<FilterClause> = self
            .clauses
            .iter()
            .filter(|existing| existing.expression != clause.expression)
            .cloned()
            .collect();
        clauses.push(clause);
        Self { clauses }
    }

    #[must_use]
    pub fn remove_clause(&self, expression: &str) -> Self {
        Self {
            clauses: self
                .clauses
                .iter()
                .filter(|clause| clause.expression != expression)
                .cloned()
                .collect(),
        }
    }

    /// Time range selected on `expression`, if any.
    #[must_use]
    pub fn time_range(&self, expression: &str) -> Option<TimeRange> {
        self.clauses
            .iter()
            .filter(|clause| clause.expression == expression)
            .find_map(|clause| match &clause.selection {
                FilterSelection::TimeRange { range } => Some(*range),
                FilterSelection::Values { .. } => None,
            })
    }

    #[must_use]
    pub fn to_predicate(&self) -> Predicate {
        match self.clauses.as_slice() {
            [] => Predicate::True,
            [single] => single.to_predicate(),
            clauses => Predicate::And {
                operands: clauses.iter().map(FilterClause::to_predicate).collect(),
            },
        }
    }
}
