use std::collections::HashMap;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::InsightError;
use crate::model::CoachRecord;
use crate::schema::{self, ethnicity, field, gender, stage};

/// User-selected constraints narrowing which records contribute to an
/// aggregation: attribute name -> allowed values.
///
/// An absent attribute or an empty value list imposes no constraint. Unknown
/// attribute names are accepted and ignored - the UI layer may carry keys this
/// core does not track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    constraints: HashMap<String, Vec<String>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style constraint: allow only `values` for `attribute`.
    pub fn allow<I, S>(mut self, attribute: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(attribute, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn set(&mut self, attribute: &str, values: Vec<String>) {
        self.constraints.insert(attribute.to_string(), values);
    }

    /// Allowed values for an attribute, or `None` when unconstrained.
    pub fn allowed(&self, attribute: &str) -> Option<&[String]> {
        match self.constraints.get(attribute) {
            Some(values) if !values.is_empty() => Some(values),
            _ => None,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        field::FILTERABLE
            .iter()
            .all(|attr| self.allowed(attr).is_none())
    }

    /// Predicate form: AND across attributes, OR within one attribute's
    /// allowed list. Unknown attribute names never constrain.
    pub fn matches(&self, record: &CoachRecord) -> bool {
        self.constraints.iter().all(|(attribute, values)| {
            if values.is_empty() {
                return true;
            }
            match record.attribute(attribute) {
                Some(value) => values.iter().any(|allowed| allowed == value),
                None => true,
            }
        })
    }
}

/// Apply a filter set to the population frame.
///
/// Constraints on filterable attributes (the tracked categoricals plus the
/// derived career stage) combine into a single `is_in` conjunction;
/// everything else in the set is ignored, matching `FilterSet::matches`.
pub(crate) fn filtered_frame(
    frame: &DataFrame,
    filters: &FilterSet,
) -> Result<DataFrame, InsightError> {
    let mut conjunction: Option<Expr> = None;
    for attr in field::FILTERABLE {
        if let Some(values) = filters.allowed(attr) {
            let allowed = Series::new(attr.into(), values.to_vec());
            let clause = col(attr).is_in(lit(allowed), false);
            conjunction = Some(match conjunction {
                Some(expr) => expr.and(clause),
                None => clause,
            });
        }
    }

    match conjunction {
        Some(expr) => Ok(frame.clone().lazy().filter(expr).collect()?),
        None => Ok(frame.clone()),
    }
}

/// Raw value counts for one categorical column, emitted in declared-domain
/// order. Values outside the declared domain (possible only for hand-built
/// populations) are appended in sorted order so counts always partition the
/// frame height exactly.
pub(crate) fn count_by(
    frame: &DataFrame,
    attribute: &str,
) -> Result<Vec<(String, usize)>, InsightError> {
    let column = frame.column(attribute)?.str()?;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for i in 0..frame.height() {
        if let Some(value) = column.get(i) {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
    }

    let order: &[&str] = if attribute == field::CAREER_STAGE {
        &stage::DOMAIN
    } else {
        schema::domain_of(attribute).unwrap_or(&[])
    };

    let mut result = Vec::new();
    for category in order {
        if let Some(count) = counts.remove(*category) {
            result.push((category.to_string(), count));
        }
    }
    let mut stray: Vec<(String, usize)> = counts.into_iter().collect();
    stray.sort();
    result.extend(stray);
    Ok(result)
}

// ── Result value objects ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    /// Share of the filtered subset, one decimal place. Independent rounding
    /// means a distribution need not sum to exactly 100.0.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub attribute: String,
    pub entries: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub total: usize,
    pub mean_age: f64,
    pub pct_female: f64,
    pub pct_ethnic_minority: f64,
    pub distributions: Vec<Distribution>,
}

impl AggregationResult {
    /// Defined shape for an empty filtered subset: zero KPIs, one empty
    /// distribution per tracked attribute. Never NaN.
    pub fn empty() -> Self {
        Self {
            total: 0,
            mean_age: 0.0,
            pct_female: 0.0,
            pct_ethnic_minority: 0.0,
            distributions: field::CATEGORICAL
                .iter()
                .map(|attr| Distribution {
                    attribute: attr.to_string(),
                    entries: Vec::new(),
                })
                .collect(),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Filter the population and recompute every dashboard summary from scratch.
///
/// Pure function of (frame, filters): equal-by-value inputs yield identical
/// output, so callers may memoize on the filter set.
pub fn aggregate(frame: &DataFrame, filters: &FilterSet) -> Result<AggregationResult, InsightError> {
    let subset = filtered_frame(frame, filters)?;
    let n = subset.height();
    debug!(total = frame.height(), filtered = n, "aggregating population");
    if n == 0 {
        return Ok(AggregationResult::empty());
    }

    let gender_counts = count_by(&subset, field::GENDER)?;
    let female = gender_counts
        .iter()
        .find(|(category, _)| category == gender::FEMALE)
        .map(|(_, count)| *count)
        .unwrap_or(0);
    let minority: usize = count_by(&subset, field::ETHNICITY)?
        .iter()
        .filter(|(category, _)| category != ethnicity::REFERENCE)
        .map(|(_, count)| count)
        .sum();

    let mean_age = subset
        .column(field::AGE)?
        .as_materialized_series()
        .mean_reduce()
        .value()
        .try_extract::<f64>()?;

    let mut distributions = Vec::with_capacity(field::CATEGORICAL.len());
    for attr in field::CATEGORICAL {
        let entries = count_by(&subset, attr)?
            .into_iter()
            .map(|(category, count)| CategoryShare {
                category,
                count,
                percentage: round1(count as f64 / n as f64 * 100.0),
            })
            .collect();
        distributions.push(Distribution {
            attribute: attr.to_string(),
            entries,
        });
    }

    Ok(AggregationResult {
        total: n,
        mean_age: round1(mean_age),
        pct_female: round1(female as f64 / n as f64 * 100.0),
        pct_ethnic_minority: round1(minority as f64 / n as f64 * 100.0),
        distributions,
    })
}
