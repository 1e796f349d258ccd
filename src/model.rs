use polars::prelude::*;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::aggregation::{self, AggregationResult, FilterSet};
use crate::error::InsightError;
use crate::flow_graph::{self, FlowGraph};
use crate::generator;
use crate::schema::{self, age_group, field, stage};

/// One synthetic member of the coaching workforce.
///
/// Categorical values are plain strings from the domains declared in
/// [`crate::schema`]; numeric attributes are bounded below by 1 and above by
/// age-derived limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachRecord {
    pub id: String,
    pub gender: String,
    pub ethnicity: String,
    pub region: String,
    pub age_group: String,
    pub role: String,
    pub level: String,
    pub position_type: String,
    pub division: String,
    pub season: String,
    pub employment_status: String,
    pub qualification: String,
    pub partner: String,
    pub career_stage: String,
    pub age: u32,
    pub years_in_field: u32,
    pub years_in_role: u32,
}

impl CoachRecord {
    /// Value of a categorical attribute by schema name.
    /// Unknown names return `None`; callers treat that as "no constraint".
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            field::GENDER => Some(&self.gender),
            field::ETHNICITY => Some(&self.ethnicity),
            field::REGION => Some(&self.region),
            field::AGE_GROUP => Some(&self.age_group),
            field::ROLE => Some(&self.role),
            field::LEVEL => Some(&self.level),
            field::POSITION_TYPE => Some(&self.position_type),
            field::DIVISION => Some(&self.division),
            field::SEASON => Some(&self.season),
            field::EMPLOYMENT_STATUS => Some(&self.employment_status),
            field::QUALIFICATION => Some(&self.qualification),
            field::PARTNER => Some(&self.partner),
            field::CAREER_STAGE => Some(&self.career_stage),
            _ => None,
        }
    }
}

/// Immutable generated population plus its materialized frame.
///
/// The frame is built once at construction; every aggregation and flow-graph
/// call is a read-only recompute over it.
pub struct CoachPopulation {
    records: Vec<CoachRecord>,
    frame: DataFrame,
}

impl CoachPopulation {
    /// Generate a synthetic population of `count` records.
    pub fn generate(count: usize, rng: &mut impl Rng) -> Result<Self, InsightError> {
        let records = generator::generate(count, rng)?;
        Self::from_records(records)
    }

    /// Build a population from caller-supplied records, validating the
    /// domain-closure and tenure invariants.
    pub fn from_records(records: Vec<CoachRecord>) -> Result<Self, InsightError> {
        for record in &records {
            validate(record)?;
        }
        let frame = build_frame(&records)?;
        debug!(count = records.len(), "materialized population frame");
        Ok(Self { records, frame })
    }

    pub fn records(&self) -> &[CoachRecord] {
        &self.records
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Recompute all dashboard summaries for the given filter set.
    pub fn aggregate(&self, filters: &FilterSet) -> Result<AggregationResult, InsightError> {
        aggregation::aggregate(&self.frame, filters)
    }

    /// Recompute the career-progression flow graph for the given filter set.
    pub fn flow_graph(&self, filters: &FilterSet) -> Result<FlowGraph, InsightError> {
        flow_graph::build(&self.frame, filters)
    }
}

fn validate(record: &CoachRecord) -> Result<(), InsightError> {
    for attr in field::CATEGORICAL {
        let domain = schema::domain_of(attr).unwrap_or(&[]);
        let value = record.attribute(attr).unwrap_or("");
        if !domain.contains(&value) {
            return Err(InsightError::InvalidData(format!(
                "record {}: {attr}='{value}' outside declared domain",
                record.id
            )));
        }
    }
    if !stage::DOMAIN.contains(&record.career_stage.as_str()) {
        return Err(InsightError::InvalidData(format!(
            "record {}: unknown career stage '{}'",
            record.id, record.career_stage
        )));
    }
    let (lo, hi) = age_group::bounds(&record.age_group).unwrap_or((18, 65));
    if record.age < lo || record.age > hi {
        return Err(InsightError::InvalidData(format!(
            "record {}: age {} outside group {}",
            record.id, record.age, record.age_group
        )));
    }
    if record.years_in_field < 1 || record.years_in_role < 1 {
        return Err(InsightError::InvalidData(format!(
            "record {}: tenure values must be >= 1",
            record.id
        )));
    }
    Ok(())
}

/// Materialize records into one column per attribute.
fn build_frame(records: &[CoachRecord]) -> Result<DataFrame, InsightError> {
    let text =
        |get: fn(&CoachRecord) -> &str| records.iter().map(|r| get(r).to_string()).collect::<Vec<_>>();
    let number = |get: fn(&CoachRecord) -> u32| {
        records.iter().map(|r| get(r) as i64).collect::<Vec<_>>()
    };

    let df = DataFrame::new(vec![
        Column::new(field::ID.into(), &text(|r| &r.id)),
        Column::new(field::GENDER.into(), &text(|r| &r.gender)),
        Column::new(field::ETHNICITY.into(), &text(|r| &r.ethnicity)),
        Column::new(field::REGION.into(), &text(|r| &r.region)),
        Column::new(field::AGE_GROUP.into(), &text(|r| &r.age_group)),
        Column::new(field::ROLE.into(), &text(|r| &r.role)),
        Column::new(field::LEVEL.into(), &text(|r| &r.level)),
        Column::new(field::POSITION_TYPE.into(), &text(|r| &r.position_type)),
        Column::new(field::DIVISION.into(), &text(|r| &r.division)),
        Column::new(field::SEASON.into(), &text(|r| &r.season)),
        Column::new(
            field::EMPLOYMENT_STATUS.into(),
            &text(|r| &r.employment_status),
        ),
        Column::new(field::QUALIFICATION.into(), &text(|r| &r.qualification)),
        Column::new(field::PARTNER.into(), &text(|r| &r.partner)),
        Column::new(field::CAREER_STAGE.into(), &text(|r| &r.career_stage)),
        Column::new(field::AGE.into(), &number(|r| r.age)),
        Column::new(field::YEARS_IN_FIELD.into(), &number(|r| r.years_in_field)),
        Column::new(field::YEARS_IN_ROLE.into(), &number(|r| r.years_in_role)),
    ])?;
    Ok(df)
}
