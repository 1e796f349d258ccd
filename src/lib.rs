//! Data core for coaching-workforce analytics dashboards.
//!
//! Two cooperating pieces: a procedural generator producing a population of
//! synthetic coach records with correlated demographic attributes, and a pure
//! aggregation engine deriving dashboard-ready summaries (KPIs, categorical
//! distributions, a career-progression flow graph) from that population under
//! user-selected filters.
//!
//! The population is generated once and never mutated; every aggregation is a
//! full, side-effect-free recompute over it, so repeated calls with
//! equal-by-value filters yield identical output. Rendering is the consumer's
//! concern - every result object serializes straight to JSON for the chart
//! layer.

mod aggregation;
mod error;
mod flow_graph;
mod generator;
mod model;
pub mod schema;

pub use aggregation::{
    aggregate, AggregationResult, CategoryShare, Distribution, FilterSet,
};
pub use error::InsightError;
pub use flow_graph::{build as build_flow_graph, EdgeBreakdown, FlowEdge, FlowGraph, FlowNode};
pub use generator::{generate, weighted_select};
pub use model::{CoachPopulation, CoachRecord};
