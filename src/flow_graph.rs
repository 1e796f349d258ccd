use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::aggregation::{count_by, filtered_frame, FilterSet};
use crate::error::InsightError;
use crate::schema::{field, stage};

/// Fixed career-progression patterns: (source stage, target stage,
/// transition probability). Probabilities per source deliberately sum to
/// less than 1 - the remainder is coaches who stay put or leave, so the
/// graph "leaks" flow by construction.
const PROGRESSION_PATTERNS: [(&str, &str, f64); 9] = [
    (stage::ENTRY_COACHING, stage::ACADEMY_PATHWAY, 0.45),
    (stage::ENTRY_COACHING, stage::OTHER_ROLES, 0.20),
    (stage::ACADEMY_PATHWAY, stage::ASSISTANT_FIRST_TEAM, 0.35),
    (stage::ACADEMY_PATHWAY, stage::OTHER_ROLES, 0.15),
    (stage::ASSISTANT_FIRST_TEAM, stage::HEAD_FIRST_TEAM, 0.25),
    (stage::ASSISTANT_FIRST_TEAM, stage::OTHER_ROLES, 0.10),
    (stage::HEAD_FIRST_TEAM, stage::TECHNICAL_LEADERSHIP, 0.18),
    (stage::HEAD_FIRST_TEAM, stage::ASSISTANT_FIRST_TEAM, 0.12),
    (stage::TECHNICAL_LEADERSHIP, stage::OTHER_ROLES, 0.08),
];

// ── Value objects handed to the Sankey renderer ─────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub id: String,
    pub label: String,
    /// Sankey column rank, fixed per stage.
    pub level: u8,
    /// Cohort size after filtering.
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeBreakdown {
    pub attribute: String,
    pub counts: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    pub value: usize,
    pub breakdown: Vec<EdgeBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

struct EdgeFlow {
    value: usize,
    breakdown: Vec<EdgeBreakdown>,
}

/// Build the career-progression flow graph for the filtered population.
///
/// One node per stage with at least one member; edges from the fixed
/// progression patterns with value = round(cohort size x probability).
/// Edges rounding to zero or touching an absent stage are dropped.
pub fn build(frame: &DataFrame, filters: &FilterSet) -> Result<FlowGraph, InsightError> {
    let subset = filtered_frame(frame, filters)?;

    let mut graph: DiGraph<FlowNode, EdgeFlow> = DiGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();
    let mut cohorts: HashMap<&str, DataFrame> = HashMap::new();

    for stage_id in stage::DOMAIN {
        let cohort = subset
            .clone()
            .lazy()
            .filter(col(field::CAREER_STAGE).eq(lit(stage_id)))
            .collect()?;
        let size = cohort.height();
        if size == 0 {
            continue;
        }
        let index = graph.add_node(FlowNode {
            id: stage_id.to_string(),
            label: stage::display_name(stage_id).to_string(),
            level: stage::layout_level(stage_id),
            size,
        });
        node_map.insert(stage_id, index);
        cohorts.insert(stage_id, cohort);
    }

    for (source, target, probability) in PROGRESSION_PATTERNS {
        let (Some(&source_idx), Some(&target_idx)) =
            (node_map.get(source), node_map.get(target))
        else {
            continue;
        };
        let Some(cohort) = cohorts.get(source) else {
            continue;
        };

        let value = (cohort.height() as f64 * probability).round() as usize;
        if value == 0 {
            continue;
        }

        // Modeling simplification carried over from the mock-data design:
        // the first `value` members of the cohort stand in for the subset
        // flowing along this edge, not an unbiased random sample.
        let contributors = cohort.slice(0, value);
        let mut breakdown = Vec::with_capacity(field::BREAKDOWN.len());
        for attr in field::BREAKDOWN {
            breakdown.push(EdgeBreakdown {
                attribute: attr.to_string(),
                counts: count_by(&contributors, attr)?,
            });
        }

        graph.add_edge(source_idx, target_idx, EdgeFlow { value, breakdown });
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built progression flow graph"
    );

    let nodes = graph
        .node_indices()
        .map(|index| graph[index].clone())
        .collect();
    let edges = graph
        .edge_references()
        .map(|edge| FlowEdge {
            source: graph[edge.source()].id.clone(),
            target: graph[edge.target()].id.clone(),
            value: edge.weight().value,
            breakdown: edge.weight().breakdown.clone(),
        })
        .collect();

    Ok(FlowGraph { nodes, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CoachPopulation;
    use crate::schema::gender;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population(count: usize, seed: u64) -> CoachPopulation {
        let mut rng = StdRng::seed_from_u64(seed);
        CoachPopulation::generate(count, &mut rng).unwrap()
    }

    #[test]
    fn progression_probabilities_never_oversubscribe_a_stage() {
        let mut per_source: HashMap<&str, f64> = HashMap::new();
        for (source, _, probability) in PROGRESSION_PATTERNS {
            *per_source.entry(source).or_insert(0.0) += probability;
        }
        for (source, total) in per_source {
            assert!(total <= 1.0, "stage {source} emits {total}");
        }
    }

    #[test]
    fn edges_reference_only_present_nodes_with_positive_values() {
        let population = population(1500, 31);
        let graph = population.flow_graph(&FilterSet::new()).unwrap();
        assert!(!graph.nodes.is_empty());
        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in &graph.edges {
            assert!(ids.contains(&edge.source.as_str()));
            assert!(ids.contains(&edge.target.as_str()));
            assert!(edge.value > 0);
        }
    }

    #[test]
    fn outgoing_flow_never_exceeds_the_cohort() {
        let population = population(1200, 32);
        let graph = population.flow_graph(&FilterSet::new()).unwrap();
        for node in &graph.nodes {
            let outgoing: usize = graph
                .edges
                .iter()
                .filter(|e| e.source == node.id)
                .map(|e| e.value)
                .sum();
            assert!(outgoing <= node.size, "stage {} leaks upward", node.id);
        }
    }

    #[test]
    fn breakdown_counts_match_the_edge_value() {
        let population = population(1000, 33);
        let graph = population.flow_graph(&FilterSet::new()).unwrap();
        for edge in &graph.edges {
            for breakdown in &edge.breakdown {
                let total: usize = breakdown.counts.iter().map(|(_, c)| c).sum();
                assert_eq!(total, edge.value);
            }
        }
    }

    #[test]
    fn filtering_drops_empty_stages_and_their_edges() {
        let population = population(600, 34);
        // A tight filter that empties at least some stages.
        let filters = FilterSet::new()
            .allow(field::GENDER, [gender::FEMALE])
            .allow(field::LEVEL, ["senior"]);
        let graph = population.flow_graph(&filters).unwrap();
        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in &graph.edges {
            assert!(ids.contains(&edge.source.as_str()));
            assert!(ids.contains(&edge.target.as_str()));
        }
        for node in &graph.nodes {
            assert!(node.size > 0);
        }
    }

    #[test]
    fn empty_population_yields_an_empty_graph() {
        let population = population(0, 35);
        let graph = population.flow_graph(&FilterSet::new()).unwrap();
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}
