//! End-to-end pipeline scenarios: generate, filter, aggregate, flow graph.

use coach_insightkit::{schema, CoachPopulation, FilterSet};
use rand::rngs::StdRng;
use rand::SeedableRng;
use schema::{field, gender};

fn population(count: usize, seed: u64) -> CoachPopulation {
    let mut rng = StdRng::seed_from_u64(seed);
    CoachPopulation::generate(count, &mut rng).expect("generation is pure computation")
}

#[test]
fn empty_population_aggregates_to_the_empty_shape() {
    let population = population(0, 1);
    let result = population.aggregate(&FilterSet::new()).unwrap();
    assert_eq!(result.total, 0);
    assert_eq!(result.mean_age, 0.0);
    assert_eq!(result.pct_female, 0.0);
    assert_eq!(result.pct_ethnic_minority, 0.0);
    assert!(result.distributions.iter().all(|d| d.entries.is_empty()));
}

#[test]
fn female_filter_size_tracks_the_generator_marginal() {
    let population = population(1000, 2);
    let filters = FilterSet::new().allow(field::GENDER, [gender::FEMALE]);
    let result = population.aggregate(&filters).unwrap();
    // 9% marginal over 1000 draws, 3 sigma tolerance band.
    assert!(
        (63..=117).contains(&result.total),
        "female subset sized {}",
        result.total
    );
}

#[test]
fn out_of_domain_filter_value_is_empty_not_an_error() {
    let population = population(500, 3);
    let filters = FilterSet::new().allow(field::REGION, ["narnia"]);
    let result = population.aggregate(&filters).unwrap();
    assert_eq!(result.total, 0);
    assert!(result.distributions.iter().all(|d| d.entries.is_empty()));
}

#[test]
fn unfiltered_flow_graph_is_well_formed() {
    let population = population(2000, 4);
    let graph = population.flow_graph(&FilterSet::new()).unwrap();
    let node_ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert!(!graph.edges.is_empty());
    for edge in &graph.edges {
        assert!(node_ids.contains(&edge.source.as_str()), "dangling source");
        assert!(node_ids.contains(&edge.target.as_str()), "dangling target");
        assert!(edge.value > 0);
    }
    // Node sizes partition the population across stages.
    let staged: usize = graph.nodes.iter().map(|n| n.size).sum();
    assert_eq!(staged, population.len());
}

#[test]
fn adding_a_constraint_never_grows_the_subset() {
    let population = population(800, 5);
    let a = FilterSet::new().allow(field::AGE_GROUP, ["26-35", "36-45"]);
    let a_and_b = a.clone().allow(field::POSITION_TYPE, ["full_time"]);
    let under_a = population.aggregate(&a).unwrap().total;
    let under_both = population.aggregate(&a_and_b).unwrap().total;
    assert!(under_both <= under_a);
}

#[test]
fn distinct_but_equal_filter_instances_aggregate_identically() {
    let population = population(600, 6);
    let a = FilterSet::new()
        .allow(field::DIVISION, ["grassroots", "premier"])
        .allow(field::SEASON, ["2023-24"]);
    let b = FilterSet::new()
        .allow(field::DIVISION, ["grassroots", "premier"])
        .allow(field::SEASON, ["2023-24"]);
    let first = population.aggregate(&a).unwrap();
    let second = population.aggregate(&b).unwrap();
    assert_eq!(first, second);
    // And the full result round-trips as the chart-layer JSON payload.
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn distribution_counts_partition_every_filtered_subset() {
    let population = population(700, 7);
    let filter_sets = [
        FilterSet::new(),
        FilterSet::new().allow(field::GENDER, [gender::FEMALE]),
        FilterSet::new().allow(field::ETHNICITY, ["black", "south_asian"]),
        FilterSet::new()
            .allow(field::LEVEL, ["senior"])
            .allow(field::REGION, ["london"]),
    ];
    for filters in &filter_sets {
        let result = population.aggregate(filters).unwrap();
        for distribution in &result.distributions {
            let counted: usize = distribution.entries.iter().map(|e| e.count).sum();
            assert_eq!(counted, result.total);
            for entry in &distribution.entries {
                assert!(entry.percentage >= 0.0 && entry.percentage <= 100.0);
            }
        }
    }
}

#[test]
fn flow_conservation_holds_under_filters() {
    let population = population(1500, 8);
    let filter_sets = [
        FilterSet::new(),
        FilterSet::new().allow(field::ETHNICITY, ["white"]),
        FilterSet::new().allow(field::AGE_GROUP, ["46-55", "56-65"]),
    ];
    for filters in &filter_sets {
        let graph = population.flow_graph(filters).unwrap();
        for node in &graph.nodes {
            let outgoing: usize = graph
                .edges
                .iter()
                .filter(|e| e.source == node.id)
                .map(|e| e.value)
                .sum();
            assert!(outgoing <= node.size);
        }
    }
}

#[test]
fn mean_age_sits_inside_the_sampled_range() {
    let population = population(900, 9);
    let result = population.aggregate(&FilterSet::new()).unwrap();
    assert!(result.mean_age >= 18.0 && result.mean_age <= 65.0);
    // One decimal place by contract.
    assert_eq!(result.mean_age, (result.mean_age * 10.0).round() / 10.0);
}
