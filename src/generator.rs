use rand::Rng;
use tracing::debug;

use crate::error::InsightError;
use crate::model::CoachRecord;
use crate::schema::{
    age_group, division, employment_status, ethnicity, gender, level, partner, position_type,
    qualification, region, role, season, stage,
};

// ── Marginal probability tables ─────────────────────────────────────────────
//
// Base attributes are sampled directly from these. Weights are relative;
// selection normalizes internally.

const GENDER_WEIGHTS: [(&str, f64); 2] = [(gender::MALE, 0.91), (gender::FEMALE, 0.09)];

const ETHNICITY_WEIGHTS: [(&str, f64); 5] = [
    (ethnicity::WHITE, 0.75),
    (ethnicity::BLACK, 0.10),
    (ethnicity::SOUTH_ASIAN, 0.08),
    (ethnicity::MIXED, 0.04),
    (ethnicity::OTHER, 0.03),
];

const REGION_WEIGHTS: [(&str, f64); 9] = [
    (region::NORTH_EAST, 0.08),
    (region::NORTH_WEST, 0.14),
    (region::YORKSHIRE, 0.10),
    (region::MIDLANDS, 0.13),
    (region::LONDON, 0.16),
    (region::SOUTH_EAST, 0.14),
    (region::SOUTH_WEST, 0.09),
    (region::SCOTLAND, 0.09),
    (region::WALES, 0.07),
];

const AGE_GROUP_WEIGHTS: [(&str, f64); 5] = [
    (age_group::A18_25, 0.14),
    (age_group::A26_35, 0.30),
    (age_group::A36_45, 0.28),
    (age_group::A46_55, 0.18),
    (age_group::A56_65, 0.10),
];

const SEASON_WEIGHTS: [(&str, f64); 4] = [
    (season::S2021_22, 0.20),
    (season::S2022_23, 0.24),
    (season::S2023_24, 0.27),
    (season::S2024_25, 0.29),
];

const EMPLOYMENT_WEIGHTS: [(&str, f64); 3] = [
    (employment_status::EMPLOYED, 0.78),
    (employment_status::SEEKING, 0.14),
    (employment_status::CAREER_BREAK, 0.08),
];

const QUALIFICATION_WEIGHTS: [(&str, f64); 5] = [
    (qualification::PRO_LICENCE, 0.05),
    (qualification::A_LICENCE, 0.15),
    (qualification::B_LICENCE, 0.30),
    (qualification::C_LICENCE, 0.32),
    (qualification::UNQUALIFIED, 0.18),
];

// ── Baseline tables for correlated attributes ───────────────────────────────

const LEVEL_BASELINE: [(&str, f64); 2] = [(level::SENIOR, 0.35), (level::JUNIOR, 0.65)];

const ROLE_BASELINE: [(&str, f64); 6] = [
    (role::HEAD_COACH, 0.12),
    (role::ASSISTANT_COACH, 0.22),
    (role::ACADEMY_COACH, 0.30),
    (role::GOALKEEPING_COACH, 0.08),
    (role::FITNESS_COACH, 0.12),
    (role::COMMUNITY_COACH, 0.16),
];

const DIVISION_BASELINE: [(&str, f64); 7] = [
    (division::PREMIER, 0.08),
    (division::CHAMPIONSHIP, 0.10),
    (division::LEAGUE_ONE, 0.10),
    (division::LEAGUE_TWO, 0.10),
    (division::WOMENS_SUPER_LEAGUE, 0.04),
    (division::WOMENS_CHAMPIONSHIP, 0.04),
    (division::GRASSROOTS, 0.54),
];

const POSITION_TYPE_BASELINE: [(&str, f64); 2] =
    [(position_type::FULL_TIME, 0.45), (position_type::PART_TIME, 0.55)];

const PARTNER_BASELINE: [(&str, f64); 4] = [
    (partner::PROFESSIONAL_CLUB, 0.22),
    (partner::CLUB_ACADEMY, 0.30),
    (partner::EDUCATION, 0.18),
    (partner::COMMUNITY_TRUST, 0.30),
];

// ── Weighted selection ──────────────────────────────────────────────────────

/// Select one category proportional to its weight.
///
/// Weights are treated as relative and normalized internally. If cumulative
/// rounding leaves the scan exhausted, the last category in table order is
/// returned - a deterministic fallback, never a panic.
pub fn weighted_select<'a>(
    weights: &[(&'a str, f64)],
    rng: &mut impl Rng,
) -> Result<&'a str, InsightError> {
    if weights.is_empty() {
        return Err(InsightError::InvalidArgument(
            "weighted_select: empty weight table".into(),
        ));
    }
    if weights.iter().any(|(_, w)| *w < 0.0 || !w.is_finite()) {
        return Err(InsightError::InvalidArgument(
            "weighted_select: weights must be finite and non-negative".into(),
        ));
    }
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return Err(InsightError::InvalidArgument(
            "weighted_select: weights must sum to a positive value".into(),
        ));
    }

    let draw = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (category, weight) in weights {
        cumulative += weight;
        if draw < cumulative {
            return Ok(category);
        }
    }
    // Rounding fallback: the draw slipped past the last cumulative bound.
    Ok(weights[weights.len() - 1].0)
}

/// Apply correlation multipliers to a baseline table.
///
/// All multipliers targeting one category are composed multiplicatively in a
/// single pass; normalization then happens exactly once, inside selection.
/// Re-normalizing between individual multiplier applications would change the
/// final distribution.
fn scaled(
    baseline: &[(&'static str, f64)],
    multipliers: &[(&str, f64)],
) -> Vec<(&'static str, f64)> {
    baseline
        .iter()
        .map(|&(category, weight)| {
            let factor: f64 = multipliers
                .iter()
                .filter(|(target, _)| *target == category)
                .map(|(_, m)| m)
                .product();
            (category, weight * factor)
        })
        .collect()
}

// ── Correlation rules ───────────────────────────────────────────────────────

fn level_multipliers(age_group_value: &str) -> Vec<(&'static str, f64)> {
    match age_group_value {
        age_group::A18_25 => vec![(level::SENIOR, 0.4)],
        age_group::A36_45 => vec![(level::SENIOR, 1.2)],
        age_group::A46_55 | age_group::A56_65 => vec![(level::SENIOR, 1.4)],
        _ => vec![],
    }
}

fn role_multipliers(
    ethnicity_value: &str,
    age_group_value: &str,
    level_value: &str,
) -> Vec<(&'static str, f64)> {
    let mut m = Vec::new();
    if ethnicity_value != ethnicity::REFERENCE {
        m.push((role::ACADEMY_COACH, 0.65));
    }
    if age_group_value == age_group::A18_25 {
        m.push((role::HEAD_COACH, 0.3));
    }
    if level_value == level::SENIOR {
        m.push((role::HEAD_COACH, 1.6));
        m.push((role::ASSISTANT_COACH, 1.2));
    }
    m
}

fn division_multipliers(gender_value: &str, level_value: &str) -> Vec<(&'static str, f64)> {
    let mut m = Vec::new();
    if gender_value == gender::FEMALE {
        m.push((division::WOMENS_SUPER_LEAGUE, 7.0));
        m.push((division::WOMENS_CHAMPIONSHIP, 6.0));
    }
    if level_value == level::SENIOR {
        m.push((division::PREMIER, 1.5));
    }
    m
}

fn position_type_multipliers(division_value: &str, level_value: &str) -> Vec<(&'static str, f64)> {
    let mut m = Vec::new();
    if division_value == division::GRASSROOTS {
        m.push((position_type::PART_TIME, 1.6));
    }
    if level_value == level::SENIOR {
        m.push((position_type::FULL_TIME, 1.5));
    }
    m
}

fn partner_multipliers(role_value: &str, division_value: &str) -> Vec<(&'static str, f64)> {
    let mut m = Vec::new();
    if role_value == role::ACADEMY_COACH {
        m.push((partner::CLUB_ACADEMY, 1.8));
    }
    if role_value == role::COMMUNITY_COACH {
        m.push((partner::COMMUNITY_TRUST, 2.0));
    }
    if division_value == division::PREMIER || division_value == division::CHAMPIONSHIP {
        m.push((partner::PROFESSIONAL_CLUB, 1.7));
    }
    m
}

// ── Population generation ───────────────────────────────────────────────────

/// Generate `count` synthetic coach records.
///
/// Deterministic for a given `rng` sequence; tests inject a seeded `StdRng`.
pub fn generate(count: usize, rng: &mut impl Rng) -> Result<Vec<CoachRecord>, InsightError> {
    let mut records = Vec::with_capacity(count);
    for index in 0..count {
        records.push(synthesize(index, rng)?);
    }
    debug!(count, "generated coach population");
    Ok(records)
}

fn synthesize(index: usize, rng: &mut impl Rng) -> Result<CoachRecord, InsightError> {
    // Base attributes: straight marginal sampling.
    let gender_value = weighted_select(&GENDER_WEIGHTS, rng)?;
    let ethnicity_value = weighted_select(&ETHNICITY_WEIGHTS, rng)?;
    let region_value = weighted_select(&REGION_WEIGHTS, rng)?;
    let age_group_value = weighted_select(&AGE_GROUP_WEIGHTS, rng)?;
    let season_value = weighted_select(&SEASON_WEIGHTS, rng)?;
    let employment_value = weighted_select(&EMPLOYMENT_WEIGHTS, rng)?;
    let qualification_value = weighted_select(&QUALIFICATION_WEIGHTS, rng)?;

    // Correlated attributes: baseline weights scaled by every multiplier
    // whose condition fires, then sampled.
    let level_value = weighted_select(
        &scaled(&LEVEL_BASELINE, &level_multipliers(age_group_value)),
        rng,
    )?;
    let role_value = weighted_select(
        &scaled(
            &ROLE_BASELINE,
            &role_multipliers(ethnicity_value, age_group_value, level_value),
        ),
        rng,
    )?;
    let division_value = weighted_select(
        &scaled(
            &DIVISION_BASELINE,
            &division_multipliers(gender_value, level_value),
        ),
        rng,
    )?;
    let position_type_value = weighted_select(
        &scaled(
            &POSITION_TYPE_BASELINE,
            &position_type_multipliers(division_value, level_value),
        ),
        rng,
    )?;
    let partner_value = weighted_select(
        &scaled(
            &PARTNER_BASELINE,
            &partner_multipliers(role_value, division_value),
        ),
        rng,
    )?;

    // Age uniform within the group's bounds; tenure bounded by age.
    let (lo, hi) = age_group::bounds(age_group_value).unwrap_or((18, 65));
    let age = rng.gen_range(lo..=hi);
    let field_cap = age.saturating_sub(20).max(1);
    let years_in_field = rng.gen_range(1..=field_cap);
    let role_cap = ((years_in_field as f64 * 0.6).floor() as u32).max(1);
    let years_in_role = rng.gen_range(1..=role_cap);

    let career_stage = stage::from_role_and_level(role_value, level_value);

    Ok(CoachRecord {
        id: format!("coach-{:05}", index + 1),
        gender: gender_value.to_string(),
        ethnicity: ethnicity_value.to_string(),
        region: region_value.to_string(),
        age_group: age_group_value.to_string(),
        role: role_value.to_string(),
        level: level_value.to_string(),
        position_type: position_type_value.to_string(),
        division: division_value.to_string(),
        season: season_value.to_string(),
        employment_status: employment_value.to_string(),
        qualification: qualification_value.to_string(),
        career_stage: career_stage.to_string(),
        partner: partner_value.to_string(),
        age,
        years_in_field,
        years_in_role,
    })
}
