/// Attribute-name and domain constants for the coach-insightkit schema.
/// Single source of truth - every column name and categorical domain used by
/// the generator and the aggregation engine lives here.

// ── Record fields ───────────────────────────────────────────────────────────
pub mod field {
    pub const ID: &str = "id";
    pub const AGE: &str = "age";
    pub const YEARS_IN_FIELD: &str = "years_in_field";
    pub const YEARS_IN_ROLE: &str = "years_in_role";
    pub const CAREER_STAGE: &str = "career_stage";

    pub const GENDER: &str = "gender";
    pub const ETHNICITY: &str = "ethnicity";
    pub const REGION: &str = "region";
    pub const AGE_GROUP: &str = "age_group";
    pub const ROLE: &str = "role";
    pub const LEVEL: &str = "level";
    pub const POSITION_TYPE: &str = "position_type";
    pub const DIVISION: &str = "division";
    pub const SEASON: &str = "season";
    pub const EMPLOYMENT_STATUS: &str = "employment_status";
    pub const QUALIFICATION: &str = "qualification";
    pub const PARTNER: &str = "partner";

    /// Categorical attributes tracked by distributions and accepted by filters.
    pub const CATEGORICAL: [&str; 12] = [
        GENDER,
        ETHNICITY,
        REGION,
        AGE_GROUP,
        ROLE,
        LEVEL,
        POSITION_TYPE,
        DIVISION,
        SEASON,
        EMPLOYMENT_STATUS,
        QUALIFICATION,
        PARTNER,
    ];

    /// Attributes a filter set may constrain: the tracked categoricals plus
    /// the derived career stage. Must stay in lockstep with
    /// `CoachRecord::attribute`.
    pub const FILTERABLE: [&str; 13] = [
        GENDER,
        ETHNICITY,
        REGION,
        AGE_GROUP,
        ROLE,
        LEVEL,
        POSITION_TYPE,
        DIVISION,
        SEASON,
        EMPLOYMENT_STATUS,
        QUALIFICATION,
        PARTNER,
        CAREER_STAGE,
    ];

    /// Attributes carried on flow-graph edge breakdowns.
    pub const BREAKDOWN: [&str; 4] = [GENDER, ETHNICITY, AGE_GROUP, REGION];
}

// ── Gender ──────────────────────────────────────────────────────────────────
pub mod gender {
    pub const MALE: &str = "male";
    pub const FEMALE: &str = "female";

    pub const DOMAIN: [&str; 2] = [MALE, FEMALE];
}

// ── Ethnicity ───────────────────────────────────────────────────────────────
pub mod ethnicity {
    pub const WHITE: &str = "white";
    pub const BLACK: &str = "black";
    pub const SOUTH_ASIAN: &str = "south_asian";
    pub const MIXED: &str = "mixed";
    pub const OTHER: &str = "other";

    /// Reference (majority) category for the minority-share KPI.
    pub const REFERENCE: &str = WHITE;

    pub const DOMAIN: [&str; 5] = [WHITE, BLACK, SOUTH_ASIAN, MIXED, OTHER];
}

// ── Region ──────────────────────────────────────────────────────────────────
pub mod region {
    pub const NORTH_EAST: &str = "north_east";
    pub const NORTH_WEST: &str = "north_west";
    pub const YORKSHIRE: &str = "yorkshire";
    pub const MIDLANDS: &str = "midlands";
    pub const LONDON: &str = "london";
    pub const SOUTH_EAST: &str = "south_east";
    pub const SOUTH_WEST: &str = "south_west";
    pub const SCOTLAND: &str = "scotland";
    pub const WALES: &str = "wales";

    pub const DOMAIN: [&str; 9] = [
        NORTH_EAST, NORTH_WEST, YORKSHIRE, MIDLANDS, LONDON, SOUTH_EAST, SOUTH_WEST, SCOTLAND,
        WALES,
    ];
}

// ── Age group ───────────────────────────────────────────────────────────────
pub mod age_group {
    pub const A18_25: &str = "18-25";
    pub const A26_35: &str = "26-35";
    pub const A36_45: &str = "36-45";
    pub const A46_55: &str = "46-55";
    pub const A56_65: &str = "56-65";

    pub const DOMAIN: [&str; 5] = [A18_25, A26_35, A36_45, A46_55, A56_65];

    /// Inclusive age bounds for a group label, e.g. "26-35" -> (26, 35).
    pub fn bounds(group: &str) -> Option<(u32, u32)> {
        let (lo, hi) = group.split_once('-')?;
        Some((lo.parse().ok()?, hi.parse().ok()?))
    }
}

// ── Primary role ────────────────────────────────────────────────────────────
pub mod role {
    pub const HEAD_COACH: &str = "head_coach";
    pub const ASSISTANT_COACH: &str = "assistant_coach";
    pub const ACADEMY_COACH: &str = "academy_coach";
    pub const GOALKEEPING_COACH: &str = "goalkeeping_coach";
    pub const FITNESS_COACH: &str = "fitness_coach";
    pub const COMMUNITY_COACH: &str = "community_coach";

    pub const DOMAIN: [&str; 6] = [
        HEAD_COACH,
        ASSISTANT_COACH,
        ACADEMY_COACH,
        GOALKEEPING_COACH,
        FITNESS_COACH,
        COMMUNITY_COACH,
    ];
}

// ── Level ───────────────────────────────────────────────────────────────────
pub mod level {
    pub const SENIOR: &str = "senior";
    pub const JUNIOR: &str = "junior";

    pub const DOMAIN: [&str; 2] = [SENIOR, JUNIOR];
}

// ── Position type ───────────────────────────────────────────────────────────
pub mod position_type {
    pub const FULL_TIME: &str = "full_time";
    pub const PART_TIME: &str = "part_time";

    pub const DOMAIN: [&str; 2] = [FULL_TIME, PART_TIME];
}

// ── Division ────────────────────────────────────────────────────────────────
pub mod division {
    pub const PREMIER: &str = "premier";
    pub const CHAMPIONSHIP: &str = "championship";
    pub const LEAGUE_ONE: &str = "league_one";
    pub const LEAGUE_TWO: &str = "league_two";
    pub const WOMENS_SUPER_LEAGUE: &str = "womens_super_league";
    pub const WOMENS_CHAMPIONSHIP: &str = "womens_championship";
    pub const GRASSROOTS: &str = "grassroots";

    pub const DOMAIN: [&str; 7] = [
        PREMIER,
        CHAMPIONSHIP,
        LEAGUE_ONE,
        LEAGUE_TWO,
        WOMENS_SUPER_LEAGUE,
        WOMENS_CHAMPIONSHIP,
        GRASSROOTS,
    ];
}

// ── Season ──────────────────────────────────────────────────────────────────
pub mod season {
    pub const S2021_22: &str = "2021-22";
    pub const S2022_23: &str = "2022-23";
    pub const S2023_24: &str = "2023-24";
    pub const S2024_25: &str = "2024-25";

    pub const DOMAIN: [&str; 4] = [S2021_22, S2022_23, S2023_24, S2024_25];
}

// ── Employment status ───────────────────────────────────────────────────────
pub mod employment_status {
    pub const EMPLOYED: &str = "employed";
    pub const SEEKING: &str = "seeking";
    pub const CAREER_BREAK: &str = "career_break";

    pub const DOMAIN: [&str; 3] = [EMPLOYED, SEEKING, CAREER_BREAK];
}

// ── Qualification tier ──────────────────────────────────────────────────────
pub mod qualification {
    pub const PRO_LICENCE: &str = "pro_licence";
    pub const A_LICENCE: &str = "a_licence";
    pub const B_LICENCE: &str = "b_licence";
    pub const C_LICENCE: &str = "c_licence";
    pub const UNQUALIFIED: &str = "unqualified";

    pub const DOMAIN: [&str; 5] = [PRO_LICENCE, A_LICENCE, B_LICENCE, C_LICENCE, UNQUALIFIED];
}

// ── Game-partner affiliation ────────────────────────────────────────────────
pub mod partner {
    pub const PROFESSIONAL_CLUB: &str = "professional_club";
    pub const CLUB_ACADEMY: &str = "club_academy";
    pub const EDUCATION: &str = "education";
    pub const COMMUNITY_TRUST: &str = "community_trust";

    pub const DOMAIN: [&str; 4] = [PROFESSIONAL_CLUB, CLUB_ACADEMY, EDUCATION, COMMUNITY_TRUST];
}

// ── Career stage ────────────────────────────────────────────────────────────
pub mod stage {
    pub const ENTRY_COACHING: &str = "entry_coaching";
    pub const ACADEMY_PATHWAY: &str = "academy_pathway";
    pub const ASSISTANT_FIRST_TEAM: &str = "assistant_first_team";
    pub const HEAD_FIRST_TEAM: &str = "head_first_team";
    pub const TECHNICAL_LEADERSHIP: &str = "technical_leadership";
    pub const OTHER_ROLES: &str = "other_roles";

    /// Stage id, display name, layout level (Sankey column rank).
    /// Order here is the emission order for flow-graph nodes.
    pub const TABLE: [(&str, &str, u8); 6] = [
        (ENTRY_COACHING, "Entry Coaching", 0),
        (ACADEMY_PATHWAY, "Academy Pathway", 1),
        (ASSISTANT_FIRST_TEAM, "Assistant (First Team)", 2),
        (HEAD_FIRST_TEAM, "Head Coach (First Team)", 3),
        (TECHNICAL_LEADERSHIP, "Technical Leadership", 4),
        (OTHER_ROLES, "Other Roles", 5),
    ];

    pub const DOMAIN: [&str; 6] = [
        ENTRY_COACHING,
        ACADEMY_PATHWAY,
        ASSISTANT_FIRST_TEAM,
        HEAD_FIRST_TEAM,
        TECHNICAL_LEADERSHIP,
        OTHER_ROLES,
    ];

    pub fn display_name(id: &str) -> &'static str {
        TABLE
            .iter()
            .find(|(s, _, _)| *s == id)
            .map(|(_, name, _)| *name)
            .unwrap_or("Other Roles")
    }

    pub fn layout_level(id: &str) -> u8 {
        TABLE
            .iter()
            .find(|(s, _, _)| *s == id)
            .map(|(_, _, lvl)| *lvl)
            .unwrap_or(5)
    }

    /// Fixed (role, level) -> stage lookup; unmapped pairs fall through
    /// to OTHER_ROLES.
    pub fn from_role_and_level(role: &str, level: &str) -> &'static str {
        use super::{level as lv, role as rl};
        match (role, level) {
            (rl::FITNESS_COACH, lv::JUNIOR) | (rl::GOALKEEPING_COACH, lv::JUNIOR) => ENTRY_COACHING,
            (rl::ACADEMY_COACH, _) => ACADEMY_PATHWAY,
            (rl::ASSISTANT_COACH, _) => ASSISTANT_FIRST_TEAM,
            (rl::HEAD_COACH, lv::JUNIOR) => HEAD_FIRST_TEAM,
            (rl::HEAD_COACH, lv::SENIOR) => TECHNICAL_LEADERSHIP,
            _ => OTHER_ROLES,
        }
    }
}

/// Declared domain for a tracked categorical attribute, in the order
/// distributions are emitted. `None` for unknown attribute names.
pub fn domain_of(attribute: &str) -> Option<&'static [&'static str]> {
    match attribute {
        field::GENDER => Some(&gender::DOMAIN),
        field::ETHNICITY => Some(&ethnicity::DOMAIN),
        field::REGION => Some(&region::DOMAIN),
        field::AGE_GROUP => Some(&age_group::DOMAIN),
        field::ROLE => Some(&role::DOMAIN),
        field::LEVEL => Some(&level::DOMAIN),
        field::POSITION_TYPE => Some(&position_type::DOMAIN),
        field::DIVISION => Some(&division::DOMAIN),
        field::SEASON => Some(&season::DOMAIN),
        field::EMPLOYMENT_STATUS => Some(&employment_status::DOMAIN),
        field::QUALIFICATION => Some(&qualification::DOMAIN),
        field::PARTNER => Some(&partner::DOMAIN),
        _ => None,
    }
}
