//! Closed domain enums shared by the HTTP layer and the repos.
//!
//! Rows store these as plain TEXT; parsing happens once at the edge so the
//! rest of the code dispatches on the enum, not on string comparisons.

use serde::{Deserialize, Serialize};

/// Gender category carried by player profiles, tournaments and rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Both recognized values, in snapshot-generation order.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }

    pub fn parse(s: &str) -> Option<Gender> {
        match s {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Account role. Capabilities hang off the variant so handlers never
/// compare raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Player,
    Referee,
    Volunteer,
    Organizer,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Player => "PLAYER",
            UserRole::Referee => "REFEREE",
            UserRole::Volunteer => "VOLUNTEER",
            UserRole::Organizer => "ORGANIZER",
        }
    }

    pub fn parse(s: &str) -> Option<UserRole> {
        match s {
            "PLAYER" => Some(UserRole::Player),
            "REFEREE" => Some(UserRole::Referee),
            "VOLUNTEER" => Some(UserRole::Volunteer),
            "ORGANIZER" => Some(UserRole::Organizer),
            _ => None,
        }
    }

    pub fn can_create_tournament(self) -> bool {
        matches!(self, UserRole::Organizer)
    }

    pub fn can_award_points(self) -> bool {
        matches!(self, UserRole::Organizer)
    }
}

/// Ranking tier of a tournament; scales the position→points table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankingTier {
    NoneRank,
    OneStar,
    TwoStar,
    ThreeStar,
}

impl RankingTier {
    pub fn as_str(self) -> &'static str {
        match self {
            RankingTier::NoneRank => "NoneRank",
            RankingTier::OneStar => "OneStar",
            RankingTier::TwoStar => "TwoStar",
            RankingTier::ThreeStar => "ThreeStar",
        }
    }

    pub fn parse(s: &str) -> Option<RankingTier> {
        match s {
            "NoneRank" => Some(RankingTier::NoneRank),
            "OneStar" => Some(RankingTier::OneStar),
            "TwoStar" => Some(RankingTier::TwoStar),
            "ThreeStar" => Some(RankingTier::ThreeStar),
            _ => None,
        }
    }

    /// Multiplier applied to the base (one-star) points table.
    pub fn multiplier(self) -> f64 {
        match self {
            RankingTier::NoneRank => 0.0,
            RankingTier::OneStar => 1.0,
            RankingTier::TwoStar => 1.5,
            RankingTier::ThreeStar => 2.0,
        }
    }
}
