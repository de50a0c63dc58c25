//! Rule-based evacuation advice.
//!
//! Only the residence type and mobility flag are consulted; the remaining
//! profile fields are stored for future rules but do not affect the outcome.

use serde::Serialize;
use utoipa::ToSchema;

use super::user::{ResidenceType, UserProfile};

/// Evacuation recommendation produced by [`advise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    /// Underground resident with impaired mobility.
    RescueThenUpperFloor,
    /// Underground resident able to move unaided.
    UndergroundExit,
    /// Mobility-impaired resident above ground.
    MobilityRescue,
    /// Everyone else.
    GeneralEvacuation,
}

impl Advice {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::RescueThenUpperFloor => "rescue_then_upper_floor",
            Self::UndergroundExit => "underground_exit",
            Self::MobilityRescue => "mobility_rescue",
            Self::GeneralEvacuation => "general_evacuation",
        }
    }

    /// Human-readable recommendation.
    pub fn message(self) -> &'static str {
        match self {
            Self::RescueThenUpperFloor => "immediate rescue request then evacuate to upper floor",
            Self::UndergroundExit => "underground — locate nearest exit and evacuate",
            Self::MobilityRescue => {
                "mobility-impaired — request rescue and remain in a safe location"
            }
            Self::GeneralEvacuation => {
                "begin evacuation now; detailed guidance depends on situation"
            }
        }
    }
}

/// Map a residence type and mobility flag to a recommendation.
///
/// # Examples
/// ```
/// use shelter_backend::domain::{advise, Advice, ResidenceType};
///
/// assert_eq!(advise(ResidenceType::House, false), Advice::GeneralEvacuation);
/// ```
pub fn advise(residence_type: ResidenceType, mobility_impaired: bool) -> Advice {
    match (residence_type, mobility_impaired) {
        (ResidenceType::Underground, true) => Advice::RescueThenUpperFloor,
        (ResidenceType::Underground, false) => Advice::UndergroundExit,
        (_, true) => Advice::MobilityRescue,
        (_, false) => Advice::GeneralEvacuation,
    }
}

/// Convenience wrapper applying [`advise`] to a stored profile.
pub fn advise_for_profile(profile: &UserProfile) -> Advice {
    advise(profile.residence_type, profile.mobility_impaired)
}
