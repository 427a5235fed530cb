use enum_map::{Enum, EnumMap, enum_map};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::TournamentError;
use crate::scores::SeriesScore;
use crate::team::TeamSlot;

// Physical end of the table as the UI sees it ("left"/"right" buttons).
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, EnumString, Display, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    // For callers that receive the side as a raw UI token.
    pub fn from_token(token: &str) -> Result<Self, TournamentError> {
        token.parse().map_err(|_| TournamentError::InvalidSide(token.to_owned()))
    }
}

// Teams switch ends after every match. The assignment is a pure function of
// how many matches have been completed: an even total restores the initial
// mapping, an odd total swaps it. Nothing else in the history matters.
pub fn side_assignment(score: &SeriesScore) -> EnumMap<Side, TeamSlot> {
    if score.total_matches() % 2 == 0 {
        enum_map! { Side::Left => TeamSlot::A, Side::Right => TeamSlot::B }
    } else {
        enum_map! { Side::Left => TeamSlot::B, Side::Right => TeamSlot::A }
    }
}

pub fn resolve_side(side: Side, score: &SeriesScore) -> TeamSlot {
    side_assignment(score)[side]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(a: u32, b: u32) -> SeriesScore {
        let mut score = SeriesScore::default();
        score.wins[TeamSlot::A] = a;
        score.wins[TeamSlot::B] = b;
        score
    }

    #[test]
    fn assignment_alternates_with_completed_matches() {
        use TeamSlot::*;
        let cases = [
            ((0, 0), A, B),
            ((1, 0), B, A),
            ((0, 1), B, A),
            ((1, 1), A, B),
            ((2, 1), B, A),
            ((2, 2), A, B),
            ((3, 2), B, A),
        ];
        for ((a, b), left, right) in cases {
            let score = score(a, b);
            assert_eq!(resolve_side(Side::Left, &score), left, "wins {a}:{b}");
            assert_eq!(resolve_side(Side::Right, &score), right, "wins {a}:{b}");
        }
    }

    #[test]
    fn side_tokens() {
        assert_eq!(Side::from_token("left").unwrap(), Side::Left);
        assert_eq!(Side::from_token("right").unwrap(), Side::Right);
        assert!(matches!(
            Side::from_token("middle"),
            Err(TournamentError::InvalidSide(token)) if token == "middle"
        ));
        assert_eq!(Side::Left.to_string(), "left");
    }
}
