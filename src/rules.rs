use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::error::TournamentError;
use crate::team::TeamSlot;

// When is a match over? The rule is chosen at series setup and injected into
// the engine; nothing below assumes a specific threshold.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MatchRules {
    // First team to reach `goals` wins.
    FirstTo { goals: u32 },
    // Reach `goals` and lead by at least two. The match continues past the
    // threshold as long as the scores stay close.
    TwoGoalLead { goals: u32 },
    // Win by being `lead` goals ahead, regardless of the total.
    GoalDifference { lead: u32 },
}

impl MatchRules {
    pub fn first_to(goals: u32) -> Self { MatchRules::FirstTo { goals } }

    pub fn winner(&self, goals: &EnumMap<TeamSlot, u32>) -> Option<TeamSlot> {
        let a = goals[TeamSlot::A];
        let b = goals[TeamSlot::B];
        let (leader, lead) = if a >= b { (TeamSlot::A, a - b) } else { (TeamSlot::B, b - a) };
        let decided = match *self {
            MatchRules::FirstTo { goals } => a.max(b) >= goals,
            MatchRules::TwoGoalLead { goals } => a.max(b) >= goals && lead >= 2,
            MatchRules::GoalDifference { lead: required } => lead >= required.max(1),
        };
        (decided && lead > 0).then_some(leader)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SeriesRules {
    pub best_of_n: u32,
    pub match_rules: MatchRules,
}

impl SeriesRules {
    pub fn new(best_of_n: u32, match_rules: MatchRules) -> Result<Self, TournamentError> {
        let rules = SeriesRules { best_of_n, match_rules };
        rules.validate()?;
        Ok(rules)
    }

    // The classic pub setting: best of three, first team to ten goals.
    pub fn best_of_three() -> Self {
        SeriesRules { best_of_n: 3, match_rules: MatchRules::first_to(10) }
    }

    // An even N would allow a tied series with no winner.
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.best_of_n == 0 || self.best_of_n % 2 == 0 {
            return Err(TournamentError::InvalidConfig(format!(
                "best-of-N must be an odd positive number, got {}",
                self.best_of_n
            )));
        }
        Ok(())
    }

    pub fn wins_needed(&self) -> u32 { self.best_of_n / 2 + 1 }
}

#[cfg(test)]
mod tests {
    use enum_map::enum_map;

    use super::*;

    fn goals(a: u32, b: u32) -> EnumMap<TeamSlot, u32> {
        enum_map! { TeamSlot::A => a, TeamSlot::B => b }
    }

    #[test]
    fn first_to_rule() {
        let rules = MatchRules::first_to(10);
        assert_eq!(rules.winner(&goals(0, 0)), None);
        assert_eq!(rules.winner(&goals(9, 9)), None);
        assert_eq!(rules.winner(&goals(10, 9)), Some(TeamSlot::A));
        assert_eq!(rules.winner(&goals(3, 10)), Some(TeamSlot::B));
    }

    #[test]
    fn two_goal_lead_rule() {
        let rules = MatchRules::TwoGoalLead { goals: 10 };
        assert_eq!(rules.winner(&goals(10, 9)), None);
        assert_eq!(rules.winner(&goals(10, 8)), Some(TeamSlot::A));
        assert_eq!(rules.winner(&goals(11, 13)), Some(TeamSlot::B));
        assert_eq!(rules.winner(&goals(12, 11)), None);
    }

    #[test]
    fn goal_difference_rule() {
        let rules = MatchRules::GoalDifference { lead: 3 };
        assert_eq!(rules.winner(&goals(2, 0)), None);
        assert_eq!(rules.winner(&goals(3, 0)), Some(TeamSlot::A));
        assert_eq!(rules.winner(&goals(4, 7)), Some(TeamSlot::B));
    }

    #[test]
    fn best_of_n_must_be_odd() {
        assert!(SeriesRules::new(1, MatchRules::first_to(1)).is_ok());
        assert!(SeriesRules::new(5, MatchRules::first_to(10)).is_ok());
        for n in [0, 2, 4] {
            assert!(matches!(
                SeriesRules::new(n, MatchRules::first_to(10)),
                Err(TournamentError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn wins_needed_is_a_majority() {
        assert_eq!(SeriesRules::new(1, MatchRules::first_to(1)).unwrap().wins_needed(), 1);
        assert_eq!(SeriesRules::best_of_three().wins_needed(), 2);
        assert_eq!(SeriesRules::new(7, MatchRules::first_to(10)).unwrap().wins_needed(), 4);
    }
}
