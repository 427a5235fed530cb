use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::error::TournamentError;
use crate::rules::MatchRules;
use crate::team::TeamSlot;

// Every applied goal lands here, so mistaken input can be rolled back in
// reverse order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GoalRecord {
    pub slot: TeamSlot,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MatchStatus {
    Running,
    Decided(TeamSlot),
}

// One match within a series: live goal counts for both teams plus the goal
// history that powers undo. Frozen once decided.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Match {
    goals: EnumMap<TeamSlot, u32>,
    goal_log: Vec<GoalRecord>,
    status: MatchStatus,
}

impl Match {
    pub fn new() -> Self {
        Match { goals: EnumMap::default(), goal_log: Vec::new(), status: MatchStatus::Running }
    }

    pub fn goals(&self, slot: TeamSlot) -> u32 { self.goals[slot] }
    pub fn all_goals(&self) -> &EnumMap<TeamSlot, u32> { &self.goals }
    pub fn total_goals(&self) -> u32 { self.goals.values().sum() }
    pub fn goal_log(&self) -> &[GoalRecord] { &self.goal_log }
    pub fn status(&self) -> MatchStatus { self.status }
    pub fn is_running(&self) -> bool { self.status == MatchStatus::Running }

    fn ensure_running(&self) -> Result<(), TournamentError> {
        match self.status {
            MatchStatus::Running => Ok(()),
            MatchStatus::Decided(_) => Err(TournamentError::InvalidState(
                "Cannot update the match: it is already decided".to_owned(),
            )),
        }
    }

    pub fn add_goal(&mut self, slot: TeamSlot) -> Result<(), TournamentError> {
        self.ensure_running()?;
        self.goals[slot] += 1;
        self.goal_log.push(GoalRecord { slot });
        Ok(())
    }

    // Rolls back the most recent goal. With an empty history this is a no-op,
    // not an error: the undo button may be pressed at any time.
    pub fn undo_goal(&mut self) -> Result<Option<GoalRecord>, TournamentError> {
        self.ensure_running()?;
        let Some(record) = self.goal_log.pop() else {
            return Ok(None);
        };
        self.goals[record.slot] = self.goals[record.slot].saturating_sub(1);
        Ok(Some(record))
    }

    // The winning team under `rules`, or `None` while the match is undecided.
    // Once the match has been finished the recorded winner is authoritative,
    // even if the rules object changes its mind.
    pub fn winner(&self, rules: &MatchRules) -> Option<TeamSlot> {
        match self.status {
            MatchStatus::Decided(winner) => Some(winner),
            MatchStatus::Running => rules.winner(&self.goals),
        }
    }

    pub(crate) fn decide(&mut self, winner: TeamSlot) -> Result<(), TournamentError> {
        self.ensure_running()?;
        self.status = MatchStatus::Decided(winner);
        Ok(())
    }

    // A decided match where the loser never scored. Consumers use this for
    // the time-honored crawling-under-the-table ritual.
    pub fn shutout(&self) -> Option<TeamSlot> {
        match self.status {
            MatchStatus::Decided(winner) => {
                let loser = winner.other();
                (self.goals[loser] == 0).then_some(loser)
            }
            MatchStatus::Running => None,
        }
    }
}
