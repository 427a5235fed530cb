use enum_map::{EnumMap, enum_map};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::error::TournamentError;
use crate::game::Match;
use crate::rules::SeriesRules;
use crate::scores::SeriesScore;
use crate::side::{Side, resolve_side, side_assignment};
use crate::team::{Team, TeamSlot};

// A running best-of-N series between two fixed teams: the two rosters, the
// win tally, and the match currently on the table. This is pure state with
// no I/O; the controller owns serialization and persistence around it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Tournament {
    teams: EnumMap<TeamSlot, Team>,
    rules: SeriesRules,
    score: SeriesScore,
    current: Match,
}

impl Tournament {
    pub fn new(team_a: Team, team_b: Team, rules: SeriesRules) -> Result<Self, TournamentError> {
        rules.validate()?;
        Ok(Tournament {
            teams: enum_map! {
                TeamSlot::A => team_a.clone(),
                TeamSlot::B => team_b.clone(),
            },
            rules,
            score: SeriesScore::default(),
            current: Match::new(),
        })
    }

    pub fn teams(&self) -> &EnumMap<TeamSlot, Team> { &self.teams }
    pub fn team(&self, slot: TeamSlot) -> &Team { &self.teams[slot] }
    pub fn rules(&self) -> &SeriesRules { &self.rules }
    pub fn score(&self) -> &SeriesScore { &self.score }
    pub fn running_match(&self) -> &Match { &self.current }

    // The team currently defending `side`, under the automatic rotation.
    pub fn team_for_side(&self, side: Side) -> &Team {
        &self.teams[resolve_side(side, &self.score)]
    }

    pub fn side_assignment(&self) -> EnumMap<Side, TeamSlot> { side_assignment(&self.score) }

    // Manual override of the stored A/B identities, unrelated to the
    // automatic side rotation. Refused once goals are on the board: swapping
    // then would silently reattribute them.
    pub fn swap_teams(&mut self) -> Result<(), TournamentError> {
        if self.current.total_goals() > 0 {
            return Err(TournamentError::InvalidState(
                "Cannot swap teams: goals are already on the board".to_owned(),
            ));
        }
        let team_a = self.teams[TeamSlot::A].clone();
        self.teams[TeamSlot::A] = std::mem::replace(&mut self.teams[TeamSlot::B], team_a);
        Ok(())
    }

    pub fn add_goal(&mut self, side: Side) -> Result<&Match, TournamentError> {
        let slot = resolve_side(side, &self.score);
        self.current.add_goal(slot)?;
        Ok(&self.current)
    }

    pub fn undo_goal(&mut self) -> Result<&Match, TournamentError> {
        self.current.undo_goal()?;
        Ok(&self.current)
    }

    pub fn match_winner(&self) -> Option<TeamSlot> {
        self.current.winner(&self.rules.match_rules)
    }

    // The single point where a completed match is folded into series state.
    // Freezes the running match, counts the win and reports whether the
    // series is now over. The frozen match refuses further mutation, so a
    // double call fails instead of double-counting.
    pub fn finish_match(&mut self, winner: TeamSlot) -> Result<(Match, bool), TournamentError> {
        self.current.decide(winner)?;
        self.score.record_win(winner);
        Ok((self.current.clone(), self.series_finished()))
    }

    // Valid only between matches: after a finished match was recorded and
    // while the series still needs more wins.
    pub fn new_match(&mut self) -> Result<(), TournamentError> {
        if self.current.is_running() {
            return Err(TournamentError::InvalidState(
                "Cannot start a new match: one is still running".to_owned(),
            ));
        }
        if self.series_finished() {
            return Err(TournamentError::InvalidState(
                "Cannot start a new match: the series is already decided".to_owned(),
            ));
        }
        self.current = Match::new();
        Ok(())
    }

    // Throws away the running match without recording a win for either team.
    // The tally stays untouched and a fresh match is put on the table.
    pub fn cancel_match(&mut self) -> Result<(), TournamentError> {
        if !self.current.is_running() {
            return Err(TournamentError::InvalidState(
                "Cannot cancel the match: it is already decided".to_owned(),
            ));
        }
        self.current = Match::new();
        Ok(())
    }

    pub fn series_winner(&self) -> Option<TeamSlot> {
        let needed = self.rules.wins_needed();
        TeamSlot::iter().find(|slot| self.score.wins[*slot] >= needed)
    }

    pub fn winning_team(&self) -> Option<&Team> {
        self.series_winner().map(|slot| &self.teams[slot])
    }

    pub fn series_finished(&self) -> bool { self.series_winner().is_some() }
}
