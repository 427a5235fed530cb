use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::team::TeamSlot;

// Matches won per team within the current series. A match win always counts
// as a whole point: table football knows no draws.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SeriesScore {
    pub wins: EnumMap<TeamSlot, u32>,
}

impl SeriesScore {
    pub fn total_matches(&self) -> u32 { self.wins.values().sum() }

    pub fn record_win(&mut self, winner: TeamSlot) { self.wins[winner] += 1; }

    pub fn leader(&self) -> Option<TeamSlot> {
        use std::cmp::Ordering::*;
        match self.wins[TeamSlot::A].cmp(&self.wins[TeamSlot::B]) {
            Greater => Some(TeamSlot::A),
            Less => Some(TeamSlot::B),
            Equal => None,
        }
    }
}
