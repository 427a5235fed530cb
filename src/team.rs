use std::fmt;

use enum_map::Enum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

// Stable identity of one of the two competing teams. Fixed for the lifetime
// of a series. Which physical end a team defends is a separate concept
// (`Side`) and alternates between matches.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
pub enum TeamSlot {
    A,
    B,
}

impl TeamSlot {
    pub fn other(self) -> Self {
        match self {
            TeamSlot::A => TeamSlot::B,
            TeamSlot::B => TeamSlot::A,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self { Player { name: name.into() } }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    // Display color chosen by the UI. Carried verbatim, never interpreted.
    pub color: String,
    // Player order is significant: the first two players are the ones
    // credited when the team takes the series.
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(name: impl Into<String>, color: impl Into<String>, players: Vec<Player>) -> Self {
        Team { name: name.into(), color: color.into(), players }
    }

    pub fn player_names(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.name.as_str())
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.player_names().join(" & "))
    }
}
