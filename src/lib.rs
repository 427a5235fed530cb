#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod controller;
pub mod error;
pub mod game;
pub mod persistence;
pub mod rules;
pub mod scores;
pub mod side;
pub mod team;
pub mod tournament;

pub use crate::controller::TournamentController;
pub use crate::error::TournamentError;
pub use crate::game::{GoalRecord, Match, MatchStatus};
pub use crate::persistence::{JsonFileStorage, MemoryStorage, Storage, UnimplementedStorage};
pub use crate::rules::{MatchRules, SeriesRules};
pub use crate::scores::SeriesScore;
pub use crate::side::{Side, resolve_side, side_assignment};
pub use crate::team::{Player, Team, TeamSlot};
pub use crate::tournament::Tournament;
