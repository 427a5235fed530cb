use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use scopeguard::defer;

use crate::error::TournamentError;
use crate::game::Match;
use crate::persistence::Storage;
use crate::rules::SeriesRules;
use crate::scores::SeriesScore;
use crate::side::Side;
use crate::team::{Team, TeamSlot};
use crate::tournament::Tournament;

// Serializes every state mutation: at most one update is ever in flight, and
// a mutation only becomes visible after the new state has been persisted.
// Reads bypass the latch and always observe the last committed snapshot.
//
// Concurrent mutation attempts are rejected with `Busy` rather than queued,
// so a UI can disable its buttons off `is_update_in_progress` instead of
// buffering taps.
pub struct TournamentController<S> {
    storage: S,
    state: Mutex<Option<Tournament>>,
    update_in_progress: AtomicBool,
}

impl<S: Storage> TournamentController<S> {
    pub fn new(storage: S) -> Self {
        TournamentController {
            storage,
            state: Mutex::new(None),
            update_in_progress: AtomicBool::new(false),
        }
    }

    // Restores the last persisted state, resuming a series that was running
    // when the process stopped.
    pub async fn restore(storage: S) -> Result<Self, TournamentError> {
        let state = storage.load().await.map_err(TournamentError::Persistence)?;
        if state.is_some() {
            info!("Resuming a persisted tournament");
        }
        Ok(TournamentController {
            storage,
            state: Mutex::new(state),
            update_in_progress: AtomicBool::new(false),
        })
    }

    pub fn is_update_in_progress(&self) -> bool {
        self.update_in_progress.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool { self.state.lock().unwrap().is_some() }

    // Admits one mutation at a time. The operation runs on a working copy
    // which is persisted first and committed second, so a failure at any
    // point leaves the previous snapshot authoritative.
    async fn with_exclusive_update<T>(
        &self,
        op: impl FnOnce(&mut Option<Tournament>) -> Result<T, TournamentError>,
    ) -> Result<T, TournamentError> {
        if self
            .update_in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(TournamentError::Busy);
        }
        defer! { self.update_in_progress.store(false, Ordering::SeqCst); }

        let mut working = self.state.lock().unwrap().clone();
        let result = op(&mut working)?;
        self.storage.save(working.as_ref()).await.map_err(TournamentError::Persistence)?;
        *self.state.lock().unwrap() = working;
        Ok(result)
    }

    async fn with_tournament<T>(
        &self,
        op: impl FnOnce(&mut Tournament) -> Result<T, TournamentError>,
    ) -> Result<T, TournamentError> {
        self.with_exclusive_update(|state| {
            let tournament = state.as_mut().ok_or(TournamentError::NotInitialized)?;
            op(tournament)
        })
        .await
    }

    fn read<T>(&self, f: impl FnOnce(&Tournament) -> T) -> Result<T, TournamentError> {
        let state = self.state.lock().unwrap();
        state.as_ref().map(f).ok_or(TournamentError::NotInitialized)
    }

    pub async fn start_tournament(
        &self, team_a: Team, team_b: Team, rules: SeriesRules,
    ) -> Result<(), TournamentError> {
        self.with_exclusive_update(|state| {
            if state.is_some() {
                return Err(TournamentError::InvalidState(
                    "Cannot start a tournament: one is already running".to_owned(),
                ));
            }
            let tournament = Tournament::new(team_a, team_b, rules)?;
            info!(
                "Tournament started: {} vs. {}, best of {}",
                tournament.team(TeamSlot::A),
                tournament.team(TeamSlot::B),
                tournament.rules().best_of_n
            );
            *state = Some(tournament);
            Ok(())
        })
        .await
    }

    pub async fn add_goal(&self, side: Side) -> Result<Match, TournamentError> {
        self.with_tournament(|tournament| {
            let match_ = tournament.add_goal(side)?.clone();
            debug!("Goal for the {side} side");
            Ok(match_)
        })
        .await
    }

    pub async fn undo(&self) -> Result<Match, TournamentError> {
        self.with_tournament(|tournament| {
            let match_ = tournament.undo_goal()?.clone();
            debug!("Last goal rolled back");
            Ok(match_)
        })
        .await
    }

    pub async fn swap_teams(&self) -> Result<(), TournamentError> {
        self.with_tournament(|tournament| {
            tournament.swap_teams()?;
            debug!("Team identities swapped");
            Ok(())
        })
        .await
    }

    pub async fn cancel_match(&self) -> Result<(), TournamentError> {
        self.with_tournament(|tournament| {
            tournament.cancel_match()?;
            debug!("Running match cancelled");
            Ok(())
        })
        .await
    }

    // Folds a decided match into the series. Returns the frozen match and
    // whether the series is over; when it is, the caller decides between
    // `new_match` and `finish_tournament`.
    pub async fn finish_match(
        &self, winner: TeamSlot,
    ) -> Result<(Match, bool), TournamentError> {
        self.with_tournament(|tournament| {
            let (finished, series_finished) = tournament.finish_match(winner)?;
            info!(
                "Match finished {}:{}, win for {}",
                finished.goals(TeamSlot::A),
                finished.goals(TeamSlot::B),
                tournament.team(winner)
            );
            Ok((finished, series_finished))
        })
        .await
    }

    pub async fn new_match(&self) -> Result<(), TournamentError> {
        self.with_tournament(|tournament| {
            tournament.new_match()?;
            debug!("New match started");
            Ok(())
        })
        .await
    }

    // Tears the series down. Until the next `start_tournament`, reads and
    // writes fail with `NotInitialized`.
    pub async fn finish_tournament(&self) -> Result<(), TournamentError> {
        self.with_exclusive_update(|state| {
            let tournament = state.take().ok_or(TournamentError::NotInitialized)?;
            match tournament.winning_team() {
                Some(team) => info!("Tournament finished, {team} takes the series"),
                None => info!("Tournament finished without a series winner"),
            }
            Ok(())
        })
        .await
    }

    pub fn teams(&self) -> Result<(Team, Team), TournamentError> {
        self.read(|t| (t.team(TeamSlot::A).clone(), t.team(TeamSlot::B).clone()))
    }

    pub fn running_match(&self) -> Result<Match, TournamentError> {
        self.read(|t| t.running_match().clone())
    }

    // Applies the injected win rule to the running match.
    pub fn match_winner(&self) -> Result<Option<TeamSlot>, TournamentError> {
        self.read(|t| t.match_winner())
    }

    pub fn wins(&self) -> Result<SeriesScore, TournamentError> {
        self.read(|t| t.score().clone())
    }

    pub fn best_of_n(&self) -> Result<u32, TournamentError> {
        self.read(|t| t.rules().best_of_n)
    }
}
