//! Tournament lifecycle: daily creation, close, and active-tournament discovery.

use chrono::{DateTime, Timelike, Utc};

use crate::logic::rewards::distribute_rewards;
use crate::models::{Tournament, TournamentError, TournamentId};
use crate::store::Store;

/// UTC hour at which the daily tournament closes. Entry is open from 00:00
/// until this hour.
pub const CLOSE_HOUR: u32 = 20;

/// Create a new active tournament starting now and ending at the close hour
/// of the same day.
pub fn create_tournament(store: &mut Store, now: DateTime<Utc>) -> TournamentId {
    let end_time = now
        .date_naive()
        .and_hms_opt(CLOSE_HOUR, 0, 0)
        .expect("close hour is a valid time of day")
        .and_utc();
    let id = store.insert_tournament(Tournament::new(now, end_time));
    log::info!("Created tournament {} (closes {})", id, end_time);
    id
}

/// Close every active tournament: flip the active flag, then distribute
/// rewards. Already-closed tournaments are never revisited, so a second call
/// on the same day is a no-op.
pub fn end_tournaments(store: &mut Store) {
    for tournament_id in store.active_tournament_ids() {
        if let Some(tournament) = store.find_tournament_mut(tournament_id) {
            tournament.active = false;
        }
        distribute_rewards(store, tournament_id);
        log::info!("Closed tournament {}", tournament_id);
    }
}

/// The singular active tournament.
///
/// With no active tournament, one is created lazily while the entry window
/// (00:00 to the close hour) is open; outside the window this is a
/// user-facing `NoActiveTournament`. More than one active tournament breaks
/// the one-a-day invariant and is surfaced as an error instead of silently
/// taking the first.
pub fn current_active_tournament(
    store: &mut Store,
    now: DateTime<Utc>,
) -> Result<TournamentId, TournamentError> {
    let active = store.active_tournament_ids();
    match active.as_slice() {
        [] => {
            if now.hour() < CLOSE_HOUR {
                Ok(create_tournament(store, now))
            } else {
                Err(TournamentError::NoActiveTournament)
            }
        }
        [id] => Ok(*id),
        _ => {
            log::error!("{} tournaments are active at once", active.len());
            Err(TournamentError::MultipleActiveTournaments)
        }
    }
}
