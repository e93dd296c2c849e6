use crate::types::{BattleId, BattleStatus, CycleDecision};

/// Pick the action for one cycle from a status snapshot.
///
/// Only an explicit `is_claimed: false` counts as an open battle. `status: true`
/// means the result is ready to claim, `status: false` means it is still being
/// played. Every other shape (no `user_data`, already claimed, missing flags)
/// means a new ticket is needed.
pub fn decide(status: &BattleStatus) -> CycleDecision {
    let Some(user) = status.user_data.as_ref() else {
        return CycleDecision::NeedsTicket {
            last_battle_id: None,
        };
    };

    match (status.status, user.is_claimed) {
        (Some(true), Some(false)) => CycleDecision::ClaimReady {
            battle_id: user.battle_id.clone(),
            rank: user.rank,
            reward: user.reward,
        },
        (Some(false), Some(false)) => CycleDecision::MatchInProgress {
            battle_id: user.battle_id.clone(),
        },
        _ => CycleDecision::NeedsTicket {
            last_battle_id: user.battle_id.clone(),
        },
    }
}

/// Battle id a wait-for-new-battle poll should compare against.
///
/// A poll without `user_data` carries nothing new, so the previously observed
/// id is kept.
pub fn observed_battle_id(status: &BattleStatus, previous: Option<BattleId>) -> Option<BattleId> {
    match status.user_data.as_ref() {
        Some(user) => user.battle_id.clone(),
        None => previous,
    }
}

/// Whether a new battle has started since the ticket was bought.
///
/// Two absent ids compare equal, so a missing pre-purchase id keeps waiting
/// until the server reports one.
pub fn is_new_battle(before: Option<&BattleId>, observed: Option<&BattleId>) -> bool {
    before != observed
}
