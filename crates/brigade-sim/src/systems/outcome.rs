//! Win/loss evaluation from the spawner counters.

use brigade_core::enums::GamePhase;
use brigade_core::state::FireCounters;

/// Phase after this tick. Too many fires burning loses; every pool fire
/// spawned and put out wins. Terminal phases never change.
pub fn evaluate(phase: GamePhase, counters: &FireCounters, max_active_fires: u32) -> GamePhase {
    if phase.is_finished() {
        return phase;
    }
    if counters.active >= max_active_fires {
        GamePhase::GameOver
    } else if counters.spawned >= counters.pool_size && counters.extinguished >= counters.pool_size {
        GamePhase::Completed
    } else {
        phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters(active: u32, spawned: u32, extinguished: u32) -> FireCounters {
        FireCounters {
            active,
            spawned,
            extinguished,
            pool_size: 10,
        }
    }

    #[test]
    fn test_game_over_at_cap() {
        assert_eq!(evaluate(GamePhase::Active, &counters(5, 7, 2), 5), GamePhase::GameOver);
        assert_eq!(evaluate(GamePhase::Active, &counters(4, 7, 3), 5), GamePhase::Active);
    }

    #[test]
    fn test_completed_when_all_out() {
        assert_eq!(evaluate(GamePhase::Active, &counters(0, 10, 10), 5), GamePhase::Completed);
        assert_eq!(evaluate(GamePhase::Active, &counters(0, 9, 9), 5), GamePhase::Active);
    }

    #[test]
    fn test_terminal_phases_stick() {
        assert_eq!(evaluate(GamePhase::GameOver, &counters(0, 10, 10), 5), GamePhase::GameOver);
        assert_eq!(evaluate(GamePhase::Completed, &counters(5, 10, 10), 5), GamePhase::Completed);
    }
}
