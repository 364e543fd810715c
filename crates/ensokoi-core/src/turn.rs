//! Turn-order assignment.
//!
//! Slots are handed out once at game start with a single random draw: the
//! join order is rotated by a random offset, which for two players is a fair
//! coin flip for who moves first. `swap` mirrors the order for the next round
//! and is its own inverse.

use crate::player::{Player, TurnSlot};
use rand::Rng;

/// Assign slots P1..Pn using the thread RNG
pub fn assign(players: &mut [Player]) {
    let mut rng = rand::thread_rng();
    assign_with_rng(players, &mut rng);
}

/// Assign slots P1..Pn with a provided RNG.
/// This allows deterministic setup when needed.
pub fn assign_with_rng<R: Rng>(players: &mut [Player], rng: &mut R) {
    let count = players.len();
    if count == 0 {
        return;
    }

    let offset = rng.gen_range(0..count);
    for (i, player) in players.iter_mut().enumerate() {
        let position = (i + offset) % count + 1;
        player.slot = u8::try_from(position).ok().and_then(TurnSlot::new);
    }
}

/// Reverse the order: P1 <-> Pn, P2 <-> Pn-1, ...
///
/// Players without a slot are left alone. Applying it twice restores the
/// original order.
pub fn swap(players: &mut [Player]) {
    let count = u8::try_from(players.len()).unwrap_or(u8::MAX);
    for player in players.iter_mut() {
        if let Some(slot) = player.slot {
            player.slot = Some(slot.mirrored(count));
        }
    }
}

/// The player holding `slot`
pub fn player_in_slot(players: &[Player], slot: TurnSlot) -> Option<&Player> {
    players.iter().find(|p| p.slot == Some(slot))
}

/// Players sorted by slot; unassigned players come last
pub fn in_turn_order(players: &[Player]) -> Vec<&Player> {
    let mut ordered: Vec<&Player> = players.iter().collect();
    ordered.sort_by_key(|p| p.slot.map_or(u8::MAX, |s| s.position()));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_players() -> Vec<Player> {
        vec![Player::new("Black"), Player::new("Red")]
    }

    fn slots(players: &[Player]) -> Vec<Option<String>> {
        players
            .iter()
            .map(|p| p.slot.map(|s| s.to_string()))
            .collect()
    }

    #[test]
    fn test_two_players_get_p1_and_p2() {
        let mut players = two_players();
        let mut rng = StdRng::seed_from_u64(7);
        assign_with_rng(&mut players, &mut rng);

        let mut assigned = slots(&players);
        assigned.sort();
        assert_eq!(
            assigned,
            vec![Some("P1".to_string()), Some("P2".to_string())]
        );
    }

    #[test]
    fn test_coin_flip_can_go_either_way() {
        let mut black_first = false;
        let mut red_first = false;

        for seed in 0..64 {
            let mut players = two_players();
            assign_with_rng(&mut players, &mut StdRng::seed_from_u64(seed));
            match player_in_slot(&players, TurnSlot::FIRST).map(|p| p.name.as_str()) {
                Some("Black") => black_first = true,
                Some("Red") => red_first = true,
                other => panic!("unexpected first player {:?}", other),
            }
        }

        assert!(black_first && red_first);
    }

    #[test]
    fn test_swap_toggles_two_players() {
        let mut players = two_players();
        assign_with_rng(&mut players, &mut StdRng::seed_from_u64(1));
        let before = slots(&players);

        swap(&mut players);
        let after = slots(&players);
        assert_ne!(before, after);
        assert_eq!(after, vec![before[1].clone(), before[0].clone()]);
    }

    #[test]
    fn test_swap_twice_restores_order() {
        for count in 2..=6 {
            let mut players: Vec<Player> =
                (0..count).map(|i| Player::new(format!("P{}", i))).collect();
            assign_with_rng(&mut players, &mut StdRng::seed_from_u64(count as u64));
            let original = slots(&players);

            swap(&mut players);
            swap(&mut players);
            assert_eq!(slots(&players), original, "{} players", count);
        }
    }

    #[test]
    fn test_swap_leaves_unassigned_players() {
        let mut players = two_players();
        swap(&mut players);
        assert_eq!(slots(&players), vec![None, None]);
    }

    #[test]
    fn test_in_turn_order() {
        let mut players = two_players();
        players[0].slot = TurnSlot::new(2);
        players[1].slot = TurnSlot::new(1);

        let names: Vec<&str> = in_turn_order(&players).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Red", "Black"]);
    }
}
