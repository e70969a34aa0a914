use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::Action;

/// Picks one of the equally scored actions uniformly at random.
/// Returns `None` only when there is nothing to choose from.
pub fn choose_tied(actions: &[Action], rng: &mut SmallRng) -> Option<Action> {
    if actions.is_empty() { return None; }
    let idx = rng.gen_range(0..actions.len());
    Some(actions[idx])
}
