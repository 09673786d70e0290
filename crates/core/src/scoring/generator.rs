//! Candidate generation: hypothesize every action worth comparing.
//!
//! Generation is deliberately exhaustive within the situation's bounds
//! (abilities × targets, plus the host-resolved move options); the veto
//! gates in the type scorers are what keep infeasible combinations from
//! ever winning. An EndTurn candidate is always present so selection has
//! its designed fallback.

use crate::scoring::candidate::ActionCandidate;
use crate::situation::Situation;

/// Builds the full candidate list for one decision cycle.
pub fn generate(situation: &Situation) -> Vec<ActionCandidate> {
    let mut candidates = Vec::new();

    for enemy in situation.living_enemies() {
        candidates.push(ActionCandidate::basic_attack(enemy.id));
        for ability in &situation.attacks {
            candidates.push(ActionCandidate::ability_attack(ability.id, enemy.id));
        }
        for ability in &situation.debuffs {
            candidates.push(ActionCandidate::debuff(ability.id, enemy.id));
        }
    }

    // Self plus living allies are valid heal/buff targets.
    let friendly_ids = std::iter::once(situation.me.id)
        .chain(situation.allies.iter().filter(|a| a.is_alive()).map(|a| a.id));
    for id in friendly_ids {
        for ability in &situation.heals {
            candidates.push(ActionCandidate::heal(ability.id, id));
        }
        for ability in &situation.buffs {
            candidates.push(ActionCandidate::buff(ability.id, id));
        }
    }

    for option in &situation.move_options {
        candidates.push(ActionCandidate::move_to(option.destination));
    }

    candidates.push(ActionCandidate::end_turn());
    candidates
}
