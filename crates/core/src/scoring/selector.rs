//! Utility scoring orchestration: score all candidates, pick the winner.
//!
//! [`UtilityScorer::score_all`] resolves the phase×role weights once,
//! dispatches every candidate to its type scorer, and applies the
//! role→action-type multiplier. [`UtilityScorer::select_best`] then layers
//! the hysteresis bonus, filters vetoes, and sorts, degrading to EndTurn
//! when nothing viable remains.
//!
//! Scoring is deterministic and pure: given the same situation and
//! candidate list, the ordering reproduces exactly. The only cross-cycle
//! state is the hysteresis memory, which the caller owns explicitly and
//! which is keyed per combatant.

use std::collections::HashMap;

use crate::combatant::{CombatantId, Role};
use crate::config::TuningConfig;
use crate::scoring::candidate::{ActionCandidate, ActionKind, ChoiceSignature};
use crate::scoring::scorers;
use crate::scoring::weights::PhaseRoleWeights;
use crate::situation::Situation;

/// Per-combatant memory of the previous executed choice.
///
/// Owned by the orchestration layer with encounter lifetime; cleared on
/// combat end. Keying by combatant id is what lets a parallel host shard
/// decisions without cross-talk.
#[derive(Clone, Debug, Default)]
pub struct HysteresisMemory {
    last: HashMap<CombatantId, ChoiceSignature>,
}

impl HysteresisMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self, combatant: CombatantId) -> Option<ChoiceSignature> {
        self.last.get(&combatant).copied()
    }

    pub fn record(&mut self, combatant: CombatantId, signature: ChoiceSignature) {
        self.last.insert(combatant, signature);
    }

    /// Drops every combatant's memory; called on combat end.
    pub fn clear(&mut self) {
        self.last.clear();
    }
}

/// Role→action-type multiplier applied after type scoring.
///
/// Support leans 15% toward its supportive toolkit and 15% away from
/// attacking; other roles take their shape from the weight matrix alone.
fn role_action_multiplier(role: Role, kind: ActionKind) -> f64 {
    match (role, kind) {
        (Role::Support, k) if k.is_supportive() => 1.15,
        (Role::Support, k) if k.is_attack() => 0.85,
        _ => 1.0,
    }
}

/// Scores and selects among action candidates for one combatant.
pub struct UtilityScorer;

impl UtilityScorer {
    /// Scores every candidate in place.
    ///
    /// Resolves the weight bundle for the situation's (phase, role) once,
    /// dispatches each candidate to its type scorer, and stamps the
    /// role→action-type multiplier onto the utility lane.
    pub fn score_all(situation: &Situation, candidates: &mut [ActionCandidate]) {
        let weights = PhaseRoleWeights::resolve(situation.phase, situation.me.role);

        for candidate in candidates.iter_mut() {
            scorers::score_candidate(candidate, situation, &weights);
            candidate.utility_multiplier = role_action_multiplier(situation.me.role, candidate.kind);
        }
    }

    /// Picks the winner among scored candidates.
    ///
    /// 1. Applies the flat hysteresis bonus to any candidate matching the
    ///    combatant's previous (kind, ability, target) choice.
    /// 2. Drops vetoed candidates; if none remain, degrades to EndTurn.
    /// 3. Sorts by ranking score descending (stable, so ties keep
    ///    generation order).
    /// 4. Records the winner for the next cycle's hysteresis comparison.
    pub fn select_best(
        situation: &Situation,
        mut candidates: Vec<ActionCandidate>,
        memory: &mut HysteresisMemory,
        cfg: &TuningConfig,
    ) -> ActionCandidate {
        let me = situation.me.id;

        if let Some(previous) = memory.last(me) {
            for candidate in candidates.iter_mut() {
                if candidate.signature() == previous {
                    candidate.bonus_score += cfg.hysteresis_bonus;
                }
            }
        }

        candidates.retain(ActionCandidate::is_selectable);

        if candidates.is_empty() {
            tracing::debug!("combatant {me}: no selectable candidates, ending turn");
            let fallback = ActionCandidate::end_turn();
            memory.record(me, fallback.signature());
            return fallback;
        }

        candidates.sort_by(|a, b| b.ranking_score(cfg).total_cmp(&a.ranking_score(cfg)));

        let winner = candidates.swap_remove(0);
        tracing::debug!(
            "combatant {me}: selected {} (ability {:?}, target {:?}, score {:.2})",
            winner.kind,
            winner.ability,
            winner.target,
            winner.ranking_score(cfg),
        );
        memory.record(me, winner.signature());
        winner
    }

    /// Scores every generated candidate and returns them with their ranking
    /// scores, best first, without touching hysteresis memory. Debugging
    /// surface for hosts that want to see why a choice won.
    pub fn evaluate_all(situation: &Situation, cfg: &TuningConfig) -> Vec<(ActionCandidate, f64)> {
        let mut candidates = crate::scoring::generator::generate(situation);
        Self::score_all(situation, &mut candidates);
        let mut scored: Vec<(ActionCandidate, f64)> = candidates
            .into_iter()
            .map(|c| {
                let score = c.ranking_score(cfg);
                (c, score)
            })
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }
}
