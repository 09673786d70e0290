//! Whole-turn scenarios driven through the encounter context: plan
//! construction, step-by-step execution, drift replanning, and every
//! forced-end-turn budget.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use skirmish_core::{
    Ability, AbilityId, AbilityTags, ActionEconomy, ActionKind, BuffState, CombatPhase, Combatant,
    CombatantId, EnemyInfo, Faction, HealthMeter, PlanError, PlanStep, Position, RangePreference,
    Role, SaveKind, Situation, TeamSignals, TimingKind, TuningConfig,
};
use skirmish_runtime::{
    ActionExecutor, EncounterContext, EndTurnReason, ExecutionResult, RuntimeError,
    SituationProvider, TickOutcome,
};

const ME: CombatantId = CombatantId(0);
const ORC: CombatantId = CombatantId(1);

/// Run tests with `RUST_LOG=debug` to see the decision trail.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn enemy(id: CombatantId, hp: f64, distance: f32) -> EnemyInfo {
    EnemyInfo {
        id,
        hp_fraction: hp,
        max_hp: 100.0,
        position: Position::new(distance, 0.0),
        distance,
        threat: 0.5,
        defense: 10.0,
        weakest_save: SaveKind::Will,
        immune_mind_affecting: false,
        active_debuffs: Vec::new(),
        engaged: false,
        is_caster: false,
        hittable: true,
    }
}

/// Melee DPS standing next to one healthy orc, basic attack available.
fn melee_situation() -> Situation {
    let mut strike = AbilityTags::new(TimingKind::Attack);
    strike.free_to_use = true;
    strike.expected_damage = 12.0;
    strike.attack_bonus = 6.0;
    Situation {
        me: Combatant {
            id: ME,
            health: HealthMeter::new(90.0, 100.0),
            position: Position::ORIGIN,
            faction: Faction::Player,
            role: Role::Dps,
            economy: ActionEconomy::fresh(),
        },
        phase: CombatPhase::Midgame,
        range_preference: RangePreference::Melee,
        round: 2,
        enemies: vec![enemy(ORC, 0.9, 1.0)],
        allies: Vec::new(),
        best_target: Some(ORC),
        attacks: vec![Ability::new(AbilityId(10), strike)],
        heals: Vec::new(),
        buffs: Vec::new(),
        debuffs: Vec::new(),
        move_options: Vec::new(),
        my_buffs: BuffState::default(),
        team: TeamSignals::default(),
    }
}

/// Replays a fixed sequence of situations, repeating the last one forever.
/// `None` entries simulate a provider with nothing to say.
struct ScriptedProvider {
    frames: Vec<Option<Situation>>,
    calls: Cell<usize>,
}

impl ScriptedProvider {
    fn repeating(situation: Situation) -> Self {
        Self {
            frames: vec![Some(situation)],
            calls: Cell::new(0),
        }
    }

    fn sequence(frames: Vec<Option<Situation>>) -> Self {
        Self {
            frames,
            calls: Cell::new(0),
        }
    }
}

impl SituationProvider for ScriptedProvider {
    fn situation(&self, _combatant: CombatantId) -> Option<Situation> {
        let index = self.calls.get();
        self.calls.set(index + 1);
        let frame = self.frames.get(index).or_else(|| self.frames.last())?;
        frame.clone()
    }
}

/// Pops scripted results per issued step, defaulting to success, and logs
/// every step it was handed.
struct ScriptedExecutor {
    results: RefCell<VecDeque<ExecutionResult>>,
    busy_ticks: Cell<u32>,
    issued: RefCell<Vec<PlanStep>>,
}

impl ScriptedExecutor {
    fn succeeding() -> Self {
        Self {
            results: RefCell::new(VecDeque::new()),
            busy_ticks: Cell::new(0),
            issued: RefCell::new(Vec::new()),
        }
    }

    fn with_results(results: Vec<ExecutionResult>) -> Self {
        let executor = Self::succeeding();
        *executor.results.borrow_mut() = results.into();
        executor
    }

    fn busy_for(ticks: u32) -> Self {
        let executor = Self::succeeding();
        executor.busy_ticks.set(ticks);
        executor
    }

    fn issued_kinds(&self) -> Vec<ActionKind> {
        self.issued.borrow().iter().map(|s| s.kind).collect()
    }
}

impl ActionExecutor for ScriptedExecutor {
    fn execute(&mut self, _combatant: CombatantId, step: &PlanStep) -> ExecutionResult {
        self.issued.borrow_mut().push(step.clone());
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or(ExecutionResult::Success)
    }

    fn is_busy(&self) -> bool {
        let remaining = self.busy_ticks.get();
        if remaining > 0 {
            self.busy_ticks.set(remaining - 1);
            return true;
        }
        false
    }
}

/// Ticks until the turn ends, with a hard cap so a broken controller
/// cannot hang the test.
fn run_turn(
    ctx: &mut EncounterContext,
    provider: &ScriptedProvider,
    executor: &mut ScriptedExecutor,
) -> (Vec<TickOutcome>, EndTurnReason) {
    init_tracing();
    let mut outcomes = Vec::new();
    for _ in 0..100 {
        let outcome = ctx.tick(provider, executor, ME);
        outcomes.push(outcome);
        if let TickOutcome::EndTurn(reason) = outcome {
            return (outcomes, reason);
        }
    }
    panic!("turn never ended: {outcomes:?}");
}

#[test]
fn full_turn_attacks_then_completes() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    let provider = ScriptedProvider::repeating(melee_situation());
    let mut executor = ScriptedExecutor::succeeding();

    let (_, reason) = run_turn(&mut ctx, &provider, &mut executor);
    assert_eq!(reason, EndTurnReason::PlanComplete);

    let kinds = executor.issued_kinds();
    assert!(
        kinds
            .iter()
            .any(|k| matches!(k, ActionKind::AbilityAttack | ActionKind::BasicAttack)),
        "expected an attack step, got {kinds:?}",
    );
    // Turn state is discarded once the turn ends.
    assert!(ctx.active_plan(ME).is_none());
}

#[test]
fn zero_enemies_ends_the_turn_without_acting() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    let mut sit = melee_situation();
    sit.enemies.clear();
    sit.best_target = None;
    let provider = ScriptedProvider::repeating(sit);
    let mut executor = ScriptedExecutor::succeeding();

    let (outcomes, reason) = run_turn(&mut ctx, &provider, &mut executor);
    assert_eq!(reason, EndTurnReason::PlanComplete);
    assert_eq!(outcomes.len(), 1);
    assert!(executor.issued_kinds().is_empty());
}

#[test]
fn failing_step_retries_three_times_then_is_skipped() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    let provider = ScriptedProvider::repeating(melee_situation());
    let mut executor = ScriptedExecutor::with_results(vec![
        ExecutionResult::Failure,
        ExecutionResult::Failure,
        ExecutionResult::Failure,
    ]);

    let (_, reason) = run_turn(&mut ctx, &provider, &mut executor);
    assert_eq!(reason, EndTurnReason::PlanComplete);

    // The same attack step was issued exactly three times before the
    // cursor advanced past it; EndTurn steps are never issued.
    let kinds = executor.issued_kinds();
    assert_eq!(kinds.len(), 3);
    assert!(kinds.iter().all(|k| k.is_attack()));
}

#[test]
fn consecutive_failure_budget_forces_end_turn() {
    let mut cfg = TuningConfig::default();
    cfg.max_consecutive_failures = 2;
    cfg.max_step_attempts = 10; // keep retrying the same step
    let mut ctx = EncounterContext::new(cfg);
    let provider = ScriptedProvider::repeating(melee_situation());
    let mut executor = ScriptedExecutor::with_results(vec![ExecutionResult::Failure; 10]);

    let (_, reason) = run_turn(&mut ctx, &provider, &mut executor);
    assert_eq!(reason, EndTurnReason::FailureBudget);
    assert_eq!(executor.issued_kinds().len(), 2);
}

#[test]
fn step_budget_forces_end_turn() {
    let mut cfg = TuningConfig::default();
    cfg.max_steps_per_turn = 1;
    let mut ctx = EncounterContext::new(cfg);
    // Swift buff plus attack would make two steps; budget allows one.
    let mut sit = melee_situation();
    let mut haste = AbilityTags::new(TimingKind::Buff);
    haste.swift_action = true;
    sit.buffs.push(Ability::new(AbilityId(40), haste));
    let provider = ScriptedProvider::repeating(sit);
    let mut executor = ScriptedExecutor::succeeding();

    let (_, reason) = run_turn(&mut ctx, &provider, &mut executor);
    assert_eq!(reason, EndTurnReason::StepBudget);
    assert_eq!(executor.issued_kinds().len(), 1);
}

#[test]
fn busy_executor_times_out_after_the_wait_budget() {
    let mut cfg = TuningConfig::default();
    cfg.max_wait_ticks = 3;
    let mut ctx = EncounterContext::new(cfg);
    let provider = ScriptedProvider::repeating(melee_situation());
    let mut executor = ScriptedExecutor::busy_for(50);

    let (outcomes, reason) = run_turn(&mut ctx, &provider, &mut executor);
    assert_eq!(reason, EndTurnReason::WaitTimeout);
    assert_eq!(
        outcomes[..outcomes.len() - 1]
            .iter()
            .filter(|o| **o == TickOutcome::Waiting)
            .count(),
        2,
    );
    assert!(executor.issued_kinds().is_empty());
}

#[test]
fn hp_drop_triggers_a_replan() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    let healthy = melee_situation();
    let mut wounded = melee_situation();
    wounded.me.health = HealthMeter::new(55.0, 100.0); // 90% -> 55%, past 20 pp
    let provider = ScriptedProvider::sequence(vec![Some(healthy), Some(wounded)]);
    let mut executor = ScriptedExecutor::succeeding();

    let (outcomes, reason) = run_turn(&mut ctx, &provider, &mut executor);
    assert_eq!(reason, EndTurnReason::PlanComplete);
    assert!(outcomes.contains(&TickOutcome::Replanned));
}

#[test]
fn replanning_is_bounded_at_the_budget() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    // Every frame displaces the combatant by more than the position drift
    // threshold, so each validation wants a replan.
    let frames: Vec<Option<Situation>> = (0..40)
        .map(|i| {
            let mut sit = melee_situation();
            sit.me.position = Position::new(i as f32 * 6.0, 0.0);
            Some(sit)
        })
        .collect();
    let provider = ScriptedProvider::sequence(frames);
    let mut executor = ScriptedExecutor::succeeding();

    let (outcomes, _) = run_turn(&mut ctx, &provider, &mut executor);
    let replans = outcomes
        .iter()
        .filter(|o| **o == TickOutcome::Replanned)
        .count();
    assert_eq!(replans as u32, TuningConfig::DEFAULT_MAX_REPLANS);
}

#[test]
fn host_end_turn_abandons_the_plan() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    let provider = ScriptedProvider::repeating(melee_situation());
    let mut executor = ScriptedExecutor::with_results(vec![ExecutionResult::EndTurn]);

    let (_, reason) = run_turn(&mut ctx, &provider, &mut executor);
    assert_eq!(reason, EndTurnReason::HostEnded);
    assert!(ctx.active_plan(ME).is_none());
}

#[test]
fn missing_situation_reads_as_no_viable_action() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    let provider = ScriptedProvider::sequence(vec![None]);
    let mut executor = ScriptedExecutor::succeeding();

    let outcome = ctx.tick(&provider, &mut executor, ME);
    assert_eq!(
        outcome,
        TickOutcome::EndTurn(EndTurnReason::NoViableAction),
    );
}

#[test]
fn forced_replan_needs_an_active_plan() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    let provider = ScriptedProvider::repeating(melee_situation());

    let err = ctx.force_replan(&provider, ME).unwrap_err();
    assert!(matches!(err, RuntimeError::NoActivePlan(id) if id == ME));
}

#[test]
fn forced_replan_without_a_situation_surfaces_the_provider_gap() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    let provider = ScriptedProvider::sequence(vec![Some(melee_situation()), None]);
    let mut executor = ScriptedExecutor::succeeding();

    // First tick builds the plan off the one good frame.
    ctx.tick(&provider, &mut executor, ME);
    let err = ctx.force_replan(&provider, ME).unwrap_err();
    assert!(matches!(err, RuntimeError::SituationUnavailable(id) if id == ME));
}

#[test]
fn forced_replan_rebuilds_until_the_budget_is_spent() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    let provider = ScriptedProvider::repeating(melee_situation());
    let mut executor = ScriptedExecutor::succeeding();

    ctx.tick(&provider, &mut executor, ME);
    for _ in 0..TuningConfig::DEFAULT_MAX_REPLANS {
        ctx.force_replan(&provider, ME).unwrap();
    }
    let err = ctx.force_replan(&provider, ME).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Plan(PlanError::ReplanBudgetExhausted { .. }),
    ));
    assert_eq!(
        ctx.active_plan(ME).unwrap().replan_count,
        TuningConfig::DEFAULT_MAX_REPLANS,
    );
}

#[test]
fn choose_action_picks_an_attack_for_melee_dps() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    let provider = ScriptedProvider::repeating(melee_situation());
    let choice = ctx.choose_action(&provider, ME);
    assert!(choice.kind.is_attack());
    assert_eq!(choice.target, Some(ORC));
}

#[test]
fn choose_action_without_a_situation_degrades_to_end_turn() {
    let mut ctx = EncounterContext::new(TuningConfig::default());
    let provider = ScriptedProvider::sequence(vec![None]);
    let choice = ctx.choose_action(&provider, ME);
    assert_eq!(choice.kind, ActionKind::EndTurn);
}

#[test]
fn decision_trace_ranks_attack_above_end_turn() {
    let ctx = EncounterContext::new(TuningConfig::default());
    let provider = ScriptedProvider::repeating(melee_situation());
    let trace = ctx.decision_trace(&provider, ME);
    assert!(!trace.is_empty());
    assert!(trace[0].0.kind.is_attack());
    let end_turn_rank = trace
        .iter()
        .position(|(c, _)| c.kind == ActionKind::EndTurn)
        .unwrap();
    assert!(end_turn_rank > 0);
}
