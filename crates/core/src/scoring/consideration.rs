//! Considerations and geometric-mean aggregation.
//!
//! A [`Consideration`] is a single named, [0, 1]-normalized input factor to
//! a decision. A [`ConsiderationSet`] aggregates 6-10 of them into one
//! utility value via the geometric mean, computed in log space for numeric
//! stability.
//!
//! The geometric mean is the load-bearing choice here: any severely
//! unfavorable factor dominates the product multiplicatively, so a fatal
//! flaw cannot be averaged away the way an arithmetic mean would, while
//! non-vetoed candidates still rank smoothly against each other. A factor
//! at or below [`VETO_EPSILON`] short-circuits the whole set to zero.

/// Scores at or below this threshold veto the entire consideration set.
pub const VETO_EPSILON: f64 = 0.001;

/// A single named, clamped [0, 1] decision factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Consideration {
    pub name: &'static str,
    pub score: f64,
}

impl Consideration {
    /// Creates a consideration, clamping the score into [0, 1].
    pub fn new(name: &'static str, score: f64) -> Self {
        Self {
            name,
            score: score.clamp(0.0, 1.0),
        }
    }

    pub fn is_veto(&self) -> bool {
        self.score <= VETO_EPSILON
    }
}

/// How a consideration set folds its factors into one value.
///
/// [`Aggregation::Geometric`] is the default. The other variants are tuning
/// knobs for hosts that want to soften the multiplicative penalty, not
/// alternative primary scoring systems.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aggregation {
    /// Plain geometric mean: `exp(mean(ln(score_i)))`.
    #[default]
    Geometric,
    /// Geometric mean over scores rescaled into `[floor, 1]`, softening the
    /// impact of low (but non-veto) factors. Vetoes still short-circuit.
    Compensated { floor: f64 },
    /// Geometric mean with per-factor exponents, matched by consideration
    /// name. Unlisted factors use exponent 1.0.
    Weighted { exponents: Vec<(String, f64)> },
}

/// Ordered set of considerations for one action candidate.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ConsiderationSet {
    entries: Vec<Consideration>,
}

impl ConsiderationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named factor, clamped to [0, 1].
    pub fn add(&mut self, name: &'static str, score: f64) {
        self.entries.push(Consideration::new(name, score));
    }

    /// Adds a hard-feasibility factor: 0.0 (veto) when `vetoed` holds,
    /// otherwise a neutral 1.0 that leaves the mean untouched.
    pub fn add_veto(&mut self, name: &'static str, vetoed: bool) {
        self.add(name, if vetoed { 0.0 } else { 1.0 });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Consideration] {
        &self.entries
    }

    /// True when any factor sits at or below the veto threshold.
    pub fn is_vetoed(&self) -> bool {
        self.entries.iter().any(Consideration::is_veto)
    }

    /// Geometric mean of all factors, or 0.0 when vetoed or empty.
    ///
    /// Computed as `exp(sum(ln(score_i)) / n)`; with 6-10 factors the naive
    /// product would lose precision long before the log-space sum does.
    pub fn geometric_mean(&self) -> f64 {
        self.aggregate(&Aggregation::Geometric)
    }

    /// Aggregates under the given policy. All variants honor vetoes first.
    pub fn aggregate(&self, policy: &Aggregation) -> f64 {
        if self.entries.is_empty() || self.is_vetoed() {
            return 0.0;
        }

        match policy {
            Aggregation::Geometric => {
                let log_sum: f64 = self.entries.iter().map(|c| c.score.ln()).sum();
                (log_sum / self.entries.len() as f64).exp()
            }
            Aggregation::Compensated { floor } => {
                let floor = floor.clamp(0.0, 0.99);
                let log_sum: f64 = self
                    .entries
                    .iter()
                    .map(|c| (floor + (1.0 - floor) * c.score).ln())
                    .sum();
                (log_sum / self.entries.len() as f64).exp()
            }
            Aggregation::Weighted { exponents } => {
                let mut log_sum = 0.0;
                let mut weight_sum = 0.0;
                for c in &self.entries {
                    let weight = exponents
                        .iter()
                        .find(|(name, _)| name == c.name)
                        .map(|(_, w)| *w)
                        .unwrap_or(1.0);
                    log_sum += weight * c.score.ln();
                    weight_sum += weight;
                }
                if weight_sum <= 0.0 {
                    return 0.0;
                }
                (log_sum / weight_sum).exp()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn veto_yields_zero_mean() {
        let mut set = ConsiderationSet::new();
        set.add("good", 0.9);
        set.add("fatal", 0.0005);
        set.add("fine", 0.8);
        assert!(set.is_vetoed());
        assert_eq!(set.geometric_mean(), 0.0);
    }

    #[test]
    fn veto_free_mean_is_in_unit_interval() {
        let mut set = ConsiderationSet::new();
        set.add("a", 0.9);
        set.add("b", 0.5);
        set.add("c", 0.7);
        let mean = set.geometric_mean();
        assert!(mean > 0.0 && mean <= 1.0, "mean was {mean}");
    }

    #[test]
    fn geometric_mean_matches_closed_form() {
        let mut set = ConsiderationSet::new();
        set.add("a", 0.25);
        set.add("b", 1.0);
        // sqrt(0.25 * 1.0) = 0.5
        assert!((set.geometric_mean() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn low_factor_dominates_unlike_arithmetic_mean() {
        let mut set = ConsiderationSet::new();
        set.add("a", 0.05);
        set.add("b", 1.0);
        set.add("c", 1.0);
        let arithmetic = (0.05 + 1.0 + 1.0) / 3.0;
        assert!(set.geometric_mean() < arithmetic / 1.5);
    }

    #[test]
    fn scores_are_clamped_on_entry() {
        let mut set = ConsiderationSet::new();
        set.add("hot", 3.5);
        set.add("cold", -1.0);
        assert_eq!(set.entries()[0].score, 1.0);
        assert_eq!(set.entries()[1].score, 0.0);
    }

    #[test]
    fn add_veto_is_neutral_when_not_triggered() {
        let mut set = ConsiderationSet::new();
        set.add("a", 0.5);
        set.add_veto("gate", false);
        assert!((set.geometric_mean() - (0.5_f64).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn empty_set_aggregates_to_zero() {
        assert_eq!(ConsiderationSet::new().geometric_mean(), 0.0);
    }

    #[test]
    fn compensated_mean_softens_low_scores() {
        let mut set = ConsiderationSet::new();
        set.add("low", 0.1);
        set.add("high", 0.9);
        let plain = set.geometric_mean();
        let soft = set.aggregate(&Aggregation::Compensated { floor: 0.2 });
        assert!(soft > plain);
        // Vetoes still short-circuit even with a floor.
        set.add_veto("gate", true);
        assert_eq!(set.aggregate(&Aggregation::Compensated { floor: 0.2 }), 0.0);
    }

    #[test]
    fn weighted_mean_respects_exponents() {
        let mut set = ConsiderationSet::new();
        set.add("a", 0.25);
        set.add("b", 1.0);
        let heavy_a = Aggregation::Weighted {
            exponents: vec![("a".to_string(), 3.0)],
        };
        assert!(set.aggregate(&heavy_a) < set.geometric_mean());
    }
}
