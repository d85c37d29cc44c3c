//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules sequentially and finishes with an explicit
//! tie-breaker, so every selection is deterministic.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::{ProcessDescriptor, RuntimeState};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Lowest original index in the input sequence wins (default).
    #[default]
    InputOrder,
    /// Deterministic by process ID (lexicographic).
    ById,
}

/// A composable rule engine for process selection.
///
/// Rules are applied in sequence: the next rule is consulted only when
/// all previous rules tie. When every rule ties, the final
/// [`TieBreaker`] decides.
///
/// # Example
/// ```
/// use cpu_sched::dispatching::{rules, RuleEngine, TieBreaker};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Priority)
///     .with_rule(rules::Sjf)
///     .with_final_tie_breaker(TieBreaker::InputOrder);
/// assert_eq!(engine.rule_names(), vec!["PRIORITY", "SJF"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule to the evaluation chain.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts candidate indices by priority (highest priority first).
    ///
    /// `candidates` are indices into `processes` and `states`.
    pub fn sort_indices(
        &self,
        candidates: &[usize],
        processes: &[ProcessDescriptor],
        states: &[RuntimeState],
        context: &SchedulingContext,
    ) -> Vec<usize> {
        let mut indices = candidates.to_vec();
        indices.sort_by(|&a, &b| self.compare(a, b, processes, states, context));
        indices
    }

    /// Returns the index of the highest-priority candidate.
    pub fn select_best(
        &self,
        candidates: &[usize],
        processes: &[ProcessDescriptor],
        states: &[RuntimeState],
        context: &SchedulingContext,
    ) -> Option<usize> {
        candidates.iter().copied().reduce(|best, next| {
            match self.compare(next, best, processes, states, context) {
                Ordering::Less => next,
                _ => best,
            }
        })
    }

    /// Evaluates a single process and returns the score from each rule.
    pub fn evaluate(
        &self,
        process: &ProcessDescriptor,
        state: &RuntimeState,
        context: &SchedulingContext,
    ) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(process, state, context))
            .collect()
    }

    fn compare(
        &self,
        a: usize,
        b: usize,
        processes: &[ProcessDescriptor],
        states: &[RuntimeState],
        context: &SchedulingContext,
    ) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(&processes[a], &states[a], context);
            let score_b = rule.evaluate(&processes[b], &states[b], context);
            if score_a != score_b {
                return score_a.cmp(&score_b);
            }
        }

        // All rules tied
        match self.tie_breaker {
            TieBreaker::InputOrder => a.cmp(&b),
            TieBreaker::ById => processes[a].id.cmp(&processes[b].id).then(a.cmp(&b)),
        }
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
