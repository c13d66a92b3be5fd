// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod ir;

use std::fmt::Display;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, trace, warn};

use crate::nodes::{ArcPlanNode, NodeType};
use crate::optimizer::Optimizer;

pub use ir::RuleMatcher;

pub trait Rule<T: NodeType, O: Optimizer<T>>: 'static + Send + Sync {
    fn matcher(&self) -> &RuleMatcher<T>;
    /// Produces zero or more plans equivalent to `binding`. A rule never fails the whole search:
    /// candidates that cannot be produced are reported in [`RuleOutput::skipped`].
    fn apply(&self, optimizer: &O, binding: ArcPlanNode<T>) -> RuleOutput<T>;
    fn name(&self) -> &'static str;
    fn rule_type(&self) -> T::RuleType;
}

/// A family of rules built together from shared state.
pub trait RuleSet<T: NodeType, O: Optimizer<T>> {
    fn build_rules(&self) -> Vec<Arc<dyn Rule<T, O>>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedCandidate {
    /// Display form of the candidate that was given up on.
    pub candidate: String,
    pub reason: String,
    /// The candidate panicked instead of reporting an error.
    pub fault: bool,
}

#[derive(Clone, Debug)]
pub struct RuleOutput<T: NodeType> {
    pub candidates: Vec<ArcPlanNode<T>>,
    pub skipped: Vec<SkippedCandidate>,
}

impl<T: NodeType> RuleOutput<T> {
    pub fn empty() -> Self {
        Self {
            candidates: vec![],
            skipped: vec![],
        }
    }

    pub fn skipped(candidate: impl Display, reason: impl Display) -> Self {
        Self {
            candidates: vec![],
            skipped: vec![SkippedCandidate {
                candidate: candidate.to_string(),
                reason: reason.to_string(),
                fault: false,
            }],
        }
    }
}

impl<T: NodeType> From<Vec<ArcPlanNode<T>>> for RuleOutput<T> {
    fn from(candidates: Vec<ArcPlanNode<T>>) -> Self {
        Self {
            candidates,
            skipped: vec![],
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs `f` once per candidate and collects every plan it produces. An error or a panic raised
/// while building one candidate only drops that candidate; the others are still returned.
pub fn apply_multi_no_throw<T, C, F>(
    rule: &'static str,
    candidates: impl IntoIterator<Item = C>,
    mut f: F,
) -> RuleOutput<T>
where
    T: NodeType,
    C: Display,
    F: FnMut(&C) -> Result<ArcPlanNode<T>>,
{
    let mut output = RuleOutput::empty();
    for candidate in candidates {
        match std::panic::catch_unwind(AssertUnwindSafe(|| f(&candidate))) {
            Ok(Ok(plan)) => {
                trace!(event = "candidate_produced", rule, candidate = %candidate, plan = %plan);
                output.candidates.push(plan);
            }
            Ok(Err(err)) => {
                debug!(event = "candidate_skipped", rule, candidate = %candidate, reason = %err);
                output.skipped.push(SkippedCandidate {
                    candidate: candidate.to_string(),
                    reason: err.to_string(),
                    fault: false,
                });
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                warn!(event = "candidate_fault", rule, candidate = %candidate, reason = %reason);
                output.skipped.push(SkippedCandidate {
                    candidate: candidate.to_string(),
                    reason,
                    fault: true,
                });
            }
        }
    }
    output
}
