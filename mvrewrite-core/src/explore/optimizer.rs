// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use anyhow::{Context, Result};
use itertools::Itertools;
use tracing::{debug, trace};

use super::rule_match::{match_and_pick, replace_at, subtrees};
use crate::nodes::{ArcPlanNode, NodeType};
use crate::optimizer::Optimizer;
use crate::property::{PropertyBuilder, PropertyBuilderAny};
use crate::rules::{Rule, SkippedCandidate};

pub type RuleId = usize;

#[derive(Clone, Debug)]
pub struct ExploreOptions {
    /// Stop adding plans once the search space holds this many, the input included.
    pub max_alternatives: usize,
    /// Stop applying rules after this many applications.
    pub max_rule_applications: usize,
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self {
            max_alternatives: 64,
            max_rule_applications: 1024,
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct OptimizerContext {
    pub rules_applied: usize,
    pub budget_used: bool,
}

/// A candidate some rule gave up on, kept for diagnostics.
#[derive(Clone, Debug)]
pub struct RuleDiagnostic<T: NodeType> {
    pub rule_type: T::RuleType,
    pub rule_name: &'static str,
    pub skipped: SkippedCandidate,
}

#[derive(Clone, Debug)]
pub struct Exploration<T: NodeType> {
    /// Every distinct plan in the search space. The input plan is always at index 0.
    pub alternatives: Vec<ArcPlanNode<T>>,
    pub diagnostics: Vec<RuleDiagnostic<T>>,
    pub budget_used: bool,
}

impl<T: NodeType> Exploration<T> {
    pub fn original(&self) -> &ArcPlanNode<T> {
        &self.alternatives[0]
    }

    /// Plans produced by rules, in discovery order.
    pub fn rewritten(&self) -> &[ArcPlanNode<T>] {
        &self.alternatives[1..]
    }
}

pub struct ExploreOptimizer<T: NodeType> {
    rules: Arc<[Arc<dyn Rule<T, Self>>]>,
    disabled_rules: HashSet<T::RuleType>,
    property_builders: Arc<[Box<dyn PropertyBuilderAny<T>>]>,
    properties: HashMap<ArcPlanNode<T>, Arc<[Box<dyn Any + Send + Sync + 'static>]>>,
    /// Plans each rule produced for a subtree. A rule fires at most once per distinct subtree; later
    /// occurrences of the subtree reuse the recorded plans.
    rule_outputs: HashMap<(ArcPlanNode<T>, RuleId), Arc<[ArcPlanNode<T>]>>,
    ctx: OptimizerContext,
    pub prop: ExploreOptions,
}

impl<T: NodeType> ExploreOptimizer<T> {
    pub fn new_with_rules(
        rules: Vec<Arc<dyn Rule<T, Self>>>,
        property_builders: Arc<[Box<dyn PropertyBuilderAny<T>>]>,
        prop: ExploreOptions,
    ) -> Self {
        Self {
            rules: rules.into(),
            disabled_rules: HashSet::new(),
            property_builders,
            properties: HashMap::new(),
            rule_outputs: HashMap::new(),
            ctx: OptimizerContext::default(),
            prop,
        }
    }

    pub fn rules(&self) -> Arc<[Arc<dyn Rule<T, Self>>]> {
        self.rules.clone()
    }

    pub fn disable_rule(&mut self, rule_type: T::RuleType) {
        self.disabled_rules.insert(rule_type);
    }

    pub fn enable_rule(&mut self, rule_type: T::RuleType) {
        self.disabled_rules.remove(&rule_type);
    }

    pub fn is_rule_disabled(&self, rule_type: T::RuleType) -> bool {
        self.disabled_rules.contains(&rule_type)
    }

    pub fn ctx(&self) -> &OptimizerContext {
        &self.ctx
    }

    pub fn property_builders(&self) -> &[Box<dyn PropertyBuilderAny<T>>] {
        &self.property_builders
    }

    fn is_rule_fired(&self, node: &ArcPlanNode<T>, rule_id: RuleId) -> bool {
        self.rule_outputs.contains_key(&(node.clone(), rule_id))
    }

    /// Derives and caches every property of `root_rel` and its descendants.
    pub fn infer_properties(&mut self, root_rel: ArcPlanNode<T>) -> Result<()> {
        if self.properties.contains_key(&root_rel) {
            return Ok(());
        }

        let mut child_properties = Vec::with_capacity(root_rel.children.len());
        for child in &root_rel.children {
            self.infer_properties(child.clone())?;
            let props = self
                .properties
                .get(child)
                .cloned()
                .with_context(|| format!("cannot obtain properties for {}", child))?;
            child_properties.push(props);
        }
        let mut props = Vec::with_capacity(self.property_builders.len());
        for (id, builder) in self.property_builders.iter().enumerate() {
            let child_properties = child_properties
                .iter()
                .map(|x| x[id].as_ref() as &dyn Any)
                .collect_vec();
            let prop = builder
                .derive_any(
                    root_rel.typ.clone(),
                    &root_rel.predicates,
                    child_properties.as_slice(),
                )
                .with_context(|| {
                    format!("cannot derive {} of {}", builder.property_name(), root_rel)
                })?;
            props.push(prop);
        }
        self.properties.insert(root_rel, props.into());
        Ok(())
    }

    fn explore_inner(&mut self, root_rel: ArcPlanNode<T>) -> Result<Exploration<T>> {
        self.ctx = OptimizerContext::default();
        self.rule_outputs.clear();
        let rules = self.rules.clone();
        let mut alternatives = vec![root_rel.clone()];
        let mut seen = HashSet::from([root_rel.clone()]);
        let mut queue = VecDeque::from([root_rel]);
        let mut diagnostics = Vec::new();

        'search: while let Some(plan) = queue.pop_front() {
            for (path, node) in subtrees(&plan) {
                for (rule_id, rule) in rules.iter().enumerate() {
                    if self.is_rule_disabled(rule.rule_type()) {
                        continue;
                    }
                    let produced = if let Some(produced) =
                        self.rule_outputs.get(&(node.clone(), rule_id))
                    {
                        produced.clone()
                    } else {
                        let Some(binding) = match_and_pick(rule.matcher(), node.clone()) else {
                            continue;
                        };
                        if self.ctx.rules_applied >= self.prop.max_rule_applications {
                            trace!(
                                event = "budget_exhausted",
                                rules_applied = self.ctx.rules_applied
                            );
                            self.ctx.budget_used = true;
                            break 'search;
                        }
                        let produced = self.fire_rule(rule, rule_id, binding, &mut diagnostics);
                        self.rule_outputs
                            .insert((node.clone(), rule_id), produced.clone());
                        produced
                    };
                    for candidate in produced.iter() {
                        let new_plan = replace_at(&plan, &path, candidate.clone());
                        if seen.contains(&new_plan) {
                            continue;
                        }
                        if alternatives.len() >= self.prop.max_alternatives {
                            trace!(event = "budget_exhausted", alternatives = alternatives.len());
                            self.ctx.budget_used = true;
                            break 'search;
                        }
                        trace!(event = "new_alternative", rule = rule.name(), plan = %new_plan);
                        seen.insert(new_plan.clone());
                        alternatives.push(new_plan.clone());
                        queue.push_back(new_plan);
                    }
                }
            }
        }

        Ok(Exploration {
            alternatives,
            diagnostics,
            budget_used: self.ctx.budget_used,
        })
    }

    fn fire_rule(
        &mut self,
        rule: &Arc<dyn Rule<T, Self>>,
        rule_id: RuleId,
        binding: ArcPlanNode<T>,
        diagnostics: &mut Vec<RuleDiagnostic<T>>,
    ) -> Arc<[ArcPlanNode<T>]> {
        debug_assert!(!self.is_rule_fired(&binding, rule_id));
        // Properties only matter for applying rules, therefore deriving them right before each rule invoke.
        if let Err(err) = self.infer_properties(binding.clone()) {
            debug!(event = "property_derivation_failed", rule = rule.name(), binding = %binding, error = %err);
            diagnostics.push(RuleDiagnostic {
                rule_type: rule.rule_type(),
                rule_name: rule.name(),
                skipped: SkippedCandidate {
                    candidate: binding.to_string(),
                    reason: format!("{err:#}"),
                    fault: false,
                },
            });
            return Vec::new().into();
        }
        trace!(event = "apply_rule", rule_id, rule = rule.name(), binding = %binding);
        let output = rule.apply(self, binding);
        self.ctx.rules_applied += 1;
        diagnostics.extend(output.skipped.into_iter().map(|skipped| RuleDiagnostic {
            rule_type: rule.rule_type(),
            rule_name: rule.name(),
            skipped,
        }));
        output.candidates.into()
    }
}

impl<T: NodeType> Optimizer<T> for ExploreOptimizer<T> {
    fn explore(&mut self, root_rel: ArcPlanNode<T>) -> Result<Exploration<T>> {
        self.explore_inner(root_rel)
    }

    fn get_property<P: PropertyBuilder<T>>(
        &self,
        root_rel: ArcPlanNode<T>,
        idx: usize,
    ) -> Result<P::Prop> {
        let props = self
            .properties
            .get(&root_rel)
            .with_context(|| format!("cannot obtain properties for {}", root_rel))?;
        let prop = props
            .get(idx)
            .with_context(|| format!("no property at idx {}", idx))?
            .as_ref();
        prop.downcast_ref::<P::Prop>()
            .with_context(|| {
                format!(
                    "cannot downcast property at idx {} into provided property instance",
                    idx
                )
            })
            .cloned()
    }
}
