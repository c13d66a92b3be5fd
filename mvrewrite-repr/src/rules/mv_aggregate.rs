// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use mvrewrite_core::optimizer::Optimizer;
use mvrewrite_core::rules::{Rule, RuleMatcher, RuleOutput, RuleSet};

use super::macros::define_matcher;
use super::MvRuleType;
use crate::mv::MvAggregateRewriter;
use crate::plan_nodes::{ArcMvPlanNode, MvNodeType};
use crate::OptimizerExt;

/// Replaces the aggregate under an optional filter and projection with a scan of a materialized
/// view, one plan per usable view.
pub struct MvAggregateRule {
    rule_type: MvRuleType,
    matcher: RuleMatcher<MvNodeType>,
    rewriter: Arc<MvAggregateRewriter>,
}

impl MvAggregateRule {
    pub fn new(rule_type: MvRuleType, rewriter: Arc<MvAggregateRewriter>) -> Self {
        use MvNodeType::*;
        let matcher = match rule_type {
            MvRuleType::MaterializedViewFilterProjectAggregate => {
                define_matcher!((Filter, (Projection, (Agg, logical))))
            }
            MvRuleType::MaterializedViewProjectAggregate => {
                define_matcher!((Projection, (Agg, logical)))
            }
            MvRuleType::MaterializedViewFilterAggregate => define_matcher!((Filter, (Agg, logical))),
            MvRuleType::MaterializedViewAggregate => define_matcher!((Agg, logical)),
        };
        Self {
            rule_type,
            matcher,
            rewriter,
        }
    }
}

impl<O: Optimizer<MvNodeType>> Rule<MvNodeType, O> for MvAggregateRule {
    fn matcher(&self) -> &RuleMatcher<MvNodeType> {
        &self.matcher
    }

    fn apply(&self, optimizer: &O, binding: ArcMvPlanNode) -> RuleOutput<MvNodeType> {
        let expected = match optimizer.get_schema_of(binding.clone()) {
            Ok(schema) => schema,
            Err(err) => return RuleOutput::skipped(&binding, format!("{err:#}")),
        };
        self.rewriter
            .rewrite(self.rule_type.name(), &binding, &expected)
    }

    fn name(&self) -> &'static str {
        self.rule_type.name()
    }

    fn rule_type(&self) -> MvRuleType {
        self.rule_type
    }
}

/// The four aggregate shapes a view can replace, sharing one rewriter.
pub struct MaterializedViewAggregateRules {
    rewriter: Arc<MvAggregateRewriter>,
}

impl MaterializedViewAggregateRules {
    pub fn new(rewriter: MvAggregateRewriter) -> Self {
        Self {
            rewriter: Arc::new(rewriter),
        }
    }
}

impl<O: Optimizer<MvNodeType>> RuleSet<MvNodeType, O> for MaterializedViewAggregateRules {
    fn build_rules(&self) -> Vec<Arc<dyn Rule<MvNodeType, O>>> {
        MvRuleType::ALL
            .iter()
            .map(|rule_type| {
                Arc::new(MvAggregateRule::new(*rule_type, self.rewriter.clone()))
                    as Arc<dyn Rule<MvNodeType, O>>
            })
            .collect()
    }
}
