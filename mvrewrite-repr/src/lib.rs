// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::new_without_default)]

use std::sync::Arc;

use anyhow::Result;
use config::MvRewriteConfig;
use mv::{MaterializedViewCatalog, MvAggregateRewriter};
use mvrewrite_core::explore::{Exploration, ExploreOptimizer};
pub use mvrewrite_core::nodes::Value;
use mvrewrite_core::optimizer::Optimizer;
use mvrewrite_core::property::PropertyBuilderAny;
use mvrewrite_core::rules::{Rule, RuleSet};
pub use optimizer_ext::OptimizerExt;
use plan_nodes::{ArcMvPlanNode, MvNodeType};
use properties::schema::{Catalog, SchemaPropertyBuilder};
use rules::{MaterializedViewAggregateRules, MvRuleType};
use tracing::debug;

pub mod config;
pub mod error;
pub mod functions;
pub mod mv;
mod optimizer_ext;
pub mod plan_nodes;
pub mod properties;
pub mod rules;

#[cfg(test)]
mod testing;

/// Binds plans and explores their materialized view rewrites.
pub struct MvOptimizer {
    optimizer: ExploreOptimizer<MvNodeType>,
    catalog: Arc<dyn Catalog>,
}

impl MvOptimizer {
    pub fn default_rules(
        rewriter: MvAggregateRewriter,
    ) -> Vec<Arc<dyn Rule<MvNodeType, ExploreOptimizer<MvNodeType>>>> {
        MaterializedViewAggregateRules::new(rewriter).build_rules()
    }

    /// `catalog` resolves base tables and views alike. `views` picks the candidate views for each
    /// aggregate.
    pub fn new(
        catalog: Arc<dyn Catalog>,
        views: Arc<dyn MaterializedViewCatalog>,
        config: &MvRewriteConfig,
    ) -> Self {
        let rewriter = MvAggregateRewriter::new(catalog.clone(), views, config.allow_rollup);
        let property_builders: Arc<[Box<dyn PropertyBuilderAny<MvNodeType>>]> =
            Arc::new([Box::new(SchemaPropertyBuilder::new(catalog.clone()))]);
        let mut optimizer = ExploreOptimizer::new_with_rules(
            Self::default_rules(rewriter),
            property_builders,
            config.explore_options(),
        );
        for rule_type in MvRuleType::ALL {
            if !config.is_rule_enabled(*rule_type) {
                debug!(event = "rule_disabled", rule = rule_type.name());
                optimizer.disable_rule(*rule_type);
            }
        }
        Self { optimizer, catalog }
    }

    /// Resolves the signatures of every call in `root_rel` and inserts the casts they need.
    pub fn bind(&self, root_rel: &ArcMvPlanNode) -> Result<ArcMvPlanNode> {
        Ok(functions::bind_plan(self.catalog.as_ref(), root_rel)?)
    }

    /// Binds `root_rel` and returns it followed by every rewrite found for it.
    pub fn explore(&mut self, root_rel: &ArcMvPlanNode) -> Result<Exploration<MvNodeType>> {
        let bound = self.bind(root_rel)?;
        let exploration = self.optimizer.explore(bound)?;
        debug!(
            event = "explore_done",
            alternatives = exploration.alternatives.len(),
            diagnostics = exploration.diagnostics.len(),
            rules_applied = self.optimizer.ctx().rules_applied,
        );
        Ok(exploration)
    }

    pub fn explore_optimizer(&self) -> &ExploreOptimizer<MvNodeType> {
        &self.optimizer
    }

    pub fn explore_optimizer_mut(&mut self) -> &mut ExploreOptimizer<MvNodeType> {
        &mut self.optimizer
    }
}
