// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mvrewrite_core::explore::ExploreOptions;
use serde::{Deserialize, Serialize};

use crate::rules::MvRuleType;

/// Session settings of the materialized view rewrite. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MvRewriteConfig {
    /// Turns off every materialized view rule when false.
    pub enable_materialized_view_rewrite: bool,
    /// Allow views grouped finer than the query, re-aggregating their rows.
    pub allow_rollup: bool,
    pub max_alternatives: usize,
    pub max_rule_applications: usize,
    pub disabled_rules: Vec<MvRuleType>,
}

impl Default for MvRewriteConfig {
    fn default() -> Self {
        let explore = ExploreOptions::default();
        Self {
            enable_materialized_view_rewrite: true,
            allow_rollup: true,
            max_alternatives: explore.max_alternatives,
            max_rule_applications: explore.max_rule_applications,
            disabled_rules: vec![],
        }
    }
}

impl MvRewriteConfig {
    pub fn explore_options(&self) -> ExploreOptions {
        ExploreOptions {
            max_alternatives: self.max_alternatives,
            max_rule_applications: self.max_rule_applications,
        }
    }

    pub fn is_rule_enabled(&self, rule_type: MvRuleType) -> bool {
        self.enable_materialized_view_rewrite && !self.disabled_rules.contains(&rule_type)
    }
}
