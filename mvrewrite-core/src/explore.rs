// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Exhaustive rule-driven exploration. Every rule is applied to every subtree of every plan in the
//! search space until no rule produces a new plan or a budget runs out.

mod optimizer;
pub(crate) mod rule_match;

pub use optimizer::{
    Exploration, ExploreOptimizer, ExploreOptions, OptimizerContext, RuleDiagnostic,
};
pub use rule_match::match_and_pick;
