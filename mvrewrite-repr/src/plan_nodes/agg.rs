// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::macros::define_plan_node;
use super::predicates::{AggFuncPred, ListPred};
use super::{ArcMvPlanNode, MvNodeType, MvPlanNode, MvReprPlanNode, MvReprPredNode};

/// Grouped aggregation. Outputs the group keys followed by one column per aggregate call.
#[derive(Clone, Debug)]
pub struct LogicalAgg(pub ArcMvPlanNode);

define_plan_node!(
    LogicalAgg : MvPlanNode,
    Agg, [
        { 0, child: ArcMvPlanNode }
    ], [
        { 0, exprs: ListPred },
        { 1, groups: ListPred }
    ]
);

impl LogicalAgg {
    /// The aggregate calls, in output order. Entries that are not calls are skipped.
    pub fn agg_calls(&self) -> Vec<AggFuncPred> {
        self.exprs()
            .to_vec()
            .into_iter()
            .filter_map(AggFuncPred::from_pred_node)
            .collect()
    }

    pub fn is_global(&self) -> bool {
        self.groups().is_empty()
    }
}
