// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::macros::define_plan_node;
use super::predicates::ListPred;
use super::{ArcMvPlanNode, MvNodeType, MvPlanNode, MvReprPlanNode};

#[derive(Clone, Debug)]
pub struct LogicalProjection(pub ArcMvPlanNode);

define_plan_node!(
    LogicalProjection : MvPlanNode,
    Projection, [
        { 0, child: ArcMvPlanNode }
    ], [
        { 0, exprs: ListPred }
    ]
);
