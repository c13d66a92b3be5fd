// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use pretty_xmlish::Pretty;

use super::predicates::ConstantPred;
use super::{new_plan_node, ArcMvPlanNode, MvNodeType, MvReprPlanNode, MvReprPredNode};

fn relation_name(node: &ArcMvPlanNode) -> Arc<str> {
    node.predicates[0].unwrap_data().as_str()
}

#[derive(Clone, Debug)]
pub struct LogicalScan(pub ArcMvPlanNode);

impl MvReprPlanNode for LogicalScan {
    fn into_plan_node(self) -> ArcMvPlanNode {
        self.0
    }

    fn from_plan_node(plan_node: ArcMvPlanNode) -> Option<Self> {
        if plan_node.typ != MvNodeType::Scan {
            return None;
        }
        Some(Self(plan_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::childless_record("LogicalScan", vec![("table", self.table().to_string().into())])
    }
}

impl LogicalScan {
    pub fn new(table: String) -> LogicalScan {
        LogicalScan(new_plan_node(
            MvNodeType::Scan,
            vec![],
            vec![ConstantPred::string(table).into_pred_node()],
        ))
    }

    pub fn table(&self) -> Arc<str> {
        relation_name(&self.0)
    }
}

/// Reads the stored rows of a materialized view. Its output columns are the view's output columns.
#[derive(Clone, Debug)]
pub struct LogicalMvScan(pub ArcMvPlanNode);

impl MvReprPlanNode for LogicalMvScan {
    fn into_plan_node(self) -> ArcMvPlanNode {
        self.0
    }

    fn from_plan_node(plan_node: ArcMvPlanNode) -> Option<Self> {
        if plan_node.typ != MvNodeType::MvScan {
            return None;
        }
        Some(Self(plan_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::childless_record("LogicalMvScan", vec![("view", self.view().to_string().into())])
    }
}

impl LogicalMvScan {
    pub fn new(view: impl AsRef<str>) -> LogicalMvScan {
        LogicalMvScan(new_plan_node(
            MvNodeType::MvScan,
            vec![],
            vec![ConstantPred::string(view).into_pred_node()],
        ))
    }

    pub fn view(&self) -> Arc<str> {
        relation_name(&self.0)
    }
}
