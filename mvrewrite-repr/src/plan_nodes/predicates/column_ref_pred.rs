// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mvrewrite_core::nodes::Value;
use pretty_xmlish::Pretty;

use crate::plan_nodes::{ArcMvPredNode, MvPredNode, MvPredType, MvReprPredNode};

#[derive(Clone, Debug)]
pub struct ColumnRefPred(pub ArcMvPredNode);

impl ColumnRefPred {
    /// Creates a new `ColumnRef` expression.
    pub fn new(column_idx: usize) -> ColumnRefPred {
        // this conversion is always safe since usize is at most u64
        let u64_column_idx = column_idx as u64;
        ColumnRefPred(
            MvPredNode {
                typ: MvPredType::ColumnRef,
                children: vec![],
                data: Some(Value::UInt64(u64_column_idx)),
            }
            .into(),
        )
    }

    /// Gets the column index.
    pub fn index(&self) -> usize {
        self.0.unwrap_data().as_u64() as usize
    }
}

impl MvReprPredNode for ColumnRefPred {
    fn into_pred_node(self) -> ArcMvPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self> {
        if pred_node.typ != MvPredType::ColumnRef {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::display(&format!("#{}", self.index()))
    }
}
