// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fmt::Display;

use pretty_xmlish::Pretty;

use crate::plan_nodes::{ArcMvPredNode, MvPredNode, MvPredType, MvReprPredNode};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum LogOpType {
    And,
    Or,
}

impl Display for LogOpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Clone, Debug)]
pub struct LogOpPred(pub ArcMvPredNode);

impl LogOpPred {
    pub fn new(op_type: LogOpType, preds: Vec<ArcMvPredNode>) -> Self {
        LogOpPred(
            MvPredNode {
                typ: MvPredType::LogOp(op_type),
                children: preds,
                data: None,
            }
            .into(),
        )
    }

    /// Flattens directly nested operators of the same type, eg. (a AND (b AND c)) => AND(a, b, c).
    /// Assumes the children are already flattened, so it can only be used bottom up.
    pub fn new_flattened_nested_logical(op: LogOpType, preds: Vec<ArcMvPredNode>) -> Self {
        let mut new_preds = Vec::with_capacity(preds.len());
        for child in preds {
            if child.typ == MvPredType::LogOp(op) {
                new_preds.extend(child.children.iter().cloned());
                continue;
            }
            new_preds.push(child);
        }
        LogOpPred::new(op, new_preds)
    }

    /// Joins `conjuncts` with AND. A single conjunct is returned as-is.
    pub fn conjunction(mut conjuncts: Vec<ArcMvPredNode>) -> ArcMvPredNode {
        if conjuncts.len() == 1 {
            return conjuncts.remove(0);
        }
        Self::new_flattened_nested_logical(LogOpType::And, conjuncts).into_pred_node()
    }

    pub fn children(&self) -> Vec<ArcMvPredNode> {
        self.0.children.clone()
    }

    pub fn child(&self, idx: usize) -> ArcMvPredNode {
        self.0.child(idx)
    }

    pub fn op_type(&self) -> LogOpType {
        if let MvPredType::LogOp(op_type) = self.0.typ {
            op_type
        } else {
            panic!("not a log op")
        }
    }
}

impl MvReprPredNode for LogOpPred {
    fn into_pred_node(self) -> ArcMvPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, MvPredType::LogOp(_)) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::simple_record(
            self.op_type().to_string(),
            vec![],
            self.0.children.iter().map(|x| x.explain()).collect(),
        )
    }
}
