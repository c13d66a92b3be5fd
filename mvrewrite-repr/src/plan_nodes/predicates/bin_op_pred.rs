// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pretty_xmlish::Pretty;

use crate::plan_nodes::{ArcMvPredNode, MvPredNode, MvPredType, MvReprPredNode};

/// Numerical and comparison operators share one type, with is_*() functions to tell them apart.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BinOpType {
    // numerical
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // comparison
    Eq,
    Neq,
    Gt,
    Lt,
    Geq,
    Leq,
}

impl std::fmt::Display for BinOpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl BinOpType {
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Neq | Self::Gt | Self::Lt | Self::Geq | Self::Leq
        )
    }

    pub fn is_commutative(&self) -> bool {
        matches!(self, Self::Add | Self::Mul | Self::Eq | Self::Neq)
    }

    /// The operator that gives the same result with the operands swapped, if any.
    pub fn swapped(&self) -> Option<Self> {
        match self {
            Self::Gt => Some(Self::Lt),
            Self::Lt => Some(Self::Gt),
            Self::Geq => Some(Self::Leq),
            Self::Leq => Some(Self::Geq),
            op if op.is_commutative() => Some(*op),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BinOpPred(pub ArcMvPredNode);

impl BinOpPred {
    pub fn new(left: ArcMvPredNode, right: ArcMvPredNode, op_type: BinOpType) -> Self {
        BinOpPred(
            MvPredNode {
                typ: MvPredType::BinOp(op_type),
                children: vec![left, right],
                data: None,
            }
            .into(),
        )
    }

    pub fn left_child(&self) -> ArcMvPredNode {
        self.0.child(0)
    }

    pub fn right_child(&self) -> ArcMvPredNode {
        self.0.child(1)
    }

    pub fn op_type(&self) -> BinOpType {
        if let MvPredType::BinOp(op_type) = self.0.typ {
            op_type
        } else {
            panic!("not a bin op")
        }
    }
}

impl MvReprPredNode for BinOpPred {
    fn into_pred_node(self) -> ArcMvPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, MvPredType::BinOp(_)) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::simple_record(
            self.op_type().to_string(),
            vec![],
            vec![self.left_child().explain(), self.right_child().explain()],
        )
    }
}
