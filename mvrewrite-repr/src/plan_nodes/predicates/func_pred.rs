// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pretty_xmlish::Pretty;

use super::ListPred;
use crate::functions::ScalarFunction;
use crate::plan_nodes::{ArcMvPredNode, MvPredNode, MvPredType, MvReprPredNode};

/// A scalar function call.
#[derive(Clone, Debug)]
pub struct FuncPred(pub ArcMvPredNode);

impl FuncPred {
    pub fn new(func_id: ScalarFunction, argv: ListPred) -> Self {
        FuncPred(
            MvPredNode {
                typ: MvPredType::Func(func_id),
                children: vec![argv.into_pred_node()],
                data: None,
            }
            .into(),
        )
    }

    /// Gets the i-th argument of the function.
    pub fn arg_at(&self, i: usize) -> ArcMvPredNode {
        self.children().child(i)
    }

    /// Get all children.
    pub fn children(&self) -> ListPred {
        ListPred::from_pred_node(self.0.child(0)).unwrap()
    }

    /// Gets the function id.
    pub fn func(&self) -> ScalarFunction {
        if let MvPredType::Func(func_id) = self.0.typ {
            func_id
        } else {
            panic!("not a function")
        }
    }
}

impl MvReprPredNode for FuncPred {
    fn into_pred_node(self) -> ArcMvPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, MvPredType::Func(_)) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::simple_record(
            self.func().to_string(),
            vec![],
            vec![self.children().explain()],
        )
    }
}
