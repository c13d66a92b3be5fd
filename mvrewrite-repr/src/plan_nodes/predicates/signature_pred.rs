// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use itertools::Itertools;
use mvrewrite_core::nodes::Value;
use pretty_xmlish::Pretty;

use super::{DataTypePred, ListPred};
use crate::functions::ResolvedSignature;
use crate::plan_nodes::{ArcMvPredNode, MvPredNode, MvPredType, MvReprPredNode};

/// A resolved signature stored in the plan: the return type, then the list of argument types.
#[derive(Clone, Debug)]
pub struct SignaturePred(pub ArcMvPredNode);

impl SignaturePred {
    pub fn new(signature: &ResolvedSignature) -> Self {
        let args = signature
            .args
            .iter()
            .map(|typ| DataTypePred::new(*typ).into_pred_node())
            .collect_vec();
        SignaturePred(
            MvPredNode {
                typ: MvPredType::Signature,
                children: vec![
                    DataTypePred::new(signature.ret).into_pred_node(),
                    ListPred::new(args).into_pred_node(),
                ],
                data: Some(Value::Bool(signature.var_args)),
            }
            .into(),
        )
    }

    pub fn signature(&self) -> ResolvedSignature {
        let ret = DataTypePred::from_pred_node(self.0.child(0))
            .unwrap()
            .data_type();
        let args = self
            .0
            .child(1)
            .children
            .iter()
            .map(|arg| DataTypePred::from_pred_node(arg.clone()).unwrap().data_type())
            .collect();
        ResolvedSignature {
            ret,
            args,
            var_args: self.0.unwrap_data().as_bool(),
        }
    }
}

impl MvReprPredNode for SignaturePred {
    fn into_pred_node(self) -> ArcMvPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self> {
        if pred_node.typ != MvPredType::Signature {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::display(&self.signature())
    }
}
