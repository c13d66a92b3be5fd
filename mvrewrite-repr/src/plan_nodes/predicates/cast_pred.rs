// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pretty_xmlish::Pretty;

use super::data_type_pred::DataTypePred;
use super::ConstantType;
use crate::plan_nodes::{ArcMvPredNode, MvPredNode, MvPredType, MvReprPredNode};

#[derive(Clone, Debug)]
pub struct CastPred(pub ArcMvPredNode);

impl CastPred {
    pub fn new(child: ArcMvPredNode, cast_to: ConstantType) -> Self {
        CastPred(
            MvPredNode {
                typ: MvPredType::Cast,
                children: vec![child, DataTypePred::new(cast_to).into_pred_node()],
                data: None,
            }
            .into(),
        )
    }

    pub fn child(&self) -> ArcMvPredNode {
        self.0.child(0)
    }

    pub fn cast_to(&self) -> ConstantType {
        DataTypePred::from_pred_node(self.0.child(1))
            .unwrap()
            .data_type()
    }
}

impl MvReprPredNode for CastPred {
    fn into_pred_node(self) -> ArcMvPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, MvPredType::Cast) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::simple_record(
            "Cast",
            vec![
                ("cast_to", format!("{}", self.cast_to()).into()),
                ("child", self.child().explain()),
            ],
            vec![],
        )
    }
}
