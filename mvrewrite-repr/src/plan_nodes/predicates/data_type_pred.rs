// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pretty_xmlish::Pretty;

use super::ConstantType;
use crate::plan_nodes::{ArcMvPredNode, MvPredNode, MvPredType, MvReprPredNode};

#[derive(Clone, Debug)]
pub struct DataTypePred(pub ArcMvPredNode);

impl DataTypePred {
    pub fn new(typ: ConstantType) -> Self {
        DataTypePred(
            MvPredNode {
                typ: MvPredType::DataType(typ),
                children: vec![],
                data: None,
            }
            .into(),
        )
    }

    pub fn data_type(&self) -> ConstantType {
        if let MvPredType::DataType(data_type) = self.0.typ {
            data_type
        } else {
            panic!("not a data type")
        }
    }
}

impl MvReprPredNode for DataTypePred {
    fn into_pred_node(self) -> ArcMvPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, MvPredType::DataType(_)) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::display(&self.data_type())
    }
}
