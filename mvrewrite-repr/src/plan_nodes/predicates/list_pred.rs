// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use itertools::Itertools;
use pretty_xmlish::Pretty;

use crate::plan_nodes::{ArcMvPredNode, MvPredNode, MvPredType, MvReprPredNode};

#[derive(Clone, Debug)]
pub struct ListPred(pub ArcMvPredNode);

impl ListPred {
    pub fn new(preds: Vec<ArcMvPredNode>) -> Self {
        ListPred(
            MvPredNode {
                typ: MvPredType::List,
                children: preds,
                data: None,
            }
            .into(),
        )
    }

    /// Gets number of expressions in the list
    pub fn len(&self) -> usize {
        self.0.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.children.is_empty()
    }

    pub fn child(&self, idx: usize) -> ArcMvPredNode {
        self.0.child(idx)
    }

    pub fn to_vec(&self) -> Vec<ArcMvPredNode> {
        self.0.children.clone()
    }
}

impl MvReprPredNode for ListPred {
    fn into_pred_node(self) -> ArcMvPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self> {
        if pred_node.typ != MvPredType::List {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::Array(self.0.children.iter().map(|x| x.explain()).collect_vec())
    }
}
