// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod agg_func_pred;
mod bin_op_pred;
mod cast_pred;
mod column_ref_pred;
mod constant_pred;
mod data_type_pred;
mod func_pred;
mod list_pred;
mod log_op_pred;
mod signature_pred;
mod un_op_pred;

pub use agg_func_pred::{AggFuncPred, AggFuncType};
pub use bin_op_pred::{BinOpPred, BinOpType};
pub use cast_pred::CastPred;
pub use column_ref_pred::ColumnRefPred;
pub use constant_pred::{ConstantPred, ConstantType};
pub use data_type_pred::DataTypePred;
pub use func_pred::FuncPred;
use itertools::Itertools;
pub use list_pred::ListPred;
pub use log_op_pred::{LogOpPred, LogOpType};
pub use signature_pred::SignaturePred;
pub use un_op_pred::{UnOpPred, UnOpType};

use super::{ArcMvPredNode, MvReprPredNode};

pub trait PredExt {
    /// Recursively replaces every column reference in the expression with the expression returned
    /// by `substitute_fn` for its index. If any column maps to None, the whole substitution fails
    /// and None is returned.
    fn substitute_column_refs(
        &self,
        substitute_fn: impl FnMut(usize) -> Option<ArcMvPredNode>,
    ) -> Option<ArcMvPredNode>;

    fn get_column_refs(&self) -> Vec<ColumnRefPred>;
}

impl<P: MvReprPredNode> PredExt for P {
    fn substitute_column_refs(
        &self,
        mut substitute_fn: impl FnMut(usize) -> Option<ArcMvPredNode>,
    ) -> Option<ArcMvPredNode> {
        substitute_column_refs_inner(&self.clone().into_pred_node(), &mut substitute_fn)
    }

    fn get_column_refs(&self) -> Vec<ColumnRefPred> {
        let node = self.clone().into_pred_node();
        if let Some(col_ref) = ColumnRefPred::from_pred_node(node.clone()) {
            return vec![col_ref];
        }
        let children = node.children.iter().map(|child| child.get_column_refs());
        children.collect_vec().concat()
    }
}

fn substitute_column_refs_inner(
    expr: &ArcMvPredNode,
    substitute_fn: &mut impl FnMut(usize) -> Option<ArcMvPredNode>,
) -> Option<ArcMvPredNode> {
    if let Some(col_ref) = ColumnRefPred::from_pred_node(expr.clone()) {
        return substitute_fn(col_ref.index());
    }
    if expr.children.is_empty() {
        return Some(expr.clone());
    }
    let children = expr
        .children
        .iter()
        .map(|child| substitute_column_refs_inner(child, substitute_fn))
        .collect::<Option<Vec<_>>>()?;
    Some(expr.with_children(children))
}
