// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed interface of plan nodes.

mod agg;
mod filter;
pub(super) mod macros;
mod predicates;
mod projection;
mod scan;

use std::fmt::Debug;
use std::sync::Arc;

pub use agg::LogicalAgg;
pub use filter::LogicalFilter;
use mvrewrite_core::nodes::{ArcPlanNode, ArcPredNode, NodeType, PlanNode, PredNode};
pub use predicates::{
    AggFuncPred, AggFuncType, BinOpPred, BinOpType, CastPred, ColumnRefPred, ConstantPred,
    ConstantType, DataTypePred, FuncPred, ListPred, LogOpPred, LogOpType, PredExt, SignaturePred,
    UnOpPred, UnOpType,
};
use pretty_xmlish::{Pretty, PrettyConfig};
pub use projection::LogicalProjection;
pub use scan::{LogicalMvScan, LogicalScan};

use crate::functions::ScalarFunction;
use crate::rules::MvRuleType;

/// Relational operators of the rewrite core. The definitions of materialized views and the plans
/// handed in by the binder only ever use these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MvNodeType {
    Scan,
    /// Scan over the stored rows of a materialized view.
    MvScan,
    Filter,
    Projection,
    Agg,
}

impl std::fmt::Display for MvNodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MvPredType {
    List,
    Constant(ConstantType),
    ColumnRef,
    UnOp(UnOpType),
    BinOp(BinOpType),
    LogOp(LogOpType),
    Func(ScalarFunction),
    AggFunc(AggFuncType),
    Cast,
    DataType(ConstantType),
    /// A resolved function signature attached to a call.
    Signature,
}

impl std::fmt::Display for MvPredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl NodeType for MvNodeType {
    type PredType = MvPredType;
    type RuleType = MvRuleType;

    fn is_logical(&self) -> bool {
        true
    }
}

pub type MvPlanNode = PlanNode<MvNodeType>;
pub type ArcMvPlanNode = ArcPlanNode<MvNodeType>;
pub type MvPredNode = PredNode<MvNodeType>;
pub type ArcMvPredNode = ArcPredNode<MvNodeType>;

pub trait MvReprPlanNode: 'static + Clone {
    fn into_plan_node(self) -> ArcMvPlanNode;

    fn from_plan_node(plan_node: ArcMvPlanNode) -> Option<Self>;

    fn explain(&self) -> Pretty<'static>;

    fn explain_to_string(&self) -> String {
        let mut config = PrettyConfig {
            need_boundaries: false,
            reduced_spaces: false,
            width: 300,
            ..Default::default()
        };
        let mut out = String::new();
        config.unicode(&mut out, &self.explain());
        out
    }
}

impl MvReprPlanNode for ArcMvPlanNode {
    fn into_plan_node(self) -> ArcMvPlanNode {
        self
    }

    fn from_plan_node(plan_node: ArcMvPlanNode) -> Option<Self> {
        Some(plan_node)
    }

    fn explain(&self) -> Pretty<'static> {
        match self.typ {
            MvNodeType::Scan => LogicalScan(self.clone()).explain(),
            MvNodeType::MvScan => LogicalMvScan(self.clone()).explain(),
            MvNodeType::Filter => LogicalFilter(self.clone()).explain(),
            MvNodeType::Projection => LogicalProjection(self.clone()).explain(),
            MvNodeType::Agg => LogicalAgg(self.clone()).explain(),
        }
    }
}

pub trait MvReprPredNode: 'static + Clone {
    fn into_pred_node(self) -> ArcMvPredNode;

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self>;

    fn explain(&self) -> Pretty<'static>;
}

impl MvReprPredNode for ArcMvPredNode {
    fn into_pred_node(self) -> ArcMvPredNode {
        self
    }

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self> {
        Some(pred_node)
    }

    fn explain(&self) -> Pretty<'static> {
        let node = self.clone();
        match self.typ {
            MvPredType::List => ListPred(node).explain(),
            MvPredType::Constant(_) => ConstantPred(node).explain(),
            MvPredType::ColumnRef => ColumnRefPred(node).explain(),
            MvPredType::UnOp(_) => UnOpPred(node).explain(),
            MvPredType::BinOp(_) => BinOpPred(node).explain(),
            MvPredType::LogOp(_) => LogOpPred(node).explain(),
            MvPredType::Func(_) => FuncPred(node).explain(),
            MvPredType::AggFunc(_) => AggFuncPred(node).explain(),
            MvPredType::Cast => CastPred(node).explain(),
            MvPredType::DataType(_) => DataTypePred(node).explain(),
            MvPredType::Signature => SignaturePred(node).explain(),
        }
    }
}

pub(crate) fn new_plan_node(
    typ: MvNodeType,
    children: Vec<ArcMvPlanNode>,
    predicates: Vec<ArcMvPredNode>,
) -> ArcMvPlanNode {
    Arc::new(MvPlanNode {
        typ,
        children,
        predicates,
    })
}
