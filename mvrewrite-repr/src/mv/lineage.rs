// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column lineage of aggregate plans.
//!
//! Every output column of a `Filter`/`Projection` stack over an `Agg` is described by an expression
//! over the aggregate's input, in which aggregate results appear as the aggregate calls that
//! produce them. Two plans over the same input can then be compared column by column.

use itertools::Itertools;

use crate::error::AnalysisError;
use crate::functions::AggFunction;
use crate::plan_nodes::{
    AggFuncPred, ArcMvPlanNode, ArcMvPredNode, BinOpPred, LogOpPred, LogOpType, LogicalAgg,
    LogicalFilter, LogicalProjection, MvNodeType, MvPredType, MvReprPlanNode, MvReprPredNode,
    PredExt,
};

/// The typed pieces of a plan matched by one of the aggregate rewrite patterns.
#[derive(Clone, Debug)]
pub struct AggregateShape {
    pub filter: Option<LogicalFilter>,
    pub project: Option<LogicalProjection>,
    pub agg: LogicalAgg,
    pub input: ArcMvPlanNode,
}

impl AggregateShape {
    /// Recognizes `Filter?(Projection?(Agg(input)))`.
    pub fn extract(root: &ArcMvPlanNode) -> Option<Self> {
        let mut node = root.clone();
        let filter = LogicalFilter::from_plan_node(node.clone());
        if let Some(filter) = &filter {
            node = filter.child();
        }
        let project = LogicalProjection::from_plan_node(node.clone());
        if let Some(project) = &project {
            node = project.child();
        }
        let agg = LogicalAgg::from_plan_node(node)?;
        let input = agg.child();
        Some(Self {
            filter,
            project,
            agg,
            input,
        })
    }

    pub fn summarize(&self) -> Result<AggregateSummary, AnalysisError> {
        let mut summary = AggregateSummary::of_agg(&self.agg);
        if let Some(project) = &self.project {
            summary.project(project)?;
        }
        if let Some(filter) = &self.filter {
            summary.filter(filter)?;
        }
        Ok(summary)
    }
}

/// Lineage of an aggregate plan, see the module docs.
#[derive(Clone, Debug)]
pub struct AggregateSummary {
    /// Input of the aggregate.
    pub input: ArcMvPlanNode,
    /// Normalized grouping keys over `input`.
    pub groups: Vec<ArcMvPredNode>,
    /// Aggregate calls with normalized arguments, flags as written.
    pub calls: Vec<AggFuncPred>,
    /// Lineage of each output column of the plan.
    pub outputs: Vec<ArcMvPredNode>,
    /// Normalized conjuncts of the filters above the aggregate, in lineage form.
    pub conjuncts: Vec<ArcMvPredNode>,
}

impl AggregateSummary {
    /// Summarizes a plan made of any number of filters and projections over a single aggregate.
    pub fn of_plan(plan: &ArcMvPlanNode) -> Result<Self, AnalysisError> {
        match plan.typ {
            MvNodeType::Agg => Ok(Self::of_agg(&LogicalAgg(plan.clone()))),
            MvNodeType::Filter => {
                let filter = LogicalFilter(plan.clone());
                let mut summary = Self::of_plan(&filter.child())?;
                summary.filter(&filter)?;
                Ok(summary)
            }
            MvNodeType::Projection => {
                let project = LogicalProjection(plan.clone());
                let mut summary = Self::of_plan(&project.child())?;
                summary.project(&project)?;
                Ok(summary)
            }
            _ => Err(AnalysisError::InvalidExpression(format!(
                "{} is not an aggregate plan",
                plan.typ
            ))),
        }
    }

    fn of_agg(agg: &LogicalAgg) -> Self {
        let groups = agg.groups().to_vec().iter().map(normalize_expr).collect_vec();
        let calls = agg
            .agg_calls()
            .iter()
            .map(|call| {
                AggFuncPred(normalize_expr(&call.clone().into_pred_node()))
                    .with_always_nullable(call.always_nullable())
            })
            .collect_vec();
        let outputs = groups
            .iter()
            .cloned()
            .chain(calls.iter().map(canonical_call))
            .collect_vec();
        Self {
            input: agg.child(),
            groups,
            calls,
            outputs,
            conjuncts: vec![],
        }
    }

    fn lift(&self, expr: &ArcMvPredNode) -> Result<ArcMvPredNode, AnalysisError> {
        let lifted = expr
            .substitute_column_refs(|idx| self.outputs.get(idx).cloned())
            .ok_or_else(|| {
                AnalysisError::InvalidExpression(format!(
                    "{} refers past the {} columns of its input",
                    expr,
                    self.outputs.len()
                ))
            })?;
        Ok(normalize_expr(&lifted))
    }

    fn project(&mut self, project: &LogicalProjection) -> Result<(), AnalysisError> {
        self.outputs = project
            .exprs()
            .to_vec()
            .iter()
            .map(|expr| self.lift(expr))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn filter(&mut self, filter: &LogicalFilter) -> Result<(), AnalysisError> {
        let cond = self.lift(&filter.cond())?;
        for conjunct in split_conjuncts(&cond) {
            if !self.conjuncts.contains(&conjunct) {
                self.conjuncts.push(conjunct);
            }
        }
        Ok(())
    }

    pub fn is_global(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Lineage of an aggregate result: the call without binding details. DISTINCT does not change
/// MIN and MAX, so it is dropped for them.
pub fn canonical_call(call: &AggFuncPred) -> ArcMvPredNode {
    let call = call.canonical();
    if call.is_distinct() && matches!(call.func(), AggFunction::Min | AggFunction::Max) {
        return AggFuncPred::new(call.func(), false, false, call.args().to_vec()).into_pred_node();
    }
    call.into_pred_node()
}

/// Rewrites `expr` into a canonical form so that equivalent expressions compare equal: operands
/// of commutative operators are ordered, `a > b` becomes `b < a` when `b` orders first, and
/// nested AND/OR are flattened, sorted and deduplicated.
pub fn normalize_expr(expr: &ArcMvPredNode) -> ArcMvPredNode {
    let children = expr.children.iter().map(normalize_expr).collect_vec();
    match &expr.typ {
        MvPredType::BinOp(op) => {
            let bin_op = BinOpPred(expr.with_children(children));
            let (left, right) = (bin_op.left_child(), bin_op.right_child());
            match op.swapped() {
                Some(swapped) if right.to_string() < left.to_string() => {
                    BinOpPred::new(right, left, swapped).into_pred_node()
                }
                _ => bin_op.into_pred_node(),
            }
        }
        MvPredType::LogOp(op) => {
            let flattened = LogOpPred::new_flattened_nested_logical(*op, children);
            let mut operands = flattened.children();
            operands.sort_by_cached_key(|operand| operand.to_string());
            operands.dedup();
            if operands.len() == 1 {
                return operands.remove(0);
            }
            LogOpPred::new(*op, operands).into_pred_node()
        }
        MvPredType::AggFunc(_) => {
            let call = AggFuncPred(expr.with_children(children));
            call.canonical().into_pred_node()
        }
        _ if expr.children.is_empty() => expr.clone(),
        _ => expr.with_children(children),
    }
}

/// Splits a predicate into its top-level conjuncts.
pub fn split_conjuncts(cond: &ArcMvPredNode) -> Vec<ArcMvPredNode> {
    if cond.typ == MvPredType::LogOp(LogOpType::And) {
        cond.children.to_vec()
    } else {
        vec![cond.clone()]
    }
}
