// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use itertools::Itertools;
use mvrewrite_core::rules::{apply_multi_no_throw, RuleOutput};
use tracing::trace;

use super::catalog::{CandidateRequest, MaterializedViewCatalog};
use super::definition::MaterializedViewDefinition;
use super::lineage::{canonical_call, normalize_expr, AggregateShape, AggregateSummary};
use super::rollup::{distinct_insensitive, rollup_function};
use crate::error::AnalysisError;
use crate::functions::{bind_agg_call, AggFunction, ScalarFunction};
use crate::plan_nodes::{
    AggFuncPred, ArcMvPlanNode, ArcMvPredNode, BinOpPred, BinOpType, CastPred, ColumnRefPred,
    ConstantPred, ConstantType, FuncPred, ListPred, LogOpPred, LogicalAgg, LogicalFilter,
    LogicalMvScan, LogicalProjection, MvNodeType, MvPredType, MvReprPlanNode, MvReprPredNode,
};
use crate::properties::schema::{derive_expr_field, derive_plan_schema, Catalog, Schema};

/// Pairs of (lineage, expression over the rewritten plan) that answer that lineage.
type Derivations = Vec<(ArcMvPredNode, ArcMvPredNode)>;

/// Substitutes materialized views for the aggregate at the bottom of a matched plan.
pub struct MvAggregateRewriter {
    catalog: Arc<dyn Catalog>,
    views: Arc<dyn MaterializedViewCatalog>,
    allow_rollup: bool,
}

impl MvAggregateRewriter {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        views: Arc<dyn MaterializedViewCatalog>,
        allow_rollup: bool,
    ) -> Self {
        Self {
            catalog,
            views,
            allow_rollup,
        }
    }

    /// Produces one plan per view that can answer `binding`. `expected` is the schema of
    /// `binding`; every produced plan has the same column types.
    pub fn rewrite(
        &self,
        rule: &'static str,
        binding: &ArcMvPlanNode,
        expected: &Schema,
    ) -> RuleOutput<MvNodeType> {
        let Some(shape) = AggregateShape::extract(binding) else {
            return RuleOutput::empty();
        };
        let query = match shape.summarize() {
            Ok(query) => query,
            Err(err) => return RuleOutput::skipped(binding, err),
        };
        let input_schema = match derive_plan_schema(self.catalog.as_ref(), &query.input) {
            Ok(schema) => schema,
            Err(err) => return RuleOutput::skipped(binding, err),
        };
        let request = CandidateRequest {
            input: query.input.clone(),
            groups: query.groups.clone(),
            aggs: query.calls.clone(),
            predicate: (!query.conjuncts.is_empty())
                .then(|| LogOpPred::conjunction(query.conjuncts.clone())),
        };
        let views = self.views.candidate_views(&request);
        trace!(event = "mv_candidates", rule, views = views.len());
        apply_multi_no_throw(rule, views, |view| {
            Ok(self.rewrite_with_view(&query, &input_schema, view, expected)?)
        })
    }

    fn rewrite_with_view(
        &self,
        query: &AggregateSummary,
        input_schema: &Schema,
        view: &MaterializedViewDefinition,
        expected: &Schema,
    ) -> Result<ArcMvPlanNode, AnalysisError> {
        let name = view.name();
        let mv = view.summary();
        if mv.input != query.input {
            return Err(AnalysisError::not_applicable(
                name,
                "defined over a different input",
            ));
        }
        let rollup = mv.groups.iter().any(|group| !query.groups.contains(group));
        if rollup && !self.allow_rollup {
            return Err(AnalysisError::not_applicable(
                name,
                "groups are finer than the query's and rollup is disabled",
            ));
        }
        if rollup && !mv.conjuncts.is_empty() {
            return Err(AnalysisError::not_applicable(
                name,
                "filtered groups cannot be rolled up",
            ));
        }
        if let Some(missing) = mv
            .conjuncts
            .iter()
            .find(|conjunct| !query.conjuncts.contains(conjunct))
        {
            return Err(AnalysisError::not_applicable(
                name,
                format!("view filter {} is not implied by the query", missing),
            ));
        }

        let stored = mv
            .outputs
            .iter()
            .enumerate()
            .map(|(idx, lineage)| (lineage.clone(), ColumnRefPred::new(idx).into_pred_node()))
            .collect_vec();
        let scan = LogicalMvScan::new(name).into_plan_node();
        let (mut plan, derivations) = if rollup {
            roll_up(query, input_schema, view, scan, &stored)?
        } else {
            (scan, exact(query, input_schema, name, stored)?)
        };

        let residual = query
            .conjuncts
            .iter()
            .filter(|conjunct| !mv.conjuncts.contains(conjunct))
            .map(|conjunct| derive(conjunct, &derivations, name))
            .collect::<Result<Vec<_>, _>>()?;
        if !residual.is_empty() {
            plan = LogicalFilter::new(plan, LogOpPred::conjunction(residual)).into_plan_node();
        }
        let exprs = query
            .outputs
            .iter()
            .map(|output| derive(output, &derivations, name))
            .collect::<Result<Vec<_>, _>>()?;
        let plan = LogicalProjection::new(plan, ListPred::new(exprs)).into_plan_node();

        let schema = derive_plan_schema(self.catalog.as_ref(), &plan)?;
        if schema.types() != expected.types() {
            return Err(AnalysisError::not_applicable(
                name,
                format!("rewritten plan produces {} instead of {}", schema, expected),
            ));
        }
        Ok(plan)
    }
}

/// Derivations when the view has the query's granularity: stored columns answer directly, and
/// AVG may also be computed from a stored SUM and COUNT.
fn exact(
    query: &AggregateSummary,
    input_schema: &Schema,
    view: &str,
    mut derivations: Derivations,
) -> Result<Derivations, AnalysisError> {
    for call in &query.calls {
        let lineage = canonical_call(call);
        if lookup(&derivations, &lineage).is_some()
            || call.func() != AggFunction::Avg
            || call.is_distinct()
        {
            continue;
        }
        let sum = stored_partial(&derivations, AggFunction::Sum, call, input_schema, view)?;
        let count = stored_partial(&derivations, AggFunction::Count, call, input_schema, view)?;
        let ret = derive_expr_field(&call.clone().into_pred_node(), input_schema)?.typ;
        derivations.push((lineage, average(sum, count, ret)));
    }
    Ok(derivations)
}

/// Re-aggregates the view to the query's groups. Returns the aggregate over the view scan and the
/// derivations over its output.
fn roll_up(
    query: &AggregateSummary,
    input_schema: &Schema,
    view: &MaterializedViewDefinition,
    scan: ArcMvPlanNode,
    stored: &Derivations,
) -> Result<(ArcMvPlanNode, Derivations), AnalysisError> {
    let name = view.name();
    let groups = query
        .groups
        .iter()
        .map(|group| derive(group, stored, name))
        .collect::<Result<Vec<_>, _>>()?;
    let mut derivations: Derivations = query
        .groups
        .iter()
        .enumerate()
        .map(|(idx, group)| (group.clone(), ColumnRefPred::new(idx).into_pred_node()))
        .collect();
    let mut calls: Vec<ArcMvPredNode> = vec![];
    let mut partial = |func: AggFunction,
                       column: ArcMvPredNode,
                       always_nullable: bool|
     -> Result<ArcMvPredNode, AnalysisError> {
        let call = AggFuncPred::new(func, false, always_nullable, vec![column]);
        let call = bind_agg_call(&call, view.schema())?.into_pred_node();
        let idx = match calls.iter().position(|existing| *existing == call) {
            Some(idx) => idx,
            None => {
                calls.push(call);
                calls.len() - 1
            }
        };
        Ok(ColumnRefPred::new(groups.len() + idx).into_pred_node())
    };

    for call in &query.calls {
        let lineage = canonical_call(call);
        if lookup(&derivations, &lineage).is_some() {
            continue;
        }
        if call.is_distinct() && !distinct_insensitive(call.func()) {
            return Err(AnalysisError::not_applicable(
                name,
                format!("{} cannot be rolled up", call.typ()),
            ));
        }
        let always_nullable = call.always_nullable() || query.is_global();
        let derived = match call.func() {
            AggFunction::Avg => {
                let sum = stored_partial(stored, AggFunction::Sum, call, input_schema, name)?;
                let count = stored_partial(stored, AggFunction::Count, call, input_schema, name)?;
                let ret = derive_expr_field(&call.clone().into_pred_node(), input_schema)?.typ;
                let sum = partial(AggFunction::Sum, sum, always_nullable)?;
                let count = partial(AggFunction::Sum, count, always_nullable)?;
                average(sum, count, ret)
            }
            func => {
                let rollup = rollup_function(func).ok_or_else(|| {
                    AnalysisError::not_applicable(name, format!("{} cannot be rolled up", func))
                })?;
                let column = lookup(stored, &lineage).ok_or_else(|| {
                    AnalysisError::not_applicable(name, format!("{} is not stored", lineage))
                })?;
                let rolled = partial(rollup, column, always_nullable)?;
                if func == AggFunction::Count && query.is_global() {
                    // COUNT over no rows is 0, not NULL.
                    FuncPred::new(
                        ScalarFunction::Coalesce,
                        ListPred::new(vec![rolled, ConstantPred::int64(0).into_pred_node()]),
                    )
                    .into_pred_node()
                } else {
                    rolled
                }
            }
        };
        derivations.push((lineage, derived));
    }

    let agg = LogicalAgg::new(scan, ListPred::new(calls), ListPred::new(groups));
    Ok((agg.into_plan_node(), derivations))
}

fn lookup(derivations: &Derivations, lineage: &ArcMvPredNode) -> Option<ArcMvPredNode> {
    derivations
        .iter()
        .find(|(candidate, _)| candidate == lineage)
        .map(|(_, derived)| derived.clone())
}

/// Finds a stored `func` over the argument of the AVG `call`. The argument is tried as bound and
/// without the cast binding AVG may have added; `func` is then bound over it the same way the
/// view's own calls were, and must equal a stored call exactly.
fn stored_partial(
    stored: &Derivations,
    func: AggFunction,
    call: &AggFuncPred,
    input_schema: &Schema,
    view: &str,
) -> Result<ArcMvPredNode, AnalysisError> {
    let arg = call.arg_at(0);
    let mut args = vec![arg.clone()];
    if let Some(cast) = CastPred::from_pred_node(arg) {
        let bound_cast = call
            .signature()
            .and_then(|signature| signature.arg_type(0))
            .is_some_and(|typ| typ == cast.cast_to());
        if bound_cast {
            args.push(cast.child());
        }
    }
    args.into_iter()
        .find_map(|arg| {
            let partial = AggFuncPred::new(func, false, false, vec![arg]);
            let partial = bind_agg_call(&partial, input_schema).ok()?.into_pred_node();
            lookup(stored, &canonical_call(&AggFuncPred(normalize_expr(&partial))))
        })
        .ok_or_else(|| {
            AnalysisError::not_applicable(view, format!("{} needs a stored {}", call.typ(), func))
        })
}

fn average(sum: ArcMvPredNode, count: ArcMvPredNode, typ: ConstantType) -> ArcMvPredNode {
    BinOpPred::new(
        CastPred::new(sum, typ).into_pred_node(),
        CastPred::new(count, typ).into_pred_node(),
        BinOpType::Div,
    )
    .into_pred_node()
}

/// Rewrites an expression in lineage form into one over the rewritten plan.
fn derive(
    expr: &ArcMvPredNode,
    derivations: &Derivations,
    view: &str,
) -> Result<ArcMvPredNode, AnalysisError> {
    if let Some(derived) = lookup(derivations, expr) {
        return Ok(derived);
    }
    match expr.typ {
        MvPredType::ColumnRef => Err(AnalysisError::not_applicable(
            view,
            format!("column {} has no lineage in the view", expr),
        )),
        MvPredType::AggFunc(_) => Err(AnalysisError::not_applicable(
            view,
            format!("{} cannot be derived", expr),
        )),
        _ if expr.children.is_empty() => Ok(expr.clone()),
        _ => {
            let children = expr
                .children
                .iter()
                .map(|child| derive(child, derivations, view))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(expr.with_children(children))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::functions::bind_plan;
    use crate::mv::catalog::InMemoryCatalog;
    use crate::mv::lineage::normalize_expr;
    use crate::testing::{agg, agg_call, col, tpch_in_memory_catalog, window_funnel_call};

    fn rewrite(catalog: InMemoryCatalog, query: ArcMvPlanNode, allow_rollup: bool) -> RuleOutput<MvNodeType> {
        let catalog = Arc::new(catalog);
        let query = bind_plan(catalog.as_ref(), &query).unwrap();
        let expected = derive_plan_schema(catalog.as_ref(), &query).unwrap();
        let rewriter = MvAggregateRewriter::new(catalog.clone(), catalog, allow_rollup);
        rewriter.rewrite("test_rule", &query, &expected)
    }

    fn sum_qty_by_order() -> ArcMvPlanNode {
        agg(
            "lineitem",
            vec![agg_call(AggFunction::Sum, vec![col(4)])],
            vec![col(0)],
        )
    }

    fn fine_grained_view() -> ArcMvPlanNode {
        agg(
            "lineitem",
            vec![
                agg_call(AggFunction::Sum, vec![col(4)]),
                agg_call(AggFunction::Count, vec![col(4)]),
                agg_call(AggFunction::Max, vec![col(5)]),
            ],
            vec![col(0), col(3)],
        )
    }

    fn project(child: ArcMvPlanNode, exprs: Vec<ArcMvPredNode>) -> ArcMvPlanNode {
        LogicalProjection::new(child, ListPred::new(exprs)).into_plan_node()
    }

    fn orderkey_above(bound: i64) -> ArcMvPredNode {
        BinOpPred::new(col(0), ConstantPred::int64(bound).into_pred_node(), BinOpType::Gt)
            .into_pred_node()
    }

    fn scan_of(view: &str) -> ArcMvPlanNode {
        LogicalMvScan::new(view).into_plan_node()
    }

    #[test]
    fn exact_match_reads_stored_columns() {
        let mut catalog = tpch_in_memory_catalog();
        catalog.register_view("mv_sum", sum_qty_by_order()).unwrap();
        let query = project(sum_qty_by_order(), vec![col(1), col(0)]);
        let output = rewrite(catalog, query, true);
        assert_eq!(output.skipped, vec![]);
        assert_eq!(
            output.candidates,
            vec![project(scan_of("mv_sum"), vec![col(1), col(0)])]
        );
    }

    #[test]
    fn filter_is_compensated_unless_the_view_enforces_it() {
        let mut catalog = tpch_in_memory_catalog();
        catalog.register_view("mv_sum", sum_qty_by_order()).unwrap();
        catalog
            .register_view(
                "mv_having",
                LogicalFilter::new(sum_qty_by_order(), orderkey_above(100)).into_plan_node(),
            )
            .unwrap();
        let query = LogicalFilter::new(sum_qty_by_order(), orderkey_above(100)).into_plan_node();
        let output = rewrite(catalog.clone(), query, true);
        assert_eq!(
            output.candidates,
            vec![
                project(
                    LogicalFilter::new(scan_of("mv_sum"), normalize_expr(&orderkey_above(100)))
                        .into_plan_node(),
                    vec![col(0), col(1)]
                ),
                project(scan_of("mv_having"), vec![col(0), col(1)]),
            ]
        );

        let output = rewrite(catalog, sum_qty_by_order(), true);
        assert_eq!(output.candidates.len(), 1);
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].candidate, "mv_having");
        assert!(!output.skipped[0].fault);
    }

    #[test]
    fn finer_views_are_rolled_up() {
        let mut catalog = tpch_in_memory_catalog();
        catalog.register_view("mv_fine", fine_grained_view()).unwrap();
        let query = agg(
            "lineitem",
            vec![
                agg_call(AggFunction::Sum, vec![col(4)]),
                agg_call(AggFunction::Count, vec![col(4)]),
                agg_call(AggFunction::Max, vec![col(5)]),
            ],
            vec![col(0)],
        );
        let output = rewrite(catalog.clone(), query.clone(), true);
        assert_eq!(output.skipped, vec![]);
        let candidate = LogicalProjection::from_plan_node(output.candidates[0].clone()).unwrap();
        assert_eq!(candidate.exprs().to_vec(), vec![col(0), col(1), col(2), col(3)]);
        let rollup = LogicalAgg::from_plan_node(candidate.child()).unwrap();
        assert_eq!(rollup.child(), scan_of("mv_fine"));
        assert_eq!(rollup.groups().to_vec(), vec![col(0)]);
        let calls = rollup.agg_calls();
        assert_eq!(
            calls.iter().map(|call| call.func()).collect_vec(),
            vec![AggFunction::Sum, AggFunction::Sum, AggFunction::Max]
        );
        assert_eq!(
            calls.iter().map(|call| call.arg_at(0)).collect_vec(),
            vec![col(2), col(3), col(4)]
        );
        assert!(calls.iter().all(|call| call.signature().is_some()));

        let output = rewrite(catalog, query, false);
        assert_eq!(output.candidates, vec![]);
        assert!(output.skipped[0].reason.contains("rollup is disabled"));
    }

    #[test]
    fn global_count_is_coalesced() {
        let mut catalog = tpch_in_memory_catalog();
        catalog.register_view("mv_fine", fine_grained_view()).unwrap();
        let query = agg(
            "lineitem",
            vec![agg_call(AggFunction::Count, vec![col(4)])],
            vec![],
        );
        let output = rewrite(catalog, query, true);
        let candidate = LogicalProjection::from_plan_node(output.candidates[0].clone()).unwrap();
        let count = FuncPred::from_pred_node(candidate.exprs().child(0)).unwrap();
        assert_eq!(count.func(), ScalarFunction::Coalesce);
        assert_eq!(count.arg_at(0), col(0));
        let rollup = LogicalAgg::from_plan_node(candidate.child()).unwrap();
        assert!(rollup.is_global());
        assert!(rollup.agg_calls()[0].always_nullable());
    }

    #[test]
    fn average_is_computed_from_sum_and_count() {
        let mut catalog = tpch_in_memory_catalog();
        catalog
            .register_view(
                "mv_sum_count",
                agg(
                    "lineitem",
                    vec![
                        agg_call(AggFunction::Sum, vec![col(4)]),
                        agg_call(AggFunction::Count, vec![col(4)]),
                    ],
                    vec![col(0)],
                ),
            )
            .unwrap();
        catalog.register_view("mv_fine", fine_grained_view()).unwrap();
        catalog.register_view("mv_sum", sum_qty_by_order()).unwrap();
        let query = agg(
            "lineitem",
            vec![agg_call(AggFunction::Avg, vec![col(4)])],
            vec![col(0)],
        );
        let output = rewrite(catalog, query, true);
        assert_eq!(output.candidates.len(), 2);
        assert_eq!(
            output.candidates[0],
            project(
                scan_of("mv_sum_count"),
                vec![col(0), average(col(1), col(2), ConstantType::Decimal)]
            )
        );
        let rolled = LogicalProjection::from_plan_node(output.candidates[1].clone()).unwrap();
        assert_eq!(
            rolled.exprs().child(1),
            average(col(1), col(2), ConstantType::Decimal)
        );
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].candidate, "mv_sum");
        assert!(output.skipped[0].reason.contains("needs a stored count"));
    }

    #[test]
    fn integer_average_matches_through_casts() {
        let mut catalog = tpch_in_memory_catalog();
        catalog
            .register_view(
                "mv_lines",
                agg(
                    "lineitem",
                    vec![
                        agg_call(AggFunction::Sum, vec![col(3)]),
                        agg_call(AggFunction::Count, vec![col(3)]),
                    ],
                    vec![col(0)],
                ),
            )
            .unwrap();
        let query = agg(
            "lineitem",
            vec![agg_call(AggFunction::Avg, vec![col(3)])],
            vec![col(0)],
        );
        let output = rewrite(catalog, query, true);
        assert_eq!(
            output.candidates,
            vec![project(
                scan_of("mv_lines"),
                vec![col(0), average(col(1), col(2), ConstantType::Float64)]
            )]
        );
    }

    #[test]
    fn average_ignores_sums_over_other_expressions() {
        let mut catalog = tpch_in_memory_catalog();
        catalog
            .register_view(
                "mv_truncated",
                agg(
                    "lineitem",
                    vec![
                        agg_call(
                            AggFunction::Sum,
                            vec![CastPred::new(col(4), ConstantType::Int64).into_pred_node()],
                        ),
                        agg_call(AggFunction::Count, vec![col(4)]),
                    ],
                    vec![col(0)],
                ),
            )
            .unwrap();
        let query = agg(
            "lineitem",
            vec![agg_call(AggFunction::Avg, vec![col(4)])],
            vec![col(0)],
        );
        let output = rewrite(catalog, query, true);
        assert_eq!(output.candidates, vec![]);
        assert_eq!(output.skipped.len(), 1);
        assert!(output.skipped[0].reason.contains("needs a stored sum"));
    }

    #[test]
    fn rolled_up_average_needs_a_stored_count() {
        let mut catalog = tpch_in_memory_catalog();
        catalog
            .register_view(
                "mv_fine_sum",
                agg(
                    "lineitem",
                    vec![agg_call(AggFunction::Sum, vec![col(4)])],
                    vec![col(0), col(3)],
                ),
            )
            .unwrap();
        let query = agg(
            "lineitem",
            vec![agg_call(AggFunction::Avg, vec![col(4)])],
            vec![col(0)],
        );
        let output = rewrite(catalog, query, true);
        assert_eq!(output.candidates, vec![]);
        assert_eq!(output.skipped[0].candidate, "mv_fine_sum");
        assert!(output.skipped[0].reason.contains("needs a stored count"));
    }

    #[test]
    fn filtered_views_are_not_rolled_up() {
        let mut catalog = tpch_in_memory_catalog();
        catalog
            .register_view(
                "mv_fine_having",
                LogicalFilter::new(
                    agg(
                        "lineitem",
                        vec![agg_call(AggFunction::Sum, vec![col(4)])],
                        vec![col(0), col(3)],
                    ),
                    orderkey_above(100),
                )
                .into_plan_node(),
            )
            .unwrap();
        let query = LogicalFilter::new(sum_qty_by_order(), orderkey_above(100)).into_plan_node();
        let output = rewrite(catalog, query, true);
        assert_eq!(output.candidates, vec![]);
        assert_eq!(output.skipped[0].candidate, "mv_fine_having");
        assert!(output.skipped[0].reason.contains("filtered groups cannot be rolled up"));
    }

    #[test]
    fn distinct_and_window_funnel_do_not_roll_up() {
        let mut catalog = tpch_in_memory_catalog();
        catalog.register_view("mv_fine", fine_grained_view()).unwrap();
        let count_distinct = agg(
            "lineitem",
            vec![AggFuncPred::new(AggFunction::Count, true, false, vec![col(4)]).into_pred_node()],
            vec![col(0)],
        );
        let output = rewrite(catalog.clone(), count_distinct, true);
        assert_eq!(output.candidates, vec![]);
        assert!(output.skipped[0].reason.contains("cannot be rolled up"));

        let max_distinct = agg(
            "lineitem",
            vec![AggFuncPred::new(AggFunction::Max, true, false, vec![col(5)]).into_pred_node()],
            vec![col(0)],
        );
        let output = rewrite(catalog, max_distinct, true);
        assert_eq!(output.candidates.len(), 1);

        let mut catalog = tpch_in_memory_catalog();
        let funnel = |groups| agg("events", vec![window_funnel_call()], groups);
        catalog
            .register_view("mv_funnel", funnel(vec![col(0), col(3)]))
            .unwrap();
        let output = rewrite(catalog.clone(), funnel(vec![col(0), col(3)]), true);
        assert_eq!(
            output.candidates,
            vec![project(scan_of("mv_funnel"), vec![col(0), col(1), col(2)])]
        );
        let output = rewrite(catalog, funnel(vec![col(0)]), true);
        assert_eq!(output.candidates, vec![]);
        assert!(output.skipped[0].reason.contains("window_funnel cannot be rolled up"));
    }

    #[test]
    fn missing_lineage_skips_only_that_view() {
        let mut catalog = tpch_in_memory_catalog();
        catalog.register_view("mv_by_order", sum_qty_by_order()).unwrap();
        catalog
            .register_view(
                "mv_by_order_part",
                agg(
                    "lineitem",
                    vec![agg_call(AggFunction::Sum, vec![col(4)])],
                    vec![col(0), col(1)],
                ),
            )
            .unwrap();
        let query = agg(
            "lineitem",
            vec![agg_call(AggFunction::Sum, vec![col(4)])],
            vec![col(0), col(1)],
        );
        let output = rewrite(catalog, query, true);
        assert_eq!(
            output.candidates,
            vec![project(scan_of("mv_by_order_part"), vec![col(0), col(1), col(2)])]
        );
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].candidate, "mv_by_order");
        assert!(output.skipped[0].reason.contains("has no lineage"));
    }

    #[test]
    fn views_over_other_inputs_are_ignored() {
        let mut catalog = tpch_in_memory_catalog();
        catalog.register_view("mv_sum", sum_qty_by_order()).unwrap();
        let query = agg(
            "partsupp",
            vec![agg_call(AggFunction::Sum, vec![col(3)])],
            vec![col(0)],
        );
        let output = rewrite(catalog, query, true);
        assert_eq!(output.candidates, vec![]);
        assert_eq!(output.skipped, vec![]);
    }
}
