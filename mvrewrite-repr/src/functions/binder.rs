// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use itertools::Itertools;
use tracing::trace;

use super::aggregate::AggFunction;
use super::coercion::search_signature;
use super::scalar::ScalarFunction;
use super::signature::ResolvedSignature;
use crate::error::AnalysisError;
use crate::plan_nodes::{
    AggFuncPred, ArcMvPlanNode, ArcMvPredNode, CastPred, ConstantType, ListPred, LogicalAgg,
    MvNodeType, MvReprPlanNode, MvReprPredNode,
};
use crate::properties::schema::{
    derive_expr_field, derive_list_fields, derive_plan_schema, Catalog, Schema,
};

fn no_matching_signature(function: &'static str, arg_types: &[ConstantType]) -> AnalysisError {
    AnalysisError::NoMatchingSignature {
        function,
        args: arg_types.iter().join(", "),
    }
}

/// Resolves the signature of an aggregate call from the types of its actual arguments.
pub fn resolve_agg_signature(
    func: AggFunction,
    arg_types: &[ConstantType],
) -> Result<ResolvedSignature, AnalysisError> {
    func.check_arity(arg_types.len())?;
    func.check_legality_before_type_coercion(arg_types)?;
    let declared = search_signature(func.signatures(), arg_types, func.explicitly_castable())
        .ok_or_else(|| no_matching_signature(func.name(), arg_types))?;
    let signature = declared
        .implement(arg_types)
        .ok_or_else(|| no_matching_signature(func.name(), arg_types))?;
    let signature = func.compute_signature(signature);
    trace!(event = "resolve_signature", function = func.name(), signature = %signature);
    Ok(signature)
}

pub fn resolve_scalar_signature(
    func: ScalarFunction,
    arg_types: &[ConstantType],
) -> Result<ResolvedSignature, AnalysisError> {
    func.check_arity(arg_types.len())?;
    let declared = search_signature(func.signatures(), arg_types, false)
        .ok_or_else(|| no_matching_signature(func.name(), arg_types))?;
    declared
        .implement(arg_types)
        .ok_or_else(|| no_matching_signature(func.name(), arg_types))
}

/// Resolves `call` against `input`, casts every argument whose type differs from the resolved
/// one, and attaches the signature.
pub fn bind_agg_call(call: &AggFuncPred, input: &Schema) -> Result<AggFuncPred, AnalysisError> {
    let args = call.args().to_vec();
    let arg_types = args
        .iter()
        .map(|arg| derive_expr_field(arg, input).map(|field| field.typ))
        .collect::<Result<Vec<_>, _>>()?;
    let signature = resolve_agg_signature(call.func(), &arg_types)?;
    let args = args
        .into_iter()
        .zip(arg_types)
        .enumerate()
        .map(|(idx, (arg, actual))| match signature.arg_type(idx) {
            Some(target) if target != actual => CastPred::new(arg, target).into_pred_node(),
            _ => arg,
        })
        .collect_vec();
    Ok(call
        .with_distinct_and_children(call.is_distinct(), args)?
        .with_signature(&signature))
}

/// Binds every aggregate call in the plan, bottom up, and checks that all other expressions type.
pub fn bind_plan(catalog: &dyn Catalog, plan: &ArcMvPlanNode) -> Result<ArcMvPlanNode, AnalysisError> {
    let children = plan
        .children
        .iter()
        .map(|child| bind_plan(catalog, child))
        .collect::<Result<Vec<_>, _>>()?;
    let plan = plan.with_children(children);
    let Some(input) = plan.children.first() else {
        return Ok(plan);
    };
    let input_schema = derive_plan_schema(catalog, input)?;
    match plan.typ {
        MvNodeType::Agg => {
            let agg = LogicalAgg(plan.clone());
            derive_list_fields(&agg.groups(), &input_schema)?;
            let exprs = agg
                .exprs()
                .to_vec()
                .into_iter()
                .map(|expr| bind_expr(expr, &input_schema))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(LogicalAgg::new(input.clone(), ListPred::new(exprs), agg.groups()).into_plan_node())
        }
        _ => {
            for predicate in &plan.predicates {
                if predicate.typ == crate::plan_nodes::MvPredType::List {
                    derive_list_fields(&ListPred(predicate.clone()), &input_schema)?;
                } else {
                    derive_expr_field(predicate, &input_schema)?;
                }
            }
            Ok(plan)
        }
    }
}

fn bind_expr(expr: ArcMvPredNode, input: &Schema) -> Result<ArcMvPredNode, AnalysisError> {
    match AggFuncPred::from_pred_node(expr.clone()) {
        Some(call) => Ok(bind_agg_call(&call, input)?.into_pred_node()),
        None => {
            derive_expr_field(&expr, input)?;
            Ok(expr)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::TypeCategory;
    use crate::plan_nodes::{ColumnRefPred, ConstantPred, LogicalScan};
    use crate::properties::schema::Field;
    use crate::testing::TpchCatalog;

    fn col(idx: usize) -> ArcMvPredNode {
        ColumnRefPred::new(idx).into_pred_node()
    }

    fn events(ts: ConstantType) -> Schema {
        Schema::new(vec![
            Field::new("user_id", ConstantType::Int64, false),
            Field::new("ts", ts, false),
            Field::new("viewed", ConstantType::Bool, false),
            Field::new("bought", ConstantType::Bool, true),
            Field::new("window", ConstantType::Int32, false),
        ])
    }

    fn funnel(window: ArcMvPredNode) -> AggFuncPred {
        AggFuncPred::window_funnel(
            false,
            false,
            window,
            ConstantPred::string("default").into_pred_node(),
            col(1),
            col(2),
            vec![col(3)],
        )
    }

    #[test]
    fn window_funnel_casts_date_to_datetime() {
        let bound = bind_agg_call(&funnel(col(4)), &events(ConstantType::Date)).unwrap();
        let signature = bound.signature().unwrap();
        assert_eq!(
            signature.args,
            vec![
                ConstantType::Int64,
                ConstantType::Utf8String,
                ConstantType::DateTime,
                ConstantType::Bool,
                ConstantType::Bool,
            ]
        );
        assert_eq!(signature.ret, ConstantType::Int32);
        assert_eq!(
            bound.arg_at(0),
            CastPred::new(col(4), ConstantType::Int64).into_pred_node()
        );
        assert_eq!(
            bound.arg_at(2),
            CastPred::new(col(1), ConstantType::DateTime).into_pred_node()
        );
        assert_eq!(bound.arg_at(3), col(2));
    }

    #[test]
    fn window_funnel_keeps_datetime_v2_scale() {
        let bound = bind_agg_call(
            &funnel(ConstantPred::int64(3600).into_pred_node()),
            &events(ConstantType::DateV2),
        )
        .unwrap();
        assert_eq!(bound.signature().unwrap().args[2], ConstantType::DateTimeV2(0));

        let bound = bind_agg_call(
            &funnel(ConstantPred::int64(3600).into_pred_node()),
            &events(ConstantType::DateTimeV2(3)),
        )
        .unwrap();
        assert_eq!(bound.signature().unwrap().args[2], ConstantType::DateTimeV2(3));
        assert_eq!(bound.arg_at(2), col(1));
    }

    #[test]
    fn window_funnel_rejects_non_date_timestamp() {
        let call = AggFuncPred::window_funnel(
            false,
            false,
            ConstantPred::int64(3600).into_pred_node(),
            ConstantPred::string("default").into_pred_node(),
            ConstantPred::string("2024-01-01").into_pred_node(),
            col(2),
            vec![],
        );
        let err = bind_agg_call(&call, &events(ConstantType::Date)).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ArgumentCategoryMismatch {
                function: "window_funnel",
                position: 2,
                expected: TypeCategory::DateOrDateTime,
                actual: ConstantType::Utf8String,
            }
        );
    }

    #[test]
    fn sum_widens_integers() {
        let schema = events(ConstantType::Date);
        let call = AggFuncPred::new(AggFunction::Sum, false, false, vec![col(4)]);
        let bound = bind_agg_call(&call, &schema).unwrap();
        assert_eq!(bound.signature().unwrap().ret, ConstantType::Int64);
        assert_eq!(
            bound.arg_at(0),
            CastPred::new(col(4), ConstantType::Int64).into_pred_node()
        );

        let call = AggFuncPred::new(AggFunction::Sum, false, false, vec![col(2)]);
        assert!(matches!(
            bind_agg_call(&call, &schema),
            Err(AnalysisError::NoMatchingSignature { function: "sum", .. })
        ));
    }

    #[test]
    fn min_follows_its_argument() {
        let call = AggFuncPred::new(AggFunction::Min, false, false, vec![col(1)]);
        let bound = bind_agg_call(&call, &events(ConstantType::DateV2)).unwrap();
        assert_eq!(bound.signature().unwrap().ret, ConstantType::DateV2);
        assert_eq!(bound.arg_at(0), col(1));
    }

    #[test]
    fn bind_plan_binds_aggregates() {
        let plan = LogicalAgg::new(
            LogicalScan::new("lineitem".into()).into_plan_node(),
            ListPred::new(vec![AggFuncPred::new(
                AggFunction::Avg,
                false,
                false,
                vec![col(3)],
            )
            .into_pred_node()]),
            ListPred::new(vec![col(0)]),
        )
        .into_plan_node();
        let bound = bind_plan(&TpchCatalog, &plan).unwrap();
        let call = LogicalAgg(bound).agg_calls().remove(0);
        assert_eq!(call.signature().unwrap().ret, ConstantType::Float64);
        assert_eq!(
            call.arg_at(0),
            CastPred::new(col(3), ConstantType::Float64).into_pred_node()
        );
    }
}
