// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use anyhow::Result;
use itertools::Itertools;
use mvrewrite_core::property::PropertyBuilder;
use serde::{Deserialize, Serialize};

use super::DEFAULT_NAME;
use crate::error::AnalysisError;
use crate::functions::{resolve_agg_signature, resolve_scalar_signature};
use crate::plan_nodes::{
    AggFuncPred, ArcMvPlanNode, ArcMvPredNode, BinOpType, CastPred, ColumnRefPred, ConstantPred,
    ConstantType, FuncPred, ListPred, MvNodeType, MvPredType, MvReprPredNode, UnOpType,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub typ: ConstantType,
    pub nullable: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, typ: ConstantType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            typ,
            nullable,
        }
    }

    fn computed(typ: ConstantType, nullable: bool) -> Self {
        Self::new(DEFAULT_NAME, typ, nullable)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}]",
            self.fields
                .iter()
                .map(|field| {
                    let nullable = if field.nullable { "?" } else { "" };
                    format!("{}:{}{}", field.name, field.typ, nullable)
                })
                .join(", ")
        )
    }
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn field(&self, idx: usize) -> Result<&Field, AnalysisError> {
        self.fields.get(idx).ok_or_else(|| {
            AnalysisError::InvalidExpression(format!(
                "column #{} out of range for {} columns",
                idx,
                self.len()
            ))
        })
    }

    pub fn types(&self) -> Vec<ConstantType> {
        self.fields.iter().map(|field| field.typ).collect()
    }
}

/// Schemas of base tables and materialized views, by name.
pub trait Catalog: Send + Sync + 'static {
    fn get(&self, name: &str) -> Option<Schema>;
}

pub struct SchemaPropertyBuilder {
    catalog: Arc<dyn Catalog>,
}

impl SchemaPropertyBuilder {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }
}

impl PropertyBuilder<MvNodeType> for SchemaPropertyBuilder {
    type Prop = Schema;

    fn derive(
        &self,
        typ: MvNodeType,
        predicates: &[ArcMvPredNode],
        children: &[&Self::Prop],
    ) -> Result<Self::Prop> {
        Ok(derive_node_schema(
            self.catalog.as_ref(),
            &typ,
            predicates,
            children,
        )?)
    }

    fn property_name(&self) -> &'static str {
        "schema"
    }
}

/// Derives the output schema of a whole plan without going through an optimizer.
pub fn derive_plan_schema(
    catalog: &dyn Catalog,
    plan: &ArcMvPlanNode,
) -> Result<Schema, AnalysisError> {
    let children = plan
        .children
        .iter()
        .map(|child| derive_plan_schema(catalog, child))
        .collect::<Result<Vec<_>, _>>()?;
    derive_node_schema(
        catalog,
        &plan.typ,
        &plan.predicates,
        &children.iter().collect_vec(),
    )
}

fn derive_node_schema(
    catalog: &dyn Catalog,
    typ: &MvNodeType,
    predicates: &[ArcMvPredNode],
    children: &[&Schema],
) -> Result<Schema, AnalysisError> {
    let predicate = |idx: usize| {
        predicates.get(idx).cloned().ok_or_else(|| {
            AnalysisError::InvalidExpression(format!("{} is missing predicate {}", typ, idx))
        })
    };
    let input = || {
        children
            .first()
            .copied()
            .ok_or_else(|| AnalysisError::InvalidExpression(format!("{} has no input", typ)))
    };
    let list_fields = |list: ArcMvPredNode, input: &Schema| {
        list.children
            .iter()
            .map(|expr| derive_expr_field(expr, input))
            .collect::<Result<Vec<_>, _>>()
    };
    match typ {
        MvNodeType::Scan | MvNodeType::MvScan => {
            let name = ConstantPred::from_pred_node(predicate(0)?)
                .map(|name| name.value().as_str())
                .ok_or_else(|| {
                    AnalysisError::InvalidExpression(format!("{} without relation name", typ))
                })?;
            catalog
                .get(&name)
                .ok_or_else(|| AnalysisError::UnknownRelation(name.to_string()))
        }
        MvNodeType::Filter => Ok(input()?.clone()),
        MvNodeType::Projection => Ok(Schema::new(list_fields(predicate(0)?, input()?)?)),
        MvNodeType::Agg => {
            let input = input()?;
            let mut fields = list_fields(predicate(1)?, input)?;
            fields.extend(list_fields(predicate(0)?, input)?);
            Ok(Schema::new(fields))
        }
    }
}

fn arithmetic_type(
    op: BinOpType,
    left: ConstantType,
    right: ConstantType,
) -> Result<ConstantType, AnalysisError> {
    use ConstantType::*;
    if left.is_null() {
        return Ok(right);
    }
    if right.is_null() {
        return Ok(left);
    }
    if !left.is_numeric() || !right.is_numeric() {
        return Err(AnalysisError::InvalidExpression(format!(
            "cannot apply {} to {} and {}",
            op, left, right
        )));
    }
    Ok(match (left, right) {
        (Float64, _) | (_, Float64) => Float64,
        (Decimal, _) | (_, Decimal) => Decimal,
        // integer division yields a fraction
        _ if op == BinOpType::Div => Float64,
        _ => Int64,
    })
}

/// Derives the type and nullability of a scalar or aggregate expression over `input`.
pub fn derive_expr_field(expr: &ArcMvPredNode, input: &Schema) -> Result<Field, AnalysisError> {
    let child_fields = |children: &[ArcMvPredNode]| {
        children
            .iter()
            .map(|child| derive_expr_field(child, input))
            .collect::<Result<Vec<_>, _>>()
    };
    match &expr.typ {
        MvPredType::ColumnRef => {
            let col = ColumnRefPred(expr.clone());
            input.field(col.index()).cloned()
        }
        MvPredType::Constant(typ) => Ok(Field::computed(
            *typ,
            expr.data.as_ref().map_or(true, |value| value.is_null()),
        )),
        MvPredType::UnOp(op) => {
            let child = child_fields(&expr.children)?
                .pop()
                .ok_or_else(|| AnalysisError::InvalidExpression(format!("{} without operand", op)))?;
            match op {
                UnOpType::Not => Ok(Field::computed(ConstantType::Bool, child.nullable)),
                UnOpType::Neg => Ok(Field::computed(child.typ, child.nullable)),
            }
        }
        MvPredType::BinOp(op) => {
            let fields = child_fields(&expr.children)?;
            let [left, right] = fields.as_slice() else {
                return Err(AnalysisError::InvalidExpression(format!(
                    "{} expects 2 operands",
                    op
                )));
            };
            let nullable = left.nullable || right.nullable;
            if op.is_comparison() {
                return Ok(Field::computed(ConstantType::Bool, nullable));
            }
            let typ = arithmetic_type(*op, left.typ, right.typ)?;
            let nullable = nullable || matches!(op, BinOpType::Div | BinOpType::Mod);
            Ok(Field::computed(typ, nullable))
        }
        MvPredType::LogOp(_) => {
            let fields = child_fields(&expr.children)?;
            let nullable = fields.iter().any(|field| field.nullable);
            Ok(Field::computed(ConstantType::Bool, nullable))
        }
        MvPredType::Cast => {
            let cast = CastPred(expr.clone());
            let child = derive_expr_field(&cast.child(), input)?;
            Ok(Field {
                typ: cast.cast_to(),
                ..child
            })
        }
        MvPredType::Func(func) => {
            let call = FuncPred(expr.clone());
            let fields = child_fields(&call.children().to_vec())?;
            let types = fields.iter().map(|field| field.typ).collect_vec();
            let signature = resolve_scalar_signature(*func, &types)?;
            let nullable = func.nullable(&fields.iter().map(|field| field.nullable).collect_vec());
            Ok(Field::computed(signature.ret, nullable))
        }
        MvPredType::AggFunc(typ) => {
            let call = AggFuncPred(expr.clone());
            let fields = child_fields(&call.args().to_vec())?;
            let ret = match call.signature() {
                Some(signature) => signature.ret,
                None => {
                    let types = fields.iter().map(|field| field.typ).collect_vec();
                    resolve_agg_signature(typ.func, &types)?.ret
                }
            };
            let nullable = call.nullable(&fields.iter().map(|field| field.nullable).collect_vec());
            Ok(Field::new(typ.func.name(), ret, nullable))
        }
        MvPredType::List | MvPredType::DataType(_) | MvPredType::Signature => Err(
            AnalysisError::InvalidExpression(format!("{} is not a scalar expression", expr.typ)),
        ),
    }
}

/// Derives the fields of every expression in `list`.
pub fn derive_list_fields(list: &ListPred, input: &Schema) -> Result<Vec<Field>, AnalysisError> {
    list.to_vec()
        .iter()
        .map(|expr| derive_expr_field(expr, input))
        .collect()
}
