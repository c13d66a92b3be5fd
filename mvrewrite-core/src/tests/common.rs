// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::nodes::{ArcPlanNode, ArcPredNode, NodeType, PlanNode, PredNode, Value};
use crate::property::PropertyBuilder;

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum MemoTestRelTyp {
    Join,
    Project,
    Scan,
    Filter,
    Agg,
    /// Sort with the ascending flag.
    Sort(bool),
    PhysicalScan,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum MemoTestPredTyp {
    List,
    Expr,
    TableName,
    ColumnRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum MemoTestRuleTyp {
    ProjectMerge,
    FilterSwap,
    ProjectFanOut,
}

impl std::fmt::Display for MemoTestRelTyp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::fmt::Display for MemoTestPredTyp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::fmt::Display for MemoTestRuleTyp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl NodeType for MemoTestRelTyp {
    type PredType = MemoTestPredTyp;
    type RuleType = MemoTestRuleTyp;

    fn is_logical(&self) -> bool {
        !matches!(self, Self::PhysicalScan)
    }
}

pub(crate) fn join(
    left: ArcPlanNode<MemoTestRelTyp>,
    right: ArcPlanNode<MemoTestRelTyp>,
    cond: ArcPredNode<MemoTestRelTyp>,
) -> ArcPlanNode<MemoTestRelTyp> {
    Arc::new(PlanNode {
        typ: MemoTestRelTyp::Join,
        children: vec![left, right],
        predicates: vec![cond],
    })
}

pub(crate) fn agg(
    input: ArcPlanNode<MemoTestRelTyp>,
    group_bys: ArcPredNode<MemoTestRelTyp>,
) -> ArcPlanNode<MemoTestRelTyp> {
    Arc::new(PlanNode {
        typ: MemoTestRelTyp::Agg,
        children: vec![input],
        predicates: vec![group_bys],
    })
}

pub(crate) fn sort(input: ArcPlanNode<MemoTestRelTyp>, ascending: bool) -> ArcPlanNode<MemoTestRelTyp> {
    Arc::new(PlanNode {
        typ: MemoTestRelTyp::Sort(ascending),
        children: vec![input],
        predicates: vec![],
    })
}

pub(crate) fn scan(table: &str) -> ArcPlanNode<MemoTestRelTyp> {
    Arc::new(PlanNode {
        typ: MemoTestRelTyp::Scan,
        children: vec![],
        predicates: vec![table_name(table)],
    })
}

pub(crate) fn physical_scan(table: &str) -> ArcPlanNode<MemoTestRelTyp> {
    Arc::new(PlanNode {
        typ: MemoTestRelTyp::PhysicalScan,
        children: vec![],
        predicates: vec![table_name(table)],
    })
}

pub(crate) fn table_name(table: &str) -> ArcPredNode<MemoTestRelTyp> {
    Arc::new(PredNode {
        typ: MemoTestPredTyp::TableName,
        children: vec![],
        data: Some(Value::String(table.to_string().into())),
    })
}

pub(crate) fn project(
    input: ArcPlanNode<MemoTestRelTyp>,
    expr_list: ArcPredNode<MemoTestRelTyp>,
) -> ArcPlanNode<MemoTestRelTyp> {
    Arc::new(PlanNode {
        typ: MemoTestRelTyp::Project,
        children: vec![input],
        predicates: vec![expr_list],
    })
}

pub(crate) fn filter(
    input: ArcPlanNode<MemoTestRelTyp>,
    cond: ArcPredNode<MemoTestRelTyp>,
) -> ArcPlanNode<MemoTestRelTyp> {
    Arc::new(PlanNode {
        typ: MemoTestRelTyp::Filter,
        children: vec![input],
        predicates: vec![cond],
    })
}

pub(crate) fn list(items: Vec<ArcPredNode<MemoTestRelTyp>>) -> ArcPredNode<MemoTestRelTyp> {
    Arc::new(PredNode {
        typ: MemoTestPredTyp::List,
        children: items,
        data: None,
    })
}

pub(crate) fn expr(data: Value) -> ArcPredNode<MemoTestRelTyp> {
    Arc::new(PredNode {
        typ: MemoTestPredTyp::Expr,
        children: vec![],
        data: Some(data),
    })
}

pub(crate) fn column_ref(col: u64) -> ArcPredNode<MemoTestRelTyp> {
    Arc::new(PredNode {
        typ: MemoTestPredTyp::ColumnRef,
        children: vec![],
        data: Some(Value::UInt64(col)),
    })
}

/// Number of output columns. Every table in the tests has three.
pub(crate) struct TestColumnCountBuilder;

#[derive(Clone, Debug)]
pub(crate) struct TestColumnCount(pub usize);

impl std::fmt::Display for TestColumnCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PropertyBuilder<MemoTestRelTyp> for TestColumnCountBuilder {
    type Prop = TestColumnCount;

    fn derive(
        &self,
        typ: MemoTestRelTyp,
        predicates: &[ArcPredNode<MemoTestRelTyp>],
        children: &[&Self::Prop],
    ) -> Result<Self::Prop> {
        match typ {
            MemoTestRelTyp::Scan | MemoTestRelTyp::PhysicalScan => {
                let table = predicates[0].unwrap_data().as_str();
                if table.as_ref() == "missing" {
                    bail!("table {} does not exist", table);
                }
                Ok(TestColumnCount(3))
            }
            MemoTestRelTyp::Project => Ok(TestColumnCount(predicates[0].children.len())),
            MemoTestRelTyp::Filter | MemoTestRelTyp::Agg | MemoTestRelTyp::Sort(_) => {
                Ok((*children.first().context("missing child")?).clone())
            }
            MemoTestRelTyp::Join => Ok(TestColumnCount(children[0].0 + children[1].0)),
        }
    }

    fn property_name(&self) -> &'static str {
        "column_count"
    }
}
