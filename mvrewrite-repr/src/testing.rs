// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod tpch_catalog;

use std::sync::Arc;

use mvrewrite_core::explore::{ExploreOptimizer, ExploreOptions};
use mvrewrite_core::property::PropertyBuilderAny;
use mvrewrite_core::rules::{Rule, RuleSet};

pub use self::tpch_catalog::TpchCatalog;
use crate::functions::AggFunction;
use crate::mv::{InMemoryCatalog, MvAggregateRewriter};
use crate::plan_nodes::{
    AggFuncPred, ArcMvPlanNode, ArcMvPredNode, ColumnRefPred, ConstantPred, ListPred, LogicalAgg,
    LogicalScan, MvNodeType, MvReprPlanNode, MvReprPredNode,
};
use crate::properties::schema::{Catalog, SchemaPropertyBuilder};
use crate::rules::MaterializedViewAggregateRules;

/// An empty view catalog over the TPC-H tables.
pub fn tpch_in_memory_catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    for table in TpchCatalog::TABLES {
        if let Some(schema) = TpchCatalog.get(table) {
            catalog.add_table(*table, schema);
        }
    }
    catalog
}

/// Create an explore optimizer with the materialized view rules over `catalog`.
/// Note: Only provides the schema property currently
pub fn new_test_optimizer(
    catalog: InMemoryCatalog,
) -> (ExploreOptimizer<MvNodeType>, Arc<InMemoryCatalog>) {
    let catalog = Arc::new(catalog);
    let rewriter = MvAggregateRewriter::new(catalog.clone(), catalog.clone(), true);
    let rules: Vec<Arc<dyn Rule<MvNodeType, ExploreOptimizer<MvNodeType>>>> =
        MaterializedViewAggregateRules::new(rewriter).build_rules();
    let optimizer = ExploreOptimizer::new_with_rules(
        rules,
        Arc::new([
            Box::new(SchemaPropertyBuilder::new(catalog.clone()))
                as Box<dyn PropertyBuilderAny<MvNodeType>>,
        ]),
        ExploreOptions::default(),
    );
    (optimizer, catalog)
}

pub fn col(idx: usize) -> ArcMvPredNode {
    ColumnRefPred::new(idx).into_pred_node()
}

pub fn agg_call(func: AggFunction, args: Vec<ArcMvPredNode>) -> ArcMvPredNode {
    AggFuncPred::new(func, false, false, args).into_pred_node()
}

pub fn agg(table: &str, calls: Vec<ArcMvPredNode>, groups: Vec<ArcMvPredNode>) -> ArcMvPlanNode {
    LogicalAgg::new(
        LogicalScan::new(table.to_string()).into_plan_node(),
        ListPred::new(calls),
        ListPred::new(groups),
    )
    .into_plan_node()
}

/// `window_funnel(3600, 'default', event_time, viewed, purchased)` over `events`.
pub fn window_funnel_call() -> ArcMvPredNode {
    AggFuncPred::window_funnel(
        false,
        false,
        ConstantPred::int64(3600).into_pred_node(),
        ConstantPred::string("default").into_pred_node(),
        col(2),
        col(4),
        vec![col(5)],
    )
    .into_pred_node()
}
