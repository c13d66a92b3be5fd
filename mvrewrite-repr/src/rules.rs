// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod macros;
mod mv_aggregate;

use mvrewrite_core::nodes::NodeType;
pub use mv_aggregate::{MaterializedViewAggregateRules, MvAggregateRule};

use crate::plan_nodes::MvNodeType;

macros::define_rule_types!(
    /// `Filter(Projection(Agg(logical)))`
    MaterializedViewFilterProjectAggregate,
    /// `Projection(Agg(logical))`
    MaterializedViewProjectAggregate,
    /// `Filter(Agg(logical))`
    MaterializedViewFilterAggregate,
    /// `Agg(logical)`
    MaterializedViewAggregate,
);

pub(crate) fn is_logical(typ: &MvNodeType) -> bool {
    typ.is_logical()
}
