// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Materialized views and their substitution for aggregate plans.

mod catalog;
mod definition;
mod lineage;
mod rewrite;
mod rollup;

pub use catalog::{CandidateRequest, InMemoryCatalog, MaterializedViewCatalog};
pub use definition::MaterializedViewDefinition;
pub use lineage::{canonical_call, normalize_expr, split_conjuncts, AggregateShape, AggregateSummary};
pub use rewrite::MvAggregateRewriter;
pub use rollup::{distinct_insensitive, rollup_function};
