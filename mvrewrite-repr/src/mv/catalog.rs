// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use super::definition::MaterializedViewDefinition;
use crate::error::AnalysisError;
use crate::functions::bind_plan;
use crate::plan_nodes::{AggFuncPred, ArcMvPlanNode, ArcMvPredNode};
use crate::properties::schema::{derive_plan_schema, Catalog, Schema};

/// What a query needs from a view.
#[derive(Clone, Debug)]
pub struct CandidateRequest {
    /// Input of the query's aggregate.
    pub input: ArcMvPlanNode,
    pub groups: Vec<ArcMvPredNode>,
    pub aggs: Vec<AggFuncPred>,
    /// Conjunction of the query's filter above the aggregate, in lineage form.
    pub predicate: Option<ArcMvPredNode>,
}

/// Source of views that might answer an aggregate query.
pub trait MaterializedViewCatalog: Send + Sync + 'static {
    /// Views worth trying for `request`, in preference order. Returning a view that turns out not
    /// to be usable is fine; the rewriter checks every candidate.
    fn candidate_views(&self, request: &CandidateRequest) -> Vec<Arc<MaterializedViewDefinition>>;
}

/// A snapshot of table and view schemas plus view definitions, held in memory.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    tables: HashMap<String, Schema>,
    views: Vec<Arc<MaterializedViewDefinition>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, name: impl Into<String>, schema: Schema) {
        self.tables.insert(name.into(), schema);
    }

    /// Binds `plan`, derives the schema of its stored rows and registers it as view `name`.
    pub fn register_view(
        &mut self,
        name: impl Into<String>,
        plan: ArcMvPlanNode,
    ) -> Result<Arc<MaterializedViewDefinition>, AnalysisError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(AnalysisError::not_applicable(&name, "name already in use"));
        }
        let plan = bind_plan(&*self, &plan)?;
        let schema = derive_plan_schema(&*self, &plan)?;
        let view = Arc::new(MaterializedViewDefinition::try_new(name, plan, schema)?);
        trace!(event = "register_view", view = %view, schema = %view.schema());
        self.views.push(view.clone());
        Ok(view)
    }

    pub fn views(&self) -> &[Arc<MaterializedViewDefinition>] {
        &self.views
    }
}

impl Catalog for InMemoryCatalog {
    fn get(&self, name: &str) -> Option<Schema> {
        if let Some(schema) = self.tables.get(name) {
            return Some(schema.clone());
        }
        self.views
            .iter()
            .find(|view| view.name() == name)
            .map(|view| view.schema().clone())
    }
}

impl MaterializedViewCatalog for InMemoryCatalog {
    /// Views defined over the same input as the query, in registration order.
    fn candidate_views(&self, request: &CandidateRequest) -> Vec<Arc<MaterializedViewDefinition>> {
        self.views
            .iter()
            .filter(|view| view.summary().input == request.input)
            .cloned()
            .collect()
    }
}
