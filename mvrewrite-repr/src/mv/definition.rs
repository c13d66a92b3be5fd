// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::lineage::AggregateSummary;
use crate::error::AnalysisError;
use crate::plan_nodes::ArcMvPlanNode;
use crate::properties::schema::Schema;

/// A materialized view: its defining plan, the schema of its stored rows, and the lineage of every
/// stored column.
#[derive(Clone, Debug)]
pub struct MaterializedViewDefinition {
    name: String,
    plan: ArcMvPlanNode,
    schema: Schema,
    summary: AggregateSummary,
}

impl MaterializedViewDefinition {
    pub fn try_new(
        name: impl Into<String>,
        plan: ArcMvPlanNode,
        schema: Schema,
    ) -> Result<Self, AnalysisError> {
        let name = name.into();
        let summary = AggregateSummary::of_plan(&plan)
            .map_err(|err| AnalysisError::not_applicable(&name, err))?;
        if summary.outputs.len() != schema.len() {
            return Err(AnalysisError::not_applicable(
                &name,
                format!(
                    "plan produces {} columns but {} are stored",
                    summary.outputs.len(),
                    schema.len()
                ),
            ));
        }
        Ok(Self {
            name,
            plan,
            schema,
            summary,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plan(&self) -> &ArcMvPlanNode {
        &self.plan
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn summary(&self) -> &AggregateSummary {
        &self.summary
    }
}

impl std::fmt::Display for MaterializedViewDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
