// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use anyhow::Result;
use mvrewrite_core::optimizer::Optimizer;

use crate::plan_nodes::{ArcMvPlanNode, MvNodeType};
use crate::properties::schema::{Schema, SchemaPropertyBuilder};

pub trait OptimizerExt {
    fn get_schema_of(&self, root_rel: ArcMvPlanNode) -> Result<Schema>;
}

impl<O: Optimizer<MvNodeType>> OptimizerExt for O {
    fn get_schema_of(&self, root_rel: ArcMvPlanNode) -> Result<Schema> {
        self.get_property::<SchemaPropertyBuilder>(root_rel, 0)
    }
}
