// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use anyhow::Result;

use crate::explore::Exploration;
use crate::nodes::{ArcPlanNode, NodeType};
use crate::property::PropertyBuilder;

pub trait Optimizer<T: NodeType> {
    /// Returns every plan reachable from `root_rel` through the registered rules, the input first.
    fn explore(&mut self, root_rel: ArcPlanNode<T>) -> Result<Exploration<T>>;

    fn get_property<P: PropertyBuilder<T>>(
        &self,
        root_rel: ArcPlanNode<T>,
        idx: usize,
    ) -> Result<P::Prop>;
}
