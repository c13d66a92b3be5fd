// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::nodes::NodeType;

/// A tree pattern over plan nodes. Matching never mutates the plan; a successful match binds the
/// whole matched subtree, which is handed to the rule as-is.
pub enum RuleMatcher<T: NodeType> {
    /// Match a node of type `typ` whose children match `children` position by position.
    MatchNode { typ: T, children: Vec<Self> },
    /// Match a node of the same variant as `typ_discriminant`, whatever data the variant carries.
    MatchDiscriminant {
        typ_discriminant: std::mem::Discriminant<T>,
        children: Vec<Self>,
    },
    /// Match any single node.
    Any,
    /// Match any single node whose type satisfies the predicate.
    AnyWhen(fn(&T) -> bool),
    /// Match all remaining children. Only valid as the sole child pattern.
    AnyMany,
}

impl<T: NodeType> RuleMatcher<T> {
    pub fn node(typ: T, children: Vec<Self>) -> Self {
        Self::MatchNode { typ, children }
    }

    /// Matches every node of `typ`'s variant.
    pub fn variant(typ: &T, children: Vec<Self>) -> Self {
        Self::MatchDiscriminant {
            typ_discriminant: std::mem::discriminant(typ),
            children,
        }
    }
}
