// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::mem::discriminant;

use crate::nodes::{ArcPlanNode, NodeType};
use crate::rules::RuleMatcher;

fn match_node<T: NodeType>(
    children: &[RuleMatcher<T>],
    node: ArcPlanNode<T>,
) -> Option<ArcPlanNode<T>> {
    if let [RuleMatcher::AnyMany] = children {
        return Some(node);
    }
    if children.len() != node.children.len() {
        return None;
    }
    for (matcher, child) in children.iter().zip(node.children.iter()) {
        match_and_pick(matcher, child.clone())?;
    }
    Some(node)
}

/// Returns the binding for `node` if the whole pattern matches, leaving the plan untouched.
pub fn match_and_pick<T: NodeType>(
    matcher: &RuleMatcher<T>,
    node: ArcPlanNode<T>,
) -> Option<ArcPlanNode<T>> {
    match matcher {
        RuleMatcher::MatchNode { typ, children } => {
            if &node.typ != typ {
                return None;
            }
            match_node(children, node)
        }
        RuleMatcher::MatchDiscriminant {
            typ_discriminant,
            children,
        } => {
            if discriminant(&node.typ) != *typ_discriminant {
                return None;
            }
            match_node(children, node)
        }
        RuleMatcher::AnyWhen(pred) => pred(&node.typ).then_some(node),
        RuleMatcher::Any | RuleMatcher::AnyMany => Some(node),
    }
}

/// All subtrees of `root` in pre-order, each with the child-index path leading to it.
pub(crate) fn subtrees<T: NodeType>(root: &ArcPlanNode<T>) -> Vec<(Vec<usize>, ArcPlanNode<T>)> {
    fn walk<T: NodeType>(
        node: &ArcPlanNode<T>,
        path: &mut Vec<usize>,
        out: &mut Vec<(Vec<usize>, ArcPlanNode<T>)>,
    ) {
        out.push((path.clone(), node.clone()));
        for (idx, child) in node.children.iter().enumerate() {
            path.push(idx);
            walk(child, path, out);
            path.pop();
        }
    }
    let mut out = Vec::new();
    walk(root, &mut Vec::new(), &mut out);
    out
}

/// Rebuilds `root` with the subtree at `path` replaced by `replacement`.
pub(crate) fn replace_at<T: NodeType>(
    root: &ArcPlanNode<T>,
    path: &[usize],
    replacement: ArcPlanNode<T>,
) -> ArcPlanNode<T> {
    match path.split_first() {
        None => replacement,
        Some((&idx, rest)) => {
            let mut children = root.children.clone();
            children[idx] = replace_at(&children[idx], rest, replacement);
            root.with_children(children)
        }
    }
}
