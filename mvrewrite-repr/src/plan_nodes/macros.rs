// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

macro_rules! define_plan_node {
    (
        $struct_name:ident : $meta_typ:tt,
        $variant:ident,
        [ $({ $child_id:literal, $child_name:ident : $child_meta_typ:ty }),* ] ,
        [ $({ $attr_id:literal, $attr_name:ident : $attr_meta_typ:ty }),* ]
    ) => {
        impl MvReprPlanNode for $struct_name {
            fn into_plan_node(self) -> ArcMvPlanNode {
                self.0
            }

            fn from_plan_node(plan_node: ArcMvPlanNode) -> Option<Self> {
                if plan_node.typ == MvNodeType::$variant {
                    Some(Self(plan_node))
                } else {
                    None
                }
            }

            fn explain(&self) -> pretty_xmlish::Pretty<'static> {
                use crate::plan_nodes::MvReprPredNode;

                let fields = vec![
                    $( (stringify!($attr_name), self.$attr_name().explain()) ),*
                ];

                pretty_xmlish::Pretty::simple_record(
                    stringify!($struct_name),
                    fields,
                    vec![
                        $( self.$child_name().explain() ),*
                    ],
                )
            }
        }

        impl $struct_name {
            pub fn new(
                $($child_name : $child_meta_typ,)*
                $($attr_name : $attr_meta_typ),*
            ) -> $struct_name {
                use crate::plan_nodes::MvReprPredNode;
                $struct_name(
                    MvPlanNode {
                        typ: MvNodeType::$variant,
                        children: vec![
                            $($child_name,)*
                        ],
                        predicates: vec![
                            $($attr_name.into_pred_node(),)*
                        ],
                    }
                    .into(),
                )
            }

            $(
                pub fn $child_name(&self) -> ArcMvPlanNode {
                    self.0.child($child_id)
                }
            )*

            $(
                pub fn $attr_name(&self) -> $attr_meta_typ {
                    use crate::plan_nodes::MvReprPredNode;
                    <$attr_meta_typ>::from_pred_node(self.0.predicate($attr_id)).unwrap()
                }
            )*
        }
    };
}

pub(crate) use define_plan_node;
