// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Builds a [`RuleMatcher`](mvrewrite_core::rules::RuleMatcher) from a parenthesized tree of node
/// types. `logical` matches any logical plan, any other leaf name matches any plan.
macro_rules! define_matcher {
    ( ( $typ:expr $(, $children:tt )* ) ) => {
        RuleMatcher::MatchNode {
            typ: $typ,
            children: vec![
                $( crate::rules::macros::define_matcher!($children) ),*
            ],
        }
    };
    ( logical ) => {
        RuleMatcher::AnyWhen(crate::rules::is_logical)
    };
    ( $pick_one:tt ) => {
        RuleMatcher::Any
    };
}

/// Declares the rule identifiers. Rule names are the identifiers in snake case.
macro_rules! define_rule_types {
    ( $( $(#[$doc:meta])* $variant:ident ),* $(,)? ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum MvRuleType {
            $( $(#[$doc])* $variant, )*
        }

        impl MvRuleType {
            pub const ALL: &'static [MvRuleType] = &[ $( MvRuleType::$variant, )* ];

            camelpaste::paste! {
                pub fn name(&self) -> &'static str {
                    match self {
                        $( MvRuleType::$variant => stringify!([< $variant:snake >]), )*
                    }
                }
            }
        }

        impl std::fmt::Display for MvRuleType {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

pub(crate) use define_matcher;
pub(crate) use define_rule_types;
