// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

use crate::plan_nodes::ConstantType;

/// Coarse type classes checked before any coercion takes place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Integer,
    String,
    DateOrDateTime,
    Boolean,
}

impl std::fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::String => write!(f, "string"),
            Self::DateOrDateTime => write!(f, "DATE or DATETIME"),
            Self::Boolean => write!(f, "boolean"),
        }
    }
}

impl TypeCategory {
    pub fn contains(&self, typ: ConstantType) -> bool {
        match self {
            Self::Integer => typ.is_integer_like(),
            Self::String => typ.is_string_like(),
            Self::DateOrDateTime => typ.is_date_like(),
            Self::Boolean => typ.is_boolean(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("argument {} of {function} must be {expected}, but got {actual}", .position + 1)]
    ArgumentCategoryMismatch {
        function: &'static str,
        /// Zero-based argument position.
        position: usize,
        expected: TypeCategory,
        actual: ConstantType,
    },
    #[error("{function} expects {expected} arguments, but got {actual}")]
    ArityMismatch {
        function: &'static str,
        expected: String,
        actual: usize,
    },
    #[error("no signature of {function} accepts ({args})")]
    NoMatchingSignature { function: &'static str, args: String },
    #[error("unknown function {0}")]
    UnknownFunction(String),
    #[error("unknown table or view {0}")]
    UnknownRelation(String),
    #[error("invalid expression: {0}")]
    InvalidExpression(String),
    #[error("materialized view {view} is not applicable: {reason}")]
    RewriteNotApplicable { view: String, reason: String },
}

impl AnalysisError {
    pub(crate) fn not_applicable(view: impl ToString, reason: impl ToString) -> Self {
        Self::RewriteNotApplicable {
            view: view.to_string(),
            reason: reason.to_string(),
        }
    }
}
