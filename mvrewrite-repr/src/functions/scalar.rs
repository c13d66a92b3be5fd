// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::signature::{ArgType, FunctionSignature};
use crate::error::AnalysisError;
use crate::plan_nodes::ConstantType;

/// Scalar functions the rewrite emits or needs to type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ScalarFunction {
    Coalesce,
    Abs,
}

impl std::fmt::Display for ScalarFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

lazy_static! {
    static ref COALESCE_SIGNATURES: Vec<FunctionSignature> =
        vec![FunctionSignature::ret(ArgType::FollowArg(0)).var_args(vec![ArgType::FollowArg(0)])];
    static ref ABS_SIGNATURES: Vec<FunctionSignature> = vec![
        FunctionSignature::ret(ConstantType::Int64).args(vec![ConstantType::Int64.into()]),
        FunctionSignature::ret(ConstantType::Float64).args(vec![ConstantType::Float64.into()]),
        FunctionSignature::ret(ConstantType::Decimal).args(vec![ConstantType::Decimal.into()]),
    ];
}

impl ScalarFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Coalesce => "coalesce",
            Self::Abs => "abs",
        }
    }

    pub fn signatures(&self) -> &'static [FunctionSignature] {
        match self {
            Self::Coalesce => &COALESCE_SIGNATURES,
            Self::Abs => &ABS_SIGNATURES,
        }
    }

    pub fn check_arity(&self, arity: usize) -> Result<(), AnalysisError> {
        let (ok, expected) = match self {
            Self::Coalesce => (arity >= 1, "at least 1"),
            Self::Abs => (arity == 1, "exactly 1"),
        };
        if ok {
            Ok(())
        } else {
            Err(AnalysisError::ArityMismatch {
                function: self.name(),
                expected: expected.to_string(),
                actual: arity,
            })
        }
    }

    /// COALESCE returns NULL only when every argument is NULL.
    pub fn nullable(&self, arg_nullable: &[bool]) -> bool {
        match self {
            Self::Coalesce => arg_nullable.iter().all(|nullable| *nullable),
            Self::Abs => arg_nullable.iter().any(|nullable| *nullable),
        }
    }
}
