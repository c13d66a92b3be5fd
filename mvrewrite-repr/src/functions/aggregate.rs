// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::signature::{ArgType, FunctionSignature, ResolvedSignature};
use crate::error::{AnalysisError, TypeCategory};
use crate::plan_nodes::ConstantType;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AggFunction {
    Count,
    Sum,
    Min,
    Max,
    Avg,
    AnyValue,
    BoolAnd,
    BoolOr,
    /// `window_funnel(window, mode, timestamp, cond1, cond2, ...)`: the length of the longest
    /// prefix of the condition chain matched by events inside one sliding time window.
    WindowFunnel,
}

impl std::fmt::Display for AggFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

lazy_static! {
    static ref COUNT_SIGNATURES: Vec<FunctionSignature> = vec![
        FunctionSignature::ret(ConstantType::Int64).args(vec![]),
        FunctionSignature::ret(ConstantType::Int64).var_args(vec![ArgType::Any]),
    ];
    static ref SUM_SIGNATURES: Vec<FunctionSignature> = vec![
        FunctionSignature::ret(ConstantType::Int64).args(vec![ConstantType::Int8.into()]),
        FunctionSignature::ret(ConstantType::Int64).args(vec![ConstantType::Int16.into()]),
        FunctionSignature::ret(ConstantType::Int64).args(vec![ConstantType::Int32.into()]),
        FunctionSignature::ret(ConstantType::Int64).args(vec![ConstantType::Int64.into()]),
        FunctionSignature::ret(ConstantType::Float64).args(vec![ConstantType::Float64.into()]),
        FunctionSignature::ret(ConstantType::Decimal).args(vec![ConstantType::Decimal.into()]),
    ];
    static ref FOLLOW_ARG_SIGNATURES: Vec<FunctionSignature> =
        vec![FunctionSignature::ret(ArgType::FollowArg(0)).args(vec![ArgType::Any])];
    static ref AVG_SIGNATURES: Vec<FunctionSignature> = vec![
        FunctionSignature::ret(ConstantType::Float64).args(vec![ConstantType::Float64.into()]),
        FunctionSignature::ret(ConstantType::Decimal).args(vec![ConstantType::Decimal.into()]),
    ];
    static ref BOOL_SIGNATURES: Vec<FunctionSignature> =
        vec![FunctionSignature::ret(ConstantType::Bool).args(vec![ConstantType::Bool.into()])];
    // The timestamp slot takes any type: legality checking guarantees a date-like argument and
    // `compute_signature` settles the final date-time type.
    static ref WINDOW_FUNNEL_SIGNATURES: Vec<FunctionSignature> =
        vec![FunctionSignature::ret(ConstantType::Int32).var_args(vec![
            ConstantType::Int64.into(),
            ConstantType::Utf8String.into(),
            ArgType::Any,
            ConstantType::Bool.into(),
        ])];
}

impl AggFunction {
    pub const ALL: [AggFunction; 9] = [
        Self::Count,
        Self::Sum,
        Self::Min,
        Self::Max,
        Self::Avg,
        Self::AnyValue,
        Self::BoolAnd,
        Self::BoolOr,
        Self::WindowFunnel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Avg => "avg",
            Self::AnyValue => "any_value",
            Self::BoolAnd => "bool_and",
            Self::BoolOr => "bool_or",
            Self::WindowFunnel => "window_funnel",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, AnalysisError> {
        Self::ALL
            .into_iter()
            .find(|func| func.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| AnalysisError::UnknownFunction(name.to_string()))
    }

    pub fn signatures(&self) -> &'static [FunctionSignature] {
        match self {
            Self::Count => &COUNT_SIGNATURES,
            Self::Sum => &SUM_SIGNATURES,
            Self::Min | Self::Max | Self::AnyValue => &FOLLOW_ARG_SIGNATURES,
            Self::Avg => &AVG_SIGNATURES,
            Self::BoolAnd | Self::BoolOr => &BOOL_SIGNATURES,
            Self::WindowFunnel => &WINDOW_FUNNEL_SIGNATURES,
        }
    }

    /// Whether signature search may fall back to explicit casts.
    pub fn explicitly_castable(&self) -> bool {
        matches!(self, Self::WindowFunnel)
    }

    pub fn check_arity(&self, arity: usize) -> Result<(), AnalysisError> {
        let (ok, expected) = match self {
            Self::Count => (true, "any number of"),
            Self::WindowFunnel => (arity >= 4, "at least 4"),
            _ => (arity == 1, "exactly 1"),
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

    /// Category checks on the raw argument types, run before any coercion.
    pub fn check_legality_before_type_coercion(
        &self,
        arg_types: &[ConstantType],
    ) -> Result<(), AnalysisError> {
        if *self != Self::WindowFunnel {
            return Ok(());
        }
        for (position, actual) in arg_types.iter().enumerate() {
            let expected = match position {
                0 => TypeCategory::Integer,
                1 => TypeCategory::String,
                2 => TypeCategory::DateOrDateTime,
                _ => TypeCategory::Boolean,
            };
            if !expected.contains(*actual) {
                return Err(AnalysisError::ArgumentCategoryMismatch {
                    function: self.name(),
                    position,
                    expected,
                    actual: *actual,
                });
            }
        }
        Ok(())
    }

    /// Function-specific adjustment of a resolved signature.
    pub fn compute_signature(&self, signature: ResolvedSignature) -> ResolvedSignature {
        if *self != Self::WindowFunnel {
            return signature;
        }
        signature.with_argument_types(|index, typ| match (index, typ) {
            (2, ConstantType::Date) => ConstantType::DateTime,
            (2, ConstantType::DateV2) => ConstantType::DateTimeV2(0),
            _ => typ,
        })
    }

    /// COUNT never returns NULL. Every other aggregate does when asked to or when any argument may.
    pub fn nullable(&self, always_nullable: bool, arg_nullable: &[bool]) -> bool {
        match self {
            Self::Count => false,
            _ => always_nullable || arg_nullable.iter().any(|nullable| *nullable),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::plan_nodes::ConstantType::*;

    #[test]
    fn names_round_trip() {
        for func in AggFunction::ALL {
            assert_eq!(AggFunction::from_name(func.name()), Ok(func));
        }
        assert_eq!(AggFunction::from_name("WINDOW_FUNNEL"), Ok(AggFunction::WindowFunnel));
        assert_eq!(
            AggFunction::from_name("median"),
            Err(AnalysisError::UnknownFunction("median".to_string()))
        );
    }

    #[test]
    fn window_funnel_legality() {
        let func = AggFunction::WindowFunnel;
        assert!(func
            .check_legality_before_type_coercion(&[Int64, Utf8String, DateTime, Bool, Bool])
            .is_ok());
        assert!(func
            .check_legality_before_type_coercion(&[UInt8, VarChar(8), DateV2, Bool])
            .is_ok());

        let err = func
            .check_legality_before_type_coercion(&[Float64, Utf8String, DateTime, Bool])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "argument 1 of window_funnel must be integer, but got Float64"
        );
        let err = func
            .check_legality_before_type_coercion(&[Int64, Int64, DateTime, Bool])
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::ArgumentCategoryMismatch {
                position: 1,
                expected: TypeCategory::String,
                ..
            }
        ));
        let err = func
            .check_legality_before_type_coercion(&[Int64, Utf8String, Utf8String, Bool])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "argument 3 of window_funnel must be DATE or DATETIME, but got Utf8String"
        );
        let err = func
            .check_legality_before_type_coercion(&[Int64, Utf8String, Date, Bool, Int32])
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::ArgumentCategoryMismatch {
                position: 4,
                expected: TypeCategory::Boolean,
                ..
            }
        ));
    }

    #[test]
    fn window_funnel_arity() {
        assert!(AggFunction::WindowFunnel.check_arity(3).is_err());
        assert!(AggFunction::WindowFunnel.check_arity(4).is_ok());
        assert!(AggFunction::Sum.check_arity(2).is_err());
        assert!(AggFunction::Count.check_arity(0).is_ok());
    }

    #[test]
    fn window_funnel_promotes_dates() {
        let resolved = |ts| ResolvedSignature {
            ret: Int32,
            args: vec![Int64, Utf8String, ts, Bool],
            var_args: true,
        };
        let func = AggFunction::WindowFunnel;
        assert_eq!(func.compute_signature(resolved(Date)).args[2], DateTime);
        assert_eq!(func.compute_signature(resolved(DateV2)).args[2], DateTimeV2(0));
        assert_eq!(func.compute_signature(resolved(DateTimeV2(6))).args[2], DateTimeV2(6));
        assert_eq!(
            AggFunction::Min.compute_signature(resolved(Date)),
            resolved(Date)
        );
    }

    #[test]
    fn nullability() {
        assert!(!AggFunction::Count.nullable(true, &[true]));
        assert!(AggFunction::Sum.nullable(true, &[false]));
        assert!(AggFunction::Sum.nullable(false, &[true]));
        assert!(!AggFunction::WindowFunnel.nullable(false, &[false, false, false, false]));
    }
}
