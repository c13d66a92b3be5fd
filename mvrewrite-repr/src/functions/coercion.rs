// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::signature::{ArgType, FunctionSignature};
use crate::plan_nodes::ConstantType;

/// How far an actual argument type may be from a declared one. Searched from strictest to loosest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoercionLevel {
    Identical,
    NullOrIdentical,
    ImplicitlyCastable,
    ExplicitlyCastable,
}

impl CoercionLevel {
    pub const ALL: [CoercionLevel; 4] = [
        Self::Identical,
        Self::NullOrIdentical,
        Self::ImplicitlyCastable,
        Self::ExplicitlyCastable,
    ];

    fn accepts(&self, actual: ConstantType, declared: ArgType) -> bool {
        let ArgType::Exact(declared) = declared else {
            return true;
        };
        match self {
            Self::Identical => actual == declared,
            Self::NullOrIdentical => actual.is_null() || actual == declared,
            Self::ImplicitlyCastable => implicitly_castable(actual, declared),
            Self::ExplicitlyCastable => explicitly_castable(actual, declared),
        }
    }
}

/// Casts the binder may insert on its own: lossless numeric widening and date promotion.
pub fn implicitly_castable(from: ConstantType, to: ConstantType) -> bool {
    use ConstantType::*;
    if from == to || from.is_null() {
        return true;
    }
    match (from, to) {
        (from, to) if from.is_integer_like() && to.is_integer_like() => {
            let (Some(from_width), Some(to_width)) = (from.integer_width(), to.integer_width())
            else {
                return false;
            };
            if from.is_unsigned_integer() == to.is_unsigned_integer() {
                from_width <= to_width
            } else {
                // unsigned values only fit into strictly wider signed types
                from.is_unsigned_integer() && from_width < to_width
            }
        }
        (from, Float64 | Decimal) if from.is_integer_like() => true,
        (Decimal, Float64) => true,
        (Date, DateV2 | DateTime | DateTimeV2(_)) => true,
        (DateV2, DateTimeV2(_)) => true,
        (DateTime, DateTimeV2(_)) => true,
        (DateTimeV2(from_scale), DateTimeV2(to_scale)) => from_scale <= to_scale,
        (from, to) if from.is_string_like() && to.is_string_like() => true,
        _ => false,
    }
}

/// Casts a function may opt into. Anything renders as a string, strings parse into anything but
/// binary, and numbers, booleans and dates convert among their own kind.
pub fn explicitly_castable(from: ConstantType, to: ConstantType) -> bool {
    use ConstantType::*;
    if implicitly_castable(from, to) {
        return true;
    }
    match (from, to) {
        (Binary, _) | (_, Binary) | (_, Null) => false,
        (_, to) if to.is_string_like() => true,
        (from, _) if from.is_string_like() => true,
        (from, to) if from.is_numeric() && to.is_numeric() => true,
        (Bool, to) if to.is_numeric() => true,
        (from, Bool) if from.is_numeric() => true,
        (from, to) if from.is_date_like() && to.is_date_like() => true,
        _ => false,
    }
}

/// Finds the first declared signature, in declaration order, that accepts `arg_types` at the
/// strictest possible level.
pub fn search_signature<'a>(
    signatures: &'a [FunctionSignature],
    arg_types: &[ConstantType],
    allow_explicit_cast: bool,
) -> Option<&'a FunctionSignature> {
    CoercionLevel::ALL
        .iter()
        .filter(|level| allow_explicit_cast || **level != CoercionLevel::ExplicitlyCastable)
        .find_map(|level| {
            signatures.iter().find(|sig| {
                sig.accepts_arity(arg_types.len())
                    && arg_types.iter().enumerate().all(|(idx, actual)| {
                        sig.arg_type(idx)
                            .is_some_and(|declared| level.accepts(*actual, declared))
                    })
            })
        })
}
