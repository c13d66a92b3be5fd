// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Function catalog and signature resolution.
//!
//! Resolving a call runs: arity check, the function's legality check on the raw argument types,
//! a search over the declared signatures from the strictest coercion level to the loosest,
//! placeholder substitution, and finally the function's own signature adjustment.

mod aggregate;
mod binder;
mod coercion;
mod scalar;
mod signature;

pub use aggregate::AggFunction;
pub use binder::{
    bind_agg_call, bind_plan, resolve_agg_signature, resolve_scalar_signature,
};
pub use coercion::{explicitly_castable, implicitly_castable, search_signature, CoercionLevel};
pub use scalar::ScalarFunction;
pub use signature::{ArgType, FunctionSignature, ResolvedSignature};
