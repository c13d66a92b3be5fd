// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::functions::AggFunction;

/// The function that combines partial results of `func` computed over finer groups, if the
/// partial results can be combined at all. AVG is rebuilt from SUM and COUNT by the rewriter.
pub fn rollup_function(func: AggFunction) -> Option<AggFunction> {
    match func {
        AggFunction::Sum | AggFunction::Count => Some(AggFunction::Sum),
        AggFunction::Min => Some(AggFunction::Min),
        AggFunction::Max => Some(AggFunction::Max),
        AggFunction::AnyValue => Some(AggFunction::AnyValue),
        AggFunction::BoolAnd => Some(AggFunction::BoolAnd),
        AggFunction::BoolOr => Some(AggFunction::BoolOr),
        AggFunction::Avg | AggFunction::WindowFunnel => None,
    }
}

/// Whether DISTINCT can be ignored when combining partial results of `func`.
pub fn distinct_insensitive(func: AggFunction) -> bool {
    matches!(func, AggFunction::Min | AggFunction::Max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollup_table() {
        assert_eq!(rollup_function(AggFunction::Count), Some(AggFunction::Sum));
        assert_eq!(rollup_function(AggFunction::Max), Some(AggFunction::Max));
        assert_eq!(rollup_function(AggFunction::Avg), None);
        assert_eq!(rollup_function(AggFunction::WindowFunnel), None);
        assert!(distinct_insensitive(AggFunction::Min));
        assert!(!distinct_insensitive(AggFunction::Count));
    }
}
