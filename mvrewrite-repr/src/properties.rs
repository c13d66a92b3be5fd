// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

pub mod schema;

/// Name given to computed columns.
pub const DEFAULT_NAME: &str = "unnamed";
