// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::new_without_default)]

pub mod explore;
pub mod nodes;
pub mod optimizer;
pub mod property;
pub mod rules;
