//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

#![cfg_attr(
    feature = "testing",
    allow(dead_code, unused_variables, unused_imports)
)]

pub mod document;
pub mod error;
pub mod render;
pub mod session;
pub mod tree;
