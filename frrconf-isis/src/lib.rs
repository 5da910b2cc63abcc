//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod apply;
pub mod debug;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod validation;
