//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::error::RenderError;
use crate::tree::ConfigTree;

// Template collaborator.
//
// Implementations must be pure: rendering the same template against the
// same tree always yields the same text.
pub trait Renderer {
    fn render(
        &self,
        template: &str,
        tree: &ConfigTree,
    ) -> Result<String, RenderError>;
}
