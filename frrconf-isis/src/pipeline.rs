//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use frrconf_utils::render::Renderer;
use frrconf_utils::session::DaemonSession;
use frrconf_utils::tree::ConfigTree;

use crate::apply::{self, ApplyOptions};
use crate::error::Error;
use crate::generate::{self, RenderedConfig};
use crate::validation;

// Path of the IS-IS subtree inside the full configuration document.
pub const BASE_PATH: &str = "protocols.isis";

// Reconciles the daemon's IS-IS configuration with the desired tree.
//
// Validation failures are reported before the daemon is touched. Any later
// failure aborts the whole run.
pub fn run<S>(
    tree: &ConfigTree,
    renderer: &dyn Renderer,
    session: &mut S,
    options: &ApplyOptions,
) -> Result<(), Error>
where
    S: DaemonSession + ?Sized,
{
    validation::validate(tree)?;
    let config = generate::generate(tree, renderer)?;
    apply::apply(session, &config, options)
}

// Validates and renders the desired tree without contacting any daemon.
pub fn dry_run(
    tree: &ConfigTree,
    renderer: &dyn Renderer,
) -> Result<RenderedConfig, Error> {
    validation::validate(tree)?;
    generate::generate(tree, renderer)
}
