//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{debug, debug_span, info};

// IS-IS debug messages.
#[derive(Debug)]
pub enum Debug<'a> {
    // Validation
    ValidationSkipped,
    ValidationPassed(&'a str),
    // Generation
    ConfigRemoval,
    ConfigGenerated(&'a str, usize),
    // Apply
    SnapshotLoaded(&'a str, usize),
    SectionsExcised(&'a str, &'a str, usize),
    SectionsInserted(&'a str, bool),
    ConfigDiff(&'a str, &'a str),
    Commit(&'a str, usize, usize),
    RemovalVerified(&'a str),
}

// ===== impl Debug =====

impl Debug<'_> {
    // Log debug message using the tracing API.
    pub(crate) fn log(&self) {
        match self {
            Debug::ValidationSkipped | Debug::ConfigRemoval => {
                debug!("{}", self);
            }
            Debug::ValidationPassed(domain) => {
                debug!(%domain, "{}", self);
            }
            Debug::ConfigGenerated(template, lines) => {
                debug!(%template, %lines, "{}", self);
            }
            Debug::SnapshotLoaded(daemon, lines) => {
                debug_span!("daemon", name = %daemon).in_scope(|| {
                    debug!(%lines, "{}", self);
                })
            }
            Debug::SectionsExcised(daemon, pattern, count) => {
                debug_span!("daemon", name = %daemon).in_scope(|| {
                    debug!(%pattern, %count, "{}", self);
                })
            }
            Debug::SectionsInserted(daemon, anchor_found) => {
                debug_span!("daemon", name = %daemon).in_scope(|| {
                    debug!(%anchor_found, "{}", self);
                })
            }
            Debug::ConfigDiff(daemon, diff) => {
                debug_span!("daemon", name = %daemon).in_scope(|| {
                    debug!("{}\n{}", self, diff);
                })
            }
            Debug::Commit(daemon, attempt, total) => {
                debug_span!("daemon", name = %daemon).in_scope(|| {
                    info!(%attempt, %total, "{}", self);
                })
            }
            Debug::RemovalVerified(daemon) => {
                debug_span!("daemon", name = %daemon).in_scope(|| {
                    debug!("{}", self);
                })
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::ValidationSkipped => {
                write!(f, "configuration removed, skipping validation")
            }
            Debug::ValidationPassed(..) => {
                write!(f, "configuration is valid")
            }
            Debug::ConfigRemoval => {
                write!(f, "configuration removed, nothing to render")
            }
            Debug::ConfigGenerated(..) => {
                write!(f, "configuration rendered")
            }
            Debug::SnapshotLoaded(..) => {
                write!(f, "loaded running configuration")
            }
            Debug::SectionsExcised(..) => {
                write!(f, "removed matching sections")
            }
            Debug::SectionsInserted(..) => {
                write!(f, "inserted new configuration")
            }
            Debug::ConfigDiff(..) => {
                write!(f, "configuration changes")
            }
            Debug::Commit(..) => {
                write!(f, "committing configuration")
            }
            Debug::RemovalVerified(..) => {
                write!(f, "verified configuration removal")
            }
        }
    }
}
