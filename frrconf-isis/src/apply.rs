//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use std::sync::LazyLock as Lazy;

use frrconf_utils::document::SectionedDocument;
use frrconf_utils::session::DaemonSession;
use regex::Regex;
use serde::Deserialize;
use similar::TextDiff;

use crate::debug::Debug;
use crate::error::Error;
use crate::generate::RenderedConfig;

// Any interface section.
pub static INTERFACE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^interface \S+$").unwrap());
// Any IS-IS instance, whatever its tag.
pub static ROUTER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^router isis \S+$").unwrap());
// Sections that follow routing instances in FRR's canonical ordering.
pub static ANCHOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(ip prefix-list .*|ipv6 prefix-list .*|route-map .*|line vty)$")
        .unwrap()
});

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ApplyOptions {
    // Total number of commits issued when the protocol is removed. FRR's
    // reload may leave removed sections behind after a single pass.
    pub blank_commit_count: usize,
    // Check that no IS-IS instance survives a removal.
    pub verify_removal: bool,
}

// ===== impl ApplyOptions =====

impl Default for ApplyOptions {
    fn default() -> ApplyOptions {
        ApplyOptions {
            blank_commit_count: 5,
            verify_removal: false,
        }
    }
}

// ===== global functions =====

// Replaces the IS-IS configuration of the daemon bound to `session`.
//
// All interface and IS-IS instance sections are removed from the running
// configuration and the new block is inserted in their place. The resulting
// document is committed as a whole. Any daemon failure aborts the apply with
// no rollback.
pub fn apply<S>(
    session: &mut S,
    config: &RenderedConfig,
    options: &ApplyOptions,
) -> Result<(), Error>
where
    S: DaemonSession + ?Sized,
{
    let daemon = session.daemon().to_owned();

    // Snapshot.
    let running = session.load_snapshot()?;
    Debug::SnapshotLoaded(&daemon, running.lines().count()).log();
    let mut document = SectionedDocument::parse(&running);

    // Excise.
    for pattern in [&*INTERFACE_PATTERN, &*ROUTER_PATTERN] {
        let count = document.replace_sections(pattern, "");
        Debug::SectionsExcised(&daemon, pattern.as_str(), count).log();
    }

    // Insert.
    if !config.is_removal() {
        let found = document.insert_before(&ANCHOR_PATTERN, config.as_str());
        Debug::SectionsInserted(&daemon, found).log();
    }

    // Commit.
    let candidate = document.to_string();
    if tracing::enabled!(tracing::Level::DEBUG) {
        let diff = TextDiff::from_lines(&running, &candidate)
            .unified_diff()
            .header("running", "candidate")
            .to_string();
        Debug::ConfigDiff(&daemon, &diff).log();
    }
    let commits = if config.is_removal() {
        options.blank_commit_count.max(1)
    } else {
        1
    };
    for attempt in 1..=commits {
        Debug::Commit(&daemon, attempt, commits).log();
        session.commit(&candidate)?;
    }

    if config.is_removal() && options.verify_removal {
        let running = SectionedDocument::parse(&session.load_snapshot()?);
        if running.contains(&ROUTER_PATTERN) {
            return Err(Error::RemovalIncomplete(daemon));
        }
        Debug::RemovalVerified(&daemon).log();
    }

    Ok(())
}

// ===== unit tests =====
