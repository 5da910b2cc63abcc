//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use frrconf_utils::tree::{ConfigTree, normalize_key};

use crate::debug::Debug;
use crate::error::{LabelBlock, LabelBound, ValidationError};

// SPF delay (RFC 8405) timers that must be configured together.
pub const SPF_DELAY_TIMERS: [&str; 5] = [
    "holddown",
    "init_delay",
    "long_delay",
    "short_delay",
    "time_to_learn",
];

// Process-wide level that accepts redistribution into either level.
const LEVEL_ALL: &str = "level_1_2";

// Validates an IS-IS configuration tree.
//
// Checks run in a fixed order and the first violation is returned. An empty
// tree means the protocol is being removed and is always valid.
pub fn validate(tree: &ConfigTree) -> Result<(), ValidationError> {
    if tree.is_empty() {
        Debug::ValidationSkipped.log();
        return Ok(());
    }

    let domain = tree
        .get_str("domain")
        .filter(|domain| !domain.is_empty())
        .ok_or(ValidationError::DomainMissing)?;
    if tree.keys("net").is_empty() {
        return Err(ValidationError::NetMissing);
    }
    if tree.keys("interface").is_empty() {
        return Err(ValidationError::InterfaceMissing);
    }

    validate_area_password(tree)?;
    validate_spf_delay(tree)?;
    validate_redistribution(tree, &domain)?;
    validate_label_block(tree, LabelBlock::Global)?;
    validate_label_block(tree, LabelBlock::Local)?;

    Debug::ValidationPassed(&domain).log();
    Ok(())
}

// ===== helper functions =====

fn validate_area_password(tree: &ConfigTree) -> Result<(), ValidationError> {
    if tree.exists("area_password.md5")
        && tree.exists("area_password.plaintext_password")
    {
        return Err(ValidationError::AreaPasswordConflict);
    }

    Ok(())
}

fn validate_spf_delay(tree: &ConfigTree) -> Result<(), ValidationError> {
    if !tree.exists("spf_delay_ietf") {
        return Ok(());
    }

    let missing = SPF_DELAY_TIMERS
        .iter()
        .filter(|timer| !tree.exists(&format!("spf_delay_ietf.{timer}")))
        .map(|timer| timer.to_string())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(ValidationError::SpfDelayIncomplete(missing));
    }

    Ok(())
}

// Every redistributed protocol needs at least one level, and when the
// instance is restricted to a single level, all redistribution levels must
// match it.
fn validate_redistribution(
    tree: &ConfigTree,
    domain: &str,
) -> Result<(), ValidationError> {
    let proc_level = tree
        .get_str("level")
        .map(|level| normalize_key(&level))
        .filter(|level| level != LEVEL_ALL);

    for (afi, afi_tree) in tree.entries("redistribute") {
        for (proto, proto_tree) in afi_tree.entries("") {
            let levels = proto_tree
                .names()
                .iter()
                .map(|level| normalize_key(level))
                .collect::<Vec<_>>();
            if !levels.iter().any(|level| level == "level_1" || level == "level_2")
            {
                return Err(ValidationError::RedistributeLevelMissing(
                    domain.to_owned(),
                    afi,
                    proto,
                ));
            }

            let Some(proc_level) = &proc_level else {
                continue;
            };
            if let Some(level) = levels.iter().find(|level| *level != proc_level)
            {
                return Err(ValidationError::RedistributeLevelMismatch(
                    domain.to_owned(),
                    afi,
                    proto,
                    level.clone(),
                    proc_level.clone(),
                ));
            }
        }
    }

    Ok(())
}

// Both bounds of a label block must be given together, and they must form a
// non-empty range.
fn validate_label_block(
    tree: &ConfigTree,
    block: LabelBlock,
) -> Result<(), ValidationError> {
    if !tree.exists(block.path()) {
        return Ok(());
    }

    let low = label_bound(tree, block, LabelBound::Low)?;
    let high = label_bound(tree, block, LabelBound::High)?;
    match (low, high) {
        (Some(_), None) => Err(ValidationError::LabelBoundMissing(
            block,
            LabelBound::High,
        )),
        (None, Some(_)) => Err(ValidationError::LabelBoundMissing(
            block,
            LabelBound::Low,
        )),
        (Some(low), Some(high)) if low > high => {
            Err(ValidationError::LabelRangeInverted(block))
        }
        _ => Ok(()),
    }
}

fn label_bound(
    tree: &ConfigTree,
    block: LabelBlock,
    bound: LabelBound,
) -> Result<Option<u32>, ValidationError> {
    let path = format!("{}.{}", block.path(), bound.key());
    match tree.get_str(&path).filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ValidationError::LabelBoundInvalid(block, bound, value)),
        None => Ok(None),
    }
}
