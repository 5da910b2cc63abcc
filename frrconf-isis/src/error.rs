//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use enum_as_inner::EnumAsInner;
use frrconf_utils::error::{DaemonError, RenderError, with_source};
use tracing::{error, warn};

// IS-IS reconciliation errors.
#[derive(Debug, EnumAsInner)]
pub enum Error {
    // Configuration rejected before any daemon interaction.
    Validation(ValidationError),
    // Template rendering
    Render(RenderError),
    // Daemon communication
    Daemon(DaemonError),
    RemovalIncomplete(String),
}

// IS-IS configuration violations.
//
// Only the first violation found is ever reported.
#[derive(Debug, Eq, PartialEq)]
pub enum ValidationError {
    DomainMissing,
    NetMissing,
    InterfaceMissing,
    AreaPasswordConflict,
    SpfDelayIncomplete(Vec<String>),
    // (domain, address family, protocol)
    RedistributeLevelMissing(String, String, String),
    // (domain, address family, protocol, level, process-wide level)
    RedistributeLevelMismatch(String, String, String, String, String),
    LabelBoundMissing(LabelBlock, LabelBound),
    LabelBoundInvalid(LabelBlock, LabelBound, String),
    LabelRangeInverted(LabelBlock),
}

// Segment Routing label blocks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelBlock {
    Global,
    Local,
}

// Label block boundaries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelBound {
    Low,
    High,
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::Validation(error) => {
                warn!(%error, "{}", self);
            }
            Error::Render(error) => {
                error!(error = %with_source(error), "{}", self);
            }
            Error::Daemon(error) => {
                error.log();
                error!("{}", self);
            }
            Error::RemovalIncomplete(daemon) => {
                error!(%daemon, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Validation(error) => error.fmt(f),
            Error::Render(..) => {
                write!(f, "failed to generate IS-IS configuration")
            }
            Error::Daemon(..) => {
                write!(f, "failed to apply IS-IS configuration")
            }
            Error::RemovalIncomplete(daemon) => {
                write!(
                    f,
                    "IS-IS configuration still present in {daemon} after removal"
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(error) => Some(error),
            Error::Render(error) => Some(error),
            Error::Daemon(error) => Some(error),
            Error::RemovalIncomplete(..) => None,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Error {
        Error::Validation(error)
    }
}

impl From<RenderError> for Error {
    fn from(error: RenderError) -> Error {
        Error::Render(error)
    }
}

impl From<DaemonError> for Error {
    fn from(error: DaemonError) -> Error {
        Error::Daemon(error)
    }
}

// ===== impl ValidationError =====

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::DomainMissing => {
                write!(f, "Routing domain name/tag must be set!")
            }
            ValidationError::NetMissing => {
                write!(f, "Network entity is mandatory!")
            }
            ValidationError::InterfaceMissing => {
                write!(f, "Interface used for routing updates is mandatory!")
            }
            ValidationError::AreaPasswordConflict => {
                write!(
                    f,
                    "Can not use both md5 and plaintext-password for ISIS area-password!"
                )
            }
            ValidationError::SpfDelayIncomplete(missing) => {
                write!(
                    f,
                    "All types of delay must be specified: {}",
                    missing.join(", ").replace('_', "-")
                )
            }
            ValidationError::RedistributeLevelMissing(domain, afi, proto) => {
                write!(
                    f,
                    "Redistribute level-1 or level-2 should be specified in \"protocols isis {domain} redistribute {afi} {proto}\""
                )
            }
            ValidationError::RedistributeLevelMismatch(
                domain,
                afi,
                proto,
                level,
                proc_level,
            ) => {
                write!(
                    f,
                    "\"protocols isis {domain} redistribute {afi} {proto} {}\" cannot be used with \"protocols isis {domain} level {}\"",
                    level.replace('_', "-"),
                    proc_level.replace('_', "-"),
                )
            }
            ValidationError::LabelBoundMissing(block, bound) => {
                write!(
                    f,
                    "Segment routing {block} block {bound} value must not be left blank"
                )
            }
            ValidationError::LabelBoundInvalid(block, bound, value) => {
                write!(
                    f,
                    "Segment routing {block} block {bound} value \"{value}\" is not a valid label"
                )
            }
            ValidationError::LabelRangeInverted(block) => {
                write!(
                    f,
                    "Segment routing {block} block low value must be lower than high value"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

// ===== impl LabelBlock =====

impl LabelBlock {
    pub(crate) fn path(&self) -> &'static str {
        match self {
            LabelBlock::Global => "segment_routing.global_block",
            LabelBlock::Local => "segment_routing.local_block",
        }
    }
}

impl std::fmt::Display for LabelBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelBlock::Global => write!(f, "global"),
            LabelBlock::Local => write!(f, "local"),
        }
    }
}

// ===== impl LabelBound =====

impl LabelBound {
    pub(crate) fn key(&self) -> &'static str {
        match self {
            LabelBound::Low => "low_label_value",
            LabelBound::High => "high_label_value",
        }
    }
}

impl std::fmt::Display for LabelBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelBound::Low => write!(f, "low"),
            LabelBound::High => write!(f, "high"),
        }
    }
}
