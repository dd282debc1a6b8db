//! Error types for partix-set

use partix_core::{EntityId, TermKind};
use partix_hub::RankId;
use thiserror::Error;

/// Result type for partix-set operations
pub type Result<T> = std::result::Result<T, Error>;

/// How far a failure reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Configuration or precondition error, detected identically on every rank
    RunFatal,
    /// Data error found by one rank while visiting its particles
    ProcessLocal,
}

/// Errors raised while parsing or applying a set command
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Set command before simulation box is defined")]
    NoDomain,

    #[error("Set command with no atoms existing")]
    NoAtoms,

    #[error("Illegal set command: {0}")]
    Illegal(String),

    #[error("Cannot set {0} for this atom style")]
    Unsupported(String),

    #[error("Cannot use set {style} with no {what} defined")]
    SelectionUnsupported {
        style: &'static str,
        what: &'static str,
    },

    #[error("Invalid {what} in set command: {value}")]
    InvalidValue { what: &'static str, value: String },

    #[error("Invalid random number seed in set command: {0}")]
    InvalidSeed(String),

    #[error("Cannot set non-zero image flag for non-periodic dimension {0}")]
    NonPeriodicImage(char),

    #[error("Could not find set group ID {0}")]
    UnknownGroup(String),

    #[error("Set region ID {0} does not exist")]
    UnknownRegion(String),

    #[error("Could not identify the per-atom property {0}")]
    UnknownProperty(String),

    #[error("Property {name} needs {expected} values, got {got}")]
    PropertyArity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Property {0} has no values yet; set it only after it has been initialized")]
    PropertyUninitialized(String),

    #[error("{kind} partner {id} missing in set command on {rank}")]
    MissingPartner {
        rank: RankId,
        kind: TermKind,
        id: EntityId,
    },

    #[error("{rank}: {source}")]
    Local {
        rank: RankId,
        source: partix_core::Error,
    },

    #[error(transparent)]
    Core(#[from] partix_core::Error),

    #[error(transparent)]
    Hub(#[from] partix_hub::Error),
}

impl Error {
    pub fn severity(&self) -> Severity {
        match self {
            Error::MissingPartner { .. } | Error::Local { .. } => Severity::ProcessLocal,
            _ => Severity::RunFatal,
        }
    }

    pub fn is_run_fatal(&self) -> bool {
        self.severity() == Severity::RunFatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        assert_eq!(Error::NoAtoms.severity(), Severity::RunFatal);
        assert!(Error::NonPeriodicImage('x').is_run_fatal());

        let local = Error::Local {
            rank: RankId(1),
            source: partix_core::Error::InvalidOperation("x".into()),
        };
        assert_eq!(local.severity(), Severity::ProcessLocal);

        let missing = Error::MissingPartner {
            rank: RankId(0),
            kind: TermKind::Angle,
            id: EntityId(9),
        };
        assert_eq!(missing.severity(), Severity::ProcessLocal);
        assert_eq!(
            missing.to_string(),
            "Angle partner atom:9 missing in set command on Rank(0)"
        );
    }
}
