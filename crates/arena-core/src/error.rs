//! Error types for the arena engine.
//!
//! Every fallible operation in this crate returns [`Result`]. Only
//! [`Error::DataFormat`] and [`Error::Io`] are fatal at startup; the rest are
//! recoverable outcomes the presentation layer is expected to handle.

use std::fmt;
use std::path::PathBuf;

use crate::unit::Side;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The kind of catalog entry a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// A weapon in the equipment catalog.
    Weapon,
    /// An armor in the equipment catalog.
    Armor,
    /// A unit class in the class table.
    Class,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::Armor => write!(f, "armor"),
            Self::Class => write!(f, "class"),
        }
    }
}

/// Errors surfaced by the arena engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The equipment definitions document is malformed or violates an
    /// invariant. No partial catalog is ever returned alongside this error.
    #[error("malformed equipment data: {0}")]
    DataFormat(String),

    /// The equipment definitions file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A lookup by name found nothing.
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// What was being looked up.
        kind: LookupKind,
        /// The requested name.
        name: String,
    },

    /// A unit was created with an empty name.
    #[error("unit name must not be empty")]
    InvalidName,

    /// An attack or skill was attempted without enough stamina.
    #[error("not enough stamina: {required:.1} required, {available:.1} available")]
    InsufficientStamina {
        /// Stamina the action costs.
        required: f64,
        /// Stamina the unit had.
        available: f64,
    },

    /// A fight was started before both combatants were chosen.
    #[error("no {0} has been chosen")]
    MissingCombatant(Side),
}

impl Error {
    pub(crate) fn not_found(kind: LookupKind, name: &str) -> Self {
        Self::NotFound {
            kind,
            name: name.to_string(),
        }
    }

    /// Returns `true` for errors a caller can recover from without restarting.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidName
                | Self::InsufficientStamina { .. }
                | Self::MissingCombatant(_)
        )
    }
}
