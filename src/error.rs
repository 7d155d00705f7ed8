use num::BigUint;
use thiserror::Error;

/// Broad classification of an [`AmmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The `(q, delta, r)` triple is malformed. The caller must supply corrected inputs.
    InvalidInput,
    /// The inputs are well formed but violate a structural assumption of the algorithm, such as
    /// `delta` being an `r`-th power residue or `q` being prime.
    PreconditionViolation,
    /// The sampler gave up after the configured number of attempts.
    SamplingExhausted,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmmError {
    #[error("delta ({delta}) must be 1 or greater")]
    DeltaTooSmall { delta: BigUint },

    #[error("delta ({delta}) must be less than q ({q})")]
    DeltaTooLarge { delta: BigUint, q: BigUint },

    #[error("r ({r}) must be 2 or greater")]
    DegreeTooSmall { r: BigUint },

    #[error("cannot factorise 0 by r ({r})")]
    ZeroFactorisation { r: BigUint },

    #[error("r ({r}) must divide q - 1 ({q_minus_1}) without remainder")]
    DegreeNotDividing { r: BigUint, q_minus_1: BigUint },

    #[error("Greatest common divisor of r ({r}) and t ({t}) must be 1")]
    DegreeNotCoprime { r: BigUint, t: BigUint },

    #[error("delta ({delta}) must be an r-th power residue modulo q ({q}) for r ({r})")]
    NotResidue {
        delta: BigUint,
        r: BigUint,
        q: BigUint,
    },

    #[error("d ({d}) is not a power of a ({a}) modulo q ({q}); is q prime?")]
    NoDiscreteLog { d: BigUint, a: BigUint, q: BigUint },

    #[error("no element of order r ({r}) found after {attempts} samples")]
    SamplingExhausted { r: BigUint, attempts: u64 },
}

impl AmmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AmmError::DeltaTooSmall { .. }
            | AmmError::DeltaTooLarge { .. }
            | AmmError::DegreeTooSmall { .. }
            | AmmError::ZeroFactorisation { .. }
            | AmmError::DegreeNotDividing { .. }
            | AmmError::DegreeNotCoprime { .. } => ErrorKind::InvalidInput,
            AmmError::NotResidue { .. } | AmmError::NoDiscreteLog { .. } => {
                ErrorKind::PreconditionViolation
            }
            AmmError::SamplingExhausted { .. } => ErrorKind::SamplingExhausted,
        }
    }
}

pub type Result<T> = std::result::Result<T, AmmError>;
