//! Builds the whole library: set theory, then groups on top of it.

use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::checker::CheckerConfig;
use crate::description::DescriptionError;
use crate::group_theory::GroupTheory;
use crate::kernel::error::ProofError;
use crate::set_theory::SetTheory;
use crate::theory::{Theory, TheoryError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error(transparent)]
    Proof(#[from] ProofError),

    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error(transparent)]
    Theory(#[from] TheoryError),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LibraryConfig {
    pub checker: CheckerConfig,
}

/// Every theory the crate builds, along with the store they were recorded in.
#[derive(Clone, Debug)]
pub struct Library {
    pub theory: Theory,
    pub sets: SetTheory,
    pub groups: GroupTheory,
}

impl Library {
    pub fn build(config: &LibraryConfig) -> Result<Library, LibraryError> {
        let start = Instant::now();
        let mut theory = Theory::new(config.checker);
        let sets = SetTheory::build(&mut theory)?;
        info!(theorems = theory.len(), "set theory built");
        let groups = GroupTheory::build(&mut theory, &sets)?;
        info!(
            theorems = theory.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "library built"
        );
        Ok(Library {
            theory,
            sets,
            groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_limit_is_enforced_during_build() {
        let config = LibraryConfig {
            checker: CheckerConfig { max_atoms: 2 },
        };
        let err = Library::build(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("atoms"), "unexpected error: {}", message);
    }
}
