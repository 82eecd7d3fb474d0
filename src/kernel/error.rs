use thiserror::Error;

/// A proof step whose side condition does not hold.
/// Every kernel rule either produces a theorem or one of these; there are no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    #[error("{rule}: {condition}")]
    Rejected { rule: &'static str, condition: String },

    #[error("{rule}: {atoms} propositional atoms exceed the limit of {limit}")]
    TooManyAtoms {
        rule: &'static str,
        atoms: usize,
        limit: usize,
    },

    #[error("{0} is already declared")]
    NameInUse(String),
}

impl ProofError {
    pub fn rejected(rule: &'static str, condition: impl Into<String>) -> ProofError {
        ProofError::Rejected {
            rule,
            condition: condition.into(),
        }
    }

    /// The rule that refused to fire, if the error came from a rule.
    pub fn rule(&self) -> Option<&'static str> {
        match self {
            ProofError::Rejected { rule, .. } | ProofError::TooManyAtoms { rule, .. } => Some(rule),
            ProofError::NameInUse(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProofError>;
