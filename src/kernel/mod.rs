pub mod error;
pub mod formula;
pub mod rules;
pub mod sequent;
pub mod signature;
pub mod substitution;
pub mod symbol;
pub mod term;
pub mod theorem;

pub use error::ProofError;
pub use formula::Formula;
pub use sequent::Sequent;
pub use signature::{FunctionDefinition, PredicateDefinition, Signature};
pub use substitution::Substitution;
pub use symbol::{FunctionSymbol, PredicateSymbol};
pub use term::{Term, Variable};
pub use theorem::Theorem;
