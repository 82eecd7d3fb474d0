pub mod certificate;
pub mod checker;
pub mod cnf;
pub mod description;
pub mod group_theory;
pub mod kernel;
pub mod lemmas;
pub mod library;
pub mod model;
pub mod proof_step;
pub mod set_theory;
pub mod tactics;
pub mod theory;

#[cfg(test)]
mod tests;
