use std::collections::BTreeSet;
use std::sync::Arc;

use im::OrdMap;
use tracing::debug;

use crate::kernel::error::{ProofError, Result};
use crate::kernel::formula::Formula;
use crate::kernel::sequent::Sequent;
use crate::kernel::substitution::Substitution;
use crate::kernel::symbol::{FunctionSymbol, PredicateSymbol};
use crate::kernel::term::{Term, Variable};
use crate::kernel::theorem::{Extension, Theorem};
use crate::proof_step::{DefinitionKind, Rule};

/// A declared name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    Function(FunctionSymbol),
    Predicate(PredicateSymbol),
}

/// A predicate introduced as an abbreviation for a formula.
#[derive(Clone, Debug)]
pub struct PredicateDefinition {
    symbol: PredicateSymbol,
    params: Vec<Variable>,
    body: Formula,

    // ⊢ P(params) ⇔ body
    theorem: Theorem,
}

impl PredicateDefinition {
    pub fn symbol(&self) -> &PredicateSymbol {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        self.symbol.name()
    }

    pub fn params(&self) -> &[Variable] {
        &self.params
    }

    pub fn body(&self) -> &Formula {
        &self.body
    }

    /// `⊢ P(params) ⇔ body`
    pub fn theorem(&self) -> &Theorem {
        &self.theorem
    }

    /// The atom `P(args)`.
    pub fn apply(&self, args: Vec<Term>) -> Formula {
        Formula::predicate(&self.symbol, args)
    }

    /// The body with the parameters replaced by `args`.
    pub fn expand(&self, args: &[Term]) -> Formula {
        self.body.substitute(&Substitution::zip(&self.params, args))
    }
}

/// A function introduced as the unique value satisfying a formula.
#[derive(Clone, Debug)]
pub struct FunctionDefinition {
    symbol: FunctionSymbol,
    params: Vec<Variable>,
    bound: Variable,
    body: Formula,

    // ⊢ ∃!bound. body
    justification: Theorem,

    // ⊢ (f(params) = bound) ⇔ body
    theorem: Theorem,
}

impl FunctionDefinition {
    pub fn symbol(&self) -> &FunctionSymbol {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        self.symbol.name()
    }

    pub fn params(&self) -> &[Variable] {
        &self.params
    }

    pub fn bound(&self) -> &Variable {
        &self.bound
    }

    pub fn body(&self) -> &Formula {
        &self.body
    }

    pub fn justification(&self) -> &Theorem {
        &self.justification
    }

    pub fn theorem(&self) -> &Theorem {
        &self.theorem
    }

    /// The term `f(args)`.
    pub fn apply(&self, args: Vec<Term>) -> Term {
        Term::apply(&self.symbol, args)
    }

    /// The defining formula with the parameters replaced by `args` and the bound variable by `value`.
    pub fn expand(&self, args: &[Term], value: &Term) -> Formula {
        let mut substitution = Substitution::zip(&self.params, args);
        substitution.set(self.bound.clone(), value.clone());
        self.body.substitute(&substitution)
    }
}

/// The vocabulary of a theory, and the definitional rules that extend it.
///
/// Axioms and definitions are the only leaves of a derivation besides hypotheses and reflexivity,
/// so every way of introducing an unproved sequent goes through here.
/// A clone shares its history with the original, but the two diverge from the next extension on,
/// and theorems from one cannot be combined with theorems from the other.
#[derive(Clone, Debug)]
pub struct Signature {
    symbols: OrdMap<String, Symbol>,
    predicate_definitions: OrdMap<String, PredicateDefinition>,
    function_definitions: OrdMap<String, FunctionDefinition>,
    axioms: OrdMap<String, Theorem>,
    extension: Arc<Extension>,
}

impl Default for Signature {
    fn default() -> Self {
        Signature::new()
    }
}

fn check_distinct(params: &[Variable], rule: &'static str) -> Result<()> {
    let mut seen = BTreeSet::new();
    for param in params {
        if !seen.insert(param) {
            return Err(ProofError::rejected(
                rule,
                format!("parameter {} is listed twice", param),
            ));
        }
    }
    Ok(())
}

fn check_closed(
    formula: &Formula,
    allowed: &BTreeSet<Variable>,
    rule: &'static str,
) -> Result<()> {
    for v in formula.free_variables() {
        if !allowed.contains(&v) {
            return Err(ProofError::rejected(
                rule,
                format!("{} is free in {} but is not a parameter", v, formula),
            ));
        }
    }
    Ok(())
}

impl Signature {
    /// A signature containing only the empty set constant.
    pub fn new() -> Signature {
        let mut symbols = OrdMap::new();
        let empty = FunctionSymbol::empty_set();
        symbols.insert(empty.name().to_string(), Symbol::Function(empty));
        Signature {
            symbols,
            predicate_definitions: OrdMap::new(),
            function_definitions: OrdMap::new(),
            axioms: OrdMap::new(),
            extension: Extension::root(),
        }
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    fn knows_function(&self, symbol: &FunctionSymbol) -> bool {
        matches!(self.symbol(symbol.name()), Some(Symbol::Function(declared)) if declared == symbol)
    }

    fn knows_predicate(&self, symbol: &PredicateSymbol) -> bool {
        matches!(self.symbol(symbol.name()), Some(Symbol::Predicate(declared)) if declared == symbol)
    }

    /// The first symbol in `formula` that is not declared here at the arity it is used with,
    /// written as name/arity.
    pub fn unknown_symbol(&self, formula: &Formula) -> Option<String> {
        let mut functions = BTreeSet::new();
        let mut predicates = BTreeSet::new();
        formula.collect_symbols(&mut functions, &mut predicates);
        if let Some(f) = functions.into_iter().find(|f| !self.knows_function(f)) {
            return Some(format!("{}/{}", f.name(), f.arity()));
        }
        predicates
            .into_iter()
            .find(|p| !self.knows_predicate(p))
            .map(|p| format!("{}/{}", p.name(), p.arity()))
    }

    /// Like `unknown_symbol`, for a term.
    pub fn unknown_symbol_in_term(&self, term: &Term) -> Option<String> {
        let mut functions = BTreeSet::new();
        term.collect_functions(&mut functions);
        functions
            .into_iter()
            .find(|f| !self.knows_function(f))
            .map(|f| format!("{}/{}", f.name(), f.arity()))
    }

    fn check_symbols(&self, formula: &Formula, rule: &'static str) -> Result<()> {
        match self.unknown_symbol(formula) {
            Some(symbol) => Err(ProofError::rejected(
                rule,
                format!("{} uses {}, which is not declared", formula, symbol),
            )),
            None => Ok(()),
        }
    }

    /// Whether `theorem` only relies on axioms and definitions of this signature.
    pub fn admits(&self, theorem: &Theorem) -> bool {
        match theorem.extension() {
            Some(extension) => self.extension.extends(extension),
            None => true,
        }
    }

    fn extend(&mut self) -> Arc<Extension> {
        self.extension = Extension::child(&self.extension);
        self.extension.clone()
    }

    fn check_unused(&self, name: &str) -> Result<()> {
        if self.is_declared(name) || self.axioms.contains_key(name) {
            return Err(ProofError::NameInUse(name.to_string()));
        }
        Ok(())
    }

    /// Declares a primitive function symbol with no definition.
    pub fn declare_function(&mut self, name: &str, arity: usize) -> Result<FunctionSymbol> {
        self.check_unused(name)?;
        let symbol = FunctionSymbol::new(name, arity);
        self.extend();
        self.symbols
            .insert(name.to_string(), Symbol::Function(symbol.clone()));
        Ok(symbol)
    }

    /// Declares a primitive predicate symbol with no definition.
    pub fn declare_predicate(&mut self, name: &str, arity: usize) -> Result<PredicateSymbol> {
        self.check_unused(name)?;
        let symbol = PredicateSymbol::new(name, arity);
        self.extend();
        self.symbols
            .insert(name.to_string(), Symbol::Predicate(symbol.clone()));
        Ok(symbol)
    }

    /// Asserts `⊢ formula` without proof.
    pub fn axiom(&mut self, name: &str, formula: Formula) -> Result<Theorem> {
        self.check_unused(name)?;
        self.check_symbols(&formula, "axiom")?;
        let extension = self.extend();
        let theorem = Theorem::extend(
            Sequent::conclusion(formula),
            Rule::Definition(DefinitionKind::Axiom, name.to_string()),
            vec![],
            extension,
        );
        debug!(name, axiom = %theorem, "axiom");
        self.axioms.insert(name.to_string(), theorem.clone());
        Ok(theorem)
    }

    /// Introduces `P(params)` as an abbreviation for `body`.
    pub fn define_predicate(
        &mut self,
        name: &str,
        params: &[Variable],
        body: Formula,
    ) -> Result<PredicateDefinition> {
        const RULE: &str = "define predicate";
        self.check_unused(name)?;
        check_distinct(params, RULE)?;
        check_closed(&body, &params.iter().cloned().collect(), RULE)?;
        self.check_symbols(&body, RULE)?;

        let symbol = PredicateSymbol::new(name, params.len());
        let atom = Formula::predicate(&symbol, params.iter().map(Term::from).collect());
        let extension = self.extend();
        let theorem = Theorem::extend(
            Sequent::conclusion(Formula::iff(atom, body.clone())),
            Rule::Definition(DefinitionKind::Predicate, name.to_string()),
            vec![],
            extension,
        );
        let definition = PredicateDefinition {
            symbol: symbol.clone(),
            params: params.to_vec(),
            body,
            theorem,
        };
        debug!(name, definition = %definition.theorem, "predicate definition");
        self.symbols
            .insert(name.to_string(), Symbol::Predicate(symbol));
        self.predicate_definitions
            .insert(name.to_string(), definition.clone());
        Ok(definition)
    }

    /// Introduces `f(params)` as the unique `bound` satisfying `body`.
    /// The justification must be exactly `⊢ ∃!bound. body`, with no assumptions.
    pub fn define_function(
        &mut self,
        name: &str,
        params: &[Variable],
        bound: &Variable,
        body: Formula,
        justification: &Theorem,
    ) -> Result<FunctionDefinition> {
        const RULE: &str = "define function";
        self.check_unused(name)?;
        check_distinct(params, RULE)?;
        if params.contains(bound) {
            return Err(ProofError::rejected(
                RULE,
                format!("bound variable {} is also a parameter", bound),
            ));
        }
        let mut allowed: BTreeSet<Variable> = params.iter().cloned().collect();
        allowed.insert(bound.clone());
        check_closed(&body, &allowed, RULE)?;
        self.check_symbols(&body, RULE)?;

        let expected = Formula::exists_one(bound, body.clone());
        if !justification.is_unconditional() {
            return Err(ProofError::rejected(
                RULE,
                format!("justification {} has assumptions", justification),
            ));
        }
        if justification.conclusion() != Some(&expected) {
            return Err(ProofError::rejected(
                RULE,
                format!("justification {} does not prove {}", justification, expected),
            ));
        }
        if !self.admits(justification) {
            return Err(ProofError::rejected(
                RULE,
                format!("justification {} was proved in a different signature", justification),
            ));
        }

        let symbol = FunctionSymbol::new(name, params.len());
        let application = Term::apply(&symbol, params.iter().map(Term::from).collect());
        let extension = self.extend();
        let theorem = Theorem::extend(
            Sequent::conclusion(Formula::iff(
                application.equals(&Term::from(bound)),
                body.clone(),
            )),
            Rule::Definition(DefinitionKind::Function, name.to_string()),
            vec![justification.clone()],
            extension,
        );
        let definition = FunctionDefinition {
            symbol: symbol.clone(),
            params: params.to_vec(),
            bound: bound.clone(),
            body,
            justification: justification.clone(),
            theorem,
        };
        debug!(name, definition = %definition.theorem, "function definition");
        self.symbols
            .insert(name.to_string(), Symbol::Function(symbol));
        self.function_definitions
            .insert(name.to_string(), definition.clone());
        Ok(definition)
    }

    pub fn predicate_definition(&self, name: &str) -> Option<&PredicateDefinition> {
        self.predicate_definitions.get(name)
    }

    pub fn function_definition(&self, name: &str) -> Option<&FunctionDefinition> {
        self.function_definitions.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::CheckerConfig;
    use crate::kernel::rules;

    fn v(name: &str) -> Variable {
        Variable::new(name)
    }

    #[test]
    fn test_empty_set_is_builtin() {
        let signature = Signature::new();
        assert!(signature.is_declared("∅"));
        let mut signature = signature;
        assert_eq!(
            signature.declare_function("∅", 0).unwrap_err(),
            ProofError::NameInUse("∅".to_string())
        );
    }

    #[test]
    fn test_define_predicate() {
        let mut signature = Signature::new();
        let member = signature.declare_predicate("∈", 2).unwrap();
        let body = Formula::predicate(&member, vec![Term::var("x"), Term::var("A")]);
        let def = signature
            .define_predicate("inA", &[v("x"), v("A")], body.clone())
            .unwrap();
        assert!(def.theorem().is_unconditional());
        assert_eq!(
            def.expand(&[Term::empty_set(), Term::var("B")]),
            Formula::predicate(&member, vec![Term::empty_set(), Term::var("B")])
        );

        // A free variable that is not a parameter is refused
        let err = signature
            .define_predicate("inB", &[v("x")], body.clone())
            .unwrap_err();
        assert_eq!(err.rule(), Some("define predicate"));

        // So is a repeated parameter
        assert!(signature
            .define_predicate("inC", &[v("x"), v("A"), v("x")], body)
            .is_err());
    }

    #[test]
    fn test_define_function_needs_exact_justification() {
        let mut signature = Signature::new();
        let u = v("u");
        let body = Term::from(&u).equals(&Term::empty_set());

        // ⊢ ∃!u. u = ∅, by reflexivity and a tautology
        let refl = rules::right_refl(&Term::empty_set());
        let z = v("z");
        let unique = rules::right_forall(
            &rules::tautology(
                &CheckerConfig::default(),
                Sequent::conclusion(Formula::iff(
                    Term::from(&z).equals(&Term::empty_set()),
                    Term::from(&z).equals(&Term::empty_set()),
                )),
                &[],
            )
            .unwrap(),
            &u,
            &Formula::iff(
                Term::from(&u).equals(&Term::empty_set()),
                body.clone(),
            ),
            &z,
        )
        .unwrap();
        let witness = rules::right_exists(
            &unique,
            &v("y"),
            &Formula::forall(
                &u,
                Formula::iff(Term::from(&u).equals(&Term::var("y")), body.clone()),
            ),
            &Term::empty_set(),
        )
        .unwrap();
        let justification = rules::right_exists_one(&witness, &u, &body).unwrap();
        assert!(refl.is_unconditional());

        let def = signature
            .define_function("nothing", &[], &u, body.clone(), &justification)
            .unwrap();
        assert_eq!(
            def.theorem().conclusion(),
            Some(&Formula::iff(
                Term::constant(def.symbol()).equals(&Term::from(&u)),
                body.clone()
            ))
        );

        // The bound variable cannot double as a parameter
        assert!(signature
            .define_function("again", &[u.clone()], &u, body.clone(), &justification)
            .is_err());

        // A justification of a different formula is refused
        let other = Term::from(&u).equals(&Term::var("w"));
        assert!(signature
            .define_function("other", &[v("w")], &u, other, &justification)
            .is_err());
    }

    #[test]
    fn test_definition_body_cannot_mention_itself() {
        let mut signature = Signature::new();
        let p = PredicateSymbol::new("P", 0);
        let body = Formula::predicate(&p, vec![]).negate();
        let err = signature.define_predicate("P", &[], body).unwrap_err();
        assert_eq!(err.rule(), Some("define predicate"));
        assert!(!signature.is_declared("P"));
    }

    #[test]
    fn test_undeclared_symbols_are_refused() {
        let mut signature = Signature::new();
        let member = signature.declare_predicate("∈", 2).unwrap();
        let x = Term::var("x");

        let stray = Formula::predicate(&PredicateSymbol::new("Q", 1), vec![x.clone()]);
        let err = signature.define_predicate("R", &[v("x")], stray).unwrap_err();
        assert_eq!(err.rule(), Some("define predicate"));

        // A declared name used at the wrong arity counts as undeclared
        let wrong_arity = Formula::predicate(&PredicateSymbol::new("∈", 1), vec![x.clone()]);
        assert_eq!(signature.unknown_symbol(&wrong_arity), Some("∈/1".to_string()));
        let err = signature.axiom("bad", wrong_arity).unwrap_err();
        assert_eq!(err.rule(), Some("axiom"));

        let unknown_function = Term::apply(&FunctionSymbol::new("g", 1), vec![x.clone()]);
        assert_eq!(signature.unknown_symbol_in_term(&unknown_function), Some("g/1".to_string()));
        let in_axiom = Formula::predicate(&member, vec![unknown_function, x.clone()]);
        assert_eq!(signature.unknown_symbol(&in_axiom), Some("g/1".to_string()));
        assert!(signature.axiom("also_bad", in_axiom).is_err());

        let fine = Formula::predicate(&member, vec![x, Term::empty_set()]);
        assert_eq!(signature.unknown_symbol(&fine), None);
        assert!(signature.axiom("fine", fine).is_ok());
    }

    #[test]
    fn test_signatures_do_not_mix() {
        let config = CheckerConfig::default();
        let falsum = Sequent::conclusion(Formula::False);

        // Two unrelated signatures defining Q differently
        let mut one = Signature::new();
        let mut two = Signature::new();
        let q_true = one.define_predicate("Q", &[], Formula::True).unwrap();
        let q_false = two.define_predicate("Q", &[], Formula::False).unwrap();
        let err = rules::tautology(&config, falsum.clone(), &[q_true.theorem(), q_false.theorem()])
            .unwrap_err();
        assert_eq!(err.rule(), Some("tautology"));
        assert!(!one.admits(q_false.theorem()));

        // A clone shares history up to the split, and diverges after it
        let mut base = Signature::new();
        let r = base.declare_predicate("R", 0).unwrap();
        let shared = base.axiom("r", Formula::predicate(&r, vec![])).unwrap();
        let mut left = base.clone();
        let mut right = base.clone();
        let q_true = left.define_predicate("Q", &[], Formula::True).unwrap();
        let q_false = right.define_predicate("Q", &[], Formula::False).unwrap();
        assert!(left.admits(&shared) && right.admits(&shared));
        assert!(!left.admits(q_false.theorem()));
        let q_false_statement = q_false.theorem().conclusion().unwrap().clone();
        let from_left = rules::weaken(q_true.theorem(), &[q_false_statement.clone()], &[]);
        let err = rules::cut(q_false.theorem(), &from_left, &q_false_statement).unwrap_err();
        assert_eq!(err.rule(), Some("cut"));
        assert!(rules::right_and(
            &[q_true.theorem(), q_false.theorem()],
            &[
                q_true.theorem().conclusion().unwrap().clone(),
                q_false.theorem().conclusion().unwrap().clone()
            ]
        )
        .is_err());

        // Older theorems combine with newer ones from the same history
        let both = rules::right_and(
            &[&shared, q_true.theorem()],
            &[
                shared.conclusion().unwrap().clone(),
                q_true.theorem().conclusion().unwrap().clone(),
            ],
        )
        .unwrap();
        assert!(left.admits(&both));
        assert!(!base.admits(&both));
    }

    #[test]
    fn test_foreign_justification_is_refused() {
        let mut one = Signature::new();
        let c = one.declare_function("c", 0).unwrap();
        let u = v("u");
        let body = Term::from(&u).equals(&Term::constant(&c));
        let unique = one.axiom("c_unique", Formula::exists_one(&u, body.clone())).unwrap();

        let mut two = Signature::new();
        two.declare_function("c", 0).unwrap();
        let err = two
            .define_function("the_c", &[], &u, body.clone(), &unique)
            .unwrap_err();
        assert_eq!(err.rule(), Some("define function"));
        assert!(one.define_function("the_c", &[], &u, body, &unique).is_ok());
    }
}
