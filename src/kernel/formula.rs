use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, Not, Shr};

use serde::{Deserialize, Serialize};

use crate::kernel::substitution::Substitution;
use crate::kernel::symbol::{FunctionSymbol, PredicateSymbol};
use crate::kernel::term::{Term, Variable};

/// A first-order formula.
///
/// Equality and hashing are modulo α-equivalence: the names of bound variables
/// do not matter, the names of free variables do.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Formula {
    True,
    False,
    Predicate(PredicateSymbol, Vec<Term>),
    Equal(Term, Term),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    Forall(Variable, Box<Formula>),
    Exists(Variable, Box<Formula>),
    ExistsOne(Variable, Box<Formula>),
}

impl Formula {
    pub fn predicate(symbol: &PredicateSymbol, args: Vec<Term>) -> Formula {
        Formula::Predicate(symbol.clone(), args)
    }

    pub fn and(conjuncts: Vec<Formula>) -> Formula {
        Formula::And(conjuncts)
    }

    pub fn or(disjuncts: Vec<Formula>) -> Formula {
        Formula::Or(disjuncts)
    }

    pub fn implies(antecedent: Formula, consequent: Formula) -> Formula {
        Formula::Implies(Box::new(antecedent), Box::new(consequent))
    }

    pub fn iff(left: Formula, right: Formula) -> Formula {
        Formula::Iff(Box::new(left), Box::new(right))
    }

    pub fn negate(&self) -> Formula {
        Formula::Not(Box::new(self.clone()))
    }

    pub fn forall(variable: &Variable, body: Formula) -> Formula {
        Formula::Forall(variable.clone(), Box::new(body))
    }

    /// Nests universal quantifiers, the first variable outermost.
    pub fn forall_all(variables: &[Variable], body: Formula) -> Formula {
        variables
            .iter()
            .rev()
            .fold(body, |acc, variable| Formula::forall(variable, acc))
    }

    pub fn exists(variable: &Variable, body: Formula) -> Formula {
        Formula::Exists(variable.clone(), Box::new(body))
    }

    pub fn exists_one(variable: &Variable, body: Formula) -> Formula {
        Formula::ExistsOne(variable.clone(), Box::new(body))
    }

    /// The meaning of `∃!x. body`, which is `∃y. ∀x. ((x = y) ⇔ body)` for a fresh `y`.
    pub fn unfold_exists_one(variable: &Variable, body: &Formula) -> Formula {
        let mut avoid = body.free_variables();
        avoid.insert(variable.clone());
        let witness = Variable::new("y").fresh(&avoid);
        let x = Term::from(variable);
        let y = Term::from(&witness);
        Formula::exists(
            &witness,
            Formula::forall(variable, Formula::iff(x.equals(&y), body.clone())),
        )
    }

    pub fn as_not(&self) -> Option<&Formula> {
        match self {
            Formula::Not(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_and(&self) -> Option<&[Formula]> {
        match self {
            Formula::And(conjuncts) => Some(conjuncts),
            _ => None,
        }
    }

    pub fn as_implies(&self) -> Option<(&Formula, &Formula)> {
        match self {
            Formula::Implies(a, b) => Some((a, b)),
            _ => None,
        }
    }

    pub fn as_iff(&self) -> Option<(&Formula, &Formula)> {
        match self {
            Formula::Iff(a, b) => Some((a, b)),
            _ => None,
        }
    }

    pub fn as_forall(&self) -> Option<(&Variable, &Formula)> {
        match self {
            Formula::Forall(v, body) => Some((v, body)),
            _ => None,
        }
    }

    pub fn as_exists(&self) -> Option<(&Variable, &Formula)> {
        match self {
            Formula::Exists(v, body) => Some((v, body)),
            _ => None,
        }
    }

    pub fn as_exists_one(&self) -> Option<(&Variable, &Formula)> {
        match self {
            Formula::ExistsOne(v, body) => Some((v, body)),
            _ => None,
        }
    }

    /// Flattens nested conjunctions into their leaves, in order.
    pub fn conjuncts(&self) -> Vec<&Formula> {
        let mut answer = vec![];
        self.collect_conjuncts(&mut answer);
        answer
    }

    fn collect_conjuncts<'a>(&'a self, output: &mut Vec<&'a Formula>) {
        match self {
            Formula::And(conjuncts) => {
                for conjunct in conjuncts {
                    conjunct.collect_conjuncts(output);
                }
            }
            _ => output.push(self),
        }
    }

    /// Quantified formulas, predicates and equalities are opaque to propositional reasoning.
    pub fn is_atomic_for_propositional_logic(&self) -> bool {
        matches!(
            self,
            Formula::Predicate(..)
                | Formula::Equal(..)
                | Formula::Forall(..)
                | Formula::Exists(..)
                | Formula::ExistsOne(..)
        )
    }

    pub fn free_variables(&self) -> BTreeSet<Variable> {
        let mut answer = BTreeSet::new();
        self.collect_free(&mut vec![], &mut answer);
        answer
    }

    pub fn has_free(&self, variable: &Variable) -> bool {
        self.free_variables().contains(variable)
    }

    fn collect_free<'a>(&'a self, bound: &mut Vec<&'a Variable>, output: &mut BTreeSet<Variable>) {
        match self {
            Formula::True | Formula::False => {}
            Formula::Predicate(_, args) => {
                for arg in args {
                    collect_free_in_term(arg, bound, output);
                }
            }
            Formula::Equal(a, b) => {
                collect_free_in_term(a, bound, output);
                collect_free_in_term(b, bound, output);
            }
            Formula::Not(f) => f.collect_free(bound, output),
            Formula::And(fs) | Formula::Or(fs) => {
                for f in fs {
                    f.collect_free(bound, output);
                }
            }
            Formula::Implies(a, b) | Formula::Iff(a, b) => {
                a.collect_free(bound, output);
                b.collect_free(bound, output);
            }
            Formula::Forall(v, body) | Formula::Exists(v, body) | Formula::ExistsOne(v, body) => {
                bound.push(v);
                body.collect_free(bound, output);
                bound.pop();
            }
        }
    }

    /// Applies a simultaneous substitution to the free variables.
    /// A binder that would capture a variable of a replacement term is renamed first.
    pub fn substitute(&self, substitution: &Substitution) -> Formula {
        if substitution.is_empty() {
            return self.clone();
        }
        match self {
            Formula::True | Formula::False => self.clone(),
            Formula::Predicate(p, args) => Formula::Predicate(
                p.clone(),
                args.iter().map(|arg| arg.substitute(substitution)).collect(),
            ),
            Formula::Equal(a, b) => {
                Formula::Equal(a.substitute(substitution), b.substitute(substitution))
            }
            Formula::Not(f) => Formula::Not(Box::new(f.substitute(substitution))),
            Formula::And(fs) => {
                Formula::And(fs.iter().map(|f| f.substitute(substitution)).collect())
            }
            Formula::Or(fs) => Formula::Or(fs.iter().map(|f| f.substitute(substitution)).collect()),
            Formula::Implies(a, b) => Formula::implies(
                a.substitute(substitution),
                b.substitute(substitution),
            ),
            Formula::Iff(a, b) => {
                Formula::iff(a.substitute(substitution), b.substitute(substitution))
            }
            Formula::Forall(v, body) => {
                let (v, body) = substitute_binder(v, body, substitution);
                Formula::Forall(v, Box::new(body))
            }
            Formula::Exists(v, body) => {
                let (v, body) = substitute_binder(v, body, substitution);
                Formula::Exists(v, Box::new(body))
            }
            Formula::ExistsOne(v, body) => {
                let (v, body) = substitute_binder(v, body, substitution);
                Formula::ExistsOne(v, Box::new(body))
            }
        }
    }

    /// `self[term/variable]`
    pub fn instantiate(&self, variable: &Variable, term: &Term) -> Formula {
        self.substitute(&Substitution::single(variable, term))
    }

    /// A string that is equal for α-equivalent formulas.
    /// Bound variables are printed as `#depth` and free variables starting with `#` are escaped
    /// with another `#`, so the two never collide.
    /// Symbol names are printed as they are, so the key orders formulas but does not identify them.
    pub fn canonical_key(&self) -> String {
        let mut printer = Printer {
            bound: vec![],
            canonical: true,
            output: String::new(),
        };
        printer.formula(self);
        printer.output
    }

    /// Collects the function and predicate symbols that occur in the formula.
    pub fn collect_symbols<'a>(
        &'a self,
        functions: &mut BTreeSet<&'a FunctionSymbol>,
        predicates: &mut BTreeSet<&'a PredicateSymbol>,
    ) {
        match self {
            Formula::True | Formula::False => {}
            Formula::Predicate(symbol, args) => {
                predicates.insert(symbol);
                for arg in args {
                    arg.collect_functions(functions);
                }
            }
            Formula::Equal(a, b) => {
                a.collect_functions(functions);
                b.collect_functions(functions);
            }
            Formula::Not(f) => f.collect_symbols(functions, predicates),
            Formula::And(fs) | Formula::Or(fs) => {
                for f in fs {
                    f.collect_symbols(functions, predicates);
                }
            }
            Formula::Implies(a, b) | Formula::Iff(a, b) => {
                a.collect_symbols(functions, predicates);
                b.collect_symbols(functions, predicates);
            }
            Formula::Forall(_, body) | Formula::Exists(_, body) | Formula::ExistsOne(_, body) => {
                body.collect_symbols(functions, predicates)
            }
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Formula::True | Formula::False => 1,
            Formula::Predicate(_, args) => 1 + args.iter().map(|a| a.size()).sum::<usize>(),
            Formula::Equal(a, b) => 1 + a.size() + b.size(),
            Formula::Not(f) => 1 + f.size(),
            Formula::And(fs) | Formula::Or(fs) => 1 + fs.iter().map(|f| f.size()).sum::<usize>(),
            Formula::Implies(a, b) | Formula::Iff(a, b) => 1 + a.size() + b.size(),
            Formula::Forall(_, body) | Formula::Exists(_, body) | Formula::ExistsOne(_, body) => {
                1 + body.size()
            }
        }
    }
}

fn collect_free_in_term(term: &Term, bound: &[&Variable], output: &mut BTreeSet<Variable>) {
    match term {
        Term::Variable(v) => {
            if !bound.iter().any(|b| *b == v) {
                output.insert(v.clone());
            }
        }
        Term::Application(_, args) => {
            for arg in args {
                collect_free_in_term(arg, bound, output);
            }
        }
    }
}

fn substitute_binder(
    variable: &Variable,
    body: &Formula,
    substitution: &Substitution,
) -> (Variable, Formula) {
    let free = body.free_variables();
    let mut inner = substitution.without(variable).restricted_to(&free);
    if inner.is_empty() {
        return (variable.clone(), body.clone());
    }
    let range = inner.range_variables();
    if !range.contains(variable) {
        return (variable.clone(), body.substitute(&inner));
    }
    let mut avoid = range;
    avoid.extend(free);
    avoid.insert(variable.clone());
    let renamed = variable.fresh(&avoid);
    inner.set(variable.clone(), Term::from(&renamed));
    (renamed, body.substitute(&inner))
}

fn terms_alpha_eq(a: &Term, b: &Term, env: &[(&Variable, &Variable)]) -> bool {
    match (a, b) {
        (Term::Variable(x), Term::Variable(y)) => {
            let left = env.iter().rposition(|(l, _)| *l == x);
            let right = env.iter().rposition(|(_, r)| *r == y);
            match (left, right) {
                (Some(i), Some(j)) => i == j,
                (None, None) => x == y,
                _ => false,
            }
        }
        (Term::Application(f, xs), Term::Application(g, ys)) => {
            f == g
                && xs.len() == ys.len()
                && xs.iter().zip(ys).all(|(x, y)| terms_alpha_eq(x, y, env))
        }
        _ => false,
    }
}

fn alpha_eq<'a>(a: &'a Formula, b: &'a Formula, env: &mut Vec<(&'a Variable, &'a Variable)>) -> bool {
    match (a, b) {
        (Formula::True, Formula::True) | (Formula::False, Formula::False) => true,
        (Formula::Predicate(p, xs), Formula::Predicate(q, ys)) => {
            p == q
                && xs.len() == ys.len()
                && xs.iter().zip(ys).all(|(x, y)| terms_alpha_eq(x, y, env))
        }
        (Formula::Equal(a1, a2), Formula::Equal(b1, b2)) => {
            terms_alpha_eq(a1, b1, env) && terms_alpha_eq(a2, b2, env)
        }
        (Formula::Not(x), Formula::Not(y)) => alpha_eq(x, y, env),
        (Formula::And(xs), Formula::And(ys)) | (Formula::Or(xs), Formula::Or(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| alpha_eq(x, y, env))
        }
        (Formula::Implies(a1, a2), Formula::Implies(b1, b2))
        | (Formula::Iff(a1, a2), Formula::Iff(b1, b2)) => {
            alpha_eq(a1, b1, env) && alpha_eq(a2, b2, env)
        }
        (Formula::Forall(x, p), Formula::Forall(y, q))
        | (Formula::Exists(x, p), Formula::Exists(y, q))
        | (Formula::ExistsOne(x, p), Formula::ExistsOne(y, q)) => {
            env.push((x, y));
            let answer = alpha_eq(p, q, env);
            env.pop();
            answer
        }
        _ => false,
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Formula) -> bool {
        alpha_eq(self, other, &mut vec![])
    }
}

impl Eq for Formula {}

fn hash_term<H: Hasher>(term: &Term, bound: &[&Variable], state: &mut H) {
    match term {
        Term::Variable(v) => match bound.iter().rposition(|b| *b == v) {
            Some(i) => {
                0u8.hash(state);
                (bound.len() - i).hash(state);
            }
            None => {
                1u8.hash(state);
                v.hash(state);
            }
        },
        Term::Application(symbol, args) => {
            2u8.hash(state);
            symbol.hash(state);
            args.len().hash(state);
            for arg in args {
                hash_term(arg, bound, state);
            }
        }
    }
}

fn hash_formula<'a, H: Hasher>(formula: &'a Formula, bound: &mut Vec<&'a Variable>, state: &mut H) {
    std::mem::discriminant(formula).hash(state);
    match formula {
        Formula::True | Formula::False => {}
        Formula::Predicate(p, args) => {
            p.hash(state);
            for arg in args {
                hash_term(arg, bound, state);
            }
        }
        Formula::Equal(a, b) => {
            hash_term(a, bound, state);
            hash_term(b, bound, state);
        }
        Formula::Not(f) => hash_formula(f, bound, state),
        Formula::And(fs) | Formula::Or(fs) => {
            fs.len().hash(state);
            for f in fs {
                hash_formula(f, bound, state);
            }
        }
        Formula::Implies(a, b) | Formula::Iff(a, b) => {
            hash_formula(a, bound, state);
            hash_formula(b, bound, state);
        }
        Formula::Forall(v, body) | Formula::Exists(v, body) | Formula::ExistsOne(v, body) => {
            bound.push(v);
            hash_formula(body, bound, state);
            bound.pop();
        }
    }
}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_formula(self, &mut vec![], state);
    }
}

// Writes formulas with full parenthesization of connectives.
// In canonical mode, bound variables are written as #depth.
struct Printer<'a> {
    bound: Vec<&'a Variable>,
    canonical: bool,
    output: String,
}

impl<'a> Printer<'a> {
    fn variable(&mut self, v: &Variable) {
        if self.canonical {
            if let Some(i) = self.bound.iter().rposition(|b| *b == v) {
                self.output.push_str(&format!("#{}", i));
                return;
            }
            // Free names that look like #depth get a second #, so they never meet a bound one.
            if v.name().starts_with('#') {
                self.output.push('#');
            }
        }
        self.output.push_str(v.name());
    }

    fn term(&mut self, term: &Term) {
        match term {
            Term::Variable(v) => self.variable(v),
            Term::Application(symbol, args) => {
                self.output.push_str(symbol.name());
                if !args.is_empty() {
                    self.output.push('(');
                    self.terms(args);
                    self.output.push(')');
                }
            }
        }
    }

    fn terms(&mut self, terms: &[Term]) {
        for (i, term) in terms.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.term(term);
        }
    }

    fn joined(&mut self, formulas: &'a [Formula], separator: &str, empty: &str) {
        if formulas.is_empty() {
            self.output.push_str(empty);
            return;
        }
        self.output.push('(');
        for (i, f) in formulas.iter().enumerate() {
            if i > 0 {
                self.output.push_str(separator);
            }
            self.operand(f);
        }
        self.output.push(')');
    }

    fn binder(&mut self, quantifier: &str, v: &'a Variable, body: &'a Formula) {
        self.output.push_str(quantifier);
        self.bound.push(v);
        self.variable(v);
        self.output.push_str(". ");
        self.formula(body);
        self.bound.pop();
    }

    // Quantifiers extend as far right as possible, so they need parentheses as operands.
    fn operand(&mut self, formula: &'a Formula) {
        match formula {
            Formula::Forall(..) | Formula::Exists(..) | Formula::ExistsOne(..) => {
                self.output.push('(');
                self.formula(formula);
                self.output.push(')');
            }
            _ => self.formula(formula),
        }
    }

    fn formula(&mut self, formula: &'a Formula) {
        match formula {
            Formula::True => self.output.push('⊤'),
            Formula::False => self.output.push('⊥'),
            Formula::Predicate(p, args) => {
                if p.is_infix() && args.len() == 2 {
                    self.term(&args[0]);
                    self.output.push_str(&format!(" {} ", p.name()));
                    self.term(&args[1]);
                } else {
                    self.output.push_str(p.name());
                    if !args.is_empty() {
                        self.output.push('(');
                        self.terms(args);
                        self.output.push(')');
                    }
                }
            }
            Formula::Equal(a, b) => {
                self.term(a);
                self.output.push_str(" = ");
                self.term(b);
            }
            Formula::Not(f) => {
                self.output.push('¬');
                let wrap = match f.as_ref() {
                    Formula::Equal(..) => true,
                    Formula::Predicate(p, _) => p.is_infix(),
                    Formula::Forall(..) | Formula::Exists(..) | Formula::ExistsOne(..) => true,
                    _ => false,
                };
                if wrap {
                    self.output.push('(');
                    self.formula(f);
                    self.output.push(')');
                } else {
                    self.formula(f);
                }
            }
            Formula::And(fs) => self.joined(fs, " ∧ ", "⋀[]"),
            Formula::Or(fs) => self.joined(fs, " ∨ ", "⋁[]"),
            Formula::Implies(a, b) => {
                self.output.push('(');
                self.operand(a);
                self.output.push_str(" ⇒ ");
                self.operand(b);
                self.output.push(')');
            }
            Formula::Iff(a, b) => {
                self.output.push('(');
                self.operand(a);
                self.output.push_str(" ⇔ ");
                self.operand(b);
                self.output.push(')');
            }
            Formula::Forall(v, body) => self.binder("∀", v, body),
            Formula::Exists(v, body) => self.binder("∃", v, body),
            Formula::ExistsOne(v, body) => self.binder("∃!", v, body),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut printer = Printer {
            bound: vec![],
            canonical: false,
            output: String::new(),
        };
        printer.formula(self);
        write!(f, "{}", printer.output)
    }
}

impl BitAnd for Formula {
    type Output = Formula;

    fn bitand(self, rhs: Formula) -> Formula {
        Formula::And(vec![self, rhs])
    }
}

impl BitOr for Formula {
    type Output = Formula;

    fn bitor(self, rhs: Formula) -> Formula {
        Formula::Or(vec![self, rhs])
    }
}

impl Not for Formula {
    type Output = Formula;

    fn not(self) -> Formula {
        Formula::Not(Box::new(self))
    }
}

/// `a >> b` is the implication `a ⇒ b`.
impl Shr for Formula {
    type Output = Formula;

    fn shr(self, rhs: Formula) -> Formula {
        Formula::implies(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn p(args: Vec<Term>) -> Formula {
        Formula::predicate(&PredicateSymbol::new("P", args.len()), args)
    }

    fn member(a: Term, b: Term) -> Formula {
        Formula::predicate(&PredicateSymbol::new("∈", 2), vec![a, b])
    }

    fn hash_of(f: &Formula) -> u64 {
        let mut hasher = DefaultHasher::new();
        f.hash(&mut hasher);
        hasher.finish()
    }

    fn x() -> Variable {
        Variable::new("x")
    }

    fn y() -> Variable {
        Variable::new("y")
    }

    #[test]
    fn test_alpha_equivalence() {
        let a = Formula::forall(&x(), p(vec![Term::var("x"), Term::var("z")]));
        let b = Formula::forall(&y(), p(vec![Term::var("y"), Term::var("z")]));
        let c = Formula::forall(&y(), p(vec![Term::var("y"), Term::var("w")]));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
        assert_eq!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn test_alpha_equivalence_respects_binding_structure() {
        // ∀x.∀y.P(x, y) is not ∀x.∀y.P(y, x)
        let a = Formula::forall_all(&[x(), y()], p(vec![Term::var("x"), Term::var("y")]));
        let b = Formula::forall_all(&[x(), y()], p(vec![Term::var("y"), Term::var("x")]));
        assert_ne!(a, b);

        // A bound variable never equals a free one with the same name
        let c = Formula::forall(&x(), p(vec![Term::var("x"), Term::var("y")]));
        let d = Formula::forall(&y(), p(vec![Term::var("y"), Term::var("y")]));
        assert_ne!(c, d);
    }

    #[test]
    fn test_substitution_avoids_capture() {
        // (∀y. P(x, y))[y/x] must not become ∀y. P(y, y)
        let f = Formula::forall(&y(), p(vec![Term::var("x"), Term::var("y")]));
        let g = f.instantiate(&x(), &Term::var("y"));
        let (bound, body) = g.as_forall().unwrap();
        assert_ne!(bound, &y());
        assert_eq!(
            body,
            &p(vec![Term::var("y"), Term::from(bound)])
        );
        assert!(g.has_free(&y()));
        assert!(!g.has_free(&x()));
    }

    #[test]
    fn test_substitution_skips_bound_occurrences() {
        let f = p(vec![Term::var("x")]) & Formula::exists(&x(), p(vec![Term::var("x")]));
        let g = f.instantiate(&x(), &Term::empty_set());
        let expected = p(vec![Term::empty_set()]) & Formula::exists(&x(), p(vec![Term::var("x")]));
        assert_eq!(g, expected);
    }

    #[test]
    fn test_unfold_exists_one_picks_fresh_witness() {
        // The body already mentions y, so the witness must be renamed.
        let body = p(vec![Term::var("x"), Term::var("y")]);
        let unfolded = Formula::unfold_exists_one(&x(), &body);
        let (witness, inner) = unfolded.as_exists().unwrap();
        assert_ne!(witness, &y());
        assert_ne!(witness, &x());
        let expected = Formula::forall(
            &x(),
            Formula::iff(Term::var("x").equals(&Term::from(witness)), body.clone()),
        );
        assert_eq!(inner, &expected);
        assert_eq!(unfolded.free_variables(), [y()].into_iter().collect());
    }

    #[test]
    fn test_display() {
        let pair = FunctionSymbol::new("pair", 2);
        let f = Formula::forall(
            &x(),
            member(Term::var("x"), Term::var("G"))
                >> !Term::apply(&pair, vec![Term::var("x"), Term::var("x")]).equals(&Term::empty_set()),
        );
        assert_eq!(f.to_string(), "∀x. (x ∈ G ⇒ ¬(pair(x, x) = ∅))");
        let g = p(vec![Term::var("a")]) & Formula::exists_one(&x(), p(vec![Term::var("x")]));
        assert_eq!(g.to_string(), "(P(a) ∧ (∃!x. P(x)))");
        assert_eq!(g.canonical_key(), "(P(a) ∧ (∃!#0. P(#0)))");
    }

    #[test]
    fn test_canonical_key_keeps_free_hash_names_apart() {
        let bound = Formula::forall(&x(), p(vec![Term::var("x")]));
        let free = Formula::forall(&x(), p(vec![Term::var("#0")]));
        assert_ne!(bound, free);
        assert_eq!(bound.canonical_key(), "∀#0. P(#0)");
        assert_eq!(free.canonical_key(), "∀#0. P(##0)");
        assert_ne!(bound.canonical_key(), free.canonical_key());
    }

    #[test]
    fn test_collect_symbols() {
        let pair = FunctionSymbol::new("pair", 2);
        let f = Formula::forall(
            &x(),
            member(Term::apply(&pair, vec![Term::var("x"), Term::empty_set()]), Term::var("G"))
                | p(vec![Term::var("x")]),
        );
        let mut functions = BTreeSet::new();
        let mut predicates = BTreeSet::new();
        f.collect_symbols(&mut functions, &mut predicates);
        let empty = FunctionSymbol::empty_set();
        assert_eq!(functions, [&pair, &empty].into_iter().collect());
        let names: Vec<&str> = predicates.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["P", "∈"]);
    }

    #[test]
    fn test_conjuncts_flatten() {
        let a = p(vec![Term::var("a")]);
        let b = p(vec![Term::var("b")]);
        let c = p(vec![Term::var("c")]);
        let f = (a.clone() & b.clone()) & c.clone();
        assert_eq!(f.conjuncts(), vec![&a, &b, &c]);
    }
}
