//! Finite models, for checking what the library proves against concrete structures.
//!
//! Primitive symbols are interpreted by tables. Defined predicates are evaluated through
//! their bodies, and a defined function is evaluated by searching for the unique element
//! that satisfies its defining formula. A missing table entry evaluates to a junk element,
//! which belongs to nothing.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;
use tracing::trace;

use crate::kernel::formula::Formula;
use crate::kernel::sequent::Sequent;
use crate::kernel::signature::Signature;
use crate::kernel::symbol::EMPTY_SET;
use crate::kernel::term::{Term, Variable};
use crate::set_theory::SetTheory;

pub type Element = usize;

pub type Valuation = BTreeMap<Variable, Element>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("variable {0} has no value")]
    Unbound(String),

    #[error("no element named {0}")]
    UnknownElement(String),

    #[error("{name}({args}) has {count} values satisfying its definition")]
    NotUnique {
        name: String,
        args: String,
        count: usize,
    },

    #[error("{name} expects {expected} arguments but got {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },
}

type Key = (String, Vec<Element>);

pub struct FiniteModel<'a> {
    signature: &'a Signature,
    names: Vec<String>,
    by_name: HashMap<String, Element>,
    functions: HashMap<Key, Element>,
    predicates: HashSet<Key>,
    junk: Element,

    // Values of defined symbols, which are expensive to search for.
    function_cache: RefCell<HashMap<Key, Element>>,
    predicate_cache: RefCell<HashMap<Key, bool>>,
}

impl<'a> FiniteModel<'a> {
    pub fn new(signature: &'a Signature) -> FiniteModel<'a> {
        let mut model = FiniteModel {
            signature,
            names: vec![],
            by_name: HashMap::new(),
            functions: HashMap::new(),
            predicates: HashSet::new(),
            junk: 0,
            function_cache: RefCell::new(HashMap::new()),
            predicate_cache: RefCell::new(HashMap::new()),
        };
        model.junk = model.add_element("junk");
        let empty = model.add_element(EMPTY_SET);
        model.set_function(EMPTY_SET, vec![], empty);
        model
    }

    /// Adds an element, or returns the existing one with this name.
    pub fn add_element(&mut self, name: &str) -> Element {
        if let Some(&element) = self.by_name.get(name) {
            return element;
        }
        let element = self.names.len();
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), element);
        element
    }

    pub fn element(&self, name: &str) -> Result<Element, ModelError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ModelError::UnknownElement(name.to_string()))
    }

    pub fn name(&self, element: Element) -> &str {
        self.names.get(element).map(String::as_str).unwrap_or("?")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn junk(&self) -> Element {
        self.junk
    }

    pub fn set_function(&mut self, symbol: &str, args: Vec<Element>, value: Element) {
        self.functions.insert((symbol.to_string(), args), value);
    }

    pub fn set_predicate(&mut self, symbol: &str, args: Vec<Element>) {
        self.predicates.insert((symbol.to_string(), args));
    }

    /// Looks up elements by name, for building valuations.
    pub fn valuation(&self, pairs: &[(&str, &str)]) -> Result<Valuation, ModelError> {
        let mut valuation = Valuation::new();
        for (variable, element) in pairs {
            valuation.insert(Variable::new(variable), self.element(element)?);
        }
        Ok(valuation)
    }

    pub fn eval_term(&self, term: &Term, valuation: &Valuation) -> Result<Element, ModelError> {
        match term {
            Term::Variable(v) => valuation
                .get(v)
                .copied()
                .ok_or_else(|| ModelError::Unbound(v.to_string())),
            Term::Application(symbol, args) => {
                let values = args
                    .iter()
                    .map(|arg| self.eval_term(arg, valuation))
                    .collect::<Result<Vec<_>, _>>()?;
                self.apply_function(symbol.name(), values)
            }
        }
    }

    fn apply_function(&self, name: &str, args: Vec<Element>) -> Result<Element, ModelError> {
        let Some(definition) = self.signature.function_definition(name) else {
            let key = (name.to_string(), args);
            return Ok(self.functions.get(&key).copied().unwrap_or(self.junk));
        };
        let key = (name.to_string(), args);
        if let Some(&value) = self.function_cache.borrow().get(&key) {
            return Ok(value);
        }
        let params = definition.params();
        if params.len() != key.1.len() {
            return Err(ModelError::Arity {
                name: name.to_string(),
                expected: params.len(),
                found: key.1.len(),
            });
        }
        let mut valuation: Valuation = params.iter().cloned().zip(key.1.iter().copied()).collect();
        let mut found = vec![];
        for candidate in 0..self.len() {
            valuation.insert(definition.bound().clone(), candidate);
            if self.eval_formula(definition.body(), &valuation)? {
                found.push(candidate);
            }
        }
        if found.len() != 1 {
            return Err(ModelError::NotUnique {
                name: name.to_string(),
                args: self.describe(&key.1),
                count: found.len(),
            });
        }
        let value = found[0];
        trace!(name, args = %self.describe(&key.1), value = %self.name(value), "evaluated");
        self.function_cache.borrow_mut().insert(key, value);
        Ok(value)
    }

    fn apply_predicate(&self, name: &str, args: Vec<Element>) -> Result<bool, ModelError> {
        let Some(definition) = self.signature.predicate_definition(name) else {
            return Ok(self.predicates.contains(&(name.to_string(), args)));
        };
        let key = (name.to_string(), args);
        if let Some(&value) = self.predicate_cache.borrow().get(&key) {
            return Ok(value);
        }
        let params = definition.params();
        if params.len() != key.1.len() {
            return Err(ModelError::Arity {
                name: name.to_string(),
                expected: params.len(),
                found: key.1.len(),
            });
        }
        let valuation: Valuation = params.iter().cloned().zip(key.1.iter().copied()).collect();
        let value = self.eval_formula(definition.body(), &valuation)?;
        self.predicate_cache.borrow_mut().insert(key, value);
        Ok(value)
    }

    fn describe(&self, args: &[Element]) -> String {
        args.iter()
            .map(|&a| self.name(a))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn count_witnesses(
        &self,
        variable: &Variable,
        body: &Formula,
        valuation: &Valuation,
        stop_at: usize,
    ) -> Result<usize, ModelError> {
        let mut inner = valuation.clone();
        let mut count = 0;
        for element in 0..self.len() {
            inner.insert(variable.clone(), element);
            if self.eval_formula(body, &inner)? {
                count += 1;
                if count >= stop_at {
                    break;
                }
            }
        }
        Ok(count)
    }

    pub fn eval_formula(&self, formula: &Formula, valuation: &Valuation) -> Result<bool, ModelError> {
        match formula {
            Formula::True => Ok(true),
            Formula::False => Ok(false),
            Formula::Predicate(symbol, args) => {
                let values = args
                    .iter()
                    .map(|arg| self.eval_term(arg, valuation))
                    .collect::<Result<Vec<_>, _>>()?;
                self.apply_predicate(symbol.name(), values)
            }
            Formula::Equal(left, right) => {
                Ok(self.eval_term(left, valuation)? == self.eval_term(right, valuation)?)
            }
            Formula::Not(inner) => Ok(!self.eval_formula(inner, valuation)?),
            Formula::And(conjuncts) => {
                for conjunct in conjuncts {
                    if !self.eval_formula(conjunct, valuation)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Formula::Or(disjuncts) => {
                for disjunct in disjuncts {
                    if self.eval_formula(disjunct, valuation)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Formula::Implies(antecedent, consequent) => {
                if !self.eval_formula(antecedent, valuation)? {
                    return Ok(true);
                }
                self.eval_formula(consequent, valuation)
            }
            Formula::Iff(left, right) => {
                Ok(self.eval_formula(left, valuation)? == self.eval_formula(right, valuation)?)
            }
            Formula::Forall(variable, body) => {
                let negated = body.negate();
                Ok(self.count_witnesses(variable, &negated, valuation, 1)? == 0)
            }
            Formula::Exists(variable, body) => {
                Ok(self.count_witnesses(variable, body, valuation, 1)? > 0)
            }
            Formula::ExistsOne(variable, body) => {
                Ok(self.count_witnesses(variable, body, valuation, 2)? == 1)
            }
        }
    }

    /// Whether some conclusion holds whenever every assumption does.
    pub fn satisfies(&self, sequent: &Sequent, valuation: &Valuation) -> Result<bool, ModelError> {
        for assumption in sequent.left() {
            if !self.eval_formula(assumption, valuation)? {
                return Ok(true);
            }
        }
        for conclusion in sequent.right() {
            if self.eval_formula(conclusion, valuation)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Checks the sequent under every valuation that extends `fixed`.
    /// Returns a counterexample if there is one.
    pub fn find_counterexample(
        &self,
        sequent: &Sequent,
        fixed: &Valuation,
    ) -> Result<Option<Valuation>, ModelError> {
        let open: Vec<Variable> = sequent
            .free_variables()
            .into_iter()
            .filter(|v| !fixed.contains_key(v))
            .collect();
        let mut digits = vec![0; open.len()];
        loop {
            let mut valuation = fixed.clone();
            for (variable, &digit) in open.iter().zip(digits.iter()) {
                valuation.insert(variable.clone(), digit);
            }
            if !self.satisfies(sequent, &valuation)? {
                return Ok(Some(valuation));
            }

            // Advance the odometer
            let mut position = 0;
            loop {
                if position == digits.len() {
                    return Ok(None);
                }
                digits[position] += 1;
                if digits[position] < self.len() {
                    break;
                }
                digits[position] = 0;
                position += 1;
            }
        }
    }

    pub fn holds_everywhere(&self, sequent: &Sequent, fixed: &Valuation) -> Result<bool, ModelError> {
        Ok(self.find_counterexample(sequent, fixed)?.is_none())
    }

    /// Encodes a finite operation table the way the set theory sees functions.
    ///
    /// The carrier is named "G" and the operation "*". Each `pair(a, b)` of carrier elements
    /// is its own element, and the operation's members are the edges `pair(pair(a, b), a * b)`.
    /// With a subgroup, "H" is its carrier and "*|H" the operation restricted to `H × H`.
    pub fn operation_table(
        signature: &'a Signature,
        sets: &SetTheory,
        carrier: &[&str],
        table: &[Vec<usize>],
        subgroup: Option<&[usize]>,
    ) -> FiniteModel<'a> {
        let mut model = FiniteModel::new(signature);
        let member = sets.member.name().to_string();
        let pair = sets.pair.name().to_string();

        let elements: Vec<Element> = carrier.iter().map(|name| model.add_element(name)).collect();
        let g = model.add_element("G");
        let star = model.add_element("*");
        let domain = model.add_element("dom(*)");
        for &a in &elements {
            model.set_predicate(&member, vec![a, g]);
        }
        model.set_predicate(sets.functional.name(), vec![star]);
        model.set_function(sets.relation_domain.name(), vec![star], domain);

        let mut edges = HashMap::new();
        for (i, &a) in elements.iter().enumerate() {
            for (j, &b) in elements.iter().enumerate() {
                let Some(&k) = table.get(i).and_then(|row| row.get(j)) else {
                    continue;
                };
                let Some(&c) = elements.get(k) else {
                    continue;
                };
                let point = model.add_element(&format!("({}, {})", carrier[i], carrier[j]));
                let edge = model.add_element(&format!("(({}, {}), {})", carrier[i], carrier[j], carrier[k]));
                model.set_function(&pair, vec![a, b], point);
                model.set_function(&pair, vec![point, c], edge);
                model.set_predicate(&member, vec![point, domain]);
                model.set_predicate(&member, vec![edge, star]);
                edges.insert((i, j), (point, edge));
            }
        }

        let Some(subgroup) = subgroup else {
            return model;
        };
        let h = model.add_element("H");
        let product = model.add_element("H × H");
        let restricted = model.add_element("*|H");
        let restricted_domain = model.add_element("dom(*|H)");
        model.set_function(sets.cartesian_product.name(), vec![h, h], product);
        model.set_function(sets.restricted_function.name(), vec![star, product], restricted);
        model.set_predicate(sets.functional.name(), vec![restricted]);
        model.set_function(sets.relation_domain.name(), vec![restricted], restricted_domain);
        for &i in subgroup {
            if let Some(&a) = elements.get(i) {
                model.set_predicate(&member, vec![a, h]);
            }
            for &j in subgroup {
                if let Some(&(point, edge)) = edges.get(&(i, j)) {
                    model.set_predicate(&member, vec![point, product]);
                    model.set_predicate(&member, vec![point, restricted_domain]);
                    model.set_predicate(&member, vec![edge, restricted]);
                }
            }
        }
        model
    }
}
