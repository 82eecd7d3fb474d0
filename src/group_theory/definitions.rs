use crate::group_theory::{term, var};
use crate::kernel::formula::Formula;
use crate::kernel::signature::PredicateDefinition;
use crate::kernel::term::Term;
use crate::library::LibraryError;
use crate::set_theory::SetTheory;
use crate::theory::Theory;

/// The predicates that make up the group axioms.
/// Each one is an abbreviation, unfolded with `tactics::unfold`.
#[derive(Clone, Debug)]
pub struct GroupDefinitions {
    /// `binaryOperation(G, *)`
    pub binary_operation: PredicateDefinition,

    /// `associativity(G, *)`
    pub associativity: PredicateDefinition,

    /// `isNeutral(e, G, *)`
    pub is_neutral: PredicateDefinition,

    /// `identityExistence(G, *)`
    pub identity_existence: PredicateDefinition,

    /// `isInverse(y, x, G, *)`: y is an inverse of x
    pub is_inverse: PredicateDefinition,

    /// `inverseExistence(G, *)`
    pub inverse_existence: PredicateDefinition,

    /// `group(G, *)`
    pub group: PredicateDefinition,

    /// `subgroup(H, G, *)`
    pub subgroup: PredicateDefinition,
}

impl GroupDefinitions {
    pub fn define(theory: &mut Theory, sets: &SetTheory) -> Result<GroupDefinitions, LibraryError> {
        let (g, star) = (term("G"), term("*"));
        let (x, y, z, e) = (term("x"), term("y"), term("z"), term("e"));
        let in_g = |t: &Term| sets.member(t, &g);
        let op = |a: &Term, b: &Term| sets.op(a, &star, b);

        let binary_operation = theory.define_predicate(
            "binaryOperation",
            &[var("G"), var("*")],
            Formula::and(vec![
                sets.functional(&star),
                Formula::forall_all(
                    &[var("x"), var("y")],
                    Formula::implies(
                        Formula::and(vec![in_g(&x), in_g(&y)]),
                        Formula::and(vec![
                            sets.member(&sets.pair(&x, &y), &sets.relation_domain(&star)),
                            in_g(&op(&x, &y)),
                        ]),
                    ),
                ),
            ]),
        )?;

        let associativity = theory.define_predicate(
            "associativity",
            &[var("G"), var("*")],
            Formula::forall_all(
                &[var("x"), var("y"), var("z")],
                Formula::implies(
                    Formula::and(vec![in_g(&x), in_g(&y), in_g(&z)]),
                    op(&op(&x, &y), &z).equals(&op(&x, &op(&y, &z))),
                ),
            ),
        )?;

        let is_neutral = theory.define_predicate(
            "isNeutral",
            &[var("e"), var("G"), var("*")],
            Formula::and(vec![
                in_g(&e),
                Formula::forall(
                    &var("x"),
                    Formula::implies(
                        in_g(&x),
                        Formula::and(vec![op(&e, &x).equals(&x), op(&x, &e).equals(&x)]),
                    ),
                ),
            ]),
        )?;

        let identity_existence = theory.define_predicate(
            "identityExistence",
            &[var("G"), var("*")],
            Formula::exists(&var("e"), is_neutral.apply(vec![e.clone(), g.clone(), star.clone()])),
        )?;

        let neutral = |t: Term| is_neutral.apply(vec![t, g.clone(), star.clone()]);
        let is_inverse = theory.define_predicate(
            "isInverse",
            &[var("y"), var("x"), var("G"), var("*")],
            Formula::and(vec![in_g(&y), neutral(op(&x, &y)), neutral(op(&y, &x))]),
        )?;

        let inverse_existence = theory.define_predicate(
            "inverseExistence",
            &[var("G"), var("*")],
            Formula::forall(
                &var("x"),
                Formula::implies(
                    in_g(&x),
                    Formula::exists(
                        &var("y"),
                        is_inverse.apply(vec![y.clone(), x.clone(), g.clone(), star.clone()]),
                    ),
                ),
            ),
        )?;

        let args = vec![g.clone(), star.clone()];
        let group = theory.define_predicate(
            "group",
            &[var("G"), var("*")],
            Formula::and(vec![
                binary_operation.apply(args.clone()),
                associativity.apply(args.clone()),
                identity_existence.apply(args.clone()),
                inverse_existence.apply(args),
            ]),
        )?;

        let h = term("H");
        let restriction = sets.restricted_function(&star, &sets.cartesian_product(&h, &h));
        let subgroup = theory.define_predicate(
            "subgroup",
            &[var("H"), var("G"), var("*")],
            Formula::and(vec![
                group.apply(vec![g.clone(), star.clone()]),
                sets.subset(&h, &g),
                group.apply(vec![h.clone(), restriction]),
            ]),
        )?;

        let definitions = GroupDefinitions {
            binary_operation,
            associativity,
            is_neutral,
            identity_existence,
            is_inverse,
            inverse_existence,
            group,
            subgroup,
        };
        for definition in definitions.all() {
            theory.record(
                &format!("{}_definition", definition.name()),
                definition.theorem().clone(),
            )?;
        }
        Ok(definitions)
    }

    fn all(&self) -> [&PredicateDefinition; 8] {
        [
            &self.binary_operation,
            &self.associativity,
            &self.is_neutral,
            &self.identity_existence,
            &self.is_inverse,
            &self.inverse_existence,
            &self.group,
            &self.subgroup,
        ]
    }

    pub fn group(&self, g: &Term, star: &Term) -> Formula {
        self.group.apply(vec![g.clone(), star.clone()])
    }

    pub fn is_neutral(&self, e: &Term, g: &Term, star: &Term) -> Formula {
        self.is_neutral.apply(vec![e.clone(), g.clone(), star.clone()])
    }

    /// `isInverse(y, x, G, *)`
    pub fn is_inverse(&self, y: &Term, x: &Term, g: &Term, star: &Term) -> Formula {
        self.is_inverse
            .apply(vec![y.clone(), x.clone(), g.clone(), star.clone()])
    }

    pub fn subgroup(&self, h: &Term, g: &Term, star: &Term) -> Formula {
        self.subgroup.apply(vec![h.clone(), g.clone(), star.clone()])
    }
}
