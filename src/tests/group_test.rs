use crate::kernel::formula::Formula;
use crate::kernel::sequent::Sequent;
use crate::kernel::term::{Term, Variable};
use crate::tests::common::{cyclic, eval, library, non_group_model, table_model, two_element_model, valuation};

fn g() -> Term {
    Term::var("G")
}

fn star() -> Term {
    Term::var("*")
}

#[test]
fn test_identity_is_a_conditional_description() {
    let groups = &library().groups;
    let identity = &groups.identity.description;
    assert!(identity.is_conditional());
    assert_eq!(identity.premise(), Some(&groups.definitions.group(&g(), &star())));
    assert_eq!(identity.default(), &Term::empty_set());
    assert!(identity.justification().is_unconditional());
}

#[test]
fn test_identity_theorem_statements() {
    let library = library();
    let groups = &library.groups;
    let group = groups.definitions.group(&g(), &star());
    let e = Term::var("e");
    assert_eq!(
        groups.identity.uniqueness.sequent(),
        &Sequent::new(
            vec![group.clone()],
            vec![Formula::exists_one(
                &Variable::new("e"),
                groups.definitions.is_neutral(&e, &g(), &star())
            )]
        )
    );
    let identity = groups.identity.apply(&g(), &star());
    assert_eq!(
        groups.identity.is_neutral.sequent(),
        &Sequent::new(
            vec![group],
            vec![groups.definitions.is_neutral(&identity, &g(), &star())]
        )
    );
    assert!(library
        .theory
        .theorem("identity_is_neutral")
        .unwrap()
        .same_as(&groups.identity.is_neutral));
}

#[test]
fn test_identity_of_the_two_element_group() {
    let library = library();
    let model = two_element_model(library);
    let identity = library.groups.identity.apply(&g(), &star());
    assert_eq!(eval(&model, &identity, &valuation(&model, &[])), "a");
}

#[test]
fn test_non_group_falls_back_to_the_default() {
    let library = library();
    let model = non_group_model(library);
    let at = valuation(&model, &[("x", "a")]);
    let group = library.groups.definitions.group(&g(), &star());
    assert!(!model.eval_formula(&group, &at).unwrap());

    let identity = library.groups.identity.apply(&g(), &star());
    assert_eq!(eval(&model, &identity, &at), "∅");
    let inverse = library.groups.inverse.apply(&Term::var("x"), &g(), &star());
    assert_eq!(eval(&model, &inverse, &at), "∅");
}

#[test]
fn test_inverses_in_z3() {
    let library = library();
    let (carrier, table) = cyclic(3);
    let model = table_model(library, &carrier, &table, None);
    let inverse = &library.groups.inverse;
    let x = Term::var("x");
    let inverse_x = inverse.apply(&x, &g(), &star());
    let double = inverse.apply(&inverse_x, &g(), &star());
    for (element, expected) in [("0", "0"), ("1", "2"), ("2", "1")] {
        let at = valuation(&model, &[("x", element)]);
        assert_eq!(eval(&model, &inverse_x, &at), expected);
        assert_eq!(eval(&model, &double, &at), element);
    }

    // Outside the carrier there is no inverse to find
    let outside = valuation(&model, &[("x", "G")]);
    assert_eq!(eval(&model, &inverse_x, &outside), "∅");
}

#[test]
fn test_inverse_theorem_statements() {
    let groups = &library().groups;
    let (x, y) = (Term::var("x"), Term::var("y"));
    let member = library().sets.member(&x, &g());
    let group = groups.definitions.group(&g(), &star());
    let inverse_x = groups.inverse.apply(&x, &g(), &star());

    assert_eq!(
        groups.inverse.symmetry.sequent(),
        &Sequent::new(
            vec![member.clone(), groups.definitions.is_inverse(&y, &x, &g(), &star())],
            vec![groups.definitions.is_inverse(&x, &y, &g(), &star())]
        )
    );
    assert_eq!(
        groups.inverse.involution.sequent(),
        &Sequent::new(
            vec![group.clone(), member.clone()],
            vec![groups.inverse.apply(&inverse_x, &g(), &star()).equals(&x)]
        )
    );
    let identity = groups.identity.apply(&g(), &star());
    let sets = &library().sets;
    assert_eq!(
        groups.inverse.cancellation.sequent(),
        &Sequent::new(
            vec![group, member],
            vec![Formula::and(vec![
                sets.op(&x, &star(), &inverse_x).equals(&identity),
                sets.op(&inverse_x, &star(), &x).equals(&identity),
            ])]
        )
    );
}

#[test]
fn test_inverse_premise_joins_both_assumptions() {
    let groups = &library().groups;
    let premise = groups.inverse.description.premise().unwrap();
    let conjuncts = premise.conjuncts();
    assert_eq!(conjuncts.len(), 2);
    assert!(conjuncts.contains(&&groups.definitions.group(&g(), &star())));
    assert!(conjuncts.contains(&&library().sets.member(&Term::var("x"), &g())));
}
