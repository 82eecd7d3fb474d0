use crate::kernel::sequent::Sequent;
use crate::kernel::term::Term;
use crate::tests::common::{assert_holds, cyclic, eval, library, table_model, valuation};

fn restricted() -> Term {
    let sets = &library().sets;
    let h = Term::var("H");
    sets.restricted_function(&Term::var("*"), &sets.cartesian_product(&h, &h))
}

#[test]
fn test_coincidence_statement() {
    let library = library();
    let sets = &library.sets;
    let (h, g, star) = (Term::var("H"), Term::var("G"), Term::var("*"));
    let (x, y) = (Term::var("x"), Term::var("y"));
    assert_eq!(
        library.groups.subgroup_coincidence.sequent(),
        &Sequent::new(
            vec![
                library.groups.definitions.subgroup(&h, &g, &star),
                sets.member(&x, &h),
                sets.member(&y, &h),
            ],
            vec![sets.op(&x, &restricted(), &y).equals(&sets.op(&x, &star, &y))]
        )
    );
}

#[test]
fn test_coincidence_in_z4() {
    let library = library();
    let sets = &library.sets;
    let (carrier, table) = cyclic(4);
    let model = table_model(library, &carrier, &table, Some(&[0, 2]));
    let (h, g, star) = (Term::var("H"), Term::var("G"), Term::var("*"));
    let subgroup = library.groups.definitions.subgroup(&h, &g, &star);
    assert!(model.eval_formula(&subgroup, &valuation(&model, &[])).unwrap());

    let (x, y) = (Term::var("x"), Term::var("y"));
    let inside = sets.op(&x, &restricted(), &y);
    let outside = sets.op(&x, &star, &y);
    for (a, b, sum) in [("0", "2", "2"), ("2", "2", "0"), ("2", "0", "2")] {
        let at = valuation(&model, &[("x", a), ("y", b)]);
        assert_eq!(eval(&model, &inside, &at), sum);
        assert_eq!(eval(&model, &outside, &at), sum);
    }

    // Off the subgroup the restricted operation is undefined and falls back to ∅
    let at = valuation(&model, &[("x", "1"), ("y", "2")]);
    assert_eq!(eval(&model, &inside, &at), "∅");
    assert_eq!(eval(&model, &outside, &at), "3");

    assert_holds(&model, "subgroup_operation_coincidence", &library.groups.subgroup_coincidence);
}

#[test]
fn test_non_closed_subset_is_not_a_subgroup() {
    let library = library();
    let (carrier, table) = cyclic(4);
    let model = table_model(library, &carrier, &table, Some(&[0, 1]));
    let (h, g, star) = (Term::var("H"), Term::var("G"), Term::var("*"));
    let subgroup = library.groups.definitions.subgroup(&h, &g, &star);
    assert!(!model.eval_formula(&subgroup, &valuation(&model, &[])).unwrap());

    // The theorem holds vacuously
    assert_holds(&model, "subgroup_operation_coincidence", &library.groups.subgroup_coincidence);
}
