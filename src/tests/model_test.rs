use crate::kernel::term::Term;
use crate::model::FiniteModel;
use crate::tests::common::{
    assert_holds, cyclic, eval, library, non_group_model, table_model, two_element_model, valuation,
};

fn assert_library_holds(model: &FiniteModel) {
    for (name, theorem) in library().theory.theorems() {
        assert_holds(model, name, theorem);
    }
}

#[test]
fn test_library_holds_in_the_two_element_group() {
    assert_library_holds(&two_element_model(library()));
}

#[test]
fn test_library_holds_in_a_non_group() {
    assert_library_holds(&non_group_model(library()));
}

#[test]
fn test_library_holds_in_z3() {
    let (carrier, table) = cyclic(3);
    assert_library_holds(&table_model(library(), &carrier, &table, None));
}

#[test]
fn test_library_holds_with_a_subgroup() {
    let (carrier, table) = cyclic(4);
    assert_library_holds(&table_model(library(), &carrier, &table, Some(&[0, 2])));
}

#[test]
fn test_application_is_total() {
    let library = library();
    let model = two_element_model(library);
    let sets = &library.sets;
    let (a, b) = (Term::var("a"), Term::var("b"));
    let star = Term::var("*");

    // Inside the domain, application follows the table
    let at = valuation(&model, &[("a", "b"), ("b", "b")]);
    assert_eq!(eval(&model, &sets.op(&a, &star, &b), &at), "a");

    // Applying something that is not a function gives the empty set
    let g = Term::var("G");
    assert_eq!(eval(&model, &sets.app(&g, &a), &at), "∅");
    assert_eq!(eval(&model, &sets.app(&star, &a), &at), "∅");
}

#[test]
fn test_every_recorded_name_is_present() {
    let theory = &library().theory;
    for name in [
        "application_uniqueness",
        "restriction_edges",
        "subset_definition",
        "app_unique",
        "app_definition",
        "app_characterization",
        "app_satisfies",
        "app_fallback",
        "group_definition",
        "subgroup_definition",
        "group_functional",
        "group_domain",
        "group_closure",
        "identity_uniqueness",
        "identity_definition",
        "identity_is_neutral",
        "identity_characterization",
        "identity_fallback",
        "inverse_uniqueness",
        "inverse_definition",
        "inverse_fallback",
        "inverse_is_inverse",
        "inverse_characterization",
        "inverse_symmetry",
        "inverse_is_involutive",
        "inverse_cancellation",
        "subgroup_operation_coincidence",
    ] {
        assert!(theory.theorem(name).is_ok(), "missing {}", name);
    }
}
