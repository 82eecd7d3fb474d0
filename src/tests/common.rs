use std::sync::OnceLock;

use crate::kernel::term::Term;
use crate::kernel::theorem::Theorem;
use crate::library::{Library, LibraryConfig};
use crate::model::{FiniteModel, Valuation};

/// The library is deterministic, so every test shares one build of it.
pub fn library() -> &'static Library {
    static LIBRARY: OnceLock<Library> = OnceLock::new();
    LIBRARY.get_or_init(|| match Library::build(&LibraryConfig::default()) {
        Ok(library) => library,
        Err(e) => panic!("library failed to build: {}", e),
    })
}

/// Z/n with addition, carrier named "0" through "n-1".
pub fn cyclic(n: usize) -> (Vec<String>, Vec<Vec<usize>>) {
    let carrier = (0..n).map(|i| i.to_string()).collect();
    let table = (0..n).map(|i| (0..n).map(|j| (i + j) % n).collect()).collect();
    (carrier, table)
}

pub fn table_model<'a>(
    library: &'a Library,
    carrier: &[String],
    table: &[Vec<usize>],
    subgroup: Option<&[usize]>,
) -> FiniteModel<'a> {
    let names: Vec<&str> = carrier.iter().map(String::as_str).collect();
    FiniteModel::operation_table(library.theory.signature(), &library.sets, &names, table, subgroup)
}

/// The two-element group {a, b} with identity a.
pub fn two_element_model(library: &Library) -> FiniteModel {
    let carrier = vec!["a".to_string(), "b".to_string()];
    table_model(library, &carrier, &[vec![0, 1], vec![1, 0]], None)
}

/// A table on {a, b} with no identity element.
pub fn non_group_model(library: &Library) -> FiniteModel {
    let carrier = vec!["a".to_string(), "b".to_string()];
    table_model(library, &carrier, &[vec![0, 0], vec![0, 0]], None)
}

/// Binds G and * to the fixture's carrier and operation, plus any extra variables.
pub fn valuation(model: &FiniteModel, extra: &[(&str, &str)]) -> Valuation {
    let mut pairs = vec![("G", "G"), ("*", "*")];
    if model.element("H").is_ok() {
        pairs.push(("H", "H"));
    }
    pairs.extend_from_slice(extra);
    model.valuation(&pairs).unwrap()
}

/// The name of the element a term evaluates to.
pub fn eval<'m>(model: &'m FiniteModel, term: &Term, valuation: &Valuation) -> &'m str {
    let element = model.eval_term(term, valuation).unwrap();
    model.name(element)
}

/// Checks a theorem under every valuation, with the structure's own variables held fixed.
pub fn assert_holds(model: &FiniteModel, name: &str, theorem: &Theorem) {
    let fixed = valuation(model, &[]);
    if let Some(counterexample) = model.find_counterexample(theorem.sequent(), &fixed).unwrap() {
        let described: Vec<String> = counterexample
            .iter()
            .map(|(v, &e)| format!("{} = {}", v, model.name(e)))
            .collect();
        panic!("{} fails: {} at {}", name, theorem, described.join(", "));
    }
}
