use formbuilder_engine::ParentGraph;
use formbuilder_model::{Field, FieldId, FieldType};
use pretty_assertions::assert_eq;

fn id(name: &str) -> FieldId {
    FieldId::from(name)
}

fn ids(names: &[&str]) -> Vec<FieldId> {
    names.iter().map(|n| id(n)).collect()
}

#[test]
fn acyclic_graph_has_no_cycle() {
    let mut graph = ParentGraph::new();
    graph.set_parents(id("c"), ids(&["a", "b"]));
    graph.set_parents(id("d"), ids(&["c", "a"]));
    assert_eq!(graph.find_cycle(), None);
    assert_eq!(graph.parents_of(&id("d")), ids(&["c", "a"]).as_slice());
    assert!(graph.parents_of(&id("a")).is_empty());
}

#[test]
fn find_cycle_reports_closed_path() {
    let mut graph = ParentGraph::new();
    graph.set_parents(id("a"), ids(&["b"]));
    graph.set_parents(id("b"), ids(&["c"]));
    graph.set_parents(id("c"), ids(&["a"]));

    let cycle = graph.find_cycle().unwrap();
    assert_eq!(cycle.path, ids(&["a", "b", "c", "a"]));
    assert_eq!(cycle.to_string(), "circular reference: a -> b -> c -> a");
}

#[test]
fn self_loop_is_a_cycle() {
    let mut graph = ParentGraph::new();
    graph.set_parents(id("a"), ids(&["a"]));
    assert_eq!(graph.find_cycle().unwrap().path, ids(&["a", "a"]));
}

#[test]
fn clearing_parents_breaks_the_cycle() {
    let mut graph = ParentGraph::new();
    graph.set_parents(id("a"), ids(&["b"]));
    graph.set_parents(id("b"), ids(&["a"]));
    assert!(graph.find_cycle().is_some());

    graph.set_parents(id("b"), Vec::new());
    assert_eq!(graph.find_cycle(), None);
}

#[test]
fn cycle_with_checks_a_candidate_parent_list() {
    let fields = vec![
        Field::with_id("x", FieldType::Number, "X"),
        Field::with_id("y", FieldType::Number, "Y").derived(ids(&["x"]), "sum()"),
        Field::with_id("z", FieldType::Number, "Z").derived(ids(&["y"]), "sum()"),
    ];
    let graph = ParentGraph::from_fields(&fields);

    assert_eq!(graph.cycle_with(&id("x"), &ids(&["y"])).unwrap().path, ids(&["x", "y", "x"]));
    assert_eq!(
        graph.cycle_with(&id("x"), &ids(&["z"])).unwrap().path,
        ids(&["x", "z", "y", "x"])
    );
    assert_eq!(graph.cycle_with(&id("z"), &ids(&["x"])), None);
    assert_eq!(graph.parent_path(&id("z"), &id("x")), Some(ids(&["z", "y", "x"])));
    assert_eq!(graph.parent_path(&id("x"), &id("z")), None);
}

#[test]
fn dependents_are_sorted_by_id() {
    let fields = vec![
        Field::with_id("x", FieldType::Number, "X"),
        Field::with_id("z", FieldType::Number, "Z").derived(ids(&["x"]), "sum()"),
        Field::with_id("y", FieldType::Number, "Y").derived(ids(&["x", "z"]), "sum()"),
    ];
    let graph = ParentGraph::from_fields(&fields);
    assert_eq!(graph.dependents_of(&id("x")), ids(&["y", "z"]));
    assert_eq!(graph.dependents_of(&id("z")), ids(&["y"]));
    assert!(graph.dependents_of(&id("y")).is_empty());
}

#[test]
fn stale_parents_are_leaves() {
    let fields = vec![Field::with_id("a", FieldType::Number, "A").derived(ids(&["deleted"]), "sum()")];
    let graph = ParentGraph::from_fields(&fields);
    assert_eq!(graph.find_cycle(), None);
    assert_eq!(graph.parent_path(&id("a"), &id("deleted")), Some(ids(&["a", "deleted"])));
}
