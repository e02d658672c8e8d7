use femasm::mesh::Node;
use femasm::nalgebra::DVector;
use femasm::proptest::node_table;
use femasm::{AssemblyError, EquationMap};
use proptest::prelude::*;

#[test]
fn equations_are_numbered_in_node_then_dof_order() {
    let nodes = vec![
        Node::free(0.0, 0.0),
        Node::fixed(1.0, 0.0),
        Node::new(2.0, 0.0, 0, 1),
        Node::new(3.0, 0.0, 7, 0),
        Node::with_rotation(4.0, 0.0, 0, -1, 0),
    ];
    let equations = EquationMap::count(&nodes);

    assert_eq!(equations.neq(), 6);
    assert_eq!(equations.num_nodes(), 5);
    assert_eq!(equations.node_equations(0), Some(&[Some(0), Some(1)][..]));
    assert_eq!(equations.node_equations(1), Some(&[None, None][..]));
    assert_eq!(equations.node_equations(2), Some(&[Some(2), None][..]));
    assert_eq!(equations.node_equations(3), Some(&[None, Some(3)][..]));
    assert_eq!(equations.node_equations(4), Some(&[Some(4), None, Some(5)][..]));
    assert_eq!(equations.node_equations(5), None);

    assert_eq!(equations.equation(4, 2), Some(5));
    assert_eq!(equations.equation(4, 1), None);
    assert_eq!(equations.equation(0, 2), None);
    assert_eq!(equations.equation(9, 0), None);
}

#[test]
fn empty_node_table_has_no_equations() {
    let equations = EquationMap::count(&[]);
    assert_eq!(equations.neq(), 0);
    assert_eq!(equations.num_nodes(), 0);
    assert_eq!(equations.iter().count(), 0);
}

#[test]
fn fully_constrained_nodes_have_no_equations() {
    let nodes = vec![Node::fixed(0.0, 0.0), Node::new(1.0, 0.0, 1, -2)];
    let equations = EquationMap::count(&nodes);
    assert_eq!(equations.neq(), 0);
    assert!(equations.iter().flatten().all(Option::is_none));
}

#[test]
fn scatter_solution_fills_constrained_dofs_with_zero() {
    let nodes = vec![
        Node::new(0.0, 0.0, 0, 1),
        Node::fixed(1.0, 0.0),
        Node::with_rotation(2.0, 0.0, 1, 0, 0),
    ];
    let equations = EquationMap::count(&nodes);
    let solution = DVector::from_column_slice(&[1.5, -2.0, 3.0]);

    let nodal = equations.scatter_solution(&solution).unwrap();
    assert_eq!(nodal, vec![vec![1.5, 0.0], vec![0.0, 0.0], vec![0.0, -2.0, 3.0]]);
}

#[test]
fn scatter_solution_rejects_wrong_length() {
    let equations = EquationMap::count(&[Node::free(0.0, 0.0)]);
    let err = equations
        .scatter_solution(&DVector::zeros(3))
        .unwrap_err();
    assert!(matches!(
        err,
        AssemblyError::DimensionMismatch {
            expected: 2,
            actual: 3
        }
    ));
}

proptest! {
    #[test]
    fn equation_count_matches_free_flags(nodes in node_table(12)) {
        let equations = EquationMap::count(&nodes);
        let num_free = nodes
            .iter()
            .flat_map(|node| &node.bc)
            .filter(|&&flag| flag == 0)
            .count();
        prop_assert_eq!(equations.neq(), num_free);

        // Equations are handed out consecutively in node order, so they appear sorted and
        // without gaps
        let assigned: Vec<usize> = equations.iter().flatten().filter_map(|&eq| eq).collect();
        prop_assert_eq!(assigned, (0..num_free).collect::<Vec<_>>());

        for (node, node_equations) in nodes.iter().zip(equations.iter()) {
            prop_assert_eq!(node_equations.len(), node.num_dofs());
            for (dof, eq) in node_equations.iter().enumerate() {
                prop_assert_eq!(eq.is_none(), node.is_constrained(dof));
            }
        }
    }
}
