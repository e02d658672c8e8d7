use femasm::assembly::{build_assembly_operator, AssemblyOperator};
use femasm::kernels::ElementType;
use femasm::mesh::procedural::rectangular_quad_mesh;
use femasm::mesh::{Element, MaterialProfile, Mesh, Node};
use femasm::proptest::{constrained_quad_mesh, line_element_mesh};
use femasm::{AssemblyError, EquationMap};
use proptest::prelude::*;

use super::two_springs;

#[test]
fn two_springs_operator_rows() {
    let mesh = two_springs(1.0);
    let (operator, equations) = build_assembly_operator(&mesh).unwrap();

    assert_eq!(operator.neq(), 2);
    assert_eq!(equations.neq(), 2);
    assert_eq!(operator.num_elements(), 2);
    assert_eq!(operator.element_dofs(0), &[None, None, Some(0), None]);
    assert_eq!(operator.element_dofs(1), &[Some(0), None, Some(1), None]);
    assert_eq!(operator.iter().count(), 2);
}

#[test]
fn beam_rows_include_rotations() {
    let nodes = vec![
        Node::with_rotation(0.0, 0.0, -1, -1, -1),
        Node::with_rotation(1.0, 0.0, 0, 0, 0),
    ];
    let elements = vec![Element::of_type(ElementType::Beam, 0, vec![0, 1])];
    let mesh = Mesh::from_parts(nodes, elements, vec![MaterialProfile::new([1.0, 1.0])]);

    let (operator, _) = build_assembly_operator(&mesh).unwrap();
    assert_eq!(operator.element_dofs(0), &[None, None, None, Some(0), Some(1), Some(2)]);
}

#[test]
fn extra_node_dofs_are_ignored_by_two_dof_elements() {
    // A truss attached to frame nodes only sees the translational components
    let nodes = vec![
        Node::with_rotation(0.0, 0.0, 0, 0, 0),
        Node::with_rotation(1.0, 0.0, 0, 0, 0),
    ];
    let elements = vec![Element::of_type(ElementType::Truss, 0, vec![0, 1])];
    let mesh = Mesh::from_parts(nodes, elements, vec![MaterialProfile::new([1.0, 1.0])]);

    let (operator, equations) = build_assembly_operator(&mesh).unwrap();
    assert_eq!(equations.neq(), 6);
    assert_eq!(operator.element_dofs(0), &[Some(0), Some(1), Some(3), Some(4)]);
}

#[test]
fn quad_mesh_rows_follow_connectivity() {
    let mesh = rectangular_quad_mesh(2.0, 1.0, 2, 1, MaterialProfile::new([1.0, 0.3]));
    let (operator, _) = build_assembly_operator(&mesh).unwrap();

    assert_eq!(operator.neq(), 12);
    // The second cell has nodes 1, 2, 5, 4
    let expected: Vec<_> = [1, 2, 5, 4]
        .iter()
        .flat_map(|&node| [Some(2 * node), Some(2 * node + 1)])
        .collect();
    assert_eq!(operator.element_dofs(1), expected.as_slice());
}

#[test]
fn unknown_element_type_is_rejected() {
    let mut mesh_elements = two_springs(1.0).elements().to_vec();
    mesh_elements[1].kind = 42;
    let mesh = Mesh::from_parts(two_springs(1.0).nodes().to_vec(), mesh_elements, vec![]);

    let err = build_assembly_operator(&mesh).unwrap_err();
    assert!(matches!(
        err,
        AssemblyError::UnknownElementType { element: 1, kind: 42 }
    ));
}

#[test]
fn connectivity_length_must_match_element_type() {
    let nodes = vec![Node::free(0.0, 0.0), Node::free(1.0, 0.0), Node::free(1.0, 1.0)];
    let elements = vec![Element::of_type(ElementType::Quad4, 0, vec![0, 1, 2])];
    let mesh = Mesh::from_parts(nodes, elements, vec![]);

    let err = build_assembly_operator(&mesh).unwrap_err();
    assert!(matches!(
        err,
        AssemblyError::ConnectivityMismatch {
            element: 0,
            expected: 4,
            actual: 3
        }
    ));
}

#[test]
fn node_references_must_exist() {
    let nodes = vec![Node::free(0.0, 0.0), Node::free(1.0, 0.0)];
    let elements = vec![
        Element::of_type(ElementType::Spring, 0, vec![0, 1]),
        Element::of_type(ElementType::Spring, 0, vec![1, 5]),
    ];
    let mesh = Mesh::from_parts(nodes, elements, vec![]);

    let err = build_assembly_operator(&mesh).unwrap_err();
    assert!(matches!(
        err,
        AssemblyError::NodeOutOfRange {
            element: 1,
            node: 5,
            num_nodes: 2
        }
    ));
}

#[test]
fn beam_nodes_need_a_rotation_flag() {
    let nodes = vec![Node::free(0.0, 0.0), Node::with_rotation(1.0, 0.0, 0, 0, 0)];
    let elements = vec![Element::of_type(ElementType::Beam, 0, vec![1, 0])];
    let mesh = Mesh::from_parts(nodes, elements, vec![]);

    let err = build_assembly_operator(&mesh).unwrap_err();
    assert!(matches!(
        err,
        AssemblyError::MissingNodeDofs {
            element: 0,
            node: 0,
            required: 3,
            available: 2
        }
    ));
}

#[test]
fn empty_mesh_has_empty_operator() {
    let mesh = Mesh::default();
    let (operator, equations) = build_assembly_operator(&mesh).unwrap();
    assert_eq!(operator.num_elements(), 0);
    assert_eq!(operator.neq(), 0);
    assert_eq!(equations.neq(), 0);
}

fn check_operator_consistency(mesh: &Mesh, operator: &AssemblyOperator, equations: &EquationMap) {
    assert_eq!(operator.num_elements(), mesh.num_elements());
    for (element, dofs) in mesh.elements().iter().zip(operator.iter()) {
        let layout = element.element_type().unwrap().layout();
        assert_eq!(dofs.len(), layout.dof_count());

        let expected: Vec<_> = element
            .connectivity
            .iter()
            .flat_map(|&node| (0..layout.dofs_per_node).map(move |dof| (node, dof)))
            .map(|(node, dof)| equations.equation(node, dof))
            .collect();
        assert_eq!(dofs, expected.as_slice());
        assert!(dofs.iter().flatten().all(|&eq| eq < operator.neq()));
    }
}

proptest! {
    #[test]
    fn operator_agrees_with_equation_map_for_line_meshes(mesh in line_element_mesh(8, 10)) {
        let (operator, equations) = build_assembly_operator(&mesh).unwrap();
        check_operator_consistency(&mesh, &operator, &equations);
    }

    #[test]
    fn operator_agrees_with_equation_map_for_quad_meshes(mesh in constrained_quad_mesh(3)) {
        let (operator, equations) = build_assembly_operator(&mesh).unwrap();
        check_operator_consistency(&mesh, &operator, &equations);
    }
}
