use femasm::kernels::ElementType;
use femasm::mesh::{Element, MaterialProfile, Mesh, Node};

mod dof;
mod operator;

/// Two springs of stiffness `k` in series along the x-axis.
///
/// Node 0 is clamped and the y-components of nodes 1 and 2 are constrained, so the x-components
/// of nodes 1 and 2 are equations 0 and 1.
fn two_springs(k: f64) -> Mesh {
    let nodes = vec![
        Node::fixed(0.0, 0.0),
        Node::new(1.0, 0.0, 0, 1),
        Node::new(2.0, 0.0, 0, 1),
    ];
    let elements = vec![
        Element::of_type(ElementType::Spring, 0, vec![0, 1]),
        Element::of_type(ElementType::Spring, 0, vec![1, 2]),
    ];
    Mesh::from_parts(nodes, elements, vec![MaterialProfile::new([k])])
}

/// A single unconstrained Quad4 element on the unit square.
fn unit_quad(young: f64, poisson: f64) -> Mesh {
    let nodes = vec![
        Node::free(0.0, 0.0),
        Node::free(1.0, 0.0),
        Node::free(1.0, 1.0),
        Node::free(0.0, 1.0),
    ];
    let elements = vec![Element::of_type(ElementType::Quad4, 0, vec![0, 1, 2, 3])];
    Mesh::from_parts(nodes, elements, vec![MaterialProfile::new([young, poisson])])
}
