//! Proptest strategies for meshes and their building blocks.
use crate::kernels::ElementType;
use crate::mesh::procedural::rectangular_quad_mesh;
use crate::mesh::{Element, MaterialProfile, Mesh, Node, PointLoad};
use ::proptest::collection::vec;
use ::proptest::prelude::*;
use nalgebra::Point2;

pub fn point2() -> impl Strategy<Value = Point2<f64>> {
    // Keep coordinates moderate so that stiffness entries stay well within floating point range
    let range = -10.0..10.0;
    [range.clone(), range].prop_map(|[x, y]| Point2::new(x, y))
}

/// A boundary-condition flag. Roughly half of the flags are zero (free), the others are
/// arbitrary nonzero values, negative ones included.
pub fn bc_flag() -> impl Strategy<Value = i32> {
    prop_oneof![Just(0), -3..0, 1..4]
}

/// A node with either two or three boundary-condition flags.
pub fn node() -> impl Strategy<Value = Node> {
    (point2(), vec(bc_flag(), 2..=3)).prop_map(|(position, bc)| Node { position, bc })
}

pub fn node_table(max_nodes: usize) -> impl Strategy<Value = Vec<Node>> {
    vec(node(), 0..=max_nodes)
}

/// Point loads on nodes `0..num_nodes`, possibly with several loads on the same node.
pub fn point_loads(num_nodes: usize, max_loads: usize) -> impl Strategy<Value = Vec<PointLoad>> {
    assert!(num_nodes > 0, "Loads require at least one node");
    let component = -100.0..100.0;
    vec(
        (0..num_nodes, component.clone(), component).prop_map(|(node, fx, fy)| PointLoad::new(node, fx, fy)),
        0..=max_loads,
    )
}

/// Meshes of springs and truss bars with randomly constrained nodes.
///
/// Node `i` has x-coordinate `i` and a random y-coordinate, so no element has zero length.
/// The single material row `[young, area]` serves as `[stiffness]` for springs.
pub fn line_element_mesh(max_nodes: usize, max_elements: usize) -> impl Strategy<Value = Mesh> {
    assert!(max_nodes >= 2, "Line element meshes need at least two nodes");
    (2..=max_nodes)
        .prop_flat_map(move |num_nodes| {
            let nodes = vec((-5.0..5.0, bc_flag(), bc_flag()), num_nodes).prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (y, bc_x, bc_y))| Node::new(i as f64, y, bc_x, bc_y))
                    .collect::<Vec<_>>()
            });
            let element_type = prop_oneof![Just(ElementType::Spring), Just(ElementType::Truss)];
            let elements = vec((element_type, 0..num_nodes, 1..num_nodes), 1..=max_elements).prop_map(
                move |rows| {
                    rows.into_iter()
                        .map(|(element_type, a, offset)| {
                            Element::of_type(element_type, 0, vec![a, (a + offset) % num_nodes])
                        })
                        .collect::<Vec<_>>()
                },
            );
            let material = (0.5..10.0, 0.1..2.0).prop_map(|(young, area)| MaterialProfile::new([young, area]));
            (nodes, elements, material)
        })
        .prop_map(|(nodes, elements, material)| Mesh::from_parts(nodes, elements, vec![material]))
}

/// Rectangular Quad4 meshes with a random subset of constrained nodes.
pub fn constrained_quad_mesh(max_cells: usize) -> impl Strategy<Value = Mesh> {
    assert!(max_cells >= 1, "Quad meshes need at least one cell per direction");
    (1..=max_cells, 1..=max_cells, 0.5..4.0, 0.5..4.0, 1.0..100.0, 0.0..0.45)
        .prop_flat_map(|(cells_x, cells_y, width, height, young, poisson)| {
            let mesh = rectangular_quad_mesh(
                width,
                height,
                cells_x,
                cells_y,
                MaterialProfile::new([young, poisson]),
            );
            let flags = vec((bc_flag(), bc_flag()), mesh.num_nodes());
            (Just(mesh), flags)
        })
        .prop_map(|(mesh, flags)| {
            let nodes = mesh
                .nodes()
                .iter()
                .zip(flags)
                .map(|(node, (bc_x, bc_y))| Node::new(node.position.x, node.position.y, bc_x, bc_y))
                .collect();
            Mesh::from_parts(nodes, mesh.elements().to_vec(), mesh.materials().to_vec())
        })
}
