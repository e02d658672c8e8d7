//! Basic procedural mesh generation routines.
use crate::kernels::ElementType;
use crate::mesh::{Element, MaterialProfile, Mesh, Node};

/// Generates an axis-aligned rectangular mesh of bilinear quadrilaterals with its lower left
/// corner at the origin.
///
/// All nodes are free and every element uses material 0, which is set to `material`.
/// Nodes are numbered row by row from the bottom, so node `(cells_x + 1) * j + i` sits at
/// grid position `(i, j)`.
pub fn rectangular_quad_mesh(
    width: f64,
    height: f64,
    cells_x: usize,
    cells_y: usize,
    material: MaterialProfile,
) -> Mesh {
    if cells_x == 0 || cells_y == 0 {
        return Mesh::from_parts(Vec::new(), Vec::new(), vec![material]);
    }

    let dx = width / cells_x as f64;
    let dy = height / cells_y as f64;
    let to_global_node_index = |i: usize, j: usize| (cells_x + 1) * j + i;

    let mut nodes = Vec::with_capacity((cells_x + 1) * (cells_y + 1));
    for j in 0..=cells_y {
        for i in 0..=cells_x {
            nodes.push(Node::free(i as f64 * dx, j as f64 * dy));
        }
    }

    let mut elements = Vec::with_capacity(cells_x * cells_y);
    for j in 0..cells_y {
        for i in 0..cells_x {
            let connectivity = vec![
                to_global_node_index(i, j),
                to_global_node_index(i + 1, j),
                to_global_node_index(i + 1, j + 1),
                to_global_node_index(i, j + 1),
            ];
            elements.push(Element::of_type(ElementType::Quad4, 0, connectivity));
        }
    }

    Mesh::from_parts(nodes, elements, vec![material])
}

/// Generates `num_springs` springs of stiffness `k` in series along the x-axis.
///
/// Node `i` sits at `x = i`. All y-components are constrained, the x-components are free.
pub fn spring_chain(num_springs: usize, k: f64) -> Mesh {
    let nodes = (0..=num_springs)
        .map(|i| Node::new(i as f64, 0.0, 0, 1))
        .collect();
    let elements = (0..num_springs)
        .map(|i| Element::of_type(ElementType::Spring, 0, vec![i, i + 1]))
        .collect();
    Mesh::from_parts(nodes, elements, vec![MaterialProfile::new([k])])
}
