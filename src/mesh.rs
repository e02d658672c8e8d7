//! The read-only model the assembly operates on.
//!
//! A [`Mesh`] is a node table, an element table and a material table. Nodes and materials are
//! referred to by their position in their table.
use crate::kernels::ElementType;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

pub mod procedural;

/// A mesh node with one boundary-condition flag per nodal DOF.
///
/// A flag of zero leaves the DOF free. Any other value, including negative ones, constrains it.
/// Continuum and truss meshes use two flags (x, y); frame meshes add a third for the rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub position: Point2<f64>,
    pub bc: Vec<i32>,
}

impl Node {
    pub fn new(x: f64, y: f64, bc_x: i32, bc_y: i32) -> Self {
        Self {
            position: Point2::new(x, y),
            bc: vec![bc_x, bc_y],
        }
    }

    /// A node that additionally carries a rotational DOF, as used by beams.
    pub fn with_rotation(x: f64, y: f64, bc_x: i32, bc_y: i32, bc_rotation: i32) -> Self {
        Self {
            position: Point2::new(x, y),
            bc: vec![bc_x, bc_y, bc_rotation],
        }
    }

    pub fn free(x: f64, y: f64) -> Self {
        Self::new(x, y, 0, 0)
    }

    pub fn fixed(x: f64, y: f64) -> Self {
        Self::new(x, y, -1, -1)
    }

    pub fn num_dofs(&self) -> usize {
        self.bc.len()
    }

    pub fn is_constrained(&self, dof: usize) -> bool {
        self.bc.get(dof).map_or(false, |&flag| flag != 0)
    }
}

/// An element of the mesh.
///
/// `kind` is the raw element type code; codes without a known [`ElementType`] are rejected when
/// the assembly operator is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: i32,
    pub material: usize,
    pub connectivity: Vec<usize>,
}

impl Element {
    pub fn new(kind: i32, material: usize, connectivity: Vec<usize>) -> Self {
        Self {
            kind,
            material,
            connectivity,
        }
    }

    pub fn of_type(element_type: ElementType, material: usize, connectivity: Vec<usize>) -> Self {
        Self::new(element_type.code(), material, connectivity)
    }

    pub fn element_type(&self) -> Option<ElementType> {
        ElementType::from_code(self.kind)
    }
}

/// One row of material parameters. Their meaning is up to the element kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialProfile {
    pub params: Vec<f64>,
}

impl MaterialProfile {
    pub fn new(params: impl Into<Vec<f64>>) -> Self {
        Self { params: params.into() }
    }
}

/// A concentrated force applied at a node.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    pub node: usize,
    pub fx: f64,
    pub fy: f64,
}

impl PointLoad {
    pub fn new(node: usize, fx: f64, fy: f64) -> Self {
        Self { node, fx, fy }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    nodes: Vec<Node>,
    elements: Vec<Element>,
    materials: Vec<MaterialProfile>,
}

impl Mesh {
    /// Construct a mesh from its tables.
    ///
    /// The tables are not cross-checked here. Out-of-range node or material references are
    /// reported as errors by the assembly stages that encounter them.
    pub fn from_parts(nodes: Vec<Node>, elements: Vec<Element>, materials: Vec<MaterialProfile>) -> Self {
        Self {
            nodes,
            elements,
            materials,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn materials(&self) -> &[MaterialProfile] {
        &self.materials
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }
}
