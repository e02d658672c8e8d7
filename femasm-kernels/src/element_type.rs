use serde::{Deserialize, Serialize};

/// The element formulations with a fixed type code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementType {
    /// 4-node bilinear quadrilateral.
    Quad4,
    /// 6-node quadratic triangle.
    Tri6,
    /// 3-node linear triangle.
    Tri3,
    /// 9-node biquadratic quadrilateral.
    Quad9,
    /// 2-node spring.
    Spring,
    /// 2-node truss bar.
    Truss,
    /// 2-node Euler-Bernoulli beam without axial stiffness.
    Beam,
}

/// Per-type sizes used to lay out the assembly operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementLayout {
    pub dofs_per_node: usize,
    pub node_count: usize,
    pub integration_points: usize,
}

impl ElementLayout {
    pub fn dof_count(&self) -> usize {
        self.dofs_per_node * self.node_count
    }
}

impl ElementType {
    pub const ALL: [ElementType; 7] = [
        ElementType::Quad4,
        ElementType::Tri6,
        ElementType::Tri3,
        ElementType::Quad9,
        ElementType::Spring,
        ElementType::Truss,
        ElementType::Beam,
    ];

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.code() == code)
    }

    pub fn code(self) -> i32 {
        match self {
            ElementType::Quad4 => 1,
            ElementType::Tri6 => 2,
            ElementType::Tri3 => 3,
            ElementType::Quad9 => 4,
            ElementType::Spring => 5,
            ElementType::Truss => 6,
            ElementType::Beam => 7,
        }
    }

    #[rustfmt::skip]
    pub fn layout(self) -> ElementLayout {
        let (dofs_per_node, node_count, integration_points) = match self {
            ElementType::Quad4  => (2, 4, 4),
            ElementType::Tri6   => (2, 6, 7),
            ElementType::Tri3   => (2, 3, 3),
            ElementType::Quad9  => (2, 9, 9),
            ElementType::Spring => (2, 2, 3),
            ElementType::Truss  => (2, 2, 3),
            ElementType::Beam   => (3, 2, 3),
        };
        ElementLayout {
            dofs_per_node,
            node_count,
            integration_points,
        }
    }
}
