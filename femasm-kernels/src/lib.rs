//! Element stiffness kernels for `femasm`.
//!
//! A kernel turns the coordinates of an element's nodes and one row of material parameters into
//! the element's local stiffness matrix. The local degrees of freedom are always ordered
//! node-major, component-minor: for an element with `d` DOFs per node, local DOF `d * j + l`
//! is component `l` of the `j`-th node in connectivity order.
use nalgebra::{DMatrix, Point2};

mod element_type;

pub mod continuum;
pub mod quadrature;
pub mod structural;

pub use continuum::{PlaneStressParameters, Quad4Kernel, Quad9Kernel, Tri3Kernel, Tri6Kernel};
pub use element_type::{ElementLayout, ElementType};
pub use structural::{BeamKernel, SpringKernel, TrussKernel};

pub extern crate nalgebra;

/// The local stiffness matrix of a single element, as reported by an [`ElementKernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStiffness {
    pub matrix: DMatrix<f64>,
    /// The number of local degrees of freedom the matrix acts on.
    pub dof_count: usize,
    /// The element type code the kernel computed the matrix for.
    pub kind: i32,
}

impl LocalStiffness {
    /// Wraps a square matrix, taking the DOF count from its dimensions.
    pub fn new(matrix: DMatrix<f64>, kind: i32) -> Self {
        let dof_count = matrix.nrows();
        Self {
            matrix,
            dof_count,
            kind,
        }
    }
}

/// Computes local stiffness matrices for one element formulation.
///
/// `coords` holds the node coordinates in connectivity order and `params` the material profile
/// row selected by the element. Any closure with the same signature is a kernel too, which
/// makes it easy to inject custom formulations at the call site.
pub trait ElementKernel: Send + Sync {
    fn stiffness(&self, coords: &[Point2<f64>], params: &[f64]) -> eyre::Result<LocalStiffness>;
}

impl<F> ElementKernel for F
where
    F: Fn(&[Point2<f64>], &[f64]) -> eyre::Result<LocalStiffness> + Send + Sync,
{
    fn stiffness(&self, coords: &[Point2<f64>], params: &[f64]) -> eyre::Result<LocalStiffness> {
        self(coords, params)
    }
}

/// Checks that a kernel received exactly the node count its formulation needs.
pub(crate) fn expect_node_count(coords: &[Point2<f64>], element_type: ElementType) -> eyre::Result<()> {
    let expected = element_type.layout().node_count;
    if coords.len() != expected {
        eyre::bail!(
            "{:?} element requires {} nodes, got {}",
            element_type,
            expected,
            coords.len()
        );
    }
    Ok(())
}
