//! Assembly of the global linear system.
//!
//! The pipeline runs in stages: the [`EquationMap`] numbers the free DOFs, the
//! [`AssemblyOperator`] maps local element DOFs to equations, the [`ElementRetriever`] computes
//! local stiffness matrices, and the global assemblers scatter them into the global matrix.
//! Point loads are assembled into the right-hand side independently.
use crate::dof::EquationMap;
use crate::error::AssemblyError;
use crate::kernels::ElementKernel;
use crate::mesh::{Mesh, PointLoad};
use crate::registry::KernelRegistry;
use log::info;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

pub mod global;
pub mod load;
pub mod local;
pub mod operator;

pub use global::{
    assemble_dense, assemble_sparse, assemble_stiffness, par_assemble_dense, par_assemble_sparse, GlobalStiffness,
};
pub use load::assemble_loads;
pub use local::ElementRetriever;
pub use operator::{build_assembly_operator, AssemblyOperator};

/// Storage format of the assembled global stiffness matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorageFormat {
    Dense,
    #[default]
    Sparse,
}

/// Options controlling how the global stiffness matrix is assembled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyOptions {
    pub format: StorageFormat,
    /// Compute element matrices on the rayon thread pool.
    pub parallel: bool,
}

impl AssemblyOptions {
    pub fn dense() -> Self {
        Self {
            format: StorageFormat::Dense,
            ..Self::default()
        }
    }

    pub fn sparse() -> Self {
        Self {
            format: StorageFormat::Sparse,
            ..Self::default()
        }
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }
}

/// The assembled system `K u = f` together with the numbering that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub neq: usize,
    pub equations: EquationMap,
    pub operator: AssemblyOperator,
    pub stiffness: GlobalStiffness,
    pub rhs: DVector<f64>,
}

/// Assembles the global stiffness matrix and load vector of a mesh.
///
/// If `override_kernel` is given it computes the stiffness of every element, otherwise the
/// kernel registered for each element's type is used.
pub fn assemble_system(
    mesh: &Mesh,
    loads: &[PointLoad],
    registry: &KernelRegistry,
    override_kernel: Option<&dyn ElementKernel>,
    options: &AssemblyOptions,
) -> Result<LinearSystem, AssemblyError> {
    info!(
        "Assembling system for {} nodes and {} elements ({:?}, parallel: {})",
        mesh.num_nodes(),
        mesh.num_elements(),
        options.format,
        options.parallel
    );

    let (operator, equations) = build_assembly_operator(mesh)?;
    let retriever = ElementRetriever::new(mesh, registry).with_optional_override(override_kernel);
    let stiffness = assemble_stiffness(&retriever, &operator, options)?;
    let rhs = assemble_loads(loads, &equations)?;

    info!(
        "Assembled system with {} equations ({} stored stiffness entries)",
        equations.neq(),
        stiffness.nnz()
    );
    Ok(LinearSystem {
        neq: equations.neq(),
        equations,
        operator,
        stiffness,
        rhs,
    })
}
