//! Assembly of global stiffness matrices and load vectors for small-strain finite element models.
//!
//! Given a [`Mesh`](mesh::Mesh) of nodes with boundary-condition flags, typed elements and
//! material profiles, `femasm` numbers the free degrees of freedom, computes element stiffness
//! matrices through pluggable [kernels](kernels::ElementKernel) and assembles them into a dense
//! or sparse global matrix. See [`assemble_system`](assembly::assemble_system) for the one-call
//! entry point.
pub mod assembly;
pub mod dof;
pub mod error;
pub mod mesh;
pub mod registry;

pub mod kernels {
    pub use femasm_kernels::*;
}

#[cfg(feature = "proptest-support")]
pub mod proptest;

pub use assembly::{assemble_system, AssemblyOptions, LinearSystem, StorageFormat};
pub use dof::EquationMap;
pub use error::AssemblyError;
pub use registry::KernelRegistry;

pub extern crate nalgebra;
pub extern crate nalgebra_sparse;
