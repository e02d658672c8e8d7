use crate::error::AssemblyError;
use crate::kernels::{ElementKernel, ElementType, LocalStiffness};
use crate::mesh::Mesh;
use crate::registry::KernelRegistry;
use nalgebra::Point2;
use std::fmt;

/// Computes the local stiffness matrix of individual elements of a mesh.
///
/// The kernel is looked up in the registry by the element's type code, unless an override kernel
/// is set. The override then handles every element regardless of its type.
#[derive(Clone, Copy)]
pub struct ElementRetriever<'a> {
    mesh: &'a Mesh,
    registry: &'a KernelRegistry,
    override_kernel: Option<&'a dyn ElementKernel>,
}

impl<'a> ElementRetriever<'a> {
    pub fn new(mesh: &'a Mesh, registry: &'a KernelRegistry) -> Self {
        Self {
            mesh,
            registry,
            override_kernel: None,
        }
    }

    pub fn with_override(self, kernel: &'a dyn ElementKernel) -> Self {
        self.with_optional_override(Some(kernel))
    }

    pub fn with_optional_override(self, kernel: Option<&'a dyn ElementKernel>) -> Self {
        Self {
            override_kernel: kernel,
            ..self
        }
    }

    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    pub fn num_elements(&self) -> usize {
        self.mesh.num_elements()
    }

    fn kernel_for(&self, element_index: usize, kind: i32) -> Result<&'a dyn ElementKernel, AssemblyError> {
        if let Some(kernel) = self.override_kernel {
            return Ok(kernel);
        }
        ElementType::from_code(kind)
            .and_then(|element_type| self.registry.get(element_type))
            .ok_or(AssemblyError::UnknownElementType {
                element: element_index,
                kind,
            })
    }

    /// Gathers the element's node coordinates and material row and invokes its kernel.
    ///
    /// The returned matrix is guaranteed to be square with side `dof_count`.
    pub fn retrieve(&self, element_index: usize) -> Result<LocalStiffness, AssemblyError> {
        let element = self
            .mesh
            .elements()
            .get(element_index)
            .ok_or(AssemblyError::ElementOutOfRange {
                element: element_index,
                num_elements: self.mesh.num_elements(),
            })?;

        let nodes = self.mesh.nodes();
        let coords = element
            .connectivity
            .iter()
            .map(|&node| {
                nodes
                    .get(node)
                    .map(|node| node.position)
                    .ok_or(AssemblyError::NodeOutOfRange {
                        element: element_index,
                        node,
                        num_nodes: nodes.len(),
                    })
            })
            .collect::<Result<Vec<Point2<f64>>, _>>()?;

        let material = self
            .mesh
            .materials()
            .get(element.material)
            .ok_or(AssemblyError::MaterialOutOfRange {
                element: element_index,
                material: element.material,
                num_materials: self.mesh.materials().len(),
            })?;

        let kernel = self.kernel_for(element_index, element.kind)?;
        let local = kernel
            .stiffness(&coords, &material.params)
            .map_err(|source| AssemblyError::Kernel {
                element: element_index,
                source,
            })?;

        if local.matrix.shape() != (local.dof_count, local.dof_count) {
            let allocated = element
                .element_type()
                .map_or(local.dof_count, |element_type| element_type.layout().dof_count());
            return Err(AssemblyError::InconsistentDofCount {
                element: element_index,
                reported: local.dof_count,
                allocated,
                matrix_shape: local.matrix.shape(),
            });
        }
        Ok(local)
    }
}

impl fmt::Debug for ElementRetriever<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRetriever")
            .field("num_elements", &self.mesh.num_elements())
            .field("registry", self.registry)
            .field("has_override", &self.override_kernel.is_some())
            .finish()
    }
}
