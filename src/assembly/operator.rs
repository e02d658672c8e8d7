use crate::dof::EquationMap;
use crate::error::AssemblyError;
use crate::kernels::ElementType;
use crate::mesh::Mesh;
use log::debug;
use serde::{Deserialize, Serialize};

/// Maps the local DOFs of every element to global equations.
///
/// The local DOFs of an element with `d` DOFs per node are ordered node-major: local DOF
/// `d * j + l` is component `l` of the element's `j`-th node. Every row has exactly the DOF
/// count of its element type, and constrained DOFs are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyOperator {
    offsets: Vec<usize>,
    entries: Vec<Option<usize>>,
    neq: usize,
}

impl AssemblyOperator {
    pub fn build(mesh: &Mesh, equations: &EquationMap) -> Result<Self, AssemblyError> {
        let mut offsets = Vec::with_capacity(mesh.num_elements() + 1);
        let mut entries = Vec::new();
        offsets.push(0);

        for (element_index, element) in mesh.elements().iter().enumerate() {
            let element_type = ElementType::from_code(element.kind).ok_or(AssemblyError::UnknownElementType {
                element: element_index,
                kind: element.kind,
            })?;
            let layout = element_type.layout();

            if element.connectivity.len() != layout.node_count {
                return Err(AssemblyError::ConnectivityMismatch {
                    element: element_index,
                    expected: layout.node_count,
                    actual: element.connectivity.len(),
                });
            }

            for &node in &element.connectivity {
                let node_equations = equations
                    .node_equations(node)
                    .ok_or(AssemblyError::NodeOutOfRange {
                        element: element_index,
                        node,
                        num_nodes: equations.num_nodes(),
                    })?;
                if node_equations.len() < layout.dofs_per_node {
                    return Err(AssemblyError::MissingNodeDofs {
                        element: element_index,
                        node,
                        required: layout.dofs_per_node,
                        available: node_equations.len(),
                    });
                }
                entries.extend_from_slice(&node_equations[..layout.dofs_per_node]);
            }
            offsets.push(entries.len());
        }

        debug!(
            "Built assembly operator for {} elements ({} local DOFs)",
            mesh.num_elements(),
            entries.len()
        );
        Ok(Self {
            offsets,
            entries,
            neq: equations.neq(),
        })
    }

    pub fn neq(&self) -> usize {
        self.neq
    }

    pub fn num_elements(&self) -> usize {
        self.offsets.len() - 1
    }

    /// The global equations of the local DOFs of the given element.
    ///
    /// # Panics
    ///
    /// Panics if the element index is out of bounds.
    pub fn element_dofs(&self, element_index: usize) -> &[Option<usize>] {
        &self.entries[self.offsets[element_index]..self.offsets[element_index + 1]]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Option<usize>]> {
        self.offsets
            .windows(2)
            .map(move |range| &self.entries[range[0]..range[1]])
    }
}

/// Counts the equations of the mesh and builds its assembly operator in one go.
pub fn build_assembly_operator(mesh: &Mesh) -> Result<(AssemblyOperator, EquationMap), AssemblyError> {
    let equations = EquationMap::count(mesh.nodes());
    let operator = AssemblyOperator::build(mesh, &equations)?;
    Ok((operator, equations))
}
