//! Numbering of the free degrees of freedom.
use crate::error::AssemblyError;
use crate::mesh::Node;
use log::debug;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Global equation index of every nodal DOF, or `None` for constrained DOFs.
///
/// Equation indices are assigned densely, in node order and then DOF order within each node, so
/// the free DOFs are numbered exactly `0..neq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationMap {
    // Node i owns equations[offsets[i]..offsets[i + 1]]
    offsets: Vec<usize>,
    equations: Vec<Option<usize>>,
    neq: usize,
}

impl EquationMap {
    /// Counts the active equations of the node table.
    pub fn count(nodes: &[Node]) -> Self {
        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut equations = Vec::with_capacity(2 * nodes.len());
        let mut neq = 0;

        offsets.push(0);
        for node in nodes {
            for &flag in &node.bc {
                if flag == 0 {
                    equations.push(Some(neq));
                    neq += 1;
                } else {
                    equations.push(None);
                }
            }
            offsets.push(equations.len());
        }

        debug!("Counted {} equations for {} nodes", neq, nodes.len());
        Self {
            offsets,
            equations,
            neq,
        }
    }

    /// The number of free DOFs, i.e. the size of the global system.
    pub fn neq(&self) -> usize {
        self.neq
    }

    pub fn num_nodes(&self) -> usize {
        self.offsets.len() - 1
    }

    /// The equations of each DOF of the given node, or `None` if the node does not exist.
    pub fn node_equations(&self, node: usize) -> Option<&[Option<usize>]> {
        let begin = *self.offsets.get(node)?;
        let end = *self.offsets.get(node + 1)?;
        Some(&self.equations[begin..end])
    }

    /// The equation of a single nodal DOF. `None` if it is constrained or does not exist.
    pub fn equation(&self, node: usize, dof: usize) -> Option<usize> {
        self.node_equations(node)?.get(dof).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Option<usize>]> {
        self.offsets
            .windows(2)
            .map(move |range| &self.equations[range[0]..range[1]])
    }

    /// Distributes a solution of the global system back onto the nodal DOFs.
    ///
    /// Constrained DOFs receive zero. The result has one entry per node with as many values as
    /// that node has DOFs.
    pub fn scatter_solution(&self, solution: &DVector<f64>) -> Result<Vec<Vec<f64>>, AssemblyError> {
        if solution.len() != self.neq {
            return Err(AssemblyError::DimensionMismatch {
                expected: self.neq,
                actual: solution.len(),
            });
        }

        Ok(self
            .iter()
            .map(|dofs| {
                dofs.iter()
                    .map(|eq| eq.map_or(0.0, |eq| solution[eq]))
                    .collect()
            })
            .collect())
    }
}
