use crate::dof::EquationMap;
use crate::error::AssemblyError;
use crate::mesh::PointLoad;
use log::{debug, warn};
use nalgebra::DVector;

/// Builds the global right-hand side from nodal point loads.
///
/// Loads are processed in input order and each free component overwrites its equation slot, so
/// when several loads target the same DOF the last one wins. Components on constrained DOFs are
/// dropped.
pub fn assemble_loads(loads: &[PointLoad], equations: &EquationMap) -> Result<DVector<f64>, AssemblyError> {
    let mut rhs = DVector::zeros(equations.neq());

    for (load_index, load) in loads.iter().enumerate() {
        let node_equations = equations
            .node_equations(load.node)
            .ok_or(AssemblyError::LoadNodeOutOfRange {
                load: load_index,
                node: load.node,
                num_nodes: equations.num_nodes(),
            })?;

        for (dof, value) in [load.fx, load.fy].into_iter().enumerate() {
            match node_equations.get(dof).copied().flatten() {
                Some(eq) => rhs[eq] = value,
                None if value != 0.0 => warn!(
                    "Load {} applies {} to constrained DOF {} of node {}. The component is dropped.",
                    load_index, value, dof, load.node
                ),
                None => {}
            }
        }
    }

    debug!("Assembled {} point loads into {} equations", loads.len(), equations.neq());
    Ok(rhs)
}
