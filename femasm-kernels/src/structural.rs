//! Two-node line elements: springs, truss bars and beams.
use eyre::bail;
use nalgebra::{DMatrix, Point2, Vector2};

use crate::{expect_node_count, ElementKernel, ElementType, LocalStiffness};

/// Returns the length and unit direction of the segment between the two nodes.
fn segment(coords: &[Point2<f64>]) -> eyre::Result<(f64, Vector2<f64>)> {
    let d = coords[1] - coords[0];
    let length = d.norm();
    if !(length > 0.0) {
        bail!("Line element has zero length");
    }
    Ok((length, d / length))
}

fn param(params: &[f64], index: usize, name: &str) -> eyre::Result<f64> {
    params
        .get(index)
        .copied()
        .ok_or_else(|| eyre::eyre!("Missing material parameter `{name}` at position {index}"))
}

/// Rotates an axial stiffness `k` onto the two in-plane displacement components of each node.
#[rustfmt::skip]
fn axial_stiffness(k: f64, direction: &Vector2<f64>) -> DMatrix<f64> {
    let (nx, ny) = (direction.x, direction.y);
    let q = DMatrix::from_row_slice(2, 4, &[
        nx,  ny,  0.0, 0.0,
        0.0, 0.0, nx,  ny,
    ]);
    let local = DMatrix::from_row_slice(2, 2, &[
         k, -k,
        -k,  k,
    ]);
    q.transpose() * local * q
}

/// Linear spring with material row `[stiffness]`.
#[derive(Debug, Copy, Clone, Default)]
pub struct SpringKernel;

impl ElementKernel for SpringKernel {
    fn stiffness(&self, coords: &[Point2<f64>], params: &[f64]) -> eyre::Result<LocalStiffness> {
        expect_node_count(coords, ElementType::Spring)?;
        let (_, direction) = segment(coords)?;
        let k = param(params, 0, "stiffness")?;
        Ok(LocalStiffness::new(
            axial_stiffness(k, &direction),
            ElementType::Spring.code(),
        ))
    }
}

/// Pin-jointed bar with material row `[young, area]`.
#[derive(Debug, Copy, Clone, Default)]
pub struct TrussKernel;

impl ElementKernel for TrussKernel {
    fn stiffness(&self, coords: &[Point2<f64>], params: &[f64]) -> eyre::Result<LocalStiffness> {
        expect_node_count(coords, ElementType::Truss)?;
        let (length, direction) = segment(coords)?;
        let young = param(params, 0, "young")?;
        let area = param(params, 1, "area")?;
        Ok(LocalStiffness::new(
            axial_stiffness(young * area / length, &direction),
            ElementType::Truss.code(),
        ))
    }
}

/// Euler-Bernoulli beam without axial stiffness, material row `[young, second_moment]`.
///
/// The nodal DOFs are $(u_x, u_y, \theta)$, so the local matrix is $6 \times 6$.
#[derive(Debug, Copy, Clone, Default)]
pub struct BeamKernel;

impl ElementKernel for BeamKernel {
    #[rustfmt::skip]
    fn stiffness(&self, coords: &[Point2<f64>], params: &[f64]) -> eyre::Result<LocalStiffness> {
        expect_node_count(coords, ElementType::Beam)?;
        let (l, direction) = segment(coords)?;
        let (nx, ny) = (direction.x, direction.y);
        let bending_stiffness = param(params, 0, "young")? * param(params, 1, "second_moment")?;

        // Maps nodal DOFs to (transverse displacement, rotation) at each end
        let q = DMatrix::from_row_slice(4, 6, &[
            -ny, nx,  0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, -ny, nx,  0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ]);
        let (l2, l3) = (l * l, l * l * l);
        let local = DMatrix::from_row_slice(4, 4, &[
             12.0 / l3,  6.0 / l2, -12.0 / l3,  6.0 / l2,
              6.0 / l2,  4.0 / l,   -6.0 / l2,  2.0 / l,
            -12.0 / l3, -6.0 / l2,  12.0 / l3, -6.0 / l2,
              6.0 / l2,  2.0 / l,   -6.0 / l2,  4.0 / l,
        ]);
        let k = q.transpose() * local * q * bending_stiffness;
        Ok(LocalStiffness::new(k, ElementType::Beam.code()))
    }
}
