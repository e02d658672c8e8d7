//! Isoparametric plane-stress kernels.
//!
//! All continuum kernels read their material row as `[young, poisson]` or
//! `[young, poisson, thickness]`; the thickness defaults to one.
use eyre::{bail, eyre};
use itertools::izip;
use nalgebra::{DMatrix, Matrix2, Matrix3, Point2};
use serde::{Deserialize, Serialize};

use crate::quadrature::{quadrilateral_gauss, triangle_gauss, QuadraturePair2d};
use crate::{expect_node_count, ElementKernel, ElementType, LocalStiffness};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneStressParameters {
    pub young: f64,
    pub poisson: f64,
    pub thickness: f64,
}

impl PlaneStressParameters {
    pub fn from_params(params: &[f64]) -> eyre::Result<Self> {
        let (young, poisson, thickness) = match *params {
            [young, poisson] => (young, poisson, 1.0),
            [young, poisson, thickness, ..] => (young, poisson, thickness),
            _ => bail!(
                "Plane stress material needs [young, poisson(, thickness)], got {} parameters",
                params.len()
            ),
        };
        if !(poisson > -1.0 && poisson < 1.0) {
            bail!("Poisson ratio must lie in (-1, 1), got {poisson}");
        }
        if !(thickness > 0.0) {
            bail!("Thickness must be positive, got {thickness}");
        }
        Ok(Self {
            young,
            poisson,
            thickness,
        })
    }

    /// Stress-strain matrix relating $(\epsilon_{xx}, \epsilon_{yy}, \gamma_{xy})$ to stresses.
    #[rustfmt::skip]
    pub fn constitutive_matrix(&self) -> Matrix3<f64> {
        let nu = self.poisson;
        let c = Matrix3::new(
            1.0, nu,  0.0,
            nu,  1.0, 0.0,
            0.0, 0.0, (1.0 - nu) / 2.0,
        );
        c * (self.young / (1.0 - nu * nu))
    }
}

/// Integrates $\int B^T C B \, t \, dA$ over an isoparametric element.
///
/// `reference_gradients` returns the $2 \times n$ matrix of shape function derivatives with
/// respect to the reference coordinates.
fn isoparametric_stiffness<G>(
    coords: &[Point2<f64>],
    material: &PlaneStressParameters,
    (weights, points): QuadraturePair2d,
    reference_gradients: G,
) -> eyre::Result<DMatrix<f64>>
where
    G: Fn(&Point2<f64>) -> DMatrix<f64>,
{
    let n = coords.len();
    let c = DMatrix::from_column_slice(3, 3, material.constitutive_matrix().as_slice());
    let mut k = DMatrix::zeros(2 * n, 2 * n);
    let mut b = DMatrix::zeros(3, 2 * n);

    for (w, xi) in izip!(&weights, &points) {
        let dn = reference_gradients(xi);
        debug_assert_eq!(dn.shape(), (2, n));

        let jacobian = Matrix2::from_fn(|a, d| (0..n).map(|i| dn[(a, i)] * coords[i][d]).sum::<f64>());
        let det = jacobian.determinant();
        if det.abs() <= f64::EPSILON {
            bail!("Singular element Jacobian encountered (det = {det})");
        }
        let jacobian_inv = jacobian
            .try_inverse()
            .ok_or_else(|| eyre!("Singular element Jacobian encountered"))?;

        for i in 0..n {
            let dn_dx = jacobian_inv[(0, 0)] * dn[(0, i)] + jacobian_inv[(0, 1)] * dn[(1, i)];
            let dn_dy = jacobian_inv[(1, 0)] * dn[(0, i)] + jacobian_inv[(1, 1)] * dn[(1, i)];
            b[(0, 2 * i)] = dn_dx;
            b[(1, 2 * i + 1)] = dn_dy;
            b[(2, 2 * i)] = dn_dy;
            b[(2, 2 * i + 1)] = dn_dx;
        }

        let cb = &c * &b;
        k += b.transpose() * cb * (*w * det.abs() * material.thickness);
    }

    Ok(k)
}

fn continuum_kernel(
    element_type: ElementType,
    coords: &[Point2<f64>],
    params: &[f64],
    rule: QuadraturePair2d,
    reference_gradients: impl Fn(&Point2<f64>) -> DMatrix<f64>,
) -> eyre::Result<LocalStiffness> {
    expect_node_count(coords, element_type)?;
    let material = PlaneStressParameters::from_params(params)?;
    let k = isoparametric_stiffness(coords, &material, rule, reference_gradients)?;
    Ok(LocalStiffness::new(k, element_type.code()))
}

#[rustfmt::skip]
fn quad4_gradients(xi: &Point2<f64>) -> DMatrix<f64> {
    // Node (alpha, beta) sits at the reference corner xi = (alpha, beta)
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    DMatrix::from_fn(2, 4, |d, i| {
        let (alpha, beta) = corners[i];
        match d {
            0 => alpha * (1.0 + beta * xi[1]) / 4.0,
            _ => beta * (1.0 + alpha * xi[0]) / 4.0,
        }
    })
}

/// Quadratic Lagrange polynomial on $[-1, 1]$ through the nodes $-1, 0, 1$ and its derivative.
fn lagrange_1d(node: i32, x: f64) -> (f64, f64) {
    match node {
        -1 => (0.5 * x * (x - 1.0), x - 0.5),
        0 => (1.0 - x * x, -2.0 * x),
        _ => (0.5 * x * (x + 1.0), x + 0.5),
    }
}

fn quad9_gradients(xi: &Point2<f64>) -> DMatrix<f64> {
    // Corners, then edge midpoints (bottom, right, top, left), then the center
    let nodes = [
        (-1, -1),
        (1, -1),
        (1, 1),
        (-1, 1),
        (0, -1),
        (1, 0),
        (0, 1),
        (-1, 0),
        (0, 0),
    ];
    DMatrix::from_fn(2, 9, |d, i| {
        let (a, b) = nodes[i];
        let (la, dla) = lagrange_1d(a, xi[0]);
        let (lb, dlb) = lagrange_1d(b, xi[1]);
        match d {
            0 => dla * lb,
            _ => la * dlb,
        }
    })
}

#[rustfmt::skip]
fn tri3_gradients(_xi: &Point2<f64>) -> DMatrix<f64> {
    DMatrix::from_row_slice(2, 3, &[
        -1.0, 1.0, 0.0,
        -1.0, 0.0, 1.0,
    ])
}

#[rustfmt::skip]
fn tri6_gradients(xi: &Point2<f64>) -> DMatrix<f64> {
    // Vertices, then midpoints of the edges (0, 1), (1, 2), (2, 0)
    let (r, s) = (xi[0], xi[1]);
    let t = 1.0 - r - s;
    DMatrix::from_row_slice(2, 6, &[
        1.0 - 4.0 * t, 4.0 * r - 1.0, 0.0,           4.0 * (t - r), 4.0 * s, -4.0 * s,
        1.0 - 4.0 * t, 0.0,           4.0 * s - 1.0, -4.0 * r,      4.0 * r, 4.0 * (t - s),
    ])
}

/// Bilinear quadrilateral, integrated with 2x2 Gauss points.
#[derive(Debug, Copy, Clone, Default)]
pub struct Quad4Kernel;

impl ElementKernel for Quad4Kernel {
    fn stiffness(&self, coords: &[Point2<f64>], params: &[f64]) -> eyre::Result<LocalStiffness> {
        continuum_kernel(ElementType::Quad4, coords, params, quadrilateral_gauss(2)?, quad4_gradients)
    }
}

/// Biquadratic quadrilateral, integrated with 3x3 Gauss points.
#[derive(Debug, Copy, Clone, Default)]
pub struct Quad9Kernel;

impl ElementKernel for Quad9Kernel {
    fn stiffness(&self, coords: &[Point2<f64>], params: &[f64]) -> eyre::Result<LocalStiffness> {
        continuum_kernel(ElementType::Quad9, coords, params, quadrilateral_gauss(3)?, quad9_gradients)
    }
}

/// Constant-strain triangle.
#[derive(Debug, Copy, Clone, Default)]
pub struct Tri3Kernel;

impl ElementKernel for Tri3Kernel {
    fn stiffness(&self, coords: &[Point2<f64>], params: &[f64]) -> eyre::Result<LocalStiffness> {
        continuum_kernel(ElementType::Tri3, coords, params, triangle_gauss(3)?, tri3_gradients)
    }
}

/// Quadratic triangle, integrated with the 7-point rule.
#[derive(Debug, Copy, Clone, Default)]
pub struct Tri6Kernel;

impl ElementKernel for Tri6Kernel {
    fn stiffness(&self, coords: &[Point2<f64>], params: &[f64]) -> eyre::Result<LocalStiffness> {
        continuum_kernel(ElementType::Tri6, coords, params, triangle_gauss(7)?, tri6_gradients)
    }
}
