//! Quadrature rules on the reference domains of the continuum elements.
//!
//! Quadrilateral rules live on $[-1, 1]^2$, triangle rules on the unit triangle with vertices
//! $(0, 0)$, $(1, 0)$ and $(0, 1)$. Weights are scaled so that they sum to the area of the
//! reference domain.
use eyre::bail;
use itertools::iproduct;
use nalgebra::Point2;

pub type QuadraturePair1d = (Vec<f64>, Vec<f64>);
pub type QuadraturePair2d = (Vec<f64>, Vec<Point2<f64>>);

/// Gauss-Legendre rule on $[-1, 1]$.
pub fn gauss(num_points: usize) -> eyre::Result<QuadraturePair1d> {
    let (weights, points) = match num_points {
        1 => (vec![2.0], vec![0.0]),
        2 => {
            let a = 1.0 / f64::sqrt(3.0);
            (vec![1.0, 1.0], vec![-a, a])
        }
        3 => {
            let a = f64::sqrt(3.0 / 5.0);
            (vec![5.0 / 9.0, 8.0 / 9.0, 5.0 / 9.0], vec![-a, 0.0, a])
        }
        n => bail!("No Gauss-Legendre rule with {n} points available"),
    };
    Ok((weights, points))
}

/// Tensor-product Gauss rule with `num_points_per_dim` points in each direction.
pub fn quadrilateral_gauss(num_points_per_dim: usize) -> eyre::Result<QuadraturePair2d> {
    let (w1d, p1d) = gauss(num_points_per_dim)?;
    let (weights, points): (Vec<f64>, Vec<Point2<f64>>) = iproduct!(0..p1d.len(), 0..p1d.len())
        .map(|(i, j)| (w1d[i] * w1d[j], Point2::new(p1d[i], p1d[j])))
        .unzip();
    Ok((weights, points))
}

/// Symmetric Gauss rules on the reference triangle with 3 or 7 points.
pub fn triangle_gauss(num_points: usize) -> eyre::Result<QuadraturePair2d> {
    match num_points {
        3 => {
            let points = vec![
                Point2::new(1.0 / 6.0, 1.0 / 6.0),
                Point2::new(2.0 / 3.0, 1.0 / 6.0),
                Point2::new(1.0 / 6.0, 2.0 / 3.0),
            ];
            Ok((vec![1.0 / 6.0; 3], points))
        }
        7 => {
            let (a1, b1, w1) = (0.059715871789770, 0.470142064105115, 0.132394152788506);
            let (a2, b2, w2) = (0.797426985353087, 0.101286507323456, 0.125939180544827);
            let points = vec![
                Point2::new(1.0 / 3.0, 1.0 / 3.0),
                Point2::new(a1, b1),
                Point2::new(b1, a1),
                Point2::new(b1, b1),
                Point2::new(a2, b2),
                Point2::new(b2, a2),
                Point2::new(b2, b2),
            ];
            let weights = [0.225, w1, w1, w1, w2, w2, w2]
                .iter()
                .map(|w| 0.5 * w)
                .collect();
            Ok((weights, points))
        }
        n => bail!("No triangle rule with {n} points available"),
    }
}
