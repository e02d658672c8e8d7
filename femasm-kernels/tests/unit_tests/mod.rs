use femasm_kernels::nalgebra::{DMatrix, DVector, Point2};


fn unit_square() -> Vec<Point2<f64>> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
    ]
}

/// Interleaved nodal displacements of the rigid motion `u(x) = t + theta * (-y, x)`.
fn rigid_motion(coords: &[Point2<f64>], tx: f64, ty: f64, theta: f64) -> DVector<f64> {
    DVector::from_iterator(
        2 * coords.len(),
        coords
            .iter()
            .flat_map(|p| [tx - theta * p.y, ty + theta * p.x]),
    )
}

fn assert_symmetric(matrix: &DMatrix<f64>, tol: f64) {
    let diff = matrix - matrix.transpose();
    assert!(diff.amax() <= tol, "matrix is not symmetric: {}", diff.amax());
}
