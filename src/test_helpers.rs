use crate::matrix::Matrix;

/// Asserts component-wise closeness of two matrices within `tol`, with a
/// readable message naming the first differing field.
pub fn assert_mat_near(got: &Matrix, want: &Matrix, tol: f64) {
    let pairs = [
        ("m11", got.m11, want.m11),
        ("m12", got.m12, want.m12),
        ("m21", got.m21, want.m21),
        ("m22", got.m22, want.m22),
        ("offset_x", got.offset_x, want.offset_x),
        ("offset_y", got.offset_y, want.offset_y),
    ];
    for (name, g, w) in pairs {
        assert!(
            (g - w).abs() <= tol,
            "{name}: got {g}, want {w} (tol {tol})\n got: {got:?}\nwant: {want:?}"
        );
    }
}

pub fn assert_xy_near(got: (f64, f64), want: (f64, f64), tol: f64) {
    assert!(
        (got.0 - want.0).abs() <= tol && (got.1 - want.1).abs() <= tol,
        "got ({}, {}), want ({}, {}) (tol {tol})",
        got.0,
        got.1,
        want.0,
        want.1
    );
}
