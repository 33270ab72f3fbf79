use std::ops::{Mul, MulAssign};

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// A 2D affine transform stored as the six live cells of the homogeneous
/// 3x3 matrix:
///
/// ```text
/// | m11       m12       0 |
/// | m21       m22       0 |
/// | offset_x  offset_y  1 |
/// ```
///
/// Row-vector convention: a point `(x, y, 1)` maps to
/// `(x*m11 + y*m21 + offset_x, x*m12 + y*m22 + offset_y, 1)`, so composing
/// `a * b` applies `a` first, then `b`.
///
/// The type has plain value semantics. Transform methods mutate `self` in
/// place; assignment copies. No field is range-checked, and NaN or infinite
/// coefficients flow through every operation with ordinary IEEE arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Matrix {
    pub const fn new(m11: f64, m12: f64, m21: f64, m22: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            m11,
            m12,
            m21,
            m22,
            offset_x,
            offset_y,
        }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Product of `a` and `b`, applying `a` first. Neither argument is
    /// modified.
    pub fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
        Matrix::new(
            a.m11 * b.m11 + a.m12 * b.m21,
            a.m11 * b.m12 + a.m12 * b.m22,
            a.m21 * b.m11 + a.m22 * b.m21,
            a.m21 * b.m12 + a.m22 * b.m22,
            a.offset_x * b.m11 + a.offset_y * b.m21 + b.offset_x,
            a.offset_x * b.m12 + a.offset_y * b.m22 + b.offset_y,
        )
    }

    /// Sets `self = self * other`: this transform happens first, then
    /// `other`'s.
    pub fn append(&mut self, other: &Matrix) {
        *self = Matrix::multiply(self, other);
    }

    /// Sets `self = other * self`: `other`'s transform happens first, then
    /// this one.
    pub fn prepend(&mut self, other: &Matrix) {
        *self = Matrix::multiply(other, self);
    }

    pub fn determinant(&self) -> f64 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    /// True unless the determinant is exactly zero. A NaN determinant
    /// compares unequal to zero, so it reports invertible here; inversion
    /// then produces NaN coefficients rather than an error.
    pub fn has_inverse(&self) -> bool {
        !(self.determinant() == 0.0)
    }

    /// Exact comparison against the identity pattern. Any NaN field makes
    /// this false; `-0.0` offsets still count because `-0.0 == 0.0`.
    pub fn is_identity(&self) -> bool {
        self.m11 == 1.0
            && self.m12 == 0.0
            && self.m21 == 0.0
            && self.m22 == 1.0
            && self.offset_x == 0.0
            && self.offset_y == 0.0
    }

    pub fn set_identity(&mut self) {
        *self = Matrix::identity();
    }

    /// Replaces `self` with its inverse.
    ///
    /// Fails with [`MatrixError::NotInvertible`] on a zero determinant,
    /// leaving `self` untouched.
    pub fn invert(&mut self) -> Result<(), MatrixError> {
        if !self.has_inverse() {
            return Err(MatrixError::NotInvertible);
        }
        let d = self.determinant();
        let m11 = self.m22 / d;
        let m12 = -self.m12 / d;
        let m21 = -self.m21 / d;
        let m22 = self.m11 / d;
        *self = Matrix::new(
            m11,
            m12,
            m21,
            m22,
            -(self.offset_x * m11 + self.offset_y * m21),
            -(self.offset_x * m12 + self.offset_y * m22),
        );
        Ok(())
    }

    /// Copying form of [`Matrix::invert`].
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        let mut out = *self;
        out.invert()?;
        Ok(out)
    }

    /// Component-wise value equality where NaN compares equal to NaN
    /// (and `-0.0` equal to `0.0`). The derived `==` operator keeps IEEE
    /// semantics instead: any NaN component makes `==` false, even against
    /// the identical bit pattern.
    pub fn value_eq(&self, other: &Matrix) -> bool {
        scalar_eq(self.m11, other.m11)
            && scalar_eq(self.m12, other.m12)
            && scalar_eq(self.m21, other.m21)
            && scalar_eq(self.m22, other.m22)
            && scalar_eq(self.offset_x, other.offset_x)
            && scalar_eq(self.offset_y, other.offset_y)
    }

    /// Static form of [`Matrix::value_eq`].
    pub fn equals(a: &Matrix, b: &Matrix) -> bool {
        a.value_eq(b)
    }

    /// XOR of the six per-field scalar hashes, in field order.
    ///
    /// XOR combination means equal field pairs cancel: both the identity
    /// matrix and the all-zero matrix hash to 0 despite being unequal.
    /// Callers get no collision resistance beyond that. Matrices equal
    /// under [`Matrix::value_eq`] always hash alike.
    pub fn hash_code(&self) -> u64 {
        scalar_hash(self.m11)
            ^ scalar_hash(self.m12)
            ^ scalar_hash(self.m21)
            ^ scalar_hash(self.m22)
            ^ scalar_hash(self.offset_x)
            ^ scalar_hash(self.offset_y)
    }

    /// Applies the full affine map to a point.
    #[inline]
    pub fn transform_point(&self, p: (f64, f64)) -> (f64, f64) {
        (
            p.0 * self.m11 + p.1 * self.m21 + self.offset_x,
            p.0 * self.m12 + p.1 * self.m22 + self.offset_y,
        )
    }

    /// Applies only the linear part to a vector; translation is ignored.
    #[inline]
    pub fn transform_vector(&self, v: (f64, f64)) -> (f64, f64) {
        (
            v.0 * self.m11 + v.1 * self.m21,
            v.0 * self.m12 + v.1 * self.m22,
        )
    }

    /// Transforms every point in place. An empty slice is a no-op.
    pub fn transform_points(&self, pts: &mut [(f64, f64)]) {
        for p in pts.iter_mut() {
            *p = self.transform_point(*p);
        }
    }

    /// Transforms every vector in place. An empty slice is a no-op.
    pub fn transform_vectors(&self, vecs: &mut [(f64, f64)]) {
        for v in vecs.iter_mut() {
            *v = self.transform_vector(*v);
        }
    }

    // Named helpers. Each builds the canonical matrix for the operation and
    // appends or prepends it. Angles are degrees. The pivot (`*_at`) forms
    // use the fused composite T(-cx,-cy) * op * T(cx,cy) as one matrix.

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.append(&Matrix::scaling(sx, sy, 0.0, 0.0));
    }

    pub fn scale_prepend(&mut self, sx: f64, sy: f64) {
        self.prepend(&Matrix::scaling(sx, sy, 0.0, 0.0));
    }

    pub fn scale_at(&mut self, sx: f64, sy: f64, cx: f64, cy: f64) {
        self.append(&Matrix::scaling(sx, sy, cx, cy));
    }

    pub fn scale_at_prepend(&mut self, sx: f64, sy: f64, cx: f64, cy: f64) {
        self.prepend(&Matrix::scaling(sx, sy, cx, cy));
    }

    pub fn rotate(&mut self, angle_deg: f64) {
        self.append(&Matrix::rotation(angle_deg, 0.0, 0.0));
    }

    pub fn rotate_prepend(&mut self, angle_deg: f64) {
        self.prepend(&Matrix::rotation(angle_deg, 0.0, 0.0));
    }

    pub fn rotate_at(&mut self, angle_deg: f64, cx: f64, cy: f64) {
        self.append(&Matrix::rotation(angle_deg, cx, cy));
    }

    pub fn rotate_at_prepend(&mut self, angle_deg: f64, cx: f64, cy: f64) {
        self.prepend(&Matrix::rotation(angle_deg, cx, cy));
    }

    pub fn skew(&mut self, ax_deg: f64, ay_deg: f64) {
        self.append(&Matrix::skewing(ax_deg, ay_deg, 0.0, 0.0));
    }

    pub fn skew_prepend(&mut self, ax_deg: f64, ay_deg: f64) {
        self.prepend(&Matrix::skewing(ax_deg, ay_deg, 0.0, 0.0));
    }

    pub fn skew_at(&mut self, ax_deg: f64, ay_deg: f64, cx: f64, cy: f64) {
        self.append(&Matrix::skewing(ax_deg, ay_deg, cx, cy));
    }

    pub fn skew_at_prepend(&mut self, ax_deg: f64, ay_deg: f64, cx: f64, cy: f64) {
        self.prepend(&Matrix::skewing(ax_deg, ay_deg, cx, cy));
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.append(&Matrix::translation(tx, ty));
    }

    pub fn translate_prepend(&mut self, tx: f64, ty: f64) {
        self.prepend(&Matrix::translation(tx, ty));
    }

    /// Scale about `(cx, cy)`: the offsets are T(-c) * scale * T(c)
    /// collapsed to one matrix.
    fn scaling(sx: f64, sy: f64, cx: f64, cy: f64) -> Matrix {
        Matrix::new(sx, 0.0, 0.0, sy, cx - sx * cx, cy - sy * cy)
    }

    /// Rotation about `(cx, cy)`, angle in degrees.
    fn rotation(angle_deg: f64, cx: f64, cy: f64) -> Matrix {
        let r = angle_deg.to_radians();
        let (sin, cos) = (r.sin(), r.cos());
        Matrix::new(
            cos,
            sin,
            -sin,
            cos,
            cx * (1.0 - cos) + cy * sin,
            cy * (1.0 - cos) - cx * sin,
        )
    }

    /// Skew about `(cx, cy)`, angles in degrees. `ax` shears x by y,
    /// `ay` shears y by x.
    fn skewing(ax_deg: f64, ay_deg: f64, cx: f64, cy: f64) -> Matrix {
        let tan_ax = ax_deg.to_radians().tan();
        let tan_ay = ay_deg.to_radians().tan();
        Matrix::new(1.0, tan_ay, tan_ax, 1.0, -cy * tan_ax, -cx * tan_ay)
    }

    fn translation(tx: f64, ty: f64) -> Matrix {
        Matrix::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, other: Matrix) -> Matrix {
        Matrix::multiply(&self, &other)
    }
}

impl MulAssign for Matrix {
    fn mul_assign(&mut self, other: Matrix) {
        self.append(&other);
    }
}

#[inline]
fn scalar_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Per-field hash: the raw IEEE bits, with every NaN payload collapsed to
/// one value and `-0.0` collapsed to `0.0` so that scalars equal under
/// `scalar_eq` hash alike.
#[inline]
fn scalar_hash(v: f64) -> u64 {
    let bits = v.to_bits();
    if (bits.wrapping_sub(1) & 0x7FFF_FFFF_FFFF_FFFF) >= 0x7FF0_0000_0000_0000 {
        // NaN (any payload) or -0.0.
        bits & 0x7FF0_0000_0000_0000
    } else {
        bits
    }
}
