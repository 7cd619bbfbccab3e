//! Matrix inversion.
//!
//! Three independent algorithms are provided, each with a different tradeoff:
//!
//! - The *affine* inverse ([`Matrix4::inverse_3x4`]) only inverts the 3x3 linear part via its
//!   adjugate and derives the new translation from it. It is the cheapest option, but only valid
//!   for affine transforms.
//! - The *adjoint* inverse ([`Matrix4::inverse_adjoint`]) applies Cramer's rule to the full 4x4
//!   matrix.
//! - The *Gauss-Jordan* inverse ([`Matrix4::inverse_gauss_jordan`]) performs elimination with
//!   partial pivoting on an augmented matrix, which behaves better for badly conditioned inputs.
//!
//! All of them reject matrices whose determinant (or largest available pivot) is smaller in
//! magnitude than [`SINGULARITY_THRESHOLD`], and never modify their target when they do.

use crate::{Matrix3, SINGULARITY_THRESHOLD};

use super::Matrix4;

/// For each row/column index, the three remaining indices once it is deleted.
const COMPLEMENT: [[usize; 3]; 4] = [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];

/// Determinant of the 3x3 submatrix of `m` formed by `rows` and `cols`.
#[inline]
fn minor(m: &[f64; 16], rows: [usize; 3], cols: [usize; 3]) -> f64 {
    let e = |r: usize, c: usize| m[cols[c] * 4 + rows[r]];
    e(0, 0) * (e(1, 1) * e(2, 2) - e(1, 2) * e(2, 1))
        - e(0, 1) * (e(1, 0) * e(2, 2) - e(1, 2) * e(2, 0))
        + e(0, 2) * (e(1, 0) * e(2, 1) - e(1, 1) * e(2, 0))
}

impl Matrix4 {
    /// Returns the signed minor obtained by deleting `row` and `col`.
    #[inline]
    pub(super) fn cofactor(&self, row: usize, col: usize) -> f64 {
        let minor = minor(&self.0, COMPLEMENT[row], COMPLEMENT[col]);
        if (row + col) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    /// Computes the inverse of this affine transform.
    ///
    /// Returns [`None`] if the 3x3 linear part is singular. The bottom row of `self` is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let m = Matrix4::from_translation(vec3(1.0, 2.0, 3.0));
    /// let inv = m.inverse_3x4().unwrap();
    /// assert_eq!(inv, Matrix4::from_translation(vec3(-1.0, -2.0, -3.0)));
    ///
    /// let flat = Matrix4::from_matrix3(&Matrix3::from_scale(vec3(1.0, 1.0, 0.0)));
    /// assert_eq!(flat.inverse_3x4(), None);
    /// ```
    pub fn inverse_3x4(&self) -> Option<Matrix4> {
        let mut out = Self::IDENTITY;
        out.set_inverse_3x4(self)?;
        Some(out)
    }

    /// Overwrites `self` with the inverse of the affine transform `src`.
    ///
    /// The linear part is inverted via its adjugate, and the translation of the result is
    /// `-R⁻¹ · t`. The bottom row of the result is `(0, 0, 0, 1)`.
    ///
    /// Returns [`None`] and leaves `self` untouched if the determinant of the linear part of `src`
    /// is smaller in magnitude than [`SINGULARITY_THRESHOLD`].
    pub fn set_inverse_3x4(&mut self, src: &Matrix4) -> Option<&mut Self> {
        let linear = Matrix3::from_matrix4(src);
        let det = linear.determinant();
        if det.abs() < SINGULARITY_THRESHOLD {
            log::trace!("affine transform is singular (det={det:e})");
            return None;
        }

        let inv = linear.adjugate() * (1.0 / det);
        let translation = -(inv * src.translation());
        Some(self.set_from_matrix3(&inv).set_translation(translation))
    }

    /// Inverts this affine transform in place.
    ///
    /// Returns `false` and leaves `self` untouched if it is singular. See
    /// [`Matrix4::set_inverse_3x4`].
    pub fn invert_3x4(&mut self) -> bool {
        let src = *self;
        self.set_inverse_3x4(&src).is_some()
    }

    /// Computes the inverse of this matrix via its adjugate (Cramer's rule).
    ///
    /// Returns [`None`] if the matrix is singular.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// use approx::assert_relative_eq;
    ///
    /// let m = Matrix4::from_basis(vec3(2.0, 0.0, 0.0), vec3(1.0, 1.0, 0.0), None, None);
    /// let inv = m.inverse_adjoint().unwrap();
    /// assert_relative_eq!(m * inv, Matrix4::IDENTITY);
    ///
    /// assert_eq!(Matrix4::ZERO.inverse_adjoint(), None);
    /// ```
    pub fn inverse_adjoint(&self) -> Option<Matrix4> {
        let mut out = Self::IDENTITY;
        out.set_inverse_adjoint(self)?;
        Some(out)
    }

    /// Overwrites `self` with the inverse of `src`, computed via its adjugate.
    ///
    /// Element `(i, j)` of the inverse is the cofactor `(j, i)` of `src`, divided by the
    /// determinant.
    ///
    /// Returns [`None`] and leaves `self` untouched if the determinant of `src` is smaller in
    /// magnitude than [`SINGULARITY_THRESHOLD`].
    pub fn set_inverse_adjoint(&mut self, src: &Matrix4) -> Option<&mut Self> {
        let m = &src.0;
        let c = |row, col| src.cofactor(row, col);

        // Expansion along row 0 reuses the first 4 cofactors.
        let (c00, c01, c02, c03) = (c(0, 0), c(0, 1), c(0, 2), c(0, 3));
        let det = m[0] * c00 + m[4] * c01 + m[8] * c02 + m[12] * c03;
        if det.abs() < SINGULARITY_THRESHOLD {
            log::trace!("matrix is singular (det={det:e})");
            return None;
        }

        // Column-major storage of the transposed cofactor matrix is the row-major cofactor matrix.
        #[rustfmt::skip]
        let adjugate = [
            c00,     c01,     c02,     c03,
            c(1, 0), c(1, 1), c(1, 2), c(1, 3),
            c(2, 0), c(2, 1), c(2, 2), c(2, 3),
            c(3, 0), c(3, 1), c(3, 2), c(3, 3),
        ];
        let inv_det = 1.0 / det;
        self.0 = adjugate.map(|cofactor| cofactor * inv_det);
        Some(self)
    }

    /// Inverts this matrix in place via its adjugate.
    ///
    /// Returns `false` and leaves `self` untouched if it is singular. See
    /// [`Matrix4::set_inverse_adjoint`].
    pub fn invert_adjoint(&mut self) -> bool {
        let src = *self;
        self.set_inverse_adjoint(&src).is_some()
    }

    /// Computes the inverse of this matrix via Gauss-Jordan elimination with partial pivoting.
    ///
    /// Returns [`None`] if the matrix is singular.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// use approx::assert_relative_eq;
    ///
    /// let m = Matrix4::from_translation(vec3(1.0, 2.0, 3.0));
    /// assert_relative_eq!(
    ///     m.inverse_gauss_jordan().unwrap(),
    ///     m.inverse_adjoint().unwrap()
    /// );
    /// ```
    pub fn inverse_gauss_jordan(&self) -> Option<Matrix4> {
        let mut out = Self::IDENTITY;
        out.set_inverse_gauss_jordan(self)?;
        Some(out)
    }

    /// Overwrites `self` with the inverse of `src`, computed via Gauss-Jordan elimination.
    ///
    /// `src` is reduced to the identity matrix by row operations, which are mirrored on an
    /// identity matrix to produce the inverse. For each column, the remaining row with the
    /// largest absolute value in that column is chosen as the pivot.
    ///
    /// Returns [`None`] and leaves `self` untouched if no pivot of magnitude
    /// [`SINGULARITY_THRESHOLD`] or more can be found for some column.
    pub fn set_inverse_gauss_jordan(&mut self, src: &Matrix4) -> Option<&mut Self> {
        // Row-major scratch copies: `a` is reduced to the identity, `inv` accumulates the inverse.
        let mut a = [[0.0; 4]; 4];
        let mut inv = [[0.0; 4]; 4];
        for row in 0..4 {
            a[row] = src.row(row);
            inv[row][row] = 1.0;
        }

        // Forward pass: reduce to upper triangular form.
        for col in 0..4 {
            let pivot = (col..4)
                .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))
                .unwrap_or(col);
            if a[pivot][col].abs() < SINGULARITY_THRESHOLD {
                log::trace!(
                    "matrix is singular (best pivot for column {col} is {:e})",
                    a[pivot][col]
                );
                return None;
            }

            a.swap(col, pivot);
            inv.swap(col, pivot);

            for row in col + 1..4 {
                let factor = a[row][col] / a[col][col];
                for k in 0..4 {
                    a[row][k] -= factor * a[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        // Backward pass: eliminate everything above the diagonal.
        for col in (1..4).rev() {
            for row in 0..col {
                let factor = a[row][col] / a[col][col];
                for k in 0..4 {
                    a[row][k] -= factor * a[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        // Normalize each row by its pivot.
        for row in 0..4 {
            let pivot = a[row][row];
            for elem in &mut inv[row] {
                *elem /= pivot;
            }
        }

        *self = Matrix4::from_fn(|row, col| inv[row][col]);
        Some(self)
    }

    /// Inverts this matrix in place via Gauss-Jordan elimination.
    ///
    /// Returns `false` and leaves `self` untouched if it is singular. See
    /// [`Matrix4::set_inverse_gauss_jordan`].
    pub fn invert_gauss_jordan(&mut self) -> bool {
        let src = *self;
        self.set_inverse_gauss_jordan(&src).is_some()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{vec3, Vector3};

    use super::*;

    #[rustfmt::skip]
    fn general() -> Matrix4 {
        Matrix4::new([
            2.0, 0.5, -1.0, 0.25,
            1.0, 3.0, 0.0, -0.5,
            0.0, -2.0, 4.0, 1.0,
            5.0, 1.0, -3.0, 2.0,
        ])
    }

    fn affine() -> Matrix4 {
        let linear = Matrix3::from_axis_angle(vec3(0.3, 1.0, -0.2), 2.1)
            * Matrix3::from_scale(vec3(0.5, 4.0, 1.5));
        Matrix4::from_basis(
            linear.column(0),
            linear.column(1),
            Some(linear.column(2)),
            Some(vec3(-3.0, 0.5, 8.0)),
        )
    }

    fn singular() -> [Matrix4; 3] {
        let mut zero_row = general();
        for col in 0..4 {
            zero_row[(2, col)] = 0.0;
        }
        let mut zero_column = general();
        zero_column.0[8..12].fill(0.0);
        let mut dependent = general();
        for row in 0..4 {
            dependent[(row, 3)] = dependent[(row, 0)] * 2.0 - dependent[(row, 1)];
        }
        [zero_row, zero_column, dependent]
    }

    #[test]
    fn cofactor_signs() {
        let m = Matrix4::IDENTITY;
        for row in 0..4 {
            for col in 0..4 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_eq!(m.cofactor(row, col), expected);
            }
        }

        // Swapping two columns flips the determinant.
        let m = general();
        let mut swapped = m;
        for row in 0..4 {
            swapped[(row, 0)] = m[(row, 1)];
            swapped[(row, 1)] = m[(row, 0)];
        }
        assert_relative_eq!(swapped.determinant(), -m.determinant(), epsilon = 1e-12);
    }

    #[test]
    fn affine_inverse() {
        let m = affine();
        let inv = m.inverse_3x4().unwrap();
        assert!(inv.is_affine());
        assert_relative_eq!(m.multiply_3x4(&inv), Matrix4::IDENTITY, epsilon = 1e-12);
        assert_relative_eq!(inv.multiply_3x4(&m), Matrix4::IDENTITY, epsilon = 1e-12);
        assert_relative_eq!(inv, m.inverse_adjoint().unwrap(), epsilon = 1e-12);

        let p = vec3(1.0, -2.0, 3.0);
        assert_relative_eq!(inv.transform_point(m.transform_point(p)), p, epsilon = 1e-12);
    }

    #[test]
    fn affine_inverse_ignores_bottom_row() {
        let m = affine();
        let mut garbage = m;
        garbage[(3, 1)] = 5.0;
        garbage[(3, 3)] = 0.0;
        assert_eq!(garbage.inverse_3x4(), m.inverse_3x4());
    }

    #[test]
    fn general_inverses_agree() {
        let m = general();
        let adj = m.inverse_adjoint().unwrap();
        let gj = m.inverse_gauss_jordan().unwrap();
        assert_relative_eq!(m * adj, Matrix4::IDENTITY, epsilon = 1e-12);
        assert_relative_eq!(m * gj, Matrix4::IDENTITY, epsilon = 1e-12);
        assert_relative_eq!(adj * m, Matrix4::IDENTITY, epsilon = 1e-12);
        assert_relative_eq!(adj, gj, epsilon = 1e-12);
    }

    #[test]
    fn gauss_jordan_needs_pivoting() {
        // The leading element is zero, so elimination without row swaps would divide by zero.
        let m = Matrix4::from_columns([
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 0.0],
        ]);
        assert_eq!(m.inverse_gauss_jordan(), Some(m));
        assert_eq!(m.inverse_adjoint(), Some(m));
    }

    #[test]
    fn singular_matrices_are_rejected() {
        for m in singular() {
            assert_eq!(m.inverse_adjoint(), None, "{m:?}");
            assert_eq!(m.inverse_gauss_jordan(), None, "{m:?}");
        }
        assert_eq!(Matrix4::ZERO.inverse_3x4(), None);
        assert_eq!(singular()[1].inverse_3x4(), None);

        // A zero bottom row is singular as a 4x4 matrix, but irrelevant to the affine inverse.
        let mut m = affine();
        m[(3, 3)] = 0.0;
        assert_eq!(m.inverse_adjoint(), None);
        assert_eq!(m.inverse_gauss_jordan(), None);
        assert!(m.inverse_3x4().is_some());
    }

    #[test]
    fn failure_leaves_target_untouched() {
        let [zero_row, ..] = singular();
        let sentinel = Matrix4::new([7.0; 16]);

        let mut target = sentinel;
        assert!(target.set_inverse_3x4(&Matrix4::ZERO).is_none());
        assert_eq!(target, sentinel);
        assert!(target.set_inverse_adjoint(&zero_row).is_none());
        assert_eq!(target, sentinel);
        assert!(target.set_inverse_gauss_jordan(&zero_row).is_none());
        assert_eq!(target, sentinel);

        let mut m = zero_row;
        assert!(!m.invert_adjoint());
        assert!(!m.invert_gauss_jordan());
        assert_eq!(m, zero_row);
    }

    #[test]
    fn invert_in_place() {
        let m = general();
        let mut a = m;
        assert!(a.invert_adjoint());
        assert_eq!(Some(a), m.inverse_adjoint());

        let mut g = m;
        assert!(g.invert_gauss_jordan());
        assert_eq!(Some(g), m.inverse_gauss_jordan());

        let t = Matrix4::from_translation(vec3(4.0, 5.0, 6.0));
        let mut t_inv = t;
        assert!(t_inv.invert_3x4());
        assert_eq!(t_inv.translation(), vec3(-4.0, -5.0, -6.0));
        assert!(t_inv.invert_3x4());
        assert_eq!(t_inv, t);
    }

    #[test]
    fn near_singular_threshold() {
        let tiny = Matrix4::from_matrix3(&Matrix3::from_scale(vec3(1.0, 1.0, 1e-11)));
        assert_eq!(tiny.inverse_3x4(), None);
        assert_eq!(tiny.inverse_adjoint(), None);
        assert_eq!(tiny.inverse_gauss_jordan(), None);

        let small = Matrix4::from_matrix3(&Matrix3::from_scale(vec3(1.0, 1.0, 1e-9)));
        let inv = small.inverse_adjoint().unwrap();
        assert_relative_eq!(inv.transform_vector(Vector3::Z), vec3(0.0, 0.0, 1e9));
        assert!(small.inverse_3x4().is_some());
        assert!(small.inverse_gauss_jordan().is_some());
    }
}
