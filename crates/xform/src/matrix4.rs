use std::fmt::{self, Write as _};

use crate::{Matrix3, Vector3, DEFAULT_PRECISION};

mod invert;
mod ops;

/// A column-major 4x4 matrix of [`f64`]s.
///
/// The element at row `r` and column `c` is stored at index `c * 4 + r`. Columns 0 to 2 hold the
/// basis vectors of the linear part, column 3 holds the translation.
///
/// A [`Matrix4`] can be used as a general 4x4 matrix, or as an *affine* transform whose bottom row
/// is `(0, 0, 0, 1)`. Methods with a `3x4` suffix rely on the latter: they never read the bottom
/// row of their operands, and always write `(0, 0, 0, 1)` into the bottom row of their result.
/// Upholding the affine invariant for their operands is up to the caller.
///
/// # Construction
///
/// - [`Matrix4::from_translation`] creates a pure translation.
/// - [`Matrix4::from_basis`] creates an affine transform from basis vectors and a translation.
/// - [`Matrix4::from_matrix3`] promotes a linear [`Matrix3`] to an affine transform.
/// - [`Matrix4::new`] and [`Matrix4::from_slice`] take raw column-major elements.
///
/// Every constructor also has a `set_*` variant that overwrites an existing matrix and returns it,
/// allowing calls to be chained.
///
/// # Element Access
///
/// [`Matrix4`] implements [`Index`] and [`IndexMut`] for tuples of `(row, column)`:
///
/// ```
/// # use xform::*;
/// let mut mat = Matrix4::from_translation(vec3(1.0, 2.0, 3.0));
/// assert_eq!(mat[(1, 3)], 2.0);
/// mat[(1, 3)] = 5.0;
/// assert_eq!(mat.translation(), vec3(1.0, 5.0, 3.0));
/// ```
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Matrix4([f64; 16]);

unsafe impl bytemuck::Zeroable for Matrix4 {}
unsafe impl bytemuck::Pod for Matrix4 {}

impl Matrix4 {
    /// A matrix with every element set to 0.
    pub const ZERO: Self = Self([0.0; 16]);

    /// The identity matrix.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Creates a matrix from its 16 elements, in column-major order.
    #[inline]
    pub const fn new(elems: [f64; 16]) -> Self {
        Self(elems)
    }

    /// Creates a matrix from a column-major slice of exactly 16 elements.
    ///
    /// If `elems` has any other length, [`Matrix4::IDENTITY`] is returned instead.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let elems = (0..16).map(f64::from).collect::<Vec<_>>();
    /// assert_eq!(Matrix4::from_slice(&elems).as_array()[5], 5.0);
    /// assert_eq!(Matrix4::from_slice(&elems[1..]), Matrix4::IDENTITY);
    /// ```
    pub fn from_slice(elems: &[f64]) -> Self {
        match <[f64; 16]>::try_from(elems) {
            Ok(array) => Self(array),
            Err(_) => {
                log::trace!("expected 16 matrix elements, got {}", elems.len());
                Self::IDENTITY
            }
        }
    }

    /// Creates a matrix from an array of column vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let mat = Matrix4::from_columns([
    ///     [1.0, 0.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0, 0.0],
    ///     [0.0, 0.0, 1.0, 0.0],
    ///     [4.0, 5.0, 6.0, 1.0],
    /// ]);
    /// assert_eq!(mat, Matrix4::from_translation(vec3(4.0, 5.0, 6.0)));
    /// ```
    pub fn from_columns<U: Into<[f64; 4]>>(columns: [U; 4]) -> Self {
        let mut elems = [0.0; 16];
        for (col, column) in columns.into_iter().enumerate() {
            elems[col * 4..col * 4 + 4].copy_from_slice(&column.into());
        }
        Self(elems)
    }

    /// Creates a matrix by invoking a closure with the position (row and column) of each element.
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self(std::array::from_fn(|i| cb(i % 4, i / 4)))
    }

    /// Creates an affine transform that translates by `v`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let m = Matrix4::from_translation(vec3(1.0, 2.0, 3.0));
    /// assert_eq!(m.transform_point(Vector3::ZERO), vec3(1.0, 2.0, 3.0));
    /// assert_eq!(m.determinant(), 1.0);
    /// ```
    pub fn from_translation(v: Vector3) -> Self {
        let mut out = Self::IDENTITY;
        out.set_from_translation(v);
        out
    }

    /// Overwrites `self` with a translation by `v`.
    pub fn set_from_translation(&mut self, v: Vector3) -> &mut Self {
        *self = Self::IDENTITY;
        self.set_translation(v);
        self
    }

    /// Creates an affine transform from basis vectors and a translation.
    ///
    /// The three basis vectors become columns 0 to 2, `t` becomes the translation column. If `z` is
    /// [`None`], `x.cross(y)` is used instead. If `t` is [`None`], the translation is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let m = Matrix4::from_basis(Vector3::X, Vector3::Y, None, None);
    /// assert_eq!(m, Matrix4::IDENTITY);
    /// ```
    pub fn from_basis(x: Vector3, y: Vector3, z: Option<Vector3>, t: Option<Vector3>) -> Self {
        let mut out = Self::IDENTITY;
        out.set_from_basis(x, y, z, t);
        out
    }

    /// Overwrites `self` with the affine transform described by basis vectors and a translation.
    ///
    /// See [`Matrix4::from_basis`].
    pub fn set_from_basis(
        &mut self,
        x: Vector3,
        y: Vector3,
        z: Option<Vector3>,
        t: Option<Vector3>,
    ) -> &mut Self {
        let z = z.unwrap_or_else(|| x.cross(y));
        let t = t.unwrap_or(Vector3::ZERO);
        for (col, v) in [x, y, z, t].into_iter().enumerate() {
            self.0[col * 4..col * 4 + 3].copy_from_slice(v.as_array());
            self.0[col * 4 + 3] = 0.0;
        }
        self.0[15] = 1.0;
        self
    }

    /// Promotes a linear [`Matrix3`] to an affine transform with zero translation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let m = Matrix4::from_matrix3(&Matrix3::from_scale(vec3(2.0, 2.0, 2.0)));
    /// assert_eq!(m.transform_point(vec3(1.0, 2.0, 3.0)), vec3(2.0, 4.0, 6.0));
    /// assert_eq!(m.translation(), Vector3::ZERO);
    /// ```
    pub fn from_matrix3(m: &Matrix3) -> Self {
        let mut out = Self::IDENTITY;
        out.set_from_matrix3(m);
        out
    }

    /// Overwrites `self` with the promotion of `m` to an affine transform.
    pub fn set_from_matrix3(&mut self, m: &Matrix3) -> &mut Self {
        let m = m.as_array();
        *self = Self::IDENTITY;
        for col in 0..3 {
            self.0[col * 4..col * 4 + 3].copy_from_slice(&m[col * 3..col * 3 + 3]);
        }
        self
    }

    /// Overwrites `self` with a copy of `src`.
    #[inline]
    pub fn set_from(&mut self, src: &Matrix4) -> &mut Self {
        self.0 = src.0;
        self
    }

    /// Returns a reference to the column-major elements of this matrix.
    #[inline]
    pub const fn as_array(&self) -> &[f64; 16] {
        &self.0
    }

    /// Converts this matrix into its column-major elements.
    #[inline]
    pub const fn into_array(self) -> [f64; 16] {
        self.0
    }

    /// Returns the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < 4 && col < 4 {
            Some(self.0[col * 4 + row])
        } else {
            None
        }
    }

    /// Returns column `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col` is not in range `0..4`.
    pub fn column(&self, col: usize) -> [f64; 4] {
        assert!(col < 4, "column {col} out of bounds for 4x4 matrix");
        [
            self.0[col * 4],
            self.0[col * 4 + 1],
            self.0[col * 4 + 2],
            self.0[col * 4 + 3],
        ]
    }

    /// Returns row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not in range `0..4`.
    pub fn row(&self, row: usize) -> [f64; 4] {
        assert!(row < 4, "row {row} out of bounds for 4x4 matrix");
        [
            self.0[row],
            self.0[4 + row],
            self.0[8 + row],
            self.0[12 + row],
        ]
    }

    /// Returns the translation column (the first three elements of column 3).
    #[inline]
    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.0[12], self.0[13], self.0[14])
    }

    /// Replaces the translation column, leaving everything else untouched.
    #[inline]
    pub fn set_translation(&mut self, v: Vector3) -> &mut Self {
        self.0[12..15].copy_from_slice(v.as_array());
        self
    }

    /// Returns whether the bottom row of this matrix is exactly `(0, 0, 0, 1)`.
    pub fn is_affine(&self) -> bool {
        self.row(3) == [0.0, 0.0, 0.0, 1.0]
    }

    /// Transforms `p` as a point (with an implicit `w` of 1), applying the translation.
    ///
    /// The bottom row is ignored, so this is only meaningful for affine transforms.
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        self.transform_vector(p) + self.translation()
    }

    /// Transforms `v` as a direction (with an implicit `w` of 0), ignoring the translation.
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        let m = &self.0;
        let [x, y, z] = v.into_array();
        Vector3::new(
            m[0] * x + m[4] * y + m[8] * z,
            m[1] * x + m[5] * y + m[9] * z,
            m[2] * x + m[6] * y + m[10] * z,
        )
    }

    /// Overwrites `self` with the element-wise sum `a + b`.
    pub fn set_add(&mut self, a: &Matrix4, b: &Matrix4) -> &mut Self {
        for (out, (a, b)) in self.0.iter_mut().zip(a.0.iter().zip(&b.0)) {
            *out = a + b;
        }
        self
    }

    /// Overwrites `self` with the element-wise difference `a - b`.
    pub fn set_sub(&mut self, a: &Matrix4, b: &Matrix4) -> &mut Self {
        for (out, (a, b)) in self.0.iter_mut().zip(a.0.iter().zip(&b.0)) {
            *out = a - b;
        }
        self
    }

    /// Overwrites `self` with the full 4x4 matrix product `a * b`.
    ///
    /// This is the in-place form of the `*` operator.
    pub fn set_multiply(&mut self, a: &Matrix4, b: &Matrix4) -> &mut Self {
        let (a, b) = (&a.0, &b.0);
        for col in 0..4 {
            for row in 0..4 {
                self.0[col * 4 + row] =
                    (0..4).fold(0.0, |acc, k| acc + a[k * 4 + row] * b[col * 4 + k]);
            }
        }
        self
    }

    /// Computes the affine product `self * rhs`.
    ///
    /// See [`Matrix4::set_multiply_3x4`].
    pub fn multiply_3x4(&self, rhs: &Matrix4) -> Matrix4 {
        let mut out = Self::IDENTITY;
        out.set_multiply_3x4(self, rhs);
        out
    }

    /// Overwrites `self` with the affine product `a * b`.
    ///
    /// Both operands are treated as affine transforms: their bottom row is assumed to be
    /// `(0, 0, 0, 1)` and is never read. Only the top 12 elements are computed, the bottom row of
    /// the result is set to `(0, 0, 0, 1)`.
    ///
    /// For affine operands, the result is identical to [`Matrix4::set_multiply`].
    pub fn set_multiply_3x4(&mut self, a: &Matrix4, b: &Matrix4) -> &mut Self {
        let (a, b) = (&a.0, &b.0);
        for col in 0..4 {
            for row in 0..3 {
                let dot = (0..3).fold(0.0, |acc, k| acc + a[k * 4 + row] * b[col * 4 + k]);
                // Only the translation column picks up `a`'s translation (`b`'s row 3 is `0 0 0 1`).
                self.0[col * 4 + row] = if col == 3 { dot + a[12 + row] } else { dot };
            }
        }
        self.set_affine_row()
    }

    /// Computes the affine product `self * Matrix4::from_matrix3(rhs)`.
    ///
    /// See [`Matrix4::set_multiply_3x4_matrix3`].
    pub fn multiply_3x4_matrix3(&self, rhs: &Matrix3) -> Matrix4 {
        let mut out = Self::IDENTITY;
        out.set_multiply_3x4_matrix3(self, rhs);
        out
    }

    /// Overwrites `self` with `a * Matrix4::from_matrix3(b)`, without materializing the promoted
    /// matrix.
    ///
    /// The translation of `a` is carried over unchanged, since `b` has none.
    pub fn set_multiply_3x4_matrix3(&mut self, a: &Matrix4, b: &Matrix3) -> &mut Self {
        let (a, b) = (&a.0, b.as_array());
        for col in 0..3 {
            for row in 0..3 {
                self.0[col * 4 + row] =
                    (0..3).fold(0.0, |acc, k| acc + a[k * 4 + row] * b[col * 3 + k]);
            }
        }
        self.0[12..15].copy_from_slice(&a[12..15]);
        self.set_affine_row()
    }

    /// Computes `self * Matrix4::from_translation(v)`.
    ///
    /// See [`Matrix4::set_multiply_3x4_translation`].
    pub fn multiply_3x4_translation(&self, v: Vector3) -> Matrix4 {
        let mut out = Self::IDENTITY;
        out.set_multiply_3x4_translation(self, v);
        out
    }

    /// Overwrites `self` with `m * Matrix4::from_translation(v)`, without materializing the
    /// translation matrix.
    ///
    /// The linear part of `m` is copied as-is, the new translation is the linear part of `m`
    /// applied to `v`, plus the translation of `m`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let v = vec3(1.0, 2.0, 3.0);
    /// assert_eq!(
    ///     Matrix4::IDENTITY.multiply_3x4_translation(v),
    ///     Matrix4::from_translation(v),
    /// );
    /// ```
    pub fn set_multiply_3x4_translation(&mut self, m: &Matrix4, v: Vector3) -> &mut Self {
        let m = &m.0;
        let v = v.as_array();
        self.0[..12].copy_from_slice(&m[..12]);
        for row in 0..3 {
            self.0[12 + row] =
                (0..3).fold(0.0, |acc, k| acc + m[k * 4 + row] * v[k]) + m[12 + row];
        }
        self.set_affine_row()
    }

    /// Computes `self * Matrix4::from_matrix3(&Matrix3::from_scale(v))`.
    ///
    /// See [`Matrix4::set_multiply_3x4_scale`].
    pub fn multiply_3x4_scale(&self, v: Vector3) -> Matrix4 {
        let mut out = Self::IDENTITY;
        out.set_multiply_3x4_scale(self, v);
        out
    }

    /// Overwrites `self` with `m * Matrix4::from_matrix3(&Matrix3::from_scale(v))`, without
    /// materializing the scale matrix.
    ///
    /// Column `c` of the linear part of `m` is scaled by `v[c]`; the translation of `m` is kept.
    pub fn set_multiply_3x4_scale(&mut self, m: &Matrix4, v: Vector3) -> &mut Self {
        let m = &m.0;
        for col in 0..3 {
            for row in 0..3 {
                self.0[col * 4 + row] = m[col * 4 + row] * v[col];
            }
        }
        self.0[12..15].copy_from_slice(&m[12..15]);
        self.set_affine_row()
    }

    /// Sets the bottom row to `(0, 0, 0, 1)`.
    fn set_affine_row(&mut self) -> &mut Self {
        self.0[3] = 0.0;
        self.0[7] = 0.0;
        self.0[11] = 0.0;
        self.0[15] = 1.0;
        self
    }

    /// Swaps the rows and columns of this matrix.
    pub fn transpose(&self) -> Matrix4 {
        let mut out = *self;
        out.transpose_in_place();
        out
    }

    /// Transposes this matrix in place by swapping each pair of off-diagonal elements.
    pub fn transpose_in_place(&mut self) -> &mut Self {
        for col in 1..4 {
            for row in 0..col {
                self.0.swap(col * 4 + row, row * 4 + col);
            }
        }
        self
    }

    /// Returns the [determinant] of the matrix.
    ///
    /// Computed by cofactor expansion along the first row.
    ///
    /// A [`Matrix4`] can also be converted to its determinant via [`From`]:
    ///
    /// ```
    /// # use xform::*;
    /// let m = Matrix4::from_matrix3(&Matrix3::from_scale(vec3(2.0, 3.0, 4.0)));
    /// assert_eq!(m.determinant(), 24.0);
    /// assert_eq!(f64::from(m), 24.0);
    /// ```
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant(&self) -> f64 {
        (0..4).fold(0.0, |acc, col| acc + self.0[col * 4] * self.cofactor(0, col))
    }

    /// Formats the matrix row by row, with `digits` decimal places per element.
    ///
    /// Elements are separated by tabs, rows by newlines. The output is meant for diagnostics and
    /// is not intended to be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let m = Matrix4::from_translation(vec3(1.0, 2.0, 3.0));
    /// assert_eq!(
    ///     m.to_string_fixed(1),
    ///     "1.0\t0.0\t0.0\t1.0\n\
    ///      0.0\t1.0\t0.0\t2.0\n\
    ///      0.0\t0.0\t1.0\t3.0\n\
    ///      0.0\t0.0\t0.0\t1.0",
    /// );
    /// ```
    pub fn to_string_fixed(&self, digits: usize) -> String {
        let mut out = String::new();
        // Writing to a `String` cannot fail.
        let _ = self.write_fixed(&mut out, digits);
        out
    }

    fn write_fixed(&self, w: &mut impl fmt::Write, digits: usize) -> fmt::Result {
        for row in 0..4 {
            if row != 0 {
                w.write_char('\n')?;
            }
            for col in 0..4 {
                if col != 0 {
                    w.write_char('\t')?;
                }
                write!(w, "{:.*}", digits, self.0[col * 4 + row])?;
            }
        }
        Ok(())
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Row-major, tab-separated output.
///
/// Uses the formatter's precision if one is given (`{:.2}`), [`DEFAULT_PRECISION`] otherwise.
impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(DEFAULT_PRECISION);
        self.write_fixed(f, digits)
    }
}

impl fmt::Debug for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for row in 0..4 {
            list.entry(&self.row(row));
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::vec3;

    use super::*;

    #[rustfmt::skip]
    fn sample() -> Matrix4 {
        Matrix4::new([
            2.0, 0.5, -1.0, 0.25,
            1.0, 3.0, 0.0, -0.5,
            0.0, -2.0, 4.0, 1.0,
            5.0, 1.0, -3.0, 2.0,
        ])
    }

    fn affine_sample() -> Matrix4 {
        let linear = Matrix3::from_axis_angle(vec3(1.0, -2.0, 0.5), 0.8)
            * Matrix3::from_scale(vec3(2.0, 0.5, 3.0));
        let mut m = Matrix4::from_matrix3(&linear);
        m.set_translation(vec3(4.0, -1.0, 2.5));
        m
    }

    #[test]
    fn translation() {
        let m = Matrix4::from_translation(vec3(1.0, 2.0, 3.0));
        let mut expected = Matrix4::IDENTITY.into_array();
        expected[12..15].copy_from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(m.into_array(), expected);
        assert_eq!(m.determinant(), 1.0);
        assert!(m.is_affine());
    }

    #[test]
    fn basis_defaults() {
        let m = Matrix4::from_basis(vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0), None, None);
        assert_eq!(m.column(2), [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(m.translation(), Vector3::ZERO);
        assert_eq!(m.row(3), [0.0, 0.0, 0.0, 1.0]);

        let m = Matrix4::from_basis(
            vec3(0.0, 1.0, 0.0),
            vec3(1.0, 0.0, 0.0),
            None,
            Some(vec3(7.0, 8.0, 9.0)),
        );
        assert_eq!(m.column(2), [0.0, 0.0, -1.0, 0.0]);
        assert_eq!(m.column(3), [7.0, 8.0, 9.0, 1.0]);

        let m = Matrix4::from_basis(Vector3::X, Vector3::Y, Some(vec3(0.0, 0.0, 2.0)), None);
        assert_eq!(m.determinant(), 2.0);
    }

    #[test]
    fn set_from_basis_overwrites_bottom_row() {
        let mut m = Matrix4::new([9.0; 16]);
        m.set_from_basis(Vector3::X, Vector3::Y, None, None);
        assert_eq!(m, Matrix4::IDENTITY);
    }

    #[test]
    fn row_column_access() {
        let m = Matrix4::from_fn(|row, col| (row * 10 + col) as f64);
        assert_eq!(m.row(2), [20.0, 21.0, 22.0, 23.0]);
        assert_eq!(m.column(2), [2.0, 12.0, 22.0, 32.0]);
        assert_eq!(Matrix4::from_columns([m.column(0), m.column(1), m.column(2), m.column(3)]), m);
    }

    #[test]
    #[should_panic(expected = "column 4 out of bounds")]
    fn column_out_of_bounds() {
        Matrix4::IDENTITY.column(4);
    }

    #[test]
    fn from_slice_fallback() {
        assert_eq!(Matrix4::from_slice(&[]), Matrix4::IDENTITY);
        assert_eq!(Matrix4::from_slice(&[3.0; 17]), Matrix4::IDENTITY);
        assert_eq!(Matrix4::from_slice(&[3.0; 16]), Matrix4::new([3.0; 16]));
    }

    #[test]
    fn add_sub() {
        let a = sample();
        let b = affine_sample();
        let mut sum = Matrix4::ZERO;
        sum.set_add(&a, &b);
        assert_eq!(sum, a + b);
        let mut diff = Matrix4::ZERO;
        diff.set_sub(&sum, &b);
        assert_relative_eq!(diff, a, epsilon = 1e-12);
        assert_eq!(a - a, Matrix4::ZERO);
    }

    #[test]
    fn multiply_matches_definition() {
        let a = sample();
        let b = affine_sample();
        let c = a * b;
        for row in 0..4 {
            for col in 0..4 {
                let expected = (0..4).map(|k| a[(row, k)] * b[(k, col)]).sum::<f64>();
                assert_relative_eq!(c[(row, col)], expected, epsilon = 1e-12);
            }
        }
        assert_eq!(a * Matrix4::IDENTITY, a);
        assert_eq!(Matrix4::IDENTITY * a, a);
    }

    #[test]
    fn multiply_3x4_forces_affine_row() {
        let mut a = affine_sample();
        let b = Matrix4::from_translation(vec3(1.0, 2.0, 3.0));
        let expected = a * b;

        // Garbage in the bottom row of the operand must not leak into the result.
        a[(3, 0)] = 42.0;
        a[(3, 3)] = -7.0;
        let c = a.multiply_3x4(&b);
        assert!(c.is_affine());
        assert_relative_eq!(c, expected, epsilon = 1e-12);
    }

    #[test]
    fn fused_kernels_match_unfused() {
        let m = affine_sample();
        let v = vec3(0.5, -2.0, 3.0);
        let r = Matrix3::from_rotation_y(1.3);

        assert_eq!(m.multiply_3x4_translation(v), m * Matrix4::from_translation(v));
        assert_eq!(
            m.multiply_3x4_scale(v),
            m * Matrix4::from_matrix3(&Matrix3::from_scale(v))
        );
        assert_relative_eq!(
            m.multiply_3x4_matrix3(&r),
            m * Matrix4::from_matrix3(&r),
            epsilon = 1e-12
        );
        assert_eq!(m.multiply_3x4_matrix3(&r).translation(), m.translation());
    }

    #[test]
    fn in_place_targets_chain() {
        let m = affine_sample();
        let mut out = Matrix4::ZERO;
        let chained = *out
            .set_multiply_3x4_translation(&m, vec3(1.0, 0.0, 0.0))
            .transpose_in_place();
        assert_eq!(chained, out);
        assert_eq!(out.transpose(), m.multiply_3x4_translation(Vector3::X));

        let mut copy = Matrix4::ZERO;
        assert_eq!(*copy.set_from(&m), m);
    }

    #[test]
    fn transpose() {
        let m = sample();
        let t = m.transpose();
        for row in 0..4 {
            assert_eq!(t.column(row), m.row(row));
        }
        assert_eq!(t.transpose(), m);
        assert_relative_eq!(t.determinant(), m.determinant(), epsilon = 1e-9);
    }

    #[test]
    fn determinant() {
        assert_eq!(Matrix4::ZERO.determinant(), 0.0);
        assert_eq!(Matrix4::IDENTITY.determinant(), 1.0);

        let mut zero_column = sample();
        zero_column.0[4..8].fill(0.0);
        assert_eq!(zero_column.determinant(), 0.0);

        // det(AB) = det(A) det(B)
        let a = sample();
        let b = affine_sample();
        assert_relative_eq!(
            (a * b).determinant(),
            a.determinant() * b.determinant(),
            epsilon = 1e-9,
            max_relative = 1e-12
        );
    }

    #[test]
    fn transform() {
        let m = Matrix4::from_basis(
            Vector3::Y,
            -Vector3::X,
            Some(Vector3::Z),
            Some(vec3(10.0, 0.0, 0.0)),
        );
        assert_eq!(m.transform_point(vec3(1.0, 0.0, 0.0)), vec3(10.0, 1.0, 0.0));
        assert_eq!(m.transform_vector(vec3(1.0, 0.0, 0.0)), vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn fmt() {
        let m = Matrix4::from_translation(vec3(1.0, -2.0, 0.5));
        assert_eq!(
            format!("{:.2}", m),
            "1.00\t0.00\t0.00\t1.00\n\
             0.00\t1.00\t0.00\t-2.00\n\
             0.00\t0.00\t1.00\t0.50\n\
             0.00\t0.00\t0.00\t1.00"
        );
        assert_eq!(m.to_string(), m.to_string_fixed(DEFAULT_PRECISION));
        assert_eq!(
            format!("{:?}", Matrix4::IDENTITY),
            "[[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 1.0]]"
        );
    }
}
