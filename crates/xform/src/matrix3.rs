use std::fmt;

use crate::{Matrix4, Vector3, DEFAULT_PRECISION, SINGULARITY_THRESHOLD};

mod ops;

/// A column-major 3x3 matrix of [`f64`]s, representing a linear map.
///
/// A [`Matrix3`] describes rotation, scale and shear, but no translation. It can be promoted to an
/// affine [`Matrix4`] via [`Matrix3::to_matrix4`] (or [`Matrix4::from_matrix3`]), and the linear
/// part of a [`Matrix4`] can be extracted via [`Matrix3::from_matrix4`].
///
/// # Element Access
///
/// [`Matrix3`] implements [`Index`] and [`IndexMut`] for tuples of `(row, column)`:
///
/// ```
/// # use xform::*;
/// let mut mat = Matrix3::IDENTITY;
/// mat[(0, 2)] = 4.0;
/// assert_eq!(mat.as_array()[6], 4.0);
/// ```
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Matrix3([f64; 9]);

unsafe impl bytemuck::Zeroable for Matrix3 {}
unsafe impl bytemuck::Pod for Matrix3 {}

impl Matrix3 {
    /// A matrix with every element set to 0.
    pub const ZERO: Self = Self([0.0; 9]);

    /// The identity matrix.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0,
    ]);

    /// Creates a matrix from its 9 elements, in column-major order.
    #[inline]
    pub const fn new(elems: [f64; 9]) -> Self {
        Self(elems)
    }

    /// Creates a matrix from a column-major slice of exactly 9 elements.
    ///
    /// If `elems` has any other length, [`Matrix3::IDENTITY`] is returned instead.
    pub fn from_slice(elems: &[f64]) -> Self {
        match <[f64; 9]>::try_from(elems) {
            Ok(array) => Self(array),
            Err(_) => {
                log::trace!("expected 9 matrix elements, got {}", elems.len());
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
    /// let mat = Matrix3::from_columns([Vector3::X, Vector3::Y, Vector3::Z]);
    /// assert_eq!(mat, Matrix3::IDENTITY);
    /// ```
    pub fn from_columns<U: Into<[f64; 3]>>(columns: [U; 3]) -> Self {
        let mut elems = [0.0; 9];
        for (col, column) in columns.into_iter().enumerate() {
            elems[col * 3..col * 3 + 3].copy_from_slice(&column.into());
        }
        Self(elems)
    }

    /// Creates a diagonal matrix that scales each axis by the matching component of `scale`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let mat = Matrix3::from_scale(vec3(2.0, 3.0, 4.0));
    /// assert_eq!(mat * vec3(1.0, 1.0, 1.0), vec3(2.0, 3.0, 4.0));
    /// ```
    pub fn from_scale(scale: Vector3) -> Self {
        let [x, y, z] = scale.into_array();
        #[rustfmt::skip]
        let elems = [
              x, 0.0, 0.0,
            0.0,   y, 0.0,
            0.0, 0.0,   z,
        ];
        Self(elems)
    }

    /// Creates a counterclockwise rotation of `radians` around the X axis.
    pub fn from_rotation_x(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        #[rustfmt::skip]
        let elems = [
            1.0,  0.0, 0.0,
            0.0,  cos, sin,
            0.0, -sin, cos,
        ];
        Self(elems)
    }

    /// Creates a counterclockwise rotation of `radians` around the Y axis.
    pub fn from_rotation_y(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        #[rustfmt::skip]
        let elems = [
            cos, 0.0, -sin,
            0.0, 1.0,  0.0,
            sin, 0.0,  cos,
        ];
        Self(elems)
    }

    /// Creates a counterclockwise rotation of `radians` around the Z axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// use approx::assert_abs_diff_eq;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let rot = Matrix3::from_rotation_z(FRAC_PI_2);
    /// assert_abs_diff_eq!(rot * Vector3::X, Vector3::Y, epsilon = 1e-12);
    /// ```
    pub fn from_rotation_z(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        #[rustfmt::skip]
        let elems = [
             cos, sin, 0.0,
            -sin, cos, 0.0,
             0.0, 0.0, 1.0,
        ];
        Self(elems)
    }

    /// Creates a counterclockwise rotation of `radians` around `axis`.
    ///
    /// `axis` is normalized before use and must not be the zero vector.
    pub fn from_axis_angle(axis: Vector3, radians: f64) -> Self {
        let [x, y, z] = axis.normalize().into_array();
        let (sin, cos) = radians.sin_cos();
        let t = 1.0 - cos;
        #[rustfmt::skip]
        let elems = [
            t * x * x + cos,     t * x * y + sin * z, t * x * z - sin * y,
            t * x * y - sin * z, t * y * y + cos,     t * y * z + sin * x,
            t * x * z + sin * y, t * y * z - sin * x, t * z * z + cos,
        ];
        Self(elems)
    }

    /// Extracts the top-left 3x3 block (the linear part) of a [`Matrix4`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let m = Matrix4::from_translation(vec3(1.0, 2.0, 3.0));
    /// assert_eq!(Matrix3::from_matrix4(&m), Matrix3::IDENTITY);
    /// ```
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let mut out = Self::ZERO;
        out.set_from_matrix4(m);
        out
    }

    /// Overwrites `self` with the top-left 3x3 block of `m`.
    pub fn set_from_matrix4(&mut self, m: &Matrix4) -> &mut Self {
        let m = m.as_array();
        for col in 0..3 {
            self.0[col * 3..col * 3 + 3].copy_from_slice(&m[col * 4..col * 4 + 3]);
        }
        self
    }

    /// Promotes this linear map to an affine [`Matrix4`] with zero translation.
    ///
    /// This is equivalent to [`Matrix4::from_matrix3`].
    #[inline]
    pub fn to_matrix4(&self) -> Matrix4 {
        Matrix4::from_matrix3(self)
    }

    /// Returns a reference to the column-major elements of this matrix.
    #[inline]
    pub const fn as_array(&self) -> &[f64; 9] {
        &self.0
    }

    /// Converts this matrix into its column-major elements.
    #[inline]
    pub const fn into_array(self) -> [f64; 9] {
        self.0
    }

    /// Returns the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < 3 && col < 3 {
            Some(self.0[col * 3 + row])
        } else {
            None
        }
    }

    /// Returns column `col` as a [`Vector3`].
    ///
    /// # Panics
    ///
    /// Panics if `col` is not in range `0..3`.
    pub fn column(&self, col: usize) -> Vector3 {
        Vector3::from_slice(&self.0[col * 3..col * 3 + 3])
    }

    /// Swaps the rows and columns of this matrix.
    pub fn transpose(&self) -> Self {
        let [a, b, c, d, e, f, g, h, i] = self.0;
        Self([a, d, g, b, e, h, c, f, i])
    }

    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant(&self) -> f64 {
        let [a, d, g, b, e, h, c, f, i] = self.0;
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    /// Returns the adjugate of this matrix (the transpose of its cofactor matrix).
    ///
    /// Multiplying a matrix with its adjugate yields the identity scaled by the determinant.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let m = Matrix3::from_scale(vec3(2.0, 4.0, 8.0));
    /// assert_eq!(m * m.adjugate(), Matrix3::from_scale(vec3(64.0, 64.0, 64.0)));
    /// ```
    pub fn adjugate(&self) -> Self {
        // `aRC` is the element at row R, column C.
        let [a00, a10, a20, a01, a11, a21, a02, a12, a22] = self.0;

        // Element (R, C) of the adjugate is cofactor (C, R).
        #[rustfmt::skip]
        let elems = [
            a11 * a22 - a12 * a21, a12 * a20 - a10 * a22, a10 * a21 - a11 * a20,
            a02 * a21 - a01 * a22, a00 * a22 - a02 * a20, a01 * a20 - a00 * a21,
            a01 * a12 - a02 * a11, a02 * a10 - a00 * a12, a00 * a11 - a01 * a10,
        ];
        Self(elems)
    }

    /// Computes the inverse of this matrix, or [`None`] if it is singular.
    ///
    /// The matrix is considered singular when the magnitude of its determinant is less than
    /// [`SINGULARITY_THRESHOLD`].
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < SINGULARITY_THRESHOLD {
            log::trace!("3x3 matrix is singular (det={det:e})");
            return None;
        }

        Some(self.adjugate() * (1.0 / det))
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Row-major, tab-separated output, in the same format as [`Matrix4`].
impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(DEFAULT_PRECISION);
        for row in 0..3 {
            if row != 0 {
                f.write_str("\n")?;
            }
            write!(
                f,
                "{:.*}\t{:.*}\t{:.*}",
                digits,
                self.0[row],
                digits,
                self.0[3 + row],
                digits,
                self.0[6 + row]
            )?;
        }
        Ok(())
    }
}

impl fmt::Debug for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for row in 0..3 {
            list.entry(&[self.0[row], self.0[3 + row], self.0[6 + row]]);
        }
        list.finish()
    }
}
