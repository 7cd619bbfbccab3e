use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use super::Matrix4;

impl Index<(usize, usize)> for Matrix4 {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < 4 && col < 4, "index ({row}, {col}) out of bounds for 4x4 matrix");
        &self.0[col * 4 + row]
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(row < 4 && col < 4, "index ({row}, {col}) out of bounds for 4x4 matrix");
        &mut self.0[col * 4 + row]
    }
}

impl From<[f64; 16]> for Matrix4 {
    #[inline]
    fn from(value: [f64; 16]) -> Self {
        Self(value)
    }
}

impl From<Matrix4> for [f64; 16] {
    #[inline]
    fn from(value: Matrix4) -> Self {
        value.0
    }
}

/// Converts a matrix to its determinant.
impl From<Matrix4> for f64 {
    #[inline]
    fn from(value: Matrix4) -> Self {
        value.determinant()
    }
}

/// Converts a matrix to its determinant.
impl From<&Matrix4> for f64 {
    #[inline]
    fn from(value: &Matrix4) -> Self {
        value.determinant()
    }
}

/// Exact, element-wise comparison.
impl PartialEq for Matrix4 {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.0 == other.0
    }
}

impl AbsDiffEq for Matrix4 {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.0
            .iter()
            .zip(&other.0)
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix4 {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.0
            .iter()
            .zip(&other.0)
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl UlpsEq for Matrix4 {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.0
            .iter()
            .zip(&other.0)
            .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

/// Element-wise addition.
impl Add for Matrix4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut out = Self::ZERO;
        out.set_add(&self, &rhs);
        out
    }
}

/// Element-wise subtraction.
impl Sub for Matrix4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut out = Self::ZERO;
        out.set_sub(&self, &rhs);
        out
    }
}

/// Matrix * Matrix (full 4x4 product).
impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut out = Self::ZERO;
        out.set_multiply(&self, &rhs);
        out
    }
}

/// Matrix * Scalar.
impl Mul<f64> for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0.map(|e| e * rhs))
    }
}

impl AddAssign for Matrix4 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Matrix4 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Matrix4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
