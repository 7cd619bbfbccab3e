use std::fmt;

mod ops;

/// A 3-component column vector of [`f64`]s.
///
/// # Construction
///
/// - [`Vector3::new`] and the freestanding [`vec3`] function create a vector from its components.
/// - [`Vector3::ZERO`], [`Vector3::X`], [`Vector3::Y`] and [`Vector3::Z`] are commonly used
///   constants.
/// - Vectors can be created from arrays using their [`From`] implementation, or from slices via
///   [`Vector3::from_slice`].
///
/// # Element Access
///
/// Components can be read via [`Vector3::x`], [`Vector3::y`] and [`Vector3::z`], or by index.
///
/// ```
/// # use xform::*;
/// let mut v = vec3(1.0, 2.0, 3.0);
/// v[1] = 5.0;
/// assert_eq!(v.y(), 5.0);
/// assert_eq!(v, [1.0, 5.0, 3.0]);
/// ```
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct Vector3([f64; 3]);

unsafe impl bytemuck::Zeroable for Vector3 {}
unsafe impl bytemuck::Pod for Vector3 {}

/// Creates a [`Vector3`] from its components.
#[inline]
pub const fn vec3(x: f64, y: f64, z: f64) -> Vector3 {
    Vector3::new(x, y, z)
}

impl Vector3 {
    /// A vector with each component set to 0.
    pub const ZERO: Self = Self([0.0; 3]);
    /// A unit vector pointing in the X direction.
    pub const X: Self = Self([1.0, 0.0, 0.0]);
    /// A unit vector pointing in the Y direction.
    pub const Y: Self = Self([0.0, 1.0, 0.0]);
    /// A unit vector pointing in the Z direction.
    pub const Z: Self = Self([0.0, 0.0, 1.0]);

    /// Creates a vector from its components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    /// Creates a vector from a slice of exactly 3 elements.
    ///
    /// If `elems` has any other length, [`Vector3::ZERO`] is returned instead.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// assert_eq!(Vector3::from_slice(&[1.0, 2.0, 3.0]), vec3(1.0, 2.0, 3.0));
    /// assert_eq!(Vector3::from_slice(&[1.0, 2.0]), Vector3::ZERO);
    /// ```
    pub fn from_slice(elems: &[f64]) -> Self {
        match <[f64; 3]>::try_from(elems) {
            Ok(array) => Self(array),
            Err(_) => {
                log::trace!("expected 3 vector elements, got {}", elems.len());
                Self::ZERO
            }
        }
    }

    /// Returns the X component.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.0[0]
    }

    /// Returns the Y component.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.0[1]
    }

    /// Returns the Z component.
    #[inline]
    pub const fn z(&self) -> f64 {
        self.0[2]
    }

    /// Returns a reference to the underlying components.
    #[inline]
    pub const fn as_array(&self) -> &[f64; 3] {
        &self.0
    }

    /// Converts this [`Vector3`] into an array of its components.
    #[inline]
    pub const fn into_array(self) -> [f64; 3] {
        self.0
    }

    /// Multiplies each component by `factor`.
    ///
    /// This is equivalent to `self * factor`.
    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        self * factor
    }

    /// Computes the dot product between `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// let a = vec3(1.0, 3.0, -5.0);
    /// let b = vec3(4.0, -2.0, -1.0);
    /// assert_eq!(a.dot(b), 3.0);
    /// ```
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.0[0] * other.0[0] + self.0[1] * other.0[1] + self.0[2] * other.0[2]
    }

    /// Computes the cross product between `self` and `other`.
    ///
    /// The result is perpendicular to both inputs, and follows the right-hand rule.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
    /// assert_eq!(Vector3::Y.cross(Vector3::X), -Vector3::Z);
    /// ```
    pub fn cross(self, other: Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        Self([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx])
    }

    /// Returns the squared length of this vector.
    #[inline]
    pub fn length2(self) -> f64 {
        self.dot(self)
    }

    /// Returns the length of this vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use xform::*;
    /// assert_eq!(vec3(3.0, 0.0, 4.0).length(), 5.0);
    /// ```
    #[inline]
    pub fn length(self) -> f64 {
        self.length2().sqrt()
    }

    /// Divides this vector by its length, resulting in a unit vector.
    ///
    /// The result is not meaningful (all components are NaN) if `self` has zero length.
    pub fn normalize(self) -> Self {
        self / self.length()
    }
}

impl fmt::Debug for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn arithmetic() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(4.0, 5.0, 6.0);
        assert_eq!(a + b, [5.0, 7.0, 9.0]);
        assert_eq!(b - a, [3.0, 3.0, 3.0]);
        assert_eq!(a.scale(2.0), [2.0, 4.0, 6.0]);
        assert_eq!(-a, [-1.0, -2.0, -3.0]);

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn cross_is_perpendicular() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(-4.0, 0.5, 2.0);
        let c = a.cross(b);
        assert_relative_eq!(c.dot(a), 0.0);
        assert_relative_eq!(c.dot(b), 0.0);
        assert_eq!(a.cross(a), Vector3::ZERO);
    }

    #[test]
    fn normalize() {
        let v = vec3(0.0, 0.0, 4.0).normalize();
        assert_eq!(v, Vector3::Z);
        assert_relative_eq!(vec3(1.0, 1.0, 1.0).normalize().length(), 1.0);
    }

    #[test]
    fn accessors() {
        let v = Vector3::new(1.0, -2.0, 3.5);
        assert_eq!([v.x(), v.y(), v.z()], [1.0, -2.0, 3.5]);
        assert_eq!([v[0], v[1], v[2]], *v.as_array());
    }

    #[test]
    fn from_slice_fallback() {
        assert_eq!(Vector3::from_slice(&[]), Vector3::ZERO);
        assert_eq!(Vector3::from_slice(&[1.0, 2.0, 3.0, 4.0]), Vector3::ZERO);
        assert_eq!(Vector3::from_slice(&[7.0, 8.0, 9.0]), vec3(7.0, 8.0, 9.0));
    }

    #[test]
    fn fmt() {
        assert_eq!(format!("{:?}", vec3(1.0, 2.5, -3.0)), "[1.0, 2.5, -3.0]");
    }
}
