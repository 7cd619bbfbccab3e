//! Small fixed-size vectors and matrices for 3D affine transforms.
//!
//! # Overview
//!
//! This crate provides three value types:
//!
//! - [`Vector3`], a 3-component vector.
//! - [`Matrix3`], a 3x3 matrix representing a linear map (rotation, scale, shear).
//! - [`Matrix4`], a 4x4 matrix that is most commonly used in "3x4 mode" to represent an affine
//!   transform (a linear map followed by a translation).
//!
//! All matrices use a single, column-major, unpadded data layout: the element at row `r` and
//! column `c` of a [`Matrix4`] lives at index `c * 4 + r` of its backing array (`c * 3 + r` for
//! [`Matrix3`]).
//!
//! # In-place operations
//!
//! Most operations come in two flavors: one that returns a fresh value, and a `set_*` variant that
//! overwrites `self` (the *target*) and returns it again, so that calls can be chained:
//!
//! ```
//! # use xform::*;
//! let mut m = Matrix4::IDENTITY;
//! m.set_from_translation(vec3(1.0, 2.0, 3.0))
//!     .transpose_in_place()
//!     .transpose_in_place();
//! assert_eq!(m.translation(), vec3(1.0, 2.0, 3.0));
//! ```
//!
//! Operands are always taken by shared reference, so a target can never alias one of the operands.
//!
//! # Affine ("3x4") operations
//!
//! Methods with a `3x4` suffix assume that the bottom row of their operands is `(0, 0, 0, 1)`.
//! They never read that row, and always write exactly `(0, 0, 0, 1)` into the bottom row of their
//! result.
//!
//! # Singular matrices
//!
//! Inversion can fail when a matrix is singular (or close enough to singular that its determinant
//! or pivot falls below [`SINGULARITY_THRESHOLD`]). This is signaled by returning [`None`] (or
//! `false` for the self-inverting methods), never by panicking.

mod matrix3;
mod matrix4;
mod vector;

pub use matrix3::*;
pub use matrix4::*;
pub use vector::*;

/// Absolute threshold below which a determinant or pivot is considered to be zero.
///
/// All inversion methods in this crate reject matrices whose determinant (or, for Gauss-Jordan
/// elimination, whose largest available pivot) has a magnitude smaller than this value.
pub const SINGULARITY_THRESHOLD: f64 = 1e-10;

/// Number of decimal digits used when formatting a matrix via [`Display`] without an explicit
/// precision.
///
/// [`Display`]: std::fmt::Display
pub const DEFAULT_PRECISION: usize = 4;
