//! Builds a small transform hierarchy, then maps a point back and forth through it.
//!
//! Run with `RUST_LOG=trace` to see why the degenerate transform at the end gets rejected.

use std::f64::consts::FRAC_PI_4;

use anyhow::Context;
use xform::{vec3, Matrix3, Matrix4, Vector3};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // parent: rotate around Z, then move up
    let parent = Matrix4::from_translation(vec3(0.0, 0.0, 5.0))
        .multiply_3x4_matrix3(&Matrix3::from_rotation_z(FRAC_PI_4));

    // child: offset along the parent's X axis, scaled up
    let child = Matrix4::from_basis(Vector3::X, Vector3::Y, None, Some(vec3(2.0, 0.0, 0.0)))
        .multiply_3x4_scale(vec3(2.0, 2.0, 2.0));

    let world = parent.multiply_3x4(&child);
    log::info!("composed transform has determinant {}", world.determinant());
    println!("child-to-world:\n{world:.3}\n");

    let p = vec3(1.0, 1.0, 1.0);
    let q = world.transform_point(p);
    println!("{p:?} -> {q:?}");

    let to_local = world
        .inverse_3x4()
        .context("child-to-world transform is not invertible")?;
    println!("{q:?} -> {:?}", to_local.transform_point(q));

    let general = world
        .inverse_gauss_jordan()
        .context("Gauss-Jordan elimination failed")?;
    println!("max deviation between inverses: {:e}", max_deviation(&to_local, &general));

    let flattened = world.multiply_3x4_scale(vec3(1.0, 1.0, 0.0));
    match flattened.inverse_adjoint() {
        Some(inv) => println!("unexpected inverse:\n{inv}"),
        None => println!("flattened transform is singular (det = {})", f64::from(flattened)),
    }

    Ok(())
}

fn max_deviation(a: &Matrix4, b: &Matrix4) -> f64 {
    a.as_array()
        .iter()
        .zip(b.as_array())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}
