use strata_geom::{Aabb, Mat4, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-6));
}

#[test]
fn vec3_add_sub_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(c - a, b, 1e-6));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-6));
}

#[test]
fn vec3_dot_length_normalized() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!(approx_eq(v.dot(v), 25.0, 1e-6));
    assert!(approx_eq(v.length(), 5.0, 1e-6));
    assert!(vec3_approx_eq(v.normalized(), Vec3::new(0.6, 0.8, 0.0), 1e-6));

    // Zero vector normalization is a no-op
    assert!(vec3_approx_eq(Vec3::ZERO.normalized(), Vec3::ZERO, 1e-6));
}

#[test]
fn vec3_cross_basis() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let j = Vec3::new(0.0, 1.0, 0.0);
    let k = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(i.cross(j), k, 1e-6));
    assert!(vec3_approx_eq(j.cross(k), i, 1e-6));
    assert!(vec3_approx_eq(k.cross(i), j, 1e-6));
}

#[test]
fn aabb_contains_is_inclusive() {
    let bb = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0));
    assert!(bb.contains(Vec3::new(1.0, 2.0, 3.0)));
    assert!(bb.contains(Vec3::new(0.5, 0.5, 0.5)));
    assert!(!bb.contains(Vec3::new(1.01, 0.0, 0.0)));
}

#[test]
fn aabb_expanded_keeps_center_and_grows_size() {
    let bb = Aabb::new(Vec3::ZERO, Vec3::new(30.0, 62.0, 30.0)).expanded(1.0);
    assert_eq!(bb.min, Vec3::splat(-1.0));
    assert_eq!(bb.center(), Vec3::new(15.0, 31.0, 15.0));
    assert_eq!(bb.size(), Vec3::new(32.0, 64.0, 32.0));
    assert!(bb.contains(Vec3::new(-1.0, 63.0, 31.0)));
}

#[test]
fn look_at_maps_eye_to_origin_and_target_to_negative_z() {
    let eye = Vec3::new(3.0, 3.0, 3.0);
    let target = Vec3::new(3.0, 3.0, 0.0);
    let view = Mat4::look_at_rh(eye, target, Vec3::UP);
    assert!(vec3_approx_eq(view.transform_point(eye), Vec3::ZERO, 1e-5));
    assert!(vec3_approx_eq(
        view.transform_point(target),
        Vec3::new(0.0, 0.0, -3.0),
        1e-5
    ));
}

#[test]
fn perspective_has_gl_layout() {
    let p = Mat4::perspective_rh_gl(90f32.to_radians(), 2.0, 0.1, 100.0);
    assert!(approx_eq(p.at(0, 0), 0.5, 1e-5));
    assert!(approx_eq(p.at(1, 1), 1.0, 1e-5));
    assert!(approx_eq(p.at(3, 2), -1.0, 1e-6));
    assert!(approx_eq(p.at(3, 3), 0.0, 1e-6));
}

#[test]
fn mat4_mul_composes_translations() {
    let a = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
    let b = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0));
    assert!(vec3_approx_eq((a * b).translation(), Vec3::new(1.0, 2.0, 0.0), 1e-6));
}
