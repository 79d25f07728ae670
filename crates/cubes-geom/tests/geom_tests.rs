use cubes_geom::{Aabb, IVec3, Vec2, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn ivec3_basis_cross_products() {
    assert_eq!(IVec3::X.cross(IVec3::Y), IVec3::Z);
    assert_eq!(IVec3::Y.cross(IVec3::Z), IVec3::X);
    assert_eq!(IVec3::Z.cross(IVec3::X), IVec3::Y);
    assert_eq!(IVec3::Y.cross(IVec3::X), -IVec3::Z);
}

#[test]
fn ivec3_add_sub_neg() {
    let a = IVec3::new(1, -2, 3);
    let b = IVec3::new(4, 5, -6);
    assert_eq!(a + b, IVec3::new(5, 3, -3));
    assert_eq!(a - b, IVec3::new(-3, -7, 9));
    assert_eq!(-a, IVec3::new(-1, 2, -3));

    let mut c = a;
    c += b;
    assert_eq!(c, a + b);
}

#[test]
fn ivec3_elementwise_and_conversions() {
    let v = IVec3::new(2, 3, 4).mul_elem(IVec3::new(16, 8, 1));
    assert_eq!(v, IVec3::new(32, 24, 4));
    assert_eq!(IVec3::from((7, 8, 9)), IVec3::new(7, 8, 9));
    assert!(vec3_approx_eq(
        Vec3::from(IVec3::new(-1, 0, 5)),
        Vec3::new(-1.0, 0.0, 5.0),
        1e-6
    ));
    assert_eq!(format!("{}", IVec3::new(1, 2, 3)), "(1, 2, 3)");
}

#[test]
fn vec3_ops() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    assert!(vec3_approx_eq(a + b, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq((a + b) - a, b, 1e-6));
    assert!(vec3_approx_eq(a * 2.0, Vec3::new(2.0, 4.0, 6.0), 1e-6));
    assert!(approx_eq(a.dot(b), -4.0 + 10.0 - 18.0, 1e-6));

    // Cross result is orthogonal to both inputs
    let c = a.cross(b);
    assert!(approx_eq(a.dot(c), 0.0, 1e-4));
    assert!(approx_eq(b.dot(c), 0.0, 1e-4));
}

#[test]
fn vec2_new_and_zero() {
    assert_eq!(Vec2::new(0.0, 0.0), Vec2::ZERO);
    let uv = Vec2::new(0.5, 0.25);
    assert!(approx_eq(uv.x, 0.5, 1e-6));
    assert!(approx_eq(uv.y, 0.25, 1e-6));
}

#[test]
fn aabb_contains_is_inclusive() {
    let aabb = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(16.0, 16.0, 16.0));
    assert!(aabb.contains(Vec3::new(0.0, 0.0, 0.0)));
    assert!(aabb.contains(Vec3::new(16.0, 16.0, 16.0)));
    assert!(aabb.contains(Vec3::new(3.5, 9.0, 15.9)));
    assert!(!aabb.contains(Vec3::new(-0.1, 1.0, 1.0)));
    assert!(!aabb.contains(Vec3::new(1.0, 16.1, 1.0)));
}
