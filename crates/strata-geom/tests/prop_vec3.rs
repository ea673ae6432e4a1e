use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;
use strata_geom::Vec3;

fn approx(a: f32, b: f32, eps: f32) -> bool { (a - b).abs() <= eps }
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e3)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32())
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Addition commutativity: a + b == b + a (element-wise)
    #[test]
    fn vec3_add_commutative(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a + b, b + a, 1e-5));
    }

    // Cross product is anti-commutative: a x b == -(b x a)
    #[test]
    fn vec3_cross_anticommutative(a in arb_vec3(), b in arb_vec3()) {
        let lhs = a.cross(b);
        let rhs = -(b.cross(a));
        let scale = 1e-4 * (1.0 + a.length() * b.length());
        prop_assert!(vapprox(lhs, rhs, scale));
    }

    // Normalized non-trivial vectors have unit length
    #[test]
    fn vec3_normalized_is_unit(a in arb_vec3()) {
        prop_assume!(a.length() > 1e-3);
        prop_assert!(approx(a.normalized().length(), 1.0, 1e-4));
    }

    // floor never exceeds the input and is within one unit below it
    #[test]
    fn vec3_floor_bounds(a in arb_vec3()) {
        let f = a.floor();
        for (v, fv) in [(a.x, f.x), (a.y, f.y), (a.z, f.z)] {
            prop_assert!(fv <= v);
            prop_assert!(v - fv < 1.0);
        }
    }
}
