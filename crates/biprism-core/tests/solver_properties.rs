use biprism_core::{solve, InputParameters};
use proptest::prelude::*;

fn valid_params() -> impl Strategy<Value = InputParameters> {
    (
        0.0f64..50.0,
        1.0f64..100.0,
        1.0f64..100.0,
        -5.0f64..5.0,
        0.01f64..5.0,
        0.0f64..10.0,
        0.1f64..30.0,
        0.001f64..1.0,
    )
        .prop_map(|(x1, u, v, p1, sep, x4, span, b)| InputParameters {
            x1,
            x2: x1 + u,
            x3: x1 + u + v,
            p1,
            p2: p1 + sep,
            x4,
            x5: x4 + span,
            slit_width: b,
        })
}

proptest! {
    #[test]
    fn wavelength_matches_recomputation(params in valid_params()) {
        let solution = solve(params).expect("valid readings solve");
        let r = solution.results;
        let recomputed = (r.d_mm * r.delta_x_mm / r.screen_distance_mm_plot) * 1e6;
        prop_assert_eq!(r.wavelength_nm, recomputed);
        prop_assert_eq!(r.u_cm, params.x2 - params.x1);
        prop_assert_eq!(r.v_cm, params.x3 - params.x2);
        prop_assert_eq!(r.d_prime_mm, (params.p2 - params.p1).abs());
        prop_assert_eq!(r.wavelength_mm_plot * 1e6, r.wavelength_nm);
    }

    #[test]
    fn solving_twice_is_bit_identical(params in valid_params()) {
        let first = solve(params).expect("first solve");
        let second = solve(params).expect("second solve");
        prop_assert_eq!(first.results.wavelength_nm.to_bits(), second.results.wavelength_nm.to_bits());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn swapping_image_positions_changes_nothing(params in valid_params()) {
        let swapped = InputParameters { p1: params.p2, p2: params.p1, ..params };
        let a = solve(params).expect("solve");
        let b = solve(swapped).expect("solve swapped");
        prop_assert_eq!(a.results, b.results);
    }
}
