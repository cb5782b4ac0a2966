use biprism_core::pattern::{diffraction_envelope, interference_term, lambda_d, linspace};
use biprism_core::{synthesize, synthesize_default, PlotInputs, SynthesisError, SynthesisOpts};

fn bench_inputs() -> PlotInputs {
    PlotInputs {
        wavelength_mm: 3.75e-4,
        d_mm: 0.342_857,
        screen_distance_mm: 1000.0,
        slit_width_mm: 0.05,
    }
}

#[test]
fn vanishing_slit_width_approaches_unit_envelope() {
    let xs = linspace(-6.0, 6.0, 1000);
    let narrow = PlotInputs {
        slit_width_mm: 1e-8,
        ..bench_inputs()
    };
    let point = PlotInputs {
        slit_width_mm: 1e-10,
        ..bench_inputs()
    };
    let scale = lambda_d(&narrow);
    for &x in &xs {
        let computed = diffraction_envelope(x, &narrow, scale);
        let explicit = diffraction_envelope(x, &point, scale);
        assert_eq!(explicit, 1.0);
        assert!((computed - explicit).abs() < 1e-9, "x = {x}: {computed}");
    }
}

#[test]
fn vanishing_source_separation_gives_uniform_half() {
    let inputs = PlotInputs {
        d_mm: 0.0,
        slit_width_mm: 1e-10,
        ..bench_inputs()
    };
    let field = synthesize_default(&inputs).expect("field");
    assert!(field.profile().iter().all(|&v| v == 0.5));
    assert_eq!(field.vmax, 0.5);

    let scale = lambda_d(&inputs);
    assert_eq!(interference_term(1.234, &inputs, scale), 0.5);
}

#[test]
fn rows_replicate_the_profile() {
    let opts = SynthesisOpts {
        columns: 64,
        rows: 5,
        ..SynthesisOpts::default()
    };
    let field = synthesize(&bench_inputs(), &opts).expect("field");
    let first = field.profile().to_vec();
    for row in 0..field.rows {
        assert_eq!(field.row(row).expect("row"), first.as_slice());
    }
    assert!(field.row(5).is_none());
    assert!(field.value(0, 64).is_none());
    assert_eq!(field.x_mm.len(), 64);
}

#[test]
fn near_zero_field_floors_display_range() {
    // λ·D = 1 and b = 1 put every sample on an envelope zero.
    let inputs = PlotInputs {
        wavelength_mm: 1e-3,
        d_mm: 0.5,
        screen_distance_mm: 1000.0,
        slit_width_mm: 1.0,
    };
    let opts = SynthesisOpts {
        x_min: 1.0,
        x_max: 2.0,
        columns: 2,
        rows: 1,
        half_height_mm: 2.0,
    };
    let field = synthesize(&inputs, &opts).expect("field");
    assert!(field.profile().iter().all(|&v| v < 1e-20));
    assert_eq!(field.vmin, 0.0);
    assert_eq!(field.vmax, 1e-9);
}

#[test]
fn degenerate_plot_inputs_are_rejected() {
    let no_screen = PlotInputs {
        screen_distance_mm: 1e-10,
        ..bench_inputs()
    };
    assert!(matches!(
        synthesize_default(&no_screen),
        Err(SynthesisError::DegeneratePlotInputs { .. })
    ));

    let no_wavelength = PlotInputs {
        wavelength_mm: 1e-16,
        ..bench_inputs()
    };
    let err = synthesize_default(&no_wavelength).unwrap_err();
    assert_eq!(err.code(), "degenerate-plot-inputs");
}

#[test]
fn invalid_sampling_options_are_rejected() {
    let opts = SynthesisOpts {
        columns: 1,
        ..SynthesisOpts::default()
    };
    assert_eq!(
        synthesize(&bench_inputs(), &opts).unwrap_err().code(),
        "invalid-options"
    );
    let opts = SynthesisOpts {
        x_min: 6.0,
        x_max: -6.0,
        ..SynthesisOpts::default()
    };
    assert!(opts.validate().is_err());
}

#[test]
fn intensity_is_symmetric_about_the_axis() {
    let field = synthesize_default(&bench_inputs()).expect("field");
    let profile = field.profile();
    let n = profile.len();
    for i in 0..n / 2 {
        assert!((profile[i] - profile[n - 1 - i]).abs() < 1e-9);
    }
}
