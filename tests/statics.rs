use approx::assert_relative_eq;
use beam_fem::prelude::*;

/// Sum of vertical forces and of moments about `x = 0` over applied loads and
/// solved reactions
fn residuals(beam: &Beam) -> (f64, f64) {
    let mut force = 0.0;
    let mut moment = 0.0;

    for load in beam.loads() {
        match load.kind() {
            LoadKind::Point => {
                force += load.magnitude();
                moment += load.magnitude() * load.location();
            }
            LoadKind::Moment => moment += load.magnitude(),
        }
    }
    for (i, reaction) in beam.reactions().unwrap().iter().enumerate() {
        let f = beam.reaction_force(i).unwrap();
        force += f;
        moment += f * reaction.location() + beam.reaction_moment(i).unwrap();
    }
    (force, moment)
}

fn solved(length: f64, loads: Vec<Load>, reactions: Vec<Reaction>) -> Beam {
    let mut beam = Beam::new(length, loads, reactions).unwrap();
    beam.solve().unwrap();
    beam
}

#[test]
fn equilibrium_holds_for_mixed_loading() {
    let cases = vec![
        solved(
            20.0,
            vec![
                Load::point(-10.0, 3.0),
                Load::moment(25.0, 7.5),
                Load::point(4.0, 12.0),
                Load::point(-7.0, 20.0),
            ],
            vec![Reaction::pinned(0.0), Reaction::pinned(10.0), Reaction::fixed(16.0)],
        ),
        solved(
            9.0,
            vec![Load::moment(-12.0, 2.0), Load::point(-5.0, 9.0)],
            vec![Reaction::fixed(0.0), Reaction::pinned(6.0)],
        ),
    ];

    for beam in &cases {
        let (force, moment) = residuals(beam);
        assert!(force.abs() < 1e-8, "force residual {force}");
        assert!(moment.abs() < 1e-7, "moment residual {moment}");
    }
}

#[test]
fn moment_is_antiderivative_of_shear() {
    let beam = solved(
        12.0,
        vec![Load::point(-8.0, 2.0), Load::point(-3.0, 7.0), Load::point(5.0, 10.5)],
        vec![Reaction::pinned(0.0), Reaction::pinned(12.0)],
    );

    // Midpoint rule is exact for piecewise constant shear away from the jumps
    let n = 12_000;
    let dx = 12.0 / n as f64;
    let mut integral = 0.0;
    for k in 0..n {
        let x = (k as f64 + 0.5) * dx;
        integral += beam.shear(x).unwrap() * dx;
        if (k + 1) % 1000 == 0 {
            let x_end = 12.0 * (k + 1) as f64 / n as f64;
            assert_relative_eq!(integral, beam.moment(x_end).unwrap(), epsilon = 1e-8);
        }
    }
}

#[test]
fn fixed_fixed_centre_load() {
    let (p, l) = (-8.0, 4.0);
    let beam = solved(
        l,
        vec![Load::point(p, l / 2.0)],
        vec![Reaction::fixed(0.0), Reaction::fixed(l)],
    );

    assert_relative_eq!(beam.reaction_force(0).unwrap(), -p / 2.0, epsilon = 1e-9);
    assert_relative_eq!(beam.reaction_force(1).unwrap(), -p / 2.0, epsilon = 1e-9);
    assert_relative_eq!(beam.reaction_moment(0).unwrap(), -p * l / 8.0, epsilon = 1e-9);
    assert_relative_eq!(beam.reaction_moment(1).unwrap(), p * l / 8.0, epsilon = 1e-9);
    assert_relative_eq!(beam.moment(l / 2.0).unwrap(), -p * l / 8.0, epsilon = 1e-9);
    assert_relative_eq!(
        beam.deflection(l / 2.0).unwrap(),
        p * l.powi(3) / 192.0,
        max_relative = 1e-9
    );
}

#[test]
fn propped_cantilever_centre_load() {
    let (p, l) = (-16.0, 8.0);
    let beam = solved(
        l,
        vec![Load::point(p, l / 2.0)],
        vec![Reaction::fixed(0.0), Reaction::pinned(l)],
    );

    assert_relative_eq!(beam.reaction_force(1).unwrap(), -5.0 * p / 16.0, epsilon = 1e-9);
    assert_relative_eq!(beam.reaction_force(0).unwrap(), -11.0 * p / 16.0, epsilon = 1e-9);
    assert_relative_eq!(beam.reaction_moment(0).unwrap(), -3.0 * p * l / 16.0, epsilon = 1e-9);
    assert_eq!(beam.reaction_moment(1).unwrap(), 0.0);
}

#[test]
fn overhanging_beam_tip() {
    // Span 6 between pins, overhang 2 loaded at the tip
    let (p, span, a) = (-10.0, 6.0, 2.0);
    let beam = solved(
        span + a,
        vec![Load::point(p, span + a)],
        vec![Reaction::pinned(0.0), Reaction::pinned(span)],
    );

    assert_relative_eq!(beam.reaction_force(0).unwrap(), p * a / span, epsilon = 1e-9);
    assert_relative_eq!(
        beam.reaction_force(1).unwrap(),
        -p * (span + a) / span,
        epsilon = 1e-9
    );
    assert_relative_eq!(beam.moment(span).unwrap(), p * a, epsilon = 1e-9);
    assert_relative_eq!(
        beam.deflection(span + a).unwrap(),
        p * a * a * (span + a) / 3.0,
        max_relative = 1e-9
    );
    // The span lifts between the supports
    assert!(beam.deflection(span / 2.0).unwrap() > 0.0);
}

#[test]
fn applied_couple_jumps_moment() {
    let beam = solved(
        10.0,
        vec![Load::moment(50.0, 4.0)],
        vec![Reaction::pinned(0.0), Reaction::pinned(10.0)],
    );

    assert_relative_eq!(beam.reaction_force(0).unwrap(), 5.0, epsilon = 1e-9);
    assert_relative_eq!(beam.reaction_force(1).unwrap(), -5.0, epsilon = 1e-9);
    // Left-continuous: the couple at x = 4 is not yet counted
    assert_relative_eq!(beam.moment(4.0).unwrap(), 20.0, epsilon = 1e-9);
    assert_relative_eq!(beam.moment(4.0 + 1e-9).unwrap(), -30.0, epsilon = 1e-6);
    assert_relative_eq!(beam.moment(10.0).unwrap(), 0.0, epsilon = 1e-9);
}

#[test]
fn load_at_support_goes_to_reaction() {
    let beam = solved(
        10.0,
        vec![Load::point(-10.0, 0.0), Load::point(-20.0, 5.0)],
        vec![Reaction::pinned(0.0), Reaction::pinned(10.0)],
    );

    assert_relative_eq!(beam.reaction_force(0).unwrap(), 20.0, epsilon = 1e-9);
    assert_relative_eq!(beam.reaction_force(1).unwrap(), 10.0, epsilon = 1e-9);
    assert_eq!(beam.shear(0.0).unwrap(), 0.0);
    assert_relative_eq!(beam.shear(2.0).unwrap(), 10.0, epsilon = 1e-9);
    assert_eq!(beam.deflection(0.0).unwrap(), 0.0);
}

#[test]
fn supports_do_not_move() {
    let beam = solved(
        15.0,
        vec![Load::point(-4.0, 3.0), Load::moment(9.0, 11.0)],
        vec![Reaction::fixed(0.0), Reaction::pinned(7.0), Reaction::pinned(15.0)],
    );

    for reaction in beam.reactions().unwrap() {
        let x = reaction.location();
        assert_eq!(beam.deflection(x).unwrap(), 0.0);
        if reaction.boundary_condition().rot_fixed {
            assert_eq!(beam.slope(x).unwrap(), 0.0);
        }
    }
    assert!(beam.response().unwrap().mismatch() < 1e-6);
}

#[test]
fn solve_is_idempotent() {
    let mut beam = solved(
        10.0,
        vec![Load::point(-3.0, 4.0)],
        vec![Reaction::pinned(0.0), Reaction::pinned(10.0)],
    );
    let generation = beam.generation();
    let before = beam.reaction_results().unwrap();
    let deflection = beam.deflection(4.0).unwrap();

    beam.solve().unwrap();
    assert_eq!(beam.generation(), generation);
    assert_eq!(beam.reaction_results().unwrap(), before);

    beam.invalidate();
    assert_eq!(beam.state(), BeamState::Unbuilt);
    assert!(beam.reaction_results().is_err());

    beam.solve().unwrap();
    assert_eq!(beam.reaction_results().unwrap(), before);
    assert_eq!(beam.deflection(4.0).unwrap(), deflection);
}

#[test]
fn stiffer_beam_deflects_less() {
    let mut beam = solved(
        10.0,
        vec![Load::point(-3.0, 5.0)],
        vec![Reaction::pinned(0.0), Reaction::pinned(10.0)],
    );
    let soft = beam.deflection(5.0).unwrap();

    beam.set_modulus(2.0).unwrap();
    assert!(beam.deflection(5.0).is_err());
    beam.solve().unwrap();
    assert_relative_eq!(beam.deflection(5.0).unwrap(), soft / 2.0, max_relative = 1e-9);
}

#[test]
fn single_pin_is_unstable() {
    let mut beam =
        Beam::new(10.0, vec![Load::point(-1.0, 5.0)], vec![Reaction::pinned(0.0)]).unwrap();
    assert!(matches!(
        beam.solve(),
        Err(BeamError::Solver(SolverError::Singular { .. }))
    ));
}

#[test]
fn unsupported_beam_is_unstable() {
    let mut beam = Beam::new(10.0, vec![Load::point(-1.0, 5.0)], vec![]).unwrap();
    assert!(matches!(
        beam.solve(),
        Err(BeamError::Solver(SolverError::Singular { .. }))
    ));
}

#[test]
fn duplicate_support_rejected() {
    let mut beam = Beam::new(
        10.0,
        vec![Load::point(-1.0, 5.0)],
        vec![Reaction::pinned(0.0), Reaction::pinned(10.0), Reaction::fixed(10.0)],
    )
    .unwrap();
    assert_eq!(
        beam.solve(),
        Err(BeamError::Solver(SolverError::RedundantSupport(10.0)))
    );
    assert!(beam.supports().iter().all(|r| r.force().is_none()));
}

#[test]
fn invalid_inputs_rejected() {
    assert_eq!(
        Beam::new(-1.0, vec![], vec![]).unwrap_err(),
        BeamError::Validation(ValidationError::NonPositiveLength(-1.0))
    );
    assert_eq!(
        Beam::new(10.0, vec![Load::point(1.0, 12.0)], vec![]).unwrap_err(),
        BeamError::Validation(ValidationError::LocationOutOfRange {
            location: 12.0,
            length: 10.0
        })
    );
    assert!(Beam::new(10.0, vec![Load::point(1.0, -0.1)], vec![]).is_err());
    assert!(Beam::new(10.0, vec![], vec![Reaction::fixed(10.5)]).is_err());
    assert!(Beam::new(10.0, vec![Load::point(f64::NAN, 1.0)], vec![]).is_err());
    assert!(Beam::with_properties(10.0, 0.0, 1.0, vec![], vec![]).is_err());
    assert!(Beam::with_properties(10.0, 1.0, -2.0, vec![], vec![]).is_err());

    let mut beam = Beam::new(10.0, vec![], vec![Reaction::fixed(0.0)]).unwrap();
    assert!(beam.add_load(Load::moment(1.0, 10.5)).is_err());
    assert!(beam.loads().is_empty());
}

#[test]
fn independent_beams_solve_in_parallel() {
    let handles: Vec<_> = (1..=4)
        .map(|k| {
            std::thread::spawn(move || {
                let p = -(k as f64);
                let mut beam = Beam::new(
                    8.0,
                    vec![Load::point(p, 4.0)],
                    vec![Reaction::pinned(0.0), Reaction::pinned(8.0)],
                )
                .unwrap();
                beam.solve().unwrap();
                beam.reaction_force(0).unwrap()
            })
        })
        .collect();

    for (k, handle) in (1..=4).zip(handles) {
        assert_relative_eq!(handle.join().unwrap(), k as f64 / 2.0, epsilon = 1e-9);
    }
}
