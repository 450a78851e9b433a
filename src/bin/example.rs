//! Beam FEM Example - simply supported span and steel cantilever

use anyhow::{Context, Result};
use beam_fem::prelude::*;

fn print_beam(name: &str, beam: &Beam) -> Result<()> {
    println!("=== {} ===\n", name);

    println!("Support Reactions:");
    for (i, reaction) in beam.reactions()?.iter().enumerate() {
        println!(
            "  {:?} @ {:.2}: F={:.3}, M={:.3}",
            reaction.kind(),
            reaction.location(),
            beam.reaction_force(i)?,
            beam.reaction_moment(i)?
        );
    }

    println!("\nNode Displacements:");
    for node in beam.node_displacements()? {
        println!(
            "  x={:>7.3}: v={:.6e}, theta={:.6e}",
            node.x, node.displacement, node.rotation
        );
    }

    let length = beam.length();
    let stations: Vec<f64> = (0..=10).map(|i| length * i as f64 / 10.0).collect();
    let shear = beam.shear_many(&stations)?;
    let moment = beam.moment_many(&stations)?;
    let deflection = beam.deflection_many(&stations)?;

    println!("\n  {:>8} {:>12} {:>12} {:>14}", "x", "V", "M", "v");
    for (i, x) in stations.iter().enumerate() {
        println!(
            "  {:>8.3} {:>12.3} {:>12.3} {:>14.6e}",
            x, shear[i], moment[i], deflection[i]
        );
    }

    let summary = beam.summary()?;
    println!("\nSummary (JSON):");
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed to serialize summary")?
    );
    println!();

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Beam FEM Example ===\n");

    // Simply supported span with a centre load
    //
    //            100
    //             |
    //             v
    //   o=================o
    //   ^                 ^
    //  Pin               Pin
    //
    let mut simple = Beam::new(
        30.0,
        vec![Load::point(-100.0, 15.0)],
        vec![Reaction::pinned(0.0), Reaction::pinned(30.0)],
    )?;
    simple.solve()?;
    print_beam("Simply supported beam", &simple)?;

    // Steel cantilever with a tip load (E in psi, Ixx in in^4)
    let mut cantilever = Beam::new(10.0, vec![Load::point(-2.0, 10.0)], vec![Reaction::fixed(0.0)])?
        .with_modulus(29e6)?
        .with_inertia(125.0)?;
    cantilever.solve()?;
    print_beam("Cantilever", &cantilever)?;

    let tip_slope = cantilever.derivative(ResponseKind::Deflection, 10.0, 1)?;
    if let Some(warning) = tip_slope.warning {
        println!("Note: {}", warning);
    }
    println!(
        "Tip slope by {:?} difference: {:.6e} (closed form {:.6e})",
        tip_slope.method,
        tip_slope.value,
        cantilever.slope(10.0)?
    );

    println!("\n=== Analysis Complete ===");
    Ok(())
}
