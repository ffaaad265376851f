//! One Kac walk next to one Brownian path over the same time grid.
//!
//! Prints the endpoints, the largest excursion along each axis and a thinned copy
//! of both trajectories, ready to be handed to a plotting tool.
use kacwalk::prelude::*;

fn main() -> anyhow::Result<()> {
    let config = ExperimentConfig::from_json_str(
        r#"{
            "walk": { "rate": 4.0, "speed": 2.0, "duration": 10.0, "steps": 2000,
                      "variant": "direction_redraw", "seed": 7 },
            "brownian": { "duration": 10.0, "steps": 2000, "seed": 7 }
        }"#,
    )?;
    config.validate()?;

    let kac = config.walk.kac_walk()?;
    let kpath = kac.simulate_with(&mut config.walk.rng());
    let bm = config.brownian.brownian()?;
    let bpath = bm.simulate_with(&mut config.brownian.rng());

    println!(
        "Kac walk (a={}, c={}, T={}): {} flips, flip probability per step {:.4}",
        config.walk.rate,
        config.walk.speed,
        config.walk.duration,
        kpath.flips(),
        kac.flip_probability()
    );
    println!("  final position {:?}", kpath.path().final_position());
    println!("  max |x|, |y|   {:?}", kpath.path().max_abs_displacement());
    println!("Brownian motion (T={})", config.brownian.duration);
    println!("  final position {:?}", bpath.final_position());
    println!("  max |x|, |y|   {:?}", bpath.max_abs_displacement());

    println!("\n{:>8} {:>10} {:>10} {:>10} {:>10}", "t", "kac x", "kac y", "bm x", "bm y");
    for i in (0..kpath.path().len()).step_by(200) {
        println!(
            "{:>8.3} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            kpath.path().times()[i],
            kpath.positions()[[i, 0]],
            kpath.positions()[[i, 1]],
            bpath.positions()[[i, 0]],
            bpath.positions()[[i, 1]],
        );
    }

    // T = 100000 with 1000 steps gives a*dt ~ 400, far outside the
    // small-dt regime, so it is rejected.
    let coarse = KacParameters::new(4.0, 2.0, 100_000.0, Discretization::Steps(1000));
    if let Err(e) = KacWalk::new(coarse) {
        println!("\nCoarse grid rejected: {}", e);
    }
    Ok(())
}
