//! Kac walk ensembles for several `(a, c)` settings.
//!
//! Larger `a` with `c²/a` held comparable produces paths that look increasingly
//! Brownian; the spread of endpoints is reported per setting.
use kacwalk::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn main() -> anyhow::Result<()> {
    let sweep = Sweep::default().with_progress(true);
    let mut rng = StdRng::seed_from_u64(2024);
    let runs = sweep.run_with(&mut rng)?;

    println!(
        "{:>6} {:>6} {:>8} {:>14} {:>14}",
        "a", "c", "flips", "mean |end|", "c^2 T / a"
    );
    for run in &runs {
        let flips: usize = run.ensemble.iter().map(|p| p.flips()).sum();
        let mean_end = run
            .ensemble
            .iter()
            .filter_map(|p| p.path().final_position())
            .map(|[x, y]| (x * x + y * y).sqrt())
            .sum::<f64>()
            / run.ensemble.len() as f64;
        let scale = run.setting.speed * run.setting.speed * sweep.duration / run.setting.rate;
        println!(
            "{:>6} {:>6} {:>8} {:>14.4} {:>14.4}",
            run.setting.rate, run.setting.speed, flips, mean_end, scale
        );
    }
    Ok(())
}
