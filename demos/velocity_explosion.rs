//! Diffusion velocity norm blowing up near t = 1 against the bounded Kac norm.
use kacwalk::prelude::*;

fn main() -> anyhow::Result<()> {
    let field = FieldConfig::default();
    let model = field.model;

    let curves = model.norm_curves(&field.times.values());
    println!("{:>6} {:>14} {:>10}", "t", "diffusion", "kac");
    for i in (0..curves.t.len()).step_by(11) {
        println!(
            "{:>6.3} {:>14.4} {:>10.4}",
            curves.t[i], curves.diffusion[i], curves.kac[i]
        );
    }

    let xs = field.xs.values();
    for profile in model.field_profiles(&xs, &field.profile_times) {
        let last = profile.x.len() - 1;
        println!(
            "t = {}: diffusion v(x) in [{:.3}, {:.3}], kac v(x) in [{:.3}, {:.3}]",
            profile.t,
            profile.diffusion[last],
            profile.diffusion[0],
            profile.kac[last],
            profile.kac[0],
        );
    }
    Ok(())
}
