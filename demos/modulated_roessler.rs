//! Rössler trajectory with a clock-modulated parameter.
//!
//! Run with: `cargo run --example modulated_roessler`
//!
//! The `c` parameter sweeps between 4 and 14 over time, carrying the system
//! through its period-doubling cascade into chaos. Each simulated frame
//! ticks the clock, re-evaluates the modulation tree, merges the new value
//! into the system, and advances the trajectory.

use strange::prelude::*;

fn main() {
    // c(t) = mix(4, 14, sin2(0.05 * t))
    let c = Modulation::ternary(
        "mix",
        4.0,
        14.0,
        Modulation::unary("sin2", Modulation::binary("mul", 0.05, Modulation::now()).unwrap())
            .unwrap(),
    )
    .unwrap();

    let mut clock = Clock::new(0.0, 1.0 / 60.0);
    let mut rk =
        RungeKuttaIntegrator::new(Roessler::default(), &[1.0, 1.0, 1.0], 0.0, 0.01, 1e-7);

    println!("t,c,x,y,z");
    for frame in 0..10_000u32 {
        clock.tick();
        let value = c.eval(&clock);

        let update = Parameters::from_pairs(&[("c", value)]);
        rk.field_mut()
            .set_parameters(&update)
            .expect("'c' is a Roessler parameter");

        match rk.step() {
            Ok((t, x)) => {
                if frame % 10 == 0 {
                    println!("{:.4},{:.4},{:.6},{:.6},{:.6}", t, value, x[0], x[1], x[2]);
                }
            }
            Err(e) => {
                eprintln!("integration stopped: {}", e);
                break;
            }
        }
    }
}
