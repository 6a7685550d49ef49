//! Dump a Lorenz trajectory as CSV.
//!
//! Run with: `cargo run --example lorenz_trace > trace.csv`
//!
//! Feed the output to gnuplot or a plotting notebook to see the butterfly.

use strange::prelude::*;

fn main() {
    let mut rk =
        RungeKuttaIntegrator::new(Lorenz::default(), &[1.0, 1.0, 1.0], 0.0, 0.01, 1e-8);

    println!("t,x,y,z");
    for _ in 0..5_000 {
        match rk.step() {
            Ok((t, x)) => println!("{:.6},{:.6},{:.6},{:.6}", t, x[0], x[1], x[2]),
            Err(e) => {
                eprintln!("integration stopped: {}", e);
                break;
            }
        }
    }
}
