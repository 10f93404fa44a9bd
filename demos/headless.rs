//! Headless Fill Indicator
//!
//! This example drives a fluid surface through a stepper-style goal counter
//! on tokio's clock, without drawing anything.
//!
//! Key concepts:
//! - Commands sent to a running indicator
//! - Level changes while amplifying are absorbed
//! - Level changes while damping restart the cycle directly
//!
//! Run with: RUST_LOG=waterline=debug cargo run --example headless

use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use waterline::config::WaveConfig;
use waterline::runtime::{Command, Indicator};
use waterline::target::{FluidSurface, Progress};

const TOTAL_GOALS: u32 = 5;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    println!("=== Headless Fill Indicator ===\n");

    let config = WaveConfig::builder()
        .settle_delay(Duration::from_millis(200))
        .fill_duration(Duration::from_millis(400))
        .build()
        .expect("demo configuration is valid");
    let indicator = Indicator::new(config.clone(), FluidSurface::new(&config));

    let (tx, rx) = mpsc::channel(16);
    let stepper = async move {
        // (goals done, pause before the next tap)
        let taps = [(1, 1000), (2, 100), (3, 700), (4, 1000), (5, 1000)];
        for (done, pause) in taps {
            println!("Goals: {done} / {TOTAL_GOALS}");
            let command = Command::update(move |s: &mut FluidSurface| {
                s.set_progress(Progress::new(done, TOTAL_GOALS))
            });
            if tx.send(command).await.is_err() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(pause)).await;
        }
    };

    let (indicator, ()) = tokio::join!(indicator.run(rx), stepper);

    println!("\nFinal phase: {}", indicator.phase());
    println!(
        "Settled level: {:?}",
        indicator.target().settled_level().unwrap_or_default()
    );
    println!("Completions: {}", indicator.target().completions());

    println!("\nPath:");
    for transition in indicator.machine().history().transitions() {
        println!(
            "  #{:<3} {} -> {}",
            transition.epoch, transition.from, transition.to
        );
    }

    println!("\n=== Example Complete ===");
}
