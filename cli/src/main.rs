// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A command line tool that toggles a GPIO pin until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use gpiosysfs::{Direction, Number, Pin, Sysfs};
use gpiosysfs_embedded_hal::OutputPin;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

mod common;
mod signal;
mod toggle;

// Failures are logged rather than reflected in the exit status.
fn main() {
    let opts = Opts::parse();
    init_logger(opts.verbose);

    println!("GPIO test in");
    if let Err(e) = run(&opts) {
        log::error!("{}", failure_message(&e));
    }
    println!("GPIO test out");
}

fn run(opts: &Opts) -> Result<()> {
    signal::register().context("problem with sigaction")?;
    drive(
        &Sysfs::new(&opts.sysfs),
        opts.pin,
        signal::running(),
        opts.period,
    )
}

/// Claim the pin as an output and toggle it until `running` is cleared.
///
/// The pin is released before returning, however the loop ends.
fn drive(sysfs: &Sysfs, number: Number, running: &AtomicBool, period: Duration) -> Result<()> {
    let pin = Pin::with_sysfs(sysfs.clone(), number, Direction::Output)
        .with_context(|| format!("unable to claim pin {}", number))?;
    let mut pin = OutputPin::try_from(pin)?;
    toggle::toggle(&mut pin, running, period)
}

fn failure_message(err: &anyhow::Error) -> String {
    format!("GPIO test failed: {:#}", err)
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[derive(Parser)]
#[command(
    name = "gpiotest",
    about = "A utility to toggle a GPIO pin on Linux using the sysfs GPIO interface.",
    version
)]
struct Opts {
    /// The number of the pin to toggle.
    #[arg(short, long, default_value_t = 5, env = "GPIOTEST_PIN")]
    pin: Number,

    /// The time to hold each level.
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(
        short = 't',
        long,
        value_name = "period",
        default_value = "500ms",
        value_parser = common::parse_duration
    )]
    period: Duration,

    /// The root of the sysfs GPIO interface.
    #[arg(long, value_name = "dir", default_value = gpiosysfs::sysfs::DEFAULT_ROOT)]
    sysfs: PathBuf,

    /// Trace every write to the sysfs GPIO interface.
    #[arg(short = 'v', long)]
    verbose: bool,
}
