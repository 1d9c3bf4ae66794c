// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of toggling a single pin.

use anyhow::Context;
use gpiosysfs::Pin;
use std::result::Result;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let number = 22;
    let mut value = true;

    let pin = Pin::output(number).context("Failed to export pin")?;

    for _ in 0..10 {
        pin.set_value(value).context("Failed to set value")?;
        println!("{}={}", number, if value { 1 } else { 0 });
        thread::sleep(Duration::from_millis(500));
        value = !value;
    }
    // dropping the pin drives it low and unexports it
    Ok(())
}
