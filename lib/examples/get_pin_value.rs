// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of reading a single pin.

use gpiosysfs::Pin;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let number = 22;
    // export the pin as an input
    let pin = Pin::input(number)?;

    let value = pin.value()?;
    println!("{number}={}", if value { 1 } else { 0 });

    Ok(())
}
