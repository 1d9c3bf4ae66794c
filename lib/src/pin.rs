// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Direction, Error, Number, Result, Sysfs};

/// A single GPIO pin claimed through sysfs.
///
/// Holding the [`Pin`] grants exclusive control of the pin.
///
/// The pin is exported and configured when constructed, and remains so
/// until the [`Pin`] is dropped.
/// When dropped an output pin is driven low and then the pin is unexported.
/// Errors while releasing the pin are ignored, so release always runs to
/// completion.
///
/// The direction is fixed for the life of the [`Pin`].
#[derive(Debug)]
pub struct Pin {
    sysfs: Sysfs,
    number: Number,
    direction: Direction,
}

impl Pin {
    /// Claim a pin from the default sysfs and configure its direction.
    ///
    /// ```no_run
    /// # fn example() -> gpiosysfs::Result<()> {
    /// use gpiosysfs::{Direction, Pin};
    ///
    /// let pin = Pin::new(17, Direction::Output)?;
    /// pin.set_value(true)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(number: Number, direction: Direction) -> Result<Self> {
        Self::with_sysfs(Sysfs::default(), number, direction)
    }

    /// Claim an input pin from the default sysfs.
    pub fn input(number: Number) -> Result<Self> {
        Self::new(number, Direction::Input)
    }

    /// Claim an output pin from the default sysfs.
    pub fn output(number: Number) -> Result<Self> {
        Self::new(number, Direction::Output)
    }

    /// Claim a pin from the given sysfs and configure its direction.
    ///
    /// The pin is exported and then its direction set.
    /// If the export fails then the direction is left untouched.
    /// If setting the direction fails then the pin is unexported again.
    pub fn with_sysfs(sysfs: Sysfs, number: Number, direction: Direction) -> Result<Self> {
        log::info!("configure pin [{}] as [{}]", number, direction);
        sysfs.export(number)?;
        if let Err(e) = sysfs.set_direction(number, direction) {
            _ = sysfs.unexport(number);
            return Err(e);
        }
        Ok(Pin {
            sysfs,
            number,
            direction,
        })
    }

    /// The number of the pin.
    pub fn number(&self) -> Number {
        self.number
    }

    /// The direction the pin is configured for.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The sysfs the pin is controlled through.
    pub fn sysfs(&self) -> &Sysfs {
        &self.sysfs
    }

    /// Drive an output pin high (`true`) or low (`false`).
    ///
    /// Fails with [`Error::SetOnInput`] for input pins, without touching the pin.
    pub fn set_value(&self, on: bool) -> Result<()> {
        log::info!(
            "set pin [{}] to [{}]",
            self.number,
            if on { "on" } else { "off" }
        );
        if self.direction == Direction::Input {
            log::error!("cannot call set on input pin [{}]", self.number);
            return Err(Error::SetOnInput(self.number));
        }
        self.sysfs.write_value(self.number, on)
    }

    /// Read the level of an input pin.
    ///
    /// Returns true only if the pin reads as `1`, ignoring surrounding whitespace.
    ///
    /// Fails with [`Error::GetOnOutput`] for output pins, without touching the pin.
    pub fn value(&self) -> Result<bool> {
        log::info!("get pin [{}]", self.number);
        if self.direction == Direction::Output {
            log::error!("cannot call get on output pin [{}]", self.number);
            return Err(Error::GetOnOutput(self.number));
        }
        self.sysfs.read_value(self.number)
    }
}

impl Drop for Pin {
    fn drop(&mut self) {
        log::info!("release pin [{}]", self.number);
        if self.direction == Direction::Output {
            _ = self.sysfs.write_value(self.number, false);
        }
        _ = self.sysfs.unexport(self.number);
    }
}
