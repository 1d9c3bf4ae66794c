// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library providing [`embedded_hal::digital`] traits for
//! [`gpiosysfs::Pin`] and therefore for any Linux platform supporting the
//! sysfs GPIO interface.
//!
//! The wrappers fix the direction of the pin in the type, so an input can
//! only be read and an output can only be driven.
//!
//! # Example Usage
//!
//! Reading an input pin:
//!
//! ```no_run
//! # fn example() -> Result<(), gpiosysfs_embedded_hal::Error> {
//! use embedded_hal::digital::InputPin;
//!
//! let mut pin = gpiosysfs_embedded_hal::InputPin::new(4)?;
//! if pin.is_high()? {
//!     println!("Input is high.");
//! }
//! # Ok(())
//! # }
//! ```
//! Setting an output pin:
//!
//! ```no_run
//! # fn example() -> Result<(), gpiosysfs_embedded_hal::Error> {
//! use embedded_hal::digital::{OutputPin, PinState};
//!
//! // level is set once the pin is claimed
//! let mut led0 = gpiosysfs_embedded_hal::OutputPin::new(17, PinState::High)?;
//!
//! // change the level later
//! led0.set_low()?;
//! # Ok(())
//! # }
//! ```
use embedded_hal::digital::PinState;
use gpiosysfs::{Direction, Number, Pin, Sysfs};

/// Provides [`embedded_hal::digital`] traits for a [`gpiosysfs::Pin`]
/// configured as an input.
///
/// Holding the [`InputPin`] grants exclusive access to the pin.
///
/// Dropping the [`InputPin`] unexports the pin.
#[derive(Debug)]
pub struct InputPin(Pin);

impl InputPin {
    /// Claims the pin with the given `number` from the default sysfs as an input.
    ///
    /// ```no_run
    /// # fn example() -> Result<(), gpiosysfs_embedded_hal::Error> {
    /// use embedded_hal::digital::InputPin;
    ///
    /// let mut pin = gpiosysfs_embedded_hal::InputPin::new(4)?;
    /// if pin.is_low()? {
    ///     println!("Input is low.");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(number: Number) -> Result<Self, Error> {
        Self::with_sysfs(Sysfs::default(), number)
    }

    /// Claims the pin with the given `number` from the given `sysfs` as an input.
    pub fn with_sysfs(sysfs: Sysfs, number: Number) -> Result<Self, Error> {
        let pin = Pin::with_sysfs(sysfs, number, Direction::Input)?;
        Ok(InputPin(pin))
    }

    /// The number of the pin.
    pub fn number(&self) -> Number {
        self.0.number()
    }
}

impl TryFrom<Pin> for InputPin {
    type Error = Error;

    /// Convert an input [`gpiosysfs::Pin`] into an [`InputPin`].
    ///
    /// If the pin is not an input then it is dropped, and so released.
    fn try_from(pin: Pin) -> Result<Self, Self::Error> {
        if pin.direction() != Direction::Input {
            return Err(Error::RequiresInputMode);
        }
        Ok(InputPin(pin))
    }
}

impl From<InputPin> for Pin {
    /// Convert the [`InputPin`] into the contained [`Pin`].
    fn from(pin: InputPin) -> Self {
        pin.0
    }
}

impl embedded_hal::digital::InputPin for InputPin {
    #[inline]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.value()?)
    }

    #[inline]
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_high()?)
    }
}

impl embedded_hal::digital::ErrorType for InputPin {
    /// Errors returned by [`InputPin`].
    type Error = Error;
}

/// Provides [`embedded_hal::digital`] traits for a [`gpiosysfs::Pin`]
/// configured as an output.
///
/// Holding the [`OutputPin`] grants exclusive access to the pin.
///
/// Dropping the [`OutputPin`] drives the pin low and unexports it.
#[derive(Debug)]
pub struct OutputPin {
    pin: Pin,
    // last state successfully written, if any
    state: Option<PinState>,
}

impl OutputPin {
    /// Claims the pin with the given `number` from the default sysfs as an
    /// output, and drives it to `state`.
    ///
    /// ```no_run
    /// # fn example() -> Result<(), gpiosysfs_embedded_hal::Error> {
    /// use embedded_hal::digital::{OutputPin, PinState};
    ///
    /// let mut pin = gpiosysfs_embedded_hal::OutputPin::new(17, PinState::Low)?;
    /// // later...
    /// pin.set_high()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(number: Number, state: PinState) -> Result<Self, Error> {
        Self::with_sysfs(Sysfs::default(), number, state)
    }

    /// Claims the pin with the given `number` from the given `sysfs` as an
    /// output, and drives it to `state`.
    pub fn with_sysfs(sysfs: Sysfs, number: Number, state: PinState) -> Result<Self, Error> {
        let pin = Pin::with_sysfs(sysfs, number, Direction::Output)?;
        let mut pin = OutputPin { pin, state: None };
        embedded_hal::digital::OutputPin::set_state(&mut pin, state)?;
        Ok(pin)
    }

    /// The number of the pin.
    pub fn number(&self) -> Number {
        self.pin.number()
    }
}

impl TryFrom<Pin> for OutputPin {
    type Error = Error;

    /// Convert an output [`gpiosysfs::Pin`] into an [`OutputPin`].
    ///
    /// The level of the pin is left unchanged, and is unknown until first set.
    ///
    /// If the pin is not an output then it is dropped, and so released.
    fn try_from(pin: Pin) -> Result<Self, Self::Error> {
        if pin.direction() != Direction::Output {
            return Err(Error::RequiresOutputMode);
        }
        Ok(OutputPin { pin, state: None })
    }
}

impl From<OutputPin> for Pin {
    /// Convert the [`OutputPin`] into the contained [`Pin`].
    fn from(pin: OutputPin) -> Self {
        pin.pin
    }
}

impl embedded_hal::digital::OutputPin for OutputPin {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_state(PinState::Low)
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_state(PinState::High)
    }

    fn set_state(&mut self, state: PinState) -> Result<(), Error> {
        if self.state != Some(state) {
            self.pin.set_value(state_to_value(state))?;
            self.state = Some(state);
        }
        Ok(())
    }
}

impl embedded_hal::digital::StatefulOutputPin for OutputPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state == Some(PinState::High))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state == Some(PinState::Low))
    }

    /// Toggle the pin, driving it high if its state is not yet known.
    fn toggle(&mut self) -> Result<(), Self::Error> {
        let state = match self.state {
            Some(PinState::High) => PinState::Low,
            _ => PinState::High,
        };
        self.pin.set_value(state_to_value(state))?;
        self.state = Some(state);
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for OutputPin {
    /// Errors returned by [`OutputPin`].
    type Error = Error;
}

/// Converts a [`PinState`] to the value written to sysfs.
fn state_to_value(state: PinState) -> bool {
    match state {
        PinState::High => true,
        PinState::Low => false,
    }
}

/// Errors returned by [`gpiosysfs_embedded_hal`](crate) types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// InputPins must be in input mode.
    #[error("Pin must be in input mode")]
    RequiresInputMode,

    /// OutputPins must be in output mode.
    #[error("Pin must be in output mode")]
    RequiresOutputMode,

    /// An error returned from an underlying gpiosysfs call.
    #[error(transparent)]
    Sysfs(gpiosysfs::Error),
}

impl From<gpiosysfs::Error> for Error {
    fn from(err: gpiosysfs::Error) -> Self {
        Self::Sysfs(err)
    }
}

impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_values() {
        assert!(state_to_value(PinState::High));
        assert!(!state_to_value(PinState::Low));
    }

    #[test]
    fn error_kind() {
        use embedded_hal::digital::Error as _;

        assert_eq!(
            Error::RequiresOutputMode.kind(),
            embedded_hal::digital::ErrorKind::Other
        );
        assert_eq!(
            Error::from(gpiosysfs::Error::GetOnOutput(3)).to_string(),
            "Cannot call get on output pin [3]."
        );
    }

    #[test]
    fn sysfs_error_not_repeated() {
        use std::error::Error as _;

        let err = Error::from(gpiosysfs::Error::Write {
            path: "/sys/class/gpio/gpio5/value".into(),
            value: "1".into(),
            source: std::io::ErrorKind::NotFound.into(),
        });
        assert_eq!(
            err.to_string(),
            "Unable to write [1] to [/sys/class/gpio/gpio5/value]"
        );
        // the chain skips straight to the I/O cause
        let source = err.source().unwrap();
        assert!(source.downcast_ref::<std::io::Error>().is_some());
        assert!(source.source().is_none());
    }
}
