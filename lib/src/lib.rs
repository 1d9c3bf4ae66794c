// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for accessing GPIO pins on Linux platforms
//! using the sysfs GPIO interface.
//!
//! A [`Pin`] claims a single pin for its lifetime. Constructing it exports
//! the pin and configures its direction, and dropping it releases the pin
//! again, driving outputs low first.
//!
//! The sysfs tree the pin is controlled through is described by a
//! [`Sysfs`], which defaults to `/sys/class/gpio`.
//!
//! Toggling an output pin:
//! ```no_run
//! # fn main() -> gpiosysfs::Result<()> {
//! use gpiosysfs::Pin;
//!
//! let led = Pin::output(5)?;
//! led.set_value(true)?;
//! led.set_value(false)?;
//! // led is set low and unexported when dropped
//! # Ok(())
//! # }
//! ```
//!
//! Reading an input pin:
//! ```no_run
//! # fn main() -> gpiosysfs::Result<()> {
//! use gpiosysfs::Pin;
//!
//! let button = Pin::input(4)?;
//! if button.value()? {
//!     println!("button is pressed");
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::PathBuf;

/// The pin controller.
mod pin;
pub use pin::Pin;

/// The sysfs control surface.
pub mod sysfs;
pub use sysfs::Sysfs;

/// The number identifying a pin in the sysfs GPIO space.
///
/// This is the global GPIO number, not the offset of the line on its chip.
pub type Number = u32;

/// The direction of a pin.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// The pin senses the level of the line.
    Input,

    /// The pin drives the level of the line.
    Output,
}

impl Direction {
    /// The text written to the direction control point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Input => "in",
            Direction::Output => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "input"),
            Direction::Output => write!(f, "output"),
        }
    }
}

/// The broad class of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The pin was used in a way its direction does not permit.
    ///
    /// No I/O was attempted.
    Usage,

    /// Accessing a control point failed.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ErrorKind::Usage => "usage error",
            ErrorKind::Io => "I/O error",
        };
        write!(f, "{}", msg)
    }
}

/// Errors returned by [`gpiosysfs`] functions.
///
/// [`gpiosysfs`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The value of an input pin cannot be set.
    #[error("Cannot call set on input pin [{0}].")]
    SetOnInput(Number),

    /// The value of an output pin cannot be read.
    #[error("Cannot call get on output pin [{0}].")]
    GetOnOutput(Number),

    /// Writing to a control point failed.
    #[error("Unable to write [{value}] to [{}]", path.display())]
    Write {
        path: PathBuf,
        value: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from a control point failed.
    #[error("Unable to read [{}]", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The class of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SetOnInput(_) | Error::GetOnOutput(_) => ErrorKind::Usage,
            Error::Write { .. } | Error::Read { .. } => ErrorKind::Io,
        }
    }

    /// Returns true if the error is a misuse of the API rather than an I/O failure.
    pub fn is_usage(&self) -> bool {
        self.kind() == ErrorKind::Usage
    }
}

/// The result for [`gpiosysfs`] functions.
///
/// [`gpiosysfs`]: crate
pub type Result<T> = std::result::Result<T, Error>;
