// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Direction, Error, Number, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The default location of the sysfs GPIO class.
pub const DEFAULT_ROOT: &str = "/sys/class/gpio";

/// The sysfs GPIO control surface.
///
/// For a pin `P` the surface provides:
///  - `export` and `unexport`, which accept the numeral of `P`,
///  - `gpioP/direction`, which accepts `in` or `out`,
///  - `gpioP/value`, which accepts `1` or `0` for outputs and reports the
///    level of inputs.
///
/// The surface is rooted at [`DEFAULT_ROOT`] unless otherwise specified.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sysfs {
    root: PathBuf,
}

impl Default for Sysfs {
    fn default() -> Self {
        Sysfs {
            root: DEFAULT_ROOT.into(),
        }
    }
}

impl Sysfs {
    /// A control surface rooted at the given directory.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Sysfs { root: root.into() }
    }

    /// The root directory of the control surface.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path of the export control point.
    pub fn export_path(&self) -> PathBuf {
        self.root.join("export")
    }

    /// The path of the unexport control point.
    pub fn unexport_path(&self) -> PathBuf {
        self.root.join("unexport")
    }

    /// The directory created for a pin when it is exported.
    pub fn pin_dir(&self, pin: Number) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }

    /// The path of the direction control point for a pin.
    pub fn direction_path(&self, pin: Number) -> PathBuf {
        self.pin_dir(pin).join("direction")
    }

    /// The path of the value control point for a pin.
    pub fn value_path(&self, pin: Number) -> PathBuf {
        self.pin_dir(pin).join("value")
    }

    /// Claim the pin for control through sysfs.
    pub fn export(&self, pin: Number) -> Result<()> {
        write_attr(&self.export_path(), &pin.to_string())
    }

    /// Release the pin from control through sysfs.
    pub fn unexport(&self, pin: Number) -> Result<()> {
        write_attr(&self.unexport_path(), &pin.to_string())
    }

    /// Returns true if the pin is currently exported.
    pub fn is_exported(&self, pin: Number) -> bool {
        self.pin_dir(pin).exists()
    }

    /// Configure the direction of an exported pin.
    pub fn set_direction(&self, pin: Number, direction: Direction) -> Result<()> {
        write_attr(&self.direction_path(pin), direction.as_str())
    }

    /// Drive an exported output pin high (`true`) or low (`false`).
    pub fn write_value(&self, pin: Number, on: bool) -> Result<()> {
        write_attr(&self.value_path(pin), if on { "1" } else { "0" })
    }

    /// Sense the level of an exported input pin.
    ///
    /// Leading and trailing whitespace is ignored, so both `1` and the
    /// `1\n` reported by the kernel are high. Anything else, including
    /// content that is not text, is low.
    pub fn read_value(&self, pin: Number) -> Result<bool> {
        Ok(read_attr(&self.value_path(pin))? == "1")
    }
}

// Control points are never created - they either exist or the write fails,
// as with the real sysfs.
fn write_attr(path: &Path, value: &str) -> Result<()> {
    log::debug!("write \"{}\" to {}", value, path.display());
    OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .and_then(|mut f| f.write_all(value.as_bytes()))
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            value: value.into(),
            source,
        })
}

// Only failing to open or read is an error - the content is taken as is.
fn read_attr(path: &Path) -> Result<String> {
    fs::read(path)
        .map(|buf| String::from_utf8_lossy(&buf).trim().to_string())
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })
}
