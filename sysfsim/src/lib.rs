// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for simulating the Linux sysfs GPIO interface.
//!
//! The simulator is a scratch directory laid out like `/sys/class/gpio`,
//! with `export` and `unexport` control points and a `gpioN` directory,
//! containing `direction` and `value`, for each simulated pin.
//!
//! Unlike the kernel, the simulator does not react to writes.
//! The pin directories exist from the start and every control point simply
//! retains the last value written to it, so tests can inspect what was
//! written after the fact.
//!
//! Simulators can be built using the [`Builder`].
//!
//! For simple tests that only require one pin, [`simpleton`] provides a
//! simulator directly.
//!
//! The simulator is removed when dropped.
//!
//! [`Builder`]: fn.builder.html
//! [`simpleton`]: fn.simpleton.html

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The number of a simulated pin.
pub type Number = u32;

/// A live simulated sysfs GPIO tree.
#[derive(Debug)]
pub struct Sim {
    /// The scratch directory standing in for `/sys/class/gpio`.
    dir: TempDir,

    /// The simulated pins.
    pins: Vec<Number>,
}

impl Sim {
    /// The root of the simulated tree.
    ///
    /// This is the directory to use in place of `/sys/class/gpio`.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// The simulated pins.
    pub fn pins(&self) -> &[Number] {
        self.pins.as_slice()
    }

    /// The path of the value control point for a pin.
    pub fn value_path(&self, pin: Number) -> PathBuf {
        self.pin_dir(pin).join("value")
    }

    /// The path of the direction control point for a pin.
    pub fn direction_path(&self, pin: Number) -> PathBuf {
        self.pin_dir(pin).join("direction")
    }

    /// The last value written to the export control point.
    pub fn exported(&self) -> Result<String> {
        read_attr(self.root(), "export")
    }

    /// The last value written to the unexport control point.
    pub fn unexported(&self) -> Result<String> {
        read_attr(self.root(), "unexport")
    }

    /// The last direction written for a pin.
    ///
    /// Empty if the direction has never been written.
    pub fn direction(&self, pin: Number) -> Result<String> {
        read_attr(&self.pin_dir(pin), "direction")
    }

    /// The last level written to an output pin.
    pub fn get_level(&self, pin: Number) -> Result<Level> {
        let val = read_attr(&self.pin_dir(pin), "value")?;
        match val.as_str() {
            "0" => Ok(Level::Low),
            "1" => Ok(Level::High),
            _ => Err(Error::UnexpectedValue(val)),
        }
    }

    /// Drive an input pin to simulate the line being externally driven.
    ///
    /// The level is reported the way the kernel does, with a trailing newline.
    pub fn set_level(&self, pin: Number, level: Level) -> Result<()> {
        let value = match level {
            Level::Low => "0\n",
            Level::High => "1\n",
        };
        self.set_raw_value(pin, value)
    }

    /// Replace the content of the value control point for a pin verbatim.
    pub fn set_raw_value<D: AsRef<[u8]>>(&self, pin: Number, value: D) -> Result<()> {
        write_attr(&self.pin_dir(pin), "value", value)
    }

    /// Remove the value control point of a pin so accesses to it fail.
    pub fn remove_value(&self, pin: Number) -> Result<()> {
        fs::remove_file(self.value_path(pin)).map_err(Error::IoError)
    }

    /// Restore a removed value control point, empty.
    pub fn restore_value(&self, pin: Number) -> Result<()> {
        self.set_raw_value(pin, "")
    }

    fn pin_dir(&self, pin: Number) -> PathBuf {
        self.root().join(format!("gpio{}", pin))
    }

    fn setup(&self, cfg: &Builder) -> Result<()> {
        let root = self.root();
        for cp in [ControlPoint::Export, ControlPoint::Unexport] {
            if !cfg.missing.contains(&cp) {
                write_attr(root, cp.file_name(), "")?;
            }
        }
        for pin in &self.pins {
            let pin_dir = self.pin_dir(*pin);
            fs::create_dir(&pin_dir)?;
            for cp in [ControlPoint::Direction, ControlPoint::Value] {
                if !cfg.missing.contains(&cp) {
                    write_attr(&pin_dir, cp.file_name(), "")?;
                }
            }
        }
        Ok(())
    }
}

/// Start building a sysfs simulator.
pub fn builder() -> Builder {
    Builder::default()
}

/// Build a simulator with a single pin and take it live.
///
/// This is sufficient for tests that do not need to break control points.
pub fn simpleton(pin: Number) -> Sim {
    builder().with_pin(pin).live().unwrap()
}

/// A builder of simulators.
///
/// Collects the configuration for the simulator, and then creates
/// the simulator when taken live.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Builder {
    /// The pins to be simulated.
    pub pins: Vec<Number>,

    /// Control points left out of the tree, so accessing them fails.
    pub missing: Vec<ControlPoint>,
}

impl Builder {
    /// Add a pin to the simulation.
    pub fn with_pin(&mut self, pin: Number) -> &mut Self {
        if !self.pins.contains(&pin) {
            self.pins.push(pin);
        }
        self
    }

    /// Leave a control point out of the simulated tree.
    ///
    /// For per-pin control points this applies to all simulated pins.
    pub fn without(&mut self, cp: ControlPoint) -> &mut Self {
        if !self.missing.contains(&cp) {
            self.missing.push(cp);
        }
        self
    }

    /// Create the simulated tree in a fresh scratch directory.
    pub fn live(&self) -> Result<Sim> {
        let dir = tempfile::Builder::new().prefix("sysfsim-").tempdir()?;
        let sim = Sim {
            dir,
            pins: self.pins.clone(),
        };
        sim.setup(self)?;
        Ok(sim)
    }
}

/// The control points of the sysfs GPIO interface.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlPoint {
    /// Claims a pin.
    Export,

    /// Releases a pin.
    Unexport,

    /// Sets the direction of a pin.
    Direction,

    /// Sets or gets the level of a pin.
    Value,
}

impl ControlPoint {
    fn file_name(&self) -> &'static str {
        match self {
            ControlPoint::Export => "export",
            ControlPoint::Unexport => "unexport",
            ControlPoint::Direction => "direction",
            ControlPoint::Value => "value",
        }
    }
}

/// The physical value of a pin.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    /// The pin is physically high.
    High,

    /// The pin is physically low.
    Low,
}

// Helper to write to simulated control points.
fn write_attr<D: AsRef<[u8]>>(p: &Path, file: &str, data: D) -> Result<()> {
    let path = p.join(file);
    fs::write(path, data).map_err(Error::IoError)
}

// Helper to read back simulated control points.
fn read_attr(p: &Path, file: &str) -> Result<String> {
    let path = p.join(file);
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(Error::IoError)
}

/// The result for [`sysfsim`] functions.
///
/// [`sysfsim`]: crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`sysfsim`] functions.
///
/// [`sysfsim`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An unexpected value was read from a control point.
    #[error("Read unexpected attr value {0:?}")]
    UnexpectedValue(String),

    /// An IO error detected while accessing the simulated tree.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_default() {
        let b = Builder::default();
        assert!(b.pins.is_empty());
        assert!(b.missing.is_empty());
    }

    #[test]
    fn builder_with_pin() {
        let mut b = builder();
        b.with_pin(5).with_pin(17).with_pin(5);
        assert_eq!(b.pins, vec![5, 17]);
    }

    #[test]
    fn builder_without() {
        let mut b = builder();
        b.without(ControlPoint::Export)
            .without(ControlPoint::Value)
            .without(ControlPoint::Export);
        assert_eq!(b.missing, vec![ControlPoint::Export, ControlPoint::Value]);
    }

    #[test]
    fn live_tree() {
        let s = builder().with_pin(3).with_pin(12).live().unwrap();
        assert_eq!(s.pins(), &[3, 12]);
        assert!(s.root().join("export").is_file());
        assert!(s.root().join("unexport").is_file());
        assert!(s.direction_path(3).is_file());
        assert!(s.value_path(12).is_file());
        assert_eq!(s.exported().unwrap(), "");
        assert_eq!(s.direction(3).unwrap(), "");
    }

    #[test]
    fn live_tree_missing() {
        let s = builder()
            .with_pin(3)
            .without(ControlPoint::Export)
            .without(ControlPoint::Direction)
            .live()
            .unwrap();
        assert!(!s.root().join("export").exists());
        assert!(s.root().join("unexport").is_file());
        assert!(!s.direction_path(3).exists());
        assert!(s.value_path(3).is_file());
    }

    #[test]
    fn levels() {
        let s = simpleton(4);
        s.set_level(4, Level::High).unwrap();
        assert_eq!(s.get_level(4).unwrap(), Level::High);
        s.set_level(4, Level::Low).unwrap();
        assert_eq!(s.get_level(4).unwrap(), Level::Low);
        s.set_raw_value(4, "maybe").unwrap();
        assert!(matches!(s.get_level(4), Err(Error::UnexpectedValue(v)) if v == "maybe"));
    }

    #[test]
    fn remove_and_restore_value() {
        let s = simpleton(4);
        s.remove_value(4).unwrap();
        assert!(!s.value_path(4).exists());
        s.restore_value(4).unwrap();
        assert!(s.value_path(4).is_file());
    }

    #[test]
    fn dropped_sim_is_removed() {
        let s = simpleton(4);
        let root = s.root().to_path_buf();
        assert!(root.exists());
        drop(s);
        assert!(!root.exists());
    }
}
