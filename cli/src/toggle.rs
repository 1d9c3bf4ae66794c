// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{Context, Result};
use embedded_hal::digital::{OutputPin, PinState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Toggle the pin, starting high, until `running` is cleared.
///
/// The flag is checked before each set, so at most one set and one period
/// elapse once it is cleared.
pub fn toggle<P>(pin: &mut P, running: &AtomicBool, period: Duration) -> Result<()>
where
    P: OutputPin,
    P::Error: std::error::Error + Send + Sync + 'static,
{
    let mut state = PinState::High;
    while running.load(Ordering::SeqCst) {
        pin.set_state(state).context("unable to set pin")?;
        state = match state {
            PinState::High => PinState::Low,
            PinState::Low => PinState::High,
        };
        thread::sleep(period);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;
    use std::convert::Infallible;

    // Records the states set, and clears the flag on the nth set to
    // simulate an interrupt arriving mid-iteration.
    struct Recorder<'a> {
        states: Vec<PinState>,
        interrupt_at: usize,
        running: &'a AtomicBool,
    }

    impl<'a> Recorder<'a> {
        fn new(interrupt_at: usize, running: &'a AtomicBool) -> Self {
            Recorder {
                states: Vec::new(),
                interrupt_at,
                running,
            }
        }

        fn record(&mut self, state: PinState) {
            self.states.push(state);
            if self.states.len() == self.interrupt_at {
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }

    impl ErrorType for Recorder<'_> {
        type Error = Infallible;
    }

    impl OutputPin for Recorder<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.record(PinState::Low);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.record(PinState::High);
            Ok(())
        }
    }

    struct Broken {
        sets: usize,
    }

    impl ErrorType for Broken {
        type Error = gpiosysfs_embedded_hal::Error;
    }

    impl OutputPin for Broken {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.sets += 1;
            Err(gpiosysfs::Error::SetOnInput(5).into())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.sets += 1;
            Err(gpiosysfs::Error::SetOnInput(5).into())
        }
    }

    #[test]
    fn alternates_starting_high() {
        let running = AtomicBool::new(true);
        let mut pin = Recorder::new(4, &running);

        toggle(&mut pin, &running, Duration::ZERO).unwrap();
        assert_eq!(
            pin.states,
            vec![PinState::High, PinState::Low, PinState::High, PinState::Low]
        );
    }

    #[test]
    fn stops_within_one_iteration() {
        let running = AtomicBool::new(true);
        let mut pin = Recorder::new(1, &running);

        toggle(&mut pin, &running, Duration::from_millis(1)).unwrap();
        assert_eq!(pin.states, vec![PinState::High]);
    }

    #[test]
    fn not_running() {
        let running = AtomicBool::new(false);
        let mut pin = Recorder::new(1, &running);

        toggle(&mut pin, &running, Duration::ZERO).unwrap();
        assert!(pin.states.is_empty());
    }

    #[test]
    fn set_error_aborts() {
        let running = AtomicBool::new(true);
        let mut pin = Broken { sets: 0 };

        let err = toggle(&mut pin, &running, Duration::ZERO).unwrap_err();
        assert_eq!(pin.sets, 1);
        assert_eq!(err.to_string(), "unable to set pin");
        assert!(running.load(Ordering::SeqCst));
    }

    #[test]
    fn sysfs_pin() {
        use gpiosysfs::{Direction, Pin, Sysfs};
        use gpiosysfs_embedded_hal::OutputPin as SysfsOutputPin;
        use std::sync::Arc;
        use sysfsim::Level;

        let s = sysfsim::simpleton(5);
        let pin = Pin::with_sysfs(Sysfs::new(s.root()), 5, Direction::Output).unwrap();
        let mut pin = SysfsOutputPin::try_from(pin).unwrap();
        let running = Arc::new(AtomicBool::new(true));

        let stopper = {
            let running = running.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                running.store(false, Ordering::SeqCst);
            })
        };
        toggle(&mut pin, &running, Duration::from_millis(1)).unwrap();
        stopper.join().unwrap();

        assert_eq!(s.exported().unwrap(), "5");
        assert_eq!(s.direction(5).unwrap(), "out");
        drop(pin);
        assert_eq!(s.get_level(5).unwrap(), Level::Low);
        assert_eq!(s.unexported().unwrap(), "5");
    }
}
