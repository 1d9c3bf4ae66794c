// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::atomic::{AtomicBool, Ordering};

// Cleared only by the SIGINT handler, once armed.
static RUNNING: AtomicBool = AtomicBool::new(true);

/// The flag cleared when the process is interrupted.
pub fn running() -> &'static AtomicBool {
    &RUNNING
}

// Only async-signal-safe calls are permitted here.
extern "C" fn handle_sigint(_sig: libc::c_int) {
    const MSG: &[u8] = b"CTRL-C caught\n";
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            MSG.as_ptr() as *const libc::c_void,
            MSG.len(),
        );
    }
    RUNNING.store(false, Ordering::SeqCst);
}

/// Arm the running flag and install the SIGINT handler that clears it.
pub fn register() -> std::io::Result<()> {
    RUNNING.store(true, Ordering::SeqCst);
    let handler = handle_sigint as extern "C" fn(libc::c_int);
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = handler as libc::sighandler_t;
        sa.sa_flags = 0;
        libc::sigemptyset(&mut sa.sa_mask);
        if libc::sigaction(libc::SIGINT, &sa, std::ptr::null_mut()) == -1 {
            return Err(std::io::Error::last_os_error());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigint_clears_running() {
        register().unwrap();
        assert!(running().load(Ordering::SeqCst));
        unsafe {
            assert_eq!(libc::raise(libc::SIGINT), 0);
        }
        assert!(!running().load(Ordering::SeqCst));
        // rearming restores the flag
        register().unwrap();
        assert!(running().load(Ordering::SeqCst));
    }
}
