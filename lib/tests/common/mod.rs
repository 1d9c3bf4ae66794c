// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use gpiosysfs::Sysfs;
use sysfsim::Sim;

// the control surface of the simulated tree
pub fn sysfs(s: &Sim) -> Sysfs {
    Sysfs::new(s.root())
}
