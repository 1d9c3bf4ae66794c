// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("'{0}' unknown units - use 's', 'ms' or 'us'.")]
    Units(String),
    #[error("'{0}' must start with a digit")]
    NoDigits(String),
    #[error("'{0}' {1}")]
    ParseDigits(String, std::num::ParseIntError),
}

// A bare number is taken as milliseconds.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, ParseDurationError> {
    let (num, units) = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(0) => return Err(ParseDurationError::NoDigits(s.into())),
        Some(n) => s.split_at(n),
        None => (s, "ms"),
    };
    let t = num
        .parse::<u64>()
        .map_err(|e| ParseDurationError::ParseDigits(num.into(), e))?;
    match units {
        "us" => Ok(Duration::from_micros(t)),
        "ms" => Ok(Duration::from_millis(t)),
        "s" => Ok(Duration::from_secs(t)),
        _ => Err(ParseDurationError::Units(s.into())),
    }
}
