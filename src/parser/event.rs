//! Typed trace events.
//!
//! A trace line is a label token followed by an integer operand. The two
//! tokens may be separated by a comma (`"SYSCALL, 2"`) or by whitespace
//! (`"SYSCALL 2"`).

use crate::utils::error::ParseError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const LABEL_CPU: &str = "CPU";
pub const LABEL_SYSCALL: &str = "SYSCALL";
pub const LABEL_END_IO: &str = "END_IO";

/// One parsed activity from the trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "operand")]
pub enum TraceEvent {
    /// CPU executes user code for `duration` time units
    CpuBurst(u64),

    /// System call serviced by the given device
    SyscallDevice(i64),

    /// I/O completion interrupt raised by the given device
    EndIoDevice(i64),

    /// Any other label; recorded but not simulated
    Unknown(String),
}

impl TraceEvent {
    /// Short name used in logs and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            TraceEvent::CpuBurst(_) => LABEL_CPU,
            TraceEvent::SyscallDevice(_) => LABEL_SYSCALL,
            TraceEvent::EndIoDevice(_) => LABEL_END_IO,
            TraceEvent::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::CpuBurst(d) => write!(f, "{}, {}", LABEL_CPU, d),
            TraceEvent::SyscallDevice(dev) => write!(f, "{}, {}", LABEL_SYSCALL, dev),
            TraceEvent::EndIoDevice(dev) => write!(f, "{}, {}", LABEL_END_IO, dev),
            TraceEvent::Unknown(label) => write!(f, "{}", label),
        }
    }
}

impl FromStr for TraceEvent {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s)
    }
}

/// Parse a single non-empty trace line into an event
///
/// **Public** - main entry point for line parsing
///
/// # Errors
/// * `ParseError::MissingOperand` - fewer than two tokens
/// * `ParseError::InvalidOperand` - operand is not an integer
/// * `ParseError::NegativeDuration` - CPU burst with a negative duration
pub fn parse_line(line: &str) -> Result<TraceEvent, ParseError> {
    let mut tokens = tokenize(line);

    let (label, operand) = match (tokens.next(), tokens.next()) {
        (Some(label), Some(operand)) => (label, operand),
        _ => return Err(ParseError::MissingOperand(line.trim().to_string())),
    };

    let extra = tokens.count();
    if extra > 0 {
        debug!("Ignoring {} trailing token(s) in line {:?}", extra, line);
    }

    let value = operand
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidOperand {
            line: line.trim().to_string(),
            operand: operand.to_string(),
        })?;

    let event = match label {
        LABEL_CPU => {
            let duration = u64::try_from(value).map_err(|_| ParseError::NegativeDuration(value))?;
            TraceEvent::CpuBurst(duration)
        }
        LABEL_SYSCALL => TraceEvent::SyscallDevice(value),
        LABEL_END_IO => TraceEvent::EndIoDevice(value),
        other => TraceEvent::Unknown(other.to_string()),
    };

    Ok(event)
}

/// Split on commas and whitespace, dropping empty tokens
///
/// **Private** - internal helper for parse_line
fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}
