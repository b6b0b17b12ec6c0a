//! Codec between the vendor's comma-and-dash port string ("80,443,1000-2000")
//! and an ordered list of [`PortRange`]s.
//!
//! Shared by the firewall rule translator and cloud IP forwarding-rule ids.
//! Decode is total over well-formed segments and fails loudly otherwise;
//! encode always emits the canonical form, so decode∘encode is the identity
//! on decoded values.

use crate::core::PortRange;
use crate::error::{Result, StratusError};

/// Decodes a delimited port string into its ranges, preserving order.
///
/// Each comma-separated segment must be either a bare integer or a
/// `start-end` pair with `start <= end`; anything else is an
/// `InvalidPortRange` error naming the offending segment.
pub fn decode(s: &str) -> Result<Vec<PortRange>> {
    s.split(',').map(decode_segment).collect()
}

/// Encodes ranges back into the vendor string form. Single-port ranges
/// collapse to a bare integer.
pub fn encode(ranges: &[PortRange]) -> String {
    ranges
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn decode_segment(segment: &str) -> Result<PortRange> {
    let invalid = |reason: &str| {
        StratusError::InvalidPortRange(segment.to_string(), reason.to_string())
    };

    match segment.split_once('-') {
        Some((start, end)) => {
            let start: u16 = start
                .trim()
                .parse()
                .map_err(|_| invalid("start is not a port number"))?;
            let end: u16 = end
                .trim()
                .parse()
                .map_err(|_| invalid("end is not a port number"))?;
            PortRange::new(start, end)
        }
        None => {
            let port: u16 = segment
                .trim()
                .parse()
                .map_err(|_| invalid("not a port number"))?;
            Ok(PortRange::single(port))
        }
    }
}
