//! Pin event masks
//!
//! Pin events are delivered as `(pin, EdgeEvents)`. The bit layout follows
//! the RP2040 GPIO interrupt status register so a mask read from hardware
//! can be passed through unchanged.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// Event bit names in bit order
const EVENT_NAMES: [&str; 4] = ["LEVEL_LOW", "LEVEL_HIGH", "EDGE_FALL", "EDGE_RISE"];

/// Set of edge/level events reported for a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeEvents(u32);

impl EdgeEvents {
    pub const NONE: Self = Self(0);
    pub const LEVEL_LOW: Self = Self(0x1);
    pub const LEVEL_HIGH: Self = Self(0x2);
    pub const EDGE_FALL: Self = Self(0x4);
    pub const EDGE_RISE: Self = Self(0x8);
    /// Either edge
    pub const EDGE_ANY: Self = Self(0x4 | 0x8);

    /// Build from a raw mask; unknown bits are dropped
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & 0xF)
    }

    /// All bits of `other` are set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// At least one bit of `other` is set
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Edge mask for a transition that ended at `high`
    pub const fn edge_to(high: bool) -> Self {
        if high {
            Self::EDGE_RISE
        } else {
            Self::EDGE_FALL
        }
    }

    /// Same events seen through an inverting input
    ///
    /// Swaps `LEVEL_LOW`/`LEVEL_HIGH` and `EDGE_FALL`/`EDGE_RISE`, turning an
    /// electrical mask into an asserted/deasserted one for active-low pins.
    pub const fn inverted(self) -> Self {
        let low = self.0 & 0x5;
        let high = self.0 & 0xA;
        Self((low << 1) | (high >> 1))
    }
}

impl BitOr for EdgeEvents {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EdgeEvents {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Renders as `"EDGE_FALL, EDGE_RISE"`; an empty mask renders as nothing
impl fmt::Display for EdgeEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, name) in EVENT_NAMES.iter().enumerate() {
            if self.0 & (1 << i) != 0 {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EdgeEvents {
    fn format(&self, f: defmt::Formatter) {
        let mut first = true;
        for (i, name) in EVENT_NAMES.iter().enumerate() {
            if self.0 & (1 << i) != 0 {
                if !first {
                    defmt::write!(f, ", ");
                }
                defmt::write!(f, "{=str}", *name);
                first = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    /// Fixed-size string sink for formatting without alloc
    struct Buf {
        data: [u8; 64],
        len: usize,
    }

    impl Buf {
        fn new() -> Self {
            Self { data: [0; 64], len: 0 }
        }

        fn as_str(&self) -> &str {
            core::str::from_utf8(&self.data[..self.len]).unwrap()
        }
    }

    impl Write for Buf {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let bytes = s.as_bytes();
            let end = self.len + bytes.len();
            if end > self.data.len() {
                return Err(fmt::Error);
            }
            self.data[self.len..end].copy_from_slice(bytes);
            self.len = end;
            Ok(())
        }
    }

    fn render(events: EdgeEvents) -> Buf {
        let mut buf = Buf::new();
        write!(buf, "{}", events).unwrap();
        buf
    }

    #[test]
    fn test_render_single() {
        assert_eq!(render(EdgeEvents::EDGE_RISE).as_str(), "EDGE_RISE");
        assert_eq!(render(EdgeEvents::LEVEL_LOW).as_str(), "LEVEL_LOW");
    }

    #[test]
    fn test_render_multiple_in_bit_order() {
        let events = EdgeEvents::EDGE_RISE | EdgeEvents::LEVEL_HIGH;
        assert_eq!(render(events).as_str(), "LEVEL_HIGH, EDGE_RISE");

        let all = EdgeEvents::from_bits(0xF);
        assert_eq!(
            render(all).as_str(),
            "LEVEL_LOW, LEVEL_HIGH, EDGE_FALL, EDGE_RISE"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(EdgeEvents::NONE).as_str(), "");
    }

    #[test]
    fn test_from_bits_masks_unknown() {
        assert_eq!(EdgeEvents::from_bits(0xF8), EdgeEvents::EDGE_RISE);
    }

    #[test]
    fn test_contains_and_intersects() {
        let any = EdgeEvents::EDGE_ANY;
        assert!(any.contains(EdgeEvents::EDGE_RISE));
        assert!(any.contains(EdgeEvents::EDGE_FALL));
        assert!(!EdgeEvents::EDGE_RISE.contains(any));
        assert!(EdgeEvents::EDGE_RISE.intersects(any));
        assert!(!EdgeEvents::LEVEL_HIGH.intersects(any));
    }

    #[test]
    fn test_edge_to() {
        assert_eq!(EdgeEvents::edge_to(true), EdgeEvents::EDGE_RISE);
        assert_eq!(EdgeEvents::edge_to(false), EdgeEvents::EDGE_FALL);
    }

    #[test]
    fn test_inverted() {
        assert_eq!(EdgeEvents::EDGE_FALL.inverted(), EdgeEvents::EDGE_RISE);
        assert_eq!(EdgeEvents::LEVEL_HIGH.inverted(), EdgeEvents::LEVEL_LOW);
        assert_eq!(EdgeEvents::EDGE_ANY.inverted(), EdgeEvents::EDGE_ANY);
        assert_eq!(
            (EdgeEvents::EDGE_RISE | EdgeEvents::LEVEL_HIGH).inverted(),
            EdgeEvents::EDGE_FALL | EdgeEvents::LEVEL_LOW
        );
    }
}
