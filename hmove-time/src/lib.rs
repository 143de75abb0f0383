// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Unsigned time management
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

use hmove_serialization::{SerializeError, Serializer, U256WordSerializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time structure used everywhere.
/// seconds since 01/01/1970, the resolution of block timestamps.
#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HMoveTime(u64);

/// Serializer for `HMoveTime` as a 32-byte big-endian word
#[derive(Default, Clone)]
pub struct HMoveTimeSerializer {
    word_serializer: U256WordSerializer,
}

impl HMoveTimeSerializer {
    /// Creates a `HMoveTimeSerializer`
    pub const fn new() -> Self {
        Self {
            word_serializer: U256WordSerializer::new(),
        }
    }
}

impl Serializer<HMoveTime> for HMoveTimeSerializer {
    /// ```
    /// use hmove_serialization::Serializer;
    /// use hmove_time::{HMoveTime, HMoveTimeSerializer};
    ///
    /// let time: HMoveTime = HMoveTime::from_secs(30);
    /// let mut serialized = Vec::new();
    /// HMoveTimeSerializer::new().serialize(&time, &mut serialized).unwrap();
    /// assert_eq!(serialized.len(), 32);
    /// assert_eq!(serialized[31], 30);
    /// ```
    fn serialize(&self, value: &HMoveTime, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        self.word_serializer.serialize(&value.to_secs(), buffer)
    }
}

impl fmt::Display for HMoveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_secs())
    }
}

impl HMoveTime {
    /// Conversion from `u64`, representing a timestamp in seconds.
    pub const fn from_secs(value: u64) -> Self {
        HMoveTime(value)
    }

    /// Conversion to `u64`, representing seconds.
    pub const fn to_secs(&self) -> u64 {
        self.0
    }

    /// ```
    /// # use hmove_time::*;
    /// let time = HMoveTime::from_secs(42);
    /// assert_eq!(time.saturating_add(HMoveTime::from_secs(18 * 60)), HMoveTime::from_secs(1122));
    /// let max = HMoveTime::from_secs(u64::MAX);
    /// assert_eq!(max.saturating_add(time), max);
    /// ```
    #[must_use]
    pub fn saturating_add(self, t: HMoveTime) -> Self {
        HMoveTime(self.0.saturating_add(t.0))
    }
}
