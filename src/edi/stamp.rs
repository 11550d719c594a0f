//! Envelope date/time and control number providers.

use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

/// Control number used when none is configured.
pub const DEFAULT_CONTROL_NUMBER: u32 = 894_135;

/// Supplies the generation timestamp and the interchange control number.
///
/// The generator only reads from the provider, so one instance can be shared
/// by concurrent callers.
pub trait StampProvider: Send + Sync {
    /// Local date and time written into ISA/GS/BGN/DTP.
    fn now(&self) -> NaiveDateTime;

    /// Control number shared by ISA13, GS06, ST02, SE02, GE02 and IEA02.
    fn control_number(&self) -> u32;
}

impl<T: StampProvider + ?Sized> StampProvider for &T {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }

    fn control_number(&self) -> u32 {
        (**self).control_number()
    }
}

impl<T: StampProvider + ?Sized> StampProvider for Arc<T> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }

    fn control_number(&self) -> u32 {
        (**self).control_number()
    }
}

/// Wall-clock provider with a fixed control number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemStamp {
    control_number: u32,
}

impl SystemStamp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_control_number(control_number: u32) -> Self {
        Self { control_number }
    }
}

impl Default for SystemStamp {
    fn default() -> Self {
        Self {
            control_number: DEFAULT_CONTROL_NUMBER,
        }
    }
}

impl StampProvider for SystemStamp {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    fn control_number(&self) -> u32 {
        self.control_number
    }
}

/// Provider that always returns the same instant, for reproducible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStamp {
    at: NaiveDateTime,
    control_number: u32,
}

impl FixedStamp {
    pub fn new(at: NaiveDateTime, control_number: u32) -> Self {
        Self { at, control_number }
    }

    /// Convenience constructor; `None` for an invalid date or time.
    pub fn from_ymd_hm(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        control_number: u32,
    ) -> Option<Self> {
        let at = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)?;
        Some(Self::new(at, control_number))
    }
}

impl StampProvider for FixedStamp {
    fn now(&self) -> NaiveDateTime {
        self.at
    }

    fn control_number(&self) -> u32 {
        self.control_number
    }
}
