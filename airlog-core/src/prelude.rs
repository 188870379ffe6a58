//! Prelude: `use airlog_core::prelude::*;`

pub use crate::time::Timestamp;
pub use crate::traits::{
    AnalogSource, Component, Delay, NoDelay, Sensor, SensorError, StdDelay,
};
