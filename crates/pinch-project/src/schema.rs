//! Stream table schema shared by every input format.

use pinch_engine::{Stream, StreamSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamTable {
    /// Minimum approach temperature (K)
    pub tmin: f64,
    #[serde(default)]
    pub streams: Vec<StreamRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamRow {
    /// Heat capacity flow rate (kW/K)
    pub cp: f64,
    /// Supply temperature (degC)
    pub supply_temp: f64,
    /// Target temperature (degC)
    pub target_temp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl StreamRow {
    pub fn new(cp: f64, supply_temp: f64, target_temp: f64) -> Self {
        Self {
            cp,
            supply_temp,
            target_temp,
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl StreamTable {
    pub fn new(tmin: f64, streams: Vec<StreamRow>) -> Self {
        Self { tmin, streams }
    }

    /// Convert into the engine's validated stream set.
    pub fn to_stream_set(&self) -> pinch_core::PinchResult<StreamSet> {
        let streams = self
            .streams
            .iter()
            .map(|row| Stream::new(row.cp, row.supply_temp, row.target_temp))
            .collect::<pinch_core::PinchResult<Vec<_>>>()?;
        StreamSet::new(self.tmin, streams)
    }

    /// Rebuild a table from an existing stream set. Names are not kept.
    pub fn from_stream_set(set: &StreamSet) -> Self {
        Self {
            tmin: set.tmin(),
            streams: set
                .iter()
                .map(|s| StreamRow::new(s.stream.cp(), s.stream.supply_temp(), s.stream.target_temp()))
                .collect(),
        }
    }
}
