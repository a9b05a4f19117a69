use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rå akselerometer-måling fra håndleddet, én per callback (10 Hz).
/// Komponentene er i milli-g; 1000 tilsvarer 1 g i ro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    /// Satt når klokka vibrerte under målingen; slike målinger forkastes.
    pub vibrating: bool,
}

impl AccelSample {
    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z, vibrating: false }
    }

    pub fn vibrating(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z, vibrating: true }
    }
}

/// Gyldige bassenglengder. Alt annet avvises i `begin()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolLength {
    M25,
    M50,
}

impl PoolLength {
    /// Lengde i meter.
    pub fn meters(self) -> i32 {
        match self {
            PoolLength::M25 => 25,
            PoolLength::M50 => 50,
        }
    }
}

impl TryFrom<i32> for PoolLength {
    type Error = EngineError;

    fn try_from(meters: i32) -> Result<Self, EngineError> {
        match meters {
            25 => Ok(PoolLength::M25),
            50 => Ok(PoolLength::M50),
            other => Err(EngineError::InvalidPoolLength(other)),
        }
    }
}

/// Resultatet av én fullført lengde. Kun den siste beholdes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LapRecord {
    /// 1-basert lengdeteller.
    pub lap: u32,
    /// meter = lap * bassenglengde
    pub distance: u32,
    pub swolf: i32,
    pub swolf_avg: i32,
    /// None når grunnlaget mangler (lengde 1, eller ingen baseline);
    /// forrige verdi beholdes da hos eieren.
    pub ssi: Option<i32>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Bassenglengden må være 25 eller 50 meter.
    #[error("invalid pool length: {0} m (expected 25 or 50)")]
    InvalidPoolLength(i32),
}
