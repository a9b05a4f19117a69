//! SwimGraph-kjernen: sanntidsmotor for svømmeøkter.
//!
//! Gjør rå håndledds-akselerometri og kompasskurs om til taktelling,
//! lengder, distanse, SWOLF-snitt og SSI (forbedring mot forrige økt),
//! med en pausebevisst stoppeklokke ved siden av. Skjermer, lagring og
//! radio er samarbeidspartnere bak porter i `session`.

pub mod cli;
pub mod heading;
pub mod metrics;
pub mod models;
pub mod scoring;
pub mod session;
pub mod social;
pub mod stopwatch;
pub mod storage;
pub mod stroke;
pub mod types;

pub use models::{AccelSample, EngineError, LapRecord, PoolLength};
pub use session::{
    HapticActuator, MessageOutbox, PulsePattern, SensorService, WorkoutObserver, WorkoutSession,
};
pub use stopwatch::{format_elapsed, Clock, ManualClock, Stopwatch, SystemClock};
pub use storage::{load_workout, save_workout};
pub use types::{OutboxMessage, StoredWorkout, WorkoutView};
