use serde::{Deserialize, Serialize};

use crate::social::SOCIAL_INIT;

/// Lagringsøyeblikksbilde av en økt. Skrives ved avslutning/exit og leses
/// tilbake ved oppstart. Manglende felt faller tilbake til default slik at
/// gamle eller avkortede dokumenter aldri blir en feil for brukeren.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoredWorkout {
    /// "YYYY-MM-DD HH:MM:SS" (19 tegn). Tom streng = fullført økt,
    /// neste økt får ny id.
    pub workout_id: String,
    pub elapsed_time: f64, // sek
    pub strokes: i32,
    pub laps: i32,
    pub swolf_avg: i32,
    /// 25/50, eller 0 når ingen økt er i gang.
    pub pool: i32,
    /// SWOLF-snitt fra forrige fullførte økt; baseline for SSI.
    pub swolf_avg_prev: i32,
    pub likes: i32,
    pub social: String,
}

impl Default for StoredWorkout {
    fn default() -> Self {
        Self {
            workout_id: String::new(),
            elapsed_time: 0.0,
            strokes: 0,
            laps: 0,
            swolf_avg: 0,
            pool: 0,
            swolf_avg_prev: 0,
            likes: 0,
            social: SOCIAL_INIT.to_string(),
        }
    }
}

/// Utgående meldingstuppel til transport-laget (mobilappen koder selve
/// rammen). Feltrekkefølgen speiler meldingsnøklene hos mottakeren.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutboxMessage {
    pub workout_id: String,
    /// "HH:MM:SS.CC"
    pub duration: String,
    pub strokes: i32,
    pub laps: i32,
    pub likes: i32,
    /// Tom inntil første "like" er mottatt.
    pub social: String,
    pub distance: i32,
    pub pool: i32,
    pub swolf_avg: i32,
    pub ssi: i32,
}

/// Publisert projeksjon av øktstatus, pushet til UI-samarbeidspartnere
/// etter hver muterende hendelse.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutView {
    pub workout_id: String,
    pub elapsed_time: String,
    pub strokes: i32,
    pub laps: i32,
    pub distance: i32,
    /// 0 når ingen økt er i gang.
    pub pool: i32,
    pub swolf_avg: i32,
    pub ssi: i32,
    pub likes: i32,
    /// Statuslinje ("Sending data..." osv.).
    pub status: String,
}
