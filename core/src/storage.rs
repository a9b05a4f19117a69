use std::error::Error;
use std::path::Path;

use crate::types::StoredWorkout;

/// Leser inn øktdata fra disk (JSON).
/// Manglende fil eller uleselig innhold behandles som "ingen tidligere
/// tilstand" og gir defaults; det er aldri en feil mot brukeren.
pub fn load_workout(path: &str) -> Result<StoredWorkout, Box<dyn Error>> {
    if !Path::new(path).exists() {
        println!("⚠️ Fant ikke øktdata på {}, starter med defaults", path);
        return Ok(StoredWorkout::default());
    }

    let contents = std::fs::read_to_string(path)?;
    let mut de = serde_json::Deserializer::from_str(&contents);
    match serde_path_to_error::deserialize::<_, StoredWorkout>(&mut de) {
        Ok(stored) => {
            println!(
                "📂 Øktdata lastet fra {} (laps={}, swolf_avg_prev={})",
                path, stored.laps, stored.swolf_avg_prev
            );
            Ok(stored)
        }
        Err(e) => {
            log::warn!(
                "discarding unreadable workout state {} (at {}: {}), using defaults",
                path,
                e.path(),
                e
            );
            Ok(StoredWorkout::default())
        }
    }
}

/// Lagrer øktdata til disk som JSON (pretty-print).
pub fn save_workout(stored: &StoredWorkout, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(stored)?;
    std::fs::write(path, json)?;
    println!(
        "✅ Øktdata lagret til {} (laps={}, swolf_avg_prev={})",
        path, stored.laps, stored.swolf_avg_prev
    );
    Ok(())
}
