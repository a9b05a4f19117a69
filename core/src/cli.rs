use crate::types::WorkoutView;

/// Bygg en enkel tekstrapport av øktstatus (for logg/terminal).
pub fn format_workout_report(view: &WorkoutView) -> String {
    let mut out = String::new();
    out.push_str("--- Workout Report ---\n");
    out.push_str(&format!("Workout id: {}\n", view.workout_id));
    out.push_str(&format!("Elapsed: {}\n", view.elapsed_time));
    out.push_str(&format!("Pool: {} m\n", view.pool));
    out.push_str(&format!("Laps: {}  Distance: {} m\n", view.laps, view.distance));
    out.push_str(&format!("Strokes: {}\n", view.strokes));
    out.push_str(&format!("SWOLF avg: {}  SSI: {}%\n", view.swolf_avg, view.ssi));
    out.push_str(&format!("Likes: {}\n", view.likes));
    out
}

pub fn print_workout_report(view: &WorkoutView) {
    print!("{}", format_workout_report(view));
}
