use crate::models::{LapRecord, PoolLength};

/// SWOLF for én lengde: bassenglengde + lengdetidens sekunddel.
/// 50 m-basseng halveres (heltallsdivisjon) så alt skåres på 25 m-basis
/// og snitt/SSI blir sammenlignbare på tvers av bassengstørrelser.
pub fn lap_swolf(pool: PoolLength, lap_time_secs: f64) -> i32 {
    let mut swolf = pool.meters() + (lap_time_secs as i32) % 60;
    if pool == PoolLength::M50 {
        swolf /= 2;
    }
    swolf
}

/// Løpende SWOLF-snitt: lengde 1 gir 0 (ingen skår ennå), lengde 2 gir
/// lengdens egen skår, deretter parvis blanding med forrige snitt.
/// Dette er eksponentiell glatting med fast vekt 1/2 (trunkert mot null
/// hvert steg), ikke et ekte aritmetisk snitt over alle lengder.
pub fn blend_swolf_avg(lap: u32, prev_avg: i32, swolf: i32) -> i32 {
    match lap {
        1 => 0,
        2 => swolf,
        _ => (prev_avg + swolf) / 2,
    }
}

/// SSI: prosentvis forbedring av øktsnittet mot forrige økts snitt.
/// Forholdet avrundes halv-opp (+0.5, trunkering) før subtraksjonen, og
/// resultatet klippes nedad til 0. Ingen øvre klipping.
///
/// Returnerer None uten gyldig grunnlag (lengde 1, eller ingen positiv
/// baseline); kalleren beholder da forrige verdi.
pub fn score_improvement(lap: u32, swolf_avg: i32, swolf_avg_prev: i32) -> Option<i32> {
    if lap <= 1 || swolf_avg_prev <= 0 {
        return None;
    }

    let ratio = f64::from(swolf_avg) / f64::from(swolf_avg_prev);
    let ssi = 100 - (ratio * 100.0 + 0.5) as i32;

    Some(ssi.max(0))
}

/// Skår en fullført lengde: teller opp, beregner distanse, SWOLF, snitt
/// og SSI i én omgang.
pub fn score_lap(
    prev_lap: u32,
    pool: PoolLength,
    lap_time_secs: f64,
    prev_swolf_avg: i32,
    swolf_avg_prev_workout: i32,
) -> LapRecord {
    let lap = prev_lap + 1;
    let swolf = lap_swolf(pool, lap_time_secs);
    let swolf_avg = blend_swolf_avg(lap, prev_swolf_avg, swolf);
    let ssi = score_improvement(lap, swolf_avg, swolf_avg_prev_workout);

    LapRecord {
        lap,
        distance: lap * pool.meters() as u32,
        swolf,
        swolf_avg,
        ssi,
    }
}
