use crate::models::AccelSample;

// Akselerometer-konstanter
pub const ACCEL_SAMPLING_HZ: u32 = 10; // nominell leveringsrate
pub const ACCEL_THRESHOLD: i32 = 180;  // avvik fra hvile (milli-g) som teller
pub const ACCEL_DURATION: u32 = 35;    // antall tellende målinger per tak
const REST_MAGNITUDE: i32 = 1000;      // 1 g i milli-g

/// Tilnærmet kvadratrot (invers-kvadratrot-trikset med ett Newton-steg,
/// pluss én). Ikke bit-eksakt mot en ekte rot; monoton med den innenfor
/// feilgrensen, og det er alt takdeteksjonen trenger.
pub fn fast_sqrt(x: f32) -> f32 {
    let xhalf = 0.5_f32 * x;
    let i = 0x5f37_59df - ((x.to_bits() as i32) >> 1);
    let y = f32::from_bits(i as u32);

    x * y * (1.5 - xhalf * y * y) + 1.0
}

/// Et registrert svømmetak (begge armer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeEvent;

/// Takteller over akselerasjonsstrømmen.
///
/// Telleren over terskelen er kumulativ siden forrige tak, ikke en serie
/// sammenhengende målinger: en rolig måling nullstiller den ikke. Kun et
/// utløst tak nullstiller.
#[derive(Debug, Default, Clone)]
pub struct StrokeDetector {
    over_threshold: u32,
    total_strokes: u32,
}

impl StrokeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mat inn én måling. Vibrasjonsflaggede målinger forkastes før all
    /// aritmetikk (vibrasjon forurenser sensoren).
    pub fn on_sample(&mut self, sample: &AccelSample) -> Option<StrokeEvent> {
        if sample.vibrating {
            return None;
        }

        // Summer i f32 før roten; unngår heltallsoverflyt for ekstreme
        // int16-verdier uten å endre tilnærmingskontrakten.
        let (x, y, z) = (f32::from(sample.x), f32::from(sample.y), f32::from(sample.z));
        let magnitude = fast_sqrt(x * x + y * y + z * z) as i32;

        if (REST_MAGNITUDE - magnitude).abs() > ACCEL_THRESHOLD {
            self.over_threshold += 1;
        }

        if self.over_threshold == ACCEL_DURATION {
            self.over_threshold = 0;
            self.total_strokes += 2; // begge armer
            return Some(StrokeEvent);
        }

        None
    }

    pub fn total_strokes(&self) -> u32 {
        self.total_strokes
    }

    /// Sett totalen fra et lagret øyeblikksbilde (oppstart).
    pub fn restore_total(&mut self, total: u32) {
        self.total_strokes = total;
        self.over_threshold = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
