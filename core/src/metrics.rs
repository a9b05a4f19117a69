use once_cell::sync::Lazy;
use prometheus::{IntCounter, Registry};

/// Prosessvid registry for eksport; tellerne eies av sesjonen og
/// registreres her kun når verten ber om det.
pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Hendelsestellere for motoren.
#[derive(Clone)]
pub struct Metrics {
    stroke_events: IntCounter,
    lap_events: IntCounter,
    outbox_sends: IntCounter,
    likes_received: IntCounter,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            stroke_events: counter("swim_stroke_events_total", "Registrerte svømmetak-hendelser"),
            lap_events: counter("swim_lap_events_total", "Registrerte vendinger (lengder)"),
            outbox_sends: counter("swim_outbox_sends_total", "Meldinger levert til transport-laget"),
            likes_received: counter("swim_likes_received_total", "Mottatte likes fra venner"),
        }
    }

    /// Registrer tellerne i den prosessvide registryen. Dobbeltregistrering
    /// (to sesjoner i samme prosess) logges og ignoreres.
    pub fn register_default(&self) {
        for c in [
            &self.stroke_events,
            &self.lap_events,
            &self.outbox_sends,
            &self.likes_received,
        ] {
            if let Err(e) = REGISTRY.register(Box::new(c.clone())) {
                log::warn!("metric registration skipped: {e}");
            }
        }
    }
}

fn counter(name: &str, help: &str) -> IntCounter {
    // Navnene er statiske og gyldige; new() feiler kun på ugyldige navn.
    IntCounter::new(name, help).unwrap()
}

pub fn stroke_events_total(m: &Metrics) -> &IntCounter {
    &m.stroke_events
}

pub fn lap_events_total(m: &Metrics) -> &IntCounter {
    &m.lap_events
}

pub fn outbox_sends_total(m: &Metrics) -> &IntCounter {
    &m.outbox_sends
}

pub fn likes_received_total(m: &Metrics) -> &IntCounter {
    &m.likes_received
}
