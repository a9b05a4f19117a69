// Øktmotoren: eier stoppeklokka, begge detektorene, tellerne og
// sosial-feeden, og publiserer øyeblikksbilder til samarbeidspartnerne.
//
// Én logisk hendelsesstrøm (tick, akselerometer, kompass, brukerinput)
// behandles i ankomstrekkefølge av én skriver; samarbeidspartnere leser
// bare publiserte projeksjoner og kaller operasjonene her, aldri
// tilstanden direkte.

use std::time::Duration;

use log::{debug, info, warn};

use crate::heading::HeadingTracker;
use crate::metrics::{self, Metrics};
use crate::models::{AccelSample, EngineError, PoolLength};
use crate::scoring::score_lap;
use crate::social::SocialFeed;
use crate::stopwatch::{format_elapsed, Clock, Stopwatch, SystemClock};
use crate::stroke::StrokeDetector;
use crate::types::{OutboxMessage, StoredWorkout, WorkoutView};

/// Periode for den selvreplanlagte tidsoppdateringen. `tick()` returnerer
/// denne så lenge økten går; kansellering er å la være å replanlegge.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// "YYYY-MM-DD HH:MM:SS"
pub const WORKOUT_ID_LEN: usize = 19;

/// UI-samarbeidspartner: får hele projeksjonen etter hver muterende
/// hendelse.
pub trait WorkoutObserver {
    fn on_update(&mut self, view: &WorkoutView);
}

/// Transport-samarbeidspartner: koder og sender meldingstuppelen.
/// Motoren bryr seg ikke om utfallet; en eventuell kvittering kommer
/// tilbake via `handle_send_result`.
pub trait MessageOutbox {
    fn send(&mut self, message: &OutboxMessage);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulsePattern {
    Short,
    Long,
    Double,
}

/// Haptikk-aktuator, fyr-og-glem: ingen returverdi, ingen feilkanal.
pub trait HapticActuator {
    fn pulse(&mut self, pattern: PulsePattern);
}

/// Abonnementsstyring for en sensor (akselerometer eller kompass), slik
/// at pause faktisk stopper leveransen i stedet for å la gamle callbacks
/// mutere tilstand.
pub trait SensorService {
    fn start(&mut self);
    fn stop(&mut self);
}

/// Unik økt-id: lokal dato og tid på 19 tegn.
pub fn create_workout_id() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Debug, Default, Clone)]
struct WorkoutState {
    pool: Option<PoolLength>,
    laps: u32,
    distance: i32, // meter = laps * pool
    strokes_of_lap: u32,
    swolf: i32,
    swolf_avg: i32,
    /// Baseline fra forrige fullførte økt. Overlever alt unntatt
    /// eksplisitt nullstilling av historikken.
    swolf_avg_prev: i32,
    /// Beholder forrige verdi når en lengde mangler grunnlag for ny.
    ssi: i32,
    started: bool,
}

pub struct WorkoutSession {
    clock: Box<dyn Clock>,
    stopwatch: Stopwatch,
    strokes: StrokeDetector,
    headings: HeadingTracker,
    state: WorkoutState,
    social: SocialFeed,
    workout_id: String,
    status: String,
    observers: Vec<Box<dyn WorkoutObserver>>,
    outbox: Option<Box<dyn MessageOutbox>>,
    haptics: Option<Box<dyn HapticActuator>>,
    accel_sensor: Option<Box<dyn SensorService>>,
    compass_sensor: Option<Box<dyn SensorService>>,
    metrics: Metrics,
}

impl Default for WorkoutSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutSession {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            stopwatch: Stopwatch::new(),
            strokes: StrokeDetector::new(),
            headings: HeadingTracker::new(),
            state: WorkoutState::default(),
            social: SocialFeed::new(),
            workout_id: create_workout_id(),
            status: String::new(),
            observers: Vec::new(),
            outbox: None,
            haptics: None,
            accel_sensor: None,
            compass_sensor: None,
            metrics: Metrics::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn WorkoutObserver>) {
        self.observers.push(observer);
    }

    pub fn set_outbox(&mut self, outbox: Box<dyn MessageOutbox>) {
        self.outbox = Some(outbox);
    }

    pub fn set_haptics(&mut self, haptics: Box<dyn HapticActuator>) {
        self.haptics = Some(haptics);
    }

    pub fn set_accel_sensor(&mut self, sensor: Box<dyn SensorService>) {
        self.accel_sensor = Some(sensor);
    }

    pub fn set_compass_sensor(&mut self, sensor: Box<dyn SensorService>) {
        self.compass_sensor = Some(sensor);
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn is_started(&self) -> bool {
        self.state.started
    }

    pub fn workout_id(&self) -> &str {
        &self.workout_id
    }

    /// Tak i inneværende lengde (nullstilles ved hver vending).
    pub fn strokes_of_lap(&self) -> u32 {
        self.state.strokes_of_lap
    }

    /// SWOLF for siste fullførte lengde.
    pub fn last_swolf(&self) -> i32 {
        self.state.swolf
    }

    /// Start en ny økt. Nullstiller alle tellere unntatt baseline fra
    /// forrige økt. Ugyldig bassenglengde avvises her, før den kan
    /// forgifte senere skåring.
    pub fn begin(&mut self, pool_meters: i32) -> Result<(), EngineError> {
        let pool = PoolLength::try_from(pool_meters)?;

        self.state = WorkoutState {
            pool: Some(pool),
            swolf_avg_prev: self.state.swolf_avg_prev,
            started: true,
            ..WorkoutState::default()
        };
        self.strokes.reset();
        self.headings.reset();
        self.status.clear();
        self.ensure_workout_id();

        let now = self.clock.now_secs();
        self.stopwatch.start(now);
        self.pulse(PulsePattern::Short);
        self.start_sensors();

        info!("økt startet (basseng {} m, id {})", pool.meters(), self.workout_id);
        self.publish();
        Ok(())
    }

    /// Pause: frys klokka og stopp sensorleveransen.
    pub fn pause(&mut self) {
        if !self.state.started {
            return;
        }
        let now = self.clock.now_secs();
        self.stopwatch.pause(now);
        self.state.started = false;
        self.stop_sensors();
        self.pulse(PulsePattern::Long);
        info!("økt pauset ved {}", format_elapsed(self.stopwatch.elapsed()));
        self.publish();
    }

    /// Gjenoppta etter pause; pausetiden telles ikke med.
    pub fn resume(&mut self) {
        if self.state.started || self.state.pool.is_none() {
            return;
        }
        let now = self.clock.now_secs();
        self.stopwatch.resume(now);
        self.state.started = true;
        self.pulse(PulsePattern::Short);
        self.start_sensors();
        info!("økt gjenopptatt");
        self.publish();
    }

    /// Avslutt økten: ta vare på SWOLF-snittet som baseline for neste
    /// økt (bare hvis det finnes), nullstill alt og lever det endelige
    /// øyeblikksbildet til persistering.
    pub fn end(&mut self) -> StoredWorkout {
        if self.state.started {
            let now = self.clock.now_secs();
            self.stopwatch.pause(now);
            self.state.started = false;
            self.stop_sensors();
        }

        if self.state.swolf_avg > 0 {
            self.state.swolf_avg_prev = self.state.swolf_avg;
        }
        let baseline = self.state.swolf_avg_prev;

        self.state = WorkoutState {
            swolf_avg_prev: baseline,
            ..WorkoutState::default()
        };
        self.strokes.reset();
        self.headings.reset();
        self.stopwatch.reset();
        self.social.reset();
        self.status.clear();
        // Tom id markerer fullført økt; neste begin() lager en ny.
        self.workout_id.clear();

        self.pulse(PulsePattern::Long);
        info!("økt avsluttet (swolf_avg_prev={})", baseline);
        self.publish();
        self.snapshot()
    }

    /// Akselerometer-callback. Droppes når økten ikke går (gamle
    /// callbacks etter pause skal ikke mutere noe).
    pub fn feed_accel(&mut self, sample: &AccelSample) {
        if !self.state.started {
            return;
        }
        if self.strokes.on_sample(sample).is_some() {
            self.state.strokes_of_lap += 2;
            metrics::stroke_events_total(&self.metrics).inc();
            debug!("svømmetak registrert (totalt {})", self.strokes.total_strokes());
            self.publish();
        }
    }

    /// Kompass-callback. En vending skårer lengden med lengdetiden fra
    /// siste tick, nullstiller lengdetellere og sender øktdata ut.
    pub fn feed_heading(&mut self, degrees: i32) {
        if !self.state.started {
            return;
        }
        let Some(pool) = self.state.pool else {
            return;
        };
        if self.headings.on_heading(degrees).is_none() {
            return;
        }

        let record = score_lap(
            self.state.laps,
            pool,
            self.stopwatch.lap_time(),
            self.state.swolf_avg,
            self.state.swolf_avg_prev,
        );

        self.state.laps = record.lap;
        self.state.distance = record.distance as i32;
        self.state.swolf = record.swolf;
        self.state.swolf_avg = record.swolf_avg;
        if let Some(ssi) = record.ssi {
            self.state.ssi = ssi;
        }
        self.state.strokes_of_lap = 0;

        let now = self.clock.now_secs();
        self.stopwatch.lap_reset(now);

        metrics::lap_events_total(&self.metrics).inc();
        info!(
            "lengde {} fullført: swolf={} swolf_avg={} ssi={}",
            record.lap, record.swolf, record.swolf_avg, self.state.ssi
        );

        // Sanntidssporing: hver lengde går rett ut til mobilappen.
        self.send_data();
        self.publish();
    }

    /// Periodisk tidsoppdatering. Returnerer neste forsinkelse så lenge
    /// økten går; None betyr at verten ikke skal replanlegge.
    pub fn tick(&mut self) -> Option<Duration> {
        let now = self.clock.now_secs();
        self.stopwatch.tick(now);
        self.publish();
        if self.state.started {
            Some(TICK_INTERVAL)
        } else {
            None
        }
    }

    /// Brukerutløst sending av øktdata.
    pub fn request_send(&mut self) {
        self.send_data();
        self.publish();
    }

    /// Kvittering fra transport-laget, kun til statuslinja.
    pub fn handle_send_result(&mut self, ok: bool) {
        self.status = if ok {
            "Data successfully sent!".to_string()
        } else {
            "Send failed!".to_string()
        };
        self.publish();
    }

    /// Mottatt "like" fra en venn; dobbel puls varsler svømmeren.
    pub fn receive_like(&mut self, friend_name: &str, message: &str) {
        self.social.receive(friend_name, message);
        metrics::likes_received_total(&self.metrics).inc();
        self.pulse(PulsePattern::Double);
        self.publish();
    }

    /// Nullstill SSI-baselinen (historikken fra forrige økt).
    pub fn reset_score_history(&mut self) {
        self.state.swolf_avg_prev = 0;
        self.pulse(PulsePattern::Long);
        self.publish();
    }

    /// Øyeblikksbilde for persistering, gyldig når som helst.
    pub fn snapshot(&self) -> StoredWorkout {
        StoredWorkout {
            workout_id: self.workout_id.clone(),
            elapsed_time: self.stopwatch.elapsed(),
            strokes: self.strokes.total_strokes() as i32,
            laps: self.state.laps as i32,
            swolf_avg: self.state.swolf_avg,
            pool: self.state.pool.map_or(0, PoolLength::meters),
            swolf_avg_prev: self.state.swolf_avg_prev,
            likes: self.social.likes(),
            social: self.social.text().to_string(),
        }
    }

    /// Gjenoppbygg fra lagret tilstand (oppstart). Økten står pauset
    /// etterpå; brukeren gjenopptar selv. En id med feil lengde byttes
    /// ut, og et øyeblikksbilde med ugyldig bassenglengde forkastes i
    /// sin helhet som "ingen tidligere tilstand".
    pub fn restore(&mut self, stored: &StoredWorkout) {
        self.workout_id = if stored.workout_id.len() == WORKOUT_ID_LEN {
            stored.workout_id.clone()
        } else {
            create_workout_id()
        };

        let pool = match stored.pool {
            0 => None,
            m => match PoolLength::try_from(m) {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!("stored snapshot discarded ({e}), starting fresh");
                    self.publish();
                    return;
                }
            },
        };

        self.state.pool = pool;
        self.state.laps = stored.laps.max(0) as u32;
        self.state.distance = stored.pool * stored.laps;
        self.state.swolf_avg = stored.swolf_avg;
        self.state.swolf_avg_prev = stored.swolf_avg_prev;
        self.state.started = false;
        self.strokes.restore_total(stored.strokes.max(0) as u32);
        self.social.restore(stored.likes, &stored.social);

        let now = self.clock.now_secs();
        self.stopwatch.restore(stored.elapsed_time, now);

        info!(
            "økt gjenoppbygd fra lager (laps={}, elapsed={})",
            self.state.laps,
            format_elapsed(self.stopwatch.elapsed())
        );
        self.publish();
    }

    /// Publisert projeksjon av øktstatus.
    pub fn view(&self) -> WorkoutView {
        WorkoutView {
            workout_id: self.workout_id.clone(),
            elapsed_time: format_elapsed(self.stopwatch.elapsed()),
            strokes: self.strokes.total_strokes() as i32,
            laps: self.state.laps as i32,
            distance: self.state.distance,
            pool: self.state.pool.map_or(0, PoolLength::meters),
            swolf_avg: self.state.swolf_avg,
            ssi: self.state.ssi,
            likes: self.social.likes(),
            status: self.status.clone(),
        }
    }

    fn send_data(&mut self) {
        self.status = "Sending data...".to_string();

        let message = OutboxMessage {
            workout_id: self.workout_id.clone(),
            duration: format_elapsed(self.stopwatch.elapsed()),
            strokes: self.strokes.total_strokes() as i32,
            laps: self.state.laps as i32,
            likes: self.social.likes(),
            social: self.social.outbox_text().to_string(),
            distance: self.state.distance,
            pool: self.state.pool.map_or(0, PoolLength::meters),
            swolf_avg: self.state.swolf_avg,
            ssi: self.state.ssi,
        };

        metrics::outbox_sends_total(&self.metrics).inc();
        if let Some(outbox) = self.outbox.as_mut() {
            outbox.send(&message);
        }
    }

    fn publish(&mut self) {
        let view = self.view();
        for observer in &mut self.observers {
            observer.on_update(&view);
        }
    }

    fn pulse(&mut self, pattern: PulsePattern) {
        if let Some(haptics) = self.haptics.as_mut() {
            haptics.pulse(pattern);
        }
    }

    fn start_sensors(&mut self) {
        if let Some(sensor) = self.accel_sensor.as_mut() {
            sensor.start();
        }
        if let Some(sensor) = self.compass_sensor.as_mut() {
            sensor.start();
        }
    }

    fn stop_sensors(&mut self) {
        if let Some(sensor) = self.accel_sensor.as_mut() {
            sensor.stop();
        }
        if let Some(sensor) = self.compass_sensor.as_mut() {
            sensor.stop();
        }
    }

    fn ensure_workout_id(&mut self) {
        if self.workout_id.len() != WORKOUT_ID_LEN {
            self.workout_id = create_workout_id();
        }
    }
}
