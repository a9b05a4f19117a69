use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swimgraph_core::cli::format_workout_report;
use swimgraph_core::models::AccelSample;
use swimgraph_core::metrics::{lap_events_total, outbox_sends_total, stroke_events_total};
use swimgraph_core::session::{
    HapticActuator, MessageOutbox, PulsePattern, SensorService, WorkoutObserver, WorkoutSession,
    TICK_INTERVAL, WORKOUT_ID_LEN,
};
use swimgraph_core::stopwatch::ManualClock;
use swimgraph_core::types::{OutboxMessage, StoredWorkout, WorkoutView};

// --- testdoubler for samarbeidspartnerne ---

#[derive(Default, Clone)]
struct Recorder {
    views: Rc<RefCell<Vec<WorkoutView>>>,
}

impl WorkoutObserver for Recorder {
    fn on_update(&mut self, view: &WorkoutView) {
        self.views.borrow_mut().push(view.clone());
    }
}

#[derive(Default, Clone)]
struct CapturingOutbox {
    sent: Rc<RefCell<Vec<OutboxMessage>>>,
}

impl MessageOutbox for CapturingOutbox {
    fn send(&mut self, message: &OutboxMessage) {
        self.sent.borrow_mut().push(message.clone());
    }
}

#[derive(Default, Clone)]
struct PulseLog {
    pulses: Rc<RefCell<Vec<PulsePattern>>>,
}

impl HapticActuator for PulseLog {
    fn pulse(&mut self, pattern: PulsePattern) {
        self.pulses.borrow_mut().push(pattern);
    }
}

#[derive(Default, Clone)]
struct FlagSensor {
    running: Rc<Cell<bool>>,
}

impl SensorService for FlagSensor {
    fn start(&mut self) {
        self.running.set(true);
    }
    fn stop(&mut self) {
        self.running.set(false);
    }
}

fn active() -> AccelSample {
    AccelSample::new(800, 800, 800)
}

// --- tester ---

#[test]
fn begin_rejects_invalid_pool_length() {
    let mut session = WorkoutSession::new();
    assert!(session.begin(33).is_err());
    assert!(!session.is_started());
    assert!(session.begin(25).is_ok());
    assert!(session.is_started());
}

#[test]
fn strokes_count_in_steps_of_two() {
    let clock = ManualClock::new(1000.0);
    let mut session = WorkoutSession::with_clock(Box::new(clock));
    session.begin(25).expect("begin feilet");

    for _ in 0..35 {
        session.feed_accel(&active());
    }
    assert_eq!(session.view().strokes, 2);
    assert_eq!(session.strokes_of_lap(), 2);
}

#[test]
fn paused_session_ignores_sensor_callbacks() {
    let clock = ManualClock::new(1000.0);
    let mut session = WorkoutSession::with_clock(Box::new(clock));
    session.begin(25).expect("begin feilet");
    session.pause();

    // gamle callbacks etter pause skal ikke mutere noe
    for _ in 0..100 {
        session.feed_accel(&active());
    }
    for _ in 0..200 {
        session.feed_heading(180);
    }
    assert_eq!(session.view().strokes, 0);
    assert_eq!(session.view().laps, 0);

    session.resume();
    for _ in 0..35 {
        session.feed_accel(&active());
    }
    assert_eq!(session.view().strokes, 2);
}

#[test]
fn laps_are_scored_and_sent_in_real_time() {
    let clock = ManualClock::new(1000.0);
    let mut session = WorkoutSession::with_clock(Box::new(clock.clone()));
    let outbox = CapturingOutbox::default();
    let sent = outbox.sent.clone();
    session.set_outbox(Box::new(outbox));

    // baseline fra "forrige økt"
    session.restore(&StoredWorkout {
        swolf_avg_prev: 40,
        ..StoredWorkout::default()
    });
    session.begin(25).expect("begin feilet");

    // litt taktelling før første vending
    for _ in 0..70 {
        session.feed_accel(&active());
    }

    // lengde 1: konstant kurs 350, vending registreres ved måling nr. 40
    clock.advance(58.0);
    session.tick();
    for _ in 0..100 {
        session.feed_heading(350);
    }
    let view = session.view();
    assert_eq!(view.laps, 1);
    assert_eq!(view.distance, 25);
    assert_eq!(view.swolf_avg, 0); // ingen skår på første lengde
    assert_eq!(view.ssi, 0);
    assert_eq!(session.strokes_of_lap(), 0); // nullstilt av vendingen

    // lengde 2: retningsskifte mot 170, fyrer 43 målinger etter skiftet
    clock.advance(67.3);
    session.tick();
    for _ in 0..103 {
        session.feed_heading(170);
    }
    let view = session.view();
    assert_eq!(view.laps, 2);
    assert_eq!(view.distance, 50);
    assert_eq!(view.swolf_avg, 32); // 25 + (67 mod 60)
    assert_eq!(view.ssi, 20); // 32/40 = 80 % -> 100 - 80
    assert_eq!(session.last_swolf(), 32);
    assert_eq!(view.status, "Sending data...");

    // hver lengde gikk rett ut til transport-laget
    let sent = sent.borrow();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].laps, 1);
    assert_eq!(sent[0].strokes, 4);
    assert_eq!(sent[0].duration, "00:00:58.00");
    assert_eq!(sent[0].social, ""); // ingen likes ennå
    assert_eq!(sent[1].laps, 2);
    assert_eq!(sent[1].pool, 25);
    assert_eq!(sent[1].swolf_avg, 32);
    assert_eq!(sent[1].ssi, 20);
}

#[test]
fn ssi_retains_its_value_when_a_lap_lacks_grounds() {
    // uten baseline fra forrige økt forblir SSI på sist beregnede verdi
    let clock = ManualClock::new(0.0);
    let mut session = WorkoutSession::with_clock(Box::new(clock.clone()));
    session.begin(25).expect("begin feilet");

    clock.advance(30.0);
    session.tick();
    for _ in 0..100 {
        session.feed_heading(350);
    }
    for _ in 0..103 {
        session.feed_heading(170);
    }
    assert_eq!(session.view().laps, 2);
    assert_eq!(session.view().ssi, 0); // ingen baseline -> beholdt startverdi
}

#[test]
fn tick_reschedules_only_while_running() {
    let clock = ManualClock::new(0.0);
    let mut session = WorkoutSession::with_clock(Box::new(clock));
    session.begin(50).expect("begin feilet");
    assert_eq!(session.tick(), Some(TICK_INTERVAL));

    session.pause();
    assert_eq!(session.tick(), None); // kansellering = ingen replanlegging

    session.resume();
    assert_eq!(session.tick(), Some(TICK_INTERVAL));
}

#[test]
fn pause_and_end_unsubscribe_the_sensors() {
    let mut session = WorkoutSession::new();
    let accel = FlagSensor::default();
    let compass = FlagSensor::default();
    session.set_accel_sensor(Box::new(accel.clone()));
    session.set_compass_sensor(Box::new(compass.clone()));

    session.begin(25).expect("begin feilet");
    assert!(accel.running.get());
    assert!(compass.running.get());

    session.pause();
    assert!(!accel.running.get());
    assert!(!compass.running.get());

    session.resume();
    assert!(accel.running.get());

    session.end();
    assert!(!accel.running.get());
    assert!(!compass.running.get());
}

#[test]
fn transitions_fire_haptic_pulses() {
    let mut session = WorkoutSession::new();
    let haptics = PulseLog::default();
    let pulses = haptics.pulses.clone();
    session.set_haptics(Box::new(haptics));

    session.begin(25).expect("begin feilet");
    session.pause();
    session.resume();
    session.receive_like("Anna", "Heia!");
    session.end();

    assert_eq!(
        *pulses.borrow(),
        vec![
            PulsePattern::Short,
            PulsePattern::Long,
            PulsePattern::Short,
            PulsePattern::Double,
            PulsePattern::Long,
        ]
    );
}

#[test]
fn likes_reach_the_view_and_the_outbox() {
    let mut session = WorkoutSession::new();
    let outbox = CapturingOutbox::default();
    let sent = outbox.sent.clone();
    session.set_outbox(Box::new(outbox));

    session.begin(25).expect("begin feilet");
    session.receive_like("Anna", "Heia!");
    assert_eq!(session.view().likes, 1);

    session.request_send();
    let sent = sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].likes, 1);
    assert_eq!(sent[0].social, "[Anna]: Heia!  ");
}

#[test]
fn send_acknowledgement_updates_the_status_line() {
    let mut session = WorkoutSession::new();
    session.begin(25).expect("begin feilet");

    session.request_send();
    assert_eq!(session.view().status, "Sending data...");

    session.handle_send_result(true);
    assert_eq!(session.view().status, "Data successfully sent!");

    session.handle_send_result(false);
    assert_eq!(session.view().status, "Send failed!");
}

#[test]
fn end_snapshots_the_baseline_and_resets_everything() {
    let clock = ManualClock::new(9000.0);
    let mut session = WorkoutSession::with_clock(Box::new(clock));
    session.restore(&StoredWorkout {
        workout_id: "2026-08-05 07:00:00".to_string(),
        elapsed_time: 300.0,
        strokes: 40,
        laps: 2,
        swolf_avg: 32,
        pool: 25,
        swolf_avg_prev: 40,
        ..StoredWorkout::default()
    });

    let stored = session.end();
    assert_eq!(stored.swolf_avg_prev, 32); // nytt snitt tok over som baseline
    assert_eq!(stored.laps, 0);
    assert_eq!(stored.strokes, 0);
    assert_eq!(stored.elapsed_time, 0.0);
    assert_eq!(stored.pool, 0);
    assert_eq!(stored.workout_id, ""); // fullført økt; neste får ny id

    let view = session.view();
    assert_eq!(view.elapsed_time, "00:00:00.00");
    assert_eq!(view.strokes, 0);
    assert_eq!(view.swolf_avg, 0);

    // uten skår beholdes gammel baseline
    let mut session = WorkoutSession::new();
    session.restore(&StoredWorkout {
        swolf_avg_prev: 40,
        ..StoredWorkout::default()
    });
    assert_eq!(session.end().swolf_avg_prev, 40);
}

#[test]
fn snapshot_restore_roundtrip_preserves_the_counters() {
    let clock = ManualClock::new(5000.0);
    let mut session = WorkoutSession::with_clock(Box::new(clock));

    let stored = StoredWorkout {
        workout_id: "2026-08-05 06:00:00".to_string(),
        elapsed_time: 1832.41,
        strokes: 124,
        laps: 18,
        swolf_avg: 33,
        pool: 25,
        swolf_avg_prev: 35,
        likes: 1,
        social: "[Bo]: hei  ".to_string(),
    };
    session.restore(&stored);

    assert_eq!(session.snapshot(), stored);
    assert!(!session.is_started()); // står pauset til brukeren gjenopptar
    assert_eq!(session.view().distance, 18 * 25);
}

#[test]
fn restore_discards_a_snapshot_with_invalid_pool() {
    let mut session = WorkoutSession::new();
    session.restore(&StoredWorkout {
        workout_id: "2026-08-05 06:00:00".to_string(),
        laps: 7,
        pool: 33,
        ..StoredWorkout::default()
    });

    let view = session.view();
    assert_eq!(view.laps, 0);
    assert_eq!(view.pool, 0);
}

#[test]
fn restore_regenerates_a_malformed_workout_id() {
    let mut session = WorkoutSession::new();
    session.restore(&StoredWorkout {
        workout_id: "bad".to_string(),
        pool: 25,
        ..StoredWorkout::default()
    });
    assert_eq!(session.workout_id().len(), WORKOUT_ID_LEN);
    assert_ne!(session.workout_id(), "bad");
}

#[test]
fn reset_score_history_clears_the_baseline() {
    let mut session = WorkoutSession::new();
    session.restore(&StoredWorkout {
        swolf_avg_prev: 40,
        ..StoredWorkout::default()
    });
    session.reset_score_history();
    assert_eq!(session.snapshot().swolf_avg_prev, 0);
}

#[test]
fn observers_get_a_view_after_every_mutating_event() {
    let mut session = WorkoutSession::new();
    let recorder = Recorder::default();
    let views = recorder.views.clone();
    session.add_observer(Box::new(recorder));

    session.begin(25).expect("begin feilet");
    session.tick();
    session.pause();
    assert_eq!(views.borrow().len(), 3);
    assert_eq!(views.borrow().last().map(|v| v.pool), Some(25));
}

#[test]
fn metrics_count_engine_events() {
    let clock = ManualClock::new(0.0);
    let mut session = WorkoutSession::with_clock(Box::new(clock));
    session.begin(25).expect("begin feilet");

    for _ in 0..35 {
        session.feed_accel(&active());
    }
    for _ in 0..40 {
        session.feed_heading(180);
    }

    assert_eq!(stroke_events_total(session.metrics()).get(), 1);
    assert_eq!(lap_events_total(session.metrics()).get(), 1);
    assert_eq!(outbox_sends_total(session.metrics()).get(), 1);
}

#[test]
fn report_renders_the_published_view() {
    let mut session = WorkoutSession::new();
    session.begin(50).expect("begin feilet");
    let report = format_workout_report(&session.view());
    assert!(report.contains("--- Workout Report ---"));
    assert!(report.contains("Pool: 50 m"));
    assert!(report.contains("SWOLF avg: 0"));
}
