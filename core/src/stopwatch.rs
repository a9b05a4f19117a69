use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Tidskilde i sekunder (f64). Injisert slik at all tidsaritmetikk er
/// deterministisk i test (prod: SystemClock, test: ManualClock).
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// Veggklokke: sekunder siden epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Manuell klokke for tester; delt via Rc sånn at testen kan skru tiden
/// fram etter at klokka er flyttet inn i sesjonen.
#[derive(Debug, Clone)]
pub struct ManualClock {
    secs: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_secs: f64) -> Self {
        Self { secs: Rc::new(Cell::new(start_secs)) }
    }

    pub fn set(&self, secs: f64) {
        self.secs.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.secs.set(self.secs.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.secs.get()
    }
}

/// Pausebevisst stoppeklokke for økt- og lengdetid.
///
/// Pause lagrer pausetidspunktet; resume flytter begge origo framover med
/// pauseintervallet. Ingen akkumulert-varighet-felt: origo-forskyvningen
/// er hele regnskapet, så `elapsed` og `lap_time` ekskluderer pauser av
/// seg selv.
#[derive(Debug, Default, Clone)]
pub struct Stopwatch {
    start_time: f64,
    lap_start_time: f64,
    pause_time: f64,
    elapsed: f64,
    lap_time: f64,
    running: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start en ny måling fra null.
    pub fn start(&mut self, now: f64) {
        self.start_time = now;
        self.lap_start_time = now;
        self.pause_time = 0.0;
        self.elapsed = 0.0;
        self.lap_time = 0.0;
        self.running = true;
    }

    pub fn pause(&mut self, now: f64) {
        self.pause_time = now;
        self.running = false;
    }

    /// Skyv origo fram med pauseintervallet så pausen ikke telles med.
    pub fn resume(&mut self, now: f64) {
        if self.pause_time != 0.0 {
            let interval = now - self.pause_time;
            self.start_time += interval;
            self.lap_start_time += interval;
            self.pause_time = 0.0;
        }
        self.running = true;
    }

    /// Periodisk oppdatering (100 ms i drift). Frossen under pause.
    pub fn tick(&mut self, now: f64) {
        if self.running {
            self.elapsed = now - self.start_time;
            self.lap_time = now - self.lap_start_time;
        }
    }

    /// Ny lengde: nullstill lengdetiden mot nåtid.
    pub fn lap_reset(&mut self, now: f64) {
        self.lap_time = 0.0;
        self.lap_start_time = now;
    }

    /// Gjenoppbygg en pauset klokke fra et lagret tidsforbruk ved å
    /// tilbakedatere origo. Lengde-origo starter på nytt ved økt-origo.
    pub fn restore(&mut self, elapsed: f64, now: f64) {
        self.elapsed = elapsed;
        self.lap_time = 0.0;
        self.start_time = now - elapsed;
        self.lap_start_time = self.start_time;
        self.pause_time = now;
        self.running = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sekunder siden start (per siste tick), uten pauser.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Sekunder siden siste lengde (per siste tick), uten pauser.
    pub fn lap_time(&self) -> f64 {
        self.lap_time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Formater sekunder som "HH:MM:SS.CC" med ren trunkering (ingen
/// avrunding). Minutter/sekunder foldes mod 60; timefeltet vokser forbi
/// to siffer i stedet for å klippes.
pub fn format_elapsed(elapsed: f64) -> String {
    let hundredths = (elapsed * 100.0) as i64 % 100;
    let total = elapsed as i64;
    let seconds = total % 60;
    let minutes = total / 60 % 60;
    let hours = total / 3600;

    format!("{hours:02}:{minutes:02}:{seconds:02}.{hundredths:02}")
}
