//! Time source abstraction for real, simulated and fixed time.
//!
//! Everything in happyhour that needs "now" asks this module instead of
//! calling `Local::now()` directly. That lets the `simulate` command run the
//! board through a whole day in seconds, and lets tests pin the clock.

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDateTime, TimeZone};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration as StdDuration, Instant};

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Local>;

    /// Sleep for the specified duration (or simulate it)
    fn sleep(&self, duration: StdDuration);

    /// Check if this is a simulated time source
    fn is_simulated(&self) -> bool;

    /// Check if simulation has ended (always false for real time)
    fn is_ended(&self) -> bool {
        false
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Simulated time source for time-accelerated runs of the board.
///
/// Two modes:
/// - Linear acceleration: simulated time flows at `multiplier` times real time.
/// - Fast-forward (`multiplier == 0.0`): every sleep jumps the clock instantly.
///
/// Simulated time never passes `end_time`.
pub struct SimulatedTimeSource {
    start_time: DateTime<Local>,
    end_time: DateTime<Local>,
    multiplier: f64,
    real_start: Instant,
    /// Current simulated time in fast-forward mode
    fast_forward_current: Mutex<DateTime<Local>>,
}

impl SimulatedTimeSource {
    /// Create a new simulated time source.
    ///
    /// A negative multiplier falls back to the default of one simulated hour
    /// per real second.
    pub fn new(start_time: DateTime<Local>, end_time: DateTime<Local>, multiplier: f64) -> Self {
        let multiplier = if multiplier < 0.0 {
            crate::common::constants::DEFAULT_SIMULATION_MULTIPLIER
        } else {
            multiplier
        };
        Self {
            start_time,
            end_time,
            multiplier,
            real_start: Instant::now(),
            fast_forward_current: Mutex::new(start_time),
        }
    }

    pub fn is_fast_forward(&self) -> bool {
        self.multiplier == 0.0
    }

    fn current_time(&self) -> DateTime<Local> {
        if self.is_fast_forward() {
            return *lock(&self.fast_forward_current);
        }

        // Compared as floats first so huge multipliers cannot overflow chrono
        let span_ms = (self.end_time - self.start_time).num_milliseconds() as f64;
        let simulated_ms = self.real_start.elapsed().as_secs_f64() * self.multiplier * 1000.0;
        if simulated_ms.is_nan() || simulated_ms >= span_ms {
            return self.end_time;
        }
        self.start_time
            .checked_add_signed(ChronoDuration::milliseconds(simulated_ms as i64))
            .map_or(self.end_time, |simulated| simulated.min(self.end_time))
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Local> {
        self.current_time()
    }

    fn sleep(&self, duration: StdDuration) {
        if self.is_fast_forward() {
            let mut current = lock(&self.fast_forward_current);
            let step = ChronoDuration::milliseconds(duration.as_millis() as i64);
            *current = (*current + step).min(self.end_time);
            drop(current);
            // Yield briefly so log output keeps up
            std::thread::sleep(StdDuration::from_millis(1));
            return;
        }

        let remaining = (self.end_time - self.current_time())
            .to_std()
            .unwrap_or(StdDuration::ZERO);
        let simulated = duration.min(remaining);
        if !simulated.is_zero() {
            std::thread::sleep(simulated.div_f64(self.multiplier));
        }
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn is_ended(&self) -> bool {
        self.current_time() >= self.end_time
    }
}

/// Manually driven clock for tests: `sleep` advances it instantly.
#[cfg(any(test, feature = "testing-support"))]
pub struct FixedTimeSource {
    current: Mutex<DateTime<Local>>,
}

#[cfg(any(test, feature = "testing-support"))]
impl FixedTimeSource {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    pub fn set(&self, time: DateTime<Local>) {
        *lock(&self.current) = time;
    }

    pub fn advance(&self, duration: StdDuration) {
        let mut current = lock(&self.current);
        *current += ChronoDuration::milliseconds(duration.as_millis() as i64);
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Local> {
        *lock(&self.current)
    }

    fn sleep(&self, duration: StdDuration) {
        self.advance(duration);
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

fn current() -> &'static Arc<dyn TimeSource> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource))
}

/// Get the current time from the global time source
pub fn now() -> DateTime<Local> {
    current().now()
}

/// Sleep for the specified duration using the global time source
pub fn sleep(duration: StdDuration) {
    current().sleep(duration)
}

/// Check if we're running in simulation mode
pub fn is_simulated() -> bool {
    current().is_simulated()
}

/// Check if simulation has reached its end time (always false for real time)
pub fn simulation_ended() -> bool {
    current().is_ended()
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS" as local time
pub fn parse_datetime(s: &str) -> anyhow::Result<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map_err(|e| {
        anyhow::anyhow!("Invalid datetime '{s}': {e}. Use YYYY-MM-DD HH:MM:SS")
    })?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| anyhow::anyhow!("'{s}' does not exist in the local timezone"))
}
