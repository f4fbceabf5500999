use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use mec_core::{ErrorInfo, MecError};
use serde::{Deserialize, Serialize};

fn measure_error(code: &str, message: impl Into<String>) -> MecError {
    MecError::Measure(ErrorInfo::new(code, message))
}

fn default_timeout() -> f64 {
    3600.0
}

/// Configuration of the measurement sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasureOpts {
    /// Wall-clock budget in seconds; the sink raises `deadline-exceeded`
    /// at the first emission past it.
    #[serde(default = "default_timeout")]
    pub timeout_s: f64,
    /// Optional CSV file receiving one `n,elapsed_ms` row per emission.
    #[serde(default)]
    pub delay_log_path: Option<PathBuf>,
    /// Optional cap on emissions; the sink raises `emit-cap-reached`
    /// when a further emission would pass it.
    #[serde(default)]
    pub max_emits: Option<u64>,
}

impl Default for MeasureOpts {
    fn default() -> Self {
        Self {
            timeout_s: default_timeout(),
            delay_log_path: None,
            max_emits: None,
        }
    }
}

/// Final delay aggregate over one enumeration run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DelaySummary {
    /// Smallest inter-emission delay in nanoseconds.
    pub min_ns: u64,
    /// Largest inter-emission delay in nanoseconds.
    pub max_ns: u64,
    /// Mean inter-emission delay in nanoseconds.
    pub mean_ns: f64,
    /// Sample standard deviation of the delays in nanoseconds.
    pub std_ns: f64,
    /// Number of samples (one per emitted DAG).
    pub n: u64,
}

/// Running-statistics sink observed once per emitted DAG.
///
/// Each observation measures the wall clock elapsed since the previous
/// one and folds it into min/max and a Welford mean/M2 pair. The sink is
/// also the cooperative cancellation point: the deadline and the
/// emission cap are checked here and nowhere else, so enumerations
/// unwind exactly at emission boundaries. On cancellation the aggregate
/// stays valid for descriptive statistics; the caller's count does not.
#[derive(Debug)]
pub struct Measurement {
    start: Instant,
    last: Instant,
    timeout_s: f64,
    max_emits: Option<u64>,
    n: u64,
    min_ns: u64,
    max_ns: u64,
    mean: f64,
    m2: f64,
    log: Option<csv::Writer<File>>,
}

impl Measurement {
    /// Creates a sink from its configuration, opening the delay log if
    /// one was requested.
    pub fn new(opts: &MeasureOpts) -> Result<Self, MecError> {
        if !opts.timeout_s.is_finite() || opts.timeout_s <= 0.0 {
            return Err(measure_error("bad-timeout", "timeout must be a positive real")
                .with_measure_context("timeout_s", opts.timeout_s));
        }
        let log = match &opts.delay_log_path {
            None => None,
            Some(path) => {
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_path(path)
                    .map_err(|err| {
                        measure_error("delay-log-open", err.to_string())
                            .with_measure_context("path", path.display())
                    })?;
                writer
                    .write_record(["n", "elapsed_ms"])
                    .map_err(|err| measure_error("delay-log-write", err.to_string()))?;
                Some(writer)
            }
        };
        let now = Instant::now();
        Ok(Self {
            start: now,
            last: now,
            timeout_s: opts.timeout_s,
            max_emits: opts.max_emits,
            n: 0,
            min_ns: 0,
            max_ns: 0,
            mean: 0.0,
            m2: 0.0,
            log,
        })
    }

    /// Observes one emission. Raises `emit-cap-reached` before sampling
    /// when the cap is already met, and `deadline-exceeded` after folding
    /// the sample when the wall clock has passed the budget.
    pub fn record(&mut self) -> Result<(), MecError> {
        if let Some(cap) = self.max_emits {
            if self.n >= cap {
                return Err(
                    MecError::Enumerate(ErrorInfo::new("emit-cap-reached", "emission cap reached"))
                        .with_enum_context("cap", cap),
                );
            }
        }
        let ts = Instant::now();
        let elapsed = ts.duration_since(self.last);
        let elapsed_ns = elapsed.as_nanos().min(u64::MAX as u128) as u64;
        self.n += 1;
        if self.n == 1 {
            self.min_ns = elapsed_ns;
            self.max_ns = elapsed_ns;
        } else {
            self.min_ns = self.min_ns.min(elapsed_ns);
            self.max_ns = self.max_ns.max(elapsed_ns);
        }
        let delta = elapsed_ns as f64 - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (elapsed_ns as f64 - self.mean);
        if let Some(log) = &mut self.log {
            let elapsed_ms = elapsed.as_secs_f64() * 1e3;
            log.write_record([self.n.to_string(), format!("{elapsed_ms:.6}")])
                .map_err(|err| measure_error("delay-log-write", err.to_string()))?;
            log.flush()
                .map_err(|err| measure_error("delay-log-write", err.to_string()))?;
        }
        self.last = Instant::now();
        if ts.duration_since(self.start).as_secs_f64() >= self.timeout_s {
            return Err(measure_error("deadline-exceeded", "enumeration passed its deadline")
                .with_measure_context("emitted", self.n));
        }
        Ok(())
    }

    /// Samples recorded so far.
    pub fn samples(&self) -> u64 {
        self.n
    }

    /// Final aggregate; valid after both complete and cancelled runs.
    pub fn summary(&self) -> DelaySummary {
        let std_ns = if self.n >= 2 {
            (self.m2 / (self.n - 1) as f64).sqrt()
        } else {
            0.0
        };
        DelaySummary {
            min_ns: self.min_ns,
            max_ns: self.max_ns,
            mean_ns: self.mean,
            std_ns,
            n: self.n,
        }
    }
}

trait MeasureContextExt {
    fn with_measure_context(self, key: &str, value: impl ToString) -> MecError;
    fn with_enum_context(self, key: &str, value: impl ToString) -> MecError;
}

impl MeasureContextExt for MecError {
    fn with_measure_context(self, key: &str, value: impl ToString) -> MecError {
        match self {
            MecError::Measure(info) => MecError::Measure(info.with_context(key, value)),
            other => other,
        }
    }

    fn with_enum_context(self, key: &str, value: impl ToString) -> MecError {
        match self {
            MecError::Enumerate(info) => MecError::Enumerate(info.with_context(key, value)),
            other => other,
        }
    }
}
