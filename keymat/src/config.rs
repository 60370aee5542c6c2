use embassy_time::Duration;

use crate::debounce::Thresholds;

/// Row and column counts are limited by the one-word-per-row snapshot and
/// state formats.
pub const MAX_DIM: usize = 16;

/// Configuration errors are static failures: every variant is caught by
/// [`MatrixConfig::validate`] before scanning starts, never at scan time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Converted thresholds must satisfy `0 < transient < steady`.
    ThresholdOrder,
    /// Converted steady threshold does not fit the per-key counter.
    CounterWidth,
    /// Row or column count outside `[1, MAX_DIM]`.
    Dimension,
    /// A pin index is not below [`MAX_DIM`].
    PinOutOfRange,
    /// The same pin appears twice within one pin list.
    DuplicatePin,
    /// `read_delay` must fall within `row_period`.
    ReadDelay,
    /// `row_period` must be non-zero.
    FieldPeriod,
}

/// Scan-cycle timing. Debounce thresholds are specified in time units and
/// converted to field counts against the field period.
#[derive(Clone, Copy, Debug)]
pub struct ScanTiming {
    /// Duration of one row being active within a scan cycle.
    pub row_period: Duration,
    /// Time from driving a row to sampling its columns; consumed by the row
    /// driver's output-compare setup.
    pub read_delay: Duration,
    /// How long a reading must persist to optimistically flip the output.
    pub transient: Duration,
    /// How long a reading must persist to be confirmed as steady.
    pub steady: Duration,
}

impl ScanTiming {
    /// One full pass over all rows: the debounce timestep.
    pub fn field_period(&self, rows: usize) -> Duration {
        self.row_period * rows as u32
    }

    /// Convert the time-unit thresholds to field counts by ceiling division,
    /// so a threshold is never rounded below the requested duration.
    pub fn thresholds(&self, rows: usize) -> Result<Thresholds, ConfigError> {
        let field_us = self.field_period(rows).as_micros();
        if field_us == 0 {
            return Err(ConfigError::FieldPeriod);
        }
        let transient = self.transient.as_micros().div_ceil(field_us);
        let steady = self.steady.as_micros().div_ceil(field_us);
        if transient >= steady {
            return Err(ConfigError::ThresholdOrder);
        }
        if steady > i16::MAX as u64 {
            return Err(ConfigError::CounterWidth);
        }
        Thresholds::new(transient as i16, steady as i16)
    }
}

/// Static configuration of one physical matrix: dimensions as const
/// generics, pin assignment, scan timing. Fixed at startup, never mutated
/// at runtime.
#[derive(Clone, Copy, Debug)]
pub struct MatrixConfig<const ROW: usize, const COL: usize> {
    /// Output pin index per logical row, in activation order. Consumed by
    /// the row driver; the activation order defines the logical row index.
    pub row_pins: [u8; ROW],
    /// Physical input pin index per logical column. The same permutation
    /// applies to every row of a snapshot.
    pub col_pins: [u8; COL],
    pub timing: ScanTiming,
}

impl<const ROW: usize, const COL: usize> MatrixConfig<ROW, COL> {
    /// Fail-fast validation of the whole configuration surface. Returns the
    /// converted field-count thresholds on success.
    pub fn validate(&self) -> Result<Thresholds, ConfigError> {
        if ROW == 0 || ROW > MAX_DIM || COL == 0 || COL > MAX_DIM {
            return Err(ConfigError::Dimension);
        }
        check_pins(&self.row_pins)?;
        check_pins(&self.col_pins)?;
        if self.timing.read_delay >= self.timing.row_period {
            return Err(ConfigError::ReadDelay);
        }
        self.timing.thresholds(ROW)
    }
}

fn check_pins(pins: &[u8]) -> Result<(), ConfigError> {
    for (i, &pin) in pins.iter().enumerate() {
        if pin as usize >= MAX_DIM {
            return Err(ConfigError::PinOutOfRange);
        }
        if pins[..i].contains(&pin) {
            return Err(ConfigError::DuplicatePin);
        }
    }
    Ok(())
}
