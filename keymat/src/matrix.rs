use crate::channel::EventPublisher;
use crate::config::{ConfigError, MatrixConfig};
use crate::debounce::{DebouncerTrait, IntegratorDebouncer};
use crate::event::KeyEvent;
use crate::snapshot::{ScanHalf, SnapshotBuffer};
use crate::state::MatrixState;

/// Scan-dispatch engine: consumes completed snapshot halves and drives one
/// debouncer per key.
///
/// The row driver notifies [`Self::on_half_ready`] twice per field
/// (half-complete, full-complete) from a single interrupt priority, at most
/// one notification pending at a time. Everything here runs inside that
/// notification: non-blocking, allocation-free, with the single bounded
/// channel push in [`EventPublisher::publish`] as the only shared-structure
/// interaction. The full `ROW×COL` traversal must finish within one field
/// period minus margin, before the driver's circular transfer revisits the
/// half being read.
pub struct KeyMatrix<'a, D, P, const ROW: usize, const COL: usize>
where
    D: DebouncerTrait<ROW, COL>,
    P: EventPublisher,
{
    /// Capture double buffer, shared with the row driver.
    snapshot: &'a SnapshotBuffer<ROW>,
    /// Published debounced state, shared with arbitrary readers.
    state: &'a MatrixState<ROW, COL>,
    /// Per-key hysteresis state.
    debouncer: D,
    /// Physical input pin per logical column.
    col_pins: [u8; COL],
    /// Transition hand-off to the consumer context.
    publisher: P,
}

impl<'a, D, P, const ROW: usize, const COL: usize> KeyMatrix<'a, D, P, ROW, COL>
where
    D: DebouncerTrait<ROW, COL>,
    P: EventPublisher,
{
    /// Build the engine around an already-constructed debouncer. Debouncer
    /// and state store are forced to the same initial polarity, so the
    /// first published transition is always a real edge.
    pub fn new(
        snapshot: &'a SnapshotBuffer<ROW>,
        state: &'a MatrixState<ROW, COL>,
        mut debouncer: D,
        col_pins: [u8; COL],
        publisher: P,
        initial: bool,
    ) -> Self {
        debouncer.init(initial);
        state.fill(initial);
        Self {
            snapshot,
            state,
            debouncer,
            col_pins,
            publisher,
        }
    }

    /// Entry point for the row driver's half-complete and full-complete
    /// notifications: dispatch one captured field.
    ///
    /// Keys are visited in row-major ascending order; since only one
    /// notification executes at a time, that is also the cross-key event
    /// delivery order within a field.
    pub fn on_half_ready(&mut self, half: ScanHalf) {
        for row in 0..ROW {
            let raw = self.snapshot.read_row(half, row);
            for col in 0..COL {
                let input = (raw >> self.col_pins[col]) & 1 != 0;
                if self.debouncer.update(row, col, input) {
                    let pressed = self.debouncer.output(row, col);
                    self.state.set(row, col, pressed);
                    self.publisher.publish(KeyEvent::key(row as u8, col as u8, pressed));
                }
            }
        }
    }

    /// The shared state store this engine publishes to.
    pub fn state(&self) -> &'a MatrixState<ROW, COL> {
        self.state
    }
}

impl<'a, P, const ROW: usize, const COL: usize> KeyMatrix<'a, IntegratorDebouncer<ROW, COL>, P, ROW, COL>
where
    P: EventPublisher,
{
    /// Validate `config` and build the engine with the default debouncer.
    /// This is the fail-fast gate: an invalid configuration never reaches
    /// the scan loop.
    pub fn from_config(
        snapshot: &'a SnapshotBuffer<ROW>,
        state: &'a MatrixState<ROW, COL>,
        config: &MatrixConfig<ROW, COL>,
        publisher: P,
        initial: bool,
    ) -> Result<Self, ConfigError> {
        let thresholds = config.validate()?;
        info!(
            "Key matrix configured: {}x{}, transient {} / steady {} fields",
            ROW,
            COL,
            thresholds.transient(),
            thresholds.steady()
        );
        Ok(Self::new(
            snapshot,
            state,
            IntegratorDebouncer::new(thresholds, initial),
            config.col_pins,
            publisher,
            initial,
        ))
    }
}
