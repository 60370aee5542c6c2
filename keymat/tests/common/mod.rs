#![allow(dead_code)]

use core::cell::{Cell, RefCell};

use heapless::Vec;
use keymat::channel::EventPublisher;
use keymat::debounce::{DebouncerTrait, Thresholds};
use keymat::event::KeyEvent;
use keymat::matrix::KeyMatrix;
use keymat::snapshot::{ScanHalf, SnapshotBuffer};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub fn thresholds(transient: i16, steady: i16) -> Thresholds {
    Thresholds::new(transient, steady).unwrap()
}

pub const EVENT_CAPACITY: usize = 256;

/// Publisher that records every transition for assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    events: RefCell<Vec<KeyEvent, EVENT_CAPACITY>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<KeyEvent, EVENT_CAPACITY> {
        core::mem::take(&mut *self.events.borrow_mut())
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: KeyEvent) {
        self.events.borrow_mut().push(event).unwrap();
    }
}

/// Publisher that only counts, for high-volume timing runs.
#[derive(Default)]
pub struct CountingPublisher {
    count: Cell<usize>,
}

impl CountingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl EventPublisher for CountingPublisher {
    fn publish(&self, _event: KeyEvent) {
        self.count.set(self.count.get() + 1);
    }
}

/// Drives the engine the way the hardware row driver does: fill the next
/// half of the double buffer, then deliver the completion notification.
/// Halves alternate like the circular DMA transfer's half/full interrupts.
pub struct SimulatedDriver<const ROW: usize> {
    next: ScanHalf,
}

impl<const ROW: usize> SimulatedDriver<ROW> {
    pub fn new() -> Self {
        Self {
            next: ScanHalf::First,
        }
    }

    pub fn deliver_field<D, P, const COL: usize>(
        &mut self,
        matrix: &mut KeyMatrix<'_, D, P, ROW, COL>,
        buffer: &SnapshotBuffer<ROW>,
        rows: &[u16; ROW],
    ) where
        D: DebouncerTrait<ROW, COL>,
        P: EventPublisher,
    {
        for (row, bits) in rows.iter().enumerate() {
            buffer.write_row(self.next, row, *bits);
        }
        matrix.on_half_ready(self.next);
        self.next = self.next.other();
    }
}

/// Snapshot word with the given logical columns pressed, routed through the
/// physical-pin permutation.
pub fn raw_row(col_pins: &[u8], pressed_cols: &[usize]) -> u16 {
    let mut bits = 0;
    for &col in pressed_cols {
        bits |= 1 << col_pins[col];
    }
    bits
}

pub fn raw_row_all(col_pins: &[u8]) -> u16 {
    let mut bits = 0;
    for &pin in col_pins {
        bits |= 1 << pin;
    }
    bits
}

/// Deterministic pseudorandom bit stream for property-style sequences.
pub struct Lcg(pub u32);

impl Lcg {
    pub fn next_bool(&mut self) -> bool {
        self.0 = self.0.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.0 >> 16) & 1 != 0
    }
}
