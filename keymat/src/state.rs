use core::sync::atomic::{AtomicU16, Ordering};

/// Current debounced state of the whole matrix, one bit per key.
///
/// Written only by the scan-dispatch engine, readable from any execution
/// context. Every write touches a single bit of the row word with one atomic
/// bit-set/clear, so no reader ever observes a half-updated row. Readers see
/// a value at most one field period stale.
///
/// Each bit is an independent value and carries no ordering relationship to
/// other keys, hence the relaxed ordering throughout.
pub struct MatrixState<const ROW: usize, const COL: usize> {
    rows: [AtomicU16; ROW],
}

impl<const ROW: usize, const COL: usize> MatrixState<ROW, COL> {
    pub const fn new() -> Self {
        const {
            assert!(ROW >= 1 && ROW <= 16);
            assert!(COL >= 1 && COL <= 16);
        }
        Self {
            rows: [const { AtomicU16::new(0) }; ROW],
        }
    }

    /// Set or clear the bit for one key with a single atomic store.
    pub fn set(&self, row: usize, col: usize, pressed: bool) {
        let mask = 1u16 << col;
        if pressed {
            self.rows[row].fetch_or(mask, Ordering::Relaxed);
        } else {
            self.rows[row].fetch_and(!mask, Ordering::Relaxed);
        }
    }

    /// Most recently published state of one key.
    pub fn get(&self, row: usize, col: usize) -> bool {
        (self.rows[row].load(Ordering::Relaxed) >> col) & 1 != 0
    }

    /// The full row word; bit index = logical column.
    pub fn row_bits(&self, row: usize) -> u16 {
        self.rows[row].load(Ordering::Relaxed)
    }

    /// Initialize every key to the given polarity. Called once before
    /// scanning starts; the scan engine owns all writes afterwards.
    pub fn fill(&self, pressed: bool) {
        let word = if pressed { ((1u32 << COL) - 1) as u16 } else { 0 };
        for row in self.rows.iter() {
            row.store(word, Ordering::Relaxed);
        }
    }
}

impl<const ROW: usize, const COL: usize> Default for MatrixState<ROW, COL> {
    fn default() -> Self {
        Self::new()
    }
}
