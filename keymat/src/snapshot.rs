use core::sync::atomic::{AtomicU16, Ordering};

/// Identifies one half of the capture double buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanHalf {
    First,
    Second,
}

impl ScanHalf {
    pub const fn index(self) -> usize {
        match self {
            ScanHalf::First => 0,
            ScanHalf::Second => 1,
        }
    }

    pub const fn other(self) -> ScanHalf {
        match self {
            ScanHalf::First => ScanHalf::Second,
            ScanHalf::Second => ScanHalf::First,
        }
    }

    /// Map a DMA half-transfer interrupt flag to the half that just
    /// completed: flag set means the first half was filled, flag clear means
    /// the interrupt came from the transfer-complete end, i.e. the second.
    pub const fn from_half_transfer_flag(flag: bool) -> ScanHalf {
        if flag { ScanHalf::First } else { ScanHalf::Second }
    }
}

/// Double-buffered raw pin-state snapshots, one word per row per half.
///
/// Bit positions are *physical* input pins, not logical columns; the scan
/// engine applies the configured pin permutation when it reads a row.
///
/// The two halves are exclusively partitioned between the capture driver and
/// the scan engine: while the driver fills half X, the engine may only read
/// half `X.other()`, and must finish before the driver's circular transfer
/// wraps back around. That partition is the synchronization protocol; the
/// atomics only make individual word accesses tear-free.
pub struct SnapshotBuffer<const ROW: usize> {
    halves: [[AtomicU16; ROW]; 2],
}

impl<const ROW: usize> SnapshotBuffer<ROW> {
    pub const fn new() -> Self {
        const {
            assert!(ROW >= 1 && ROW <= 16);
        }
        Self {
            halves: [const { [const { AtomicU16::new(0) }; ROW] }; 2],
        }
    }

    /// Raw captured word for one row of a completed half.
    pub fn read_row(&self, half: ScanHalf, row: usize) -> u16 {
        self.halves[half.index()][row].load(Ordering::Relaxed)
    }

    /// Store one row's captured pin state. Producer side; also used by
    /// simulated drivers in tests.
    pub fn write_row(&self, half: ScanHalf, row: usize, bits: u16) {
        self.halves[half.index()][row].store(bits, Ordering::Relaxed);
    }

    /// Base address of the backing region, for programming a circular DMA
    /// transfer of [`Self::word_count`] half-words. The driver must respect
    /// the half-partition contract above.
    pub fn as_dma_ptr(&self) -> *mut u16 {
        self.halves.as_ptr().cast::<u16>().cast_mut()
    }

    /// Total number of half-words in the region: both halves, `ROW` each.
    pub const fn word_count(&self) -> usize {
        2 * ROW
    }
}

impl<const ROW: usize> Default for SnapshotBuffer<ROW> {
    fn default() -> Self {
        Self::new()
    }
}
