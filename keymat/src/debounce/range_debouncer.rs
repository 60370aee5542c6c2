use super::{DebouncerTrait, Fsm, Thresholds};

/// Per-key debounce state: the hysteresis FSM over an unsigned counter.
///
/// Re-encoding of [`super::Integrator`] with the counter shifted by
/// `+steady`: the range is `[0, 2·steady]`, steady-lo leaves at `transient`,
/// steady-hi leaves at `2·steady − transient`, and entering a transient
/// re-centers the counter at `steady`. Same machine, same transitions, only
/// the counter encoding differs; equivalence is covered by test.
#[derive(Clone, Copy, Debug)]
pub struct RangeCell {
    counter: u16,
    state: Fsm,
}

impl RangeCell {
    pub fn new(pressed: bool, thresholds: &Thresholds) -> Self {
        let mut key = RangeCell {
            counter: 0,
            state: Fsm::SteadyLo,
        };
        key.init(pressed, thresholds);
        key
    }

    /// Jump to the steady state of the given polarity, counter saturated.
    pub fn init(&mut self, pressed: bool, thresholds: &Thresholds) {
        if pressed {
            self.counter = 2 * thresholds.steady() as u16;
            self.state = Fsm::SteadyHi;
        } else {
            self.counter = 0;
            self.state = Fsm::SteadyLo;
        }
    }

    pub fn output(&self) -> bool {
        self.state.output()
    }

    /// Run one debounce timestep. Returns whether the output changed.
    pub fn update(&mut self, input: bool, thresholds: &Thresholds) -> bool {
        let mid = thresholds.steady() as u16;
        let max = 2 * mid;
        let transient = thresholds.transient() as u16;

        if input {
            if self.counter < max {
                self.counter += 1;
            }
        } else if self.counter > 0 {
            self.counter -= 1;
        }
        debug_assert!(self.counter <= max);

        match self.state {
            Fsm::SteadyLo => {
                if self.counter >= transient {
                    self.counter = mid;
                    self.state = Fsm::TransientLoHi;
                    true
                } else {
                    false
                }
            }
            Fsm::TransientLoHi => {
                if self.counter == max {
                    self.state = Fsm::SteadyHi;
                    false
                } else if self.counter == 0 {
                    self.state = Fsm::SteadyLo;
                    true
                } else {
                    false
                }
            }
            Fsm::SteadyHi => {
                if self.counter <= max - transient {
                    self.counter = mid;
                    self.state = Fsm::TransientHiLo;
                    true
                } else {
                    false
                }
            }
            Fsm::TransientHiLo => {
                if self.counter == 0 {
                    self.state = Fsm::SteadyLo;
                    false
                } else if self.counter == max {
                    self.state = Fsm::SteadyHi;
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Unsigned range-counter debouncer for a whole matrix, one [`RangeCell`]
/// per key with the thresholds stored once.
pub struct RangeDebouncer<const ROW: usize, const COL: usize> {
    thresholds: Thresholds,
    keys: [[RangeCell; COL]; ROW],
}

impl<const ROW: usize, const COL: usize> RangeDebouncer<ROW, COL> {
    pub fn new(thresholds: Thresholds, initial: bool) -> Self {
        Self {
            thresholds,
            keys: [[RangeCell::new(initial, &thresholds); COL]; ROW],
        }
    }
}

impl<const ROW: usize, const COL: usize> DebouncerTrait<ROW, COL> for RangeDebouncer<ROW, COL> {
    fn init(&mut self, pressed: bool) {
        for row in self.keys.iter_mut() {
            for key in row.iter_mut() {
                key.init(pressed, &self.thresholds);
            }
        }
    }

    fn update(&mut self, row: usize, col: usize, input: bool) -> bool {
        self.keys[row][col].update(input, &self.thresholds)
    }

    fn output(&self, row: usize, col: usize) -> bool {
        self.keys[row][col].output()
    }
}
