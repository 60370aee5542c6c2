use super::{DebouncerTrait, Fsm, Thresholds};

/// Per-key debounce state: the hysteresis FSM over a signed vote integrator.
///
/// The counter saturates at `±steady`. Leaving a steady state happens at
/// `∓(steady − transient)`, i.e. after `transient` fields of sustained
/// opposite votes; the counter is then re-centered at 0 and the transient is
/// confirmed (or reverted) when it saturates again.
#[derive(Clone, Copy, Debug)]
pub struct Integrator {
    counter: i16,
    state: Fsm,
}

impl Integrator {
    pub fn new(pressed: bool, thresholds: &Thresholds) -> Self {
        let mut key = Integrator {
            counter: 0,
            state: Fsm::SteadyLo,
        };
        key.init(pressed, thresholds);
        key
    }

    /// Jump to the steady state of the given polarity, counter saturated.
    pub fn init(&mut self, pressed: bool, thresholds: &Thresholds) {
        if pressed {
            self.counter = thresholds.steady();
            self.state = Fsm::SteadyHi;
        } else {
            self.counter = -thresholds.steady();
            self.state = Fsm::SteadyLo;
        }
    }

    pub fn output(&self) -> bool {
        self.state.output()
    }

    /// Run one debounce timestep. Returns whether the output changed.
    pub fn update(&mut self, input: bool, thresholds: &Thresholds) -> bool {
        let steady = thresholds.steady();
        let transient_abs = steady - thresholds.transient();

        if input {
            if self.counter < steady {
                self.counter += 1;
            }
        } else if self.counter > -steady {
            self.counter -= 1;
        }
        debug_assert!(-steady <= self.counter && self.counter <= steady);

        match self.state {
            Fsm::SteadyLo => {
                if self.counter >= -transient_abs {
                    self.counter = 0;
                    self.state = Fsm::TransientLoHi;
                    true
                } else {
                    false
                }
            }
            Fsm::TransientLoHi => {
                if self.counter == steady {
                    // Confirmed; output was already hi throughout.
                    self.state = Fsm::SteadyHi;
                    false
                } else if self.counter == -steady {
                    // Reversal before confirmation.
                    self.state = Fsm::SteadyLo;
                    true
                } else {
                    false
                }
            }
            Fsm::SteadyHi => {
                if self.counter <= transient_abs {
                    self.counter = 0;
                    self.state = Fsm::TransientHiLo;
                    true
                } else {
                    false
                }
            }
            Fsm::TransientHiLo => {
                if self.counter == -steady {
                    self.state = Fsm::SteadyLo;
                    false
                } else if self.counter == steady {
                    self.state = Fsm::SteadyHi;
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Signed symmetric-counter debouncer for a whole matrix, one
/// [`Integrator`] per key with the thresholds stored once.
pub struct IntegratorDebouncer<const ROW: usize, const COL: usize> {
    thresholds: Thresholds,
    keys: [[Integrator; COL]; ROW],
}

impl<const ROW: usize, const COL: usize> IntegratorDebouncer<ROW, COL> {
    pub fn new(thresholds: Thresholds, initial: bool) -> Self {
        Self {
            thresholds,
            keys: [[Integrator::new(initial, &thresholds); COL]; ROW],
        }
    }
}

impl<const ROW: usize, const COL: usize> DebouncerTrait<ROW, COL> for IntegratorDebouncer<ROW, COL> {
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
