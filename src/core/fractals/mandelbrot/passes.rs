use thiserror::Error;

pub const DEFAULT_PASS_COUNT: usize = 8;
pub const DEFAULT_BASE_SHIFT: u32 = 6;
pub const DEFAULT_SHIFT_PER_PASS: u32 = 2;
pub const DEFAULT_ITERATION_OFFSET: u32 = 32;
pub const DEFAULT_ALL_BLACK_SKIP_TO: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PassScheduleError {
    #[error("a render needs at least one pass")]
    ZeroPasses,
    #[error("iteration budget of pass {pass} does not fit in 32 bits (shift {shift})")]
    BudgetOverflow { pass: usize, shift: u32 },
}

/// Iteration budgets of the successive refinement passes.
///
/// Pass `p` runs with `2^(base_shift + p * shift_per_pass) + iteration_offset`
/// iterations, which with the defaults gives 96, 288, 1056, 4128, ... up to
/// 1048608 on the eighth pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PassSchedule {
    pass_count: usize,
    base_shift: u32,
    shift_per_pass: u32,
    iteration_offset: u32,
    all_black_skip_to: Option<usize>,
}

impl Default for PassSchedule {
    fn default() -> Self {
        Self {
            pass_count: DEFAULT_PASS_COUNT,
            base_shift: DEFAULT_BASE_SHIFT,
            shift_per_pass: DEFAULT_SHIFT_PER_PASS,
            iteration_offset: DEFAULT_ITERATION_OFFSET,
            all_black_skip_to: Some(DEFAULT_ALL_BLACK_SKIP_TO),
        }
    }
}

impl PassSchedule {
    pub fn new(pass_count: usize) -> Result<Self, PassScheduleError> {
        Self::default().with_pass_count(pass_count)
    }

    pub fn with_pass_count(self, pass_count: usize) -> Result<Self, PassScheduleError> {
        Self {
            pass_count,
            ..self
        }
        .validated()
    }

    pub fn with_iteration_formula(
        self,
        base_shift: u32,
        shift_per_pass: u32,
        iteration_offset: u32,
    ) -> Result<Self, PassScheduleError> {
        Self {
            base_shift,
            shift_per_pass,
            iteration_offset,
            ..self
        }
        .validated()
    }

    /// Pass to jump to when the first pass comes out entirely bounded.
    /// `None` refines through every pass regardless.
    #[must_use]
    pub fn with_all_black_skip(self, all_black_skip_to: Option<usize>) -> Self {
        Self {
            all_black_skip_to,
            ..self
        }
    }

    #[must_use]
    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    #[must_use]
    pub fn all_black_skip_to(&self) -> Option<usize> {
        self.all_black_skip_to
    }

    #[must_use]
    pub fn max_iterations(&self, pass: usize) -> u32 {
        self.shift_for(pass)
            .and_then(|shift| 1u32.checked_shl(shift))
            .map_or(u32::MAX, |budget| budget.saturating_add(self.iteration_offset))
    }

    /// Index of the pass that follows `pass`. Always moves forward.
    #[must_use]
    pub fn next_pass(&self, pass: usize, all_black: bool) -> usize {
        match self.all_black_skip_to {
            Some(target) if pass == 0 && all_black => target.max(pass + 1),
            _ => pass + 1,
        }
    }

    #[must_use]
    pub fn is_finished(&self, pass: usize) -> bool {
        pass >= self.pass_count
    }

    fn shift_for(&self, pass: usize) -> Option<u32> {
        let pass = u32::try_from(pass).ok()?;
        self.shift_per_pass
            .checked_mul(pass)?
            .checked_add(self.base_shift)
    }

    fn validated(self) -> Result<Self, PassScheduleError> {
        if self.pass_count == 0 {
            return Err(PassScheduleError::ZeroPasses);
        }

        let last = self.pass_count - 1;
        match self.shift_for(last) {
            Some(shift) if shift < u32::BITS => Ok(self),
            shift => Err(PassScheduleError::BudgetOverflow {
                pass: last,
                shift: shift.unwrap_or(u32::MAX),
            }),
        }
    }
}
