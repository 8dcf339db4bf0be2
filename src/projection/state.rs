//! Accrual state tracking for a single projection

use crate::params::CalculationParams;

/// When pending interest is folded into the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundingSchedule {
    /// Frequency of 12 or more (daily included)
    EveryMonth,
    /// Capitalize when the month within the year is a multiple of the interval
    EveryNMonths(u32),
    /// Frequency of zero: interest accrues but is never capitalized
    Never,
}

impl CompoundingSchedule {
    /// Map compounding events per year onto a whole-month interval.
    ///
    /// interval = max(1, floor(12 / frequency)), so daily (365) collapses to
    /// monthly. A zero frequency gives an unbounded interval.
    pub fn from_frequency(compound_frequency: u32) -> Self {
        match compound_frequency {
            0 => CompoundingSchedule::Never,
            f if f >= 12 => CompoundingSchedule::EveryMonth,
            f => CompoundingSchedule::EveryNMonths((12 / f).max(1)),
        }
    }

    /// Interval in months, `None` when interest never capitalizes
    pub fn interval_months(&self) -> Option<u32> {
        match self {
            CompoundingSchedule::EveryMonth => Some(1),
            CompoundingSchedule::EveryNMonths(n) => Some(*n),
            CompoundingSchedule::Never => None,
        }
    }

    /// Whether capitalization happens at the end of this month (1-12)
    pub fn capitalizes_in(&self, month_in_year: u32) -> bool {
        match self {
            CompoundingSchedule::EveryMonth => true,
            CompoundingSchedule::EveryNMonths(n) => month_in_year % n == 0,
            CompoundingSchedule::Never => false,
        }
    }
}

/// Running state of a projection at a point in time
#[derive(Debug, Clone)]
pub struct AccrualState {
    /// Current projection month (1-indexed, 0 before the first month)
    pub projection_month: u32,

    /// Projection year (1-indexed)
    pub year: u32,

    /// Month within year (1-12)
    pub month_in_year: u32,

    /// Capitalized balance
    pub balance: f64,

    /// Principal plus all contributions to date
    pub total_invested: f64,

    /// Interest accrued since the last capitalization
    pub pending_interest: f64,
}

impl AccrualState {
    /// Initialize state at time 0
    pub fn from_params(params: &CalculationParams) -> Self {
        Self {
            projection_month: 0,
            year: 1,
            month_in_year: 0,
            balance: params.initial_principal,
            total_invested: params.initial_principal,
            pending_interest: 0.0,
        }
    }

    /// Advance timing to the next month
    pub fn advance_month(&mut self) {
        self.projection_month += 1;
        self.year = (self.projection_month - 1) / 12 + 1;
        self.month_in_year = (self.projection_month - 1) % 12 + 1;
    }

    /// Accrue one month of simple interest on the current balance.
    /// Returns the amount accrued.
    pub fn accrue(&mut self, monthly_rate: f64) -> f64 {
        let interest = self.balance * monthly_rate;
        self.pending_interest += interest;
        interest
    }

    /// End-of-month contribution
    pub fn contribute(&mut self, amount: f64) {
        self.balance += amount;
        self.total_invested += amount;
    }

    /// Fold pending interest into the balance. Returns the amount folded.
    pub fn capitalize(&mut self) -> f64 {
        let folded = self.pending_interest;
        self.balance += folded;
        self.pending_interest = 0.0;
        folded
    }

    /// Capitalized interest to date
    pub fn interest_earned(&self) -> f64 {
        self.balance - self.total_invested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_from_frequency() {
        assert_eq!(CompoundingSchedule::from_frequency(1), CompoundingSchedule::EveryNMonths(12));
        assert_eq!(CompoundingSchedule::from_frequency(4), CompoundingSchedule::EveryNMonths(3));
        assert_eq!(CompoundingSchedule::from_frequency(5), CompoundingSchedule::EveryNMonths(2));
        assert_eq!(CompoundingSchedule::from_frequency(7), CompoundingSchedule::EveryNMonths(1));
        assert_eq!(CompoundingSchedule::from_frequency(12), CompoundingSchedule::EveryMonth);
        assert_eq!(CompoundingSchedule::from_frequency(365), CompoundingSchedule::EveryMonth);
        assert_eq!(CompoundingSchedule::from_frequency(0), CompoundingSchedule::Never);
        assert_eq!(CompoundingSchedule::Never.interval_months(), None);
    }

    #[test]
    fn test_quarterly_capitalization_months() {
        let schedule = CompoundingSchedule::from_frequency(4);
        let months: Vec<u32> = (1..=12).filter(|&m| schedule.capitalizes_in(m)).collect();
        assert_eq!(months, vec![3, 6, 9, 12]);
    }

    #[test]
    fn test_advance_month_timing() {
        let mut state = AccrualState::from_params(&CalculationParams::default());
        for _ in 0..13 {
            state.advance_month();
        }
        assert_eq!(state.projection_month, 13);
        assert_eq!(state.year, 2);
        assert_eq!(state.month_in_year, 1);
    }

    #[test]
    fn test_accrue_contribute_capitalize() {
        let params = CalculationParams::new(1000.0, 100.0, 12.0, 0.0, 1, 12);
        let mut state = AccrualState::from_params(&params);

        let interest = state.accrue(0.01);
        assert_eq!(interest, 10.0);
        state.contribute(100.0);
        assert_eq!(state.balance, 1100.0);
        assert_eq!(state.pending_interest, 10.0);

        assert_eq!(state.capitalize(), 10.0);
        assert_eq!(state.balance, 1110.0);
        assert_eq!(state.pending_interest, 0.0);
        assert_eq!(state.total_invested, 1100.0);
        assert_eq!(state.interest_earned(), 10.0);
    }
}
