//! This module contains the configuration options of the factorization
//! pipeline. The options bound the work done by the splitting strategies that
//! have no a-priori termination guarantee. The default configuration is sane
//! for polynomials of a few thousand terms.
//!
//! All configuration options can also be set via environment variables.
//! Generally, the environment variables take precedence over the options set
//! in this module.

use std::cell::RefCell;

use arbitrary::Arbitrary;

thread_local! {
    static CONFIG: RefCell<Config> = RefCell::new(Config::new());
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct Config {
    pub cantor_zassenhaus_max_attempts: CantorZassenhausMaxAttempts,
    pub period_split_max_period: PeriodSplitMaxPeriod,
}

impl Config {
    fn new() -> Self {
        Self {
            cantor_zassenhaus_max_attempts: CantorZassenhausMaxAttempts::new(None),
            period_split_max_period: PeriodSplitMaxPeriod::new(None),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct CantorZassenhausMaxAttempts(usize);

impl CantorZassenhausMaxAttempts {
    const ENV_VAR: &'static str = "POLYFACTOR_CANTOR_ZASSENHAUS_MAX_ATTEMPTS";
    const DEFAULT: usize = 256;
    const MINIMUM: usize = 1;

    /// Creates a new `CantorZassenhausMaxAttempts` with the given value.
    /// Respects the precedence of the environment variable if set. Uses the
    /// default if no value is provided.
    fn new(config_value: Option<usize>) -> Self {
        let attempts = std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .or(config_value)
            .unwrap_or(Self::DEFAULT)
            .max(Self::MINIMUM);

        Self(attempts)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct PeriodSplitMaxPeriod(usize);

impl PeriodSplitMaxPeriod {
    const ENV_VAR: &'static str = "POLYFACTOR_PERIOD_SPLIT_MAX_PERIOD";
    const DEFAULT: usize = 4096;
    const MINIMUM: usize = 1;

    fn new(config_value: Option<usize>) -> Self {
        let period = std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .or(config_value)
            .unwrap_or(Self::DEFAULT)
            .max(Self::MINIMUM);

        Self(period)
    }
}

/// Sets the number of random polynomials the Cantor–Zassenhaus splitter draws
/// before giving up on a single equal-degree split.
///
/// Each draw succeeds with probability at least one half for squarefree
/// inputs, so the default is generous. Can also be set via the environment
/// variable `POLYFACTOR_CANTOR_ZASSENHAUS_MAX_ATTEMPTS`. The environment
/// variable has higher precedence than this function.
///
/// The default is 256. The minimum is always 1.
pub fn set_cantor_zassenhaus_max_attempts(attempts: usize) {
    let attempts = CantorZassenhausMaxAttempts::new(Some(attempts));
    CONFIG.with(|c| c.borrow_mut().cantor_zassenhaus_max_attempts = attempts);
}

/// Sets the largest period `N` the period-finding splitter searches for when
/// looking for the smallest `N` with `X^(p^N) ≡ X` modulo the polynomial.
///
/// Can also be set via the environment variable
/// `POLYFACTOR_PERIOD_SPLIT_MAX_PERIOD`. The environment variable has higher
/// precedence than this function.
///
/// The default is 4096. The minimum is always 1.
pub fn set_period_split_max_period(period: usize) {
    let period = PeriodSplitMaxPeriod::new(Some(period));
    CONFIG.with(|c| c.borrow_mut().period_split_max_period = period);
}

pub(crate) fn cantor_zassenhaus_max_attempts() -> usize {
    CONFIG.with(|c| c.borrow().cantor_zassenhaus_max_attempts).0
}

pub(crate) fn period_split_max_period() -> usize {
    CONFIG.with(|c| c.borrow().period_split_max_period).0
}
