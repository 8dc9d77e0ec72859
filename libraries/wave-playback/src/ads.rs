//! Ad break sub-state machine
//!
//! An inserted ad arms a fixed-length hold on the player's timeline.
//! Elapsed time is consumed against the hold before it reaches the
//! loaded item, so the item makes no progress and records no listens
//! while the hold runs. The ad's price is credited to the revenue
//! ledger exactly once, the moment the countdown reaches zero. An
//! armed hold that is still pending when the item runs out is settled
//! at full price; a new load cancels it unpaid.

use serde::{Deserialize, Serialize};
use wave_core::RevenueLedger;

/// Timeline units an inserted ad occupies before playback resumes
pub const AD_HOLD_UNITS: u64 = 11;

/// Ad hold state for one player
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AdBreak {
    /// No ad pending
    #[default]
    Idle,

    /// An ad is consuming the timeline
    Holding {
        /// Units left before playback resumes
        remaining: u64,
        /// Price credited when the hold completes
        price: f64,
    },
}

impl AdBreak {
    /// Arm a hold at full length
    ///
    /// Re-arming while a hold is pending restarts the countdown and
    /// replaces the price; the superseded ad is never paid.
    pub fn arm(&mut self, price: f64) {
        *self = Self::Holding {
            remaining: AD_HOLD_UNITS,
            price,
        };
    }

    /// Drop a pending hold without paying it
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Whether a hold is pending
    pub fn is_holding(&self) -> bool {
        matches!(self, Self::Holding { .. })
    }

    /// Consume `elapsed` against the hold, returning what is left for
    /// the loaded item
    ///
    /// Credits the price exactly once, when the countdown reaches zero.
    pub fn consume(&mut self, elapsed: u64, ledger: &mut dyn RevenueLedger) -> u64 {
        match *self {
            Self::Idle => elapsed,
            Self::Holding { remaining, price } => {
                if elapsed < remaining {
                    *self = Self::Holding {
                        remaining: remaining - elapsed,
                        price,
                    };
                    0
                } else {
                    ledger.credit_ad_revenue(price);
                    *self = Self::Idle;
                    elapsed - remaining
                }
            }
        }
    }

    /// Pay out a pending hold early, when the loaded item runs out
    pub fn settle(&mut self, ledger: &mut dyn RevenueLedger) {
        if let Self::Holding { price, .. } = *self {
            ledger.credit_ad_revenue(price);
            *self = Self::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct SpyLedger {
        credits: Vec<f64>,
    }

    impl RevenueLedger for SpyLedger {
        fn credit_ad_revenue(&mut self, price: f64) {
            self.credits.push(price);
        }

        fn credit_premium_share(&mut self) {}
    }

    #[test]
    fn partial_consumption_absorbs_the_whole_tick() {
        let mut ad = AdBreak::default();
        let mut ledger = SpyLedger::default();
        ad.arm(30.0);

        assert_eq!(ad.consume(5, &mut ledger), 0);
        assert_eq!(ad, AdBreak::Holding {
            remaining: 6,
            price: 30.0
        });
        assert!(ledger.credits.is_empty());
    }

    #[test]
    fn completion_credits_once_and_returns_the_leftover() {
        let mut ad = AdBreak::default();
        let mut ledger = SpyLedger::default();
        ad.arm(30.0);

        assert_eq!(ad.consume(15, &mut ledger), 4);
        assert_eq!(ad, AdBreak::Idle);
        assert_eq!(ledger.credits, vec![30.0]);

        // Once idle, time passes straight through
        assert_eq!(ad.consume(15, &mut ledger), 15);
        assert_eq!(ledger.credits, vec![30.0]);
    }

    #[test]
    fn exact_consumption_completes_with_zero_leftover() {
        let mut ad = AdBreak::default();
        let mut ledger = SpyLedger::default();
        ad.arm(10.0);

        assert_eq!(ad.consume(AD_HOLD_UNITS, &mut ledger), 0);
        assert_eq!(ad, AdBreak::Idle);
        assert_eq!(ledger.credits, vec![10.0]);
    }

    #[test]
    fn settle_pays_a_pending_hold_once() {
        let mut ad = AdBreak::default();
        let mut ledger = SpyLedger::default();
        ad.arm(25.0);

        ad.settle(&mut ledger);
        ad.settle(&mut ledger);
        assert_eq!(ledger.credits, vec![25.0]);
    }

    #[test]
    fn cancel_drops_the_hold_unpaid() {
        let mut ad = AdBreak::default();
        let mut ledger = SpyLedger::default();
        ad.arm(25.0);

        ad.cancel();
        assert!(!ad.is_holding());
        assert!(ledger.credits.is_empty());
    }

    #[test]
    fn rearming_restarts_the_countdown() {
        let mut ad = AdBreak::default();
        let mut ledger = SpyLedger::default();
        ad.arm(25.0);
        assert_eq!(ad.consume(8, &mut ledger), 0);

        ad.arm(40.0);
        assert_eq!(ad, AdBreak::Holding {
            remaining: AD_HOLD_UNITS,
            price: 40.0
        });
    }
}
