//! Valuing Meteora vault LP shares.
//!
//! Profit reported by a vault's strategies is not released at once. It is
//! locked and then unlocked linearly, so share prices cannot be front-run by
//! depositing just before a report.

use serde::{Deserialize, Serialize};

use crate::state::MeteoraVault;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedProfitTracker {
    /// Profit still locked as of `last_report`.
    pub last_updated_locked_profit: u64,

    /// Unix timestamp of the last strategy report.
    pub last_report: u64,

    /// Seconds over which the locked profit fully unlocks.
    pub locked_profit_degradation: u64,
}

impl LockedProfitTracker {
    /// Profit still locked at `now`.
    pub fn calculate_locked_profit(&self, now: u64) -> u64 {
        if now <= self.last_report {
            return self.last_updated_locked_profit;
        }
        if self.locked_profit_degradation == 0 {
            return 0;
        }
        let elapsed = (now - self.last_report) as u128;
        let locked = self.last_updated_locked_profit as u128;
        let degradation = locked * elapsed / self.locked_profit_degradation as u128;
        locked.saturating_sub(degradation) as u64
    }
}

impl MeteoraVault {
    /// Liquidity that currently backs the LP supply.
    pub fn get_unlocked_amount(&self, now: u64) -> u64 {
        self.total_amount
            .saturating_sub(self.locked_profit_tracker.calculate_locked_profit(now))
    }

    /// Token units redeemable for `share` LP tokens. `None` when the LP
    /// supply is zero.
    pub fn get_amount_by_share(&self, now: u64, share: u64, total_supply: u64) -> Option<u64> {
        if total_supply == 0 {
            return None;
        }
        let amount =
            share as u128 * self.get_unlocked_amount(now) as u128 / total_supply as u128;
        Some(u64::try_from(amount).unwrap_or(u64::MAX))
    }

    /// LP tokens that must be burned to withdraw `out_token` units.
    pub fn get_unmint_amount(&self, now: u64, out_token: u64, total_supply: u64) -> Option<u64> {
        let unlocked = self.get_unlocked_amount(now);
        if total_supply == 0 || unlocked == 0 {
            return None;
        }
        let shares = out_token as u128 * total_supply as u128 / unlocked as u128;
        Some(u64::try_from(shares).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{tests::key, METEORA_MAX_STRATEGY};
    use solana_program::pubkey::Pubkey;

    fn tracker() -> LockedProfitTracker {
        LockedProfitTracker {
            last_updated_locked_profit: 1_000,
            last_report: 100,
            locked_profit_degradation: 50,
        }
    }

    fn vault(total_amount: u64, locked_profit_tracker: LockedProfitTracker) -> MeteoraVault {
        MeteoraVault {
            enabled: true,
            bumps: [0; 2],
            total_amount,
            token_vault: key(1),
            fee_vault: key(2),
            token_mint: key(3),
            lp_mint: key(4),
            strategies: [Pubkey::default(); METEORA_MAX_STRATEGY],
            base: key(5),
            admin: key(6),
            operator: key(7),
            locked_profit_tracker,
        }
    }

    #[test]
    fn locked_profit_is_unchanged_until_after_report() {
        let t = tracker();
        assert_eq!(t.calculate_locked_profit(0), 1_000);
        assert_eq!(t.calculate_locked_profit(100), 1_000);
        assert_eq!(t.calculate_locked_profit(101), 980);
        assert_eq!(t.calculate_locked_profit(125), 500);
    }

    #[test]
    fn locked_profit_decays_to_zero() {
        let t = tracker();
        assert_eq!(t.calculate_locked_profit(150), 0);
        assert_eq!(t.calculate_locked_profit(u64::MAX), 0);

        let huge = LockedProfitTracker {
            last_updated_locked_profit: u64::MAX,
            ..t
        };
        assert_eq!(huge.calculate_locked_profit(u64::MAX), 0);
    }

    #[test]
    fn zero_degradation_rate_unlocks_everything() {
        let t = LockedProfitTracker {
            locked_profit_degradation: 0,
            ..tracker()
        };
        assert_eq!(t.calculate_locked_profit(100), 1_000);
        assert_eq!(t.calculate_locked_profit(101), 0);
    }

    #[test]
    fn share_value_excludes_locked_profit() {
        let v = vault(11_000, tracker());
        assert_eq!(v.get_unlocked_amount(100), 10_000);
        assert_eq!(v.get_amount_by_share(100, 500, 1_000), Some(5_000));
        assert_eq!(v.get_amount_by_share(200, 500, 1_000), Some(5_500));
        assert_eq!(v.get_unmint_amount(100, 5_000, 1_000), Some(500));
    }

    #[test]
    fn locked_profit_larger_than_total_saturates() {
        let v = vault(10, tracker());
        assert_eq!(v.get_unlocked_amount(100), 0);
        assert_eq!(v.get_amount_by_share(100, 1, 1), Some(0));
        assert_eq!(v.get_unmint_amount(100, 1, 1), None);
    }

    #[test]
    fn zero_supply_has_no_share_value() {
        let v = vault(11_000, tracker());
        for now in [0, 100, 125, u64::MAX] {
            for share in [0, 1, u64::MAX] {
                assert_eq!(v.get_amount_by_share(now, share, 0), None);
                assert_eq!(v.get_unmint_amount(now, share, 0), None);
            }
        }
    }

    #[test]
    fn share_value_clamps_to_u64() {
        let v = vault(u64::MAX, LockedProfitTracker::default());
        assert_eq!(v.get_amount_by_share(0, u64::MAX, 1), Some(u64::MAX));
    }
}
