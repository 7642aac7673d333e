//! Claimable staking yield for one boost.
//!
//! A boost keeps a global rewards factor: cumulative rewards per deposited
//! unit. Each stake remembers the factor it last settled at, so its pending
//! yield is `(factor - last_factor) * balance`. Rewards mined into the boost's
//! proof but not yet folded into the factor are counted too.

use serde::Serialize;

use crate::{
    error::ArithmeticError,
    numeric::Numeric,
    state::{AccountDecode, AccountState, Boost, Proof, Stake},
};

/// Settled plus pending rewards of `stake`, in token units.
///
/// Any missing account or an empty boost yields the settled rewards only.
/// A rewards factor lower than the stake's snapshot accrues nothing.
pub fn try_claimable_yield(
    boost: Option<&Boost>,
    proof: Option<&Proof>,
    stake: Option<&Stake>,
) -> Result<u64, ArithmeticError> {
    let base = stake.map_or(0, |stake| stake.rewards);

    let Some(boost) = boost.filter(|boost| boost.total_deposits > 0) else {
        return Ok(base);
    };

    let mut rewards_factor = boost.rewards_factor;
    if let Some(proof) = proof.filter(|proof| proof.balance > 0) {
        let undistributed = Numeric::from_fraction(proof.balance, boost.total_deposits)?;
        rewards_factor = rewards_factor.checked_add(undistributed)?;
    }

    let Some(stake) = stake else {
        return Ok(base);
    };

    if rewards_factor > stake.last_rewards_factor {
        let accumulated = rewards_factor.checked_sub(stake.last_rewards_factor)?;
        let personal = accumulated.checked_mul(Numeric::from_u64(stake.balance))?;
        return base
            .checked_add(personal.try_to_u64()?)
            .ok_or(ArithmeticError::Overflow);
    }

    Ok(base)
}

/// Like [`try_claimable_yield`], but an arithmetic failure is logged and
/// only the settled rewards are reported.
pub fn claimable_yield(boost: Option<&Boost>, proof: Option<&Proof>, stake: Option<&Stake>) -> u64 {
    try_claimable_yield(boost, proof, stake).unwrap_or_else(|err| {
        let base = stake.map_or(0, |stake| stake.rewards);
        tracing::warn!(%err, base, "yield accrual failed, reporting settled rewards");
        base
    })
}

/// The boost, boost proof, and stake read in one polling cycle.
///
/// Keeping the three together prevents mixing a fresh boost with a stale
/// stake, which would over- or under-count accrual.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct YieldSnapshot {
    #[serde(serialize_with = "serialize_state")]
    pub boost: AccountState<Boost>,
    #[serde(serialize_with = "serialize_state")]
    pub proof: AccountState<Proof>,
    #[serde(serialize_with = "serialize_state")]
    pub stake: AccountState<Stake>,
}

impl YieldSnapshot {
    pub fn from_blobs(boost: Option<&[u8]>, proof: Option<&[u8]>, stake: Option<&[u8]>) -> Self {
        Self {
            boost: Boost::decode(boost),
            proof: Proof::decode(proof),
            stake: Stake::decode(stake),
        }
    }

    pub fn claimable(&self) -> u64 {
        claimable_yield(self.boost.found(), self.proof.found(), self.stake.found())
    }

    pub fn try_claimable(&self) -> Result<u64, ArithmeticError> {
        try_claimable_yield(self.boost.found(), self.proof.found(), self.stake.found())
    }
}

fn serialize_state<T: Serialize, S: serde::Serializer>(
    state: &AccountState<T>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    state.found().serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::key;
    use proptest::prelude::*;

    fn boost(total_deposits: u64, rewards_factor: Numeric) -> Boost {
        Boost {
            expires_at: i64::MAX,
            mint: key(1),
            multiplier: 1_000,
            rewards_factor,
            total_deposits,
            total_stakers: 1,
            withdraw_fee: 0,
        }
    }

    fn proof(balance: u64) -> Proof {
        Proof {
            authority: key(2),
            balance,
            challenge: [0; 32],
            last_hash: [0; 32],
            last_hash_at: 0,
            last_claim_at: 0,
            miner: key(2),
            total_hashes: 0,
            total_rewards: 0,
        }
    }

    fn stake(balance: u64, last_rewards_factor: Numeric, rewards: u64) -> Stake {
        Stake {
            authority: key(3),
            balance,
            boost: key(4),
            last_claim_at: 0,
            last_deposit_at: 0,
            last_withdraw_at: 0,
            last_rewards_factor,
            rewards,
        }
    }

    fn whole(n: u64) -> Numeric {
        Numeric::from_fraction(n, 1).unwrap()
    }

    #[test]
    fn worked_scenario() {
        let b = boost(1_000_000, whole(10));
        let p = proof(0);
        let s = stake(500_000, whole(9), 42);
        assert_eq!(claimable_yield(Some(&b), Some(&p), Some(&s)), 500_042);
    }

    #[test]
    fn unchanged_factor_returns_settled_rewards() {
        let b = boost(1_000_000, whole(10));
        let s = stake(500_000, whole(10), 42);
        assert_eq!(claimable_yield(Some(&b), Some(&proof(0)), Some(&s)), 42);
        assert_eq!(claimable_yield(Some(&b), None, Some(&s)), 42);
    }

    #[test]
    fn undistributed_proof_balance_accrues() {
        // 1_000 units over 1_000_000 deposits is 0.001 per unit.
        let b = boost(1_000_000, whole(10));
        let s = stake(500_000, whole(10), 42);
        assert_eq!(claimable_yield(Some(&b), Some(&proof(1_000)), Some(&s)), 541);
    }

    #[test]
    fn decreased_factor_accrues_nothing() {
        let b = boost(1_000_000, whole(8));
        let s = stake(500_000, whole(9), 42);
        assert_eq!(claimable_yield(Some(&b), Some(&proof(0)), Some(&s)), 42);
    }

    #[test]
    fn missing_accounts_fall_back() {
        let b = boost(1_000_000, whole(10));
        let s = stake(500_000, whole(9), 42);
        assert_eq!(claimable_yield(None, None, Some(&s)), 42);
        assert_eq!(claimable_yield(Some(&b), Some(&proof(5)), None), 0);
        assert_eq!(claimable_yield(None, None, None), 0);
        assert_eq!(claimable_yield(Some(&boost(0, whole(10))), None, Some(&s)), 42);
    }

    #[test]
    fn overflow_degrades_to_settled_rewards() {
        let b = boost(1_000_000, whole(10));
        let s = stake(u64::MAX, Numeric::ZERO, 42);
        assert_eq!(
            try_claimable_yield(Some(&b), None, Some(&s)),
            Err(ArithmeticError::Overflow)
        );
        assert_eq!(claimable_yield(Some(&b), None, Some(&s)), 42);
    }

    #[test]
    fn accrual_past_u64_is_an_error_without_settled_rewards() {
        let b = boost(1, Numeric::from_u64(10));
        let s = stake(u64::MAX, Numeric::ZERO, 0);
        assert_eq!(
            try_claimable_yield(Some(&b), None, Some(&s)),
            Err(ArithmeticError::Overflow)
        );
        assert_eq!(claimable_yield(Some(&b), None, Some(&s)), 0);
    }

    #[test]
    fn snapshot_decodes_and_computes() {
        use crate::state::tests::Blob;

        let boost_blob = Blob::account(100)
            .i64(i64::MAX)
            .key(key(1))
            .u64(1_000)
            .bytes(&whole(10).to_bytes())
            .u64(1_000_000)
            .u64(1)
            .u64(0);
        let stake_blob = Blob::account(101)
            .key(key(3))
            .u64(500_000)
            .key(key(4))
            .i64(0)
            .i64(0)
            .i64(0)
            .bytes(&whole(9).to_bytes())
            .u64(42)
            .bytes(&[0; 1024]);

        let snapshot = YieldSnapshot::from_blobs(
            Some(boost_blob.0.as_slice()),
            None,
            Some(stake_blob.0.as_slice()),
        );
        assert_eq!(snapshot.proof, AccountState::NotFound);
        assert_eq!(snapshot.claimable(), 500_042);
        assert_eq!(snapshot.try_claimable(), Ok(500_042));

        let truncated = YieldSnapshot::from_blobs(
            Some(&boost_blob.0[..20]),
            None,
            Some(stake_blob.0.as_slice()),
        );
        assert!(truncated.boost.is_malformed());
        assert_eq!(truncated.claimable(), 42);

        let json = serde_json::to_value(&truncated).unwrap();
        assert!(json["boost"].is_null());
        assert_eq!(json["stake"]["rewards"], 42);
    }

    proptest! {
        #[test]
        fn yield_never_decreases_as_factor_grows(
            low in 0u128..1u128 << 72,
            bump in 0u128..1u128 << 72,
            last in 0u128..1u128 << 72,
            total_deposits in 1u64..1_000_000,
            proof_balance in 0u64..1_000_000,
            balance in 0u64..u32::MAX as u64,
            rewards in 0u64..u32::MAX as u64,
        ) {
            let p = proof(proof_balance);
            let s = stake(balance, Numeric::from_bits(last), rewards);
            let before = try_claimable_yield(
                Some(&boost(total_deposits, Numeric::from_bits(low))),
                Some(&p),
                Some(&s),
            )
            .unwrap();
            let after = try_claimable_yield(
                Some(&boost(total_deposits, Numeric::from_bits(low + bump))),
                Some(&p),
                Some(&s),
            )
            .unwrap();
            prop_assert!(after >= before);
            prop_assert!(before >= rewards);
        }
    }
}
