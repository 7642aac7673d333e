use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{cursor::ByteCursor, error::CursorError, numeric::Numeric};

use super::{stake_pda, AccountDecode};

/// Stake accounts track a user's deposits in one boost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    /// The authority of this stake account.
    pub authority: Pubkey,

    /// The balance of this stake account.
    pub balance: u64,

    /// The boost this stake account is associated with.
    pub boost: Pubkey,

    /// The timestamp of last claim.
    pub last_claim_at: i64,

    /// The timestamp the last time this staker deposited.
    pub last_deposit_at: i64,

    /// The timestamp the last time this staker withdrew.
    pub last_withdraw_at: i64,

    /// The boost's rewards factor the last time rewards were settled on this
    /// stake account.
    pub last_rewards_factor: Numeric,

    /// The amount of rewards already settled and claimable.
    pub rewards: u64,
}

impl Stake {
    pub fn pda(&self) -> (Pubkey, u8) {
        stake_pda(self.authority, self.boost)
    }
}

impl AccountDecode for Stake {
    const NAME: &'static str = "Stake";
    const LEN: usize = 32 + 8 + 32 + 8 + 8 + 8 + 16 + 8;

    fn read_fields(cursor: &mut ByteCursor) -> Result<Self, CursorError> {
        Ok(Self {
            authority: cursor.read_pubkey()?,
            balance: cursor.read_u64()?,
            boost: cursor.read_pubkey()?,
            last_claim_at: cursor.read_i64()?,
            last_deposit_at: cursor.read_i64()?,
            last_withdraw_at: cursor.read_i64()?,
            last_rewards_factor: cursor.read_numeric()?,
            rewards: cursor.read_u64()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::{assert_rejects_short, key, Blob};

    #[test]
    fn decodes_every_field_in_order() {
        let factor = Numeric::from_u64(9);
        let blob = Blob::account(102)
            .key(key(1))
            .u64(500_000)
            .key(key(2))
            .i64(10)
            .i64(20)
            .i64(30)
            .bytes(&factor.to_bytes())
            .u64(42);
        assert_eq!(blob.0.len(), Stake::SIZE);

        let stake = Stake::try_from_bytes(&blob.0).unwrap();
        assert_eq!(
            stake,
            Stake {
                authority: key(1),
                balance: 500_000,
                boost: key(2),
                last_claim_at: 10,
                last_deposit_at: 20,
                last_withdraw_at: 30,
                last_rewards_factor: factor,
                rewards: 42,
            }
        );
        assert_eq!(stake.pda(), stake_pda(key(1), key(2)));
    }

    #[test]
    fn persisted_form_keeps_factor_bits() {
        let stake = Stake::try_from_bytes(&vec![7u8; Stake::SIZE]).unwrap();
        let json = serde_json::to_value(stake).unwrap();
        assert_eq!(json["last_rewards_factor"]["kind"], "Numeric");
        let back: Stake = serde_json::from_value(json).unwrap();
        assert_eq!(back, stake);
    }

    #[test]
    fn short_blob_is_rejected() {
        assert_rejects_short::<Stake>();
    }
}
