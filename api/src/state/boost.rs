use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{consts::BOOST_DENOMINATOR, cursor::ByteCursor, error::CursorError, numeric::Numeric};

use super::{boost_pda, boost_proof_pda, AccountDecode};

/// Boost tracks the priority, deposits, and rewards of a staking incentive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boost {
    /// The unix timestamp this boost expires.
    pub expires_at: i64,

    /// The mint address of the token associated with this boost.
    pub mint: Pubkey,

    /// The multiplier, over [`BOOST_DENOMINATOR`].
    pub multiplier: u64,

    /// The cumulative rewards distributed per deposited unit since the boost
    /// was created.
    pub rewards_factor: Numeric,

    /// The total amount of stake deposited in this boost.
    pub total_deposits: u64,

    /// The number of stakers in this boost.
    pub total_stakers: u64,

    /// The withdraw fee charged by the boost, in basis points.
    pub withdraw_fee: u64,
}

impl Boost {
    pub fn pda(&self) -> (Pubkey, u8) {
        boost_pda(self.mint)
    }

    /// The proof account this boost mines into.
    pub fn proof_address(&self) -> Pubkey {
        boost_proof_pda(self.pda().0).0
    }

    /// Multiplier as a plain ratio, for display.
    pub fn multiplier_ratio(&self) -> f64 {
        self.multiplier as f64 / BOOST_DENOMINATOR as f64
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

impl AccountDecode for Boost {
    const NAME: &'static str = "Boost";
    const LEN: usize = 8 + 32 + 8 + 16 + 8 + 8 + 8;

    fn read_fields(cursor: &mut ByteCursor) -> Result<Self, CursorError> {
        Ok(Self {
            expires_at: cursor.read_i64()?,
            mint: cursor.read_pubkey()?,
            multiplier: cursor.read_u64()?,
            rewards_factor: cursor.read_numeric()?,
            total_deposits: cursor.read_u64()?,
            total_stakers: cursor.read_u64()?,
            withdraw_fee: cursor.read_u64()?,
        })
    }
}
