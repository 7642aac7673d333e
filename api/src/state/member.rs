use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{cursor::ByteCursor, error::CursorError};

use super::{member_pda, AccountDecode};

/// A miner's membership in a mining pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The member id, assigned in join order.
    pub id: u64,

    /// The pool this member belongs to.
    pub pool: Pubkey,

    /// The authority allowed to claim this balance.
    pub authority: Pubkey,

    /// The balance available to claim.
    pub balance: u64,

    /// The total balance this member has earned in the lifetime of their account.
    pub total_balance: u64,
}

impl Member {
    pub fn pda(&self) -> (Pubkey, u8) {
        member_pda(self.authority, self.pool)
    }
}

impl AccountDecode for Member {
    const NAME: &'static str = "Member";
    const LEN: usize = 8 + 32 + 32 + 8 + 8;

    fn read_fields(cursor: &mut ByteCursor) -> Result<Self, CursorError> {
        Ok(Self {
            id: cursor.read_u64()?,
            pool: cursor.read_pubkey()?,
            authority: cursor.read_pubkey()?,
            balance: cursor.read_u64()?,
            total_balance: cursor.read_u64()?,
        })
    }
}
