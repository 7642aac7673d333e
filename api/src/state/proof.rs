use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{cursor::ByteCursor, error::CursorError};

use super::{proof_pda, AccountDecode};

/// Proof accounts track a miner's current hash, claimable rewards, and lifetime stats.
/// Every boost mines into its own proof, so a boost proof's balance is yield
/// that has not been distributed to stakers yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// The signer authorized to use this proof.
    pub authority: Pubkey,

    /// The quantity of tokens this miner has staked or earned.
    pub balance: u64,

    /// The current mining challenge.
    pub challenge: [u8; 32],

    /// The last hash the miner provided.
    pub last_hash: [u8; 32],

    /// The last time this account provided a hash.
    pub last_hash_at: i64,

    /// The last time rewards were claimed from this account.
    pub last_claim_at: i64,

    /// The keypair which has permission to submit hashes for mining.
    pub miner: Pubkey,

    /// The total lifetime hashes provided by this miner.
    pub total_hashes: u64,

    /// The total lifetime rewards distributed to this miner.
    pub total_rewards: u64,
}

impl Proof {
    pub fn pda(&self) -> (Pubkey, u8) {
        proof_pda(self.authority)
    }
}

impl AccountDecode for Proof {
    const NAME: &'static str = "Proof";
    const LEN: usize = 32 + 8 + 32 + 32 + 8 + 8 + 32 + 8 + 8;

    fn read_fields(cursor: &mut ByteCursor) -> Result<Self, CursorError> {
        Ok(Self {
            authority: cursor.read_pubkey()?,
            balance: cursor.read_u64()?,
            challenge: cursor.read_array()?,
            last_hash: cursor.read_array()?,
            last_hash_at: cursor.read_i64()?,
            last_claim_at: cursor.read_i64()?,
            miner: cursor.read_pubkey()?,
            total_hashes: cursor.read_u64()?,
            total_rewards: cursor.read_u64()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::{assert_rejects_short, key, Blob};

    #[test]
    fn decodes_every_field_in_order() {
        let blob = Blob::account(102)
            .key(key(1))
            .u64(5_000)
            .bytes(&[2u8; 32])
            .bytes(&[3u8; 32])
            .i64(1_700_000_000)
            .i64(-1)
            .key(key(4))
            .u64(12)
            .u64(99);
        assert_eq!(blob.0.len(), Proof::SIZE);

        let proof = Proof::try_from_bytes(&blob.0).unwrap();
        assert_eq!(
            proof,
            Proof {
                authority: key(1),
                balance: 5_000,
                challenge: [2u8; 32],
                last_hash: [3u8; 32],
                last_hash_at: 1_700_000_000,
                last_claim_at: -1,
                miner: key(4),
                total_hashes: 12,
                total_rewards: 99,
            }
        );
        assert_eq!(proof.pda(), proof_pda(key(1)));
    }

    #[test]
    fn discriminator_is_not_checked() {
        let mut data = vec![0xffu8; Proof::SIZE];
        data[..8].copy_from_slice(&[0u8; 8]);
        let proof = Proof::try_from_bytes(&data).unwrap();
        assert_eq!(proof.balance, u64::MAX);
        assert_eq!(proof.last_hash_at, -1);
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let data = vec![0u8; Proof::SIZE + 64];
        assert!(Proof::try_from_bytes(&data).is_ok());
    }

    #[test]
    fn short_blob_is_rejected() {
        assert_rejects_short::<Proof>();
    }
}
