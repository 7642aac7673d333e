mod boost;
mod kamino;
mod member;
mod meteora;
mod proof;
mod stake;

pub use boost::*;
pub use kamino::*;
pub use member::*;
pub use meteora::*;
pub use proof::*;
pub use stake::*;

use solana_program::pubkey::Pubkey;

use crate::{
    consts::*,
    cursor::ByteCursor,
    error::{CursorError, DecodeError},
};

/// An account type that can be decoded from its raw on-chain bytes.
///
/// Implementors only describe the fields after the discriminator. The
/// discriminator is skipped, not checked: the caller already knows which
/// address it fetched.
pub trait AccountDecode: Sized {
    /// Name used in errors and logs.
    const NAME: &'static str;

    /// Bytes after the discriminator.
    const LEN: usize;

    /// Minimum blob length accepted by [`try_from_bytes`](Self::try_from_bytes).
    const SIZE: usize = DISCRIMINATOR_SIZE + Self::LEN;

    fn read_fields(cursor: &mut ByteCursor) -> Result<Self, CursorError>;

    /// Decode a blob. Trailing bytes past [`SIZE`](Self::SIZE) are ignored.
    fn try_from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        if data.is_empty() {
            return Err(DecodeError::NotFound);
        }
        let mut cursor = ByteCursor::new(data);
        cursor
            .skip(DISCRIMINATOR_SIZE)
            .and_then(|_| Self::read_fields(&mut cursor))
            .map_err(|source| DecodeError::Underrun {
                schema: Self::NAME,
                source,
            })
    }

    /// Decode an optional blob, `None` meaning the account does not exist.
    fn decode(data: Option<&[u8]>) -> AccountState<Self> {
        let state = match data {
            None => AccountState::NotFound,
            Some(data) => Self::try_from_bytes(data).into(),
        };
        if let AccountState::Malformed(err) = &state {
            tracing::debug!(schema = Self::NAME, len = data.map_or(0, <[u8]>::len), %err, "malformed account");
        }
        state
    }
}

/// Outcome of decoding one account.
#[derive(Clone, Debug, PartialEq)]
pub enum AccountState<T> {
    /// The account has no data; it has not been created yet.
    NotFound,

    /// Bytes were present but could not hold a full record.
    Malformed(DecodeError),

    Found(T),
}

impl<T> AccountState<T> {
    /// Collapse to an option, treating a malformed account the same as a
    /// missing one.
    pub fn ok(self) -> Option<T> {
        match self {
            AccountState::Found(value) => Some(value),
            AccountState::NotFound | AccountState::Malformed(_) => None,
        }
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            AccountState::Found(value) => Some(value),
            AccountState::NotFound | AccountState::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, AccountState::Malformed(_))
    }
}

impl<T> From<Result<T, DecodeError>> for AccountState<T> {
    fn from(result: Result<T, DecodeError>) -> Self {
        match result {
            Ok(value) => AccountState::Found(value),
            Err(DecodeError::NotFound) => AccountState::NotFound,
            Err(err) => AccountState::Malformed(err),
        }
    }
}

pub fn proof_pda(authority: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[PROOF, &authority.to_bytes()], &ORE_PROGRAM_ID)
}

pub fn treasury_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TREASURY], &ORE_PROGRAM_ID)
}

pub fn mint_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MINT, &MINT_NOISE], &ORE_PROGRAM_ID)
}

pub fn boost_pda(mint: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[BOOST, &mint.to_bytes()], &BOOST_PROGRAM_ID)
}

pub fn boost_config_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG], &BOOST_PROGRAM_ID)
}

/// The proof account a boost mines into. Its balance is the boost's
/// undistributed yield.
pub fn boost_proof_pda(boost: Pubkey) -> (Pubkey, u8) {
    proof_pda(boost)
}

pub fn stake_pda(authority: Pubkey, boost: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[STAKE, &authority.to_bytes(), &boost.to_bytes()],
        &BOOST_PROGRAM_ID,
    )
}

pub fn member_pda(authority: Pubkey, pool: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[MEMBER, &authority.to_bytes(), &pool.to_bytes()],
        &POOL_PROGRAM_ID,
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds account blobs field by field for decoder tests.
    #[derive(Default)]
    pub(crate) struct Blob(pub Vec<u8>);

    impl Blob {
        pub fn account(discriminator: u8) -> Self {
            let mut data = vec![0u8; DISCRIMINATOR_SIZE];
            data[0] = discriminator;
            Self(data)
        }

        pub fn u8(mut self, v: u8) -> Self {
            self.0.push(v);
            self
        }

        pub fn u64(mut self, v: u64) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }

        pub fn i64(mut self, v: i64) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }

        pub fn key(mut self, k: Pubkey) -> Self {
            self.0.extend_from_slice(k.as_ref());
            self
        }

        pub fn bytes(mut self, b: &[u8]) -> Self {
            self.0.extend_from_slice(b);
            self
        }

        /// Write `bytes` at `offset` past the discriminator, growing as needed.
        pub fn put(mut self, offset: usize, bytes: &[u8]) -> Self {
            let start = DISCRIMINATOR_SIZE + offset;
            if self.0.len() < start + bytes.len() {
                self.0.resize(start + bytes.len(), 0);
            }
            self.0[start..start + bytes.len()].copy_from_slice(bytes);
            self
        }
    }

    pub(crate) fn key(seed: u8) -> Pubkey {
        Pubkey::new_from_array([seed; 32])
    }

    /// A blob one byte short of `T::SIZE` must never produce a record.
    pub(crate) fn assert_rejects_short<T: AccountDecode + std::fmt::Debug>() {
        for len in [1, DISCRIMINATOR_SIZE, T::SIZE - 1] {
            let data = vec![0u8; len];
            match T::try_from_bytes(&data) {
                Err(DecodeError::Underrun { schema, .. }) => assert_eq!(schema, T::NAME),
                other => panic!("{} decoded {len} bytes: {other:?}", T::NAME),
            }
            assert!(T::decode(Some(data.as_slice())).is_malformed());
            assert!(T::decode(Some(data.as_slice())).ok().is_none());
        }
        assert!(T::try_from_bytes(&vec![0u8; T::SIZE]).is_ok());
    }

    #[test]
    fn empty_blob_is_not_found() {
        assert_eq!(Proof::try_from_bytes(&[]).unwrap_err(), DecodeError::NotFound);
        assert_eq!(Stake::decode(Some(&[][..])), AccountState::NotFound);
        assert_eq!(Boost::decode(None), AccountState::NotFound);
    }

    #[test]
    fn pdas_are_deterministic() {
        let authority = key(1);
        let boost = boost_pda(MINT_ADDRESS).0;
        assert_eq!(stake_pda(authority, boost), stake_pda(authority, boost));
        assert_ne!(stake_pda(authority, boost).0, stake_pda(key(2), boost).0);
        assert_eq!(boost_proof_pda(boost), proof_pda(boost));
        assert_eq!(treasury_pda().0, TREASURY_ADDRESS);
        assert_eq!(boost_config_pda().0, BOOST_CONFIG_ADDRESS);
    }
}
