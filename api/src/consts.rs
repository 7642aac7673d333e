use const_crypto::ed25519;
use solana_program::{pubkey, pubkey::Pubkey};

/// The ORE mining program.
pub const ORE_PROGRAM_ID: Pubkey = pubkey!("oreV2ZymfyeXgNgBdqMkumTqqAprVqgBWQfoYkrtKWQ");

/// The ORE boost (staking) program.
pub const BOOST_PROGRAM_ID: Pubkey = pubkey!("boostmPwypNUQu8qZ8RoWt5DXyYSVYxnBXqbbrGjecc");

/// The ORE mining pool program.
pub const POOL_PROGRAM_ID: Pubkey = pubkey!("poo1sKMYsZtDDS7og73L68etJQYyn6KXhXTLz1hizJc");

/// Kamino liquidity (yvaults) program.
pub const KAMINO_PROGRAM_ID: Pubkey = pubkey!("6LtLpnUFNByNXLyCoK9wA2MykKAmQNZKBdY8s47dehDc");

/// Meteora dynamic AMM program.
pub const METEORA_AMM_PROGRAM_ID: Pubkey = pubkey!("Eo7WjKq67rjJQSZxS6z3YkapzY3eMj6Xy8X5EQVn5UaB");

/// Meteora dynamic vault program.
pub const METEORA_VAULT_PROGRAM_ID: Pubkey =
    pubkey!("24Uqj9JCLxUeoC3hGfh5W3s9FM9uCHDS2SG3LYwBpyTi");

/// The address of the ORE mint.
pub const MINT_ADDRESS: Pubkey = pubkey!("oreoU2P8bN6jkk3jbaiVxYnG1dCXcYxwhwyK9jSybcp");

/// The decimal precision of the ORE token.
/// There are 100 billion indivisible units per ORE (called "grams").
pub const TOKEN_DECIMALS: u8 = 11;

/// One ORE token, denominated in indivisible units.
pub const ONE_ORE: u64 = 10u64.pow(TOKEN_DECIMALS as u32);

/// Denominator of a boost multiplier. A multiplier of 1000 is 1x.
pub const BOOST_DENOMINATOR: u64 = 1000;

/// Every account in this crate starts with an 8-byte discriminator.
pub const DISCRIMINATOR_SIZE: usize = 8;

/// The seed of the proof account PDA.
pub const PROOF: &[u8] = b"proof";

/// The seed of the boost account PDA.
pub const BOOST: &[u8] = b"boost";

/// The seed of the stake account PDA.
pub const STAKE: &[u8] = b"stake";

/// The seed of the config account PDA.
pub const CONFIG: &[u8] = b"config";

/// The seed of the treasury account PDA.
pub const TREASURY: &[u8] = b"treasury";

/// The seed of the mint account PDA.
pub const MINT: &[u8] = b"mint";

/// The seed of the pool member account PDA.
pub const MEMBER: &[u8] = b"member";

/// Noise for deriving the mint PDA.
pub const MINT_NOISE: [u8; 16] = [
    89, 157, 88, 232, 243, 249, 197, 132, 199, 49, 19, 234, 91, 94, 150, 41,
];

/// Program ids for const pda derivations
const ORE_PROGRAM: [u8; 32] = unsafe { *(&ORE_PROGRAM_ID as *const Pubkey as *const [u8; 32]) };
const BOOST_PROGRAM: [u8; 32] =
    unsafe { *(&BOOST_PROGRAM_ID as *const Pubkey as *const [u8; 32]) };

/// The address of the ORE treasury account.
pub const TREASURY_ADDRESS: Pubkey =
    Pubkey::new_from_array(ed25519::derive_program_address(&[TREASURY], &ORE_PROGRAM).0);

/// The address of the boost program's config account.
pub const BOOST_CONFIG_ADDRESS: Pubkey =
    Pubkey::new_from_array(ed25519::derive_program_address(&[CONFIG], &BOOST_PROGRAM).0);
