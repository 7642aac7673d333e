//! Kamino liquidity accounts. Only the fields a depositor needs are picked
//! out; the rest of each layout is reserved space.

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{
    cursor::ByteCursor,
    error::CursorError,
    layout::{Field, FieldKind, Layout},
};

use super::AccountDecode;

/// Number of collateral slots in the global config tables.
pub const KAMINO_COLLATERAL_SLOTS: usize = 256;

mod config {
    use super::*;

    pub const EMERGENCY_MODE: Field = Field::new("emergency_mode", 0, FieldKind::U64);
    pub const BLOCK_DEPOSIT: Field = Field::new("block_deposit", 8, FieldKind::U64);
    pub const BLOCK_INVEST: Field = Field::new("block_invest", 16, FieldKind::U64);
    pub const BLOCK_WITHDRAW: Field = Field::new("block_withdraw", 24, FieldKind::U64);
    pub const MIN_WITHDRAWAL_FEE_BPS: Field = Field::new("min_withdrawal_fee_bps", 64, FieldKind::U64);
    pub const SCOPE_PROGRAM_ID: Field = Field::new("scope_program_id", 72, FieldKind::Pubkey);
    pub const SCOPE_PRICE_ID: Field = Field::new("scope_price_id", 104, FieldKind::Pubkey);
    // 136: swap_rewards_discount_bps, [u64; 256]
    pub const ACTIONS_AUTHORITY: Field = Field::new("actions_authority", 2184, FieldKind::Pubkey);
    pub const ADMIN_AUTHORITY: Field = Field::new("admin_authority", 2216, FieldKind::Pubkey);
    pub const TREASURY_FEE_VAULTS: Field =
        Field::new("treasury_fee_vaults", 2248, FieldKind::Pubkeys(KAMINO_COLLATERAL_SLOTS));
    pub const TOKEN_INFOS: Field = Field::new("token_infos", 10440, FieldKind::Pubkey);
    pub const MIN_PERFORMANCE_FEE_BPS: Field = Field::new("min_performance_fee_bps", 10480, FieldKind::U64);

    pub const LAYOUT: Layout = Layout {
        name: "KaminoGlobalConfig",
        fields: &[
            EMERGENCY_MODE,
            BLOCK_DEPOSIT,
            BLOCK_INVEST,
            BLOCK_WITHDRAW,
            MIN_WITHDRAWAL_FEE_BPS,
            SCOPE_PROGRAM_ID,
            SCOPE_PRICE_ID,
            ACTIONS_AUTHORITY,
            ADMIN_AUTHORITY,
            TREASURY_FEE_VAULTS,
            TOKEN_INFOS,
            MIN_PERFORMANCE_FEE_BPS,
        ],
    };
}

mod strategy {
    use super::*;

    pub const ADMIN_AUTHORITY: Field = Field::new("admin_authority", 0, FieldKind::Pubkey);
    pub const GLOBAL_CONFIG: Field = Field::new("global_config", 32, FieldKind::Pubkey);
    pub const BASE_VAULT_AUTHORITY: Field = Field::new("base_vault_authority", 64, FieldKind::Pubkey);
    pub const POOL: Field = Field::new("pool", 104, FieldKind::Pubkey);
    pub const POOL_TOKEN_VAULT_A: Field = Field::new("pool_token_vault_a", 136, FieldKind::Pubkey);
    pub const POOL_TOKEN_VAULT_B: Field = Field::new("pool_token_vault_b", 168, FieldKind::Pubkey);
    pub const TICK_ARRAY_LOWER: Field = Field::new("tick_array_lower", 200, FieldKind::Pubkey);
    pub const TICK_ARRAY_UPPER: Field = Field::new("tick_array_upper", 232, FieldKind::Pubkey);
    pub const POSITION: Field = Field::new("position", 264, FieldKind::Pubkey);
    pub const POSITION_MINT: Field = Field::new("position_mint", 296, FieldKind::Pubkey);
    pub const POSITION_METADATA: Field = Field::new("position_metadata", 328, FieldKind::Pubkey);
    pub const POSITION_TOKEN_ACCOUNT: Field = Field::new("position_token_account", 360, FieldKind::Pubkey);
    pub const TOKEN_A_VAULT: Field = Field::new("token_a_vault", 392, FieldKind::Pubkey);
    pub const TOKEN_B_VAULT: Field = Field::new("token_b_vault", 424, FieldKind::Pubkey);
    // 456: two deprecated addresses and two deprecated u64s
    pub const TOKEN_A_MINT: Field = Field::new("token_a_mint", 536, FieldKind::Pubkey);
    pub const TOKEN_B_MINT: Field = Field::new("token_b_mint", 568, FieldKind::Pubkey);
    pub const TOKEN_A_MINT_DECIMALS: Field = Field::new("token_a_mint_decimals", 600, FieldKind::U64);
    pub const TOKEN_B_MINT_DECIMALS: Field = Field::new("token_b_mint_decimals", 608, FieldKind::U64);
    pub const TOKEN_A_AMOUNTS: Field = Field::new("token_a_amounts", 616, FieldKind::U64);
    pub const TOKEN_B_AMOUNTS: Field = Field::new("token_b_amounts", 624, FieldKind::U64);
    pub const TOKEN_A_COLLATERAL_ID: Field = Field::new("token_a_collateral_id", 632, FieldKind::U64);
    pub const TOKEN_B_COLLATERAL_ID: Field = Field::new("token_b_collateral_id", 640, FieldKind::U64);
    pub const SCOPE_PRICES: Field = Field::new("scope_prices", 648, FieldKind::Pubkey);
    // 680: deprecated address
    pub const SHARES_MINT: Field = Field::new("shares_mint", 712, FieldKind::Pubkey);
    pub const SHARES_MINT_DECIMALS: Field = Field::new("shares_mint_decimals", 744, FieldKind::U64);
    pub const SHARES_MINT_AUTHORITY: Field = Field::new("shares_mint_authority", 752, FieldKind::Pubkey);
    pub const SHARES_ISSUED: Field = Field::new("shares_issued", 792, FieldKind::U64);
    pub const STATUS: Field = Field::new("status", 800, FieldKind::U64);

    pub const LAYOUT: Layout = Layout {
        name: "KaminoStrategy",
        fields: &[
            ADMIN_AUTHORITY,
            GLOBAL_CONFIG,
            BASE_VAULT_AUTHORITY,
            POOL,
            POOL_TOKEN_VAULT_A,
            POOL_TOKEN_VAULT_B,
            TICK_ARRAY_LOWER,
            TICK_ARRAY_UPPER,
            POSITION,
            POSITION_MINT,
            POSITION_METADATA,
            POSITION_TOKEN_ACCOUNT,
            TOKEN_A_VAULT,
            TOKEN_B_VAULT,
            TOKEN_A_MINT,
            TOKEN_B_MINT,
            TOKEN_A_MINT_DECIMALS,
            TOKEN_B_MINT_DECIMALS,
            TOKEN_A_AMOUNTS,
            TOKEN_B_AMOUNTS,
            TOKEN_A_COLLATERAL_ID,
            TOKEN_B_COLLATERAL_ID,
            SCOPE_PRICES,
            SHARES_MINT,
            SHARES_MINT_DECIMALS,
            SHARES_MINT_AUTHORITY,
            SHARES_ISSUED,
            STATUS,
        ],
    };
}

pub use config::LAYOUT as KAMINO_GLOBAL_CONFIG_LAYOUT;
pub use strategy::LAYOUT as KAMINO_STRATEGY_LAYOUT;

/// The Kamino liquidity program's global config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KaminoGlobalConfig {
    pub emergency_mode: u64,
    pub block_deposit: u64,
    pub block_invest: u64,
    pub block_withdraw: u64,
    pub min_withdrawal_fee_bps: u64,
    pub scope_program_id: Pubkey,
    pub scope_price_id: Pubkey,
    pub actions_authority: Pubkey,
    pub admin_authority: Pubkey,

    /// Fee vault per collateral id.
    pub treasury_fee_vaults: Vec<Pubkey>,

    pub token_infos: Pubkey,
    pub min_performance_fee_bps: u64,
}

impl KaminoGlobalConfig {
    /// The fee vault a strategy token with `collateral_id` pays into.
    pub fn treasury_fee_vault(&self, collateral_id: u64) -> Option<Pubkey> {
        let index = usize::try_from(collateral_id).ok()?;
        self.treasury_fee_vaults.get(index).copied()
    }

    pub fn deposits_blocked(&self) -> bool {
        self.emergency_mode != 0 || self.block_deposit != 0
    }
}

impl AccountDecode for KaminoGlobalConfig {
    const NAME: &'static str = KAMINO_GLOBAL_CONFIG_LAYOUT.name;
    const LEN: usize = KAMINO_GLOBAL_CONFIG_LAYOUT.extent();

    fn read_fields(cursor: &mut ByteCursor) -> Result<Self, CursorError> {
        use config::*;
        let mut r = LAYOUT.bind(cursor)?;
        Ok(Self {
            emergency_mode: r.u64(&EMERGENCY_MODE)?,
            block_deposit: r.u64(&BLOCK_DEPOSIT)?,
            block_invest: r.u64(&BLOCK_INVEST)?,
            block_withdraw: r.u64(&BLOCK_WITHDRAW)?,
            min_withdrawal_fee_bps: r.u64(&MIN_WITHDRAWAL_FEE_BPS)?,
            scope_program_id: r.pubkey(&SCOPE_PROGRAM_ID)?,
            scope_price_id: r.pubkey(&SCOPE_PRICE_ID)?,
            actions_authority: r.pubkey(&ACTIONS_AUTHORITY)?,
            admin_authority: r.pubkey(&ADMIN_AUTHORITY)?,
            treasury_fee_vaults: r.pubkey_vec(&TREASURY_FEE_VAULTS)?,
            token_infos: r.pubkey(&TOKEN_INFOS)?,
            min_performance_fee_bps: r.u64(&MIN_PERFORMANCE_FEE_BPS)?,
        })
    }
}

/// A Kamino concentrated-liquidity strategy (a "kToken" vault).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KaminoStrategy {
    pub admin_authority: Pubkey,
    pub global_config: Pubkey,
    pub base_vault_authority: Pubkey,
    pub pool: Pubkey,
    pub pool_token_vault_a: Pubkey,
    pub pool_token_vault_b: Pubkey,
    pub tick_array_lower: Pubkey,
    pub tick_array_upper: Pubkey,
    pub position: Pubkey,
    pub position_mint: Pubkey,
    pub position_metadata: Pubkey,
    pub position_token_account: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub token_a_mint_decimals: u64,
    pub token_b_mint_decimals: u64,
    pub token_a_amounts: u64,
    pub token_b_amounts: u64,
    pub token_a_collateral_id: u64,
    pub token_b_collateral_id: u64,
    pub scope_prices: Pubkey,
    pub shares_mint: Pubkey,
    pub shares_mint_decimals: u64,
    pub shares_mint_authority: Pubkey,
    pub shares_issued: u64,
    pub status: u64,
}

impl AccountDecode for KaminoStrategy {
    const NAME: &'static str = KAMINO_STRATEGY_LAYOUT.name;
    const LEN: usize = KAMINO_STRATEGY_LAYOUT.extent();

    fn read_fields(cursor: &mut ByteCursor) -> Result<Self, CursorError> {
        use strategy::*;
        let mut r = LAYOUT.bind(cursor)?;
        Ok(Self {
            admin_authority: r.pubkey(&ADMIN_AUTHORITY)?,
            global_config: r.pubkey(&GLOBAL_CONFIG)?,
            base_vault_authority: r.pubkey(&BASE_VAULT_AUTHORITY)?,
            pool: r.pubkey(&POOL)?,
            pool_token_vault_a: r.pubkey(&POOL_TOKEN_VAULT_A)?,
            pool_token_vault_b: r.pubkey(&POOL_TOKEN_VAULT_B)?,
            tick_array_lower: r.pubkey(&TICK_ARRAY_LOWER)?,
            tick_array_upper: r.pubkey(&TICK_ARRAY_UPPER)?,
            position: r.pubkey(&POSITION)?,
            position_mint: r.pubkey(&POSITION_MINT)?,
            position_metadata: r.pubkey(&POSITION_METADATA)?,
            position_token_account: r.pubkey(&POSITION_TOKEN_ACCOUNT)?,
            token_a_vault: r.pubkey(&TOKEN_A_VAULT)?,
            token_b_vault: r.pubkey(&TOKEN_B_VAULT)?,
            token_a_mint: r.pubkey(&TOKEN_A_MINT)?,
            token_b_mint: r.pubkey(&TOKEN_B_MINT)?,
            token_a_mint_decimals: r.u64(&TOKEN_A_MINT_DECIMALS)?,
            token_b_mint_decimals: r.u64(&TOKEN_B_MINT_DECIMALS)?,
            token_a_amounts: r.u64(&TOKEN_A_AMOUNTS)?,
            token_b_amounts: r.u64(&TOKEN_B_AMOUNTS)?,
            token_a_collateral_id: r.u64(&TOKEN_A_COLLATERAL_ID)?,
            token_b_collateral_id: r.u64(&TOKEN_B_COLLATERAL_ID)?,
            scope_prices: r.pubkey(&SCOPE_PRICES)?,
            shares_mint: r.pubkey(&SHARES_MINT)?,
            shares_mint_decimals: r.u64(&SHARES_MINT_DECIMALS)?,
            shares_mint_authority: r.pubkey(&SHARES_MINT_AUTHORITY)?,
            shares_issued: r.u64(&SHARES_ISSUED)?,
            status: r.u64(&STATUS)?,
        })
    }
}
