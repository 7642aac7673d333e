//! Meteora dynamic AMM pools and the dynamic vaults that hold their liquidity.

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{
    cursor::ByteCursor,
    error::CursorError,
    layout::{Field, FieldKind, Layout},
    valuation::LockedProfitTracker,
};

use super::AccountDecode;

/// Number of lending strategies a vault can allocate to.
pub const METEORA_MAX_STRATEGY: usize = 30;

mod pool {
    use super::*;

    pub const LP_MINT: Field = Field::new("lp_mint", 0, FieldKind::Pubkey);
    pub const TOKEN_A_MINT: Field = Field::new("token_a_mint", 32, FieldKind::Pubkey);
    pub const TOKEN_B_MINT: Field = Field::new("token_b_mint", 64, FieldKind::Pubkey);
    pub const A_VAULT: Field = Field::new("a_vault", 96, FieldKind::Pubkey);
    pub const B_VAULT: Field = Field::new("b_vault", 128, FieldKind::Pubkey);
    pub const A_VAULT_LP: Field = Field::new("a_vault_lp", 160, FieldKind::Pubkey);
    pub const B_VAULT_LP: Field = Field::new("b_vault_lp", 192, FieldKind::Pubkey);
    pub const A_VAULT_LP_BUMP: Field = Field::new("a_vault_lp_bump", 224, FieldKind::U8);
    pub const ENABLED: Field = Field::new("enabled", 225, FieldKind::Bool);
    pub const PROTOCOL_TOKEN_A_FEE: Field = Field::new("protocol_token_a_fee", 226, FieldKind::Pubkey);
    pub const PROTOCOL_TOKEN_B_FEE: Field = Field::new("protocol_token_b_fee", 258, FieldKind::Pubkey);
    pub const FEE_LAST_UPDATED_AT: Field = Field::new("fee_last_updated_at", 290, FieldKind::U64);

    pub const LAYOUT: Layout = Layout {
        name: "MeteoraPool",
        fields: &[
            LP_MINT,
            TOKEN_A_MINT,
            TOKEN_B_MINT,
            A_VAULT,
            B_VAULT,
            A_VAULT_LP,
            B_VAULT_LP,
            A_VAULT_LP_BUMP,
            ENABLED,
            PROTOCOL_TOKEN_A_FEE,
            PROTOCOL_TOKEN_B_FEE,
            FEE_LAST_UPDATED_AT,
        ],
    };
}

mod vault {
    use super::*;

    pub const ENABLED: Field = Field::new("enabled", 0, FieldKind::Bool);
    pub const BUMPS: Field = Field::new("bumps", 1, FieldKind::Bytes(2));
    pub const TOTAL_AMOUNT: Field = Field::new("total_amount", 3, FieldKind::U64);
    pub const TOKEN_VAULT: Field = Field::new("token_vault", 11, FieldKind::Pubkey);
    pub const FEE_VAULT: Field = Field::new("fee_vault", 43, FieldKind::Pubkey);
    pub const TOKEN_MINT: Field = Field::new("token_mint", 75, FieldKind::Pubkey);
    pub const LP_MINT: Field = Field::new("lp_mint", 107, FieldKind::Pubkey);
    pub const STRATEGIES: Field =
        Field::new("strategies", 139, FieldKind::Pubkeys(METEORA_MAX_STRATEGY));
    pub const BASE: Field = Field::new("base", 1099, FieldKind::Pubkey);
    pub const ADMIN: Field = Field::new("admin", 1131, FieldKind::Pubkey);
    pub const OPERATOR: Field = Field::new("operator", 1163, FieldKind::Pubkey);
    pub const LAST_UPDATED_LOCKED_PROFIT: Field =
        Field::new("last_updated_locked_profit", 1195, FieldKind::U64);
    pub const LAST_REPORT: Field = Field::new("last_report", 1203, FieldKind::U64);
    pub const LOCKED_PROFIT_DEGRADATION: Field =
        Field::new("locked_profit_degradation", 1211, FieldKind::U64);

    pub const LAYOUT: Layout = Layout {
        name: "MeteoraVault",
        fields: &[
            ENABLED,
            BUMPS,
            TOTAL_AMOUNT,
            TOKEN_VAULT,
            FEE_VAULT,
            TOKEN_MINT,
            LP_MINT,
            STRATEGIES,
            BASE,
            ADMIN,
            OPERATOR,
            LAST_UPDATED_LOCKED_PROFIT,
            LAST_REPORT,
            LOCKED_PROFIT_DEGRADATION,
        ],
    };
}

pub use pool::LAYOUT as METEORA_POOL_LAYOUT;
pub use vault::LAYOUT as METEORA_VAULT_LAYOUT;

/// A Meteora constant-product pool. Each side's liquidity sits in a dynamic
/// vault; the pool holds that vault's LP tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeteoraPool {
    pub lp_mint: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub a_vault: Pubkey,
    pub b_vault: Pubkey,
    pub a_vault_lp: Pubkey,
    pub b_vault_lp: Pubkey,
    pub a_vault_lp_bump: u8,
    pub enabled: bool,
    pub protocol_token_a_fee: Pubkey,
    pub protocol_token_b_fee: Pubkey,
    pub fee_last_updated_at: u64,
}

impl AccountDecode for MeteoraPool {
    const NAME: &'static str = METEORA_POOL_LAYOUT.name;
    const LEN: usize = METEORA_POOL_LAYOUT.extent();

    fn read_fields(cursor: &mut ByteCursor) -> Result<Self, CursorError> {
        use pool::*;
        let mut r = LAYOUT.bind(cursor)?;
        Ok(Self {
            lp_mint: r.pubkey(&LP_MINT)?,
            token_a_mint: r.pubkey(&TOKEN_A_MINT)?,
            token_b_mint: r.pubkey(&TOKEN_B_MINT)?,
            a_vault: r.pubkey(&A_VAULT)?,
            b_vault: r.pubkey(&B_VAULT)?,
            a_vault_lp: r.pubkey(&A_VAULT_LP)?,
            b_vault_lp: r.pubkey(&B_VAULT_LP)?,
            a_vault_lp_bump: r.u8(&A_VAULT_LP_BUMP)?,
            enabled: r.bool(&ENABLED)?,
            protocol_token_a_fee: r.pubkey(&PROTOCOL_TOKEN_A_FEE)?,
            protocol_token_b_fee: r.pubkey(&PROTOCOL_TOKEN_B_FEE)?,
            fee_last_updated_at: r.u64(&FEE_LAST_UPDATED_AT)?,
        })
    }
}

/// A Meteora dynamic vault. Deposits are lent out across strategies; newly
/// reported profit unlocks gradually, see [`LockedProfitTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeteoraVault {
    pub enabled: bool,

    /// Vault and token vault bumps. Not used off chain.
    pub bumps: [u8; 2],

    /// Total liquidity, in token units, including locked profit.
    pub total_amount: u64,

    pub token_vault: Pubkey,
    pub fee_vault: Pubkey,
    pub token_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub strategies: [Pubkey; METEORA_MAX_STRATEGY],
    pub base: Pubkey,
    pub admin: Pubkey,
    pub operator: Pubkey,
    pub locked_profit_tracker: LockedProfitTracker,
}

impl MeteoraVault {
    /// Strategies in use. Empty slots hold the default address.
    pub fn strategies(&self) -> impl Iterator<Item = &Pubkey> {
        self.strategies.iter().filter(|s| **s != Pubkey::default())
    }
}

impl AccountDecode for MeteoraVault {
    const NAME: &'static str = METEORA_VAULT_LAYOUT.name;
    const LEN: usize = METEORA_VAULT_LAYOUT.extent();

    fn read_fields(cursor: &mut ByteCursor) -> Result<Self, CursorError> {
        use vault::*;
        let mut r = LAYOUT.bind(cursor)?;
        Ok(Self {
            enabled: r.bool(&ENABLED)?,
            bumps: r.bytes(&BUMPS)?,
            total_amount: r.u64(&TOTAL_AMOUNT)?,
            token_vault: r.pubkey(&TOKEN_VAULT)?,
            fee_vault: r.pubkey(&FEE_VAULT)?,
            token_mint: r.pubkey(&TOKEN_MINT)?,
            lp_mint: r.pubkey(&LP_MINT)?,
            strategies: r.pubkeys(&STRATEGIES)?,
            base: r.pubkey(&BASE)?,
            admin: r.pubkey(&ADMIN)?,
            operator: r.pubkey(&OPERATOR)?,
            locked_profit_tracker: LockedProfitTracker {
                last_updated_locked_profit: r.u64(&LAST_UPDATED_LOCKED_PROFIT)?,
                last_report: r.u64(&LAST_REPORT)?,
                locked_profit_degradation: r.u64(&LOCKED_PROFIT_DEGRADATION)?,
            },
        })
    }
}
