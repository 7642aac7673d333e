use std::{
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{bail, Context};
use base64::Engine;
use ore_lens_api::prelude::*;
use serde::Serialize;
use solana_program::pubkey::Pubkey;
use spl_token::amount_to_ui_amount;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let command = env("COMMAND")?;
    match command.as_str() {
        "proof" => log_proof().await?,
        "boost" => log_boost().await?,
        "stake" => log_stake().await?,
        "member" => log_member().await?,
        "kamino_config" => log_kamino_config().await?,
        "kamino_strategy" => log_kamino_strategy().await?,
        "meteora_pool" => log_meteora_pool().await?,
        "meteora_vault" => log_meteora_vault().await?,
        "yield" => log_yield().await?,
        "share" => log_share().await?,
        "keys" => keys()?,
        _ => bail!("Invalid COMMAND: {command}"),
    }
    Ok(())
}

async fn log_proof() -> Result<(), anyhow::Error> {
    let proof: Proof = load("PROOF").await?;
    if json_output() {
        return print_json(&proof);
    }
    println!("Proof");
    println!("  address: {}", proof.pda().0);
    println!("  authority: {}", proof.authority);
    println!(
        "  balance: {} ORE",
        amount_to_ui_amount(proof.balance, TOKEN_DECIMALS)
    );
    println!("  last_hash_at: {}", proof.last_hash_at);
    println!("  last_claim_at: {}", proof.last_claim_at);
    println!("  miner: {}", proof.miner);
    println!("  total_hashes: {}", proof.total_hashes);
    println!(
        "  total_rewards: {} ORE",
        amount_to_ui_amount(proof.total_rewards, TOKEN_DECIMALS)
    );
    Ok(())
}

async fn log_boost() -> Result<(), anyhow::Error> {
    let boost: Boost = load("BOOST").await?;
    if json_output() {
        return print_json(&boost);
    }
    let decimals = decimals()?;
    println!("Boost");
    println!("  address: {}", boost.pda().0);
    println!("  proof: {}", boost.proof_address());
    println!("  mint: {}", boost.mint);
    println!("  expires_at: {}", boost.expires_at);
    println!("  expired: {}", boost.is_expired(unix_now()? as i64));
    println!("  multiplier: {}x", boost.multiplier_ratio());
    println!("  rewards_factor: {}", boost.rewards_factor);
    println!(
        "  total_deposits: {}",
        amount_to_ui_amount(boost.total_deposits, decimals)
    );
    println!("  total_stakers: {}", boost.total_stakers);
    println!("  withdraw_fee: {} bps", boost.withdraw_fee);
    Ok(())
}

async fn log_stake() -> Result<(), anyhow::Error> {
    let stake: Stake = load("STAKE").await?;
    if json_output() {
        return print_json(&stake);
    }
    let decimals = decimals()?;
    println!("Stake");
    println!("  address: {}", stake.pda().0);
    println!("  authority: {}", stake.authority);
    println!("  boost: {}", stake.boost);
    println!(
        "  balance: {}",
        amount_to_ui_amount(stake.balance, decimals)
    );
    println!("  last_claim_at: {}", stake.last_claim_at);
    println!("  last_deposit_at: {}", stake.last_deposit_at);
    println!("  last_withdraw_at: {}", stake.last_withdraw_at);
    println!("  last_rewards_factor: {}", stake.last_rewards_factor);
    println!(
        "  rewards: {} ORE",
        amount_to_ui_amount(stake.rewards, TOKEN_DECIMALS)
    );
    Ok(())
}

async fn log_member() -> Result<(), anyhow::Error> {
    let member: Member = load("MEMBER").await?;
    if json_output() {
        return print_json(&member);
    }
    println!("Member");
    println!("  address: {}", member.pda().0);
    println!("  id: {}", member.id);
    println!("  pool: {}", member.pool);
    println!("  authority: {}", member.authority);
    println!(
        "  balance: {} ORE",
        amount_to_ui_amount(member.balance, TOKEN_DECIMALS)
    );
    println!(
        "  total_balance: {} ORE",
        amount_to_ui_amount(member.total_balance, TOKEN_DECIMALS)
    );
    Ok(())
}

async fn log_kamino_config() -> Result<(), anyhow::Error> {
    let config: KaminoGlobalConfig = load("ACCOUNT").await?;
    if json_output() {
        return print_json(&config);
    }
    println!("Kamino global config");
    println!("  emergency_mode: {}", config.emergency_mode);
    println!("  deposits_blocked: {}", config.deposits_blocked());
    println!("  block_invest: {}", config.block_invest);
    println!("  block_withdraw: {}", config.block_withdraw);
    println!("  min_withdrawal_fee_bps: {}", config.min_withdrawal_fee_bps);
    println!("  min_performance_fee_bps: {}", config.min_performance_fee_bps);
    println!("  scope_program_id: {}", config.scope_program_id);
    println!("  scope_price_id: {}", config.scope_price_id);
    println!("  actions_authority: {}", config.actions_authority);
    println!("  admin_authority: {}", config.admin_authority);
    println!("  token_infos: {}", config.token_infos);
    for (id, vault) in config.treasury_fee_vaults.iter().enumerate() {
        if *vault != Pubkey::default() {
            println!("  treasury_fee_vault[{id}]: {vault}");
        }
    }
    Ok(())
}

async fn log_kamino_strategy() -> Result<(), anyhow::Error> {
    let strategy: KaminoStrategy = load("ACCOUNT").await?;
    if json_output() {
        return print_json(&strategy);
    }
    println!("Kamino strategy");
    println!("  global_config: {}", strategy.global_config);
    println!("  pool: {}", strategy.pool);
    println!("  position: {}", strategy.position);
    println!("  token_a_mint: {}", strategy.token_a_mint);
    println!("  token_b_mint: {}", strategy.token_b_mint);
    println!("  token_a_vault: {}", strategy.token_a_vault);
    println!("  token_b_vault: {}", strategy.token_b_vault);
    println!(
        "  token_a_amounts: {}",
        amount_to_ui_amount(
            strategy.token_a_amounts,
            mint_decimals(strategy.token_a_mint_decimals)?
        )
    );
    println!(
        "  token_b_amounts: {}",
        amount_to_ui_amount(
            strategy.token_b_amounts,
            mint_decimals(strategy.token_b_mint_decimals)?
        )
    );
    println!("  shares_mint: {}", strategy.shares_mint);
    println!(
        "  shares_issued: {}",
        amount_to_ui_amount(
            strategy.shares_issued,
            mint_decimals(strategy.shares_mint_decimals)?
        )
    );
    println!("  status: {}", strategy.status);
    Ok(())
}

async fn log_meteora_pool() -> Result<(), anyhow::Error> {
    let pool: MeteoraPool = load("ACCOUNT").await?;
    if json_output() {
        return print_json(&pool);
    }
    println!("Pool");
    println!("  enabled: {}", pool.enabled);
    println!("  lp_mint: {}", pool.lp_mint);
    println!("  token_a_mint: {}", pool.token_a_mint);
    println!("  token_b_mint: {}", pool.token_b_mint);
    println!("  a_vault: {}", pool.a_vault);
    println!("  b_vault: {}", pool.b_vault);
    println!("  a_vault_lp: {}", pool.a_vault_lp);
    println!("  b_vault_lp: {}", pool.b_vault_lp);
    println!("  protocol_token_a_fee: {}", pool.protocol_token_a_fee);
    println!("  protocol_token_b_fee: {}", pool.protocol_token_b_fee);
    println!("  fee_last_updated_at: {}", pool.fee_last_updated_at);
    Ok(())
}

async fn log_meteora_vault() -> Result<(), anyhow::Error> {
    let vault: MeteoraVault = load("ACCOUNT").await?;
    if json_output() {
        return print_json(&vault);
    }
    let now = env_or("NOW", unix_now()?)?;
    let tracker = vault.locked_profit_tracker;
    println!("Vault");
    println!("  enabled: {}", vault.enabled);
    println!("  token_mint: {}", vault.token_mint);
    println!("  lp_mint: {}", vault.lp_mint);
    println!("  token_vault: {}", vault.token_vault);
    println!("  fee_vault: {}", vault.fee_vault);
    println!("  total_amount: {}", vault.total_amount);
    println!("  locked_profit: {}", tracker.calculate_locked_profit(now));
    println!("  unlocked_amount: {}", vault.get_unlocked_amount(now));
    println!("  last_report: {}", tracker.last_report);
    println!(
        "  locked_profit_degradation: {}",
        tracker.locked_profit_degradation
    );
    for strategy in vault.strategies() {
        println!("  strategy: {}", strategy);
    }
    Ok(())
}

async fn log_yield() -> Result<(), anyhow::Error> {
    let (boost, proof, stake) = tokio::join!(
        read_optional("BOOST"),
        read_optional("PROOF"),
        read_optional("STAKE"),
    );
    let (boost, proof, stake) = (boost?, proof?, stake?);
    let snapshot =
        YieldSnapshot::from_blobs(boost.as_deref(), proof.as_deref(), stake.as_deref());
    let claimable = snapshot.claimable();

    if json_output() {
        #[derive(Serialize)]
        struct Report<'a> {
            snapshot: &'a YieldSnapshot,
            claimable: u64,
        }
        return print_json(&Report {
            snapshot: &snapshot,
            claimable,
        });
    }

    println!("Yield");
    println!("  boost: {}", describe(&snapshot.boost));
    println!("  proof: {}", describe(&snapshot.proof));
    println!("  stake: {}", describe(&snapshot.stake));
    println!(
        "  claimable: {} ORE",
        amount_to_ui_amount(claimable, TOKEN_DECIMALS)
    );
    Ok(())
}

async fn log_share() -> Result<(), anyhow::Error> {
    let vault: MeteoraVault = load("ACCOUNT").await?;
    let now = env_or("NOW", unix_now()?)?;
    let share: u64 = env_or("SHARE", 0)?;
    let supply: u64 = env("SUPPLY")?.parse().context("Invalid SUPPLY")?;
    let amount = vault.get_amount_by_share(now, share, supply);

    if json_output() {
        return print_json(&serde_json::json!({
            "now": now,
            "share": share,
            "supply": supply,
            "unlocked": vault.get_unlocked_amount(now),
            "amount": amount,
        }));
    }

    println!("Share");
    println!("  now: {}", now);
    println!("  unlocked_amount: {}", vault.get_unlocked_amount(now));
    match amount {
        Some(amount) => println!("  amount: {}", amount),
        None => println!("  amount: n/a (zero lp supply)"),
    }
    Ok(())
}

fn keys() -> Result<(), anyhow::Error> {
    let mint = env_or("MINT", MINT_ADDRESS)?;
    let boost_address = boost_pda(mint).0;
    println!("Treasury: {}", TREASURY_ADDRESS);
    println!("Mint: {}", mint_pda().0);
    println!("Boost config: {}", BOOST_CONFIG_ADDRESS);
    println!("Boost: {} (for mint: {})", boost_address, mint);
    println!("Boost proof: {}", boost_proof_pda(boost_address).0);
    if let Ok(authority) = std::env::var("AUTHORITY") {
        let authority = Pubkey::from_str(&authority).context("Invalid AUTHORITY")?;
        println!("Proof: {} (for authority: {})", proof_pda(authority).0, authority);
        println!("Stake: {}", stake_pda(authority, boost_address).0);
        if let Ok(pool) = std::env::var("POOL") {
            let pool = Pubkey::from_str(&pool).context("Invalid POOL")?;
            println!("Member: {}", member_pda(authority, pool).0);
        }
    }
    Ok(())
}

/// Reads and decodes the account blob named by env var `var`.
async fn load<T: AccountDecode>(var: &str) -> Result<T, anyhow::Error> {
    let data = read_account(&env(var)?).await?;
    match T::decode(data.as_deref()) {
        AccountState::Found(account) => Ok(account),
        AccountState::NotFound => bail!("{} account not found", T::NAME),
        AccountState::Malformed(err) => Err(err.into()),
    }
}

/// Like [`read_account`], treating an unset env var as a missing account.
async fn read_optional(var: &str) -> Result<Option<Vec<u8>>, anyhow::Error> {
    match std::env::var(var) {
        Ok(path) => read_account(&path).await,
        Err(_) => Ok(None),
    }
}

/// Reads an account blob from disk. A missing file is a missing account.
async fn read_account(path: &str) -> Result<Option<Vec<u8>>, anyhow::Error> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path, "no account file");
            return Ok(None);
        }
        Err(err) => return Err(err).with_context(|| format!("Failed to read {path}")),
    };
    let data = match std::env::var("ENCODING").as_deref() {
        Ok("base64") => base64::engine::general_purpose::STANDARD
            .decode(bytes.trim_ascii())
            .with_context(|| format!("Invalid base64 in {path}"))?,
        Ok("binary") | Err(_) => bytes,
        Ok(other) => bail!("Invalid ENCODING: {other}"),
    };
    tracing::debug!(path, len = data.len(), "read account");
    Ok(Some(data))
}

fn describe<T>(state: &AccountState<T>) -> String {
    match state {
        AccountState::Found(_) => "found".to_string(),
        AccountState::NotFound => "not found".to_string(),
        AccountState::Malformed(err) => format!("malformed ({err})"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn json_output() -> bool {
    std::env::var("OUTPUT").is_ok_and(|output| output == "json")
}

/// Kamino stores mint decimals as u64.
fn mint_decimals(raw: u64) -> Result<u8, anyhow::Error> {
    u8::try_from(raw).with_context(|| format!("Invalid decimals: {raw}"))
}

/// Decimals of the staked mint. Rewards are always ORE.
fn decimals() -> Result<u8, anyhow::Error> {
    env_or("DECIMALS", TOKEN_DECIMALS)
}

fn env(name: &str) -> Result<String, anyhow::Error> {
    std::env::var(name).with_context(|| format!("Missing {name} env var"))
}

fn env_or<T>(name: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid {name}: {value}")),
        Err(_) => Ok(default),
    }
}

fn unix_now() -> Result<u64, anyhow::Error> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_decimals_rejects_values_past_u8() {
        assert_eq!(mint_decimals(6).unwrap(), 6);
        assert_eq!(mint_decimals(255).unwrap(), 255);
        assert!(mint_decimals(256).is_err());
        assert!(mint_decimals(u64::MAX).is_err());
    }
}
