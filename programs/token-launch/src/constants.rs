// PDA seeds
pub const CONTRACT_STATE_SEED: &[u8] = b"contract_state";
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const MULTISIG_SEED: &[u8] = b"multisig";
pub const MIGRATION_STATE_SEED: &[u8] = b"migration_state";
pub const PRESALE_PURCHASE_SEED: &[u8] = b"presale_purchase";
pub const PRESALE_VESTING_SEED: &[u8] = b"presale_vesting";
pub const MIGRATION_RECORD_SEED: &[u8] = b"migration_record";
// Signing PDAs for the token vaults
pub const TREASURY_AUTHORITY_SEED: &[u8] = b"treasury_authority";
pub const MIGRATION_AUTHORITY_SEED: &[u8] = b"migration_authority";

pub const TOKEN_DECIMALS: u32 = 9;
pub const ONE_TOKEN: u64 = 10u64.pow(TOKEN_DECIMALS);

pub const TOTAL_SUPPLY: u64 = 1_000_000_000 * ONE_TOKEN;
pub const TREASURY_RESERVE: u64 = 660_000_000 * ONE_TOKEN;

// Treasury split, percent of TREASURY_RESERVE (liquidity incentive starts empty)
pub const STAKING_POOL_PCT: u64 = 30;
pub const AIRDROP_POOL_PCT: u64 = 8;
pub const GOVERNANCE_RESERVE_PCT: u64 = 16;
pub const MARKETING_FUND_PCT: u64 = 18;
pub const EMERGENCY_FUND_PCT: u64 = 5;
pub const TEAM_POOL_PCT: u64 = 18;

// Transfer tax, in basis points
pub const BPS_DENOMINATOR: u64 = 10_000;
pub const INITIAL_TAX_RATE: u64 = 500; // 5%
pub const MAX_TAX_RATE: u64 = 1_000; // 10%
pub const PROGRESSIVE_TAX_THRESHOLD: u64 = TOTAL_SUPPLY / 200; // 0.5%

// Default presale terms
pub const PRESALE_PRICE_PER_TOKEN: u64 = 1_600; // 0.0016 USDT (6 decimals) per whole token
pub const PRESALE_SUPPLY: u64 = 250_000_000 * ONE_TOKEN;
pub const PRESALE_MAX_PER_WALLET: u64 = 2_000_000 * ONE_TOKEN;
pub const PRESALE_INITIAL_UNLOCK_BPS: u16 = 1_000; // 10% at launch
pub const PRESALE_PERIODIC_UNLOCK_BPS: u16 = 1_000; // +10% per period
pub const PRESALE_UNLOCK_PERIOD: i64 = 7 * 86_400; // weekly
pub const PRESALE_CLAIM_COOLDOWN: i64 = 86_400;

pub const MIGRATION_TOGGLE_COOLDOWN: i64 = 7 * 86_400;

pub const MAX_SIGNER_SLOTS: usize = 5;

// Treasury payouts above the threshold go through initiate/complete with a delay
pub const PENDING_WITHDRAWAL_SEED: &[u8] = b"pending_withdrawal";
pub const WITHDRAWAL_THRESHOLD: u64 = TOTAL_SUPPLY / 200; // 0.5%
pub const WITHDRAWAL_DELAY: i64 = 2 * 86_400;
