use std::ops::{Deref, DerefMut};

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LaunchError;
use crate::{InitGlobalArgs, UpdateGlobalArgs};

// State Structures

#[account]
#[derive(Default)]
pub struct ContractState {
    pub authority: Pubkey,
    pub admin: Pubkey, // Multisig PDA
    pub treasury: Pubkey, // Treasury PDA
    pub token_mint: Pubkey, // Launched token, held by the treasury and migration vaults
    pub usdt_mint: Pubkey, // Quote asset accepted by the presale
    pub charity_wallet: Pubkey,
    pub team_wallet: Pubkey,
    pub liquidity_pool: Pubkey,
    pub presale_usdt_receiver: Pubkey, // Wallet owning the USDT account that collects presale payments
    pub proposal_count: u64,
    pub total_voting_power: u64,
    pub launch_timestamp: i64, // Anchor for the vesting schedule
    pub tax_rate: u64, // bps
    pub progressive_tax_threshold: u64,
    pub total_presale_sold: u64,
    pub dex_programs: Vec<Pubkey>,
    pub pause_reason: String,
    pub is_processing: bool,
    pub presale_active: bool,
    pub paused: bool,
    pub presale_terms: PresaleTerms,
    pub bump: u8,
}

/// Addresses fixed by the accounts of `init_global` rather than by its args.
#[derive(Clone, Copy, Debug)]
pub struct LaunchKeys {
    pub authority: Pubkey,
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub token_mint: Pubkey,
    pub usdt_mint: Pubkey,
}

impl ContractState {
    pub const MAX_DEX_PROGRAMS: usize = 5;
    pub const MAX_PAUSE_REASON_LEN: usize = 100;
    pub const LEN: usize = 32 * 9 // identities
        + 8 + 8 + 8 + 8 + 8 + 8 // counters, timestamp, tax params
        + 4 + 32 * Self::MAX_DEX_PROGRAMS
        + 4 + Self::MAX_PAUSE_REASON_LEN
        + 1 + 1 + 1 // flags
        + PresaleTerms::LEN
        + 1; // bump

    /// Writes the full initial configuration. DEX programs are installed afterwards
    /// through `set_dex_programs`, which needs the program accounts.
    pub fn initialize(&mut self, keys: &LaunchKeys, args: &InitGlobalArgs, bump: u8) -> Result<()> {
        require_keys_neq!(keys.token_mint, keys.usdt_mint, LaunchError::InvalidTokenMint);
        let terms = args.presale_terms.unwrap_or_default();
        terms.validate()?;

        self.authority = keys.authority;
        self.admin = keys.admin;
        self.treasury = keys.treasury;
        self.token_mint = keys.token_mint;
        self.usdt_mint = keys.usdt_mint;
        self.charity_wallet = args.charity_wallet;
        self.team_wallet = args.team_wallet;
        self.liquidity_pool = args.liquidity_pool;
        self.presale_usdt_receiver = args.presale_usdt_receiver;
        self.proposal_count = 0;
        self.total_voting_power = 0;
        self.launch_timestamp = args.launch_timestamp;
        self.tax_rate = INITIAL_TAX_RATE;
        self.progressive_tax_threshold = PROGRESSIVE_TAX_THRESHOLD;
        self.total_presale_sold = 0;
        self.dex_programs = Vec::new();
        self.pause_reason = String::new();
        self.is_processing = false;
        self.presale_active = true;
        self.paused = false;
        self.presale_terms = terms;
        self.bump = bump;
        Ok(())
    }

    /// Replaces the whitelisted DEX programs. `programs` are the matching program
    /// accounts, in the same order as `listed`.
    pub fn set_dex_programs(&mut self, listed: Vec<Pubkey>, programs: &[AccountInfo]) -> Result<()> {
        require!(
            listed.len() <= Self::MAX_DEX_PROGRAMS,
            LaunchError::VectorOverflow
        );
        require!(programs.len() == listed.len(), LaunchError::InvalidAccounts);
        for (i, (program, expected)) in programs.iter().zip(listed.iter()).enumerate() {
            require!(
                program.key == expected && program.executable,
                LaunchError::InvalidDexProgram
            );
            require!(!listed[..i].contains(expected), LaunchError::InvalidDexProgram);
        }
        self.dex_programs = listed;
        Ok(())
    }

    pub fn require_not_paused(&self) -> Result<()> {
        require!(!self.paused, LaunchError::Paused);
        Ok(())
    }

    pub fn require_presale_open(&self) -> Result<()> {
        self.require_not_paused()?;
        require!(self.presale_active, LaunchError::PresaleNotActive);
        Ok(())
    }

    /// The treasury keeps its own copy of the launch anchor and follows any move.
    pub fn apply_update(&mut self, args: &UpdateGlobalArgs, treasury: &mut Treasury) {
        // A non-positive timestamp keeps the current launch anchor
        if args.launch_timestamp > 0 {
            self.launch_timestamp = args.launch_timestamp;
            treasury.launch_timestamp = args.launch_timestamp;
        }
        self.team_wallet = args.team_wallet;
        self.charity_wallet = args.charity_wallet;
        self.presale_usdt_receiver = args.presale_usdt_receiver;
    }

    pub fn pause(&mut self, reason: String) -> Result<()> {
        require!(!self.paused, LaunchError::Paused);
        require!(
            reason.len() <= Self::MAX_PAUSE_REASON_LEN,
            LaunchError::DescriptionTooLong
        );
        self.paused = true;
        self.pause_reason = reason;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        require!(self.paused, LaunchError::NotPaused);
        self.paused = false;
        self.pause_reason = String::new();
        Ok(())
    }

    pub fn set_tax_config(&mut self, tax_rate: u64, progressive_tax_threshold: u64) -> Result<()> {
        require!(tax_rate <= MAX_TAX_RATE, LaunchError::InvalidTaxRate);
        require!(
            progressive_tax_threshold > 0 && progressive_tax_threshold <= TOTAL_SUPPLY,
            LaunchError::InvalidTaxThreshold
        );
        self.tax_rate = tax_rate;
        self.progressive_tax_threshold = progressive_tax_threshold;
        Ok(())
    }
}

/// Pricing, caps and release curve of the presale, fixed at `init_global`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct PresaleTerms {
    /// Quote-asset base units charged per whole token (10^9 token base units)
    pub price_per_token: u64,
    pub supply_cap: u64,
    pub max_per_wallet: u64,
    /// Share released at `launch_timestamp`
    pub initial_unlock_bps: u16,
    /// Share added after each full `unlock_period`
    pub periodic_unlock_bps: u16,
    pub unlock_period: i64,
    pub claim_cooldown: i64,
}

impl Default for PresaleTerms {
    fn default() -> Self {
        Self {
            price_per_token: PRESALE_PRICE_PER_TOKEN,
            supply_cap: PRESALE_SUPPLY,
            max_per_wallet: PRESALE_MAX_PER_WALLET,
            initial_unlock_bps: PRESALE_INITIAL_UNLOCK_BPS,
            periodic_unlock_bps: PRESALE_PERIODIC_UNLOCK_BPS,
            unlock_period: PRESALE_UNLOCK_PERIOD,
            claim_cooldown: PRESALE_CLAIM_COOLDOWN,
        }
    }
}

impl PresaleTerms {
    pub const LEN: usize = 8 + 8 + 8 + 2 + 2 + 8 + 8;

    pub fn validate(&self) -> Result<()> {
        require!(self.price_per_token > 0, LaunchError::InvalidPresaleTerms);
        require!(
            self.max_per_wallet > 0 && self.max_per_wallet <= self.supply_cap,
            LaunchError::InvalidPresaleTerms
        );
        require!(
            u64::from(self.initial_unlock_bps) <= BPS_DENOMINATOR
                && u64::from(self.periodic_unlock_bps) <= BPS_DENOMINATOR,
            LaunchError::InvalidPresaleTerms
        );
        // The curve has to reach 100% eventually
        require!(
            self.unlock_period > 0 && self.periodic_unlock_bps > 0,
            LaunchError::InvalidPresaleTerms
        );
        require!(self.claim_cooldown >= 0, LaunchError::InvalidPresaleTerms);
        Ok(())
    }

    pub fn tokens_for(&self, quote_amount: u64) -> Result<u64> {
        let tokens = (quote_amount as u128)
            .checked_mul(ONE_TOKEN as u128)
            .ok_or(LaunchError::ArithmeticOverflow)?
            / self.price_per_token as u128;
        let tokens = u64::try_from(tokens).map_err(|_| LaunchError::ArithmeticOverflow)?;
        Ok(tokens)
    }

    /// Released share of every grant at `now`, in bps.
    pub fn unlocked_bps(&self, launch_timestamp: i64, now: i64) -> Result<u64> {
        let elapsed = now
            .checked_sub(launch_timestamp)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        require!(elapsed >= 0, LaunchError::VestingNotStarted);
        let periods = (elapsed / self.unlock_period) as u64;
        let bps = u64::from(self.initial_unlock_bps)
            .saturating_add(u64::from(self.periodic_unlock_bps).saturating_mul(periods));
        Ok(bps.min(BPS_DENOMINATOR))
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PoolType {
    #[default]
    Staking,
    Airdrop,
    Governance,
    Marketing,
    Emergency,
    LiquidityIncentive,
    Team,
}

impl PoolType {
    pub fn insufficient_funds(self) -> LaunchError {
        match self {
            PoolType::Staking => LaunchError::InsufficientStakingPoolFunds,
            PoolType::Airdrop => LaunchError::InsufficientAirdropFunds,
            PoolType::Governance => LaunchError::InsufficientGovernanceReserveFunds,
            PoolType::Marketing => LaunchError::InsufficientMarketingFunds,
            PoolType::Emergency => LaunchError::InsufficientEmergencyFunds,
            PoolType::LiquidityIncentive => LaunchError::InsufficientLiquidityIncentiveFunds,
            PoolType::Team => LaunchError::InsufficientTeamPoolFunds,
        }
    }
}

#[account]
#[derive(Default, Debug)]
pub struct Treasury {
    pub staking_pool: u64,
    pub airdrop_pool: u64,
    pub governance_reserve: u64,
    pub marketing_fund: u64,
    pub emergency_fund: u64,
    pub liquidity_incentive: u64,
    pub team_pool: u64,
    pub launch_timestamp: i64,
    pub bump: u8,
}

impl Treasury {
    pub const LEN: usize = 8 * 7 + 8 + 1; // pools + launch_timestamp + bump

    /// Splits `reserve` across the pools. The liquidity incentive pool starts empty.
    pub fn allocate(&mut self, reserve: u64, launch_timestamp: i64, bump: u8) -> Result<()> {
        let share = |pct: u64| -> Result<u64> {
            let amount = (reserve as u128)
                .checked_mul(pct as u128)
                .ok_or(LaunchError::ArithmeticOverflow)?
                / 100;
            let amount = u64::try_from(amount).map_err(|_| LaunchError::ArithmeticOverflow)?;
            Ok(amount)
        };
        self.staking_pool = share(STAKING_POOL_PCT)?;
        self.airdrop_pool = share(AIRDROP_POOL_PCT)?;
        self.governance_reserve = share(GOVERNANCE_RESERVE_PCT)?;
        self.marketing_fund = share(MARKETING_FUND_PCT)?;
        self.emergency_fund = share(EMERGENCY_FUND_PCT)?;
        self.team_pool = share(TEAM_POOL_PCT)?;
        self.liquidity_incentive = 0;
        self.launch_timestamp = launch_timestamp;
        self.bump = bump;
        Ok(())
    }

    pub fn balance(&self, pool: PoolType) -> u64 {
        match pool {
            PoolType::Staking => self.staking_pool,
            PoolType::Airdrop => self.airdrop_pool,
            PoolType::Governance => self.governance_reserve,
            PoolType::Marketing => self.marketing_fund,
            PoolType::Emergency => self.emergency_fund,
            PoolType::LiquidityIncentive => self.liquidity_incentive,
            PoolType::Team => self.team_pool,
        }
    }

    fn balance_mut(&mut self, pool: PoolType) -> &mut u64 {
        match pool {
            PoolType::Staking => &mut self.staking_pool,
            PoolType::Airdrop => &mut self.airdrop_pool,
            PoolType::Governance => &mut self.governance_reserve,
            PoolType::Marketing => &mut self.marketing_fund,
            PoolType::Emergency => &mut self.emergency_fund,
            PoolType::LiquidityIncentive => &mut self.liquidity_incentive,
            PoolType::Team => &mut self.team_pool,
        }
    }

    pub fn debit(&mut self, pool: PoolType, amount: u64) -> Result<u64> {
        let balance = self.balance_mut(pool);
        *balance = balance
            .checked_sub(amount)
            .ok_or(pool.insufficient_funds())?;
        Ok(*balance)
    }

    pub fn credit(&mut self, pool: PoolType, amount: u64) -> Result<u64> {
        let balance = self.balance_mut(pool);
        *balance = balance
            .checked_add(amount)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        Ok(*balance)
    }

    /// Immediate payout out of a pool. Anything above the withdrawal threshold has to
    /// go through a delayed `PendingWithdrawal` instead.
    pub fn disburse(&mut self, pool: PoolType, amount: u64) -> Result<u64> {
        require!(
            amount <= WITHDRAWAL_THRESHOLD,
            LaunchError::WithdrawalDelayNotMet
        );
        self.debit(pool, amount)
    }

    /// Moves `amount` between two pools, returning the new (source, dest) balances.
    pub fn transfer_between(
        &mut self,
        source: PoolType,
        dest: PoolType,
        amount: u64,
    ) -> Result<(u64, u64)> {
        require!(source != dest, LaunchError::InvalidAccounts);
        require!(
            self.balance(source) >= amount,
            source.insufficient_funds()
        );
        require!(
            self.balance(dest).checked_add(amount).is_some(),
            LaunchError::ArithmeticOverflow
        );
        let source_balance = self.debit(source, amount)?;
        let dest_balance = self.credit(dest, amount)?;
        Ok((source_balance, dest_balance))
    }
}

#[account]
#[derive(Default)]
pub struct Multisig {
    pub owners: Vec<Pubkey>,
    pub threshold: u8,
    pub bump: u8,
}

impl Multisig {
    pub const MIN_OWNERS: usize = 1;
    pub const MAX_OWNERS: usize = 5;
    pub const LEN: usize = 4 + 32 * Self::MAX_OWNERS + 1 + 1; // owners + threshold + bump

    pub fn validate_owner_set(owners: &[Pubkey], threshold: u8) -> Result<()> {
        require!(owners.len() >= Self::MIN_OWNERS, LaunchError::TooFewOwners);
        require!(owners.len() <= Self::MAX_OWNERS, LaunchError::TooManyOwners);
        for (i, owner) in owners.iter().enumerate() {
            require!(
                !owners[i + 1..].contains(owner),
                LaunchError::DuplicateOwners
            );
        }
        require!(threshold >= 1, LaunchError::InvalidThreshold);
        require!(
            threshold as usize <= owners.len(),
            LaunchError::ThresholdExceedsOwners
        );
        Ok(())
    }

    pub fn set_owners(&mut self, owners: Vec<Pubkey>, threshold: u8) -> Result<()> {
        Self::validate_owner_set(&owners, threshold)?;
        self.owners = owners;
        self.threshold = threshold;
        Ok(())
    }

    pub fn is_owner(&self, key: &Pubkey) -> bool {
        self.owners.contains(key)
    }

    /// Checks the supplied signer slots against the owner set and returns the number
    /// of distinct owner approvals. `signer1` may be the contract authority without
    /// being an owner, in which case it carries no approval weight.
    pub fn authorize(&self, authority: &Pubkey, signers: &SignerSet) -> Result<usize> {
        let caller_is_owner = self.is_owner(&signers.caller);
        require!(
            caller_is_owner || signers.caller == *authority,
            LaunchError::UnauthorizedSender
        );

        let mut approvals: Vec<Pubkey> = Vec::with_capacity(MAX_SIGNER_SLOTS);
        if caller_is_owner {
            approvals.push(signers.caller);
        }
        for cosigner in signers.cosigners() {
            require!(self.is_owner(cosigner), LaunchError::SignerNotOwner);
            if !approvals.contains(cosigner) {
                approvals.push(*cosigner);
            }
        }

        require!(
            approvals.len() >= self.threshold as usize,
            LaunchError::InsufficientSigners
        );
        Ok(approvals.len())
    }
}

/// The fixed signer slots of a privileged instruction: `signer1` plus up to four
/// optional co-signers. Slots carry no positional meaning beyond the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignerSet {
    pub caller: Pubkey,
    pub slots: [Option<Pubkey>; MAX_SIGNER_SLOTS - 1],
}

impl SignerSet {
    pub fn new(caller: Pubkey, slots: [Option<Pubkey>; MAX_SIGNER_SLOTS - 1]) -> Self {
        Self { caller, slots }
    }

    pub fn cosigners(&self) -> impl Iterator<Item = &Pubkey> {
        self.slots.iter().flatten()
    }

    /// Bootstrap rule: every co-signer must belong to the owner set being installed.
    pub fn require_cosigners_in(&self, owners: &[Pubkey]) -> Result<()> {
        for cosigner in self.cosigners() {
            require!(owners.contains(cosigner), LaunchError::SignerNotOwner);
        }
        Ok(())
    }
}

#[account]
#[derive(Default)]
pub struct MigrationState {
    pub total_locked: u64,
    pub migration_toggle_timestamp: i64,
    pub migration_active: bool,
    pub bump: u8,
}

impl MigrationState {
    pub const LEN: usize = 8 + 8 + 1 + 1;

    /// Flips `migration_active`, returning the new value.
    pub fn toggle(&mut self, now: i64) -> Result<bool> {
        let elapsed = now
            .checked_sub(self.migration_toggle_timestamp)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        require!(
            elapsed >= MIGRATION_TOGGLE_COOLDOWN,
            LaunchError::MigrationToggleCooldown
        );
        self.migration_active = !self.migration_active;
        self.migration_toggle_timestamp = now;
        Ok(self.migration_active)
    }

    pub fn require_active(&self) -> Result<()> {
        require!(self.migration_active, LaunchError::MigrationNotActive);
        Ok(())
    }

    pub fn require_inactive(&self) -> Result<()> {
        require!(!self.migration_active, LaunchError::MigrationActive);
        Ok(())
    }
}

#[account]
#[derive(Default)]
pub struct MigrationRecord {
    pub user: Pubkey,
    pub locked_amount: u64,
    pub migrated: bool,
    pub bump: u8,
}

impl MigrationRecord {
    pub const LEN: usize = 32 + 8 + 1 + 1;

    fn claim_for(&mut self, user: &Pubkey) -> Result<()> {
        if self.user == Pubkey::default() {
            self.user = *user;
        }
        require_keys_eq!(self.user, *user, LaunchError::InvalidMigrationUser);
        Ok(())
    }

    pub fn lock(&mut self, migration: &mut MigrationState, user: &Pubkey, amount: u64) -> Result<()> {
        migration.require_active()?;
        require!(!self.migrated, LaunchError::AlreadyMigrated);
        require!(amount > 0, LaunchError::AmountTooSmallAfterTax);
        self.claim_for(user)?;
        let locked = self
            .locked_amount
            .checked_add(amount)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        let total = migration
            .total_locked
            .checked_add(amount)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        self.locked_amount = locked;
        migration.total_locked = total;
        Ok(())
    }

    /// Releases everything the user locked, returning the amount to hand back.
    pub fn unlock(&mut self, migration: &mut MigrationState, user: &Pubkey) -> Result<u64> {
        migration.require_inactive()?;
        require!(!self.migrated, LaunchError::AlreadyMigrated);
        require_keys_eq!(self.user, *user, LaunchError::InvalidMigrationUser);
        self.release(migration)
    }

    /// Finalizes the user's migration, returning the amount to burn.
    pub fn burn(&mut self, migration: &mut MigrationState, user: &Pubkey) -> Result<u64> {
        require_keys_eq!(self.user, *user, LaunchError::InvalidMigrationUser);
        require!(!self.migrated, LaunchError::AlreadyMigrated);
        let amount = self.release(migration)?;
        self.migrated = true;
        Ok(amount)
    }

    fn release(&mut self, migration: &mut MigrationState) -> Result<u64> {
        let amount = self.locked_amount;
        require!(amount > 0, LaunchError::NoLockedTokens);
        migration.total_locked = migration
            .total_locked
            .checked_sub(amount)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        self.locked_amount = 0;
        Ok(amount)
    }
}

#[account]
#[derive(Default)]
pub struct PresalePurchase {
    pub wallet: Pubkey,
    pub total_purchased: u64,
    pub kyc_verified: bool,
    pub bump: u8,
}

impl PresalePurchase {
    pub const LEN: usize = 32 + 8 + 1 + 1;
}

#[account]
#[derive(Default)]
pub struct PresaleVesting {
    pub total_amount: u64,
    pub claimed_amount: u64,
    pub canceled: bool,
    pub last_claim_timestamp: i64,
    pub bump: u8,
}

impl PresaleVesting {
    pub const LEN: usize = 8 + 8 + 1 + 8 + 1;

    /// Claims `requested` tokens, or everything released so far when `requested` is
    /// zero. Returns the amount to disburse.
    pub fn claim(
        &mut self,
        terms: &PresaleTerms,
        launch_timestamp: i64,
        now: i64,
        requested: u64,
    ) -> Result<u64> {
        require!(!self.canceled, LaunchError::VestingCanceled);
        let unlocked_bps = terms.unlocked_bps(launch_timestamp, now)?;
        if self.claimed_amount > 0 {
            let next_claim = self
                .last_claim_timestamp
                .checked_add(terms.claim_cooldown)
                .ok_or(LaunchError::ArithmeticOverflow)?;
            require!(now >= next_claim, LaunchError::ClaimCooldownNotMet);
        }

        let unlocked = (self.total_amount as u128)
            .checked_mul(unlocked_bps as u128)
            .ok_or(LaunchError::ArithmeticOverflow)?
            / BPS_DENOMINATOR as u128;
        let unlocked = u64::try_from(unlocked).map_err(|_| LaunchError::ArithmeticOverflow)?;
        let available = unlocked.saturating_sub(self.claimed_amount);

        let amount = if requested == 0 {
            require!(available > 0, LaunchError::NoRewards);
            available
        } else {
            let claimed = self
                .claimed_amount
                .checked_add(requested)
                .ok_or(LaunchError::ArithmeticOverflow)?;
            require!(claimed <= self.total_amount, LaunchError::ExceedsVestingTotal);
            require!(requested <= available, LaunchError::LockPeriodNotMet);
            requested
        };

        self.claimed_amount = self
            .claimed_amount
            .checked_add(amount)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        self.last_claim_timestamp = now;
        Ok(amount)
    }

    pub fn cancel(&mut self) -> Result<()> {
        require!(!self.canceled, LaunchError::VestingCanceled);
        self.canceled = true;
        Ok(())
    }
}

/// A treasury payout waiting out its delay. At most one exists at a time; completing
/// it closes the account.
#[account]
#[derive(Default)]
pub struct PendingWithdrawal {
    pub pool: PoolType,
    pub amount: u64,
    pub destination: Pubkey, // Token account that receives the payout
    pub initiated_at: i64,
    pub unlock_at: i64,
    pub bump: u8,
}

impl PendingWithdrawal {
    pub const LEN: usize = 1 + 8 + 32 + 8 + 8 + 1;

    pub fn delay_for(amount: u64) -> i64 {
        if amount > WITHDRAWAL_THRESHOLD {
            WITHDRAWAL_DELAY
        } else {
            0
        }
    }

    pub fn schedule(
        &mut self,
        treasury: &Treasury,
        pool: PoolType,
        amount: u64,
        destination: Pubkey,
        now: i64,
    ) -> Result<()> {
        require!(amount > 0, LaunchError::AmountTooSmallAfterTax);
        require!(
            treasury.balance(pool) >= amount,
            pool.insufficient_funds()
        );
        self.unlock_at = now
            .checked_add(Self::delay_for(amount))
            .ok_or(LaunchError::ArithmeticOverflow)?;
        self.pool = pool;
        self.amount = amount;
        self.destination = destination;
        self.initiated_at = now;
        Ok(())
    }

    /// Debits the pool once the delay has passed, returning the balance left in it.
    pub fn settle(&self, treasury: &mut Treasury, now: i64) -> Result<u64> {
        require!(now >= self.unlock_at, LaunchError::WithdrawalDelayNotMet);
        treasury.debit(self.pool, self.amount)
    }
}

/// Bootstrap checks of `init_global`: owner-set bounds, then every co-signer must be
/// one of the owners being installed.
pub fn validate_bootstrap(args: &InitGlobalArgs, signers: &SignerSet) -> Result<()> {
    Multisig::validate_owner_set(&args.initial_owners, args.threshold)?;
    signers.require_cosigners_in(&args.initial_owners)
}

/// Validates a presale purchase against KYC and both caps, then credits the buyer.
/// Nothing is written unless every check passes. Returns the token amount credited.
pub fn record_presale_purchase(
    state: &mut ContractState,
    purchase: &mut PresalePurchase,
    vesting: &mut PresaleVesting,
    buyer: &Pubkey,
    quote_amount: u64,
) -> Result<u64> {
    require_keys_eq!(purchase.wallet, *buyer, LaunchError::UnauthorizedSender);
    require!(purchase.kyc_verified, LaunchError::KycRequired);

    let token_amount = state.presale_terms.tokens_for(quote_amount)?;
    require!(token_amount > 0, LaunchError::AmountTooSmallAfterTax);

    let sold = state
        .total_presale_sold
        .checked_add(token_amount)
        .ok_or(LaunchError::ArithmeticOverflow)?;
    require!(
        sold <= state.presale_terms.supply_cap,
        LaunchError::PresaleSupplyExceeded
    );
    let purchased = purchase
        .total_purchased
        .checked_add(token_amount)
        .ok_or(LaunchError::ArithmeticOverflow)?;
    require!(
        purchased <= state.presale_terms.max_per_wallet,
        LaunchError::PresaleMaxPerWalletExceeded
    );
    let granted = vesting
        .total_amount
        .checked_add(token_amount)
        .ok_or(LaunchError::ArithmeticOverflow)?;

    state.total_presale_sold = sold;
    purchase.total_purchased = purchased;
    vesting.total_amount = granted;
    Ok(token_amount)
}

/// Holds `is_processing` for as long as it lives and clears it on drop, so every
/// exit path of a handler releases the flag.
pub struct ProcessingGuard<'a> {
    state: &'a mut ContractState,
}

impl<'a> ProcessingGuard<'a> {
    pub fn acquire(state: &'a mut ContractState) -> Result<Self> {
        require!(
            !state.is_processing,
            LaunchError::ReentrancyGuardTriggered
        );
        state.is_processing = true;
        Ok(Self { state })
    }

    /// Liveness gate followed by the guard, the prologue of privileged handlers.
    pub fn acquire_live(state: &'a mut ContractState) -> Result<Self> {
        state.require_not_paused()?;
        Self::acquire(state)
    }
}

impl Deref for ProcessingGuard<'_> {
    type Target = ContractState;

    fn deref(&self) -> &ContractState {
        self.state
    }
}

impl DerefMut for ProcessingGuard<'_> {
    fn deref_mut(&mut self) -> &mut ContractState {
        self.state
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.state.is_processing = false;
    }
}
