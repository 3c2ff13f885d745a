use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};

pub mod constants;
pub mod errors;
pub mod state;

use constants::*;
use errors::LaunchError;
use state::*;

declare_id!("emKVC7Te6oByUEuM7AzxWwTaCuHfeiS5GW9jBKA5N5i");

/// Collects `signer1..signer5` of a privileged instruction into a `SignerSet`.
macro_rules! signer_set {
    ($accounts:expr) => {
        SignerSet::new(
            $accounts.signer1.key(),
            [
                $accounts.signer2.as_ref().map(|s| s.key()),
                $accounts.signer3.as_ref().map(|s| s.key()),
                $accounts.signer4.as_ref().map(|s| s.key()),
                $accounts.signer5.as_ref().map(|s| s.key()),
            ],
        )
    };
}

#[program]
pub mod token_launch {
    use super::*;

    // One-time bootstrap of the state, treasury, multisig and migration singletons.
    // DEX programs are listed in args and passed again as remaining accounts.
    pub fn init_global(ctx: Context<InitGlobal>, args: InitGlobalArgs) -> Result<()> {
        validate_bootstrap(&args, &signer_set!(ctx.accounts))?;

        let authority = ctx.accounts.signer1.key();
        let keys = LaunchKeys {
            authority,
            admin: ctx.accounts.multisig.key(),
            treasury: ctx.accounts.treasury.key(),
            token_mint: ctx.accounts.token_mint.key(),
            usdt_mint: ctx.accounts.usdt_mint.key(),
        };
        let state = &mut ctx.accounts.state;
        state.initialize(&keys, &args, ctx.bumps.state)?;
        state.set_dex_programs(args.initial_dex_programs.clone(), ctx.remaining_accounts)?;

        ctx.accounts
            .treasury
            .allocate(TREASURY_RESERVE, args.launch_timestamp, ctx.bumps.treasury)?;

        let multisig = &mut ctx.accounts.multisig;
        multisig.set_owners(args.initial_owners.clone(), args.threshold)?;
        multisig.bump = ctx.bumps.multisig;

        let migration_state = &mut ctx.accounts.migration_state;
        migration_state.total_locked = 0;
        migration_state.migration_toggle_timestamp = 0;
        migration_state.migration_active = false;
        migration_state.bump = ctx.bumps.migration_state;

        msg!(
            "Launch initialized by {}: {} owners, threshold {}, launch at {}",
            authority,
            args.initial_owners.len(),
            args.threshold,
            args.launch_timestamp
        );
        emit!(InitializeEvent {
            launch_timestamp: args.launch_timestamp,
            initial_owners: args.initial_owners,
            threshold: args.threshold,
        });
        Ok(())
    }

    pub fn update_global(ctx: Context<AdjustTreasury>, args: UpdateGlobalArgs) -> Result<()> {
        let approvals = ctx
            .accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;

        let mut state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        state.apply_update(&args, &mut ctx.accounts.treasury);

        msg!(
            "Global config updated with {} approvals, launch at {}",
            approvals,
            state.launch_timestamp
        );
        emit!(GlobalUpdatedEvent {
            presale_usdt_receiver: state.presale_usdt_receiver,
            team_wallet: state.team_wallet,
            charity_wallet: state.charity_wallet,
            launch_timestamp: state.launch_timestamp,
        });
        Ok(())
    }

    // Opens the caller's presale records. Passing `kyc_verified = true` needs an
    // attestor signature from the authority or a multisig owner.
    pub fn init_presale(ctx: Context<InitPresale>, kyc_verified: bool) -> Result<()> {
        let state = &ctx.accounts.state;
        state.require_presale_open()?;

        if kyc_verified {
            let attestor = ctx
                .accounts
                .kyc_attestor
                .as_ref()
                .map(|s| s.key())
                .ok_or(LaunchError::UnauthorizedSender)?;
            require!(
                attestor == state.authority || ctx.accounts.multisig.is_owner(&attestor),
                LaunchError::UnauthorizedSender
            );
        }

        let buyer = ctx.accounts.buyer.key();
        let purchase = &mut ctx.accounts.purchase;
        purchase.wallet = buyer;
        purchase.total_purchased = 0;
        purchase.kyc_verified = kyc_verified;
        purchase.bump = ctx.bumps.purchase;

        let vesting = &mut ctx.accounts.vesting;
        vesting.total_amount = 0;
        vesting.claimed_amount = 0;
        vesting.canceled = false;
        vesting.last_claim_timestamp = 0;
        vesting.bump = ctx.bumps.vesting;

        msg!("Presale records opened for {} (kyc: {})", buyer, kyc_verified);
        emit!(PresaleRegisteredEvent {
            buyer,
            kyc_verified,
        });
        Ok(())
    }

    // `amount` is in quote-asset base units.
    pub fn buy_presale(ctx: Context<BuyPresale>, amount: u64) -> Result<()> {
        ctx.accounts.state.require_presale_open()?;
        let buyer = ctx.accounts.buyer.key();

        let mut state = ProcessingGuard::acquire(&mut ctx.accounts.state)?;
        let token_amount = record_presale_purchase(
            &mut state,
            &mut ctx.accounts.purchase,
            &mut ctx.accounts.vesting,
            &buyer,
            amount,
        )?;

        let cpi_accounts = Transfer {
            from: ctx.accounts.buyer_usdt_account.to_account_info(),
            to: ctx.accounts.presale_usdt_account.to_account_info(),
            authority: ctx.accounts.buyer.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;

        msg!(
            "Presale buy: {} tokens for {} USDT units, wallet total {}",
            token_amount,
            amount,
            ctx.accounts.purchase.total_purchased
        );
        emit!(PresalePurchaseEvent {
            buyer,
            usdt_amount: amount,
            token_amount,
            total_purchased: ctx.accounts.purchase.total_purchased,
            total_presale_sold: state.total_presale_sold,
        });
        Ok(())
    }

    // `amount = 0` claims everything released so far.
    pub fn claim_presale_tokens(ctx: Context<ClaimPresaleTokens>, amount: u64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        let state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        let claimed = ctx.accounts.vesting.claim(
            &state.presale_terms,
            state.launch_timestamp,
            now,
            amount,
        )?;

        let seeds: &[&[u8]] = &[TREASURY_AUTHORITY_SEED, &[ctx.bumps.treasury_authority]];
        let signer = &[seeds];
        let cpi_accounts = Transfer {
            from: ctx.accounts.treasury_token_account.to_account_info(),
            to: ctx.accounts.buyer_token_account.to_account_info(),
            authority: ctx.accounts.treasury_authority.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(
            CpiContext::new_with_signer(cpi_program, cpi_accounts, signer),
            claimed,
        )?;

        let vesting = &ctx.accounts.vesting;
        msg!(
            "Presale claim: {} tokens, {}/{} claimed",
            claimed,
            vesting.claimed_amount,
            vesting.total_amount
        );
        emit!(PresaleClaimEvent {
            buyer: ctx.accounts.buyer.key(),
            amount: claimed,
            claimed_amount: vesting.claimed_amount,
            timestamp: now,
        });
        Ok(())
    }

    pub fn cancel_presale_vesting(ctx: Context<CancelPresaleVesting>, wallet: Pubkey) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;

        let _state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        ctx.accounts.vesting.cancel()?;

        let vesting = &ctx.accounts.vesting;
        msg!(
            "Presale vesting canceled for {}, {} of {} left unclaimed",
            wallet,
            vesting.total_amount.saturating_sub(vesting.claimed_amount),
            vesting.total_amount
        );
        emit!(PresaleVestingCanceledEvent {
            wallet,
            unclaimed: vesting.total_amount.saturating_sub(vesting.claimed_amount),
        });
        Ok(())
    }

    pub fn set_kyc_status(ctx: Context<SetKycStatus>, wallet: Pubkey, verified: bool) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;

        let _state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        ctx.accounts.purchase.kyc_verified = verified;

        msg!("KYC status for {} set to {}", wallet, verified);
        emit!(KycStatusEvent { wallet, verified });
        Ok(())
    }

    pub fn set_presale_active(ctx: Context<UpdateState>, active: bool) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;

        let mut state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        state.presale_active = active;

        msg!("Presale active: {}", active);
        emit!(PresaleStatusEvent { active });
        Ok(())
    }

    pub fn update_tax_config(
        ctx: Context<UpdateState>,
        tax_rate: u64,
        progressive_tax_threshold: u64,
    ) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;

        let mut state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        state.set_tax_config(tax_rate, progressive_tax_threshold)?;

        msg!(
            "Tax config updated: rate {} bps, progressive threshold {}",
            tax_rate,
            progressive_tax_threshold
        );
        emit!(TaxConfigUpdatedEvent {
            tax_rate,
            progressive_tax_threshold,
        });
        Ok(())
    }

    pub fn set_multisig(ctx: Context<SetMultisig>, owners: Vec<Pubkey>, threshold: u8) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;

        let _state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        ctx.accounts.multisig.set_owners(owners.clone(), threshold)?;

        msg!("Multisig rotated: {} owners, threshold {}", owners.len(), threshold);
        emit!(MultisigUpdatedEvent { owners, threshold });
        Ok(())
    }

    // Pause and unpause take the guard only; the paused flag is their own precondition.
    pub fn pause(ctx: Context<UpdateState>, reason: String) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;
        let now = Clock::get()?.unix_timestamp;

        let mut state = ProcessingGuard::acquire(&mut ctx.accounts.state)?;
        state.pause(reason)?;

        msg!("Contract paused: {}", state.pause_reason);
        emit!(PauseEvent {
            reason: state.pause_reason.clone(),
            timestamp: now,
        });
        Ok(())
    }

    pub fn unpause(ctx: Context<UpdateState>) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;
        let now = Clock::get()?.unix_timestamp;

        let mut state = ProcessingGuard::acquire(&mut ctx.accounts.state)?;
        state.resume()?;

        msg!("Contract resumed");
        emit!(ResumeEvent { timestamp: now });
        Ok(())
    }

    pub fn toggle_migration(ctx: Context<ToggleMigration>) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;
        let now = Clock::get()?.unix_timestamp;

        let _state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        let active = ctx.accounts.migration_state.toggle(now)?;

        msg!("Migration active: {}", active);
        emit!(MigrationToggledEvent {
            active,
            timestamp: now,
        });
        Ok(())
    }

    pub fn lock_for_migration(ctx: Context<LockForMigration>, amount: u64) -> Result<()> {
        ctx.accounts.state.require_not_paused()?;
        let user = ctx.accounts.user.key();

        let record = &mut ctx.accounts.record;
        record.bump = ctx.bumps.record;
        record.lock(&mut ctx.accounts.migration_state, &user, amount)?;

        let cpi_accounts = Transfer {
            from: ctx.accounts.user_token_account.to_account_info(),
            to: ctx.accounts.migration_vault.to_account_info(),
            authority: ctx.accounts.user.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;

        msg!(
            "Locked {} tokens for migration, user total {}",
            amount,
            ctx.accounts.record.locked_amount
        );
        emit!(MigrationLockEvent {
            user,
            amount,
            total_locked: ctx.accounts.migration_state.total_locked,
        });
        Ok(())
    }

    pub fn unlock_for_migration(ctx: Context<UnlockForMigration>) -> Result<()> {
        ctx.accounts.state.require_not_paused()?;
        let user = ctx.accounts.user.key();
        let amount = ctx
            .accounts
            .record
            .unlock(&mut ctx.accounts.migration_state, &user)?;

        let seeds: &[&[u8]] = &[MIGRATION_AUTHORITY_SEED, &[ctx.bumps.migration_authority]];
        let signer = &[seeds];
        let cpi_accounts = Transfer {
            from: ctx.accounts.migration_vault.to_account_info(),
            to: ctx.accounts.user_token_account.to_account_info(),
            authority: ctx.accounts.migration_authority.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(
            CpiContext::new_with_signer(cpi_program, cpi_accounts, signer),
            amount,
        )?;

        msg!("Unlocked {} migration tokens for {}", amount, user);
        emit!(MigrationUnlockEvent {
            user,
            amount,
            total_locked: ctx.accounts.migration_state.total_locked,
        });
        Ok(())
    }

    pub fn burn_locked_tokens(ctx: Context<BurnLockedTokens>, user: Pubkey) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;

        let _state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        let amount = ctx
            .accounts
            .record
            .burn(&mut ctx.accounts.migration_state, &user)?;

        let seeds: &[&[u8]] = &[MIGRATION_AUTHORITY_SEED, &[ctx.bumps.migration_authority]];
        let signer = &[seeds];
        let cpi_accounts = Burn {
            mint: ctx.accounts.token_mint.to_account_info(),
            from: ctx.accounts.migration_vault.to_account_info(),
            authority: ctx.accounts.migration_authority.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::burn(
            CpiContext::new_with_signer(cpi_program, cpi_accounts, signer),
            amount,
        )?;

        msg!("Burned {} migrated tokens for {}", amount, user);
        emit!(MigrationBurnEvent {
            user,
            amount,
            total_locked: ctx.accounts.migration_state.total_locked,
        });
        Ok(())
    }

    pub fn transfer_between_pools(
        ctx: Context<AdjustTreasury>,
        source: PoolType,
        dest: PoolType,
        amount: u64,
    ) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;

        let _state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        let (source_balance, dest_balance) =
            ctx.accounts.treasury.transfer_between(source, dest, amount)?;

        msg!("Moved {} from {:?} to {:?}", amount, source, dest);
        emit!(TreasuryPoolAdjusted {
            pool: source,
            balance: source_balance,
        });
        emit!(TreasuryPoolAdjusted {
            pool: dest,
            balance: dest_balance,
        });
        Ok(())
    }

    pub fn disburse_from_pool(ctx: Context<DisburseFromPool>, pool: PoolType, amount: u64) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;

        let _state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        let balance = ctx.accounts.treasury.disburse(pool, amount)?;

        let seeds: &[&[u8]] = &[TREASURY_AUTHORITY_SEED, &[ctx.bumps.treasury_authority]];
        let signer = &[seeds];
        let cpi_accounts = Transfer {
            from: ctx.accounts.treasury_token_account.to_account_info(),
            to: ctx.accounts.recipient_token_account.to_account_info(),
            authority: ctx.accounts.treasury_authority.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(
            CpiContext::new_with_signer(cpi_program, cpi_accounts, signer),
            amount,
        )?;

        let recipient = ctx.accounts.recipient_token_account.key();
        msg!("Disbursed {} from {:?} to {}", amount, pool, recipient);
        emit!(TreasuryPoolAdjusted { pool, balance });
        emit!(TreasuryDisbursement {
            pool,
            recipient,
            amount,
        });
        Ok(())
    }

    // Replaces the DEX allowlist. The programs are passed again as remaining accounts.
    pub fn update_dex_programs(ctx: Context<UpdateState>, dex_programs: Vec<Pubkey>) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;

        let mut state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        state.set_dex_programs(dex_programs, ctx.remaining_accounts)?;

        msg!("DEX programs updated: {} listed", state.dex_programs.len());
        emit!(DexProgramsUpdatedEvent {
            dex_programs: state.dex_programs.clone(),
        });
        Ok(())
    }

    // First half of a treasury payout. Amounts above WITHDRAWAL_THRESHOLD wait out
    // WITHDRAWAL_DELAY before complete_withdrawal can move them.
    pub fn initiate_withdrawal(
        ctx: Context<InitiateWithdrawal>,
        pool: PoolType,
        amount: u64,
    ) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;
        let now = Clock::get()?.unix_timestamp;

        let _state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        let destination = ctx.accounts.destination_token_account.key();
        let pending = &mut ctx.accounts.pending_withdrawal;
        pending.schedule(&ctx.accounts.treasury, pool, amount, destination, now)?;
        pending.bump = ctx.bumps.pending_withdrawal;

        msg!(
            "Withdrawal of {} from {:?} to {} unlocks at {}",
            amount,
            pool,
            destination,
            pending.unlock_at
        );
        emit!(WithdrawalInitiatedEvent {
            pool,
            amount,
            destination,
            unlock_at: pending.unlock_at,
        });
        Ok(())
    }

    pub fn complete_withdrawal(ctx: Context<CompleteWithdrawal>) -> Result<()> {
        ctx.accounts
            .multisig
            .authorize(&ctx.accounts.state.authority, &signer_set!(ctx.accounts))?;
        let now = Clock::get()?.unix_timestamp;

        let _state = ProcessingGuard::acquire_live(&mut ctx.accounts.state)?;
        let pending = &ctx.accounts.pending_withdrawal;
        let balance = pending.settle(&mut ctx.accounts.treasury, now)?;
        let (pool, amount) = (pending.pool, pending.amount);

        let seeds: &[&[u8]] = &[TREASURY_AUTHORITY_SEED, &[ctx.bumps.treasury_authority]];
        let signer = &[seeds];
        let cpi_accounts = Transfer {
            from: ctx.accounts.treasury_token_account.to_account_info(),
            to: ctx.accounts.destination_token_account.to_account_info(),
            authority: ctx.accounts.treasury_authority.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(
            CpiContext::new_with_signer(cpi_program, cpi_accounts, signer),
            amount,
        )?;

        let destination = ctx.accounts.destination_token_account.key();
        msg!("Withdrawal completed: {} from {:?} to {}", amount, pool, destination);
        emit!(TreasuryPoolAdjusted { pool, balance });
        emit!(WithdrawalCompletedEvent {
            pool,
            amount,
            destination,
            timestamp: now,
        });
        Ok(())
    }
}

// Instruction Arguments

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct InitGlobalArgs {
    pub charity_wallet: Pubkey,
    pub team_wallet: Pubkey,
    pub liquidity_pool: Pubkey,
    pub presale_usdt_receiver: Pubkey,
    pub launch_timestamp: i64,
    pub initial_owners: Vec<Pubkey>,
    pub initial_dex_programs: Vec<Pubkey>,
    pub threshold: u8,
    pub presale_terms: Option<PresaleTerms>, // None takes the compiled-in defaults
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct UpdateGlobalArgs {
    pub presale_usdt_receiver: Pubkey,
    pub launch_timestamp: i64,
    pub team_wallet: Pubkey,
    pub charity_wallet: Pubkey,
}

// Account Structures

#[derive(Accounts)]
pub struct InitGlobal<'info> {
    #[account(
        init,
        payer = signer1,
        space = 8 + ContractState::LEN,
        seeds = [CONTRACT_STATE_SEED],
        bump
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(
        init,
        payer = signer1,
        space = 8 + Treasury::LEN,
        seeds = [TREASURY_SEED],
        bump
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    #[account(
        init,
        payer = signer1,
        space = 8 + Multisig::LEN,
        seeds = [MULTISIG_SEED],
        bump
    )]
    pub multisig: Box<Account<'info, Multisig>>,

    #[account(
        init,
        payer = signer1,
        space = 8 + MigrationState::LEN,
        seeds = [MIGRATION_STATE_SEED],
        bump
    )]
    pub migration_state: Box<Account<'info, MigrationState>>,

    // Held by the treasury and migration vaults
    pub token_mint: Box<Account<'info, Mint>>,
    // Accepted by the presale
    pub usdt_mint: Box<Account<'info, Mint>>,

    // Becomes the contract authority
    #[account(mut)]
    pub signer1: Signer<'info>,
    pub signer2: Option<Signer<'info>>,
    pub signer3: Option<Signer<'info>>,
    pub signer4: Option<Signer<'info>>,
    pub signer5: Option<Signer<'info>>,

    pub system_program: Program<'info, System>,
}

// Multisig-gated changes that only touch ContractState
#[derive(Accounts)]
pub struct UpdateState<'info> {
    #[account(
        mut,
        seeds = [CONTRACT_STATE_SEED],
        bump = state.bump,
        constraint = state.admin == multisig.key() @ LaunchError::InvalidAccounts
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(seeds = [MULTISIG_SEED], bump = multisig.bump)]
    pub multisig: Account<'info, Multisig>,

    pub signer1: Signer<'info>,
    pub signer2: Option<Signer<'info>>,
    pub signer3: Option<Signer<'info>>,
    pub signer4: Option<Signer<'info>>,
    pub signer5: Option<Signer<'info>>,
}

#[derive(Accounts)]
pub struct SetMultisig<'info> {
    #[account(
        mut,
        seeds = [CONTRACT_STATE_SEED],
        bump = state.bump,
        constraint = state.admin == multisig.key() @ LaunchError::InvalidAccounts
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(mut, seeds = [MULTISIG_SEED], bump = multisig.bump)]
    pub multisig: Account<'info, Multisig>,

    pub signer1: Signer<'info>,
    pub signer2: Option<Signer<'info>>,
    pub signer3: Option<Signer<'info>>,
    pub signer4: Option<Signer<'info>>,
    pub signer5: Option<Signer<'info>>,
}

#[derive(Accounts)]
pub struct InitPresale<'info> {
    #[account(
        seeds = [CONTRACT_STATE_SEED],
        bump = state.bump,
        constraint = state.admin == multisig.key() @ LaunchError::InvalidAccounts
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(seeds = [MULTISIG_SEED], bump = multisig.bump)]
    pub multisig: Account<'info, Multisig>,

    #[account(
        init,
        payer = buyer,
        space = 8 + PresalePurchase::LEN,
        seeds = [PRESALE_PURCHASE_SEED, buyer.key().as_ref()],
        bump
    )]
    pub purchase: Account<'info, PresalePurchase>,

    #[account(
        init,
        payer = buyer,
        space = 8 + PresaleVesting::LEN,
        seeds = [PRESALE_VESTING_SEED, buyer.key().as_ref()],
        bump
    )]
    pub vesting: Account<'info, PresaleVesting>,

    #[account(mut)]
    pub buyer: Signer<'info>,

    // Required only when opening with kyc_verified = true
    pub kyc_attestor: Option<Signer<'info>>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct BuyPresale<'info> {
    #[account(mut, seeds = [CONTRACT_STATE_SEED], bump = state.bump)]
    pub state: Box<Account<'info, ContractState>>,

    #[account(
        mut,
        seeds = [PRESALE_PURCHASE_SEED, buyer.key().as_ref()],
        bump = purchase.bump
    )]
    pub purchase: Account<'info, PresalePurchase>,

    #[account(
        mut,
        seeds = [PRESALE_VESTING_SEED, buyer.key().as_ref()],
        bump = vesting.bump
    )]
    pub vesting: Account<'info, PresaleVesting>,

    pub buyer: Signer<'info>,

    #[account(
        mut,
        constraint = buyer_usdt_account.owner == buyer.key() @ LaunchError::InvalidBuyerUsdtOwner,
        constraint = buyer_usdt_account.mint == state.usdt_mint @ LaunchError::InvalidTokenMint
    )]
    pub buyer_usdt_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = presale_usdt_account.owner == state.presale_usdt_receiver
            @ LaunchError::InvalidPresaleUsdtReceiver,
        constraint = presale_usdt_account.mint == state.usdt_mint @ LaunchError::InvalidTokenMint
    )]
    pub presale_usdt_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct ClaimPresaleTokens<'info> {
    #[account(mut, seeds = [CONTRACT_STATE_SEED], bump = state.bump)]
    pub state: Box<Account<'info, ContractState>>,

    #[account(
        mut,
        seeds = [PRESALE_VESTING_SEED, buyer.key().as_ref()],
        bump = vesting.bump
    )]
    pub vesting: Account<'info, PresaleVesting>,

    pub buyer: Signer<'info>,

    #[account(
        mut,
        constraint = buyer_token_account.owner == buyer.key() @ LaunchError::InvalidRecipientAccount,
        constraint = buyer_token_account.mint == state.token_mint @ LaunchError::InvalidTokenMint
    )]
    pub buyer_token_account: Account<'info, TokenAccount>,

    /// CHECK: PDA signing for the treasury vault
    #[account(seeds = [TREASURY_AUTHORITY_SEED], bump)]
    pub treasury_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = get_associated_token_address(&treasury_authority.key(), &state.token_mint)
            @ LaunchError::InvalidAccounts,
        constraint = treasury_token_account.owner == treasury_authority.key() @ LaunchError::InvalidAccounts
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(wallet: Pubkey)]
pub struct CancelPresaleVesting<'info> {
    #[account(
        mut,
        seeds = [CONTRACT_STATE_SEED],
        bump = state.bump,
        constraint = state.admin == multisig.key() @ LaunchError::InvalidAccounts
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(seeds = [MULTISIG_SEED], bump = multisig.bump)]
    pub multisig: Account<'info, Multisig>,

    #[account(
        mut,
        seeds = [PRESALE_VESTING_SEED, wallet.as_ref()],
        bump = vesting.bump
    )]
    pub vesting: Account<'info, PresaleVesting>,

    pub signer1: Signer<'info>,
    pub signer2: Option<Signer<'info>>,
    pub signer3: Option<Signer<'info>>,
    pub signer4: Option<Signer<'info>>,
    pub signer5: Option<Signer<'info>>,
}

#[derive(Accounts)]
#[instruction(wallet: Pubkey)]
pub struct SetKycStatus<'info> {
    #[account(
        mut,
        seeds = [CONTRACT_STATE_SEED],
        bump = state.bump,
        constraint = state.admin == multisig.key() @ LaunchError::InvalidAccounts
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(seeds = [MULTISIG_SEED], bump = multisig.bump)]
    pub multisig: Account<'info, Multisig>,

    #[account(
        mut,
        seeds = [PRESALE_PURCHASE_SEED, wallet.as_ref()],
        bump = purchase.bump
    )]
    pub purchase: Account<'info, PresalePurchase>,

    pub signer1: Signer<'info>,
    pub signer2: Option<Signer<'info>>,
    pub signer3: Option<Signer<'info>>,
    pub signer4: Option<Signer<'info>>,
    pub signer5: Option<Signer<'info>>,
}

#[derive(Accounts)]
pub struct ToggleMigration<'info> {
    #[account(
        mut,
        seeds = [CONTRACT_STATE_SEED],
        bump = state.bump,
        constraint = state.admin == multisig.key() @ LaunchError::InvalidAccounts
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(seeds = [MULTISIG_SEED], bump = multisig.bump)]
    pub multisig: Account<'info, Multisig>,

    #[account(mut, seeds = [MIGRATION_STATE_SEED], bump = migration_state.bump)]
    pub migration_state: Account<'info, MigrationState>,

    pub signer1: Signer<'info>,
    pub signer2: Option<Signer<'info>>,
    pub signer3: Option<Signer<'info>>,
    pub signer4: Option<Signer<'info>>,
    pub signer5: Option<Signer<'info>>,
}

#[derive(Accounts)]
pub struct LockForMigration<'info> {
    #[account(seeds = [CONTRACT_STATE_SEED], bump = state.bump)]
    pub state: Box<Account<'info, ContractState>>,

    #[account(mut, seeds = [MIGRATION_STATE_SEED], bump = migration_state.bump)]
    pub migration_state: Account<'info, MigrationState>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + MigrationRecord::LEN,
        seeds = [MIGRATION_RECORD_SEED, user.key().as_ref()],
        bump
    )]
    pub record: Account<'info, MigrationRecord>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        constraint = user_token_account.owner == user.key() @ LaunchError::InvalidRecipientAccount,
        constraint = user_token_account.mint == state.token_mint @ LaunchError::InvalidTokenMint
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// CHECK: PDA signing for the migration vault
    #[account(seeds = [MIGRATION_AUTHORITY_SEED], bump)]
    pub migration_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = get_associated_token_address(&migration_authority.key(), &state.token_mint)
            @ LaunchError::InvalidAccounts,
        constraint = migration_vault.owner == migration_authority.key() @ LaunchError::InvalidAccounts
    )]
    pub migration_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UnlockForMigration<'info> {
    #[account(seeds = [CONTRACT_STATE_SEED], bump = state.bump)]
    pub state: Box<Account<'info, ContractState>>,

    #[account(mut, seeds = [MIGRATION_STATE_SEED], bump = migration_state.bump)]
    pub migration_state: Account<'info, MigrationState>,

    #[account(
        mut,
        seeds = [MIGRATION_RECORD_SEED, user.key().as_ref()],
        bump = record.bump
    )]
    pub record: Account<'info, MigrationRecord>,

    pub user: Signer<'info>,

    #[account(
        mut,
        constraint = user_token_account.owner == user.key() @ LaunchError::InvalidRecipientAccount,
        constraint = user_token_account.mint == state.token_mint @ LaunchError::InvalidTokenMint
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// CHECK: PDA signing for the migration vault
    #[account(seeds = [MIGRATION_AUTHORITY_SEED], bump)]
    pub migration_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = get_associated_token_address(&migration_authority.key(), &state.token_mint)
            @ LaunchError::InvalidAccounts,
        constraint = migration_vault.owner == migration_authority.key() @ LaunchError::InvalidAccounts
    )]
    pub migration_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct BurnLockedTokens<'info> {
    #[account(
        mut,
        seeds = [CONTRACT_STATE_SEED],
        bump = state.bump,
        constraint = state.admin == multisig.key() @ LaunchError::InvalidAccounts
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(seeds = [MULTISIG_SEED], bump = multisig.bump)]
    pub multisig: Account<'info, Multisig>,

    #[account(mut, seeds = [MIGRATION_STATE_SEED], bump = migration_state.bump)]
    pub migration_state: Account<'info, MigrationState>,

    #[account(
        mut,
        seeds = [MIGRATION_RECORD_SEED, user.as_ref()],
        bump = record.bump
    )]
    pub record: Account<'info, MigrationRecord>,

    /// CHECK: PDA signing for the migration vault
    #[account(seeds = [MIGRATION_AUTHORITY_SEED], bump)]
    pub migration_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = get_associated_token_address(&migration_authority.key(), &state.token_mint)
            @ LaunchError::InvalidAccounts,
        constraint = migration_vault.owner == migration_authority.key() @ LaunchError::InvalidAccounts
    )]
    pub migration_vault: Account<'info, TokenAccount>,

    #[account(mut, address = state.token_mint @ LaunchError::InvalidTokenMint)]
    pub token_mint: Account<'info, Mint>,

    pub signer1: Signer<'info>,
    pub signer2: Option<Signer<'info>>,
    pub signer3: Option<Signer<'info>>,
    pub signer4: Option<Signer<'info>>,
    pub signer5: Option<Signer<'info>>,

    pub token_program: Program<'info, Token>,
}

// Multisig-gated changes to ContractState and the Treasury ledger
#[derive(Accounts)]
pub struct AdjustTreasury<'info> {
    #[account(
        mut,
        seeds = [CONTRACT_STATE_SEED],
        bump = state.bump,
        constraint = state.admin == multisig.key() @ LaunchError::InvalidAccounts
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(seeds = [MULTISIG_SEED], bump = multisig.bump)]
    pub multisig: Account<'info, Multisig>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
        address = state.treasury @ LaunchError::InvalidAccounts
    )]
    pub treasury: Account<'info, Treasury>,

    pub signer1: Signer<'info>,
    pub signer2: Option<Signer<'info>>,
    pub signer3: Option<Signer<'info>>,
    pub signer4: Option<Signer<'info>>,
    pub signer5: Option<Signer<'info>>,
}

#[derive(Accounts)]
pub struct DisburseFromPool<'info> {
    #[account(
        mut,
        seeds = [CONTRACT_STATE_SEED],
        bump = state.bump,
        constraint = state.admin == multisig.key() @ LaunchError::InvalidAccounts
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(seeds = [MULTISIG_SEED], bump = multisig.bump)]
    pub multisig: Account<'info, Multisig>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
        address = state.treasury @ LaunchError::InvalidAccounts
    )]
    pub treasury: Account<'info, Treasury>,

    /// CHECK: PDA signing for the treasury vault
    #[account(seeds = [TREASURY_AUTHORITY_SEED], bump)]
    pub treasury_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = get_associated_token_address(&treasury_authority.key(), &state.token_mint)
            @ LaunchError::InvalidAccounts,
        constraint = treasury_token_account.owner == treasury_authority.key() @ LaunchError::InvalidAccounts
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = recipient_token_account.mint == state.token_mint @ LaunchError::InvalidTokenMint
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    pub signer1: Signer<'info>,
    pub signer2: Option<Signer<'info>>,
    pub signer3: Option<Signer<'info>>,
    pub signer4: Option<Signer<'info>>,
    pub signer5: Option<Signer<'info>>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct InitiateWithdrawal<'info> {
    #[account(
        mut,
        seeds = [CONTRACT_STATE_SEED],
        bump = state.bump,
        constraint = state.admin == multisig.key() @ LaunchError::InvalidAccounts
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(seeds = [MULTISIG_SEED], bump = multisig.bump)]
    pub multisig: Account<'info, Multisig>,

    #[account(
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
        address = state.treasury @ LaunchError::InvalidAccounts
    )]
    pub treasury: Account<'info, Treasury>,

    // Singleton: a second initiate fails until the pending one completes
    #[account(
        init,
        payer = signer1,
        space = 8 + PendingWithdrawal::LEN,
        seeds = [PENDING_WITHDRAWAL_SEED],
        bump
    )]
    pub pending_withdrawal: Account<'info, PendingWithdrawal>,

    #[account(
        constraint = destination_token_account.mint == state.token_mint @ LaunchError::InvalidTokenMint
    )]
    pub destination_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub signer1: Signer<'info>,
    pub signer2: Option<Signer<'info>>,
    pub signer3: Option<Signer<'info>>,
    pub signer4: Option<Signer<'info>>,
    pub signer5: Option<Signer<'info>>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CompleteWithdrawal<'info> {
    #[account(
        mut,
        seeds = [CONTRACT_STATE_SEED],
        bump = state.bump,
        constraint = state.admin == multisig.key() @ LaunchError::InvalidAccounts
    )]
    pub state: Box<Account<'info, ContractState>>,

    #[account(seeds = [MULTISIG_SEED], bump = multisig.bump)]
    pub multisig: Account<'info, Multisig>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
        address = state.treasury @ LaunchError::InvalidAccounts
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(
        mut,
        seeds = [PENDING_WITHDRAWAL_SEED],
        bump = pending_withdrawal.bump,
        close = signer1
    )]
    pub pending_withdrawal: Account<'info, PendingWithdrawal>,

    /// CHECK: PDA signing for the treasury vault
    #[account(seeds = [TREASURY_AUTHORITY_SEED], bump)]
    pub treasury_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = get_associated_token_address(&treasury_authority.key(), &state.token_mint)
            @ LaunchError::InvalidAccounts
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        address = pending_withdrawal.destination @ LaunchError::InvalidDestination
    )]
    pub destination_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub signer1: Signer<'info>,
    pub signer2: Option<Signer<'info>>,
    pub signer3: Option<Signer<'info>>,
    pub signer4: Option<Signer<'info>>,
    pub signer5: Option<Signer<'info>>,

    pub token_program: Program<'info, Token>,
}

// Events

#[event]
pub struct InitializeEvent {
    pub launch_timestamp: i64,
    pub initial_owners: Vec<Pubkey>,
    pub threshold: u8,
}

#[event]
pub struct GlobalUpdatedEvent {
    pub presale_usdt_receiver: Pubkey,
    pub team_wallet: Pubkey,
    pub charity_wallet: Pubkey,
    pub launch_timestamp: i64,
}

#[event]
pub struct PresaleRegisteredEvent {
    pub buyer: Pubkey,
    pub kyc_verified: bool,
}

#[event]
pub struct PresalePurchaseEvent {
    pub buyer: Pubkey,
    pub usdt_amount: u64,
    pub token_amount: u64,
    pub total_purchased: u64,
    pub total_presale_sold: u64,
}

#[event]
pub struct PresaleClaimEvent {
    pub buyer: Pubkey,
    pub amount: u64,
    pub claimed_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct PresaleVestingCanceledEvent {
    pub wallet: Pubkey,
    pub unclaimed: u64,
}

#[event]
pub struct KycStatusEvent {
    pub wallet: Pubkey,
    pub verified: bool,
}

#[event]
pub struct PresaleStatusEvent {
    pub active: bool,
}

#[event]
pub struct TaxConfigUpdatedEvent {
    pub tax_rate: u64,
    pub progressive_tax_threshold: u64,
}

#[event]
pub struct MultisigUpdatedEvent {
    pub owners: Vec<Pubkey>,
    pub threshold: u8,
}

#[event]
pub struct PauseEvent {
    pub reason: String,
    pub timestamp: i64,
}

#[event]
pub struct ResumeEvent {
    pub timestamp: i64,
}

#[event]
pub struct MigrationToggledEvent {
    pub active: bool,
    pub timestamp: i64,
}

#[event]
pub struct MigrationLockEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub total_locked: u64,
}

#[event]
pub struct MigrationUnlockEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub total_locked: u64,
}

#[event]
pub struct MigrationBurnEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub total_locked: u64,
}

#[event]
pub struct TreasuryPoolAdjusted {
    pub pool: PoolType,
    pub balance: u64,
}

#[event]
pub struct TreasuryDisbursement {
    pub pool: PoolType,
    pub recipient: Pubkey,
    pub amount: u64,
}

#[event]
pub struct DexProgramsUpdatedEvent {
    pub dex_programs: Vec<Pubkey>,
}

#[event]
pub struct WithdrawalInitiatedEvent {
    pub pool: PoolType,
    pub amount: u64,
    pub destination: Pubkey,
    pub unlock_at: i64,
}

#[event]
pub struct WithdrawalCompletedEvent {
    pub pool: PoolType,
    pub amount: u64,
    pub destination: Pubkey,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use anchor_lang::error::Error;
    use anchor_lang::system_program;

    use super::*;

    const TOKEN_ACCOUNT_LEN: usize = 165;

    /// Backing storage for an `AccountInfo` fed to `try_accounts`.
    struct TestAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
        is_signer: bool,
        executable: bool,
    }

    impl TestAccount {
        fn new(key: Pubkey, owner: Pubkey, data: Vec<u8>) -> Self {
            Self {
                key,
                owner,
                lamports: 1_000_000_000,
                data,
                is_signer: false,
                executable: false,
            }
        }

        fn wallet(key: Pubkey) -> Self {
            Self::new(key, system_program::ID, vec![])
        }

        fn signer(key: Pubkey) -> Self {
            Self {
                is_signer: true,
                ..Self::wallet(key)
            }
        }

        fn program_owned<T: AccountSerialize>(key: Pubkey, value: &T) -> Self {
            let mut data = Vec::new();
            value.try_serialize(&mut data).unwrap();
            Self::new(key, crate::ID, data)
        }

        fn executable(key: Pubkey) -> Self {
            Self {
                executable: true,
                ..Self::new(key, Pubkey::new_unique(), vec![])
            }
        }

        fn token_program() -> Self {
            Self::executable(token::ID)
        }

        // Packed spl-token Account: no delegate, initialized, not native, no close authority
        fn token(key: Pubkey, mint: Pubkey, owner: Pubkey, amount: u64) -> Self {
            let mut data = Vec::with_capacity(TOKEN_ACCOUNT_LEN);
            data.extend_from_slice(mint.as_ref());
            data.extend_from_slice(owner.as_ref());
            data.extend_from_slice(&amount.to_le_bytes());
            data.extend_from_slice(&[0u8; 36]);
            data.push(1);
            data.extend_from_slice(&[0u8; 12]);
            data.extend_from_slice(&0u64.to_le_bytes());
            data.extend_from_slice(&[0u8; 36]);
            assert_eq!(data.len(), TOKEN_ACCOUNT_LEN);
            Self::new(key, token::ID, data)
        }

        fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                self.is_signer,
                true,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                self.executable,
                0,
            )
        }
    }

    // Leaked so the infos satisfy the 'info bound of try_accounts
    fn leak_infos(accounts: Vec<TestAccount>) -> &'static [AccountInfo<'static>] {
        let accounts: &'static mut [TestAccount] = Box::leak(accounts.into_boxed_slice());
        let infos: Vec<AccountInfo<'static>> = accounts.iter_mut().map(TestAccount::info).collect();
        Box::leak(infos.into_boxed_slice())
    }

    fn pda(seeds: &[&[u8]]) -> (Pubkey, u8) {
        Pubkey::find_program_address(seeds, &crate::ID)
    }

    fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: LaunchError) {
        assert_eq!(result.unwrap_err(), Error::from(expected));
    }

    fn launch_state() -> (Pubkey, ContractState) {
        let (key, bump) = pda(&[CONTRACT_STATE_SEED]);
        let state = ContractState {
            token_mint: Pubkey::new_unique(),
            usdt_mint: Pubkey::new_unique(),
            presale_usdt_receiver: Pubkey::new_unique(),
            presale_active: true,
            bump,
            ..ContractState::default()
        };
        (key, state)
    }

    fn treasury_vault(state: &ContractState) -> Pubkey {
        let (authority, _) = pda(&[TREASURY_AUTHORITY_SEED]);
        get_associated_token_address(&authority, &state.token_mint)
    }

    fn migration_vault(state: &ContractState) -> Pubkey {
        let (authority, _) = pda(&[MIGRATION_AUTHORITY_SEED]);
        get_associated_token_address(&authority, &state.token_mint)
    }

    fn try_buy(
        state: &ContractState,
        buyer: Pubkey,
        buyer_usdt: TestAccount,
        presale_usdt: TestAccount,
    ) -> Result<()> {
        let (state_key, _) = pda(&[CONTRACT_STATE_SEED]);
        let (purchase_key, purchase_bump) = pda(&[PRESALE_PURCHASE_SEED, buyer.as_ref()]);
        let (vesting_key, vesting_bump) = pda(&[PRESALE_VESTING_SEED, buyer.as_ref()]);
        let purchase = PresalePurchase {
            wallet: buyer,
            total_purchased: 0,
            kyc_verified: true,
            bump: purchase_bump,
        };
        let vesting = PresaleVesting {
            bump: vesting_bump,
            ..PresaleVesting::default()
        };

        let mut accounts = leak_infos(vec![
            TestAccount::program_owned(state_key, state),
            TestAccount::program_owned(purchase_key, &purchase),
            TestAccount::program_owned(vesting_key, &vesting),
            TestAccount::signer(buyer),
            buyer_usdt,
            presale_usdt,
            TestAccount::token_program(),
        ]);
        BuyPresale::try_accounts(
            &crate::ID,
            &mut accounts,
            &[],
            &mut BuyPresaleBumps::default(),
            &mut BTreeSet::new(),
        )
        .map(|_| ())
    }

    fn try_claim(
        state: &ContractState,
        buyer: Pubkey,
        buyer_tokens: TestAccount,
        vault: TestAccount,
    ) -> Result<()> {
        let (state_key, _) = pda(&[CONTRACT_STATE_SEED]);
        let (vesting_key, vesting_bump) = pda(&[PRESALE_VESTING_SEED, buyer.as_ref()]);
        let (authority, _) = pda(&[TREASURY_AUTHORITY_SEED]);
        let vesting = PresaleVesting {
            total_amount: 1_000,
            bump: vesting_bump,
            ..PresaleVesting::default()
        };

        let mut accounts = leak_infos(vec![
            TestAccount::program_owned(state_key, state),
            TestAccount::program_owned(vesting_key, &vesting),
            TestAccount::signer(buyer),
            buyer_tokens,
            TestAccount::wallet(authority),
            vault,
            TestAccount::token_program(),
        ]);
        ClaimPresaleTokens::try_accounts(
            &crate::ID,
            &mut accounts,
            &[],
            &mut ClaimPresaleTokensBumps::default(),
            &mut BTreeSet::new(),
        )
        .map(|_| ())
    }

    fn try_unlock(
        state: &ContractState,
        user: Pubkey,
        user_tokens: TestAccount,
        vault: TestAccount,
    ) -> Result<()> {
        let (state_key, _) = pda(&[CONTRACT_STATE_SEED]);
        let (migration_key, migration_bump) = pda(&[MIGRATION_STATE_SEED]);
        let (record_key, record_bump) = pda(&[MIGRATION_RECORD_SEED, user.as_ref()]);
        let (authority, _) = pda(&[MIGRATION_AUTHORITY_SEED]);
        let migration = MigrationState {
            total_locked: 500,
            bump: migration_bump,
            ..MigrationState::default()
        };
        let record = MigrationRecord {
            user,
            locked_amount: 500,
            migrated: false,
            bump: record_bump,
        };

        let mut accounts = leak_infos(vec![
            TestAccount::program_owned(state_key, state),
            TestAccount::program_owned(migration_key, &migration),
            TestAccount::program_owned(record_key, &record),
            TestAccount::signer(user),
            user_tokens,
            TestAccount::wallet(authority),
            vault,
            TestAccount::token_program(),
        ]);
        UnlockForMigration::try_accounts(
            &crate::ID,
            &mut accounts,
            &[],
            &mut UnlockForMigrationBumps::default(),
            &mut BTreeSet::new(),
        )
        .map(|_| ())
    }

    #[test]
    fn test_buy_presale_accepts_configured_usdt() {
        let (_, state) = launch_state();
        let buyer = Pubkey::new_unique();
        let buyer_usdt = TestAccount::token(Pubkey::new_unique(), state.usdt_mint, buyer, 1_000);
        let receiver = TestAccount::token(
            Pubkey::new_unique(),
            state.usdt_mint,
            state.presale_usdt_receiver,
            0,
        );
        assert!(try_buy(&state, buyer, buyer_usdt, receiver).is_ok());
    }

    #[test]
    fn test_buy_presale_rejects_foreign_mint() {
        let (_, state) = launch_state();
        let buyer = Pubkey::new_unique();
        let junk_mint = Pubkey::new_unique();

        // Worthless token paid into an account on the same worthless mint
        let buyer_usdt = TestAccount::token(Pubkey::new_unique(), junk_mint, buyer, 1_000);
        let receiver =
            TestAccount::token(Pubkey::new_unique(), junk_mint, state.presale_usdt_receiver, 0);
        assert_err(
            try_buy(&state, buyer, buyer_usdt, receiver),
            LaunchError::InvalidTokenMint,
        );

        let buyer_usdt = TestAccount::token(Pubkey::new_unique(), state.usdt_mint, buyer, 1_000);
        let receiver =
            TestAccount::token(Pubkey::new_unique(), junk_mint, state.presale_usdt_receiver, 0);
        assert_err(
            try_buy(&state, buyer, buyer_usdt, receiver),
            LaunchError::InvalidTokenMint,
        );
    }

    #[test]
    fn test_buy_presale_rejects_wrong_owners() {
        let (_, state) = launch_state();
        let buyer = Pubkey::new_unique();

        let buyer_usdt =
            TestAccount::token(Pubkey::new_unique(), state.usdt_mint, Pubkey::new_unique(), 1_000);
        let receiver = TestAccount::token(
            Pubkey::new_unique(),
            state.usdt_mint,
            state.presale_usdt_receiver,
            0,
        );
        assert_err(
            try_buy(&state, buyer, buyer_usdt, receiver),
            LaunchError::InvalidBuyerUsdtOwner,
        );

        let buyer_usdt = TestAccount::token(Pubkey::new_unique(), state.usdt_mint, buyer, 1_000);
        let receiver =
            TestAccount::token(Pubkey::new_unique(), state.usdt_mint, Pubkey::new_unique(), 0);
        assert_err(
            try_buy(&state, buyer, buyer_usdt, receiver),
            LaunchError::InvalidPresaleUsdtReceiver,
        );
    }

    #[test]
    fn test_claim_requires_canonical_treasury_vault() {
        let (_, state) = launch_state();
        let buyer = Pubkey::new_unique();
        let (authority, _) = pda(&[TREASURY_AUTHORITY_SEED]);
        let buyer_tokens = || TestAccount::token(Pubkey::new_unique(), state.token_mint, buyer, 0);

        let vault = TestAccount::token(treasury_vault(&state), state.token_mint, authority, 1_000);
        assert!(try_claim(&state, buyer, buyer_tokens(), vault).is_ok());

        // A vault the treasury authority owns but on a mint nobody checked
        let junk_vault =
            TestAccount::token(Pubkey::new_unique(), Pubkey::new_unique(), authority, 1_000);
        assert_err(
            try_claim(&state, buyer, buyer_tokens(), junk_vault),
            LaunchError::InvalidAccounts,
        );

        let stray_vault = TestAccount::token(Pubkey::new_unique(), state.token_mint, authority, 1_000);
        assert_err(
            try_claim(&state, buyer, buyer_tokens(), stray_vault),
            LaunchError::InvalidAccounts,
        );
    }

    #[test]
    fn test_claim_rejects_recipient_on_other_mint() {
        let (_, state) = launch_state();
        let buyer = Pubkey::new_unique();
        let (authority, _) = pda(&[TREASURY_AUTHORITY_SEED]);

        let buyer_tokens = TestAccount::token(Pubkey::new_unique(), state.usdt_mint, buyer, 0);
        let vault = TestAccount::token(treasury_vault(&state), state.token_mint, authority, 1_000);
        assert_err(
            try_claim(&state, buyer, buyer_tokens, vault),
            LaunchError::InvalidTokenMint,
        );
    }

    #[test]
    fn test_unlock_requires_canonical_migration_vault() {
        let (_, state) = launch_state();
        let user = Pubkey::new_unique();
        let (authority, _) = pda(&[MIGRATION_AUTHORITY_SEED]);
        let user_tokens = || TestAccount::token(Pubkey::new_unique(), state.token_mint, user, 0);

        let vault = TestAccount::token(migration_vault(&state), state.token_mint, authority, 500);
        assert!(try_unlock(&state, user, user_tokens(), vault).is_ok());

        let junk_vault =
            TestAccount::token(Pubkey::new_unique(), Pubkey::new_unique(), authority, 500);
        assert_err(
            try_unlock(&state, user, user_tokens(), junk_vault),
            LaunchError::InvalidAccounts,
        );

        let junk_tokens = TestAccount::token(Pubkey::new_unique(), Pubkey::new_unique(), user, 0);
        let vault = TestAccount::token(migration_vault(&state), state.token_mint, authority, 500);
        assert_err(
            try_unlock(&state, user, junk_tokens, vault),
            LaunchError::InvalidTokenMint,
        );
    }

    #[test]
    fn test_dex_programs_must_match_remaining_accounts() {
        let mut state = ContractState::default();
        let listed: Vec<Pubkey> = (0..2).map(|_| Pubkey::new_unique()).collect();

        let one = leak_infos(vec![TestAccount::executable(listed[0])]);
        assert_err(
            state.set_dex_programs(listed.clone(), one),
            LaunchError::InvalidAccounts,
        );

        let swapped = leak_infos(vec![
            TestAccount::executable(listed[1]),
            TestAccount::executable(listed[0]),
        ]);
        assert_err(
            state.set_dex_programs(listed.clone(), swapped),
            LaunchError::InvalidDexProgram,
        );

        let not_a_program = leak_infos(vec![
            TestAccount::executable(listed[0]),
            TestAccount::wallet(listed[1]),
        ]);
        assert_err(
            state.set_dex_programs(listed.clone(), not_a_program),
            LaunchError::InvalidDexProgram,
        );
        assert!(state.dex_programs.is_empty());

        let programs = leak_infos(listed.iter().map(|key| TestAccount::executable(*key)).collect());
        state.set_dex_programs(listed.clone(), programs).unwrap();
        assert_eq!(state.dex_programs, listed);
    }

    #[test]
    fn test_dex_programs_bounds_and_duplicates() {
        let mut state = ContractState::default();

        let listed: Vec<Pubkey> = (0..ContractState::MAX_DEX_PROGRAMS + 1)
            .map(|_| Pubkey::new_unique())
            .collect();
        let programs = leak_infos(listed.iter().map(|key| TestAccount::executable(*key)).collect());
        assert_err(
            state.set_dex_programs(listed, programs),
            LaunchError::VectorOverflow,
        );

        let dex = Pubkey::new_unique();
        let programs = leak_infos(vec![TestAccount::executable(dex), TestAccount::executable(dex)]);
        assert_err(
            state.set_dex_programs(vec![dex, dex], programs),
            LaunchError::InvalidDexProgram,
        );

        // An empty list clears the allowlist
        state.dex_programs = vec![dex];
        state.set_dex_programs(vec![], &[]).unwrap();
        assert!(state.dex_programs.is_empty());
    }
}
