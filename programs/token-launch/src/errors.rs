use anchor_lang::prelude::*;

// Variant order is part of the client ABI (error codes start at 6000), append only.
#[error_code]
pub enum LaunchError {
    #[msg("Contract is paused")]
    Paused,
    #[msg("Contract is not paused")]
    NotPaused,
    #[msg("Unauthorized: sender is neither the authority nor a multisig owner")]
    UnauthorizedSender,
    #[msg("Unauthorized: insufficient signers for multisig operation")]
    InsufficientSigners,
    #[msg("Unauthorized: signer is not a multisig owner")]
    SignerNotOwner,
    #[msg("Reentrancy guard triggered: operation already in progress")]
    ReentrancyGuardTriggered,
    #[msg("Insufficient funds in staking pool")]
    InsufficientStakingPoolFunds,
    #[msg("Insufficient funds in airdrop pool")]
    InsufficientAirdropFunds,
    #[msg("Insufficient funds in liquidity incentive pool")]
    InsufficientLiquidityIncentiveFunds,
    #[msg("Insufficient staked amount for operation")]
    InsufficientStakedAmount,
    #[msg("No locked tokens available")]
    NoLockedTokens,
    #[msg("Maximum sell transaction limit exceeded")]
    MaxSellTxnLimitExceeded,
    #[msg("Daily sell limit exceeded")]
    DailySellLimitExceeded,
    #[msg("Maximum transfer limit exceeded")]
    MaxTransferLimitExceeded,
    #[msg("Daily transfer limit exceeded")]
    DailyTransferLimitExceeded,
    #[msg("Transfer cooldown active")]
    CooldownActive,
    #[msg("Vesting period has not started")]
    VestingNotStarted,
    #[msg("No rewards available")]
    NoRewards,
    #[msg("Proposal has expired")]
    ProposalExpired,
    #[msg("Voting period has not ended")]
    VotingPeriodNotEnded,
    #[msg("Notice period for proposal execution not met")]
    NoticePeriodNotMet,
    #[msg("Proposal has already been executed")]
    ProposalAlreadyExecuted,
    #[msg("Withdrawal delay not met")]
    WithdrawalDelayNotMet,
    #[msg("Lock period not met")]
    LockPeriodNotMet,
    #[msg("Invalid proposal type")]
    InvalidProposalType,
    #[msg("Invalid proposal value count")]
    InvalidProposalValueCount,
    #[msg("Invalid tax rate")]
    InvalidTaxRate,
    #[msg("Invalid staking tiers")]
    InvalidStakingTiers,
    #[msg("Invalid tax allocation total")]
    InvalidTaxAllocationTotal,
    #[msg("Invalid reduction thresholds")]
    InvalidReductionThresholds,
    #[msg("Invalid reduction factor")]
    InvalidReductionFactor,
    #[msg("Invalid sell limit")]
    InvalidSellLimit,
    #[msg("Invalid transfer limit")]
    InvalidTransferLimit,
    #[msg("Invalid tax threshold")]
    InvalidTaxThreshold,
    #[msg("Invalid staking reward")]
    InvalidStakingReward,
    #[msg("Invalid accounts provided")]
    InvalidAccounts,
    #[msg("Arithmetic overflow occurred")]
    ArithmeticOverflow,
    #[msg("Vector overflow: too many elements")]
    VectorOverflow,
    #[msg("Account not initialized")]
    UninitializedAccount,
    #[msg("Provided DEX program ID is not executable")]
    InvalidDexProgram,
    #[msg("Migration is not active")]
    MigrationNotActive,
    #[msg("Migration is active")]
    MigrationActive,
    #[msg("Presale is not active")]
    PresaleNotActive,
    #[msg("Presale supply exceeded")]
    PresaleSupplyExceeded,
    #[msg("Presale maximum per wallet exceeded")]
    PresaleMaxPerWalletExceeded,
    #[msg("Amount too small after tax")]
    AmountTooSmallAfterTax,
    #[msg("Description too long")]
    DescriptionTooLong,
    #[msg("Too many proposal values")]
    TooManyProposalValues,
    #[msg("Insufficient tier for voting")]
    InsufficientTierForVoting,
    #[msg("Invalid immediate amount")]
    InvalidImmediateAmount,
    #[msg("Invalid team member")]
    InvalidTeamMember,
    #[msg("Vesting canceled")]
    VestingCanceled,
    #[msg("Claim cooldown not met")]
    ClaimCooldownNotMet,
    #[msg("Exceeds vesting total")]
    ExceedsVestingTotal,
    #[msg("Too few owners in multisig")]
    TooFewOwners,
    #[msg("Duplicate owners in multisig")]
    DuplicateOwners,
    #[msg("Too many owners in multisig")]
    TooManyOwners,
    #[msg("Threshold exceeds number of owners")]
    ThresholdExceedsOwners,
    #[msg("Too many recipients")]
    TooManyRecipients,
    #[msg("Invalid recipient accounts")]
    InvalidRecipientAccounts,
    #[msg("Invalid recipient account")]
    InvalidRecipientAccount,
    #[msg("Invalid contract")]
    InvalidContract,
    #[msg("Too many whitelisted contracts")]
    TooManyWhitelistedContracts,
    #[msg("Contract not whitelisted")]
    ContractNotWhitelisted,
    #[msg("Already migrated")]
    AlreadyMigrated,
    #[msg("Invalid migration user")]
    InvalidMigrationUser,
    #[msg("Migration toggle cooldown active")]
    MigrationToggleCooldown,
    #[msg("Batch size too large")]
    BatchSizeTooLarge,
    #[msg("Whitelist delay not met")]
    WhitelistDelayNotMet,
    #[msg("Time lock requirement not met")]
    TimeLockNotMet,
    #[msg("Caller is not whitelisted")]
    CallerNotWhitelisted,
    #[msg("Invalid transfer destination")]
    InvalidDestination,
    #[msg("Version mismatch in whitelisted contract")]
    VersionMismatch,
    #[msg("KYC verification required for this purchase")]
    KycRequired,
    #[msg("Invalid threshold")]
    InvalidThreshold,
    #[msg("Invalid vector size")]
    InvalidVectorSize,
    #[msg("Invalid proposal")]
    InvalidProposal,
    #[msg("Buyer USDT account is not owned by the buyer")]
    InvalidBuyerUsdtOwner,
    #[msg("Receiving USDT account does not belong to the presale receiver")]
    InvalidPresaleUsdtReceiver,
    #[msg("Insufficient funds in governance reserve")]
    InsufficientGovernanceReserveFunds,
    #[msg("Insufficient funds in marketing fund")]
    InsufficientMarketingFunds,
    #[msg("Insufficient funds in emergency fund")]
    InsufficientEmergencyFunds,
    #[msg("Insufficient funds in team pool")]
    InsufficientTeamPoolFunds,
    #[msg("Invalid presale terms")]
    InvalidPresaleTerms,
    #[msg("Token account mint does not match the configured mint")]
    InvalidTokenMint,
}
