use soroban_sdk::{contracterror, contracttype};

/// Error categories for classifying ledger failures.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Malformed or out-of-range arguments
    Validation = 1,
    /// Caller lacks the role or permission for the operation
    Authorization = 2,
    /// Idempotency violations: granting twice, removing what is absent
    StateConflict = 3,
    /// Lookup of something that does not exist
    NotFound = 4,
    /// Contract-level conditions such as lifecycle and pausing
    System = 5,
}

/// Error severity levels indicating the impact of a failure.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

/// Contract errors. Codes are part of the ABI and must stay stable.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAddress = 4,
    AlreadyVerified = 5,
    NotVerified = 6,
    DoctorNotVerified = 7,
    AlreadyGranted = 8,
    NotGranted = 9,
    EmptyHash = 10,
    AccessDenied = 11,
    InvalidAmount = 12,
    Paused = 13,
    HashTooLong = 14,
    BalanceOverflow = 15,
    AuditEntryNotFound = 16,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidAddress
            | ContractError::EmptyHash
            | ContractError::HashTooLong
            | ContractError::InvalidAmount
            | ContractError::BalanceOverflow => ErrorCategory::Validation,
            ContractError::Unauthorized
            | ContractError::AccessDenied
            | ContractError::DoctorNotVerified => ErrorCategory::Authorization,
            ContractError::AlreadyVerified
            | ContractError::NotVerified
            | ContractError::AlreadyGranted
            | ContractError::NotGranted => ErrorCategory::StateConflict,
            ContractError::AuditEntryNotFound => ErrorCategory::NotFound,
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::Paused => ErrorCategory::System,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::InvalidAddress
            | ContractError::EmptyHash
            | ContractError::HashTooLong
            | ContractError::InvalidAmount
            | ContractError::AlreadyVerified
            | ContractError::NotVerified
            | ContractError::AlreadyGranted
            | ContractError::NotGranted
            | ContractError::AuditEntryNotFound
            | ContractError::AlreadyInitialized => ErrorSeverity::Low,
            ContractError::Unauthorized
            | ContractError::AccessDenied
            | ContractError::DoctorNotVerified => ErrorSeverity::Medium,
            ContractError::BalanceOverflow | ContractError::NotInitialized => ErrorSeverity::High,
            ContractError::Paused => ErrorSeverity::Critical,
        }
    }

    /// Returns a human-readable message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::InvalidAddress => "Address must not be the zero account",
            ContractError::AlreadyVerified => "Doctor is already verified",
            ContractError::NotVerified => "Doctor is not verified",
            ContractError::DoctorNotVerified => "Access can only be granted to a verified doctor",
            ContractError::AlreadyGranted => "Access is already granted to this doctor",
            ContractError::NotGranted => "Access was not granted to this doctor",
            ContractError::EmptyHash => "Record content hash must not be empty",
            ContractError::AccessDenied => "Access denied to the requested records",
            ContractError::InvalidAmount => "Credit amount must be positive",
            ContractError::Paused => "Contract operations are currently paused",
            ContractError::HashTooLong => "Record content hash exceeds the maximum length",
            ContractError::BalanceOverflow => "Balance update would overflow",
            ContractError::AuditEntryNotFound => "Audit entry not found",
        }
    }
}
