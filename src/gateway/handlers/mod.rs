//! Gateway HTTP handlers

pub mod account;
pub mod auth;
pub mod transfer;

pub use account::{
    AccountResponse, CreateAccountRequest, SearchAccountsRequest, UpdateAccountRequest,
};
pub use auth::RegisterResponse;
pub use transfer::{
    BalanceResponse, HistoryEntryResponse, TransferApiRequest, TransferApiResponse,
};
