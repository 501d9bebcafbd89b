mod client;
#[cfg(test)]
mod tests;

use std::future::Future;

use rust_decimal::Decimal;

use crate::models::{ApiResponse, Transaction};

pub use client::ApiClient;

/// The backend surface the rest of the application talks to.
///
/// Every operation resolves to an envelope, never an `Err`: transport
/// failures are normalized into `RUNTIME_ERROR` envelopes by the
/// implementation.
pub trait TransactionApi: Send + Sync + 'static {
    fn fetch_balance(&self) -> impl Future<Output = ApiResponse<Decimal>> + Send;
    fn fetch_failed_transactions(&self) -> impl Future<Output = ApiResponse<Vec<Transaction>>> + Send;
    fn upload_csv(&self, file_name: String, contents: Vec<u8>) -> impl Future<Output = ApiResponse<()>> + Send;
}
