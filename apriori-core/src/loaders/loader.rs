// Loader abstraction for transaction input
//
// This module defines the boundary between reading transaction data and mining
// it. A failed load aborts the run before any mining starts.

use crate::error::AprioriResult;
use crate::types::Transaction;
use std::path::Path;

/// Converts raw input into transactions.
pub trait TransactionLoader {
    /// Parse already-read text into transactions.
    fn parse(&self, content: &str) -> AprioriResult<Vec<Transaction>>;

    /// Read the file and parse it. Default implementation reads the whole file
    /// into memory first.
    fn load_file(&self, input: &Path) -> AprioriResult<Vec<Transaction>> {
        let content = std::fs::read_to_string(input)?;
        self.parse(&content)
    }

    /// Loader name for progress output
    fn name(&self) -> &str;
}
