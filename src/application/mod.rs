// Application layer - the ledger's use cases.
// Clients (the CLI, tests, embedders) go through `LedgerService`;
// storage is reached only via the store traits.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
