mod account;
mod balance;
mod ledger;
mod money;
mod operation;

pub use account::*;
pub use balance::*;
pub use ledger::*;
pub use money::*;
pub use operation::*;
