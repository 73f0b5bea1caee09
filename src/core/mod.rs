pub mod balance_ledger;
pub mod request_lifecycle;
pub mod services;

pub use balance_ledger::BalanceLedger;
pub use request_lifecycle::RequestLifecycle;
