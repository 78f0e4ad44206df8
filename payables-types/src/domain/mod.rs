//! Domain models for the payables service.

pub mod amount;
pub mod card;
pub mod payable;
pub mod transaction;

pub use amount::Amount;
pub use card::Card;
pub use payable::{Payable, PayableId, PayableStatus, Settlement};
pub use transaction::{Method, PaymentMethod, Transaction, TransactionId};
