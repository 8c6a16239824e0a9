pub mod account;
pub mod authority;
pub mod command;
pub mod error;
pub mod money;
pub mod traits;

pub use account::{Account, AccountClass, AccountId};
pub use authority::{BalanceAuthority, Withdrawal};
pub use command::{Command, CommandKind};
pub use error::{Error, Rejection};
pub use money::Amount;
pub use traits::{AccountStore, CommandStream, DeadLetterQueue};
