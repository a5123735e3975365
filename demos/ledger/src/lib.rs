//! ledger-demo - An account ledger built on doctag-generated event code
//!
//! [`events`] declares the event records and includes what the build script
//! generated for them; [`account`] implements the `Account` apply contract.
//!
//! ```
//! use doctag_runtime::RequestContext;
//! use ledger_demo::account::Account;
//! use ledger_demo::events::{AccountOpened, FundsDeposited};
//!
//! let ctx = RequestContext::new();
//! let history = vec![
//!     AccountOpened { account_uid: "acc-1".into(), owner: "Ada".into() }.wrap(&ctx).unwrap(),
//!     FundsDeposited { account_uid: "acc-1".into(), amount: 250, memo: None }.wrap(&ctx).unwrap(),
//! ];
//!
//! let account = Account::replay(&history).unwrap();
//! assert_eq!(account.balance, 250);
//! ```

pub mod account;
pub mod events;
