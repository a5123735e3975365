//! Account state rebuilt from its events

use crate::events::{
    AccountAggregate, AccountClosed, AccountOpened, FundsDeposited, FundsWithdrawn,
    apply_account_events,
};
use doctag_runtime::{Envelope, EventError};

/// Current state of one account
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    pub uid: String,
    pub owner: String,
    /// Balance in cents; may go negative
    pub balance: i64,
    pub closed: bool,
    /// Number of events applied so far
    pub version: u64,
}

impl Account {
    /// Rebuild an account from its full history
    pub fn replay(envelopes: &[Envelope]) -> Result<Self, EventError> {
        let mut account = Self::default();
        apply_account_events(envelopes, &mut account)?;
        Ok(account)
    }
}

impl AccountAggregate for Account {
    fn apply_account_opened(&mut self, event: AccountOpened) {
        self.uid = event.account_uid;
        self.owner = event.owner;
        self.version += 1;
    }

    fn apply_funds_deposited(&mut self, event: FundsDeposited) {
        self.balance += event.amount as i64;
        self.version += 1;
    }

    fn apply_funds_withdrawn(&mut self, event: FundsWithdrawn) {
        self.balance -= event.amount as i64;
        self.version += 1;
    }

    fn apply_account_closed(&mut self, event: AccountClosed) {
        if let Some(reason) = &event.reason {
            tracing::debug!("Closing {} (code {})", self.uid, reason.code);
        }
        self.closed = true;
        self.version += 1;
    }
}
