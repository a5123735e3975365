//! Ledger events
//!
//! Every record documented with `@Event` gets its wrapper unit generated by
//! the build script; the aggregate units add dispatch and the registry, and
//! the handler unit routes any envelope to an [`EventHandler`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Account aggregate
// ============================================================================

/// An account was opened
/// @Event(aggregate = "Account", uid = "account_uid")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountOpened {
    pub account_uid: String,
    pub owner: String,
}

/// Money was paid into an account
/// @Event(aggregate = "Account", uid = "account_uid")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundsDeposited {
    pub account_uid: String,
    /// Amount in cents
    pub amount: u64,
    pub memo: Option<String>,
}

/// Money was taken out of an account
/// @Event(aggregate = "Account", uid = "account_uid")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundsWithdrawn {
    pub account_uid: String,
    /// Amount in cents
    pub amount: u64,
}

/// An account was closed
/// @Event(aggregate = "Account", uid = "account_uid")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountClosed {
    pub account_uid: String,
    pub reason: Option<Box<ClosureReason>>,
}

/// Why an account was closed; not an event itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureReason {
    pub code: u32,
    pub note: String,
}

// ============================================================================
// Test aggregate
// ============================================================================

/// One field of every supported shape
/// @Event(aggregate = "Test")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MyStruct {
    pub string_field: String,
    pub int_field: i64,
    pub struct_field: Option<Box<MyStruct>>,
    pub slice_field: Vec<MyStruct>,
    pub pointer_slice_field: Vec<Option<MyStruct>>,
    pub map_field: BTreeMap<String, u64>,
}

// ============================================================================
// Generated
// ============================================================================

include!(concat!(env!("OUT_DIR"), "/gen_aggregates.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_account_aggregate.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_test_aggregate.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_account_opened_wrappers.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_funds_deposited_wrappers.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_funds_withdrawn_wrappers.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_account_closed_wrappers.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_my_struct_wrappers.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_handler.rs"));

include!(concat!(env!("OUT_DIR"), "/gen_account_opened_wrappers_tests.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_funds_deposited_wrappers_tests.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_funds_withdrawn_wrappers_tests.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_account_closed_wrappers_tests.rs"));
include!(concat!(env!("OUT_DIR"), "/gen_my_struct_wrappers_tests.rs"));
