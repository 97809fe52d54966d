//! rr-admin: Root Registry command-line administration
//!
//! Drives a [`rr_root_registry`] instance persisted as a snapshot file. Each
//! invocation is one registry call, mirroring how a host would submit calls
//! one at a time.
//!
//! ```text
//! rr-admin --state reg.json init --owner 0x..
//! rr-admin --state reg.json add-admin --caller 0x<owner> 0x<admin>
//! rr-admin --state reg.json set-chain --caller 0x<admin> 1 0x<root>
//! rr-admin --state reg.json sign --private-key 0x<key> 1 0x<root> 0
//! rr-admin --state reg.json submit-signed --signer 0x<addr> 1 0x<root> 0 0x<sig>
//! rr-admin --state reg.json chain-history 1 --max 5
//! ```

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
pub use commands::run;
