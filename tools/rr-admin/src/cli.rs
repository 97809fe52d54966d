//! Command-line definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rr-admin: administer a root registry snapshot
#[derive(Parser, Debug)]
#[command(name = "rr-admin", version)]
#[command(about = "Apply registry calls to a snapshot file and query it")]
pub struct Cli {
    /// Snapshot file; `.bin` selects bincode, anything else JSON
    #[arg(short, long, global = true, default_value = "registry.json")]
    pub state: PathBuf,

    /// Registry config (JSON), read by `init` and by offline commands without a snapshot
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Append Prometheus metrics recorded by this invocation
    #[arg(long, global = true)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands. Mutating commands print emitted events as JSON lines.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new snapshot owned by OWNER.
    Init {
        /// Owner address
        #[arg(long)]
        owner: String,
    },

    /// Replace the global root.
    SetGlobal {
        /// Calling principal
        #[arg(long)]
        caller: String,
        /// New root (32-byte hex)
        root: String,
    },

    /// Replace the root of one key.
    SetChain {
        /// Calling principal
        #[arg(long)]
        caller: String,
        /// Key
        key: u64,
        /// New root (32-byte hex)
        root: String,
    },

    /// Replace several keys atomically.
    BatchSetChain {
        /// Calling principal
        #[arg(long)]
        caller: String,
        /// Comma-separated keys
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        keys: Vec<u64>,
        /// Comma-separated roots
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        roots: Vec<String>,
    },

    /// Print the digest a signer must sign.
    Digest {
        /// Key
        key: u64,
        /// New root
        root: String,
        /// Signer nonce
        nonce: u64,
    },

    /// Sign an update off-line and print the 65-byte signature.
    Sign {
        /// secp256k1 private key (32-byte hex)
        #[arg(long)]
        private_key: String,
        /// Key
        key: u64,
        /// New root
        root: String,
        /// Signer nonce
        nonce: u64,
    },

    /// Print the address controlled by a private key.
    Address {
        /// secp256k1 private key (32-byte hex)
        #[arg(long)]
        private_key: String,
    },

    /// Relay a signed update.
    SubmitSigned {
        /// Claimed signer address
        #[arg(long)]
        signer: String,
        /// Key
        key: u64,
        /// New root
        root: String,
        /// Signer nonce
        nonce: u64,
        /// Signature r || s || v (65-byte hex)
        signature: String,
    },

    /// Grant the admin role.
    AddAdmin {
        /// Calling principal (owner)
        #[arg(long)]
        caller: String,
        /// Account to grant
        account: String,
    },

    /// Revoke the admin role.
    RemoveAdmin {
        /// Calling principal (owner)
        #[arg(long)]
        caller: String,
        /// Account to revoke
        account: String,
    },

    /// Authorize a signer.
    AddSigner {
        /// Calling principal (owner)
        #[arg(long)]
        caller: String,
        /// Account to authorize
        account: String,
    },

    /// Revoke a signer.
    RemoveSigner {
        /// Calling principal (owner)
        #[arg(long)]
        caller: String,
        /// Account to revoke
        account: String,
    },

    /// Hand ownership to another account.
    TransferOwner {
        /// Calling principal (owner)
        #[arg(long)]
        caller: String,
        /// New owner
        new_owner: String,
    },

    /// Give up ownership permanently.
    RenounceOwner {
        /// Calling principal (owner)
        #[arg(long)]
        caller: String,
    },

    /// Pause all mutating calls.
    Pause {
        /// Calling principal (owner)
        #[arg(long)]
        caller: String,
    },

    /// Lift the pause.
    Unpause {
        /// Calling principal (owner)
        #[arg(long)]
        caller: String,
    },

    /// Change the display name.
    SetName {
        /// Calling principal (owner)
        #[arg(long)]
        caller: String,
        /// New display name
        name: String,
    },

    /// Print a summary of the registry.
    Show,

    /// Print recent global roots, newest first.
    GlobalHistory {
        /// Entries to print (defaults to the capacity)
        #[arg(long)]
        max: Option<usize>,
    },

    /// Print recent roots of one key, newest first.
    ChainHistory {
        /// Key
        key: u64,
        /// Entries to print (defaults to the capacity)
        #[arg(long)]
        max: Option<usize>,
    },

    /// Print the next nonce of a signer.
    Nonce {
        /// Signer address
        signer: String,
    },
}
