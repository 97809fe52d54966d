//! Command execution against a snapshot file.
//!
//! Every invocation loads the snapshot, applies at most one registry call and
//! writes the snapshot back only if that call succeeded.

use std::path::Path;

use anyhow::{bail, Context, Result};
use rr_root_registry::prelude::*;
use rr_signature_verification::{
    address_from_pubkey, sign_prehash, signing_digest, signing_key_from_bytes,
};
use serde_json::json;
use shared_types::{parse_address, parse_bytes, parse_root, to_hex, Address, Root};
use tracing::info;

use crate::cli::{Cli, Command};

/// Registry as driven from the command line.
pub type AdminRegistry = RootRegistryService<EcdsaVerifier, SystemTimeSource, InMemoryEventSink>;

/// Run one command and return the lines to print.
pub fn run(cli: &Cli) -> Result<Vec<String>> {
    let mut lines = dispatch(cli)?;
    if cli.print_metrics {
        lines.push(registry_telemetry::gather_text()?);
    }
    Ok(lines)
}

fn dispatch(cli: &Cli) -> Result<Vec<String>> {
    match &cli.command {
        Command::Init { owner } => init(cli, address(owner)?),

        Command::SetGlobal { caller, root: r } => {
            let (caller, new_root) = (address(caller)?, root(r)?);
            mutate(cli, |reg| reg.set_global_root(caller, new_root).map(|_| ()))
        }
        Command::SetChain { caller, key, root: r } => {
            let (caller, new_root) = (address(caller)?, root(r)?);
            mutate(cli, |reg| reg.set_chain_root(caller, *key, new_root))
        }
        Command::BatchSetChain {
            caller,
            keys,
            roots,
        } => {
            let caller = address(caller)?;
            let roots = roots.iter().map(|r| root(r)).collect::<Result<Vec<_>>>()?;
            mutate(cli, |reg| {
                reg.batch_set_chain_roots(caller, keys, &roots).map(|_| ())
            })
        }

        Command::Digest { key, root: r, nonce } => {
            let domain = offline_config(cli)?.domain_tag();
            let digest = signing_digest(&domain, *key, &root(r)?, *nonce);
            Ok(vec![to_hex(&digest)])
        }
        Command::Sign {
            private_key,
            key,
            root: r,
            nonce,
        } => {
            let signing_key = signing_key_from_bytes(&parse_bytes(private_key)?)?;
            let domain = offline_config(cli)?.domain_tag();
            let digest = signing_digest(&domain, *key, &root(r)?, *nonce);
            let signature = sign_prehash(&digest, &signing_key)?;
            Ok(vec![to_hex(&signature.to_bytes())])
        }
        Command::Address { private_key } => {
            let signing_key = signing_key_from_bytes(&parse_bytes(private_key)?)?;
            Ok(vec![to_hex(&address_from_pubkey(signing_key.verifying_key()))])
        }
        Command::SubmitSigned {
            signer,
            key,
            root: r,
            nonce,
            signature,
        } => {
            let update = SignedRootUpdate {
                signer: address(signer)?,
                key: *key,
                new_root: root(r)?,
                nonce: *nonce,
                signature: EcdsaSignature::from_bytes(&parse_bytes(signature)?)?,
            };
            mutate(cli, |reg| reg.set_chain_root_signed(&update).map(|_| ()))
        }

        Command::AddAdmin { caller, account } => {
            let (caller, account) = (address(caller)?, address(account)?);
            mutate(cli, |reg| reg.add_admin(caller, account))
        }
        Command::RemoveAdmin { caller, account } => {
            let (caller, account) = (address(caller)?, address(account)?);
            mutate(cli, |reg| reg.remove_admin(caller, account))
        }
        Command::AddSigner { caller, account } => {
            let (caller, account) = (address(caller)?, address(account)?);
            mutate(cli, |reg| reg.add_authorized_signer(caller, account))
        }
        Command::RemoveSigner { caller, account } => {
            let (caller, account) = (address(caller)?, address(account)?);
            mutate(cli, |reg| reg.remove_authorized_signer(caller, account))
        }
        Command::TransferOwner { caller, new_owner } => {
            let (caller, new_owner) = (address(caller)?, address(new_owner)?);
            mutate(cli, |reg| reg.transfer_ownership(caller, new_owner))
        }
        Command::RenounceOwner { caller } => {
            let caller = address(caller)?;
            mutate(cli, |reg| reg.renounce_ownership(caller))
        }
        Command::Pause { caller } => {
            let caller = address(caller)?;
            mutate(cli, |reg| reg.pause(caller))
        }
        Command::Unpause { caller } => {
            let caller = address(caller)?;
            mutate(cli, |reg| reg.unpause(caller))
        }
        Command::SetName { caller, name } => {
            let caller = address(caller)?;
            mutate(cli, |reg| reg.set_name(caller, name))
        }

        Command::Show => show(&open(&cli.state)?),
        Command::GlobalHistory { max } => {
            let registry = open(&cli.state)?;
            let max = max.unwrap_or_else(|| registry.global_history_limit());
            history_lines(&registry.global_history(max)?)
        }
        Command::ChainHistory { key, max } => {
            let registry = open(&cli.state)?;
            let max = max.unwrap_or_else(|| registry.chain_history_limit());
            history_lines(&registry.chain_history(*key, max)?)
        }
        Command::Nonce { signer } => {
            let registry = open(&cli.state)?;
            Ok(vec![registry.nonce_of(&address(signer)?).to_string()])
        }
    }
}

// =============================================================================
// SNAPSHOT HANDLING
// =============================================================================

fn init(cli: &Cli, owner: Address) -> Result<Vec<String>> {
    if cli.state.exists() {
        bail!("{} already exists", cli.state.display());
    }
    let config = match &cli.config {
        Some(path) => RegistryConfig::from_json_file(path)?,
        None => RegistryConfig::default(),
    };

    let registry = RootRegistryService::new(
        config,
        owner,
        EcdsaVerifier::new(),
        SystemTimeSource,
        InMemoryEventSink::new(),
    )?;
    save(&cli.state, &registry)?;
    event_lines(&registry)
}

fn mutate<F>(cli: &Cli, call: F) -> Result<Vec<String>>
where
    F: FnOnce(&mut AdminRegistry) -> RegistryResult<()>,
{
    let mut registry = open(&cli.state)?;
    call(&mut registry).context("registry rejected the call")?;
    save(&cli.state, &registry)?;
    event_lines(&registry)
}

fn open(path: &Path) -> Result<AdminRegistry> {
    let snapshot = load_snapshot(path, SnapshotFormat::from_path(path))
        .with_context(|| format!("loading {}", path.display()))?;
    let registry = RootRegistryService::from_snapshot(
        snapshot,
        EcdsaVerifier::new(),
        SystemTimeSource,
        InMemoryEventSink::new(),
    )?;
    Ok(registry)
}

fn save(path: &Path, registry: &AdminRegistry) -> Result<()> {
    save_snapshot(path, &registry.snapshot(), SnapshotFormat::from_path(path))
        .with_context(|| format!("saving {}", path.display()))?;
    info!(path = %path.display(), "snapshot written");
    Ok(())
}

/// Config for commands that work without a registry: the snapshot's if one
/// exists, else `--config`. Without a snapshot the config must name the
/// registry address, since a deployment pins its own.
fn offline_config(cli: &Cli) -> Result<RegistryConfig> {
    if cli.state.exists() {
        return Ok(open(&cli.state)?.config().clone());
    }
    let config = match &cli.config {
        Some(path) => RegistryConfig::from_json_file(path)?,
        None => bail!("{} does not exist and no --config given", cli.state.display()),
    };
    if config.registry_address.is_none() {
        bail!("config has no registry_address; pass the deployed snapshot instead");
    }
    Ok(config)
}

// =============================================================================
// OUTPUT
// =============================================================================

fn event_lines(registry: &AdminRegistry) -> Result<Vec<String>> {
    registry
        .events()
        .events()
        .iter()
        .map(|event| serde_json::to_string(event).context("encoding event"))
        .collect()
}

fn history_lines(entries: &[HistoryEntry<Root>]) -> Result<Vec<String>> {
    entries
        .iter()
        .map(|entry| {
            let line = json!({
                "root": to_hex(&entry.value),
                "recorded_at": entry.recorded_at,
            });
            Ok(line.to_string())
        })
        .collect()
}

fn show(registry: &AdminRegistry) -> Result<Vec<String>> {
    let state = registry.state();
    let chains: Vec<_> = state
        .roots
        .known_keys()
        .into_iter()
        .map(|key| {
            json!({
                "key": key,
                "root": to_hex(&registry.chain_root(key)),
                "updated_at": registry.chain_update_time(key),
            })
        })
        .collect();

    let summary = json!({
        "name": registry.name(),
        "owner": registry.owner().map(|o| to_hex(&o)),
        "paused": registry.is_paused(),
        "registry": to_hex(&registry.domain().registry),
        "network_id": registry.domain().network_id,
        "domain_separator": to_hex(&registry.domain_separator()),
        "global": {
            "root": to_hex(&registry.global_root()),
            "version": registry.global_version(),
            "history_limit": registry.global_history_limit(),
        },
        "chains": chains,
        "chain_history_limit": registry.chain_history_limit(),
        "admins": registry.admins().iter().map(|a| to_hex(a)).collect::<Vec<_>>(),
        "signers": registry.authorized_signers().iter().map(|a| to_hex(a)).collect::<Vec<_>>(),
    });
    Ok(vec![serde_json::to_string_pretty(&summary)?])
}

fn address(text: &str) -> Result<Address> {
    parse_address(text).with_context(|| format!("invalid address '{text}'"))
}

fn root(text: &str) -> Result<Root> {
    parse_root(text).with_context(|| format!("invalid root '{text}'"))
}
