//! # Sub Subcommand
//!
//! Subscription billing administration against a YAML-backed local state
//! file. The same operations run against the on-chain router in
//! production; here they mutate the state file so operators can rehearse
//! transfers and funding before submitting them for real.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use ofs_billing::{admin, FunctionsRouter, InMemoryRouter, Juels, SubscriptionInfo};
use ofs_core::SubscriptionId;

/// Arguments for the `ofs sub` subcommand.
#[derive(Args, Debug)]
pub struct SubArgs {
    /// YAML file holding the local subscription state.
    #[arg(long, default_value = "subscriptions.yaml")]
    pub state: PathBuf,

    #[command(subcommand)]
    pub command: SubCommand,
}

/// Subscription operations.
#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Accept ownership of a subscription after a transfer was proposed.
    Accept {
        /// Subscription ID.
        #[arg(long)]
        subid: u64,
        /// Address accepting ownership.
        #[arg(long)]
        accepter: String,
    },

    /// Credit LINK to a subscription balance.
    Fund {
        /// Subscription ID.
        #[arg(long)]
        subid: u64,
        /// Amount in LINK, e.g. `1.5`.
        #[arg(long)]
        link: String,
    },

    /// Show a subscription's current state.
    Info {
        /// Subscription ID.
        #[arg(long)]
        subid: u64,
    },

    /// Release blocked balance held for timed-out requests.
    Timeout {
        /// Subscription ID.
        #[arg(long)]
        subid: u64,
    },
}

/// Execute the sub subcommand.
pub fn run_sub(args: &SubArgs) -> Result<u8> {
    let router = load_state(&args.state)?;

    let info = match &args.command {
        SubCommand::Accept { subid, accepter } => {
            admin::accept(&router, SubscriptionId(*subid), accepter)?
        }
        SubCommand::Fund { subid, link } => {
            let amount = Juels::from_link_str(link)
                .map_err(|e| anyhow::anyhow!("bad --link amount: {e}"))?;
            admin::fund(&router, SubscriptionId(*subid), amount)?
        }
        SubCommand::Info { subid } => admin::info(&router, SubscriptionId(*subid))?,
        SubCommand::Timeout { subid } => admin::timeout(&router, SubscriptionId(*subid))?,
    };

    if !matches!(args.command, SubCommand::Info { .. }) {
        save_state(&args.state, &router)?;
    }
    print_subscription(&info);
    Ok(0)
}

fn load_state(path: &Path) -> Result<InMemoryRouter> {
    if !path.is_file() {
        bail!("subscription state file not found: {}", path.display());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let subs: Vec<SubscriptionInfo> =
        serde_yaml::from_str(&text).context("bad subscription state file")?;
    Ok(InMemoryRouter::from_subscriptions(subs))
}

fn save_state(path: &Path, router: &InMemoryRouter) -> Result<()> {
    let rendered = serde_yaml::to_string(&router.snapshot())?;
    std::fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))
}

fn print_subscription(info: &SubscriptionInfo) {
    println!("Subscription {}:", info.id);
    println!("  owner: {}", info.owner);
    if let Some(proposed) = &info.proposed_owner {
        println!("  proposed owner: {proposed}");
    }
    println!("  balance: {}", info.balance.format_link());
    println!("  blocked balance: {}", info.blocked_balance.format_link());
    println!("  consumers: {}", info.consumers.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_state(path: &Path) {
        let mut sub = SubscriptionInfo::new(SubscriptionId(7), "0xOwner");
        sub.balance = Juels::from_link(10);
        sub.propose_transfer("0xSecondWallet");
        std::fs::write(path, serde_yaml::to_string(&vec![sub]).unwrap()).unwrap();
    }

    #[test]
    fn accept_updates_the_state_file() {
        let tmp = tempfile::tempdir().unwrap();
        let state = tmp.path().join("subscriptions.yaml");
        seed_state(&state);

        let args = SubArgs {
            state: state.clone(),
            command: SubCommand::Accept {
                subid: 7,
                accepter: "0xSecondWallet".to_string(),
            },
        };
        assert_eq!(run_sub(&args).unwrap(), 0);

        let router = load_state(&state).unwrap();
        let info = router.get_subscription(SubscriptionId(7)).unwrap();
        assert_eq!(info.owner, "0xSecondWallet");
        assert!(info.proposed_owner.is_none());
    }

    #[test]
    fn accept_as_stranger_fails_and_leaves_state_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let state = tmp.path().join("subscriptions.yaml");
        seed_state(&state);

        let args = SubArgs {
            state: state.clone(),
            command: SubCommand::Accept {
                subid: 7,
                accepter: "0xStranger".to_string(),
            },
        };
        assert!(run_sub(&args).is_err());

        let router = load_state(&state).unwrap();
        let info = router.get_subscription(SubscriptionId(7)).unwrap();
        assert_eq!(info.owner, "0xOwner");
    }

    #[test]
    fn fund_parses_link_amounts() {
        let tmp = tempfile::tempdir().unwrap();
        let state = tmp.path().join("subscriptions.yaml");
        seed_state(&state);

        let args = SubArgs {
            state: state.clone(),
            command: SubCommand::Fund {
                subid: 7,
                link: "1.5".to_string(),
            },
        };
        assert_eq!(run_sub(&args).unwrap(), 0);

        let router = load_state(&state).unwrap();
        let info = router.get_subscription(SubscriptionId(7)).unwrap();
        assert_eq!(info.balance.format_link(), "11.5 LINK");
    }

    #[test]
    fn missing_state_file_fails() {
        let args = SubArgs {
            state: PathBuf::from("/nonexistent/subscriptions.yaml"),
            command: SubCommand::Info { subid: 7 },
        };
        assert!(run_sub(&args).is_err());
    }
}
