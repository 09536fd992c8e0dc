pub mod accounts;
pub mod arguments;
pub mod artifacts;
pub mod deployer;
pub mod factory;
pub mod node;
pub mod traits;

use {
    accounts::{LocalAccounts, NodeAccounts},
    alloy::signers::local::PrivateKeySigner,
    anyhow::Result,
    arguments::Arguments,
    artifacts::ArtifactStore,
    deployer::Deployer,
    node::AlloyNode,
    std::{process::ExitCode, sync::Arc},
    traits::{AccountProvider, DeployedContract},
};

/// Wires the configured node, accounts and artifacts together and deploys the
/// contract once.
pub async fn run(args: Arguments) -> Result<DeployedContract> {
    let signers = local_signers(&args)?;
    let provider = ethrpc::provider(
        &args.node_url,
        "deploy",
        signers.as_deref().and_then(ethrpc::wallet::local_wallet),
    );

    let node = AlloyNode::new(
        provider.clone(),
        args.confirmations,
        args.confirmation_timeout,
    );
    if let Some(chain_id) = args.chain_id {
        node.ensure_chain_id(chain_id).await?;
    }

    let accounts: Arc<dyn AccountProvider> = match &signers {
        Some(signers) => Arc::new(LocalAccounts::new(signers)),
        None => {
            tracing::debug!("no keys or mnemonic configured, using node accounts");
            Arc::new(NodeAccounts::new(provider))
        }
    };
    let deployer = Deployer {
        accounts,
        factories: Arc::new(ArtifactStore::new(args.artifacts)),
        node: Arc::new(node),
        contract: args.contract,
        constructor_args: args.constructor_args,
    };
    Ok(deployer.run().await?)
}

/// Signers whose keys were configured. `None` when neither keys nor a
/// mnemonic were given and the node's own accounts have to sign.
fn local_signers(args: &Arguments) -> Result<Option<Vec<PrivateKeySigner>>> {
    match (&args.mnemonic, args.private_keys.as_slice()) {
        (Some(phrase), _) => Ok(Some(ethrpc::wallet::mnemonic_signers(
            phrase,
            args.mnemonic_accounts,
        )?)),
        (None, []) => Ok(None),
        (None, keys) => Ok(Some(keys.to_vec())),
    }
}

/// Exit code of a finished run.
pub fn exit_code<T>(result: &Result<T>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Exit code when argument parsing stopped the program. Printing help or the
/// version is a success, anything else is invalid configuration.
pub fn parse_exit_code(err: &clap::Error) -> ExitCode {
    match err.kind() {
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
            ExitCode::SUCCESS
        }
        _ => ExitCode::FAILURE,
    }
}
