use {
    crate::traits::{
        AccountProvider,
        ContractFactoryProvider,
        DeployedContract,
        TransactionSubmitting,
    },
    std::{fmt, sync::Arc},
    thiserror::Error,
};

/// Progress of a single deployment run. Stages are only ever entered in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    IdentityResolved,
    FactoryReady,
    Submitted,
    Confirmed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::IdentityResolved => "identity resolved",
            Self::FactoryReady => "factory ready",
            Self::Submitted => "submitted",
            Self::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("failed to resolve a signer identity")]
    IdentityResolution(#[source] anyhow::Error),
    #[error("failed to build contract factory for {contract}")]
    ArtifactResolution {
        contract: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to submit deployment transaction")]
    Submission(#[source] anyhow::Error),
    #[error("deployment transaction was not confirmed")]
    Confirmation(#[source] anyhow::Error),
}

impl DeployError {
    /// The last stage the run completed before failing.
    pub fn stage(&self) -> Stage {
        match self {
            Self::IdentityResolution(_) => Stage::Start,
            Self::ArtifactResolution { .. } => Stage::IdentityResolved,
            Self::Submission(_) => Stage::FactoryReady,
            Self::Confirmation(_) => Stage::Submitted,
        }
    }
}

/// Deploys one contract: resolve the signer, build the factory, submit the
/// creation transaction and wait for it to be confirmed. Every step only
/// runs after the previous one succeeded and the first failure ends the run.
///
/// Running twice deploys twice; nothing is remembered between runs.
pub struct Deployer {
    pub accounts: Arc<dyn AccountProvider>,
    pub factories: Arc<dyn ContractFactoryProvider>,
    pub node: Arc<dyn TransactionSubmitting>,
    pub contract: String,
    pub constructor_args: Vec<String>,
}

impl Deployer {
    pub async fn run(&self) -> Result<DeployedContract, DeployError> {
        let signers = self
            .accounts
            .signers()
            .await
            .map_err(DeployError::IdentityResolution)?;
        let signer = *signers.first().ok_or_else(|| {
            DeployError::IdentityResolution(anyhow::anyhow!("no signer accounts available"))
        })?;
        tracing::info!(%signer, "deploying contract with account");

        let factory = self
            .factories
            .factory(&self.contract, signer)
            .await
            .map_err(|source| DeployError::ArtifactResolution {
                contract: self.contract.clone(),
                source,
            })?;

        let pending = factory
            .deploy(self.node.as_ref(), &self.constructor_args)
            .await
            .map_err(DeployError::Submission)?;
        tracing::debug!(
            tx_hash = ?pending.tx_hash,
            nonce = pending.nonce,
            expected_address = %pending.expected_address,
            "deployment transaction submitted"
        );

        let deployed = self
            .node
            .confirm(&pending)
            .await
            .map_err(DeployError::Confirmation)?;
        tracing::info!(
            contract = %self.contract,
            address = %deployed.address,
            tx_hash = ?deployed.tx_hash,
            "contract deployed"
        );
        Ok(deployed)
    }
}
