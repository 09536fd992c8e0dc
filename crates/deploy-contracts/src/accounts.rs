use {
    crate::traits::AccountProvider,
    alloy::{primitives::Address, providers::Provider, signers::local::PrivateKeySigner},
    anyhow::{Context, Result},
    ethrpc::AlloyProvider,
};

/// Accounts whose private keys are held by this process.
#[derive(Debug, Clone)]
pub struct LocalAccounts {
    addresses: Vec<Address>,
}

impl LocalAccounts {
    pub fn new(signers: &[PrivateKeySigner]) -> Self {
        Self {
            addresses: signers.iter().map(|signer| signer.address()).collect(),
        }
    }
}

#[async_trait::async_trait]
impl AccountProvider for LocalAccounts {
    async fn signers(&self) -> Result<Vec<Address>> {
        Ok(self.addresses.clone())
    }
}

/// Accounts managed and unlocked by the node itself (`eth_accounts`), as on
/// local development nodes.
#[derive(Debug, Clone)]
pub struct NodeAccounts {
    provider: AlloyProvider,
}

impl NodeAccounts {
    pub fn new(provider: AlloyProvider) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl AccountProvider for NodeAccounts {
    async fn signers(&self) -> Result<Vec<Address>> {
        self.provider
            .get_accounts()
            .await
            .context("failed to fetch node accounts")
    }
}
