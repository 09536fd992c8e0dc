//! Trait definitions for the external systems a deployment depends on.
//!
//! The deployer only talks to accounts, compiled artifacts and the node
//! through these traits so that it can be unit tested with mocks.

use {
    crate::factory::ContractFactory,
    alloy::primitives::{Address, Bytes, TxHash},
    anyhow::Result,
};

/// A contract creation transaction that has not been sent yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTransaction {
    /// Account sending (and paying for) the transaction.
    pub from: Address,
    /// Creation bytecode followed by the ABI encoded constructor arguments.
    pub code: Bytes,
}

/// A deployment transaction that the node accepted into its transaction pool
/// but that is not confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeployment {
    pub tx_hash: TxHash,
    pub deployer: Address,
    pub nonce: u64,
    /// Address the contract will have if the transaction gets included with
    /// the nonce it was sent with. Only the confirmed receipt is authoritative.
    pub expected_address: Address,
}

/// A contract whose creation transaction got confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Source of the identities that may sign the deployment.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AccountProvider: Send + Sync {
    /// Returns all available signer addresses in order of preference. The
    /// list may be empty.
    async fn signers(&self) -> Result<Vec<Address>>;
}

/// Resolves compiled contracts into factories able to deploy them.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContractFactoryProvider: Send + Sync {
    /// Returns a factory for `contract` whose deployments are sent by
    /// `signer`.
    async fn factory(&self, contract: &str, signer: Address) -> Result<ContractFactory>;
}

/// Abstracts sending transactions to the network and waiting for them.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TransactionSubmitting: Send + Sync {
    /// Sends the transaction and returns as soon as the node accepted it.
    async fn submit(&self, tx: DeploymentTransaction) -> Result<PendingDeployment>;

    /// Waits until the pending deployment is confirmed according to the
    /// provider's own finality policy.
    async fn confirm(&self, pending: &PendingDeployment) -> Result<DeployedContract>;
}
