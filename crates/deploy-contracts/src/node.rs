use {
    crate::traits::{
        DeployedContract,
        DeploymentTransaction,
        PendingDeployment,
        TransactionSubmitting,
    },
    alloy::{
        network::TransactionBuilder,
        providers::{PendingTransactionBuilder, PendingTransactionError, Provider, WatchTxError},
        rpc::types::TransactionRequest,
        transports::TransportError,
    },
    anyhow::{Context, Result, anyhow, ensure},
    ethrpc::{AlloyProvider, errors::TransportErrorExt},
    std::time::Duration,
};

/// Submits deployments to an Ethereum node and waits for their receipts.
#[derive(Debug, Clone)]
pub struct AlloyNode {
    provider: AlloyProvider,
    confirmations: u64,
    timeout: Option<Duration>,
}

impl AlloyNode {
    /// `confirmations` is the number of blocks (including the one the
    /// transaction got mined in) to wait for. Without a `timeout` waiting for
    /// the receipt never gives up.
    pub fn new(provider: AlloyProvider, confirmations: u64, timeout: Option<Duration>) -> Self {
        Self {
            provider,
            confirmations,
            timeout,
        }
    }

    /// Fails if the node serves a different network than `expected`.
    pub async fn ensure_chain_id(&self, expected: u64) -> Result<()> {
        let actual = self
            .provider
            .get_chain_id()
            .await
            .context("failed to fetch chain id")?;
        ensure!(
            actual == expected,
            "node is connected to chain {actual} but chain {expected} was expected"
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl TransactionSubmitting for AlloyNode {
    async fn submit(&self, tx: DeploymentTransaction) -> Result<PendingDeployment> {
        // The nonce is pinned up front so the contract address is known
        // before the transaction gets mined.
        let nonce = self
            .provider
            .get_transaction_count(tx.from)
            .pending()
            .await
            .context("failed to fetch deployer nonce")?;
        let deployer = tx.from;
        let pending = self
            .provider
            .send_transaction(deployment_request(tx, nonce))
            .await
            .map_err(submission_error)?;

        Ok(PendingDeployment {
            tx_hash: *pending.tx_hash(),
            deployer,
            nonce,
            expected_address: deployer.create(nonce),
        })
    }

    async fn confirm(&self, pending: &PendingDeployment) -> Result<DeployedContract> {
        let receipt =
            PendingTransactionBuilder::new(self.provider.root().clone(), pending.tx_hash)
                .with_required_confirmations(self.confirmations)
                .with_timeout(self.timeout)
                .get_receipt()
                .await
                .map_err(|err| confirmation_error(err, pending))?;

        ensure!(
            receipt.status(),
            "deployment transaction {:?} reverted",
            pending.tx_hash
        );
        let address = receipt.contract_address.with_context(|| {
            format!(
                "receipt of transaction {:?} has no contract address",
                pending.tx_hash
            )
        })?;
        if address != pending.expected_address {
            tracing::warn!(
                expected = %pending.expected_address,
                actual = %address,
                "contract address differs from the one derived from the sender nonce"
            );
        }

        Ok(DeployedContract {
            address,
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        })
    }
}

fn deployment_request(tx: DeploymentTransaction, nonce: u64) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(tx.from)
        .with_nonce(nonce)
        .with_deploy_code(tx.code)
}

fn submission_error(err: TransportError) -> anyhow::Error {
    match err.rejection_message() {
        Some(message) => anyhow!("node rejected deployment transaction: {message}"),
        None => anyhow::Error::new(err).context("failed to send deployment transaction"),
    }
}

fn confirmation_error(err: PendingTransactionError, pending: &PendingDeployment) -> anyhow::Error {
    match err {
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => anyhow!(
            "timed out waiting for deployment transaction {:?} to be confirmed",
            pending.tx_hash
        ),
        err => anyhow::Error::new(err).context(format!(
            "failed to wait for deployment transaction {:?}",
            pending.tx_hash
        )),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{
            primitives::{Address, TxKind, address, b256, bytes},
            providers::{ProviderBuilder, mock::Asserter},
            rpc::json_rpc::ErrorPayload,
            transports::TransportErrorKind,
        },
    };

    const DEPLOYER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn pending() -> PendingDeployment {
        PendingDeployment {
            tx_hash: b256!("0x1111111111111111111111111111111111111111111111111111111111111111"),
            deployer: DEPLOYER,
            nonce: 0,
            expected_address: DEPLOYER.create(0),
        }
    }

    #[test]
    fn request_creates_contract_with_pinned_nonce() {
        let code = bytes!("600a600c600039600a6000f3602a60005260206000f3");
        let request = deployment_request(
            DeploymentTransaction {
                from: DEPLOYER,
                code: code.clone(),
            },
            7,
        );

        assert_eq!(request.from, Some(DEPLOYER));
        assert_eq!(request.nonce, Some(7));
        assert_eq!(request.to, Some(TxKind::Create));
        assert_eq!(request.input.input(), Some(&code));
    }

    #[test]
    fn expected_address_follows_sender_nonce() {
        // First contract deployed by the first account of the well known
        // development mnemonic.
        assert_eq!(
            DEPLOYER.create(0),
            address!("0x5FbDB2315678afecb367f032d93F642f64180aa3")
        );
    }

    #[test]
    fn submission_errors_keep_node_rejection_reason() {
        let err = submission_error(TransportError::ErrorResp(ErrorPayload {
            code: -32000,
            message: "insufficient funds for gas * price + value".into(),
            data: None,
        }));
        assert_eq!(
            err.to_string(),
            "node rejected deployment transaction: insufficient funds for gas * price + value"
        );

        let err = submission_error(TransportErrorKind::custom_str("connection refused"));
        assert_eq!(err.to_string(), "failed to send deployment transaction");
        assert!(format!("{err:?}").contains("connection refused"));
    }

    #[test]
    fn confirmation_timeout_names_the_transaction() {
        let pending = pending();
        let err = confirmation_error(
            PendingTransactionError::TxWatcher(WatchTxError::Timeout),
            &pending,
        );
        assert!(err.to_string().starts_with("timed out waiting"));
        assert!(err.to_string().contains(&format!("{:?}", pending.tx_hash)));

        let err = confirmation_error(PendingTransactionError::FailedToRegister, &pending);
        assert!(err.to_string().starts_with("failed to wait"));
    }

    #[tokio::test]
    async fn chain_id_mismatch_is_an_error() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .connect_mocked_client(asserter.clone())
            .erased();
        let node = AlloyNode::new(provider, 1, None);

        asserter.push_success(&"0x7a69");
        node.ensure_chain_id(31337).await.unwrap();

        asserter.push_success(&"0x1");
        let err = node.ensure_chain_id(31337).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "node is connected to chain 1 but chain 31337 was expected"
        );
    }
}
