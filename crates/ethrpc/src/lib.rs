pub mod errors;
mod instrumentation;
pub mod wallet;

use {
    alloy::{
        network::EthereumWallet,
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
    },
    instrumentation::LoggingLayer,
    url::Url,
};

pub type AlloyProvider = DynProvider;

/// Creates a provider talking to the node at `url`.
///
/// With a `wallet` transactions are signed locally by the wallet signer
/// matching the transaction's `from` address. Without one they are sent
/// unsigned through `eth_sendTransaction` and the node signs them with its own
/// accounts.
pub fn provider(url: &Url, name: impl ToString, wallet: Option<EthereumWallet>) -> AlloyProvider {
    let rpc = ClientBuilder::default()
        .layer(LoggingLayer {
            label: name.to_string(),
        })
        .http(url.clone());
    match wallet {
        Some(wallet) => ProviderBuilder::new()
            .wallet(wallet)
            .connect_client(rpc)
            .erased(),
        None => ProviderBuilder::new().connect_client(rpc).erased(),
    }
}
