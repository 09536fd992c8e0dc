use {
    alloy::{
        network::EthereumWallet,
        signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    },
    anyhow::{Context, Result},
};

/// Derives the first `count` accounts of the default Ethereum derivation path
/// (`m/44'/60'/0'/0/{index}`) from a BIP-39 phrase.
pub fn mnemonic_signers(phrase: &str, count: u32) -> Result<Vec<PrivateKeySigner>> {
    (0..count)
        .map(|index| {
            MnemonicBuilder::<English>::default()
                .phrase(phrase)
                .index(index)
                .and_then(|builder| builder.build())
                .with_context(|| format!("failed to derive mnemonic account {index}"))
        })
        .collect()
}

/// Builds a wallet holding all `signers`. The first one becomes the wallet's
/// default signer. Returns `None` when there is nothing to sign with.
pub fn local_wallet(signers: &[PrivateKeySigner]) -> Option<EthereumWallet> {
    let (first, rest) = signers.split_first()?;
    let mut wallet = EthereumWallet::new(first.clone());
    for signer in rest {
        wallet.register_signer(signer.clone());
    }
    Some(wallet)
}
