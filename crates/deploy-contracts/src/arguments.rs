use {
    alloy::signers::local::PrivateKeySigner,
    std::{path::PathBuf, time::Duration},
    tracing::level_filters::LevelFilter,
    url::Url,
};

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(long, env, default_value = "warn,deploy_contracts=info,ethrpc=info")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    /// Output log events as JSON.
    #[clap(long, env)]
    pub log_json: bool,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Refuse to deploy unless the node serves this chain.
    #[clap(long, env)]
    pub chain_id: Option<u64>,

    /// Contract to deploy, either its name or a fully qualified
    /// `path/to/Source.sol:Name` when the name alone is ambiguous.
    #[clap(long, env, default_value = "TimedCrowdfunding")]
    pub contract: String,

    /// Directory containing the Hardhat or Foundry build artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Constructor arguments, comma separated, in declaration order. Values
    /// are split on every comma, so array and tuple parameters can't be
    /// passed here.
    #[clap(long, env, value_delimiter = ',')]
    pub constructor_args: Vec<String>,

    /// Hex encoded private keys to sign with. The first one deploys. Without
    /// keys or a mnemonic the node's own accounts are used.
    #[clap(long, env, value_delimiter = ',', conflicts_with = "mnemonic")]
    pub private_keys: Vec<PrivateKeySigner>,

    /// BIP-39 mnemonic to derive the signing accounts from.
    #[clap(long, env)]
    pub mnemonic: Option<String>,

    /// How many accounts to derive from the mnemonic.
    #[clap(
        long,
        env,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    pub mnemonic_accounts: u32,

    /// Number of blocks the deployment has to be included in before it counts
    /// as confirmed.
    #[clap(
        long,
        env,
        default_value = "1",
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub confirmations: u64,

    /// Give up waiting for the confirmation after this long (e.g. `5m`).
    /// Waits forever if unset.
    #[clap(long, env, value_parser = humantime::parse_duration)]
    pub confirmation_timeout: Option<Duration>,
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            log_json,
            node_url,
            chain_id,
            contract,
            artifacts,
            constructor_args,
            private_keys,
            mnemonic,
            mnemonic_accounts,
            confirmations,
            confirmation_timeout,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "log_json: {log_json}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "chain_id: {chain_id:?}")?;
        writeln!(f, "contract: {contract}")?;
        writeln!(f, "artifacts: {artifacts:?}")?;
        writeln!(f, "constructor_args: {constructor_args:?}")?;
        let private_keys: Vec<_> = private_keys
            .iter()
            .map(|signer| signer.address())
            .collect();
        writeln!(f, "private_keys: SECRET for {private_keys:?}")?;
        writeln!(
            f,
            "mnemonic: {}",
            mnemonic.as_ref().map(|_| "SECRET").unwrap_or("None")
        )?;
        writeln!(f, "mnemonic_accounts: {mnemonic_accounts}")?;
        writeln!(f, "confirmations: {confirmations}")?;
        writeln!(f, "confirmation_timeout: {confirmation_timeout:?}")?;
        Ok(())
    }
}
