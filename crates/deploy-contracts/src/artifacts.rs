//! Loads compiled contracts from the JSON artifacts written by Hardhat
//! (`artifacts/<source>/<Name>.json`) or Foundry (`out/<File>.sol/<Name>.json`).

use {
    crate::{factory::ContractFactory, traits::ContractFactoryProvider},
    alloy::{
        json_abi::JsonAbi,
        primitives::{Address, Bytes, hex},
    },
    anyhow::{Context, Result, bail, ensure},
    serde::Deserialize,
    std::path::{Path, PathBuf},
    tokio::fs,
};

/// Directory holding compiler inputs/outputs rather than contract artifacts.
const BUILD_INFO: &str = "build-info";

#[derive(Debug, Deserialize)]
struct Artifact {
    abi: JsonAbi,
    bytecode: Bytecode,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Bytecode {
    Hardhat(String),
    Foundry { object: String },
}

impl Bytecode {
    fn object(&self) -> &str {
        match self {
            Self::Hardhat(object) => object,
            Self::Foundry { object } => object,
        }
    }
}

/// Contract factory provider backed by a directory of build artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Finds the artifact file of a contract. `contract` is either a bare
    /// contract name, which must be unique among all artifacts, or a fully
    /// qualified name like `contracts/Token.sol:Token`.
    pub async fn locate(&self, contract: &str) -> Result<PathBuf> {
        match contract.rsplit_once(':') {
            Some((source, name)) => self.locate_qualified(source, name).await,
            None => self.locate_by_name(contract).await,
        }
    }

    async fn locate_qualified(&self, source: &str, name: &str) -> Result<PathBuf> {
        let file_name = format!("{name}.json");
        // Hardhat keeps the full source path, Foundry only the file name.
        let mut candidates = vec![self.root.join(source).join(&file_name)];
        if let Some(source_file) = Path::new(source).file_name() {
            candidates.push(self.root.join(source_file).join(&file_name));
        }
        for candidate in &candidates {
            if fs::try_exists(candidate).await.unwrap_or(false) {
                return Ok(candidate.clone());
            }
        }
        bail!("no artifact for {source}:{name}, looked at {candidates:?}")
    }

    async fn locate_by_name(&self, name: &str) -> Result<PathBuf> {
        let file_name = format!("{name}.json");
        let mut matches = Vec::new();
        let mut directories = vec![self.root.clone()];
        while let Some(directory) = directories.pop() {
            let mut entries = fs::read_dir(&directory)
                .await
                .with_context(|| format!("failed to read artifact directory {directory:?}"))?;
            while let Some(entry) = entries.next_entry().await? {
                let entry_name = entry.file_name();
                if entry.file_type().await?.is_dir() {
                    if entry_name.to_str() != Some(BUILD_INFO) {
                        directories.push(entry.path());
                    }
                } else if entry_name.to_str() == Some(file_name.as_str()) {
                    matches.push(entry.path());
                }
            }
        }

        matches.sort();
        match matches.as_slice() {
            [] => bail!("no artifact for contract {name} under {:?}", self.root),
            [path] => Ok(path.clone()),
            paths => bail!(
                "contract name {name} is ambiguous, use a fully qualified name instead; \
                 candidates: {paths:?}"
            ),
        }
    }
}

#[async_trait::async_trait]
impl ContractFactoryProvider for ArtifactStore {
    async fn factory(&self, contract: &str, signer: Address) -> Result<ContractFactory> {
        let path = self.locate(contract).await?;
        let artifact: Artifact = serde_json::from_slice(
            &fs::read(&path)
                .await
                .with_context(|| format!("failed to read artifact {path:?}"))?,
        )
        .with_context(|| format!("malformed artifact {path:?}"))?;
        tracing::debug!(?path, contract, "loaded contract artifact");

        let bytecode = creation_code(contract, artifact.bytecode.object())?;
        Ok(ContractFactory::new(contract, signer, artifact.abi, bytecode))
    }
}

fn creation_code(contract: &str, object: &str) -> Result<Bytes> {
    // Solidity leaves `__$<hash>$__` placeholders where library addresses
    // still have to be linked in.
    ensure!(
        !object.contains("__"),
        "contract {contract} references libraries that are not linked"
    );
    let code = hex::decode(object.trim())
        .with_context(|| format!("contract {contract} has malformed bytecode"))?;
    ensure!(
        !code.is_empty(),
        "contract {contract} has no bytecode, it is abstract or an interface"
    );
    Ok(code.into())
}
