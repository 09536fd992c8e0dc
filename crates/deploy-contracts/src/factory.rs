use {
    crate::traits::{DeploymentTransaction, PendingDeployment, TransactionSubmitting},
    alloy::{
        dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
        json_abi::{JsonAbi, Param},
        primitives::{Address, Bytes},
    },
    anyhow::{Context, Result, ensure},
};

/// Compiled contract bound to the account that deploys it.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    contract: String,
    signer: Address,
    abi: JsonAbi,
    bytecode: Bytes,
}

impl ContractFactory {
    pub fn new(contract: impl Into<String>, signer: Address, abi: JsonAbi, bytecode: Bytes) -> Self {
        Self {
            contract: contract.into(),
            signer,
            abi,
            bytecode,
        }
    }

    /// Builds the creation transaction. `args` are the constructor arguments
    /// in their human readable form (`"42"`, `"0x…"`, `"[1,2]"`, ...) and get
    /// coerced into the types the constructor declares. Array and tuple
    /// values are a single argument each.
    pub fn deployment(&self, args: &[String]) -> Result<DeploymentTransaction> {
        let mut code = self.bytecode.to_vec();
        code.extend(self.encode_constructor_args(args)?);
        Ok(DeploymentTransaction {
            from: self.signer,
            code: code.into(),
        })
    }

    /// Sends the creation transaction through `node` without waiting for it
    /// to be confirmed.
    pub async fn deploy(
        &self,
        node: &dyn TransactionSubmitting,
        args: &[String],
    ) -> Result<PendingDeployment> {
        let tx = self.deployment(args)?;
        node.submit(tx).await
    }

    fn encode_constructor_args(&self, args: &[String]) -> Result<Vec<u8>> {
        let Some(constructor) = self.abi.constructor() else {
            ensure!(
                args.is_empty(),
                "contract {} has no constructor but {} arguments were given",
                self.contract,
                args.len(),
            );
            return Ok(Vec::new());
        };
        ensure!(
            constructor.inputs.len() == args.len(),
            "constructor of {} expects {} arguments but {} were given",
            self.contract,
            constructor.inputs.len(),
            args.len(),
        );

        let values = constructor
            .inputs
            .iter()
            .zip(args)
            .map(|(param, arg)| coerce(param, arg))
            .collect::<Result<Vec<_>>>()?;
        constructor
            .abi_encode_input(&values)
            .context("failed to encode constructor arguments")
    }
}

fn coerce(param: &Param, arg: &str) -> Result<DynSolValue> {
    let ty = param
        .resolve()
        .with_context(|| format!("unsupported constructor parameter type {}", param.ty))?;
    ty.coerce_str(arg)
        .with_context(|| format!("invalid value {arg:?} for constructor parameter {}", param.name))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::{U256, address, bytes},
        serde_json::json,
    };

    const CREATION_CODE: Bytes = bytes!("600a600c600039600a6000f3602a60005260206000f3");

    fn abi(value: serde_json::Value) -> JsonAbi {
        serde_json::from_value(value).unwrap()
    }

    fn crowdfunding_abi() -> JsonAbi {
        abi(json!([{
            "type": "constructor",
            "stateMutability": "nonpayable",
            "inputs": [
                { "name": "goal", "type": "uint256", "internalType": "uint256" },
                { "name": "beneficiary", "type": "address", "internalType": "address" },
            ],
        }]))
    }

    #[test]
    fn deployment_without_constructor_is_plain_bytecode() {
        let signer = address!("0x1111111111111111111111111111111111111111");
        let factory = ContractFactory::new("Answer", signer, JsonAbi::default(), CREATION_CODE);

        let tx = factory.deployment(&[]).unwrap();
        assert_eq!(tx.from, signer);
        assert_eq!(tx.code, CREATION_CODE);
    }

    #[test]
    fn appends_encoded_constructor_arguments() {
        let beneficiary = address!("0x2222222222222222222222222222222222222222");
        let factory = ContractFactory::new(
            "TimedCrowdfunding",
            Address::ZERO,
            crowdfunding_abi(),
            CREATION_CODE,
        );

        let tx = factory
            .deployment(&["42".to_string(), beneficiary.to_string()])
            .unwrap();

        let mut expected = CREATION_CODE.to_vec();
        expected.extend(U256::from(42).to_be_bytes::<32>());
        expected.extend([0u8; 12]);
        expected.extend(beneficiary.as_slice());
        assert_eq!(tx.code.to_vec(), expected);
    }

    #[test]
    fn rejects_wrong_number_of_arguments() {
        let factory = ContractFactory::new(
            "TimedCrowdfunding",
            Address::ZERO,
            crowdfunding_abi(),
            CREATION_CODE,
        );
        let err = factory.deployment(&["42".to_string()]).unwrap_err();
        assert!(err.to_string().contains("expects 2 arguments but 1 were given"));

        let factory = ContractFactory::new("Answer", Address::ZERO, JsonAbi::default(), CREATION_CODE);
        assert!(factory.deployment(&["1".to_string()]).is_err());
    }

    #[test]
    fn coerces_array_arguments() {
        let factory = ContractFactory::new(
            "Milestones",
            Address::ZERO,
            abi(json!([{
                "type": "constructor",
                "stateMutability": "nonpayable",
                "inputs": [{ "name": "deadlines", "type": "uint64[]", "internalType": "uint64[]" }],
            }])),
            CREATION_CODE,
        );

        let tx = factory.deployment(&["[1,2]".to_string()]).unwrap();

        let mut expected = CREATION_CODE.to_vec();
        expected.extend(U256::from(32).to_be_bytes::<32>());
        expected.extend(U256::from(2).to_be_bytes::<32>());
        expected.extend(U256::from(1).to_be_bytes::<32>());
        expected.extend(U256::from(2).to_be_bytes::<32>());
        assert_eq!(tx.code.to_vec(), expected);
    }

    #[test]
    fn rejects_unparsable_arguments() {
        let factory = ContractFactory::new(
            "TimedCrowdfunding",
            Address::ZERO,
            crowdfunding_abi(),
            CREATION_CODE,
        );
        let err = factory
            .deployment(&["42".to_string(), "not an address".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("beneficiary"));
    }
}
