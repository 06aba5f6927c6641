//! Registry access over Ethereum JSON-RPC contract calls.
//!
//! Maps the store traits onto the deployed contracts: the signer set lives
//! in `OracleStore`, scalar settings in `DataStore`, role membership in
//! `RoleStore`. The contracts enumerate with `(start, end)` index pairs;
//! the trait surface uses `(offset, limit)`, converted here.

use super::{DataStore, RegistryError, Result, RoleStore, SignerStore};
use crate::address::Address;
use crate::config::RegistryConfig;
use crate::keys::Bytes32;
use crate::roles::RoleKey;
use crate::rpc::abi::{self, CallBuilder};
use crate::rpc::JsonRpcClient;

/// Registry client backed by a JSON-RPC node and three contract addresses.
pub struct EthRegistry {
    rpc: JsonRpcClient,
    from: Address,
    oracle_store: Address,
    data_store: Address,
    role_store: Address,
}

impl EthRegistry {
    pub fn new(
        rpc: JsonRpcClient,
        from: Address,
        oracle_store: Address,
        data_store: Address,
        role_store: Address,
    ) -> Self {
        Self {
            rpc,
            from,
            oracle_store,
            data_store,
            role_store,
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(
            JsonRpcClient::new(config.rpc_url.clone()),
            config.from.clone(),
            config.oracle_store.clone(),
            config.data_store.clone(),
            config.role_store.clone(),
        )
    }

    fn read(&self, to: &Address, what: &str, data: Vec<u8>) -> Result<Vec<u8>> {
        self.rpc
            .eth_call(to, &data)
            .map_err(|e| RegistryError::read(what, e))
    }

    fn submit(&self, to: &Address, what: &str, data: Vec<u8>) -> Result<()> {
        self.rpc
            .send_transaction(&self.from, to, &data)
            .map(|_| ())
            .map_err(|e| RegistryError::write(what, e))
    }
}

impl SignerStore for EthRegistry {
    fn signer_count(&self) -> Result<u64> {
        let what = "signer count";
        let data = self.read(
            &self.oracle_store,
            what,
            CallBuilder::new("getSignerCount()").build(),
        )?;
        abi::decode_uint(&data).map_err(|e| RegistryError::read(what, e))
    }

    fn signers(&self, offset: u64, limit: u64) -> Result<Vec<Address>> {
        let what = format!("signers {offset}..{}", offset + limit);
        let data = self.read(
            &self.oracle_store,
            &what,
            CallBuilder::new("getSigners(uint256,uint256)")
                .uint(offset)
                .uint(offset + limit)
                .build(),
        )?;
        abi::decode_address_array(&data).map_err(|e| RegistryError::read(&what, e))
    }

    fn add_signer(&self, account: &Address) -> Result<()> {
        self.submit(
            &self.oracle_store,
            &format!("add signer {account}"),
            CallBuilder::new("addSigner(address)").address(account).build(),
        )
    }

    fn remove_signer(&self, account: &Address) -> Result<()> {
        self.submit(
            &self.oracle_store,
            &format!("remove signer {account}"),
            CallBuilder::new("removeSigner(address)")
                .address(account)
                .build(),
        )
    }
}

impl DataStore for EthRegistry {
    fn get_uint(&self, key: Bytes32) -> Result<u64> {
        let what = format!("uint 0x{}", hex::encode(key));
        let data = self.read(
            &self.data_store,
            &what,
            CallBuilder::new("getUint(bytes32)").bytes32(key).build(),
        )?;
        abi::decode_uint(&data).map_err(|e| RegistryError::read(&what, e))
    }

    fn set_uint(&self, key: Bytes32, value: u64) -> Result<()> {
        self.submit(
            &self.data_store,
            &format!("set uint 0x{} = {value}", hex::encode(key)),
            CallBuilder::new("setUint(bytes32,uint256)")
                .bytes32(key)
                .uint(value)
                .build(),
        )
    }
}

impl RoleStore for EthRegistry {
    fn role_count(&self) -> Result<u64> {
        let what = "role count";
        let data = self.read(
            &self.role_store,
            what,
            CallBuilder::new("getRoleCount()").build(),
        )?;
        abi::decode_uint(&data).map_err(|e| RegistryError::read(what, e))
    }

    fn roles(&self, offset: u64, limit: u64) -> Result<Vec<RoleKey>> {
        let what = format!("roles {offset}..{}", offset + limit);
        let data = self.read(
            &self.role_store,
            &what,
            CallBuilder::new("getRoles(uint256,uint256)")
                .uint(offset)
                .uint(offset + limit)
                .build(),
        )?;
        let keys = abi::decode_bytes32_array(&data).map_err(|e| RegistryError::read(&what, e))?;
        Ok(keys.into_iter().map(RoleKey::from_bytes).collect())
    }

    fn role_member_count(&self, role: RoleKey) -> Result<u64> {
        let what = format!("member count of {role}");
        let data = self.read(
            &self.role_store,
            &what,
            CallBuilder::new("getRoleMemberCount(bytes32)")
                .bytes32(*role.as_bytes())
                .build(),
        )?;
        abi::decode_uint(&data).map_err(|e| RegistryError::read(&what, e))
    }

    fn role_members(&self, role: RoleKey, offset: u64, limit: u64) -> Result<Vec<Address>> {
        let what = format!("members {offset}..{} of {role}", offset + limit);
        let data = self.read(
            &self.role_store,
            &what,
            CallBuilder::new("getRoleMembers(bytes32,uint256,uint256)")
                .bytes32(*role.as_bytes())
                .uint(offset)
                .uint(offset + limit)
                .build(),
        )?;
        abi::decode_address_array(&data).map_err(|e| RegistryError::read(&what, e))
    }
}
