//! Shared in-memory registry for integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use chainkeeper_core::address::Address;
use chainkeeper_core::keys::Bytes32;
use chainkeeper_core::registry::{DataStore, RegistryError, Result, RoleStore, SignerStore};
use chainkeeper_core::roles::RoleKey;

pub fn addr(s: &str) -> Address {
    Address::parse(s).unwrap()
}

/// In-memory registry with per-account write-failure injection and
/// per-call read/write failure switches.
#[derive(Default)]
pub struct MockRegistry {
    pub signers: RefCell<Vec<Address>>,
    pub uints: RefCell<HashMap<Bytes32, u64>>,
    pub roles: RefCell<Vec<(RoleKey, Vec<Address>)>>,
    pub fail_add: RefCell<HashSet<Address>>,
    pub fail_remove: RefCell<HashSet<Address>>,
    pub fail_signer_read: Cell<bool>,
    pub fail_uint_read: Cell<bool>,
    pub fail_uint_write: Cell<bool>,
    pub fail_role_read: Cell<bool>,
    pub fail_member_read: Cell<bool>,
    pub set_uint_calls: RefCell<Vec<(Bytes32, u64)>>,
}

impl MockRegistry {
    pub fn with_signers(signers: &[&str]) -> Self {
        let mock = Self::default();
        *mock.signers.borrow_mut() = signers.iter().map(|s| addr(s)).collect();
        mock
    }

    pub fn signer_list(&self) -> Vec<Address> {
        self.signers.borrow().clone()
    }

    pub fn add_role(&self, key: RoleKey, members: &[&str]) {
        self.roles
            .borrow_mut()
            .push((key, members.iter().map(|s| addr(s)).collect()));
    }
}

fn page<T: Clone>(items: &[T], offset: u64, limit: u64) -> Vec<T> {
    items
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

impl SignerStore for MockRegistry {
    fn signer_count(&self) -> Result<u64> {
        if self.fail_signer_read.get() {
            return Err(RegistryError::read("signer count", "injected failure"));
        }
        Ok(self.signers.borrow().len() as u64)
    }

    fn signers(&self, offset: u64, limit: u64) -> Result<Vec<Address>> {
        if self.fail_signer_read.get() {
            return Err(RegistryError::read("signer page", "injected failure"));
        }
        Ok(page(&self.signers.borrow(), offset, limit))
    }

    fn add_signer(&self, account: &Address) -> Result<()> {
        if self.fail_add.borrow().contains(account) {
            return Err(RegistryError::write(
                format!("add signer {account}"),
                "injected failure",
            ));
        }
        self.signers.borrow_mut().push(account.clone());
        Ok(())
    }

    fn remove_signer(&self, account: &Address) -> Result<()> {
        if self.fail_remove.borrow().contains(account) {
            return Err(RegistryError::write(
                format!("remove signer {account}"),
                "injected failure",
            ));
        }
        self.signers.borrow_mut().retain(|a| a != account);
        Ok(())
    }
}

impl DataStore for MockRegistry {
    fn get_uint(&self, key: Bytes32) -> Result<u64> {
        if self.fail_uint_read.get() {
            return Err(RegistryError::read("uint value", "injected failure"));
        }
        // Contract storage defaults to zero for unset keys.
        Ok(*self.uints.borrow().get(&key).unwrap_or(&0))
    }

    fn set_uint(&self, key: Bytes32, value: u64) -> Result<()> {
        self.set_uint_calls.borrow_mut().push((key, value));
        if self.fail_uint_write.get() {
            return Err(RegistryError::write("set uint", "injected failure"));
        }
        self.uints.borrow_mut().insert(key, value);
        Ok(())
    }
}

impl RoleStore for MockRegistry {
    fn role_count(&self) -> Result<u64> {
        if self.fail_role_read.get() {
            return Err(RegistryError::read("role count", "injected failure"));
        }
        Ok(self.roles.borrow().len() as u64)
    }

    fn roles(&self, offset: u64, limit: u64) -> Result<Vec<RoleKey>> {
        if self.fail_role_read.get() {
            return Err(RegistryError::read("role page", "injected failure"));
        }
        let keys: Vec<RoleKey> = self.roles.borrow().iter().map(|(k, _)| *k).collect();
        Ok(page(&keys, offset, limit))
    }

    fn role_member_count(&self, role: RoleKey) -> Result<u64> {
        if self.fail_member_read.get() {
            return Err(RegistryError::read(
                format!("member count of {role}"),
                "injected failure",
            ));
        }
        Ok(self
            .roles
            .borrow()
            .iter()
            .find(|(k, _)| *k == role)
            .map(|(_, members)| members.len() as u64)
            .unwrap_or(0))
    }

    fn role_members(&self, role: RoleKey, offset: u64, limit: u64) -> Result<Vec<Address>> {
        if self.fail_member_read.get() {
            return Err(RegistryError::read(
                format!("member page of {role}"),
                "injected failure",
            ));
        }
        Ok(self
            .roles
            .borrow()
            .iter()
            .find(|(k, _)| *k == role)
            .map(|(_, members)| page(members, offset, limit))
            .unwrap_or_default())
    }
}
