use std::collections::HashMap;

use crate::domain::{Account, ClientId};

/// Maps each client to their account. Accounts are lazily created on first
/// reference and iterate in the order their client first appeared.
#[derive(Debug, Default)]
pub struct ClientAccounts {
    index: HashMap<ClientId, usize>,
    accounts: Vec<(ClientId, Account)>,
}

impl ClientAccounts {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn as_slice(&self) -> &[(ClientId, Account)] {
        &self.accounts
    }
    pub fn iter(&self) -> impl Iterator<Item = (ClientId, &Account)> + '_ {
        self.accounts
            .iter()
            .map(|(client_id, account)| (*client_id, account))
    }
    pub fn get_or_create_account_mut(&mut self, client_id: ClientId) -> &mut Account {
        let position = match self.index.get(&client_id) {
            Some(&position) => position,
            None => {
                self.accounts.push((client_id, Account::default()));
                let position = self.accounts.len() - 1;
                self.index.insert(client_id, position);
                position
            }
        };
        &mut self.accounts[position].1
    }
}
