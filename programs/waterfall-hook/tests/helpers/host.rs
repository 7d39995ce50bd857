//! In-memory host

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use waterfall_hook::{
    constants::{INVESTOR_RECOVERED_KEY, SF_AMOUNT, TT_PAYMENT},
    AccountId, Configuration, Host, HostError,
};

use super::HOOK_ACCOUNT;

pub const TT_ACCOUNT_SET: u16 = 3;

#[derive(Debug)]
pub struct MockHost {
    pub tx_type: u16,
    pub amount_field: Result<Vec<u8>, HostError>,
    pub account: AccountId,
    pub params: HashMap<Vec<u8>, Vec<u8>>,
    pub state: HashMap<Vec<u8>, Vec<u8>>,
    pub reserved: Option<u32>,
    pub emitted: Vec<Vec<u8>>,

    // Failure injection
    pub fail_state_set: Option<HostError>,
    pub fail_reserve: Option<HostError>,
    pub fail_hook_account: Option<HostError>,
    /// Fail the emission with this index (0 = first)
    pub fail_emit_at: Option<(usize, HostError)>,

    // Access counters
    pub field_reads: Cell<usize>,
    pub param_reads: Cell<usize>,
    pub state_reads: Cell<usize>,
    pub state_writes: usize,
    /// Every guard call as (id, max iterations), in order
    pub guards: RefCell<Vec<(u32, u32)>>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Payment transaction with no amount, no parameters and empty state
    pub fn new() -> Self {
        Self {
            tx_type: TT_PAYMENT,
            amount_field: Err(HostError::DOESNT_EXIST),
            account: HOOK_ACCOUNT,
            params: HashMap::new(),
            state: HashMap::new(),
            reserved: None,
            emitted: Vec::new(),
            fail_state_set: None,
            fail_reserve: None,
            fail_hook_account: None,
            fail_emit_at: None,
            field_reads: Cell::new(0),
            param_reads: Cell::new(0),
            state_reads: Cell::new(0),
            state_writes: 0,
            guards: RefCell::new(Vec::new()),
        }
    }

    pub fn with_tx_type(mut self, tx_type: u16) -> Self {
        self.tx_type = tx_type;
        self
    }

    pub fn with_payment(mut self, amount_field: Vec<u8>) -> Self {
        self.amount_field = Ok(amount_field);
        self
    }

    pub fn with_param(mut self, name: &[u8], value: &[u8]) -> Self {
        self.params.insert(name.to_vec(), value.to_vec());
        self
    }

    pub fn without_param(mut self, name: &[u8]) -> Self {
        self.params.remove(name);
        self
    }

    pub fn with_config(mut self, config: &Configuration) -> Self {
        for (name, value) in config.hook_parameters() {
            self.params.insert(name.to_vec(), value);
        }
        self
    }

    pub fn with_recovered(mut self, drops: u64) -> Self {
        self.state
            .insert(INVESTOR_RECOVERED_KEY.to_vec(), drops.to_be_bytes().to_vec());
        self
    }

    /// Persisted investor counter, if any was written
    pub fn recovered(&self) -> Option<u64> {
        self.state
            .get(INVESTOR_RECOVERED_KEY)
            .map(|v| u64::from_be_bytes(v.as_slice().try_into().unwrap()))
    }

    /// How many times the loop guarded by `id` ran
    pub fn guard_hits(&self, id: u32) -> usize {
        self.guards.borrow().iter().filter(|&&(g, _)| g == id).count()
    }

    pub fn total_reads(&self) -> usize {
        self.field_reads.get() + self.param_reads.get() + self.state_reads.get()
    }
}

impl Host for MockHost {
    fn guard(&self, id: u32, max_iterations: u32) {
        let mut guards = self.guards.borrow_mut();
        guards.push((id, max_iterations));
        let hits = guards.iter().filter(|&&(g, _)| g == id).count();
        // The runtime aborts the hook once a guard is exceeded
        assert!(
            hits <= max_iterations as usize,
            "guard {id} exceeded {max_iterations} iterations"
        );
    }

    fn otxn_type(&self) -> u16 {
        self.tx_type
    }

    fn otxn_field(&self, field_id: u32) -> Result<Vec<u8>, HostError> {
        self.field_reads.set(self.field_reads.get() + 1);
        if field_id != SF_AMOUNT {
            return Err(HostError::DOESNT_EXIST);
        }
        self.amount_field.clone()
    }

    fn hook_param(&self, name: &[u8]) -> Result<Vec<u8>, HostError> {
        self.param_reads.set(self.param_reads.get() + 1);
        self.params.get(name).cloned().ok_or(HostError::DOESNT_EXIST)
    }

    fn hook_account(&self) -> Result<AccountId, HostError> {
        match self.fail_hook_account {
            Some(err) => Err(err),
            None => Ok(self.account),
        }
    }

    fn state(&self, key: &[u8]) -> Result<Vec<u8>, HostError> {
        self.state_reads.set(self.state_reads.get() + 1);
        self.state.get(key).cloned().ok_or(HostError::DOESNT_EXIST)
    }

    fn state_set(&mut self, key: &[u8], value: &[u8]) -> Result<(), HostError> {
        if let Some(err) = self.fail_state_set {
            return Err(err);
        }
        self.state_writes += 1;
        self.state.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn etxn_reserve(&mut self, count: u32) -> Result<(), HostError> {
        if let Some(err) = self.fail_reserve {
            return Err(err);
        }
        if self.reserved.is_some() {
            return Err(HostError::ALREADY_SET);
        }
        self.reserved = Some(count);
        Ok(())
    }

    fn emit(&mut self, tx: &[u8]) -> Result<[u8; 32], HostError> {
        let index = self.emitted.len();
        if let Some((at, err)) = self.fail_emit_at {
            if at == index {
                return Err(err);
            }
        }
        match self.reserved {
            None => return Err(HostError::PREREQUISITE_NOT_MET),
            Some(count) if index as u32 >= count => return Err(HostError::TOO_MANY_EMITTED_TXN),
            Some(_) => {}
        }
        self.emitted.push(tx.to_vec());
        Ok([index as u8 + 1; 32])
    }
}
