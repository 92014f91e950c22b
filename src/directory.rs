// Account directory: a fixed-capacity open-addressing hash table keyed by account name.
//
// Home slot: h = h * 131 + byte over the name's bytes, modulo capacity.
// Collisions walk the probe sequence slot(i) = (home + i) % capacity, i in 0..capacity.
// A step of 1 is coprime with every capacity, so a full walk visits every slot once.
//
// Slot states: Empty -> Used (insert) -> Deleted (remove) -> Used (insert reuses it).
// Lookups skip Deleted slots and stop at the first Empty one.

use thiserror::Error;
use tracing::{debug, warn};

use crate::account::{Account, AccountError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Directory capacity must be greater than zero")]
    InvalidCapacity,

    #[error("Directory is full: capacity {0} reached")]
    Full(usize),

    #[error("Account {0} already registered")]
    Duplicate(String),

    #[error("Account {0} not found")]
    NotFound(String),

    #[error("Wrong password for account {0}")]
    WrongPassword(String),

    #[error("Invalid account: {0}")]
    InvalidAccount(#[from] AccountError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Used,
    Deleted,
}

// A Deleted slot carries no data, its fields are gone with the record.
#[derive(Debug, Clone, Default)]
enum Slot {
    #[default]
    Empty,
    Used(Account),
    Deleted,
}

impl Slot {
    fn state(&self) -> SlotState {
        match self {
            Slot::Empty => SlotState::Empty,
            Slot::Used(_) => SlotState::Used,
            Slot::Deleted => SlotState::Deleted,
        }
    }
}

// `capacity` is never zero: tables reject it at construction.
pub(crate) fn hash_name(name: &str, capacity: usize) -> usize {
    let h = name
        .bytes()
        .fold(0u64, |h, byte| h.wrapping_mul(131).wrapping_add(u64::from(byte)));
    (h % capacity as u64) as usize
}

#[derive(Debug, Clone)]
pub struct AccountTable {
    slots: Vec<Slot>,
    len: usize,
}

impl AccountTable {
    pub fn new(capacity: usize) -> Result<Self, DirectoryError> {
        if capacity == 0 {
            return Err(DirectoryError::InvalidCapacity);
        }

        Ok(Self {
            slots: vec![Slot::Empty; capacity],
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    pub fn home_slot(&self, name: &str) -> usize {
        hash_name(name, self.capacity())
    }

    // Slot indices visited for `name`, home slot first.
    fn probe(&self, name: &str) -> impl Iterator<Item = usize> {
        let capacity = self.capacity();
        let home = self.home_slot(name);
        (0..capacity).map(move |i| (home + i) % capacity)
    }

    // Index of the Used slot holding `name`.
    fn find_slot(&self, name: &str) -> Option<usize> {
        for pos in self.probe(name) {
            match &self.slots[pos] {
                Slot::Empty => return None,
                Slot::Used(account) if account.name == name => return Some(pos),
                Slot::Used(_) | Slot::Deleted => continue,
            }
        }
        None
    }

    /// Registers `account`. Returns the slot it landed in.
    ///
    /// The probe walk continues past tombstones until an Empty slot to make sure the
    /// name is not already registered further down the chain; the record then goes
    /// into the first tombstone seen, or that Empty slot if there was none.
    pub fn insert(&mut self, account: Account) -> Result<usize, DirectoryError> {
        if self.is_full() {
            warn!(capacity = self.capacity(), "directory full, registration rejected");
            return Err(DirectoryError::Full(self.capacity()));
        }
        account.validate()?;

        let mut target = None;
        for pos in self.probe(&account.name) {
            match &self.slots[pos] {
                Slot::Used(existing) if existing.name == account.name => {
                    warn!(name = %account.name, "duplicate registration rejected");
                    return Err(DirectoryError::Duplicate(account.name));
                }
                Slot::Used(_) => continue,
                Slot::Deleted => {
                    target.get_or_insert(pos);
                }
                Slot::Empty => {
                    target.get_or_insert(pos);
                    break;
                }
            }
        }

        // not full, so the walk saw at least one Empty or Deleted slot
        let Some(pos) = target else {
            return Err(DirectoryError::Full(self.capacity()));
        };

        debug!(name = %account.name, slot = pos, "account registered");
        self.slots[pos] = Slot::Used(account);
        self.len += 1;

        Ok(pos)
    }

    /// Read-only lookup by name. Clone the result for a detached copy.
    pub fn search(&self, name: &str) -> Option<&Account> {
        let pos = self.find_slot(name)?;
        match &self.slots[pos] {
            Slot::Used(account) => Some(account),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_slot(name).is_some()
    }

    /// Removes the account and leaves a tombstone in its slot.
    pub fn remove(&mut self, name: &str) -> Option<Account> {
        let pos = self.find_slot(name)?;

        match std::mem::replace(&mut self.slots[pos], Slot::Deleted) {
            Slot::Used(account) => {
                self.len -= 1;
                debug!(name, slot = pos, "account removed");
                Some(account)
            }
            other => {
                self.slots[pos] = other;
                None
            }
        }
    }

    /// Log in: the account must exist and the password must match exactly.
    pub fn authenticate(&self, name: &str, password: &str) -> Result<&Account, DirectoryError> {
        let account = self
            .search(name)
            .ok_or_else(|| DirectoryError::NotFound(name.to_string()))?;

        if !account.password_matches(password) {
            warn!(name, "failed log in");
            return Err(DirectoryError::WrongPassword(name.to_string()));
        }

        Ok(account)
    }

    pub fn slot_state(&self, pos: usize) -> Option<SlotState> {
        self.slots.get(pos).map(Slot::state)
    }

    // Registered accounts with their slot index, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Account)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(pos, slot)| match slot {
                Slot::Used(account) => Some((pos, account)),
                _ => None,
            })
    }

    // Masked listing, one `[slot] account` line per registered account.
    pub fn listing(&self) -> String {
        self.iter()
            .map(|(pos, account)| format!("[{pos:02}] {account}\n"))
            .collect()
    }
}
