//! # Bank entities carried as event payloads.
//!
//! - [`Transaction`]: a money movement with a sum in USD
//! - [`Customer`]: marker for a newly registered customer
//! - [`BankEntity`]: either of the above, used by monitors that watch all
//!   account activity

/// Money movement emitted on `BankAccount::new_transactions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    /// Amount in USD.
    pub sum: u32,
}

impl Transaction {
    /// Creates a transaction of `sum` USD.
    pub fn new(sum: u32) -> Self {
        Self { sum }
    }
}

/// New customer marker emitted on `BankAccount::new_customers`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Customer;

/// Any entity produced by a bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankEntity {
    Transaction(Transaction),
    Customer(Customer),
}

impl BankEntity {
    /// Entity type name, used in narration.
    pub fn kind(&self) -> &'static str {
        match self {
            BankEntity::Transaction(_) => "Transaction",
            BankEntity::Customer(_) => "Customer",
        }
    }
}

impl From<Transaction> for BankEntity {
    fn from(tx: Transaction) -> Self {
        BankEntity::Transaction(tx)
    }
}

impl From<Customer> for BankEntity {
    fn from(customer: Customer) -> Self {
        BankEntity::Customer(customer)
    }
}
