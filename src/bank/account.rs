//! # Bank account owning one publisher per activity stream.
//!
//! ```text
//! create_transaction(tx) ──► new_transactions: Publisher<Transaction>
//! create_new_customer(c) ──► new_customers:    Publisher<Customer>
//! ```
//!
//! The publishers live as long as the account (or any clone of them) is
//! referenced. `close()` completes both streams.

use crate::bank::entity::{Customer, Transaction};
use crate::error::PublishError;
use crate::events::{Event, Publisher};

/// Domain object exposing its activity as typed event streams.
#[derive(Debug, Clone)]
pub struct BankAccount {
    /// Stream of created transactions.
    pub new_transactions: Publisher<Transaction>,
    /// Stream of registered customers.
    pub new_customers: Publisher<Customer>,
}

impl BankAccount {
    /// Creates an account with publishers named `transactions` and `customers`.
    pub fn new() -> Self {
        Self {
            new_transactions: Publisher::new("transactions"),
            new_customers: Publisher::new("customers"),
        }
    }

    /// Records a transaction and broadcasts it.
    pub fn create_transaction(&self, tx: Transaction) -> Result<Event<Transaction>, PublishError> {
        self.new_transactions.publish(tx)
    }

    /// Registers a customer and broadcasts it.
    pub fn create_new_customer(&self, customer: Customer) -> Result<Event<Customer>, PublishError> {
        self.new_customers.publish(customer)
    }

    /// Completes both streams. Further `create_*` calls fail with
    /// [`PublishError::Closed`].
    pub fn close(&self) {
        self.new_transactions.complete();
        self.new_customers.complete();
    }
}

impl Default for BankAccount {
    fn default() -> Self {
        Self::new()
    }
}
