//! Bank domain used by the observer showcase.
//!
//! A [`BankAccount`] publishes [`Transaction`]s and [`Customer`]s on two
//! separate streams; [`BankEntity`] unifies them so one monitor can watch both.

mod account;
mod entity;

pub use account::BankAccount;
pub use entity::{BankEntity, Customer, Transaction};
