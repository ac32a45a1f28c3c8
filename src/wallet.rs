//! Account stub for a future order-execution strategy.
//!
//! Carries the configured balance, currency and commission; every order
//! operation fails with [`WalletError::NotImplemented`] until execution is
//! built. The classification core does not depend on this module.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("{operation} is not implemented")]
    NotImplemented { operation: &'static str },
}

/// Simulated trading account.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub balance: f64,
    pub currency: String,
    pub commission: f64,
}

impl Wallet {
    pub fn new(starting_balance: f64, currency: impl Into<String>, commission: f64) -> Self {
        Self {
            balance: starting_balance,
            currency: currency.into(),
            commission,
        }
    }

    /// Will return the order id once implemented.
    pub fn buy_market_position(&mut self, _amount: f64) -> Result<Uuid, WalletError> {
        Err(WalletError::NotImplemented {
            operation: "buy_market_position",
        })
    }

    /// Will report whether the position closed once implemented.
    pub fn sell_market_position(&mut self, _order: Uuid) -> Result<bool, WalletError> {
        Err(WalletError::NotImplemented {
            operation: "sell_market_position",
        })
    }

    pub fn open_pending_order(&mut self, _pair: &str, _amount: f64) -> Result<Uuid, WalletError> {
        Err(WalletError::NotImplemented {
            operation: "open_pending_order",
        })
    }

    pub fn close_pending_order(&mut self, _order: Uuid) -> Result<(), WalletError> {
        Err(WalletError::NotImplemented {
            operation: "close_pending_order",
        })
    }
}
