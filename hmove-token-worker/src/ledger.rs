// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Balances, allowances and total supply

use hmove_models::{Address, Amount};
use hmove_token_exports::TokenError;
use std::collections::BTreeMap;

/// Token bookkeeping. Absent entries read as zero.
#[derive(Debug, Clone, Default)]
pub(crate) struct Ledger {
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<(Address, Address), Amount>,
    total_supply: Amount,
}

impl Ledger {
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Move `amount` from `from` to `to`.
    /// A missing `from` mints, a missing `to` burns.
    /// Nothing is written unless the whole move is valid.
    pub fn transfer_coins(
        &mut self,
        from: Option<Address>,
        to: Option<Address>,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let new_supply = match (from, to) {
            (None, Some(_)) => self
                .total_supply
                .checked_add(amount)
                .ok_or(TokenError::AmountOverflow)?,
            (Some(_), None) => self.total_supply.saturating_sub(amount),
            _ => self.total_supply,
        };

        let debit = match from {
            Some(from) => {
                let balance = self.balance_of(&from);
                let new_balance =
                    balance
                        .checked_sub(amount)
                        .ok_or(TokenError::InsufficientBalance {
                            account: from,
                            balance,
                            requested: amount,
                        })?;
                Some((from, new_balance))
            }
            None => None,
        };
        let credit = match to {
            Some(to) => {
                // a self transfer credits the debited balance
                let balance = match debit {
                    Some((from, new_balance)) if from == to => new_balance,
                    _ => self.balance_of(&to),
                };
                let new_balance = balance
                    .checked_add(amount)
                    .ok_or(TokenError::AmountOverflow)?;
                Some((to, new_balance))
            }
            None => None,
        };

        for (account, balance) in debit.into_iter().chain(credit) {
            self.set_balance(account, balance);
        }
        self.total_supply = new_supply;
        Ok(())
    }

    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    /// Allowance left once `spender` spends `amount` of `owner`'s funds,
    /// `None` when the allowance is unlimited and stays untouched
    pub fn allowance_after_spend(
        &self,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<Option<Amount>, TokenError> {
        let allowance = self.allowance(&owner, &spender);
        if allowance == Amount::MAX {
            return Ok(None);
        }
        allowance
            .checked_sub(amount)
            .map(Some)
            .ok_or(TokenError::InsufficientAllowance {
                owner,
                spender,
                allowance,
                requested: amount,
            })
    }

    /// Sum of all stored balances
    #[cfg(test)]
    pub fn sum_of_balances(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(Amount::zero(), |acc, balance| acc.checked_add(*balance))
    }

    fn set_balance(&mut self, account: Address, balance: Amount) {
        if balance.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn addr(byte: u8) -> Address {
        Address::from_bytes(&[byte; 20])
    }

    #[test]
    fn test_mint_transfer_burn_keep_supply() {
        let mut ledger = Ledger::default();
        ledger
            .transfer_coins(None, Some(addr(1)), Amount::from_raw(1000))
            .unwrap();
        ledger
            .transfer_coins(Some(addr(1)), Some(addr(2)), Amount::from_raw(300))
            .unwrap();
        ledger
            .transfer_coins(Some(addr(2)), None, Amount::from_raw(100))
            .unwrap();
        assert_eq!(ledger.balance_of(&addr(1)), Amount::from_raw(700));
        assert_eq!(ledger.balance_of(&addr(2)), Amount::from_raw(200));
        assert_eq!(ledger.total_supply(), Amount::from_raw(900));
        assert_eq!(ledger.sum_of_balances(), Some(ledger.total_supply()));
    }

    #[test]
    fn test_self_transfer() {
        let mut ledger = Ledger::default();
        ledger
            .transfer_coins(None, Some(addr(1)), Amount::from_raw(10))
            .unwrap();
        ledger
            .transfer_coins(Some(addr(1)), Some(addr(1)), Amount::from_raw(10))
            .unwrap();
        assert_eq!(ledger.balance_of(&addr(1)), Amount::from_raw(10));
    }

    #[test]
    fn test_insufficient_balance() {
        let mut ledger = Ledger::default();
        ledger
            .transfer_coins(None, Some(addr(1)), Amount::from_raw(10))
            .unwrap();
        assert_matches!(
            ledger.transfer_coins(Some(addr(1)), Some(addr(2)), Amount::from_raw(11)),
            Err(TokenError::InsufficientBalance { account, .. }) if account == addr(1)
        );
        assert_matches!(
            ledger.transfer_coins(Some(addr(1)), None, Amount::from_raw(11)),
            Err(TokenError::InsufficientBalance { .. })
        );
    }

    #[test]
    fn test_failed_credit_writes_nothing() {
        let mut ledger = Ledger::default();
        ledger
            .transfer_coins(None, Some(addr(1)), Amount::MAX)
            .unwrap();
        ledger
            .transfer_coins(Some(addr(1)), Some(addr(2)), Amount::from_raw(10))
            .unwrap();
        assert_matches!(
            ledger.transfer_coins(None, Some(addr(2)), Amount::from_raw(1)),
            Err(TokenError::AmountOverflow)
        );
        assert_eq!(
            ledger.balance_of(&addr(1)),
            Amount::from_raw(u128::MAX - 10)
        );
        assert_eq!(ledger.balance_of(&addr(2)), Amount::from_raw(10));
        assert_eq!(ledger.sum_of_balances(), Some(ledger.total_supply()));
    }

    #[test]
    fn test_mint_overflow() {
        let mut ledger = Ledger::default();
        ledger
            .transfer_coins(None, Some(addr(1)), Amount::MAX)
            .unwrap();
        assert_matches!(
            ledger.transfer_coins(None, Some(addr(2)), Amount::from_raw(1)),
            Err(TokenError::AmountOverflow)
        );
        assert_eq!(ledger.total_supply(), Amount::MAX);
    }

    #[test]
    fn test_allowances() {
        let mut ledger = Ledger::default();
        ledger.set_allowance(addr(1), addr(2), Amount::from_raw(200));
        assert_matches!(
            ledger.allowance_after_spend(addr(1), addr(2), Amount::from_raw(400)),
            Err(TokenError::InsufficientAllowance { .. })
        );
        assert_eq!(
            ledger.allowance_after_spend(addr(1), addr(2), Amount::from_raw(100)),
            Ok(Some(Amount::from_raw(100)))
        );
        assert_eq!(ledger.allowance(&addr(1), &addr(2)), Amount::from_raw(200));

        ledger.set_allowance(addr(1), addr(3), Amount::MAX);
        assert_eq!(
            ledger.allowance_after_spend(addr(1), addr(3), Amount::from_raw(100)),
            Ok(None)
        );

        ledger.set_allowance(addr(1), addr(2), Amount::zero());
        assert_eq!(ledger.allowance(&addr(1), &addr(2)), Amount::zero());
    }
}
