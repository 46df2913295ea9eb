//! Balance and deposit bookkeeping for the holders of one token
//!
//! Every credit or debit goes through `AccountBook`, which enforces the
//! frozen/whitelist rules and drops rows that end up empty.

use common::{Asset, ExtendedSymbolCode};
use cosmwasm_std::Storage;

use crate::error::ContractError;
use crate::state::{TokenAccount, TokenOption, TokenStat, ACCOUNTS};

/// Per-call modifiers of a row update
#[derive(Clone, Copy, Debug, Default)]
pub struct Touch {
    /// Keep the row even if it becomes empty
    pub keep: bool,
    /// Skip the frozen/whitelist check once
    pub skip_validation: bool,
}

impl Touch {
    pub const NONE: Touch = Touch {
        keep: false,
        skip_validation: false,
    };

    pub fn keep() -> Self {
        Touch {
            keep: true,
            ..Touch::NONE
        }
    }

    pub fn skip_validation() -> Self {
        Touch {
            skip_validation: true,
            ..Touch::NONE
        }
    }
}

pub struct AccountBook<'a> {
    stat: &'a TokenStat,
    key: String,
    /// Address of the token contract, exempt from holder checks
    code: &'a str,
    /// Whether the caller may open rows while the whitelist is on
    can_open: bool,
}

impl<'a> AccountBook<'a> {
    pub fn new(stat: &'a TokenStat, symbol: &ExtendedSymbolCode, code: &'a str, can_open: bool) -> Self {
        Self {
            stat,
            key: symbol.to_string(),
            code,
            can_open,
        }
    }

    pub fn load(&self, storage: &dyn Storage, owner: &str) -> Result<Option<TokenAccount>, ContractError> {
        Ok(ACCOUNTS.may_load(storage, (owner, self.key.as_str()))?)
    }

    /// Empty row as created on first credit.
    pub fn new_row(&self) -> TokenAccount {
        let zero = Asset::zero(self.stat.symbol().clone());
        TokenAccount {
            balance: zero.clone(),
            deposit: self.stat.has(TokenOption::Recallable).then_some(zero),
            issuer: self.stat.issuer.clone(),
            frozen: false,
            whitelist: false,
        }
    }

    pub fn sub_balance(
        &self,
        storage: &mut dyn Storage,
        owner: &str,
        value: &Asset,
        touch: Touch,
    ) -> Result<(), ContractError> {
        let mut row = self.load(storage, owner)?.ok_or(ContractError::OverdrawnBalance)?;
        self.check_valid(owner, &row, touch)?;
        if row.balance.amount < value.amount {
            return Err(ContractError::OverdrawnBalance);
        }
        row.balance = row.balance.checked_sub(value)?;
        self.store(storage, owner, &row, touch)
    }

    pub fn add_balance(
        &self,
        storage: &mut dyn Storage,
        owner: &str,
        value: &Asset,
        touch: Touch,
    ) -> Result<(), ContractError> {
        let row = match self.load(storage, owner)? {
            None => {
                if !self.may_open(owner) {
                    return Err(ContractError::BalanceNotOpened);
                }
                let mut row = self.new_row();
                row.balance = value.clone();
                row
            }
            Some(mut row) => {
                self.check_valid(owner, &row, touch)?;
                row.balance = row.balance.checked_add(value)?;
                row
            }
        };
        self.store(storage, owner, &row, touch)
    }

    pub fn sub_deposit(
        &self,
        storage: &mut dyn Storage,
        owner: &str,
        value: &Asset,
        touch: Touch,
    ) -> Result<(), ContractError> {
        let mut row = self.load(storage, owner)?.ok_or(ContractError::OverdrawnDeposit)?;
        self.check_valid(owner, &row, touch)?;
        let deposit = row.deposit.take().ok_or(ContractError::OverdrawnDeposit)?;
        if deposit.amount < value.amount {
            return Err(ContractError::OverdrawnDeposit);
        }
        row.deposit = Some(deposit.checked_sub(value)?);
        self.store(storage, owner, &row, touch)
    }

    pub fn add_deposit(
        &self,
        storage: &mut dyn Storage,
        owner: &str,
        value: &Asset,
        touch: Touch,
    ) -> Result<(), ContractError> {
        let row = match self.load(storage, owner)? {
            None => {
                if !self.may_open(owner) {
                    return Err(ContractError::DepositNotOpened);
                }
                let mut row = self.new_row();
                row.deposit = Some(value.clone());
                row
            }
            Some(mut row) => {
                self.check_valid(owner, &row, touch)?;
                let deposit = row
                    .deposit
                    .unwrap_or_else(|| Asset::zero(value.symbol.clone()));
                row.deposit = Some(deposit.checked_add(value)?);
                row
            }
        };
        self.store(storage, owner, &row, touch)
    }

    fn may_open(&self, owner: &str) -> bool {
        !self.stat.has(TokenOption::WhitelistOn) || self.can_open || owner == self.code
    }

    fn check_valid(&self, owner: &str, row: &TokenAccount, touch: Touch) -> Result<(), ContractError> {
        if touch.skip_validation || owner == self.code {
            return Ok(());
        }
        if row.frozen {
            return Err(ContractError::AccountFrozen);
        }
        if self.stat.has(TokenOption::WhitelistOn) && !row.whitelist {
            return Err(ContractError::NotWhitelisted);
        }
        Ok(())
    }

    fn store(
        &self,
        storage: &mut dyn Storage,
        owner: &str,
        row: &TokenAccount,
        touch: Touch,
    ) -> Result<(), ContractError> {
        if !touch.keep && row.is_disposable() {
            ACCOUNTS.remove(storage, (owner, self.key.as_str()));
        } else {
            ACCOUNTS.save(storage, (owner, self.key.as_str()), row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    fn stat(opts: u32) -> TokenStat {
        let mut stat = TokenStat::new("1000.000 HOBL".parse().unwrap(), "conr2d".to_string());
        stat.opts = opts;
        stat
    }

    fn hobl(s: &str) -> Asset {
        s.parse().unwrap()
    }

    fn code() -> ExtendedSymbolCode {
        ExtendedSymbolCode::new("HOBL", "conr2d")
    }

    #[test]
    fn test_empty_row_is_erased_unless_kept() {
        let mut storage = MockStorage::new();
        let stat = stat(TokenOption::Mintable.bit());
        let book = AccountBook::new(&stat, &code(), "token", false);

        book.add_balance(&mut storage, "eun2ce", &hobl("5.000 HOBL"), Touch::NONE)
            .unwrap();
        book.sub_balance(&mut storage, "eun2ce", &hobl("5.000 HOBL"), Touch::keep())
            .unwrap();
        let row = book.load(&storage, "eun2ce").unwrap().unwrap();
        assert_eq!(row.balance, hobl("0.000 HOBL"));
        assert!(row.deposit.is_none());

        book.add_balance(&mut storage, "eun2ce", &hobl("1.000 HOBL"), Touch::NONE)
            .unwrap();
        book.sub_balance(&mut storage, "eun2ce", &hobl("1.000 HOBL"), Touch::NONE)
            .unwrap();
        assert!(book.load(&storage, "eun2ce").unwrap().is_none());
    }

    #[test]
    fn test_overdrawn() {
        let mut storage = MockStorage::new();
        let stat = stat(TokenOption::Recallable.bit());
        let book = AccountBook::new(&stat, &code(), "token", false);

        assert_eq!(
            book.sub_balance(&mut storage, "eun2ce", &hobl("1.000 HOBL"), Touch::NONE)
                .unwrap_err(),
            ContractError::OverdrawnBalance
        );
        book.add_deposit(&mut storage, "eun2ce", &hobl("2.000 HOBL"), Touch::NONE)
            .unwrap();
        assert_eq!(
            book.sub_deposit(&mut storage, "eun2ce", &hobl("3.000 HOBL"), Touch::NONE)
                .unwrap_err(),
            ContractError::OverdrawnDeposit
        );
    }

    #[test]
    fn test_frozen_and_whitelist_rules() {
        let mut storage = MockStorage::new();
        let stat = stat(TokenOption::Whitelistable.bit() | TokenOption::WhitelistOn.bit());

        let book = AccountBook::new(&stat, &code(), "token", false);
        assert_eq!(
            book.add_balance(&mut storage, "eun2ce", &hobl("1.000 HOBL"), Touch::NONE)
                .unwrap_err(),
            ContractError::BalanceNotOpened
        );
        // the contract's own escrow row is exempt
        book.add_balance(&mut storage, "token", &hobl("1.000 HOBL"), Touch::NONE)
            .unwrap();

        let issuer_book = AccountBook::new(&stat, &code(), "token", true);
        issuer_book
            .add_balance(&mut storage, "eun2ce", &hobl("1.000 HOBL"), Touch::NONE)
            .unwrap();
        assert_eq!(
            book.sub_balance(&mut storage, "eun2ce", &hobl("1.000 HOBL"), Touch::NONE)
                .unwrap_err(),
            ContractError::NotWhitelisted
        );

        let mut row = book.load(&storage, "eun2ce").unwrap().unwrap();
        row.whitelist = true;
        row.frozen = true;
        ACCOUNTS
            .save(&mut storage, ("eun2ce", "HOBL@conr2d"), &row)
            .unwrap();
        assert_eq!(
            book.sub_balance(&mut storage, "eun2ce", &hobl("1.000 HOBL"), Touch::NONE)
                .unwrap_err(),
            ContractError::AccountFrozen
        );
        book.sub_balance(
            &mut storage,
            "eun2ce",
            &hobl("1.000 HOBL"),
            Touch::skip_validation(),
        )
        .unwrap();
        // flagged rows survive at zero
        assert!(book.load(&storage, "eun2ce").unwrap().is_some());
    }
}
