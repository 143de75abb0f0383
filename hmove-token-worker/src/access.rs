// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Single-owner gate and pause flag

use hmove_models::Address;
use hmove_token_exports::{TokenError, TokenEvent};

#[derive(Debug, Clone)]
pub(crate) struct AccessController {
    /// none once renounced, terminal
    owner: Option<Address>,
    paused: bool,
}

impl AccessController {
    pub fn new(owner: Address) -> Self {
        AccessController {
            owner: Some(owner),
            paused: false,
        }
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn only_owner(&self, caller: &Address) -> Result<(), TokenError> {
        match self.owner {
            Some(owner) if owner == *caller => Ok(()),
            _ => Err(TokenError::Unauthorized { caller: *caller }),
        }
    }

    pub fn when_not_paused(&self) -> Result<(), TokenError> {
        if self.paused {
            return Err(TokenError::Paused);
        }
        Ok(())
    }

    pub fn pause(&mut self, caller: &Address) -> Result<TokenEvent, TokenError> {
        self.set_paused(caller, true)?;
        Ok(TokenEvent::Paused { account: *caller })
    }

    pub fn unpause(&mut self, caller: &Address) -> Result<TokenEvent, TokenError> {
        self.set_paused(caller, false)?;
        Ok(TokenEvent::Unpaused { account: *caller })
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<TokenEvent, TokenError> {
        self.only_owner(caller)?;
        if new_owner.is_zero() {
            return Err(TokenError::ZeroAddress("new owner"));
        }
        Ok(self.set_owner(Some(new_owner)))
    }

    pub fn renounce_ownership(&mut self, caller: &Address) -> Result<TokenEvent, TokenError> {
        self.only_owner(caller)?;
        Ok(self.set_owner(None))
    }

    fn set_paused(&mut self, caller: &Address, paused: bool) -> Result<(), TokenError> {
        self.only_owner(caller)?;
        if self.paused == paused {
            return Err(TokenError::AlreadyInState { paused });
        }
        self.paused = paused;
        Ok(())
    }

    fn set_owner(&mut self, new_owner: Option<Address>) -> TokenEvent {
        let previous_owner = std::mem::replace(&mut self.owner, new_owner);
        TokenEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        }
    }
}
