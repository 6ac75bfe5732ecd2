#![no_std]

//! Minimal NFT collection contract.
//!
//! Provides just enough of an asset registry (mint / owner_of / transfer)
//! for the marketplace to escrow tokens against. Used by the marketplace
//! unit tests and the integration harness as the collection contract.

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Env, Symbol};


/// Collection errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum NftError {
    /// Contract has not been initialized
    NotInitialized = 1,
    /// Contract has already been initialized
    AlreadyInitialized = 2,
    /// Token with the given token_id does not exist
    TokenNotFound = 3,
    /// Caller is not the owner of the token
    NotOwner = 4,
}

/// Storage keys
#[contracttype]
pub enum DataKey {
    /// Admin address
    Admin,
    /// Counter for generating unique token IDs
    TokenCounter,
    /// Owner mapping (token_id -> Address)
    Owner(u32),
}

mod storage {
    use super::*;

    pub fn has_admin(e: &Env) -> bool {
        e.storage().instance().has(&DataKey::Admin)
    }

    pub fn set_admin(e: &Env, admin: &Address) {
        e.storage().instance().set(&DataKey::Admin, admin);
    }

    pub fn get_admin(e: &Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::Admin)
    }

    pub fn next_token_id(e: &Env) -> u32 {
        let count: u32 = e
            .storage()
            .instance()
            .get(&DataKey::TokenCounter)
            .unwrap_or(0);
        let new_count = count + 1;
        e.storage()
            .instance()
            .set(&DataKey::TokenCounter, &new_count);
        new_count
    }

    pub fn token_count(e: &Env) -> u32 {
        e.storage()
            .instance()
            .get(&DataKey::TokenCounter)
            .unwrap_or(0)
    }

    pub fn set_owner(e: &Env, token_id: u32, owner: &Address) {
        e.storage()
            .persistent()
            .set(&DataKey::Owner(token_id), owner);
    }

    pub fn get_owner(e: &Env, token_id: u32) -> Option<Address> {
        e.storage().persistent().get(&DataKey::Owner(token_id))
    }
}

#[contract]
pub struct MockNFTContract;

#[contractimpl]
impl MockNFTContract {
    /// Initialize the collection with an admin address
    pub fn initialize(e: Env, admin: Address) -> Result<(), NftError> {
        if storage::has_admin(&e) {
            return Err(NftError::AlreadyInitialized);
        }

        storage::set_admin(&e, &admin);
        e.storage().instance().set(&DataKey::TokenCounter, &0u32);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(e: Env) -> Result<Address, NftError> {
        storage::get_admin(&e).ok_or(NftError::NotInitialized)
    }

    /// Mint a new token to `owner`, returning its token_id
    pub fn mint(e: Env, owner: Address) -> Result<u32, NftError> {
        if !storage::has_admin(&e) {
            return Err(NftError::NotInitialized);
        }

        let token_id = storage::next_token_id(&e);
        storage::set_owner(&e, token_id, &owner);

        e.events()
            .publish((Symbol::new(&e, "Mint"), token_id), owner);

        Ok(token_id)
    }

    /// Get owner of a token
    pub fn owner_of(e: Env, token_id: u32) -> Result<Address, NftError> {
        storage::get_owner(&e, token_id).ok_or(NftError::TokenNotFound)
    }

    /// Total number of tokens minted
    pub fn total_supply(e: Env) -> u32 {
        storage::token_count(&e)
    }

    /// Transfer a token to a new owner
    ///
    /// # Errors
    /// * `TokenNotFound` - If the token does not exist
    /// * `NotOwner` - If `from` is not the current owner
    pub fn transfer(e: Env, from: Address, to: Address, token_id: u32) -> Result<(), NftError> {
        from.require_auth();

        let current_owner = storage::get_owner(&e, token_id).ok_or(NftError::TokenNotFound)?;
        if current_owner != from {
            return Err(NftError::NotOwner);
        }

        storage::set_owner(&e, token_id, &to);

        e.events().publish(
            (Symbol::new(&e, "Transfer"), token_id),
            (from, to, e.ledger().timestamp()),
        );

        Ok(())
    }
}
