#![no_std]

//! Escrow marketplace for non-fungible assets.
//!
//! Supports two sale modes over any collection contract: fixed-price
//! listings and time-boxed English auctions. The marketplace takes custody
//! of the asset for the lifetime of a sale and of the highest bid for the
//! lifetime of an auction; settlement pays the seller net of the
//! marketplace fee and releases the asset from escrow. Every operation is
//! all-or-nothing: a failed transfer on any leg aborts the invocation and
//! rolls back all storage writes.

use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, contracttype, symbol_short, token,
    Address, Env, Vec,
};


// ============================================================================
// Error Types
// ============================================================================

/// Marketplace errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MarketplaceError {
    /// Marketplace not initialized
    NotInitialized = 1,
    /// Already initialized
    AlreadyInitialized = 2,
    /// Caller is not the admin
    Unauthorized = 3,
    /// Price or start price must be > 0
    InvalidPrice = 4,
    /// Auction duration must be > 0
    InvalidDuration = 5,
    /// Fee percentage must be < 100
    InvalidFeePercentage = 6,
    /// A listing or auction already exists for this asset
    AlreadyActive = 7,
    /// No active listing or auction for this asset
    NotActive = 8,
    /// Not the seller
    NotSeller = 9,
    /// Seller cannot buy or bid on their own sale
    CannotBuyOwnListing = 10,
    /// Bid below the start price or the current highest bid
    BidTooLow = 11,
    /// Bid placed at or after the auction deadline
    AuctionWindowClosed = 12,
    /// Auction cannot be ended before its deadline
    AuctionStillOpen = 13,
    /// Collection contract rejected the asset transfer
    TransferFailed = 14,
    /// Token contract rejected the payment
    PaymentFailed = 15,
    /// Reentrancy detected
    ReentrancyDetected = 16,
}

// ============================================================================
// External Interfaces
// ============================================================================

/// Interface of the collection contracts the marketplace escrows assets
/// from. Any contract exposing this transfer entry point can be listed.
#[contractclient(name = "CollectionClient")]
pub trait Collection {
    fn transfer(env: Env, from: Address, to: Address, token_id: u32);
}

// ============================================================================
// Data Types
// ============================================================================

/// Identifies one asset within one collection. At most one Listing or one
/// Auction exists per key at any time, never both.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetKey {
    pub collection: Address,
    pub token_id: u32,
}

/// A fixed-price sale. The asset is in marketplace custody while the
/// record exists; purchase and cancellation delete it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Listing {
    pub collection: Address,
    pub token_id: u32,
    pub seller: Address,
    pub price: i128,
    pub payment_token: Address,
    pub listed_at: u64,
}

/// An English auction. While the record exists the marketplace escrows the
/// asset and exactly `highest_bid` of `payment_token`, owed either to a
/// future outbid refund or to the seller payout.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Auction {
    pub collection: Address,
    pub token_id: u32,
    pub seller: Address,
    pub start_price: i128,
    pub highest_bid: i128,
    pub highest_bidder: Option<Address>,
    pub payment_token: Address,
    pub started_at: u64,
    pub ends_at: u64,
}

/// Storage keys
#[contracttype]
pub enum DataKey {
    /// Admin address
    Admin,
    /// Marketplace fee percentage (integer percent, < 100)
    FeePercentage,
    /// Fee recipient address
    FeeRecipient,
    /// Listing data (asset key -> Listing)
    Listing(AssetKey),
    /// Auction data (asset key -> Auction)
    Auction(AssetKey),
    /// All active listing keys
    ActiveListings,
    /// All active auction keys
    ActiveAuctions,
    /// Reentrancy guard
    ReentrancyGuard,
}

// ============================================================================
// Storage Module
// ============================================================================

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

    pub fn set_fee_percentage(e: &Env, fee: u32) {
        e.storage().instance().set(&DataKey::FeePercentage, &fee);
    }

    pub fn get_fee_percentage(e: &Env) -> u32 {
        e.storage()
            .instance()
            .get(&DataKey::FeePercentage)
            .unwrap_or(0)
    }

    pub fn set_fee_recipient(e: &Env, recipient: &Address) {
        e.storage().instance().set(&DataKey::FeeRecipient, recipient);
    }

    pub fn get_fee_recipient(e: &Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::FeeRecipient)
    }

    // --- Listings ---

    pub fn has_listing(e: &Env, key: &AssetKey) -> bool {
        e.storage().persistent().has(&DataKey::Listing(key.clone()))
    }

    pub fn set_listing(e: &Env, key: &AssetKey, listing: &Listing) {
        e.storage()
            .persistent()
            .set(&DataKey::Listing(key.clone()), listing);
    }

    pub fn get_listing(e: &Env, key: &AssetKey) -> Option<Listing> {
        e.storage().persistent().get(&DataKey::Listing(key.clone()))
    }

    pub fn remove_listing(e: &Env, key: &AssetKey) {
        e.storage()
            .persistent()
            .remove(&DataKey::Listing(key.clone()));
    }

    // --- Auctions ---

    pub fn has_auction(e: &Env, key: &AssetKey) -> bool {
        e.storage().persistent().has(&DataKey::Auction(key.clone()))
    }

    pub fn set_auction(e: &Env, key: &AssetKey, auction: &Auction) {
        e.storage()
            .persistent()
            .set(&DataKey::Auction(key.clone()), auction);
    }

    pub fn get_auction(e: &Env, key: &AssetKey) -> Option<Auction> {
        e.storage().persistent().get(&DataKey::Auction(key.clone()))
    }

    pub fn remove_auction(e: &Env, key: &AssetKey) {
        e.storage()
            .persistent()
            .remove(&DataKey::Auction(key.clone()));
    }

    // --- Active Indexes ---

    pub fn active_listings(e: &Env) -> Vec<AssetKey> {
        e.storage()
            .instance()
            .get(&DataKey::ActiveListings)
            .unwrap_or(Vec::new(e))
    }

    pub fn add_active_listing(e: &Env, key: &AssetKey) {
        let mut keys = active_listings(e);
        keys.push_back(key.clone());
        e.storage().instance().set(&DataKey::ActiveListings, &keys);
    }

    pub fn remove_active_listing(e: &Env, key: &AssetKey) {
        let mut keys = active_listings(e);
        if let Some(index) = keys.iter().position(|k| k == *key) {
            keys.remove(index as u32);
        }
        e.storage().instance().set(&DataKey::ActiveListings, &keys);
    }

    pub fn active_auctions(e: &Env) -> Vec<AssetKey> {
        e.storage()
            .instance()
            .get(&DataKey::ActiveAuctions)
            .unwrap_or(Vec::new(e))
    }

    pub fn add_active_auction(e: &Env, key: &AssetKey) {
        let mut keys = active_auctions(e);
        keys.push_back(key.clone());
        e.storage().instance().set(&DataKey::ActiveAuctions, &keys);
    }

    pub fn remove_active_auction(e: &Env, key: &AssetKey) {
        let mut keys = active_auctions(e);
        if let Some(index) = keys.iter().position(|k| k == *key) {
            keys.remove(index as u32);
        }
        e.storage().instance().set(&DataKey::ActiveAuctions, &keys);
    }

    // --- Reentrancy Guard ---

    pub fn guard_enter(e: &Env) -> Result<(), MarketplaceError> {
        let entered: bool = e
            .storage()
            .instance()
            .get(&DataKey::ReentrancyGuard)
            .unwrap_or(false);
        if entered {
            return Err(MarketplaceError::ReentrancyDetected);
        }
        e.storage().instance().set(&DataKey::ReentrancyGuard, &true);
        Ok(())
    }

    pub fn guard_exit(e: &Env) {
        e.storage().instance().set(&DataKey::ReentrancyGuard, &false);
    }
}

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct NftMarketplace;

#[contractimpl]
impl NftMarketplace {
    // ========================================================================
    // Initialization & Administration
    // ========================================================================

    /// Initialize the marketplace
    ///
    /// # Arguments
    /// * `admin` - Admin address, the only caller allowed to change the fee
    /// * `fee_percentage` - Marketplace cut of final sale price (integer
    ///   percent, must be < 100)
    /// * `fee_recipient` - Address that receives the marketplace cut
    pub fn initialize(
        e: Env,
        admin: Address,
        fee_percentage: u32,
        fee_recipient: Address,
    ) -> Result<(), MarketplaceError> {
        if storage::has_admin(&e) {
            return Err(MarketplaceError::AlreadyInitialized);
        }

        admin.require_auth();

        if fee_percentage >= 100 {
            return Err(MarketplaceError::InvalidFeePercentage);
        }

        storage::set_admin(&e, &admin);
        storage::set_fee_percentage(&e, fee_percentage);
        storage::set_fee_recipient(&e, &fee_recipient);

        let empty: Vec<AssetKey> = Vec::new(&e);
        e.storage().instance().set(&DataKey::ActiveListings, &empty);
        e.storage().instance().set(&DataKey::ActiveAuctions, &empty);

        Ok(())
    }

    /// Get admin address
    pub fn get_admin(e: Env) -> Result<Address, MarketplaceError> {
        storage::get_admin(&e).ok_or(MarketplaceError::NotInitialized)
    }

    /// Get the current fee percentage
    pub fn get_fee_percentage(e: Env) -> u32 {
        storage::get_fee_percentage(&e)
    }

    /// Update the marketplace fee percentage (admin only)
    ///
    /// Applies to future settlements; escrowed amounts of in-flight
    /// auctions are untouched.
    pub fn set_fee_percentage(
        e: Env,
        caller: Address,
        new_fee: u32,
    ) -> Result<(), MarketplaceError> {
        caller.require_auth();

        let admin = storage::get_admin(&e).ok_or(MarketplaceError::NotInitialized)?;
        if caller != admin {
            return Err(MarketplaceError::Unauthorized);
        }
        if new_fee >= 100 {
            return Err(MarketplaceError::InvalidFeePercentage);
        }

        storage::set_fee_percentage(&e, new_fee);

        e.events().publish((symbol_short!("FeeSet"),), new_fee);

        Ok(())
    }

    // ========================================================================
    // Fixed-Price Listings
    // ========================================================================

    /// List an NFT for sale at a fixed price
    ///
    /// Moves the asset from the seller into marketplace custody. Fails with
    /// `AlreadyActive` if any sale is live for this asset, and with
    /// `TransferFailed` if the collection rejects the custody transfer
    /// (e.g. the seller does not own the token).
    ///
    /// # Arguments
    /// * `seller` - Current owner of the asset
    /// * `collection` - Collection contract the asset belongs to
    /// * `token_id` - Asset identifier within the collection
    /// * `price` - Sale price, must be > 0
    /// * `payment_token` - Token contract the sale settles in
    pub fn list_nft(
        e: Env,
        seller: Address,
        collection: Address,
        token_id: u32,
        price: i128,
        payment_token: Address,
    ) -> Result<(), MarketplaceError> {
        storage::guard_enter(&e)?;
        let result = Self::do_list_nft(&e, seller, collection, token_id, price, payment_token);
        storage::guard_exit(&e);
        result
    }

    /// Cancel a listing and return the asset to the seller
    pub fn cancel_listing(
        e: Env,
        seller: Address,
        collection: Address,
        token_id: u32,
    ) -> Result<(), MarketplaceError> {
        storage::guard_enter(&e)?;
        let result = Self::do_cancel_listing(&e, seller, collection, token_id);
        storage::guard_exit(&e);
        result
    }

    /// Buy a listed NFT at its asking price
    ///
    /// Pays the seller net of the marketplace fee and releases the asset
    /// from escrow to the buyer. All-or-nothing: a failed payment or asset
    /// transfer aborts the purchase with the listing intact.
    pub fn buy_nft(
        e: Env,
        buyer: Address,
        collection: Address,
        token_id: u32,
    ) -> Result<(), MarketplaceError> {
        storage::guard_enter(&e)?;
        let result = Self::do_buy_nft(&e, buyer, collection, token_id);
        storage::guard_exit(&e);
        result
    }

    /// Get a listing
    pub fn get_listing(
        e: Env,
        collection: Address,
        token_id: u32,
    ) -> Result<Listing, MarketplaceError> {
        let key = AssetKey {
            collection,
            token_id,
        };
        storage::get_listing(&e, &key).ok_or(MarketplaceError::NotActive)
    }

    /// Get all active listings
    pub fn get_all_listings(e: Env) -> Vec<Listing> {
        let mut listings: Vec<Listing> = Vec::new(&e);
        for key in storage::active_listings(&e).iter() {
            if let Some(listing) = storage::get_listing(&e, &key) {
                listings.push_back(listing);
            }
        }
        listings
    }

    // ========================================================================
    // Auctions
    // ========================================================================

    /// Start an English auction
    ///
    /// Moves the asset into marketplace custody for the duration of the
    /// auction. The first bid must be at least `start_price`; each later
    /// bid must strictly exceed the current highest.
    ///
    /// # Arguments
    /// * `seller` - Current owner of the asset
    /// * `collection` - Collection contract the asset belongs to
    /// * `token_id` - Asset identifier within the collection
    /// * `start_price` - Minimum accepted first bid, must be > 0
    /// * `duration` - Length of the bidding window in seconds, must be > 0
    /// * `payment_token` - Token contract bids are escrowed in
    pub fn start_auction(
        e: Env,
        seller: Address,
        collection: Address,
        token_id: u32,
        start_price: i128,
        duration: u64,
        payment_token: Address,
    ) -> Result<(), MarketplaceError> {
        storage::guard_enter(&e)?;
        let result = Self::do_start_auction(
            &e,
            seller,
            collection,
            token_id,
            start_price,
            duration,
            payment_token,
        );
        storage::guard_exit(&e);
        result
    }

    /// Place a bid on an active auction
    ///
    /// Escrows the bid amount with the marketplace and refunds the outbid
    /// bidder in full. If either transfer fails the whole bid is rejected:
    /// the previous bidder stays highest and their funds stay escrowed.
    /// Bidding at or after the deadline fails with `AuctionWindowClosed`.
    pub fn place_bid(
        e: Env,
        bidder: Address,
        collection: Address,
        token_id: u32,
        amount: i128,
    ) -> Result<(), MarketplaceError> {
        storage::guard_enter(&e)?;
        let result = Self::do_place_bid(&e, bidder, collection, token_id, amount);
        storage::guard_exit(&e);
        result
    }

    /// End an auction at or after its deadline
    ///
    /// Callable by anyone once due. With a winner, pays the seller the
    /// highest bid net of the fee taken at the current fee percentage and
    /// transfers the asset to the winner; with no bids, returns the asset
    /// to the seller. Either way the auction record is deleted and the
    /// asset key can host a new sale. A failed payout leaves the auction
    /// intact so settlement can be retried.
    pub fn end_auction(
        e: Env,
        collection: Address,
        token_id: u32,
    ) -> Result<(), MarketplaceError> {
        storage::guard_enter(&e)?;
        let result = Self::do_end_auction(&e, collection, token_id);
        storage::guard_exit(&e);
        result
    }

    /// Get auction details
    pub fn get_auction(
        e: Env,
        collection: Address,
        token_id: u32,
    ) -> Result<Auction, MarketplaceError> {
        let key = AssetKey {
            collection,
            token_id,
        };
        storage::get_auction(&e, &key).ok_or(MarketplaceError::NotActive)
    }

    /// Get all active auctions
    pub fn get_all_auctions(e: Env) -> Vec<Auction> {
        let mut auctions: Vec<Auction> = Vec::new(&e);
        for key in storage::active_auctions(&e).iter() {
            if let Some(auction) = storage::get_auction(&e, &key) {
                auctions.push_back(auction);
            }
        }
        auctions
    }
}

// ============================================================================
// Internal Logic
// ============================================================================

impl NftMarketplace {
    fn do_list_nft(
        e: &Env,
        seller: Address,
        collection: Address,
        token_id: u32,
        price: i128,
        payment_token: Address,
    ) -> Result<(), MarketplaceError> {
        seller.require_auth();

        if !storage::has_admin(e) {
            return Err(MarketplaceError::NotInitialized);
        }
        if price <= 0 {
            return Err(MarketplaceError::InvalidPrice);
        }

        let key = AssetKey {
            collection: collection.clone(),
            token_id,
        };
        Self::require_no_active_sale(e, &key)?;

        Self::take_custody(e, &collection, &seller, token_id)?;

        let listing = Listing {
            collection: collection.clone(),
            token_id,
            seller: seller.clone(),
            price,
            payment_token: payment_token.clone(),
            listed_at: e.ledger().timestamp(),
        };
        storage::set_listing(e, &key, &listing);
        storage::add_active_listing(e, &key);

        e.events().publish(
            (symbol_short!("Listed"), collection, token_id),
            (seller, price, payment_token),
        );

        Ok(())
    }

    fn do_cancel_listing(
        e: &Env,
        seller: Address,
        collection: Address,
        token_id: u32,
    ) -> Result<(), MarketplaceError> {
        seller.require_auth();

        let key = AssetKey {
            collection: collection.clone(),
            token_id,
        };
        let listing = storage::get_listing(e, &key).ok_or(MarketplaceError::NotActive)?;

        if listing.seller != seller {
            return Err(MarketplaceError::NotSeller);
        }

        storage::remove_listing(e, &key);
        storage::remove_active_listing(e, &key);

        Self::release_custody(e, &collection, &seller, token_id)?;

        e.events().publish(
            (symbol_short!("ListCncl"), collection, token_id),
            seller,
        );

        Ok(())
    }

    fn do_buy_nft(
        e: &Env,
        buyer: Address,
        collection: Address,
        token_id: u32,
    ) -> Result<(), MarketplaceError> {
        buyer.require_auth();

        let key = AssetKey {
            collection: collection.clone(),
            token_id,
        };
        let listing = storage::get_listing(e, &key).ok_or(MarketplaceError::NotActive)?;

        if listing.seller == buyer {
            return Err(MarketplaceError::CannotBuyOwnListing);
        }

        let fee_recipient =
            storage::get_fee_recipient(e).ok_or(MarketplaceError::NotInitialized)?;
        let fee = Self::fee_amount(listing.price, storage::get_fee_percentage(e));
        let proceeds = listing.price - fee;

        storage::remove_listing(e, &key);
        storage::remove_active_listing(e, &key);

        Self::send_payment(e, &listing.payment_token, &buyer, &listing.seller, proceeds)?;
        if fee > 0 {
            Self::send_payment(e, &listing.payment_token, &buyer, &fee_recipient, fee)?;
        }
        Self::release_custody(e, &collection, &buyer, token_id)?;

        e.events().publish(
            (symbol_short!("Sold"), collection, token_id),
            (listing.seller, buyer, listing.price),
        );

        Ok(())
    }

    fn do_start_auction(
        e: &Env,
        seller: Address,
        collection: Address,
        token_id: u32,
        start_price: i128,
        duration: u64,
        payment_token: Address,
    ) -> Result<(), MarketplaceError> {
        seller.require_auth();

        if !storage::has_admin(e) {
            return Err(MarketplaceError::NotInitialized);
        }
        if start_price <= 0 {
            return Err(MarketplaceError::InvalidPrice);
        }
        if duration == 0 {
            return Err(MarketplaceError::InvalidDuration);
        }

        let key = AssetKey {
            collection: collection.clone(),
            token_id,
        };
        Self::require_no_active_sale(e, &key)?;

        Self::take_custody(e, &collection, &seller, token_id)?;

        let started_at = e.ledger().timestamp();
        let ends_at = started_at + duration;

        let auction = Auction {
            collection: collection.clone(),
            token_id,
            seller: seller.clone(),
            start_price,
            highest_bid: 0,
            highest_bidder: None,
            payment_token,
            started_at,
            ends_at,
        };
        storage::set_auction(e, &key, &auction);
        storage::add_active_auction(e, &key);

        e.events().publish(
            (symbol_short!("AucStart"), collection, token_id),
            (seller, start_price, ends_at),
        );

        Ok(())
    }

    fn do_place_bid(
        e: &Env,
        bidder: Address,
        collection: Address,
        token_id: u32,
        amount: i128,
    ) -> Result<(), MarketplaceError> {
        bidder.require_auth();

        let key = AssetKey {
            collection: collection.clone(),
            token_id,
        };
        let mut auction = storage::get_auction(e, &key).ok_or(MarketplaceError::NotActive)?;

        if e.ledger().timestamp() >= auction.ends_at {
            return Err(MarketplaceError::AuctionWindowClosed);
        }
        if bidder == auction.seller {
            return Err(MarketplaceError::CannotBuyOwnListing);
        }
        match auction.highest_bidder {
            // First bid must meet the start price; later bids must beat the
            // current highest.
            None => {
                if amount < auction.start_price {
                    return Err(MarketplaceError::BidTooLow);
                }
            }
            Some(_) => {
                if amount <= auction.highest_bid {
                    return Err(MarketplaceError::BidTooLow);
                }
            }
        }

        let previous_bidder = auction.highest_bidder.clone();
        let previous_bid = auction.highest_bid;

        auction.highest_bidder = Some(bidder.clone());
        auction.highest_bid = amount;
        storage::set_auction(e, &key, &auction);

        // Escrow the new bid, then release the outbid one. A failure on
        // either leg rejects the whole bid and reverts the record above.
        let marketplace = e.current_contract_address();
        Self::send_payment(e, &auction.payment_token, &bidder, &marketplace, amount)?;
        if let Some(prev_bidder) = previous_bidder {
            Self::send_payment(e, &auction.payment_token, &marketplace, &prev_bidder, previous_bid)?;
        }

        e.events().publish(
            (symbol_short!("BidPlaced"), collection, token_id),
            (bidder, amount),
        );

        Ok(())
    }

    fn do_end_auction(
        e: &Env,
        collection: Address,
        token_id: u32,
    ) -> Result<(), MarketplaceError> {
        let key = AssetKey {
            collection: collection.clone(),
            token_id,
        };
        let auction = storage::get_auction(e, &key).ok_or(MarketplaceError::NotActive)?;

        if e.ledger().timestamp() < auction.ends_at {
            return Err(MarketplaceError::AuctionStillOpen);
        }

        storage::remove_auction(e, &key);
        storage::remove_active_auction(e, &key);

        let marketplace = e.current_contract_address();
        match auction.highest_bidder {
            Some(winner) => {
                let fee_recipient =
                    storage::get_fee_recipient(e).ok_or(MarketplaceError::NotInitialized)?;
                // Fee rate is read at settlement time, not bid time.
                let fee = Self::fee_amount(auction.highest_bid, storage::get_fee_percentage(e));
                let proceeds = auction.highest_bid - fee;

                Self::send_payment(
                    e,
                    &auction.payment_token,
                    &marketplace,
                    &auction.seller,
                    proceeds,
                )?;
                if fee > 0 {
                    Self::send_payment(
                        e,
                        &auction.payment_token,
                        &marketplace,
                        &fee_recipient,
                        fee,
                    )?;
                }
                Self::release_custody(e, &collection, &winner, token_id)?;

                e.events().publish(
                    (symbol_short!("AucEnd"), collection, token_id),
                    (auction.seller, winner, auction.highest_bid),
                );
            }
            None => {
                // No bids: the asset goes back to the seller.
                Self::release_custody(e, &collection, &auction.seller, token_id)?;

                e.events().publish(
                    (symbol_short!("AucNoBid"), collection, token_id),
                    auction.seller,
                );
            }
        }

        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn require_no_active_sale(e: &Env, key: &AssetKey) -> Result<(), MarketplaceError> {
        if storage::has_listing(e, key) || storage::has_auction(e, key) {
            return Err(MarketplaceError::AlreadyActive);
        }
        Ok(())
    }

    /// Move the asset from `from` into marketplace custody.
    fn take_custody(
        e: &Env,
        collection: &Address,
        from: &Address,
        token_id: u32,
    ) -> Result<(), MarketplaceError> {
        let client = CollectionClient::new(e, collection);
        if client
            .try_transfer(from, &e.current_contract_address(), &token_id)
            .is_err()
        {
            return Err(MarketplaceError::TransferFailed);
        }
        Ok(())
    }

    /// Release the asset from marketplace custody to `to`.
    fn release_custody(
        e: &Env,
        collection: &Address,
        to: &Address,
        token_id: u32,
    ) -> Result<(), MarketplaceError> {
        let client = CollectionClient::new(e, collection);
        if client
            .try_transfer(&e.current_contract_address(), to, &token_id)
            .is_err()
        {
            return Err(MarketplaceError::TransferFailed);
        }
        Ok(())
    }

    fn send_payment(
        e: &Env,
        payment_token: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), MarketplaceError> {
        let client = token::Client::new(e, payment_token);
        if client.try_transfer(from, to, &amount).is_err() {
            return Err(MarketplaceError::PaymentFailed);
        }
        Ok(())
    }

    fn fee_amount(amount: i128, fee_percentage: u32) -> i128 {
        amount * fee_percentage as i128 / 100
    }
}
