//! End-to-End Flow Tests
//!
//! Complete sale journeys through the marketplace: asset escrow, payment
//! settlement, fee collection, and final custody verification.

use crate::harness::{TestHarness, DEFAULT_USER_BALANCE, SECONDS_PER_DAY, SECONDS_PER_HOUR};

/// Test: complete fixed-price sale (list -> buy -> custody and payout)
#[test]
fn test_e2e_fixed_price_sale_lifecycle() {
    let harness = TestHarness::new();
    let seller = &harness.accounts.seller;
    let buyer = &harness.accounts.buyer;
    let price = 50_000i128;

    let token_id = harness.mint_nft(seller);

    // ========== PHASE 1: LISTING ==========
    harness.marketplace().list_nft(
        seller,
        &harness.contracts.collection,
        &token_id,
        &price,
        &harness.contracts.token,
    );

    assert_eq!(harness.nft_owner(token_id), harness.contracts.marketplace);
    assert_eq!(harness.marketplace().get_all_listings().len(), 1);

    // ========== PHASE 2: PURCHASE ==========
    harness
        .marketplace()
        .buy_nft(buyer, &harness.contracts.collection, &token_id);

    // ========== PHASE 3: SETTLEMENT VERIFICATION ==========
    // 2% fee on 50_000 is 1_000
    assert_eq!(harness.nft_owner(token_id), *buyer);
    assert_eq!(harness.balance(seller), 49_000);
    assert_eq!(harness.balance(&harness.accounts.fee_recipient), 1_000);
    assert_eq!(harness.balance(buyer), DEFAULT_USER_BALANCE - 50_000);
    assert_eq!(harness.marketplace().get_all_listings().len(), 0);
}

/// Test: complete auction (start -> competing bids -> settlement)
///
/// Walks the canonical sequence: a 150 bid is accepted, 140 is rejected as
/// too low, 200 outbids with an exact refund of the 150, and settlement at
/// a 2% fee pays the seller 196.
#[test]
fn test_e2e_auction_lifecycle() {
    let harness = TestHarness::new();
    let seller = &harness.accounts.seller;
    let bidder1 = &harness.accounts.bidder1;
    let bidder2 = &harness.accounts.bidder2;

    let token_id = harness.mint_nft(seller);

    // ========== PHASE 1: AUCTION START ==========
    harness.marketplace().start_auction(
        seller,
        &harness.contracts.collection,
        &token_id,
        &100,
        &SECONDS_PER_HOUR,
        &harness.contracts.token,
    );

    assert_eq!(harness.nft_owner(token_id), harness.contracts.marketplace);

    // ========== PHASE 2: BIDDING ==========
    harness
        .marketplace()
        .place_bid(bidder1, &harness.contracts.collection, &token_id, &150);
    assert_eq!(harness.balance(&harness.contracts.marketplace), 150);

    // 140 does not beat the current highest bid
    let low_bid = harness
        .marketplace()
        .try_place_bid(bidder2, &harness.contracts.collection, &token_id, &140);
    assert!(low_bid.is_err());

    harness
        .marketplace()
        .place_bid(bidder2, &harness.contracts.collection, &token_id, &200);

    // bidder1 was refunded in full and escrow tracks the new highest bid
    assert_eq!(harness.balance(bidder1), DEFAULT_USER_BALANCE);
    assert_eq!(harness.balance(bidder2), DEFAULT_USER_BALANCE - 200);
    assert_eq!(harness.balance(&harness.contracts.marketplace), 200);

    // ========== PHASE 3: SETTLEMENT ==========
    harness.advance_time(SECONDS_PER_HOUR);
    harness
        .marketplace()
        .end_auction(&harness.contracts.collection, &token_id);

    // 2% fee on 200 is 4
    assert_eq!(harness.nft_owner(token_id), *bidder2);
    assert_eq!(harness.balance(seller), 196);
    assert_eq!(harness.balance(&harness.accounts.fee_recipient), 4);
    assert_eq!(harness.balance(&harness.contracts.marketplace), 0);
    assert_eq!(harness.marketplace().get_all_auctions().len(), 0);
}

/// Test: a listing and an auction on different assets settle independently
#[test]
fn test_e2e_concurrent_sales_settle_independently() {
    let harness = TestHarness::new();
    let seller = &harness.accounts.seller;
    let buyer = &harness.accounts.buyer;
    let bidder = &harness.accounts.bidder1;

    let listed_token = harness.mint_nft(seller);
    let auctioned_token = harness.mint_nft(seller);

    harness.marketplace().list_nft(
        seller,
        &harness.contracts.collection,
        &listed_token,
        &10_000,
        &harness.contracts.token,
    );
    harness.marketplace().start_auction(
        seller,
        &harness.contracts.collection,
        &auctioned_token,
        &500,
        &SECONDS_PER_DAY,
        &harness.contracts.token,
    );

    assert_eq!(harness.marketplace().get_all_listings().len(), 1);
    assert_eq!(harness.marketplace().get_all_auctions().len(), 1);

    harness
        .marketplace()
        .place_bid(bidder, &harness.contracts.collection, &auctioned_token, &500);

    // Settling the listing leaves the auction untouched
    harness
        .marketplace()
        .buy_nft(buyer, &harness.contracts.collection, &listed_token);
    assert_eq!(harness.nft_owner(listed_token), *buyer);
    assert_eq!(harness.balance(&harness.contracts.marketplace), 500);

    harness.advance_time(SECONDS_PER_DAY);
    harness
        .marketplace()
        .end_auction(&harness.contracts.collection, &auctioned_token);

    assert_eq!(harness.nft_owner(auctioned_token), *bidder);
    assert_eq!(harness.marketplace().get_all_listings().len(), 0);
    assert_eq!(harness.marketplace().get_all_auctions().len(), 0);
    // Fees from both settlements: 2% of 10_000 plus 2% of 500
    assert_eq!(harness.balance(&harness.accounts.fee_recipient), 210);
}

/// Test: cancel a listing, re-auction the same asset, no bids, asset returns
#[test]
fn test_e2e_cancel_then_unsold_auction_returns_asset() {
    let harness = TestHarness::new();
    let seller = &harness.accounts.seller;

    let token_id = harness.mint_nft(seller);

    harness.marketplace().list_nft(
        seller,
        &harness.contracts.collection,
        &token_id,
        &10_000,
        &harness.contracts.token,
    );
    harness
        .marketplace()
        .cancel_listing(seller, &harness.contracts.collection, &token_id);
    assert_eq!(harness.nft_owner(token_id), *seller);

    // The cancelled key is free for a new sale mode
    harness.marketplace().start_auction(
        seller,
        &harness.contracts.collection,
        &token_id,
        &1_000,
        &SECONDS_PER_HOUR,
        &harness.contracts.token,
    );
    assert_eq!(harness.nft_owner(token_id), harness.contracts.marketplace);

    harness.advance_time(SECONDS_PER_HOUR);
    harness
        .marketplace()
        .end_auction(&harness.contracts.collection, &token_id);

    // No bids were placed, so custody goes back to the seller
    assert_eq!(harness.nft_owner(token_id), *seller);
    assert_eq!(harness.balance(seller), 0);
    assert_eq!(harness.balance(&harness.contracts.marketplace), 0);
}

/// Test: fee changes between bid and settlement are applied at settlement
#[test]
fn test_e2e_fee_change_mid_auction() {
    let harness = TestHarness::new();
    let seller = &harness.accounts.seller;
    let bidder = &harness.accounts.bidder1;

    let token_id = harness.mint_nft(seller);

    harness.marketplace().start_auction(
        seller,
        &harness.contracts.collection,
        &token_id,
        &100,
        &SECONDS_PER_HOUR,
        &harness.contracts.token,
    );
    harness
        .marketplace()
        .place_bid(bidder, &harness.contracts.collection, &token_id, &1_000);

    harness
        .marketplace()
        .set_fee_percentage(&harness.accounts.admin, &10);

    harness.advance_time(SECONDS_PER_HOUR);
    harness
        .marketplace()
        .end_auction(&harness.contracts.collection, &token_id);

    // Settled at 10%, not the 2% in force when the bid was placed
    assert_eq!(harness.balance(seller), 900);
    assert_eq!(harness.balance(&harness.accounts.fee_recipient), 100);
}
