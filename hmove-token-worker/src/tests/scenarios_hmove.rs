// Copyright (c) 2022 MASSA LABS <info@massa.net>

use super::universe::{tokens, TokenTestUniverse};
use assert_matches::assert_matches;
use hmove_models::Address;
use hmove_token_exports::{EventFilter, TokenController, TokenError, TokenEvent};

#[test]
fn test_read_only_functions() {
    let universe = TokenTestUniverse::hyper_move();
    let token = &universe.module_controller;
    assert_eq!(token.name(), "HyperMove");
    assert_eq!(token.symbol(), "HMove");
    assert_eq!(token.decimals(), 18);
    assert_eq!(token.total_supply(), tokens("1000000000"));
    assert_eq!(
        token.balance_of(&universe.owner.address),
        tokens("1000000000")
    );
    assert_eq!(token.owner(), Some(universe.owner.address));
    assert!(!token.paused());

    let events = token.get_filtered_events(&EventFilter::default());
    assert_eq!(
        events.iter().map(|e| e.event.clone()).collect::<Vec<_>>(),
        vec![
            TokenEvent::OwnershipTransferred {
                previous_owner: None,
                new_owner: Some(universe.owner.address),
            },
            TokenEvent::Transfer {
                from: None,
                to: Some(universe.owner.address),
                amount: tokens("1000000000"),
            },
        ]
    );
}

#[test]
fn test_allowances_and_transfers() {
    let mut universe = TokenTestUniverse::hyper_move();
    let owner = universe.owner.address;
    let signer1 = universe.signer1.address;

    let ctx = universe.ctx(&owner);
    universe
        .module_controller
        .approve(&ctx, signer1, tokens("200"))
        .unwrap();
    assert_eq!(
        universe.module_controller.allowance(&owner, &signer1),
        tokens("200")
    );

    let ctx = universe.ctx(&owner);
    universe
        .module_controller
        .increase_allowance(&ctx, signer1, tokens("300"))
        .unwrap();
    assert_eq!(
        universe.module_controller.allowance(&owner, &signer1),
        tokens("500")
    );

    let ctx = universe.ctx(&owner);
    universe
        .module_controller
        .decrease_allowance(&ctx, signer1, tokens("300"))
        .unwrap();
    assert_eq!(
        universe.module_controller.allowance(&owner, &signer1),
        tokens("200")
    );
    let approvals = universe
        .module_controller
        .get_filtered_events(&EventFilter {
            involved_address: Some(signer1),
            ..Default::default()
        });
    assert_eq!(
        approvals.last().map(|e| &e.event),
        Some(&TokenEvent::Approval {
            owner,
            spender: signer1,
            amount: tokens("200"),
        })
    );

    // allowance is checked before balance
    let ctx = universe.ctx(&signer1);
    assert_matches!(
        universe
            .module_controller
            .transfer_from(&ctx, owner, signer1, tokens("400")),
        Err(TokenError::InsufficientAllowance { .. })
    );

    let ctx = universe.ctx(&signer1);
    universe
        .module_controller
        .transfer_from(&ctx, owner, signer1, tokens("100"))
        .unwrap();
    assert_eq!(
        universe.module_controller.allowance(&owner, &signer1),
        tokens("100")
    );
    assert_eq!(
        universe.module_controller.balance_of(&owner),
        tokens("999999900")
    );

    assert_matches!(
        universe.transfer(&signer1, &owner, tokens("300")),
        Err(TokenError::InsufficientBalance { .. })
    );
    universe.transfer(&signer1, &owner, tokens("100")).unwrap();
    assert_eq!(
        universe.module_controller.balance_of(&owner),
        tokens("1000000000")
    );
    assert!(universe.module_controller.balance_of(&signer1).is_zero());
}

#[test]
fn test_pause_blocks_transfers_only() {
    let mut universe = TokenTestUniverse::hyper_move();
    let owner = universe.owner.address;
    let signer1 = universe.signer1.address;

    let ctx = universe.ctx(&signer1);
    assert_matches!(
        universe.module_controller.pause(&ctx),
        Err(TokenError::Unauthorized { .. })
    );

    let ctx = universe.ctx(&owner);
    universe.module_controller.pause(&ctx).unwrap();
    assert!(universe.module_controller.paused());

    assert_matches!(
        universe.transfer(&owner, &signer1, tokens("1")),
        Err(TokenError::Paused)
    );
    let ctx = universe.ctx(&owner);
    universe
        .module_controller
        .approve(&ctx, signer1, tokens("10"))
        .unwrap();
    let ctx = universe.ctx(&signer1);
    assert_matches!(
        universe
            .module_controller
            .transfer_from(&ctx, owner, signer1, tokens("1")),
        Err(TokenError::Paused)
    );

    // supply management stays available
    universe.mint(&owner, &signer1, tokens("5")).unwrap();
    universe.burn(&owner, &signer1, tokens("5")).unwrap();

    let ctx = universe.ctx(&owner);
    assert_matches!(
        universe.module_controller.pause(&ctx),
        Err(TokenError::AlreadyInState { paused: true })
    );
    let ctx = universe.ctx(&owner);
    universe.module_controller.unpause(&ctx).unwrap();
    universe.transfer(&owner, &signer1, tokens("1")).unwrap();
}

#[test]
fn test_governance_flow() {
    let mut universe = TokenTestUniverse::hyper_move();
    let owner = universe.owner.address;
    let signer1 = universe.signer1.address;
    let signer2 = universe.signer2.address;
    let signer3 = universe.signer3.address;

    universe.transfer(&owner, &signer2, tokens("500")).unwrap();
    universe.delegate(&signer2, Some(signer1)).unwrap();
    let delegate_block = universe.chain.block();
    let changed = universe
        .module_controller
        .get_filtered_events(&EventFilter {
            start: Some(delegate_block),
            ..Default::default()
        });
    assert_eq!(
        changed[0].event,
        TokenEvent::DelegateChanged {
            delegator: signer2,
            from_delegatee: None,
            to_delegatee: Some(signer1),
        }
    );
    assert_eq!(
        universe.module_controller.delegates(&signer2),
        Some(signer1)
    );
    assert_eq!(
        universe.module_controller.get_votes(&signer1),
        tokens("500")
    );
    assert_eq!(universe.module_controller.num_checkpoints(&signer1), 1);

    universe.transfer(&owner, &signer3, tokens("700")).unwrap();
    universe.delegate(&signer3, Some(signer1)).unwrap();
    assert_eq!(universe.module_controller.num_checkpoints(&signer1), 2);
    let first = universe.module_controller.checkpoints(&signer1, 0).unwrap();
    let second = universe.module_controller.checkpoints(&signer1, 1).unwrap();
    assert_eq!(first.votes, tokens("500"));
    assert_eq!(first.from_block, delegate_block);
    assert_eq!(second.votes, tokens("1200"));

    // mint to a delegator raises its delegatee's votes
    let ctx = universe.ctx(&signer2);
    assert_matches!(
        universe
            .module_controller
            .mint(&ctx, signer2, tokens("500")),
        Err(TokenError::Unauthorized { .. })
    );
    universe.mint(&owner, &signer2, tokens("500")).unwrap();
    assert_eq!(
        universe.module_controller.balance_of(&signer2),
        tokens("1000")
    );
    assert_eq!(
        universe.module_controller.get_votes(&signer1),
        tokens("1700")
    );

    let ctx = universe.ctx(&signer2);
    assert_matches!(
        universe
            .module_controller
            .burn(&ctx, signer2, tokens("500")),
        Err(TokenError::Unauthorized { .. })
    );
    assert_matches!(
        universe.burn(&owner, &signer2, tokens("1100")),
        Err(TokenError::InsufficientBalance { .. })
    );
    let supply = universe.module_controller.total_supply();
    universe.burn(&owner, &signer2, tokens("500")).unwrap();
    assert_eq!(
        universe.module_controller.balance_of(&signer2),
        tokens("500")
    );
    assert_eq!(
        universe.module_controller.get_votes(&signer1),
        tokens("1200")
    );
    assert_eq!(
        universe.module_controller.total_supply(),
        supply.checked_sub(tokens("500")).unwrap()
    );

    let current = universe.chain.block();
    assert_matches!(
        universe
            .module_controller
            .get_past_votes(&signer1, current + 2500, current),
        Err(TokenError::SequencePointNotFinalized { .. })
    );
    assert_eq!(
        universe
            .module_controller
            .get_past_votes(&signer1, delegate_block, current),
        Ok(tokens("500"))
    );
    assert_eq!(
        universe
            .module_controller
            .get_past_votes(&signer1, delegate_block - 1, current),
        Ok(tokens("0"))
    );
    assert_eq!(universe.module_controller.nonces(&signer3), 0);
}

#[test]
fn test_permit() {
    let mut universe = TokenTestUniverse::hyper_move();
    let owner = universe.owner.clone();
    let signer1 = universe.signer1.address;
    let signer3 = universe.signer3.address;

    // deadline passed
    let deadline = universe.deadline();
    universe.chain.increase_time(18 * 60);
    let signature = universe.sign_permit(&owner, owner.address, signer3, tokens("5000"), deadline);
    let ctx = universe.ctx(&owner.address);
    assert_matches!(
        universe.module_controller.permit(
            &ctx,
            owner.address,
            signer3,
            tokens("5000"),
            deadline,
            &signature
        ),
        Err(TokenError::ExpiredDeadline { .. })
    );

    // signed by the owner on behalf of someone else
    let deadline = universe.deadline();
    let signature = universe.sign_permit(&owner, signer1, signer3, tokens("5000"), deadline);
    let ctx = universe.ctx(&owner.address);
    assert_matches!(
        universe.module_controller.permit(
            &ctx,
            signer1,
            signer3,
            tokens("5000"),
            deadline,
            &signature
        ),
        Err(TokenError::InvalidSignature(_))
    );
    assert_eq!(universe.module_controller.nonces(&signer1), 0);

    let deadline = universe.deadline();
    let signature = universe.sign_permit(&owner, owner.address, signer3, tokens("5000"), deadline);
    let ctx = universe.ctx(&owner.address);
    universe
        .module_controller
        .permit(
            &ctx,
            owner.address,
            signer3,
            tokens("5000"),
            deadline,
            &signature,
        )
        .unwrap();
    assert_eq!(
        universe
            .module_controller
            .allowance(&owner.address, &signer3),
        tokens("5000")
    );
    assert_eq!(universe.module_controller.nonces(&owner.address), 1);

    // replay
    let ctx = universe.ctx(&signer3);
    assert_matches!(
        universe.module_controller.permit(
            &ctx,
            owner.address,
            signer3,
            tokens("5000"),
            deadline,
            &signature
        ),
        Err(TokenError::InvalidSignature(_))
    );
    assert_eq!(universe.module_controller.nonces(&owner.address), 1);
}

#[test]
fn test_delegate_by_sig() {
    let mut universe = TokenTestUniverse::hyper_move();
    let owner = universe.owner.clone();
    let signer3 = universe.signer3.address;

    let expiry = universe.deadline();
    universe.chain.increase_time(18 * 60);
    let (nonce, signature) = universe.sign_delegation(&owner, Some(signer3), expiry);
    let ctx = universe.ctx(&owner.address);
    assert_matches!(
        universe
            .module_controller
            .delegate_by_sig(&ctx, Some(signer3), nonce, expiry, &signature),
        Err(TokenError::ExpiredSignature { .. })
    );

    let expiry = universe.deadline();
    let balance = universe.module_controller.balance_of(&owner.address);
    let (nonce, signature) = universe.sign_delegation(&owner, Some(signer3), expiry);
    // anyone can relay the signed delegation
    let ctx = universe.ctx(&signer3);
    universe
        .module_controller
        .delegate_by_sig(&ctx, Some(signer3), nonce, expiry, &signature)
        .unwrap();
    assert_eq!(
        universe.module_controller.delegates(&owner.address),
        Some(signer3)
    );
    assert_eq!(universe.module_controller.get_votes(&signer3), balance);
    assert_eq!(universe.module_controller.nonces(&owner.address), 1);

    let ctx = universe.ctx(&signer3);
    assert_matches!(
        universe
            .module_controller
            .delegate_by_sig(&ctx, Some(signer3), nonce, expiry, &signature),
        Err(TokenError::InvalidNonce { expected: 1, got: 0, .. })
    );
}

#[test]
fn test_ownership() {
    let mut universe = TokenTestUniverse::hyper_move();
    let owner = universe.owner.address;
    let signer1 = universe.signer1.address;

    let ctx = universe.ctx(&owner);
    universe
        .module_controller
        .transfer_ownership(&ctx, signer1)
        .unwrap();
    assert_eq!(universe.module_controller.owner(), Some(signer1));

    let ctx = universe.ctx(&owner);
    assert_matches!(
        universe.module_controller.renounce_ownership(&ctx),
        Err(TokenError::Unauthorized { .. })
    );

    let ctx = universe.ctx(&signer1);
    universe.module_controller.renounce_ownership(&ctx).unwrap();
    assert_eq!(universe.module_controller.owner(), None);
    let last = universe
        .module_controller
        .get_filtered_events(&EventFilter::default())
        .pop()
        .unwrap();
    assert_eq!(
        last.event,
        TokenEvent::OwnershipTransferred {
            previous_owner: Some(signer1),
            new_owner: None,
        }
    );

    // nobody can mint anymore
    for caller in [owner, signer1, Address::ZERO] {
        assert_matches!(
            universe.mint(&caller, &signer1, tokens("1")),
            Err(TokenError::Unauthorized { .. })
        );
    }
}
