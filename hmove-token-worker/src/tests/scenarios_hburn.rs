// Copyright (c) 2022 MASSA LABS <info@massa.net>

use super::universe::{tokens, TokenTestUniverse};
use hmove_token_exports::{EventFilter, TokenController, TokenEvent};

#[test]
fn test_hburn_mint_and_burn() {
    let mut universe = TokenTestUniverse::hyper_burn();
    let owner = universe.owner.address;

    assert_eq!(universe.module_controller.name(), "HyperBurn");
    assert_eq!(universe.module_controller.symbol(), "HBurn");
    assert_eq!(universe.module_controller.decimals(), 18);
    assert!(universe.module_controller.total_supply().is_zero());
    assert!(universe
        .module_controller
        .balance_of(&universe.signer1.address)
        .is_zero());

    universe.mint(&owner, &owner, tokens("1000000000")).unwrap();
    let mint_block = universe.chain.block();
    universe.burn(&owner, &owner, tokens("500000000")).unwrap();
    let burn_block = universe.chain.block();
    assert_eq!(
        universe.module_controller.total_supply(),
        tokens("500000000")
    );

    let transfers: Vec<TokenEvent> = universe
        .module_controller
        .get_filtered_events(&EventFilter {
            start: Some(mint_block),
            ..Default::default()
        })
        .into_iter()
        .map(|e| e.event)
        .collect();
    assert_eq!(
        transfers,
        vec![
            TokenEvent::Transfer {
                from: None,
                to: Some(owner),
                amount: tokens("1000000000"),
            },
            TokenEvent::Transfer {
                from: Some(owner),
                to: None,
                amount: tokens("500000000"),
            },
        ]
    );

    universe.chain.mine();
    let current = universe.chain.block();
    let token = &universe.module_controller;
    assert_eq!(
        token.get_past_total_supply(mint_block - 1, current),
        Ok(tokens("0"))
    );
    assert_eq!(
        token.get_past_total_supply(mint_block, current),
        Ok(tokens("1000000000"))
    );
    assert_eq!(
        token.get_past_total_supply(burn_block, current),
        Ok(tokens("500000000"))
    );
    assert!(token.get_past_total_supply(current, current).is_err());
}
