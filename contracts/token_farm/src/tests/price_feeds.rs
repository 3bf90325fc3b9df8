use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, vec, Address, Env};

use super::setup::{
    deploy_price_feed, deploy_token_contract, deploy_token_farm, FarmSetup, DECIMALS,
    INITIAL_PRICE_FEED_VALUE, ONE_TOKEN,
};
use crate::{error::ContractError, msg::ConfigResponse, storage::Config};

#[test]
fn initialize_with_price_feeds() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let reward_token = Address::generate(&env);
    let dai = Address::generate(&env);
    let weth = Address::generate(&env);
    let dai_usd = deploy_price_feed(&env, DECIMALS, ONE_TOKEN);
    let eth_usd = deploy_price_feed(&env, DECIMALS, INITIAL_PRICE_FEED_VALUE);

    let farm = deploy_token_farm(
        &env,
        &owner,
        &reward_token,
        vec![
            &env,
            (dai.clone(), dai_usd.address.clone()),
            (weth.clone(), eth_usd.address.clone()),
        ],
    );

    assert_eq!(
        farm.query_config(),
        ConfigResponse {
            config: Config {
                reward_token: reward_token.clone(),
            },
            owner: owner.clone(),
        }
    );
    assert_eq!(farm.query_owner(), owner);
    assert_eq!(farm.query_price_feed(&dai), Some(dai_usd.address));
    assert_eq!(farm.query_price_feed(&weth), Some(eth_usd.address));
    assert_eq!(farm.query_allowed_tokens(), vec![&env, dai, weth]);
    assert_eq!(farm.query_staker_count(), 0);
}

#[test]
fn set_price_feed_contract() {
    let setup = FarmSetup::new();
    let token = deploy_token_contract(&setup.env, &Address::generate(&setup.env));
    let dai_usd = deploy_price_feed(&setup.env, DECIMALS, ONE_TOKEN);

    setup
        .farm
        .set_price_feed_contract(&setup.owner, &token.address, &dai_usd.address);

    assert_eq!(
        setup.farm.query_price_feed(&token.address),
        Some(dai_usd.address)
    );
    assert_eq!(
        setup.farm.query_allowed_tokens(),
        vec![
            &setup.env,
            setup.reward_token.address.clone(),
            token.address.clone()
        ]
    );
}

#[test]
fn set_price_feed_contract_from_non_owner_fails() {
    let setup = FarmSetup::new();
    let non_owner = Address::generate(&setup.env);
    let other_feed = deploy_price_feed(&setup.env, DECIMALS, ONE_TOKEN);
    let new_token = Address::generate(&setup.env);

    assert_eq!(
        setup.farm.try_set_price_feed_contract(
            &non_owner,
            &setup.reward_token.address,
            &other_feed.address
        ),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        setup
            .farm
            .try_set_price_feed_contract(&non_owner, &new_token, &other_feed.address),
        Err(Ok(ContractError::Unauthorized))
    );

    assert_eq!(
        setup.farm.query_price_feed(&setup.reward_token.address),
        Some(setup.price_feed.address.clone())
    );
    assert_eq!(setup.farm.query_price_feed(&new_token), None);
    assert_eq!(
        setup.farm.query_allowed_tokens(),
        vec![&setup.env, setup.reward_token.address.clone()]
    );
}

#[test]
fn rebinding_overwrites_feed_without_duplicating_token() {
    let setup = FarmSetup::new();
    let new_feed = deploy_price_feed(&setup.env, 8, 100_000_000);

    setup.farm.set_price_feed_contract(
        &setup.owner,
        &setup.reward_token.address,
        &new_feed.address,
    );

    assert_eq!(
        setup.farm.query_price_feed(&setup.reward_token.address),
        Some(new_feed.address)
    );
    assert_eq!(
        setup.farm.query_allowed_tokens(),
        vec![&setup.env, setup.reward_token.address.clone()]
    );
}

#[test]
fn transfer_ownership_moves_owner_rights() {
    let setup = FarmSetup::new();
    let new_owner = Address::generate(&setup.env);
    let token = Address::generate(&setup.env);

    setup.farm.transfer_ownership(&setup.owner, &new_owner);
    assert_eq!(setup.farm.query_owner(), new_owner);

    assert_eq!(
        setup.farm.try_set_price_feed_contract(
            &setup.owner,
            &token,
            &setup.price_feed.address
        ),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        setup.farm.try_issue_rewards(&setup.owner),
        Err(Ok(ContractError::Unauthorized))
    );

    setup
        .farm
        .set_price_feed_contract(&new_owner, &token, &setup.price_feed.address);
    assert_eq!(
        setup.farm.query_price_feed(&token),
        Some(setup.price_feed.address.clone())
    );
}

#[test]
fn transfer_ownership_from_non_owner_fails() {
    let setup = FarmSetup::new();
    let non_owner = Address::generate(&setup.env);

    assert_eq!(
        setup.farm.try_transfer_ownership(&non_owner, &non_owner),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(setup.farm.query_owner(), setup.owner);
}

#[test]
fn transfer_ownership_to_self_keeps_owner() {
    let setup = FarmSetup::new();

    setup.farm.transfer_ownership(&setup.owner, &setup.owner);

    assert_eq!(setup.farm.query_owner(), setup.owner);
}

#[test]
fn query_token_price_reads_bound_feed() {
    let setup = FarmSetup::new();

    let price = setup.farm.query_token_price(&setup.reward_token.address);
    assert_eq!(price.price, INITIAL_PRICE_FEED_VALUE);
    assert_eq!(price.decimals, DECIMALS);

    setup.price_feed.update_price(&(1_500 * ONE_TOKEN));
    assert_eq!(
        setup
            .farm
            .query_token_price(&setup.reward_token.address)
            .price,
        1_500 * ONE_TOKEN
    );
}

#[test]
fn query_token_price_of_unbound_token_fails() {
    let setup = FarmSetup::new();
    let weth = Address::generate(&setup.env);

    assert_eq!(
        setup.farm.try_query_token_price(&weth),
        Err(Ok(ContractError::TokenNotWhitelisted))
    );
}

#[test]
fn query_token_price_rejects_non_positive_price() {
    let setup = FarmSetup::new();
    setup.price_feed.update_price(&0);

    assert_eq!(
        setup
            .farm
            .try_query_token_price(&setup.reward_token.address),
        Err(Ok(ContractError::InvalidPrice))
    );
}
