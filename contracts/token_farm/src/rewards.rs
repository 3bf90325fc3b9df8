use farm::{
    math::token_value,
    oracle::{PriceFeedClient, TokenPrice},
};
use soroban_sdk::{log, token, Address, Env};

use crate::{
    error::ContractError,
    storage::{get_balance, get_price_feed, get_staked_tokens, get_staker, get_staker_count},
};

/// Asks the feed bound to `token` for its current price.
pub fn token_price(env: &Env, token: &Address) -> Result<TokenPrice, ContractError> {
    let price_feed = get_price_feed(env, token).ok_or_else(|| {
        log!(env, "TokenFarm: Token price: {} is not whitelisted", token);
        ContractError::TokenNotWhitelisted
    })?;
    let client = PriceFeedClient::new(env, &price_feed);

    let (price, decimals) = match (client.try_current_price(token), client.try_decimals()) {
        (Ok(Ok(price)), Ok(Ok(decimals))) => (price, decimals),
        _ => {
            log!(
                env,
                "TokenFarm: Token price: price feed {} did not answer for {}",
                price_feed,
                token
            );
            return Err(ContractError::MissingOracle);
        }
    };

    if price <= 0 {
        log!(
            env,
            "TokenFarm: Token price: price feed {} reported non-positive price {}",
            price_feed,
            price
        );
        return Err(ContractError::InvalidPrice);
    }

    Ok(TokenPrice { price, decimals })
}

/// Reference-unit value of what `staker` holds of a single `token`.
pub fn single_token_value(
    env: &Env,
    staker: &Address,
    token: &Address,
) -> Result<i128, ContractError> {
    let balance = get_balance(env, staker, token);
    if balance == 0 {
        return Ok(0);
    }

    // a staked token is always bound, so a missing binding counts as an unusable feed
    let TokenPrice { price, decimals } = token_price(env, token).map_err(|err| match err {
        ContractError::TokenNotWhitelisted => ContractError::MissingOracle,
        other => other,
    })?;

    token_value(env, balance, price, decimals).ok_or_else(|| {
        log!(
            env,
            "TokenFarm: Value: {} of {} at price {} overflows",
            balance,
            token,
            price
        );
        ContractError::ArithmeticOverflow
    })
}

/// Reference-unit value of everything `staker` has staked.
pub fn total_value(env: &Env, staker: &Address) -> Result<i128, ContractError> {
    get_staked_tokens(env, staker)
        .iter()
        .try_fold(0i128, |total, token| {
            let value = single_token_value(env, staker, &token)?;
            total.checked_add(value).ok_or_else(|| {
                log!(env, "TokenFarm: Value: total value of {} overflows", staker);
                ContractError::ArithmeticOverflow
            })
        })
}

/// Pays every staker, in roster order, its total value in `reward_token`
/// out of the contract's own balance. Stops at the first failure; the
/// caller returns the error so the host discards the payouts made so far.
pub fn issue_rewards(env: &Env, reward_token: &Address) -> Result<i128, ContractError> {
    let reward_client = token::Client::new(env, reward_token);
    let treasury = env.current_contract_address();
    let mut issued = 0i128;

    for index in 0..get_staker_count(env) {
        let staker = get_staker(env, index).ok_or_else(|| {
            log!(env, "TokenFarm: Issue rewards: roster has no entry at {}", index);
            ContractError::IndexOutOfRange
        })?;

        let reward = total_value(env, &staker)?;
        if reward == 0 {
            continue;
        }

        if !matches!(
            reward_client.try_transfer(&treasury, &staker, &reward),
            Ok(Ok(()))
        ) {
            log!(
                env,
                "TokenFarm: Issue rewards: transfer of {} to {} failed",
                reward,
                staker
            );
            return Err(ContractError::TransferFailed);
        }

        issued = issued.checked_add(reward).ok_or_else(|| {
            log!(env, "TokenFarm: Issue rewards: issued total overflows");
            ContractError::ArithmeticOverflow
        })?;

        env.events()
            .publish(("issue_rewards", "staker"), (staker, reward));
    }

    Ok(issued)
}
