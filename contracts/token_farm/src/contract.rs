use farm::oracle::TokenPrice;
use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, Env, Vec};

use crate::{
    error::ContractError,
    msg::{ConfigResponse, StakedBalance, StakedResponse},
    ownership::require_owner,
    rewards,
    storage::{
        get_allowed_tokens, get_balance, get_config, get_owner, get_price_feed,
        get_staked_tokens, get_staker, get_staker_count, push_staker, save_balance,
        save_config, save_owner, save_price_feed, save_staked_tokens, Config,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Token Farm staking ledger with price feed valuation and reward issuance"
);

#[contract]
pub struct TokenFarm;

pub trait TokenFarmTrait {
    // Binds (or rebinds) the price feed used to value `token`, whitelisting it for staking.
    // Owner only.
    fn set_price_feed_contract(
        env: Env,
        sender: Address,
        token: Address,
        price_feed: Address,
    ) -> Result<(), ContractError>;

    fn transfer_ownership(
        env: Env,
        sender: Address,
        new_owner: Address,
    ) -> Result<(), ContractError>;

    // Moves `amount` of a whitelisted `token` from `sender` into the farm and credits it.
    fn stake(env: Env, sender: Address, token: Address, amount: i128)
        -> Result<(), ContractError>;

    // Pays each staker its total staked value in the reward token. Owner only.
    fn issue_rewards(env: Env, sender: Address) -> Result<(), ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Result<ConfigResponse, ContractError>;

    fn query_owner(env: Env) -> Result<Address, ContractError>;

    fn query_price_feed(env: Env, token: Address) -> Option<Address>;

    fn query_allowed_tokens(env: Env) -> Vec<Address>;

    fn query_balance(env: Env, staker: Address, token: Address) -> i128;

    fn query_unique_token_count(env: Env, staker: Address) -> u32;

    fn query_staked(env: Env, staker: Address) -> StakedResponse;

    fn query_staker(env: Env, index: u32) -> Result<Address, ContractError>;

    fn query_staker_count(env: Env) -> u32;

    fn query_token_price(env: Env, token: Address) -> Result<TokenPrice, ContractError>;

    fn query_single_token_value(
        env: Env,
        staker: Address,
        token: Address,
    ) -> Result<i128, ContractError>;

    fn query_total_value(env: Env, staker: Address) -> Result<i128, ContractError>;
}

#[contractimpl]
impl TokenFarm {
    // `price_feeds` holds the initial (token, price feed) bindings.
    pub fn __constructor(
        env: Env,
        owner: Address,
        reward_token: Address,
        price_feeds: Vec<(Address, Address)>,
    ) {
        save_owner(&env, &owner);
        save_config(&env, &Config { reward_token });

        for (token, price_feed) in price_feeds.iter() {
            save_price_feed(&env, &token, &price_feed);
        }

        env.events().publish(("initialize", "owner"), &owner);
        env.events()
            .publish(("initialize", "allowed tokens"), get_allowed_tokens(&env));
    }
}

#[contractimpl]
impl TokenFarmTrait for TokenFarm {
    fn set_price_feed_contract(
        env: Env,
        sender: Address,
        token: Address,
        price_feed: Address,
    ) -> Result<(), ContractError> {
        require_owner(&env, &sender)?;

        let newly_allowed = save_price_feed(&env, &token, &price_feed);

        env.events().publish(("set_price_feed", "token"), &token);
        env.events()
            .publish(("set_price_feed", "price_feed"), &price_feed);
        env.events()
            .publish(("set_price_feed", "newly_allowed"), newly_allowed);

        Ok(())
    }

    fn transfer_ownership(
        env: Env,
        sender: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        require_owner(&env, &sender)?;

        save_owner(&env, &new_owner);

        env.events()
            .publish(("transfer_ownership", "previous_owner"), &sender);
        env.events()
            .publish(("transfer_ownership", "new_owner"), &new_owner);

        Ok(())
    }

    fn stake(
        env: Env,
        sender: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        sender.require_auth();

        if amount <= 0 {
            log!(
                &env,
                "TokenFarm: Stake: amount must be bigger than 0, got {}",
                amount
            );
            return Err(ContractError::InvalidAmount);
        }

        if get_price_feed(&env, &token).is_none() {
            log!(&env, "TokenFarm: Stake: {} is not whitelisted", token);
            return Err(ContractError::TokenNotWhitelisted);
        }

        let balance = get_balance(&env, &sender, &token);
        let new_balance = balance.checked_add(amount).ok_or_else(|| {
            log!(
                &env,
                "TokenFarm: Stake: balance {} plus {} overflows",
                balance,
                amount
            );
            ContractError::ArithmeticOverflow
        })?;

        let token_client = token::Client::new(&env, &token);
        if !matches!(
            token_client.try_transfer(&sender, &env.current_contract_address(), &amount),
            Ok(Ok(()))
        ) {
            log!(
                &env,
                "TokenFarm: Stake: transfer of {} {} from {} failed",
                amount,
                token,
                sender
            );
            return Err(ContractError::TransferFailed);
        }

        save_balance(&env, &sender, &token, new_balance);

        if balance == 0 {
            let mut staked_tokens = get_staked_tokens(&env, &sender);
            // a staker without any staked token has never staked, so it joins the roster now
            if staked_tokens.is_empty() {
                let index = push_staker(&env, &sender)?;
                env.events()
                    .publish(("stake", "new_staker"), (sender.clone(), index));
            }
            staked_tokens.push_back(token.clone());
            save_staked_tokens(&env, &sender, &staked_tokens);
        }

        env.events().publish(("stake", "user"), &sender);
        env.events().publish(("stake", "token"), &token);
        env.events().publish(("stake", "amount"), amount);

        Ok(())
    }

    fn issue_rewards(env: Env, sender: Address) -> Result<(), ContractError> {
        require_owner(&env, &sender)?;

        let config = get_config(&env)?;
        let issued = rewards::issue_rewards(&env, &config.reward_token)?;

        env.events()
            .publish(("issue_rewards", "reward_token"), &config.reward_token);
        env.events().publish(("issue_rewards", "total"), issued);

        Ok(())
    }

    // QUERIES

    fn query_config(env: Env) -> Result<ConfigResponse, ContractError> {
        Ok(ConfigResponse {
            config: get_config(&env)?,
            owner: get_owner(&env)?,
        })
    }

    fn query_owner(env: Env) -> Result<Address, ContractError> {
        get_owner(&env)
    }

    fn query_price_feed(env: Env, token: Address) -> Option<Address> {
        get_price_feed(&env, &token)
    }

    fn query_allowed_tokens(env: Env) -> Vec<Address> {
        get_allowed_tokens(&env)
    }

    fn query_balance(env: Env, staker: Address, token: Address) -> i128 {
        get_balance(&env, &staker, &token)
    }

    fn query_unique_token_count(env: Env, staker: Address) -> u32 {
        get_staked_tokens(&env, &staker).len()
    }

    fn query_staked(env: Env, staker: Address) -> StakedResponse {
        let mut balances = Vec::new(&env);
        for token in get_staked_tokens(&env, &staker).iter() {
            let amount = get_balance(&env, &staker, &token);
            balances.push_back(StakedBalance { token, amount });
        }

        StakedResponse { balances }
    }

    fn query_staker(env: Env, index: u32) -> Result<Address, ContractError> {
        get_staker(&env, index).ok_or_else(|| {
            log!(
                &env,
                "TokenFarm: Query staker: index {} is past the roster length {}",
                index,
                get_staker_count(&env)
            );
            ContractError::IndexOutOfRange
        })
    }

    fn query_staker_count(env: Env) -> u32 {
        get_staker_count(&env)
    }

    fn query_token_price(env: Env, token: Address) -> Result<TokenPrice, ContractError> {
        rewards::token_price(&env, &token)
    }

    fn query_single_token_value(
        env: Env,
        staker: Address,
        token: Address,
    ) -> Result<i128, ContractError> {
        rewards::single_token_value(&env, &staker, &token)
    }

    fn query_total_value(env: Env, staker: Address) -> Result<i128, ContractError> {
        rewards::total_value(&env, &staker)
    }
}
