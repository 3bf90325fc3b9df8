use farm::ttl::{
    INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL, PERSISTENT_RENEWAL_THRESHOLD,
    PERSISTENT_TARGET_TTL,
};
use soroban_sdk::{
    contracttype, log, symbol_short, Address, Env, IntoVal, Symbol, TryFromVal, Val, Vec,
};

use crate::error::ContractError;

pub const OWNER: Symbol = symbol_short!("OWNER");
const CONFIG: Symbol = symbol_short!("CONFIG");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token transferred to stakers by `issue_rewards`
    pub reward_token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BalanceKey {
    pub staker: Address,
    pub token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Price feed bound to a whitelisted token
    PriceFeed(Address),
    /// Whitelisted tokens in the order they were first bound
    AllowedTokens,
    Balance(BalanceKey),
    /// Distinct tokens a staker holds a balance in, in first-stake order
    StakedTokens(Address),
    StakerCount,
    Staker(u32),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

fn read_persistent<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value = env.storage().persistent().get::<_, V>(key);
    value.is_some().then(|| {
        env.storage().persistent().extend_ttl(
            key,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        )
    });

    value
}

fn write_persistent<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL);
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
    bump_instance(env);
}

pub fn get_config(env: &Env) -> Result<Config, ContractError> {
    bump_instance(env);
    env.storage().instance().get(&CONFIG).ok_or_else(|| {
        log!(env, "TokenFarm: Config not set");
        ContractError::ConfigNotSet
    })
}

pub fn save_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
    bump_instance(env);
}

pub fn get_owner(env: &Env) -> Result<Address, ContractError> {
    bump_instance(env);
    env.storage().instance().get(&OWNER).ok_or_else(|| {
        log!(env, "TokenFarm: Owner not set");
        ContractError::OwnerNotSet
    })
}

/// Binds `price_feed` to `token`, overwriting a previous binding.
/// Returns `true` when the token was not whitelisted before.
pub fn save_price_feed(env: &Env, token: &Address, price_feed: &Address) -> bool {
    let key = DataKey::PriceFeed(token.clone());
    let newly_allowed = !env.storage().persistent().has(&key);
    write_persistent(env, &key, price_feed);

    if newly_allowed {
        let mut allowed = get_allowed_tokens(env);
        allowed.push_back(token.clone());
        write_persistent(env, &DataKey::AllowedTokens, &allowed);
    }

    newly_allowed
}

pub fn get_price_feed(env: &Env, token: &Address) -> Option<Address> {
    read_persistent(env, &DataKey::PriceFeed(token.clone()))
}

pub fn get_allowed_tokens(env: &Env) -> Vec<Address> {
    read_persistent(env, &DataKey::AllowedTokens).unwrap_or_else(|| Vec::new(env))
}

pub fn get_balance(env: &Env, staker: &Address, token: &Address) -> i128 {
    let key = DataKey::Balance(BalanceKey {
        staker: staker.clone(),
        token: token.clone(),
    });
    read_persistent(env, &key).unwrap_or(0)
}

pub fn save_balance(env: &Env, staker: &Address, token: &Address, amount: i128) {
    let key = DataKey::Balance(BalanceKey {
        staker: staker.clone(),
        token: token.clone(),
    });
    write_persistent(env, &key, &amount);
}

pub fn get_staked_tokens(env: &Env, staker: &Address) -> Vec<Address> {
    read_persistent(env, &DataKey::StakedTokens(staker.clone())).unwrap_or_else(|| Vec::new(env))
}

pub fn save_staked_tokens(env: &Env, staker: &Address, tokens: &Vec<Address>) {
    write_persistent(env, &DataKey::StakedTokens(staker.clone()), tokens);
}

pub fn get_staker_count(env: &Env) -> u32 {
    read_persistent(env, &DataKey::StakerCount).unwrap_or(0)
}

pub fn get_staker(env: &Env, index: u32) -> Option<Address> {
    read_persistent(env, &DataKey::Staker(index))
}

/// Appends `staker` to the roster and returns its position.
pub fn push_staker(env: &Env, staker: &Address) -> Result<u32, ContractError> {
    let index = get_staker_count(env);
    let count = index.checked_add(1).ok_or_else(|| {
        log!(env, "TokenFarm: Stake: staker roster is full");
        ContractError::ArithmeticOverflow
    })?;

    write_persistent(env, &DataKey::Staker(index), staker);
    write_persistent(env, &DataKey::StakerCount, &count);

    Ok(index)
}
