use soroban_sdk::{contractclient, contracttype, Address, Env};

/// Read contract every price feed bound in the farm has to answer.
///
/// Prices are quoted in a common reference unit for one whole unit of the
/// token and carry `decimals()` fractional digits, the way aggregator feeds
/// report them.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeedInterface {
    fn current_price(env: Env, token: Address) -> i128;

    fn decimals(env: Env) -> u32;
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenPrice {
    /// Price of one whole token unit, scaled by `10^decimals`
    pub price: i128,
    /// Number of fractional digits carried by `price`
    pub decimals: u32,
}
