use soroban_sdk::{Env, U256};

/// `10^decimals`, or `None` when it does not fit in a `u128`.
pub fn decimals_multiplier(decimals: u32) -> Option<u128> {
    10u128.checked_pow(decimals)
}

/// Value of `amount` token units priced at `price` with `decimals` fractional
/// digits, i.e. `amount * price / 10^decimals`, rounded down.
///
/// The product is computed in 256 bits, so the only way to fail is a final
/// value that does not fit into an `i128` (or a negative input).
pub fn token_value(env: &Env, amount: i128, price: i128, decimals: u32) -> Option<i128> {
    let amount = u128::try_from(amount).ok()?;
    let price = u128::try_from(price).ok()?;
    let multiplier = decimals_multiplier(decimals)?;

    let value = U256::from_u128(env, amount)
        .mul(&U256::from_u128(env, price))
        .div(&U256::from_u128(env, multiplier));

    value.to_u128().and_then(|v| i128::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const ONE: i128 = 1_000_000_000_000_000_000;

    #[test_case(0 => Some(1) ; "no decimals")]
    #[test_case(8 => Some(100_000_000) ; "eight decimals")]
    #[test_case(18 => Some(1_000_000_000_000_000_000) ; "eighteen decimals")]
    #[test_case(38 => Some(10u128.pow(38)) ; "largest power that fits")]
    #[test_case(39 => None ; "overflowing power")]
    fn multiplier(decimals: u32) -> Option<u128> {
        decimals_multiplier(decimals)
    }

    #[test_case(ONE, 2_000 * ONE, 18 => Some(2_000 * ONE) ; "one token at 2000")]
    #[test_case(ONE / 2, 2_000 * ONE, 18 => Some(1_000 * ONE) ; "half a token")]
    #[test_case(1, 2_000, 0 => Some(2_000) ; "whole units")]
    #[test_case(3, 1, 1 => Some(0) ; "rounds down")]
    #[test_case(0, 2_000 * ONE, 18 => Some(0) ; "nothing staked")]
    #[test_case(i128::MAX, 1, 0 => Some(i128::MAX) ; "largest balance at unit price")]
    #[test_case(i128::MAX, 2, 0 => None ; "value does not fit")]
    #[test_case(ONE, ONE, 39 => None ; "decimals out of range")]
    #[test_case(-1, ONE, 18 => None ; "negative amount")]
    #[test_case(ONE, -ONE, 18 => None ; "negative price")]
    fn value(amount: i128, price: i128, decimals: u32) -> Option<i128> {
        let env = Env::default();
        token_value(&env, amount, price, decimals)
    }

    #[test]
    fn large_intermediate_product_does_not_overflow() {
        let env = Env::default();
        // 1e20 tokens priced at 1e30 overflows i128 before the division
        let amount = 100 * ONE;
        let price = 1_000_000_000_000 * ONE;

        assert_eq!(
            token_value(&env, amount, price, 18),
            Some(100_000_000_000_000 * ONE)
        );
    }
}
