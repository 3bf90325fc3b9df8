use soroban_sdk::{log, Address, Env};

use crate::{error::ContractError, storage::get_owner};

/// Guard for every owner-gated entry point. Nothing is written here, so a
/// rejected caller leaves the ledger untouched.
pub fn require_owner(env: &Env, sender: &Address) -> Result<(), ContractError> {
    sender.require_auth();

    let owner = get_owner(env)?;
    if *sender != owner {
        log!(env, "TokenFarm: {} is not the owner", sender);
        return Err(ContractError::Unauthorized);
    }

    Ok(())
}
