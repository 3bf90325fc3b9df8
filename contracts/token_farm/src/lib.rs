#![no_std]
mod contract;
mod error;
mod msg;
mod ownership;
mod rewards;
mod storage;

#[cfg(test)]
extern crate std;


pub use contract::{TokenFarm, TokenFarmClient};
pub use error::ContractError;
