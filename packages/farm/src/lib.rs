#![no_std]

pub mod math;
pub mod oracle;
pub mod ttl;
