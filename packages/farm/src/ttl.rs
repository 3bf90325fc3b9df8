// Constants for storage bump amounts
pub const DAY_IN_LEDGERS: u32 = 17280;

// TTL the contract instance is extended to whenever it is touched (7 days of ledgers).
pub const INSTANCE_TARGET_TTL: u32 = 7 * DAY_IN_LEDGERS;
// Instance TTL below which an extension is triggered.
pub const INSTANCE_RENEWAL_THRESHOLD: u32 = INSTANCE_TARGET_TTL - DAY_IN_LEDGERS;

// TTL a persistent entry (balances, roster, price feed bindings) is extended to (30 days of ledgers).
pub const PERSISTENT_TARGET_TTL: u32 = 30 * DAY_IN_LEDGERS;
// Persistent TTL below which an extension is triggered.
pub const PERSISTENT_RENEWAL_THRESHOLD: u32 = PERSISTENT_TARGET_TTL - DAY_IN_LEDGERS;
