use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    OwnerNotSet = 700,
    ConfigNotSet = 701,
    Unauthorized = 702,
    InvalidAmount = 703,
    TokenNotWhitelisted = 704,
    ArithmeticOverflow = 705,
    TransferFailed = 706,
    MissingOracle = 707,
    InvalidPrice = 708,
    IndexOutOfRange = 709,
}
