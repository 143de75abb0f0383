// Copyright (c) 2022 MASSA LABS <info@massa.net>

/// Number of fractional digits of an `Amount`
pub const AMOUNT_DECIMALS: u8 = 18;
/// Raw units per whole token
pub const AMOUNT_DECIMAL_FACTOR: u128 = 1_000_000_000_000_000_000;
/// Size of an address, in bytes
pub const ADDRESS_SIZE_BYTES: usize = 20;
