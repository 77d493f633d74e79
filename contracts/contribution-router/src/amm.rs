//! Exchange collaborator interface: a factory of single-asset pools, each
//! pairing one token against the native asset (Uniswap-v1 style).

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "AmmFactoryClient")]
pub trait AmmFactory {
    /// The common denominator asset every pool pairs against.
    fn native_token(env: Env) -> Address;

    /// Pool trading `token` against the native asset, if one exists.
    fn pool_for(env: Env, token: Address) -> Option<Address>;
}

#[contractclient(name = "AmmPoolClient")]
pub trait AmmPool {
    /// Sell `amount_in` of the pool's token for the native asset. Pulls the
    /// input from `from` via allowance; enforces `min_out` and `deadline`.
    fn swap_to_native(env: Env, from: Address, amount_in: i128, min_out: i128, deadline: u64)
        -> i128;

    /// Sell `amount_in` of the native asset for the pool's token.
    fn swap_from_native(env: Env, from: Address, amount_in: i128, min_out: i128, deadline: u64)
        -> i128;
}
