//! Presale collaborator interface: converts collateral into bonded tokens at
//! a ppm-scaled, contract-owned rate.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "PresaleClient")]
pub trait Presale {
    /// The collateral asset the presale accepts.
    fn contribution_token(env: Env) -> Address;

    /// Bonded tokens obtained for `amount` of collateral (rounds down).
    fn contribution_to_tokens(env: Env, amount: i128) -> i128;

    /// Pull `amount` of collateral from `from` via allowance and deliver the
    /// corresponding bonded tokens to `from`. Returns the bonded amount.
    fn contribute(env: Env, from: Address, amount: i128) -> i128;
}
