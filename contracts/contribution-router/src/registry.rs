//! Staking registry collaborator interface: credits bonded-token deposits to
//! a beneficiary as inactive (withdrawable) or active (at-risk) stake.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "StakingRegistryClient")]
pub trait StakingRegistry {
    /// The staking asset the registry accepts.
    fn token(env: Env) -> Address;

    /// Pull `amount` of the staking asset from `from` via allowance and
    /// credit it to `beneficiary` as withdrawable stake.
    fn deposit_inactive(env: Env, from: Address, beneficiary: Address, amount: i128);

    /// Same as `deposit_inactive`, but the stake is activated immediately.
    fn deposit_active(env: Env, from: Address, beneficiary: Address, amount: i128);
}
