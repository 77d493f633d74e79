//! StakeRoute - Contribution Router (Soroban)
//! Routes contributed value into presale bonded tokens and stakes them on Stellar.

#![no_std]
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Bytes, Env};

mod amm;
mod callback;
mod error;
mod presale;
mod registry;
mod storage;

use amm::{AmmFactoryClient, AmmPoolClient};
use callback::{decode_collateral_payload, decode_external_payload};
use error::RouterError;
use presale::PresaleClient;
use registry::StakingRegistryClient;
use storage::{extend_instance_ttl, get_address, set_address, DataKey};

const APPROVE_LEDGER_TTL: u32 = 17_280;

#[contract]
pub struct ContributionRouter;

#[contractimpl]
impl ContributionRouter {
    /// Fixes the collaborator set for the lifetime of the contract. Each
    /// contract argument is probed with a cheap view call so that a
    /// misdeployed address fails here instead of at first contribution.
    pub fn __constructor(
        env: Env,
        bonded_token: Address,
        registry: Address,
        presale: Address,
        amm_factory: Address,
        governor: Address,
    ) -> Result<(), RouterError> {
        extend_instance_ttl(&env);

        match token::Client::new(&env, &bonded_token).try_decimals() {
            Ok(Ok(_)) => (),
            _ => return Err(RouterError::BondedTokenNotContract),
        }
        match StakingRegistryClient::new(&env, &registry).try_token() {
            Ok(Ok(_)) => (),
            _ => return Err(RouterError::RegistryNotContract),
        }
        let collateral = match PresaleClient::new(&env, &presale).try_contribution_token() {
            Ok(Ok(t)) => t,
            _ => return Err(RouterError::PresaleNotContract),
        };
        let native = match AmmFactoryClient::new(&env, &amm_factory).try_native_token() {
            Ok(Ok(t)) => t,
            _ => return Err(RouterError::FactoryNotContract),
        };

        set_address(&env, DataKey::BondedToken, &bonded_token);
        set_address(&env, DataKey::Registry, &registry);
        set_address(&env, DataKey::Presale, &presale);
        set_address(&env, DataKey::AmmFactory, &amm_factory);
        set_address(&env, DataKey::Governor, &governor);
        set_address(&env, DataKey::CollateralToken, &collateral);
        set_address(&env, DataKey::NativeToken, &native);

        Ok(())
    }

    /// Two-step collateral contribution. The contributor must have approved
    /// the router for `amount` of the collateral token beforehand.
    pub fn contribute_bonded(
        env: Env,
        contributor: Address,
        amount: i128,
        activate: bool,
    ) -> Result<i128, RouterError> {
        contributor.require_auth();
        extend_instance_ttl(&env);

        if amount <= 0 {
            return Err(RouterError::ZeroAmount);
        }

        let collateral = get_address(&env, DataKey::CollateralToken);
        pull(&env, &collateral, &contributor, amount)?;
        buy_and_stake(&env, &contributor, amount, activate)
    }

    /// Two-step contribution of an arbitrary external token. Swaps
    /// token -> native -> collateral through the AMM, then converts and
    /// stakes. Both hops honor `deadline`; the min-out bounds apply per hop.
    pub fn contribute_external_token(
        env: Env,
        contributor: Address,
        token: Address,
        amount: i128,
        min_native_out: i128,
        min_collateral_out: i128,
        deadline: u64,
        activate: bool,
    ) -> Result<i128, RouterError> {
        contributor.require_auth();
        extend_instance_ttl(&env);

        if amount <= 0 {
            return Err(RouterError::ZeroAmount);
        }
        if token == get_address(&env, DataKey::CollateralToken)
            || token == get_address(&env, DataKey::BondedToken)
        {
            return Err(RouterError::WrongToken);
        }

        pull(&env, &token, &contributor, amount)?;
        external_to_stake(
            &env,
            &contributor,
            &token,
            amount,
            min_native_out,
            min_collateral_out,
            deadline,
            activate,
        )
    }

    /// Two-step contribution of the native asset (a token contract on
    /// Stellar). Single swap native -> collateral, then converts and stakes.
    pub fn contribute_native(
        env: Env,
        contributor: Address,
        amount: i128,
        min_collateral_out: i128,
        deadline: u64,
        activate: bool,
    ) -> Result<i128, RouterError> {
        contributor.require_auth();
        extend_instance_ttl(&env);

        if amount <= 0 {
            return Err(RouterError::ZeroAmount);
        }

        let native = get_address(&env, DataKey::NativeToken);
        pull(&env, &native, &contributor, amount)?;
        let collateral_amount = swap_native_to_collateral(&env, amount, min_collateral_out, deadline)?;
        buy_and_stake(&env, &contributor, collateral_amount, activate)
    }

    /// Push entry point, invoked by a token contract from its own
    /// approve-and-call hook after recording an allowance for the router.
    /// Requiring auth from `token` proves the notification really originates
    /// from the asserted token contract; a third party forging the argument
    /// fails host auth before any router logic runs. The holder's intent is
    /// carried by the allowance the hook recorded, so no further auth is
    /// demanded of the holder here.
    pub fn receive_approval(
        env: Env,
        holder: Address,
        amount: i128,
        token: Address,
        payload: Bytes,
    ) -> Result<i128, RouterError> {
        token.require_auth();
        extend_instance_ttl(&env);

        if token == get_address(&env, DataKey::BondedToken) {
            return Err(RouterError::ReceivedWrongToken);
        }

        if token == get_address(&env, DataKey::CollateralToken) {
            let activate = decode_collateral_payload(&payload)?;
            if amount <= 0 {
                return Err(RouterError::ZeroAmount);
            }
            pull(&env, &token, &holder, amount)?;
            buy_and_stake(&env, &holder, amount, activate)
        } else {
            let params = decode_external_payload(&payload)?;
            if amount <= 0 {
                return Err(RouterError::ZeroAmount);
            }
            pull(&env, &token, &holder, amount)?;
            external_to_stake(
                &env,
                &holder,
                &token,
                amount,
                params.min_native_out,
                params.min_collateral_out,
                params.deadline,
                params.activate,
            )
        }
    }

    /// Governor-only sweep of native asset stranded on the router outside
    /// the contribution flow.
    pub fn refund_native(
        env: Env,
        governor: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), RouterError> {
        governor.require_auth();
        extend_instance_ttl(&env);

        if governor != get_address(&env, DataKey::Governor) {
            return Err(RouterError::NotGovernor);
        }
        let native = get_address(&env, DataKey::NativeToken);
        sweep(&env, &native, &recipient, amount, RouterError::NativeRefundFailed)?;

        env.events().publish(
            (symbol_short!("route"), symbol_short!("refund")),
            (recipient, amount),
        );
        Ok(())
    }

    /// Governor-only sweep of a stranded token balance.
    pub fn refund_token(
        env: Env,
        governor: Address,
        token: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), RouterError> {
        governor.require_auth();
        extend_instance_ttl(&env);

        if governor != get_address(&env, DataKey::Governor) {
            return Err(RouterError::NotGovernor);
        }
        sweep(&env, &token, &recipient, amount, RouterError::TokenRefundFailed)?;

        env.events().publish(
            (symbol_short!("route"), symbol_short!("refund")),
            (token, recipient, amount),
        );
        Ok(())
    }

    pub fn bonded_token(env: Env) -> Address {
        get_address(&env, DataKey::BondedToken)
    }

    pub fn registry(env: Env) -> Address {
        get_address(&env, DataKey::Registry)
    }

    pub fn presale(env: Env) -> Address {
        get_address(&env, DataKey::Presale)
    }

    pub fn amm_factory(env: Env) -> Address {
        get_address(&env, DataKey::AmmFactory)
    }

    pub fn governor(env: Env) -> Address {
        get_address(&env, DataKey::Governor)
    }

    pub fn collateral_token(env: Env) -> Address {
        get_address(&env, DataKey::CollateralToken)
    }

    pub fn native_token(env: Env) -> Address {
        get_address(&env, DataKey::NativeToken)
    }
}

/// Pull `amount` of `token` from `from` against a prior allowance.
fn pull(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), RouterError> {
    let this = env.current_contract_address();
    match token::Client::new(env, token).try_transfer_from(&this, from, &this, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(RouterError::TokenTransferFailed),
    }
}

/// Approve `spender` to move `amount` of `token` out of the router.
fn approve(
    env: &Env,
    token: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), RouterError> {
    let this = env.current_contract_address();
    let expiration = env.ledger().sequence() + APPROVE_LEDGER_TTL;
    match token::Client::new(env, token).try_approve(&this, spender, &amount, &expiration) {
        Ok(Ok(())) => Ok(()),
        _ => Err(RouterError::TokenApprovalFailed),
    }
}

fn lookup_pool(env: &Env, token: &Address) -> Result<Address, RouterError> {
    let factory = get_address(env, DataKey::AmmFactory);
    match AmmFactoryClient::new(env, &factory).try_pool_for(token) {
        Ok(Ok(Some(pool))) => Ok(pool),
        _ => Err(RouterError::ExchangeUnavailable),
    }
}

/// First hop: sell the external token the router now holds for native.
fn swap_token_to_native(
    env: &Env,
    token: &Address,
    amount_in: i128,
    min_out: i128,
    deadline: u64,
) -> Result<i128, RouterError> {
    let pool = lookup_pool(env, token)?;
    approve(env, token, &pool, amount_in)?;
    let this = env.current_contract_address();
    match AmmPoolClient::new(env, &pool).try_swap_to_native(&this, &amount_in, &min_out, &deadline) {
        Ok(Ok(out)) => Ok(out),
        _ => Err(RouterError::SwapFailed),
    }
}

/// Second hop: sell native for the presale collateral.
fn swap_native_to_collateral(
    env: &Env,
    amount_in: i128,
    min_out: i128,
    deadline: u64,
) -> Result<i128, RouterError> {
    let collateral = get_address(env, DataKey::CollateralToken);
    let native = get_address(env, DataKey::NativeToken);
    let pool = lookup_pool(env, &collateral)?;
    approve(env, &native, &pool, amount_in)?;
    let this = env.current_contract_address();
    match AmmPoolClient::new(env, &pool).try_swap_from_native(&this, &amount_in, &min_out, &deadline)
    {
        Ok(Ok(out)) => Ok(out),
        _ => Err(RouterError::SwapFailed),
    }
}

fn external_to_stake(
    env: &Env,
    contributor: &Address,
    token: &Address,
    amount: i128,
    min_native_out: i128,
    min_collateral_out: i128,
    deadline: u64,
    activate: bool,
) -> Result<i128, RouterError> {
    let native_amount = swap_token_to_native(env, token, amount, min_native_out, deadline)?;
    let collateral_amount =
        swap_native_to_collateral(env, native_amount, min_collateral_out, deadline)?;
    buy_and_stake(env, contributor, collateral_amount, activate)
}

/// Convert the collateral the router holds into bonded tokens through the
/// presale, then deposit the full bonded amount for `contributor`. Every
/// intermediate balance leaves the router within this call; nothing is
/// parked across the invocation boundary.
fn buy_and_stake(
    env: &Env,
    contributor: &Address,
    collateral_amount: i128,
    activate: bool,
) -> Result<i128, RouterError> {
    let collateral = get_address(env, DataKey::CollateralToken);
    let presale_addr = get_address(env, DataKey::Presale);
    let this = env.current_contract_address();

    approve(env, &collateral, &presale_addr, collateral_amount)?;
    let bonded_amount =
        PresaleClient::new(env, &presale_addr).contribute(&this, &collateral_amount);

    let bonded = get_address(env, DataKey::BondedToken);
    let registry = get_address(env, DataKey::Registry);
    approve(env, &bonded, &registry, bonded_amount)?;

    let registry_client = StakingRegistryClient::new(env, &registry);
    if activate {
        registry_client.deposit_active(&this, contributor, &bonded_amount);
    } else {
        registry_client.deposit_inactive(&this, contributor, &bonded_amount);
    }

    env.events().publish(
        (symbol_short!("route"), symbol_short!("staked")),
        (contributor.clone(), bonded_amount, activate),
    );

    Ok(bonded_amount)
}

/// Shared refund path: validate against the actual held balance, then send.
fn sweep(
    env: &Env,
    token: &Address,
    recipient: &Address,
    amount: i128,
    failure: RouterError,
) -> Result<(), RouterError> {
    if amount <= 0 {
        return Err(RouterError::ZeroAmount);
    }

    let client = token::Client::new(env, token);
    let this = env.current_contract_address();
    if client.balance(&this) < amount {
        return Err(RouterError::InsufficientBalance);
    }

    match client.try_transfer(&this, recipient, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(failure),
    }
}
