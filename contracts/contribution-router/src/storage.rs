use soroban_sdk::{contracttype, Address, Env};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    BondedToken,
    Registry,
    Presale,
    AmmFactory,
    Governor,
    CollateralToken,
    NativeToken,
}

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 86_400;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn set_address(env: &Env, key: DataKey, value: &Address) {
    env.storage().instance().set(&key, value);
}

pub fn get_address(env: &Env, key: DataKey) -> Address {
    env.storage().instance().get(&key).unwrap()
}
