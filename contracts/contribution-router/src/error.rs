use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RouterError {
    /// Bonded token address does not answer as a token contract
    BondedTokenNotContract = 1,
    /// Registry address does not answer as a staking registry
    RegistryNotContract = 2,
    /// Presale address does not answer as a presale contract
    PresaleNotContract = 3,
    /// AMM factory address does not answer as a factory contract
    FactoryNotContract = 4,
    /// Contribution or refund amount is zero (or negative)
    ZeroAmount = 5,
    /// External-token entry point called with the collateral or bonded token
    WrongToken = 6,
    /// Token transfer_from pull reported failure
    TokenTransferFailed = 7,
    /// Token approve reported failure
    TokenApprovalFailed = 8,
    /// Factory has no pool for the requested asset
    ExchangeUnavailable = 9,
    /// Pool rejected the swap (slippage bound or deadline violated)
    SwapFailed = 10,
    /// Push notification asserts a token the router cannot route
    ReceivedWrongToken = 11,
    /// Push payload length does not match the expected layout
    WrongDataLength = 12,
    /// Refund caller is not the configured governor
    NotGovernor = 13,
    /// Refund amount exceeds the router's held balance
    InsufficientBalance = 14,
    /// Native asset refund transfer failed
    NativeRefundFailed = 15,
    /// Token refund transfer failed
    TokenRefundFailed = 16,
}
