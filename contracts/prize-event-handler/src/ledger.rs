//! Boundary to the external token ledger.
//!
//! Debits are taken from the funds attached to the incoming message, credits
//! are bank sends, and the vote token is minted and burned through the
//! Injective Token Factory. Nothing here touches contract storage.

use cosmwasm_std::{coins, Addr, BankMsg, Coin, CosmosMsg, Env, QuerierWrapper, StdResult, Uint128};
use injective_cosmwasm::{
    create_burn_tokens_msg, create_mint_tokens_msg, create_new_denom_msg, InjectiveMsgWrapper,
};

use crate::error::ContractError;

pub type LedgerMsg = CosmosMsg<InjectiveMsgWrapper>;

/// Create the Token Factory vote denom during instantiation.
pub fn create_denom(env: &Env, subdenom: &str) -> (LedgerMsg, String) {
    let contract_addr = env.contract.address.to_string();
    let msg = create_new_denom_msg(contract_addr.clone(), subdenom.to_string());
    let full_denom = format!("factory/{}/{}", contract_addr, subdenom);
    (msg, full_denom)
}

/// Total amount of `denom` attached to the message.
///
/// Attaching any other denom is rejected so nothing gets stranded in the
/// contract; attaching nothing at all means the caller authorized no transfer.
pub fn attached(funds: &[Coin], denom: &str, needed: Uint128) -> Result<Uint128, ContractError> {
    if let Some(other) = funds.iter().find(|c| c.denom != denom) {
        return Err(ContractError::WrongDenom {
            expected: denom.to_string(),
            got: other.denom.clone(),
        });
    }

    let amount = funds
        .iter()
        .fold(Uint128::zero(), |acc, coin| acc + coin.amount);
    if amount.is_zero() {
        return Err(ContractError::InsufficientAllowance {
            denom: denom.to_string(),
            needed,
        });
    }
    Ok(amount)
}

/// Debit `amount` of `denom` from the attached funds.
/// Returns the surplus that has to be credited back to the sender.
pub fn debit(funds: &[Coin], denom: &str, amount: Uint128) -> Result<Uint128, ContractError> {
    let available = attached(funds, denom, amount)?;
    if available < amount {
        return Err(ContractError::InsufficientBalance {
            denom: denom.to_string(),
            needed: amount,
            attached: available,
        });
    }
    Ok(available - amount)
}

pub fn credit(recipient: &Addr, denom: &str, amount: Uint128) -> BankMsg {
    BankMsg::Send {
        to_address: recipient.to_string(),
        amount: coins(amount.u128(), denom),
    }
}

/// Mint vote weight to `recipient`.
///
/// The Token Factory only lets a denom's admin mint it; this contract is the
/// admin of exactly the denoms created under its own address.
pub fn mint(
    env: &Env,
    denom: &str,
    amount: Uint128,
    recipient: &Addr,
) -> Result<LedgerMsg, ContractError> {
    let own_prefix = format!("factory/{}/", env.contract.address);
    if !denom.starts_with(&own_prefix) {
        return Err(ContractError::Unauthorized {
            reason: format!("contract is not the minter of {}", denom),
        });
    }

    Ok(create_mint_tokens_msg(
        env.contract.address.clone(),
        Coin {
            denom: denom.to_string(),
            amount,
        },
        recipient.to_string(),
    ))
}

/// Burn vote weight previously debited into the contract.
pub fn burn(env: &Env, denom: &str, amount: Uint128) -> LedgerMsg {
    create_burn_tokens_msg(
        env.contract.address.clone(),
        Coin {
            denom: denom.to_string(),
            amount,
        },
    )
}

pub fn balance_of(querier: &QuerierWrapper, address: &Addr, denom: &str) -> StdResult<Uint128> {
    let balance = querier.query_balance(address, denom)?;
    Ok(balance.amount)
}
