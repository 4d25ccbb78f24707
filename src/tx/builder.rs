use straightedge_types::{Coin, Msg, MsgSend, StdFee, StdSignDoc, StdSignature, StdTx};

use crate::error::{MigrateError, MigrateResult};

/// Largest integer a sign doc may carry for account number or sequence
/// (2^53 - 1, the JSON-safe integer range).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Build a bank send message.
pub fn build_send_message(from: &str, to: &str, coin: Coin) -> Msg {
    Msg::Send(MsgSend {
        from_address: from.to_string(),
        to_address: to.to_string(),
        amount: vec![coin],
    })
}

/// Build the fee block from a single fee coin and gas limit.
pub fn build_fee(fee: Coin, gas: &str) -> StdFee {
    StdFee {
        amount: vec![fee],
        gas: gas.to_string(),
    }
}

/// Parse an atomic amount: ASCII digits only, no sign or separators.
pub fn parse_amount(amount: &str) -> MigrateResult<u128> {
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MigrateError::InvalidAmount(format!(
            "{:?} is not a non-negative integer",
            amount
        )));
    }
    amount
        .parse()
        .map_err(|_| MigrateError::InvalidAmount(format!("{} is out of range", amount)))
}

/// Amount to transfer: everything left after paying the fee.
pub fn compute_send_amount(balance: &Coin, fee: &Coin) -> MigrateResult<Coin> {
    if balance.denom != fee.denom {
        return Err(MigrateError::InvalidAmount(format!(
            "balance denom {} does not match fee denom {}",
            balance.denom, fee.denom
        )));
    }

    let balance_amount = parse_amount(&balance.amount)?;
    let fee_amount = parse_amount(&fee.amount)?;
    let remaining = balance_amount
        .checked_sub(fee_amount)
        .ok_or(MigrateError::InsufficientBalance {
            balance: balance_amount,
            fee: fee_amount,
        })?;

    Ok(Coin::new(balance.denom.clone(), remaining.to_string()))
}

/// Parse an account number or sequence into the JSON-safe integer range.
pub fn parse_uint53(value: &str) -> MigrateResult<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MigrateError::InvalidAccountNumber(format!(
            "{:?} is not a non-negative integer",
            value
        )));
    }
    let parsed: u64 = trimmed
        .parse()
        .map_err(|_| MigrateError::InvalidAccountNumber(format!("{} is out of range", value)))?;
    ensure_uint53(parsed)
}

fn ensure_uint53(value: u64) -> MigrateResult<u64> {
    if value > MAX_SAFE_INTEGER {
        return Err(MigrateError::InvalidAccountNumber(format!(
            "{} exceeds {}",
            value, MAX_SAFE_INTEGER
        )));
    }
    Ok(value)
}

/// Assemble the sign document. Account number and sequence are rendered as
/// plain decimal strings.
pub fn build_sign_doc(
    chain_id: &str,
    account_number: u64,
    sequence: u64,
    fee: StdFee,
    msgs: Vec<Msg>,
    memo: &str,
) -> MigrateResult<StdSignDoc> {
    Ok(StdSignDoc {
        chain_id: chain_id.to_string(),
        account_number: ensure_uint53(account_number)?.to_string(),
        sequence: ensure_uint53(sequence)?.to_string(),
        fee,
        msgs,
        memo: memo.to_string(),
    })
}

/// Attach the single signature and produce the broadcastable transaction.
pub fn finalize(sign_doc: StdSignDoc, signature: StdSignature) -> StdTx {
    StdTx {
        msg: sign_doc.msgs,
        fee: sign_doc.fee,
        memo: sign_doc.memo,
        signatures: vec![signature],
    }
}
