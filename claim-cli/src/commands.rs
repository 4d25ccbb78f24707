use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;
use straightedge_migrate::keys::validate_mnemonic;
use straightedge_migrate::{AppConfig, DerivedAccounts, LcdClient, MigrateError, Session};
use straightedge_types::Coin;
use tracing::{error, info};
use zeroize::Zeroizing;

/// Display precision of the chain's base denomination.
const DISPLAY_DECIMALS: usize = 18;
const DISPLAY_DENOM: &str = "STR";

/// Read the mnemonic from a file, or prompt for it without echo. The phrase
/// is checksum-validated before anything else runs.
pub fn read_mnemonic(file: Option<&Path>) -> Result<Zeroizing<String>> {
    let phrase = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read mnemonic file {}", path.display()))?,
        None => rpassword::read_password_from_tty(Some("Mnemonic: "))
            .context("cannot read mnemonic from terminal")?,
    };
    let phrase = Zeroizing::new(phrase);
    validate_mnemonic(&phrase).map_err(explain)?;
    Ok(phrase)
}

pub fn addresses(config: &AppConfig, mnemonic: &str) -> Result<()> {
    let accounts = DerivedAccounts::from_mnemonic(mnemonic, "", &config.chain.address_prefix)
        .map_err(explain)?;
    println!("sr25519 (source):         {}", accounts.source_address);
    println!("secp256k1 (destination):  {}", accounts.destination_address);
    Ok(())
}

pub async fn balance(config: &AppConfig, mnemonic: &str) -> Result<()> {
    let lcd = LcdClient::new(&config.lcd)?;
    let session = Session::import(mnemonic, &config.chain_params(), &lcd)
        .await
        .map_err(explain)?;

    println!("Address: {}", session.source_address());
    println!("Balance: {}", describe(session.balance()));
    Ok(())
}

pub async fn claim(config: &AppConfig, mnemonic: &str, dry_run: bool, yes: bool) -> Result<()> {
    let params = config.chain_params();
    let lcd = LcdClient::new(&config.lcd)?;
    let session = Session::import(mnemonic, &params, &lcd)
        .await
        .map_err(explain)?;
    let amount = session.send_amount(&params).map_err(explain)?;

    println!("From:    {}", session.source_address());
    println!("To:      {}", session.destination_address());
    println!("Balance: {}", describe(session.balance()));
    println!("Fee:     {}", describe(&params.fee));
    println!("Send:    {}", describe(&amount));

    if dry_run {
        let tx = session
            .prepare_transaction(&params, &lcd)
            .await
            .map_err(explain)?;
        println!("{}", serde_json::to_string_pretty(&tx)?);
        return Ok(());
    }

    if !yes && !confirm("Broadcast this transfer?")? {
        info!("Transfer cancelled by user");
        return Ok(());
    }

    let result = session.send(&params, &lcd).await.map_err(explain)?;
    println!("Submitted: {}", result.txhash);
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Attach a user-oriented hint to errors the user can act on.
fn explain(err: MigrateError) -> anyhow::Error {
    let hint = match &err {
        MigrateError::InvalidMnemonic(_) => Some("Invalid mnemonic, please re-enter it."),
        MigrateError::AccountNotFound(_) => Some("Could not find an account for this mnemonic."),
        MigrateError::InsufficientBalance { .. } => Some("Insufficient balance to pay fees."),
        MigrateError::Network(_) | MigrateError::Lcd { .. } => {
            Some("The chain gateway could not be reached; nothing was retried.")
        }
        _ => None,
    };
    if !err.is_user_facing() {
        error!("Internal error: {}", err);
    }
    match hint {
        Some(hint) => anyhow::Error::new(err).context(hint),
        None => anyhow::Error::new(err),
    }
}

fn describe(coin: &Coin) -> String {
    if coin.denom == "astr" {
        match format_atomics(&coin.amount, DISPLAY_DECIMALS) {
            Ok(display) => format!("{} {} ({} {})", display, DISPLAY_DENOM, coin.amount, coin.denom),
            Err(_) => format!("{} {}", coin.amount, coin.denom),
        }
    } else {
        format!("{} {}", coin.amount, coin.denom)
    }
}

/// Render an atomic integer amount with `decimals` fractional digits,
/// dropping trailing zeros.
pub fn format_atomics(amount: &str, decimals: usize) -> Result<String> {
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        bail!("{:?} is not an atomic amount", amount);
    }

    let digits = amount.trim_start_matches('0');
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        Ok(whole.to_string())
    } else {
        Ok(format!("{}.{}", whole, fraction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_fractional_amounts() {
        assert_eq!(format_atomics("30000000000000000", 18).unwrap(), "0.03");
        assert_eq!(format_atomics("5000000000000000", 18).unwrap(), "0.005");
        assert_eq!(format_atomics("1500000000000000000", 18).unwrap(), "1.5");
    }

    #[test]
    fn formats_whole_and_zero() {
        assert_eq!(format_atomics("2000000000000000000", 18).unwrap(), "2");
        assert_eq!(format_atomics("0", 18).unwrap(), "0");
        assert_eq!(format_atomics("000", 18).unwrap(), "0");
    }

    #[test]
    fn rejects_non_digits() {
        assert!(format_atomics("", 18).is_err());
        assert!(format_atomics("1e18", 18).is_err());
    }

    #[test]
    fn describe_non_native_denom_is_raw() {
        assert_eq!(describe(&Coin::new("uatom", "7")), "7 uatom");
    }
}
