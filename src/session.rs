//! One migration session: import a mnemonic, then send the balance.
//!
//! All key material, addresses and the fetched balance live in the
//! [`Session`] value itself. Separate sessions share nothing.

use straightedge_types::{Coin, StdTx};
use tracing::{info, warn};

use crate::address::{decode_address, secp256k1_address, sr25519_address};
use crate::config::ChainParams;
use crate::error::{MigrateError, MigrateResult};
use crate::keys::{derive_secp256k1, derive_sr25519, KeyPair};
use crate::lcd::{BroadcastResult, ChainGateway};
use crate::signer;
use crate::tx::{
    build_fee, build_send_message, build_sign_doc, compute_send_amount, finalize, sign_bytes,
};

/// Both keypairs derived from one mnemonic, with their addresses.
#[derive(Debug)]
pub struct DerivedAccounts {
    pub sr25519: KeyPair,
    pub secp256k1: KeyPair,
    /// Legacy sr25519 account the funds leave from
    pub source_address: String,
    /// secp256k1 account the funds move to
    pub destination_address: String,
}

impl DerivedAccounts {
    /// Derive both keys and addresses. No network access.
    pub fn from_mnemonic(phrase: &str, passphrase: &str, prefix: &str) -> MigrateResult<Self> {
        let sr25519 = derive_sr25519(phrase, passphrase)?;
        let secp256k1 = derive_secp256k1(phrase)?;
        sr25519.ensure_lengths()?;
        secp256k1.ensure_lengths()?;

        let source_address = sr25519_address(&sr25519.public_key, prefix)?;
        let destination_address = secp256k1_address(&secp256k1.public_key, prefix)?;

        Ok(Self {
            sr25519,
            secp256k1,
            source_address,
            destination_address,
        })
    }
}

/// Pick the balance entry paid in the fee denomination.
pub fn select_balance(balances: Vec<Coin>, denom: &str, address: &str) -> MigrateResult<Coin> {
    if balances.is_empty() {
        return Err(MigrateError::AccountNotFound(address.to_string()));
    }
    balances
        .into_iter()
        .find(|coin| coin.denom == denom)
        .ok_or_else(|| MigrateError::DenomMismatch {
            address: address.to_string(),
            expected: denom.to_string(),
        })
}

#[derive(Debug)]
pub struct Session {
    accounts: DerivedAccounts,
    balance: Coin,
}

impl Session {
    /// Derive keys from the mnemonic and fetch the source account's balance.
    pub async fn import<G: ChainGateway + ?Sized>(
        phrase: &str,
        params: &ChainParams,
        gateway: &G,
    ) -> MigrateResult<Self> {
        let accounts = DerivedAccounts::from_mnemonic(phrase, "", &params.address_prefix)?;
        info!(
            source = %accounts.source_address,
            destination = %accounts.destination_address,
            "Derived migration addresses"
        );

        let balances = gateway.account_balances(&accounts.source_address).await?;
        let balance = select_balance(balances, &params.fee.denom, &accounts.source_address)?;
        info!(
            source = %accounts.source_address,
            amount = %balance.amount,
            denom = %balance.denom,
            "Fetched source balance"
        );

        Ok(Self::from_parts(accounts, balance))
    }

    pub fn from_parts(accounts: DerivedAccounts, balance: Coin) -> Self {
        Self { accounts, balance }
    }

    pub fn source_address(&self) -> &str {
        &self.accounts.source_address
    }

    pub fn destination_address(&self) -> &str {
        &self.accounts.destination_address
    }

    pub fn balance(&self) -> &Coin {
        &self.balance
    }

    pub fn accounts(&self) -> &DerivedAccounts {
        &self.accounts
    }

    /// What the destination receives once the fee is paid.
    pub fn send_amount(&self, params: &ChainParams) -> MigrateResult<Coin> {
        compute_send_amount(&self.balance, &params.fee)
    }

    /// Build and sign the transfer of the whole balance minus the fee.
    ///
    /// Fails before any network call or signing when the balance does not
    /// cover the fee.
    pub async fn prepare_transaction<G: ChainGateway + ?Sized>(
        &self,
        params: &ChainParams,
        gateway: &G,
    ) -> MigrateResult<StdTx> {
        let amount = self.send_amount(params)?;

        decode_address(self.source_address(), &params.address_prefix)?;
        decode_address(self.destination_address(), &params.address_prefix)?;

        let account = gateway.account_sequence(self.source_address()).await?;

        let msg = build_send_message(self.source_address(), self.destination_address(), amount);
        let sign_doc = build_sign_doc(
            &params.chain_id,
            account.account_number,
            account.sequence,
            build_fee(params.fee.clone(), &params.gas),
            vec![msg],
            &params.memo,
        )?;

        let bytes = sign_bytes(&sign_doc)?;
        let keypair = &self.accounts.sr25519;
        let raw_signature = signer::sign(&bytes, keypair)?;
        if !signer::verify(&bytes, &keypair.public_key, &raw_signature)? {
            warn!("Fresh signature failed local verification");
            return Err(MigrateError::signing("signature did not verify locally"));
        }

        let envelope = signer::encode_signature(&keypair.public_key, &raw_signature);
        Ok(finalize(sign_doc, envelope))
    }

    /// Sign and broadcast the migration transfer. Not retried on failure.
    pub async fn send<G: ChainGateway + ?Sized>(
        &self,
        params: &ChainParams,
        gateway: &G,
    ) -> MigrateResult<BroadcastResult> {
        let tx = self.prepare_transaction(params, gateway).await?;
        info!(
            from = %self.source_address(),
            to = %self.destination_address(),
            "Broadcasting migration transfer"
        );
        gateway.submit_transaction(&tx).await
    }
}
