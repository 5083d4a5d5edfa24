//! Signature-gated description reveal
//!
//! Forces a wallet signature over the session challenge before handing back
//! the stored description. The stored text is not ciphertext; the signature
//! is an access-control prompt, not decryption, and nothing verifies the
//! challenge server-side.

use tracing::warn;

use crate::error::{BoardError, WalletError};
use crate::session::SessionParams;
use crate::wallet::Wallet;

/// Prompt the wallet for a signature over the session challenge and, on
/// success, return the description unchanged. A declined or failing
/// signature yields `Ok(None)`; the reason is logged for the operator only.
/// Every call re-prompts; successful reveals are never cached.
pub async fn reveal(
    wallet: Option<&dyn Wallet>,
    session: &SessionParams,
    encrypted_description: &str,
) -> Result<Option<String>, BoardError> {
    let wallet = wallet.ok_or(BoardError::Unauthenticated)?;

    let message = session.challenge_message();
    match wallet.sign_message(&message).await {
        Ok(_signature) => Ok(Some(encrypted_description.to_string())),
        Err(WalletError::Rejected) => {
            warn!("reveal signature rejected by user");
            Ok(None)
        }
        Err(e) => {
            warn!("reveal signature failed: {}", e);
            Ok(None)
        }
    }
}
