//! Binding a source-chain account to a Cardano address for a window

use super::{AirdropPortal, RegistrationContext};
use crate::executor::Operation;
use crate::outcome::{Alert, Effect, Outcome, PortalEvent};
use crate::ports::{SignValue, WalletSigner};
use airdrop_core::{
    receipt_for_window, AirdropStatusMessage, AirdropWindow, Error, RegistrationRequest, Result,
};
use airdrop_networking::AirdropBackend;
use tracing::{info, instrument, warn};

pub const REGISTRATION_SUCCESS_MESSAGE: &str = "You have successfully registered for the airdrop window.";

/// What a submitted registration produced
enum Registration {
    /// The wallet returned without a signature; nothing was sent
    Unsigned,
    /// Receipt for the active window, when the backend issued one
    Registered(Option<String>),
}

fn failure(message: impl std::fmt::Display) -> Outcome {
    Outcome::with_alert(Alert::error(format!("Registration Failed: {}", message)))
        .effect(Effect::SetAirdropStatus(AirdropStatusMessage::WalletAccountError))
}

impl<B, W, C, T> AirdropPortal<B, W, C, T>
where
    B: AirdropBackend,
    W: WalletSigner,
{
    /// Sign and submit a registration for the active window
    #[instrument(skip(self, ctx), fields(window = ?ctx.window.map(|w| w.airdrop_window_id)))]
    pub async fn register(&self, ctx: &RegistrationContext<'_>, cardano_address: &str) -> Outcome {
        let Some(account) = ctx.account else {
            return Outcome::skipped().effect(Effect::ShowConnectionModal);
        };
        let Some(window) = ctx.window else {
            return Outcome::skipped();
        };

        let _token = match self.guard.try_acquire(window.airdrop_window_id, Operation::Register) {
            Ok(token) => token,
            Err(violation) => return Outcome::with_alert(Alert::error(violation.message())),
        };

        match self.submit_registration(account, window, cardano_address.trim()).await {
            Ok(Registration::Unsigned) => {
                warn!("Wallet returned no registration signature");
                failure("Unable to generate signature")
            }
            Ok(Registration::Registered(receipt)) => {
                info!("Registered {} for window {}", account, window.airdrop_window_id);
                self.publish(PortalEvent::Registered {
                    window_id: window.airdrop_window_id,
                });

                let mut outcome = Outcome::with_alert(Alert::success(REGISTRATION_SUCCESS_MESSAGE))
                    .effect(Effect::RefreshEligibility);
                if let Some(receipt) = receipt {
                    outcome = outcome.effect(Effect::SetRegistrationId(receipt));
                }
                outcome
                    .effect(Effect::SetAirdropStatus(AirdropStatusMessage::Claim))
                    .effect(Effect::BindCardanoAddress(cardano_address.trim().to_string()))
                    .effect(Effect::MarkRegistered)
                    .effect(Effect::ShowRegistrationSuccess)
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                failure(e.message())
            }
        }
    }

    async fn submit_registration(
        &self,
        account: &str,
        window: &AirdropWindow,
        cardano_address: &str,
    ) -> Result<Registration> {
        if cardano_address.is_empty() {
            return Err(Error::InvalidData("Cardano address is required".to_string()));
        }

        let signed = self
            .signer
            .sign(&[
                SignValue::Uint(window.airdrop_id.0),
                SignValue::Uint(window.airdrop_window_id.0),
                SignValue::Text(cardano_address.to_string()),
            ])
            .await?;

        let Some(signature) = signed.signature.filter(|s| !s.is_empty()) else {
            return Ok(Registration::Unsigned);
        };

        let request = RegistrationRequest {
            signature,
            address: account.to_string(),
            airdrop_id: window.airdrop_id,
            airdrop_window_id: window.airdrop_window_id,
            block_number: signed.block_number,
            cardano_address: cardano_address.to_string(),
        };
        let receipts = self.backend.register(&request).await?;

        let receipt = receipt_for_window(&receipts, window.airdrop_window_id).map(str::to_string);
        if receipt.is_none() {
            warn!(
                "Backend returned {} receipts, none for window {}",
                receipts.len(),
                window.airdrop_window_id
            );
        }
        Ok(Registration::Registered(receipt))
    }
}
