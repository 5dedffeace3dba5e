//! Eligibility alerts

use crate::outcome::Alert;
use airdrop_core::UserEligibility;

pub const ELIGIBLE_MESSAGE: &str = "Your connected ETH wallet is eligible to map to your Cardano wallet.";
pub const NOT_ELIGIBLE_MESSAGE: &str = "Your connected wallet is not eligible to map to a cardano wallet. \
     Please connect a compatible ETH wallet with available AGIX funds.";

/// Alert for an eligibility verdict; only advises while no Cardano address is bound
pub fn eligibility_alert(eligibility: UserEligibility, cardano_bound: bool) -> Option<Alert> {
    if cardano_bound {
        return None;
    }
    match eligibility {
        UserEligibility::Eligible => Some(Alert::success(ELIGIBLE_MESSAGE)),
        UserEligibility::NotEligible => Some(Alert::error(NOT_ELIGIBLE_MESSAGE)),
        UserEligibility::Pending => None,
    }
}
