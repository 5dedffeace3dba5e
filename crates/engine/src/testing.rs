//! In-memory stand-ins for the backend, wallet and chains

use crate::ports::{
    AirdropContract, ContractClaimCall, PendingTransaction, SignValue, SignedPayload, StakeCall,
    TokenTransfer, TransferMetadata, TxReceipt, WalletKind, WalletSigner,
};
use airdrop_core::{
    ActionType, AirdropDetails, AirdropId, AirdropWindow, ChainContext, ClaimSignatureBundle,
    ClaimStatus, ClaimTransaction, Error, RegistrationReceipt, RegistrationRequest, Result,
    SaveClaimTxnRequest, StakeDetails, WindowId, WindowStatus,
};
use airdrop_networking::AirdropBackend;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::sync::Mutex;

pub fn record(window_id: u64, status: ClaimStatus, action: ActionType, amount: u64) -> ClaimTransaction {
    ClaimTransaction {
        airdrop_window_id: WindowId(window_id),
        airdrop_window_order: window_id,
        claimable_amount: Decimal::from(amount),
        txn_status: status,
        txn_hash: Some(format!("0xhash{}", window_id)),
        action_type: action,
    }
}

/// Window `id` with order `id`; its periods fall between May `4 * id` and `4 * id + 4`
pub fn window(id: u64, status: WindowStatus) -> AirdropWindow {
    let day = |d: u32| Some(Utc.with_ymd_and_hms(2022, 5, d, 0, 0, 0).unwrap());
    let base = (id as u32) * 4;
    AirdropWindow {
        airdrop_id: AirdropId(1),
        airdrop_window_id: WindowId(id),
        airdrop_window_order: id,
        airdrop_window_status: status,
        airdrop_window_registration_start_period: day(base),
        airdrop_window_registration_end_period: day(base + 1),
        airdrop_window_claim_start_period: day(base + 2),
        next_window_start_period: day(base + 4),
        airdrop_window_total_tokens: Decimal::from(1_000_000u64),
    }
}

pub fn bundle() -> ClaimSignatureBundle {
    ClaimSignatureBundle {
        signature: "0xbackendsig".to_string(),
        total_eligible_amount: Decimal::from(1000),
        claimable_amount: Decimal::from(250),
        staking_contract_address: Some("0xstaking".to_string()),
        token_address: Some("0xtoken".to_string()),
        user_address: Some("0xabc".to_string()),
        contract_address: Some("0xairdrop".to_string()),
        chain_context: Some(ChainContext {
            amount: Decimal::new(15, 1),
            deposit_address: "addr1deposit".to_string(),
        }),
    }
}

// ─── Backend ─────────────────────────────────────────────────────────

pub struct FakeBackend {
    calls: Mutex<Vec<&'static str>>,
    history: Mutex<Vec<ClaimTransaction>>,
    stake: Mutex<Result<StakeDetails>>,
    receipts: Mutex<Result<Vec<RegistrationReceipt>>>,
    signature: Mutex<Result<ClaimSignatureBundle>>,
    registrations: Mutex<Vec<RegistrationRequest>>,
    saved: Mutex<Vec<SaveClaimTxnRequest>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            history: Mutex::new(Vec::new()),
            stake: Mutex::new(Ok(StakeDetails::default())),
            receipts: Mutex::new(Ok(Vec::new())),
            signature: Mutex::new(Ok(bundle())),
            registrations: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    fn log(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_history(&self, records: Vec<ClaimTransaction>) {
        *self.history.lock().unwrap() = records;
    }

    pub fn set_stake_details(&self, details: StakeDetails) {
        *self.stake.lock().unwrap() = Ok(details);
    }

    pub fn fail_stake_details(&self) {
        *self.stake.lock().unwrap() = Err(Error::NetworkError("connection reset".into()));
    }

    pub fn set_receipts(&self, receipts: Result<Vec<RegistrationReceipt>>) {
        *self.receipts.lock().unwrap() = receipts;
    }

    pub fn set_signature(&self, bundle: Result<ClaimSignatureBundle>) {
        *self.signature.lock().unwrap() = bundle;
    }

    pub fn registrations(&self) -> Vec<RegistrationRequest> {
        self.registrations.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<SaveClaimTxnRequest> {
        self.saved.lock().unwrap().clone()
    }
}

impl AirdropBackend for FakeBackend {
    async fn airdrop_details(&self, airdrop_id: AirdropId) -> Result<AirdropDetails> {
        self.log("airdrop_details");
        Ok(AirdropDetails {
            airdrop_id,
            token_name: "AGIX".to_string(),
            total_airdrop_tokens: Decimal::from(3_000_000u64),
            airdrop_windows: vec![window(1, WindowStatus::Claim), window(2, WindowStatus::Upcoming)],
        })
    }

    async fn stake_details(&self, _: &str, _: AirdropId, _: WindowId) -> Result<StakeDetails> {
        self.log("stake_details");
        self.stake.lock().unwrap().clone()
    }

    async fn claim_history(&self, _: &str, _: AirdropId) -> Result<Vec<ClaimTransaction>> {
        self.log("claim_history");
        Ok(self.history.lock().unwrap().clone())
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<Vec<RegistrationReceipt>> {
        self.log("register");
        self.registrations.lock().unwrap().push(request.clone());
        self.receipts.lock().unwrap().clone()
    }

    async fn claim_signature(&self, _: &str, _: AirdropId, _: WindowId) -> Result<ClaimSignatureBundle> {
        self.log("claim_signature");
        self.signature.lock().unwrap().clone()
    }

    async fn save_claim_txn(&self, request: &SaveClaimTxnRequest) -> Result<()> {
        self.log("save_claim_txn");
        self.saved.lock().unwrap().push(request.clone());
        Ok(())
    }
}

// ─── Wallet signer ───────────────────────────────────────────────────

pub struct FakeSigner {
    signed: Mutex<Vec<Vec<SignValue>>>,
    payload: Mutex<Result<SignedPayload>>,
}

impl Default for FakeSigner {
    fn default() -> Self {
        Self {
            signed: Mutex::new(Vec::new()),
            payload: Mutex::new(Ok(SignedPayload {
                signature: Some("0xwalletsig".to_string()),
                block_number: 15_000_000,
            })),
        }
    }
}

impl FakeSigner {
    pub fn returning(payload: Result<SignedPayload>) -> Self {
        Self {
            payload: Mutex::new(payload),
            ..Self::default()
        }
    }

    pub fn signed(&self) -> Vec<Vec<SignValue>> {
        self.signed.lock().unwrap().clone()
    }
}

impl WalletSigner for FakeSigner {
    async fn sign(&self, values: &[SignValue]) -> Result<SignedPayload> {
        self.signed.lock().unwrap().push(values.to_vec());
        self.payload.lock().unwrap().clone()
    }

    async fn signature(&self, values: &[SignValue]) -> Result<String> {
        self.signed.lock().unwrap().push(values.to_vec());
        let payload = self.payload.lock().unwrap().clone()?;
        payload
            .signature
            .ok_or_else(|| Error::SignatureError("wallet returned no signature".into()))
    }
}

// ─── Source-chain contract ───────────────────────────────────────────

pub struct FakePending {
    hash: String,
    receipt: Result<bool>,
}

impl PendingTransaction for FakePending {
    fn hash(&self) -> &str {
        &self.hash
    }

    async fn wait(self) -> Result<TxReceipt> {
        let status = self.receipt?;
        Ok(TxReceipt {
            transaction_hash: self.hash,
            status,
        })
    }
}

pub struct FakeContract {
    pub stakes: Mutex<Vec<StakeCall>>,
    pub claims: Mutex<Vec<ContractClaimCall>>,
    submit: Mutex<Result<()>>,
    receipt: Mutex<Result<bool>>,
}

impl Default for FakeContract {
    fn default() -> Self {
        Self {
            stakes: Mutex::new(Vec::new()),
            claims: Mutex::new(Vec::new()),
            submit: Mutex::new(Ok(())),
            receipt: Mutex::new(Ok(true)),
        }
    }
}

impl FakeContract {
    pub fn rejecting(err: Error) -> Self {
        Self {
            submit: Mutex::new(Err(err)),
            ..Self::default()
        }
    }

    pub fn with_receipt(status: Result<bool>) -> Self {
        Self {
            receipt: Mutex::new(status),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.stakes.lock().unwrap().len() + self.claims.lock().unwrap().len()
    }

    fn pending(&self) -> Result<FakePending> {
        self.submit.lock().unwrap().clone()?;
        Ok(FakePending {
            hash: "0xstaketx".to_string(),
            receipt: self.receipt.lock().unwrap().clone(),
        })
    }
}

impl AirdropContract for FakeContract {
    type Pending = FakePending;

    async fn stake(&self, call: StakeCall) -> Result<FakePending> {
        self.stakes.lock().unwrap().push(call);
        self.pending()
    }

    async fn claim(&self, call: ContractClaimCall) -> Result<FakePending> {
        self.claims.lock().unwrap().push(call);
        self.pending()
    }
}

// ─── Target-chain transfer ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TransferCall {
    pub wallet: WalletKind,
    pub destination: String,
    pub amount: String,
    pub metadata: TransferMetadata,
}

pub struct FakeTransfer {
    pub transfers: Mutex<Vec<TransferCall>>,
    result: Mutex<Result<String>>,
}

impl Default for FakeTransfer {
    fn default() -> Self {
        Self {
            transfers: Mutex::new(Vec::new()),
            result: Mutex::new(Ok("cardanotx".to_string())),
        }
    }
}

impl FakeTransfer {
    pub fn failing(err: Error) -> Self {
        Self {
            result: Mutex::new(Err(err)),
            ..Self::default()
        }
    }

    pub fn transfers(&self) -> Vec<TransferCall> {
        self.transfers.lock().unwrap().clone()
    }
}

impl TokenTransfer for FakeTransfer {
    async fn transfer(
        &self,
        wallet: WalletKind,
        destination: &str,
        amount: &str,
        metadata: &TransferMetadata,
    ) -> Result<String> {
        self.transfers.lock().unwrap().push(TransferCall {
            wallet,
            destination: destination.to_string(),
            amount: amount.to_string(),
            metadata: metadata.clone(),
        });
        self.result.lock().unwrap().clone()
    }
}
