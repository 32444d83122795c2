//! In-memory ledger with token service semantics
//!
//! Decodes the calldata the harness sends and applies it to a small world
//! state of HBAR balances, token holdings, allowances and associations.
//! Each transaction runs against a copy of the state that replaces the
//! original only if every rule passes, so a reverted `cryptoTransfer`
//! moves nothing. The signer's fee is charged either way.

use async_trait::async_trait;
use codec::abi::{
    is_call, CREATE_FUNGIBLE_TOKEN, CREATE_NON_FUNGIBLE_TOKEN, CRYPTO_TRANSFER, ERC20_ALLOWANCE,
    ERC20_APPROVE, ERC20_BALANCE_OF, ERC20_TOTAL_SUPPLY, ERC721_APPROVE, ERC721_GET_APPROVED,
    ERC721_OWNER_OF, HBAR_ALLOWANCE, HBAR_APPROVE, HRC719_ASSOCIATE, HRC719_IS_ASSOCIATED,
    MINT_TOKEN,
};
use codec::hts::{self, HederaTokenSpec, MintResult};
use codec::{erc20, erc721, hrc632, hrc719, outputs};
use config::constants::{tokens, HTS_SUCCESS};
use network::{ContractCall, Identity, Ledger, LedgerError, Participants, ReadCall, Receipt, TxStatus};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};
use token_service::context::system_contract_address;
use tracing::debug;
use types::{Address, CompositeTransfer, Hbar, TokenId, H256, U256};

/// Status name a rejected transaction reverts with
type Revert = &'static str;

const INVALID_BODY: Revert = "INVALID_TRANSACTION_BODY";

#[derive(Debug, Clone)]
pub struct MockLedgerConfig {
    /// Starting balance of every participant
    pub opening_balance: Hbar,
    /// Charged to the signer of every transaction, reverted or not
    pub flat_fee: Hbar,
    /// Minimum `value` of a token creation call
    pub create_fee: Hbar,
    /// Entity number of the first created token
    pub first_entity_num: u64,
}

impl Default for MockLedgerConfig {
    fn default() -> Self {
        Self {
            opening_balance: Hbar::from_tinybars(1_000 * types::TINYBARS_PER_HBAR),
            flat_fee: Hbar::from_tinybars(5_000_000),
            create_fee: Hbar::from_tinybars(
                config::constants::transactions::DEFAULT_TOKEN_CREATE_FEE_HBAR
                    * types::TINYBARS_PER_HBAR,
            ),
            first_entity_num: 5_000,
        }
    }
}

#[derive(Debug, Clone)]
enum Holdings {
    Fungible {
        total_supply: u64,
        balances: HashMap<Address, u64>,
        /// (owner, spender) → units
        allowances: HashMap<(Address, Address), u64>,
    },
    NonFungible {
        max_supply: Option<u64>,
        owners: BTreeMap<i64, Address>,
        approvals: HashMap<i64, Address>,
    },
}

#[derive(Debug, Clone)]
struct MockToken {
    name: String,
    symbol: String,
    treasury: Address,
    associated: HashSet<Address>,
    holdings: Holdings,
}

#[derive(Debug, Clone, Default)]
struct WorldState {
    /// Tinybars
    hbar: HashMap<Address, i64>,
    /// (owner, spender) → tinybars
    hbar_allowances: HashMap<(Address, Address), i64>,
    tokens: HashMap<Address, MockToken>,
    next_entity: u64,
}

struct Inner {
    world: WorldState,
    results: HashMap<H256, Vec<u8>>,
    tx_count: u64,
}

pub struct MockLedger {
    config: MockLedgerConfig,
    participants: Participants,
    inner: Mutex<Inner>,
}

fn success_output() -> Vec<u8> {
    outputs::encode_uint(U256::from(HTS_SUCCESS as u64))
}

fn magnitude(amount: i64) -> Result<u64, Revert> {
    if amount == 0 {
        return Err("INVALID_ACCOUNT_AMOUNTS");
    }
    Ok(amount.unsigned_abs())
}

impl MockLedger {
    /// Fresh ledger with Treasury, Alice and Bob funded
    pub fn new(config: MockLedgerConfig, participants: Participants) -> Self {
        let mut world = WorldState {
            next_entity: config.first_entity_num,
            ..WorldState::default()
        };
        for identity in [&participants.treasury, &participants.alice, &participants.bob] {
            world
                .hbar
                .insert(identity.address(), config.opening_balance.to_tinybars());
        }

        Self {
            config,
            participants,
            inner: Mutex::new(Inner {
                world,
                results: HashMap::new(),
                tx_count: 0,
            }),
        }
    }

    pub fn participants(&self) -> &Participants {
        &self.participants
    }

    pub fn hbar_of(&self, account: Address) -> Hbar {
        Hbar::from_tinybars(self.inner.lock().world.hbar.get(&account).copied().unwrap_or(0))
    }

    /// (name, symbol) of every created token
    pub fn token_names(&self) -> Vec<(String, String)> {
        let inner = self.inner.lock();
        let mut names: Vec<_> = inner
            .world
            .tokens
            .values()
            .map(|token| (token.name.clone(), token.symbol.clone()))
            .collect();
        names.sort();
        names
    }
}

impl WorldState {
    fn debit_hbar(&mut self, account: Address, tinybars: i64) -> Result<(), Revert> {
        let balance = self.hbar.entry(account).or_insert(0);
        if *balance < tinybars {
            return Err("INSUFFICIENT_ACCOUNT_BALANCE");
        }
        *balance -= tinybars;
        Ok(())
    }

    fn execute(
        &mut self,
        sender: Address,
        call: &ContractCall,
        config: &MockLedgerConfig,
    ) -> Result<Vec<u8>, Revert> {
        let value = Hbar::from_weibars(call.value)
            .map_err(|_| INVALID_BODY)?
            .to_tinybars();
        self.debit_hbar(sender, value)?;

        let data = call.data.as_slice();
        if call.to == system_contract_address() {
            if is_call(&CRYPTO_TRANSFER, data) {
                let instruction = hts::decode_crypto_transfer(data).map_err(|_| INVALID_BODY)?;
                self.crypto_transfer(sender, &instruction)?;
                return Ok(success_output());
            }
            if is_call(&CREATE_FUNGIBLE_TOKEN, data) {
                let (spec, initial_supply, decimals) =
                    hts::decode_create_fungible_token(data).map_err(|_| INVALID_BODY)?;
                let total_supply =
                    u64::try_from(initial_supply).map_err(|_| "INVALID_TOKEN_INITIAL_SUPPLY")?;
                if decimals < 0 {
                    return Err("INVALID_TOKEN_DECIMALS");
                }
                let holdings = Holdings::Fungible {
                    total_supply,
                    balances: HashMap::from([(spec.treasury, total_supply)]),
                    allowances: HashMap::new(),
                };
                return self.create_token(sender, value, spec, holdings, config);
            }
            if is_call(&CREATE_NON_FUNGIBLE_TOKEN, data) {
                let spec = hts::decode_create_non_fungible_token(data).map_err(|_| INVALID_BODY)?;
                let max_supply = if spec.finite_supply {
                    Some(u64::try_from(spec.max_supply).map_err(|_| "INVALID_TOKEN_MAX_SUPPLY")?)
                } else {
                    None
                };
                let holdings = Holdings::NonFungible {
                    max_supply,
                    owners: BTreeMap::new(),
                    approvals: HashMap::new(),
                };
                return self.create_token(sender, value, spec, holdings, config);
            }
            if is_call(&MINT_TOKEN, data) {
                return self.mint(sender, data);
            }
            return Err("NOT_SUPPORTED");
        }

        if self.tokens.contains_key(&call.to) {
            return self.token_call(sender, call.to, data);
        }

        // HRC-632 facade of the caller's own account
        if call.to == sender && is_call(&HBAR_APPROVE, data) {
            let (spender, amount) = hrc632::decode_hbar_approve(data).map_err(|_| INVALID_BODY)?;
            if amount.is_negative() {
                return Err("NEGATIVE_ALLOWANCE_AMOUNT");
            }
            self.hbar_allowances
                .insert((sender, spender), amount.to_tinybars());
            return Ok(success_output());
        }

        Err("INVALID_CONTRACT_ID")
    }

    fn create_token(
        &mut self,
        sender: Address,
        value: i64,
        spec: HederaTokenSpec,
        holdings: Holdings,
        config: &MockLedgerConfig,
    ) -> Result<Vec<u8>, Revert> {
        if value < config.create_fee.to_tinybars() {
            return Err("INSUFFICIENT_TX_FEE");
        }
        if spec.treasury != sender {
            return Err("INVALID_SIGNATURE");
        }

        let address = TokenId::from_num(self.next_entity).to_solidity_address();
        self.next_entity += 1;
        self.tokens.insert(
            address,
            MockToken {
                name: spec.name,
                symbol: spec.symbol,
                treasury: spec.treasury,
                associated: HashSet::from([spec.treasury]),
                holdings,
            },
        );
        Ok(hts::encode_create_output(HTS_SUCCESS, address))
    }

    fn mint(&mut self, sender: Address, data: &[u8]) -> Result<Vec<u8>, Revert> {
        let (token, amount, metadata) = hts::decode_mint_token(data).map_err(|_| INVALID_BODY)?;
        let token = self.tokens.get_mut(&token).ok_or("INVALID_TOKEN_ID")?;
        if token.treasury != sender {
            return Err("INVALID_SIGNATURE");
        }

        match &mut token.holdings {
            Holdings::NonFungible {
                max_supply,
                owners,
                ..
            } => {
                if amount != 0 {
                    return Err("INVALID_TOKEN_MINT_AMOUNT");
                }
                if metadata.is_empty() || metadata.len() > tokens::MAX_NFT_MINT_BATCH {
                    return Err("BATCH_SIZE_LIMIT_EXCEEDED");
                }
                if let Some(max) = max_supply {
                    if (owners.len() + metadata.len()) as u64 > *max {
                        return Err("TOKEN_MAX_SUPPLY_REACHED");
                    }
                }

                let first = owners.keys().next_back().map_or(1, |last| last + 1);
                let serials: Vec<i64> = (first..first + metadata.len() as i64).collect();
                for serial in &serials {
                    owners.insert(*serial, token.treasury);
                }
                Ok(hts::encode_mint_output(&MintResult {
                    response_code: HTS_SUCCESS,
                    new_total_supply: owners.len() as i64,
                    serials,
                }))
            }
            Holdings::Fungible {
                total_supply,
                balances,
                ..
            } => {
                let units = u64::try_from(amount).map_err(|_| "INVALID_TOKEN_MINT_AMOUNT")?;
                if units == 0 || !metadata.is_empty() {
                    return Err("INVALID_TOKEN_MINT_AMOUNT");
                }
                *total_supply += units;
                *balances.entry(token.treasury).or_insert(0) += units;
                Ok(hts::encode_mint_output(&MintResult {
                    response_code: HTS_SUCCESS,
                    new_total_supply: *total_supply as i64,
                    serials: Vec::new(),
                }))
            }
        }
    }

    fn token_call(&mut self, sender: Address, address: Address, data: &[u8]) -> Result<Vec<u8>, Revert> {
        let token = self.tokens.get_mut(&address).ok_or("INVALID_TOKEN_ID")?;

        if is_call(&HRC719_ASSOCIATE, data) {
            if !token.associated.insert(sender) {
                return Err("TOKEN_ALREADY_ASSOCIATED_TO_ACCOUNT");
            }
            return Ok(hrc719::encode_associate_output(HTS_SUCCESS as u64));
        }

        // ERC-20 and ERC-721 `approve` share a selector; the token type decides
        match &mut token.holdings {
            Holdings::Fungible { allowances, .. } if is_call(&ERC20_APPROVE, data) => {
                let (spender, amount) = erc20::decode_approve(data).map_err(|_| INVALID_BODY)?;
                if !token.associated.contains(&sender) {
                    return Err("TOKEN_NOT_ASSOCIATED_TO_ACCOUNT");
                }
                if amount > U256::from(u64::MAX) {
                    return Err("AMOUNT_EXCEEDS_TOKEN_MAX_SUPPLY");
                }
                allowances.insert((sender, spender), amount.as_u64());
                Ok(outputs::encode_bool(true))
            }
            Holdings::NonFungible {
                owners, approvals, ..
            } if is_call(&ERC721_APPROVE, data) => {
                let (to, serial) = erc721::decode_approve(data).map_err(|_| INVALID_BODY)?;
                match owners.get(&serial) {
                    None => return Err("INVALID_NFT_ID"),
                    Some(owner) if *owner != sender => return Err("SENDER_DOES_NOT_OWN_NFT_SERIAL_NO"),
                    Some(_) => {}
                }
                if to.is_zero() {
                    approvals.remove(&serial);
                } else {
                    approvals.insert(serial, to);
                }
                Ok(Vec::new())
            }
            _ => Err("NOT_SUPPORTED"),
        }
    }

    /// Every debit made by someone other than its owner must be an approved spend
    fn crypto_transfer(&mut self, sender: Address, instruction: &CompositeTransfer) -> Result<(), Revert> {
        instruction
            .validate()
            .map_err(|_| "INVALID_ACCOUNT_AMOUNTS")?;

        for leg in &instruction.crypto.transfers {
            let units = magnitude(leg.amount)?;
            if leg.amount > 0 {
                *self.hbar.entry(leg.account).or_insert(0) += leg.amount;
                continue;
            }
            let tinybars = i64::try_from(units).map_err(|_| "INVALID_ACCOUNT_AMOUNTS")?;
            if leg.account != sender {
                if !leg.is_approval {
                    return Err("INVALID_SIGNATURE");
                }
                let allowance = self
                    .hbar_allowances
                    .get_mut(&(leg.account, sender))
                    .ok_or("SPENDER_DOES_NOT_HAVE_ALLOWANCE")?;
                if *allowance < tinybars {
                    return Err("AMOUNT_EXCEEDS_ALLOWANCE");
                }
                *allowance -= tinybars;
            }
            self.debit_hbar(leg.account, tinybars)?;
        }

        for list in &instruction.tokens {
            let token = self.tokens.get_mut(&list.token).ok_or("INVALID_TOKEN_ID")?;
            let associated = &token.associated;

            match &mut token.holdings {
                Holdings::Fungible {
                    balances,
                    allowances,
                    ..
                } => {
                    if !list.nft_transfers.is_empty() {
                        return Err("ACCOUNT_AMOUNT_TRANSFERS_ONLY_ALLOWED_FOR_FUNGIBLE_COMMON");
                    }
                    for leg in &list.transfers {
                        if !associated.contains(&leg.account) {
                            return Err("TOKEN_NOT_ASSOCIATED_TO_ACCOUNT");
                        }
                        let units = magnitude(leg.amount)?;
                        if leg.amount > 0 {
                            *balances.entry(leg.account).or_insert(0) += units;
                            continue;
                        }
                        if leg.account != sender {
                            if !leg.is_approval {
                                return Err("INVALID_SIGNATURE");
                            }
                            let allowance = allowances
                                .get_mut(&(leg.account, sender))
                                .ok_or("SPENDER_DOES_NOT_HAVE_ALLOWANCE")?;
                            if *allowance < units {
                                return Err("AMOUNT_EXCEEDS_ALLOWANCE");
                            }
                            *allowance -= units;
                        }
                        let balance = balances.entry(leg.account).or_insert(0);
                        if *balance < units {
                            return Err("INSUFFICIENT_TOKEN_BALANCE");
                        }
                        *balance -= units;
                    }
                }
                Holdings::NonFungible {
                    owners, approvals, ..
                } => {
                    if !list.transfers.is_empty() {
                        return Err("ACCOUNT_AMOUNT_TRANSFERS_ONLY_ALLOWED_FOR_FUNGIBLE_COMMON");
                    }
                    for nft in &list.nft_transfers {
                        let owner = owners.get(&nft.serial).ok_or("INVALID_NFT_ID")?;
                        if *owner != nft.sender {
                            return Err("SENDER_DOES_NOT_OWN_NFT_SERIAL_NO");
                        }
                        if !associated.contains(&nft.receiver) {
                            return Err("TOKEN_NOT_ASSOCIATED_TO_ACCOUNT");
                        }
                        if nft.sender != sender
                            && (!nft.is_approval || approvals.get(&nft.serial) != Some(&sender))
                        {
                            return Err("SPENDER_DOES_NOT_HAVE_ALLOWANCE");
                        }
                        owners.insert(nft.serial, nft.receiver);
                        approvals.remove(&nft.serial);
                    }
                }
            }
        }
        Ok(())
    }

    fn read(&self, read: &ReadCall) -> Result<Vec<u8>, Revert> {
        let data = read.data.as_slice();

        let Some(token) = self.tokens.get(&read.to) else {
            if is_call(&HBAR_ALLOWANCE, data) {
                let spender = hrc632::decode_hbar_allowance_input(data).map_err(|_| INVALID_BODY)?;
                let tinybars = self
                    .hbar_allowances
                    .get(&(read.to, spender))
                    .copied()
                    .unwrap_or(0);
                return Ok(hrc632::encode_hbar_allowance_output(
                    HTS_SUCCESS,
                    Hbar::from_tinybars(tinybars),
                ));
            }
            return Err("INVALID_CONTRACT_ID");
        };

        if is_call(&HRC719_IS_ASSOCIATED, data) {
            let caller = read.from.unwrap_or_default();
            return Ok(outputs::encode_bool(token.associated.contains(&caller)));
        }

        match &token.holdings {
            Holdings::Fungible {
                total_supply,
                balances,
                allowances,
            } => {
                if is_call(&ERC20_TOTAL_SUPPLY, data) {
                    return Ok(outputs::encode_uint(U256::from(*total_supply)));
                }
                if is_call(&ERC20_BALANCE_OF, data) {
                    let account = erc20::decode_balance_of_input(data).map_err(|_| INVALID_BODY)?;
                    let units = balances.get(&account).copied().unwrap_or(0);
                    return Ok(outputs::encode_uint(U256::from(units)));
                }
                if is_call(&ERC20_ALLOWANCE, data) {
                    let key = erc20::decode_allowance_input(data).map_err(|_| INVALID_BODY)?;
                    let units = allowances.get(&key).copied().unwrap_or(0);
                    return Ok(outputs::encode_uint(U256::from(units)));
                }
                Err("NOT_SUPPORTED")
            }
            Holdings::NonFungible {
                owners, approvals, ..
            } => {
                if is_call(&ERC20_TOTAL_SUPPLY, data) {
                    return Ok(outputs::encode_uint(U256::from(owners.len())));
                }
                if is_call(&ERC20_BALANCE_OF, data) {
                    let account = erc20::decode_balance_of_input(data).map_err(|_| INVALID_BODY)?;
                    let held = owners.values().filter(|owner| **owner == account).count();
                    return Ok(outputs::encode_uint(U256::from(held)));
                }
                if is_call(&ERC721_OWNER_OF, data) {
                    let serial = erc721::decode_owner_of_input(data).map_err(|_| INVALID_BODY)?;
                    let owner = owners.get(&serial).ok_or("INVALID_NFT_ID")?;
                    return Ok(outputs::encode_address(*owner));
                }
                if is_call(&ERC721_GET_APPROVED, data) {
                    let serial =
                        erc721::decode_get_approved_input(data).map_err(|_| INVALID_BODY)?;
                    if !owners.contains_key(&serial) {
                        return Err("INVALID_NFT_ID");
                    }
                    let approved = approvals.get(&serial).copied().unwrap_or_default();
                    return Ok(outputs::encode_address(approved));
                }
                Err("NOT_SUPPORTED")
            }
        }
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn send(&self, signer: &Identity, call: ContractCall) -> Result<Receipt, LedgerError> {
        let mut inner = self.inner.lock();
        let sender = signer.address();

        // Payer check happens before the transaction reaches consensus
        inner
            .world
            .debit_hbar(sender, self.config.flat_fee.to_tinybars())
            .map_err(|_| LedgerError::rpc("eth_sendRawTransaction", "INSUFFICIENT_PAYER_BALANCE"))?;

        inner.tx_count += 1;
        let tx_hash = H256::from_low_u64_be(0xe2e0_0000 + inner.tx_count);
        let block_number = Some(inner.tx_count);

        let mut draft = inner.world.clone();
        let receipt = match draft.execute(sender, &call, &self.config) {
            Ok(output) => {
                inner.world = draft;
                inner.results.insert(tx_hash, output);
                debug!("mock 0x{:x} from {} succeeded", tx_hash, signer.role());
                Receipt {
                    tx_hash,
                    status: TxStatus::Success,
                    block_number,
                    gas_used: Some(U256::from(call.gas_limit.min(80_000))),
                    revert_reason: None,
                }
            }
            Err(reason) => {
                debug!("mock 0x{:x} from {} reverted: {}", tx_hash, signer.role(), reason);
                Receipt {
                    tx_hash,
                    status: TxStatus::Reverted,
                    block_number,
                    gas_used: Some(U256::from(call.gas_limit.min(80_000))),
                    revert_reason: Some(reason.to_string()),
                }
            }
        };
        Ok(receipt)
    }

    async fn call(&self, read: ReadCall) -> Result<Vec<u8>, LedgerError> {
        self.inner
            .lock()
            .world
            .read(&read)
            .map_err(|reason| LedgerError::rpc("eth_call", reason))
    }

    async fn balance(&self, account: Address) -> Result<U256, LedgerError> {
        Ok(self.hbar_of(account).to_weibars())
    }

    async fn call_result(&self, tx_hash: H256) -> Result<Vec<u8>, LedgerError> {
        self.inner
            .lock()
            .results
            .get(&tx_hash)
            .cloned()
            .ok_or(LedgerError::UnknownTransaction { tx_hash })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{dev_credentials, MOCK_CHAIN_ID};
    use codec::allowance::{allowance_query, approve_call};
    use types::Allowance;

    fn ledger() -> MockLedger {
        let participants =
            Participants::from_credentials(&dev_credentials().unwrap(), MOCK_CHAIN_ID).unwrap();
        MockLedger::new(MockLedgerConfig::default(), participants)
    }

    async fn read(ledger: &MockLedger, to: Address, from: Option<Address>, data: Vec<u8>) -> Vec<u8> {
        ledger.call(ReadCall { to, from, data }).await.unwrap()
    }

    fn nft_spec(treasury: Address) -> HederaTokenSpec {
        HederaTokenSpec {
            name: "Collection".to_string(),
            symbol: "COL".to_string(),
            treasury,
            memo: String::new(),
            finite_supply: true,
            max_supply: 2,
            freeze_default: false,
            keys: vec![],
            auto_renew_account: treasury,
            auto_renew_period_secs: tokens::AUTO_RENEW_PERIOD_SECS,
        }
    }

    async fn create_collection(ledger: &MockLedger) -> Address {
        let treasury = &ledger.participants().treasury;
        let data = hts::create_non_fungible_token(&nft_spec(treasury.address())).unwrap();
        let call = ContractCall::new(system_contract_address(), data, 2_500_000)
            .with_value(MockLedgerConfig::default().create_fee.to_weibars());
        let receipt = ledger.send(treasury, call).await.unwrap();
        assert!(receipt.is_success());

        let output = ledger.call_result(receipt.tx_hash).await.unwrap();
        let (code, address) = hts::decode_create_result(false, &output).unwrap();
        assert_eq!(code, HTS_SUCCESS);
        address
    }

    #[tokio::test]
    async fn test_hbar_allowance_through_owner_facade() {
        let ledger = ledger();
        let treasury = ledger.participants().treasury.clone();
        let alice = ledger.participants().alice.address();
        let allowance = Allowance::Native {
            owner: treasury.address(),
            spender: alice,
            amount: Hbar::ONE,
        };

        let call = approve_call(&allowance).unwrap();
        let receipt = ledger
            .send(&treasury, ContractCall::new(call.to, call.data, 1_000_000))
            .await
            .unwrap();
        assert!(receipt.is_success());

        let query = allowance_query(&allowance).unwrap();
        let output = read(&ledger, query.to, query.from, query.data).await;
        let (code, amount) = hrc632::decode_hbar_allowance(&output).unwrap();
        assert_eq!(code, 22);
        assert_eq!(amount, U256::from(100_000_000u64));
    }

    #[tokio::test]
    async fn test_create_fee_and_mint_limits() {
        let ledger = ledger();
        let treasury = ledger.participants().treasury.clone();

        // No value attached
        let data = hts::create_non_fungible_token(&nft_spec(treasury.address())).unwrap();
        let receipt = ledger
            .send(&treasury, ContractCall::new(system_contract_address(), data, 2_500_000))
            .await
            .unwrap();
        assert_eq!(receipt.revert_reason.as_deref(), Some("INSUFFICIENT_TX_FEE"));

        let collection = create_collection(&ledger).await;
        let mint = |count: usize| {
            let metadata = (0..count).map(|i| vec![i as u8]).collect();
            ContractCall::new(system_contract_address(), hts::mint_nfts(collection, metadata).unwrap(), 1_000_000)
        };

        let receipt = ledger.send(&treasury, mint(2)).await.unwrap();
        let result = hts::decode_mint_result(&ledger.call_result(receipt.tx_hash).await.unwrap()).unwrap();
        assert_eq!(result.serials, vec![1, 2]);

        let receipt = ledger.send(&treasury, mint(1)).await.unwrap();
        assert_eq!(receipt.revert_reason.as_deref(), Some("TOKEN_MAX_SUPPLY_REACHED"));

        let owner = read(&ledger, collection, None, erc721::owner_of(2).unwrap()).await;
        assert_eq!(erc721::decode_owner_of(&owner).unwrap(), treasury.address());
    }

    #[tokio::test]
    async fn test_reverted_transfer_moves_nothing_but_charges_fee() {
        let ledger = ledger();
        let treasury = ledger.participants().treasury.clone();
        let alice = ledger.participants().alice.clone();
        let bob = ledger.participants().bob.address();
        let collection = create_collection(&ledger).await;
        ledger
            .send(
                &treasury,
                ContractCall::new(system_contract_address(), hts::mint_nfts(collection, vec![vec![1]]).unwrap(), 1_000_000),
            )
            .await
            .unwrap();

        let alice_before = ledger.hbar_of(alice.address());
        let treasury_before = ledger.hbar_of(treasury.address());

        // HBAR leg has no allowance behind it; the NFT leg alone would also fail
        let instruction = CompositeTransfer::builder()
            .hbar(treasury.address(), bob, Hbar::ONE, true)
            .unwrap()
            .nft(collection, treasury.address(), bob, 1, true)
            .build()
            .unwrap();
        let call = ContractCall::new(
            system_contract_address(),
            hts::crypto_transfer(&instruction).unwrap(),
            1_000_000,
        );
        let receipt = ledger.send(&alice, call).await.unwrap();

        assert_eq!(receipt.status, TxStatus::Reverted);
        assert_eq!(
            receipt.revert_reason.as_deref(),
            Some("SPENDER_DOES_NOT_HAVE_ALLOWANCE")
        );
        assert_eq!(ledger.hbar_of(treasury.address()), treasury_before);
        assert_eq!(ledger.hbar_of(bob), MockLedgerConfig::default().opening_balance);
        assert_eq!(
            ledger.hbar_of(alice.address()).to_tinybars(),
            alice_before.to_tinybars() - MockLedgerConfig::default().flat_fee.to_tinybars()
        );

        let owner = read(&ledger, collection, None, erc721::owner_of(1).unwrap()).await;
        assert_eq!(erc721::decode_owner_of(&owner).unwrap(), treasury.address());
    }

    #[tokio::test]
    async fn test_double_association_reverts() {
        let ledger = ledger();
        let bob = ledger.participants().bob.clone();
        let collection = create_collection(&ledger).await;
        let associate = || ContractCall::new(collection, hrc719::associate().unwrap(), 1_000_000);

        assert!(ledger.send(&bob, associate()).await.unwrap().is_success());
        let receipt = ledger.send(&bob, associate()).await.unwrap();
        assert_eq!(
            receipt.revert_reason.as_deref(),
            Some("TOKEN_ALREADY_ASSOCIATED_TO_ACCOUNT")
        );

        let output = read(&ledger, collection, Some(bob.address()), hrc719::is_associated().unwrap()).await;
        assert!(hrc719::decode_is_associated(&output).unwrap());
    }
}
