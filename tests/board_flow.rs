//! End-to-end board flows over the in-memory gateway

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use bounty_board::{
    record_key, reveal, BoardError, Bounty, BountyBoard, BountyStatus, Gateway, GatewayError,
    MemoryGateway, SessionParams, SignerGateway, TxReceipt, Wallet, WalletError, INDEX_KEY,
};

struct StaticWallet {
    address: String,
}

impl StaticWallet {
    fn new(address: &str) -> Arc<Self> {
        Arc::new(Self {
            address: address.to_string(),
        })
    }
}

#[async_trait]
impl Wallet for StaticWallet {
    fn address(&self) -> String {
        self.address.clone()
    }

    fn chain_id(&self) -> u64 {
        8009
    }

    async fn sign_message(&self, _message: &str) -> Result<Vec<u8>, WalletError> {
        Ok(vec![0u8; 64])
    }
}

/// Gateway that simulates concurrent creators: before each of the first
/// `races` compare-and-set calls it appends a rival id to the index, so the
/// caller's expectation goes stale and the swap is refused.
struct ContendedGateway {
    inner: Arc<MemoryGateway>,
    races: AtomicUsize,
    rivals: AtomicUsize,
}

impl ContendedGateway {
    fn new(inner: Arc<MemoryGateway>, races: usize) -> Arc<Self> {
        Arc::new(Self {
            inner,
            races: AtomicUsize::new(races),
            rivals: AtomicUsize::new(0),
        })
    }

    async fn inject_rival(&self) {
        let n = self.rivals.fetch_add(1, Ordering::SeqCst);
        let current = self.inner.get_data(INDEX_KEY).await.unwrap();
        let mut ids: Vec<String> = if current.is_empty() {
            Vec::new()
        } else {
            serde_json::from_slice(&current).unwrap()
        };
        ids.push(format!("rival-{}", n));
        self.inner.seed(INDEX_KEY, &serde_json::to_vec(&ids).unwrap());
    }
}

#[async_trait]
impl Gateway for ContendedGateway {
    async fn is_available(&self) -> Result<bool, GatewayError> {
        self.inner.is_available().await
    }

    async fn get_data(&self, key: &str) -> Result<Vec<u8>, GatewayError> {
        self.inner.get_data(key).await
    }

    async fn address(&self) -> Result<String, GatewayError> {
        self.inner.address().await
    }
}

#[async_trait]
impl SignerGateway for ContendedGateway {
    async fn set_data(&self, key: &str, value: &[u8]) -> Result<TxReceipt, GatewayError> {
        self.inner.set_data(key, value).await
    }

    async fn compare_and_set(
        &self,
        key: &str,
        expected: &[u8],
        value: &[u8],
    ) -> Result<bool, GatewayError> {
        if key == INDEX_KEY {
            let races = self.races.load(Ordering::SeqCst);
            if races > 0 {
                self.races.store(races - 1, Ordering::SeqCst);
                self.inject_rival().await;
            }
        }
        self.inner.compare_and_set(key, expected, value).await
    }
}

fn board_with_wallet(gateway: &Arc<MemoryGateway>, address: &str) -> BountyBoard {
    BountyBoard::new(
        gateway.clone() as Arc<dyn SignerGateway>,
        Some(StaticWallet::new(address) as Arc<dyn Wallet>),
    )
}

fn seed_record(gateway: &MemoryGateway, id: &str, json: &str) {
    gateway.seed(&record_key(id), json.as_bytes());
}

fn seed_index(gateway: &MemoryGateway, ids: &[&str]) {
    let json = serde_json::to_vec(ids).unwrap();
    gateway.seed(INDEX_KEY, &json);
}

fn find<'a>(bounties: &'a [Bounty], id: &str) -> Option<&'a Bounty> {
    bounties.iter().find(|b| b.id == id)
}

#[tokio::test]
async fn sync_with_absent_index_yields_empty_list() {
    let gateway = Arc::new(MemoryGateway::new());
    let board = BountyBoard::new(gateway.clone() as Arc<dyn SignerGateway>, None);

    assert!(board.sync().await);
    assert!(board.bounties().is_empty());
}

#[tokio::test]
async fn sync_with_garbage_index_yields_empty_list() {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.seed(INDEX_KEY, b"{definitely not json");
    let board = BountyBoard::new(gateway.clone() as Arc<dyn SignerGateway>, None);

    assert!(board.sync().await);
    assert!(board.bounties().is_empty());
}

#[tokio::test]
async fn sync_skips_missing_and_malformed_records() {
    let gateway = Arc::new(MemoryGateway::new());
    seed_index(&gateway, &["good", "missing", "broken"]);
    seed_record(
        &gateway,
        "good",
        r#"{"title":"t","reward":"1","description":"d","timestamp":10,"creator":"0xabc"}"#,
    );
    seed_record(&gateway, "broken", "not json at all");

    let board = BountyBoard::new(gateway.clone() as Arc<dyn SignerGateway>, None);
    assert!(board.sync().await);

    let bounties = board.bounties();
    assert_eq!(bounties.len(), 1);
    assert_eq!(bounties[0].id, "good");
    // defaults applied for absent fields
    assert_eq!(bounties[0].status, BountyStatus::Open);
    assert_eq!(bounties[0].submissions_count, 0);
}

#[tokio::test]
async fn sync_orders_newest_first() {
    let gateway = Arc::new(MemoryGateway::new());
    seed_index(&gateway, &["old", "new", "mid"]);
    for (id, ts) in [("old", 100), ("new", 300), ("mid", 200)] {
        seed_record(
            &gateway,
            id,
            &format!(
                r#"{{"title":"t","reward":"1","description":"d","timestamp":{},"creator":"0xabc"}}"#,
                ts
            ),
        );
    }

    let board = BountyBoard::new(gateway.clone() as Arc<dyn SignerGateway>, None);
    board.sync().await;

    let ids: Vec<String> = board.bounties().into_iter().map(|b| b.id).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[tokio::test]
async fn unavailable_gateway_keeps_previous_list() {
    let gateway = Arc::new(MemoryGateway::new());
    seed_index(&gateway, &["a"]);
    seed_record(
        &gateway,
        "a",
        r#"{"title":"t","reward":"1","description":"d","timestamp":10,"creator":"0xabc"}"#,
    );

    let board = BountyBoard::new(gateway.clone() as Arc<dyn SignerGateway>, None);
    assert!(board.sync().await);
    assert_eq!(board.bounties().len(), 1);

    gateway.set_available(false);
    assert!(!board.sync().await);
    // prior state retained, not cleared
    assert_eq!(board.bounties().len(), 1);
}

#[tokio::test]
async fn create_writes_record_and_index() {
    let gateway = Arc::new(MemoryGateway::new());
    // an older bounty already on the board
    seed_index(&gateway, &["earlier"]);
    seed_record(
        &gateway,
        "earlier",
        r#"{"title":"old","reward":"1","description":"d","timestamp":100,"creator":"0xother"}"#,
    );

    let board = board_with_wallet(&gateway, "0xAbCdEf");
    let id = board
        .create("Fix boss AI", 1.5, "Make the boss smarter")
        .await
        .unwrap();

    // create triggers a full resync
    let bounties = board.bounties();
    assert_eq!(bounties.len(), 2);
    // newest timestamp sorts first
    assert_eq!(bounties[0].id, id);

    let created = find(&bounties, &id).unwrap();
    assert_eq!(created.title, "Fix boss AI");
    assert_eq!(created.status, BountyStatus::Open);
    assert_eq!(created.submissions_count, 0);
    assert_eq!(created.creator, "0xAbCdEf");
    assert_eq!(created.reward_value(), 1.5);
    // stored reward is the tagged encoding, not the raw number
    assert!(created.reward.starts_with("FHE-"));

    // the index now holds both ids
    let index: Vec<String> =
        serde_json::from_slice(&gateway.get_data(INDEX_KEY).await.unwrap()).unwrap();
    assert_eq!(index, vec!["earlier".to_string(), id]);
}

#[tokio::test]
async fn create_without_wallet_is_unauthenticated_and_writes_nothing() {
    let gateway = Arc::new(MemoryGateway::new());
    let board = BountyBoard::new(gateway.clone() as Arc<dyn SignerGateway>, None);

    let result = board.create("t", 1.0, "d").await;
    assert!(matches!(result, Err(BoardError::Unauthenticated)));
    assert!(gateway.get_data(INDEX_KEY).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_surfaces_user_rejection_distinctly() {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.set_reject_writes(true);

    let board = board_with_wallet(&gateway, "0xabc");
    let result = board.create("t", 1.0, "d").await;
    assert!(matches!(result, Err(BoardError::Rejected)));
}

#[tokio::test]
async fn index_append_retries_after_lost_race() {
    let inner = Arc::new(MemoryGateway::new());
    let gateway = ContendedGateway::new(inner.clone(), 1);

    let board = BountyBoard::new(
        gateway as Arc<dyn SignerGateway>,
        Some(StaticWallet::new("0xabc") as Arc<dyn Wallet>),
    );
    let id = board.create("t", 1.0, "d").await.unwrap();

    // the rival's entry and ours both survive the race
    let index: Vec<String> =
        serde_json::from_slice(&inner.get_data(INDEX_KEY).await.unwrap()).unwrap();
    assert!(index.contains(&"rival-0".to_string()));
    assert!(index.contains(&id));
    assert_eq!(index.len(), 2);
}

#[tokio::test]
async fn index_append_gives_up_under_constant_contention() {
    let inner = Arc::new(MemoryGateway::new());
    let gateway = ContendedGateway::new(inner.clone(), usize::MAX);

    let board = BountyBoard::new(
        gateway as Arc<dyn SignerGateway>,
        Some(StaticWallet::new("0xabc") as Arc<dyn Wallet>),
    );
    let result = board.create("t", 1.0, "d").await;
    assert!(matches!(result, Err(BoardError::IndexContention)));
}

#[tokio::test]
async fn complete_changes_only_status() {
    let gateway = Arc::new(MemoryGateway::new());
    seed_index(&gateway, &["job"]);
    // record carries a field this client does not know about
    seed_record(
        &gateway,
        "job",
        r#"{"title":"t","reward":"FHE-MS41","description":"d","timestamp":42,"creator":"0xCafe","submissionsCount":3,"milestones":[1,2]}"#,
    );
    let before: serde_json::Value =
        serde_json::from_slice(&gateway.get_data(&record_key("job")).await.unwrap()).unwrap();

    let board = board_with_wallet(&gateway, "0xcafe");
    board.complete("job").await.unwrap();

    let after: serde_json::Value =
        serde_json::from_slice(&gateway.get_data(&record_key("job")).await.unwrap()).unwrap();
    assert_eq!(after["status"], "completed");
    for field in ["title", "reward", "description", "timestamp", "creator"] {
        assert_eq!(after[field], before[field], "field {} changed", field);
    }
    assert_eq!(after["submissionsCount"], before["submissionsCount"]);
    // unknown fields survive the rewrite
    assert_eq!(after["milestones"], before["milestones"]);

    assert_eq!(
        board.bounties()[0].status,
        BountyStatus::Completed,
        "resync reflects the flip"
    );
}

#[tokio::test]
async fn complete_missing_bounty_is_not_found_and_writes_nothing() {
    let gateway = Arc::new(MemoryGateway::new());
    let board = board_with_wallet(&gateway, "0xabc");

    let result = board.complete("ghost").await;
    assert!(matches!(result, Err(BoardError::NotFound(_))));
    assert!(gateway
        .get_data(&record_key("ghost"))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn complete_by_non_creator_is_refused() {
    let gateway = Arc::new(MemoryGateway::new());
    seed_index(&gateway, &["job"]);
    seed_record(
        &gateway,
        "job",
        r#"{"title":"t","reward":"1","description":"d","timestamp":42,"creator":"0xCafe"}"#,
    );

    let board = board_with_wallet(&gateway, "0xother");
    let result = board.complete("job").await;
    assert!(matches!(result, Err(BoardError::NotCreator)));

    let raw: serde_json::Value =
        serde_json::from_slice(&gateway.get_data(&record_key("job")).await.unwrap()).unwrap();
    assert_eq!(raw["status"], serde_json::Value::Null);
}

#[tokio::test]
async fn creator_check_is_case_insensitive() {
    let gateway = Arc::new(MemoryGateway::new());
    seed_index(&gateway, &["job"]);
    seed_record(
        &gateway,
        "job",
        r#"{"title":"t","reward":"1","description":"d","timestamp":42,"creator":"0xCAFE"}"#,
    );

    let board = board_with_wallet(&gateway, "0xcafe");
    assert!(board.complete("job").await.is_ok());
}

#[tokio::test]
async fn reveal_round_trip_through_board() {
    let gateway = Arc::new(MemoryGateway::new());
    seed_index(&gateway, &["job"]);
    seed_record(
        &gateway,
        "job",
        r#"{"title":"t","reward":"1","description":"the secret plan","timestamp":42,"creator":"0xCafe"}"#,
    );

    let wallet = StaticWallet::new("0xcafe");
    let board = BountyBoard::new(
        gateway.clone() as Arc<dyn SignerGateway>,
        Some(wallet.clone() as Arc<dyn Wallet>),
    );
    board.sync().await;

    let bounty = board.bounties().into_iter().next().unwrap();
    let session = SessionParams::new(gateway.address().await.unwrap(), wallet.chain_id(), 30);
    let revealed = reveal(
        Some(wallet.as_ref()),
        &session,
        &bounty.encrypted_description,
    )
    .await
    .unwrap();
    assert_eq!(revealed.as_deref(), Some("the secret plan"));
}
