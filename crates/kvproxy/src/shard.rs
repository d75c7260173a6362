use std::time::Duration;

use proto_grpc::etcdserverpb::kv_client::KvClient;
use proto_grpc::etcdserverpb::lease_client::LeaseClient;
use proto_grpc::etcdserverpb::watch_client::WatchClient;
use tonic::transport::{Channel, Endpoint};

use crate::config::{Config, ShardConfig};
use crate::{Error, Result};

/// Lower bound of the key space; the first shard always starts here.
pub const KEY_SPACE_START: &[u8] = &[0x00];
/// Upper bound of the key space; the last shard always ends here.
pub const KEY_SPACE_END: &[u8] = &[0xff];

/// A handle to one shard server: stubs for every service the proxy fans out
/// to, multiplexed over a single lazily-dialed channel. Cloning is cheap and
/// clones share the underlying connection.
#[derive(Clone)]
pub struct ShardClient {
    id: usize,
    kv: KvClient<Channel>,
    watch: WatchClient<Channel>,
    lease: LeaseClient<Channel>,
}

impl ShardClient {
    /// Dial the shard at `address` ("host:port", plaintext). The connection
    /// is established lazily on first use; only a malformed address fails
    /// here.
    pub fn connect(id: usize, address: &str) -> Result<Self> {
        let channel = Endpoint::from_shared(format!("http://{address}"))
            .map_err(|_| Error::InvalidEndpoint(address.to_string()))?
            .connect_timeout(Duration::from_secs(5))
            .connect_lazy();

        Ok(Self {
            id,
            kv: KvClient::new(channel.clone()),
            watch: WatchClient::new(channel.clone()),
            lease: LeaseClient::new(channel),
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn kv(&self) -> KvClient<Channel> {
        self.kv.clone()
    }

    pub fn watch(&self) -> WatchClient<Channel> {
        self.watch.clone()
    }

    pub fn lease(&self) -> LeaseClient<Channel> {
        self.lease.clone()
    }
}

/// One shard of the key space: the half-open range `[start, end)` and the
/// client serving it.
pub struct Shard {
    start: Vec<u8>,
    end: Vec<u8>,
    client: ShardClient,
}

impl Shard {
    pub fn new(id: usize, total: usize, config: &ShardConfig) -> Result<Self> {
        let start = if id == 0 {
            KEY_SPACE_START.to_vec()
        } else {
            config.start_key()
        };
        let end = if id == total - 1 {
            KEY_SPACE_END.to_vec()
        } else {
            config.end_key()
        };
        let client = ShardClient::connect(id, &config.address)?;
        Ok(Self { start, end, client })
    }

    /// True if the query `(key, range_end)` overlaps this shard's range.
    ///
    /// A point query (`range_end` empty) at `key == start` misses: under a
    /// contiguous layout `start` is the previous shard's exclusive `end`, and
    /// boundary ownership is decided by the `key >= end` test alone.
    pub fn contains(&self, key: &[u8], range_end: &[u8]) -> bool {
        if key >= self.end.as_slice() {
            return false;
        }
        if key > self.start.as_slice() {
            return true;
        }
        if range_end.is_empty() {
            return false;
        }
        range_end > self.start.as_slice()
    }

    pub fn start(&self) -> &[u8] {
        &self.start
    }

    pub fn end(&self) -> &[u8] {
        &self.end
    }

    pub fn client(&self) -> &ShardClient {
        &self.client
    }
}

/// The ordered, immutable set of shards partitioning the key space.
///
/// Shards are contiguous and in ascending start order:
/// `shards[i].end == shards[i+1].start`, with the first starting at
/// `KEY_SPACE_START` and the last ending at `KEY_SPACE_END`.
pub struct ShardSet {
    shards: Vec<Shard>,
}

impl ShardSet {
    pub fn from_config(config: &Config) -> Result<Self> {
        let total = config.shards.len();
        let shards = config
            .shards
            .iter()
            .enumerate()
            .map(|(id, shard)| Shard::new(id, total, shard))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { shards })
    }

    /// Resolve the query `(key, range_end)` to the clients of every
    /// overlapping shard, in ascending shard-id order.
    pub fn resolve(&self, key: &[u8], range_end: &[u8]) -> Vec<ShardClient> {
        let mut clients = Vec::new();
        let mut found = false;
        for shard in &self.shards {
            if shard.contains(key, range_end) {
                clients.push(shard.client().clone());
                found = true;
            } else if found {
                // Shards are contiguous, so the overlapping run has ended.
                break;
            }
        }
        clients
    }

    /// Client of the shard with ordinal `id`.
    pub fn client(&self, id: usize) -> ShardClient {
        self.shards[id].client().clone()
    }

    /// All shard clients, in id order.
    pub fn all(&self) -> Vec<ShardClient> {
        self.shards.iter().map(|shard| shard.client().clone()).collect()
    }

    pub fn shards(&self) -> &[Shard] {
        &self.shards
    }

    pub fn len(&self) -> usize {
        self.shards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shard(id: usize, total: usize, start: &str, end: &str) -> Shard {
        Shard::new(
            id,
            total,
            &ShardConfig {
                start: start.to_string(),
                end: end.to_string(),
                address: "127.0.0.1:2379".to_string(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn three_shard_set() -> ShardSet {
        let config = Config {
            shards: vec![
                ShardConfig {
                    end: "i".to_string(),
                    address: "127.0.0.1:23790".to_string(),
                    ..Default::default()
                },
                ShardConfig {
                    start: "i".to_string(),
                    end: "s".to_string(),
                    address: "127.0.0.1:23791".to_string(),
                    ..Default::default()
                },
                ShardConfig {
                    start: "s".to_string(),
                    address: "127.0.0.1:23792".to_string(),
                    ..Default::default()
                },
            ],
        };
        ShardSet::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn first_shard_contains() {
        let shard = shard(0, 3, "", "i");
        assert_eq!(shard.start(), KEY_SPACE_START);

        assert!(shard.contains(b"a", b""));
        assert!(!shard.contains(b"i", b""));
        // The start boundary itself is a miss for point queries.
        assert!(!shard.contains(&[0x00], b""));
        // A ranged query reaching past the start boundary overlaps.
        assert!(shard.contains(&[0x00], b"a"));
    }

    #[tokio::test]
    async fn middle_shard_contains() {
        let shard = shard(1, 3, "i", "s");

        assert!(!shard.contains(b"h", b""));
        assert!(shard.contains(b"j", b""));
        assert!(!shard.contains(b"s", b""));
        // Point query at the start boundary misses; a range reaching past it
        // overlaps.
        assert!(!shard.contains(b"i", b""));
        assert!(shard.contains(b"i", b"j"));
        assert!(shard.contains(b"a", b"j"));
        assert!(!shard.contains(b"a", b"i"));
    }

    #[tokio::test]
    async fn last_shard_contains() {
        let shard = shard(2, 3, "s", "");
        assert_eq!(shard.end(), KEY_SPACE_END);

        assert!(!shard.contains(b"r", b""));
        assert!(shard.contains(b"t", b""));
        assert!(shard.contains(b"z", b""));
    }

    #[tokio::test]
    async fn forced_bounds_keep_shards_contiguous() {
        // Configured outer bounds are ignored in favor of the forced ones.
        let config = Config {
            shards: vec![
                ShardConfig {
                    start: "c".to_string(),
                    end: "i".to_string(),
                    address: "127.0.0.1:23790".to_string(),
                    ..Default::default()
                },
                ShardConfig {
                    start: "i".to_string(),
                    end: "q".to_string(),
                    address: "127.0.0.1:23791".to_string(),
                    ..Default::default()
                },
            ],
        };
        let set = ShardSet::from_config(&config).unwrap();

        assert_eq!(set.shards()[0].start(), KEY_SPACE_START);
        assert_eq!(set.shards()[1].end(), KEY_SPACE_END);
        for pair in set.shards().windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    #[tokio::test]
    async fn resolves_point_queries_to_single_shards() {
        let set = three_shard_set();

        let resolve_ids = |key: &[u8]| -> Vec<usize> {
            set.resolve(key, b"").iter().map(|client| client.id()).collect()
        };
        assert_eq!(resolve_ids(b"a"), vec![0]);
        assert_eq!(resolve_ids(b"m"), vec![1]);
        assert_eq!(resolve_ids(b"z"), vec![2]);
    }

    #[tokio::test]
    async fn resolves_ranges_to_contiguous_shard_runs() {
        let set = three_shard_set();

        let resolve_ids = |key: &[u8], range_end: &[u8]| -> Vec<usize> {
            set.resolve(key, range_end)
                .iter()
                .map(|client| client.id())
                .collect()
        };
        assert_eq!(resolve_ids(b"a", b"t"), vec![0, 1, 2]);
        assert_eq!(resolve_ids(b"a", b"j"), vec![0, 1]);
        assert_eq!(resolve_ids(b"j", b"t"), vec![1, 2]);
        assert_eq!(resolve_ids(b"a", b"b"), vec![0]);
        assert_eq!(resolve_ids(b"j", b"k"), vec![1]);
    }

    #[tokio::test]
    async fn boundary_point_query_resolves_empty() {
        let set = three_shard_set();
        assert!(set.resolve(b"i", b"").is_empty());
    }
}
