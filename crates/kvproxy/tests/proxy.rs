//! End-to-end tests: three stub shard servers behind a real proxy, driven
//! through the generated gRPC clients over localhost TCP.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use futures::StreamExt;
use kvproxy::config::{Config, ShardConfig};
use kvproxy::kv::KvService;
use kvproxy::lease::LeaseService;
use kvproxy::shard::ShardSet;
use kvproxy::watch::WatchService;
use kvproxy::Generator;
use proto_etcd::etcdserverpb as pb;
use proto_etcd::mvccpb;
use proto_grpc::etcdserverpb::kv_client::KvClient;
use proto_grpc::etcdserverpb::kv_server::{Kv, KvServer};
use proto_grpc::etcdserverpb::lease_client::LeaseClient;
use proto_grpc::etcdserverpb::lease_server::{Lease, LeaseServer};
use proto_grpc::etcdserverpb::watch_client::WatchClient;
use proto_grpc::etcdserverpb::watch_server::{Watch, WatchServer};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_stream::wrappers::{ReceiverStream, TcpListenerStream};
use tonic::{Request, Response, Status, Streaming};

const OPEN_END: &[u8] = &[0x00];

fn header() -> pb::ResponseHeader {
    pb::ResponseHeader {
        revision: 1,
        ..Default::default()
    }
}

fn in_range(key: &[u8], start: &[u8], range_end: &[u8]) -> bool {
    if range_end.is_empty() {
        return key == start;
    }
    if range_end == OPEN_END {
        return key >= start;
    }
    key >= start && key < range_end
}

/// An in-memory shard server with a fixed key-value data set and recorders
/// for the mutations it receives.
#[derive(Clone)]
struct StubShard {
    index: i64,
    kvs: Vec<(Vec<u8>, Vec<u8>)>,
    puts: Arc<Mutex<Vec<Vec<u8>>>>,
    txns: Arc<Mutex<u32>>,
    lease_grants: Arc<Mutex<Vec<i64>>>,
}

impl StubShard {
    fn new(index: i64, data: Vec<(&str, &str)>) -> Self {
        Self {
            index,
            kvs: data
                .into_iter()
                .map(|(key, value)| (key.as_bytes().to_vec(), value.as_bytes().to_vec()))
                .collect(),
            puts: Arc::new(Mutex::new(Vec::new())),
            txns: Arc::new(Mutex::new(0)),
            lease_grants: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn matching(&self, key: &[u8], range_end: &[u8]) -> Vec<mvccpb::KeyValue> {
        self.kvs
            .iter()
            .filter(|(k, _)| in_range(k, key, range_end))
            .map(|(k, v)| mvccpb::KeyValue {
                key: k.clone(),
                value: v.clone(),
                ..Default::default()
            })
            .collect()
    }
}

#[tonic::async_trait]
impl Kv for StubShard {
    async fn range(
        &self,
        request: Request<pb::RangeRequest>,
    ) -> Result<Response<pb::RangeResponse>, Status> {
        let req = request.into_inner();
        let kvs = self.matching(&req.key, &req.range_end);
        let count = kvs.len() as i64;
        Ok(Response::new(pb::RangeResponse {
            header: Some(header()),
            kvs,
            more: false,
            count,
        }))
    }

    async fn put(
        &self,
        request: Request<pb::PutRequest>,
    ) -> Result<Response<pb::PutResponse>, Status> {
        let req = request.into_inner();
        self.puts.lock().unwrap().push(req.key);
        Ok(Response::new(pb::PutResponse {
            header: Some(header()),
            prev_kv: None,
        }))
    }

    async fn delete_range(
        &self,
        request: Request<pb::DeleteRangeRequest>,
    ) -> Result<Response<pb::DeleteRangeResponse>, Status> {
        let req = request.into_inner();
        let deleted = self.matching(&req.key, &req.range_end).len() as i64;
        Ok(Response::new(pb::DeleteRangeResponse {
            header: Some(header()),
            deleted,
            prev_kvs: Vec::new(),
        }))
    }

    async fn txn(
        &self,
        _request: Request<pb::TxnRequest>,
    ) -> Result<Response<pb::TxnResponse>, Status> {
        *self.txns.lock().unwrap() += 1;
        Ok(Response::new(pb::TxnResponse {
            header: Some(header()),
            succeeded: true,
            responses: Vec::new(),
        }))
    }

    async fn compact(
        &self,
        _request: Request<pb::CompactionRequest>,
    ) -> Result<Response<pb::CompactionResponse>, Status> {
        Err(Status::unimplemented("stub does not compact"))
    }
}

#[tonic::async_trait]
impl Watch for StubShard {
    type WatchStream = ReceiverStream<Result<pb::WatchResponse, Status>>;

    async fn watch(
        &self,
        request: Request<Streaming<pb::WatchRequest>>,
    ) -> Result<Response<Self::WatchStream>, Status> {
        let mut inbound = request.into_inner();
        let (tx, rx) = mpsc::channel(8);
        let index = self.index;

        // For every watcher created, acknowledge it and emit one canned
        // event identifying this shard.
        tokio::spawn(async move {
            while let Some(Ok(req)) = inbound.next().await {
                let Some(pb::watch_request::RequestUnion::CreateRequest(_)) = req.request_union
                else {
                    continue;
                };
                let created = pb::WatchResponse {
                    header: Some(header()),
                    watch_id: index,
                    created: true,
                    ..Default::default()
                };
                if tx.send(Ok(created)).await.is_err() {
                    return;
                }
                let event = mvccpb::Event {
                    r#type: mvccpb::event::EventType::Put as i32,
                    kv: Some(mvccpb::KeyValue {
                        key: format!("shard-{index}").into_bytes(),
                        ..Default::default()
                    }),
                    prev_kv: None,
                };
                let update = pb::WatchResponse {
                    header: Some(header()),
                    watch_id: index,
                    events: vec![event],
                    ..Default::default()
                };
                if tx.send(Ok(update)).await.is_err() {
                    return;
                }
            }
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }
}

#[tonic::async_trait]
impl Lease for StubShard {
    async fn lease_grant(
        &self,
        request: Request<pb::LeaseGrantRequest>,
    ) -> Result<Response<pb::LeaseGrantResponse>, Status> {
        let req = request.into_inner();
        self.lease_grants.lock().unwrap().push(req.id);
        Ok(Response::new(pb::LeaseGrantResponse {
            header: Some(header()),
            id: req.id,
            ttl: req.ttl,
            error: String::new(),
        }))
    }

    async fn lease_revoke(
        &self,
        _request: Request<pb::LeaseRevokeRequest>,
    ) -> Result<Response<pb::LeaseRevokeResponse>, Status> {
        Ok(Response::new(pb::LeaseRevokeResponse {
            header: Some(header()),
        }))
    }

    type LeaseKeepAliveStream = ReceiverStream<Result<pb::LeaseKeepAliveResponse, Status>>;

    async fn lease_keep_alive(
        &self,
        request: Request<Streaming<pb::LeaseKeepAliveRequest>>,
    ) -> Result<Response<Self::LeaseKeepAliveStream>, Status> {
        let mut inbound = request.into_inner();
        let (tx, rx) = mpsc::channel(8);

        tokio::spawn(async move {
            while let Some(Ok(req)) = inbound.next().await {
                let resp = pb::LeaseKeepAliveResponse {
                    header: Some(header()),
                    id: req.id,
                    ttl: 7,
                };
                if tx.send(Ok(resp)).await.is_err() {
                    return;
                }
            }
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }

    async fn lease_time_to_live(
        &self,
        request: Request<pb::LeaseTimeToLiveRequest>,
    ) -> Result<Response<pb::LeaseTimeToLiveResponse>, Status> {
        let req = request.into_inner();
        Ok(Response::new(pb::LeaseTimeToLiveResponse {
            header: Some(header()),
            id: req.id,
            ttl: 7,
            granted_ttl: 30,
            keys: vec![format!("shard-{}-key", self.index).into_bytes()],
        }))
    }

    async fn lease_leases(
        &self,
        _request: Request<pb::LeaseLeasesRequest>,
    ) -> Result<Response<pb::LeaseLeasesResponse>, Status> {
        Ok(Response::new(pb::LeaseLeasesResponse {
            header: Some(header()),
            leases: vec![pb::LeaseStatus {
                id: 100 + self.index,
            }],
        }))
    }
}

struct Cluster {
    proxy_url: String,
    shards: Vec<StubShard>,
    backends: Vec<tokio::task::JoinHandle<Result<(), tonic::transport::Error>>>,
}

/// Serve three stub shards covering `[0x00, "i")`, `["i", "s")`, and
/// `["s", 0xff)`, and a proxy in front of them.
async fn start_cluster() -> Cluster {
    let datasets = vec![vec![("a", "1"), ("b", "2")], vec![("j", "3"), ("k", "4")], vec![]];

    let mut shards = Vec::new();
    let mut addrs = Vec::new();
    let mut backends = Vec::new();
    for (index, data) in datasets.into_iter().enumerate() {
        let stub = StubShard::new(index as i64, data);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        addrs.push(listener.local_addr().unwrap().to_string());
        backends.push(tokio::spawn(
            tonic::transport::Server::builder()
                .add_service(KvServer::new(stub.clone()))
                .add_service(WatchServer::new(stub.clone()))
                .add_service(LeaseServer::new(stub.clone()))
                .serve_with_incoming(TcpListenerStream::new(listener)),
        ));
        shards.push(stub);
    }

    let config = Config {
        shards: vec![
            ShardConfig {
                end: "i".to_string(),
                address: addrs[0].clone(),
                ..Default::default()
            },
            ShardConfig {
                start: "i".to_string(),
                end: "s".to_string(),
                address: addrs[1].clone(),
                ..Default::default()
            },
            ShardConfig {
                start: "s".to_string(),
                address: addrs[2].clone(),
                ..Default::default()
            },
        ],
    };
    let shard_set = Arc::new(ShardSet::from_config(&config).unwrap());
    let id_gen = Arc::new(Generator::new(1, SystemTime::now()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let proxy_addr = listener.local_addr().unwrap();
    backends.push(tokio::spawn(
        tonic::transport::Server::builder()
            .add_service(KvServer::new(KvService::new(shard_set.clone())))
            .add_service(WatchServer::new(WatchService::new(shard_set.clone())))
            .add_service(LeaseServer::new(LeaseService::new(shard_set, id_gen)))
            .serve_with_incoming(TcpListenerStream::new(listener)),
    ));

    Cluster {
        proxy_url: format!("http://{proxy_addr}"),
        shards,
        backends,
    }
}

fn put_req(key: &str) -> pb::PutRequest {
    pb::PutRequest {
        key: key.as_bytes().to_vec(),
        value: b"v".to_vec(),
        ..Default::default()
    }
}

fn put_op(key: &str) -> pb::RequestOp {
    pb::RequestOp {
        request: Some(pb::request_op::Request::RequestPut(put_req(key))),
    }
}

#[tokio::test]
async fn put_routes_to_the_owning_shard() {
    let cluster = start_cluster().await;
    let mut kv = KvClient::connect(cluster.proxy_url.clone()).await.unwrap();

    kv.put(put_req("m")).await.unwrap();
    kv.put(put_req("a")).await.unwrap();
    kv.put(put_req("z")).await.unwrap();

    assert_eq!(*cluster.shards[0].puts.lock().unwrap(), vec![b"a".to_vec()]);
    assert_eq!(*cluster.shards[1].puts.lock().unwrap(), vec![b"m".to_vec()]);
    assert_eq!(*cluster.shards[2].puts.lock().unwrap(), vec![b"z".to_vec()]);
}

#[tokio::test]
async fn range_fans_out_and_merges_in_key_order() {
    let cluster = start_cluster().await;
    let mut kv = KvClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let resp = kv
        .range(pb::RangeRequest {
            key: b"a".to_vec(),
            range_end: b"t".to_vec(),
            ..Default::default()
        })
        .await
        .unwrap()
        .into_inner();

    let keys: Vec<&[u8]> = resp.kvs.iter().map(|kv| kv.key.as_slice()).collect();
    assert_eq!(keys, vec![b"a".as_slice(), b"b", b"j", b"k"]);
    assert_eq!(resp.count, 4);
    assert!(!resp.more);
}

#[tokio::test]
async fn point_range_hits_one_shard() {
    let cluster = start_cluster().await;
    let mut kv = KvClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let resp = kv
        .range(pb::RangeRequest {
            key: b"a".to_vec(),
            ..Default::default()
        })
        .await
        .unwrap()
        .into_inner();

    assert_eq!(resp.count, 1);
    assert_eq!(resp.kvs[0].key, b"a");
}

#[tokio::test]
async fn delete_range_sums_per_shard_counts() {
    let cluster = start_cluster().await;
    let mut kv = KvClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let resp = kv
        .delete_range(pb::DeleteRangeRequest {
            key: b"a".to_vec(),
            range_end: b"t".to_vec(),
            ..Default::default()
        })
        .await
        .unwrap()
        .into_inner();

    assert_eq!(resp.deleted, 4);
}

#[tokio::test]
async fn txn_executes_on_its_single_shard() {
    let cluster = start_cluster().await;
    let mut kv = KvClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let resp = kv
        .txn(pb::TxnRequest {
            success: vec![put_op("a"), put_op("b")],
            ..Default::default()
        })
        .await
        .unwrap()
        .into_inner();

    assert!(resp.succeeded);
    assert_eq!(*cluster.shards[0].txns.lock().unwrap(), 1);
    assert_eq!(*cluster.shards[1].txns.lock().unwrap(), 0);
    assert_eq!(*cluster.shards[2].txns.lock().unwrap(), 0);
}

#[tokio::test]
async fn cross_shard_txn_is_rejected() {
    let cluster = start_cluster().await;
    let mut kv = KvClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let status = kv
        .txn(pb::TxnRequest {
            success: vec![put_op("a"), put_op("m")],
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(status.code(), tonic::Code::Unimplemented);
    assert!(status.message().contains("txn in different shard"));
    assert_eq!(*cluster.shards[0].txns.lock().unwrap(), 0);
    assert_eq!(*cluster.shards[1].txns.lock().unwrap(), 0);
}

#[tokio::test]
async fn compact_is_not_supported() {
    let cluster = start_cluster().await;
    let mut kv = KvClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let status = kv.compact(pb::CompactionRequest::default()).await.unwrap_err();
    assert_eq!(status.code(), tonic::Code::Unimplemented);
    assert!(status.message().contains("not supported"));
}

#[tokio::test]
async fn upstream_failures_are_wrapped_with_the_shard() {
    let cluster = start_cluster().await;
    cluster.backends[1].abort();
    let mut kv = KvClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let status = kv
        .range(pb::RangeRequest {
            key: b"a".to_vec(),
            range_end: b"t".to_vec(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(
        status.message().contains("failed to do range in shard[1]"),
        "unexpected error: {status:?}"
    );
}

#[tokio::test]
async fn lease_grant_broadcasts_a_single_generated_id() {
    let cluster = start_cluster().await;
    let mut lease = LeaseClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let resp = lease
        .lease_grant(pb::LeaseGrantRequest { ttl: 30, id: 0 })
        .await
        .unwrap()
        .into_inner();

    assert_ne!(resp.id, 0);
    assert_eq!(resp.ttl, 30);
    for stub in &cluster.shards {
        assert_eq!(*stub.lease_grants.lock().unwrap(), vec![resp.id]);
    }
}

#[tokio::test]
async fn lease_time_to_live_unions_keys_across_shards() {
    let cluster = start_cluster().await;
    let mut lease = LeaseClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let resp = lease
        .lease_time_to_live(pb::LeaseTimeToLiveRequest { id: 7, keys: true })
        .await
        .unwrap()
        .into_inner();

    let keys: HashSet<Vec<u8>> = resp.keys.into_iter().collect();
    let want: HashSet<Vec<u8>> = (0..3)
        .map(|index| format!("shard-{index}-key").into_bytes())
        .collect();
    assert_eq!(keys, want);
}

#[tokio::test]
async fn lease_leases_concatenates_across_shards() {
    let cluster = start_cluster().await;
    let mut lease = LeaseClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let resp = lease
        .lease_leases(pb::LeaseLeasesRequest::default())
        .await
        .unwrap()
        .into_inner();

    let ids: HashSet<i64> = resp.leases.iter().map(|lease| lease.id).collect();
    assert_eq!(ids, HashSet::from([100, 101, 102]));
}

#[tokio::test]
async fn watch_broadcasts_to_every_shard_and_merges_responses() {
    let cluster = start_cluster().await;
    let mut watch = WatchClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let (req_tx, req_rx) = mpsc::channel(4);
    req_tx
        .send(pb::WatchRequest {
            request_union: Some(pb::watch_request::RequestUnion::CreateRequest(
                pb::WatchCreateRequest {
                    key: b"a".to_vec(),
                    range_end: b"z".to_vec(),
                    ..Default::default()
                },
            )),
        })
        .await
        .unwrap();

    let mut stream = watch
        .watch(ReceiverStream::new(req_rx))
        .await
        .unwrap()
        .into_inner();

    let mut created = HashSet::new();
    let mut event_keys = HashSet::new();
    for _ in 0..6 {
        let resp = timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("timed out waiting for watch response")
            .unwrap()
            .unwrap();
        if resp.created {
            created.insert(resp.watch_id);
        } else {
            event_keys.insert(resp.events[0].kv.as_ref().unwrap().key.clone());
        }
    }

    assert_eq!(created, HashSet::from([0, 1, 2]));
    let want: HashSet<Vec<u8>> = (0..3)
        .map(|index| format!("shard-{index}").into_bytes())
        .collect();
    assert_eq!(event_keys, want);
}

#[tokio::test]
async fn lease_keep_alive_echoes_through_every_shard() {
    let cluster = start_cluster().await;
    let mut lease = LeaseClient::connect(cluster.proxy_url.clone()).await.unwrap();

    let (req_tx, req_rx) = mpsc::channel(4);
    req_tx
        .send(pb::LeaseKeepAliveRequest { id: 5 })
        .await
        .unwrap();

    let mut stream = lease
        .lease_keep_alive(ReceiverStream::new(req_rx))
        .await
        .unwrap()
        .into_inner();

    for _ in 0..3 {
        let resp = timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("timed out waiting for keep-alive response")
            .unwrap()
            .unwrap();
        assert_eq!(resp.id, 5);
        assert_eq!(resp.ttl, 7);
    }
}
