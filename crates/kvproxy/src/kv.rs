use std::sync::Arc;

use proto_etcd::etcdserverpb::{
    request_op, CompactionRequest, CompactionResponse, DeleteRangeRequest, DeleteRangeResponse,
    PutRequest, PutResponse, RangeRequest, RangeResponse, TxnRequest, TxnResponse,
};
use proto_grpc::etcdserverpb::kv_server::Kv;
use tonic::{Request, Response, Status};

use crate::shard::ShardSet;
use crate::{merge, Error, Group};

/// The KV service: routes each operation to its owning shards and merges
/// per-shard replies into one.
pub struct KvService {
    shards: Arc<ShardSet>,
}

impl KvService {
    pub fn new(shards: Arc<ShardSet>) -> Self {
        Self { shards }
    }

    /// The single shard a transaction executes on, determined by classifying
    /// every operation by its key. Transactions whose operations land on
    /// different shards are rejected; an empty transaction goes to shard 0.
    fn txn_shard(&self, req: &TxnRequest) -> crate::Result<usize> {
        let mut target = None;
        self.classify_txn(req, &mut target)?;
        Ok(target.unwrap_or(0))
    }

    fn classify_txn(&self, req: &TxnRequest, target: &mut Option<usize>) -> crate::Result<()> {
        for op in req.success.iter().chain(req.failure.iter()) {
            // Only the operation's key is classified; a delete's range_end is
            // not examined.
            let key = match &op.request {
                Some(request_op::Request::RequestRange(range)) => &range.key,
                Some(request_op::Request::RequestPut(put)) => &put.key,
                Some(request_op::Request::RequestDeleteRange(delete)) => &delete.key,
                Some(request_op::Request::RequestTxn(txn)) => {
                    self.classify_txn(txn, target)?;
                    continue;
                }
                None => continue,
            };
            let client = self
                .shards
                .resolve(key, b"")
                .into_iter()
                .next()
                .ok_or(Error::NoShard)?;
            match target {
                None => *target = Some(client.id()),
                Some(id) if *id == client.id() => {}
                Some(_) => return Err(Error::TxnDifferentShard),
            }
        }
        Ok(())
    }
}

#[tonic::async_trait]
impl Kv for KvService {
    async fn range(
        &self,
        request: Request<RangeRequest>,
    ) -> Result<Response<RangeResponse>, Status> {
        let req = request.into_inner();
        let clients = self.shards.resolve(&req.key, &req.range_end);

        let resps = if clients.len() > 1 {
            let mut group = Group::new();
            for (index, client) in clients.into_iter().enumerate() {
                let req = req.clone();
                group.spawn(index, async move {
                    let shard = client.id();
                    let resp = client.kv().range(req).await.map_err(|source| {
                        Error::ShardRpc {
                            op: "range",
                            shard,
                            source,
                        }
                    })?;
                    Ok(resp.into_inner())
                });
            }
            group.run().await?
        } else {
            match clients.into_iter().next() {
                Some(client) => {
                    let shard = client.id();
                    let resp =
                        client.kv().range(req.clone()).await.map_err(|source| {
                            Error::ShardRpc {
                                op: "range",
                                shard,
                                source,
                            }
                        })?;
                    vec![resp.into_inner()]
                }
                None => Vec::new(),
            }
        };

        let resp = merge::range(&req, resps).map_err(|source| Error::Filter {
            op: "range",
            source: source.into(),
        })?;
        Ok(Response::new(resp))
    }

    async fn put(&self, request: Request<PutRequest>) -> Result<Response<PutResponse>, Status> {
        let req = request.into_inner();
        let client = self
            .shards
            .resolve(&req.key, b"")
            .into_iter()
            .next()
            .ok_or(Error::NoShard)?;
        Ok(client.kv().put(req).await?)
    }

    async fn delete_range(
        &self,
        request: Request<DeleteRangeRequest>,
    ) -> Result<Response<DeleteRangeResponse>, Status> {
        let req = request.into_inner();
        let clients = self.shards.resolve(&req.key, &req.range_end);

        let resps = if clients.len() > 1 {
            let mut group = Group::new();
            for (index, client) in clients.into_iter().enumerate() {
                let req = req.clone();
                group.spawn(index, async move {
                    let shard = client.id();
                    let resp = client.kv().delete_range(req).await.map_err(|source| {
                        Error::ShardRpc {
                            op: "delete range",
                            shard,
                            source,
                        }
                    })?;
                    Ok(resp.into_inner())
                });
            }
            group.run().await?
        } else {
            match clients.into_iter().next() {
                Some(client) => {
                    let shard = client.id();
                    let resp = client.kv().delete_range(req.clone()).await.map_err(
                        |source| Error::ShardRpc {
                            op: "delete range",
                            shard,
                            source,
                        },
                    )?;
                    vec![resp.into_inner()]
                }
                None => Vec::new(),
            }
        };

        let resp = merge::delete_range(resps).map_err(|source| Error::Filter {
            op: "delete range",
            source: source.into(),
        })?;
        Ok(Response::new(resp))
    }

    async fn txn(&self, request: Request<TxnRequest>) -> Result<Response<TxnResponse>, Status> {
        let req = request.into_inner();
        let shard = self.txn_shard(&req)?;
        Ok(self.shards.client(shard).kv().txn(req).await?)
    }

    async fn compact(
        &self,
        _request: Request<CompactionRequest>,
    ) -> Result<Response<CompactionResponse>, Status> {
        Err(Error::NotSupported.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ShardConfig};

    fn service() -> KvService {
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
        KvService::new(Arc::new(ShardSet::from_config(&config).unwrap()))
    }

    fn put_op(key: &str) -> proto_etcd::etcdserverpb::RequestOp {
        proto_etcd::etcdserverpb::RequestOp {
            request: Some(request_op::Request::RequestPut(PutRequest {
                key: key.as_bytes().to_vec(),
                ..Default::default()
            })),
        }
    }

    fn range_op(key: &str) -> proto_etcd::etcdserverpb::RequestOp {
        proto_etcd::etcdserverpb::RequestOp {
            request: Some(request_op::Request::RequestRange(RangeRequest {
                key: key.as_bytes().to_vec(),
                ..Default::default()
            })),
        }
    }

    #[tokio::test]
    async fn txn_with_ops_on_one_shard_is_placed_there() {
        let service = service();
        let req = TxnRequest {
            success: vec![put_op("a"), put_op("b")],
            ..Default::default()
        };
        assert_eq!(service.txn_shard(&req).unwrap(), 0);

        let req = TxnRequest {
            success: vec![range_op("m"), put_op("n")],
            ..Default::default()
        };
        assert_eq!(service.txn_shard(&req).unwrap(), 1);
    }

    #[tokio::test]
    async fn txn_failure_branch_is_classified() {
        let service = service();
        let req = TxnRequest {
            failure: vec![put_op("t")],
            ..Default::default()
        };
        assert_eq!(service.txn_shard(&req).unwrap(), 2);
    }

    #[tokio::test]
    async fn cross_shard_txn_is_rejected() {
        let service = service();
        let req = TxnRequest {
            success: vec![put_op("a"), put_op("m")],
            ..Default::default()
        };
        assert!(matches!(
            service.txn_shard(&req),
            Err(Error::TxnDifferentShard)
        ));

        // Also across branches.
        let req = TxnRequest {
            success: vec![put_op("a")],
            failure: vec![put_op("z")],
            ..Default::default()
        };
        assert!(matches!(
            service.txn_shard(&req),
            Err(Error::TxnDifferentShard)
        ));
    }

    #[tokio::test]
    async fn empty_txn_goes_to_shard_zero() {
        let service = service();
        assert_eq!(service.txn_shard(&TxnRequest::default()).unwrap(), 0);
    }

    #[tokio::test]
    async fn nested_txn_is_classified_recursively() {
        let service = service();
        let nested = proto_etcd::etcdserverpb::RequestOp {
            request: Some(request_op::Request::RequestTxn(TxnRequest {
                success: vec![put_op("z")],
                ..Default::default()
            })),
        };
        let req = TxnRequest {
            success: vec![nested],
            ..Default::default()
        };
        assert_eq!(service.txn_shard(&req).unwrap(), 2);

        let nested = proto_etcd::etcdserverpb::RequestOp {
            request: Some(request_op::Request::RequestTxn(TxnRequest {
                success: vec![put_op("z")],
                ..Default::default()
            })),
        };
        let req = TxnRequest {
            success: vec![put_op("a"), nested],
            ..Default::default()
        };
        assert!(matches!(
            service.txn_shard(&req),
            Err(Error::TxnDifferentShard)
        ));
    }
}
