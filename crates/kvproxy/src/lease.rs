use std::collections::HashMap;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use proto_etcd::etcdserverpb::{
    LeaseGrantRequest, LeaseGrantResponse, LeaseKeepAliveRequest, LeaseKeepAliveResponse,
    LeaseLeasesRequest, LeaseLeasesResponse, LeaseRevokeRequest, LeaseRevokeResponse,
    LeaseTimeToLiveRequest, LeaseTimeToLiveResponse,
};
use proto_grpc::etcdserverpb::lease_server::Lease;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status, Streaming};

use crate::shard::ShardSet;
use crate::watch::{is_benign_disconnect, CHANNEL_DEPTH};
use crate::{Error, Generator, Group};

/// The Lease service. Leases span the whole key space, so every unary
/// operation is broadcast to all shards in order; keep-alives are
/// multiplexed over one upstream stream per shard.
pub struct LeaseService {
    shards: Arc<ShardSet>,
    id_gen: Arc<Generator>,
}

impl LeaseService {
    pub fn new(shards: Arc<ShardSet>, id_gen: Arc<Generator>) -> Self {
        Self { shards, id_gen }
    }
}

#[tonic::async_trait]
impl Lease for LeaseService {
    async fn lease_grant(
        &self,
        request: Request<LeaseGrantRequest>,
    ) -> Result<Response<LeaseGrantResponse>, Status> {
        let mut req = request.into_inner();
        // The same ID must be granted on every shard.
        if req.id == 0 {
            req.id = self.id_gen.next_i64();
        }

        let mut ret = None;
        for client in self.shards.all() {
            let resp = client.lease().lease_grant(req).await?.into_inner();
            if ret.is_none() {
                ret = Some(resp);
            }
        }
        Ok(Response::new(ret.ok_or(Error::NoResponse)?))
    }

    async fn lease_revoke(
        &self,
        request: Request<LeaseRevokeRequest>,
    ) -> Result<Response<LeaseRevokeResponse>, Status> {
        let req = request.into_inner();

        let mut ret = None;
        for client in self.shards.all() {
            let resp = client.lease().lease_revoke(req).await?.into_inner();
            if ret.is_none() {
                ret = Some(resp);
            }
        }
        Ok(Response::new(ret.ok_or(Error::NoResponse)?))
    }

    type LeaseKeepAliveStream = ReceiverStream<Result<LeaseKeepAliveResponse, Status>>;

    async fn lease_keep_alive(
        &self,
        request: Request<Streaming<LeaseKeepAliveRequest>>,
    ) -> Result<Response<Self::LeaseKeepAliveStream>, Status> {
        let (client_tx, client_rx) = mpsc::channel(CHANNEL_DEPTH);
        let mux = KeepAliveMux::new(self.shards.clone(), request.into_inner(), client_tx.clone());

        tokio::spawn(async move {
            if let Err(err) = mux.run().await {
                if err.is_benign_disconnect() {
                    tracing::debug!(error = %err, "lease keep-alive stream closed");
                } else {
                    tracing::warn!(error = %err, "lease keep-alive stream failed");
                }
                let _ = client_tx.send(Err(err.into())).await;
            }
        });

        Ok(Response::new(ReceiverStream::new(client_rx)))
    }

    async fn lease_time_to_live(
        &self,
        request: Request<LeaseTimeToLiveRequest>,
    ) -> Result<Response<LeaseTimeToLiveResponse>, Status> {
        let req = request.into_inner();

        // The union of the lease's keys across all shards.
        let mut ret: Option<LeaseTimeToLiveResponse> = None;
        for client in self.shards.all() {
            let resp = client.lease().lease_time_to_live(req).await?.into_inner();
            match &mut ret {
                None => ret = Some(resp),
                Some(acc) => acc.keys.extend(resp.keys),
            }
        }
        Ok(Response::new(ret.ok_or(Error::NoResponse)?))
    }

    async fn lease_leases(
        &self,
        request: Request<LeaseLeasesRequest>,
    ) -> Result<Response<LeaseLeasesResponse>, Status> {
        let req = request.into_inner();

        let mut ret: Option<LeaseLeasesResponse> = None;
        for client in self.shards.all() {
            let resp = client.lease().lease_leases(req).await?.into_inner();
            match &mut ret {
                None => ret = Some(resp),
                Some(acc) => acc.leases.extend(resp.leases),
            }
        }
        Ok(Response::new(ret.ok_or(Error::NoResponse)?))
    }
}

/// Per-client-stream multiplexer for lease keep-alives, mirroring the Watch
/// multiplexer: recv, dispatch, and send loops under one cancellation token,
/// with a detached reader per lazily-opened shard stream.
pub(crate) struct KeepAliveMux<S> {
    shards: Arc<ShardSet>,
    client_stream: S,
    client_tx: mpsc::Sender<Result<LeaseKeepAliveResponse, Status>>,
    token: CancellationToken,
}

impl<S> KeepAliveMux<S>
where
    S: Stream<Item = Result<LeaseKeepAliveRequest, Status>> + Send + Unpin + 'static,
{
    pub(crate) fn new(
        shards: Arc<ShardSet>,
        client_stream: S,
        client_tx: mpsc::Sender<Result<LeaseKeepAliveResponse, Status>>,
    ) -> Self {
        Self {
            shards,
            client_stream,
            client_tx,
            token: CancellationToken::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub(crate) async fn run(self) -> crate::Result<()> {
        let Self {
            shards,
            client_stream,
            client_tx,
            token,
        } = self;
        let (recv_tx, recv_rx) = mpsc::channel(CHANNEL_DEPTH);
        let (resp_tx, resp_rx) = mpsc::channel(CHANNEL_DEPTH);
        let (upstream_err_tx, upstream_err_rx) = mpsc::channel(1);

        let mut group = Group::new();
        group.spawn(0, send_loop(client_tx, resp_rx, token.clone()));
        group.spawn(1, recv_loop(client_stream, recv_tx, token.clone()));
        group.spawn(
            2,
            dispatch_loop(shards, recv_rx, resp_tx, upstream_err_tx, upstream_err_rx, token),
        );
        group.run().await.map(|_| ())
    }
}

async fn recv_loop<S>(
    mut client_stream: S,
    recv_tx: mpsc::Sender<LeaseKeepAliveRequest>,
    token: CancellationToken,
) -> crate::Result<()>
where
    S: Stream<Item = Result<LeaseKeepAliveRequest, Status>> + Send + Unpin,
{
    loop {
        let item = tokio::select! {
            _ = token.cancelled() => return Err(Error::Cancelled),
            item = client_stream.next() => item,
        };
        match item {
            Some(Ok(req)) => {
                if recv_tx.send(req).await.is_err() {
                    return Ok(());
                }
            }
            Some(Err(status)) => {
                token.cancel();
                return Err(Error::Grpc(status));
            }
            None => return Ok(()),
        }
    }
}

/// Broadcasts each keep-alive to every shard. A keep-alive must reach all
/// shards because each holds its own copy of the lease.
async fn dispatch_loop(
    shards: Arc<ShardSet>,
    mut recv_rx: mpsc::Receiver<LeaseKeepAliveRequest>,
    resp_tx: mpsc::Sender<LeaseKeepAliveResponse>,
    upstream_err_tx: mpsc::Sender<Status>,
    mut upstream_err_rx: mpsc::Receiver<Status>,
    token: CancellationToken,
) -> crate::Result<()> {
    let mut upstreams: HashMap<usize, mpsc::Sender<LeaseKeepAliveRequest>> = HashMap::new();

    loop {
        let req = tokio::select! {
            _ = token.cancelled() => return Err(Error::Cancelled),
            Some(status) = upstream_err_rx.recv() => {
                token.cancel();
                return Err(Error::Upstream(status));
            }
            req = recv_rx.recv() => req,
        };
        let Some(req) = req else {
            // The client half-closed its request stream. Keep the upstream
            // streams alive so responses continue to flow.
            loop {
                tokio::select! {
                    _ = token.cancelled() => return Err(Error::Cancelled),
                    Some(status) = upstream_err_rx.recv() => {
                        token.cancel();
                        return Err(Error::Upstream(status));
                    }
                }
            }
        };

        for client in shards.all() {
            let id = client.id();
            if !upstreams.contains_key(&id) {
                let (tx, rx) = mpsc::channel(CHANNEL_DEPTH);
                let mut lease_client = client.lease();
                let resp_stream =
                    match lease_client.lease_keep_alive(ReceiverStream::new(rx)).await {
                        Ok(resp) => resp.into_inner(),
                        Err(source) => {
                            token.cancel();
                            return Err(Error::ShardRpc {
                                op: "lease keep alive",
                                shard: id,
                                source,
                            });
                        }
                    };
                tokio::spawn(upstream_reader(
                    id,
                    resp_stream,
                    resp_tx.clone(),
                    upstream_err_tx.clone(),
                    token.clone(),
                ));
                upstreams.insert(id, tx);
            }
            if upstreams[&id].send(req).await.is_err() {
                tracing::debug!(shard = id, "dropping keep-alive for closed shard stream");
            }
        }
    }
}

async fn upstream_reader(
    shard: usize,
    mut stream: Streaming<LeaseKeepAliveResponse>,
    resp_tx: mpsc::Sender<LeaseKeepAliveResponse>,
    upstream_err_tx: mpsc::Sender<Status>,
    token: CancellationToken,
) {
    loop {
        let item = tokio::select! {
            _ = token.cancelled() => return,
            item = stream.next() => item,
        };
        match item {
            Some(Ok(resp)) => {
                if resp_tx.send(resp).await.is_err() {
                    return;
                }
            }
            Some(Err(status)) => {
                if !is_benign_disconnect(&status) {
                    tracing::warn!(
                        shard,
                        error = %status,
                        "failed to receive keep-alive response from shard stream"
                    );
                    let _ = upstream_err_tx.try_send(status);
                }
                return;
            }
            None => return,
        }
    }
}

async fn send_loop(
    client_tx: mpsc::Sender<Result<LeaseKeepAliveResponse, Status>>,
    mut resp_rx: mpsc::Receiver<LeaseKeepAliveResponse>,
    token: CancellationToken,
) -> crate::Result<()> {
    loop {
        let resp = tokio::select! {
            _ = token.cancelled() => return Err(Error::Cancelled),
            _ = client_tx.closed() => {
                token.cancel();
                return Err(Error::Disconnected);
            }
            resp = resp_rx.recv() => match resp {
                Some(resp) => resp,
                None => return Ok(()),
            },
        };
        if client_tx.send(Ok(resp)).await.is_err() {
            token.cancel();
            return Err(Error::Disconnected);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::{Config, ShardConfig};

    fn shard_set() -> Arc<ShardSet> {
        let config = Config {
            shards: vec![ShardConfig {
                address: "127.0.0.1:23790".to_string(),
                ..Default::default()
            }],
        };
        Arc::new(ShardSet::from_config(&config).unwrap())
    }

    #[tokio::test]
    async fn cancellation_terminates_every_loop() {
        let (client_tx, _client_rx) = mpsc::channel(CHANNEL_DEPTH);
        let mux = KeepAliveMux::new(shard_set(), futures::stream::pending(), client_tx);
        let token = mux.cancellation_token();

        let run = tokio::spawn(mux.run());
        token.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), run)
            .await
            .expect("multiplexer loops did not terminate")
            .unwrap();
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn dropped_client_terminates_the_multiplexer() {
        let (client_tx, client_rx) = mpsc::channel(CHANNEL_DEPTH);
        let mux = KeepAliveMux::new(shard_set(), futures::stream::pending(), client_tx);

        let run = tokio::spawn(mux.run());
        drop(client_rx);

        let result = tokio::time::timeout(Duration::from_secs(5), run)
            .await
            .expect("multiplexer loops did not terminate")
            .unwrap();
        assert!(result.unwrap_err().is_benign_disconnect());
    }
}
