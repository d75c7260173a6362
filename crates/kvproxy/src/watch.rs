use std::collections::HashMap;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use proto_etcd::etcdserverpb::{WatchRequest, WatchResponse};
use proto_grpc::etcdserverpb::watch_server::Watch;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tonic::{Code, Request, Response, Status, Streaming};

use crate::shard::ShardSet;
use crate::{Error, Group};

/// Depth of the bounded channels bridging the multiplexer loops.
pub(crate) const CHANNEL_DEPTH: usize = 10;

/// The Watch service. Each client stream is bridged to one upstream Watch
/// stream per shard by a dedicated multiplexer.
pub struct WatchService {
    shards: Arc<ShardSet>,
}

impl WatchService {
    pub fn new(shards: Arc<ShardSet>) -> Self {
        Self { shards }
    }
}

#[tonic::async_trait]
impl Watch for WatchService {
    type WatchStream = ReceiverStream<Result<WatchResponse, Status>>;

    async fn watch(
        &self,
        request: Request<Streaming<WatchRequest>>,
    ) -> Result<Response<Self::WatchStream>, Status> {
        let (client_tx, client_rx) = mpsc::channel(CHANNEL_DEPTH);
        let mux = WatchMux::new(self.shards.clone(), request.into_inner(), client_tx.clone());

        tokio::spawn(async move {
            if let Err(err) = mux.run().await {
                if err.is_benign_disconnect() {
                    tracing::debug!(error = %err, "watch stream closed");
                } else {
                    tracing::warn!(error = %err, "watch stream failed");
                }
                let _ = client_tx.send(Err(err.into())).await;
            }
        });

        Ok(Response::new(ReceiverStream::new(client_rx)))
    }
}

/// Per-client-stream multiplexer bridging one client Watch stream to one
/// lazily-opened upstream Watch stream per shard.
///
/// Three loops cooperate: a recv loop draining the client stream into a
/// bounded channel, a dispatch loop broadcasting each request to every shard
/// stream, and a send loop forwarding merged upstream responses back to the
/// client. Bounded channels are the only synchronization between loops and
/// the shared cancellation token is the single termination signal: a loop
/// that fails cancels it before returning, and `run` reports the first
/// failure once every loop has finished.
pub(crate) struct WatchMux<S> {
    shards: Arc<ShardSet>,
    client_stream: S,
    client_tx: mpsc::Sender<Result<WatchResponse, Status>>,
    token: CancellationToken,
}

impl<S> WatchMux<S>
where
    S: Stream<Item = Result<WatchRequest, Status>> + Send + Unpin + 'static,
{
    pub(crate) fn new(
        shards: Arc<ShardSet>,
        client_stream: S,
        client_tx: mpsc::Sender<Result<WatchResponse, Status>>,
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

/// Drains the client stream into the bounded request channel. End-of-stream
/// is a clean return: the client may half-close its request side and keep
/// receiving events. Any other receive error cancels the multiplexer.
async fn recv_loop<S>(
    mut client_stream: S,
    recv_tx: mpsc::Sender<WatchRequest>,
    token: CancellationToken,
) -> crate::Result<()>
where
    S: Stream<Item = Result<WatchRequest, Status>> + Send + Unpin,
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

/// Broadcasts each client request to every shard, opening the upstream
/// stream for a shard lazily on first use and caching it for the remainder
/// of the client stream. A non-benign upstream reader error arrives on the
/// one-slot error channel and tears the multiplexer down.
async fn dispatch_loop(
    shards: Arc<ShardSet>,
    mut recv_rx: mpsc::Receiver<WatchRequest>,
    resp_tx: mpsc::Sender<WatchResponse>,
    upstream_err_tx: mpsc::Sender<Status>,
    mut upstream_err_rx: mpsc::Receiver<Status>,
    token: CancellationToken,
) -> crate::Result<()> {
    let mut upstreams: HashMap<usize, mpsc::Sender<WatchRequest>> = HashMap::new();

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
            // streams alive so events continue to flow.
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
                let mut watch_client = client.watch();
                let resp_stream = match watch_client.watch(ReceiverStream::new(rx)).await {
                    Ok(resp) => resp.into_inner(),
                    Err(source) => {
                        token.cancel();
                        return Err(Error::ShardRpc {
                            op: "watch",
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
            if upstreams[&id].send(req.clone()).await.is_err() {
                tracing::debug!(shard = id, "dropping watch request for closed shard stream");
            }
        }
    }
}

/// Forwards every response of one shard stream into the shared response
/// channel. Exits silently on end-of-stream or a benign disconnect; any
/// other error is reported so the multiplexer shuts down rather than
/// serving a partial broadcast.
async fn upstream_reader(
    shard: usize,
    mut stream: Streaming<WatchResponse>,
    resp_tx: mpsc::Sender<WatchResponse>,
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
                        "failed to receive watch response from shard stream"
                    );
                    let _ = upstream_err_tx.try_send(status);
                }
                return;
            }
            None => return,
        }
    }
}

/// Forwards merged upstream responses to the client. A closed client channel
/// means the caller went away; that cancels the multiplexer with a benign
/// disconnect.
async fn send_loop(
    client_tx: mpsc::Sender<Result<WatchResponse, Status>>,
    mut resp_rx: mpsc::Receiver<WatchResponse>,
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

/// True for errors that just mean the client went away: a cancelled or
/// timed-out context, or the gRPC status shapes produced by a disconnecting
/// peer. These end a stream but are not logged as failures.
pub(crate) fn is_benign_disconnect(status: &Status) -> bool {
    match status.code() {
        // Client-side context cancel or deadline exceeded.
        Code::Cancelled | Code::DeadlineExceeded => true,
        Code::Unavailable => {
            let message = status.message();
            // Client disconnect under TLS, or a cancelled h2 stream.
            message == "client disconnected"
                || (message.starts_with("stream error: ") && message.ends_with("; CANCEL"))
        }
        _ => false,
    }
}
