pub mod config;
pub mod kv;
pub mod lease;
pub mod logging;
pub mod merge;
pub mod shard;
pub mod watch;

mod group;
pub use group::Group;

mod id;
pub use id::Generator;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid gRPC endpoint: '{0}'")]
    InvalidEndpoint(String),
    #[error(transparent)]
    Transport(#[from] tonic::transport::Error),
    #[error(transparent)]
    Grpc(#[from] tonic::Status),
    #[error("failed to do {op} in shard[{shard}]")]
    ShardRpc {
        op: &'static str,
        shard: usize,
        #[source]
        source: tonic::Status,
    },
    #[error("failed to filter {op} response")]
    Filter {
        op: &'static str,
        #[source]
        source: Box<Error>,
    },
    #[error("upstream error")]
    Upstream(#[source] tonic::Status),
    #[error("no response")]
    NoResponse,
    #[error("no shard resolved for key")]
    NoShard,
    #[error("txn in different shard: not supported")]
    TxnDifferentShard,
    #[error("not supported")]
    NotSupported,
    #[error("stream cancelled")]
    Cancelled,
    #[error("client disconnected")]
    Disconnected,
    #[error(transparent)]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True if this error only signals that the client went away, and should
    /// not be logged as a failure.
    pub fn is_benign_disconnect(&self) -> bool {
        match self {
            Error::Cancelled | Error::Disconnected => true,
            Error::Grpc(status) => watch::is_benign_disconnect(status),
            _ => false,
        }
    }
}

impl From<Error> for tonic::Status {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match err {
            Error::Grpc(status) => status,
            Error::ShardRpc { source, .. } | Error::Upstream(source) => {
                tonic::Status::new(source.code(), format!("{message}: {}", source.message()))
            }
            Error::NotSupported | Error::TxnDifferentShard => {
                tonic::Status::unimplemented(message)
            }
            Error::Cancelled | Error::Disconnected => tonic::Status::cancelled(message),
            Error::InvalidEndpoint(_) | Error::Transport(_) => {
                tonic::Status::unavailable(message)
            }
            Error::Filter { source, .. } => {
                tonic::Status::internal(format!("{message}: {source}"))
            }
            Error::NoResponse | Error::NoShard | Error::TaskJoin(_) => {
                tonic::Status::internal(message)
            }
        }
    }
}
