// Vendored tonic bindings for the etcd v3 gRPC services (KV, Watch, Lease).
// Message types live in the sibling `proto-etcd` crate and are referenced by
// fully-qualified path.

#[cfg(any(
    feature = "kv_client",
    feature = "kv_server",
    feature = "watch_client",
    feature = "watch_server",
    feature = "lease_client",
    feature = "lease_server",
))]
pub mod etcdserverpb;
