// Vendored protobuf bindings for the etcd v3 wire protocol.
//
// Field numbers and service paths are bit-exact against etcd's
// `etcdserverpb/rpc.proto` and `mvccpb/kv.proto`.

pub mod etcdserverpb;
pub mod mvccpb;
