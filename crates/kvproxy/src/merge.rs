//! Merging of per-shard responses into single protocol-faithful replies.

use proto_etcd::etcdserverpb::{DeleteRangeResponse, RangeRequest, RangeResponse};

use crate::{Error, Result};

/// Merge per-shard Range responses, given in ascending shard order.
///
/// Shards partition the key space contiguously and each shard's `kvs` are
/// sorted, so plain concatenation preserves global key order. Once the
/// accumulated count reaches the request's limit, remaining responses are
/// not appended and the reply reports more results available.
pub fn range(req: &RangeRequest, resps: Vec<RangeResponse>) -> Result<RangeResponse> {
    let mut resps = resps.into_iter();
    let mut ret = resps.next().ok_or(Error::NoResponse)?;

    for resp in resps {
        if req.limit > 0 && ret.count >= req.limit {
            ret.more = true;
            break;
        }
        ret.count += resp.count;
        ret.kvs.extend(resp.kvs);
        if resp.more {
            ret.more = true;
        }
    }
    Ok(ret)
}

/// Merge per-shard DeleteRange responses: the first response carrying the
/// summed deletion count.
pub fn delete_range(resps: Vec<DeleteRangeResponse>) -> Result<DeleteRangeResponse> {
    let mut resps = resps.into_iter();
    let mut ret = resps.next().ok_or(Error::NoResponse)?;

    for resp in resps {
        ret.deleted += resp.deleted;
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use proto_etcd::mvccpb::KeyValue;

    use super::*;

    fn kv(key: &str) -> KeyValue {
        KeyValue {
            key: key.as_bytes().to_vec(),
            ..Default::default()
        }
    }

    fn resp(keys: &[&str], more: bool) -> RangeResponse {
        RangeResponse {
            kvs: keys.iter().map(|key| kv(key)).collect(),
            count: keys.len() as i64,
            more,
            ..Default::default()
        }
    }

    #[test]
    fn concatenates_in_shard_order() {
        let req = RangeRequest::default();
        let merged = range(
            &req,
            vec![resp(&["a", "b"], false), resp(&["j", "k"], false), resp(&[], false)],
        )
        .unwrap();

        let keys: Vec<&[u8]> = merged.kvs.iter().map(|kv| kv.key.as_slice()).collect();
        assert_eq!(keys, vec![b"a".as_slice(), b"b", b"j", b"k"]);
        assert_eq!(merged.count, 4);
        assert!(!merged.more);
    }

    #[test]
    fn limit_stops_accumulation_and_sets_more() {
        let req = RangeRequest {
            limit: 3,
            ..Default::default()
        };
        let mut first = resp(&["a", "b", "c"], true);
        first.count = 5;
        let merged = range(&req, vec![first, resp(&["j", "k"], false)]).unwrap();

        // The first response is passed through untrimmed; later shards are
        // not appended once the count reached the limit.
        assert_eq!(merged.kvs.len(), 3);
        assert_eq!(merged.count, 5);
        assert!(merged.more);
    }

    #[test]
    fn shard_more_flag_propagates() {
        let req = RangeRequest::default();
        let merged = range(&req, vec![resp(&["a"], false), resp(&["j"], true)]).unwrap();
        assert_eq!(merged.count, 2);
        assert!(merged.more);
    }

    #[test]
    fn single_response_passes_through() {
        let req = RangeRequest {
            limit: 1,
            ..Default::default()
        };
        let merged = range(&req, vec![resp(&["a", "b"], false)]).unwrap();
        assert_eq!(merged.kvs.len(), 2);
        assert_eq!(merged.count, 2);
        assert!(!merged.more);
    }

    #[test]
    fn empty_input_is_an_error() {
        let req = RangeRequest::default();
        assert!(matches!(range(&req, Vec::new()), Err(Error::NoResponse)));
        assert!(matches!(delete_range(Vec::new()), Err(Error::NoResponse)));
    }

    #[test]
    fn delete_counts_are_summed() {
        let resps = vec![
            DeleteRangeResponse {
                deleted: 2,
                ..Default::default()
            },
            DeleteRangeResponse {
                deleted: 3,
                ..Default::default()
            },
            DeleteRangeResponse {
                deleted: 0,
                ..Default::default()
            },
        ];
        assert_eq!(delete_range(resps).unwrap().deleted, 5);
    }
}
