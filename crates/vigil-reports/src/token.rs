//! Continuation token encoding.
//!
//! The token round-tripped by the caller is base64url (no padding) over
//! a small JSON payload: the collaborator's resume cursor plus a
//! fingerprint of the request shape that produced it. The fingerprint
//! lets the planner reject a token replayed with different filters
//! instead of silently resuming the wrong query.

use std::collections::BTreeSet;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuationToken {
    /// Fingerprint of the normalized request (tenant + filter sets).
    pub fingerprint: String,
    /// The time-series collaborator's own resume cursor, opaque here.
    pub cursor: String,
}

/// SHA-256 over the tenant id and each normalized filter dimension.
/// Dimensions and entries are length-delimited so that, e.g., an absent
/// set and an adjacent empty one cannot collide.
pub fn fingerprint(
    tenant_id: &str,
    asset_ids: Option<&BTreeSet<String>>,
    sensor_ids: Option<&BTreeSet<String>>,
    metric_types: Option<&BTreeSet<String>>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update((tenant_id.len() as u64).to_be_bytes());
    hasher.update(tenant_id.as_bytes());
    for dimension in [asset_ids, sensor_ids, metric_types] {
        match dimension {
            None => hasher.update([0u8]),
            Some(entries) => {
                hasher.update([1u8]);
                hasher.update((entries.len() as u64).to_be_bytes());
                for entry in entries {
                    hasher.update((entry.len() as u64).to_be_bytes());
                    hasher.update(entry.as_bytes());
                }
            }
        }
    }
    hex_digest(hasher)
}

fn hex_digest(hasher: Sha256) -> String {
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

pub fn encode(token: &ContinuationToken) -> String {
    let payload = serde_json::to_vec(token).expect("token payload is always serializable");
    URL_SAFE_NO_PAD.encode(payload)
}

/// `None` when the string is not a token this planner produced.
pub fn decode(raw: &str) -> Option<ContinuationToken> {
    let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(entries: &[&str]) -> BTreeSet<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn round_trip() {
        let token = ContinuationToken {
            fingerprint: fingerprint("T1", Some(&set(&["A1"])), None, None),
            cursor: "42".into(),
        };
        let decoded = decode(&encode(&token)).unwrap();
        assert_eq!(decoded, token);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode("not a token!").is_none());
        assert!(decode(&URL_SAFE_NO_PAD.encode(b"{\"weird\":true}")).is_none());
    }

    #[test]
    fn fingerprint_distinguishes_dimensions() {
        // The same ids on different dimensions must not collide.
        let on_assets = fingerprint("T1", Some(&set(&["X"])), None, None);
        let on_sensors = fingerprint("T1", None, Some(&set(&["X"])), None);
        assert_ne!(on_assets, on_sensors);

        // Absent vs. present-but-empty must not collide either.
        let absent = fingerprint("T1", None, None, None);
        let empty = fingerprint("T1", Some(&BTreeSet::new()), None, None);
        assert_ne!(absent, empty);
    }

    #[test]
    fn fingerprint_ignores_entry_order() {
        // BTreeSet canonicalizes ordering, so equal sets hash equal.
        let a = fingerprint("T1", Some(&set(&["A1", "A2"])), None, None);
        let b = fingerprint("T1", Some(&set(&["A2", "A1"])), None, None);
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_is_tenant_scoped() {
        let t1 = fingerprint("T1", None, None, None);
        let t2 = fingerprint("T2", None, None, None);
        assert_ne!(t1, t2);
    }
}
