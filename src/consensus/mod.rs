use std::sync::Mutex;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::blockchain::{Block, Blockchain, validation};
use crate::error::NodeError;

/// Chain snapshot as served by a peer's chain endpoint.
#[derive(Debug, Deserialize)]
pub struct PeerChain {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// Normalize a peer address to `host:port`, stripping any scheme or path.
/// Returns `None` when nothing usable remains.
pub fn normalize_peer(addr: &str) -> Option<String> {
    let rest = addr.split_once("://").map_or(addr, |(_, r)| r);
    let host = rest.split('/').next().unwrap_or_default().trim();
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Fetch one peer's full chain. Any transport failure, non-success status
/// or undecodable body marks the peer unreachable for this pass.
pub async fn fetch_chain(client: &reqwest::Client, addr: &str) -> Result<PeerChain, NodeError> {
    let url = format!("http://{addr}/api/v1/chain/");
    let unreachable = |reason: String| NodeError::PeerUnreachable {
        addr: addr.to_string(),
        reason,
    };

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| unreachable(e.to_string()))?;
    if !response.status().is_success() {
        return Err(unreachable(format!("status {}", response.status())));
    }
    response
        .json::<PeerChain>()
        .await
        .map_err(|e| unreachable(e.to_string()))
}

/// Longest-valid-chain decision over already-fetched peer snapshots.
///
/// Pure: no I/O, so it is testable without a network. A candidate wins only
/// if it is strictly longer than everything seen so far (the local chain
/// included; ties keep the local chain) and passes full validation. The
/// peer's self-reported length is ignored in favour of the delivered
/// chain's actual length, so a peer overstating `length` cannot shorten us.
pub fn select_candidate(
    local_len: usize,
    snapshots: Vec<(String, PeerChain)>,
    difficulty_target: &str,
) -> Option<Vec<Block>> {
    let mut max_length = local_len;
    let mut candidate: Option<Vec<Block>> = None;

    for (addr, peer) in snapshots {
        let length = peer.chain.len();
        if length <= max_length {
            debug!("SYNC - peer {addr} at length {length}, not longer, skipped");
            continue;
        }
        if !validation::is_valid_chain(&peer.chain, difficulty_target) {
            warn!("SYNC - {}", NodeError::InvalidCandidateChain { addr });
            continue;
        }
        max_length = length;
        candidate = Some(peer.chain);
    }

    candidate
}

/// One reconciliation pass: poll every registered peer, pick the longest
/// valid chain strictly longer than ours, and adopt it. Returns whether the
/// local chain was replaced.
///
/// A peer that cannot be reached or offers garbage is logged and skipped;
/// one bad peer never aborts the pass. The replace decision is re-checked
/// under the ledger lock so a chain that grew meanwhile is never shortened.
pub async fn reconcile(
    blockchain: &Mutex<Blockchain>,
    peers: &[String],
    client: &reqwest::Client,
) -> bool {
    let (local_len, difficulty_target) = {
        let bc = blockchain.lock().expect("mutex poisoned");
        (bc.len(), bc.difficulty_target().to_string())
    };

    let mut snapshots = Vec::with_capacity(peers.len());
    for addr in peers {
        match fetch_chain(client, addr).await {
            Ok(peer) => {
                debug!("SYNC - peer {addr} reports length {}", peer.length);
                snapshots.push((addr.clone(), peer));
            }
            Err(e) => warn!("SYNC - {e}"),
        }
    }

    match select_candidate(local_len, snapshots, &difficulty_target) {
        Some(chain) => {
            let mut bc = blockchain.lock().expect("mutex poisoned");
            if chain.len() > bc.len() {
                info!(
                    "SYNC - adopting peer chain: length {} -> {}",
                    bc.len(),
                    chain.len()
                );
                bc.replace_chain(chain);
                true
            } else {
                false
            }
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::{PeerChain, normalize_peer, select_candidate};
    use crate::blockchain::{Block, Blockchain, hash::hash_value, pow};

    const TARGET: &str = "0";

    fn mined_chain(extra: usize) -> Vec<Block> {
        let mut bc = Blockchain::new(TARGET.to_string());
        for i in 0..extra {
            bc.add_transaction("alice".into(), "bob".into(), i as u64 + 1);
            let tip_hash = hash_value(bc.last_block().unwrap());
            let nonce = pow::solve(
                bc.len() as u64,
                &tip_hash,
                bc.pending(),
                TARGET,
                &AtomicBool::new(false),
            )
            .unwrap();
            bc.append_block(nonce, Some(tip_hash)).unwrap();
        }
        bc.chain
    }

    fn snapshot(addr: &str, chain: Vec<Block>) -> (String, PeerChain) {
        let length = chain.len();
        (addr.to_string(), PeerChain { chain, length })
    }

    #[test]
    fn adopts_the_longest_valid_peer_chain() {
        let long = mined_chain(4); // length 5
        let short = mined_chain(2); // length 3
        let picked = select_candidate(
            2,
            vec![snapshot("x:5000", long.clone()), snapshot("y:5001", short)],
            TARGET,
        );
        assert_eq!(picked, Some(long));
    }

    #[test]
    fn ignores_an_invalid_longer_chain() {
        let mut tampered = mined_chain(9); // length 10
        tampered[4].previous_hash = "deadbeef".into();
        let picked = select_candidate(2, vec![snapshot("x:5000", tampered)], TARGET);
        assert_eq!(picked, None);
    }

    #[test]
    fn equal_length_keeps_the_local_chain() {
        let peer = mined_chain(2); // length 3
        assert_eq!(select_candidate(3, vec![snapshot("x:5000", peer)], TARGET), None);
    }

    #[test]
    fn overstated_length_field_does_not_win() {
        let chain = mined_chain(1); // actual length 2
        let lying = (
            "x:5000".to_string(),
            PeerChain {
                chain,
                length: 100,
            },
        );
        assert_eq!(select_candidate(3, vec![lying], TARGET), None);
    }

    #[test]
    fn no_peers_means_no_candidate() {
        assert_eq!(select_candidate(1, Vec::new(), TARGET), None);
    }

    #[test]
    fn normalizes_addresses_to_host_and_port() {
        assert_eq!(
            normalize_peer("http://127.0.0.1:5001"),
            Some("127.0.0.1:5001".into())
        );
        assert_eq!(
            normalize_peer("http://node.example:8080/api/v1/chain/"),
            Some("node.example:8080".into())
        );
        assert_eq!(normalize_peer("127.0.0.1:5002"), Some("127.0.0.1:5002".into()));
        assert_eq!(normalize_peer("http://"), None);
        assert_eq!(normalize_peer("   "), None);
    }
}
