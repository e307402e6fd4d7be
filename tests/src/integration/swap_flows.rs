//! # Swap Lifecycle Flows
//!
//! End-to-end create / relay-wait / claim flows over the simulated chains
//! and deputy, plus failure-path sequencing over the mock adapter.
//!
//! ## Flows Tested
//!
//! 1. **Incoming**: foreign-chain escrow relayed home and claimed there
//! 2. **Outgoing**: home-chain escrow relayed out and claimed on the
//!    foreign chain
//! 3. **Failure sequencing**: each early exit happens before the calls
//!    that would follow it

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use bep3_core::adapters::{SimChain, SimDeputy};
    use bep3_core::{
        encode_bech32_address, AssetInfo, AssetRegistry, ChainAdapter, MockChainAdapter, SwapApi,
        SwapConfig, SwapDirection, SwapError, SwapService, SwapStatus,
    };

    const HOME_WALLET: &str = "kava1c0ju5vnwgpgxnrktfnkccuth9xqc68dcdpzpas";
    const FOREIGN_WALLET: &str = "bnb10rr5f8m73rxgnz9afvnfn7fn9pwhfskem5kn0x";

    fn busd() -> AssetInfo {
        AssetInfo {
            origin_denom: "BUSD-BD1".to_string(),
            dest_denom: "busd".to_string(),
            origin_deputy_address: "bnb1j20j0e62n2l9sefxnu596a6jyn5x29lk2syd5j".to_string(),
            dest_deputy_address: "kava1j9je7f6s0v6k7dmgv6u5k5ru202f5ffsc7af04".to_string(),
            conversion_factor: 100_000_000,
        }
    }

    fn assets() -> AssetRegistry {
        let mut registry = AssetRegistry::new();
        registry.insert("busd", busd());
        registry
    }

    fn fast_config() -> SwapConfig {
        SwapConfig {
            relay_wait: Duration::from_millis(300),
            confirm_timeout: Duration::from_millis(500),
            ..SwapConfig::default()
        }
    }

    /// Two simulated chains bridged by deputy tasks in both directions.
    fn sim_world(with_deputy: bool) -> (SwapService, Arc<SimChain>, Arc<SimChain>) {
        let home = Arc::new(SimChain::new("kava", HOME_WALLET));
        let foreign = Arc::new(SimChain::new("bnb", FOREIGN_WALLET));

        if with_deputy {
            let interval = Duration::from_millis(50);
            let _ = SimDeputy::new(foreign.clone(), home.clone()).spawn(interval);
            let _ = SimDeputy::new(home.clone(), foreign.clone()).spawn(interval);
        }

        let service = SwapService::new(home.clone(), foreign.clone(), assets(), fast_config());
        (service, home, foreign)
    }

    #[tokio::test]
    async fn test_incoming_swap_end_to_end() {
        let (service, home, foreign) = sim_world(true);

        let outcome = service
            .execute_swap(SwapDirection::Incoming, "busd", 10_200_005)
            .await
            .unwrap();

        assert_ne!(outcome.origin_swap_id, outcome.dest_swap_id);

        // The origin escrow sits on the foreign chain; the claimed leg is
        // the relayed escrow on the home chain.
        assert!(foreign.has_swap(outcome.origin_swap_id));
        let home_record = home.query_swap(outcome.dest_swap_id).await.unwrap().unwrap();
        assert_eq!(home_record.status, SwapStatus::Completed);
        assert_eq!(home_record.amount, 10_200_005);

        // Claiming the relayed leg does not touch the origin escrow; the
        // deputy settles that one out of band.
        let origin_record = foreign
            .query_swap(outcome.origin_swap_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(origin_record.status, SwapStatus::Open);
        assert_eq!(origin_record.denom, "BUSD-BD1");
    }

    #[tokio::test]
    async fn test_outgoing_swap_end_to_end() {
        let (service, home, foreign) = sim_world(true);

        let outcome = service
            .execute_swap(SwapDirection::Outgoing, "busd", 500_005)
            .await
            .unwrap();

        let foreign_record = foreign
            .query_swap(outcome.dest_swap_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(foreign_record.status, SwapStatus::Completed);

        // The escrow created at home carries the home-chain denom and the
        // shorter outgoing liveness window.
        let origin = home
            .snapshots()
            .into_iter()
            .find(|s| s.swap_id == outcome.origin_swap_id)
            .unwrap();
        assert_eq!(origin.denom, "busd");
        assert_eq!(origin.height_span, 250);
        assert_eq!(origin.sender, HOME_WALLET);
    }

    #[tokio::test]
    async fn test_freshly_encoded_wallets_swap_end_to_end() {
        // Wallets built from raw payloads; the derivation must decode them
        // back to exactly these bytes for the legs to line up.
        let foreign_wallet = encode_bech32_address("bnb", &[0x5A; 20]).unwrap();
        let home_wallet = encode_bech32_address("kava", &[0xC3; 20]).unwrap();

        let home = Arc::new(SimChain::new("kava", &home_wallet));
        let foreign = Arc::new(SimChain::new("bnb", &foreign_wallet));
        let _ = SimDeputy::new(foreign.clone(), home.clone()).spawn(Duration::from_millis(50));

        let service = SwapService::new(home.clone(), foreign.clone(), assets(), fast_config());
        let outcome = service
            .execute_swap(SwapDirection::Incoming, "busd", 77)
            .await
            .unwrap();

        let record = home.query_swap(outcome.dest_swap_id).await.unwrap().unwrap();
        assert_eq!(record.status, SwapStatus::Completed);
    }

    #[tokio::test]
    async fn test_attempts_never_reuse_identifiers() {
        let (service, _home, _foreign) = sim_world(true);

        let first = service
            .execute_swap(SwapDirection::Incoming, "busd", 100)
            .await
            .unwrap();
        let second = service
            .execute_swap(SwapDirection::Incoming, "busd", 100)
            .await
            .unwrap();

        assert_ne!(first.attempt_id, second.attempt_id);
        assert_ne!(first.origin_swap_id, second.origin_swap_id);
        assert_ne!(first.dest_swap_id, second.dest_swap_id);
    }

    #[tokio::test]
    async fn test_no_deputy_means_relay_timeout() {
        let (service, home, foreign) = sim_world(false);

        let err = service
            .execute_swap(SwapDirection::Incoming, "busd", 100)
            .await
            .unwrap_err();

        match err {
            SwapError::RelayTimeout {
                origin_swap_id,
                dest_swap_id,
                ..
            } => {
                // Both leg IDs are in the error so an operator can
                // investigate by hand.
                assert_eq!(origin_swap_id.len(), 64);
                assert_eq!(dest_swap_id.len(), 64);
            }
            other => panic!("expected RelayTimeout, got {other}"),
        }

        // The origin escrow exists but nothing was claimed anywhere.
        assert_eq!(foreign.snapshots().len(), 1);
        assert!(home.snapshots().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_asset_touches_no_chain() {
        let (service, home, foreign) = sim_world(true);

        let err = service
            .execute_swap(SwapDirection::Incoming, "xyz", 100)
            .await
            .unwrap_err();

        assert!(matches!(err, SwapError::UnsupportedAsset(s) if s == "xyz"));
        assert!(home.snapshots().is_empty());
        assert!(foreign.snapshots().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejection_skips_relay_wait() {
        let home = Arc::new(MockChainAdapter::new(HOME_WALLET));
        let foreign = Arc::new(MockChainAdapter::new(FOREIGN_WALLET));
        foreign.set_fail_create(true);

        let config = SwapConfig {
            relay_wait: Duration::from_secs(30),
            ..SwapConfig::default()
        };
        let service = SwapService::new(home.clone(), foreign.clone(), assets(), config);

        let started = tokio::time::Instant::now();
        let err = service
            .execute_swap(SwapDirection::Incoming, "busd", 100)
            .await
            .unwrap_err();

        assert!(matches!(err, SwapError::ChainRejected { .. }));
        // Failing the create must not burn the relay window.
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(home.query_count(), 0);
        assert_eq!(home.claim_count(), 0);
    }

    #[tokio::test]
    async fn test_claim_rejection_is_surfaced() {
        let home = Arc::new(MockChainAdapter::new(HOME_WALLET));
        let foreign = Arc::new(MockChainAdapter::new(FOREIGN_WALLET));
        home.set_relay_source(foreign.clone());
        home.set_fail_claim(true);

        let config = SwapConfig {
            relay_wait: Duration::from_millis(10),
            ..SwapConfig::default()
        };
        let service = SwapService::new(home.clone(), foreign.clone(), assets(), config);

        let err = service
            .execute_swap(SwapDirection::Incoming, "busd", 100)
            .await
            .unwrap_err();

        assert!(matches!(err, SwapError::ClaimRejected { .. }));
        assert_eq!(foreign.create_count(), 1);
        assert_eq!(home.status_count(), 0);
    }
}
