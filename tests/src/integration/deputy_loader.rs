//! # Deputy Loader Flows
//!
//! Hot-wallet pre-funding across the full asset table: unit scaling on
//! the home side, raw amounts on the foreign side, and the best-effort
//! failure policy.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use bep3_core::adapters::SimChain;
    use bep3_core::{
        AssetInfo, AssetRegistry, ChainSide, MockChainAdapter, SwapApi, SwapConfig, SwapError,
        SwapService,
    };

    const HOME_WALLET: &str = "kava1c0ju5vnwgpgxnrktfnkccuth9xqc68dcdpzpas";
    const FOREIGN_WALLET: &str = "bnb10rr5f8m73rxgnz9afvnfn7fn9pwhfskem5kn0x";

    fn asset(origin_denom: &str, dest_denom: &str, dest_deputy: &str) -> AssetInfo {
        AssetInfo {
            origin_denom: origin_denom.to_string(),
            dest_denom: dest_denom.to_string(),
            origin_deputy_address: "bnb1j20j0e62n2l9sefxnu596a6jyn5x29lk2syd5j".to_string(),
            dest_deputy_address: dest_deputy.to_string(),
            conversion_factor: 100_000_000,
        }
    }

    fn assets() -> AssetRegistry {
        let mut registry = AssetRegistry::new();
        registry.insert(
            "bnb",
            asset("BNB", "bnb", "kava1agcvt07tcw0tglu0hmwdecsnuxp2yd45f3avgm"),
        );
        registry.insert(
            "busd",
            asset("BUSD-BD1", "busd", "kava1j9je7f6s0v6k7dmgv6u5k5ru202f5ffsc7af04"),
        );
        registry.insert(
            "xrpb",
            asset("XRP-BF2", "xrpb", "kava14q5sawxdxtpap5x5sgzj7v4sp3ucncjlpuk3hs"),
        );
        registry
    }

    fn fast_config() -> SwapConfig {
        SwapConfig {
            home_load_delay: Duration::from_millis(1),
            foreign_load_delay: Duration::from_millis(1),
            ..SwapConfig::default()
        }
    }

    fn sim_service() -> (SwapService, Arc<SimChain>, Arc<SimChain>) {
        let home = Arc::new(SimChain::new("kava", HOME_WALLET));
        let foreign = Arc::new(SimChain::new("bnb", FOREIGN_WALLET));
        let service = SwapService::new(home.clone(), foreign.clone(), assets(), fast_config());
        (service, home, foreign)
    }

    #[tokio::test]
    async fn test_home_load_scales_and_covers_every_asset() {
        let (service, home, foreign) = sim_service();

        let txs = service.load_deputies(ChainSide::Home, 100_000).await.unwrap();
        assert_eq!(txs.len(), 3);

        // Transfers land on the home chain only, in symbol order, scaled
        // to the home chain's smallest unit.
        let transfers = home.recorded_transfers();
        assert!(foreign.recorded_transfers().is_empty());
        assert_eq!(transfers.len(), 3);
        assert_eq!(
            transfers[0],
            (
                "kava1agcvt07tcw0tglu0hmwdecsnuxp2yd45f3avgm".to_string(),
                100_000 * 100_000_000,
                "bnb".to_string(),
            )
        );
        assert_eq!(transfers[1].2, "busd");
        assert_eq!(transfers[2].2, "xrpb");
    }

    #[tokio::test]
    async fn test_foreign_load_uses_raw_amounts() {
        let (service, home, foreign) = sim_service();

        service
            .load_deputies(ChainSide::Foreign, 100_000)
            .await
            .unwrap();

        assert!(home.recorded_transfers().is_empty());
        let transfers = foreign.recorded_transfers();
        assert_eq!(transfers.len(), 3);
        for (to, amount, _denom) in &transfers {
            assert_eq!(to, "bnb1j20j0e62n2l9sefxnu596a6jyn5x29lk2syd5j");
            assert_eq!(*amount, 100_000);
        }
        let denoms: Vec<_> = transfers.iter().map(|(_, _, d)| d.as_str()).collect();
        assert_eq!(denoms, vec!["BNB", "BUSD-BD1", "XRP-BF2"]);
    }

    #[tokio::test]
    async fn test_partial_failure_reports_and_continues() {
        let home = Arc::new(MockChainAdapter::new(HOME_WALLET));
        let foreign = Arc::new(MockChainAdapter::new(FOREIGN_WALLET));
        home.fail_transfers_for("bnb");
        home.fail_transfers_for("xrpb");

        let service = SwapService::new(home.clone(), foreign, assets(), fast_config());
        let err = service
            .load_deputies(ChainSide::Home, 100_000)
            .await
            .unwrap_err();

        let SwapError::DeputyLoadFailed { total, failures } = err else {
            panic!("expected DeputyLoadFailed");
        };
        assert_eq!(total, 3);
        assert_eq!(failures.len(), 2);
        assert!(failures[0].starts_with("bnb:"));
        assert!(failures[1].starts_with("xrpb:"));

        // The remaining asset was still funded.
        let transfers = home.recorded_transfers();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].2, "busd");
    }

    #[tokio::test]
    async fn test_amount_overflow_is_a_per_asset_failure() {
        let home = Arc::new(MockChainAdapter::new(HOME_WALLET));
        let foreign = Arc::new(MockChainAdapter::new(FOREIGN_WALLET));

        let service = SwapService::new(home.clone(), foreign, assets(), fast_config());
        let err = service
            .load_deputies(ChainSide::Home, u64::MAX)
            .await
            .unwrap_err();

        let SwapError::DeputyLoadFailed { failures, .. } = err else {
            panic!("expected DeputyLoadFailed");
        };
        // Every asset overflows at the same conversion factor.
        assert_eq!(failures.len(), 3);
        assert_eq!(home.transfer_count(), 0);
    }
}
