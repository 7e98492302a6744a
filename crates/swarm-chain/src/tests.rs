//! Unit tests for swarm-chain.

use swarm_core::{Point, ZoneId, ZoneRng};

use crate::{ChainParams, Zone};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn zone(id: u64) -> Zone {
    Zone { id: ZoneId(id), position: Point::new(0.25, 0.75) }
}

fn params(claim: f64, process: f64) -> ChainParams {
    ChainParams::new(10, claim, process).unwrap()
}

fn rng(id: u64) -> ZoneRng {
    ZoneRng::new(42, ZoneId(id))
}

// ── Params ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod params_tests {
    use swarm_core::RunConfig;

    use crate::ChainParams;

    #[test]
    fn defaults_from_run_config() {
        let p = ChainParams::from_config(&RunConfig::default()).unwrap();
        assert_eq!(p.drone_count(), 10);
        assert_eq!(p.claim_probability(), 0.9);
        assert_eq!(p.process_probability(), 0.95);
    }

    #[test]
    fn zero_drones_rejected() {
        assert!(ChainParams::new(0, 0.9, 0.95).is_err());
    }

    #[test]
    fn probability_out_of_range_rejected() {
        assert!(ChainParams::new(1, -0.1, 0.95).is_err());
        assert!(ChainParams::new(1, 0.9, 1.01).is_err());
    }
}

// ── Chain shape ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod shape_tests {
    use swarm_core::{DroneState, EventType, Mode};

    use super::*;
    use crate::expand_zone;

    #[test]
    fn never_claimed_yields_discovery_only() {
        let chain = expand_zone(zone(0), Mode::Weeds, &params(0.0, 1.0), rng(0).inner());
        assert_eq!(chain.len(), 1);
        assert!(chain.claimed().is_none());
        assert!(chain.processed().is_none());
    }

    #[test]
    fn claimed_but_never_processed_yields_two() {
        let chain = expand_zone(zone(1), Mode::Weeds, &params(1.0, 0.0), rng(1).inner());
        assert_eq!(chain.len(), 2);
        assert!(chain.claimed().is_some());
        assert!(chain.processed().is_none());
    }

    #[test]
    fn always_processed_yields_three_in_order() {
        let chain = expand_zone(zone(2), Mode::Weeds, &params(1.0, 1.0), rng(2).inner());
        let events: Vec<_> = chain.records().map(|r| r.event).collect();
        assert_eq!(
            events,
            [EventType::ZoneDiscovered, EventType::ZoneClaimed, EventType::ZoneProcessed]
        );
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn discovery_is_a_scout_record() {
        let chain = expand_zone(zone(3), Mode::Irrigation, &params(1.0, 1.0), rng(3).inner());
        let d = chain.discovered();
        assert_eq!(d.drone, None);
        assert_eq!(d.battery, 100.0);
        assert_eq!(d.state, DroneState::Scout);
        assert!((0.0..300.0).contains(&d.timestamp));
    }

    #[test]
    fn stages_share_zone_position_and_mode() {
        let chain = expand_zone(zone(4), Mode::Irrigation, &params(1.0, 1.0), rng(4).inner());
        for r in chain.records() {
            assert_eq!(r.zone, Some(ZoneId(4)));
            assert_eq!(r.position, Point::new(0.25, 0.75));
            assert_eq!(r.mode, Mode::Irrigation);
            assert_eq!(r.mission_time(), r.timestamp);
        }
    }

    #[test]
    fn processed_label_follows_mode() {
        let weeds = expand_zone(zone(5), Mode::Weeds, &params(1.0, 1.0), rng(5).inner());
        let irrigation = expand_zone(zone(5), Mode::Irrigation, &params(1.0, 1.0), rng(5).inner());
        assert_eq!(weeds.processed().unwrap().state, DroneState::Worked);
        assert_eq!(irrigation.processed().unwrap().state, DroneState::Painted);
    }
}

// ── Statistical invariants over many chains ───────────────────────────────────

#[cfg(test)]
mod invariant_tests {
    use swarm_core::{DroneId, Mode};

    use super::*;
    use crate::expand_zone;

    #[test]
    fn claim_and_process_ranges_hold() {
        let p = params(1.0, 1.0);
        for id in 0..5_000 {
            let chain = expand_zone(zone(id), Mode::Weeds, &p, rng(id).inner());
            let d = chain.discovered();
            let c = chain.claimed().unwrap();
            let pr = chain.processed().unwrap();

            assert!((40.0..=100.0).contains(&c.battery), "claim battery {}", c.battery);
            assert!(pr.battery < c.battery, "processed {} !< claimed {}", pr.battery, c.battery);
            assert!(c.battery - pr.battery >= 4.9 && c.battery - pr.battery <= 20.1);

            assert!(c.timestamp >= d.timestamp + 0.999 && c.timestamp <= d.timestamp + 60.001);
            assert!(pr.timestamp >= c.timestamp + 0.999 && pr.timestamp <= c.timestamp + 10.001);

            assert_eq!(c.drone, pr.drone);
            assert!(c.drone.unwrap() < DroneId(10));
        }
    }

    #[test]
    fn values_are_rounded_to_wire_precision() {
        let p = params(1.0, 1.0);
        for id in 0..500 {
            let chain = expand_zone(zone(id), Mode::Weeds, &p, rng(id).inner());
            for r in chain.records() {
                assert!(((r.timestamp * 1000.0).round() - r.timestamp * 1000.0).abs() < 1e-6);
                assert!(((r.battery * 10.0).round() - r.battery * 10.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn default_branch_rates_are_close_to_nominal() {
        let p = params(0.9, 0.95);
        let n = 20_000u64;
        let (mut claimed, mut processed) = (0u64, 0u64);
        for id in 0..n {
            let chain = expand_zone(zone(id), Mode::Weeds, &p, rng(id).inner());
            claimed += chain.claimed().is_some() as u64;
            processed += chain.processed().is_some() as u64;
        }
        let claim_rate = claimed as f64 / n as f64;
        let process_rate = processed as f64 / claimed as f64;
        assert!((claim_rate - 0.9).abs() < 0.02, "claim rate {claim_rate}");
        assert!((process_rate - 0.95).abs() < 0.02, "process rate {process_rate}");
    }

    #[test]
    fn same_rng_same_chain() {
        let p = params(0.9, 0.95);
        let a = expand_zone(zone(9), Mode::Weeds, &p, rng(9).inner());
        let b = expand_zone(zone(9), Mode::Weeds, &p, rng(9).inner());
        assert_eq!(a, b);
    }
}

// ── Failure records ───────────────────────────────────────────────────────────

#[cfg(test)]
mod failure_tests {
    use swarm_core::{DroneId, DroneState, EventType, Mode, Point, SimRng};

    use crate::disabled_record;

    #[test]
    fn disabled_record_shape() {
        let mut rng = SimRng::new(5);
        let base = Point::new(800.0, 650.0);
        for _ in 0..1_000 {
            let r = disabled_record(3, base, Mode::Irrigation, rng.inner());
            assert_eq!(r.event, EventType::DroneDisabled);
            assert_eq!(r.zone, None);
            assert_eq!(r.position, base);
            assert_eq!(r.state, DroneState::Disabled);
            assert_eq!(r.mode, Mode::Irrigation);
            assert!((0.0..=30.0).contains(&r.battery));
            assert!((0.0..=300.0).contains(&r.timestamp));
            assert!(r.drone.unwrap() < DroneId(3));
        }
    }
}
