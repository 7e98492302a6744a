//! Unit tests for swarm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DroneId, ZoneId};

    #[test]
    fn wire_encoding_uses_sentinel_for_none() {
        assert_eq!(ZoneId::to_wire(None), -1);
        assert_eq!(DroneId::to_wire(None), -1);
        assert_eq!(ZoneId::to_wire(Some(ZoneId(17))), 17);
    }

    #[test]
    fn from_wire_maps_negatives_to_none() {
        assert_eq!(DroneId::from_wire(-1).unwrap(), None);
        assert_eq!(DroneId::from_wire(3).unwrap(), Some(DroneId(3)));
        assert!(DroneId::from_wire(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn zone_ids_order_numerically() {
        assert!(ZoneId(41) < ZoneId(42));
        assert!(Some(ZoneId(0)) > None);
    }

    #[test]
    fn display() {
        assert_eq!(ZoneId(7).to_string(), "ZoneId(7)");
    }
}

#[cfg(test)]
mod record {
    use crate::{DroneState, EventType, Mode, round_battery, round_timestamp};

    #[test]
    fn event_literals() {
        let names: Vec<_> = EventType::ALL.iter().map(|e| e.as_str()).collect();
        assert_eq!(names, ["zone_discovered", "zone_claimed", "zone_processed", "drone_disabled"]);
        for e in EventType::ALL {
            assert_eq!(EventType::parse(e.as_str()), Some(e));
        }
        assert_eq!(EventType::parse("zone_lost"), None);
    }

    #[test]
    fn mode_codes_and_labels() {
        assert_eq!(Mode::Weeds.code(), 0);
        assert_eq!(Mode::Irrigation.code(), 1);
        assert_eq!(Mode::from_code(1), Some(Mode::Irrigation));
        assert_eq!(Mode::from_code(2), None);
        assert_eq!(Mode::Weeds.processed_state(), DroneState::Worked);
        assert_eq!(Mode::Irrigation.processed_state(), DroneState::Painted);
    }

    #[test]
    fn state_labels_round_trip() {
        assert_eq!(DroneState::Scout.as_str(), "SCOUT");
        assert_eq!(DroneState::parse("DISABLED"), Some(DroneState::Disabled));
        assert_eq!(DroneState::parse("scout"), None);
    }

    #[test]
    fn rounding_precision() {
        assert_eq!(round_timestamp(12.34567), 12.346);
        assert_eq!(round_battery(87.46), 87.5);
        assert_eq!(round_battery(100.0), 100.0);
    }
}

#[cfg(test)]
mod config {
    use crate::{Point, RunConfig};

    #[test]
    fn defaults_are_valid() {
        let cfg = RunConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.target_records, 1_000_000);
        assert_eq!(cfg.drone_count, 10);
        assert_eq!(cfg.zones_per_batch, 200);
        assert_eq!(cfg.polygon.len(), 4);
    }

    #[test]
    fn zero_target_rejected() {
        let cfg = RunConfig { target_records: 0, ..RunConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_drones_rejected() {
        let cfg = RunConfig { drone_count: 0, ..RunConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_zones_per_batch_rejected() {
        let cfg = RunConfig { zones_per_batch: 0, ..RunConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn out_of_range_probability_rejected() {
        let mut cfg = RunConfig::default();
        cfg.probabilities.process = 1.5;
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("process"), "got {err}");
    }

    #[test]
    fn non_finite_base_rejected() {
        let cfg = RunConfig { base_position: Point::new(f64::NAN, 0.0), ..RunConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn expected_batch_size() {
        let cfg = RunConfig::default();
        // 200 * (1 + 0.9 * 1.95) + 0.3 = 551.3
        assert!((cfg.expected_records_per_batch() - 551.3).abs() < 1e-9);
    }
}

#[cfg(test)]
mod rng {
    use rand::Rng;

    use crate::{SimRng, ZoneId, ZoneRng};

    #[test]
    fn zone_rng_is_deterministic() {
        let mut a = ZoneRng::new(42, ZoneId(5));
        let mut b = ZoneRng::new(42, ZoneId(5));
        for _ in 0..16 {
            assert_eq!(a.inner().r#gen::<u64>(), b.inner().r#gen::<u64>());
        }
    }

    #[test]
    fn zones_get_distinct_streams() {
        let mut a = ZoneRng::new(42, ZoneId(0));
        let mut b = ZoneRng::new(42, ZoneId(1));
        let mut run = SimRng::new(42);
        let x: u64 = a.inner().r#gen();
        let y: u64 = b.inner().r#gen();
        let z: u64 = run.inner().r#gen();
        assert_ne!(x, y);
        assert_ne!(x, z);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(7);
        for _ in 0..100 {
            assert!(rng.gen_bool(1.0));
            assert!(!rng.gen_bool(0.0));
        }
    }
}
