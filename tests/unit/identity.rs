//! Unit tests for part identification and the degraded construction path

use crate::common::{MockSpi, SharedAccumulator, VirtualClock};
use adxrs450::{Adxrs450, DriverState, Error, Port};

#[test]
fn test_part_id_accepts_any_revision() {
    for pid in [0x5200, 0x5201, 0x52FF] {
        let spi = MockSpi::new();
        spi.set_part_id(pid);
        let acc = SharedAccumulator::new();
        let mut clock = VirtualClock::new(&acc);

        let mut driver = Adxrs450::new(spi, acc, &mut clock).unwrap();
        assert_eq!(driver.read_part_id().unwrap(), pid);
        assert_eq!(driver.state(), DriverState::Calibrated);
    }
}

#[test]
fn test_mismatch_is_reported() {
    let spi = MockSpi::new();
    spi.set_part_id(0x1234);
    let acc = SharedAccumulator::new();
    let mut clock = VirtualClock::new(&acc);

    let result = Adxrs450::new(spi, acc.clone(), &mut clock);
    assert!(matches!(result.err(), Some(Error::InvalidDevice(0x1234))));
    assert!(!acc.is_enabled());
}

#[test]
fn test_mismatch_tolerant_construction() {
    let spi = MockSpi::new();
    spi.set_part_id(0x5300);
    let acc = SharedAccumulator::new();
    let mut clock = VirtualClock::new(&acc);

    let driver = Adxrs450::new_tolerant(spi.clone(), acc.clone(), Port::OnboardCs1, &mut clock)
        .expect("identity mismatch must not fail construction");

    assert_eq!(
        driver.state(),
        DriverState::IdentityRejected { part_id: 0x5300 }
    );
    assert!(!driver.is_calibrated());

    // Accumulator never enabled and no calibration wait
    assert!(!acc.is_enabled());
    assert_eq!(clock.elapsed_ms(), 0);
    assert_eq!(spi.commanded_addresses(), vec![0x0C]);

    // Queries must not crash
    let _ = driver.angle();
    let _ = driver.rate();
}

#[test]
fn test_frame_error_on_part_id_is_a_mismatch() {
    let spi = MockSpi::new();
    spi.set_frame_error(0x0C);
    let acc = SharedAccumulator::new();
    let mut clock = VirtualClock::new(&acc);

    let driver = Adxrs450::new_tolerant(spi, acc, Port::default(), &mut clock).unwrap();
    assert_eq!(driver.state(), DriverState::IdentityRejected { part_id: 0 });
}

#[test]
fn test_accumulator_enabled_with_fixed_parameters() {
    let spi = MockSpi::new();
    let acc = SharedAccumulator::new();
    let mut clock = VirtualClock::new(&acc);

    let driver = Adxrs450::new(spi, acc.clone(), &mut clock).unwrap();
    let config = acc.config().expect("accumulator enabled");
    assert_eq!(config, adxrs450::AccumulatorConfig::ADXRS450);
    assert_eq!(driver.accumulator_config(), &config);
}
