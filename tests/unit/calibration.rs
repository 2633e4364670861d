//! Unit tests for bias calibration

use crate::common::{MockSpi, SharedAccumulator, VirtualClock, create_mock_driver};
use adxrs450::{Accumulator, Adxrs450, CalibrationConfig, DriverState};

/// Ten-sample pattern averaging 12345.7
fn biased_pattern() -> Vec<i32> {
    let mut pattern = vec![12345; 3];
    pattern.extend([12346; 7]);
    pattern
}

#[test]
fn test_construction_calibrates() {
    let spi = MockSpi::new();
    let acc = SharedAccumulator::new();
    let mut clock = VirtualClock::with_pattern(&acc, biased_pattern());

    let driver = Adxrs450::new(spi, acc.clone(), &mut clock).unwrap();

    // Truncated toward zero
    assert_eq!(driver.center(), 12345);
    assert_eq!(acc.center(), 12345);
    assert_eq!(acc.value(), 0);
    assert_eq!(acc.count(), 0);
    assert_eq!(driver.state(), DriverState::Calibrated);
    assert!(driver.is_calibrated());
}

#[test]
fn test_calibration_timing() {
    let (_driver, _spi, _acc, clock) = create_mock_driver();

    // Settle, then the sampling window
    assert_eq!(clock.delays_ms(), &[100, 5000]);
    assert_eq!(clock.elapsed_ms(), 5100);
}

#[test]
fn test_negative_bias_truncates_toward_zero() {
    let (mut driver, _spi, acc, mut clock) = create_mock_driver();

    // Average -7.5
    clock.set_pattern(vec![-7, -8]);
    let center = driver.calibrate(&mut clock);

    assert_eq!(center, -7);
    assert_eq!(acc.center(), -7);
}

#[test]
fn test_calibration_removes_bias() {
    let (mut driver, _spi, acc, mut clock) = create_mock_driver();

    clock.set_pattern(vec![250]);
    driver.calibrate(&mut clock);

    // Stationary gyro with the same bias now integrates to zero
    embedded_hal::delay::DelayNs::delay_ms(&mut clock, 1000);
    assert_eq!(acc.count(), 1000);
    assert!(driver.angle().abs() < f32::EPSILON);
    assert!(driver.rate().abs() < f64::EPSILON);
}

#[test]
fn test_samples_before_window_are_discarded() {
    let (mut driver, _spi, acc, mut clock) = create_mock_driver();

    // Large samples during settling must not leak into the average
    let mut pattern = vec![100_000; 100];
    pattern.extend(vec![20; 5000]);
    clock.set_pattern(pattern);

    assert_eq!(driver.calibrate(&mut clock), 20);
    assert_eq!(acc.value(), 0);
}

#[test]
fn test_custom_calibration_timing() {
    let (mut driver, _spi, _acc, mut clock) = create_mock_driver();

    let config = CalibrationConfig {
        settle_ms: 10,
        window_ms: 50,
    };
    clock.set_pattern(vec![3]);
    assert_eq!(driver.calibrate_with(&mut clock, &config), 3);
    assert_eq!(&clock.delays_ms()[2..], &[10, 50]);
}
