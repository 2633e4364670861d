//! Unit tests for angle and rate scaling

use crate::common::{assert_float_eq, create_mock_driver};

#[test]
fn test_angle_zero_after_construction() {
    let (driver, _spi, _acc, _clock) = create_mock_driver();
    assert!(driver.angle().abs() < f32::EPSILON);
    assert!(driver.rate().abs() < f64::EPSILON);
}

#[test]
fn test_angle_scaling() {
    let (driver, _spi, acc, _clock) = create_mock_driver();

    // 1_000_000 * 0.0125 * 0.001 = 12.5°
    acc.push_sample(1_000_000);
    assert_float_eq(f64::from(driver.angle()), 12.5, 1e-5);
}

#[test]
fn test_rate_scaling() {
    let (driver, _spi, acc, _clock) = create_mock_driver();

    // 800 * 0.0125 = 10 °/s
    acc.push_sample(800);
    assert_float_eq(driver.rate(), 10.0, 1e-12);

    acc.push_sample(-80);
    assert_float_eq(driver.rate(), -1.0, 1e-12);
}

#[test]
fn test_angle_is_continuous() {
    let (driver, _spi, acc, _clock) = create_mock_driver();

    // 721° / (0.0125 * 0.001)
    acc.push_sample(57_680_000);
    assert_float_eq(f64::from(driver.angle()), 721.0, 1e-3);
}

#[test]
fn test_angle_integrates_rate_over_time() {
    let (driver, _spi, _acc, mut clock) = create_mock_driver();

    // 10 °/s held for 2 s
    clock.set_pattern(vec![800]);
    embedded_hal::delay::DelayNs::delay_ms(&mut clock, 2000);

    assert_float_eq(f64::from(driver.angle()), 20.0, 1e-4);
    assert_float_eq(driver.rate(), 10.0, 1e-12);
}

#[test]
fn test_reset_zeroes_angle_and_keeps_center() {
    let (mut driver, _spi, acc, mut clock) = create_mock_driver();
    clock.set_pattern(vec![40]);
    driver.calibrate(&mut clock);
    assert_eq!(acc.center(), 40);

    acc.push_sample(1040);
    assert_float_eq(f64::from(driver.angle()), 0.0125, 1e-6);

    driver.reset();
    assert!(driver.angle().abs() < f32::EPSILON);
    assert_eq!(acc.center(), 40);
    assert_eq!(driver.center(), 40);
}

#[test]
fn test_raw_frames_feed_heading() {
    let (driver, _spi, acc, _clock) = create_mock_driver();

    // Sensor-data response carrying rate 800 in bits 10..=25
    let word = 0x0400_0000u32 | (800u32 << 10);
    acc.push_frame(&word.to_be_bytes());
    assert_float_eq(driver.rate(), 10.0, 1e-12);

    // A frame without the sensor-data status is dropped
    acc.push_frame(&[0x00, 0x00, 0x00, 0x00]);
    assert_float_eq(driver.rate(), 10.0, 1e-12);
}
