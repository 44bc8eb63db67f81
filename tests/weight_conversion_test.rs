// ABOUTME: Unit conversion tests for the manual weight entry endpoint
// ABOUTME: lbs and kg submissions both normalize to the canonical gram value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

use vitalforge::routes::weight::normalize_weight;

#[test]
fn pounds_convert_to_kilograms_and_grams() {
    let (lbs, kg, grams) = normalize_weight(179.0, "lbs").unwrap();
    assert!((lbs - 179.0).abs() < f64::EPSILON);
    assert!((kg - 81.193).abs() < 0.001);
    assert!((grams - 81_193.0).abs() < 1.0);
}

#[test]
fn kilograms_convert_to_pounds_and_grams() {
    let (lbs, kg, grams) = normalize_weight(81.0, "kg").unwrap();
    assert!((kg - 81.0).abs() < f64::EPSILON);
    assert!((lbs - 178.57).abs() < 0.01);
    assert!((grams - 81_000.0).abs() < f64::EPSILON);
}

#[test]
fn conversion_roundtrips_between_units() {
    let (_, kg, grams_from_lbs) = normalize_weight(200.0, "lbs").unwrap();
    let (lbs_back, _, grams_from_kg) = normalize_weight(kg, "kg").unwrap();
    assert!((lbs_back - 200.0).abs() < 0.001);
    assert!((grams_from_lbs - grams_from_kg).abs() < 1.0);
}

#[test]
fn unit_casing_is_tolerated() {
    assert!(normalize_weight(80.0, "KG").is_ok());
    assert!(normalize_weight(80.0, "Lbs").is_ok());
}

#[test]
fn bad_input_is_rejected() {
    assert!(normalize_weight(80.0, "stone").is_err());
    assert!(normalize_weight(0.0, "kg").is_err());
    assert!(normalize_weight(-5.0, "lbs").is_err());
    assert!(normalize_weight(f64::NAN, "kg").is_err());
}
