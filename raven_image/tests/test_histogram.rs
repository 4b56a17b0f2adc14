/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “RAVEN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use raven_image::Raster;
use raven_image::histogram::{Histogram, equalization_lut, stretch_lut, matching_lut, equalize_u8};

// run with "cargo test test_histogram -- --nocapture"

fn ramp_raster (n: usize)->Raster<f64> {
    Raster::from_vec( n, 1, (0..n).map( |i| i as f64).collect()).unwrap()
}

#[test]
fn test_binning () {
    let r = ramp_raster( 100); // 0..99
    let hist = Histogram::from_raster( &r, 10, 0.0, 100.0).unwrap();

    assert_eq!( hist.total(), 100);
    for i in 0..10 {
        assert_eq!( hist.count(i), 10);
    }

    assert_eq!( hist.bin_index( -5.0), 0);   // clamps into end bins
    assert_eq!( hist.bin_index( 500.0), 9);
}

#[test]
fn test_cdf_and_percentiles () {
    let r = ramp_raster( 100);
    let hist = Histogram::from_raster( &r, 10, 0.0, 100.0).unwrap();

    let cdf = hist.cdf();
    assert!( (cdf[0] - 0.1).abs() < 1e-12);
    assert!( (cdf[9] - 1.0).abs() < 1e-12);

    // cdf is monotone non-decreasing
    for i in 1..cdf.len() {
        assert!( cdf[i] >= cdf[i-1]);
    }

    let median = hist.percentile( 0.5);
    assert!( (median - 50.0).abs() <= hist.bin_width());

    assert!( hist.percentile( 0.0) <= hist.percentile( 1.0));
}

#[test]
fn test_equalization () {
    // skewed input: most mass at the low end
    let mut data: Vec<f64> = vec![5.0; 900];
    data.extend( (0..100).map( |i| 100.0 + i as f64));
    let r = Raster::from_vec( 100, 10, data).unwrap();

    let hist = Histogram::from_raster( &r, 64, 0.0, 200.0).unwrap();
    let lut = equalization_lut( &hist, 0.0, 255.0);

    let out = lut.apply( &r);
    let out_stats = out.stats();

    assert!( out_stats.min >= 0.0 && out_stats.max <= 255.0);

    // equalization keeps ordering
    assert!( lut.lookup( 5.0) <= lut.lookup( 150.0));

    // the first populated bin maps to out_min
    assert_eq!( lut.lookup( 5.0), 0.0);
}

#[test]
fn test_stretch () {
    let r = ramp_raster( 1000);
    let hist = Histogram::from_raster( &r, 256, 0.0, 1000.0).unwrap();

    let lut = stretch_lut( &hist, 0.02, 0.98, 0.0, 255.0).unwrap();

    // tails are clamped
    assert_eq!( lut.lookup( 0.0), 0.0);
    assert_eq!( lut.lookup( 999.0), 255.0);

    // midpoint maps near the output center
    let mid = lut.lookup( 500.0);
    assert!( (mid - 127.5).abs() < 5.0);

    assert!( stretch_lut( &hist, 0.9, 0.1, 0.0, 255.0).is_err());
}

#[test]
fn test_matching_self_is_identity () {
    let r = ramp_raster( 1000);
    let hist = Histogram::from_raster( &r, 256, 0.0, 1000.0).unwrap();

    let lut = matching_lut( &hist, &hist);
    for v in [10.0, 250.0, 500.0, 750.0, 990.0] {
        assert!( (lut.lookup(v) - v).abs() <= 2.0 * hist.bin_width());
    }
}

#[test]
fn test_matching_shifts_distribution () {
    let src = ramp_raster( 1000);
    let shifted = src.map( |v| v + 500.0);

    let h_src = Histogram::from_raster( &src, 256, 0.0, 1500.0).unwrap();
    let h_ref = Histogram::from_raster( &shifted, 256, 0.0, 1500.0).unwrap();

    let lut = matching_lut( &h_src, &h_ref);
    // matching the source against its shifted self should move values up by ~500
    for v in [100.0, 400.0, 800.0] {
        assert!( (lut.lookup(v) - (v + 500.0)).abs() < 3.0 * h_src.bin_width());
    }
}

#[test]
fn test_equalize_u8 () {
    // constant image is the identity
    let r = Raster::from_vec( 4, 4, vec![ 77u8; 16]).unwrap();
    let out = equalize_u8( &r);
    assert_eq!( out.data(), r.data());

    // two-level image ends up using the full output range
    let mut data = vec![ 100u8; 32];
    data.extend( vec![ 150u8; 32]);
    let r = Raster::from_vec( 8, 8, data).unwrap();
    let out = equalize_u8( &r);

    let stats = out.stats();
    assert_eq!( stats.max, 255);
    println!("two-level equalized: min={} max={}", stats.min, stats.max);
}
