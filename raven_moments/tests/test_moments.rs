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
use raven_moments::*;

// run with "cargo test test_moments -- --nocapture"

fn assert_near (a: f64, b: f64, eps: f64) {
    assert!( (a-b).abs() <= eps, "expected {} ~ {} (eps {})", a, b, eps);
}

/// an L-shaped asymmetric test pattern stamped into a w x h canvas at (x0,y0)
fn l_pattern (w: usize, h: usize, x0: usize, y0: usize)->Raster<f64> {
    let mut r = Raster::new( w, h);
    for i in 0..4 { r.set( x0, y0+i, 1.0); }
    for i in 1..3 { r.set( x0+i, y0+3, 0.5); }
    r.set( x0+1, y0, 2.0);
    r
}

/// 90 degree counterclockwise rotation
fn rot90 (src: &Raster<f64>)->Raster<f64> {
    let (w,h) = src.dimensions();
    let mut dst = Raster::new( h, w);
    for y in 0..h {
        for x in 0..w {
            dst.set( y, w-1-x, src.get( x, y));
        }
    }
    dst
}

#[test]
fn test_raw_moments () {
    let r = Raster::from_vec( 2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();

    assert_near( raw_moment( &r, 0, 0).unwrap(), 10.0, 1e-12);           // total mass
    assert_near( raw_moment( &r, 1, 0).unwrap(), 2.0 + 4.0, 1e-12);      // x weighted
    assert_near( raw_moment( &r, 0, 1).unwrap(), 3.0 + 4.0, 1e-12);      // y weighted
    assert_near( raw_moment( &r, 1, 1).unwrap(), 4.0, 1e-12);

    let empty: Raster<f64> = Raster::new( 0, 0);
    assert!( raw_moment( &empty, 0, 0).is_err());
}

#[test]
fn test_central_closed_form () {
    // centered 3x3 block of ones: mu20 = mu02 = 6, mu11 = 0, all 3rd order vanish
    let mut r = Raster::new( 5, 5);
    for y in 1..4 { for x in 1..4 { r.set( x, y, 1.0); } }

    let cm = central_moments( &r).unwrap();
    assert_near( cm.m00, 9.0, 1e-12);
    assert_near( cm.x_bar, 2.0, 1e-12);
    assert_near( cm.y_bar, 2.0, 1e-12);
    assert_near( cm.mu20, 6.0, 1e-12);
    assert_near( cm.mu02, 6.0, 1e-12);
    assert_near( cm.mu11, 0.0, 1e-12);
    assert_near( cm.mu30, 0.0, 1e-12);
    assert_near( cm.mu03, 0.0, 1e-12);
}

#[test]
fn test_translation_invariance () {
    let a = l_pattern( 16, 16, 2, 3);
    let b = l_pattern( 16, 16, 9, 7);

    let cma = central_moments( &a).unwrap();
    let cmb = central_moments( &b).unwrap();

    assert_near( cma.m00, cmb.m00, 1e-12);
    assert_near( cma.mu11, cmb.mu11, 1e-9);
    assert_near( cma.mu20, cmb.mu20, 1e-9);
    assert_near( cma.mu02, cmb.mu02, 1e-9);
    assert_near( cma.mu30, cmb.mu30, 1e-9);
    assert_near( cma.mu21, cmb.mu21, 1e-9);
    assert_near( cma.mu12, cmb.mu12, 1e-9);
    assert_near( cma.mu03, cmb.mu03, 1e-9);
}

#[test]
fn test_hu_rotation_invariance () {
    let a = l_pattern( 16, 16, 4, 4);
    let b = rot90( &a);

    let hu_a = hu_moments( &a).unwrap();
    let hu_b = hu_moments( &b).unwrap();

    for i in 0..7 {
        println!("phi{}: {:e} vs {:e}", i+1, hu_a[i], hu_b[i]);
        assert_near( hu_a[i], hu_b[i], 1e-9);
    }
}

#[test]
fn test_hu_scale_invariance () {
    // the same shape drawn at 2x scale - eta normalization keeps the low order invariants close
    let mut a = Raster::new( 20, 20);
    for y in 4..8 { for x in 4..8 { a.set( x, y, 1.0); } }
    let mut b = Raster::new( 20, 20);
    for y in 4..12 { for x in 4..12 { b.set( x, y, 1.0); } }

    let hu_a = hu_moments( &a).unwrap();
    let hu_b = hu_moments( &b).unwrap();
    assert_near( hu_a[0], hu_b[0], 0.02); // discretization limits the match for small shapes
}

#[test]
fn test_zero_mass () {
    let r: Raster<f64> = Raster::new( 8, 8);
    assert!( matches!( central_moments( &r), Err(RavenMomentsError::ZeroMass(_))));
}

#[test]
fn test_flusser_rotation_invariance () {
    let a = l_pattern( 16, 16, 4, 4);
    let b = rot90( &a);

    let fa = flusser_moments( &a).unwrap();
    let fb = flusser_moments( &b).unwrap();

    for i in 0..11 {
        println!("psi{}: {:e} vs {:e}", i+1, fa[i], fb[i]);
        assert_near( fa[i], fb[i], 1e-9);
    }
}

#[test]
fn test_complex_moment_basics () {
    let mut r = Raster::new( 5, 5);
    for y in 1..4 { for x in 1..4 { r.set( x, y, 1.0); } }

    // c11 is (mu20 + mu02)/mu00^2 - real and positive
    let c11 = complex_moment( &r, 1, 1).unwrap();
    assert_near( c11.im, 0.0, 1e-12);
    assert_near( c11.re, 12.0/81.0, 1e-12);
}

#[test]
fn test_radiometric () {
    let r = Raster::from_vec( 2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let rm = radiometric_moments( &r).unwrap();

    assert_near( rm.mean, 2.5, 1e-12);
    assert_near( rm.variance, 1.25, 1e-12);
    assert_near( rm.skewness, 0.0, 1e-12);
    assert_near( rm.kurtosis, 1.64, 1e-12);

    // constant region has zero variance and defined (zero) higher moments
    let r = Raster::from_vec( 2, 2, vec![7.0; 4]).unwrap();
    let rm = radiometric_moments( &r).unwrap();
    assert_near( rm.variance, 0.0, 1e-12);
    assert_near( rm.skewness, 0.0, 1e-12);
}
