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
use raven_som::{Som,SomParams,RavenSomError};

// run with "cargo test test_som -- --nocapture"

/// two tight clusters around (1,1) and (9,9)
fn cluster_samples ()->Vec<Vec<f64>> {
    let mut samples = Vec::new();
    for i in 0..20 {
        let jitter = (i % 5) as f64 * 0.1;
        samples.push( vec![ 1.0 + jitter, 1.0 - jitter]);
        samples.push( vec![ 9.0 - jitter, 9.0 + jitter]);
    }
    samples
}

#[test]
fn test_bmu () {
    let samples = vec![ vec![0.0, 0.0], vec![10.0, 10.0] ];
    let mut som = Som::randomized( 2, 1, 2, &samples, 42).unwrap();

    let params = SomParams { epochs: 50, alpha0: 0.5, alpha_end: 0.01, radius0: 1.0, radius_end: 0.1 };
    som.train( &samples, &params, 42).unwrap();

    let bmu_a = som.best_matching_unit( &[0.0, 0.0]);
    let bmu_b = som.best_matching_unit( &[10.0, 10.0]);
    assert_ne!( bmu_a, bmu_b);
}

#[test]
fn test_training_separates_clusters () {
    let samples = cluster_samples();

    let mut som = Som::randomized( 2, 1, 2, &samples, 7).unwrap();
    let q0 = som.quantization_error( &samples).unwrap();

    let params = SomParams { epochs: 100, alpha0: 0.5, alpha_end: 0.01, radius0: 1.5, radius_end: 0.2 };
    som.train( &samples, &params, 7).unwrap();

    let q1 = som.quantization_error( &samples).unwrap();
    println!("quantization error: {} -> {}", q0, q1);
    assert!( q1 <= q0);
    assert!( q1 < 1.0); // both clusters have a nearby neuron

    // the two neurons ended up near the cluster centers
    let bmu_a = som.best_matching_unit( &[1.0, 1.0]);
    let bmu_b = som.best_matching_unit( &[9.0, 9.0]);
    assert_ne!( bmu_a, bmu_b);

    let na = som.neuron( bmu_a.0, bmu_a.1);
    assert!( (na[0] - 1.0).abs() < 2.0 && (na[1] - 1.0).abs() < 2.0);

    // weights stay finite
    for r in 0..som.rows() {
        for c in 0..som.cols() {
            for &w in som.neuron( c, r).iter() {
                assert!( w.is_finite());
            }
        }
    }
}

#[test]
fn test_classify () {
    let samples = cluster_samples();
    let mut som = Som::randomized( 2, 1, 2, &samples, 11).unwrap();
    let params = SomParams { epochs: 100, alpha0: 0.5, alpha_end: 0.01, radius0: 1.5, radius_end: 0.2 };
    som.train( &samples, &params, 11).unwrap();

    // a 2 band, 2x2 image: left column cluster A, right column cluster B
    let band0 = Raster::from_vec( 2, 2, vec![ 1.0, 9.0, 1.0, 9.0]).unwrap();
    let band1 = Raster::from_vec( 2, 2, vec![ 1.0, 9.0, 1.0, 9.0]).unwrap();

    let labels = som.classify( &[band0, band1]).unwrap();

    assert_eq!( labels.get(0,0), labels.get(0,1));
    assert_eq!( labels.get(1,0), labels.get(1,1));
    assert_ne!( labels.get(0,0), labels.get(1,0));
}

#[test]
fn test_dimension_checks () {
    let som = Som::new( 2, 2, 3);

    let bands = vec![ Raster::<f64>::new(2,2), Raster::<f64>::new(2,2) ]; // 2 bands for dim 3
    assert!( matches!( som.classify( &bands), Err(RavenSomError::InvalidDimensions(_))));

    let samples = vec![ vec![1.0, 2.0] ]; // dim 2 samples for dim 3 map
    let mut som = Som::new( 2, 2, 3);
    let params = SomParams::new( 10);
    assert!( som.train( &samples, &params, 0).is_err());

    let no_samples: Vec<Vec<f64>> = Vec::new();
    assert!( matches!( Som::randomized( 2, 2, 3, &no_samples, 0), Err(RavenSomError::InsufficientData(_))));
}

#[test]
fn test_schedule_validation () {
    let samples = vec![ vec![1.0], vec![2.0] ];
    let mut som = Som::new( 2, 1, 1);

    let params = SomParams { epochs: 0, alpha0: 0.5, alpha_end: 0.01, radius0: 1.0, radius_end: 0.1 };
    assert!( matches!( som.train( &samples, &params, 0), Err(RavenSomError::IllegalArgument(_))));
}

#[test]
fn test_serde_roundtrip () {
    let samples = cluster_samples();
    let mut som = Som::randomized( 3, 2, 2, &samples, 5).unwrap();
    som.train( &samples, &SomParams::new( 20), 5).unwrap();

    let s = ron::to_string( &som).unwrap();
    let som1: Som = ron::from_str( &s).unwrap();

    assert_eq!( som1.cols(), 3);
    assert_eq!( som1.rows(), 2);
    assert_eq!( som1.dim(), 2);

    for r in 0..som.rows() {
        for c in 0..som.cols() {
            assert_eq!( som.neuron( c, r), som1.neuron( c, r));
        }
    }

    // a trained map restored from RON classifies identically
    assert_eq!( som.best_matching_unit( &[1.0,1.0]), som1.best_matching_unit( &[1.0,1.0]));
}
