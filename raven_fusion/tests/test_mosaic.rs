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

use raven_image::{Raster, GeoRaster, GridGeometry};
use raven_fusion::{Mosaic, MosaicMode, RavenFusionError};

// run with "cargo test test_mosaic -- --nocapture"

const NO_DATA: f64 = -9999.0;

/// a w x h constant tile with 1m pixels whose west/north corner is at (x0,y0)
fn tile (x0: f64, y0: f64, w: usize, h: usize, value: f64)->GeoRaster<f64> {
    let geometry = GridGeometry::new( x0 + 0.5, y0 - 0.5, 1.0, -1.0);
    GeoRaster::with_no_data( Raster::filled( w, h, value), geometry, NO_DATA)
}

#[test]
fn test_adjacent_tiles () {
    for mode in [MosaicMode::First, MosaicMode::Last, MosaicMode::Average, MosaicMode::Feather] {
        let mut mosaic = Mosaic::new( mode, NO_DATA);
        mosaic.add( tile( 0.0, 4.0, 4, 4, 10.0));
        mosaic.add( tile( 4.0, 4.0, 4, 4, 20.0));

        let out = mosaic.build( None).unwrap();
        let (w,h) = out.raster.dimensions();
        assert_eq!( (w,h), (8,4));

        // pixels inside exactly one input carry that input's value, in every mode
        assert_eq!( out.value_at_map( 1.5, 2.5), Some(10.0));
        assert_eq!( out.value_at_map( 6.5, 2.5), Some(20.0));
    }
}

#[test]
fn test_overlap_modes () {
    // A covers x 0..4, B covers x 2..6, overlap is x 2..4
    let build = |mode| {
        let mut mosaic = Mosaic::new( mode, NO_DATA);
        mosaic.add( tile( 0.0, 4.0, 4, 4, 10.0));
        mosaic.add( tile( 2.0, 4.0, 4, 4, 20.0));
        mosaic.build( None).unwrap()
    };

    let out = build( MosaicMode::First);
    assert_eq!( out.value_at_map( 2.5, 1.5), Some(10.0));

    let out = build( MosaicMode::Last);
    assert_eq!( out.value_at_map( 2.5, 1.5), Some(20.0));

    let out = build( MosaicMode::Average);
    assert_eq!( out.value_at_map( 2.5, 1.5), Some(15.0));

    // feathering weights by distance to the contributor's nearest edge: at x=2.5 the
    // pixel is deep inside A but close to B's western edge, so A dominates
    let out = build( MosaicMode::Feather);
    let v = out.value_at_map( 2.5, 1.5).unwrap();
    println!("feathered overlap value: {}", v);
    assert!( v > 10.0 && v < 15.0);
}

#[test]
fn test_disjoint_tiles_leave_gap () {
    let mut mosaic = Mosaic::new( MosaicMode::First, NO_DATA);
    mosaic.add( tile( 0.0, 2.0, 2, 2, 1.0));
    mosaic.add( tile( 4.0, 2.0, 2, 2, 2.0));

    let out = mosaic.build( None).unwrap();
    assert_eq!( out.raster.dimensions(), (6,2));

    assert_eq!( out.value_at_map( 0.5, 1.5), Some(1.0));
    assert_eq!( out.value_at_map( 4.5, 1.5), Some(2.0));

    // the gap is no_data, which value_at_map reports as None
    assert_eq!( out.value_at_map( 3.0, 1.0), None);
    assert_eq!( out.raster.get( 2, 0), NO_DATA);
}

#[test]
fn test_mixed_resolutions () {
    // a 1m tile and a 2m tile - output defaults to the finest (1m) grid
    let mut mosaic = Mosaic::new( MosaicMode::First, NO_DATA);
    mosaic.add( tile( 0.0, 4.0, 4, 4, 10.0));

    let coarse_geom = GridGeometry::new( 5.0, 3.0, 2.0, -2.0); // covers x 4..8, y 0..4
    mosaic.add( GeoRaster::with_no_data( Raster::filled( 2, 2, 20.0), coarse_geom, NO_DATA));

    let out = mosaic.build( None).unwrap();
    assert_eq!( out.raster.dimensions(), (8,4));
    assert_eq!( out.value_at_map( 6.5, 2.5), Some(20.0));
}

#[test]
fn test_input_validation () {
    let mosaic = Mosaic::new( MosaicMode::First, NO_DATA);
    assert!( matches!( mosaic.build( None), Err(RavenFusionError::NoInputs(_))));

    // south-up inputs are rejected
    let mut mosaic = Mosaic::new( MosaicMode::First, NO_DATA);
    let geom = GridGeometry::new( 0.5, 0.5, 1.0, 1.0);
    mosaic.add( GeoRaster::new( Raster::filled( 2, 2, 1.0), geom));
    assert!( matches!( mosaic.build( None), Err(RavenFusionError::IllegalArgument(_))));

    let mut mosaic = Mosaic::new( MosaicMode::First, NO_DATA);
    mosaic.add( tile( 0.0, 2.0, 2, 2, 1.0));
    assert!( mosaic.build( Some((-1.0, 1.0))).is_err());
}
