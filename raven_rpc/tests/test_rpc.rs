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

use raven_common::geo::{GeoPoint,GeoPoint3,GeoRect};
use raven_common::kwl::KeywordList;
use raven_dem::{ElevationSource, Result as DemResult};
use raven_rpc::{RpcModel,RavenRpcError};

// run with "cargo test test_rpc -- --nocapture"

/// a well conditioned synthetic model: near-affine with mild cross and height terms
fn test_model ()->RpcModel {
    let mut line_num = [0.0; 20];
    line_num[2] = 1.0;    // P
    line_num[1] = 0.02;   // L
    line_num[3] = 0.01;   // H
    line_num[4] = 0.005;  // L*P

    let mut line_den = [0.0; 20];
    line_den[0] = 1.0;
    line_den[3] = 0.001;  // H

    let mut samp_num = [0.0; 20];
    samp_num[1] = 1.0;    // L
    samp_num[2] = -0.015; // P
    samp_num[3] = 0.012;  // H

    let mut samp_den = [0.0; 20];
    samp_den[0] = 1.0;
    samp_den[2] = 0.0005; // P

    RpcModel {
        line_offset: 8000.0, line_scale: 8000.0,
        samp_offset: 8000.0, samp_scale: 8000.0,
        lat_offset: 37.0, lat_scale: 0.1,
        lon_offset: -122.0, lon_scale: 0.1,
        height_offset: 100.0, height_scale: 500.0,
        line_num_coeff: line_num, line_den_coeff: line_den,
        samp_num_coeff: samp_num, samp_den_coeff: samp_den,
    }
}

#[test]
fn test_forward () {
    let model = test_model();

    // the normalization center maps to the image center
    let g = GeoPoint3::from_lon_lat_degrees_height_meters( -122.0, 37.0, 100.0);
    let (line,samp) = model.ground_to_image( &g).unwrap();
    assert!( (line - 8000.0).abs() < 1e-9);
    assert!( (samp - 8000.0).abs() < 1e-9);

    // a point north of center moves down-track
    let g = GeoPoint3::from_lon_lat_degrees_height_meters( -122.0, 37.05, 100.0);
    let (line,_) = model.ground_to_image( &g).unwrap();
    assert!( line > 8000.0);
}

#[test]
fn test_inverse_roundtrip () {
    let model = test_model();

    let positions = [
        (-122.0, 37.0, 100.0),
        (-121.95, 37.05, 150.0),
        (-122.08, 36.92, 0.0),
        (-121.92, 37.08, 600.0),
    ];

    for (lon,lat,h) in positions {
        let g = GeoPoint3::from_lon_lat_degrees_height_meters( lon, lat, h);
        let (line,samp) = model.ground_to_image( &g).unwrap();
        let p = model.image_to_ground( line, samp, h).unwrap();

        println!("({},{},{}) -> ({:.2},{:.2}) -> {}", lon, lat, h, line, samp, p);
        assert!( (p.longitude_degrees() - lon).abs() < 1e-8);
        assert!( (p.latitude_degrees() - lat).abs() < 1e-8);
    }
}

#[test]
fn test_height_sensitivity () {
    // the H terms shift the projection, so the same pixel at different heights maps to
    // different ground positions
    let model = test_model();

    let p0 = model.image_to_ground( 8200.0, 7900.0, 0.0).unwrap();
    let p1 = model.image_to_ground( 8200.0, 7900.0, 500.0).unwrap();
    assert!( p0 != p1);
}

#[test]
fn test_degenerate_model () {
    let mut model = test_model();
    model.line_den_coeff = [0.0; 20];

    let g = GeoPoint3::from_lon_lat_degrees_height_meters( -122.0, 37.0, 100.0);
    assert!( matches!( model.ground_to_image( &g), Err(RavenRpcError::DegenerateModel(_))));
}

#[test]
fn test_kwl_roundtrip () {
    let model = test_model();

    let kwl = model.to_kwl();
    assert_eq!( kwl.find( "type"), Some("RpcModel"));

    // through the external text format and back, coefficients exact
    let kwl1 = KeywordList::parse_str( &kwl.write_string()).unwrap();
    let model1 = RpcModel::from_kwl( &kwl1).unwrap();
    assert_eq!( model, model1);
}

#[test]
fn test_kwl_missing_key () {
    let model = test_model();
    let mut kwl = model.to_kwl();
    kwl.remove( "samp_num_coeff_07");

    assert!( matches!( RpcModel::from_kwl( &kwl), Err(RavenRpcError::MissingKey(_))));
}

#[test]
fn test_serde_roundtrip () {
    let model = test_model();
    let s = serde_json::to_string( &model).unwrap();
    let model1: RpcModel = serde_json::from_str( &s).unwrap();
    assert_eq!( model, model1);
}

//--- terrain coupled inverse

struct FlatTerrain { height: f64 }

impl ElevationSource for FlatTerrain {
    fn height_above_msl (&self, _p: &GeoPoint)->DemResult<Option<f64>> { Ok( Some( self.height)) }
    fn bounds (&self)->GeoRect { GeoRect::from_wsen_degrees( &[-180.0,-90.0,180.0,90.0]) }
}

struct NoTerrain {}

impl ElevationSource for NoTerrain {
    fn height_above_msl (&self, _p: &GeoPoint)->DemResult<Option<f64>> { Ok( None) }
    fn bounds (&self)->GeoRect { GeoRect::from_wsen_degrees( &[-180.0,-90.0,180.0,90.0]) }
}

#[test]
fn test_elevation_coupled_inverse () {
    let model = test_model();
    let terrain = FlatTerrain { height: 250.0 };

    // forward-project a point ON the terrain, then recover it from the pixel alone
    let g = GeoPoint3::from_lon_lat_degrees_height_meters( -121.97, 37.03, 250.0);
    let (line,samp) = model.ground_to_image( &g).unwrap();

    let p = model.image_to_ground_at_elevation( line, samp, &terrain).unwrap();
    assert!( (p.height_meters() - 250.0).abs() < 1e-9);
    assert!( (p.longitude_degrees() - (-121.97)).abs() < 1e-6);
    assert!( (p.latitude_degrees() - 37.03).abs() < 1e-6);
}

#[test]
fn test_no_elevation_coverage () {
    let model = test_model();
    let res = model.image_to_ground_at_elevation( 8000.0, 8000.0, &NoTerrain{});
    assert!( matches!( res, Err(RavenRpcError::NoElevation(_))));
}
