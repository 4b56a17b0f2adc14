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

use raven_common::geo::GeoPoint;
use raven_common::utm::{self,UtmZone};
use raven_common::mapproj::{MapProjection,UtmProjection,Equirectangular,Geographic};

// run with "cargo test test_utm -- --nocapture"

#[test]
fn test_zones () {
    let p = GeoPoint::from_lon_lat_degrees( -122.0, 37.0);
    let zone = utm::utm_zone( &p);
    assert_eq!( zone.zone, 10);
    assert_eq!( zone.band, 'S');
    assert!( zone.is_north());
    assert_eq!( zone.epsg(), 32610);

    let p = GeoPoint::from_lon_lat_degrees( 151.2, -33.9); // Sydney
    let zone = utm::utm_zone( &p);
    assert_eq!( zone.zone, 56);
    assert_eq!( zone.band, 'H');
    assert!( !zone.is_north());

    // Norway exception
    let p = GeoPoint::from_lon_lat_degrees( 4.0, 60.0);
    assert_eq!( utm::utm_zone( &p).zone, 32);
}

#[test]
fn test_known_position () {
    // San Francisco reference: 37.7749N 122.4194W -> 10N 551730E 4182689N
    let p = GeoPoint::from_lon_lat_degrees( -122.4194, 37.7749);
    let utm = utm::geo_to_utm( &p).unwrap();
    println!("easting={} northing={}", utm.easting, utm.northing);

    assert_eq!( utm.utm_zone.zone, 10);
    assert!( (utm.easting - 551730.0).abs() < 30.0);
    assert!( (utm.northing - 4182689.0).abs() < 30.0);

    // east of the central meridian (123W) means easting beyond the 500km false easting
    assert!( utm.easting > 500_000.0);
}

#[test]
fn test_roundtrip () {
    let positions = [
        (-122.0, 37.0),
        (-121.3, 36.1),
        (9.1, 48.7),
        (151.2, -33.9),
        (18.4, -33.9),
    ];

    for (lon,lat) in positions {
        let p = GeoPoint::from_lon_lat_degrees( lon, lat);
        let utm = utm::geo_to_utm( &p).unwrap();
        let p1 = utm::utm_to_geo( &utm);

        let d = p.haversine_distance( &p1);
        println!("({},{}) roundtrip error: {:?}", lon, lat, d);
        assert!( d.get::<uom::si::length::meter>() < 1.0);
    }
}

#[test]
fn test_out_of_range () {
    let p = GeoPoint::from_lon_lat_degrees( 0.0, 85.0); // north of UTM validity
    assert!( utm::geo_to_utm( &p).is_none());
}

#[test]
fn test_projections () {
    let p = GeoPoint::from_lon_lat_degrees( -122.0, 37.0);

    let proj = UtmProjection::for_point( &p);
    let (x,y) = proj.forward( &p).unwrap();
    let p1 = proj.inverse( x, y);
    assert!( p.haversine_distance( &p1).get::<uom::si::length::meter>() < 1.0);

    let proj = Equirectangular::new( 37.0);
    let (x,y) = proj.forward( &p).unwrap();
    let p1 = proj.inverse( x, y);
    assert!( (p1.longitude_degrees() - p.longitude_degrees()).abs() < 1e-6);
    assert!( (p1.latitude_degrees() - p.latitude_degrees()).abs() < 1e-6);

    let proj = Geographic{};
    let (x,y) = proj.forward( &p).unwrap();
    assert_eq!( (x,y), (-122.0, 37.0));
}
