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

/// map projections used to relate geodetic positions to planar raster/map coordinates.
/// The seam is kept minimal - forward into map units, inverse back onto the ellipsoid.

use serde::{Serialize,Deserialize};

use crate::{cos, MEAN_EARTH_RADIUS};
use crate::angle::{Latitude,Longitude};
use crate::geo::GeoPoint;
use crate::utm::{self, UtmZone, UTM};

/// projection between geodetic (lon,lat) and planar map coordinates.
/// Map units are meters except for plain geographic grids which stay in degrees.
pub trait MapProjection {
    fn forward (&self, geo: &GeoPoint) -> Option<(f64,f64)>;
    fn inverse (&self, x: f64, y: f64) -> GeoPoint;
}

/// plate carrée with a standard parallel - meridian distances are scaled with cos(origin_lat)
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct Equirectangular {
    pub origin_lat: f64, // degrees
}

impl Equirectangular {
    pub fn new (origin_lat: f64) -> Self {
        Equirectangular { origin_lat }
    }
}

impl MapProjection for Equirectangular {
    fn forward (&self, geo: &GeoPoint) -> Option<(f64,f64)> {
        let k = cos( self.origin_lat.to_radians());
        let x = MEAN_EARTH_RADIUS * geo.longitude().radians() * k;
        let y = MEAN_EARTH_RADIUS * geo.latitude().radians();
        Some( (x, y) )
    }

    fn inverse (&self, x: f64, y: f64) -> GeoPoint {
        let k = cos( self.origin_lat.to_radians());
        let lon = (x / (MEAN_EARTH_RADIUS * k)).to_degrees();
        let lat = (y / MEAN_EARTH_RADIUS).to_degrees();
        GeoPoint::from_lon_lat_degrees( lon, lat)
    }
}

/// a fixed-zone UTM projection (the zone does not switch with the input longitude,
/// which is what rasters projected into a single zone need)
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct UtmProjection {
    pub utm_zone: UtmZone,
}

impl UtmProjection {
    pub fn new (utm_zone: UtmZone) -> Self {
        UtmProjection { utm_zone }
    }

    pub fn for_point (geo: &GeoPoint) -> Self {
        UtmProjection { utm_zone: utm::utm_zone( geo) }
    }
}

impl MapProjection for UtmProjection {
    fn forward (&self, geo: &GeoPoint) -> Option<(f64,f64)> {
        utm::geo_to_utm_zone( geo, self.utm_zone).map( |utm| (utm.easting, utm.northing))
    }

    fn inverse (&self, x: f64, y: f64) -> GeoPoint {
        utm::utm_to_geo( &UTM { easting: x, northing: y, utm_zone: self.utm_zone })
    }
}

/// geographic "projection" - map coordinates are plain (lon,lat) degrees.
/// Used for rasters that are stored on a regular geodetic grid (DTED, SRTM, geographic GeoTIFF)
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct Geographic {}

impl MapProjection for Geographic {
    fn forward (&self, geo: &GeoPoint) -> Option<(f64,f64)> {
        Some( (geo.longitude_degrees(), geo.latitude_degrees()) )
    }

    fn inverse (&self, x: f64, y: f64) -> GeoPoint {
        GeoPoint::from_lon_lat_degrees( x, y)
    }
}
