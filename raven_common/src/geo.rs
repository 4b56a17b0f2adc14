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

/// this module provides support for geometries on the WGS84 ellipsoid surface.
/// We build on existing crates - [geo](https://docs.rs/geo/latest/geo/index.html) for surface
/// geometry and [nav_types](https://docs.rs/nav-types/latest/nav_types/) for ECEF conversion -
/// and use the new type pattern to add angle normalization and units-of-measure on top of them.

use std::fmt::{self,Debug,Display};
use serde::{Serialize,Deserialize};
use serde::ser::{Serialize as SerializeTrait, Serializer, SerializeStruct};
use serde::de::{Deserialize as DeserializeTrait, Deserializer};

use geo::{Coord, Point, Rect};
use geo::algorithm::line_measures::metric_spaces::{Haversine,Geodesic};
use geo::Distance;

use nav_types::{ECEF,WGS84};

use uom::si::f64::Length;
use uom::si::length::meter;

use crate::BoundingBox;
use crate::angle::{normalize_180, normalize_90, Longitude, Latitude};

pub type GeoCoord = Coord<f64>;

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat (lon: Longitude, lat: Latitude) -> Self {
        GeoPoint( Point::new( lon.degrees(), lat.degrees()))
    }
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( normalize_180(lon), normalize_90(lat)))
    }

    /// note this is not just a conversion but clamps the ECEF point to the WGS84 ellipsoid surface
    pub fn from_ecef (ecef: ECEF<f64>) -> Self {
        let wgs84: WGS84<f64> = ecef.into();
        GeoPoint( Point::new(
            normalize_180(wgs84.longitude_degrees()),
            normalize_90(wgs84.latitude_degrees())
        ))
    }

    pub fn longitude(&self) -> Longitude { Longitude::from_degrees( self.0.x()) }
    pub fn latitude(&self) -> Latitude { Latitude::from_degrees( self.0.y()) }

    pub fn longitude_degrees(&self) -> f64 { self.0.x() }
    pub fn latitude_degrees(&self) -> f64 { self.0.y() }

    pub fn point<'a> (&'a self) -> &'a Point { &self.0 }
    pub fn coord (&self)->GeoCoord { self.0.0.clone() }

    /// non-consuming conversion to ECEF (surface point, height 0)
    pub fn as_ecef (&self)->ECEF<f64> { WGS84::from_degrees_and_meters( self.0.y(), self.0.x(), 0.0).into() }

    pub fn haversine_distance (&self, other: &GeoPoint) -> Length {
        Length::new::<meter>( Haversine.distance( self.0, other.0))
    }

    pub fn geodesic_distance (&self, other: &GeoPoint) -> Length {
        Length::new::<meter>( Geodesic.distance( self.0, other.0))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0.x(),self.0.y())
    }
}

impl SerializeTrait for GeoPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoPoint", 2)?;
        state.serialize_field("lon", &self.longitude_degrees())?;
        state.serialize_field("lat", &self.latitude_degrees())?;
        state.end()
    }
}

// we accept the field names of the `geo` crate ("x","y") and long forms as aliases so that data
// serialized from foreign sources can be read directly - provided it uses the same coordinate order
#[derive(Deserialize)]
struct GeoPointFields {
    #[serde(alias="longitude", alias="x")] lon: f64,
    #[serde(alias="latitude", alias="y")] lat: f64,
}

impl<'de> DeserializeTrait<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<GeoPoint, D::Error> where D: Deserializer<'de> {
        let fields = GeoPointFields::deserialize(deserializer)?;
        Ok( GeoPoint::from_lon_lat_degrees( fields.lon, fields.lat) )
    }
}

/* #endregion GeoPoint */

/* #region GeoPoint3 ***********************************************************************************************/

/// 3 dimensional point given by longitude, latitude and height above the ellipsoid surface
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint3 {
    point: Point,
    height: f64  // meters
}

impl GeoPoint3 {
    pub fn from_lon_lat_height (lon: Longitude, lat: Latitude, height: Length) -> Self {
        GeoPoint3 {
            point: Point::new( lon.degrees(), lat.degrees()),
            height: height.get::<meter>()
        }
    }
    pub fn from_lon_lat_degrees_height_meters (lon: f64, lat: f64, height: f64) -> Self {
        GeoPoint3 {
            point: Point::new( normalize_180(lon), normalize_90(lat)),
            height
        }
    }

    #[inline] pub fn longitude(&self) -> Longitude { Longitude::from_degrees( self.point.x()) }
    #[inline] pub fn latitude(&self) -> Latitude { Latitude::from_degrees( self.point.y()) }
    #[inline] pub fn height(&self) -> Length { Length::new::<meter>(self.height) }

    pub fn longitude_degrees(&self) -> f64 { self.point.x() }
    pub fn latitude_degrees(&self) -> f64 { self.point.y() }
    pub fn height_meters(&self) -> f64 { self.height }

    pub fn surface_point (&self) -> GeoPoint { GeoPoint( self.point) }

    pub fn as_ecef (&self)->ECEF<f64> {
        WGS84::from_degrees_and_meters( self.point.y(), self.point.x(), self.height).into()
    }
}

impl fmt::Display for GeoPoint3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{}]", self.longitude_degrees(),self.latitude_degrees(), self.height_meters())
    }
}

impl From<ECEF<f64>> for GeoPoint3 {
    fn from (ecef: ECEF<f64>) -> Self {
        let wgs84: WGS84<f64> = ecef.into();
        GeoPoint3 {
            point: Point::new( wgs84.longitude_degrees(), wgs84.latitude_degrees()),
            height: wgs84.altitude()
        }
    }
}

impl SerializeTrait for GeoPoint3 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoPoint3", 3)?;
        state.serialize_field("lon", &self.longitude_degrees())?;
        state.serialize_field("lat", &self.latitude_degrees())?;
        state.serialize_field("height", &self.height_meters())?;
        state.end()
    }
}

#[derive(Deserialize)]
struct GeoPoint3Fields {
    #[serde(alias="longitude", alias="x")] lon: f64,
    #[serde(alias="latitude", alias="y")] lat: f64,
    #[serde(alias="alt", alias="z")] height: f64,
}

impl<'de> DeserializeTrait<'de> for GeoPoint3 {
    fn deserialize<D>(deserializer: D) -> Result<GeoPoint3, D::Error> where D: Deserializer<'de> {
        let fields = GeoPoint3Fields::deserialize(deserializer)?;
        Ok( GeoPoint3::from_lon_lat_degrees_height_meters( fields.lon, fields.lat, fields.height) )
    }
}

/* #endregion GeoPoint3 */

/* #region GeoRect ***********************************************************************************************/

#[derive(Debug,Clone)]
pub struct GeoRect(Rect);

impl GeoRect {
    pub fn from_min_max (sw: GeoPoint, ne: GeoPoint) -> Self {
        GeoRect( Rect::new( sw.coord(), ne.coord()))
    }

    pub fn from_wsen (west: Longitude, south: Latitude, east: Longitude, north: Latitude) -> Self {
        GeoRect( Rect::new( Point::new( west.degrees(), south.degrees()), Point::new( east.degrees(), north.degrees()) ))
    }

    pub fn from_wsen_degrees (wsen: &[f64;4]) -> Self {
        GeoRect( Rect::new( Point::new( wsen[0], wsen[1]), Point::new( wsen[2], wsen[3])))
    }

    pub fn from_bbox (bbox: &BoundingBox<f64>) -> Self {
        GeoRect( Rect::new( Point::new( bbox.west, bbox.south), Point::new( bbox.east, bbox.north)))
    }

    #[inline] pub fn west(&self)->Longitude { Longitude::from_degrees( self.0.min().x )}
    #[inline] pub fn east(&self)->Longitude { Longitude::from_degrees( self.0.max().x )}
    #[inline] pub fn south(&self)->Latitude { Latitude::from_degrees( self.0.min().y )}
    #[inline] pub fn north(&self)->Latitude { Latitude::from_degrees( self.0.max().y )}

    pub fn as_bbox (&self) -> BoundingBox<f64> {
        BoundingBox::new( self.0.min().x, self.0.min().y, self.0.max().x, self.0.max().y)
    }

    /// west/south edges inclusive, east/north edges exclusive - this is the convention used to
    /// assign points on shared cell seams to a unique elevation/raster cell
    pub fn contains_ws_inclusive (&self, p: &GeoPoint) -> bool {
        let (x,y) = (p.longitude_degrees(), p.latitude_degrees());
        x >= self.0.min().x && x < self.0.max().x && y >= self.0.min().y && y < self.0.max().y
    }

    pub fn contains (&self, p: &GeoPoint) -> bool {
        let (x,y) = (p.longitude_degrees(), p.latitude_degrees());
        x >= self.0.min().x && x <= self.0.max().x && y >= self.0.min().y && y <= self.0.max().y
    }
}

impl SerializeTrait for GeoRect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoRect", 4)?;
        state.serialize_field("west", &self.west().degrees())?;
        state.serialize_field("south", &self.south().degrees())?;
        state.serialize_field("east", &self.east().degrees())?;
        state.serialize_field("north", &self.north().degrees())?;
        state.end()
    }
}

#[derive(Deserialize)]
struct GeoRectFields { west: f64, south: f64, east: f64, north: f64 }

impl<'de> DeserializeTrait<'de> for GeoRect {
    fn deserialize<D>(deserializer: D) -> Result<GeoRect, D::Error> where D: Deserializer<'de> {
        let fields = GeoRectFields::deserialize(deserializer)?;
        Ok( GeoRect::from_wsen_degrees( &[fields.west, fields.south, fields.east, fields.north]) )
    }
}

/* #endregion GeoRect */
