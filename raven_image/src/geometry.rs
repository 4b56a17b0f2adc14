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

use serde::{Serialize,Deserialize};
use raven_common::BoundingBox;

use crate::{Raster,RasterPixel,Result,RavenImageError};

/// axis aligned pixel <-> map coordinate transform. (origin_x,origin_y) is the map position of the
/// CENTER of pixel (0,0); dy is negative for north-up rasters. Rotation terms are not supported
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GridGeometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl GridGeometry {
    pub fn new (origin_x: f64, origin_y: f64, dx: f64, dy: f64)->Self {
        GridGeometry { origin_x, origin_y, dx, dy }
    }

    /// map position of the center of pixel (col,row)
    #[inline]
    pub fn to_map (&self, col: usize, row: usize)->(f64,f64) {
        ( self.origin_x + col as f64 * self.dx, self.origin_y + row as f64 * self.dy )
    }

    /// continuous pixel coordinates of map position (0.0 at the center of pixel (0,0))
    #[inline]
    pub fn to_pixel (&self, x: f64, y: f64)->(f64,f64) {
        ( (x - self.origin_x) / self.dx, (y - self.origin_y) / self.dy )
    }

    /// nearest pixel of map position, None if outside a width x height raster
    pub fn pixel_of (&self, x: f64, y: f64, width: usize, height: usize)->Option<(usize,usize)> {
        let (u,v) = self.to_pixel( x, y);
        let col = u.round();
        let row = v.round();

        if col < 0.0 || row < 0.0 || col >= width as f64 || row >= height as f64 {
            None
        } else {
            Some( (col as usize, row as usize) )
        }
    }

    /// map bounds of a width x height raster (pixel edges, not centers)
    pub fn bounds (&self, width: usize, height: usize)->BoundingBox<f64> {
        let x1 = self.origin_x - self.dx*0.5;
        let x2 = self.origin_x + (width as f64 - 0.5) * self.dx;
        let y1 = self.origin_y - self.dy*0.5;
        let y2 = self.origin_y + (height as f64 - 0.5) * self.dy;

        BoundingBox::new( x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
    }
}

/// a raster band tied to map coordinates through a GridGeometry
#[derive(Debug,Clone)]
pub struct GeoRaster<T> {
    pub raster: Raster<T>,
    pub geometry: GridGeometry,
    pub no_data: Option<f64>,
}

impl<T> GeoRaster<T> where T: RasterPixel {
    pub fn new (raster: Raster<T>, geometry: GridGeometry)->Self {
        GeoRaster { raster, geometry, no_data: None }
    }

    pub fn with_no_data (raster: Raster<T>, geometry: GridGeometry, no_data: f64)->Self {
        GeoRaster { raster, geometry, no_data: Some(no_data) }
    }

    pub fn bounds (&self)->BoundingBox<f64> {
        self.geometry.bounds( self.raster.width(), self.raster.height())
    }

    #[inline]
    fn is_no_data (&self, v: f64)->bool {
        match self.no_data {
            Some(nd) => v == nd,
            None => false
        }
    }

    /// nearest neighbor sample at map position, None outside or on no-data
    pub fn value_at_map (&self, x: f64, y: f64)->Option<f64> {
        let (col,row) = self.geometry.pixel_of( x, y, self.raster.width(), self.raster.height())?;
        let v: f64 = self.raster.get( col, row).into();
        if self.is_no_data(v) { None } else { Some(v) }
    }

    /// bilinear sample at map position. None if any of the 4 surrounding pixels is outside
    /// the raster or no-data
    pub fn bilinear_at_map (&self, x: f64, y: f64)->Option<f64> {
        let (u,v) = self.geometry.to_pixel( x, y);
        if u < 0.0 || v < 0.0 { return None }

        let c0 = u.floor() as usize;
        let r0 = v.floor() as usize;
        let c1 = c0 + 1;
        let r1 = r0 + 1;
        if c1 >= self.raster.width() || r1 >= self.raster.height() {
            // exactly on the last col/row still works through the degenerate weights
            if u == (self.raster.width()-1) as f64 && v <= (self.raster.height()-1) as f64 ||
               v == (self.raster.height()-1) as f64 && u <= (self.raster.width()-1) as f64 {
                return self.value_at_map( x, y)
            }
            return None
        }

        let fu = u - c0 as f64;
        let fv = v - r0 as f64;

        let v00: f64 = self.raster.get(c0,r0).into();
        let v10: f64 = self.raster.get(c1,r0).into();
        let v01: f64 = self.raster.get(c0,r1).into();
        let v11: f64 = self.raster.get(c1,r1).into();

        if self.is_no_data(v00) || self.is_no_data(v10) || self.is_no_data(v01) || self.is_no_data(v11) {
            return None
        }

        let top = v00 * (1.0-fu) + v10 * fu;
        let bottom = v01 * (1.0-fu) + v11 * fu;
        Some( top * (1.0-fv) + bottom * fv )
    }
}
