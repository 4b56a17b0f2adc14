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

/// elevation access for the toolkit - DTED and SRTM hgt cell decoding plus a lazily
/// populated cell repository that routes geodetic queries to the covering cell

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path,PathBuf};

use serde::{Serialize,Deserialize};
use tracing::{debug,warn};

use raven_common::geo::{GeoPoint,GeoRect};
use raven_common::angle::{Latitude,Longitude};

pub mod errors;
pub use errors::{Result,RavenDemError};

pub mod dted;
pub mod hgt;

/// internal void marker of ElevGrid post storage
pub const VOID: i16 = i16::MIN;

/// something we can ask for terrain height at a geodetic position.
/// `Ok(None)` means covered but void (no-data); queries outside a single cell are an error,
/// the repository maps them to `Ok(None)`
pub trait ElevationSource {
    fn height_above_msl (&self, p: &GeoPoint)->Result<Option<f64>>;
    fn bounds (&self)->GeoRect;
}

/* #region ElevGrid **************************************************************************************************/

/// a south-west anchored geodetic post grid with bilinear interpolation between posts
pub struct ElevGrid {
    pub sw_lon: f64,   // position of the south west post (degrees)
    pub sw_lat: f64,
    pub dlon: f64,     // post spacing (degrees, positive)
    pub dlat: f64,
    pub n_lon: usize,  // posts per direction
    pub n_lat: usize,

    data: Vec<i16>,    // post heights in meters, [lat_idx * n_lon + lon_idx], lat_idx from south
}

impl ElevGrid {

    pub fn new (sw_lon: f64, sw_lat: f64, dlon: f64, dlat: f64, n_lon: usize, n_lat: usize)->Self {
        let data = vec![ VOID; n_lon * n_lat ];
        ElevGrid { sw_lon, sw_lat, dlon, dlat, n_lon, n_lat, data }
    }

    #[inline]
    pub fn set_post (&mut self, lon_idx: usize, lat_idx: usize, v: i16) {
        self.data[ lat_idx * self.n_lon + lon_idx ] = v;
    }

    /// post height, None for voids
    #[inline]
    pub fn post (&self, lon_idx: usize, lat_idx: usize)->Option<f64> {
        let v = self.data[ lat_idx * self.n_lon + lon_idx ];
        if v == VOID { None } else { Some( v as f64) }
    }

    pub fn n_posts (&self)->usize { self.data.len() }

    pub fn n_voids (&self)->usize {
        self.data.iter().filter( |&&v| v == VOID).count()
    }

    fn interpolate (&self, lon: f64, lat: f64)->Result<Option<f64>> {
        let u = (lon - self.sw_lon) / self.dlon;
        let v = (lat - self.sw_lat) / self.dlat;

        let max_u = (self.n_lon - 1) as f64;
        let max_v = (self.n_lat - 1) as f64;

        if u < 0.0 || v < 0.0 || u > max_u || v > max_v {
            return Err( RavenDemError::OutsideCoverage( format!("({},{})", lon, lat)))
        }

        // clamp so that a query exactly on the east/north post row still has a valid quad
        let c0 = (u.floor() as usize).min( self.n_lon - 2);
        let r0 = (v.floor() as usize).min( self.n_lat - 2);
        let fu = u - c0 as f64;
        let fv = v - r0 as f64;

        let (v00,v10,v01,v11) = match ( self.post(c0,r0), self.post(c0+1,r0), self.post(c0,r0+1), self.post(c0+1,r0+1)) {
            (Some(a),Some(b),Some(c),Some(d)) => (a,b,c,d),
            _ => return Ok(None) // a void corner poisons the whole quad
        };

        let south = v00 * (1.0-fu) + v10 * fu;
        let north = v01 * (1.0-fu) + v11 * fu;
        Ok( Some( south * (1.0-fv) + north * fv ))
    }
}

impl ElevationSource for ElevGrid {
    fn height_above_msl (&self, p: &GeoPoint)->Result<Option<f64>> {
        self.interpolate( p.longitude_degrees(), p.latitude_degrees())
    }

    fn bounds (&self)->GeoRect {
        GeoRect::from_wsen_degrees( &[
            self.sw_lon,
            self.sw_lat,
            self.sw_lon + (self.n_lon - 1) as f64 * self.dlon,
            self.sw_lat + (self.n_lat - 1) as f64 * self.dlat
        ])
    }
}

/* #endregion ElevGrid */

/* #region ElevationRepository ***************************************************************************************/

/// RON loadable repository configuration
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ElevRepoConfig {
    pub dir: PathBuf,
}

/// a directory of 1x1 degree elevation cells, lazily opened and cached by SW corner.
/// Cell files are either SRTM tiles ("N37W122.hgt") or DTED cells ("n37w122.dt0/1/2")
pub struct ElevationRepository {
    dir: PathBuf,
    cells: RefCell<HashMap<(i32,i32), Option<Box<ElevGrid>>>>, // None records a miss
}

impl ElevationRepository {

    pub fn new (dir: impl AsRef<Path>)->Self {
        ElevationRepository { dir: dir.as_ref().to_path_buf(), cells: RefCell::new( HashMap::new()) }
    }

    pub fn from_config (config: &ElevRepoConfig)->Self {
        Self::new( &config.dir)
    }

    pub fn load_config (dir: impl AsRef<Path>, name: &str)->Result<Self> {
        let config: ElevRepoConfig = raven_common::config::load_config( dir, name)?;
        Ok( Self::from_config( &config) )
    }

    pub fn n_cached_cells (&self)->usize {
        self.cells.borrow().values().filter( |c| c.is_some()).count()
    }

    fn cell_key (lon: f64, lat: f64)->(i32,i32) {
        (lon.floor() as i32, lat.floor() as i32)
    }

    fn open_cell (&self, key: (i32,i32))->Option<Box<ElevGrid>> {
        let (lon,lat) = key;

        let hgt_name = hgt::tile_name( lon, lat);
        let candidates = [
            format!("{}.hgt", hgt_name),
            format!("{}.dt2", hgt_name.to_lowercase()),
            format!("{}.dt1", hgt_name.to_lowercase()),
            format!("{}.dt0", hgt_name.to_lowercase()),
        ];

        for name in candidates {
            let path = self.dir.join( &name);
            if path.is_file() {
                let res = if name.ends_with(".hgt") { hgt::read_hgt( &path) } else { dted::read_dted( &path) };
                match res {
                    Ok(grid) => {
                        debug!("opened elevation cell {:?} ({} posts, {} voids)", path, grid.n_posts(), grid.n_voids());
                        return Some( Box::new( grid))
                    }
                    Err(e) => {
                        warn!("failed to open elevation cell {:?}: {}", path, e);
                        return None
                    }
                }
            }
        }
        None
    }

    fn with_cell<F,R> (&self, p: &GeoPoint, f: F)->Option<R> where F: FnOnce(&ElevGrid)->R {
        let key = Self::cell_key( p.longitude_degrees(), p.latitude_degrees());

        let mut cells = self.cells.borrow_mut();
        let entry = cells.entry( key).or_insert_with( || self.open_cell( key));
        entry.as_ref().map( |grid| f( grid))
    }

    /// batch height query mirroring the single-point API. Voids and uncovered positions are
    /// substituted with `sub_no_data` (or NaN if none is given)
    pub fn get_heights (&self, pts: &[(f64,f64)], sub_no_data: Option<f64>)->Result<Vec<f64>> {
        let substitute = sub_no_data.unwrap_or( f64::NAN);
        let mut heights = Vec::with_capacity( pts.len());

        for &(lon,lat) in pts {
            let p = GeoPoint::from_lon_lat_degrees( lon, lat);
            let h = self.height_above_msl( &p)?;
            heights.push( h.unwrap_or( substitute));
        }
        Ok(heights)
    }
}

impl ElevationSource for ElevationRepository {
    fn height_above_msl (&self, p: &GeoPoint)->Result<Option<f64>> {
        match self.with_cell( p, |grid| grid.interpolate( p.longitude_degrees(), p.latitude_degrees())) {
            Some(res) => res,
            None => Ok(None) // no cell for this position
        }
    }

    fn bounds (&self)->GeoRect {
        GeoRect::from_wsen_degrees( &[-180.0, -90.0, 180.0, 90.0])
    }
}

/* #endregion ElevationRepository */
