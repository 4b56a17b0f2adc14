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

/// SRTM ".hgt" tile decoding. A tile is a square grid of big-endian i16 posts over exactly
/// 1x1 degree (edge posts shared with the neighbor tiles), stored row major from the
/// NORTH WEST corner. The SW corner is encoded in the file name ("N37W122.hgt")

use std::path::Path;

use raven_common::fs::{filepath_contents,filestem};

use crate::{ElevGrid, VOID};
use crate::errors::{Result, RavenDemError, invalid_format};

pub const SRTM1_POSTS: usize = 3601; // 1 arc second
pub const SRTM3_POSTS: usize = 1201; // 3 arc seconds

/// the SRTM void marker
const HGT_VOID: i16 = -32768;

/// tile name for the 1x1 degree cell with the given SW corner, e.g. (-122,37) -> "N37W122"
pub fn tile_name (lon: i32, lat: i32)->String {
    let ns = if lat < 0 { 'S' } else { 'N' };
    let ew = if lon < 0 { 'W' } else { 'E' };
    format!("{}{:02}{}{:03}", ns, lat.abs(), ew, lon.abs())
}

/// SW corner (lon,lat) from a tile name like "N37W122"
pub fn parse_tile_name (name: &str)->Option<(i32,i32)> {
    let bs = name.as_bytes();
    if bs.len() != 7 { return None }

    let lat_sign = match bs[0] { b'N' => 1, b'S' => -1, _ => return None };
    let lon_sign = match bs[3] { b'E' => 1, b'W' => -1, _ => return None };

    let lat: i32 = name[1..3].parse().ok()?;
    let lon: i32 = name[4..7].parse().ok()?;

    if lat > 90 || lon > 180 { return None }
    Some( (lon * lon_sign, lat * lat_sign) )
}

pub fn read_hgt (path: impl AsRef<Path>)->Result<ElevGrid> {
    let path = path.as_ref();

    let (lon,lat) = filestem( &path)
        .and_then( |stem| parse_tile_name( stem))
        .ok_or_else( || invalid_format( format!("not an SRTM tile name: {:?}", path)))?;

    let buf = filepath_contents( &path)?;
    parse_hgt( &buf, lon as f64, lat as f64).map_err( |e| invalid_format( format!("{:?}: {}", path, e)))
}

pub fn parse_hgt (buf: &[u8], sw_lon: f64, sw_lat: f64)->Result<ElevGrid> {
    let n = match buf.len() {
        l if l == 2 * SRTM1_POSTS * SRTM1_POSTS => SRTM1_POSTS,
        l if l == 2 * SRTM3_POSTS * SRTM3_POSTS => SRTM3_POSTS,
        l => {
            // accept small square test grids as well, but reject anything non-square
            let posts = (l / 2) as f64;
            let side = posts.sqrt() as usize;
            if side >= 2 && 2*side*side == l { side } else {
                return Err( invalid_format( format!("not a square post grid ({} bytes)", l)))
            }
        }
    };

    let spacing = 1.0 / (n - 1) as f64;
    let mut grid = ElevGrid::new( sw_lon, sw_lat, spacing, spacing, n, n);

    for row in 0..n {
        let lat_idx = n - 1 - row; // rows run from the north
        for col in 0..n {
            let j = 2 * (row*n + col);
            let v = i16::from_be_bytes( [buf[j], buf[j+1]]);

            grid.set_post( col, lat_idx, if v == HGT_VOID { VOID } else { v });
        }
    }
    Ok(grid)
}
