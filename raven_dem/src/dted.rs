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

/// DTED cell decoding (MIL-PRF-89020). We interpret the UHL header and the elevation data
/// records; the DSI and ACC blocks are skipped as opaque fixed-size spans.
/// Elevations are big-endian SIGNED MAGNITUDE 16 bit values, stored south to north per
/// longitude line, lines running west to east

use std::path::Path;

use raven_common::fs::filepath_contents;

use crate::{ElevGrid, VOID};
use crate::errors::{Result, RavenDemError, invalid_format};

const UHL_SIZE: usize = 80;
const DSI_SIZE: usize = 648;
const ACC_SIZE: usize = 2700;
const DATA_START: usize = UHL_SIZE + DSI_SIZE + ACC_SIZE;

const RECORD_SENTINEL: u8 = 0xAA;
const RECORD_OVERHEAD: usize = 12; // 8 byte header + 4 byte checksum

/// the DTED null elevation after signed magnitude conversion
const DTED_NULL: i16 = -32767;

/// the interpreted UHL fields
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct UhlHeader {
    pub lon_origin: f64,     // SW corner (degrees)
    pub lat_origin: f64,
    pub lon_interval: f64,   // post spacing (degrees)
    pub lat_interval: f64,
    pub n_lon_lines: usize,
    pub n_lat_points: usize,
}

pub fn read_dted (path: impl AsRef<Path>)->Result<ElevGrid> {
    let path = path.as_ref();
    let buf = filepath_contents( &path)?;
    parse_dted( &buf).map_err( |e| invalid_format( format!("{:?}: {}", path, e)))
}

pub fn parse_dted (buf: &[u8])->Result<ElevGrid> {
    let uhl = parse_uhl( buf)?;

    let n_lon = uhl.n_lon_lines;
    let n_lat = uhl.n_lat_points;
    let record_len = RECORD_OVERHEAD + 2*n_lat;

    if buf.len() < DATA_START + n_lon * record_len {
        return Err( invalid_format( format!("truncated DTED data ({} bytes, need {})", buf.len(), DATA_START + n_lon*record_len)))
    }

    let mut grid = ElevGrid::new( uhl.lon_origin, uhl.lat_origin, uhl.lon_interval, uhl.lat_interval, n_lon, n_lat);

    for line in 0..n_lon {
        let rec = &buf[ DATA_START + line*record_len .. DATA_START + (line+1)*record_len ];
        parse_data_record( rec, line, n_lat, &mut grid)?;
    }

    Ok(grid)
}

pub fn parse_uhl (buf: &[u8])->Result<UhlHeader> {
    if buf.len() < UHL_SIZE {
        return Err( invalid_format( format!("no UHL header ({} bytes)", buf.len())))
    }
    if &buf[0..4] != b"UHL1" {
        return Err( invalid_format( "missing UHL1 sentinel"))
    }

    let lon_origin = parse_angle_field( buf, 4)?;
    let lat_origin = parse_angle_field( buf, 12)?;

    // intervals are in tenths of arc seconds
    let lon_interval = parse_num_field( buf, 20, 4)? as f64 / 36000.0;
    let lat_interval = parse_num_field( buf, 24, 4)? as f64 / 36000.0;

    let n_lon_lines = parse_num_field( buf, 47, 4)? as usize;
    let n_lat_points = parse_num_field( buf, 51, 4)? as usize;

    if n_lon_lines < 2 || n_lat_points < 2 || lon_interval <= 0.0 || lat_interval <= 0.0 {
        return Err( invalid_format( format!("implausible UHL geometry: {}x{} posts at ({},{}) deg",
            n_lon_lines, n_lat_points, lon_interval, lat_interval)))
    }

    Ok( UhlHeader { lon_origin, lat_origin, lon_interval, lat_interval, n_lon_lines, n_lat_points } )
}

/// "DDDMMSSH" - degrees/minutes/seconds plus hemisphere
fn parse_angle_field (buf: &[u8], i0: usize)->Result<f64> {
    let deg = parse_num_field( buf, i0, 3)? as f64;
    let min = parse_num_field( buf, i0+3, 2)? as f64;
    let sec = parse_num_field( buf, i0+5, 2)? as f64;

    let v = deg + min/60.0 + sec/3600.0;
    match buf[i0+7] {
        b'E' | b'N' => Ok(v),
        b'W' | b'S' => Ok(-v),
        h => Err( invalid_format( format!("invalid hemisphere char '{}'", h as char)))
    }
}

fn parse_num_field (buf: &[u8], i0: usize, len: usize)->Result<u32> {
    let mut n: u32 = 0;
    for i in i0..i0+len {
        let b = buf[i];
        if b.is_ascii_digit() {
            n = n * 10 + (b - b'0') as u32;
        } else {
            return Err( invalid_format( format!("non-digit '{}' in numeric field at offset {}", b as char, i)))
        }
    }
    Ok(n)
}

fn parse_data_record (rec: &[u8], line: usize, n_lat: usize, grid: &mut ElevGrid)->Result<()> {
    if rec[0] != RECORD_SENTINEL {
        return Err( invalid_format( format!("data record {} has no 0xAA sentinel", line)))
    }

    let lon_count = ((rec[4] as usize) << 8) | rec[5] as usize;
    if lon_count != line {
        return Err( invalid_format( format!("data record {} carries longitude count {}", line, lon_count)))
    }

    // checksum covers everything except its own 4 trailing bytes
    let stored = u32::from_be_bytes( [rec[rec.len()-4], rec[rec.len()-3], rec[rec.len()-2], rec[rec.len()-1]]);
    let computed: u32 = rec[..rec.len()-4].iter().map( |&b| b as u32).sum();
    if stored != computed {
        return Err( RavenDemError::ChecksumError( format!("record {}: stored {:#x}, computed {:#x}", line, stored, computed)))
    }

    for i in 0..n_lat {
        let j = 8 + 2*i;
        let raw = ((rec[j] as u16) << 8) | rec[j+1] as u16;
        let h = from_signed_magnitude( raw);

        // posts run south to north within the record
        grid.set_post( line, i, if h == DTED_NULL { VOID } else { h });
    }
    Ok(())
}

#[inline]
pub fn from_signed_magnitude (raw: u16)->i16 {
    if raw & 0x8000 != 0 {
        -((raw & 0x7FFF) as i16)
    } else {
        raw as i16
    }
}

#[inline]
pub fn to_signed_magnitude (v: i16)->u16 {
    if v < 0 {
        0x8000 | (-v as u16)
    } else {
        v as u16
    }
}
