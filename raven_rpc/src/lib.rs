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
#![allow(unused,non_snake_case)]

/// rational polynomial coefficient (RPC00B) sensor model for satellite image geolocation.
/// Image coordinates are cubic rational polynomials of normalized ground coordinates:
///    line = line_scale * pn(P,L,H)/pd(P,L,H) + line_offset     (samp alike)
/// with P/L/H the offset/scale normalized latitude/longitude/height

use nalgebra::{Matrix2,Vector2};
use serde::{Serialize,Deserialize};

use raven_common::geo::{GeoPoint,GeoPoint3};
use raven_common::kwl::KeywordList;
use raven_dem::ElevationSource;

pub mod errors;
pub use errors::{Result,RavenRpcError};

const N_COEFFS: usize = 20;

const NEWTON_MAX_ITER: usize = 50;
const NEWTON_EPS: f64 = 1e-10;        // normalized ground units
const NEWTON_DELTA: f64 = 1e-6;       // partial derivative step

const ELEV_MAX_ITER: usize = 20;
const ELEV_EPS: f64 = 0.1;            // meters

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RpcModel {
    pub line_offset: f64,
    pub line_scale: f64,
    pub samp_offset: f64,
    pub samp_scale: f64,

    pub lat_offset: f64,
    pub lat_scale: f64,
    pub lon_offset: f64,
    pub lon_scale: f64,
    pub height_offset: f64,
    pub height_scale: f64,

    pub line_num_coeff: [f64; N_COEFFS],
    pub line_den_coeff: [f64; N_COEFFS],
    pub samp_num_coeff: [f64; N_COEFFS],
    pub samp_den_coeff: [f64; N_COEFFS],
}

/// the RPC00B polynomial term order
#[inline]
fn poly (c: &[f64; N_COEFFS], P: f64, L: f64, H: f64)->f64 {
    c[0]
    + c[1]*L     + c[2]*P     + c[3]*H
    + c[4]*L*P   + c[5]*L*H   + c[6]*P*H
    + c[7]*L*L   + c[8]*P*P   + c[9]*H*H
    + c[10]*P*L*H
    + c[11]*L*L*L + c[12]*L*P*P + c[13]*L*H*H
    + c[14]*L*L*P + c[15]*P*P*P + c[16]*P*H*H
    + c[17]*L*L*H + c[18]*P*P*H + c[19]*H*H*H
}

impl RpcModel {

    /// normalized image coordinates for normalized ground coordinates
    fn normalized_image (&self, P: f64, L: f64, H: f64)->Result<(f64,f64)> {
        let line_den = poly( &self.line_den_coeff, P, L, H);
        let samp_den = poly( &self.samp_den_coeff, P, L, H);

        if line_den.abs() < 1e-12 || samp_den.abs() < 1e-12 {
            return Err( RavenRpcError::DegenerateModel( format!("denominator vanishes at P={} L={} H={}", P, L, H)))
        }

        let l = poly( &self.line_num_coeff, P, L, H) / line_den;
        let s = poly( &self.samp_num_coeff, P, L, H) / samp_den;
        Ok( (l, s) )
    }

    /// ground position (with height above the ellipsoid) to image (line,samp)
    pub fn ground_to_image (&self, g: &GeoPoint3)->Result<(f64,f64)> {
        let P = (g.latitude_degrees() - self.lat_offset) / self.lat_scale;
        let L = (g.longitude_degrees() - self.lon_offset) / self.lon_scale;
        let H = (g.height_meters() - self.height_offset) / self.height_scale;

        let (l,s) = self.normalized_image( P, L, H)?;
        Ok( (l * self.line_scale + self.line_offset, s * self.samp_scale + self.samp_offset) )
    }

    /// image (line,samp) at a known height to the ground position - 2D Newton iteration
    /// on the normalized latitude/longitude with numeric partials
    pub fn image_to_ground (&self, line: f64, samp: f64, height: f64)->Result<GeoPoint> {
        let l_t = (line - self.line_offset) / self.line_scale;
        let s_t = (samp - self.samp_offset) / self.samp_scale;
        let H = (height - self.height_offset) / self.height_scale;

        let mut P = 0.0; // start at the offset point
        let mut L = 0.0;

        for _ in 0..NEWTON_MAX_ITER {
            let (l,s) = self.normalized_image( P, L, H)?;
            let fl = l - l_t;
            let fs = s - s_t;

            let (l_dP, s_dP) = self.normalized_image( P + NEWTON_DELTA, L, H)?;
            let (l_dL, s_dL) = self.normalized_image( P, L + NEWTON_DELTA, H)?;

            let jac = Matrix2::new(
                (l_dP - l) / NEWTON_DELTA, (l_dL - l) / NEWTON_DELTA,
                (s_dP - s) / NEWTON_DELTA, (s_dL - s) / NEWTON_DELTA
            );

            let delta = jac.lu().solve( &Vector2::new( -fl, -fs))
                .ok_or_else( || RavenRpcError::DegenerateModel( format!("singular jacobian at P={} L={}", P, L)))?;

            P += delta[0];
            L += delta[1];

            if delta.norm() < NEWTON_EPS {
                return Ok( GeoPoint::from_lon_lat_degrees(
                    L * self.lon_scale + self.lon_offset,
                    P * self.lat_scale + self.lat_offset
                ))
            }
        }

        Err( RavenRpcError::NotConverged( format!("image_to_ground({},{}) after {} iterations", line, samp, NEWTON_MAX_ITER)))
    }

    /// image to ground against terrain: alternate height lookup and reprojection until the
    /// surface height at the solution settles
    pub fn image_to_ground_at_elevation (&self, line: f64, samp: f64, elev: &dyn ElevationSource)->Result<GeoPoint3> {
        let mut h = self.height_offset;

        for _ in 0..ELEV_MAX_ITER {
            let p = self.image_to_ground( line, samp, h)?;

            let h_terrain = elev.height_above_msl( &p)?
                .ok_or_else( || RavenRpcError::NoElevation( format!("at {}", p)))?;

            if (h_terrain - h).abs() < ELEV_EPS {
                return Ok( GeoPoint3::from_lon_lat_degrees_height_meters( p.longitude_degrees(), p.latitude_degrees(), h_terrain))
            }
            h = h_terrain;
        }

        Err( RavenRpcError::NotConverged( format!("image_to_ground_at_elevation({},{}) after {} rounds", line, samp, ELEV_MAX_ITER)))
    }

    /* #region keyword list persistence *****************************************************************************/

    pub fn to_kwl (&self)->KeywordList {
        let mut kwl = KeywordList::new();
        kwl.add( "type", "RpcModel");

        kwl.add_f64( "line_off", self.line_offset);
        kwl.add_f64( "line_scale", self.line_scale);
        kwl.add_f64( "samp_off", self.samp_offset);
        kwl.add_f64( "samp_scale", self.samp_scale);
        kwl.add_f64( "lat_off", self.lat_offset);
        kwl.add_f64( "lat_scale", self.lat_scale);
        kwl.add_f64( "long_off", self.lon_offset);
        kwl.add_f64( "long_scale", self.lon_scale);
        kwl.add_f64( "height_off", self.height_offset);
        kwl.add_f64( "height_scale", self.height_scale);

        add_coeffs( &mut kwl, "line_num_coeff", &self.line_num_coeff);
        add_coeffs( &mut kwl, "line_den_coeff", &self.line_den_coeff);
        add_coeffs( &mut kwl, "samp_num_coeff", &self.samp_num_coeff);
        add_coeffs( &mut kwl, "samp_den_coeff", &self.samp_den_coeff);

        kwl
    }

    pub fn from_kwl (kwl: &KeywordList)->Result<RpcModel> {
        Ok( RpcModel {
            line_offset: kwl.require_f64( "line_off")?,
            line_scale: kwl.require_f64( "line_scale")?,
            samp_offset: kwl.require_f64( "samp_off")?,
            samp_scale: kwl.require_f64( "samp_scale")?,
            lat_offset: kwl.require_f64( "lat_off")?,
            lat_scale: kwl.require_f64( "lat_scale")?,
            lon_offset: kwl.require_f64( "long_off")?,
            lon_scale: kwl.require_f64( "long_scale")?,
            height_offset: kwl.require_f64( "height_off")?,
            height_scale: kwl.require_f64( "height_scale")?,

            line_num_coeff: get_coeffs( kwl, "line_num_coeff")?,
            line_den_coeff: get_coeffs( kwl, "line_den_coeff")?,
            samp_num_coeff: get_coeffs( kwl, "samp_num_coeff")?,
            samp_den_coeff: get_coeffs( kwl, "samp_den_coeff")?,
        })
    }

    /* #endregion keyword list persistence */
}

fn add_coeffs (kwl: &mut KeywordList, base: &str, coeffs: &[f64; N_COEFFS]) {
    for (i,&c) in coeffs.iter().enumerate() {
        kwl.add_f64( &format!("{}_{:02}", base, i), c);
    }
}

fn get_coeffs (kwl: &KeywordList, base: &str)->Result<[f64; N_COEFFS]> {
    let mut coeffs = [0.0; N_COEFFS];
    for i in 0..N_COEFFS {
        let key = format!("{}_{:02}", base, i);
        coeffs[i] = kwl.get_f64( &key)?.ok_or_else( || RavenRpcError::MissingKey( key))?;
    }
    Ok(coeffs)
}
