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
#![allow(unused,uncommon_codepoints,non_snake_case)]

/// moment based shape and radiometry descriptors over raster regions.
/// Intensity is treated as a mass distribution over pixel center coordinates

use num::complex::Complex64;

use raven_image::{Raster,RasterPixel};

pub mod errors;
pub use errors::{Result,RavenMomentsError};

/* #region central moments *******************************************************************************************/

/// geometric central moments up to order 3
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct CentralMoments {
    pub m00: f64,    // total mass
    pub x_bar: f64,  // centroid
    pub y_bar: f64,

    pub mu11: f64,
    pub mu20: f64,
    pub mu02: f64,
    pub mu30: f64,
    pub mu21: f64,
    pub mu12: f64,
    pub mu03: f64,
}

/// central moments scale-normalized per eta_pq = mu_pq / mu00^((p+q)/2 + 1)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct NormalizedMoments {
    pub eta11: f64,
    pub eta20: f64,
    pub eta02: f64,
    pub eta30: f64,
    pub eta21: f64,
    pub eta12: f64,
    pub eta03: f64,
}

/// plain geometric moment m_pq = sum x^p y^q f(x,y)
pub fn raw_moment<T> (raster: &Raster<T>, p: u32, q: u32)->Result<f64> where T: RasterPixel {
    let (w,h) = raster.dimensions();
    if w == 0 || h == 0 {
        return Err( RavenMomentsError::EmptyRegion( format!("{}x{} raster", w, h)))
    }

    let mut m = 0.0;
    for y in 0..h {
        let yq = (y as f64).powi( q as i32);
        for x in 0..w {
            let f: f64 = raster.get(x,y).into();
            m += (x as f64).powi( p as i32) * yq * f;
        }
    }
    Ok(m)
}

pub fn central_moments<T> (raster: &Raster<T>)->Result<CentralMoments> where T: RasterPixel {
    let (w,h) = raster.dimensions();
    if w == 0 || h == 0 {
        return Err( RavenMomentsError::EmptyRegion( format!("{}x{} raster", w, h)))
    }

    //--- first pass: mass and centroid
    let mut m00 = 0.0;
    let mut m10 = 0.0;
    let mut m01 = 0.0;

    for y in 0..h {
        for x in 0..w {
            let f: f64 = raster.get(x,y).into();
            m00 += f;
            m10 += x as f64 * f;
            m01 += y as f64 * f;
        }
    }

    if m00 == 0.0 {
        return Err( RavenMomentsError::ZeroMass( format!("{}x{} raster", w, h)))
    }

    let x_bar = m10 / m00;
    let y_bar = m01 / m00;

    //--- second pass: the central moments
    let mut mu11 = 0.0;
    let mut mu20 = 0.0;
    let mut mu02 = 0.0;
    let mut mu30 = 0.0;
    let mut mu21 = 0.0;
    let mut mu12 = 0.0;
    let mut mu03 = 0.0;

    for y in 0..h {
        let dy = y as f64 - y_bar;
        let dy2 = dy*dy;
        for x in 0..w {
            let f: f64 = raster.get(x,y).into();
            let dx = x as f64 - x_bar;
            let dx2 = dx*dx;

            mu11 += dx*dy * f;
            mu20 += dx2 * f;
            mu02 += dy2 * f;
            mu30 += dx2*dx * f;
            mu21 += dx2*dy * f;
            mu12 += dx*dy2 * f;
            mu03 += dy2*dy * f;
        }
    }

    Ok( CentralMoments { m00, x_bar, y_bar, mu11, mu20, mu02, mu30, mu21, mu12, mu03 } )
}

impl CentralMoments {
    pub fn normalized (&self)->NormalizedMoments {
        let n2 = self.m00 * self.m00;            // mu00^((p+q)/2+1) for p+q == 2
        let n3 = n2 * self.m00.sqrt();           // and for p+q == 3

        NormalizedMoments {
            eta11: self.mu11 / n2,
            eta20: self.mu20 / n2,
            eta02: self.mu02 / n2,
            eta30: self.mu30 / n3,
            eta21: self.mu21 / n3,
            eta12: self.mu12 / n3,
            eta03: self.mu03 / n3,
        }
    }
}

/* #endregion central moments */

/* #region Hu invariants *********************************************************************************************/

/// Hu's 7 moment invariants - see
///    Hu, M. K. (1962). Visual pattern recognition by moment invariants.
///    IRE Transactions on Information Theory, 8(2), 179-187
pub fn hu_moments<T> (raster: &Raster<T>)->Result<[f64;7]> where T: RasterPixel {
    Ok( hu_from_normalized( &central_moments(raster)?.normalized()) )
}

pub fn hu_from_normalized (n: &NormalizedMoments)->[f64;7] {
    let NormalizedMoments { eta11, eta20, eta02, eta30, eta21, eta12, eta03 } = *n;

    let φ1 = eta20 + eta02;
    let φ2 = pow2(eta20 - eta02) + 4.0*pow2(eta11);
    let φ3 = pow2(eta30 - 3.0*eta12) + pow2(3.0*eta21 - eta03);
    let φ4 = pow2(eta30 + eta12) + pow2(eta21 + eta03);
    let φ5 = (eta30 - 3.0*eta12)*(eta30 + eta12)*( pow2(eta30 + eta12) - 3.0*pow2(eta21 + eta03))
           + (3.0*eta21 - eta03)*(eta21 + eta03)*( 3.0*pow2(eta30 + eta12) - pow2(eta21 + eta03));
    let φ6 = (eta20 - eta02)*( pow2(eta30 + eta12) - pow2(eta21 + eta03))
           + 4.0*eta11*(eta30 + eta12)*(eta21 + eta03);
    let φ7 = (3.0*eta21 - eta03)*(eta30 + eta12)*( pow2(eta30 + eta12) - 3.0*pow2(eta21 + eta03))
           - (eta30 - 3.0*eta12)*(eta21 + eta03)*( 3.0*pow2(eta30 + eta12) - pow2(eta21 + eta03));

    [φ1,φ2,φ3,φ4,φ5,φ6,φ7]
}

#[inline(always)]
fn pow2 (x: f64)->f64 { x*x }

/* #endregion Hu invariants */

/* #region complex moments and Flusser invariants ********************************************************************/

/// scale-normalized central complex moment
///    c_pq = 1/mu00^((p+q)/2+1) * sum (dx + i dy)^p (dx - i dy)^q f(x,y)
pub fn complex_moment<T> (raster: &Raster<T>, p: u32, q: u32)->Result<Complex64> where T: RasterPixel {
    let cm = central_moments(raster)?;
    Ok( complex_moment_about( raster, &cm, p, q) )
}

fn complex_moment_about<T> (raster: &Raster<T>, cm: &CentralMoments, p: u32, q: u32)->Complex64 where T: RasterPixel {
    let (w,h) = raster.dimensions();
    let mut c = Complex64::new( 0.0, 0.0);

    for y in 0..h {
        let dy = y as f64 - cm.y_bar;
        for x in 0..w {
            let f: f64 = raster.get(x,y).into();
            if f == 0.0 { continue }

            let dx = x as f64 - cm.x_bar;
            let z = Complex64::new( dx, dy);
            let zc = z.conj();

            c += z.powu(p) * zc.powu(q) * f;
        }
    }

    c / cm.m00.powf( (p+q) as f64 / 2.0 + 1.0)
}

/// Flusser's rotation invariants built from complex moments up to order 4 - see
///    Flusser, J. (2000). On the independence of rotation moment invariants.
///    Pattern Recognition, 33(9), 1405-1410
pub fn flusser_moments<T> (raster: &Raster<T>)->Result<[f64;11]> where T: RasterPixel {
    let cm = central_moments(raster)?;

    let c11 = complex_moment_about( raster, &cm, 1, 1);
    let c20 = complex_moment_about( raster, &cm, 2, 0);
    let c21 = complex_moment_about( raster, &cm, 2, 1);
    let c12 = complex_moment_about( raster, &cm, 1, 2);
    let c30 = complex_moment_about( raster, &cm, 3, 0);
    let c22 = complex_moment_about( raster, &cm, 2, 2);
    let c31 = complex_moment_about( raster, &cm, 3, 1);
    let c40 = complex_moment_about( raster, &cm, 4, 0);

    let c12_2 = c12 * c12;
    let c12_3 = c12_2 * c12;
    let c12_4 = c12_2 * c12_2;

    let ψ1 = c11.re;
    let ψ2 = (c21 * c12).re;
    let ψ3 = (c20 * c12_2).re;
    let ψ4 = (c20 * c12_2).im;
    let ψ5 = (c30 * c12_3).re;
    let ψ6 = (c30 * c12_3).im;
    let ψ7 = c22.re;
    let ψ8 = (c31 * c12_2).re;
    let ψ9 = (c31 * c12_2).im;
    let ψ10 = (c40 * c12_4).re;
    let ψ11 = (c40 * c12_4).im;

    Ok( [ψ1,ψ2,ψ3,ψ4,ψ5,ψ6,ψ7,ψ8,ψ9,ψ10,ψ11] )
}

/* #endregion complex moments and Flusser invariants */

/* #region radiometric moments ***************************************************************************************/

/// first 4 standardized moments of the region's intensity distribution
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct RadiometricMoments {
    pub mean: f64,
    pub variance: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

pub fn radiometric_moments<T> (raster: &Raster<T>)->Result<RadiometricMoments> where T: RasterPixel {
    let n = raster.len();
    if n == 0 {
        return Err( RavenMomentsError::EmptyRegion("0 pixels".into()))
    }
    let n = n as f64;

    let mut sum = 0.0;
    for &v in raster.data() {
        let f: f64 = v.into();
        sum += f;
    }
    let mean = sum / n;

    let mut m2 = 0.0;
    let mut m3 = 0.0;
    let mut m4 = 0.0;
    for &v in raster.data() {
        let d = Into::<f64>::into(v) - mean;
        let d2 = d*d;
        m2 += d2;
        m3 += d2*d;
        m4 += d2*d2;
    }
    m2 /= n;
    m3 /= n;
    m4 /= n;

    let (skewness, kurtosis) = if m2 > 0.0 {
        ( m3 / m2.powf(1.5), m4 / (m2*m2) )
    } else {
        ( 0.0, 0.0 ) // constant region
    };

    Ok( RadiometricMoments { mean, variance: m2, skewness, kurtosis } )
}

/* #endregion radiometric moments */
