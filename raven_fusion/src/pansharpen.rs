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

/// pan-sharpening of multispectral bands with a higher resolution panchromatic band.
/// Inputs have to be co-registered on the pan grid already - resampling is the caller's business

use tracing::debug;

use raven_image::{Raster, check_band_dimensions};
use crate::errors::{Result,RavenFusionError};

/// windowed mean with a (2*radius+1)^2 box kernel, window truncated at the raster edges.
/// Computed over a summed area table so the cost does not depend on the radius
pub fn box_smooth (raster: &Raster<f64>, radius: usize)->Raster<f64> {
    let (w,h) = raster.dimensions();
    let r = radius as isize;

    // summed area table with a zero top row / left column
    let sw = w + 1;
    let mut sat = vec![ 0.0f64; sw * (h+1) ];
    for y in 0..h {
        let mut row_sum = 0.0;
        for x in 0..w {
            row_sum += raster.get( x, y);
            sat[ (y+1)*sw + (x+1) ] = sat[ y*sw + (x+1) ] + row_sum;
        }
    }

    let mut out = Raster::new( w, h);
    for y in 0..h {
        let y0 = (y as isize - r).max(0) as usize;
        let y1 = ((y as isize + r) as usize).min( h-1);
        for x in 0..w {
            let x0 = (x as isize - r).max(0) as usize;
            let x1 = ((x as isize + r) as usize).min( w-1);

            let sum = sat[ (y1+1)*sw + (x1+1) ] - sat[ y0*sw + (x1+1) ]
                    - sat[ (y1+1)*sw + x0 ] + sat[ y0*sw + x0 ];
            let n = ((y1-y0+1) * (x1-x0+1)) as f64;

            out.set( x, y, sum / n);
        }
    }
    out
}

fn check_inputs (pan: &Raster<f64>, ms: &[Raster<f64>])->Result<()> {
    let ms_dims = check_band_dimensions( ms)?;
    if ms_dims != pan.dimensions() {
        return Err( RavenFusionError::InvalidDimensions(
            format!("multispectral bands are {}x{} but pan is {}x{}", ms_dims.0, ms_dims.1, pan.width(), pan.height())))
    }
    Ok(())
}

/// ratio component substitution: out = ms * pan / smooth(pan).
/// The low-pass of the pan band stands in for the spectral radiometry the pan shares with the
/// multispectral bands; the ratio reinjects the high spatial frequencies
pub fn rcs_pansharpen (pan: &Raster<f64>, ms: &[Raster<f64>], radius: usize)->Result<Vec<Raster<f64>>> {
    check_inputs( pan, ms)?;
    debug!("rcs pan-sharpening {} bands at {}x{}, radius {}", ms.len(), pan.width(), pan.height(), radius);

    let smooth = box_smooth( pan, radius);
    let (w,h) = pan.dimensions();

    let mut out = Vec::with_capacity( ms.len());
    for band in ms {
        let mut sharp = Raster::new( w, h);
        for y in 0..h {
            for x in 0..w {
                let s = smooth.get( x, y);
                let v = if s != 0.0 { band.get(x,y) * pan.get(x,y) / s } else { 0.0 };
                sharp.set( x, y, v);
            }
        }
        out.push( sharp);
    }
    Ok(out)
}

/// local mean and variance matching: out = (pan - mean_w(pan)) * sigma_w(ms)/sigma_w(pan) + mean_w(ms).
/// Falls back to the local multispectral mean where the pan window is flat
pub fn lmvm_pansharpen (pan: &Raster<f64>, ms: &[Raster<f64>], radius: usize)->Result<Vec<Raster<f64>>> {
    check_inputs( pan, ms)?;
    debug!("lmvm pan-sharpening {} bands at {}x{}, radius {}", ms.len(), pan.width(), pan.height(), radius);

    let (w,h) = pan.dimensions();

    let pan_mean = box_smooth( pan, radius);
    let pan_sq_mean = box_smooth( &pan.map( |v| v*v), radius);

    let mut out = Vec::with_capacity( ms.len());
    for band in ms {
        let ms_mean = box_smooth( band, radius);
        let ms_sq_mean = box_smooth( &band.map( |v| v*v), radius);

        let mut fused = Raster::new( w, h);
        for y in 0..h {
            for x in 0..w {
                let mp = pan_mean.get( x, y);
                let mm = ms_mean.get( x, y);

                let var_p = (pan_sq_mean.get(x,y) - mp*mp).max( 0.0); // guard numeric noise
                let var_m = (ms_sq_mean.get(x,y) - mm*mm).max( 0.0);

                let v = if var_p > 0.0 {
                    (pan.get(x,y) - mp) * (var_m/var_p).sqrt() + mm
                } else {
                    mm
                };
                fused.set( x, y, v);
            }
        }
        out.push( fused);
    }
    Ok(out)
}
