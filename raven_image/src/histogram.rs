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

/// intensity histograms and the lookup-table remappers built from them
/// (equalization, percentile stretch, histogram matching)

use crate::{Raster,RasterPixel,Result,RavenImageError};

#[derive(Debug,Clone)]
pub struct Histogram {
    min: f64,
    max: f64,
    bins: Vec<u64>,
    total: u64,
}

impl Histogram {

    pub fn new (n_bins: usize, min: f64, max: f64)->Result<Self> {
        if n_bins == 0 || !(max > min) {
            return Err( RavenImageError::IllegalArgument( format!("invalid histogram spec: {} bins over [{},{}]", n_bins, min, max)))
        }
        Ok( Histogram { min, max, bins: vec![0; n_bins], total: 0 } )
    }

    pub fn from_raster<T> (raster: &Raster<T>, n_bins: usize, min: f64, max: f64)->Result<Self> where T: RasterPixel {
        let mut hist = Self::new( n_bins, min, max)?;
        for &v in raster.data() {
            hist.add( v.into());
        }
        Ok(hist)
    }

    /// histogram over the full value range of the raster
    pub fn from_raster_auto<T> (raster: &Raster<T>, n_bins: usize)->Result<Self> where T: RasterPixel {
        let stats = raster.stats();
        let min: f64 = stats.min.into();
        let mut max: f64 = stats.max.into();
        if max <= min { max = min + 1.0 } // degenerate (constant) input still gets a valid binning

        Self::from_raster( raster, n_bins, min, max)
    }

    /// values outside [min,max] clamp into the end bins, NaN is skipped
    pub fn add (&mut self, v: f64) {
        if v.is_nan() { return }
        let i = self.bin_index(v);
        self.bins[i] += 1;
        self.total += 1;
    }

    #[inline]
    pub fn bin_index (&self, v: f64)->usize {
        let n = self.bins.len();
        let f = (v - self.min) / (self.max - self.min);
        let i = (f * n as f64) as isize;
        i.clamp( 0, n as isize - 1) as usize
    }

    /// center value of bin i
    pub fn bin_value (&self, i: usize)->f64 {
        self.min + (i as f64 + 0.5) * self.bin_width()
    }

    pub fn bin_width (&self)->f64 { (self.max - self.min) / self.bins.len() as f64 }

    pub fn n_bins (&self)->usize { self.bins.len() }
    pub fn count (&self, i: usize)->u64 { self.bins[i] }
    pub fn total (&self)->u64 { self.total }
    pub fn min (&self)->f64 { self.min }
    pub fn max (&self)->f64 { self.max }

    /// normalized cumulative distribution - cdf[i] is the fraction of samples in bins 0..=i
    pub fn cdf (&self)->Vec<f64> {
        let mut cdf = Vec::with_capacity( self.bins.len());
        let mut cum: u64 = 0;
        let total = self.total.max(1) as f64;

        for &c in self.bins.iter() {
            cum += c;
            cdf.push( cum as f64 / total);
        }
        cdf
    }

    /// value below which fraction p (0..1) of the samples fall, linear within the bin
    pub fn percentile (&self, p: f64)->f64 {
        let p = p.clamp( 0.0, 1.0);
        let total = self.total.max(1) as f64;
        let target = p * total;

        let mut cum: u64 = 0;
        for (i,&c) in self.bins.iter().enumerate() {
            let next = cum + c;
            if next as f64 >= target {
                let within = if c > 0 { (target - cum as f64) / c as f64 } else { 0.0 };
                return self.min + (i as f64 + within) * self.bin_width()
            }
            cum = next;
        }
        self.max
    }
}

/* #region lookup table remapping ************************************************************************************/

/// a value remapping table over the histogram domain. Input values are binned like the source
/// histogram; lookups outside the domain clamp into the end bins
#[derive(Debug,Clone)]
pub struct Lut {
    min: f64,
    max: f64,
    values: Vec<f64>,
}

impl Lut {
    #[inline]
    pub fn lookup (&self, v: f64)->f64 {
        let n = self.values.len();
        let f = (v - self.min) / (self.max - self.min);
        let i = ((f * n as f64) as isize).clamp( 0, n as isize - 1) as usize;
        self.values[i]
    }

    pub fn apply (&self, raster: &Raster<f64>)->Raster<f64> {
        raster.map( |v| self.lookup(v))
    }

    pub fn values (&self)->&[f64] { &self.values }
}

/// CDF equalization onto [out_min,out_max]
pub fn equalization_lut (hist: &Histogram, out_min: f64, out_max: f64)->Lut {
    let cdf = hist.cdf();

    // fraction of samples below the first populated bin is remapped to out_min
    let cdf_min = cdf.iter().cloned().find( |&c| c > 0.0).unwrap_or(0.0);
    let denom = (1.0 - cdf_min).max( f64::MIN_POSITIVE);

    let values = cdf.iter().map( |&c| {
        let f = ((c - cdf_min) / denom).clamp( 0.0, 1.0);
        out_min + f * (out_max - out_min)
    }).collect();

    Lut { min: hist.min(), max: hist.max(), values }
}

/// linear stretch between the lo_pct and hi_pct percentiles (fractions 0..1), clamped
pub fn stretch_lut (hist: &Histogram, lo_pct: f64, hi_pct: f64, out_min: f64, out_max: f64)->Result<Lut> {
    if !(hi_pct > lo_pct) {
        return Err( RavenImageError::IllegalArgument( format!("invalid stretch percentiles [{},{}]", lo_pct, hi_pct)))
    }

    let lo = hist.percentile( lo_pct);
    let hi = hist.percentile( hi_pct);
    let denom = (hi - lo).max( f64::MIN_POSITIVE);

    let values = (0..hist.n_bins()).map( |i| {
        let f = ((hist.bin_value(i) - lo) / denom).clamp( 0.0, 1.0);
        out_min + f * (out_max - out_min)
    }).collect();

    Ok( Lut { min: hist.min(), max: hist.max(), values } )
}

/// histogram matching - remap source values so that their distribution follows `reference`
/// (CDF inversion: source value -> source cdf -> reference percentile)
pub fn matching_lut (src: &Histogram, reference: &Histogram)->Lut {
    let cdf = src.cdf();
    let values = cdf.iter().map( |&c| reference.percentile(c)).collect();

    Lut { min: src.min(), max: src.max(), values }
}

/* #endregion lookup table remapping */

/* #region u8 fast path **********************************************************************************************/

/// the fixed 256 entry equalization for byte rasters
pub fn equalize_u8 (raster: &Raster<u8>)->Raster<u8> {
    let mut hist = [0u32; 256];
    for &v in raster.data() {
        hist[v as usize] += 1;
    }

    let lut = compute_u8_lut( &hist, raster.len() as u32);
    raster.map( |v| lut[v as usize])
}

fn compute_u8_lut (histogram: &[u32;256], n_pixels: u32)-> [u8;256] {
    let n_pixels = n_pixels as f32;

    let mut cdf = [0u32; 256]; // the cumulative distribution function for this histogram
    cdf[0] = histogram[0];
    for i in 1..256 { cdf[i] = cdf[i - 1] + histogram[i]; }

    let mut i = 0;
    while i < 255 && cdf[i] == 0 { i += 1; }
    let cdf_min = cdf[i];

    let mut lut = [0u8; 256]; // the lookup table to produce
    for i in 0..256 {
        if cdf[i] > 0 {
            let denom = n_pixels - cdf_min as f32;
            if denom > 0.0 {
                lut[i] = (((cdf[i] - cdf_min) as f32 / denom) * 255.0).round() as u8;
            } else {
                lut[i] = i as u8; // constant image - identity
            }
        }
    }

    lut
}

/* #endregion u8 fast path */
