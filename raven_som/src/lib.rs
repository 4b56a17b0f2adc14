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

/// self-organizing map classification of multispectral pixel vectors.
/// Training follows Kohonen's batch-free online form: per-sample best matching unit search
/// and a gaussian neighborhood update with exponentially decaying learning rate and radius

use ndarray::{Array3,ArrayView1,s};
use rand::{rngs::StdRng, Rng, SeedableRng, seq::SliceRandom};
use serde::{Serialize,Deserialize};
use tracing::debug;

use raven_image::{Raster, check_band_dimensions};

pub mod errors;
pub use errors::{Result,RavenSomError};

/// training schedule - RON loadable
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SomParams {
    pub epochs: usize,
    pub alpha0: f64,      // initial learning rate
    pub alpha_end: f64,
    pub radius0: f64,     // initial neighborhood radius in grid units
    pub radius_end: f64,
}

impl SomParams {
    pub fn new (epochs: usize)->Self {
        SomParams { epochs, alpha0: 0.5, alpha_end: 0.01, radius0: 3.0, radius_end: 0.5 }
    }
}

/// a cols x rows neuron grid, each neuron a dim-length weight vector
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(try_from = "SomRecord", into = "SomRecord")]
pub struct Som {
    cols: usize,
    rows: usize,
    dim: usize,
    weights: Array3<f64>, // indexed [row, col, feature]
}

impl Som {

    pub fn new (cols: usize, rows: usize, dim: usize)->Self {
        Som { cols, rows, dim, weights: Array3::zeros( (rows, cols, dim)) }
    }

    /// init weights uniformly within the per-feature value ranges of the training samples
    pub fn randomized (cols: usize, rows: usize, dim: usize, samples: &[Vec<f64>], seed: u64)->Result<Self> {
        check_samples( samples, dim)?;

        let mut lo = vec![ f64::MAX; dim];
        let mut hi = vec![ f64::MIN; dim];
        for s in samples {
            for k in 0..dim {
                if s[k] < lo[k] { lo[k] = s[k] }
                if s[k] > hi[k] { hi[k] = s[k] }
            }
        }

        let mut rng = StdRng::seed_from_u64( seed);
        let mut som = Som::new( cols, rows, dim);
        for r in 0..rows {
            for c in 0..cols {
                for k in 0..dim {
                    let v = if hi[k] > lo[k] { rng.random_range( lo[k]..hi[k]) } else { lo[k] };
                    som.weights[[r,c,k]] = v;
                }
            }
        }
        Ok(som)
    }

    pub fn cols (&self)->usize { self.cols }
    pub fn rows (&self)->usize { self.rows }
    pub fn dim (&self)->usize { self.dim }
    pub fn n_neurons (&self)->usize { self.cols * self.rows }

    pub fn neuron (&self, col: usize, row: usize)->ArrayView1<'_,f64> {
        self.weights.slice( s![row, col, ..])
    }

    #[inline]
    fn dist2 (&self, col: usize, row: usize, sample: &[f64])->f64 {
        let mut d2 = 0.0;
        for k in 0..self.dim {
            let d = self.weights[[row,col,k]] - sample[k];
            d2 += d*d;
        }
        d2
    }

    /// grid position (col,row) of the neuron closest to the sample in feature space
    pub fn best_matching_unit (&self, sample: &[f64])->(usize,usize) {
        let mut best = (0,0);
        let mut best_d2 = f64::MAX;

        for r in 0..self.rows {
            for c in 0..self.cols {
                let d2 = self.dist2( c, r, sample);
                if d2 < best_d2 {
                    best_d2 = d2;
                    best = (c,r);
                }
            }
        }
        best
    }

    pub fn train (&mut self, samples: &[Vec<f64>], params: &SomParams, seed: u64)->Result<()> {
        check_samples( samples, self.dim)?;
        if params.epochs == 0 || params.alpha0 <= 0.0 || params.radius0 <= 0.0 {
            return Err( RavenSomError::IllegalArgument( format!("invalid SOM schedule {:?}", params)))
        }

        let mut rng = StdRng::seed_from_u64( seed);
        let mut order: Vec<usize> = (0..samples.len()).collect();

        let n_epochs = params.epochs as f64;

        for epoch in 0..params.epochs {
            let t = epoch as f64 / n_epochs;

            // exponential interpolation between start and end values
            let alpha = params.alpha0 * (params.alpha_end / params.alpha0).powf( t);
            let radius = params.radius0 * (params.radius_end / params.radius0).powf( t);
            let two_sigma2 = 2.0 * radius * radius;

            debug!("epoch {}: alpha={:.4} radius={:.2}", epoch, alpha, radius);

            order.shuffle( &mut rng);
            for &i in order.iter() {
                let sample = &samples[i];
                let (bc,br) = self.best_matching_unit( sample);

                for r in 0..self.rows {
                    for c in 0..self.cols {
                        let dc = c as f64 - bc as f64;
                        let dr = r as f64 - br as f64;
                        let d2 = dc*dc + dr*dr;

                        let h = (-d2 / two_sigma2).exp();
                        if h < 1e-6 { continue } // outside the effective neighborhood

                        let ah = alpha * h;
                        for k in 0..self.dim {
                            let w = self.weights[[r,c,k]];
                            self.weights[[r,c,k]] = w + ah * (sample[k] - w);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// mean distance between samples and their best matching units
    pub fn quantization_error (&self, samples: &[Vec<f64>])->Result<f64> {
        check_samples( samples, self.dim)?;

        let mut sum = 0.0;
        for sample in samples {
            let (c,r) = self.best_matching_unit( sample);
            sum += self.dist2( c, r, sample).sqrt();
        }
        Ok( sum / samples.len() as f64 )
    }

    /// map each pixel's spectral vector to the linear index (row*cols + col) of its BMU
    pub fn classify (&self, bands: &[Raster<f64>])->Result<Raster<u16>> {
        let (w,h) = check_band_dimensions( bands)?;
        if bands.len() != self.dim {
            return Err( RavenSomError::InvalidDimensions( format!("expected {} bands, got {}", self.dim, bands.len())))
        }
        if self.n_neurons() > u16::MAX as usize + 1 {
            return Err( RavenSomError::IllegalArgument( format!("{} neurons exceed u16 label range", self.n_neurons())))
        }

        let mut labels: Raster<u16> = Raster::new( w, h);
        let mut sample = vec![ 0.0; self.dim];

        for y in 0..h {
            for x in 0..w {
                for (k,band) in bands.iter().enumerate() {
                    sample[k] = band.get( x, y);
                }
                let (c,r) = self.best_matching_unit( &sample);
                labels.set( x, y, (r * self.cols + c) as u16);
            }
        }
        Ok(labels)
    }
}

fn check_samples (samples: &[Vec<f64>], dim: usize)->Result<()> {
    if samples.is_empty() {
        return Err( RavenSomError::InsufficientData("no training samples".into()))
    }
    for (i,s) in samples.iter().enumerate() {
        if s.len() != dim {
            return Err( RavenSomError::InvalidDimensions( format!("sample {} has {} features, expected {}", i, s.len(), dim)))
        }
    }
    Ok(())
}

//--- serde support (Array3 is flattened into a plain Vec)

#[derive(Serialize,Deserialize)]
struct SomRecord {
    cols: usize,
    rows: usize,
    dim: usize,
    weights: Vec<f64>,
}

impl From<Som> for SomRecord {
    fn from (som: Som)->Self {
        let weights = som.weights.iter().cloned().collect();
        SomRecord { cols: som.cols, rows: som.rows, dim: som.dim, weights }
    }
}

impl TryFrom<SomRecord> for Som {
    type Error = String;

    fn try_from (rec: SomRecord)->std::result::Result<Self,String> {
        let weights = Array3::from_shape_vec( (rec.rows, rec.cols, rec.dim), rec.weights)
            .map_err( |e| format!("SOM weight shape mismatch: {}", e))?;
        Ok( Som { cols: rec.cols, rows: rec.rows, dim: rec.dim, weights } )
    }
}
