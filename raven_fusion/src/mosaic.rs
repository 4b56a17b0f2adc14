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

/// mosaicking of georeferenced tiles into one output grid. All inputs have to share the map
/// coordinate system and the axis orientation (dx > 0, dy < 0); pixel sizes may differ.
/// Inputs are sampled nearest neighbor - this composes tiles, it does not resample imagery

use tracing::debug;

use raven_common::BoundingBox;
use raven_image::{Raster, GeoRaster, GridGeometry};
use crate::errors::{Result,RavenFusionError};

#[derive(Debug,Clone,Copy,PartialEq)]
pub enum MosaicMode {
    First,    // first input that covers the pixel wins
    Last,     // last input wins
    Average,  // plain mean of all covering inputs
    Feather,  // mean weighted by distance to the contributing input's nearest edge
}

pub struct Mosaic {
    mode: MosaicMode,
    no_data: f64,
    inputs: Vec<GeoRaster<f64>>,
}

impl Mosaic {
    pub fn new (mode: MosaicMode, no_data: f64)->Self {
        Mosaic { mode, no_data, inputs: Vec::new() }
    }

    pub fn add (&mut self, input: GeoRaster<f64>)->&mut Self {
        self.inputs.push( input);
        self
    }

    pub fn n_inputs (&self)->usize { self.inputs.len() }

    fn check_inputs (&self)->Result<()> {
        if self.inputs.is_empty() {
            return Err( RavenFusionError::NoInputs("mosaic without inputs".into()))
        }
        for gr in self.inputs.iter() {
            if gr.geometry.dx <= 0.0 || gr.geometry.dy >= 0.0 {
                return Err( RavenFusionError::IllegalArgument(
                    format!("mosaic inputs have to be north-up (dx>0, dy<0), got ({},{})", gr.geometry.dx, gr.geometry.dy)))
            }
        }
        Ok(())
    }

    /// output extent is the hull of the input bounds. Resolution is the given (dx,dy) or the
    /// finest input resolution if none is given
    pub fn build (&self, resolution: Option<(f64,f64)>)->Result<GeoRaster<f64>> {
        self.check_inputs()?;

        let mut bounds = self.inputs[0].bounds();
        for gr in self.inputs.iter().skip(1) {
            bounds = bounds.hull( &gr.bounds());
        }

        let (dx,dy) = match resolution {
            Some((dx,dy)) => {
                if dx <= 0.0 || dy <= 0.0 {
                    return Err( RavenFusionError::IllegalArgument( format!("invalid mosaic resolution ({},{})", dx, dy)))
                }
                (dx,dy)
            }
            None => {
                let dx = self.inputs.iter().map( |gr| gr.geometry.dx).fold( f64::MAX, f64::min);
                let dy = self.inputs.iter().map( |gr| -gr.geometry.dy).fold( f64::MAX, f64::min);
                (dx,dy)
            }
        };

        let width = (((bounds.east - bounds.west) / dx).ceil() as usize).max(1);
        let height = (((bounds.north - bounds.south) / dy).ceil() as usize).max(1);
        let geometry = GridGeometry::new( bounds.west + dx*0.5, bounds.north - dy*0.5, dx, -dy);

        debug!("mosaicking {} inputs into {}x{} output", self.inputs.len(), width, height);

        let mut out = Raster::filled( width, height, self.no_data);

        for row in 0..height {
            for col in 0..width {
                let (x,y) = geometry.to_map( col, row);
                if let Some(v) = self.composite( x, y) {
                    out.set( col, row, v);
                }
            }
        }

        Ok( GeoRaster::with_no_data( out, geometry, self.no_data) )
    }

    fn composite (&self, x: f64, y: f64)->Option<f64> {
        match self.mode {
            MosaicMode::First => {
                self.inputs.iter().find_map( |gr| gr.value_at_map( x, y))
            }
            MosaicMode::Last => {
                self.inputs.iter().rev().find_map( |gr| gr.value_at_map( x, y))
            }
            MosaicMode::Average => {
                let mut sum = 0.0;
                let mut n = 0;
                for gr in self.inputs.iter() {
                    if let Some(v) = gr.value_at_map( x, y) {
                        sum += v;
                        n += 1;
                    }
                }
                if n > 0 { Some( sum / n as f64) } else { None }
            }
            MosaicMode::Feather => {
                let mut sum = 0.0;
                let mut sum_w = 0.0;
                let mut plain_sum = 0.0;
                let mut n = 0;

                for gr in self.inputs.iter() {
                    if let Some(v) = gr.value_at_map( x, y) {
                        let w = edge_distance( &gr.bounds(), x, y);
                        sum += v * w;
                        sum_w += w;
                        plain_sum += v;
                        n += 1;
                    }
                }

                if n == 0 { return None }
                if sum_w > 0.0 { Some( sum / sum_w) } else { Some( plain_sum / n as f64) } // on-edge pixels
            }
        }
    }
}

/// distance to the nearest bounds edge - the feather weight of a contributing input
#[inline]
fn edge_distance (bounds: &BoundingBox<f64>, x: f64, y: f64)->f64 {
    let d = (x - bounds.west).min( bounds.east - x).min( y - bounds.south).min( bounds.north - y);
    d.max( 0.0)
}
