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

/// fusion operators that combine several rasters into one: pan-sharpening of multispectral
/// bands with a co-registered panchromatic band, and mosaicking of georeferenced tiles

pub mod errors;
pub use errors::{Result,RavenFusionError};

mod pansharpen;
pub use pansharpen::{box_smooth, rcs_pansharpen, lmvm_pansharpen};

mod mosaic;
pub use mosaic::{Mosaic, MosaicMode};
