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

use raven_common::define_error;

pub type Result<T> = std::result::Result<T, RavenSomError>;

define_error!{ pub RavenSomError =
    ImageError( #[from] raven_image::RavenImageError ) : "image error: {0}",
    InvalidDimensions(String) : "invalid dimension error: {0}",
    InsufficientData(String) : "insufficient data: {0}",
    IllegalArgument(String) : "illegal argument: {0}"
}
