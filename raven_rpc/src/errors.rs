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

pub type Result<T> = std::result::Result<T, RavenRpcError>;

define_error!{ pub RavenRpcError =
    KwlError( #[from] raven_common::kwl::RavenKwlError ) : "keyword list error: {0}",
    DemError( #[from] raven_dem::RavenDemError ) : "elevation error: {0}",
    DegenerateModel(String) : "degenerate model: {0}",
    NotConverged(String) : "iteration did not converge: {0}",
    NoElevation(String) : "no elevation coverage: {0}",
    MissingKey(String) : "missing keyword: {0}"
}
