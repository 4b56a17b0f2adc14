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

/// RON based configuration records. Config structs are ordinary serde types owned by the crate
/// that uses them; this module only provides uniform load/save with path-carrying errors

use std::path::{Path,PathBuf};

use lazy_static::lazy_static;
use ron::ser::PrettyConfig;
use serde::{Serialize, de::DeserializeOwned};

use crate::define_error;
use crate::fs::filepath_contents_as_string;

pub type Result<T> = std::result::Result<T, RavenConfigError>;

define_error!{ pub RavenConfigError =
    IOError( #[from] std::io::Error ) : "IO error: {0}",
    ConfigParseError(String) : "config parse error: {0}",
    ConfigWriteError(String) : "config write error: {0}"
}

lazy_static! {
    static ref CONFIG_RON: PrettyConfig = PrettyConfig::new().struct_names(true);
}

pub fn load_ron_config<T> (path: impl AsRef<Path>)->Result<T> where T: DeserializeOwned {
    let path = path.as_ref();
    let contents = filepath_contents_as_string( &path)?;
    ron::from_str( &contents).map_err( |e| {
        RavenConfigError::ConfigParseError( format!("{:?}: {}", path, e))
    })
}

/// resolve `<dir>/<name>.ron` and load it
pub fn load_config<T> (dir: impl AsRef<Path>, name: &str)->Result<T> where T: DeserializeOwned {
    load_ron_config( dir.as_ref().join( format!("{}.ron", name)))
}

pub fn save_ron_config<T> (config: &T, path: impl AsRef<Path>)->Result<()> where T: Serialize {
    let s = ron::ser::to_string_pretty( config, CONFIG_RON.clone())
        .map_err( |e| RavenConfigError::ConfigWriteError( e.to_string()))?;
    Ok( std::fs::write( path.as_ref(), s)? )
}
