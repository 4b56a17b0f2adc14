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

use std::fs::{self,File};
use std::io::{self, Read};
use std::path::{Path,PathBuf};

use crate::io_error;

type Result<T> = std::result::Result<T, std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then( |oss| oss.to_str())
}

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then( |oss| oss.to_str())
}

pub fn filestem<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_stem().and_then( |oss| oss.to_str())
}

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() { fs::create_dir_all(path)? }
    Ok(())
}

pub fn file_length<P: AsRef<Path>> (path: P) -> Option<u64> {
    path.as_ref().metadata().ok().map( |md| md.len())
}

pub fn filepath_contents_as_string<P: AsRef<Path>> (path: &P) -> Result<String> {
    let mut file = File::open( path.as_ref())?;
    let mut contents = String::new();
    file.read_to_string( &mut contents)?;
    Ok(contents)
}

pub fn filepath_contents<P: AsRef<Path>> (path: &P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let len = file_length(path).ok_or( io_error!( io::ErrorKind::NotFound, "file not found {:?}", path))?;
    let mut file = File::open(path)?;
    let mut contents: Vec<u8> = Vec::with_capacity(len as usize);
    file.read_to_end( &mut contents)?;
    Ok(contents)
}

pub fn existing_non_empty_file_from_path<P: AsRef<Path>> (path: P)-> Result<File> {
    let file = File::open( path.as_ref())?;
    if file.metadata()?.len() > 0 {
        Ok(file)
    } else {
        Err( io_error!( io::ErrorKind::Other, "file empty: {:?}", path.as_ref()))
    }
}
