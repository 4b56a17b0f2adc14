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

/// keyword lists are the line oriented `key: value` format used to save and restore the state
/// of geometry objects (sensor models, projections). The format is kept deliberately dumb:
/// one pair per line, '//' comment lines, no sections, no quoting. Structure is expressed
/// through dotted key prefixes (e.g. "rpc.line_num_coeff_00")

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::define_error;

pub type Result<T> = std::result::Result<T, RavenKwlError>;

define_error!{ pub RavenKwlError =
    IOError( #[from] std::io::Error ) : "IO error: {0}",
    ParseError(String) : "keyword list parse error: {0}",
    ValueError(String) : "keyword value error: {0}"
}

const COMMENT: &str = "//";

/// an insertion ordered string key/value map
#[derive(Debug,Clone,PartialEq,Default)]
pub struct KeywordList {
    entries: Vec<(String,String)>,
}

impl KeywordList {
    pub fn new ()->Self {
        KeywordList { entries: Vec::new() }
    }

    pub fn len (&self)->usize { self.entries.len() }
    pub fn is_empty (&self)->bool { self.entries.is_empty() }

    /// add or replace. A replaced key keeps its original position
    pub fn add (&mut self, key: &str, value: impl ToString) {
        let value = value.to_string();
        if let Some(e) = self.entries.iter_mut().find( |(k,_)| k == key) {
            e.1 = value;
        } else {
            self.entries.push( (key.to_string(), value));
        }
    }

    pub fn add_f64 (&mut self, key: &str, v: f64) { self.add( key, format!("{:.17e}", v)) }
    pub fn add_i64 (&mut self, key: &str, v: i64) { self.add( key, v) }
    pub fn add_usize (&mut self, key: &str, v: usize) { self.add( key, v) }
    pub fn add_bool (&mut self, key: &str, v: bool) { self.add( key, v) }

    pub fn find (&self, key: &str)->Option<&str> {
        self.entries.iter().find( |(k,_)| k == key).map( |(_,v)| v.as_str())
    }

    pub fn remove (&mut self, key: &str)->Option<String> {
        if let Some(i) = self.entries.iter().position( |(k,_)| k == key) {
            Some( self.entries.remove(i).1 )
        } else {
            None
        }
    }

    fn get_parsed<T> (&self, key: &str)->Result<Option<T>> where T: FromStr {
        match self.find(key) {
            Some(v) => match v.parse::<T>() {
                Ok(x) => Ok( Some(x) ),
                Err(_) => Err( RavenKwlError::ValueError( format!("key '{}' has unparseable value '{}'", key, v)) )
            }
            None => Ok(None)
        }
    }

    pub fn get_f64 (&self, key: &str)->Result<Option<f64>> { self.get_parsed(key) }
    pub fn get_i64 (&self, key: &str)->Result<Option<i64>> { self.get_parsed(key) }
    pub fn get_usize (&self, key: &str)->Result<Option<usize>> { self.get_parsed(key) }
    pub fn get_bool (&self, key: &str)->Result<Option<bool>> { self.get_parsed(key) }

    /// required-key variant of get_f64 - absence is an error, not None
    pub fn require_f64 (&self, key: &str)->Result<f64> {
        self.get_f64(key)?.ok_or_else( || RavenKwlError::ValueError( format!("missing key '{}'", key)))
    }

    pub fn iter (&self)->impl Iterator<Item=(&str,&str)> {
        self.entries.iter().map( |(k,v)| (k.as_str(), v.as_str()))
    }

    /// sub-view of all entries whose keys start with `prefix`, with the prefix stripped
    pub fn with_prefix (&self, prefix: &str)->KeywordList {
        let mut kwl = KeywordList::new();
        for (k,v) in self.entries.iter() {
            if let Some(stripped) = k.strip_prefix( prefix) {
                kwl.add( stripped, v);
            }
        }
        kwl
    }

    /// add all entries of `other` under `prefix`
    pub fn add_prefixed (&mut self, prefix: &str, other: &KeywordList) {
        for (k,v) in other.entries.iter() {
            self.add( &format!("{}{}", prefix, k), v);
        }
    }

    pub fn parse_str (input: &str)->Result<KeywordList> {
        let mut kwl = KeywordList::new();

        for (i,line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with( COMMENT) { continue }

            match line.split_once(':') {
                Some((key,value)) => kwl.add( key.trim_end(), value.trim()),
                None => return Err( RavenKwlError::ParseError( format!("line {}: no ':' separator in '{}'", i+1, line)) )
            }
        }

        Ok(kwl)
    }

    pub fn write_string (&self)->String {
        let mut s = String::new();
        for (k,v) in self.entries.iter() {
            writeln!( s, "{}: {}", k, v); // writing to a String cannot fail
        }
        s
    }

    pub fn load_file (path: impl AsRef<Path>)->Result<KeywordList> {
        let contents = fs::read_to_string( path.as_ref())?;
        Self::parse_str( &contents)
    }

    pub fn save_file (&self, path: impl AsRef<Path>)->Result<()> {
        Ok( fs::write( path.as_ref(), self.write_string())? )
    }
}
