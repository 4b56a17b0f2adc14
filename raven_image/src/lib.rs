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

/// raster core of RAVEN - a typed in-memory pixel matrix plus the gray TIFF external format.
/// Multi-band imagery is represented as slices of single-band rasters sharing dimensions

use std::{fs::File, io::{BufRead, BufReader, Seek, Write}, ops::{Add, Div, Mul, Sub}, path::Path};
use image::GrayImage;
use num::{Zero,Bounded};
use trait_set::trait_set;
use tiff::{
    decoder::{Decoder,DecodingResult},
    encoder::{
        Compression as TiffCompression, DeflateLevel, TiffEncoder,
        colortype::{Gray32Float,Gray64Float,Gray8,Gray16,GrayI16,Gray32,GrayI32}
    }
};
use raven_common::fs::extension;

pub mod errors;
pub use errors::{Result,RavenImageError};

mod geometry;
pub use geometry::{GridGeometry,GeoRaster};

pub mod histogram;

trait_set! {
    /// the numeric closure we need for pixel values
    pub trait RasterPixel = Add<Output=Self> + Sub<Output=Self> + Div<Output=Self> + Mul<Output=Self> +
                            Bounded + PartialOrd + PartialEq + Zero + Into<f64> + Copy;
}

/// streaming min/max/mean/variance accumulator (Welford)
pub struct Stats<T> {
    pub min: T,
    pub max: T,
    pub mean: f64,
    pub variance: f64,

    pub s: f64,
    pub n: usize
}

impl <T> Stats<T> where T: RasterPixel {
    pub fn new ()->Self {
        let min = T::max_value();
        let max = T::min_value();

        Stats{min,max, mean: 0.0, variance: 0.0, s: 0.0, n: 0}
    }

    pub fn add (&mut self, v: T) {
        self.n += 1;

        if v < self.min { self.min = v }
        if v > self.max { self.max = v }

        let prev_mean = self.mean;
        let v: f64 = v.into();
        let n = self.n as f64;

        self.mean = (v + (n * prev_mean) - prev_mean) / n;
        self.s = self.s + (v - prev_mean) * (v - self.mean);
        self.variance = self.s / n;
    }

    pub fn std_dev (&self)->f64 { self.variance.sqrt() }
}

/// a 2D pixel matrix in row major order
#[derive(Debug,Clone,PartialEq)]
pub struct Raster<T> {
    width: usize,
    height: usize,
    data: Vec<T>
}

impl<T> Raster<T> where T: RasterPixel {

    pub fn new (width: usize, height: usize)->Self {
        let data = vec![ T::zero(); width*height ];
        Raster{width,height,data}
    }

    pub fn filled (width: usize, height: usize, v: T)->Self {
        let data = vec![ v; width*height ];
        Raster{width,height,data}
    }

    pub fn from_vec (width: usize, height: usize, data: Vec<T>)->Result<Self> {
        if data.len() != width*height {
            return Err( RavenImageError::InvalidDimensions( format!("{}x{} raster needs {} pixels, got {}", width, height, width*height, data.len())))
        }
        Ok( Raster{width,height,data} )
    }

    pub fn dimensions (&self)->(usize,usize) { (self.width, self.height) }
    pub fn width (&self)->usize { self.width }
    pub fn height (&self)->usize { self.height }
    pub fn len (&self)->usize { self.data.len() }
    pub fn is_empty (&self)->bool { self.data.is_empty() }

    pub fn data (&self)->&[T] { &self.data }
    pub fn into_data (self)->Vec<T> { self.data }

    #[inline(always)]
    pub fn get (&self, x:usize, y: usize)->T { self.data[ y*self.width + x] }

    #[inline(always)]
    pub fn set (&mut self, x: usize, y: usize, v: T) { self.data[ y*self.width + x] = v; }

    pub fn get_checked (&self, x: usize, y: usize)->Option<T> {
        if x < self.width && y < self.height { Some( self.get(x,y)) } else { None }
    }

    pub fn fill (&mut self, v: T) {
        self.data.fill(v);
    }

    pub fn stats (&self)->Stats<T> {
        let mut stats: Stats<T> = Stats::new();
        for i in 0..self.data.len() {
            stats.add( self.data[i]);
        }
        stats
    }

    pub fn map<F> (&self, f: F)->Raster<T> where F: Fn(T)->T {
        let data: Vec<T> = self.data.iter().map( |&v| f(v)).collect();
        Raster{ width: self.width, height: self.height, data }
    }

    pub fn to_f64 (&self)->Raster<f64> {
        let data: Vec<f64> = self.data.iter().map( |&v| v.into()).collect();
        Raster{ width: self.width, height: self.height, data }
    }

    pub fn sub_raster (&self, x0: usize, y0: usize, w: usize, h: usize)->Result<Raster<T>> {
        if x0 + w > self.width || y0 + h > self.height {
            return Err( RavenImageError::InvalidRegion( format!("sub raster {}+{} x {}+{} exceeds {}x{}", x0,w, y0,h, self.width,self.height)))
        }

        let mut data: Vec<T> = Vec::with_capacity( w*h);
        for y in y0..y0+h {
            data.extend_from_slice( &self.data[ y*self.width + x0 .. y*self.width + x0 + w]);
        }
        Ok( Raster{ width: w, height: h, data} )
    }

    fn check_same_dimensions (&self, other: &Raster<T>)->Result<()> {
        if self.dimensions() != other.dimensions() {
            Err( RavenImageError::InvalidDimensions( format!("raster dimensions differ: {}x{} vs {}x{}",
                self.width, self.height, other.width, other.height)))
        } else {
            Ok(())
        }
    }

    pub fn diff (&self, other: &Raster<T>)->Result<Self> {
        self.check_same_dimensions(other)?;
        let data = self.data.iter().zip( other.data.iter()).map( |(&a,&b)| a - b).collect();
        Ok( Raster{ width: self.width, height: self.height, data} )
    }

    pub fn abs_diff (&self, other: &Raster<T>)->Result<Self> {
        self.check_same_dimensions(other)?;
        let data = self.data.iter().zip( other.data.iter())
            .map( |(&a,&b)| if a > b { a - b } else { b - a }).collect();
        Ok( Raster{ width: self.width, height: self.height, data} )
    }

    pub fn sum (&self, other: &Raster<T>)->Result<Self> {
        self.check_same_dimensions(other)?;
        let data = self.data.iter().zip( other.data.iter()).map( |(&a,&b)| a + b).collect();
        Ok( Raster{ width: self.width, height: self.height, data} )
    }

    pub fn scalar_mul (&self, factor: T)->Self {
        let data = self.data.iter().map( |&v| v * factor).collect();
        Raster{ width: self.width, height: self.height, data}
    }

    pub fn scalar_div (&self, divisor: T)->Self {
        let data = self.data.iter().map( |&v| v / divisor).collect();
        Raster{ width: self.width, height: self.height, data}
    }

    pub fn cells_matching<F> (&self, pred: F)->Vec<(usize,usize)> where F: Fn(T)->bool {
        let mut cells = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if pred( self.get(x,y)) {
                    cells.push( (x, y))
                }
            }
        }
        cells
    }
}

impl<T> Raster<T> where T: RasterPixel + GrayTiffData {

    pub fn open<P> (path: P)->Result<Self> where P: AsRef<Path> {
        Self::check_path( &path)?;
        let file: File = File::open(path)?;
        let reader = BufReader::new(file);
        let mut decoder = Decoder::new( reader)?;

        let (w, h) = decoder.dimensions()?;
        let width = w as usize;
        let height = h as usize;
        let result = decoder.read_image()?;

        let data = T::get_data( result)?;
        if data.len() != width*height {
            return Err( RavenImageError::InvalidImageFormat( format!("TIFF data length {} does not match {}x{}", data.len(), width, height)))
        }

        Ok( Raster{width,height,data} )
    }

    pub fn save<P> (&self, path: P)->Result<()> where P: AsRef<Path> {
        Self::check_path( &path)?;

        let mut out_file: File = File::create( path.as_ref())?;
        let mut enc = TiffEncoder::new(&mut out_file)?.with_compression( TiffCompression::Deflate(DeflateLevel::Best));

        Ok( T::write_image( &mut enc, self.width, self.height, self.data.as_ref())? )
    }

    fn check_path<P> (path: &P)->Result<()> where P: AsRef<Path> {
        let ext = extension( path);
        match ext {
            Some(e) if e.ends_with("tif") || e.ends_with("tiff") => Ok(()),
            _ => Err( RavenImageError::IllegalArgument( format!("raster only supports TIFF as external format")))
        }
    }
}

impl Raster<u8> {
    pub fn from_luma8 (img: &GrayImage)->Raster<u8> {
        let (w,h) = img.dimensions();
        Raster{ width: w as usize, height: h as usize, data: img.as_raw().clone() }
    }
}

/// typed gray TIFF encode/decode - decoding promotes narrower integer results
pub trait GrayTiffData where Self: Sized {
    fn write_image<W> (enc: &mut TiffEncoder<W>, w: usize, h: usize, data: &[Self])->Result<()> where W: Write + Seek;
    fn get_data (result: DecodingResult)->Result<Vec<Self>>;
}

impl GrayTiffData for f32 {
    fn write_image<W> (enc: &mut TiffEncoder<W>, w: usize, h: usize, data: &[Self])->Result<()> where W: Write + Seek {
        Ok( enc.write_image::<Gray32Float>( w as u32, h as u32, data)? )
    }

    fn get_data (result: DecodingResult)->Result<Vec<Self>> {
        match result {
            DecodingResult::F32(data) => Ok( data ),
            DecodingResult::F64(data) => Ok( data.iter().map(|&x| x as Self).collect() ),
            _ => Err( RavenImageError::InvalidImageFormat("TIFF does not contain data that can be converted to f32".into()) )
        }
    }
}

impl GrayTiffData for f64 {
    fn write_image<W> (enc: &mut TiffEncoder<W>, w: usize, h: usize, data: &[Self])->Result<()> where W: Write + Seek {
        Ok( enc.write_image::<Gray64Float>( w as u32, h as u32, data)? )
    }

    fn get_data (result: DecodingResult)->Result<Vec<Self>> {
        match result {
            DecodingResult::F64(data) => Ok( data ),
            DecodingResult::F32(data) => Ok( data.iter().map(|&x| x as Self).collect() ),
            _ => Err( RavenImageError::InvalidImageFormat("TIFF does not contain data that can be converted to f64".into()) )
        }
    }
}

impl GrayTiffData for u8 {
    fn write_image<W> (enc: &mut TiffEncoder<W>, w: usize, h: usize, data: &[Self])->Result<()> where W: Write + Seek {
        Ok( enc.write_image::<Gray8>( w as u32, h as u32, data)? )
    }

    fn get_data (result: DecodingResult)->Result<Vec<Self>> {
        match result {
            DecodingResult::U8(data) => Ok( data ),
            _ => Err( RavenImageError::InvalidImageFormat("TIFF does not contain data that can be converted to u8".into()) )
        }
    }
}

impl GrayTiffData for u16 {
    fn write_image<W> (enc: &mut TiffEncoder<W>, w: usize, h: usize, data: &[Self])->Result<()> where W: Write + Seek {
        Ok( enc.write_image::<Gray16>( w as u32, h as u32, data)? )
    }

    fn get_data (result: DecodingResult)->Result<Vec<Self>> {
        match result {
            DecodingResult::U16(data) => Ok( data ),
            DecodingResult::U8(data) => Ok( data.iter().map(|&x| x as Self).collect() ),
            _ => Err( RavenImageError::InvalidImageFormat("TIFF does not contain data that can be converted to u16".into()) )
        }
    }
}

impl GrayTiffData for i16 {
    fn write_image<W> (enc: &mut TiffEncoder<W>, w: usize, h: usize, data: &[Self])->Result<()> where W: Write + Seek {
        Ok( enc.write_image::<GrayI16>( w as u32, h as u32, data)? )
    }

    fn get_data (result: DecodingResult)->Result<Vec<Self>> {
        match result {
            DecodingResult::I16(data) => Ok( data ),
            DecodingResult::I8(data) => Ok( data.iter().map(|&x| x as Self).collect() ),
            _ => Err( RavenImageError::InvalidImageFormat("TIFF does not contain data that can be converted to i16".into()) )
        }
    }
}

impl GrayTiffData for u32 {
    fn write_image<W> (enc: &mut TiffEncoder<W>, w: usize, h: usize, data: &[Self])->Result<()> where W: Write + Seek {
        Ok( enc.write_image::<Gray32>( w as u32, h as u32, data)? )
    }

    fn get_data (result: DecodingResult)->Result<Vec<Self>> {
        match result {
            DecodingResult::U32(data) => Ok( data ),
            DecodingResult::U16(data) => Ok( data.iter().map(|&x| x as Self).collect() ),
            DecodingResult::U8(data) => Ok( data.iter().map(|&x| x as Self).collect() ),
            _ => Err( RavenImageError::InvalidImageFormat("TIFF does not contain data that can be converted to u32".into()) )
        }
    }
}

impl GrayTiffData for i32 {
    fn write_image<W> (enc: &mut TiffEncoder<W>, w: usize, h: usize, data: &[Self])->Result<()> where W: Write + Seek {
        Ok( enc.write_image::<GrayI32>( w as u32, h as u32, data)? )
    }

    fn get_data (result: DecodingResult)->Result<Vec<Self>> {
        match result {
            DecodingResult::I32(data) => Ok( data ),
            DecodingResult::I16(data) => Ok( data.iter().map(|&x| x as Self).collect() ),
            DecodingResult::I8(data) => Ok( data.iter().map(|&x| x as Self).collect() ),
            _ => Err( RavenImageError::InvalidImageFormat("TIFF does not contain data that can be converted to i32".into()) )
        }
    }
}

/// check that all bands of a multi-band raster share dimensions, answer those dimensions
pub fn check_band_dimensions<T> (bands: &[Raster<T>])->Result<(usize,usize)> where T: RasterPixel {
    match bands.first() {
        Some(first) => {
            let dims = first.dimensions();
            for b in bands.iter().skip(1) {
                if b.dimensions() != dims {
                    return Err( RavenImageError::InvalidDimensions("band dimensions differ".into()))
                }
            }
            Ok(dims)
        }
        None => Err( RavenImageError::InsufficientData("no bands".into()))
    }
}
