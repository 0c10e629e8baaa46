//! Elevation raster with GeoTIFF read and write support.

use crate::{DemError, Result};
use std::io::{BufWriter, Read, Seek};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

/// No-data value written into stitched rasters for pixels the source tiles
/// cannot cover.
pub const NO_DATA_VALUE: f32 = -9999.0;

/// Geographic bounds of a raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Minimum latitude (south edge).
    pub min_lat: f64,
    /// Maximum latitude (north edge).
    pub max_lat: f64,
    /// Minimum longitude (west edge).
    pub min_lon: f64,
    /// Maximum longitude (east edge).
    pub max_lon: f64,
}

impl GeoBounds {
    /// Check if a coordinate is within the bounds.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    /// Latitude span in degrees.
    pub fn lat_range(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude span in degrees.
    pub fn lon_range(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

/// An elevation grid with geographic bounds.
///
/// Data is stored in row-major order, north to south and west to east,
/// matching the GeoTIFF layout of the source tiles.
#[derive(Debug)]
pub struct DemRaster {
    /// Elevation values in meters.
    data: Vec<f32>,
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Geographic bounds.
    bounds: GeoBounds,
    /// No-data sentinel (elevations equal to this are treated as missing).
    no_data_value: Option<f32>,
}

impl DemRaster {
    /// Build a raster from raw parts.
    ///
    /// # Errors
    /// Returns [`DemError::InvalidGeoTiff`] if `data` does not hold exactly
    /// `width * height` samples.
    pub fn new(
        data: Vec<f32>,
        width: u32,
        height: u32,
        bounds: GeoBounds,
        no_data_value: Option<f32>,
    ) -> Result<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return Err(DemError::InvalidGeoTiff(format!(
                "expected {} samples for {}x{}, got {}",
                (width as usize) * (height as usize),
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            bounds,
            no_data_value,
        })
    }

    /// Load a raster from a GeoTIFF file, reading the bounds from its
    /// ModelTiepoint/ModelPixelScale tags.
    pub fn from_geotiff<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut decoder = new_decoder(file)?;

        let (width, height) = decoder.dimensions()?;
        let bounds = read_geotransform(&mut decoder, width, height)?;
        let data = decode_elevation_data(&mut decoder)?;
        let no_data_value = read_nodata_value(&mut decoder);

        Self::new(data, width, height, bounds, no_data_value)
    }

    /// Load a raster from a GeoTIFF file with explicit bounds.
    ///
    /// Use this for source tiles whose extent is known from their grid
    /// position rather than from embedded tags.
    pub fn from_geotiff_with_bounds<P: AsRef<Path>>(path: P, bounds: GeoBounds) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut decoder = new_decoder(file)?;

        let (width, height) = decoder.dimensions()?;
        let data = decode_elevation_data(&mut decoder)?;
        let no_data_value = read_nodata_value(&mut decoder);

        Self::new(data, width, height, bounds, no_data_value)
    }

    /// Write the raster as a single-band 32-bit float GeoTIFF.
    ///
    /// Writes ModelPixelScale and ModelTiepoint tags so the output is
    /// georeferenced, plus the GDAL no-data tag when a sentinel is set.
    pub fn write_geotiff<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
        let mut image = encoder.new_image::<colortype::Gray32Float>(self.width, self.height)?;

        let (res_lon, res_lat) = self.resolution_deg();
        let pixel_scale = [res_lon, res_lat, 0.0];
        // Anchor pixel (0, 0) at the northwest corner.
        let tiepoint = [0.0, 0.0, 0.0, self.bounds.min_lon, self.bounds.max_lat, 0.0];

        image
            .encoder()
            .write_tag(Tag::ModelPixelScaleTag, &pixel_scale[..])?;
        image
            .encoder()
            .write_tag(Tag::ModelTiepointTag, &tiepoint[..])?;
        if let Some(no_data) = self.no_data_value {
            image
                .encoder()
                .write_tag(Tag::GdalNodata, format!("{}", no_data).as_str())?;
        }

        image.write_data(&self.data)?;
        Ok(())
    }

    /// Get the elevation at a geographic coordinate.
    ///
    /// Uses bilinear interpolation between the four nearest pixels.
    ///
    /// # Errors
    /// [`DemError::OutOfBounds`] if the coordinate lies outside the raster,
    /// [`DemError::NoData`] if any contributing pixel is the no-data value.
    pub fn sample(&self, lat: f64, lon: f64) -> Result<f32> {
        if !self.bounds.contains(lat, lon) {
            return Err(self.out_of_bounds(lat, lon));
        }

        // Convert geographic coordinates to pixel coordinates.
        // Row 0 is at max_lat (north), increasing southward.
        let x = ((lon - self.bounds.min_lon) / self.bounds.lon_range()) * (self.width - 1) as f64;
        let y = ((self.bounds.max_lat - lat) / self.bounds.lat_range()) * (self.height - 1) as f64;

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x - x0 as f64;
        let fy = y - y0 as f64;

        let v00 = self.pixel_checked(x0, y0, lat, lon)?;
        let v10 = self.pixel_checked(x1, y0, lat, lon)?;
        let v01 = self.pixel_checked(x0, y1, lat, lon)?;
        let v11 = self.pixel_checked(x1, y1, lat, lon)?;

        let elevation = v00 as f64 * (1.0 - fx) * (1.0 - fy)
            + v10 as f64 * fx * (1.0 - fy)
            + v01 as f64 * (1.0 - fx) * fy
            + v11 as f64 * fx * fy;

        Ok(elevation as f32)
    }

    /// Raw elevation value at a pixel coordinate, no no-data checking.
    ///
    /// # Panics
    /// Panics if the pixel coordinate is outside the raster.
    pub fn value_at(&self, x: u32, y: u32) -> f32 {
        assert!(x < self.width && y < self.height);
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    fn pixel_checked(&self, x: u32, y: u32, lat: f64, lon: f64) -> Result<f32> {
        let value = self.value_at(x, y);
        if self.is_no_data(value) {
            return Err(DemError::NoData { lat, lon });
        }
        Ok(value)
    }

    /// Whether a value matches the raster's no-data sentinel.
    pub fn is_no_data(&self, value: f32) -> bool {
        match self.no_data_value {
            Some(no_data) => (value - no_data).abs() < 0.001,
            None => false,
        }
    }

    fn out_of_bounds(&self, lat: f64, lon: f64) -> DemError {
        DemError::OutOfBounds {
            lat,
            lon,
            min_lat: self.bounds.min_lat,
            max_lat: self.bounds.max_lat,
            min_lon: self.bounds.min_lon,
            max_lon: self.bounds.max_lon,
        }
    }

    /// The elevation samples in row-major order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Geographic bounds of the raster.
    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    /// Dimensions in pixels (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The no-data sentinel, if any.
    pub fn no_data_value(&self) -> Option<f32> {
        self.no_data_value
    }

    /// Resolution in degrees per pixel (longitude, latitude).
    pub fn resolution_deg(&self) -> (f64, f64) {
        (
            self.bounds.lon_range() / self.width as f64,
            self.bounds.lat_range() / self.height as f64,
        )
    }
}

/// Create a TIFF decoder with limits raised for large DEM rasters.
fn new_decoder<R: Read + Seek>(reader: R) -> Result<Decoder<R>> {
    let mut limits = Limits::default();
    limits.decoding_buffer_size = 1024 * 1024 * 1024; // 1 GB
    limits.intermediate_buffer_size = 1024 * 1024 * 1024;
    limits.ifd_value_size = 1024 * 1024 * 1024;
    Ok(Decoder::new(reader)?.with_limits(limits))
}

/// Read the geographic bounds from GeoTIFF tags.
fn read_geotransform<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    width: u32,
    height: u32,
) -> Result<GeoBounds> {
    let tiepoint = decoder.get_tag_f64_vec(Tag::ModelTiepointTag);
    let pixel_scale = decoder.get_tag_f64_vec(Tag::ModelPixelScaleTag);

    if let (Ok(tiepoint), Ok(scale)) = (tiepoint, pixel_scale) {
        if tiepoint.len() >= 6 && scale.len() >= 2 {
            // Tiepoint format: [i, j, k, x, y, z] where (i, j) is pixel
            // coords and (x, y) is geographic coords.
            let tie_x = tiepoint[3];
            let tie_y = tiepoint[4];
            let scale_x = scale[0];
            let scale_y = scale[1];

            return Ok(GeoBounds {
                min_lat: tie_y - (height as f64 * scale_y),
                max_lat: tie_y,
                min_lon: tie_x,
                max_lon: tie_x + (width as f64 * scale_x),
            });
        }
    }

    Err(DemError::InvalidGeoTiff(
        "missing ModelTiepoint/ModelPixelScale tags".to_string(),
    ))
}

/// Decode elevation data from the TIFF decoder, widening to f32.
fn decode_elevation_data<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Vec<f32>> {
    let result = decoder.read_image()?;

    match result {
        DecodingResult::F32(data) => Ok(data),
        DecodingResult::F64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        DecodingResult::I16(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        DecodingResult::I32(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        DecodingResult::U16(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        DecodingResult::U32(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        DecodingResult::U8(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        DecodingResult::I8(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        DecodingResult::U64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        DecodingResult::I64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
    }
}

/// Try to read the no-data value from the GDAL_NODATA tag.
fn read_nodata_value<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<f32> {
    decoder
        .get_tag_ascii_string(Tag::GdalNodata)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_bounds() -> GeoBounds {
        GeoBounds {
            min_lat: 0.0,
            max_lat: 1.0,
            min_lon: 10.0,
            max_lon: 11.0,
        }
    }

    #[test]
    fn test_new_rejects_mismatched_data() {
        assert!(DemRaster::new(vec![0.0; 3], 2, 2, small_bounds(), None).is_err());
        assert!(DemRaster::new(vec![0.0; 4], 2, 2, small_bounds(), None).is_ok());
    }

    #[test]
    fn test_bilinear_sample() {
        // 2x2 grid: row 0 is the north edge.
        let raster =
            DemRaster::new(vec![10.0, 20.0, 30.0, 40.0], 2, 2, small_bounds(), None).unwrap();

        // Center of the raster averages all four pixels.
        let center = raster.sample(0.5, 10.5).unwrap();
        assert_relative_eq!(center, 25.0, epsilon = 1e-4);

        // Corners hit single pixels exactly.
        assert_relative_eq!(raster.sample(1.0, 10.0).unwrap(), 10.0, epsilon = 1e-4);
        assert_relative_eq!(raster.sample(0.0, 11.0).unwrap(), 40.0, epsilon = 1e-4);
    }

    #[test]
    fn test_sample_out_of_bounds() {
        let raster = DemRaster::new(vec![0.0; 4], 2, 2, small_bounds(), None).unwrap();
        assert!(matches!(
            raster.sample(2.0, 10.5),
            Err(DemError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_sample_no_data() {
        let raster = DemRaster::new(
            vec![NO_DATA_VALUE, 20.0, 30.0, 40.0],
            2,
            2,
            small_bounds(),
            Some(NO_DATA_VALUE),
        )
        .unwrap();
        assert!(matches!(
            raster.sample(0.9, 10.1),
            Err(DemError::NoData { .. })
        ));
    }

    #[test]
    fn test_geotiff_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dem.tif");

        let data: Vec<f32> = (0..16 * 8).map(|v| v as f32 * 0.5).collect();
        let original =
            DemRaster::new(data.clone(), 16, 8, small_bounds(), Some(NO_DATA_VALUE)).unwrap();
        original.write_geotiff(&path).unwrap();

        let reread = DemRaster::from_geotiff(&path).unwrap();
        assert_eq!(reread.dimensions(), (16, 8));
        assert_eq!(reread.data(), &data[..]);
        assert_eq!(reread.no_data_value(), Some(NO_DATA_VALUE));

        let bounds = reread.bounds();
        assert_relative_eq!(bounds.min_lat, 0.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.max_lat, 1.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.min_lon, 10.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.max_lon, 11.0, epsilon = 1e-9);
    }
}
