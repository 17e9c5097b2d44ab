//! Track pixel buffer, colour classes and metadata.
//!
//! A track is an immutable image whose pixel colours classify the surface
//! (road, painted line, waypoint marker, finish strip) plus metadata telling
//! vehicles where to start and which line segments count as waypoints. Both
//! are loaded once and then only ever read, so a single [`Track`] can be
//! shared by every agent in a population, across threads.

use geo::{Line, Point};
use serde::{Deserialize, Serialize};

use super::geometry::Pose;

/// An 8-bit RGB pixel colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The colour classes a track image is painted with.
///
/// All four classes are traversable surface; anything else is a boundary and
/// kills a vehicle on contact. A track that paints its finish strip with the
/// same colour as its line markings simply sets `finish == line`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackColors {
    /// Plain road surface.
    pub road: Rgb,
    /// Painted line markings.
    pub line: Rgb,
    /// Waypoint marker pixels.
    pub waypoint: Rgb,
    /// The finish strip checked for lap completion.
    pub finish: Rgb,
}

impl TrackColors {
    /// Whether a pixel colour is part of the traversable surface.
    #[inline]
    pub fn is_traversable(&self, pixel: Rgb) -> bool {
        pixel == self.road || pixel == self.line || pixel == self.waypoint || pixel == self.finish
    }
}

/// An immutable 2D pixel buffer holding the track surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl TrackImage {
    /// Creates an image from a row-major pixel buffer.
    ///
    /// Fails when the dimensions are zero or the buffer length does not
    /// match `width * height` - a malformed image is fatal at load time.
    pub fn from_raw(
        width: u32,
        height: u32,
        pixels: Vec<Rgb>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if width == 0 || height == 0 {
            return Err(format!("track image has empty dimensions {width}x{height}").into());
        }
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(format!(
                "track image buffer holds {} pixels, expected {}",
                pixels.len(),
                (width as usize) * (height as usize)
            )
            .into());
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates an image by evaluating `paint` at every pixel coordinate.
    pub fn from_fn(width: u32, height: u32, paint: impl Fn(u32, u32) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                pixels.push(paint(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reads the pixel at an in-bounds coordinate.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Reads the pixel under a world-space point, or `None` off the image.
    #[inline]
    pub fn pixel_at(&self, point: Point<f32>) -> Option<Rgb> {
        let x = point.x() as i32;
        let y = point.y() as i32;
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixel(x as u32, y as u32))
    }

    /// Clamps integer coordinates onto the image.
    #[inline]
    pub fn clamp_coords(&self, x: i32, y: i32) -> (u32, u32) {
        let cx = x.clamp(0, self.width as i32 - 1);
        let cy = y.clamp(0, self.height as i32 - 1);
        (cx as u32, cy as u32)
    }
}

/// A line segment vehicles must cross, in any order, to count lap progress.
pub type Waypoint = Line<f32>;

/// Metadata describing how vehicles relate to a track image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Pose every vehicle starts (and resets) at.
    pub start_pose: Pose,
    /// Per-axis scale applied to vehicle bodies on this track.
    pub scale: (f32, f32),
    /// The track's colour classes.
    pub colors: TrackColors,
    /// Ordered waypoint segments forming the course loop.
    pub waypoints: Vec<Waypoint>,
}

impl TrackInfo {
    /// Creates track metadata.
    ///
    /// Fails on an empty waypoint list; a course without waypoints has no
    /// measurable progress.
    pub fn new(
        start_pose: Pose,
        scale: (f32, f32),
        colors: TrackColors,
        waypoints: Vec<Waypoint>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if waypoints.is_empty() {
            return Err("track metadata defines no waypoints".into());
        }
        Ok(Self {
            start_pose,
            scale,
            colors,
            waypoints,
        })
    }
}

/// A complete track: pixel surface plus metadata, immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// The pixel surface.
    pub image: TrackImage,
    /// Colours, start pose and waypoints.
    pub info: TrackInfo,
}

impl Track {
    /// Bundles an image with its metadata.
    ///
    /// Fails when the start position lies outside the image.
    pub fn new(image: TrackImage, info: TrackInfo) -> Result<Self, Box<dyn std::error::Error>> {
        let start = info.start_pose.position;
        if image.pixel_at(start).is_none() {
            return Err(format!(
                "start position ({}, {}) lies outside the {}x{} track image",
                start.x(),
                start.y(),
                image.width(),
                image.height()
            )
            .into());
        }
        Ok(Self { image, info })
    }
}
