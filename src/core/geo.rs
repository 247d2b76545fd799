use crate::core::bounds::Bounds;
use crate::core::constants::{
    tile_width_meters, EARTH_RADIUS, LATITUDE_MAX, LONGITUDE_MAX, ORIGIN_SHIFT,
};
use crate::MapError;
use geo::HaversineDistance;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Great-circle distance to another coordinate in meters
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        geo_types::Point::from(*self).haversine_distance(&geo_types::Point::from(*other))
    }

    /// Clamps latitude to the range the Mercator projection can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-LATITUDE_MAX, LATITUDE_MAX)
    }

    /// Returns a copy with latitude and longitude clamped to the projectable range
    pub fn clamped(&self) -> Self {
        Self::new(
            Self::clamp_lat(self.lat),
            self.lng.clamp(-LONGITUDE_MAX, LONGITUDE_MAX),
        )
    }

    /// Converts to Web Mercator projection (EPSG:3857).
    ///
    /// Latitudes of ±90° project to infinity; clamp first.
    pub fn to_mercator(&self) -> Point {
        let x = self.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + self.lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;
        Point::new(x, y)
    }

    /// Creates LatLng from Web Mercator coordinates
    pub fn from_mercator(point: Point) -> Self {
        let lng = (point.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Self::new(lat, lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// Parses the `"lat, lng"` form used by location options
impl FromStr for LatLng {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(MapError::ParseError(format!(
                "expected \"lat, lng\", got {:?}",
                s
            )));
        }

        let parse = |part: &str| {
            part.parse::<f64>()
                .map_err(|e| MapError::ParseError(format!("{:?}: {}", part, e)))
        };

        Ok(Self::new(parse(parts[0])?, parse(parts[1])?))
    }
}

impl From<LatLng> for geo_types::Point<f64> {
    fn from(lat_lng: LatLng) -> Self {
        geo_types::Point::new(lat_lng.lng, lat_lng.lat)
    }
}

impl From<geo_types::Point<f64>> for LatLng {
    fn from(point: geo_types::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<geo_types::Coord<f64>> for LatLng {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

/// A point in projected (Web Mercator meters) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn divide(&self, scalar: f64) -> Point {
        Point::new(self.x / scalar, self.y / scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Number of tiles along one axis at `zoom`
    pub fn tiles_per_axis(zoom: u8) -> u32 {
        1_u32 << zoom.min(31)
    }

    /// Creates the tile covering a LatLng at the given zoom level.
    ///
    /// Points on the east edge or the southern clamp bound land in the last
    /// column/row rather than one past it.
    pub fn from_lat_lng(lat_lng: &LatLng, zoom: u8) -> Self {
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();
        let lng = lat_lng.lng.clamp(-LONGITUDE_MAX, LONGITUDE_MAX);
        let n = Self::tiles_per_axis(zoom);
        let last = (n - 1) as f64;

        let x = ((lng + 180.0) / 360.0 * n as f64).floor().clamp(0.0, last) as u32;
        let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n as f64)
            .floor()
            .clamp(0.0, last) as u32;

        Self::new(x, y, zoom)
    }

    /// Converts tile coordinate to LatLng (northwest corner)
    pub fn to_lat_lng(&self) -> LatLng {
        let n = Self::tiles_per_axis(self.z) as f64;
        let lng = self.x as f64 / n * 360.0 - 180.0;
        let lat_rad = (PI * (1.0 - 2.0 * self.y as f64 / n)).sinh().atan();
        LatLng::new(lat_rad.to_degrees(), lng)
    }

    /// Bounding rectangle of the tile in Web Mercator meters
    pub fn mercator_bounds(&self) -> Bounds {
        let width = tile_width_meters(self.z);
        let min_x = self.x as f64 * width - ORIGIN_SHIFT;
        let max_y = ORIGIN_SHIFT - self.y as f64 * width;
        Bounds::from_coords(min_x, max_y - width, min_x + width, max_y)
    }

    /// Gets the parent tile at a lower zoom level
    pub fn parent(&self) -> Option<TileCoord> {
        if self.z == 0 {
            None
        } else {
            Some(TileCoord::new(self.x / 2, self.y / 2, self.z - 1))
        }
    }

    /// Gets the child tiles at a higher zoom level
    pub fn children(&self) -> Vec<TileCoord> {
        if self.z >= crate::core::constants::MAX_ZOOM {
            Vec::new()
        } else {
            vec![
                TileCoord::new(self.x * 2, self.y * 2, self.z + 1),
                TileCoord::new(self.x * 2 + 1, self.y * 2, self.z + 1),
                TileCoord::new(self.x * 2, self.y * 2 + 1, self.z + 1),
                TileCoord::new(self.x * 2 + 1, self.y * 2 + 1, self.z + 1),
            ]
        }
    }

    /// Checks if the tile is valid for the given zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = Self::tiles_per_axis(self.z);
        self.x < max_coord && self.y < max_coord
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lng, -74.0060);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_lat_lng_distance() {
        let nyc = LatLng::new(40.7128, -74.0060);
        let la = LatLng::new(34.0522, -118.2437);
        let distance = nyc.distance_to(&la);

        // Distance should be approximately 3940 km
        assert!((distance - 3_940_000.0).abs() < 15_000.0);
    }

    #[test]
    fn test_parse_lat_lng() {
        let parsed: LatLng = "37.7749, -122.4194".parse().unwrap();
        assert_eq!(parsed, LatLng::new(37.7749, -122.4194));

        let tight: LatLng = "1.5,2".parse().unwrap();
        assert_eq!(tight, LatLng::new(1.5, 2.0));

        assert!(matches!("37.7749".parse::<LatLng>(), Err(MapError::ParseError(_))));
        assert!(matches!("a, b".parse::<LatLng>(), Err(MapError::ParseError(_))));
        assert!(matches!("1, 2, 3".parse::<LatLng>(), Err(MapError::ParseError(_))));
    }

    #[test]
    fn test_mercator_round_trip() {
        let coord = LatLng::new(-33.8688, 151.2093);
        let back = LatLng::from_mercator(coord.to_mercator());
        assert!((back.lat - coord.lat).abs() < 1e-9);
        assert!((back.lng - coord.lng).abs() < 1e-9);
    }

    #[test]
    fn test_mercator_extent() {
        let corner = LatLng::new(LATITUDE_MAX, 180.0).to_mercator();
        assert!((corner.x - ORIGIN_SHIFT).abs() < 1e-6);
        assert!((corner.y - ORIGIN_SHIFT).abs() < 1.0);
    }

    #[test]
    fn test_tile_coord_conversion() {
        let lat_lng = LatLng::new(40.7128, -74.0060);
        let tile = TileCoord::from_lat_lng(&lat_lng, 10);
        let back_to_lat_lng = tile.to_lat_lng();

        // Should be reasonably close (within tile boundaries)
        assert!((back_to_lat_lng.lat - lat_lng.lat).abs() < 1.0);
        assert!((back_to_lat_lng.lng - lat_lng.lng).abs() < 1.0);
    }

    #[test]
    fn test_tile_from_lat_lng_edges() {
        assert_eq!(TileCoord::from_lat_lng(&LatLng::new(0.0, 0.0), 0), TileCoord::new(0, 0, 0));
        assert_eq!(TileCoord::from_lat_lng(&LatLng::new(0.0, 0.0), 1), TileCoord::new(1, 1, 1));

        let east_edge = TileCoord::from_lat_lng(&LatLng::new(10.0, 180.0), 3);
        assert_eq!(east_edge.x, 7);
        let south_pole = TileCoord::from_lat_lng(&LatLng::new(-90.0, 0.0), 3);
        assert_eq!(south_pole.y, 7);
        assert!(east_edge.is_valid() && south_pole.is_valid());
    }

    #[test]
    fn test_tile_mercator_bounds_contain_point() {
        let lat_lng = LatLng::new(48.8566, 2.3522);
        let tile = TileCoord::from_lat_lng(&lat_lng, 12);
        let bounds = tile.mercator_bounds();

        assert!(bounds.contains(&lat_lng.to_mercator()));
        assert!((bounds.width() - tile_width_meters(12)).abs() < 1e-6);
        assert!((bounds.height() - tile_width_meters(12)).abs() < 1e-6);
    }

    #[test]
    fn test_parent_and_children() {
        let tile = TileCoord::new(5, 9, 4);
        assert_eq!(tile.parent(), Some(TileCoord::new(2, 4, 3)));
        assert!(TileCoord::new(0, 0, 0).parent().is_none());

        let children = tile.children();
        assert_eq!(children.len(), 4);
        assert!(children.iter().all(|c| c.parent() == Some(tile)));
    }

    #[test]
    fn test_geo_types_conversion() {
        let lat_lng = LatLng::new(51.5074, -0.1278);
        let point: geo_types::Point<f64> = lat_lng.into();
        assert_eq!(point.x(), -0.1278);
        assert_eq!(point.y(), 51.5074);
        assert_eq!(LatLng::from(point), lat_lng);
        assert_eq!(LatLng::from(geo_types::coord! { x: 2.0, y: 1.0 }), LatLng::new(1.0, 2.0));
    }
}
