//! Geospatial math: great-circle distance and the normalized Web-Mercator
//! projection between geographic, world, and screen coordinates.
//!
//! The world plane is the unit square; a viewport at zoom `z` scales it by
//! `TILE_SIZE * 2^z` pixels. The projection diverges near the poles, so
//! behavior outside |lat| < ~85.05° is undefined.

use std::f64::consts::PI;

/// Map tile edge length in pixels; fixes the world-to-pixel scale.
pub const TILE_SIZE: f64 = 512.0;

/// Spherical Earth radius in meters (WGS84 equatorial).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A point on the normalized world plane, both axes in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

/// Pixel offset within a viewport; origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Great-circle (haversine) distance in meters on a spherical Earth.
///
/// Symmetric, zero iff coincident. The spherical approximation is accurate
/// enough for the sub-kilometer matching thresholds this crate uses.
#[must_use]
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Forward projection onto the normalized world plane.
#[must_use]
pub fn lng_lat_to_world(lng: f64, lat: f64) -> WorldPoint {
    let sin_y = lat.to_radians().sin();
    WorldPoint {
        x: (lng + 180.0) / 360.0,
        y: 0.5 - ((1.0 + sin_y) / (1.0 - sin_y)).ln() / (4.0 * PI),
    }
}

/// Inverse of [`lng_lat_to_world`].
#[must_use]
pub fn world_to_lng_lat(x: f64, y: f64) -> GeoPoint {
    let n = PI - 2.0 * PI * y;
    GeoPoint {
        lng: x * 360.0 - 180.0,
        lat: (0.5 * (n.exp() - (-n).exp())).atan().to_degrees(),
    }
}

/// Geographic bounding box; `sw`/`ne` corners, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub sw: GeoPoint,
    pub ne: GeoPoint,
}

impl GeoBounds {
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.sw.lat && lat <= self.ne.lat && lng >= self.sw.lng && lng <= self.ne.lng
    }
}

/// A map viewport: geographic center, zoom level, and pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Edge length of the projected world in pixels at this zoom.
    #[must_use]
    pub fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    /// Pixel offset of a geographic point relative to this viewport.
    ///
    /// Consistent with [`Viewport::bounds`]: a point inside the bounds lands
    /// within `[0, width] x [0, height]`.
    #[must_use]
    pub fn project(&self, lng: f64, lat: f64) -> ScreenPoint {
        let world_size = self.world_size();
        let center = lng_lat_to_world(self.center.lng, self.center.lat);
        let point = lng_lat_to_world(lng, lat);
        ScreenPoint {
            x: self.width / 2.0 + (point.x - center.x) * world_size,
            y: self.height / 2.0 + (point.y - center.y) * world_size,
        }
    }

    /// Geographic bounding box covered by this viewport, from inverse
    /// projection of the half-width/half-height pixel offsets.
    #[must_use]
    pub fn bounds(&self) -> GeoBounds {
        let center = lng_lat_to_world(self.center.lng, self.center.lat);
        let units_per_pixel = 1.0 / self.world_size();

        let x_min = center.x - (self.width / 2.0) * units_per_pixel;
        let x_max = center.x + (self.width / 2.0) * units_per_pixel;
        let y_min = center.y - (self.height / 2.0) * units_per_pixel;
        let y_max = center.y + (self.height / 2.0) * units_per_pixel;

        // World y grows southward: the south-west corner pairs x_min with y_max.
        GeoBounds {
            sw: world_to_lng_lat(x_min, y_max),
            ne: world_to_lng_lat(x_max, y_min),
        }
    }
}
