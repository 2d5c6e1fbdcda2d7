//! Geographic coordinates shared by the user position, the catalog and the camera

use geo::{Distance, Haversine, Point};

/// A (longitude, latitude) pair in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

/// User position before (or without) a successful location fix: central Stockholm
pub const DEFAULT_USER_POSITION: Coordinate = Coordinate {
    longitude: 18.0686,
    latitude: 59.3293,
};

impl Coordinate {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Whether both components are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to another coordinate in meters (Haversine)
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        Haversine.distance(Point::from(*self), Point::from(*other))
    }

    /// Format a distance in meters for display
    pub fn format_distance(meters: f64) -> String {
        let km = meters / 1000.0;
        if km < 1.0 {
            format!("{:.0} m", meters)
        } else if km < 100.0 {
            format!("{:.1} km", km)
        } else {
            format!("{:.0} km", km)
        }
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        DEFAULT_USER_POSITION
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        Point::new(coordinate.longitude, coordinate.latitude)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(point: Point<f64>) -> Self {
        Coordinate::new(point.x(), point.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stockholm() {
        let position = Coordinate::default();
        assert_eq!(position.longitude, 18.0686);
        assert_eq!(position.latitude, 59.3293);
    }

    #[test]
    fn test_validity() {
        assert!(DEFAULT_USER_POSITION.is_valid());
        assert!(!Coordinate::new(181.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -90.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_distance_vasa_to_city_hall() {
        let vasa = Coordinate::new(18.091, 59.328);
        let city_hall = Coordinate::new(18.0543, 59.3275);
        let distance = vasa.distance_to(&city_hall);
        // Roughly 2.1 km apart
        assert!(distance > 1900.0 && distance < 2300.0, "{distance}");
        assert!(vasa.distance_to(&vasa) < f64::EPSILON);
    }

    #[test]
    fn test_distance_is_symmetric_across_the_globe() {
        let stockholm = DEFAULT_USER_POSITION;
        let new_york = Coordinate::new(-74.006, 40.7128);
        let there = stockholm.distance_to(&new_york);
        // About 6300 km by great circle
        assert!(there > 6_200_000.0 && there < 6_400_000.0, "{there}");
        assert!((there - new_york.distance_to(&stockholm)).abs() < 1e-6);
    }

    #[test]
    fn test_point_conversion_keeps_axis_order() {
        let point: Point<f64> = DEFAULT_USER_POSITION.into();
        assert_eq!(point.x(), 18.0686);
        assert_eq!(point.y(), 59.3293);
        assert_eq!(Coordinate::from(point), DEFAULT_USER_POSITION);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(Coordinate::format_distance(420.0), "420 m");
        assert_eq!(Coordinate::format_distance(2140.0), "2.1 km");
        assert_eq!(Coordinate::format_distance(250_000.0), "250 km");
    }
}
