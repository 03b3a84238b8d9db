//! UTM projection for local planar offset math.
//!
//! Points are projected into the UTM zone that contains them so that short
//! offsets can be applied as plain meters, then unprojected with the same zone.
//! The transverse Mercator series follows Krüger's expansion to sixth order in
//! the third flattening, which keeps round trips well below a millimeter inside
//! a zone.

use crate::error::{PlanError, Result};
use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis in meters.
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

const UTM_SCALE_FACTOR: f64 = 0.9996;
const UTM_FALSE_EASTING_M: f64 = 500_000.0;
const UTM_FALSE_NORTHING_SOUTH_M: f64 = 10_000_000.0;
const UTM_ZONE_WIDTH_DEG: f64 = 6.0;

/// UTM is only defined between these latitudes; polar regions use UPS instead.
const UTM_MIN_LAT_DEG: f64 = -80.0;
const UTM_MAX_LAT_DEG: f64 = 84.0;

const INVERSE_MAX_ITERATIONS: usize = 8;
const INVERSE_TOLERANCE: f64 = 1e-14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    North,
    South,
}

/// A UTM zone: the projection context needed to invert a projected point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmZone {
    pub number: u8,
    pub hemisphere: Hemisphere,
}

impl UtmZone {
    /// Select the UTM zone for a location, including the Norway and Svalbard exceptions.
    pub fn for_location(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(UTM_MIN_LAT_DEG..=UTM_MAX_LAT_DEG).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(PlanError::UnsupportedLocation {
                latitude,
                longitude,
            });
        }

        let mut number = (((longitude + 180.0) / UTM_ZONE_WIDTH_DEG).floor() as u8 + 1).min(60);

        if (56.0..64.0).contains(&latitude) && (3.0..12.0).contains(&longitude) {
            number = 32;
        }
        if latitude >= 72.0 {
            number = match longitude {
                lon if (0.0..9.0).contains(&lon) => 31,
                lon if (9.0..21.0).contains(&lon) => 33,
                lon if (21.0..33.0).contains(&lon) => 35,
                lon if (33.0..42.0).contains(&lon) => 37,
                _ => number,
            };
        }

        let hemisphere = if latitude >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        };

        Ok(Self { number, hemisphere })
    }

    /// Longitude of the zone's central meridian in degrees.
    pub fn central_meridian_deg(&self) -> f64 {
        f64::from(self.number) * UTM_ZONE_WIDTH_DEG - 183.0
    }

    fn false_northing_m(&self) -> f64 {
        match self.hemisphere {
            Hemisphere::North => 0.0,
            Hemisphere::South => UTM_FALSE_NORTHING_SOUTH_M,
        }
    }
}

/// A point in a UTM zone. Only meaningful together with its zone, and only
/// for points near where the zone was selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub easting: f64,
    pub northing: f64,
    pub zone: UtmZone,
}

impl ProjectedPoint {
    /// Shift the point by planar meters, staying in the same zone.
    pub fn offset(&self, east_m: f64, north_m: f64) -> Self {
        Self {
            easting: self.easting + east_m,
            northing: self.northing + north_m,
            zone: self.zone,
        }
    }

    /// Unproject back to (latitude, longitude) in degrees.
    pub fn to_geodetic(&self) -> (f64, f64) {
        to_geodetic(self.easting, self.northing, self.zone)
    }
}

/// Project a geodetic point into the UTM zone that contains it.
pub fn to_planar(latitude: f64, longitude: f64) -> Result<ProjectedPoint> {
    let zone = UtmZone::for_location(latitude, longitude)?;
    Ok(to_planar_in_zone(latitude, longitude, zone))
}

/// Project a geodetic point into a given zone.
pub fn to_planar_in_zone(latitude: f64, longitude: f64, zone: UtmZone) -> ProjectedPoint {
    let series = KrugerSeries::wgs84();
    let lambda = (longitude - zone.central_meridian_deg()).to_radians();

    let tau_prime = conformal_tau(latitude.to_radians().tan(), series.e);
    let xi_prime = tau_prime.atan2(lambda.cos());
    let eta_prime = (lambda.sin() / tau_prime.hypot(lambda.cos())).asinh();

    let mut xi = xi_prime;
    let mut eta = eta_prime;
    for (j, alpha) in series.alpha.iter().enumerate() {
        let k = 2.0 * (j + 1) as f64;
        xi += alpha * (k * xi_prime).sin() * (k * eta_prime).cosh();
        eta += alpha * (k * xi_prime).cos() * (k * eta_prime).sinh();
    }

    let scale = UTM_SCALE_FACTOR * series.rectifying_radius;
    ProjectedPoint {
        easting: UTM_FALSE_EASTING_M + scale * eta,
        northing: zone.false_northing_m() + scale * xi,
        zone,
    }
}

/// Unproject UTM coordinates back to (latitude, longitude) in degrees.
pub fn to_geodetic(easting: f64, northing: f64, zone: UtmZone) -> (f64, f64) {
    let series = KrugerSeries::wgs84();
    let scale = UTM_SCALE_FACTOR * series.rectifying_radius;
    let xi = (northing - zone.false_northing_m()) / scale;
    let eta = (easting - UTM_FALSE_EASTING_M) / scale;

    let mut xi_prime = xi;
    let mut eta_prime = eta;
    for (j, beta) in series.beta.iter().enumerate() {
        let k = 2.0 * (j + 1) as f64;
        xi_prime -= beta * (k * xi).sin() * (k * eta).cosh();
        eta_prime -= beta * (k * xi).cos() * (k * eta).sinh();
    }

    let sinh_eta = eta_prime.sinh();
    let cos_xi = xi_prime.cos();
    let tau_prime = xi_prime.sin() / sinh_eta.hypot(cos_xi);
    let tau = geodetic_tau(tau_prime, series.e);

    let latitude = tau.atan().to_degrees();
    let longitude = normalize_longitude(
        zone.central_meridian_deg() + sinh_eta.atan2(cos_xi).to_degrees(),
    );
    (latitude, longitude)
}

/// Wrap a longitude into [-180, 180).
fn normalize_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

/// tan of the conformal latitude for tan of the geodetic latitude.
fn conformal_tau(tau: f64, e: f64) -> f64 {
    let tau1 = tau.hypot(1.0);
    let sigma = (e * (e * tau / tau1).atanh()).sinh();
    tau * sigma.hypot(1.0) - sigma * tau1
}

/// Newton iteration inverting `conformal_tau`.
fn geodetic_tau(tau_prime: f64, e: f64) -> f64 {
    let e2m = 1.0 - e * e;
    let mut tau = tau_prime / e2m;
    for _ in 0..INVERSE_MAX_ITERATIONS {
        let tau_i = conformal_tau(tau, e);
        let dtau = (tau_prime - tau_i) / tau_i.hypot(1.0) * (1.0 + e2m * tau * tau)
            / (e2m * tau.hypot(1.0));
        tau += dtau;
        if dtau.abs() < INVERSE_TOLERANCE * tau.abs().max(1.0) {
            break;
        }
    }
    tau
}

struct KrugerSeries {
    e: f64,
    rectifying_radius: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
}

impl KrugerSeries {
    fn wgs84() -> Self {
        let f = WGS84_F;
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        Self {
            e: (f * (2.0 - f)).sqrt(),
            rectifying_radius: WGS84_A / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0),
            alpha: [
                n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4
                    - 127.0 / 288.0 * n5
                    + 7891.0 / 37800.0 * n6,
                13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4 + 281.0 / 630.0 * n5
                    - 1983433.0 / 1935360.0 * n6,
                61.0 / 240.0 * n3 - 103.0 / 140.0 * n4
                    + 15061.0 / 26880.0 * n5
                    + 167603.0 / 181440.0 * n6,
                49561.0 / 161280.0 * n4 - 179.0 / 168.0 * n5 + 6601661.0 / 7257600.0 * n6,
                34729.0 / 80640.0 * n5 - 3418889.0 / 1995840.0 * n6,
                212378941.0 / 319334400.0 * n6,
            ],
            beta: [
                n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3 - 1.0 / 360.0 * n4 - 81.0 / 512.0 * n5
                    + 96199.0 / 604800.0 * n6,
                1.0 / 48.0 * n2 + 1.0 / 15.0 * n3 - 437.0 / 1440.0 * n4 + 46.0 / 105.0 * n5
                    - 1118711.0 / 3870720.0 * n6,
                17.0 / 480.0 * n3 - 37.0 / 840.0 * n4 - 209.0 / 4480.0 * n5
                    + 5569.0 / 90720.0 * n6,
                4397.0 / 161280.0 * n4 - 11.0 / 504.0 * n5 - 830251.0 / 7257600.0 * n6,
                4583.0 / 161280.0 * n5 - 108847.0 / 3991680.0 * n6,
                20648693.0 / 638668800.0 * n6,
            ],
        }
    }
}
