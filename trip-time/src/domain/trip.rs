//! Trip parameters, the breakdown derived from them, and the outcome
//! handed back to display layers.

use std::fmt;

use serde::Serialize;

use super::error::ValidationError;

/// Parameters of an electric-vehicle trip.
///
/// Units: kilometres, km/h, kilometres and minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripRequest {
    /// Total trip distance (km)
    pub distance_km: f64,
    /// Average driving speed (km/h)
    pub speed_kmh: f64,
    /// Distance the vehicle covers on a full charge (km)
    pub range_km: f64,
    /// Duration of one full recharge (minutes)
    pub recharge_minutes: f64,
}

impl TripRequest {
    /// Create a new request. No validation is performed here.
    pub fn new(distance_km: f64, speed_kmh: f64, range_km: f64, recharge_minutes: f64) -> Self {
        Self {
            distance_km,
            speed_kmh,
            range_km,
            recharge_minutes,
        }
    }

    /// Check that the parameters describe a drivable trip.
    ///
    /// Distance, speed and range must be finite and strictly positive;
    /// the recharge duration must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let strictly_positive = [
            ("distance", self.distance_km),
            ("speed", self.speed_kmh),
            ("range", self.range_km),
        ];

        for (field, value) in strictly_positive {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field, value });
            }
            if value <= 0.0 {
                return Err(ValidationError::NonPositive { field, value });
            }
        }

        let field = "recharge duration";
        let value = self.recharge_minutes;
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field, value });
        }
        if value < 0.0 {
            return Err(ValidationError::Negative { field, value });
        }

        Ok(())
    }

    /// Pure driving time in hours.
    pub fn driving_hours(&self) -> f64 {
        self.distance_km / self.speed_kmh
    }

    /// Number of recharges needed along the way.
    ///
    /// The vehicle starts fully charged, so a trip shorter than the range
    /// needs none.
    pub fn recharge_stops(&self) -> u32 {
        // Float-to-int casts saturate, so a NaN ratio yields zero stops.
        let legs = (self.distance_km / self.range_km).ceil() as u32;
        legs.saturating_sub(1)
    }

    /// Total time spent recharging, in hours.
    pub fn recharge_hours(&self) -> f64 {
        f64::from(self.recharge_stops()) * (self.recharge_minutes / 60.0)
    }

    /// Driving time plus recharge time, in hours.
    ///
    /// This is what the remote service computes; the client never uses it
    /// to second-guess the server's answer.
    pub fn total_hours(&self) -> f64 {
        self.driving_hours() + self.recharge_hours()
    }
}

/// Breakdown reported alongside the server's total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub driving_hours: f64,
    pub recharge_stops: u32,
    pub recharge_hours: f64,
    /// Whole hours of the total
    pub hours_part: u64,
    /// Remaining minutes of the total, always in `0..=59`
    pub minutes_part: u8,
}

impl DerivedMetrics {
    /// Derive the breakdown for a request and an authoritative total.
    pub fn derive(request: &TripRequest, total_hours: f64) -> Self {
        let (hours_part, minutes_part) = split_hours(total_hours);
        Self {
            driving_hours: request.driving_hours(),
            recharge_stops: request.recharge_stops(),
            recharge_hours: request.recharge_hours(),
            hours_part,
            minutes_part,
        }
    }
}

/// Split a duration in hours into whole hours and rounded minutes.
///
/// A fractional part that rounds up to 60 minutes carries into the hours.
/// Negative or NaN totals collapse to zero.
pub fn split_hours(total_hours: f64) -> (u64, u8) {
    let whole = total_hours.floor();
    let minutes = ((total_hours - whole) * 60.0).round();
    let hours = whole as u64;
    if minutes >= 60.0 {
        (hours + 1, 0)
    } else {
        (hours, minutes as u8)
    }
}

/// A successfully computed trip time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripTime {
    pub request: TripRequest,
    /// Total reported by the remote service (hours)
    pub total_hours: f64,
    pub breakdown: DerivedMetrics,
}

impl TripTime {
    /// Bundle the server total with the locally derived breakdown.
    pub fn new(request: TripRequest, total_hours: f64) -> Self {
        Self {
            request,
            total_hours,
            breakdown: DerivedMetrics::derive(&request, total_hours),
        }
    }

    /// Multi-line, human-readable summary of the trip.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TripTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.request;
        let b = &self.breakdown;
        writeln!(
            f,
            "Trajet de {:?}km à {:?}km/h avec une autonomie de {:?}km:",
            r.distance_km, r.speed_kmh, r.range_km
        )?;
        writeln!(f, "- Temps de conduite: {:.2}h", b.driving_hours)?;
        writeln!(f, "- Nombre de recharges: {}", b.recharge_stops)?;
        writeln!(f, "- Temps de recharge total: {:.2}h", b.recharge_hours)?;
        write!(f, "- Temps total: {}h{}min", b.hours_part, b.minutes_part)
    }
}

/// Outcome of one trip-time computation, as consumed by a display layer.
///
/// Either `total_hours` and `breakdown` are set, or `error` is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripTimeResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<DerivedMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TripTimeResult {
    pub fn success(trip: &TripTime) -> Self {
        Self {
            success: true,
            total_hours: Some(trip.total_hours),
            breakdown: Some(trip.breakdown),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            total_hours: None,
            breakdown: None,
            error: Some(error.into()),
        }
    }

    /// Normalize a typed outcome into a result object.
    pub fn from_outcome<E: fmt::Display>(outcome: Result<TripTime, E>) -> Self {
        match outcome {
            Ok(trip) => Self::success(&trip),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}
