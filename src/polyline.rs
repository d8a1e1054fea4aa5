//! Route geometry and the Google encoded-polyline format.
//!
//! Routing services return geometry as a compact ASCII string (delta +
//! zig-zag + base64-offset 5-bit chunks). This module decodes that format
//! into coordinate sequences with bounds checking, and encodes back for
//! round-trip testing and re-export.

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::geo::Coordinate;

/// Coordinates carry five decimal places on the wire.
const PRECISION: f64 = 1e5;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Decode an encoded polyline string.
    ///
    /// Each point is two chunked varints (latitude delta, then longitude
    /// delta) accumulated into running totals scaled by 1e5. The empty
    /// string decodes to an empty polyline.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::InvalidEncoding`] if the input ends in the
    /// middle of a chunk, contains bytes outside the encoding alphabet, or
    /// accumulates to a coordinate outside geographic range. Never reads
    /// past the end of the input.
    pub fn decode(encoded: &str) -> Result<Self, PlannerError> {
        let bytes = encoded.as_bytes();
        let mut points = Vec::new();
        let mut cursor = 0usize;
        let mut lat: i64 = 0;
        let mut lon: i64 = 0;

        while cursor < bytes.len() {
            let point_start = cursor;
            let (dlat, next) = decode_delta(bytes, cursor)?;
            let (dlon, next) = decode_delta(bytes, next)?;
            cursor = next;

            lat += dlat;
            lon += dlon;

            let point = Coordinate::new(lat as f64 / PRECISION, lon as f64 / PRECISION)
                .map_err(|_| PlannerError::InvalidEncoding {
                    offset: point_start,
                })?;
            points.push(point);
        }

        Ok(Self { points })
    }

    /// Encode the polyline back into the compact wire format.
    ///
    /// Exact inverse of [`Polyline::decode`] for coordinates carrying at
    /// most five decimal places.
    pub fn encode(&self) -> String {
        let mut encoded = String::new();
        let mut prev_lat: i64 = 0;
        let mut prev_lon: i64 = 0;

        for point in &self.points {
            let lat = (point.lat() * PRECISION).round() as i64;
            let lon = (point.lon() * PRECISION).round() as i64;
            encode_delta(lat - prev_lat, &mut encoded);
            encode_delta(lon - prev_lon, &mut encoded);
            prev_lat = lat;
            prev_lon = lon;
        }

        encoded
    }
}

/// Decode one chunked varint starting at `cursor`.
///
/// Bytes are offset by 63; the low 5 bits accumulate with a stride of 5,
/// and bit 0x20 marks continuation. The accumulated value is zig-zag
/// decoded into a signed delta.
fn decode_delta(bytes: &[u8], mut cursor: usize) -> Result<(i64, usize), PlannerError> {
    let chunk_start = cursor;
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&raw) = bytes.get(cursor) else {
            // Continuation bit promised more input than exists.
            return Err(PlannerError::InvalidEncoding {
                offset: chunk_start,
            });
        };
        let Some(byte) = raw.checked_sub(63) else {
            return Err(PlannerError::InvalidEncoding { offset: cursor });
        };
        if shift >= u64::BITS {
            // More continuation bytes than any real delta needs.
            return Err(PlannerError::InvalidEncoding {
                offset: chunk_start,
            });
        }

        result |= u64::from(byte & 0x1f) << shift;
        shift += 5;
        cursor += 1;

        if byte < 0x20 {
            break;
        }
    }

    let half = (result >> 1) as i64;
    let delta = if result & 1 != 0 { !half } else { half };
    Ok((delta, cursor))
}

/// Encode one signed delta as a chunked varint.
fn encode_delta(delta: i64, out: &mut String) {
    // Zig-zag: fold the sign into the low bit.
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;

    while value >= 0x20 {
        out.push(((0x20 | (value & 0x1f)) as u8 + 63) as char);
        value >>= 5;
    }
    out.push((value as u8 + 63) as char);
}
