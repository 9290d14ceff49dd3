//! JSON wire types for recompute requests and responses.
//!
//! A request carries the data-source id, the tiling's `[latitude, longitude]` pairs, and
//! the aggregation method; the response echoes each pair with an intensity appended.
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::events::RecomputeRequest;
use crate::layer::CellSample;

/// Largest number of cells a single request may carry.
pub const MAX_CELLS: usize = 10_000;

/// Longest accepted data-source id, exclusive.
pub const MAX_ID_LEN: usize = 200;

/// How the data source aggregates languages around a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// All languages within `parameter` kilometres.
    Circle,
    /// The `parameter` nearest languages.
    Neighbourhood,
}

/// Body of a recompute request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoneycombRequest {
    /// Identifier of the uploaded data file.
    pub id: String,
    /// Cell coordinates as `[latitude, longitude]`.
    pub cells: Vec<[f64; 2]>,
    pub method: Method,
    /// Circle radius or neighbourhood size.
    pub parameter: u32,
}

impl HoneycombRequest {
    /// Builds the request for a tiling generation.
    pub fn for_recompute(
        id: impl Into<String>,
        request: &RecomputeRequest,
        method: Method,
        parameter: u32,
    ) -> Self {
        Self {
            id: id.into(),
            cells: request.wire_cells(),
            method,
            parameter,
        }
    }

    /// Checks the limits a data source enforces.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() || self.id.chars().count() >= MAX_ID_LEN {
            return Err(Error::InvalidRequest("Invalid id.".into()));
        }
        if self.cells.len() > MAX_CELLS {
            return Err(Error::InvalidRequest("Invalid cells.".into()));
        }
        if self.parameter == 0 {
            return Err(Error::InvalidRequest("Invalid parameter.".into()));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses and validates a request body.
    pub fn from_json(body: &str) -> Result<Self> {
        let request: Self = serde_json::from_str(body)?;
        request.validate()?;
        Ok(request)
    }
}

/// Body of a successful recompute response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoneycombResponse {
    /// `[latitude, longitude, intensity]`, index-aligned with the request.
    pub cells: Vec<[f64; 3]>,
}

impl HoneycombResponse {
    pub fn samples(&self) -> Vec<CellSample> {
        self.cells.iter().copied().map(CellSample::from).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Body of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&Error> for ErrorResponse {
    fn from(value: &Error) -> Self {
        let error = match value {
            Error::InvalidRequest(msg) => msg.clone(),
            other => other.to_string(),
        };
        Self { error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoCoord;

    fn request() -> HoneycombRequest {
        HoneycombRequest {
            id: "berg".into(),
            cells: vec![[65.0, -22.0], [55.0, 50.0]],
            method: Method::Neighbourhood,
            parameter: 10,
        }
    }

    #[test]
    fn serializes_wire_shape() {
        let json = request().to_json().expect("serializable");
        assert_eq!(
            json,
            r#"{"id":"berg","cells":[[65.0,-22.0],[55.0,50.0]],"method":"neighbourhood","parameter":10}"#
        );
    }

    #[test]
    fn parses_and_validates_body() {
        let body = r#"{"id": "x", "cells": [[1, 2]], "method": "circle", "parameter": 500}"#;
        let parsed = HoneycombRequest::from_json(body).expect("valid body");
        assert_eq!(parsed.method, Method::Circle);
        assert_eq!(parsed.cells, vec![[1.0, 2.0]]);
    }

    #[test]
    fn rejects_malformed_bodies() {
        for body in [
            r#"{"id": "x", "cells": [[1, 2, 3]], "method": "circle", "parameter": 5}"#,
            r#"{"id": "x", "cells": [], "method": "square", "parameter": 5}"#,
            r#"{"id": "x", "cells": [], "method": "circle", "parameter": -5}"#,
            r#"{"id": "x", "cells": [], "method": "circle", "parameter": 5, "extra": 1}"#,
        ] {
            assert!(
                matches!(HoneycombRequest::from_json(body), Err(Error::Json(_))),
                "{body}"
            );
        }
    }

    #[test]
    fn validate_enforces_limits() {
        let mut r = request();
        r.id.clear();
        assert!(matches!(r.validate(), Err(Error::InvalidRequest(ref m)) if m == "Invalid id."));

        let mut r = request();
        r.id = "a".repeat(MAX_ID_LEN);
        assert!(r.validate().is_err());

        let mut r = request();
        r.cells = vec![[0.0, 0.0]; MAX_CELLS + 1];
        assert!(matches!(r.validate(), Err(Error::InvalidRequest(ref m)) if m == "Invalid cells."));

        let mut r = request();
        r.parameter = 0;
        assert!(
            matches!(r.validate(), Err(Error::InvalidRequest(ref m)) if m == "Invalid parameter.")
        );

        assert!(request().validate().is_ok());
    }

    #[test]
    fn builds_from_recompute_request() {
        let recompute = RecomputeRequest::new(
            4,
            vec![GeoCoord::new(10.0, 20.0), GeoCoord::new(11.0, 21.0)],
        );
        let r = HoneycombRequest::for_recompute("file", &recompute, Method::Circle, 300);
        assert_eq!(r.cells, vec![[10.0, 20.0], [11.0, 21.0]]);
        assert_eq!(r.id, "file");
    }

    #[test]
    fn response_yields_index_aligned_samples() {
        let body = r#"{"cells": [[10, 20, 0.5], [11, 21, 0]]}"#;
        let response = HoneycombResponse::from_json(body).expect("valid body");
        let samples = response.samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0], CellSample::from([10.0, 20.0, 0.5]));
        assert_eq!(samples[1].intensity, 0.0);
    }

    #[test]
    fn error_response_uses_plain_message() {
        let err = Error::InvalidRequest("Invalid id.".into());
        assert_eq!(ErrorResponse::from(&err).error, "Invalid id.");
        let json = serde_json::to_string(&ErrorResponse::from(&err)).expect("serializable");
        assert_eq!(json, r#"{"error":"Invalid id."}"#);
    }
}
