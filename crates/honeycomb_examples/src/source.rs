use honeycomb::prelude::*;

/// A smooth signed field over the globe standing in for the distance server.
///
/// Returns zero over a band around the equator to mimic cells without data.
pub fn synthetic_intensity(coord: GeoCoord) -> f64 {
    if coord.lat.abs() < 2.0 {
        return 0.0;
    }
    let v = (coord.lat / 3.0).sin() * (coord.lon / 4.0).cos() * 1.2;
    (v * 100.0).round() / 100.0
}

/// Answers a recompute request the way the data source would.
pub fn respond(request: &HoneycombRequest) -> Result<HoneycombResponse> {
    request.validate()?;
    let scale = match request.method {
        Method::Circle => 1.0,
        Method::Neighbourhood => 0.5 + (request.parameter.min(50) as f64) / 100.0,
    };
    let cells = request
        .cells
        .iter()
        .map(|&[lat, lon]| {
            let t = synthetic_intensity(GeoCoord::new(lat, lon)) * scale;
            [lat, lon, t]
        })
        .collect();
    Ok(HoneycombResponse { cells })
}
