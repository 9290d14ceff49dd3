use honeycomb::prelude::*;
use honeycomb_examples::{init_tracing, respond, write_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A Caucasus-centered view, as the map viewer opens.
    let host = WebMercatorViewport::new(GeoCoord::new(42.0, 42.0), 5.0, 800.0, 600.0);

    let mut layer = HoneycombLayer::try_new(
        HoneycombConfig::new().with_side_length(20.0),
        PixelCanvas::default(),
        PixelCanvas::default(),
        VecSink::new(),
    )?;
    layer.on_attach(&host);

    let recompute = layer
        .sink()
        .last_recompute()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("attach did not request a recompute"))?;
    let request = HoneycombRequest::for_recompute("demo", &recompute, Method::Circle, 500);
    let body = request.to_json()?;
    tracing::info!(
        "Request for generation #{}: {} cells, {} bytes.",
        recompute.generation,
        request.cells.len(),
        body.len()
    );

    let response = HoneycombResponse::from_json(&respond(&request)?.to_json()?)?;
    match layer.apply_cell_data(&response.samples()) {
        RedrawOutcome::Drawn { filled } => tracing::info!("Filled {} hexagons.", filled),
        RedrawOutcome::Stale => anyhow::bail!("fresh response was considered stale"),
    }

    if let Some(marker) = layer.handle_click(glam::Vec2::new(400.0, 300.0)) {
        tracing::info!(
            "Clicked cell at ({}, {}) with intensity {}.",
            marker.center.x,
            marker.center.y,
            marker.intensity
        );
    }

    write_png(
        &[layer.surface(), layer.marker_surface()],
        &RenderConfig::default(),
        "honeycomb-basic.png",
    )
}
