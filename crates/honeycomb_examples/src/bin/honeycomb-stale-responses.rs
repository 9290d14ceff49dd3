//! Pans the map while a worker thread answers recompute requests out of order.
//! Only the response for the latest tiling is drawn.
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use honeycomb::prelude::*;
use honeycomb_examples::{init_tracing, respond, write_png, RenderConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn spawn_source(
    requests: Receiver<HoneycombEvent>,
    responses: Sender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pending = Vec::new();
        for event in requests.iter() {
            let HoneycombEvent::RecomputeRequested(recompute) = event else {
                continue;
            };
            let request =
                HoneycombRequest::for_recompute("demo", &recompute, Method::Neighbourhood, 10);
            match respond(&request).and_then(|r| r.to_json()) {
                Ok(body) => pending.push(body),
                Err(err) => tracing::warn!("Source rejected request: {}", err),
            }
            // Answer in reverse arrival order once a burst has queued up.
            if pending.len() == 3 || requests.is_empty() {
                thread::sleep(Duration::from_millis(rng.random_range(5..25)));
                while let Some(body) = pending.pop() {
                    if responses.send(body).is_err() {
                        return;
                    }
                }
            }
        }
    })
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let (event_tx, event_rx) = unbounded();
    let (response_tx, response_rx) = unbounded();
    let source = spawn_source(event_rx, response_tx);

    let mut host = WebMercatorViewport::new(GeoCoord::new(48.0, 20.0), 4.0, 640.0, 480.0);
    let mut layer = HoneycombLayer::try_new(
        HoneycombConfig::default(),
        PixelCanvas::default(),
        PixelCanvas::default(),
        ChannelSink::new(event_tx),
    )?;

    layer.on_attach(&host);
    for _ in 0..2 {
        host.pan_by(120.0, -40.0);
        layer.handle_viewport_changed(&host);
    }
    let final_generation = layer.generation();

    let mut drawn = 0;
    let mut dropped = 0;
    for body in response_rx.iter().take(3) {
        let response = HoneycombResponse::from_json(&body)?;
        match layer.apply_cell_data(&response.samples()) {
            RedrawOutcome::Drawn { filled } => {
                drawn += 1;
                tracing::info!(
                    "Drew generation {:?}: {} hexagons.",
                    final_generation,
                    filled
                );
            }
            RedrawOutcome::Stale => dropped += 1,
        }
    }
    tracing::info!("{} response(s) drawn, {} stale response(s) dropped.", drawn, dropped);

    layer.on_detach();
    drop(layer);
    source
        .join()
        .map_err(|_| anyhow::anyhow!("source thread panicked"))?;

    anyhow::ensure!(drawn == 1, "expected exactly one current response");

    // Render the final state again for inspection.
    let mut layer = HoneycombLayer::try_new(
        HoneycombConfig::default(),
        PixelCanvas::default(),
        PixelCanvas::default(),
        VecSink::new(),
    )?;
    layer.on_attach(&host);
    if let Some(recompute) = layer.sink().last_recompute().cloned() {
        let request =
            HoneycombRequest::for_recompute("demo", &recompute, Method::Neighbourhood, 10);
        layer.apply_cell_data(&respond(&request)?.samples());
    }
    write_png(
        &[layer.surface(), layer.marker_surface()],
        &RenderConfig::default(),
        "honeycomb-stale-responses.png",
    )
}
