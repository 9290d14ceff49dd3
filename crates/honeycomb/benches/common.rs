use std::time::Duration;

use criterion::{Criterion, Throughput};

pub const SAMPLE_SIZE: usize = 30;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// Common screen sizes a map container is rendered at.
pub const VIEWPORTS: [(f32, f32); 3] = [(640.0, 480.0), (1280.0, 720.0), (1920.0, 1080.0)];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn cells_throughput(cells: usize) -> Throughput {
    Throughput::Elements(cells.max(1) as u64)
}

pub fn viewport_label((w, h): (f32, f32)) -> String {
    format!("{w:.0}x{h:.0}")
}
