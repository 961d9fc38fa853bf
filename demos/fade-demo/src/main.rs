use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use glide_tween::{
    Easing, FixedTimestep, FrameDriver, LoopMode, Playback, StopBehavior, TweenChain,
    TweenManifest, TweenRunner, ValueTween,
};
use tracing_subscriber::EnvFilter;

/// Animation timing lives in data so it can be tuned without a rebuild.
const MANIFEST: &str = r#"{
    "tweens": {
        "fade_out": { "from": 1.0, "to": 0.0, "duration": 1.5, "easing": "quad_out", "event": 1 },
        "slide_in": { "from": [-120.0, 0.0], "to": [0.0, 0.0], "duration": 1.0, "easing": "back_out" },
        "settle":   { "from": [0.0, 0.0], "to": [0.0, 24.0], "duration": 0.5, "easing": "bounce_out" }
    }
}"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let manifest = TweenManifest::from_json(MANIFEST).expect("demo manifest is valid JSON");
    let runner = TweenRunner::new();

    // Runner path: a manifest-driven fade.
    let alpha = Rc::new(Cell::new(1.0f32));
    let fade = Playback::new(
        manifest
            .build_scalar("fade_out")
            .expect("fade_out is defined")
            .with_output(alpha.clone()),
    );
    fade.start(&runner);

    // Runner path: slide in, then settle, as one chained playback.
    let pos = Rc::new(Cell::new(Vec2::new(-120.0, 0.0)));
    let entrance = TweenChain::new()
        .then(
            manifest
                .build_vec2("slide_in")
                .expect("slide_in is defined")
                .with_output(pos.clone()),
        )
        .then(
            manifest
                .build_vec2("settle")
                .expect("settle is defined")
                .with_output(pos.clone()),
        );
    let entrance = Playback::new(entrance);
    entrance.start(&runner);

    // Driver path: an endless pulse attached to a host frame driver.
    let scale = Rc::new(Cell::new(1.0f32));
    let mut driver = FrameDriver::new();
    let pulse = Playback::new(
        ValueTween::new(1.0f32, 1.25, 0.4, Easing::SineInOut)
            .with_loop(LoopMode::PingPong)
            .with_output(scale.clone()),
    );
    pulse.start_on(&mut driver);

    log::info!("fade-demo: initialized");

    let mut timestep = FixedTimestep::new(1.0 / 60.0);
    for frame in 0..180u32 {
        // A real host would pass the measured frame delta here.
        let steps = timestep.accumulate(1.0 / 60.0);
        for _ in 0..steps {
            runner.tick(timestep.dt());
            driver.pump(timestep.dt());
        }

        if frame % 30 == 0 {
            log::info!(
                "frame {:3}: alpha {:.2}, pos ({:6.1}, {:5.1}), scale {:.2}",
                frame,
                alpha.get(),
                pos.get().x,
                pos.get().y,
                scale.get()
            );
        }

        if frame == 90 {
            // Freeze the pulse for a second to show pause keeps the task.
            pulse.pause();
        }
        if frame == 150 {
            pulse.resume();
        }
    }

    for event in runner.drain_events() {
        log::info!("completion event {}", event.0);
    }

    pulse.stop(StopBehavior::AsIs);
    driver.pump(timestep.dt());

    log::info!(
        "fade-demo: done ({} playbacks on the runner, {} driver tasks)",
        runner.len(),
        driver.len()
    );
}
