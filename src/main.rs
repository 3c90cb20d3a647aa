//! Air Hockey entry point
//!
//! Runs a scripted headless match: both paddles shadow the puck, the frames
//! are handed to a logging render sink, and the final score is printed.
//! Window and GPU setup belong to the embedding renderer.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use air_hockey::Settings;
    use air_hockey::renderer::{FrameSnapshot, RenderSink};
    use air_hockey::sim::{GameEvent, GameState, TickInput, tick};

    /// Simulated frame length (60 Hz)
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Match length in frames
    const MATCH_FRAMES: u64 = 60 * 60;
    const DEFAULT_SETTINGS_PATH: &str = "air-hockey.json";

    /// Render sink that only keeps statistics
    #[derive(Default)]
    struct LogSink {
        frames: u64,
        draw_calls: u64,
        peak_particles: usize,
    }

    impl RenderSink for LogSink {
        fn submit(&mut self, frame: &FrameSnapshot<'_>) {
            self.frames += 1;
            self.draw_calls += frame.draw_call_count() as u64;
            self.peak_particles = self.peak_particles.max(frame.particle_quads());
            if self.frames % 600 == 0 {
                log::debug!(
                    "frame {}: {} draws, {} particle quads",
                    self.frames,
                    frame.draw_call_count(),
                    frame.particle_quads()
                );
            }
        }
    }

    /// Steer both paddles toward the puck, a little slower than it moves
    fn scripted_input(state: &GameState, frame: u64) -> TickInput {
        let mut input = TickInput::default();
        let puck = state.puck.position();
        let keys = &mut input.keys;

        let p1 = state.paddles[0].position();
        keys.w = puck.z > p1.z + 0.1;
        keys.s = puck.z < p1.z - 0.1;

        // Player two only reacts every other half second
        if (frame / 30) % 2 == 0 {
            let p2 = state.paddles[1].position();
            keys.i = puck.z > p2.z + 0.1;
            keys.k = puck.z < p2.z - 0.1;
        }
        input
    }

    pub fn run() -> air_hockey::Result<()> {
        let path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
        let settings = Settings::load_or_default(&path);

        let mut state = GameState::new(&settings)?;
        let mut sink = LogSink::default();
        let mut hits = 0u32;

        for frame in 0..MATCH_FRAMES {
            let input = scripted_input(&state, frame);
            tick(&mut state, &input, FRAME_DT);

            hits += state
                .events()
                .iter()
                .filter(|e| matches!(e, GameEvent::PaddleHit { .. }))
                .count() as u32;

            sink.submit(&state.snapshot());
        }

        let [one, two] = state.scores();
        log::info!(
            "Match over after {} frames: {} paddle hits, {} draw calls, peak {} particles",
            sink.frames,
            hits,
            sink.draw_calls,
            sink.peak_particles
        );
        println!("Player 1: {one}  Player 2: {two}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Air Hockey (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a host renderer on the web; nothing to run here
}
