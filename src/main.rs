//! Block Drop entry point
//!
//! The browser build starts from `platform::web`; natively this runs the
//! autoplay bot headless and logs the board as it goes.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use block_drop::consts::DEMO_FRAME_MS;
    use block_drop::platform::{Session, now_ms};
    use block_drop::sim::GameEvent;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::var("BLOCK_DROP_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(now_ms() as u64);
    log::info!("Block Drop (native) starting, seed {}", seed);
    log::info!("Native mode is a headless autoplay demo - build for wasm32 to play");

    let mut session = Session::new(seed);
    session.set_autoplay(true);

    // Ten simulated minutes at most
    let max_frames = 60 * 60 * 10;
    for _ in 0..max_frames {
        session.frame(DEMO_FRAME_MS);
        for event in session.take_events() {
            match event {
                GameEvent::LinesCleared { count } => {
                    log::info!(
                        "Cleared {} (total {}):\n{}",
                        count,
                        session.state.lines,
                        session.state.grid
                    );
                }
                GameEvent::LevelUp { level } => log::info!("Level {}", level),
                GameEvent::GameOver { score } => log::info!("Final score {}", score),
                _ => log::debug!("{:?}", event),
            }
        }
        if session.state.is_over() {
            break;
        }
    }

    println!("{}", session.state.composite());
    let state = &session.state;
    println!(
        "score {}  lines {}  level {}  pieces {}",
        state.score, state.lines, state.level, state.pieces_spawned
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
