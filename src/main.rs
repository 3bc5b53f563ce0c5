use edgecam_rs::capture_pipeline::{
    BoardVariant, InferencePipeline, ReplayEngine, SensorId, SessionConfig, SimulatedDriver,
    empty_tensor,
};
use edgecam_rs::logger::{self, info, warn};

use anyhow::{Context, Result};

const CAPTURE_ROUNDS: usize = 3;

fn board_from_env() -> Result<BoardVariant> {
    match std::env::var("EDGECAM_BOARD") {
        Ok(name) => name
            .parse::<BoardVariant>()
            .map_err(anyhow::Error::msg)
            .context("EDGECAM_BOARD"),
        Err(_) => Ok(BoardVariant::default()),
    }
}

fn psram_from_env() -> bool {
    !matches!(
        std::env::var("EDGECAM_PSRAM").as_deref(),
        Ok("0") | Ok("false") | Ok("no")
    )
}

fn main() -> Result<()> {
    logger::init();

    info!("Starting edgecam...");

    let config = SessionConfig::builder()
        .board(board_from_env()?)
        .fast_memory(psram_from_env())
        .flash(true)
        .build();
    info!("Board: {}", config.board);
    info!(
        "External PSRAM: {}",
        if config.fast_memory { "present" } else { "absent" }
    );

    // Mid-gray test pattern from a simulated OV3660.
    let driver = SimulatedDriver::new(SensorId::Ov3660).with_fill_pixel([0x84, 0x10]);
    let engine = ReplayEngine::new(vec![-90, -60, 70, -120, 10]);
    let mut pipeline = InferencePipeline::new(driver, engine, config);

    pipeline.initialize().context("camera bring-up")?;

    let mut tensor = empty_tensor();
    for round in 1..=CAPTURE_ROUNDS {
        match pipeline.run_once_with_timings(&mut tensor) {
            Ok((classification, timings)) => {
                info!(
                    round,
                    label = classification.label,
                    score = classification.score,
                    "Detected"
                );
                timings.log_summary();
            }
            Err(e) => warn!(round, "Round skipped: {}", e),
        }
    }

    Ok(())
}
