use eyre::Result;
use kuka_arm_lib::{
    init_tracing, MotionConfig, Rig, DATA_FILE, DEFAULT_ACCELERATION, DEFAULT_STEPS,
};
use tracing::info;

fn main() -> Result<()> {
    let _guard = init_tracing();

    info!("Starting Kuka trajectory recorder");

    let mut rig = Rig::create(DATA_FILE)?;

    let demo = MotionConfig::kuka_demo(DEFAULT_ACCELERATION, DEFAULT_STEPS);
    info!(
        "Playing demo sequence: {} moves, {} samples (acceleration {}, {} steps per move)",
        demo.steps.len(),
        demo.total_samples(),
        DEFAULT_ACCELERATION,
        DEFAULT_STEPS
    );

    // On failure the rig is dropped here, which still syncs what was written.
    rig.run(&demo)?;

    info!("Final joint angles: {:?}", rig.angles());
    rig.finish()?;

    info!("Trajectory recorder shutting down");
    Ok(())
}
