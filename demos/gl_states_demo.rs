//! GL states demo: per-actor blending and depth-test effects.
//!
//! Three rows of translucent red/green/blue squares are drawn under different
//! GL states:
//! - bottom row: blending and depth test disabled
//! - middle row: normal (straight alpha) blending with depth test
//! - top row: additive blending with depth test
//!
//! The loop renders at 900x768 and the camera turns one degree per tick. At
//! tick 400 the bottom row switches to additive blending; at tick 1000 the loop
//! stops and a 600x600 screenshot is written to `viz_fine_tuning_gl_context.png`.
//!
//! Run with: cargo run --example `gl_states_demo`

use fxscope::gl_states::{self, GlStatesDemo};
use fxscope::{Options, ShowManager};

fn main() -> fxscope::Result<()> {
    fxscope::init_logging();

    let scene = gl_states::build_scene()?;
    let options = Options::default()
        .with_window_size(gl_states::WINDOW_SIZE.0, gl_states::WINDOW_SIZE.1)
        .with_tick_interval_ms(gl_states::TICK_INTERVAL_MS);
    let mut showm = ShowManager::new(scene, options)?;

    let mut demo = GlStatesDemo::bind(&mut showm)?;
    showm.start(|m| demo.tick(m))?;

    let (width, height) = gl_states::OUTPUT_SIZE;
    fxscope::record(
        showm.scene(),
        showm.camera(),
        gl_states::OUTPUT_PATH,
        width,
        height,
    )?;

    log::info!(
        "finished after {} frames; screenshot saved to {}",
        demo.counter(),
        gl_states::OUTPUT_PATH
    );
    Ok(())
}
