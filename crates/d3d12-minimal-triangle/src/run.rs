use eyre::WrapErr;
use tracing::error;
use tracing::info;
use windows::Win32::System::LibraryLoader::*;

use crate::create_window::create_window;
use crate::error::first_failure;
use crate::error::AppResult;
use crate::launch_options::LaunchOptions;
use crate::message_pump::drain_messages;
use crate::message_pump::PumpOutcome;
use crate::teardown::LifecycleObject;
use crate::teardown::Teardown;
use crate::triangle::renderer::Renderer;
use crate::window_class::register_window_class;

pub fn run(options: &LaunchOptions) -> AppResult<()> {
    let instance = unsafe { GetModuleHandleW(None) }.wrap_err("failed to get module handle")?;
    register_window_class(instance)?;

    let mut created = Vec::new();
    let window = create_window(instance, options)?;
    created.push(LifecycleObject::Window);

    let mut renderer = match Renderer::new(&window, options, &mut created) {
        Ok(renderer) => renderer,
        Err(e) => {
            window.discard();
            return Err(e);
        }
    };
    window.show();

    let loop_result = run_frames(&mut renderer);

    // Teardown runs even when a frame failed; the earliest error wins.
    let mut teardown = Teardown::new(created);
    let shutdown_result = renderer.shutdown(&mut teardown);
    let destroy_result = window.destroy(&mut teardown);

    first_failure([
        ("frame loop", loop_result),
        ("renderer shutdown", shutdown_result),
        ("window destroy", destroy_result),
    ])?;
    info!(complete = teardown.is_complete(), "shut down cleanly");
    Ok(())
}

fn run_frames(renderer: &mut Renderer) -> AppResult<()> {
    loop {
        if drain_messages() == PumpOutcome::Quit {
            return renderer.exit();
        }
        if let Err(e) = renderer.render_frame() {
            error!(error = ?e, "frame failed");
            renderer.log_debug_messages();
            return Err(e).wrap_err("render loop stopped");
        }
    }
}
