use anyhow::{anyhow, Context, Result};
use glfw::{
    fail_on_errors, Action, ClientApiHint, Glfw, GlfwReceiver, Key, PWindow, WindowEvent,
    WindowHint, WindowMode,
};
use tracing::info;

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const WINDOW_TITLE: &str = "Vulkan Bootstrap";

/// Owns the native window and the GLFW context it came from.
pub struct WindowManager {
    glfw: Glfw,
    window: PWindow,
    receiver: GlfwReceiver<(f64, WindowEvent)>,
}

impl WindowManager {
    pub fn try_new() -> Result<Self> {
        info!("Initialize window");

        let mut glfw = glfw::init(fail_on_errors!())?;
        // rendering goes through Vulkan, keep GLFW from creating a GL context
        glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
        glfw.window_hint(WindowHint::Resizable(false));

        let (mut window, events) = glfw
            .create_window(
                WINDOW_WIDTH,
                WINDOW_HEIGHT,
                WINDOW_TITLE,
                WindowMode::Windowed,
            )
            .ok_or(anyhow!("Failed to create GLFW window"))?;

        window.set_key_polling(true);

        Ok(Self {
            glfw,
            window,
            receiver: events,
        })
    }

    /// The instance extensions the windowing system needs before a surface
    /// could ever be created on it.
    pub fn required_extensions(&self) -> Result<Vec<String>> {
        self.glfw
            .get_required_instance_extensions()
            .context("GLFW reports no Vulkan support")
    }

    pub fn run_event_loop(&mut self) {
        info!("Start loop");
        while !self.window.should_close() {
            self.glfw.poll_events();
            for (_, event) in glfw::flush_messages(&self.receiver) {
                match event {
                    WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                        self.window.set_should_close(true);
                    }
                    _ => {}
                }
            }
        }
        info!("Loop finished");
    }
}
