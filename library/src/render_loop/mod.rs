pub mod clock;
pub mod progress;
pub mod progressive_render_loop;
pub mod scheduler;
pub mod state;
