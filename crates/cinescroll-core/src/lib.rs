pub mod clock;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod host;
pub mod input;
pub mod instances;
pub mod layout;
pub mod orbit;
pub mod orchestrator;
pub mod particles;
pub mod scroll;
pub mod session;
pub mod smoothing;
pub mod state;
pub mod tween;

pub use clock::*;
pub use config::*;
pub use constants::*;
pub use content::*;
pub use error::*;
pub use host::*;
pub use input::*;
pub use instances::*;
pub use layout::*;
pub use orbit::*;
pub use orchestrator::*;
pub use particles::*;
pub use scroll::*;
pub use session::*;
pub use smoothing::*;
pub use state::*;
pub use tween::*;
