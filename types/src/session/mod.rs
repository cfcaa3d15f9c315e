mod codec;
mod constants;
mod events;
mod state;

pub use codec::{read_string, string_encode_size, write_string};
pub use constants::*;
pub use events::*;
pub use state::*;
