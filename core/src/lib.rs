#![no_std]

extern crate alloc;

pub use effects::*;
pub use error::*;
pub use fortune::*;
pub use game::*;
pub use layout::*;
pub use nodes::*;
pub use scene::*;
pub use timeline::*;
pub use types::*;

mod effects;
mod error;
mod fortune;
mod game;
mod layout;
mod nodes;
mod scene;
mod timeline;
mod types;
