mod dispatch;
mod status;
mod tenant;

pub mod dtos {
    pub use crate::dispatch::dtos::*;
    pub use crate::tenant::dtos::*;
}

pub use crate::dispatch::api::*;
pub use crate::status::api::*;
pub use crate::tenant::api::*;
