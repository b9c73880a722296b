mod app;
mod sync;

pub use app::Poddium;
pub(crate) use sync::ElementBinding;
