mod operation;
mod tess_app;

pub use operation::TessOperation;
pub use tess_app::TessApp;
