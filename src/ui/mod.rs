pub mod app;
pub mod dashboard;
pub mod wireframe;

pub use app::App;
