pub mod check;
pub mod downstream;
pub mod render;
pub mod upstream;

pub use check::check_command;
pub use downstream::downstream_command;
pub use render::render_command;
pub use upstream::upstream_command;
