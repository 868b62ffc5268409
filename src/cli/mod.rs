pub mod input;
pub mod menu;
pub mod render;

pub use input::Console;
pub use menu::run;
