pub mod cpu;
pub mod driver;
pub mod surface;
