pub mod grid;
mod index;
