pub mod process;
pub mod statreader;
pub mod system;

#[cfg(test)]
mod process_test;
