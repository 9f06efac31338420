pub mod replace;
pub mod scan;
