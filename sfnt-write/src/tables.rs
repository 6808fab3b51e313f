//! Writable versions of the tables a subset font is rebuilt from.

pub mod cmap;
pub mod hmtx;
pub mod loca;
pub mod maxp;
pub mod name;
pub mod post;
