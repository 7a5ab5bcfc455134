// Middleware applied around the route tree

pub mod cors;

pub use cors::*;
