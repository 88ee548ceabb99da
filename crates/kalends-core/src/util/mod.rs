pub mod datemath;
pub mod links;
