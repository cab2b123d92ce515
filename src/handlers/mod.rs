pub mod bins;
pub mod items;
pub mod search;
