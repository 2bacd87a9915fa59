pub mod identity;
pub mod unordered_array;
