pub mod load;
pub mod normalize;
pub mod query;
pub mod safety;
pub mod translate;
