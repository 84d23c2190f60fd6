pub mod normalizer;
pub mod reconcile;
pub mod signature;
