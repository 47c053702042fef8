pub mod algorithms;
pub mod canonicalize;
pub mod digest;
pub mod info;
pub mod lookup;
pub mod methods;
