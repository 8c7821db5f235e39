mod bundle;
mod normalize;

pub use bundle::*;
pub use normalize::*;
