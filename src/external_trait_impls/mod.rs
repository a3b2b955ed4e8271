#[cfg(feature = "rayon")]
mod rayon;
#[cfg(feature = "serde")]
mod serde;
