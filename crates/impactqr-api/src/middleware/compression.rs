//! Response compression layer.

use tower_http::compression::CompressionLayer;
use tower_http::compression::predicate::{And, DefaultPredicate, NotForContentType, Predicate};

/// Predicate used by [`build_compression_layer`].
pub type CompressionPredicate = And<DefaultPredicate, NotForContentType>;

/// Builds a gzip compression layer that leaves downloads untouched.
pub fn build_compression_layer() -> CompressionLayer<CompressionPredicate> {
    let predicate =
        DefaultPredicate::new().and(NotForContentType::const_new("application/octet-stream"));
    CompressionLayer::new().compress_when(predicate)
}
