pub mod isomap;
pub mod mds;
pub mod pca;

pub use isomap::Isomap;
pub use mds::classical_mds;
pub use mds::euclidean_mds;
pub use mds::MdsResult;
pub use pca::Pca;
pub use pca::PcaResult;
