//! Rating predictors for the catalog.
//!
//! This crate provides the two ways CineMatch can turn a movie's text
//! feature into a rating:
//! - [`GrpcRatingPredictor`]: calls the Python model service over gRPC,
//!   which holds the trained model artifact
//! - [`LinearTextModel`]: evaluates an exported linear model in-process
//!
//! Both implement [`catalog::RatingPredictor`] and are built once at
//! start-up, then injected into the catalog.

pub mod artifact;
pub mod error;
pub mod grpc;

// Include the generated protobuf code
pub mod rating {
    tonic::include_proto!("rating");
}

pub use artifact::LinearTextModel;
pub use error::ModelArtifactError;
pub use grpc::GrpcRatingPredictor;
