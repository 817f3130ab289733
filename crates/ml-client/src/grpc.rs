//! gRPC client for the Python rating model service.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tonic::transport::Channel;
use tracing::{debug, error, info};

use catalog::{PredictorError, RatingPredictor};

use crate::rating::{
    rating_predictor_client::RatingPredictorClient as GrpcRatingPredictorClient,
    PredictRequest,
};

/// Rating predictor backed by the remote model service.
///
/// The service owns the trained model; this client only ships text
/// features over and checks that every text got exactly one rating back.
/// Cloning is cheap and shares the underlying channel.
#[derive(Clone)]
pub struct GrpcRatingPredictor {
    client: GrpcRatingPredictorClient<Channel>,
    service_addr: String,
}

impl GrpcRatingPredictor {
    /// Connect to the rating service.
    ///
    /// # Arguments
    /// * `addr` - Address of the gRPC service (e.g., "http://localhost:50051")
    pub async fn connect(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        info!("Connecting to rating service at {}", addr);

        let channel = Channel::from_shared(addr.clone())
            .context("Creating channel from address")?
            .connect()
            .await
            .context("Connecting to rating service")?;

        Ok(Self {
            client: GrpcRatingPredictorClient::new(channel),
            service_addr: addr,
        })
    }

    /// Predict ratings for a batch of text features.
    ///
    /// Returns one rating per input, in input order.
    pub async fn predict_batch(&self, texts: Vec<String>) -> Result<Vec<f64>, PredictorError> {
        let expected_len = texts.len();
        debug!("Requesting {} rating predictions", expected_len);

        // tonic clients need `&mut self`; clones share the same channel
        let mut client = self.client.clone();
        let response = client
            .predict_ratings(tonic::Request::new(PredictRequest { texts }))
            .await
            .map_err(|status| {
                error!("gRPC error while predicting ratings: {}", status);
                match status.code() {
                    tonic::Code::Unavailable => PredictorError::Connection(status.to_string()),
                    _ => PredictorError::Request(status.to_string()),
                }
            })?;

        let ratings = response.into_inner().ratings;
        if ratings.len() != expected_len {
            error!(
                "Mismatch in number of ratings returned: expected {}, got {}",
                expected_len,
                ratings.len()
            );
            return Err(PredictorError::InvalidResponse(format!(
                "expected {} ratings, got {}",
                expected_len,
                ratings.len()
            )));
        }
        Ok(ratings)
    }

    /// Get the address of the rating service this client is connected to.
    pub fn service_address(&self) -> &str {
        &self.service_addr
    }
}

#[async_trait]
impl RatingPredictor for GrpcRatingPredictor {
    fn name(&self) -> &str {
        "grpc"
    }

    async fn predict(&self, text: &str) -> Result<f64, PredictorError> {
        let ratings = self.predict_batch(vec![text.to_string()]).await?;
        // predict_batch already checked there is exactly one
        ratings
            .into_iter()
            .next()
            .ok_or_else(|| PredictorError::InvalidResponse("empty response".to_string()))
    }
}
