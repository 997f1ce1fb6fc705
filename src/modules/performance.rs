//! Summation benchmarks comparing sequential and rayon-parallel iteration.
//!
//! Every variant sums `1..=1_000_000` and answers `500000500000`.

use axum::{Json, Router, routing::get};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{info, instrument};

use hogwarts_core::AppError;

use crate::state::AppState;

pub const UPPER_BOUND: i64 = 1_000_000;

pub fn sum_fold() -> i64 {
    (1..=UPPER_BOUND).fold(0, |acc, n| acc + n)
}

pub fn sum_loop() -> i64 {
    let mut total = 0;
    for n in 1..=UPPER_BOUND {
        total += n;
    }
    total
}

pub fn sum_parallel() -> i64 {
    (1..=UPPER_BOUND).into_par_iter().sum()
}

pub fn sum_parallel_reduce() -> i64 {
    (1..=UPPER_BOUND).into_par_iter().reduce(|| 0, |a, b| a + b)
}

/// Runs `compute` on the blocking pool and logs how long it took.
async fn timed(variant: &'static str, compute: fn() -> i64) -> Result<Json<i64>, AppError> {
    let start = Instant::now();
    let total = tokio::task::spawn_blocking(compute)
        .await
        .map_err(AppError::internal)?;
    info!(variant, elapsed_us = start.elapsed().as_micros() as u64, "Summation finished");
    Ok(Json(total))
}

#[utoipa::path(get, path = "/test-performance/v1", responses((status = 200, body = i64)), tag = "Performance")]
#[instrument]
pub async fn sequential_fold() -> Result<Json<i64>, AppError> {
    timed("v1", sum_fold).await
}

#[utoipa::path(get, path = "/test-performance/v2", responses((status = 200, body = i64)), tag = "Performance")]
#[instrument]
pub async fn sequential_loop() -> Result<Json<i64>, AppError> {
    timed("v2", sum_loop).await
}

#[utoipa::path(get, path = "/test-performance/v3", responses((status = 200, body = i64)), tag = "Performance")]
#[instrument]
pub async fn parallel_sum() -> Result<Json<i64>, AppError> {
    timed("v3", sum_parallel).await
}

#[utoipa::path(get, path = "/test-performance/v4", responses((status = 200, body = i64)), tag = "Performance")]
#[instrument]
pub async fn parallel_reduce() -> Result<Json<i64>, AppError> {
    timed("v4", sum_parallel_reduce).await
}

pub fn init_performance_router() -> Router<AppState> {
    Router::new()
        .route("/v1", get(sequential_fold))
        .route("/v2", get(sequential_loop))
        .route("/v3", get(parallel_sum))
        .route("/v4", get(parallel_reduce))
}
