#[macro_use]
mod utility;

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod format;
pub mod model;
pub mod navigation;
pub mod requests;
pub mod result;
pub mod storage;
pub mod view;

pub use crate::{
    auth::{Session, SessionState},
    client::{ApiClient, RequestOptions},
    config::{Config, ForbiddenPolicy},
    error::ClientError,
    navigation::{History, Navigator, View},
    result::{ApiResponse, ApiResult, Outcome},
};
