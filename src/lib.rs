pub mod collection_catalog;
pub mod error;
pub mod normalization;
pub mod price_feed;
pub mod shared_types;
pub mod tradeup_engine;
